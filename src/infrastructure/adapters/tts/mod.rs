//! TTS Adapter - ElevenLabs 客户端与离线替身

mod elevenlabs_client;
mod fake_tts_client;

pub use elevenlabs_client::{ElevenLabsClient, ElevenLabsClientConfig};
pub use fake_tts_client::{FakeTtsClient, FakeTtsClientConfig};
