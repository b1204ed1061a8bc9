//! Application Ports - 出站端口定义
//!
//! 定义应用层与基础设施层的抽象接口

mod audio_transcoder;
mod messenger;
mod selection_store;
mod tts_engine;

pub use audio_transcoder::{AudioTranscoderPort, TranscodeConfig, TranscodeError};
pub use messenger::{MessengerError, MessengerPort, ReplyTarget};
pub use selection_store::SelectionStorePort;
pub use tts_engine::{SynthesisRequest, SynthesizedAudio, TtsEnginePort, TtsError};
