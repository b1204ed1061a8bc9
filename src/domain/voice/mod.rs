//! Voice Context - 音色限界上下文
//!
//! 职责:
//! - 音色目录（显示名称 -> 服务商 voice_id）
//! - 用户的音色选择

mod catalog;
mod errors;
mod selection;
mod value_objects;

pub use catalog::{VoiceCatalog, VoiceEntry, FALLBACK_VOICE_NAME};
pub use errors::VoiceError;
pub use selection::VoiceSelection;
pub use value_objects::{UserId, VoiceId, VoiceName};
