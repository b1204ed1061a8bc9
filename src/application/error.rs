//! 应用层错误定义
//!
//! 统一的命令处理错误类型

use thiserror::Error;

use crate::application::ports::{MessengerError, TranscodeError, TtsError};
use crate::domain::voice::VoiceError;

/// 应用层错误
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// 音色目录不可用
    #[error("Voice catalog error: {0}")]
    CatalogError(String),

    /// TTS 服务错误
    #[error(transparent)]
    Tts(#[from] TtsError),

    /// 转码错误
    #[error(transparent)]
    Transcode(#[from] TranscodeError),

    /// 消息发送错误
    #[error(transparent)]
    Messenger(#[from] MessengerError),
}

impl From<VoiceError> for ApplicationError {
    fn from(err: VoiceError) -> Self {
        Self::CatalogError(err.to_string())
    }
}
