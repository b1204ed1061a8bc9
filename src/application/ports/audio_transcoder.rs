//! Audio Transcoder Port - 音频转码抽象
//!
//! MP3 -> OGG/Opus，用于 Telegram 语音消息

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// 转码错误
#[derive(Debug, Error)]
pub enum TranscodeError {
    #[error("Transcoder not found: {0}")]
    Unavailable(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Failed to run transcoder {path}: {message}")]
    SpawnFailed { path: PathBuf, message: String },

    /// 非零退出码或输出为空，stderr 已截断
    #[error("Transcoder failed ({status}): {stderr}")]
    ProcessFailed { status: String, stderr: String },
}

/// 转码配置
#[derive(Debug, Clone)]
pub struct TranscodeConfig {
    /// 目标比特率（ffmpeg 格式，如 "64k"）
    pub bitrate: String,
}

impl Default for TranscodeConfig {
    fn default() -> Self {
        Self {
            bitrate: "64k".to_string(),
        }
    }
}

/// Audio Transcoder Port
#[async_trait]
pub trait AudioTranscoderPort: Send + Sync {
    /// 把 MP3 文件转成单声道 OGG/Opus，整个结果缓存在内存中返回
    async fn mp3_to_ogg_opus(
        &self,
        mp3_path: &Path,
        config: &TranscodeConfig,
    ) -> Result<Vec<u8>, TranscodeError>;
}
