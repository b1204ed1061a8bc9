//! TTS Engine Port - 语音合成服务抽象
//!
//! 定义 TTS 服务的抽象接口，具体实现在 infrastructure/adapters 层

use async_trait::async_trait;
use std::path::PathBuf;
use thiserror::Error;

use crate::domain::voice::VoiceEntry;

/// TTS 错误
#[derive(Debug, Error)]
pub enum TtsError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Request timeout")]
    Timeout,

    #[error("Service error: {0}")]
    ServiceError(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// API key 缺少 voices_read 权限时的常见情况
    #[error("Cannot list voices (the API key may lack the voices_read permission): {0}")]
    VoiceListUnavailable(String),

    #[error("IO error: {0}")]
    IoError(String),
}

/// 语音合成请求
#[derive(Debug, Clone)]
pub struct SynthesisRequest {
    /// 要合成的文本内容
    pub text: String,
    /// 服务商音色 ID
    pub voice_id: String,
}

impl SynthesisRequest {
    pub fn new(text: impl Into<String>, voice_id: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            voice_id: voice_id.into(),
        }
    }

    /// 在访问服务商之前拒绝空文本或空音色
    pub fn validate(&self) -> Result<(), TtsError> {
        if self.text.is_empty() {
            return Err(TtsError::InvalidInput("text is empty".to_string()));
        }
        if self.voice_id.is_empty() {
            return Err(TtsError::InvalidInput("voice_id is empty".to_string()));
        }
        Ok(())
    }
}

/// 合成结果
#[derive(Debug, Clone)]
pub struct SynthesizedAudio {
    /// 音频文件路径（每个请求唯一）
    pub path: PathBuf,
    /// 写入的字节数
    pub size_bytes: u64,
}

/// TTS Engine Port
///
/// 外部 TTS 服务的抽象接口
#[async_trait]
pub trait TtsEnginePort: Send + Sync {
    /// 列出服务商的全部音色
    async fn list_voices(&self) -> Result<Vec<VoiceEntry>, TtsError>;

    /// 合成语音并流式写入本地文件
    async fn synthesize_to_file(
        &self,
        request: SynthesisRequest,
    ) -> Result<SynthesizedAudio, TtsError>;

    /// 投递完成后删除临时音频文件
    async fn discard(&self, audio: &SynthesizedAudio) {
        if let Err(e) = tokio::fs::remove_file(&audio.path).await {
            tracing::debug!(path = %audio.path.display(), error = %e, "Failed to remove staged audio");
        }
    }
}
