//! Fake TTS Client - 离线运行用的 TTS 客户端
//!
//! 不调用外部服务，始终返回一份固定的音频文件

use async_trait::async_trait;
use std::path::PathBuf;
use uuid::Uuid;

use crate::application::ports::{SynthesisRequest, SynthesizedAudio, TtsEnginePort, TtsError};
use crate::domain::voice::{VoiceEntry, VoiceId, VoiceName};

/// Fake TTS Client 配置
#[derive(Debug, Clone)]
pub struct FakeTtsClientConfig {
    /// 固定返回的 MP3 文件路径
    pub audio_file_path: PathBuf,
    /// 暂存目录
    pub audio_dir: PathBuf,
}

/// Fake TTS Client
///
/// 目录中只有一个 "Fake" 音色；每次合成把固定音频复制到新的暂存文件
pub struct FakeTtsClient {
    config: FakeTtsClientConfig,
    audio_data: Vec<u8>,
}

impl FakeTtsClient {
    pub const VOICE_NAME: &'static str = "Fake";
    pub const VOICE_ID: &'static str = "fake-voice";

    pub fn new(config: FakeTtsClientConfig) -> Result<Self, std::io::Error> {
        let audio_data = std::fs::read(&config.audio_file_path)?;
        tracing::info!(
            path = %config.audio_file_path.display(),
            size = audio_data.len(),
            "FakeTtsClient initialized"
        );
        Ok(Self { config, audio_data })
    }
}

#[async_trait]
impl TtsEnginePort for FakeTtsClient {
    async fn list_voices(&self) -> Result<Vec<VoiceEntry>, TtsError> {
        let name = VoiceName::new(Self::VOICE_NAME).map_err(|e| TtsError::InvalidResponse(e.to_string()))?;
        let id = VoiceId::new(Self::VOICE_ID).map_err(|e| TtsError::InvalidResponse(e.to_string()))?;
        Ok(vec![VoiceEntry::new(name, id)])
    }

    async fn synthesize_to_file(
        &self,
        request: SynthesisRequest,
    ) -> Result<SynthesizedAudio, TtsError> {
        request.validate()?;

        tracing::debug!(
            text_len = request.text.len(),
            voice_id = %request.voice_id,
            "FakeTtsClient: returning fixed audio"
        );

        tokio::fs::create_dir_all(&self.config.audio_dir)
            .await
            .map_err(|e| TtsError::IoError(e.to_string()))?;
        let path = self.config.audio_dir.join(format!("{}.mp3", Uuid::new_v4()));
        tokio::fs::write(&path, &self.audio_data)
            .await
            .map_err(|e| TtsError::IoError(e.to_string()))?;

        Ok(SynthesizedAudio {
            path,
            size_bytes: self.audio_data.len() as u64,
        })
    }
}
