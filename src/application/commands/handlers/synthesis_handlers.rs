//! Synthesis Command Handlers

use std::path::Path;
use std::sync::Arc;

use crate::application::commands::SynthesizeSpeech;
use crate::application::error::ApplicationError;
use crate::application::ports::{
    AudioTranscoderPort, MessengerPort, ReplyTarget, SelectionStorePort, SynthesisRequest,
    TranscodeConfig, TtsEnginePort,
};
use crate::application::replies;

/// 合成请求的处理结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SynthesisOutcome {
    /// 用户尚未选择音色，已提示
    NoVoiceSelected,
    /// 文本为空，已提示
    EmptyText,
    /// 合成或 MP3 投递失败，错误已回复给用户
    Failed,
    /// MP3 已投递，语音消息转换失败（已另行说明）
    AudioOnly,
    /// MP3 与语音消息均已投递
    Delivered,
}

/// SynthesizeSpeech Handler
///
/// 顺序: 合成 MP3 -> 发送 MP3 -> 转码为 OGG/Opus -> 发送语音消息。
/// 只有最后一步失败时降级处理，用户仍然收到 MP3。
pub struct SynthesizeSpeechHandler {
    tts_engine: Arc<dyn TtsEnginePort>,
    transcoder: Arc<dyn AudioTranscoderPort>,
    selections: Arc<dyn SelectionStorePort>,
    messenger: Arc<dyn MessengerPort>,
    transcode_config: TranscodeConfig,
}

impl SynthesizeSpeechHandler {
    pub fn new(
        tts_engine: Arc<dyn TtsEnginePort>,
        transcoder: Arc<dyn AudioTranscoderPort>,
        selections: Arc<dyn SelectionStorePort>,
        messenger: Arc<dyn MessengerPort>,
        transcode_config: TranscodeConfig,
    ) -> Self {
        Self {
            tts_engine,
            transcoder,
            selections,
            messenger,
            transcode_config,
        }
    }

    pub async fn handle(&self, command: SynthesizeSpeech) -> Result<SynthesisOutcome, ApplicationError> {
        let Some(selection) = self.selections.get(command.user_id) else {
            tracing::debug!(user_id = %command.user_id, "Synthesis requested without a selected voice");
            self.messenger
                .reply_text(command.target, replies::NO_VOICE_SELECTED)
                .await?;
            return Ok(SynthesisOutcome::NoVoiceSelected);
        };

        let text = command.text.trim();
        if text.is_empty() {
            self.messenger
                .reply_text(command.target, replies::EMPTY_TEXT)
                .await?;
            return Ok(SynthesisOutcome::EmptyText);
        }

        tracing::info!(
            user_id = %command.user_id,
            voice_id = %selection.voice_id,
            text_len = text.len(),
            "Synthesizing speech"
        );

        let request = SynthesisRequest::new(text, selection.voice_id.as_str());
        let audio = match self.tts_engine.synthesize_to_file(request).await {
            Ok(audio) => audio,
            Err(e) => return self.report_failure(command.target, e.into()).await,
        };

        let delivered = self.deliver(command.target.chat_id, &audio.path).await;
        self.tts_engine.discard(&audio).await;

        match delivered {
            Ok(outcome) => Ok(outcome),
            Err(e) => self.report_failure(command.target, e).await,
        }
    }

    /// 发送 MP3，然后尝试发送语音消息
    async fn deliver(&self, chat_id: i64, mp3_path: &Path) -> Result<SynthesisOutcome, ApplicationError> {
        self.messenger
            .send_audio(chat_id, mp3_path, replies::AUDIO_CAPTION)
            .await?;

        match self.send_voice(chat_id, mp3_path).await {
            Ok(()) => Ok(SynthesisOutcome::Delivered),
            Err(e) => {
                tracing::warn!(chat_id = chat_id, error = %e, "Voice message conversion failed");
                self.messenger
                    .send_text(chat_id, &replies::conversion_failed(&e))
                    .await?;
                Ok(SynthesisOutcome::AudioOnly)
            }
        }
    }

    async fn send_voice(&self, chat_id: i64, mp3_path: &Path) -> Result<(), ApplicationError> {
        let ogg_opus = self
            .transcoder
            .mp3_to_ogg_opus(mp3_path, &self.transcode_config)
            .await?;
        self.messenger
            .send_voice(chat_id, ogg_opus, replies::VOICE_CAPTION)
            .await?;
        Ok(())
    }

    async fn report_failure(
        &self,
        target: ReplyTarget,
        error: ApplicationError,
    ) -> Result<SynthesisOutcome, ApplicationError> {
        tracing::error!(chat_id = target.chat_id, error = %error, "Speech synthesis failed");
        self.messenger
            .reply_text(target, &replies::synthesis_failed(&error))
            .await?;
        Ok(SynthesisOutcome::Failed)
    }
}
