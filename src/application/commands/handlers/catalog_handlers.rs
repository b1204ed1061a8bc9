//! Catalog Command Handlers

use std::sync::Arc;

use crate::application::commands::LoadVoiceCatalog;
use crate::application::error::ApplicationError;
use crate::application::ports::TtsEnginePort;
use crate::domain::voice::{VoiceCatalog, VoiceError, VoiceId};

/// LoadVoiceCatalog Handler
///
/// 启动时执行一次：优先向服务商拉取完整音色列表，失败时退化为
/// 只含 "Default" 一项的目录；两者都不可用时返回错误，由调用方终止启动。
pub struct LoadVoiceCatalogHandler {
    tts_engine: Arc<dyn TtsEnginePort>,
}

impl LoadVoiceCatalogHandler {
    pub fn new(tts_engine: Arc<dyn TtsEnginePort>) -> Self {
        Self { tts_engine }
    }

    pub async fn handle(&self, command: LoadVoiceCatalog) -> Result<VoiceCatalog, ApplicationError> {
        let fetched = match self.tts_engine.list_voices().await {
            Ok(entries) => {
                let catalog = VoiceCatalog::from_entries(entries);
                if catalog.is_empty() {
                    Err(ApplicationError::from(VoiceError::EmptyCatalog))
                } else {
                    Ok(catalog)
                }
            }
            Err(e) => Err(ApplicationError::from(e)),
        };

        let error = match fetched {
            Ok(catalog) => {
                tracing::info!(voices = catalog.len(), "Voice catalog loaded");
                return Ok(catalog);
            }
            Err(e) => e,
        };

        let Some(fallback) = command.fallback_voice_id.filter(|id| !id.trim().is_empty()) else {
            tracing::error!(error = %error, "Voice catalog unavailable and no fallback voice configured");
            return Err(error);
        };

        tracing::warn!(
            error = %error,
            fallback_voice_id = %fallback,
            "Voice catalog unavailable, using fallback voice"
        );

        let voice_id = VoiceId::new(fallback).map_err(|e| VoiceError::InvalidId(e.to_string()))?;
        Ok(VoiceCatalog::fallback(voice_id))
    }
}
