//! Voice Command Handlers

use std::sync::Arc;

use crate::application::commands::{SelectVoice, ShowVoiceMenu};
use crate::application::error::ApplicationError;
use crate::application::ports::{MessengerPort, SelectionStorePort};
use crate::application::replies;
use crate::domain::voice::{VoiceCatalog, VoiceId, VoiceName, VoiceSelection};

// ============================================================================
// ShowVoiceMenu
// ============================================================================

/// ShowVoiceMenu Handler
pub struct ShowVoiceMenuHandler {
    catalog: Arc<VoiceCatalog>,
    messenger: Arc<dyn MessengerPort>,
}

impl ShowVoiceMenuHandler {
    pub fn new(catalog: Arc<VoiceCatalog>, messenger: Arc<dyn MessengerPort>) -> Self {
        Self { catalog, messenger }
    }

    pub async fn handle(&self, command: ShowVoiceMenu) -> Result<(), ApplicationError> {
        let labels: Vec<String> = self
            .catalog
            .names()
            .map(|name| name.as_str().to_string())
            .collect();

        self.messenger
            .reply_with_keyboard(command.target, replies::WELCOME, &labels)
            .await?;

        tracing::debug!(chat_id = command.target.chat_id, voices = labels.len(), "Voice menu sent");
        Ok(())
    }
}

// ============================================================================
// SelectVoice
// ============================================================================

/// 选择结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectVoiceResponse {
    Selected { voice_id: VoiceId },
    /// 名称在目录中但找不到对应的 voice_id，已提示用户重新 /start
    NotFound,
}

/// SelectVoice Handler
pub struct SelectVoiceHandler {
    catalog: Arc<VoiceCatalog>,
    selections: Arc<dyn SelectionStorePort>,
    messenger: Arc<dyn MessengerPort>,
}

impl SelectVoiceHandler {
    pub fn new(
        catalog: Arc<VoiceCatalog>,
        selections: Arc<dyn SelectionStorePort>,
        messenger: Arc<dyn MessengerPort>,
    ) -> Self {
        Self {
            catalog,
            selections,
            messenger,
        }
    }

    pub async fn handle(&self, command: SelectVoice) -> Result<SelectVoiceResponse, ApplicationError> {
        let lookup = self
            .catalog
            .voice_id(&command.voice_name)
            .cloned()
            .zip(VoiceName::new(command.voice_name.clone()).ok());

        let Some((voice_id, voice_name)) = lookup else {
            tracing::warn!(
                user_id = %command.user_id,
                voice_name = %command.voice_name,
                "Selected voice has no catalog id"
            );
            self.messenger
                .reply_text(command.target, replies::VOICE_NOT_FOUND)
                .await?;
            return Ok(SelectVoiceResponse::NotFound);
        };

        self.selections
            .select(command.user_id, VoiceSelection::new(voice_id.clone(), voice_name));

        tracing::info!(
            user_id = %command.user_id,
            voice_id = %voice_id,
            voice_name = %command.voice_name,
            "Voice selected"
        );

        self.messenger
            .reply_text(command.target, &replies::voice_selected(&command.voice_name))
            .await?;

        Ok(SelectVoiceResponse::Selected { voice_id })
    }
}
