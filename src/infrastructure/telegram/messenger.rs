//! Telegram Messenger - MessengerPort 的 teloxide 实现

use async_trait::async_trait;
use std::path::Path;
use teloxide::prelude::*;
use teloxide::types::{InputFile, KeyboardButton, KeyboardMarkup, MessageId, ReplyParameters};

use crate::application::ports::{MessengerError, MessengerPort, ReplyTarget};

/// 语音消息附件的文件名
const VOICE_FILE_NAME: &str = "voice.ogg";

/// 音色键盘每行按钮数
pub const DEFAULT_KEYBOARD_COLUMNS: usize = 2;

pub struct TelegramMessenger {
    bot: Bot,
    keyboard_columns: usize,
}

impl TelegramMessenger {
    pub fn new(bot: Bot) -> Self {
        Self {
            bot,
            keyboard_columns: DEFAULT_KEYBOARD_COLUMNS,
        }
    }

    pub fn with_keyboard_columns(mut self, columns: usize) -> Self {
        self.keyboard_columns = columns.max(1);
        self
    }
}

/// 把标签按行切分
pub fn keyboard_rows(labels: &[String], columns: usize) -> Vec<Vec<String>> {
    labels
        .chunks(columns.max(1))
        .map(|row| row.to_vec())
        .collect()
}

fn send_error(e: teloxide::RequestError) -> MessengerError {
    MessengerError::SendFailed(e.to_string())
}

fn reply_to(target: ReplyTarget) -> ReplyParameters {
    ReplyParameters::new(MessageId(target.message_id))
}

#[async_trait]
impl MessengerPort for TelegramMessenger {
    async fn reply_text(&self, target: ReplyTarget, text: &str) -> Result<(), MessengerError> {
        self.bot
            .send_message(ChatId(target.chat_id), text)
            .reply_parameters(reply_to(target))
            .await
            .map_err(send_error)?;
        Ok(())
    }

    async fn send_text(&self, chat_id: i64, text: &str) -> Result<(), MessengerError> {
        self.bot
            .send_message(ChatId(chat_id), text)
            .await
            .map_err(send_error)?;
        Ok(())
    }

    async fn reply_with_keyboard(
        &self,
        target: ReplyTarget,
        text: &str,
        labels: &[String],
    ) -> Result<(), MessengerError> {
        let rows = keyboard_rows(labels, self.keyboard_columns)
            .into_iter()
            .map(|row| row.into_iter().map(KeyboardButton::new).collect::<Vec<_>>());
        let keyboard = KeyboardMarkup::new(rows).resize_keyboard();

        self.bot
            .send_message(ChatId(target.chat_id), text)
            .reply_parameters(reply_to(target))
            .reply_markup(keyboard)
            .await
            .map_err(send_error)?;
        Ok(())
    }

    async fn send_audio(
        &self,
        chat_id: i64,
        path: &Path,
        caption: &str,
    ) -> Result<(), MessengerError> {
        if !path.is_file() {
            return Err(MessengerError::InvalidAttachment(format!(
                "Audio file not found: {}",
                path.display()
            )));
        }

        self.bot
            .send_audio(ChatId(chat_id), InputFile::file(path))
            .caption(caption)
            .await
            .map_err(send_error)?;
        Ok(())
    }

    async fn send_voice(
        &self,
        chat_id: i64,
        ogg_opus: Vec<u8>,
        caption: &str,
    ) -> Result<(), MessengerError> {
        if ogg_opus.is_empty() {
            return Err(MessengerError::InvalidAttachment("Voice payload is empty".to_string()));
        }

        self.bot
            .send_voice(ChatId(chat_id), InputFile::memory(ogg_opus).file_name(VOICE_FILE_NAME))
            .caption(caption)
            .await
            .map_err(send_error)?;
        Ok(())
    }
}
