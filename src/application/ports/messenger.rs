//! Messenger Port - 消息平台出站接口
//!
//! 具体实现在 infrastructure/telegram 层

use async_trait::async_trait;
use std::path::Path;
use thiserror::Error;

/// 消息发送错误
#[derive(Debug, Error)]
pub enum MessengerError {
    #[error("Failed to send message: {0}")]
    SendFailed(String),

    #[error("Invalid attachment: {0}")]
    InvalidAttachment(String),
}

/// 回复目标：所在会话与被回复的消息
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReplyTarget {
    pub chat_id: i64,
    pub message_id: i32,
}

impl ReplyTarget {
    pub fn new(chat_id: i64, message_id: i32) -> Self {
        Self {
            chat_id,
            message_id,
        }
    }
}

/// Messenger Port
#[async_trait]
pub trait MessengerPort: Send + Sync {
    /// 以回复形式发送纯文本
    async fn reply_text(&self, target: ReplyTarget, text: &str) -> Result<(), MessengerError>;

    /// 发送纯文本（不引用原消息）
    async fn send_text(&self, chat_id: i64, text: &str) -> Result<(), MessengerError>;

    /// 以回复形式发送文本并附带按钮键盘，每个标签一个按钮
    async fn reply_with_keyboard(
        &self,
        target: ReplyTarget,
        text: &str,
        labels: &[String],
    ) -> Result<(), MessengerError>;

    /// 发送音频文件附件
    async fn send_audio(
        &self,
        chat_id: i64,
        path: &Path,
        caption: &str,
    ) -> Result<(), MessengerError>;

    /// 发送语音消息（OGG/Opus 字节）
    async fn send_voice(
        &self,
        chat_id: i64,
        ogg_opus: Vec<u8>,
        caption: &str,
    ) -> Result<(), MessengerError>;
}
