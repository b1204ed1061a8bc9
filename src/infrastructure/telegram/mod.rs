//! Telegram Integration
//!
//! - messenger: MessengerPort 的实现（文本、键盘、音频、语音消息）
//! - bot: Dispatcher 启动与入站消息转换

mod bot;
mod messenger;

pub use bot::{to_incoming, TelegramBot};
pub use messenger::{keyboard_rows, TelegramMessenger, DEFAULT_KEYBOARD_COLUMNS};
