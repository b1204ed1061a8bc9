//! 应用层 - 命令
//!
//! 每个入站消息最终落到一个命令及其处理器

mod synthesis_commands;
mod voice_commands;

pub mod handlers;

pub use synthesis_commands::*;
pub use voice_commands::*;
