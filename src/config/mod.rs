//! Configuration Module
//!
//! 提供应用配置管理功能，支持多层级配置来源：
//! - 带前缀的环境变量（最高优先级）
//! - 配置文件（TOML 格式）
//! - 固定名称的环境变量（BOT_TOKEN、ELEVENLABS_API_KEY、ELEVENLABS_VOICE_ID、FFMPEG）
//! - 默认值（最低优先级）

mod loader;
mod types;

pub use loader::{load_config, load_config_from_path, print_config, ConfigError};
pub use types::{
    mask_secret, AppConfig, LogConfig, StorageConfig, TelegramConfig, TranscoderConfig, TtsConfig,
    TtsEngineKind,
};
