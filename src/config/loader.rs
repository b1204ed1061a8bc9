//! Configuration Loader
//!
//! 实现多源配置加载与合并逻辑
//!
//! 优先级（从高到低）：
//! 1. 带前缀的环境变量（`ZEROTTS_`）
//! 2. 配置文件（config.toml）
//! 3. 固定名称的环境变量（`BOT_TOKEN` 等）
//! 4. 默认值

use config::{Config, ConfigError as ConfigCrateError, Environment, File};
use std::path::Path;
use thiserror::Error;

use super::types::{mask_secret, AppConfig, TtsEngineKind};

/// 配置加载错误
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    LoadError(String),

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Configuration validation failed: {0}")]
    ValidationError(String),
}

impl From<ConfigCrateError> for ConfigError {
    fn from(err: ConfigCrateError) -> Self {
        ConfigError::LoadError(err.to_string())
    }
}

/// 配置文件搜索路径
const CONFIG_FILE_NAMES: &[&str] = &["config", "config.local"];

/// 固定名称环境变量 -> 配置键
const FIXED_ENV_KEYS: &[(&str, &str)] = &[
    ("BOT_TOKEN", "telegram.bot_token"),
    ("ELEVENLABS_API_KEY", "tts.api_key"),
    ("ELEVENLABS_VOICE_ID", "tts.fallback_voice_id"),
    ("FFMPEG", "transcoder.ffmpeg_path"),
];

/// 加载应用配置
///
/// # 环境变量示例
/// - `BOT_TOKEN=123456:ABC`
/// - `ELEVENLABS_API_KEY=sk_...`
/// - `ELEVENLABS_VOICE_ID=21m00Tcm4TlvDq8ikWAM`
/// - `ZEROTTS_TRANSCODER__BITRATE=48k`
/// - `ZEROTTS_LOG__LEVEL=debug`
pub fn load_config() -> Result<AppConfig, ConfigError> {
    load_config_from_path(None)
}

/// 从指定路径加载配置
///
/// # 参数
/// - `config_path` - 可选的配置文件路径，如果为 None 则使用默认搜索路径
pub fn load_config_from_path(config_path: Option<&Path>) -> Result<AppConfig, ConfigError> {
    load_with_env(config_path, |name| std::env::var(name).ok())
}

fn load_with_env<F>(config_path: Option<&Path>, fixed_env: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let mut builder = Config::builder();

    // 1. 固定名称的环境变量作为对应键的默认值
    for (env_name, key) in FIXED_ENV_KEYS {
        if let Some(value) = fixed_env(env_name).filter(|v| !v.is_empty()) {
            builder = builder.set_default(*key, value)?;
        }
    }

    // 2. 配置文件
    if let Some(path) = config_path {
        builder = builder.add_source(File::from(path).required(true));
    } else {
        for name in CONFIG_FILE_NAMES {
            builder = builder.add_source(File::with_name(name).required(false));
        }
    }

    // 3. 带前缀的环境变量（最高优先级）
    // 例如: ZEROTTS_TTS__BASE_URL=http://localhost:8080
    builder = builder.add_source(
        Environment::with_prefix("ZEROTTS")
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true),
    );

    let config = builder.build()?;

    let app_config: AppConfig = config.try_deserialize().map_err(|e| {
        ConfigError::ParseError(format!("Failed to deserialize config: {}", e))
    })?;

    validate_config(&app_config)?;

    Ok(app_config)
}

fn is_blank(value: &Option<String>) -> bool {
    value.as_deref().map_or(true, |v| v.trim().is_empty())
}

/// 验证配置有效性
fn validate_config(config: &AppConfig) -> Result<(), ConfigError> {
    if is_blank(&config.telegram.bot_token) {
        return Err(ConfigError::ValidationError(
            "Telegram bot token is missing: set telegram.bot_token or BOT_TOKEN".to_string(),
        ));
    }

    if config.telegram.keyboard_columns == 0 {
        return Err(ConfigError::ValidationError(
            "Keyboard columns cannot be 0".to_string(),
        ));
    }

    match config.tts.engine {
        TtsEngineKind::ElevenLabs => {
            if is_blank(&config.tts.api_key) {
                return Err(ConfigError::ValidationError(
                    "ElevenLabs API key is missing: set tts.api_key or ELEVENLABS_API_KEY"
                        .to_string(),
                ));
            }
            if config.tts.base_url.is_empty() {
                return Err(ConfigError::ValidationError(
                    "TTS base URL cannot be empty".to_string(),
                ));
            }
        }
        TtsEngineKind::Fake => {
            if config.tts.fake_audio_path.is_none() {
                return Err(ConfigError::ValidationError(
                    "tts.fake_audio_path is required when tts.engine = \"fake\"".to_string(),
                ));
            }
        }
    }

    if config.transcoder.bitrate.trim().is_empty() {
        return Err(ConfigError::ValidationError(
            "Transcoder bitrate cannot be empty".to_string(),
        ));
    }

    Ok(())
}

/// 打印配置信息（用于启动时日志）
pub fn print_config(config: &AppConfig) {
    tracing::info!("=== Application Configuration ===");
    tracing::info!("Bot Token: {}", mask_secret(config.telegram.bot_token.as_deref()));
    tracing::info!("TTS Engine: {}", config.tts.engine);
    tracing::info!("TTS URL: {}", config.tts.base_url);
    tracing::info!("TTS Model: {} ({})", config.tts.model_id, config.tts.output_format);
    tracing::info!("TTS API Key: {}", mask_secret(config.tts.api_key.as_deref()));
    tracing::info!(
        "Fallback Voice: {}",
        config.tts.fallback_voice_id.as_deref().unwrap_or("<unset>")
    );
    if config.tts.timeout_secs > 0 {
        tracing::info!("TTS Timeout: {}s", config.tts.timeout_secs);
    }
    tracing::info!("FFmpeg Path: {:?}", config.transcoder.ffmpeg_path);
    tracing::info!("Voice Bitrate: {}", config.transcoder.bitrate);
    tracing::info!("Audio Directory: {:?}", config.storage.audio_dir);
    tracing::info!("Log Level: {}", config.log.level);
    tracing::info!("=================================");
}
