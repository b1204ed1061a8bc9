//! Configuration Types
//!
//! 定义所有配置结构体

use serde::Deserialize;
use std::path::PathBuf;

/// 应用主配置
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Telegram 配置
    #[serde(default)]
    pub telegram: TelegramConfig,

    /// TTS 服务配置
    #[serde(default)]
    pub tts: TtsConfig,

    /// 转码配置
    #[serde(default)]
    pub transcoder: TranscoderConfig,

    /// 存储配置
    #[serde(default)]
    pub storage: StorageConfig,

    /// 日志配置
    #[serde(default)]
    pub log: LogConfig,
}

/// Telegram 配置
#[derive(Debug, Clone, Deserialize)]
pub struct TelegramConfig {
    /// Bot access token（也可通过 BOT_TOKEN 提供）
    #[serde(default)]
    pub bot_token: Option<String>,

    /// 音色键盘每行按钮数
    #[serde(default = "default_keyboard_columns")]
    pub keyboard_columns: usize,
}

fn default_keyboard_columns() -> usize {
    2
}

impl Default for TelegramConfig {
    fn default() -> Self {
        Self {
            bot_token: None,
            keyboard_columns: default_keyboard_columns(),
        }
    }
}

/// TTS 引擎类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TtsEngineKind {
    #[default]
    ElevenLabs,
    /// 离线替身，返回固定音频
    Fake,
}

impl std::fmt::Display for TtsEngineKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TtsEngineKind::ElevenLabs => write!(f, "elevenlabs"),
            TtsEngineKind::Fake => write!(f, "fake"),
        }
    }
}

/// TTS 服务配置
#[derive(Debug, Clone, Deserialize)]
pub struct TtsConfig {
    #[serde(default)]
    pub engine: TtsEngineKind,

    /// ElevenLabs API key（也可通过 ELEVENLABS_API_KEY 提供）
    #[serde(default)]
    pub api_key: Option<String>,

    /// 无法列出音色时使用的 voice_id（也可通过 ELEVENLABS_VOICE_ID 提供）
    #[serde(default)]
    pub fallback_voice_id: Option<String>,

    #[serde(default = "default_tts_base_url")]
    pub base_url: String,

    #[serde(default = "default_model_id")]
    pub model_id: String,

    #[serde(default = "default_output_format")]
    pub output_format: String,

    /// 请求超时时间（秒），0 表示不设超时
    #[serde(default)]
    pub timeout_secs: u64,

    /// engine = "fake" 时返回的音频文件
    #[serde(default)]
    pub fake_audio_path: Option<PathBuf>,
}

fn default_tts_base_url() -> String {
    "https://api.elevenlabs.io".to_string()
}

fn default_model_id() -> String {
    "eleven_multilingual_v2".to_string()
}

fn default_output_format() -> String {
    "mp3_44100_128".to_string()
}

impl Default for TtsConfig {
    fn default() -> Self {
        Self {
            engine: TtsEngineKind::default(),
            api_key: None,
            fallback_voice_id: None,
            base_url: default_tts_base_url(),
            model_id: default_model_id(),
            output_format: default_output_format(),
            timeout_secs: 0,
            fake_audio_path: None,
        }
    }
}

/// 转码配置
#[derive(Debug, Clone, Deserialize)]
pub struct TranscoderConfig {
    /// 显式指定的 ffmpeg 路径（也可通过 FFMPEG 提供）
    #[serde(default)]
    pub ffmpeg_path: Option<PathBuf>,

    /// 是否在 PATH 中查找 ffmpeg
    #[serde(default = "default_search_path")]
    pub search_path: bool,

    /// PATH 中找不到时尝试的位置
    #[serde(default)]
    pub fallback_path: Option<PathBuf>,

    /// 语音消息比特率（ffmpeg 格式）
    #[serde(default = "default_bitrate")]
    pub bitrate: String,

    /// 错误信息中保留的 stderr 最大字符数
    #[serde(default = "default_max_diagnostic_chars")]
    pub max_diagnostic_chars: usize,
}

fn default_search_path() -> bool {
    true
}

fn default_bitrate() -> String {
    "64k".to_string()
}

fn default_max_diagnostic_chars() -> usize {
    4000
}

impl Default for TranscoderConfig {
    fn default() -> Self {
        Self {
            ffmpeg_path: None,
            search_path: default_search_path(),
            fallback_path: None,
            bitrate: default_bitrate(),
            max_diagnostic_chars: default_max_diagnostic_chars(),
        }
    }
}

/// 存储配置
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    /// 合成音频的暂存目录
    #[serde(default = "default_audio_dir")]
    pub audio_dir: PathBuf,
}

fn default_audio_dir() -> PathBuf {
    PathBuf::from("data/audio")
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            audio_dir: default_audio_dir(),
        }
    }
}

/// 日志配置
#[derive(Debug, Clone, Deserialize)]
pub struct LogConfig {
    /// 日志级别
    #[serde(default = "default_log_level")]
    pub level: String,

    /// 是否启用 JSON 格式
    #[serde(default)]
    pub json: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

/// 日志中隐藏密钥，只保留末尾 4 个字符
pub fn mask_secret(secret: Option<&str>) -> String {
    match secret {
        None => "<unset>".to_string(),
        Some(s) if s.chars().count() <= 4 => "****".to_string(),
        Some(s) => {
            let tail: String = s.chars().rev().take(4).collect::<Vec<_>>().into_iter().rev().collect();
            format!("****{}", tail)
        }
    }
}
