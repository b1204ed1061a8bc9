//! zerotts - Telegram 语音朗读机器人
//!
//! 架构设计: Hexagonal Architecture
//!
//! 领域层 (domain/):
//! - Voice Context: 音色目录、用户选择
//!
//! 应用层 (application/):
//! - Ports: 端口定义（TtsEngine, AudioTranscoder, SelectionStore, Messenger）
//! - Commands: 命令处理器（加载目录、展示键盘、选择音色、朗读）
//! - Router: 入站文本分类
//!
//! 基础设施层 (infrastructure/):
//! - Adapters: ElevenLabs Client, Fake TTS Client, FFmpeg Transcoder
//! - Memory: SelectionStore 内存实现
//! - Telegram: Messenger 与 Dispatcher

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::{load_config, AppConfig};
