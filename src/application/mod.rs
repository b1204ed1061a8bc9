//! 应用层 - 用例编排
//!
//! 包含：
//! - ports: 六边形架构端口定义（TtsEngine、AudioTranscoder、SelectionStore、Messenger）
//! - commands: 命令及处理器
//! - router: 入站消息分类与分发
//! - error: 应用层错误定义

pub mod commands;
pub mod error;
pub mod ports;
pub mod replies;
pub mod router;

#[cfg(test)]
pub(crate) mod testing;

// Re-exports
pub use commands::{
    handlers::{
        LoadVoiceCatalogHandler, SelectVoiceHandler, SelectVoiceResponse, ShowVoiceMenuHandler,
        SynthesisOutcome, SynthesizeSpeechHandler,
    },
    LoadVoiceCatalog, SelectVoice, ShowVoiceMenu, SynthesizeSpeech,
};

pub use error::ApplicationError;

pub use ports::{
    AudioTranscoderPort, MessengerError, MessengerPort, ReplyTarget, SelectionStorePort,
    SynthesisRequest, SynthesizedAudio, TranscodeConfig, TranscodeError, TtsEnginePort, TtsError,
};

pub use router::{IncomingText, MessageRouter, Route};
