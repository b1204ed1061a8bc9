//! Voice Context - Errors

use thiserror::Error;

#[derive(Debug, Error)]
pub enum VoiceError {
    #[error("Invalid voice id: {0}")]
    InvalidId(String),

    #[error("Invalid voice name: {0}")]
    InvalidName(String),

    #[error("No usable voice in catalog")]
    EmptyCatalog,
}
