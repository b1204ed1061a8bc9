//! Domain Layer - 领域层
//!
//! Voice Context: 音色目录与用户选择

pub mod voice;
