//! Command Handlers 实现

mod catalog_handlers;
mod synthesis_handlers;
mod voice_handlers;

pub use catalog_handlers::*;
pub use synthesis_handlers::*;
pub use voice_handlers::*;
