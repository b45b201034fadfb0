//! Convenience re-exports for common use.

pub use crate::builder::RequestWarning;
pub use crate::capabilities::ModelCapabilities;
pub use crate::config::WrapperConfig;
pub use crate::error::{LokaiError, Result};
pub use crate::session::{generate, ChatParams, ChatSession};
pub use crate::types::{ChatEvent, ChatMessage, ChatOptions, ChatRequest, ChatResult, Role};
