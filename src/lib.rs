//! lokai — adaptive client for Ollama-style local LLM servers.
//!
//! Detects per-model capabilities (vision, thinking, streaming) from the
//! server's catalog, shapes chat requests to them, and normalizes plain,
//! streamed, and thinking-tagged responses into one result type.
//!
//! # Quick Start
//!
//! ```no_run
//! use lokai::prelude::*;
//!
//! # async fn example() -> lokai::error::Result<()> {
//! let mut session =
//!     ChatSession::connect("http://localhost:11434", "llama3.2", WrapperConfig::default()).await;
//! let result = session.chat(ChatParams::new("Hello!")).await?;
//! println!("{}", result.text);
//! # Ok(())
//! # }
//! ```

pub mod builder;
pub mod capabilities;
pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod interpret;
pub mod prelude;
pub mod probe;
pub mod session;
pub mod types;

#[cfg(feature = "cli")]
pub mod cli;

#[cfg(feature = "web")]
pub mod web;
