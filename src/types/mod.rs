//! Core data types for chat requests and results.

pub mod message;
pub mod request;
pub mod result;

pub use message::*;
pub use request::*;
pub use result::*;
