//! Results and incremental events returned to callers.

/// Final value of a chat call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChatResult {
    /// The response text.
    pub text: String,
    /// Separate reasoning trace, when the model emits one.
    pub thinking: Option<String>,
}

/// Incremental event surfaced while a chat call is in flight.
///
/// Events arrive before the aggregated [`ChatResult`] is returned; a
/// stream that ends without a terminal marker still completes cleanly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatEvent {
    /// A chunk of response text.
    Token(String),
    /// A chunk of reasoning trace.
    Thinking(String),
    /// Non-fatal downgrade the user should see.
    Warning(String),
}
