//! Response interpretation: buffered bodies and NDJSON streams.

use serde::Deserialize;
use tracing::debug;

use crate::types::ChatResult;

const THINK_OPEN: &str = "<think>";
const THINK_CLOSE: &str = "</think>";

/// Body of a buffered `/api/chat` response, and of each streamed line.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChatResponseBody {
    #[serde(default)]
    pub message: ResponseMessage,
    #[serde(default)]
    pub done: bool,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ResponseMessage {
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub thinking: Option<String>,
}

/// Interpret a buffered (non-streaming) response body.
///
/// Thinking is only recovered from inline `<think>` markers on this path;
/// some backends embed the reasoning trace in the content instead of a
/// separate field.
pub fn interpret_single(body: ChatResponseBody) -> ChatResult {
    split_think_tags(body.message.content)
}

/// Split inline `<think>...</think>` markers out of a response text.
///
/// The marked span (markers included) becomes the thinking trace; the
/// trimmed remainder after the closing marker becomes the response.
pub fn split_think_tags(content: String) -> ChatResult {
    if let (Some(open), Some(close)) = (content.find(THINK_OPEN), content.find(THINK_CLOSE)) {
        if open < close {
            let end = close + THINK_CLOSE.len();
            let thinking = content[open..end].to_string();
            let text = content[end..].trim().to_string();
            return ChatResult {
                text,
                thinking: Some(thinking),
            };
        }
    }
    ChatResult {
        text: content,
        thinking: None,
    }
}

/// One decoded streaming chunk.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StreamDelta {
    pub content: String,
    pub thinking: String,
    pub done: bool,
}

/// Accumulates newline-delimited chat chunks into a final [`ChatResult`].
///
/// Feed lines with [`push_line`](Self::push_line) until [`is_done`](Self::is_done)
/// or the underlying sequence ends, then call [`finish`](Self::finish).
/// An empty sequence, or EOF before a `done` marker, is a clean completion.
#[derive(Debug)]
pub struct StreamInterpreter {
    thinking_enabled: bool,
    text: String,
    thinking: String,
    done: bool,
}

impl StreamInterpreter {
    pub fn new(thinking_enabled: bool) -> Self {
        Self {
            thinking_enabled,
            text: String::new(),
            thinking: String::new(),
            done: false,
        }
    }

    /// Feed one line. Returns the decoded delta, or `None` for blank or
    /// malformed lines, which are skipped without aborting the stream.
    ///
    /// A chunk carrying a usable `thinking` field contributes to the
    /// thinking buffer instead of the response buffer.
    pub fn push_line(&mut self, line: &str) -> Option<StreamDelta> {
        let line = line.trim();
        if line.is_empty() || self.done {
            return None;
        }

        let body: ChatResponseBody = match serde_json::from_str(line) {
            Ok(body) => body,
            Err(e) => {
                debug!(error = %e, "skipping malformed stream line");
                return None;
            }
        };

        let mut delta = StreamDelta {
            done: body.done,
            ..Default::default()
        };

        match body.message.thinking {
            Some(thinking) if self.thinking_enabled => {
                self.thinking.push_str(&thinking);
                delta.thinking = thinking;
            }
            _ => {
                self.text.push_str(&body.message.content);
                delta.content = body.message.content;
            }
        }

        if body.done {
            self.done = true;
        }
        Some(delta)
    }

    /// Whether a terminal `done` marker has been observed.
    pub fn is_done(&self) -> bool {
        self.done
    }

    /// Close out the stream and produce the aggregated result.
    pub fn finish(self) -> ChatResult {
        ChatResult {
            text: self.text,
            thinking: if self.thinking_enabled && !self.thinking.is_empty() {
                Some(self.thinking)
            } else {
                None
            },
        }
    }
}
