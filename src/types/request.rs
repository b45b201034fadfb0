//! Wire request types for the chat endpoint.

use serde::{Deserialize, Serialize};

use super::message::ChatMessage;

/// Options forwarded to the model runtime.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChatOptions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thinking: Option<bool>,
}

/// A fully-assembled `/api/chat` payload.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChatRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub stream: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<ChatOptions>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn options_are_omitted_when_absent() {
        let request = ChatRequest {
            model: "llama3.2".to_string(),
            messages: vec![ChatMessage::user("hi")],
            stream: false,
            options: None,
        };

        let json = serde_json::to_value(&request).unwrap();
        assert!(json.get("options").is_none());
        assert_eq!(json["stream"], false);
    }

    #[test]
    fn thinking_option_serializes_flat() {
        let request = ChatRequest {
            model: "deepseek-reasoning".to_string(),
            messages: vec![ChatMessage::user("why?")],
            stream: true,
            options: Some(ChatOptions {
                thinking: Some(true),
            }),
        };

        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["options"]["thinking"], true);
    }
}
