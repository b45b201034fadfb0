//! Chat message types.

use serde::{Deserialize, Serialize};

/// Conversation role.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

/// A single message in a chat request. Built once, never mutated.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
    /// Base64-encoded image payloads, in caller order.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub images: Option<Vec<String>>,
}

impl ChatMessage {
    /// Create a system message.
    pub fn system(text: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: text.into(),
            images: None,
        }
    }

    /// Create a user message.
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: text.into(),
            images: None,
        }
    }

    /// Create an assistant message.
    pub fn assistant(text: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: text.into(),
            images: None,
        }
    }

    /// Create a user message carrying encoded images.
    pub fn user_with_images(text: impl Into<String>, images: Vec<String>) -> Self {
        Self {
            role: Role::User,
            content: text.into(),
            images: Some(images),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roles_serialize_lowercase() {
        let msg = ChatMessage::system("be brief");
        let json = serde_json::to_value(&msg).unwrap();
        assert_eq!(json["role"], "system");
        assert_eq!(json["content"], "be brief");
    }

    #[test]
    fn images_are_omitted_when_absent() {
        let json = serde_json::to_value(ChatMessage::user("hi")).unwrap();
        assert!(json.get("images").is_none());

        let json =
            serde_json::to_value(ChatMessage::user_with_images("look", vec!["aGk=".into()]))
                .unwrap();
        assert_eq!(json["images"][0], "aGk=");
    }
}
