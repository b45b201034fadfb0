//! Chat request assembly, adapted to the detected capabilities.

use std::fmt;
use std::path::{Path, PathBuf};

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use tracing::{debug, warn};

use crate::capabilities::ModelCapabilities;
use crate::types::{ChatMessage, ChatOptions, ChatRequest};

/// Non-fatal downgrade surfaced to the caller alongside the built request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestWarning {
    /// Images were supplied but the model has no vision support.
    ImagesDiscarded { count: usize },
}

impl fmt::Display for RequestWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ImagesDiscarded { count } => {
                write!(f, "model doesn't support vision - ignoring {count} image(s)")
            }
        }
    }
}

/// Build the chat payload for `message` under the given capabilities.
///
/// Rules, in order: an optional system message first; the user message;
/// images only when the model supports vision (individually unusable
/// images are dropped silently, the whole set is discarded with a warning
/// when vision is off); `options.thinking` when the model supports it.
pub async fn build(
    message: &str,
    images: &[PathBuf],
    system_prompt: Option<&str>,
    capabilities: &ModelCapabilities,
    model: &str,
    stream: bool,
) -> (ChatRequest, Vec<RequestWarning>) {
    let mut messages = Vec::new();
    let mut warnings = Vec::new();

    match system_prompt {
        Some(system) if !system.is_empty() => messages.push(ChatMessage::system(system)),
        _ => {}
    }

    if !images.is_empty() && capabilities.supports_vision {
        let encoded = encode_images(images).await;
        if encoded.is_empty() {
            messages.push(ChatMessage::user(message));
        } else {
            messages.push(ChatMessage::user_with_images(message, encoded));
        }
    } else {
        if !images.is_empty() {
            warnings.push(RequestWarning::ImagesDiscarded {
                count: images.len(),
            });
        }
        messages.push(ChatMessage::user(message));
    }

    let options = capabilities.supports_thinking.then(|| ChatOptions {
        thinking: Some(true),
    });

    let request = ChatRequest {
        model: model.to_string(),
        messages,
        stream,
        options,
    };
    (request, warnings)
}

/// Encode the images that pass the MIME and readability checks, in order.
/// Unusable paths are dropped without failing the request.
async fn encode_images(paths: &[PathBuf]) -> Vec<String> {
    let mut encoded = Vec::new();
    for path in paths {
        if image_mime(path).is_none() {
            debug!(path = %path.display(), "not an image file, skipping");
            continue;
        }
        match tokio::fs::read(path).await {
            Ok(bytes) => encoded.push(STANDARD.encode(bytes)),
            Err(e) => {
                warn!(path = %path.display(), error = %e, "failed to read image, skipping")
            }
        }
    }
    encoded
}

/// MIME type for an image file extension, `None` for anything else.
pub fn image_mime(path: &Path) -> Option<&'static str> {
    let ext = path.extension()?.to_str()?.to_lowercase();
    match ext.as_str() {
        "png" => Some("image/png"),
        "jpg" | "jpeg" => Some("image/jpeg"),
        "gif" => Some("image/gif"),
        "webp" => Some("image/webp"),
        "bmp" => Some("image/bmp"),
        "tif" | "tiff" => Some("image/tiff"),
        "svg" => Some("image/svg+xml"),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Role;
    use base64::Engine as _;
    use pretty_assertions::assert_eq;

    fn vision_caps() -> ModelCapabilities {
        ModelCapabilities {
            supports_vision: true,
            model_name: "llava:13b".to_string(),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn system_prompt_is_prepended() {
        let caps = ModelCapabilities::default();
        let (request, _) = build("hi", &[], Some("be terse"), &caps, "llama3.2", true).await;

        assert_eq!(request.messages.len(), 2);
        assert_eq!(request.messages[0].role, Role::System);
        assert_eq!(request.messages[0].content, "be terse");
        assert_eq!(request.messages[1].role, Role::User);
    }

    #[tokio::test]
    async fn empty_system_prompt_is_skipped() {
        let caps = ModelCapabilities::default();
        let (request, _) = build("hi", &[], Some(""), &caps, "llama3.2", true).await;

        assert_eq!(request.messages.len(), 1);
        assert_eq!(request.messages[0].role, Role::User);
    }

    #[tokio::test]
    async fn images_discarded_without_vision() {
        let dir = tempfile::tempdir().unwrap();
        let img = dir.path().join("cat.png");
        std::fs::write(&img, b"pixels").unwrap();

        let caps = ModelCapabilities::default();
        let (request, warnings) = build("look", &[img], None, &caps, "llama3.2", true).await;

        assert_eq!(request.messages[0].images, None);
        assert_eq!(warnings, vec![RequestWarning::ImagesDiscarded { count: 1 }]);
    }

    #[tokio::test]
    async fn only_usable_images_survive_in_order() {
        let dir = tempfile::tempdir().unwrap();
        let first = dir.path().join("a.png");
        let notes = dir.path().join("notes.txt");
        let missing = dir.path().join("gone.jpg");
        let second = dir.path().join("b.jpeg");
        std::fs::write(&first, b"first").unwrap();
        std::fs::write(&notes, b"not an image").unwrap();
        std::fs::write(&second, b"second").unwrap();

        let paths = vec![first, notes, missing, second];
        let (request, warnings) = build("look", &paths, None, &vision_caps(), "llava", true).await;

        assert!(warnings.is_empty());
        let images = request.messages[0].images.as_ref().unwrap();
        assert_eq!(images.len(), 2);
        assert_eq!(STANDARD.decode(&images[0]).unwrap(), b"first");
        assert_eq!(STANDARD.decode(&images[1]).unwrap(), b"second");
    }

    #[tokio::test]
    async fn image_payload_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let img = dir.path().join("photo.jpg");
        let bytes: Vec<u8> = (0u8..=255).collect();
        std::fs::write(&img, &bytes).unwrap();

        let (request, _) = build("look", &[img], None, &vision_caps(), "llava", false).await;

        let images = request.messages[0].images.as_ref().unwrap();
        assert_eq!(STANDARD.decode(&images[0]).unwrap(), bytes);
    }

    #[tokio::test]
    async fn all_images_unusable_falls_back_to_plain_message() {
        let dir = tempfile::tempdir().unwrap();
        let notes = dir.path().join("notes.txt");
        std::fs::write(&notes, b"text").unwrap();

        let (request, warnings) =
            build("look", &[notes], None, &vision_caps(), "llava", true).await;

        assert!(warnings.is_empty());
        assert_eq!(request.messages[0].images, None);
    }

    #[tokio::test]
    async fn thinking_option_follows_capability() {
        let caps = ModelCapabilities {
            supports_thinking: true,
            ..Default::default()
        };
        let (request, _) = build("why?", &[], None, &caps, "deepseek-reasoning", true).await;
        assert_eq!(
            request.options,
            Some(ChatOptions {
                thinking: Some(true)
            })
        );

        let (request, _) =
            build("why?", &[], None, &ModelCapabilities::default(), "llama3.2", true).await;
        assert_eq!(request.options, None);
    }

    #[test]
    fn mime_table_covers_images_only() {
        assert_eq!(image_mime(Path::new("x.PNG")), Some("image/png"));
        assert_eq!(image_mime(Path::new("x.jpeg")), Some("image/jpeg"));
        assert_eq!(image_mime(Path::new("x.txt")), None);
        assert_eq!(image_mime(Path::new("no_extension")), None);
    }
}
