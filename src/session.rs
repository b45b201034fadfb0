//! The session facade: capability-aware chat against one server.

use std::path::PathBuf;

use tokio_stream::StreamExt;
use tracing::{info, warn};

use crate::builder;
use crate::capabilities::ModelCapabilities;
use crate::client::{OllamaClient, PullProgress};
use crate::config::WrapperConfig;
use crate::error::Result;
use crate::interpret::{interpret_single, StreamInterpreter};
use crate::probe;
use crate::types::{ChatEvent, ChatResult};

/// Parameters for one chat call.
#[derive(Debug, Clone, Default)]
pub struct ChatParams {
    pub message: String,
    pub images: Vec<PathBuf>,
    pub system_prompt: Option<String>,
    /// Overrides the session default (streaming on).
    pub stream: Option<bool>,
}

impl ChatParams {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            ..Default::default()
        }
    }

    pub fn with_images(mut self, images: Vec<PathBuf>) -> Self {
        self.images = images;
        self
    }

    pub fn with_system_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.system_prompt = Some(prompt.into());
        self
    }

    /// Request a single buffered response instead of a stream.
    pub fn buffered(mut self) -> Self {
        self.stream = Some(false);
        self
    }
}

/// A chat session bound to one server and one currently selected model.
///
/// The cached capabilities always describe the model selected at call
/// time; they are re-derived on construction and on every
/// [`switch_model`](Self::switch_model). Chat requires `&mut self`, so a
/// session processes one chat call at a time.
pub struct ChatSession {
    client: OllamaClient,
    model: String,
    capabilities: ModelCapabilities,
    config: WrapperConfig,
}

impl ChatSession {
    /// Connect to a server and probe the capabilities of `model`.
    ///
    /// An unreachable server still yields a usable session: detection
    /// degrades to defaults and the server rejects anything it can't do.
    pub async fn connect(base_url: &str, model: &str, config: WrapperConfig) -> Self {
        let client = OllamaClient::new(base_url);
        let model = config.resolve_alias(model).to_string();
        let capabilities = probe::detect(&client, &model, &config).await;
        info!(
            model = %model,
            vision = capabilities.supports_vision,
            thinking = capabilities.supports_thinking,
            "session ready"
        );
        Self {
            client,
            model,
            capabilities,
            config,
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn capabilities(&self) -> &ModelCapabilities {
        &self.capabilities
    }

    /// Chat, discarding incremental output.
    pub async fn chat(&mut self, params: ChatParams) -> Result<ChatResult> {
        self.chat_with(params, |_| {}).await
    }

    /// Chat, surfacing incremental output and warnings through `on_event`.
    ///
    /// Streaming deltas arrive as [`ChatEvent`]s while the call runs; the
    /// aggregated result is returned once the stream reports `done` or
    /// ends.
    pub async fn chat_with<F>(&mut self, params: ChatParams, mut on_event: F) -> Result<ChatResult>
    where
        F: FnMut(ChatEvent),
    {
        let stream = params.stream.unwrap_or(true);
        let (request, warnings) = builder::build(
            &params.message,
            &params.images,
            params.system_prompt.as_deref(),
            &self.capabilities,
            &self.model,
            stream,
        )
        .await;

        for warning in &warnings {
            warn!(%warning, "request downgraded");
            on_event(ChatEvent::Warning(warning.to_string()));
        }

        if stream {
            let mut lines = self.client.chat_stream(&request).await?;
            let mut interpreter = StreamInterpreter::new(self.capabilities.supports_thinking);

            while let Some(line) = lines.next().await {
                if let Some(delta) = interpreter.push_line(&line?) {
                    if !delta.content.is_empty() {
                        on_event(ChatEvent::Token(delta.content));
                    }
                    if !delta.thinking.is_empty() {
                        on_event(ChatEvent::Thinking(delta.thinking));
                    }
                }
                if interpreter.is_done() {
                    break;
                }
            }
            Ok(interpreter.finish())
        } else {
            let body = self.client.chat(&request).await?;
            Ok(interpret_single(body))
        }
    }

    /// Switch the selected model, re-deriving capabilities.
    ///
    /// Aliases resolve through configuration first. A failed probe still
    /// switches; the session continues with default capabilities.
    pub async fn switch_model(&mut self, name: &str) -> &ModelCapabilities {
        let resolved = self.config.resolve_alias(name).to_string();
        self.capabilities = probe::detect(&self.client, &resolved, &self.config).await;
        self.model = resolved;
        info!(
            model = %self.model,
            vision = self.capabilities.supports_vision,
            thinking = self.capabilities.supports_thinking,
            "switched model"
        );
        &self.capabilities
    }

    /// Names of every model in the server catalog, in server order.
    pub async fn list_models(&self) -> Result<Vec<String>> {
        Ok(self
            .client
            .tags()
            .await?
            .models
            .into_iter()
            .map(|m| m.name)
            .collect())
    }

    /// Pull a model, reporting streamed progress.
    ///
    /// `Ok(true)` once the server marks the download completed; a stream
    /// that ends without the marker reports `Ok(false)`. Malformed
    /// progress lines are skipped.
    pub async fn pull_model<F>(&self, name: &str, mut on_progress: F) -> Result<bool>
    where
        F: FnMut(&PullProgress),
    {
        let mut lines = self.client.pull(name).await?;
        while let Some(line) = lines.next().await {
            let progress: PullProgress = match serde_json::from_str(&line?) {
                Ok(progress) => progress,
                Err(_) => continue,
            };
            on_progress(&progress);
            if progress.completed {
                return Ok(true);
            }
        }
        Ok(false)
    }

    /// Delete a model. `Ok(false)` when the server refuses.
    pub async fn delete_model(&self, name: &str) -> Result<bool> {
        self.client.delete(name).await
    }

    /// Short-deadline liveness probe. No side effects, never errors.
    pub async fn health_check(&self) -> bool {
        self.client.healthy().await
    }
}

/// One-shot convenience: a buffered chat without keeping a session around.
pub async fn generate(base_url: &str, model: &str, message: &str) -> Result<ChatResult> {
    let mut session = ChatSession::connect(base_url, model, WrapperConfig::default()).await;
    session.chat(ChatParams::new(message).buffered()).await
}
