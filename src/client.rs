//! Thin typed client over the Ollama-style REST surface.

use futures::stream::BoxStream;
use futures::StreamExt;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{LokaiError, Result};
use crate::http::{chat_client, probe_client, status_to_error};
use crate::interpret::ChatResponseBody;
use crate::types::ChatRequest;

/// One entry of the `/api/tags` catalog.
#[derive(Debug, Clone, Deserialize)]
pub struct ModelEntry {
    pub name: String,
    #[serde(default)]
    pub size: Option<u64>,
}

/// The server's model catalog.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ModelCatalog {
    #[serde(default)]
    pub models: Vec<ModelEntry>,
}

/// Progress object streamed by `/api/pull`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PullProgress {
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub completed: bool,
}

#[derive(Debug, Serialize)]
struct ModelRef<'a> {
    name: &'a str,
}

/// Typed wrapper over one server's REST endpoints.
///
/// Holds no state beyond the base URL; the session layer owns the model
/// selection and capability cache.
#[derive(Debug, Clone)]
pub struct OllamaClient {
    base_url: String,
}

impl OllamaClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetch the model catalog.
    pub async fn tags(&self) -> Result<ModelCatalog> {
        let url = format!("{}/api/tags", self.base_url);
        let resp = probe_client().get(&url).send().await?;

        let status = resp.status().as_u16();
        let body = resp.text().await?;
        if status != 200 {
            return Err(status_to_error(status, &body));
        }
        Ok(serde_json::from_str(&body)?)
    }

    /// Buffered chat completion.
    pub async fn chat(&self, request: &ChatRequest) -> Result<ChatResponseBody> {
        let url = format!("{}/api/chat", self.base_url);
        debug!(model = %request.model, "POST /api/chat");

        let resp = chat_client().post(&url).json(request).send().await?;

        let status = resp.status().as_u16();
        let body = resp.text().await?;
        if status != 200 {
            return Err(status_to_error(status, &body));
        }
        Ok(serde_json::from_str(&body)?)
    }

    /// Streaming chat; yields raw NDJSON lines as they arrive.
    pub async fn chat_stream(
        &self,
        request: &ChatRequest,
    ) -> Result<BoxStream<'static, Result<String>>> {
        let url = format!("{}/api/chat", self.base_url);
        debug!(model = %request.model, "POST /api/chat (stream)");

        let resp = chat_client().post(&url).json(request).send().await?;

        let status = resp.status().as_u16();
        if status != 200 {
            let body = resp.text().await.unwrap_or_default();
            return Err(status_to_error(status, &body));
        }
        Ok(ndjson_lines(resp))
    }

    /// Opportunistic model metadata. Failures are the caller's to ignore.
    pub async fn show(&self, name: &str) -> Result<serde_json::Value> {
        let url = format!("{}/api/show", self.base_url);
        let resp = probe_client()
            .post(&url)
            .json(&ModelRef { name })
            .send()
            .await?;

        let status = resp.status().as_u16();
        let body = resp.text().await?;
        if status != 200 {
            return Err(status_to_error(status, &body));
        }
        Ok(serde_json::from_str(&body)?)
    }

    /// Pull a model; yields raw NDJSON progress lines.
    pub async fn pull(&self, name: &str) -> Result<BoxStream<'static, Result<String>>> {
        let url = format!("{}/api/pull", self.base_url);
        debug!(model = name, "POST /api/pull");

        let resp = chat_client()
            .post(&url)
            .json(&ModelRef { name })
            .send()
            .await?;

        let status = resp.status().as_u16();
        if status != 200 {
            let body = resp.text().await.unwrap_or_default();
            return Err(status_to_error(status, &body));
        }
        Ok(ndjson_lines(resp))
    }

    /// Delete a model. `Ok(false)` when the server refuses.
    pub async fn delete(&self, name: &str) -> Result<bool> {
        let url = format!("{}/api/delete", self.base_url);
        let resp = chat_client()
            .delete(&url)
            .json(&ModelRef { name })
            .send()
            .await?;

        Ok(resp.status().is_success())
    }

    /// Liveness probe: true iff the catalog endpoint answers 2xx.
    pub async fn healthy(&self) -> bool {
        let url = format!("{}/api/tags", self.base_url);
        match probe_client().get(&url).send().await {
            Ok(resp) => resp.status().is_success(),
            Err(_) => false,
        }
    }
}

/// Split a chunked response body into NDJSON lines.
fn ndjson_lines(resp: reqwest::Response) -> BoxStream<'static, Result<String>> {
    let byte_stream = resp.bytes_stream();

    let stream = async_stream::stream! {
        let mut buffer = String::new();
        futures::pin_mut!(byte_stream);

        while let Some(chunk_result) = byte_stream.next().await {
            let chunk = match chunk_result {
                Ok(c) => c,
                Err(e) => {
                    yield Err(LokaiError::Network(e));
                    break;
                }
            };

            buffer.push_str(&String::from_utf8_lossy(&chunk));

            while let Some(line_end) = buffer.find('\n') {
                let line = buffer[..line_end].trim().to_string();
                buffer = buffer[line_end + 1..].to_string();
                if !line.is_empty() {
                    yield Ok(line);
                }
            }
        }

        // flush a trailing line that arrived without a newline
        let tail = buffer.trim().to_string();
        if !tail.is_empty() {
            yield Ok(tail);
        }
    };

    Box::pin(stream)
}
