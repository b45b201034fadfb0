//! Shared HTTP clients and status mapping.

use std::sync::OnceLock;
use std::time::Duration;

use crate::error::LokaiError;

static PROBE_CLIENT: OnceLock<reqwest::Client> = OnceLock::new();
static CHAT_CLIENT: OnceLock<reqwest::Client> = OnceLock::new();

/// Deadline for capability probes and health checks.
pub const PROBE_TIMEOUT: Duration = Duration::from_secs(5);
/// Deadline for chat and pull, which wait on model latency.
pub const CHAT_TIMEOUT: Duration = Duration::from_secs(600);

/// Get (or create) the short-deadline client.
pub fn probe_client() -> &'static reqwest::Client {
    PROBE_CLIENT.get_or_init(|| {
        reqwest::Client::builder()
            .timeout(PROBE_TIMEOUT)
            .build()
            .expect("Failed to build HTTP client")
    })
}

/// Get (or create) the long-deadline client.
pub fn chat_client() -> &'static reqwest::Client {
    CHAT_CLIENT.get_or_init(|| {
        reqwest::Client::builder()
            .timeout(CHAT_TIMEOUT)
            .pool_max_idle_per_host(10)
            .build()
            .expect("Failed to build HTTP client")
    })
}

/// Map a non-success HTTP response to an error.
pub fn status_to_error(status: u16, body: &str) -> LokaiError {
    match status {
        404 => LokaiError::ModelNotFound(body.to_string()),
        _ => LokaiError::api(status, body),
    }
}
