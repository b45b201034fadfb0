//! Capability detection against the live model catalog.

use tracing::{debug, warn};

use crate::capabilities::{classify, ModelCapabilities};
use crate::client::OllamaClient;
use crate::config::WrapperConfig;

/// Detect what `model` can do by consulting the server's catalog.
///
/// Soft-fails by design: an unreachable server, a malformed catalog, or a
/// model missing from it all yield default capabilities so the session
/// stays usable. The server itself rejects a chat against a model it
/// really doesn't have.
pub async fn detect(
    client: &OllamaClient,
    model: &str,
    config: &WrapperConfig,
) -> ModelCapabilities {
    let catalog = match client.tags().await {
        Ok(catalog) => catalog,
        Err(e) => {
            warn!(base_url = client.base_url(), error = %e, "capability probe failed, assuming defaults");
            return ModelCapabilities::default();
        }
    };

    let needle = model.to_lowercase();
    let Some(entry) = catalog
        .models
        .iter()
        .find(|m| m.name.to_lowercase().contains(&needle))
    else {
        warn!(model, "model not in catalog, assuming default capabilities");
        return ModelCapabilities::default();
    };

    let capabilities = classify(&entry.name, config);

    // /api/show carries richer metadata, but nothing in it is consumed yet.
    match client.show(&entry.name).await {
        Ok(_) => debug!(model = %entry.name, "fetched model metadata"),
        Err(e) => debug!(model = %entry.name, error = %e, "metadata fetch failed, ignoring"),
    }

    capabilities
}
