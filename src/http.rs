use reqwest::Client;
use serde::de::DeserializeOwned;
use std::sync::Arc;

use crate::config::AdvisorConfig;
use crate::error::{LookupError, LookupStage};

/// Builds the HTTP client shared by the geocoder and the forecaster.
pub fn build_client(config: &AdvisorConfig) -> reqwest::Result<Arc<Client>> {
    let client = Client::builder()
        .user_agent(config.user_agent.as_str())
        .timeout(config.timeout())
        .build()?;
    Ok(Arc::new(client))
}

/// Makes an HTTP GET request and deserializes the JSON response.
///
/// Network errors, non-success statuses and undecodable bodies all become a
/// transport failure tagged with `stage`.
pub(crate) async fn get_json<T: DeserializeOwned>(
    client: &Client,
    url: &str,
    stage: LookupStage,
) -> Result<T, LookupError> {
    let response = client
        .get(url)
        .send()
        .await
        .map_err(|e| LookupError::transport(stage, e))?;

    let status = response.status();
    if !status.is_success() {
        tracing::warn!(%stage, %status, "upstream returned non-success status");
        return Err(LookupError::transport(
            stage,
            format!("Request failed with status: {}", status),
        ));
    }

    response
        .json::<T>()
        .await
        .map_err(|e| LookupError::transport(stage, e))
}
