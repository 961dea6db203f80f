use std::time::Duration;

use crate::config::EndpointConfig;
use crate::models::chat::HealthInfo;
use crate::transport::{Transport, TransportError};

#[derive(Debug, thiserror::Error)]
pub enum HealthError {
    #[error("health endpoint returned status {status}: {body}")]
    Status { status: u16, body: String },
    #[error("could not reach the backend: {0}")]
    Connection(#[from] TransportError),
}

/// Reachability probe, run once before any chat request is allowed. A 200
/// is healthy; the diagnostic fields are optional and a 200 with an
/// undecodable body still counts as reachable.
pub async fn probe(
    transport: &dyn Transport,
    endpoints: &EndpointConfig,
    timeout: Duration,
) -> Result<HealthInfo, HealthError> {
    let response = transport.get(&endpoints.health_url(), timeout).await?;
    if !response.is_ok() {
        return Err(HealthError::Status {
            status: response.status,
            body: response.body,
        });
    }
    Ok(serde_json::from_str(&response.body).unwrap_or_default())
}
