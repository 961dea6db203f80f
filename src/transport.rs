use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client as HttpClient;
use serde_json::Value as JsonValue;

#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("request timed out after {0:?}")]
    Timeout(Duration),
    #[error("connection failed: {0}")]
    Connect(#[source] reqwest::Error),
    #[error("transport failure: {0}")]
    Other(#[source] reqwest::Error),
}

/// Raw outcome of a completed HTTP exchange. Status codes are interpreted
/// by the caller, never here.
#[derive(Clone, Debug)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
}

impl RawResponse {
    pub fn is_ok(&self) -> bool {
        self.status == 200
    }
}

/// Seam between the protocol layer and the network, so the interactive loop
/// can be driven against a scripted transport in tests.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn get(&self, url: &str, timeout: Duration) -> Result<RawResponse, TransportError>;

    async fn post_json(
        &self,
        url: &str,
        payload: &JsonValue,
        timeout: Duration,
    ) -> Result<RawResponse, TransportError>;
}

#[derive(Clone, Debug, Default)]
pub struct HttpTransport {
    http: HttpClient,
}

impl HttpTransport {
    pub fn new() -> Self {
        Self {
            http: HttpClient::new(),
        }
    }
}

fn classify(err: reqwest::Error, timeout: Duration) -> TransportError {
    if err.is_timeout() {
        TransportError::Timeout(timeout)
    } else if err.is_connect() {
        TransportError::Connect(err)
    } else {
        TransportError::Other(err)
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn get(&self, url: &str, timeout: Duration) -> Result<RawResponse, TransportError> {
        let response = self
            .http
            .get(url)
            .timeout(timeout)
            .send()
            .await
            .map_err(|e| classify(e, timeout))?;
        let status = response.status().as_u16();
        let body = response.text().await.map_err(|e| classify(e, timeout))?;
        Ok(RawResponse { status, body })
    }

    async fn post_json(
        &self,
        url: &str,
        payload: &JsonValue,
        timeout: Duration,
    ) -> Result<RawResponse, TransportError> {
        let response = self
            .http
            .post(url)
            .timeout(timeout)
            .json(payload)
            .send()
            .await
            .map_err(|e| classify(e, timeout))?;
        let status = response.status().as_u16();
        let body = response.text().await.map_err(|e| classify(e, timeout))?;
        Ok(RawResponse { status, body })
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn raw_response_ok_only_for_200() {
        let ok = RawResponse {
            status: 200,
            body: String::new(),
        };
        let created = RawResponse {
            status: 201,
            body: String::new(),
        };
        let bad = RawResponse {
            status: 400,
            body: String::new(),
        };
        assert!(ok.is_ok());
        assert!(!created.is_ok());
        assert!(!bad.is_ok());
    }

    #[test]
    fn transport_error_messages_name_the_failure() {
        let err = TransportError::Timeout(Duration::from_secs(10));
        assert!(err.to_string().contains("timed out"));
    }
}
