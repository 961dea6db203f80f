use std::time::Duration;

use log::info;
use serde_json::Value as JsonValue;

use crate::config::EndpointConfig;
use crate::models::chat::AnswerRecord;
use crate::normalize::{normalize, MalformedResponse};
use crate::transport::{Transport, TransportError};

pub const PRIMARY_QUESTION_FIELD: &str = "question";
pub const FALLBACK_QUESTION_FIELD: &str = "query";

/// Substring (matched case-insensitively in a 400 body) that signals the
/// deployment expects the alternate payload field.
const MISSING_FIELD_MARKER: &str = "missing query";

#[derive(Debug, thiserror::Error)]
pub enum QueryError {
    #[error("server returned status {status}: {body}")]
    Status { status: u16, body: String },
    #[error("could not reach the server: {0}")]
    Connection(#[from] TransportError),
    #[error(transparent)]
    Malformed(#[from] MalformedResponse),
}

#[derive(Clone, Debug)]
pub struct QueryOptions {
    /// Retrieval breadth hint forwarded as `top_k` when set.
    pub top_k: Option<u32>,
    pub timeout: Duration,
}

impl Default for QueryOptions {
    fn default() -> Self {
        Self {
            top_k: None,
            timeout: Duration::from_secs(60),
        }
    }
}

pub fn build_payload(field: &str, question: &str, top_k: Option<u32>) -> JsonValue {
    let mut payload = serde_json::Map::new();
    payload.insert(field.to_string(), JsonValue::from(question));
    if let Some(k) = top_k {
        payload.insert("top_k".to_string(), JsonValue::from(k));
    }
    JsonValue::Object(payload)
}

/// Whether a response is the known "wrong field name" rejection.
pub fn wants_alternate_field(status: u16, body: &str) -> bool {
    status == 400 && body.to_lowercase().contains(MISSING_FIELD_MARKER)
}

/// Send the question to the chat endpoint, falling back to the alternate
/// field name exactly once when the server signals it. The expected field
/// name is not stable across deployments; one alternate shape is attempted
/// and nothing more.
pub async fn ask_question(
    transport: &dyn Transport,
    endpoints: &EndpointConfig,
    question: &str,
    options: &QueryOptions,
) -> Result<AnswerRecord, QueryError> {
    let chat_url = endpoints.chat_url();
    let primary = build_payload(PRIMARY_QUESTION_FIELD, question, options.top_k);
    let mut response = transport
        .post_json(&chat_url, &primary, options.timeout)
        .await?;

    if wants_alternate_field(response.status, &response.body) {
        info!(
            "server rejected the '{}' payload, retrying once with '{}'",
            PRIMARY_QUESTION_FIELD, FALLBACK_QUESTION_FIELD
        );
        let fallback = build_payload(FALLBACK_QUESTION_FIELD, question, options.top_k);
        response = transport
            .post_json(&chat_url, &fallback, options.timeout)
            .await?;
    }

    if !response.is_ok() {
        return Err(QueryError::Status {
            status: response.status,
            body: response.body,
        });
    }

    Ok(normalize(&response.body)?)
}
