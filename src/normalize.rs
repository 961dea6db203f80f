use serde::Deserialize;

use crate::models::chat::AnswerRecord;

pub const DEFAULT_ANSWER: &str = "No answer provided.";
pub const DEFAULT_CONFIDENCE: &str = "Unknown";

/// The backend answered 200 but the body is not the JSON answer object the
/// contract promises. Reported distinctly from plain server errors because
/// it signals a contract break, not an optional-field omission.
#[derive(Debug, thiserror::Error)]
#[error("response body is not a JSON answer object: {0}")]
pub struct MalformedResponse(#[from] serde_json::Error);

#[derive(Deserialize)]
struct RawAnswer {
    #[serde(default)]
    answer: Option<String>,
    #[serde(default)]
    sources: Option<Vec<String>>,
    #[serde(default)]
    confidence: Option<String>,
}

/// Extract a uniform answer record from a chat response body. Total over
/// well-formed JSON objects: absent or null fields take the documented
/// defaults.
pub fn normalize(body: &str) -> Result<AnswerRecord, MalformedResponse> {
    let raw: RawAnswer = serde_json::from_str(body)?;
    Ok(AnswerRecord {
        answer: raw.answer.unwrap_or_else(|| DEFAULT_ANSWER.to_string()),
        sources: raw.sources.unwrap_or_default(),
        confidence: raw
            .confidence
            .unwrap_or_else(|| DEFAULT_CONFIDENCE.to_string()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_all_fields() {
        let record = normalize(
            r#"{"answer": "30 days", "sources": ["policy.md"], "confidence": "High"}"#,
        )
        .unwrap();
        assert_eq!(record.answer, "30 days");
        assert_eq!(record.sources, vec!["policy.md"]);
        assert_eq!(record.confidence, "High");
    }

    #[test]
    fn missing_fields_take_defaults() {
        let record = normalize("{}").unwrap();
        assert_eq!(record.answer, DEFAULT_ANSWER);
        assert!(record.sources.is_empty());
        assert_eq!(record.confidence, DEFAULT_CONFIDENCE);
    }

    #[test]
    fn null_fields_take_defaults() {
        let record =
            normalize(r#"{"answer": null, "sources": null, "confidence": null}"#).unwrap();
        assert_eq!(record.answer, DEFAULT_ANSWER);
        assert!(record.sources.is_empty());
        assert_eq!(record.confidence, DEFAULT_CONFIDENCE);
    }

    #[test]
    fn unknown_keys_are_ignored() {
        let record = normalize(r#"{"answer": "yes", "latency_ms": 12, "model": "x"}"#).unwrap();
        assert_eq!(record.answer, "yes");
    }

    #[test]
    fn invalid_json_is_malformed() {
        assert!(normalize("not json at all").is_err());
        assert!(normalize("").is_err());
    }

    #[test]
    fn non_object_json_is_malformed() {
        assert!(normalize(r#"["an", "array"]"#).is_err());
        assert!(normalize("42").is_err());
    }
}
