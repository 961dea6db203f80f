use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Who produced a turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Role {
    User,
    Assistant,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "USER",
            Role::Assistant => "ASSISTANT",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One recorded unit of conversation, immutable once written.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SessionTurn {
    pub timestamp: String,
    pub role: Role,
    pub message: String,
}

impl SessionTurn {
    /// Build a turn stamped with the current UTC time.
    pub fn now(role: Role, message: &str) -> Self {
        Self {
            timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true),
            role,
            message: message.to_string(),
        }
    }

    /// Flat-log line format: `[<timestamp>] <ROLE>: <message>`.
    pub fn render(&self) -> String {
        format!("[{}] {}: {}", self.timestamp, self.role, self.message)
    }
}

/// Uniform answer extracted from whatever JSON shape the backend returned.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AnswerRecord {
    pub answer: String,
    pub sources: Vec<String>,
    pub confidence: String,
}

impl AnswerRecord {
    /// Message stored for the ASSISTANT turn. Sources and confidence ride
    /// along in compact suffixes so the one-line-per-turn log keeps the
    /// whole record.
    pub fn log_message(&self) -> String {
        let mut message = self.answer.clone();
        if !self.sources.is_empty() {
            message.push_str(&format!(" [sources: {}]", self.sources.join(", ")));
        }
        message.push_str(&format!(" [confidence: {}]", self.confidence));
        message
    }
}

/// A whole session as persisted by the buffered log variant.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SessionRecord {
    pub id: String,
    pub turns: Vec<SessionTurn>,
}

impl SessionRecord {
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            turns: Vec::new(),
        }
    }
}

impl Default for SessionRecord {
    fn default() -> Self {
        Self::new()
    }
}

/// Optional diagnostics reported by the health endpoint. Absence of any
/// field is not an error.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct HealthInfo {
    #[serde(default, alias = "is_model_loaded")]
    pub model_loaded: Option<bool>,
    #[serde(default, alias = "document_count", alias = "documents")]
    pub documents_indexed: Option<u64>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::DateTime;

    #[test]
    fn role_renders_uppercase() {
        assert_eq!(Role::User.to_string(), "USER");
        assert_eq!(Role::Assistant.to_string(), "ASSISTANT");
    }

    #[test]
    fn role_serializes_uppercase() {
        assert_eq!(serde_json::to_string(&Role::User).unwrap(), "\"USER\"");
        assert_eq!(
            serde_json::from_str::<Role>("\"ASSISTANT\"").unwrap(),
            Role::Assistant
        );
    }

    #[test]
    fn turn_timestamp_is_rfc3339() {
        let turn = SessionTurn::now(Role::User, "hello");
        assert!(DateTime::parse_from_rfc3339(&turn.timestamp).is_ok());
    }

    #[test]
    fn turn_renders_bracketed_line() {
        let turn = SessionTurn {
            timestamp: "2026-08-07T10:00:00Z".to_string(),
            role: Role::Assistant,
            message: "30 days".to_string(),
        };
        assert_eq!(turn.render(), "[2026-08-07T10:00:00Z] ASSISTANT: 30 days");
    }

    #[test]
    fn log_message_includes_sources_and_confidence() {
        let record = AnswerRecord {
            answer: "30 days".to_string(),
            sources: vec!["policy.md".to_string(), "faq.md".to_string()],
            confidence: "High".to_string(),
        };
        assert_eq!(
            record.log_message(),
            "30 days [sources: policy.md, faq.md] [confidence: High]"
        );
    }

    #[test]
    fn log_message_skips_empty_sources() {
        let record = AnswerRecord {
            answer: "30 days".to_string(),
            sources: vec![],
            confidence: "Unknown".to_string(),
        };
        assert_eq!(record.log_message(), "30 days [confidence: Unknown]");
    }

    #[test]
    fn session_record_gets_a_fresh_id() {
        let a = SessionRecord::new();
        let b = SessionRecord::new();
        assert_ne!(a.id, b.id);
        assert!(a.turns.is_empty());
    }

    #[test]
    fn health_info_honors_aliases() {
        let info: HealthInfo =
            serde_json::from_str(r#"{"is_model_loaded": true, "document_count": 42}"#).unwrap();
        assert_eq!(info.model_loaded, Some(true));
        assert_eq!(info.documents_indexed, Some(42));
    }

    #[test]
    fn health_info_defaults_when_fields_missing() {
        let info: HealthInfo = serde_json::from_str("{}").unwrap();
        assert_eq!(info.model_loaded, None);
        assert_eq!(info.documents_indexed, None);
    }
}
