use url::Url;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("no endpoint URL was provided")]
    EmptyUrl,
    #[error("endpoint URL must start with http:// or https://: '{0}'")]
    InvalidScheme(String),
    #[error("endpoint URL '{url}' is not valid: {source}")]
    Unparseable {
        url: String,
        #[source]
        source: url::ParseError,
    },
    #[error("unsupported log format: '{0}' (expected 'append' or 'buffered')")]
    UnsupportedLogFormat(String),
}

/// Validated backend location. Built once at startup and passed by
/// reference everywhere a request is issued.
#[derive(Clone, Debug)]
pub struct EndpointConfig {
    base_url: String,
}

impl EndpointConfig {
    pub fn new(raw: &str) -> Result<Self, ConfigError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(ConfigError::EmptyUrl);
        }
        if !trimmed.starts_with("http://") && !trimmed.starts_with("https://") {
            return Err(ConfigError::InvalidScheme(trimmed.to_string()));
        }
        Url::parse(trimmed).map_err(|source| ConfigError::Unparseable {
            url: trimmed.to_string(),
            source,
        })?;
        Ok(Self {
            base_url: trimmed.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn chat_url(&self) -> String {
        format!("{}/chat", self.base_url)
    }

    pub fn health_url(&self) -> String {
        format!("{}/health", self.base_url)
    }
}
