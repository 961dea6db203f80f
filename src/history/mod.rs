mod file;
mod memory;

pub use file::FileSessionLog;
pub use memory::BufferedSessionLog;

use std::path::Path;

use log::info;

use crate::cli::Args;
use crate::config::ConfigError;
use crate::models::chat::Role;

pub const DEFAULT_APPEND_PATH: &str = "conversation_log.txt";
pub const DEFAULT_BUFFERED_PATH: &str = "conversation_log.json";

#[derive(Debug, thiserror::Error)]
pub enum LogError {
    #[error("could not write the session log: {0}")]
    Io(#[from] std::io::Error),
    #[error("could not serialize the session log: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Durable record of the conversation. Failures here must never end the
/// session; callers downgrade them to warnings.
pub trait SessionLog: Send {
    /// Append one turn, stamped with the current time.
    fn record_turn(&mut self, role: Role, message: &str) -> Result<(), LogError>;

    /// Persist anything still buffered; called once at clean shutdown.
    fn flush(&mut self) -> Result<(), LogError>;

    /// Full history so far, or `None` when nothing has been recorded.
    fn read_all(&self) -> Result<Option<String>, LogError>;

    /// Where the log is (or will be) persisted.
    fn path(&self) -> &Path;
}

pub fn create_session_log(args: &Args) -> Result<Box<dyn SessionLog>, ConfigError> {
    let store: Box<dyn SessionLog> = match args.log_format.to_lowercase().as_str() {
        "append" => {
            let path = args
                .log_path
                .clone()
                .unwrap_or_else(|| DEFAULT_APPEND_PATH.to_string());
            Box::new(FileSessionLog::new(path))
        }
        "buffered" => {
            let path = args
                .log_path
                .clone()
                .unwrap_or_else(|| DEFAULT_BUFFERED_PATH.to_string());
            Box::new(BufferedSessionLog::new(path))
        }
        other => return Err(ConfigError::UnsupportedLogFormat(other.to_string())),
    };
    info!(
        "Conversation will be stored as {} at {}",
        args.log_format,
        store.path().display()
    );
    Ok(store)
}
