use std::fs;
use std::path::{Path, PathBuf};

use super::{LogError, SessionLog};
use crate::models::chat::{Role, SessionRecord, SessionTurn};

/// Buffered variant: turns accumulate in memory and land on disk as a
/// single JSON document when the session ends cleanly.
pub struct BufferedSessionLog {
    path: PathBuf,
    record: SessionRecord,
}

impl BufferedSessionLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            record: SessionRecord::new(),
        }
    }

    pub fn turns(&self) -> &[SessionTurn] {
        &self.record.turns
    }
}

impl SessionLog for BufferedSessionLog {
    fn record_turn(&mut self, role: Role, message: &str) -> Result<(), LogError> {
        self.record.turns.push(SessionTurn::now(role, message));
        Ok(())
    }

    fn flush(&mut self) -> Result<(), LogError> {
        if self.record.turns.is_empty() {
            return Ok(());
        }
        let document = serde_json::to_string_pretty(&self.record)?;
        fs::write(&self.path, document)?;
        Ok(())
    }

    fn read_all(&self) -> Result<Option<String>, LogError> {
        if self.record.turns.is_empty() {
            return Ok(None);
        }
        let rendered = self
            .record
            .turns
            .iter()
            .map(SessionTurn::render)
            .collect::<Vec<_>>()
            .join("\n");
        Ok(Some(rendered))
    }

    fn path(&self) -> &Path {
        &self.path
    }
}
