//! Audit logger
//!
//! Keeps every audit entry of the session in memory and, when a log path is
//! configured, also appends each entry as a JSON line.

use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};
use std::sync::RwLock;

use tracing::debug;

use crate::error::{FinboardError, FinboardResult};

use super::entry::AuditEntry;

/// Collects audit entries for the lifetime of a store
#[derive(Debug, Default)]
pub struct AuditLogger {
    entries: RwLock<Vec<AuditEntry>>,
    log_path: Option<PathBuf>,
}

impl AuditLogger {
    /// Logger that only keeps entries in memory
    pub fn in_memory() -> Self {
        Self::default()
    }

    /// Logger that also appends entries to a JSONL file
    pub fn with_file(log_path: PathBuf) -> Self {
        Self {
            entries: RwLock::new(Vec::new()),
            log_path: Some(log_path),
        }
    }

    /// Record an entry
    pub fn log(&self, entry: AuditEntry) -> FinboardResult<()> {
        debug!(
            operation = %entry.operation,
            entity = %entry.entity_type,
            id = %entry.entity_id,
            "audit"
        );

        if let Some(path) = &self.log_path {
            append_line(path, &entry)?;
        }

        let mut entries = self
            .entries
            .write()
            .map_err(|e| FinboardError::Storage(format!("Failed to acquire audit lock: {}", e)))?;
        entries.push(entry);
        Ok(())
    }

    /// All entries recorded by this logger, oldest first
    pub fn entries(&self) -> FinboardResult<Vec<AuditEntry>> {
        let entries = self
            .entries
            .read()
            .map_err(|e| FinboardError::Storage(format!("Failed to acquire audit lock: {}", e)))?;
        Ok(entries.clone())
    }

    /// The most recent `count` entries, oldest first
    pub fn recent(&self, count: usize) -> FinboardResult<Vec<AuditEntry>> {
        let all = self.entries()?;
        let start = all.len().saturating_sub(count);
        Ok(all[start..].to_vec())
    }

    pub fn len(&self) -> usize {
        self.entries.read().map(|e| e.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop the in-memory entries. The log file is left alone.
    pub fn clear(&self) -> FinboardResult<()> {
        let mut entries = self
            .entries
            .write()
            .map_err(|e| FinboardError::Storage(format!("Failed to acquire audit lock: {}", e)))?;
        entries.clear();
        Ok(())
    }

    pub fn path(&self) -> Option<&Path> {
        self.log_path.as_deref()
    }
}

fn append_line(path: &Path, entry: &AuditEntry) -> FinboardResult<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .map_err(|e| FinboardError::Io(format!("Failed to create audit log directory: {}", e)))?;
    }

    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| FinboardError::Io(format!("Failed to open audit log: {}", e)))?;

    let json = serde_json::to_string(entry)
        .map_err(|e| FinboardError::Json(format!("Failed to serialize audit entry: {}", e)))?;

    writeln!(file, "{}", json)
        .map_err(|e| FinboardError::Io(format!("Failed to write audit entry: {}", e)))?;

    file.flush()
        .map_err(|e| FinboardError::Io(format!("Failed to flush audit log: {}", e)))?;

    Ok(())
}

/// Read every entry from a JSONL audit file
///
/// A missing file reads as empty. Blank lines are skipped.
pub fn read_log_file(path: &Path) -> FinboardResult<Vec<AuditEntry>> {
    if !path.exists() {
        return Ok(Vec::new());
    }

    let file = File::open(path)
        .map_err(|e| FinboardError::Io(format!("Failed to open audit log: {}", e)))?;

    let mut entries = Vec::new();
    for (line_num, line) in BufReader::new(file).lines().enumerate() {
        let line = line.map_err(|e| {
            FinboardError::Io(format!("Failed to read audit log line {}: {}", line_num + 1, e))
        })?;

        if line.trim().is_empty() {
            continue;
        }

        let entry: AuditEntry = serde_json::from_str(&line).map_err(|e| {
            FinboardError::Json(format!(
                "Failed to parse audit entry at line {}: {}",
                line_num + 1,
                e
            ))
        })?;
        entries.push(entry);
    }

    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audit::Operation;
    use crate::models::{Alert, AlertType, Entity, NewAlert, Priority};
    use tempfile::TempDir;

    fn alert(seq: u64) -> Alert {
        let draft = NewAlert::new(AlertType::Insight, Priority::Low, format!("Alert {}", seq));
        Alert::from_draft(&draft, seq).unwrap()
    }

    #[test]
    fn test_in_memory_log() {
        let logger = AuditLogger::in_memory();
        assert!(logger.is_empty());

        logger.log(AuditEntry::created(&alert(1))).unwrap();
        logger.log(AuditEntry::deleted(&alert(1))).unwrap();

        let entries = logger.entries().unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].operation, Operation::Create);
        assert_eq!(entries[1].operation, Operation::Delete);
        assert!(logger.path().is_none());
    }

    #[test]
    fn test_recent() {
        let logger = AuditLogger::in_memory();
        for i in 0..10 {
            logger.log(AuditEntry::created(&alert(i))).unwrap();
        }

        let recent = logger.recent(3).unwrap();
        assert_eq!(recent.len(), 3);
        assert_eq!(recent[0].entity_id, "alert-7");
        assert_eq!(recent[2].entity_id, "alert-9");
    }

    #[test]
    fn test_file_sink_survives_new_logger() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("logs").join("audit.log");

        let logger = AuditLogger::with_file(path.clone());
        logger.log(AuditEntry::created(&alert(1))).unwrap();
        logger.log(AuditEntry::created(&alert(2))).unwrap();

        let from_disk = read_log_file(&path).unwrap();
        assert_eq!(from_disk.len(), 2);
        assert_eq!(from_disk[1].entity_id, "alert-2");
    }

    #[test]
    fn test_missing_file_reads_empty() {
        let temp = TempDir::new().unwrap();
        assert!(read_log_file(&temp.path().join("none.log")).unwrap().is_empty());
    }

    #[test]
    fn test_clear() {
        let logger = AuditLogger::in_memory();
        logger.log(AuditEntry::created(&alert(1))).unwrap();
        logger.clear().unwrap();
        assert_eq!(logger.len(), 0);
    }
}
