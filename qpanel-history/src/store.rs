use super::*;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use tracing::{debug, warn};

/// Name of the durable storage slot holding the calculator history.
pub const STORAGE_SLOT: &str = "calc_history_v1";

/// One past calculation, frozen at creation time.
///
/// `result` is the stringified output of evaluating `expression` when the
/// record was created. It is an audit trail, never re-derived.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryRecord {
    pub expression: String,
    pub result: String,
    pub timestamp: i64,
}

/// Append-only, insertion-ordered log of past calculations.
///
/// The whole sequence is rewritten to the storage slot on every append.
/// Persistence is best effort: a failed write keeps the in-memory log intact.
#[derive(Debug, Default)]
pub struct HistoryLog {
    path: Option<PathBuf>,
    records: Vec<HistoryRecord>,
}

impl HistoryLog {
    /// An in-memory log with no backing slot.
    pub fn new() -> Self {
        HistoryLog {
            path: None,
            records: Vec::new(),
        }
    }

    /// A log backed by the given slot path. Call `load_from_storage` once
    /// at startup to pick up the persisted records.
    pub fn with_path(path: PathBuf) -> Self {
        HistoryLog {
            path: Some(path),
            records: Vec::new(),
        }
    }

    /// Load the persisted sequence, replacing the in-memory one.
    /// A missing or corrupt slot yields an empty sequence, never an error.
    pub fn load_from_storage(&mut self) -> usize {
        let Some(path) = &self.path else {
            return 0;
        };
        self.records = match fs::read_to_string(path) {
            Ok(raw) => match serde_json::from_str::<Vec<HistoryRecordSerializer>>(&raw) {
                Ok(items) => items.iter().map(HistoryRecord::from).collect(),
                Err(err) => {
                    warn!("corrupt history slot {}: {}", path.display(), err);
                    Vec::new()
                }
            },
            Err(err) => {
                debug!("history slot {} not readable: {}", path.display(), err);
                Vec::new()
            }
        };
        self.records.len()
    }

    /// Append a record stamped with the current wall clock and persist the
    /// full sequence. The in-memory append always succeeds.
    pub fn append(&mut self, expression: &str, result: &str) {
        self.records.push(HistoryRecord {
            expression: expression.to_string(),
            result: result.to_string(),
            timestamp: current_time_ms(),
        });
        if let Err(err) = self.persist() {
            warn!("history write failed, continuing in memory: {err:#}");
        }
    }

    /// Empty the sequence and delete the slot entirely, so a later restart
    /// sees no saved state rather than an empty one.
    pub fn clear(&mut self) {
        self.records.clear();
        if let Some(path) = &self.path {
            match fs::remove_file(path) {
                Ok(_) => debug!("removed history slot {}", path.display()),
                Err(err) if err.kind() == std::io::ErrorKind::NotFound => {}
                Err(err) => warn!("failed to remove history slot {}: {}", path.display(), err),
            }
        }
    }

    /// The stored expression of a record, for re-loading into the active
    /// input. Does not re-evaluate.
    pub fn replay(&self, index: usize) -> Option<&str> {
        self.records.get(index).map(|r| r.expression.as_str())
    }

    /// Records in insertion order, oldest first.
    pub fn records(&self) -> &[HistoryRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    fn persist(&self) -> Result<()> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)
                .with_context(|| format!("failed to create {}", dir.display()))?;
        }
        let items: Vec<HistoryRecordSerializer> = self
            .records
            .iter()
            .map(HistoryRecordSerializer::from)
            .collect();
        let raw = serde_json::to_string(&items).context("failed to serialize history")?;
        fs::write(path, raw).with_context(|| format!("failed to write {}", path.display()))
    }
}

/// Wire form of a record: `{"expr": .., "result": .., "t": ..}`.
#[derive(Serialize, Deserialize, Debug)]
pub struct HistoryRecordSerializer {
    expr: String,
    result: String,
    t: i64,
}

impl From<&HistoryRecord> for HistoryRecordSerializer {
    fn from(record: &HistoryRecord) -> Self {
        HistoryRecordSerializer {
            expr: record.expression.clone(),
            result: record.result.clone(),
            t: record.timestamp,
        }
    }
}

impl From<&HistoryRecordSerializer> for HistoryRecord {
    fn from(raw: &HistoryRecordSerializer) -> Self {
        HistoryRecord {
            expression: raw.expr.clone(),
            result: raw.result.clone(),
            timestamp: raw.t,
        }
    }
}
