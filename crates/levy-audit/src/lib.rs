//! levy-audit
//!
//! Append-only session journal. Writes JSON Lines (one record per line)
//! so safety transitions, faults, and skipped purchase lines survive the
//! session for later inspection.
//!
//! The journal is a best-effort sink: gate state must never depend on
//! whether a line landed on disk. Production code records through the
//! [`Journal`] trait via [`BestEffortJournal`], which swallows sink
//! failures; the fallible [`FileJournal::append`] surface exists for
//! tools that do want the error.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use uuid::Uuid;

/// One journal entry before serialization.
#[derive(Clone, Debug, PartialEq)]
pub struct JournalRecord {
    /// Stable machine-readable kind, e.g. `"gate_disabled"`, `"fault"`.
    pub kind: String,
    /// Human-readable line.
    pub message: String,
    /// Structured detail; `Value::Null` when there is none.
    pub fields: Value,
}

impl JournalRecord {
    pub fn new(kind: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            message: message.into(),
            fields: Value::Null,
        }
    }

    pub fn with_fields(mut self, fields: Value) -> Self {
        self.fields = fields;
        self
    }
}

/// Where journal records go. Implementations must not panic; failures are
/// the implementation's to absorb.
pub trait Journal {
    fn record(&mut self, record: JournalRecord);
}

/// Discards every record.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullJournal;

impl Journal for NullJournal {
    fn record(&mut self, _record: JournalRecord) {}
}

/// A serialized journal line.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JournalEvent {
    /// Monotonically increasing per-writer sequence number.
    pub seq: u64,
    /// Identifies the writer's session (fresh per construction).
    pub session_id: Uuid,
    pub ts_utc: DateTime<Utc>,
    pub kind: String,
    pub message: String,
    pub fields: Value,
}

/// Append-only JSON Lines writer. One event per line, flushed per append.
pub struct FileJournal {
    path: PathBuf,
    session_id: Uuid,
    seq: u64,
}

impl FileJournal {
    /// Creates the writer and ensures parent directories exist.
    pub fn new(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| format!("create_dir_all {parent:?}"))?;
        }
        Ok(Self {
            path,
            session_id: Uuid::new_v4(),
            seq: 0,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn session_id(&self) -> Uuid {
        self.session_id
    }

    /// Number of events appended so far.
    pub fn seq(&self) -> u64 {
        self.seq
    }

    /// Append one record. Fallible; wrap in [`BestEffortJournal`] where a
    /// failure must not surface.
    pub fn append(&mut self, record: JournalRecord) -> Result<JournalEvent> {
        let event = JournalEvent {
            seq: self.seq,
            session_id: self.session_id,
            ts_utc: Utc::now(),
            kind: record.kind,
            message: record.message,
            fields: record.fields,
        };

        let line = serde_json::to_string(&event).context("serialize journal event")?;
        let mut f = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .with_context(|| format!("open journal {:?}", self.path))?;
        writeln!(f, "{line}").with_context(|| format!("append journal {:?}", self.path))?;

        self.seq += 1;
        Ok(event)
    }
}

/// Wraps a [`FileJournal`] into the infallible [`Journal`] contract by
/// swallowing append failures.
pub struct BestEffortJournal {
    inner: FileJournal,
}

impl BestEffortJournal {
    pub fn new(inner: FileJournal) -> Self {
        Self { inner }
    }
}

impl Journal for BestEffortJournal {
    fn record(&mut self, record: JournalRecord) {
        let _ = self.inner.append(record);
    }
}
