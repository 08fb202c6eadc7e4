//! Calculation history: the collaborator the engine reports to, and a
//! bounded, optionally file-backed implementation of it.
//!
//! Entries are kept most-recent-first. When the log is full, the oldest
//! entry is evicted. Appends from several threads are serialized by an
//! internal mutex, so an entry is either fully recorded or not at all.

use std::collections::VecDeque;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::HistoryError;

/// Most entries kept by default.
pub const DEFAULT_HISTORY_CAPACITY: usize = 100;

/// Which calculator produced an entry.
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Scientific,
    Matrix,
    Converter,
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Category::Scientific => "scientific",
            Category::Matrix => "matrix",
            Category::Converter => "converter",
        };
        f.write_str(name)
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct HistoryEntry {
    pub id: i64,
    pub category: Category,
    pub calculation: String,
    pub result: String,
    pub timestamp: DateTime<Utc>,
}

/// Sink for completed calculations.
///
/// Recording is best-effort from the caller's point of view: callers log
/// and drop the error instead of failing the calculation.
pub trait HistoryLog {
    fn append(&self, category: Category, description: &str, result: &str) -> Result<(), HistoryError>;
}

impl<H: HistoryLog + ?Sized> HistoryLog for &H {
    fn append(&self, category: Category, description: &str, result: &str) -> Result<(), HistoryError> {
        (**self).append(category, description, result)
    }
}

impl<H: HistoryLog + ?Sized> HistoryLog for Arc<H> {
    fn append(&self, category: Category, description: &str, result: &str) -> Result<(), HistoryError> {
        (**self).append(category, description, result)
    }
}

impl<H: HistoryLog + ?Sized> HistoryLog for Box<H> {
    fn append(&self, category: Category, description: &str, result: &str) -> Result<(), HistoryError> {
        (**self).append(category, description, result)
    }
}

/// Discards every entry.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullHistory;

impl HistoryLog for NullHistory {
    fn append(&self, _: Category, _: &str, _: &str) -> Result<(), HistoryError> {
        Ok(())
    }
}

#[derive(Debug, Default)]
struct Entries {
    items: VecDeque<HistoryEntry>,
    last_id: i64,
}

#[derive(Debug)]
pub struct CalculationHistory {
    entries: Mutex<Entries>,
    capacity: usize,
    file: Option<PathBuf>,
}

impl Default for CalculationHistory {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY_CAPACITY)
    }
}

impl CalculationHistory {
    /// In-memory history holding at most `capacity` entries.
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: Mutex::new(Entries::default()),
            capacity,
            file: None,
        }
    }

    /// History backed by a JSON file that is rewritten on every change.
    ///
    /// A missing file starts an empty history. An unreadable or corrupt
    /// file is logged and also starts empty; it is overwritten on the next
    /// append.
    pub fn open<P: AsRef<Path>>(path: P, capacity: usize) -> Self {
        let path = path.as_ref().to_path_buf();
        let mut items = match load_entries(&path) {
            Ok(items) => items,
            Err(e) => {
                log::error!(
                    "[Calai::History] Failed to load history from {}: {}",
                    path.display(),
                    e
                );
                VecDeque::new()
            }
        };
        items.truncate(capacity);
        let last_id = items.iter().map(|e| e.id).max().unwrap_or(0);
        log::debug!(
            "[Calai::History] Loaded {} entries from {}",
            items.len(),
            path.display()
        );

        Self {
            entries: Mutex::new(Entries { items, last_id }),
            capacity,
            file: Some(path),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn file(&self) -> Option<&Path> {
        self.file.as_deref()
    }

    fn lock(&self) -> MutexGuard<'_, Entries> {
        // Nothing panics while the lock is held, so a poisoned lock still
        // guards consistent data.
        self.entries.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Snapshot of all entries, most recent first.
    pub fn entries(&self) -> Vec<HistoryEntry> {
        self.lock().items.iter().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.lock().items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().items.is_empty()
    }

    pub fn clear(&self) -> Result<(), HistoryError> {
        let mut guard = self.lock();
        guard.items.clear();
        self.persist(&guard.items)
    }

    /// Export entries, most recent first, as CSV with a header row.
    pub fn write_csv<P: AsRef<Path>>(&self, path: P) -> Result<(), HistoryError> {
        let entries = self.entries();
        let mut writer = csv::Writer::from_path(path.as_ref())?;
        for entry in &entries {
            writer.serialize(entry)?;
        }
        writer.flush()?;
        log::info!(
            "[Calai::History] Exported {} entries to {}",
            entries.len(),
            path.as_ref().display()
        );
        Ok(())
    }

    fn persist(&self, items: &VecDeque<HistoryEntry>) -> Result<(), HistoryError> {
        let Some(path) = &self.file else {
            return Ok(());
        };
        let json = serde_json::to_string_pretty(items)?;
        fs::write(path, json)?;
        Ok(())
    }
}

impl HistoryLog for CalculationHistory {
    fn append(&self, category: Category, description: &str, result: &str) -> Result<(), HistoryError> {
        let timestamp = Utc::now();
        let mut guard = self.lock();

        let id = timestamp.timestamp_millis().max(guard.last_id + 1);
        guard.last_id = id;
        guard.items.push_front(HistoryEntry {
            id,
            category,
            calculation: description.to_string(),
            result: result.to_string(),
            timestamp,
        });
        guard.items.truncate(self.capacity);

        self.persist(&guard.items)
    }
}

fn load_entries(path: &Path) -> Result<VecDeque<HistoryEntry>, HistoryError> {
    if !path.exists() {
        return Ok(VecDeque::new());
    }
    let content = fs::read_to_string(path)?;
    if content.trim().is_empty() {
        return Ok(VecDeque::new());
    }
    Ok(serde_json::from_str(&content)?)
}
