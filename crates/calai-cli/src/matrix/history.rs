//! `calai history`: inspect, clear or export a history file.
use std::path::Path;

use anyhow::{Context, Result};

use calai_matrix::{CalculationHistory, HistoryEntry};

use crate::util::validate_csv_output;

pub fn format_entry(entry: &HistoryEntry) -> String {
    format!(
        "{} [{}] {} = {}",
        entry.timestamp.format("%Y-%m-%d %H:%M:%S"),
        entry.category,
        entry.calculation,
        entry.result
    )
}

/// One line per entry, most recent first. `capacity` should match the
/// `history_capacity` the file was written with, or older entries are
/// dropped from view.
pub fn show_history(path: &Path, capacity: usize) -> Vec<String> {
    let history = CalculationHistory::open(path, capacity);
    history.entries().iter().map(format_entry).collect()
}

/// Remove all entries; returns how many were dropped.
pub fn clear_history(path: &Path, capacity: usize) -> Result<usize> {
    let history = CalculationHistory::open(path, capacity);
    let dropped = history.len();
    history
        .clear()
        .with_context(|| format!("Failed to clear history {}", path.display()))?;
    Ok(dropped)
}

pub fn export_history(path: &Path, output: &str, capacity: usize) -> Result<usize> {
    validate_csv_output(output)?;
    let history = CalculationHistory::open(path, capacity);
    history
        .write_csv(output)
        .with_context(|| format!("Failed to export history to {}", output))?;
    Ok(history.len())
}
