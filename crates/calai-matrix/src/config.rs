use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::history::DEFAULT_HISTORY_CAPACITY;
use crate::linalg::{DeterminantMethod, DEFAULT_PIVOT_TOLERANCE};

/// Central configuration for the matrix engine.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct EngineConfig {
    /// Pivots and determinants with a smaller magnitude are treated as zero.
    /// Must be finite and positive.
    pub pivot_tolerance: f64,
    pub determinant_method: DeterminantMethod,
    /// Number of history entries retained, oldest evicted first.
    pub history_capacity: usize,
    /// JSON file the history is persisted to. In-memory only when unset.
    pub history_file: Option<PathBuf>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            pivot_tolerance: DEFAULT_PIVOT_TOLERANCE,
            determinant_method: DeterminantMethod::Cofactor,
            history_capacity: DEFAULT_HISTORY_CAPACITY,
            history_file: None,
        }
    }
}

impl EngineConfig {
    pub fn with_determinant_method(mut self, method: DeterminantMethod) -> Self {
        self.determinant_method = method;
        self
    }

    pub fn with_history_file<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.history_file = Some(path.into());
        self
    }
}

/// Load an engine configuration from a JSON file. Missing fields keep
/// their defaults.
pub fn load_engine_config<P: AsRef<Path>>(path: P) -> Result<EngineConfig> {
    let content = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read config: {}", path.as_ref().display()))?;
    let config: EngineConfig = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse config: {}", path.as_ref().display()))?;
    if !config.pivot_tolerance.is_finite() || config.pivot_tolerance <= 0.0 {
        anyhow::bail!(
            "pivot_tolerance must be a finite number greater than zero, got {}",
            config.pivot_tolerance
        );
    }
    Ok(config)
}
