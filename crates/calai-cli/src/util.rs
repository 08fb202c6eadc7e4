use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

use calai_matrix::{load_engine_config, EngineConfig};

pub fn validate_csv_output(path: &str) -> Result<()> {
    let pb = PathBuf::from(path);

    let ext = pb
        .extension()
        .and_then(|s| s.to_str())
        .map(|s| s.to_lowercase());
    if ext.as_deref() != Some("csv") {
        anyhow::bail!("Export file must have a .csv extension: {}", path);
    }

    if let Some(parent) = pb.parent().filter(|p| !p.as_os_str().is_empty()) {
        if !parent.is_dir() {
            anyhow::bail!("Export directory does not exist: {}", parent.display());
        }
    }

    Ok(())
}

/// Read the engine config from `path`, or fall back to defaults.
pub fn load_config_or_default(path: Option<&Path>) -> Result<EngineConfig> {
    match path {
        Some(path) => {
            log::info!("[Calai::Cli] Using config: {}", path.display());
            load_engine_config(path)
                .with_context(|| format!("Invalid engine config {}", path.display()))
        }
        None => Ok(EngineConfig::default()),
    }
}
