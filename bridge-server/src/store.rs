//! Persisted printer selection
//!
//! One JSON record on local disk, owned exclusively by this store. It is
//! read on every resolution request and rewritten whole on every update -
//! no delta patching, no schema migration.

use std::io::Write;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

/// Config store error types
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Config IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Persisted operator configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PrinterConfig {
    /// Pinned printer name; absent when following the OS default
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selected_printer: Option<String>,
}

/// Disk-backed record holding the pinned printer name
#[derive(Debug, Clone)]
pub struct ConfigStore {
    path: PathBuf,
}

impl ConfigStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Read persisted state; a missing or corrupt file is an empty config
    pub fn load(&self) -> PrinterConfig {
        let raw = match std::fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(_) => return PrinterConfig::default(),
        };

        match serde_json::from_str(&raw) {
            Ok(cfg) => cfg,
            Err(e) => {
                warn!(
                    path = %self.path.display(),
                    error = %e,
                    "Corrupt printer config, treating as empty"
                );
                PrinterConfig::default()
            }
        }
    }

    /// The pinned selection, trimmed; never an empty string
    pub fn selected(&self) -> Option<String> {
        self.load().selected_printer.and_then(|s| {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                None
            } else {
                Some(trimmed.to_string())
            }
        })
    }

    /// Replace the pinned selection; `None` removes the key
    ///
    /// Full read-modify-write rewrite of the record. The new record lands
    /// via temp file + rename, so a reader never observes a partial write.
    pub fn set_selected(&self, name: Option<&str>) -> Result<(), StoreError> {
        let mut cfg = self.load();
        cfg.selected_printer = name
            .map(|n| n.trim().to_string())
            .filter(|n| !n.is_empty());

        let json = serde_json::to_string_pretty(&cfg)?;

        let dir = self.path.parent().filter(|p| !p.as_os_str().is_empty());
        let mut tmp = tempfile::NamedTempFile::new_in(dir.unwrap_or(Path::new(".")))?;
        tmp.write_all(json.as_bytes())?;
        tmp.persist(&self.path).map_err(|e| StoreError::Io(e.error))?;

        Ok(())
    }
}
