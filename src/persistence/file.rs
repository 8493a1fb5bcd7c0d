//! JSON file store (native)

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use super::{ProgressionStore, StoreError};
use crate::progression::ProgressionState;

/// Progression record in a JSON file.
///
/// Writes go to `<path>.tmp` first and are renamed into place; the previous
/// file is kept as `<path>.bak`. A missing file loads as a fresh record.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn sibling(&self, ext: &str) -> PathBuf {
        let mut name = self.path.as_os_str().to_owned();
        name.push(ext);
        PathBuf::from(name)
    }

    fn read(path: &Path) -> Result<Option<ProgressionState>, StoreError> {
        match fs::read_to_string(path) {
            Ok(json) => Ok(Some(serde_json::from_str(&json)?)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}

impl ProgressionStore for JsonFileStore {
    fn load(&mut self) -> Result<ProgressionState, StoreError> {
        match Self::read(&self.path) {
            Ok(Some(state)) => Ok(state),
            Ok(None) => {
                log::info!("No progression at {}, starting fresh", self.path.display());
                Ok(ProgressionState::default())
            }
            Err(err) => {
                // Corrupt primary: fall back to the backup if it parses
                let backup = self.sibling(".bak");
                match Self::read(&backup) {
                    Ok(Some(state)) => {
                        log::warn!("Progression file unreadable ({}), using backup", err);
                        Ok(state)
                    }
                    _ => Err(err),
                }
            }
        }
    }

    fn save(&mut self, state: &ProgressionState) -> Result<(), StoreError> {
        if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir)?;
        }
        let tmp = self.sibling(".tmp");
        fs::write(&tmp, serde_json::to_string_pretty(state)?)?;
        if self.path.exists() {
            fs::copy(&self.path, self.sibling(".bak"))?;
        }
        fs::rename(&tmp, &self.path)?;
        log::debug!("Progression saved to {}", self.path.display());
        Ok(())
    }
}
