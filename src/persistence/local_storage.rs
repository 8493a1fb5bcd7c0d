//! Browser LocalStorage store (wasm32)

use super::{ProgressionStore, StoreError};
use crate::progression::ProgressionState;

#[derive(Debug, Clone)]
pub struct LocalStorageStore {
    key: String,
}

impl LocalStorageStore {
    pub const DEFAULT_KEY: &'static str = "cavbot_fc_progression";

    pub fn new() -> Self {
        Self::with_key(Self::DEFAULT_KEY)
    }

    pub fn with_key(key: impl Into<String>) -> Self {
        Self { key: key.into() }
    }

    fn storage() -> Result<web_sys::Storage, StoreError> {
        web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten()
            .ok_or_else(|| StoreError::Unavailable("LocalStorage not accessible".to_string()))
    }
}

impl Default for LocalStorageStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressionStore for LocalStorageStore {
    fn load(&mut self) -> Result<ProgressionState, StoreError> {
        let storage = Self::storage()?;
        match storage.get_item(&self.key) {
            Ok(Some(json)) => {
                let state: ProgressionState = serde_json::from_str(&json)?;
                log::info!("Loaded progression (level {})", state.level);
                Ok(state)
            }
            Ok(None) => {
                log::info!("No progression found, starting fresh");
                Ok(ProgressionState::default())
            }
            Err(e) => Err(StoreError::Unavailable(format!("{:?}", e))),
        }
    }

    fn save(&mut self, state: &ProgressionState) -> Result<(), StoreError> {
        let storage = Self::storage()?;
        let json = serde_json::to_string(state)?;
        storage
            .set_item(&self.key, &json)
            .map_err(|e| StoreError::Unavailable(format!("{:?}", e)))?;
        log::info!("Progression saved (level {})", state.level);
        Ok(())
    }
}
