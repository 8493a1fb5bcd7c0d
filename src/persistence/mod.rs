//! Progression persistence
//!
//! The simulation never touches storage directly; it is handed a
//! [`ProgressionStore`] and calls it once at match start and once at match end.
//!
//! Stores:
//! - [`MemoryStore`]: shared in-memory handle (tests, demos)
//! - [`JsonFileStore`]: JSON on disk, tmp then rename, previous save kept as backup
//! - [`LocalStorageStore`]: browser LocalStorage (wasm32 only)

use std::cell::RefCell;
use std::rc::Rc;

use thiserror::Error;

use crate::progression::ProgressionState;

#[cfg(not(target_arch = "wasm32"))]
mod file;
#[cfg(target_arch = "wasm32")]
mod local_storage;

#[cfg(not(target_arch = "wasm32"))]
pub use file::JsonFileStore;
#[cfg(target_arch = "wasm32")]
pub use local_storage::LocalStorageStore;

/// Errors raised by a progression store
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("progression storage I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("progression data is malformed: {0}")]
    Json(#[from] serde_json::Error),
    #[error("progression storage unavailable: {0}")]
    Unavailable(String),
}

/// Where the progression record lives
pub trait ProgressionStore {
    fn load(&mut self) -> Result<ProgressionState, StoreError>;
    fn save(&mut self, state: &ProgressionState) -> Result<(), StoreError>;
}

/// In-memory store; clones share the same record
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    state: Rc<RefCell<ProgressionState>>,
    saves: Rc<RefCell<u32>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_state(state: ProgressionState) -> Self {
        Self {
            state: Rc::new(RefCell::new(state)),
            saves: Rc::default(),
        }
    }

    /// Current record
    pub fn get(&self) -> ProgressionState {
        self.state.borrow().clone()
    }

    /// How many times `save` has been called
    pub fn save_count(&self) -> u32 {
        *self.saves.borrow()
    }
}

impl ProgressionStore for MemoryStore {
    fn load(&mut self) -> Result<ProgressionState, StoreError> {
        Ok(self.get())
    }

    fn save(&mut self, state: &ProgressionState) -> Result<(), StoreError> {
        *self.state.borrow_mut() = state.clone();
        *self.saves.borrow_mut() += 1;
        Ok(())
    }
}

/// Store that always fails; for exercising fallback paths
#[derive(Debug, Clone, Copy, Default)]
pub struct UnavailableStore;

impl ProgressionStore for UnavailableStore {
    fn load(&mut self) -> Result<ProgressionState, StoreError> {
        Err(StoreError::Unavailable("no storage backend".to_string()))
    }

    fn save(&mut self, _state: &ProgressionState) -> Result<(), StoreError> {
        Err(StoreError::Unavailable("no storage backend".to_string()))
    }
}
