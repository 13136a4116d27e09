use super::StorageBackend;
use crate::error::{Result, SprigError};
use std::cell::{Cell, RefCell};
use std::collections::HashMap;

/// In-memory storage backend for testing.
///
/// Uses `RefCell` for interior mutability since sprig is single-threaded.
#[derive(Default)]
pub struct MemBackend {
    blobs: RefCell<HashMap<String, String>>,
    simulate_write_error: Cell<bool>,
    writes: Cell<usize>,
}

impl MemBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts with `blob` already stored under `key`.
    pub fn with_blob(key: &str, blob: &str) -> Self {
        let backend = Self::new();
        backend
            .blobs
            .borrow_mut()
            .insert(key.to_string(), blob.to_string());
        backend
    }

    /// Enable write error simulation for testing error handling.
    pub fn set_simulate_write_error(&self, simulate: bool) {
        self.simulate_write_error.set(simulate);
    }

    /// Number of successful saves so far.
    pub fn write_count(&self) -> usize {
        self.writes.get()
    }

    /// Raw blob for `key`, for byte-level assertions.
    pub fn raw(&self, key: &str) -> Option<String> {
        self.blobs.borrow().get(key).cloned()
    }
}

impl StorageBackend for MemBackend {
    fn load(&self, key: &str) -> Result<Option<String>> {
        Ok(self.blobs.borrow().get(key).cloned())
    }

    fn save(&self, key: &str, blob: &str) -> Result<()> {
        if self.simulate_write_error.get() {
            return Err(SprigError::Store("Simulated write error".to_string()));
        }
        self.blobs
            .borrow_mut()
            .insert(key.to_string(), blob.to_string());
        self.writes.set(self.writes.get() + 1);
        Ok(())
    }
}
