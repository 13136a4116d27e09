//! # Storage Layer
//!
//! Persistence is split in two:
//!
//! - [`StorageBackend`] handles the "how": loading and saving opaque string
//!   blobs under well-known keys. It knows nothing about plants.
//! - [`PlantStore`](plant_store::PlantStore) handles the "what": it owns a
//!   backend, (de)serializes the plant list and runs every mutation through
//!   the care-schedule engine.
//!
//! ## Implementations
//!
//! - [`fs_backend::FsBackend`]: one file per key in a data directory, written
//!   atomically (temp file + rename).
//! - [`mem_backend::MemBackend`]: in-memory map for tests, with optional
//!   write-failure simulation.
//!
//! ## Storage Format
//!
//! ```text
//! <data dir>/
//! ├── plants.json        # the whole plant list (JSON array)
//! ├── userProfile.json   # optional profile record
//! ├── theme              # theme id as a bare string
//! └── config.json        # application configuration (see config.rs)
//! ```
//!
//! Every mutation rewrites the whole plant list. There are no partial writes
//! and no transactions; the list is small and writes are single-threaded.

use crate::error::Result;

pub mod fs_backend;
pub mod mem_backend;
pub mod plant_store;
pub mod prefs;

pub const PLANTS_KEY: &str = "plants";
pub const PROFILE_KEY: &str = "userProfile";
pub const THEME_KEY: &str = "theme";

/// Raw key/value persistence.
///
/// Methods take `&self`; implementations that hold state use interior
/// mutability.
pub trait StorageBackend {
    /// Returns the blob stored under `key`, or `None` if nothing was saved yet.
    fn load(&self, key: &str) -> Result<Option<String>>;

    /// Replaces the blob stored under `key`.
    fn save(&self, key: &str, blob: &str) -> Result<()>;
}

impl<B: StorageBackend + ?Sized> StorageBackend for &B {
    fn load(&self, key: &str) -> Result<Option<String>> {
        (**self).load(key)
    }

    fn save(&self, key: &str, blob: &str) -> Result<()> {
        (**self).save(key, blob)
    }
}
