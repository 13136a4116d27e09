use super::StorageBackend;
use crate::error::{Result, SprigError};
use std::fs;
use std::path::{Path, PathBuf};
use uuid::Uuid;

/// File-per-key backend rooted at a data directory.
///
/// JSON blobs get a `.json` extension; the theme is stored as a bare file.
pub struct FsBackend {
    root: PathBuf,
}

impl FsBackend {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn path_for(&self, key: &str) -> PathBuf {
        if key == super::THEME_KEY {
            self.root.join(key)
        } else {
            self.root.join(format!("{}.json", key))
        }
    }

    fn ensure_dir(&self) -> Result<()> {
        if !self.root.exists() {
            fs::create_dir_all(&self.root).map_err(SprigError::Io)?;
        }
        Ok(())
    }
}

impl StorageBackend for FsBackend {
    fn load(&self, key: &str) -> Result<Option<String>> {
        let path = self.path_for(key);
        if !path.exists() {
            return Ok(None);
        }
        let blob = fs::read_to_string(&path).map_err(SprigError::Io)?;
        tracing::trace!(key, bytes = blob.len(), "loaded blob");
        Ok(Some(blob))
    }

    fn save(&self, key: &str, blob: &str) -> Result<()> {
        self.ensure_dir()?;
        let target = self.path_for(key);

        // Atomic write
        let tmp = self.root.join(format!(".{}-{}.tmp", key, Uuid::new_v4()));
        fs::write(&tmp, blob).map_err(SprigError::Io)?;
        fs::rename(&tmp, &target).map_err(SprigError::Io)?;

        tracing::trace!(key, bytes = blob.len(), "saved blob");
        Ok(())
    }
}
