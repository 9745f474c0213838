use std::collections::HashMap;
#[cfg(not(target_arch = "wasm32"))]
use std::path::PathBuf;

use parking_lot::Mutex;

use crate::errors::CoreError;

/// Storage key for the dashboard column layout.
pub const COLUMN_LAYOUT_KEY: &str = "dashboard.columns.v1";

/// Small keyed store for UI preference blobs.
///
/// Values are opaque strings (the caller decides the encoding, in
/// practice JSON). Keys are short dotted tokens like
/// `dashboard.columns.v1`, so they double as file names.
pub trait LayoutStore: Send + Sync {
    /// Look up a stored value. `Ok(None)` when the key was never written.
    fn get(&self, key: &str) -> Result<Option<String>, CoreError>;

    /// Write a value, replacing any previous one under the same key.
    fn put(&self, key: &str, value: &str) -> Result<(), CoreError>;

    /// Delete a key. Removing a key that does not exist is not an error.
    fn remove(&self, key: &str) -> Result<(), CoreError>;
}

/// In-memory store. The default on targets without a writable disk,
/// and the store of choice in tests.
pub struct MemoryLayoutStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryLayoutStore {
    pub fn new() -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
        }
    }
}

impl Default for MemoryLayoutStore {
    fn default() -> Self {
        Self::new()
    }
}

impl LayoutStore for MemoryLayoutStore {
    fn get(&self, key: &str) -> Result<Option<String>, CoreError> {
        Ok(self.entries.lock().get(key).cloned())
    }

    fn put(&self, key: &str, value: &str) -> Result<(), CoreError> {
        self.entries.lock().insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), CoreError> {
        self.entries.lock().remove(key);
        Ok(())
    }
}

/// On-disk store, one file per key under a base directory (native only).
#[cfg(not(target_arch = "wasm32"))]
pub struct FileLayoutStore {
    dir: PathBuf,
}

#[cfg(not(target_arch = "wasm32"))]
impl FileLayoutStore {
    /// The directory is created lazily on the first write.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl LayoutStore for FileLayoutStore {
    fn get(&self, key: &str) -> Result<Option<String>, CoreError> {
        match std::fs::read_to_string(self.path_for(key)) {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn put(&self, key: &str, value: &str) -> Result<(), CoreError> {
        std::fs::create_dir_all(&self.dir)?;
        std::fs::write(self.path_for(key), value)?;
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), CoreError> {
        match std::fs::remove_file(self.path_for(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
