use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use picker_logging::picker_warn;
use tempfile::NamedTempFile;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PersistError {
    #[error("store directory missing or not writable: {0}")]
    OutputDir(String),
    #[error("io error: {0}")]
    Io(#[from] io::Error),
    #[error("malformed store file: {0}")]
    Format(#[from] serde_json::Error),
}

/// Scalar storage that outlives the process.
pub trait KeyValueStore: Send + Sync {
    fn get_u64(&self, key: &str) -> Option<u64>;
    fn set_u64(&self, key: &str, value: u64) -> Result<(), PersistError>;
}

#[derive(Debug, Default)]
pub struct InMemoryStore {
    values: Mutex<BTreeMap<String, u64>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for InMemoryStore {
    fn get_u64(&self, key: &str) -> Option<u64> {
        let values = self.values.lock().unwrap_or_else(PoisonError::into_inner);
        values.get(key).copied()
    }

    fn set_u64(&self, key: &str, value: u64) -> Result<(), PersistError> {
        let mut values = self.values.lock().unwrap_or_else(PoisonError::into_inner);
        values.insert(key.to_string(), value);
        Ok(())
    }
}

/// Key-value store kept as a JSON object in `{dir}/{filename}`.
///
/// The whole map is rewritten on every `set_u64`: serialized into a temp file
/// next to the target, synced, then renamed over it, so readers never see a
/// half-written store. The directory is created on the first write.
pub struct JsonFileStore {
    dir: PathBuf,
    path: PathBuf,
    values: Mutex<BTreeMap<String, u64>>,
}

impl JsonFileStore {
    pub const DEFAULT_FILENAME: &'static str = ".picker_store.json";

    /// Open the store, reading existing values. A missing file is an empty store.
    pub fn open(dir: impl Into<PathBuf>, filename: &str) -> Result<Self, PersistError> {
        let dir = dir.into();
        let path = dir.join(filename);
        let values = match fs::read_to_string(&path) {
            Ok(text) => serde_json::from_str(&text)?,
            Err(err) if err.kind() == io::ErrorKind::NotFound => BTreeMap::new(),
            Err(err) => return Err(PersistError::Io(err)),
        };
        Ok(Self {
            dir,
            path,
            values: Mutex::new(values),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn write_snapshot(&self, values: &BTreeMap<String, u64>) -> Result<(), PersistError> {
        fs::create_dir_all(&self.dir)
            .map_err(|e| PersistError::OutputDir(format!("{:?}: {e}", self.dir)))?;

        let mut tmp = NamedTempFile::new_in(&self.dir)?;
        serde_json::to_writer_pretty(tmp.as_file_mut(), values)?;
        tmp.as_file_mut().sync_all()?;
        tmp.persist(&self.path).map_err(|e| PersistError::Io(e.error))?;
        Ok(())
    }
}

impl KeyValueStore for JsonFileStore {
    fn get_u64(&self, key: &str) -> Option<u64> {
        let values = self.values.lock().unwrap_or_else(PoisonError::into_inner);
        values.get(key).copied()
    }

    fn set_u64(&self, key: &str, value: u64) -> Result<(), PersistError> {
        let mut values = self.values.lock().unwrap_or_else(PoisonError::into_inner);
        let previous = values.insert(key.to_string(), value);
        if let Err(err) = self.write_snapshot(&values) {
            // Keep memory and disk in agreement.
            match previous {
                Some(old) => values.insert(key.to_string(), old),
                None => values.remove(key),
            };
            picker_warn!("Failed to write store {:?}: {}", self.path, err);
            return Err(err);
        }
        Ok(())
    }
}

/// A single persisted value with a caller-supplied default.
pub struct PersistedScalar<'a> {
    store: &'a dyn KeyValueStore,
    key: &'a str,
    default: u64,
}

impl<'a> PersistedScalar<'a> {
    pub fn new(store: &'a dyn KeyValueStore, key: &'a str, default: u64) -> Self {
        Self {
            store,
            key,
            default,
        }
    }

    pub fn get(&self) -> u64 {
        self.store.get_u64(self.key).unwrap_or(self.default)
    }

    pub fn set(&self, value: u64) -> Result<(), PersistError> {
        self.store.set_u64(self.key, value)
    }
}
