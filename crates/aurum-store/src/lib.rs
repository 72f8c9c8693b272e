//! # aurum-store
//! JSON files holding the calculator's external inputs: the amount limits
//! last received from the backend and the most recently fetched gold rate.

pub mod error;
pub mod limits;
pub mod rate;

use std::path::{Path, PathBuf};

pub use error::StoreError;
pub use limits::LimitsStore;
pub use rate::{CachedRate, RateCache};

/// File name of the stored amount limits.
pub const LIMITS_FILE: &str = "limits.json";
/// File name of the cached gold rate.
pub const RATE_FILE: &str = "gold_rate.json";

/// Locations of the store files under one data directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorePaths {
    pub limits: PathBuf,
    pub rate: PathBuf,
}

impl StorePaths {
    pub fn under(data_dir: &Path) -> Self {
        Self {
            limits: data_dir.join(LIMITS_FILE),
            rate: data_dir.join(RATE_FILE),
        }
    }

    pub fn limits_store(&self) -> LimitsStore {
        LimitsStore::new(self.limits.clone())
    }

    pub fn rate_cache(&self) -> RateCache {
        RateCache::new(self.rate.clone())
    }
}

/// Write `bytes` to `path`, creating parent directories first.
pub(crate) fn write_file(path: &Path, bytes: &[u8]) -> Result<(), StoreError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| StoreError::Io(e.to_string()))?;
    }
    std::fs::write(path, bytes).map_err(|e| StoreError::Io(e.to_string()))
}

/// Read `path`, mapping a missing file to `None`.
pub(crate) fn read_file(path: &Path) -> Result<Option<Vec<u8>>, StoreError> {
    match std::fs::read(path) {
        Ok(bytes) => Ok(Some(bytes)),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(StoreError::Io(e.to_string())),
    }
}
