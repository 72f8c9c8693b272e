//! Cached gold rate with its fetch time.
//!
//! Fetching is done elsewhere; this module only remembers the last value so
//! the calculator has a rate to work with between refreshes.

use std::path::PathBuf;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::StoreError;
use crate::{read_file, write_file};

/// A gold rate (currency per gram) and when it was fetched.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CachedRate {
    pub rate: f64,
    pub fetched_at: DateTime<Utc>,
}

impl CachedRate {
    pub fn new(rate: f64, fetched_at: DateTime<Utc>) -> Self {
        Self { rate, fetched_at }
    }

    /// Age of the entry at `now`; negative if fetched "in the future".
    pub fn age(&self, now: DateTime<Utc>) -> Duration {
        now.signed_duration_since(self.fetched_at)
    }

    /// Whether the entry is older than `max_age` at `now`.
    pub fn is_stale(&self, now: DateTime<Utc>, max_age: Duration) -> bool {
        self.age(now) > max_age
    }
}

/// JSON file holding one [`CachedRate`].
#[derive(Debug, Clone)]
pub struct RateCache {
    path: PathBuf,
}

impl RateCache {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Load the cached rate. `None` if nothing is cached.
    pub fn load(&self) -> Result<Option<CachedRate>, StoreError> {
        let Some(bytes) = read_file(&self.path)? else {
            debug!(path = %self.path.display(), "no cached gold rate");
            return Ok(None);
        };
        let cached: CachedRate = serde_json::from_slice(&bytes)
            .map_err(|e| StoreError::CorruptedFile(format!("gold rate: {e}")))?;
        if !cached.rate.is_finite() || cached.rate <= 0.0 {
            return Err(StoreError::CorruptedFile(format!(
                "gold rate must be positive, got {}",
                cached.rate
            )));
        }
        debug!(rate = cached.rate, fetched_at = %cached.fetched_at, "loaded cached gold rate");
        Ok(Some(cached))
    }

    pub fn save(&self, cached: &CachedRate) -> Result<(), StoreError> {
        let json = serde_json::to_vec_pretty(cached)
            .map_err(|e| StoreError::Serialization(e.to_string()))?;
        write_file(&self.path, &json)?;
        debug!(rate = cached.rate, "saved gold rate");
        Ok(())
    }
}
