//! Amount limits as last received from the backend.

use std::path::PathBuf;

use aurum_core::types::AmountLimits;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::StoreError;
use crate::{read_file, write_file};

/// On-disk shape of the limits file.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
struct LimitsRecord {
    min_amount: f64,
    max_amount: f64,
}

/// JSON file holding `{"min_amount": .., "max_amount": ..}`.
#[derive(Debug, Clone)]
pub struct LimitsStore {
    path: PathBuf,
}

impl LimitsStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Load and re-validate the stored limits. `None` if nothing is stored.
    pub fn load(&self) -> Result<Option<AmountLimits>, StoreError> {
        let Some(bytes) = read_file(&self.path)? else {
            debug!(path = %self.path.display(), "no stored limits");
            return Ok(None);
        };
        let record: LimitsRecord = serde_json::from_slice(&bytes)
            .map_err(|e| StoreError::CorruptedFile(format!("limits: {e}")))?;
        let limits = AmountLimits::new(record.min_amount, record.max_amount)?;
        debug!(
            min_amount = limits.min_amount(),
            max_amount = limits.max_amount(),
            "loaded amount limits"
        );
        Ok(Some(limits))
    }

    pub fn save(&self, limits: &AmountLimits) -> Result<(), StoreError> {
        let record = LimitsRecord {
            min_amount: limits.min_amount(),
            max_amount: limits.max_amount(),
        };
        let json = serde_json::to_vec_pretty(&record)
            .map_err(|e| StoreError::Serialization(e.to_string()))?;
        write_file(&self.path, &json)?;
        debug!(path = %self.path.display(), "saved amount limits");
        Ok(())
    }
}
