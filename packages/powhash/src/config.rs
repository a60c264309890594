//! Schedule parameters for the permutation scheduler

use crate::{PowHashError, Result};
use serde::{Deserialize, Serialize};

/// Genesis timestamp the step count is measured from
pub const BASE_TIMESTAMP: u64 = 1_492_973_331;

/// Number of schedule steps before the permutation repeats (8!)
pub const PERMUTATION_SPACE: u64 = 40_320;

/// Number of distinct arrangements of the ten chained primitives (10!)
pub const MAX_PERMUTATION_SPACE: u64 = 3_628_800;

/// Parameters that map a timestamp onto a step count
///
/// The defaults are the consensus constants. Other values only make sense
/// for private networks that deliberately diverge from them.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleConfig {
    /// Timestamp at which the schedule is at step zero
    #[serde(default = "default_base_timestamp")]
    pub base_timestamp: u64,
    /// Modulus applied to the elapsed seconds
    #[serde(default = "default_permutation_space")]
    pub permutation_space: u64,
}

fn default_base_timestamp() -> u64 {
    BASE_TIMESTAMP
}

fn default_permutation_space() -> u64 {
    PERMUTATION_SPACE
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            base_timestamp: default_base_timestamp(),
            permutation_space: default_permutation_space(),
        }
    }
}

impl ScheduleConfig {
    /// Consensus configuration
    #[must_use]
    pub const fn consensus() -> Self {
        Self {
            base_timestamp: BASE_TIMESTAMP,
            permutation_space: PERMUTATION_SPACE,
        }
    }

    /// Check that every step count stays inside the permutation universe
    ///
    /// # Errors
    ///
    /// Returns `PowHashError::InvalidParameters` when the space is zero or
    /// exceeds the number of arrangements of ten primitives.
    pub fn validate(&self) -> Result<()> {
        if self.permutation_space == 0 {
            return Err(PowHashError::invalid_parameters(
                "permutation_space must be non-zero",
            ));
        }
        if self.permutation_space > MAX_PERMUTATION_SPACE {
            return Err(PowHashError::invalid_parameters(format!(
                "permutation_space {} exceeds {MAX_PERMUTATION_SPACE}",
                self.permutation_space
            )));
        }
        Ok(())
    }
}
