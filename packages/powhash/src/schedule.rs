//! Timestamp-driven ordering of the chained primitives
//!
//! The ordering is the `steps`-th lexicographic permutation of the ten
//! scheduled algorithm ids, counted from the identity arrangement, where
//! `steps` is the number of seconds since the base timestamp reduced modulo
//! the permutation space. Subtraction wraps as unsigned 64-bit arithmetic so
//! timestamps before the base land on the same step as every other
//! implementation.

use crate::algorithm::{Algorithm, CHAIN_LENGTH};
use crate::config::ScheduleConfig;
use crate::Result;
use std::fmt;
use std::ops::Index;

/// Ordered assignment of the ten scheduled primitives to the chain stages
///
/// Always a bijection over ids `0..=9`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Permutation([Algorithm; CHAIN_LENGTH]);

impl Permutation {
    /// Ascending arrangement, step zero of every schedule
    pub const IDENTITY: Permutation = Permutation([
        Algorithm::Blake,
        Algorithm::Bmw,
        Algorithm::Groestl,
        Algorithm::Skein,
        Algorithm::Jh,
        Algorithm::Keccak,
        Algorithm::Luffa,
        Algorithm::CubeHash,
        Algorithm::Shavite,
        Algorithm::Simd,
    ]);

    /// Algorithms in stage order
    #[must_use]
    pub const fn algorithms(&self) -> &[Algorithm; CHAIN_LENGTH] {
        &self.0
    }

    /// Algorithm ids in stage order
    #[must_use]
    pub fn ids(&self) -> [u8; CHAIN_LENGTH] {
        self.0.map(Algorithm::id)
    }

    /// Iterate algorithms in stage order
    pub fn iter(&self) -> std::slice::Iter<'_, Algorithm> {
        self.0.iter()
    }

    /// Next arrangement in lexicographic order
    ///
    /// Returns `None` for the fully descending arrangement, which has no
    /// successor.
    #[must_use]
    pub fn successor(&self) -> Option<Self> {
        let mut next = *self;
        next_permutation(&mut next.0).then_some(next)
    }
}

impl Default for Permutation {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Index<usize> for Permutation {
    type Output = Algorithm;

    fn index(&self, stage: usize) -> &Algorithm {
        &self.0[stage]
    }
}

impl<'a> IntoIterator for &'a Permutation {
    type Item = &'a Algorithm;
    type IntoIter = std::slice::Iter<'a, Algorithm>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl fmt::Display for Permutation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (stage, algorithm) in self.0.iter().enumerate() {
            if stage > 0 {
                f.write_str(" > ")?;
            }
            write!(f, "{algorithm}")?;
        }
        Ok(())
    }
}

/// Rearrange `items` into the next lexicographic permutation
///
/// Returns `false` and leaves `items` untouched when it is already the
/// greatest arrangement.
fn next_permutation(items: &mut [Algorithm]) -> bool {
    // Start of the longest non-increasing suffix is pivot + 1
    let Some(pivot) = items.windows(2).rposition(|pair| pair[0] < pair[1]) else {
        return false;
    };
    let pivot_value = items[pivot];
    // The suffix is non-increasing, so the rightmost greater element is its
    // smallest element above the pivot
    let Some(swap) = items.iter().rposition(|item| *item > pivot_value) else {
        return false;
    };
    items.swap(pivot, swap);
    items[pivot + 1..].reverse();
    true
}

/// Maps timestamps onto primitive orderings
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PermutationScheduler {
    config: ScheduleConfig,
}

impl Default for PermutationScheduler {
    fn default() -> Self {
        Self::consensus()
    }
}

impl PermutationScheduler {
    /// Scheduler using the consensus constants
    #[must_use]
    pub const fn consensus() -> Self {
        Self {
            config: ScheduleConfig::consensus(),
        }
    }

    /// Scheduler using custom parameters
    ///
    /// # Errors
    ///
    /// Returns `PowHashError::InvalidParameters` if `config` fails validation.
    pub fn new(config: ScheduleConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Parameters in use
    #[must_use]
    pub const fn config(&self) -> &ScheduleConfig {
        &self.config
    }

    /// Number of lexicographic steps from the identity for `timestamp`
    #[must_use]
    pub const fn steps_for(&self, timestamp: u64) -> u64 {
        timestamp.wrapping_sub(self.config.base_timestamp) % self.config.permutation_space
    }

    /// Ordering of the primitives for `timestamp`
    #[must_use]
    pub fn compute_permutation(&self, timestamp: u64) -> Permutation {
        let steps = self.steps_for(timestamp);
        let mut permutation = Permutation::IDENTITY;
        for _ in 0..steps {
            next_permutation(&mut permutation.0);
        }
        permutation
    }
}

/// Ordering of the primitives for `timestamp` under the consensus constants
#[must_use]
pub fn compute_permutation(timestamp: u64) -> Permutation {
    PermutationScheduler::consensus().compute_permutation(timestamp)
}
