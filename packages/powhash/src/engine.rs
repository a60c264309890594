//! Top-level proof-of-work computation

use crate::chain::{run_chain, run_chain_traced, ChainTrace};
use crate::config::ScheduleConfig;
use crate::final_digest::{finalize, FinalDigest};
use crate::registry::PrimitiveRegistry;
use crate::schedule::{Permutation, PermutationScheduler};
use crate::Result;
use tracing::debug;

/// Primitive table plus schedule, ready to hash block headers
///
/// Holds no per-call state; one instance can serve any number of threads.
#[derive(Clone, Copy, Debug)]
pub struct TimeTravel {
    registry: PrimitiveRegistry,
    scheduler: PermutationScheduler,
}

impl TimeTravel {
    /// Engine using the consensus schedule
    #[must_use]
    pub const fn new(registry: PrimitiveRegistry) -> Self {
        Self {
            registry,
            scheduler: PermutationScheduler::consensus(),
        }
    }

    /// Engine using a custom schedule
    ///
    /// # Errors
    ///
    /// Returns `PowHashError::InvalidParameters` if `config` fails validation.
    pub fn with_config(registry: PrimitiveRegistry, config: ScheduleConfig) -> Result<Self> {
        Ok(Self {
            registry,
            scheduler: PermutationScheduler::new(config)?,
        })
    }

    /// Primitive table in use
    #[must_use]
    pub const fn registry(&self) -> &PrimitiveRegistry {
        &self.registry
    }

    /// Scheduler in use
    #[must_use]
    pub const fn scheduler(&self) -> &PermutationScheduler {
        &self.scheduler
    }

    /// Primitive ordering for `timestamp`
    #[must_use]
    pub fn permutation(&self, timestamp: u64) -> Permutation {
        self.scheduler.compute_permutation(timestamp)
    }

    /// Digest of `message` scheduled by `timestamp`
    ///
    /// # Errors
    ///
    /// Returns `PowHashError::UnboundPrimitive` if a scheduled primitive is
    /// missing from the registry.
    pub fn digest(&self, message: &[u8], timestamp: u64) -> Result<FinalDigest> {
        let permutation = self.scheduled(timestamp);
        let output = run_chain(&self.registry, &permutation, message)?;
        Ok(finalize(&output))
    }

    /// Lowercase hex digest of `message` scheduled by `timestamp`
    ///
    /// # Errors
    ///
    /// Same as [`TimeTravel::digest`].
    pub fn hash(&self, message: &[u8], timestamp: u64) -> Result<String> {
        self.digest(message, timestamp).map(|digest| digest.to_hex())
    }

    /// Every stage output of the chain for `message` and `timestamp`
    ///
    /// # Errors
    ///
    /// Same as [`TimeTravel::digest`].
    pub fn trace(&self, message: &[u8], timestamp: u64) -> Result<ChainTrace> {
        let permutation = self.scheduled(timestamp);
        run_chain_traced(&self.registry, &permutation, message)
    }

    fn scheduled(&self, timestamp: u64) -> Permutation {
        let permutation = self.scheduler.compute_permutation(timestamp);
        debug!(
            timestamp,
            steps = self.scheduler.steps_for(timestamp),
            permutation = %permutation,
            "scheduled hash chain"
        );
        permutation
    }
}

/// Lowercase hex proof-of-work digest of `message` under the consensus schedule
///
/// # Errors
///
/// Returns `PowHashError::UnboundPrimitive` if a scheduled primitive is
/// missing from `registry`.
pub fn hash(registry: &PrimitiveRegistry, message: &[u8], timestamp: u64) -> Result<String> {
    TimeTravel::new(*registry).hash(message, timestamp)
}
