//! TimeTravel proof-of-work hashing
//!
//! A block header is hashed by ten 512-bit primitives in sequence. The order
//! of the primitives is a permutation selected by the header timestamp, each
//! stage absorbs the previous stage's full 64-byte output, and the digest is
//! the last output's low 32 bytes in reversed byte order.
//!
//! Primitive internals live outside this crate and are bound through
//! [`PrimitiveRegistry`].

#![forbid(unsafe_code)]

pub mod algorithm;
pub mod api;
pub mod async_result;
pub mod chain;
pub mod config;
pub mod engine;
pub mod error;
pub mod final_digest;
pub mod registry;
pub mod schedule;

// Re-export error types
pub use error::{PowHashError, Result};

pub use algorithm::{Algorithm, ALGORITHM_COUNT, CHAIN_LENGTH};
pub use api::{TimeTravelBuilder, TimeTravelBuilderWithError, TimeTravelBuilderWithHandler};
pub use async_result::{AsyncPowResult, AsyncPowResultWithError};
pub use chain::{run_chain, run_chain_traced, ChainTrace, StageRecord};
pub use config::{ScheduleConfig, BASE_TIMESTAMP, PERMUTATION_SPACE};
pub use engine::{hash, TimeTravel};
pub use final_digest::{finalize, FinalDigest, FINAL_DIGEST_LEN};
pub use registry::{
    digest_factory, DigestPrimitive, HashPrimitive, PrimitiveFactory, PrimitiveRegistry,
    StageOutput, STAGE_OUTPUT_LEN,
};
pub use schedule::{compute_permutation, Permutation, PermutationScheduler};

/// Main entry point for proof-of-work builders
pub struct PowHash;

impl PowHash {
    /// TimeTravel ten-stage chain over `registry`
    #[must_use]
    pub fn timetravel(registry: PrimitiveRegistry) -> TimeTravelBuilder<api::NoTimestamp> {
        TimeTravelBuilder::new(registry)
    }
}
