//! Error handling for the proof-of-work hash

use crate::algorithm::Algorithm;
use thiserror::Error;

/// Proof-of-work hashing errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PowHashError {
    /// A scheduled algorithm has no primitive bound in the registry
    #[error("No primitive bound for {0}")]
    UnboundPrimitive(Algorithm),

    /// Algorithm identifier outside the eleven defined primitives
    #[error("Unknown algorithm id: {0}")]
    UnknownAlgorithm(u8),

    /// Schedule configuration was rejected
    #[error("Invalid parameters: {0}")]
    InvalidParameters(String),

    /// A textual digest could not be parsed
    #[error("Invalid digest: {0}")]
    InvalidDigest(String),

    /// The background computation ended without delivering a result
    #[error("Internal error: {0}")]
    Internal(String),
}

impl PowHashError {
    /// Create an internal error
    #[must_use]
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// Create an `invalid_parameters` error
    #[must_use]
    pub fn invalid_parameters(msg: impl Into<String>) -> Self {
        Self::InvalidParameters(msg.into())
    }

    /// Create an `invalid_digest` error
    #[must_use]
    pub fn invalid_digest(msg: impl Into<String>) -> Self {
        Self::InvalidDigest(msg.into())
    }
}

/// Result type for proof-of-work hashing operations
pub type Result<T> = std::result::Result<T, PowHashError>;
