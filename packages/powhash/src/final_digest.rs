//! Final digest type with encoding support

use crate::registry::StageOutput;
use crate::{PowHashError, Result};
use std::fmt;
use std::str::FromStr;

/// Length of the final digest in bytes
pub const FINAL_DIGEST_LEN: usize = 32;

/// Proof-of-work digest: the last stage's low 32 bytes in reversed order
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FinalDigest([u8; FINAL_DIGEST_LEN]);

impl FinalDigest {
    /// Wrap raw digest bytes
    #[must_use]
    pub const fn new(bytes: [u8; FINAL_DIGEST_LEN]) -> Self {
        Self(bytes)
    }

    /// Get the raw bytes of the digest
    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; FINAL_DIGEST_LEN] {
        &self.0
    }

    /// Convert into the raw bytes
    #[must_use]
    pub const fn into_bytes(self) -> [u8; FINAL_DIGEST_LEN] {
        self.0
    }

    /// Get the digest as a lowercase hexadecimal string
    #[must_use]
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

/// Truncate and byte-reverse the last stage output
///
/// Byte `31 - x` of `last_output` lands at position `x`; bytes `32..64` are
/// discarded.
#[must_use]
pub fn finalize(last_output: &StageOutput) -> FinalDigest {
    let mut bytes = [0u8; FINAL_DIGEST_LEN];
    bytes.copy_from_slice(&last_output[..FINAL_DIGEST_LEN]);
    bytes.reverse();
    FinalDigest(bytes)
}

impl From<[u8; FINAL_DIGEST_LEN]> for FinalDigest {
    fn from(bytes: [u8; FINAL_DIGEST_LEN]) -> Self {
        Self(bytes)
    }
}

impl From<FinalDigest> for [u8; FINAL_DIGEST_LEN] {
    fn from(digest: FinalDigest) -> Self {
        digest.0
    }
}

impl AsRef<[u8]> for FinalDigest {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Display for FinalDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl FromStr for FinalDigest {
    type Err = PowHashError;

    fn from_str(s: &str) -> Result<Self> {
        let mut bytes = [0u8; FINAL_DIGEST_LEN];
        hex::decode_to_slice(s, &mut bytes)
            .map_err(|e| PowHashError::invalid_digest(format!("{e}")))?;
        Ok(Self(bytes))
    }
}
