//! Identifiers of the eleven 512-bit hash primitives

use crate::{PowHashError, Result};
use std::fmt;

/// Number of primitives the registry can hold
pub const ALGORITHM_COUNT: usize = 11;

/// Number of primitives chained per computation
pub const CHAIN_LENGTH: usize = 10;

/// One of the eleven 512-bit primitives, tagged with its consensus id
///
/// The discriminant is the id used by the permutation scheduler. Only ids
/// `0..=9` are ever scheduled; [`Algorithm::Echo`] is defined but never
/// reached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum Algorithm {
    /// BLAKE-512
    Blake = 0,
    /// Blue Midnight Wish 512
    Bmw = 1,
    /// Grøstl-512
    Groestl = 2,
    /// Skein-512-512
    Skein = 3,
    /// JH-512
    Jh = 4,
    /// Keccak-512 (original padding)
    Keccak = 5,
    /// Luffa-512
    Luffa = 6,
    /// CubeHash-512
    CubeHash = 7,
    /// SHAvite-3-512
    Shavite = 8,
    /// SIMD-512
    Simd = 9,
    /// ECHO-512
    Echo = 10,
}

impl Algorithm {
    /// All algorithms in id order
    pub const ALL: [Algorithm; ALGORITHM_COUNT] = [
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
        Algorithm::Echo,
    ];

    /// Consensus id of this algorithm
    #[must_use]
    pub const fn id(self) -> u8 {
        self as u8
    }

    /// Table index of this algorithm
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Lowercase display name
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Blake => "blake512",
            Self::Bmw => "bmw512",
            Self::Groestl => "groestl512",
            Self::Skein => "skein512",
            Self::Jh => "jh512",
            Self::Keccak => "keccak512",
            Self::Luffa => "luffa512",
            Self::CubeHash => "cubehash512",
            Self::Shavite => "shavite512",
            Self::Simd => "simd512",
            Self::Echo => "echo512",
        }
    }
}

impl TryFrom<u8> for Algorithm {
    type Error = PowHashError;

    fn try_from(id: u8) -> Result<Self> {
        Self::ALL
            .get(usize::from(id))
            .copied()
            .ok_or(PowHashError::UnknownAlgorithm(id))
    }
}

impl From<Algorithm> for u8 {
    fn from(algorithm: Algorithm) -> Self {
        algorithm.id()
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
