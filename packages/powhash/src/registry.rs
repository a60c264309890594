//! Table of 512-bit hash primitives addressed by algorithm id
//!
//! Primitive internals are not implemented here. Each slot holds a factory
//! that produces a fresh context; the chain only ever drives a context
//! through `absorb` and `finalize`. Any RustCrypto [`Digest`] with a 64-byte
//! output binds directly through [`DigestPrimitive`].

use crate::algorithm::{Algorithm, ALGORITHM_COUNT};
use crate::{PowHashError, Result};
use digest::consts::U64;
use digest::{Digest, OutputSizeUser};
use std::fmt;

/// Output length of every primitive in bytes
pub const STAGE_OUTPUT_LEN: usize = 64;

/// Raw output of one primitive invocation
pub type StageOutput = [u8; STAGE_OUTPUT_LEN];

/// A freshly initialized 512-bit hash context
pub trait HashPrimitive: Send {
    /// Feed `data` into the context
    fn absorb(&mut self, data: &[u8]);

    /// Consume the context and produce its 64-byte digest
    fn finalize(self: Box<Self>) -> StageOutput;
}

/// Creates an initialized context for one primitive
pub type PrimitiveFactory = fn() -> Box<dyn HashPrimitive>;

/// Adapter exposing a 64-byte RustCrypto digest as a [`HashPrimitive`]
pub struct DigestPrimitive<D>(D);

impl<D> DigestPrimitive<D>
where
    D: Digest,
{
    /// Wrap a freshly initialized digest
    #[must_use]
    pub fn new() -> Self {
        Self(D::new())
    }
}

impl<D> Default for DigestPrimitive<D>
where
    D: Digest,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<D> HashPrimitive for DigestPrimitive<D>
where
    D: Digest + OutputSizeUser<OutputSize = U64> + Send,
{
    fn absorb(&mut self, data: &[u8]) {
        Digest::update(&mut self.0, data);
    }

    fn finalize(self: Box<Self>) -> StageOutput {
        let Self(digest) = *self;
        let mut out = [0u8; STAGE_OUTPUT_LEN];
        out.copy_from_slice(digest.finalize().as_slice());
        out
    }
}

/// Factory for any 64-byte RustCrypto digest
#[must_use]
pub fn digest_factory<D>() -> Box<dyn HashPrimitive>
where
    D: Digest + OutputSizeUser<OutputSize = U64> + Send + 'static,
{
    Box::new(DigestPrimitive::<D>::new())
}

/// Fixed table binding algorithm ids 0..=10 to primitive factories
///
/// Immutable once built; cheap to copy and safe to share between threads.
#[derive(Clone, Copy, Default)]
pub struct PrimitiveRegistry {
    slots: [Option<PrimitiveFactory>; ALGORITHM_COUNT],
}

impl PrimitiveRegistry {
    /// Registry with nothing bound
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            slots: [None; ALGORITHM_COUNT],
        }
    }

    /// Registry with every primitive that has a RustCrypto implementation
    ///
    /// Binds Groestl-512, Skein-512-512, JH-512 and Keccak-512. The other
    /// slots must be bound by the caller before hashing.
    #[cfg(feature = "rustcrypto")]
    #[must_use]
    pub fn rustcrypto() -> Self {
        Self::empty()
            .bind_digest::<groestl::Groestl512>(Algorithm::Groestl)
            .bind_digest::<skein::Skein512<U64>>(Algorithm::Skein)
            .bind_digest::<jh::Jh512>(Algorithm::Jh)
            .bind_digest::<sha3::Keccak512>(Algorithm::Keccak)
    }

    /// Bind `factory` to `algorithm`, replacing any previous binding
    #[must_use]
    pub fn bind(mut self, algorithm: Algorithm, factory: PrimitiveFactory) -> Self {
        self.slots[algorithm.index()] = Some(factory);
        self
    }

    /// Bind a RustCrypto digest to `algorithm`
    #[must_use]
    pub fn bind_digest<D>(self, algorithm: Algorithm) -> Self
    where
        D: Digest + OutputSizeUser<OutputSize = U64> + Send + 'static,
    {
        self.bind(algorithm, digest_factory::<D>)
    }

    /// Whether `algorithm` has a primitive bound
    #[must_use]
    pub const fn is_bound(&self, algorithm: Algorithm) -> bool {
        self.slots[algorithm.index()].is_some()
    }

    /// Algorithms that still need a primitive
    #[must_use]
    pub fn unbound(&self) -> Vec<Algorithm> {
        Algorithm::ALL
            .into_iter()
            .filter(|algorithm| !self.is_bound(*algorithm))
            .collect()
    }

    /// Factory bound to `algorithm`
    ///
    /// # Errors
    ///
    /// Returns `PowHashError::UnboundPrimitive` if the slot is empty.
    pub fn factory(&self, algorithm: Algorithm) -> Result<PrimitiveFactory> {
        self.slots[algorithm.index()].ok_or(PowHashError::UnboundPrimitive(algorithm))
    }

    /// Fresh context for `algorithm`
    ///
    /// # Errors
    ///
    /// Returns `PowHashError::UnboundPrimitive` if the slot is empty.
    pub fn init(&self, algorithm: Algorithm) -> Result<Box<dyn HashPrimitive>> {
        self.factory(algorithm).map(|factory| factory())
    }
}

impl fmt::Debug for PrimitiveRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let bound: Vec<&str> = Algorithm::ALL
            .iter()
            .filter(|algorithm| self.is_bound(**algorithm))
            .map(|algorithm| algorithm.name())
            .collect();
        f.debug_struct("PrimitiveRegistry")
            .field("bound", &bound)
            .finish()
    }
}
