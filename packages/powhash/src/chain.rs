//! Sequential execution of the ten-stage hash chain

use crate::algorithm::{Algorithm, CHAIN_LENGTH};
use crate::registry::{PrimitiveFactory, PrimitiveRegistry, StageOutput, STAGE_OUTPUT_LEN};
use crate::schedule::Permutation;
use crate::Result;
use tracing::trace;

/// Backing storage for an empty message
///
/// Primitives always receive a slice into real memory; for an empty message
/// that slice is `BLANK[..0]`, so the hashed length stays zero.
static BLANK: [u8; 1] = [0];

/// One executed stage of the chain
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StageRecord {
    /// Primitive that ran at this stage
    pub algorithm: Algorithm,
    /// Number of bytes the primitive absorbed
    pub input_len: usize,
    /// The primitive's 64-byte output
    pub output: StageOutput,
}

/// Every stage of one chain execution, in order
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChainTrace {
    permutation: Permutation,
    stages: [StageRecord; CHAIN_LENGTH],
}

impl ChainTrace {
    /// Ordering the chain ran with
    #[must_use]
    pub const fn permutation(&self) -> &Permutation {
        &self.permutation
    }

    /// Records in stage order
    #[must_use]
    pub const fn stages(&self) -> &[StageRecord; CHAIN_LENGTH] {
        &self.stages
    }

    /// Output of the last stage
    #[must_use]
    pub const fn output(&self) -> &StageOutput {
        &self.stages[CHAIN_LENGTH - 1].output
    }
}

/// Resolve every scheduled primitive before any stage runs
fn resolve(
    registry: &PrimitiveRegistry,
    permutation: &Permutation,
) -> Result<[PrimitiveFactory; CHAIN_LENGTH]> {
    let mut factories = [registry.factory(permutation[0])?; CHAIN_LENGTH];
    for (factory, algorithm) in factories.iter_mut().zip(permutation).skip(1) {
        *factory = registry.factory(*algorithm)?;
    }
    Ok(factories)
}

/// Drive the chain, handing each stage's output to `visit`
fn execute(
    factories: &[PrimitiveFactory; CHAIN_LENGTH],
    permutation: &Permutation,
    message: &[u8],
    mut visit: impl FnMut(usize, StageRecord),
) -> StageOutput {
    let first_input: &[u8] = if message.is_empty() {
        &BLANK[..0]
    } else {
        message
    };

    let mut output = [0u8; STAGE_OUTPUT_LEN];
    for (stage, (factory, algorithm)) in factories.iter().zip(permutation).enumerate() {
        let previous = output;
        let input: &[u8] = if stage == 0 { first_input } else { &previous };
        trace!(stage, algorithm = %algorithm, input_len = input.len(), "running stage");

        let mut primitive = factory();
        primitive.absorb(input);
        output = primitive.finalize();

        visit(
            stage,
            StageRecord {
                algorithm: *algorithm,
                input_len: input.len(),
                output,
            },
        );
    }
    output
}

/// Run the chain and return the last stage's output
///
/// Stage 0 absorbs `message`; every later stage absorbs the full 64-byte
/// output of the stage before it. Each stage uses a fresh context.
///
/// # Errors
///
/// Returns `PowHashError::UnboundPrimitive` if any algorithm in
/// `permutation` has no primitive bound. No stage runs in that case.
pub fn run_chain(
    registry: &PrimitiveRegistry,
    permutation: &Permutation,
    message: &[u8],
) -> Result<StageOutput> {
    let factories = resolve(registry, permutation)?;
    Ok(execute(&factories, permutation, message, |_, _| {}))
}

/// Run the chain and keep every stage's output
///
/// # Errors
///
/// Same as [`run_chain`].
pub fn run_chain_traced(
    registry: &PrimitiveRegistry,
    permutation: &Permutation,
    message: &[u8],
) -> Result<ChainTrace> {
    let factories = resolve(registry, permutation)?;
    let algorithms: [Algorithm; CHAIN_LENGTH] = *permutation.algorithms();
    let mut stages = algorithms.map(|algorithm| StageRecord {
        algorithm,
        input_len: 0,
        output: [0u8; STAGE_OUTPUT_LEN],
    });
    execute(&factories, permutation, message, |stage, record| {
        stages[stage] = record;
    });
    Ok(ChainTrace {
        permutation: *permutation,
        stages,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::PowHashError;
    use sha3::{Digest, Keccak512, Sha3_512};

    fn keccak_everywhere() -> PrimitiveRegistry {
        Algorithm::ALL
            .into_iter()
            .fold(PrimitiveRegistry::empty(), |registry, algorithm| {
                registry.bind_digest::<Keccak512>(algorithm)
            })
    }

    #[test]
    fn chain_feeds_full_outputs_forward() {
        let registry = keccak_everywhere();
        let mut expected = Keccak512::digest(b"header").to_vec();
        for _ in 1..CHAIN_LENGTH {
            expected = Keccak512::digest(&expected).to_vec();
        }
        let output = run_chain(&registry, &Permutation::IDENTITY, b"header")
            .expect("all primitives bound");
        assert_eq!(output.as_slice(), expected.as_slice());
    }

    #[test]
    fn empty_message_hashes_zero_bytes() {
        let registry = keccak_everywhere();
        let trace = run_chain_traced(&registry, &Permutation::IDENTITY, b"")
            .expect("all primitives bound");
        assert_eq!(trace.stages()[0].input_len, 0);
        assert_eq!(
            trace.stages()[0].output.as_slice(),
            Keccak512::digest(b"").as_slice()
        );
    }

    #[test]
    fn later_stages_absorb_sixty_four_bytes() {
        let registry = keccak_everywhere();
        let trace = run_chain_traced(&registry, &Permutation::IDENTITY, b"header")
            .expect("all primitives bound");
        assert_eq!(trace.stages()[0].input_len, 6);
        for record in &trace.stages()[1..] {
            assert_eq!(record.input_len, STAGE_OUTPUT_LEN);
        }
    }

    #[test]
    fn trace_ends_with_chain_output() {
        let registry = keccak_everywhere();
        let permutation = crate::schedule::compute_permutation(1_500_000_000);
        let output = run_chain(&registry, &permutation, b"header").expect("all primitives bound");
        let trace =
            run_chain_traced(&registry, &permutation, b"header").expect("all primitives bound");
        assert_eq!(trace.output(), &output);
        assert_eq!(trace.permutation(), &permutation);
        let algorithms: Vec<Algorithm> = trace.stages().iter().map(|r| r.algorithm).collect();
        assert_eq!(algorithms, permutation.algorithms().to_vec());
    }

    #[test]
    fn stage_order_follows_permutation() {
        // Distinguish the first two stages; identity runs Blake then Bmw
        let registry = keccak_everywhere().bind_digest::<Sha3_512>(Algorithm::Blake);
        let trace = run_chain_traced(&registry, &Permutation::IDENTITY, b"x")
            .expect("all primitives bound");
        assert_eq!(
            trace.stages()[0].output.as_slice(),
            Sha3_512::digest(b"x").as_slice()
        );
        assert_eq!(
            trace.stages()[1].output.as_slice(),
            Keccak512::digest(trace.stages()[0].output).as_slice()
        );
    }

    #[test]
    fn unbound_primitive_fails_before_running() {
        // Stage 0 would panic if anything ran before resolution failed
        let mut registry = PrimitiveRegistry::empty().bind(Algorithm::Blake, || {
            panic!("no stage may run when the chain cannot complete")
        });
        for algorithm in &Permutation::IDENTITY.algorithms()[1..] {
            if *algorithm != Algorithm::Shavite {
                registry = registry.bind_digest::<Keccak512>(*algorithm);
            }
        }
        assert_eq!(
            run_chain(&registry, &Permutation::IDENTITY, b"header"),
            Err(PowHashError::UnboundPrimitive(Algorithm::Shavite))
        );
    }

    #[test]
    fn earliest_unbound_stage_is_reported() {
        let registry = PrimitiveRegistry::empty()
            .bind_digest::<Keccak512>(Algorithm::Bmw)
            .bind_digest::<Keccak512>(Algorithm::Jh);
        assert_eq!(
            run_chain(&registry, &Permutation::IDENTITY, b"header"),
            Err(PowHashError::UnboundPrimitive(Algorithm::Blake))
        );
        let registry = registry.bind_digest::<Keccak512>(Algorithm::Blake);
        assert_eq!(
            run_chain_traced(&registry, &Permutation::IDENTITY, b"header"),
            Err(PowHashError::UnboundPrimitive(Algorithm::Groestl))
        );
    }

    #[test]
    fn trace_records_every_stage_in_place() {
        let registry = keccak_everywhere();
        let trace = run_chain_traced(&registry, &Permutation::IDENTITY, b"header")
            .expect("all primitives bound");
        for pair in trace.stages().windows(2) {
            assert_eq!(
                pair[1].output.as_slice(),
                Keccak512::digest(pair[0].output).as_slice()
            );
        }
    }

    #[test]
    fn echo_is_never_required() {
        let registry = keccak_everywhere();
        let mut without_echo = PrimitiveRegistry::empty();
        for algorithm in &Permutation::IDENTITY {
            without_echo = without_echo.bind(
                *algorithm,
                registry.factory(*algorithm).expect("bound above"),
            );
        }
        assert!(!without_echo.is_bound(Algorithm::Echo));
        assert!(run_chain(&without_echo, &Permutation::IDENTITY, b"header").is_ok());
    }
}
