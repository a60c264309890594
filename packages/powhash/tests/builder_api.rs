//! Test the fluent builder against the synchronous engine

use sha3::Keccak512;
use timetravel_powhash::{
    Algorithm, HashPrimitive, PowHash, PowHashError, PrimitiveRegistry, ScheduleConfig,
    TimeTravel, TimeTravelBuilder, BASE_TIMESTAMP,
};

fn keccak_everywhere() -> PrimitiveRegistry {
    Algorithm::ALL
        .into_iter()
        .fold(PrimitiveRegistry::empty(), |registry, algorithm| {
            registry.bind_digest::<Keccak512>(algorithm)
        })
}

#[tokio::test]
async fn test_compute_matches_engine() {
    let registry = keccak_everywhere();
    let digest = PowHash::timetravel(registry)
        .with_timestamp(1_600_000_000)
        .compute(b"header".to_vec())
        .await
        .expect("proof-of-work digest should succeed");
    let expected = TimeTravel::new(registry)
        .digest(b"header", 1_600_000_000)
        .expect("all primitives bound");
    assert_eq!(digest, expected);
}

#[tokio::test]
async fn test_compute_with_result_handler() {
    let hex = PowHash::timetravel(keccak_everywhere())
        .with_timestamp(BASE_TIMESTAMP)
        .on_result(|result| match result {
            Ok(digest) => digest.to_hex(),
            Err(_) => String::new(),
        })
        .compute(Vec::new())
        .await;
    assert_eq!(hex.len(), 64);
}

#[tokio::test]
async fn test_unbound_registry_reports_error() {
    let result = PowHash::timetravel(PrimitiveRegistry::empty())
        .with_timestamp(BASE_TIMESTAMP)
        .compute(b"header".to_vec())
        .await;
    assert_eq!(result, Err(PowHashError::UnboundPrimitive(Algorithm::Blake)));
}

#[tokio::test]
async fn test_error_handler_transforms_failure() {
    let result = PowHash::timetravel(PrimitiveRegistry::empty())
        .with_timestamp(BASE_TIMESTAMP)
        .on_error(|e| PowHashError::internal(format!("wrapped: {e}")))
        .compute(b"header".to_vec())
        .await;
    assert_eq!(
        result,
        Err(PowHashError::Internal(
            "wrapped: No primitive bound for blake512".to_string()
        ))
    );
}

#[tokio::test]
async fn test_invalid_config_reports_error() {
    let result = PowHash::timetravel(keccak_everywhere())
        .with_config(ScheduleConfig {
            base_timestamp: 0,
            permutation_space: 0,
        })
        .with_timestamp(BASE_TIMESTAMP)
        .compute(b"header".to_vec())
        .await;
    assert!(matches!(result, Err(PowHashError::InvalidParameters(_))));
}

fn failing_primitive() -> Box<dyn HashPrimitive> {
    panic!("bound primitive failed")
}

#[tokio::test]
async fn test_panicking_primitive_reports_internal_error() {
    let registry = keccak_everywhere().bind(Algorithm::Bmw, failing_primitive);
    let result = PowHash::timetravel(registry)
        .with_timestamp(BASE_TIMESTAMP)
        .compute(b"header".to_vec())
        .await;
    assert!(
        matches!(&result, Err(PowHashError::Internal(message)) if message.starts_with("Digest task failed")),
        "unexpected result: {result:?}"
    );
}

#[test]
fn test_compute_blocking_matches_engine() {
    let registry = keccak_everywhere();
    let builder = TimeTravelBuilder::new(registry).with_timestamp(BASE_TIMESTAMP);
    assert_eq!(
        builder.compute_blocking(b"header"),
        TimeTravel::new(registry).digest(b"header", BASE_TIMESTAMP)
    );
}

#[test]
fn test_custom_config_shifts_schedule() {
    // Order-sensitive table: only Simd differs
    let registry = keccak_everywhere().bind_digest::<sha3::Sha3_512>(Algorithm::Simd);
    let config = ScheduleConfig {
        base_timestamp: 1_000,
        ..ScheduleConfig::default()
    };
    let shifted = TimeTravelBuilder::new(registry)
        .with_config(config)
        .with_timestamp(1_001)
        .compute_blocking(b"header")
        .expect("valid config and bound registry");
    let engine = TimeTravel::new(registry);
    assert_eq!(
        shifted,
        engine
            .digest(b"header", BASE_TIMESTAMP + 1)
            .expect("all primitives bound")
    );
    assert_ne!(
        shifted,
        engine
            .digest(b"header", BASE_TIMESTAMP)
            .expect("all primitives bound")
    );
}
