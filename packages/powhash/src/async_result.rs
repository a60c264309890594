//! Futures over digests computed on tokio's blocking pool
//!
//! The chain is CPU-bound, so every builder computation runs under
//! `spawn_blocking`. A bound primitive that panics resolves to
//! `PowHashError::Internal` rather than unwinding into the caller.

use crate::engine::TimeTravel;
use crate::{FinalDigest, PowHashError, Result};
use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};
use tokio::task::{JoinError, JoinHandle};
use tracing::warn;

/// Digest computation running on the blocking pool
pub struct AsyncPowResult {
    task: JoinHandle<Result<FinalDigest>>,
}

/// Digest computation whose failures pass through an error handler
pub struct AsyncPowResultWithError<E> {
    task: JoinHandle<Result<FinalDigest>>,
    error_handler: E,
}

/// Hash `data` at `timestamp` on the blocking pool
///
/// A rejected engine is returned through the task too, so callers see one
/// failure path.
fn spawn_digest(
    engine: Result<TimeTravel>,
    data: Vec<u8>,
    timestamp: u64,
) -> JoinHandle<Result<FinalDigest>> {
    tokio::task::spawn_blocking(move || {
        let result = engine.and_then(|engine| engine.digest(&data, timestamp));
        if let Err(e) = &result {
            warn!(timestamp, error = %e, "proof-of-work digest failed");
        }
        result
    })
}

fn task_failed(error: JoinError) -> PowHashError {
    warn!(error = %error, "proof-of-work task did not complete");
    PowHashError::internal(format!("Digest task failed: {error}"))
}

impl AsyncPowResult {
    pub(crate) fn spawn(engine: Result<TimeTravel>, data: Vec<u8>, timestamp: u64) -> Self {
        Self {
            task: spawn_digest(engine, data, timestamp),
        }
    }
}

impl Future for AsyncPowResult {
    type Output = Result<FinalDigest>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        Pin::new(&mut self.task)
            .poll(cx)
            .map(|joined| joined.unwrap_or_else(|e| Err(task_failed(e))))
    }
}

impl<E> AsyncPowResultWithError<E>
where
    E: Fn(PowHashError) -> PowHashError,
{
    pub(crate) fn spawn(
        engine: Result<TimeTravel>,
        data: Vec<u8>,
        timestamp: u64,
        error_handler: E,
    ) -> Self {
        Self {
            task: spawn_digest(engine, data, timestamp),
            error_handler,
        }
    }
}

impl<E> Future for AsyncPowResultWithError<E>
where
    E: Fn(PowHashError) -> PowHashError + Unpin,
{
    type Output = Result<FinalDigest>;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let this = self.get_mut();
        Pin::new(&mut this.task).poll(cx).map(|joined| {
            joined
                .unwrap_or_else(|e| Err(task_failed(e)))
                .map_err(&this.error_handler)
        })
    }
}
