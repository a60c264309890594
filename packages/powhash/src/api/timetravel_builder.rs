//! TimeTravel proof-of-work builder
//!
//! Usage: `PowHash::timetravel(registry).with_timestamp(t).compute(header).await`

use super::states::{HasTimestamp, NoTimestamp};
use crate::config::ScheduleConfig;
use crate::engine::TimeTravel;
use crate::registry::PrimitiveRegistry;
use crate::{AsyncPowResult, AsyncPowResultWithError, FinalDigest, PowHashError, Result};

/// TimeTravel builder
#[derive(Clone, Copy, Debug)]
pub struct TimeTravelBuilder<S> {
    registry: PrimitiveRegistry,
    config: ScheduleConfig,
    state: S,
}

/// TimeTravel builder with result handler
pub struct TimeTravelBuilderWithHandler<F, T> {
    builder: TimeTravelBuilder<HasTimestamp>,
    result_handler: F,
    _phantom: std::marker::PhantomData<T>,
}

/// TimeTravel builder with error handler
pub struct TimeTravelBuilderWithError<E> {
    builder: TimeTravelBuilder<HasTimestamp>,
    error_handler: E,
}

impl TimeTravelBuilder<NoTimestamp> {
    /// Create new builder over `registry` using the consensus schedule
    #[must_use]
    pub fn new(registry: PrimitiveRegistry) -> Self {
        Self {
            registry,
            config: ScheduleConfig::consensus(),
            state: NoTimestamp,
        }
    }

    /// Set the header timestamp that selects the primitive ordering
    #[must_use]
    pub fn with_timestamp(self, timestamp: u64) -> TimeTravelBuilder<HasTimestamp> {
        TimeTravelBuilder {
            registry: self.registry,
            config: self.config,
            state: HasTimestamp(timestamp),
        }
    }
}

impl<S> TimeTravelBuilder<S> {
    /// Replace the schedule parameters
    ///
    /// Validation happens when the digest is computed.
    #[must_use]
    pub fn with_config(mut self, config: ScheduleConfig) -> Self {
        self.config = config;
        self
    }
}

impl TimeTravelBuilder<HasTimestamp> {
    /// Add `on_result` handler
    #[must_use]
    pub fn on_result<F, T>(self, handler: F) -> TimeTravelBuilderWithHandler<F, T>
    where
        F: FnOnce(Result<FinalDigest>) -> T + Send + 'static,
        T: Send + 'static,
    {
        TimeTravelBuilderWithHandler {
            builder: self,
            result_handler: handler,
            _phantom: std::marker::PhantomData,
        }
    }

    /// Add `on_error` handler - transforms errors but passes through success
    #[must_use]
    pub fn on_error<E>(self, handler: E) -> TimeTravelBuilderWithError<E>
    where
        E: Fn(PowHashError) -> PowHashError + Send + Sync + 'static,
    {
        TimeTravelBuilderWithError {
            builder: self,
            error_handler: handler,
        }
    }

    /// Compute the digest on the current thread
    ///
    /// # Errors
    ///
    /// Returns `PowHashError::InvalidParameters` for a rejected schedule and
    /// `PowHashError::UnboundPrimitive` for an incomplete registry.
    pub fn compute_blocking(&self, data: &[u8]) -> Result<FinalDigest> {
        self.engine()?.digest(data, self.state.0)
    }

    /// Compute the digest on the blocking pool - action takes data as argument
    #[must_use]
    pub fn compute<D: Into<Vec<u8>>>(self, data: D) -> AsyncPowResult {
        AsyncPowResult::spawn(self.engine(), data.into(), self.state.0)
    }

    fn engine(&self) -> Result<TimeTravel> {
        TimeTravel::with_config(self.registry, self.config)
    }
}

impl<F, T> TimeTravelBuilderWithHandler<F, T>
where
    F: FnOnce(Result<FinalDigest>) -> T + Send + 'static,
    T: Send + 'static,
{
    /// Compute the digest and hand the outcome to the result handler
    pub async fn compute<D: Into<Vec<u8>>>(self, data: D) -> T {
        let result = self.builder.compute(data).await;
        (self.result_handler)(result)
    }
}

impl<E> TimeTravelBuilderWithError<E>
where
    E: Fn(PowHashError) -> PowHashError + Send + Sync + Unpin + 'static,
{
    /// Compute with error handler - returns `AsyncPowResultWithError`
    #[must_use]
    pub fn compute<D: Into<Vec<u8>>>(self, data: D) -> AsyncPowResultWithError<E> {
        AsyncPowResultWithError::spawn(
            self.builder.engine(),
            data.into(),
            self.builder.state.0,
            self.error_handler,
        )
    }
}
