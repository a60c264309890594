//! Fluent proof-of-work API
//!
//! Actions take data as arguments:
//! `PowHash::timetravel(registry).with_timestamp(t).compute(header).await`

pub mod states;
pub mod timetravel_builder;

pub use states::{HasTimestamp, NoTimestamp};
pub use timetravel_builder::{
    TimeTravelBuilder, TimeTravelBuilderWithError, TimeTravelBuilderWithHandler,
};
