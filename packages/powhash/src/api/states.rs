//! Type states for the proof-of-work builder

/// Type state indicating no timestamp has been set
#[derive(Clone, Copy, Debug)]
pub struct NoTimestamp;

/// Type state indicating the header timestamp has been set
#[derive(Clone, Copy, Debug)]
pub struct HasTimestamp(pub u64);
