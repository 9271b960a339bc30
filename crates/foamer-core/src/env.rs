//! Environment abstraction for deterministic testing.
//!
//! The `Environment` trait decouples form logic from system time. This
//! enables:
//!
//! - Deterministic Simulation: the harness provides a virtual clock, so
//!   auto-hide deadlines can be crossed without waiting.
//!
//! - Production Runtime: the Tokio implementation uses the real clock without
//!   any code changes to the form logic.
//!
//! # Invariants
//!
//! - Monotonicity: `env.now()` must never go backwards
//! - Isolation: Implementations must not share global state

use std::{
    fmt::Debug,
    ops::{Add, Sub},
    time::Duration,
};

/// Abstract environment providing time and async sleeping.
///
/// This trait is the foundation of the Sans-IO architecture. The form state
/// machine only ever reads `now()`; drivers are the only callers of `sleep()`.
pub trait Environment: Clone + Send + Sync + 'static {
    /// Point in time as understood by this environment.
    type Instant: Copy
        + Ord
        + Debug
        + Send
        + Sync
        + Add<Duration, Output = Self::Instant>
        + Sub<Output = Duration>;

    /// Returns the current time.
    ///
    /// # Invariants
    ///
    /// - Monotonicity: This method MUST return values that never decrease
    ///   within a single execution context.
    fn now(&self) -> Self::Instant;

    /// Sleeps for the specified duration.
    ///
    /// This is the ONLY async method in the trait, and it should only be used
    /// by driver code (not form logic).
    fn sleep(&self, duration: Duration) -> impl std::future::Future<Output = ()> + Send;
}
