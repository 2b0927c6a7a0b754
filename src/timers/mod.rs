//! Timers for the clock tick and mismatch reverts.
//!
//! Replaces the implicit callbacks of an event loop with explicit, owned
//! state: every timer has a `TimerId`, cancelling is idempotent, and time
//! only advances when the host pumps the scheduler.

mod scheduler;

pub use scheduler::{FiredTimer, Scheduler, TimerId, TimerKind};
