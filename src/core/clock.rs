//! Time sources and the elapsed-time display value.
//!
//! The controller never reads the wall clock directly. It asks a `Clock`
//! for a monotonic offset, which lets hosts use real time (`SystemClock`)
//! and tests step time by hand (`ManualClock`).

use std::cell::Cell;
use std::rc::Rc;
use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};

/// Monotonic time source.
///
/// `now()` is an offset from an arbitrary origin fixed at construction.
/// It must never go backwards.
pub trait Clock {
    fn now(&self) -> Duration;
}

/// Real monotonic time.
#[derive(Clone, Copy, Debug)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    #[must_use]
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }

    /// Convert a clock offset back into an `Instant`.
    ///
    /// Hosts use this to sleep until a timer deadline.
    #[must_use]
    pub fn instant_at(&self, offset: Duration) -> Instant {
        self.origin + offset
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now(&self) -> Duration {
        self.origin.elapsed()
    }
}

/// Hand-driven clock.
///
/// Clones share the same time, so a test can keep one handle and give the
/// other to the controller.
///
/// ```
/// use std::time::Duration;
/// use memory_pairs::core::{Clock, ManualClock};
///
/// let clock = ManualClock::new();
/// let handle = clock.clone();
/// handle.advance(Duration::from_millis(1500));
/// assert_eq!(clock.now(), Duration::from_millis(1500));
/// ```
#[derive(Clone, Debug, Default)]
pub struct ManualClock {
    now: Rc<Cell<Duration>>,
}

impl ManualClock {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Move time forward.
    pub fn advance(&self, by: Duration) {
        self.now.set(self.now.get() + by);
    }

    /// Jump to an absolute offset. Earlier offsets are ignored.
    pub fn set(&self, to: Duration) {
        if to > self.now.get() {
            self.now.set(to);
        }
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Duration {
        self.now.get()
    }
}

/// Elapsed round time as shown to the player: `mm:ss`.
///
/// There is no hours field. Minutes wrap back to `00` after `59`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ElapsedTime {
    minutes: u8,
    seconds: u8,
}

impl ElapsedTime {
    /// `00:00`.
    pub const ZERO: Self = Self {
        minutes: 0,
        seconds: 0,
    };

    /// Truncate a duration to whole seconds and split it into fields.
    #[must_use]
    pub fn from_duration(elapsed: Duration) -> Self {
        let total = elapsed.as_secs();
        Self {
            minutes: ((total / 60) % 60) as u8,
            seconds: (total % 60) as u8,
        }
    }

    #[must_use]
    pub const fn minutes(self) -> u8 {
        self.minutes
    }

    #[must_use]
    pub const fn seconds(self) -> u8 {
        self.seconds
    }
}

impl std::fmt::Display for ElapsedTime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:02}:{:02}", self.minutes, self.seconds)
    }
}
