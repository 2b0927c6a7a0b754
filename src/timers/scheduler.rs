//! Deadline scheduler.

use std::time::Duration;

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use tracing::trace;

use crate::core::TileId;

/// Handle for a scheduled timer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TimerId(pub u32);

impl TimerId {
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for TimerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Timer({})", self.0)
    }
}

/// What a timer does when it fires.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimerKind {
    /// Refresh the elapsed-time display.
    ClockTick,
    /// Turn a mismatched pair face down again.
    RevertMismatch(TileId, TileId),
}

/// A timer that came due during `take_due`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FiredTimer {
    pub id: TimerId,
    pub kind: TimerKind,
    /// The deadline it was scheduled for (not the time it was pumped).
    pub deadline: Duration,
}

#[derive(Clone, Debug)]
struct TimerEntry {
    deadline: Duration,
    period: Option<Duration>,
    kind: TimerKind,
}

/// Owns every pending timer.
///
/// Nothing fires on its own: the host calls `take_due(now)` and handles the
/// returned timers. One-shot timers are removed when they fire; repeating
/// timers are moved to their next deadline.
///
/// ```
/// use std::time::Duration;
/// use memory_pairs::timers::{Scheduler, TimerKind};
///
/// let mut scheduler = Scheduler::new();
/// let tick = scheduler.schedule_repeating(Duration::from_secs(1), Duration::from_secs(1), TimerKind::ClockTick);
///
/// assert!(scheduler.take_due(Duration::from_millis(500)).is_empty());
/// assert_eq!(scheduler.take_due(Duration::from_secs(1)).len(), 1);
/// assert_eq!(scheduler.next_deadline(), Some(Duration::from_secs(2)));
///
/// assert!(scheduler.cancel(tick));
/// assert!(!scheduler.cancel(tick));
/// ```
#[derive(Clone, Debug, Default)]
pub struct Scheduler {
    timers: FxHashMap<TimerId, TimerEntry>,
    next_id: u32,
}

impl Scheduler {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Fire once at `deadline`.
    pub fn schedule_once(&mut self, deadline: Duration, kind: TimerKind) -> TimerId {
        self.insert(TimerEntry {
            deadline,
            period: None,
            kind,
        })
    }

    /// Fire at `first`, then every `period` after that.
    ///
    /// Panics if `period` is zero.
    pub fn schedule_repeating(&mut self, first: Duration, period: Duration, kind: TimerKind) -> TimerId {
        assert!(!period.is_zero(), "repeating timer needs a non-zero period");
        self.insert(TimerEntry {
            deadline: first,
            period: Some(period),
            kind,
        })
    }

    /// Cancel a timer. Returns false if it was not pending, which is not an
    /// error: cancelling twice is fine.
    pub fn cancel(&mut self, id: TimerId) -> bool {
        let removed = self.timers.remove(&id).is_some();
        if removed {
            trace!(timer = %id, "timer cancelled");
        }
        removed
    }

    /// Cancel everything.
    pub fn clear(&mut self) {
        self.timers.clear();
    }

    #[must_use]
    pub fn is_pending(&self, id: TimerId) -> bool {
        self.timers.contains_key(&id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.timers.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.timers.is_empty()
    }

    /// Earliest pending deadline.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Duration> {
        self.timers.values().map(|entry| entry.deadline).min()
    }

    /// Remove and return every timer due at `now`, earliest first.
    ///
    /// Ties are broken by scheduling order. A repeating timer fires at most
    /// once per call even if several periods have passed; its next deadline
    /// is the first one after `now`.
    pub fn take_due(&mut self, now: Duration) -> SmallVec<[FiredTimer; 4]> {
        let mut fired: SmallVec<[FiredTimer; 4]> = self
            .timers
            .iter()
            .filter(|(_, entry)| entry.deadline <= now)
            .map(|(&id, entry)| FiredTimer {
                id,
                kind: entry.kind,
                deadline: entry.deadline,
            })
            .collect();
        fired.sort_by_key(|timer| (timer.deadline, timer.id));

        for timer in &fired {
            let Some(entry) = self.timers.get_mut(&timer.id) else {
                continue;
            };
            let period = entry.period;
            match period {
                Some(period) => {
                    while entry.deadline <= now {
                        entry.deadline += period;
                    }
                }
                None => {
                    self.timers.remove(&timer.id);
                }
            }
            trace!(timer = %timer.id, kind = ?timer.kind, "timer fired");
        }

        fired
    }

    fn insert(&mut self, entry: TimerEntry) -> TimerId {
        let id = TimerId::new(self.next_id);
        self.next_id += 1;
        trace!(timer = %id, deadline = ?entry.deadline, kind = ?entry.kind, "timer scheduled");
        self.timers.insert(id, entry);
        id
    }
}
