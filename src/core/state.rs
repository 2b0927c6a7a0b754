//! Round state: counters, phase, and the pending selection.
//!
//! ## Round Phases
//!
//! ```text
//! Idle --start--> Running --last pair matched--> Won
//!   ^                |                            |
//!   +----restart-----+------------restart---------+
//! ```
//!
//! ## Selection
//!
//! The tiles flipped but not yet evaluated. Modelled as an explicit state
//! machine rather than a list, so "at most two pending" holds by
//! construction.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::clock::ElapsedTime;
use super::tile::TileId;

/// Where a round is in its lifecycle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RoundPhase {
    /// Dealt, waiting for start. Tiles are not clickable.
    #[default]
    Idle,
    /// Clock running, tiles clickable.
    Running,
    /// Every pair matched, clock stopped.
    Won,
}

/// Pending tile selection.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Selection {
    #[default]
    Idle,
    OneSelected(TileId),
    /// Two tiles flipped, pair under evaluation (or waiting for its revert
    /// under `MismatchPolicy::LockUntilRevert`).
    Evaluating(TileId, TileId),
}

impl Selection {
    /// Number of pending tiles (0, 1 or 2).
    #[must_use]
    pub const fn len(self) -> usize {
        match self {
            Selection::Idle => 0,
            Selection::OneSelected(_) => 1,
            Selection::Evaluating(_, _) => 2,
        }
    }

    #[must_use]
    pub const fn is_empty(self) -> bool {
        matches!(self, Selection::Idle)
    }

    #[must_use]
    pub const fn is_full(self) -> bool {
        matches!(self, Selection::Evaluating(_, _))
    }

    /// Add a tile. Returns `None` when two tiles are already pending.
    #[must_use]
    pub const fn push(self, tile: TileId) -> Option<Self> {
        match self {
            Selection::Idle => Some(Selection::OneSelected(tile)),
            Selection::OneSelected(first) => Some(Selection::Evaluating(first, tile)),
            Selection::Evaluating(_, _) => None,
        }
    }
}

/// Which controls the player may press.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ControlState {
    pub start_enabled: bool,
    pub restart_enabled: bool,
}

impl ControlState {
    /// Controls for a round in `phase`.
    #[must_use]
    pub const fn for_phase(phase: RoundPhase) -> Self {
        match phase {
            RoundPhase::Idle => Self {
                start_enabled: true,
                restart_enabled: false,
            },
            RoundPhase::Running | RoundPhase::Won => Self {
                start_enabled: false,
                restart_enabled: true,
            },
        }
    }
}

/// Counters and bookkeeping for one round.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundState {
    /// Round number, starting at 1. Increments on restart.
    pub round: u32,

    pub phase: RoundPhase,

    /// Two-tile selections made this round.
    pub attempts: u32,

    /// Pairs found so far (0..=total_pairs).
    pub matched_pairs: usize,

    /// Fixed for the game: one pair per distinct image.
    pub total_pairs: usize,

    pub selection: Selection,

    /// Clock offset when the round was started.
    pub started_at: Option<Duration>,

    /// Last value written to the elapsed display.
    pub elapsed: ElapsedTime,
}

impl RoundState {
    /// Fresh state for an idle round.
    #[must_use]
    pub fn new(round: u32, total_pairs: usize) -> Self {
        Self {
            round,
            phase: RoundPhase::Idle,
            attempts: 0,
            matched_pairs: 0,
            total_pairs,
            selection: Selection::Idle,
            started_at: None,
            elapsed: ElapsedTime::ZERO,
        }
    }

    /// Pairs still to find.
    #[must_use]
    pub fn remaining_pairs(&self) -> usize {
        self.total_pairs - self.matched_pairs
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.matched_pairs == self.total_pairs
    }

    #[must_use]
    pub fn controls(&self) -> ControlState {
        ControlState::for_phase(self.phase)
    }
}
