//! # memory-pairs
//!
//! A memory-matching (card pairs) game engine.
//!
//! The player flips tiles two at a time. Matching pairs stay face up,
//! mismatches flip back after a delay, and the round is won when every pair
//! is found. The engine tracks attempts, found and remaining pairs, and an
//! `mm:ss` clock.
//!
//! ## Design Principles
//!
//! 1. **Explicit ownership**: one `GameController` owns the deck, round
//!    state and timers. Nothing is global.
//!
//! 2. **Injected output**: everything the player sees goes through a
//!    `DisplaySink`, so the same controller drives a terminal, a GUI, or a
//!    test recorder.
//!
//! 3. **Host-driven time**: timers live in a `Scheduler` owned by the
//!    controller and fire only when the host calls `pump()`. Time comes from
//!    a `Clock`, so tests step it by hand.
//!
//! 4. **Deterministic when seeded**: decks are dealt with a seeded ChaCha8
//!    RNG, forked per round.
//!
//! ## Modules
//!
//! - `core`: images, tiles, RNG, clock, configuration, round state
//! - `deck`: dealing and tile bookkeeping
//! - `timers`: the deadline scheduler
//! - `display`: the sink trait, an in-memory view and a text renderer
//! - `events`: round history entries
//! - `controller`: the game controller

pub mod core;
pub mod deck;
pub mod timers;
pub mod display;
pub mod events;
pub mod controller;
pub mod error;

// Re-export commonly used types
pub use crate::core::{
    Clock, ControlState, ElapsedTime, GameConfig, GameRng, ImageRef, ImageSet, ManualClock,
    MismatchPolicy, RoundPhase, RoundState, Selection, SystemClock, Tile, TileId, TileState,
};

pub use crate::deck::Deck;

pub use crate::timers::{FiredTimer, Scheduler, TimerId, TimerKind};

pub use crate::display::{BoardView, DisplaySink, TextRenderer, TileView, VictoryNotice};

pub use crate::events::GameEvent;

pub use crate::controller::{ClickOutcome, GameController, IgnoreReason};

pub use crate::error::{Error, Result};
