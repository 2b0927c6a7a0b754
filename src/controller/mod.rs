//! The game controller: the only component that mutates game state.
//!
//! Hosts construct a `GameController` with a config, a display sink and a
//! clock, then feed it control presses, tile clicks and timer pumps.

mod game;
mod outcome;

pub use game::GameController;
pub use outcome::{ClickOutcome, IgnoreReason};
