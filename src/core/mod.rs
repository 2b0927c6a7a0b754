//! Core game types: images, tiles, RNG, clock, configuration, round state.
//!
//! These are the building blocks the deck, scheduler and controller are
//! assembled from. None of them touch the display.

pub mod image;
pub mod tile;
pub mod rng;
pub mod clock;
pub mod config;
pub mod state;

pub use image::{ImageRef, ImageSet, MAX_IMAGES};
pub use tile::{Tile, TileId, TileState};
pub use rng::GameRng;
pub use clock::{Clock, ElapsedTime, ManualClock, SystemClock};
pub use config::{GameConfig, MismatchPolicy, DEFAULT_IMAGES, DEFAULT_VICTORY_MESSAGE};
pub use state::{ControlState, RoundPhase, RoundState, Selection};
