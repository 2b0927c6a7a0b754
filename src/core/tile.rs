//! Tiles: the clickable cards on the board.
//!
//! ## State Machine
//!
//! ```text
//! Hidden --click--> Flipped --pair matches--> Matched (terminal)
//!                      |
//!                      +--mismatch, after delay--> Hidden
//! ```
//!
//! Transitions are methods on `Tile` that return `false` when the
//! transition is not allowed from the current state, leaving the tile
//! untouched.

use serde::{Deserialize, Serialize};

use super::image::ImageRef;

/// Board position of a tile.
///
/// Positions are assigned when the deck is dealt and never change for the
/// rest of the round, so the position doubles as the tile's identity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TileId(pub u16);

impl TileId {
    /// Create a tile ID.
    #[must_use]
    pub const fn new(id: u16) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u16 {
        self.0
    }

    /// Slot index on the board.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl std::fmt::Display for TileId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Tile({})", self.0)
    }
}

/// Visible state of a tile.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TileState {
    /// Face down.
    #[default]
    Hidden,
    /// Face up, waiting for its pair to be evaluated or reverted.
    Flipped,
    /// Face up for the rest of the round.
    Matched,
}

/// One card on the board.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tile {
    /// Board position.
    pub id: TileId,

    /// Which picture this tile shows. Exactly one other tile shares it.
    pub image: ImageRef,

    /// Current state.
    pub state: TileState,
}

impl Tile {
    /// Create a face-down tile.
    pub fn new(id: TileId, image: ImageRef) -> Self {
        Self {
            id,
            image,
            state: TileState::Hidden,
        }
    }

    /// Can a click flip this tile?
    #[must_use]
    pub fn is_hidden(&self) -> bool {
        self.state == TileState::Hidden
    }

    #[must_use]
    pub fn is_matched(&self) -> bool {
        self.state == TileState::Matched
    }

    /// Does this tile show the same image as `other`?
    #[must_use]
    pub fn pairs_with(&self, other: &Tile) -> bool {
        self.id != other.id && self.image == other.image
    }

    /// `Hidden -> Flipped`.
    pub fn flip(&mut self) -> bool {
        self.transition(TileState::Hidden, TileState::Flipped)
    }

    /// `Flipped -> Matched`.
    pub fn mark_matched(&mut self) -> bool {
        self.transition(TileState::Flipped, TileState::Matched)
    }

    /// `Flipped -> Hidden`. Matched tiles stay matched.
    pub fn hide(&mut self) -> bool {
        self.transition(TileState::Flipped, TileState::Hidden)
    }

    fn transition(&mut self, from: TileState, to: TileState) -> bool {
        if self.state != from {
            return false;
        }
        self.state = to;
        true
    }
}
