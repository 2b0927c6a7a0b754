//! Game event types.

use serde::{Deserialize, Serialize};

use crate::core::{ElapsedTime, ImageRef, TileId};

/// Something that happened during a round.
///
/// Clock ticks are deliberately absent; they only change the elapsed display.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum GameEvent {
    /// A fresh deck was laid out.
    DeckDealt { round: u32, tiles: usize },

    /// The player pressed start.
    RoundStarted { round: u32 },

    /// A hidden tile was turned face up.
    TileFlipped { tile: TileId },

    /// A second tile was flipped, completing an attempt.
    AttemptRecorded { attempts: u32 },

    /// Both tiles show `image`; they stay up.
    PairMatched {
        first: TileId,
        second: TileId,
        image: ImageRef,
    },

    /// The tiles differ and will flip back.
    PairMismatched { first: TileId, second: TileId },

    /// A mismatched pair was turned face down again.
    TilesHidden { first: TileId, second: TileId },

    /// Every pair found.
    RoundWon { attempts: u32, elapsed: ElapsedTime },

    /// The board was reset for a new round.
    Restarted { round: u32 },
}

impl GameEvent {
    /// Short name used in logs.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            GameEvent::DeckDealt { .. } => "deck_dealt",
            GameEvent::RoundStarted { .. } => "round_started",
            GameEvent::TileFlipped { .. } => "tile_flipped",
            GameEvent::AttemptRecorded { .. } => "attempt_recorded",
            GameEvent::PairMatched { .. } => "pair_matched",
            GameEvent::PairMismatched { .. } => "pair_mismatched",
            GameEvent::TilesHidden { .. } => "tiles_hidden",
            GameEvent::RoundWon { .. } => "round_won",
            GameEvent::Restarted { .. } => "restarted",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_names() {
        let event = GameEvent::TileFlipped { tile: TileId::new(3) };
        assert_eq!(event.name(), "tile_flipped");
        assert_eq!(GameEvent::Restarted { round: 2 }.name(), "restarted");
    }

    #[test]
    fn test_event_serde_tagging() {
        let event = GameEvent::PairMismatched {
            first: TileId::new(0),
            second: TileId::new(5),
        };

        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["event"], "pair_mismatched");
        assert_eq!(json["second"], 5);

        let back: GameEvent = serde_json::from_value(json).unwrap();
        assert_eq!(back, event);
    }
}
