//! What a click did.

use serde::{Deserialize, Serialize};

use crate::core::TileId;

/// Why a click changed nothing.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IgnoreReason {
    /// The round has not been started, or is already won.
    NotRunning,
    /// No tile at that position.
    UnknownTile,
    AlreadyFlipped,
    AlreadyMatched,
    /// Two tiles are already awaiting resolution.
    SelectionFull,
}

impl std::fmt::Display for IgnoreReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let text = match self {
            IgnoreReason::NotRunning => "round is not running",
            IgnoreReason::UnknownTile => "no such tile",
            IgnoreReason::AlreadyFlipped => "tile is already face up",
            IgnoreReason::AlreadyMatched => "tile is already matched",
            IgnoreReason::SelectionFull => "two tiles are already selected",
        };
        f.write_str(text)
    }
}

/// Result of `GameController::handle_click`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ClickOutcome {
    /// Nothing happened.
    Ignored(IgnoreReason),
    /// First tile of a pair turned face up.
    Flipped(TileId),
    /// Second tile completed a matching pair. `won` is set when it was the
    /// last pair.
    Matched {
        first: TileId,
        second: TileId,
        won: bool,
    },
    /// Second tile did not match; both flip back after the delay.
    Mismatched { first: TileId, second: TileId },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcome_json() {
        let outcome = ClickOutcome::Matched {
            first: TileId::new(0),
            second: TileId::new(3),
            won: true,
        };
        let json = serde_json::to_string(&outcome).unwrap();
        assert_eq!(json, r#"{"Matched":{"first":0,"second":3,"won":true}}"#);
    }

    #[test]
    fn test_ignore_reason_display() {
        assert_eq!(IgnoreReason::AlreadyMatched.to_string(), "tile is already matched");
    }
}
