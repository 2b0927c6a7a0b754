//! Display sink trait and the recording view model.

use crate::core::{ControlState, ElapsedTime, ImageRef, RoundPhase, TileId, TileState};
use crate::deck::Deck;

/// The end-of-round notice.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VictoryNotice {
    pub attempts: u32,
    pub elapsed: ElapsedTime,
    /// Rendered from the configured template.
    pub message: String,
}

/// Where the controller writes everything the player sees.
///
/// The controller is the only writer. Implementations should treat each
/// call as a complete replacement of that field's value.
pub trait DisplaySink {
    /// Throw away the old board and lay out `deck` face down.
    fn render_board(&mut self, deck: &Deck);

    fn set_tile_state(&mut self, tile: TileId, state: TileState);

    /// Whether tiles accept clicks (cosmetic; the controller enforces it).
    fn set_tiles_active(&mut self, active: bool);

    fn set_attempts(&mut self, attempts: u32);

    fn set_completed_pairs(&mut self, pairs: usize);

    fn set_remaining_pairs(&mut self, pairs: usize);

    fn set_total_pairs(&mut self, pairs: usize);

    fn set_elapsed(&mut self, elapsed: ElapsedTime);

    fn set_controls(&mut self, controls: ControlState);

    fn show_victory(&mut self, notice: &VictoryNotice);
}

impl<T: DisplaySink + ?Sized> DisplaySink for &mut T {
    fn render_board(&mut self, deck: &Deck) {
        (**self).render_board(deck);
    }

    fn set_tile_state(&mut self, tile: TileId, state: TileState) {
        (**self).set_tile_state(tile, state);
    }

    fn set_tiles_active(&mut self, active: bool) {
        (**self).set_tiles_active(active);
    }

    fn set_attempts(&mut self, attempts: u32) {
        (**self).set_attempts(attempts);
    }

    fn set_completed_pairs(&mut self, pairs: usize) {
        (**self).set_completed_pairs(pairs);
    }

    fn set_remaining_pairs(&mut self, pairs: usize) {
        (**self).set_remaining_pairs(pairs);
    }

    fn set_total_pairs(&mut self, pairs: usize) {
        (**self).set_total_pairs(pairs);
    }

    fn set_elapsed(&mut self, elapsed: ElapsedTime) {
        (**self).set_elapsed(elapsed);
    }

    fn set_controls(&mut self, controls: ControlState) {
        (**self).set_controls(controls);
    }

    fn show_victory(&mut self, notice: &VictoryNotice) {
        (**self).show_victory(notice);
    }
}

/// One tile as the display knows it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TileView {
    pub image: ImageRef,
    pub state: TileState,
}

/// In-memory display: keeps the latest value of every field.
///
/// Used headless (tests, bots) and as the model the text renderer draws.
/// Also counts board renders and elapsed updates, and keeps every victory
/// notice, so callers can check how often things happened. A new board
/// retires the notice on screen but keeps it in `notices`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BoardView {
    pub tiles: Vec<TileView>,
    pub active: bool,
    pub attempts: u32,
    pub completed_pairs: usize,
    pub remaining_pairs: usize,
    pub total_pairs: usize,
    pub elapsed: ElapsedTime,
    pub controls: ControlState,
    pub notices: Vec<VictoryNotice>,
    /// Is the last notice for the board currently laid out?
    pub victory_shown: bool,
    pub board_renders: usize,
    pub elapsed_updates: usize,
}

impl Default for BoardView {
    fn default() -> Self {
        Self {
            tiles: Vec::new(),
            active: false,
            attempts: 0,
            completed_pairs: 0,
            remaining_pairs: 0,
            total_pairs: 0,
            elapsed: ElapsedTime::ZERO,
            controls: ControlState::for_phase(RoundPhase::Idle),
            notices: Vec::new(),
            victory_shown: false,
            board_renders: 0,
            elapsed_updates: 0,
        }
    }
}

impl BoardView {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn tile_state(&self, tile: TileId) -> Option<TileState> {
        self.tiles.get(tile.index()).map(|view| view.state)
    }

    /// Tiles currently in `state`.
    pub fn tiles_in(&self, state: TileState) -> impl Iterator<Item = TileId> + '_ {
        self.tiles
            .iter()
            .enumerate()
            .filter(move |(_, view)| view.state == state)
            .map(|(index, _)| TileId::new(index as u16))
    }

    #[must_use]
    pub fn last_notice(&self) -> Option<&VictoryNotice> {
        self.notices.last()
    }

    /// The notice for the current board, if it has been won.
    #[must_use]
    pub fn current_notice(&self) -> Option<&VictoryNotice> {
        self.notices.last().filter(|_| self.victory_shown)
    }
}

impl DisplaySink for BoardView {
    fn render_board(&mut self, deck: &Deck) {
        self.tiles = deck
            .iter()
            .map(|tile| TileView {
                image: tile.image.clone(),
                state: tile.state,
            })
            .collect();
        self.victory_shown = false;
        self.board_renders += 1;
    }

    fn set_tile_state(&mut self, tile: TileId, state: TileState) {
        if let Some(view) = self.tiles.get_mut(tile.index()) {
            view.state = state;
        }
    }

    fn set_tiles_active(&mut self, active: bool) {
        self.active = active;
    }

    fn set_attempts(&mut self, attempts: u32) {
        self.attempts = attempts;
    }

    fn set_completed_pairs(&mut self, pairs: usize) {
        self.completed_pairs = pairs;
    }

    fn set_remaining_pairs(&mut self, pairs: usize) {
        self.remaining_pairs = pairs;
    }

    fn set_total_pairs(&mut self, pairs: usize) {
        self.total_pairs = pairs;
    }

    fn set_elapsed(&mut self, elapsed: ElapsedTime) {
        self.elapsed = elapsed;
        self.elapsed_updates += 1;
    }

    fn set_controls(&mut self, controls: ControlState) {
        self.controls = controls;
    }

    fn show_victory(&mut self, notice: &VictoryNotice) {
        self.notices.push(notice.clone());
        self.victory_shown = true;
    }
}
