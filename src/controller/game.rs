//! The game controller.

use std::time::Duration;

use im::Vector;
use tracing::{debug, info, trace};

use crate::core::{
    Clock, ElapsedTime, GameConfig, GameRng, ImageSet, MismatchPolicy, RoundPhase, RoundState,
    Selection, SystemClock, TileId, TileState,
};
use crate::deck::Deck;
use crate::display::{DisplaySink, VictoryNotice};
use crate::error::Result;
use crate::events::GameEvent;
use crate::timers::{FiredTimer, Scheduler, TimerId, TimerKind};

use super::outcome::{ClickOutcome, IgnoreReason};

/// Owns one game: deck, round state, timers, and the display it writes to.
///
/// All input arrives through `start`, `restart`, `handle_click` and `pump`.
/// Each call runs to completion before the next, so the selection can never
/// hold more than two tiles.
///
/// ## Usage
///
/// ```
/// use std::time::Duration;
/// use memory_pairs::controller::{ClickOutcome, GameController};
/// use memory_pairs::core::{GameConfig, ManualClock, TileId};
/// use memory_pairs::display::BoardView;
///
/// let clock = ManualClock::new();
/// let config = GameConfig::new(["a.jpg", "b.jpg"]).with_seed(7);
/// let mut game = GameController::new(config, BoardView::new(), clock.clone()).unwrap();
///
/// assert!(game.start());
/// assert_eq!(game.handle_click(TileId::new(0)), ClickOutcome::Flipped(TileId::new(0)));
///
/// clock.advance(Duration::from_secs(1));
/// game.pump();
/// assert_eq!(game.display().elapsed.to_string(), "00:01");
/// ```
pub struct GameController<D: DisplaySink, C: Clock = SystemClock> {
    config: GameConfig,
    images: ImageSet,
    rng: GameRng,
    deck: Deck,
    round: RoundState,
    scheduler: Scheduler,
    /// The repeating clock tick, while the round is running.
    clock_timer: Option<TimerId>,
    clock: C,
    display: D,
    history: Vector<GameEvent>,
}

impl<D: DisplaySink, C: Clock> GameController<D, C> {
    /// Validate `config`, deal the first deck and draw it.
    pub fn new(config: GameConfig, display: D, clock: C) -> Result<Self> {
        let images = config.validate()?;
        let rng = config.seed.map_or_else(GameRng::from_entropy, GameRng::new);
        let total_pairs = images.len();

        let mut controller = Self {
            config,
            images,
            rng,
            deck: Deck::default(),
            round: RoundState::new(1, total_pairs),
            scheduler: Scheduler::new(),
            clock_timer: None,
            clock,
            display,
            history: Vector::new(),
        };
        debug!(seed = controller.rng.seed(), pairs = total_pairs, "game created");
        controller.init_game();
        Ok(controller)
    }

    /// Deal a fresh deck and redraw the board face down.
    ///
    /// Only `new` and `restart` deal, after the round state has been reset.
    /// Tiles stay inactive until `start`.
    fn init_game(&mut self) {
        let mut round_rng = self.rng.round_rng();
        self.deck = Deck::deal(&self.images, &mut round_rng);

        self.display.render_board(&self.deck);
        self.display.set_tiles_active(false);
        self.display.set_total_pairs(self.round.total_pairs);
        self.display.set_controls(self.round.controls());

        info!(round = self.round.round, tiles = self.deck.len(), "deck dealt");
        self.record(GameEvent::DeckDealt {
            round: self.round.round,
            tiles: self.deck.len(),
        });
    }

    /// Start the round: activate tiles, swap controls, start the clock.
    ///
    /// Returns false (and does nothing) unless the round is idle.
    pub fn start(&mut self) -> bool {
        if self.round.phase != RoundPhase::Idle {
            debug!(phase = ?self.round.phase, "start ignored");
            return false;
        }

        let now = self.clock.now();
        self.round.phase = RoundPhase::Running;
        self.round.started_at = Some(now);

        self.display.set_tiles_active(true);
        self.display.set_controls(self.round.controls());
        self.display.set_remaining_pairs(self.round.remaining_pairs());

        self.stop_clock();
        let period = self.config.tick_interval();
        self.clock_timer = Some(self.scheduler.schedule_repeating(now + period, period, TimerKind::ClockTick));

        info!(round = self.round.round, "round started");
        self.record(GameEvent::RoundStarted {
            round: self.round.round,
        });
        true
    }

    /// Flip `tile` if the rules allow it, and resolve the pair once two tiles
    /// are up.
    pub fn handle_click(&mut self, tile: TileId) -> ClickOutcome {
        if let Err(reason) = self.check_clickable(tile) {
            debug!(%tile, %reason, "click ignored");
            return ClickOutcome::Ignored(reason);
        }
        let Some(selection) = self.round.selection.push(tile) else {
            return ClickOutcome::Ignored(IgnoreReason::SelectionFull);
        };

        self.deck.flip(tile);
        self.display.set_tile_state(tile, TileState::Flipped);
        self.round.selection = selection;
        debug!(%tile, pending = selection.len(), "tile flipped");
        self.record(GameEvent::TileFlipped { tile });

        match selection {
            Selection::Evaluating(first, second) => {
                self.round.attempts += 1;
                self.display.set_attempts(self.round.attempts);
                self.record(GameEvent::AttemptRecorded {
                    attempts: self.round.attempts,
                });
                self.check_match(first, second)
            }
            Selection::OneSelected(_) | Selection::Idle => ClickOutcome::Flipped(tile),
        }
    }

    /// Reset counters and displays, cancel every timer, deal a new deck.
    ///
    /// Returns false (and does nothing) while the round is idle, matching a
    /// disabled restart control.
    pub fn restart(&mut self) -> bool {
        if self.round.phase == RoundPhase::Idle {
            debug!("restart ignored");
            return false;
        }

        self.stop_clock();
        self.scheduler.clear();

        let next_round = self.round.round + 1;
        self.round = RoundState::new(next_round, self.round.total_pairs);
        self.history = Vector::new();

        self.display.set_attempts(0);
        self.display.set_completed_pairs(0);
        self.display.set_remaining_pairs(0);
        self.display.set_elapsed(ElapsedTime::ZERO);

        info!(round = next_round, "game restarted");
        self.record(GameEvent::Restarted { round: next_round });

        self.init_game();
        true
    }

    /// Fire every timer that is due, earliest first. Returns how many fired.
    pub fn pump(&mut self) -> usize {
        let now = self.clock.now();
        let fired = self.scheduler.take_due(now);
        for timer in &fired {
            self.on_timer(timer, now);
        }
        fired.len()
    }

    /// When `pump` next has work to do, as a clock offset.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Duration> {
        self.scheduler.next_deadline()
    }

    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    #[must_use]
    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    #[must_use]
    pub fn round(&self) -> &RoundState {
        &self.round
    }

    #[must_use]
    pub fn phase(&self) -> RoundPhase {
        self.round.phase
    }

    #[must_use]
    pub fn display(&self) -> &D {
        &self.display
    }

    #[must_use]
    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Events of the current round, oldest first.
    #[must_use]
    pub fn history(&self) -> &Vector<GameEvent> {
        &self.history
    }

    /// Is the elapsed-time tick scheduled?
    #[must_use]
    pub fn is_clock_running(&self) -> bool {
        self.clock_timer.is_some_and(|id| self.scheduler.is_pending(id))
    }

    #[must_use]
    pub fn pending_timers(&self) -> usize {
        self.scheduler.len()
    }

    /// Give back the display, ending the game.
    pub fn into_display(self) -> D {
        self.display
    }

    fn check_clickable(&self, tile: TileId) -> std::result::Result<(), IgnoreReason> {
        if self.round.phase != RoundPhase::Running {
            return Err(IgnoreReason::NotRunning);
        }
        match self.deck.state_of(tile) {
            None => Err(IgnoreReason::UnknownTile),
            Some(TileState::Flipped) => Err(IgnoreReason::AlreadyFlipped),
            Some(TileState::Matched) => Err(IgnoreReason::AlreadyMatched),
            Some(TileState::Hidden) if self.round.selection.is_full() => Err(IgnoreReason::SelectionFull),
            Some(TileState::Hidden) => Ok(()),
        }
    }

    /// Resolve the two selected tiles.
    fn check_match(&mut self, first: TileId, second: TileId) -> ClickOutcome {
        let matched_image = match (self.deck.get(first), self.deck.get(second)) {
            (Some(a), Some(b))
                if a.pairs_with(b)
                    && a.state == TileState::Flipped
                    && b.state == TileState::Flipped =>
            {
                Some(a.image.clone())
            }
            _ => None,
        };

        if let Some(image) = matched_image {
            for tile in [first, second] {
                if self.deck.mark_matched(tile) {
                    self.display.set_tile_state(tile, TileState::Matched);
                }
            }
            self.round.selection = Selection::Idle;
            self.round.matched_pairs += 1;
            self.display.set_completed_pairs(self.round.matched_pairs);
            self.display.set_remaining_pairs(self.round.remaining_pairs());

            debug!(%first, %second, %image, matched = self.round.matched_pairs, "pair matched");
            self.record(GameEvent::PairMatched { first, second, image });

            let won = self.round.is_complete();
            if won {
                self.finish_round();
            }
            return ClickOutcome::Matched { first, second, won };
        }

        let deadline = self.clock.now() + self.config.mismatch_delay();
        self.scheduler
            .schedule_once(deadline, TimerKind::RevertMismatch(first, second));
        self.round.selection = match self.config.mismatch_policy {
            MismatchPolicy::ReleaseImmediately => Selection::Idle,
            MismatchPolicy::LockUntilRevert => Selection::Evaluating(first, second),
        };

        debug!(%first, %second, "pair mismatched");
        self.record(GameEvent::PairMismatched { first, second });
        ClickOutcome::Mismatched { first, second }
    }

    /// Stop the clock and announce the win.
    fn finish_round(&mut self) {
        self.stop_clock();
        self.round.phase = RoundPhase::Won;

        let attempts = self.round.attempts;
        let elapsed = self.round.elapsed;
        let notice = VictoryNotice {
            attempts,
            elapsed,
            message: self.config.victory_text(attempts, elapsed),
        };
        self.display.show_victory(&notice);

        info!(round = self.round.round, attempts, %elapsed, "round won");
        self.record(GameEvent::RoundWon { attempts, elapsed });
    }

    /// Cancel the clock tick. Safe to call when it is not running.
    fn stop_clock(&mut self) {
        if let Some(id) = self.clock_timer.take() {
            self.scheduler.cancel(id);
        }
    }

    fn on_timer(&mut self, timer: &FiredTimer, now: Duration) {
        match timer.kind {
            TimerKind::ClockTick => {
                if self.clock_timer != Some(timer.id) || self.round.phase != RoundPhase::Running {
                    return;
                }
                let started = self.round.started_at.unwrap_or(now);
                self.round.elapsed = ElapsedTime::from_duration(now.saturating_sub(started));
                self.display.set_elapsed(self.round.elapsed);
                trace!(elapsed = %self.round.elapsed, "clock tick");
            }
            TimerKind::RevertMismatch(first, second) => {
                for tile in [first, second] {
                    self.deck.hide(tile);
                    if let Some(state) = self.deck.state_of(tile) {
                        self.display.set_tile_state(tile, state);
                    }
                }
                if self.round.selection == Selection::Evaluating(first, second) {
                    self.round.selection = Selection::Idle;
                }
                debug!(%first, %second, "mismatched pair hidden");
                self.record(GameEvent::TilesHidden { first, second });
            }
        }
    }

    fn record(&mut self, event: GameEvent) {
        trace!(event = event.name(), "event recorded");
        self.history.push_back(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{ImageRef, ManualClock};
    use crate::display::BoardView;

    fn game(images: &[&str]) -> (GameController<BoardView, ManualClock>, ManualClock) {
        let clock = ManualClock::new();
        let config = GameConfig::new(images.iter().copied()).with_seed(42);
        let controller = GameController::new(config, BoardView::new(), clock.clone()).unwrap();
        (controller, clock)
    }

    fn pair_of(game: &GameController<BoardView, ManualClock>, image: &str) -> (TileId, TileId) {
        let positions = game.deck().positions_of(&ImageRef::new(image));
        (positions[0], positions[1])
    }

    #[test]
    fn test_new_deals_and_draws() {
        let (game, _) = game(&["a", "b", "c"]);

        assert_eq!(game.deck().len(), 6);
        assert_eq!(game.phase(), RoundPhase::Idle);
        assert_eq!(game.display().tiles.len(), 6);
        assert_eq!(game.display().total_pairs, 3);
        assert!(!game.display().active);
        assert_eq!(game.next_deadline(), None);
        assert_eq!(game.history().len(), 1);
    }

    #[test]
    fn test_new_rejects_invalid_config() {
        let config = GameConfig::new(["a", "a"]);
        assert!(GameController::new(config, BoardView::new(), ManualClock::new()).is_err());
    }

    #[test]
    fn test_click_before_start_is_ignored() {
        let (mut game, _) = game(&["a", "b"]);
        assert_eq!(
            game.handle_click(TileId::new(0)),
            ClickOutcome::Ignored(IgnoreReason::NotRunning)
        );
        assert_eq!(game.deck().state_of(TileId::new(0)), Some(TileState::Hidden));
    }

    #[test]
    fn test_start_twice() {
        let (mut game, _) = game(&["a"]);
        assert!(game.start());
        assert!(!game.start());
        assert!(game.is_clock_running());
        assert_eq!(game.pending_timers(), 1);
    }

    #[test]
    fn test_restart_while_idle_is_ignored() {
        let (mut game, _) = game(&["a"]);
        assert!(!game.restart());
        assert_eq!(game.round().round, 1);
    }

    #[test]
    fn test_match_updates_counters() {
        let (mut game, _) = game(&["a", "b"]);
        game.start();
        let (a1, a2) = pair_of(&game, "a");

        assert_eq!(game.handle_click(a1), ClickOutcome::Flipped(a1));
        assert_eq!(
            game.handle_click(a2),
            ClickOutcome::Matched {
                first: a1,
                second: a2,
                won: false
            }
        );

        assert_eq!(game.round().attempts, 1);
        assert_eq!(game.round().matched_pairs, 1);
        assert_eq!(game.display().completed_pairs, 1);
        assert_eq!(game.display().remaining_pairs, 1);
        assert_eq!(game.round().selection, Selection::Idle);
    }

    #[test]
    fn test_unknown_tile() {
        let (mut game, _) = game(&["a"]);
        game.start();
        assert_eq!(
            game.handle_click(TileId::new(2)),
            ClickOutcome::Ignored(IgnoreReason::UnknownTile)
        );
    }

    #[test]
    fn test_single_pair_game_wins_on_first_attempt() {
        let (mut game, _) = game(&["solo"]);
        game.start();

        game.handle_click(TileId::new(0));
        let outcome = game.handle_click(TileId::new(1));

        assert_eq!(
            outcome,
            ClickOutcome::Matched {
                first: TileId::new(0),
                second: TileId::new(1),
                won: true
            }
        );
        assert_eq!(game.phase(), RoundPhase::Won);
        assert!(!game.is_clock_running());
        assert_eq!(
            game.display().last_notice().map(|n| n.message.as_str()),
            Some("You won in 1 attempts and 00:00!")
        );
    }

    #[test]
    fn test_pair_only_matches_when_both_tiles_are_up() {
        let (mut game, clock) = game(&["a"]);
        game.start();
        let (a1, a2) = pair_of(&game, "a");

        game.handle_click(a1);
        // Deck and selection out of step: the first tile went face down.
        game.deck.hide(a1);

        assert_eq!(
            game.handle_click(a2),
            ClickOutcome::Mismatched {
                first: a1,
                second: a2
            }
        );
        assert_eq!(game.round().matched_pairs, 0);
        assert_eq!(game.phase(), RoundPhase::Running);
        assert!(game.display().notices.is_empty());

        clock.advance(Duration::from_secs(1));
        game.pump();
        for tile in [a1, a2] {
            assert_eq!(game.deck().state_of(tile), Some(TileState::Hidden));
            assert_eq!(game.display().tile_state(tile), game.deck().state_of(tile));
        }
    }

    #[test]
    fn test_match_keeps_deck_and_display_in_step() {
        let (mut game, _) = game(&["a", "b"]);
        game.start();
        let (a1, a2) = pair_of(&game, "a");

        game.handle_click(a1);
        game.handle_click(a2);
        for tile in [a1, a2] {
            assert_eq!(game.deck().state_of(tile), Some(TileState::Matched));
            assert_eq!(game.display().tile_state(tile), Some(TileState::Matched));
        }
    }
}
