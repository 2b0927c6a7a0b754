//! Round history.
//!
//! The controller records a `GameEvent` for every state change in the
//! current round. The history is an `im::Vector`, so hosts can take
//! snapshots for replays or debugging at no cost.

mod event;

pub use event::GameEvent;
