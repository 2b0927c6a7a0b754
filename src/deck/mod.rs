//! The deck: every image twice, shuffled, laid out by position.
//!
//! A deck is dealt once per round. Tile positions are fixed from then on;
//! only tile states change.

mod dealer;

pub use dealer::Deck;
