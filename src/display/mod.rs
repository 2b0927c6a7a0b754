//! Display output.
//!
//! The controller talks to the screen only through `DisplaySink`. Hosts
//! implement it for their UI; `BoardView` is a ready-made in-memory sink
//! and `TextRenderer` draws a `BoardView` to any writer.

mod sink;
mod text;

pub use sink::{BoardView, DisplaySink, TileView, VictoryNotice};
pub use text::TextRenderer;
