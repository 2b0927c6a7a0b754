//! Plain-text rendering of a `BoardView`.

use std::io::{self, Write};

use crate::core::TileState;

use super::sink::BoardView;

const HIDDEN_FACE: &str = "??";
const INACTIVE_FACE: &str = "--";

/// Draws a board view as a status line, a controls line and a tile grid.
///
/// ```text
///  attempts 3 | pairs 1/8 | left 7 | 00:12
///  [start] <restart>
///    0 ??       1 flor     2 ??       3 [nuez]
/// ```
///
/// Hidden tiles show `??` (or `--` before start), flipped tiles their image
/// label, matched tiles the label in brackets.
#[derive(Clone, Copy, Debug)]
pub struct TextRenderer {
    columns: usize,
}

impl TextRenderer {
    /// Renderer for a grid `columns` wide. Zero is treated as one.
    #[must_use]
    pub fn new(columns: usize) -> Self {
        Self {
            columns: columns.max(1),
        }
    }

    pub fn render(&self, view: &BoardView, out: &mut impl Write) -> io::Result<()> {
        writeln!(
            out,
            " attempts {} | pairs {}/{} | left {} | {}",
            view.attempts, view.completed_pairs, view.total_pairs, view.remaining_pairs, view.elapsed
        )?;
        writeln!(
            out,
            " {} {}",
            control("start", view.controls.start_enabled),
            control("restart", view.controls.restart_enabled)
        )?;

        let faces: Vec<String> = view
            .tiles
            .iter()
            .map(|tile| match tile.state {
                TileState::Hidden if view.active => HIDDEN_FACE.to_string(),
                TileState::Hidden => INACTIVE_FACE.to_string(),
                TileState::Flipped => tile.image.label().to_string(),
                TileState::Matched => format!("[{}]", tile.image.label()),
            })
            .collect();
        let width = faces.iter().map(|face| face.chars().count()).max().unwrap_or(0);
        let index_width = view.tiles.len().saturating_sub(1).to_string().len();

        for (row, chunk) in faces.chunks(self.columns).enumerate() {
            let mut line = String::new();
            for (col, face) in chunk.iter().enumerate() {
                let index = row * self.columns + col;
                line.push_str(&format!("  {index:>index_width$} {face:<width$}"));
            }
            writeln!(out, "{}", line.trim_end())?;
        }

        if let Some(notice) = view.current_notice() {
            writeln!(out, " {}", notice.message)?;
        }

        Ok(())
    }

    /// Render into a `String`.
    pub fn render_to_string(&self, view: &BoardView) -> io::Result<String> {
        let mut buf = Vec::new();
        self.render(view, &mut buf)?;
        String::from_utf8(buf).map_err(|err| io::Error::new(io::ErrorKind::InvalidData, err))
    }
}

fn control(name: &str, enabled: bool) -> String {
    if enabled {
        format!("[{name}]")
    } else {
        format!("<{name}>")
    }
}
