//! Canvas serialization to text.

use std::fmt::Write;

use super::canvas::Canvas;

/// SGR reset sequence.
const RESET: &str = "\x1b[0m";

/// How cells are written out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RenderStyle {
    /// Characters only.
    #[default]
    Plain,
    /// Each character wrapped in a 24-bit foreground color and a reset.
    Colored,
}

impl RenderStyle {
    pub fn from_colorful(colorful: bool) -> Self {
        if colorful {
            RenderStyle::Colored
        } else {
            RenderStyle::Plain
        }
    }
}

/// Serialize a canvas: rows joined by `\n`, no trailing newline.
pub fn render(canvas: &Canvas, style: RenderStyle) -> String {
    let per_cell = match style {
        RenderStyle::Plain => 1,
        RenderStyle::Colored => 24,
    };
    let mut out =
        String::with_capacity(canvas.cells().len() * per_cell + canvas.height() as usize);

    for (i, row) in canvas.rows().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        for cell in row {
            match style {
                RenderStyle::Plain => out.push(cell.ch),
                RenderStyle::Colored => {
                    let [r, g, b] = cell.color.0;
                    // Writing to a String cannot fail
                    let _ = write!(out, "\x1b[38;2;{};{};{}m{}{}", r, g, b, cell.ch, RESET);
                }
            }
        }
    }

    out
}
