//! Character grid produced by the mapper.

use std::fmt;

use image::Rgb;

/// One output character with the color of the pixel it came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutputCell {
    pub ch: char,
    pub color: Rgb<u8>,
}

impl Default for OutputCell {
    fn default() -> Self {
        Self {
            ch: ' ',
            color: Rgb([0, 0, 0]),
        }
    }
}

/// Row-major grid of output cells.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Canvas {
    pub(crate) width: u32,
    pub(crate) height: u32,
    pub(crate) cells: Vec<OutputCell>,
}

impl Canvas {
    /// Wrap a row-major cell buffer.
    ///
    /// Returns `None` if `cells.len() != width * height`.
    pub fn from_cells(width: u32, height: u32, cells: Vec<OutputCell>) -> Option<Self> {
        if cells.len() != width as usize * height as usize {
            return None;
        }
        Some(Self {
            width,
            height,
            cells,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Cell at column `x`, row `y`.
    pub fn get(&self, x: u32, y: u32) -> Option<&OutputCell> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.cells.get((y * self.width + x) as usize)
    }

    /// Iterate rows from top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[OutputCell]> {
        // chunks(0) panics; an empty canvas has no rows anyway
        self.cells.chunks(self.width.max(1) as usize)
    }

    pub fn cells(&self) -> &[OutputCell] {
        &self.cells
    }
}

impl fmt::Display for Canvas {
    /// Plain text, rows joined by newlines.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, row) in self.rows().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            for cell in row {
                write!(f, "{}", cell.ch)?;
            }
        }
        Ok(())
    }
}
