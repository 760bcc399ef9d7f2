//! Glyph brightness profiling.
//!
//! A glyph's brightness score is its ink coverage: the mean coverage of the
//! glyph drawn into the font's nominal character cell, normalized to [0, 1].

/// Coverage bitmap of a single rasterized glyph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GlyphBitmap {
    /// Bitmap width in pixels
    pub width: u32,
    /// Bitmap height in pixels
    pub height: u32,
    /// Horizontal offset of the bitmap's left edge inside the cell
    pub left: i32,
    /// Vertical offset of the bitmap's top edge inside the cell
    pub top: i32,
    /// Row-major coverage, 0 (background) to 255 (full ink)
    pub coverage: Vec<u8>,
}

/// A glyph-rendering capability bound to one font at one size.
pub trait GlyphRaster {
    /// Nominal character cell `(width, height)` in pixels.
    fn cell_size(&self) -> (u32, u32);

    /// Rasterize `ch`, or `None` if the font has no glyph for it.
    fn rasterize(&self, ch: char) -> Option<GlyphBitmap>;
}

/// Compute the ink coverage of `ch` in [0, 1].
///
/// Whitespace scores exactly 0 without touching the rasterizer. Characters
/// the font cannot render also score 0; this never fails the conversion.
pub fn profile<G: GlyphRaster + ?Sized>(ch: char, glyphs: &G) -> f32 {
    if ch.is_whitespace() {
        return 0.0;
    }

    let (cell_w, cell_h) = glyphs.cell_size();
    if cell_w == 0 || cell_h == 0 {
        return 0.0;
    }

    let Some(glyph) = glyphs.rasterize(ch) else {
        log::debug!("No glyph for {:?}, scoring as 0", ch);
        return 0.0;
    };

    let area = u64::from(cell_w) * u64::from(cell_h);
    let ink = clipped_ink(cell_w, cell_h, &glyph);
    let score = ink as f64 / (area as f64 * 255.0);
    score.clamp(0.0, 1.0) as f32
}

/// Sum of the glyph coverage that lands inside the cell.
///
/// Each bitmap pixel maps to a distinct cell pixel, so no cell buffer is
/// needed.
fn clipped_ink(cell_w: u32, cell_h: u32, glyph: &GlyphBitmap) -> u64 {
    let (cell_w, cell_h) = (i64::from(cell_w), i64::from(cell_h));
    let mut ink = 0u64;
    for gy in 0..glyph.height {
        let cy = i64::from(glyph.top) + i64::from(gy);
        if cy < 0 || cy >= cell_h {
            continue;
        }
        let row = gy as usize * glyph.width as usize;
        for gx in 0..glyph.width {
            let cx = i64::from(glyph.left) + i64::from(gx);
            if cx < 0 || cx >= cell_w {
                continue;
            }
            if let Some(&value) = glyph.coverage.get(row + gx as usize) {
                ink += u64::from(value);
            }
        }
    }
    ink
}
