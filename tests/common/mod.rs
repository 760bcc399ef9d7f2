//! Shared fixtures for integration tests.

#![allow(dead_code)]

use glyphcast::ascii::{GlyphBitmap, GlyphRaster};
use image::{Rgb, RgbImage};

/// Ten-level ramp: the character at index `i` inks `i` of 10 cell pixels.
pub const RAMP: &str = " .:-=+*#%@";

/// Deterministic stand-in for a font.
///
/// The cell is 10x1 pixels. Characters in [`RAMP`] ink as many pixels as
/// their index, so their brightness is `index / 10`. Anything else has no
/// glyph.
pub struct StubRaster;

impl GlyphRaster for StubRaster {
    fn cell_size(&self) -> (u32, u32) {
        (10, 1)
    }

    fn rasterize(&self, ch: char) -> Option<GlyphBitmap> {
        let ink = RAMP.chars().position(|c| c == ch)? as u32;
        Some(GlyphBitmap {
            width: ink,
            height: 1,
            left: 0,
            top: 0,
            coverage: vec![255; ink as usize],
        })
    }
}

/// Horizontal gray gradient from black on the left to white on the right.
pub fn gradient(width: u32, height: u32) -> RgbImage {
    RgbImage::from_fn(width, height, |x, _| {
        let v = if width > 1 {
            (x * 255 / (width - 1)) as u8
        } else {
            0
        };
        Rgb([v, v, v])
    })
}

/// Strip 24-bit color escapes, leaving the characters and newlines.
pub fn strip_ansi(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars();
    while let Some(c) = chars.next() {
        if c == '\x1b' {
            for e in chars.by_ref() {
                if e == 'm' {
                    break;
                }
            }
        } else {
            out.push(c);
        }
    }
    out
}
