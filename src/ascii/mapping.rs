//! Pixel to character mapping.
//!
//! Every pixel becomes one cell: its luma is turned into a target ink
//! coverage and the charset entry with the closest brightness wins.

use image::RgbImage;
use rayon::prelude::*;

use super::canvas::{Canvas, OutputCell};
use super::charset::Charset;
use super::grayscale::luma;

/// Options for [`map`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MapOptions {
    /// Map bright pixels to heavy glyphs (light text on a dark terminal).
    /// By default dark pixels get the heavy glyphs, as ink on paper.
    pub invert: bool,
    /// Rescale charset brightness to span [0, 1] before matching, so the
    /// lightest and heaviest glyphs land on pure white and pure black.
    /// Off by default: the raw closest score wins.
    pub stretch: bool,
}

impl Default for MapOptions {
    fn default() -> Self {
        Self {
            invert: false,
            stretch: false,
        }
    }
}

/// Map each pixel to its closest-brightness character.
///
/// Ties go to the earlier charset entry. Sorted charsets use a binary
/// search; unsorted ones a linear scan. Rows are processed in parallel, each
/// worker writing only its own row.
pub fn map(pixels: &RgbImage, charset: &Charset, options: &MapOptions) -> Canvas {
    let (width, height) = pixels.dimensions();
    let levels = Levels::new(charset, options.stretch);

    let mut cells = vec![OutputCell::default(); width as usize * height as usize];
    if width > 0 {
        cells
            .par_chunks_mut(width as usize)
            .enumerate()
            .for_each(|(y, row)| {
                for (x, cell) in row.iter_mut().enumerate() {
                    let color = *pixels.get_pixel(x as u32, y as u32);
                    let brightness = luma(&color);
                    let target = if options.invert {
                        brightness
                    } else {
                        1.0 - brightness
                    };
                    *cell = OutputCell {
                        ch: levels.nearest(target),
                        color,
                    };
                }
            });
    }

    Canvas {
        width,
        height,
        cells,
    }
}

/// Matching table derived from a charset.
struct Levels {
    chars: Vec<char>,
    scores: Vec<f32>,
    sorted: bool,
}

impl Levels {
    fn new(charset: &Charset, stretch: bool) -> Self {
        let chars = charset.chars().collect();
        let mut scores: Vec<f32> = charset.entries().iter().map(|e| e.brightness).collect();

        if stretch {
            let min = scores.iter().copied().fold(f32::INFINITY, f32::min);
            let max = scores.iter().copied().fold(f32::NEG_INFINITY, f32::max);
            if max - min > f32::EPSILON {
                for s in &mut scores {
                    *s = (*s - min) / (max - min);
                }
            }
        }

        Self {
            chars,
            scores,
            sorted: charset.is_sorted(),
        }
    }

    fn nearest(&self, target: f32) -> char {
        let idx = if self.sorted {
            nearest_sorted(&self.scores, target)
        } else {
            nearest_linear(&self.scores, target)
        };
        self.chars[idx]
    }
}

/// Index of the closest score in an ascending slice, earliest on ties.
fn nearest_sorted(scores: &[f32], target: f32) -> usize {
    let above = scores.partition_point(|&s| s < target);
    if above == 0 {
        return 0;
    }
    let below = above - 1;
    let pick = if above == scores.len() || target - scores[below] <= scores[above] - target {
        scores[below]
    } else {
        scores[above]
    };
    // First entry holding the chosen score
    scores.partition_point(|&s| s < pick)
}

/// Index of the closest score in any order, earliest on ties.
fn nearest_linear(scores: &[f32], target: f32) -> usize {
    let mut best = 0;
    let mut best_dist = f32::INFINITY;
    for (i, &s) in scores.iter().enumerate() {
        let dist = (s - target).abs();
        if dist < best_dist {
            best = i;
            best_dist = dist;
        }
    }
    best
}
