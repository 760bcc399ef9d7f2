//! RGB to luma conversion using the ITU-R BT.601 weights.

use image::Rgb;

/// BT.601 channel weights: Y = 0.299*R + 0.587*G + 0.114*B
const WEIGHTS: [f32; 3] = [0.299, 0.587, 0.114];

/// Perceptual brightness of a pixel, normalized to [0, 1].
#[inline]
pub fn luma(pixel: &Rgb<u8>) -> f32 {
    let [r, g, b] = pixel.0;
    let y = WEIGHTS[0] * r as f32 + WEIGHTS[1] * g as f32 + WEIGHTS[2] * b as f32;
    (y / 255.0).clamp(0.0, 1.0)
}
