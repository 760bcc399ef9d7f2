//! Brightness and sharpness adjustments.
//!
//! Both take a factor where 1.0 leaves the image untouched.

use image::{imageops, DynamicImage, Rgb32FImage, RgbImage};

/// 3x3 smoothing kernel used as the blurred reference for sharpening.
#[rustfmt::skip]
const SMOOTH_KERNEL: [f32; 9] = [
    1.0, 1.0, 1.0,
    1.0, 5.0, 1.0,
    1.0, 1.0, 1.0,
];
const SMOOTH_WEIGHT: f32 = 13.0;

/// Scale every channel by `factor`, clamping to 0..=255.
///
/// 0.0 produces black; values above 1.0 brighten.
pub fn adjust_brightness(image: &mut RgbImage, factor: f32) {
    if factor == 1.0 {
        return;
    }
    for pixel in image.pixels_mut() {
        for channel in pixel.0.iter_mut() {
            *channel = clamp_channel(*channel as f32 * factor);
        }
    }
}

/// Unsharp-mask style sharpening.
///
/// Blends between a smoothed copy of the image and the original:
/// `out = blurred + factor * (original - blurred)`. 1.0 returns the original,
/// 0.0 the smoothed image, and values above 1.0 amplify the difference, which
/// raises local contrast at edges. Border pixels have no full neighborhood
/// and are left unchanged.
pub fn adjust_sharpness(image: &RgbImage, factor: f32) -> RgbImage {
    if factor == 1.0 {
        return image.clone();
    }
    let blurred = smooth(image);
    let mut out = image.clone();
    for (x, y, pixel) in out.enumerate_pixels_mut() {
        let b = blurred.get_pixel(x, y);
        for c in 0..3 {
            let base = b[c] * 255.0;
            let detail = pixel[c] as f32 - base;
            pixel[c] = clamp_channel(base + factor * detail);
        }
    }
    out
}

/// Smoothed copy of `image` with channels in [0, 1].
///
/// Border pixels have no full neighborhood and keep their original values.
fn smooth(image: &RgbImage) -> Rgb32FImage {
    let source = DynamicImage::ImageRgb8(image.clone()).to_rgb32f();
    let (width, height) = source.dimensions();
    if width < 3 || height < 3 {
        return source;
    }

    let kernel = SMOOTH_KERNEL.map(|k| k / SMOOTH_WEIGHT);
    let mut blurred = imageops::filter3x3(&source, &kernel);
    for (x, y, pixel) in blurred.enumerate_pixels_mut() {
        if x == 0 || y == 0 || x == width - 1 || y == height - 1 {
            *pixel = *source.get_pixel(x, y);
        }
    }
    blurred
}

#[inline]
fn clamp_channel(value: f32) -> u8 {
    value.round().clamp(0.0, 255.0) as u8
}
