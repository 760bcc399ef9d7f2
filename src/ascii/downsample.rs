//! Box (area-average) resizing of RGB pixel buffers.

use image::{Rgb, RgbImage};

/// Resize an image by averaging every source pixel in each destination cell.
///
/// Each destination cell covers a `src_w / dst_w` by `src_h / dst_h` block of
/// the source and takes the mean of all pixels inside it, which avoids the
/// aliasing nearest-neighbor sampling produces when shrinking. When enlarging,
/// a cell covers at least one source pixel, so pixels are replicated.
///
/// # Arguments
/// * `src` - Source image
/// * `width` - Destination width in pixels
/// * `height` - Destination height in pixels
///
/// # Returns
/// A new image of exactly `width` x `height`. Empty if either dimension (or
/// the source) is empty.
///
/// # Example
/// ```
/// use glyphcast::ascii::box_resize;
/// use image::{Rgb, RgbImage};
///
/// let src = RgbImage::from_pixel(640, 480, Rgb([10, 20, 30]));
/// let small = box_resize(&src, 40, 20);
/// assert_eq!(small.dimensions(), (40, 20));
/// assert_eq!(small.get_pixel(0, 0), &Rgb([10, 20, 30]));
/// ```
pub fn box_resize(src: &RgbImage, width: u32, height: u32) -> RgbImage {
    let (src_w, src_h) = src.dimensions();

    if width == 0 || height == 0 || src_w == 0 || src_h == 0 {
        return RgbImage::new(width, height);
    }
    if (width, height) == (src_w, src_h) {
        return src.clone();
    }

    // Size of each cell in source pixels (floats for accurate mapping)
    let cell_w = src_w as f64 / width as f64;
    let cell_h = src_h as f64 / height as f64;

    let x_spans: Vec<(u32, u32)> = (0..width).map(|x| span(x, cell_w, src_w)).collect();

    let mut out = RgbImage::new(width, height);
    for y in 0..height {
        let (start_y, end_y) = span(y, cell_h, src_h);
        for (x, &(start_x, end_x)) in x_spans.iter().enumerate() {
            let mut sum = [0u64; 3];
            let mut count = 0u64;

            for py in start_y..end_y {
                for px in start_x..end_x {
                    let p = src.get_pixel(px, py);
                    sum[0] += p[0] as u64;
                    sum[1] += p[1] as u64;
                    sum[2] += p[2] as u64;
                    count += 1;
                }
            }

            // Spans are never empty, so count >= 1
            let avg = |s: u64| ((s + count / 2) / count) as u8;
            out.put_pixel(x as u32, y, Rgb([avg(sum[0]), avg(sum[1]), avg(sum[2])]));
        }
    }

    out
}

/// Source pixel range `[start, end)` covered by destination index `i`.
fn span(i: u32, cell: f64, limit: u32) -> (u32, u32) {
    let start = ((i as f64 * cell) as u32).min(limit - 1);
    let end = (((i + 1) as f64 * cell) as u32).clamp(start + 1, limit);
    (start, end)
}
