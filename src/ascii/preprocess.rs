//! Image preprocessing: target grid resolution, resize, enhancement.

use image::RgbImage;

use super::dimensions::{calculate_dimensions, TargetSize, DEFAULT_ROW_RATIO};
use super::downsample::box_resize;
use super::enhance::{adjust_brightness, adjust_sharpness};
use crate::error::{Error, Result};

/// Parameters for [`preprocess`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PreprocessOptions {
    pub size: TargetSize,
    pub scale: f32,
    pub fix_scaling: bool,
    pub row_ratio: f32,
    pub sharpness: f32,
    pub brightness: f32,
}

impl Default for PreprocessOptions {
    fn default() -> Self {
        Self {
            size: TargetSize::Source,
            scale: 1.0,
            fix_scaling: true,
            row_ratio: DEFAULT_ROW_RATIO,
            sharpness: 1.0,
            brightness: 1.0,
        }
    }
}

/// Produce the pixel grid the mapper consumes, one pixel per output cell.
///
/// Steps: compute the corrected grid size, box-resize the source to it, scale
/// brightness, then sharpen.
///
/// # Errors
/// Returns [`Error::Validation`] for invalid sizes or factors (see
/// [`calculate_dimensions`]); `brightness` and `sharpness` must be finite and
/// non-negative.
pub fn preprocess(source: &RgbImage, options: &PreprocessOptions) -> Result<RgbImage> {
    check_factor("brightness", options.brightness)?;
    check_factor("sharpness", options.sharpness)?;

    let (width, height) = calculate_dimensions(
        source.dimensions(),
        options.size,
        options.scale,
        options.fix_scaling,
        options.row_ratio,
    )?;
    log::debug!(
        "Resizing {}x{} source to {}x{} cells",
        source.width(),
        source.height(),
        width,
        height
    );

    let mut pixels = box_resize(source, width, height);
    adjust_brightness(&mut pixels, options.brightness);
    Ok(adjust_sharpness(&pixels, options.sharpness))
}

fn check_factor(name: &str, value: f32) -> Result<()> {
    if !value.is_finite() || value < 0.0 {
        return Err(Error::validation(format!(
            "{} must be a non-negative number, got {}",
            name, value
        )));
    }
    Ok(())
}
