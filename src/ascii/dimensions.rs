//! Output grid dimensions with aspect-ratio correction.

use crate::error::{Error, Result};

/// Default row correction factor.
///
/// Terminal characters are typically ~2x taller than wide, so mapping one
/// pixel row to one text row stretches the picture vertically. Keeping half
/// of the rows compensates.
pub const DEFAULT_ROW_RATIO: f32 = 0.5;

/// Requested output grid size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TargetSize {
    /// Use the source image's native width and height.
    #[default]
    Source,
    /// Explicit width and height in characters.
    Exact { width: u32, height: u32 },
}

impl TargetSize {
    /// Resolve against the source dimensions.
    ///
    /// # Errors
    /// Returns [`Error::Validation`] for an explicit zero dimension.
    pub fn resolve(self, source: (u32, u32)) -> Result<(u32, u32)> {
        match self {
            TargetSize::Source => Ok(source),
            TargetSize::Exact { width, height } => {
                if width == 0 || height == 0 {
                    return Err(Error::validation(format!(
                        "output size must be positive, got {}x{}",
                        width, height
                    )));
                }
                Ok((width, height))
            }
        }
    }
}

/// Calculate the final grid dimensions for a source image.
///
/// Order of operations: resolve the target size, multiply both dimensions by
/// `scale`, then (with `fix_scaling`) multiply the height by `row_ratio`.
/// Each dimension is rounded and kept at least 1.
///
/// # Arguments
/// * `source` - Width and height of the source image in pixels
/// * `size` - Requested output size
/// * `scale` - Multiplicative factor for both dimensions (must be > 0)
/// * `fix_scaling` - Whether to apply the row correction
/// * `row_ratio` - Height correction factor (must be > 0)
///
/// # Errors
/// Returns [`Error::Validation`] for a non-positive or non-finite `scale` or
/// `row_ratio`, an empty source, or a zero explicit dimension.
///
/// # Example
/// ```
/// use glyphcast::ascii::{calculate_dimensions, TargetSize, DEFAULT_ROW_RATIO};
///
/// let dims = calculate_dimensions((100, 100), TargetSize::Source, 1.0, true, DEFAULT_ROW_RATIO);
/// assert_eq!(dims.unwrap(), (100, 50));
/// ```
pub fn calculate_dimensions(
    source: (u32, u32),
    size: TargetSize,
    scale: f32,
    fix_scaling: bool,
    row_ratio: f32,
) -> Result<(u32, u32)> {
    if source.0 == 0 || source.1 == 0 {
        return Err(Error::validation(format!(
            "source image is empty ({}x{})",
            source.0, source.1
        )));
    }
    if !scale.is_finite() || scale <= 0.0 {
        return Err(Error::validation(format!(
            "scale must be positive, got {}",
            scale
        )));
    }
    if fix_scaling && (!row_ratio.is_finite() || row_ratio <= 0.0) {
        return Err(Error::validation(format!(
            "row ratio must be positive, got {}",
            row_ratio
        )));
    }

    let (width, height) = size.resolve(source)?;

    let width = width as f64 * scale as f64;
    let mut height = height as f64 * scale as f64;
    if fix_scaling {
        height *= row_ratio as f64;
    }

    Ok((to_cells(width), to_cells(height)))
}

fn to_cells(value: f64) -> u32 {
    value.round().clamp(1.0, u32::MAX as f64) as u32
}
