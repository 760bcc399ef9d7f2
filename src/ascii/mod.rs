//! Image to ASCII art conversion pipeline.
//!
//! The pipeline turns a decoded RGB image into text:
//!
//! 1. **Glyph profiling** - ink coverage of each charset character, measured
//!    with a [`GlyphRaster`]
//! 2. **Charset preparation** - dedup, profile, optional sort by brightness
//! 3. **Preprocessing** - target grid size with row correction, box resize,
//!    brightness and sharpness
//! 4. **Mapping** - per-pixel luma to the closest-brightness character
//! 5. **Rendering** - plain or 24-bit colored text
//!
//! Nothing here performs I/O; see [`crate::source`] and [`crate::font`] for
//! loading inputs.

mod canvas;
mod charset;
mod dimensions;
mod downsample;
mod enhance;
mod grayscale;
mod mapping;
mod preprocess;
mod profile;
mod render;

use image::RgbImage;

pub use canvas::{Canvas, OutputCell};
pub use charset::{
    Charset, CharsetEntry, CharsetPreset, BLOCKS_CHARSET, DEFAULT_CHARSET, MINIMAL_CHARSET,
    STANDARD_CHARSET,
};
pub use dimensions::{calculate_dimensions, TargetSize, DEFAULT_ROW_RATIO};
pub use downsample::box_resize;
pub use enhance::{adjust_brightness, adjust_sharpness};
pub use grayscale::luma;
pub use mapping::{map, MapOptions};
pub use preprocess::{preprocess, PreprocessOptions};
pub use profile::{profile, GlyphBitmap, GlyphRaster};
pub use render::{render, RenderStyle};

use crate::error::Result;

/// All parameters of a single conversion.
#[derive(Debug, Clone, PartialEq)]
pub struct ConvertOptions {
    /// Output grid size before scaling and row correction
    pub size: TargetSize,
    /// Raw charset; deduplicated during preparation
    pub charset: String,
    /// Compensate for character cells being taller than wide
    pub fix_scaling: bool,
    /// Height factor applied when `fix_scaling` is set
    pub row_ratio: f32,
    pub scale: f32,
    pub sharpness: f32,
    pub brightness: f32,
    /// Order the charset by measured brightness
    pub sort_chars: bool,
    /// Emit 24-bit color escapes
    pub colorful: bool,
    pub invert: bool,
    pub stretch: bool,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            size: TargetSize::Source,
            charset: DEFAULT_CHARSET.to_string(),
            fix_scaling: true,
            row_ratio: DEFAULT_ROW_RATIO,
            scale: 1.0,
            sharpness: 1.0,
            brightness: 1.0,
            sort_chars: false,
            colorful: false,
            invert: false,
            stretch: false,
        }
    }
}

impl ConvertOptions {
    pub fn preprocess_options(&self) -> PreprocessOptions {
        PreprocessOptions {
            size: self.size,
            scale: self.scale,
            fix_scaling: self.fix_scaling,
            row_ratio: self.row_ratio,
            sharpness: self.sharpness,
            brightness: self.brightness,
        }
    }

    pub fn map_options(&self) -> MapOptions {
        MapOptions {
            invert: self.invert,
            stretch: self.stretch,
        }
    }

    pub fn render_style(&self) -> RenderStyle {
        RenderStyle::from_colorful(self.colorful)
    }
}

/// Run the pipeline up to the character grid.
///
/// # Errors
/// [`crate::Error::Configuration`] for an empty charset and
/// [`crate::Error::Validation`] for out-of-range parameters. Nothing is
/// returned on failure.
pub fn convert_to_canvas<G>(image: &RgbImage, glyphs: &G, options: &ConvertOptions) -> Result<Canvas>
where
    G: GlyphRaster + Sync + ?Sized,
{
    let charset = Charset::prepare(&options.charset, glyphs, options.sort_chars)?;
    let pixels = preprocess(image, &options.preprocess_options())?;
    let canvas = map(&pixels, &charset, &options.map_options());
    log::debug!(
        "Mapped {}x{} canvas with {} characters",
        canvas.width(),
        canvas.height(),
        charset.len()
    );
    Ok(canvas)
}

/// Convert an image to ASCII art text.
///
/// # Example
/// ```
/// use glyphcast::ascii::{convert, ConvertOptions, GlyphBitmap, GlyphRaster};
/// use image::{Rgb, RgbImage};
///
/// /// Every non-space glyph fills its whole cell.
/// struct Solid;
///
/// impl GlyphRaster for Solid {
///     fn cell_size(&self) -> (u32, u32) {
///         (1, 1)
///     }
///
///     fn rasterize(&self, _ch: char) -> Option<GlyphBitmap> {
///         Some(GlyphBitmap { width: 1, height: 1, left: 0, top: 0, coverage: vec![255] })
///     }
/// }
///
/// let image = RgbImage::from_pixel(2, 2, Rgb([0, 0, 0]));
/// let options = ConvertOptions {
///     charset: " #".to_string(),
///     sort_chars: true,
///     fix_scaling: false,
///     ..ConvertOptions::default()
/// };
/// assert_eq!(convert(&image, &Solid, &options).unwrap(), "##\n##");
/// ```
pub fn convert<G>(image: &RgbImage, glyphs: &G, options: &ConvertOptions) -> Result<String>
where
    G: GlyphRaster + Sync + ?Sized,
{
    let canvas = convert_to_canvas(image, glyphs, options)?;
    Ok(render(&canvas, options.render_style()))
}
