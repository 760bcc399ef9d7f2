//! Font loading and glyph rasterization backed by fontdue.

use std::path::{Path, PathBuf};

use fontdue::{Font, FontSettings};

use crate::ascii::{GlyphBitmap, GlyphRaster};
use crate::error::{Error, Result};

/// Font used when none is given.
pub const DEFAULT_FONT: &str = "monos.ttf";

/// Pixel size used when none (or a non-positive one) is given.
pub const DEFAULT_FONT_SIZE: i32 = 20;

/// Reference glyph for the cell width of monospaced fonts.
const CELL_REFERENCE: char = 'M';

/// Clamp a requested font size to something renderable.
///
/// Non-positive sizes fall back to [`DEFAULT_FONT_SIZE`] with a warning.
pub fn effective_size(size: i32) -> i32 {
    if size <= 0 {
        log::warn!(
            "Font size {} is not positive, using {}",
            size,
            DEFAULT_FONT_SIZE
        );
        DEFAULT_FONT_SIZE
    } else {
        size
    }
}

/// Locate a font file.
///
/// A path that exists is used as-is. A bare file name that does not exist in
/// the working directory is looked up in the user's font directory.
pub fn resolve_font_path(path: &Path) -> Option<PathBuf> {
    if path.exists() {
        return Some(path.to_path_buf());
    }
    let is_bare_name = path.parent().map_or(true, |p| p.as_os_str().is_empty());
    if !is_bare_name {
        return None;
    }
    dirs::font_dir()
        .map(|dir| dir.join(path))
        .filter(|candidate| candidate.exists())
}

/// A parsed font at a fixed pixel size.
pub struct FontFace {
    font: Font,
    px: f32,
    cell: (u32, u32),
    baseline: i32,
}

impl std::fmt::Debug for FontFace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FontFace")
            .field("px", &self.px)
            .field("cell", &self.cell)
            .finish()
    }
}

impl FontFace {
    /// Load a font file at `size` pixels.
    ///
    /// # Errors
    /// Returns [`Error::FontLoad`] if the file cannot be found, read, or
    /// parsed.
    pub fn load(path: &Path, size: i32) -> Result<Self> {
        let resolved =
            resolve_font_path(path).ok_or_else(|| Error::font_load(path, "file not found"))?;
        let bytes = std::fs::read(&resolved).map_err(|e| Error::font_load(&resolved, e))?;
        log::debug!("Loaded font {} ({} bytes)", resolved.display(), bytes.len());
        Self::from_bytes(bytes, size).map_err(|reason| Error::font_load(&resolved, reason))
    }

    /// Parse an in-memory font at `size` pixels.
    pub fn from_bytes(bytes: Vec<u8>, size: i32) -> std::result::Result<Self, String> {
        let px = effective_size(size) as f32;
        let settings = FontSettings {
            scale: px,
            ..FontSettings::default()
        };
        let font = Font::from_bytes(bytes, settings).map_err(|e| e.to_string())?;

        let (cell_h, baseline) = match font.horizontal_line_metrics(px) {
            Some(line) => (
                (line.ascent - line.descent).ceil().max(1.0) as u32,
                line.ascent.round() as i32,
            ),
            None => (px.ceil() as u32, (px * 0.8).round() as i32),
        };
        let advance = font.metrics(CELL_REFERENCE, px).advance_width;
        let cell_w = if advance > 0.0 {
            advance.ceil() as u32
        } else {
            (px / 2.0).ceil().max(1.0) as u32
        };

        Ok(Self {
            font,
            px,
            cell: (cell_w, cell_h),
            baseline,
        })
    }

    /// Pixel size the font was loaded at.
    pub fn px(&self) -> f32 {
        self.px
    }
}

impl GlyphRaster for FontFace {
    fn cell_size(&self) -> (u32, u32) {
        self.cell
    }

    fn rasterize(&self, ch: char) -> Option<GlyphBitmap> {
        if self.font.lookup_glyph_index(ch) == 0 {
            return None;
        }
        let (metrics, coverage) = self.font.rasterize(ch, self.px);
        Some(GlyphBitmap {
            width: metrics.width as u32,
            height: metrics.height as u32,
            left: metrics.xmin,
            // fontdue's ymin is the bitmap's bottom edge relative to the baseline
            top: self.baseline - (metrics.height as i32 + metrics.ymin),
            coverage,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    /// A system monospace font, when one is installed.
    fn system_font() -> Option<PathBuf> {
        [
            "/usr/share/fonts/truetype/dejavu/DejaVuSansMono.ttf",
            "/usr/share/fonts/TTF/DejaVuSansMono.ttf",
            "/Library/Fonts/Courier New.ttf",
            "/System/Library/Fonts/Supplemental/Courier New.ttf",
        ]
        .iter()
        .map(PathBuf::from)
        .find(|p| p.exists())
    }

    #[test]
    fn test_effective_size() {
        assert_eq!(effective_size(12), 12);
        assert_eq!(effective_size(0), DEFAULT_FONT_SIZE);
        assert_eq!(effective_size(-5), DEFAULT_FONT_SIZE);
    }

    #[test]
    fn test_missing_font_is_font_load_error() {
        let result = FontFace::load(Path::new("/nonexistent/dir/font.ttf"), 20);
        assert!(matches!(result, Err(Error::FontLoad { .. })));
    }

    #[test]
    fn test_missing_nested_path_is_not_searched() {
        assert!(resolve_font_path(Path::new("no/such/font.ttf")).is_none());
    }

    #[test]
    fn test_garbage_font_is_font_load_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"definitely not a font").unwrap();
        let result = FontFace::load(file.path(), 20);
        match result {
            Err(Error::FontLoad { path, .. }) => assert_eq!(path, file.path()),
            other => panic!("expected FontLoad, got {:?}", other),
        }
    }

    #[test]
    fn test_system_font_profiles() {
        let Some(path) = system_font() else {
            eprintln!("No system monospace font found, skipping");
            return;
        };
        let face = FontFace::load(&path, 20).unwrap();
        let (w, h) = face.cell_size();
        assert!(w > 0 && h > w, "cell {}x{} should be taller than wide", w, h);

        let space = crate::ascii::profile(' ', &face);
        let dot = crate::ascii::profile('.', &face);
        let at = crate::ascii::profile('@', &face);
        assert_eq!(space, 0.0);
        assert!(dot > 0.0 && dot < at, "'.'={} '@'={}", dot, at);
        assert!(at <= 1.0);
    }
}
