//! CLI argument parsing with clap.

use clap::{Args as ClapArgs, Parser, Subcommand};
use std::path::PathBuf;

use super::enums::CharacterSet;
use crate::ascii::{self, ConvertOptions, TargetSize, DEFAULT_CHARSET};
use crate::config::Config;
use crate::font::DEFAULT_FONT;

/// Parse an output size given as WIDTHxHEIGHT.
///
/// Zero is accepted here and rejected later with a validation error, so the
/// message matches the one library callers get.
fn parse_size(s: &str) -> Result<(u32, u32), String> {
    let parts: Vec<&str> = s.split(['x', 'X']).collect();
    if parts.len() != 2 {
        return Err(format!(
            "Invalid size format '{}'. Use WIDTHxHEIGHT (e.g., 80x40)",
            s
        ));
    }
    let width: u32 = parts[0]
        .trim()
        .parse()
        .map_err(|_| format!("Invalid width '{}' in size", parts[0]))?;
    let height: u32 = parts[1]
        .trim()
        .parse()
        .map_err(|_| format!("Invalid height '{}' in size", parts[1]))?;
    Ok((width, height))
}

/// Resolve a `--flag/--no-flag` pair: `None` when neither was given.
fn flag(yes: bool, no: bool) -> Option<bool> {
    match (yes, no) {
        (true, _) => Some(true),
        (_, true) => Some(false),
        _ => None,
    }
}

/// Convert images to ASCII art
#[derive(Parser, Debug)]
#[command(name = "glyphcast")]
#[command(version, about = "Convert images to ASCII art", long_about = None)]
#[command(after_help = "EXAMPLES:
    # Render a local image at 100 columns, 50 rows (after row correction)
    glyphcast -i cat.png -s 100x100

    # Colored output from a URL, charset sorted by measured brightness
    glyphcast -i https://example.com/cat.jpg --colorful --sort-chars

    # Read from stdin with a custom charset and font
    cat cat.png | glyphcast -i - -c ' .:#' --font-str DejaVuSansMono.ttf")]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Image to convert: a file path, an http(s) URL, - for stdin, or clip for the clipboard
    #[arg(short, long, value_name = "SRC")]
    pub image_path: Option<String>,

    /// Output size before scaling (default: the image's own size)
    #[arg(short, long, value_name = "WxH", value_parser = parse_size)]
    pub size: Option<(u32, u32)>,

    #[command(flatten)]
    pub glyphs: GlyphArgs,

    /// Halve the rows so characters taller than wide do not stretch the image
    #[arg(long, overrides_with = "no_fix_scaling")]
    pub fix_scaling: bool,

    /// Map one pixel row to one text row
    #[arg(long, overrides_with = "fix_scaling")]
    pub no_fix_scaling: bool,

    /// Height factor used by --fix-scaling (default 0.5)
    #[arg(long, value_name = "RATIO", allow_negative_numbers = true)]
    pub row_ratio: Option<f32>,

    /// Scaling factor for the output size
    #[arg(long, default_value_t = 1.0, allow_negative_numbers = true)]
    pub scale: f32,

    /// Sharpness factor (1.0 = unchanged, >1 enhances edges)
    #[arg(long, default_value_t = 1.0, allow_negative_numbers = true)]
    pub sharpness: f32,

    /// Brightness factor (1.0 = unchanged)
    #[arg(long, default_value_t = 1.0, allow_negative_numbers = true)]
    pub brightness: f32,

    /// Color each character with its pixel's color
    #[arg(long, overrides_with = "no_colorful")]
    pub colorful: bool,

    /// Plain characters only
    #[arg(long, overrides_with = "colorful")]
    pub no_colorful: bool,

    /// Map bright pixels to heavy characters (for dark terminals)
    #[arg(long, overrides_with = "no_invert")]
    pub invert: bool,

    /// Map dark pixels to heavy characters
    #[arg(long, overrides_with = "invert")]
    pub no_invert: bool,

    /// Spread glyph brightness over the full range before matching
    #[arg(long, overrides_with = "no_stretch")]
    pub stretch: bool,

    /// Match against raw glyph brightness
    #[arg(long, overrides_with = "stretch")]
    pub no_stretch: bool,

    /// Write the result to a file instead of stdout
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Config file path
    #[arg(long, value_name = "FILE", global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// Options that select the charset and the font used to measure it.
#[derive(ClapArgs, Debug, Clone, Default)]
pub struct GlyphArgs {
    /// Characters to use for the ASCII art
    #[arg(short, long, value_name = "CHARS", allow_hyphen_values = true)]
    pub charset: Option<String>,

    /// Built-in charset (ignored when --charset is given)
    #[arg(long, value_enum)]
    pub preset: Option<CharacterSet>,

    /// Sort the charset by measured character brightness
    #[arg(long, overrides_with = "no_sort_chars")]
    pub sort_chars: bool,

    /// Keep the charset in the given order
    #[arg(long, overrides_with = "sort_chars")]
    pub no_sort_chars: bool,

    /// Font file used to measure character brightness (default: monos.ttf)
    #[arg(long, value_name = "FONT")]
    pub font_str: Option<PathBuf>,

    /// Font size used to measure character brightness (default: 20)
    #[arg(long, allow_negative_numbers = true)]
    pub font_size: Option<i32>,
}

impl GlyphArgs {
    /// Charset from the command line, then preset, then config, then default.
    pub fn charset(&self, config: &Config) -> String {
        if let Some(chars) = &self.charset {
            return chars.clone();
        }
        if let Some(preset) = self.preset {
            return ascii::CharsetPreset::from(preset).chars().to_string();
        }
        config
            .render
            .charset
            .clone()
            .unwrap_or_else(|| DEFAULT_CHARSET.to_string())
    }

    pub fn sort_chars(&self, config: &Config) -> bool {
        flag(self.sort_chars, self.no_sort_chars).unwrap_or(config.render.sort_chars)
    }

    pub fn font_path(&self, config: &Config) -> PathBuf {
        self.font_str
            .clone()
            .or_else(|| config.font.path.clone())
            .unwrap_or_else(|| PathBuf::from(DEFAULT_FONT))
    }

    /// Requested font size; non-positive values are corrected at load time.
    pub fn font_size(&self, config: &Config) -> i32 {
        self.font_size.unwrap_or(config.font.size)
    }
}

impl Args {
    /// Merge command-line values over the config file.
    pub fn convert_options(&self, config: &Config) -> ConvertOptions {
        let render = &config.render;
        ConvertOptions {
            size: match self.size {
                Some((width, height)) => TargetSize::Exact { width, height },
                None => TargetSize::Source,
            },
            charset: self.glyphs.charset(config),
            fix_scaling: flag(self.fix_scaling, self.no_fix_scaling).unwrap_or(render.fix_scaling),
            row_ratio: self.row_ratio.unwrap_or(render.row_ratio),
            scale: self.scale,
            sharpness: self.sharpness,
            brightness: self.brightness,
            sort_chars: self.glyphs.sort_chars(config),
            colorful: flag(self.colorful, self.no_colorful).unwrap_or(render.colorful),
            invert: flag(self.invert, self.no_invert).unwrap_or(render.invert),
            stretch: flag(self.stretch, self.no_stretch).unwrap_or(render.stretch),
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Show the prepared charset with each character's measured brightness
    Charset {
        #[command(flatten)]
        glyphs: GlyphArgs,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Debug, Clone)]
pub enum ConfigAction {
    /// Show current configuration
    Show,
    /// Create default config file
    Init,
}
