//! Character set definitions and brightness-annotated charset preparation.

use rayon::prelude::*;

use super::profile::{profile, GlyphRaster};
use crate::error::{Error, Result};

/// Default conversion characters, a 70-level ramp from light to heavy.
pub const DEFAULT_CHARSET: &str =
    " .'`^\",:;Il!i><~+_-?][}{1)(|\\/tfjrxnuvczXYUJCLQ0OZmwqpdbkhao*#MW&8%B@$";

/// Standard ASCII density ramp (10 levels).
pub const STANDARD_CHARSET: &str = " .:-=+*#%@";

/// Unicode block characters (5 levels).
pub const BLOCKS_CHARSET: &str = " ░▒▓█";

/// Minimal character set (4 levels) for a clean look.
pub const MINIMAL_CHARSET: &str = " .:#";

/// Named built-in character sets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CharsetPreset {
    /// 70-level ramp
    #[default]
    Default,
    /// 10-level ASCII ramp
    Standard,
    /// Unicode blocks
    Blocks,
    /// 4-level ramp
    Minimal,
}

impl CharsetPreset {
    /// Get the raw characters of this preset.
    pub fn chars(&self) -> &'static str {
        match self {
            CharsetPreset::Default => DEFAULT_CHARSET,
            CharsetPreset::Standard => STANDARD_CHARSET,
            CharsetPreset::Blocks => BLOCKS_CHARSET,
            CharsetPreset::Minimal => MINIMAL_CHARSET,
        }
    }

    /// Get a human-readable name for the preset.
    pub fn name(&self) -> &'static str {
        match self {
            CharsetPreset::Default => "default",
            CharsetPreset::Standard => "standard",
            CharsetPreset::Blocks => "blocks",
            CharsetPreset::Minimal => "minimal",
        }
    }
}

/// One output character and its ink coverage.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CharsetEntry {
    pub ch: char,
    /// Ink coverage in [0, 1]; 0 means no ink
    pub brightness: f32,
}

/// Ordered, deduplicated output characters annotated with brightness.
///
/// Never empty. When `is_sorted()` is true, entries are non-decreasing by
/// brightness.
#[derive(Debug, Clone, PartialEq)]
pub struct Charset {
    entries: Vec<CharsetEntry>,
    sorted: bool,
}

impl Charset {
    /// Build a charset from raw characters.
    ///
    /// Duplicates are removed keeping the first occurrence, and control
    /// characters are dropped since they would break the output grid. Each
    /// remaining character is profiled exactly once. With `sort`, entries
    /// are stably ordered by ascending brightness.
    ///
    /// # Errors
    /// Returns [`Error::Configuration`] if no usable character remains, or
    /// only whitespace does.
    pub fn prepare<G>(raw: &str, glyphs: &G, sort: bool) -> Result<Self>
    where
        G: GlyphRaster + Sync + ?Sized,
    {
        let chars = dedup_chars(raw);
        if chars.iter().all(|ch| ch.is_whitespace()) {
            return Err(Error::Configuration(format!(
                "no usable characters in {:?}",
                raw
            )));
        }

        let mut entries: Vec<CharsetEntry> = chars
            .par_iter()
            .map(|&ch| CharsetEntry {
                ch,
                brightness: profile(ch, glyphs),
            })
            .collect();

        if sort {
            // Vec::sort_by is stable, so ties keep their caller order
            entries.sort_by(|a, b| a.brightness.total_cmp(&b.brightness));
        }

        for entry in &entries {
            log::debug!("glyph {:?} brightness {:.4}", entry.ch, entry.brightness);
        }

        Ok(Self {
            entries,
            sorted: sort,
        })
    }

    /// Build a charset from explicit scores, skipping the profiler.
    ///
    /// Scores are clamped to [0, 1]. Duplicate characters keep their first
    /// occurrence.
    ///
    /// # Errors
    /// Returns [`Error::Configuration`] if `entries` is empty.
    pub fn from_scores<I>(entries: I, sort: bool) -> Result<Self>
    where
        I: IntoIterator<Item = (char, f32)>,
    {
        let mut seen = Vec::new();
        let mut out: Vec<CharsetEntry> = Vec::new();
        for (ch, brightness) in entries {
            if seen.contains(&ch) {
                continue;
            }
            seen.push(ch);
            out.push(CharsetEntry {
                ch,
                brightness: brightness.clamp(0.0, 1.0),
            });
        }
        if out.is_empty() {
            return Err(Error::Configuration("charset is empty".to_string()));
        }
        if sort {
            out.sort_by(|a, b| a.brightness.total_cmp(&b.brightness));
        }
        Ok(Self {
            entries: out,
            sorted: sort,
        })
    }

    /// Entries in mapping order.
    pub fn entries(&self) -> &[CharsetEntry] {
        &self.entries
    }

    /// Characters in mapping order.
    pub fn chars(&self) -> impl Iterator<Item = char> + '_ {
        self.entries.iter().map(|e| e.ch)
    }

    /// Number of distinct characters (always at least 1).
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always false; kept for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Whether entries are ordered by ascending brightness.
    pub fn is_sorted(&self) -> bool {
        self.sorted
    }
}

/// Unique characters in first-occurrence order, without control characters.
fn dedup_chars(raw: &str) -> Vec<char> {
    let mut out: Vec<char> = Vec::new();
    for ch in raw.chars() {
        if ch.is_control() || out.contains(&ch) {
            continue;
        }
        out.push(ch);
    }
    out
}
