//! Configuration file handling for glyphcast.
//!
//! Loads configuration from `<config dir>/glyphcast/config.toml` or a custom path.
//! Every field is optional; missing values fall back to the built-in defaults.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::ascii::DEFAULT_ROW_RATIO;
use crate::font::DEFAULT_FONT_SIZE;
use crate::source::{FetchOptions, DEFAULT_MAX_BYTES, DEFAULT_MAX_RETRIES, DEFAULT_TIMEOUT};

/// Configuration file structure for glyphcast.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub render: RenderConfig,
    #[serde(default)]
    pub font: FontConfig,
    #[serde(default)]
    pub fetch: FetchConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Raw charset; the built-in ramp when unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub charset: Option<String>,
    pub fix_scaling: bool,
    pub row_ratio: f32,
    pub sort_chars: bool,
    pub colorful: bool,
    pub invert: bool,
    pub stretch: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            charset: None,
            fix_scaling: true,
            row_ratio: DEFAULT_ROW_RATIO,
            sort_chars: false,
            colorful: false,
            invert: false,
            stretch: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FontConfig {
    /// Font file; `monos.ttf` when unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
    pub size: i32,
}

impl Default for FontConfig {
    fn default() -> Self {
        Self {
            path: None,
            size: DEFAULT_FONT_SIZE,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FetchConfig {
    pub timeout_secs: u64,
    pub max_retries: u32,
    pub max_bytes: u64,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout_secs: DEFAULT_TIMEOUT.as_secs(),
            max_retries: DEFAULT_MAX_RETRIES,
            max_bytes: DEFAULT_MAX_BYTES,
        }
    }
}

impl FetchConfig {
    pub fn to_options(&self) -> FetchOptions {
        FetchOptions {
            timeout: Duration::from_secs(self.timeout_secs.max(1)),
            max_retries: self.max_retries,
            max_bytes: self.max_bytes,
            ..FetchOptions::default()
        }
    }
}

impl Config {
    /// Load configuration from a file path.
    /// Returns default config if the file doesn't exist.
    /// Returns an error if the file exists but cannot be parsed.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let path = path.map(PathBuf::from).unwrap_or_else(default_path);

        if path.exists() {
            let content = std::fs::read_to_string(&path).map_err(|e| ConfigError::Io {
                path: path.clone(),
                source: e,
            })?;
            let config: Config = toml::from_str(&content).map_err(|e| ConfigError::Parse {
                path: path.clone(),
                source: e,
            })?;
            log::debug!("Loaded config from {}", path.display());
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    /// Render the effective configuration as TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }
}

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file '{}': {source}", path.display())]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("Failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// Get the default config file path.
pub fn default_path() -> PathBuf {
    dirs::config_dir()
        .map(|d| d.join("glyphcast").join("config.toml"))
        .unwrap_or_else(|| {
            let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(home).join(".config/glyphcast/config.toml")
        })
}

/// Commented template written by `glyphcast config init`.
pub const DEFAULT_CONFIG_TEMPLATE: &str = r#"# glyphcast configuration

[render]
# Characters to draw with (default: built-in 70-level ramp)
# charset = " .:-=+*#%@"
# Halve the rows so output is not stretched vertically
fix_scaling = true
# Height factor used by fix_scaling
row_ratio = 0.5
# Order the charset by measured glyph brightness
sort_chars = false
# 24-bit color output
colorful = false
# Map bright pixels to heavy glyphs (light text on dark terminals)
invert = false
# Spread glyph brightness over the full range before matching
stretch = false

[font]
# Font used to measure glyph brightness (default: monos.ttf)
# path = "/usr/share/fonts/truetype/dejavu/DejaVuSansMono.ttf"
size = 20

[fetch]
# Limits for http(s) image sources
timeout_secs = 30
max_retries = 3
max_bytes = 52428800
"#;
