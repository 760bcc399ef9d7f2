//! Source image acquisition: local files, URLs, stdin and the clipboard.

mod fetch;
mod retry;

use std::fmt;
use std::io::Read;
use std::path::PathBuf;

use image::{DynamicImage, ImageReader, RgbImage, RgbaImage};

pub use fetch::{
    FetchError, FetchOptions, Fetcher, DEFAULT_CONNECT_TIMEOUT, DEFAULT_MAX_BYTES,
    DEFAULT_TIMEOUT,
};
pub use retry::{
    calculate_backoff, is_transient_status, DEFAULT_BACKOFF_BASE, DEFAULT_BACKOFF_MAX,
    DEFAULT_MAX_RETRIES,
};

use crate::error::{Error, Result};

/// Marker that selects stdin as the image source.
pub const STDIN_MARKER: &str = "-";

/// Markers that select the system clipboard as the image source.
pub const CLIPBOARD_MARKERS: [&str; 2] = ["clip", "clipboard"];

/// Where to read the source image from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageSource {
    Path(PathBuf),
    Url(String),
    Stdin,
    Clipboard,
}

impl ImageSource {
    /// Classify a user-supplied source string.
    ///
    /// `-` is stdin, `clip` or `clipboard` is the clipboard, `http://` and
    /// `https://` prefixes are URLs, and anything else is a file path.
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed == STDIN_MARKER {
            return ImageSource::Stdin;
        }
        let lower = trimmed.to_ascii_lowercase();
        if CLIPBOARD_MARKERS.contains(&lower.as_str()) {
            return ImageSource::Clipboard;
        }
        if lower.starts_with("http://") || lower.starts_with("https://") {
            return ImageSource::Url(trimmed.to_string());
        }
        ImageSource::Path(PathBuf::from(raw))
    }

    /// Read and decode the image as 8-bit RGB. Alpha is discarded.
    ///
    /// URL sources are downloaded on a private single-threaded runtime, so
    /// this must not be called from within an async context.
    ///
    /// # Errors
    /// Returns [`Error::ImageLoad`] if reading, downloading, or decoding fails.
    pub fn load(&self, fetch: &FetchOptions) -> Result<RgbImage> {
        let name = self.to_string();
        match self {
            ImageSource::Path(path) => {
                let reader = ImageReader::open(path)
                    .map_err(|e| Error::image_load(&name, e))?
                    .with_guessed_format()
                    .map_err(|e| Error::image_load(&name, e))?;
                let image = reader.decode().map_err(|e| Error::image_load(&name, e))?;
                Ok(image.to_rgb8())
            }
            ImageSource::Stdin => {
                let mut bytes = Vec::new();
                std::io::stdin()
                    .lock()
                    .read_to_end(&mut bytes)
                    .map_err(|e| Error::image_load(&name, e))?;
                decode(&bytes, &name)
            }
            ImageSource::Url(url) => {
                let runtime = tokio::runtime::Builder::new_current_thread()
                    .enable_all()
                    .build()
                    .map_err(|e| Error::image_load(&name, e))?;
                let bytes = runtime.block_on(download(url, fetch))?;
                decode(&bytes, &name)
            }
            ImageSource::Clipboard => read_clipboard(&name),
        }
    }
}

impl fmt::Display for ImageSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ImageSource::Path(path) => write!(f, "{}", path.display()),
            ImageSource::Url(url) => write!(f, "{}", url),
            ImageSource::Stdin => write!(f, "<stdin>"),
            ImageSource::Clipboard => write!(f, "<clipboard>"),
        }
    }
}

/// Download an image body, mapping failures to [`Error::ImageLoad`].
pub async fn download(url: &str, options: &FetchOptions) -> Result<Vec<u8>> {
    let fetcher = Fetcher::new(*options).map_err(|e| Error::image_load(url, e))?;
    fetcher
        .fetch(url)
        .await
        .map_err(|e| Error::image_load(url, e))
}

fn read_clipboard(name: &str) -> Result<RgbImage> {
    let mut clipboard = arboard::Clipboard::new().map_err(|e| Error::image_load(name, e))?;
    let data = clipboard
        .get_image()
        .map_err(|e| Error::image_load(name, e))?;
    from_rgba(data.width, data.height, data.bytes.into_owned(), name)
}

/// Build an RGB image from tightly packed RGBA rows, dropping alpha.
fn from_rgba(width: usize, height: usize, bytes: Vec<u8>, source_name: &str) -> Result<RgbImage> {
    let reason = format!("{}x{} RGBA data has {} bytes", width, height, bytes.len());
    if width == 0 || height == 0 {
        return Err(Error::image_load(source_name, "empty image"));
    }
    let (Ok(w), Ok(h)) = (u32::try_from(width), u32::try_from(height)) else {
        return Err(Error::image_load(source_name, reason));
    };
    let rgba = RgbaImage::from_raw(w, h, bytes).ok_or_else(|| Error::image_load(source_name, reason))?;
    Ok(DynamicImage::ImageRgba8(rgba).to_rgb8())
}

/// Decode an in-memory image of any supported format to RGB.
///
/// # Errors
/// Returns [`Error::ImageLoad`] naming `source_name` when the bytes are
/// empty or not a decodable image.
pub fn decode(bytes: &[u8], source_name: &str) -> Result<RgbImage> {
    if bytes.is_empty() {
        return Err(Error::image_load(source_name, "no image data"));
    }
    let image = image::load_from_memory(bytes).map_err(|e| Error::image_load(source_name, e))?;
    log::debug!(
        "Decoded {} ({}x{})",
        source_name,
        image.width(),
        image.height()
    );
    Ok(image.to_rgb8())
}
