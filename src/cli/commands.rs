//! Handlers for image conversion, the charset listing and config actions.

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use super::args::{Args, Command, ConfigAction, GlyphArgs};
use crate::ascii::{self, Charset};
use crate::config::{default_path, Config, ConfigError, DEFAULT_CONFIG_TEMPLATE};
use crate::font::FontFace;
use crate::source::ImageSource;

/// Errors surfaced by the command-line front end.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error(transparent)]
    Convert(#[from] crate::Error),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("No image given. Use --image-path <SRC> (a file, a URL, - for stdin, or clip)")]
    MissingImage,

    #[error("Config file already exists: {}", .0.display())]
    ConfigExists(PathBuf),

    #[error("Failed to write '{}': {source}", path.display())]
    Write { path: PathBuf, source: io::Error },
}

impl CliError {
    fn write(path: impl Into<PathBuf>, source: io::Error) -> Self {
        CliError::Write {
            path: path.into(),
            source,
        }
    }
}

/// Dispatch parsed arguments.
pub fn run(args: Args) -> Result<(), CliError> {
    let config_path = args.config.clone().unwrap_or_else(default_path);

    match &args.command {
        Some(Command::Config { action }) => {
            return handle_config_action(action, &config_path, &mut io::stdout().lock());
        }
        Some(Command::Charset { glyphs }) => {
            let config = Config::load(Some(config_path.as_path()))?;
            return show_charset(glyphs, &config, &mut io::stdout().lock());
        }
        None => {}
    }

    let config = Config::load(Some(config_path.as_path()))?;
    convert_image(&args, &config)
}

/// Convert the image named on the command line and write the art out.
pub fn convert_image(args: &Args, config: &Config) -> Result<(), CliError> {
    let raw = args.image_path.as_deref().ok_or(CliError::MissingImage)?;
    let source = ImageSource::parse(raw);
    let options = args.convert_options(config);
    log::debug!("Source: {}", source);
    log::debug!("Options: {:?}", options);

    let font = FontFace::load(
        &args.glyphs.font_path(config),
        args.glyphs.font_size(config),
    )?;
    let image = source.load(&config.fetch.to_options())?;
    log::info!(
        "Loaded {} ({}x{})",
        source,
        image.width(),
        image.height()
    );

    let art = ascii::convert(&image, &font, &options)?;

    match &args.output {
        Some(path) => {
            std::fs::write(path, format!("{}\n", art)).map_err(|e| CliError::write(path, e))?;
            log::info!("Wrote {}", path.display());
        }
        None => {
            let mut out = io::stdout().lock();
            writeln!(out, "{}", art).map_err(|e| CliError::write("<stdout>", e))?;
        }
    }
    Ok(())
}

/// Print the prepared charset, one character per line with its brightness.
pub fn show_charset(
    glyphs: &GlyphArgs,
    config: &Config,
    out: &mut impl Write,
) -> Result<(), CliError> {
    let font = FontFace::load(&glyphs.font_path(config), glyphs.font_size(config))?;
    let charset = Charset::prepare(&glyphs.charset(config), &font, glyphs.sort_chars(config))?;
    write_charset(&charset, out).map_err(|e| CliError::write("<stdout>", e))
}

fn write_charset(charset: &Charset, out: &mut impl Write) -> io::Result<()> {
    writeln!(
        out,
        "{} characters ({}):",
        charset.len(),
        if charset.is_sorted() {
            "sorted by brightness"
        } else {
            "given order"
        }
    )?;
    for entry in charset.entries() {
        writeln!(out, "  {:?}  {:.4}", entry.ch, entry.brightness)?;
    }
    Ok(())
}

/// Handle config subcommand actions.
pub fn handle_config_action(
    action: &ConfigAction,
    config_path: &Path,
    out: &mut impl Write,
) -> Result<(), CliError> {
    match action {
        ConfigAction::Show => {
            let config = Config::load(Some(config_path))?;
            let status = if config_path.exists() {
                "exists"
            } else {
                "not found, showing defaults"
            };
            let text = config.to_toml()?;
            writeln!(out, "# Config file: {} ({})", config_path.display(), status)
                .and_then(|_| write!(out, "{}", text))
                .map_err(|e| CliError::write("<stdout>", e))
        }
        ConfigAction::Init => {
            init_config(config_path)?;
            writeln!(out, "Created config file: {}", config_path.display())
                .map_err(|e| CliError::write("<stdout>", e))
        }
    }
}

/// Write the default config template, refusing to overwrite an existing file.
pub fn init_config(config_path: &Path) -> Result<(), CliError> {
    if config_path.exists() {
        return Err(CliError::ConfigExists(config_path.to_path_buf()));
    }

    if let Some(parent) = config_path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| CliError::write(parent, e))?;
    }
    std::fs::write(config_path, DEFAULT_CONFIG_TEMPLATE)
        .map_err(|e| CliError::write(config_path, e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_init_creates_template() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        init_config(&path).unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        assert_eq!(written, DEFAULT_CONFIG_TEMPLATE);
    }

    #[test]
    fn test_init_refuses_to_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "# mine\n").unwrap();

        let result = init_config(&path);

        assert!(matches!(result, Err(CliError::ConfigExists(_))));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "# mine\n");
    }

    #[test]
    fn test_show_missing_config_prints_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.toml");
        let mut out = Vec::new();

        handle_config_action(&ConfigAction::Show, &path, &mut out).unwrap();

        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("not found"));
        let body: String = text.lines().skip(1).collect::<Vec<_>>().join("\n");
        let parsed: Config = toml::from_str(&body).unwrap();
        assert_eq!(parsed, Config::default());
    }

    #[test]
    fn test_show_invalid_config_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[render\n").unwrap();

        let result = handle_config_action(&ConfigAction::Show, &path, &mut Vec::new());

        assert!(matches!(
            result,
            Err(CliError::Config(ConfigError::Parse { .. }))
        ));
    }

    #[test]
    fn test_write_charset_lists_scores() {
        let charset = Charset::from_scores([(' ', 0.0), ('#', 0.5)], true).unwrap();
        let mut out = Vec::new();

        write_charset(&charset, &mut out).unwrap();

        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("2 characters (sorted by brightness):"));
        assert!(text.contains("'#'  0.5000"));
    }

    #[test]
    fn test_convert_without_image_is_error() {
        let args = Args::parse_from(["glyphcast"]);
        let result = convert_image(&args, &Config::default());
        assert!(matches!(result, Err(CliError::MissingImage)));
    }

    #[test]
    fn test_convert_with_missing_font_is_font_error() {
        let args = Args::parse_from([
            "glyphcast",
            "-i",
            "cat.png",
            "--font-str",
            "/nonexistent/font.ttf",
        ]);
        let result = convert_image(&args, &Config::default());
        assert!(matches!(
            result,
            Err(CliError::Convert(crate::Error::FontLoad { .. }))
        ));
    }
}
