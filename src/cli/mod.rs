//! Command-line interface definitions and helpers.
//!
//! This module contains all CLI argument parsing, enums, and subcommand handlers.

mod args;
mod commands;
mod enums;

pub use args::{Args, Command, ConfigAction, GlyphArgs};
pub use commands::{convert_image, handle_config_action, init_config, run, show_charset, CliError};
pub use enums::CharacterSet;
