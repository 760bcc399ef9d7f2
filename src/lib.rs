//! glyphcast library crate.
//!
//! Converts raster images into ASCII art. The [`ascii`] pipeline is pure;
//! [`source`] and [`font`] load its inputs and [`cli`] wires them together.

pub mod ascii;
pub mod cli;
pub mod config;
pub mod error;
pub mod font;
pub mod source;

pub use error::{Error, Result};
