//! CLI enum types.

use clap::ValueEnum;

use crate::ascii;

/// Built-in character set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum CharacterSet {
    #[default]
    Default,
    Standard,
    Blocks,
    Minimal,
}

impl From<CharacterSet> for ascii::CharsetPreset {
    fn from(c: CharacterSet) -> Self {
        match c {
            CharacterSet::Default => ascii::CharsetPreset::Default,
            CharacterSet::Standard => ascii::CharsetPreset::Standard,
            CharacterSet::Blocks => ascii::CharsetPreset::Blocks,
            CharacterSet::Minimal => ascii::CharsetPreset::Minimal,
        }
    }
}
