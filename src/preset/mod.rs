//! Preset patterns: the text grammar, the preset type and the built-in library

pub mod codec;
pub mod library;
pub mod pattern;

pub use codec::{decode, decode_strict, encode};
pub use library::standard_presets;
pub use pattern::Preset;

use crate::error::{LifeError, Result};
use std::fmt;

/// Chooses a preset by menu position or by name
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PresetSelector {
    Index(usize),
    Name(String),
}

impl PresetSelector {
    /// Interpret user input: a bare number is an index, anything else a name
    pub fn parse(input: &str) -> Self {
        let input = input.trim();
        match input.parse::<usize>() {
            Ok(index) => Self::Index(index),
            Err(_) => Self::Name(input.to_string()),
        }
    }

    /// Find the selected preset; names match case-insensitively
    pub fn find<'a>(&self, presets: &'a [Preset]) -> Result<&'a Preset> {
        let found = match self {
            Self::Index(index) => presets.get(*index),
            Self::Name(name) => presets.iter().find(|p| p.name().eq_ignore_ascii_case(name)),
        };
        found.ok_or_else(|| LifeError::UnknownPreset(self.to_string()))
    }
}

impl fmt::Display for PresetSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Index(index) => write!(f, "#{}", index),
            Self::Name(name) => write!(f, "{}", name),
        }
    }
}

impl From<usize> for PresetSelector {
    fn from(index: usize) -> Self {
        Self::Index(index)
    }
}

impl From<&str> for PresetSelector {
    fn from(name: &str) -> Self {
        Self::Name(name.to_string())
    }
}

impl From<String> for PresetSelector {
    fn from(name: String) -> Self {
        Self::Name(name)
    }
}
