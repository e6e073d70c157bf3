//! Birth/survival rule sets

use crate::error::{LifeError, Result};
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

/// Highest neighbor count in a Moore neighborhood
pub const MAX_NEIGHBOR_COUNT: u8 = 8;

/// Birth and survival conditions, expressed as neighbor counts.
///
/// A `RuleSet` is a value: edits produce a new set that replaces the old one
/// wholesale, so an advance never observes a half-updated rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleSet {
    born_counts: BTreeSet<u8>,
    survive_counts: BTreeSet<u8>,
}

impl Default for RuleSet {
    /// Conway's B3/S23
    fn default() -> Self {
        Self::from_digits("3", "23")
    }
}

impl RuleSet {
    /// Build a rule set from explicit counts, rejecting anything above 8
    pub fn new<B, S>(born: B, survive: S) -> Result<Self>
    where
        B: IntoIterator<Item = u8>,
        S: IntoIterator<Item = u8>,
    {
        let born_counts = validate_counts(born)?;
        let survive_counts = validate_counts(survive)?;
        Ok(Self { born_counts, survive_counts })
    }

    /// Build a rule set from the digit strings a user types, e.g. `"3"` and `"23"`
    pub fn from_digits(born: &str, survive: &str) -> Self {
        Self {
            born_counts: parse_counts(born),
            survive_counts: parse_counts(survive),
        }
    }

    pub fn should_be_born(&self, neighbor_count: u8) -> bool {
        self.born_counts.contains(&neighbor_count)
    }

    pub fn should_survive(&self, neighbor_count: u8) -> bool {
        self.survive_counts.contains(&neighbor_count)
    }

    /// Next state of a cell given its current state and neighbor count
    pub fn next_state(&self, living: bool, neighbor_count: u8) -> bool {
        if living {
            self.should_survive(neighbor_count)
        } else {
            self.should_be_born(neighbor_count)
        }
    }

    pub fn born_counts(&self) -> &BTreeSet<u8> {
        &self.born_counts
    }

    pub fn survive_counts(&self) -> &BTreeSet<u8> {
        &self.survive_counts
    }

    /// Copy of this rule set with the birth counts replaced
    pub fn with_born(&self, digits: &str) -> Self {
        Self {
            born_counts: parse_counts(digits),
            survive_counts: self.survive_counts.clone(),
        }
    }

    /// Copy of this rule set with the survival counts replaced
    pub fn with_survive(&self, digits: &str) -> Self {
        Self {
            born_counts: self.born_counts.clone(),
            survive_counts: parse_counts(digits),
        }
    }
}

/// Parse a digit sequence into a set of neighbor counts.
///
/// Characters that are not digits in `0..=8` are dropped, so `"2a39"` yields `{2, 3}`.
pub fn parse_counts(digits: &str) -> BTreeSet<u8> {
    digits
        .chars()
        .filter_map(|ch| ch.to_digit(10))
        .filter(|&d| d <= MAX_NEIGHBOR_COUNT as u32)
        .map(|d| d as u8)
        .collect()
}

fn validate_counts<I: IntoIterator<Item = u8>>(counts: I) -> Result<BTreeSet<u8>> {
    counts
        .into_iter()
        .map(|count| {
            if count > MAX_NEIGHBOR_COUNT {
                Err(LifeError::InvalidRule { count: count as u32 })
            } else {
                Ok(count)
            }
        })
        .collect()
}

impl fmt::Display for RuleSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "B{}/S{}",
            self.born_counts.iter().join(""),
            self.survive_counts.iter().join("")
        )
    }
}

impl FromStr for RuleSet {
    type Err = LifeError;

    /// Parse `B3/S23` notation (case-insensitive). Digits outside 0..=8 are rejected.
    fn from_str(s: &str) -> Result<Self> {
        let invalid = || LifeError::InvalidRuleNotation(s.to_string());

        let (born, survive) = s.trim().split_once('/').ok_or_else(invalid)?;
        let born = born
            .strip_prefix(|c: char| c.eq_ignore_ascii_case(&'B'))
            .ok_or_else(invalid)?;
        let survive = survive
            .strip_prefix(|c: char| c.eq_ignore_ascii_case(&'S'))
            .ok_or_else(invalid)?;

        let digits = |part: &str| -> Result<Vec<u8>> {
            part.chars()
                .map(|ch| ch.to_digit(10).map(|d| d as u8).ok_or_else(invalid))
                .collect()
        };

        Self::new(digits(born)?, digits(survive)?)
    }
}
