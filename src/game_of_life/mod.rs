//! Game of Life board model: cells, toroidal grid and rule sets

pub mod grid;
pub mod rules;

pub use grid::{Cell, CellChange, Grid};
pub use rules::{parse_counts, RuleSet, MAX_NEIGHBOR_COUNT};
