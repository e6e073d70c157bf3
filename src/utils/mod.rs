//! Console output helpers

pub mod display;

pub use display::{Color, ColorOutput, GridFormatter, StatusReporter};
