//! Configuration management for the Life simulator

pub mod settings;

pub use settings::{CliOverrides, DisplayConfig, GridConfig, RulesConfig, Settings, SimulationConfig};
