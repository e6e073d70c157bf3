//! Configuration settings for the Life simulator

use crate::engine::{DEFAULT_SPEED_STEP_MS, DEFAULT_TICK_INTERVAL_MS};
use crate::game_of_life::MAX_NEIGHBOR_COUNT;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    pub grid: GridConfig,
    pub rules: RulesConfig,
    pub simulation: SimulationConfig,
    pub display: DisplayConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridConfig {
    pub width: usize,
    pub height: usize,
}

/// Rule digits exactly as a user would type them
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RulesConfig {
    pub born: String,
    pub survive: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationConfig {
    pub tick_interval_ms: u64,
    pub speed_step_ms: u64,
    pub random_density: f64,
    pub max_generations: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayConfig {
    pub living_char: char,
    pub dead_char: char,
    pub show_coordinates: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            grid: GridConfig {
                width: 80,
                height: 50,
            },
            rules: RulesConfig {
                born: "3".to_string(),
                survive: "23".to_string(),
            },
            simulation: SimulationConfig {
                tick_interval_ms: DEFAULT_TICK_INTERVAL_MS,
                speed_step_ms: DEFAULT_SPEED_STEP_MS,
                random_density: 0.5,
                max_generations: Some(500),
            },
            display: DisplayConfig {
                living_char: '█',
                dead_char: '·',
                show_coordinates: false,
            },
        }
    }
}

impl Settings {
    /// Load settings from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let settings: Settings = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        settings.validate()?;
        Ok(settings)
    }

    /// Save settings to a YAML file
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let content = serde_yaml::to_string(self).context("Failed to serialize settings")?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }

        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Validate the settings
    pub fn validate(&self) -> Result<()> {
        if self.grid.width == 0 || self.grid.height == 0 {
            anyhow::bail!(
                "Grid dimensions must be positive, got {}x{}",
                self.grid.width,
                self.grid.height
            );
        }

        if !(0.0..=1.0).contains(&self.simulation.random_density) {
            anyhow::bail!(
                "Random density must be between 0 and 1, got {}",
                self.simulation.random_density
            );
        }

        if self.simulation.speed_step_ms == 0 {
            anyhow::bail!("Speed step must be positive");
        }

        for (label, digits) in [("born", &self.rules.born), ("survive", &self.rules.survive)] {
            let stray = digits.chars().any(|c| {
                !c.is_whitespace()
                    && !matches!(c.to_digit(10), Some(d) if d <= MAX_NEIGHBOR_COUNT as u32)
            });
            if stray {
                eprintln!(
                    "Warning: ignoring characters outside 0-8 in {} rule '{}'",
                    label, digits
                );
            }
        }

        Ok(())
    }

    /// Merge settings with command line overrides
    pub fn merge_with_cli(&mut self, cli_overrides: &CliOverrides) {
        if let Some(width) = cli_overrides.width {
            self.grid.width = width;
        }
        if let Some(height) = cli_overrides.height {
            self.grid.height = height;
        }
        if let Some(ref born) = cli_overrides.born {
            self.rules.born = born.clone();
        }
        if let Some(ref survive) = cli_overrides.survive {
            self.rules.survive = survive.clone();
        }
        if let Some(interval) = cli_overrides.tick_interval_ms {
            self.simulation.tick_interval_ms = interval;
        }
        if let Some(generations) = cli_overrides.max_generations {
            self.simulation.max_generations = Some(generations);
        }
    }
}

/// Command line overrides for settings
#[derive(Debug, Default)]
pub struct CliOverrides {
    pub width: Option<usize>,
    pub height: Option<usize>,
    pub born: Option<String>,
    pub survive: Option<String>,
    pub tick_interval_ms: Option<u64>,
    pub max_generations: Option<u64>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_defaults_are_valid() {
        let settings = Settings::default();
        assert!(settings.validate().is_ok());
        assert_eq!(settings.rules.born, "3");
        assert_eq!(settings.rules.survive, "23");
        assert_eq!(settings.simulation.tick_interval_ms, 30);
    }

    #[test]
    fn test_file_round_trip() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("config/life.yaml");

        let mut settings = Settings::default();
        settings.grid.width = 40;
        settings.rules.born = "36".to_string();
        settings.simulation.max_generations = None;
        settings.to_file(&path).unwrap();

        let loaded = Settings::from_file(&path).unwrap();
        assert_eq!(loaded, settings);
    }

    #[test]
    fn test_validation_failures() {
        let mut settings = Settings::default();
        settings.grid.height = 0;
        assert!(settings.validate().is_err());

        let mut settings = Settings::default();
        settings.simulation.random_density = 1.5;
        assert!(settings.validate().is_err());

        let mut settings = Settings::default();
        settings.simulation.speed_step_ms = 0;
        assert!(settings.validate().is_err());

        // Stray rule characters only warn
        let mut settings = Settings::default();
        settings.rules.survive = "2x3".to_string();
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let temp_dir = tempdir().unwrap();
        let err = Settings::from_file(temp_dir.path().join("nope.yaml")).unwrap_err();
        assert!(err.to_string().contains("Failed to read config file"));
    }

    #[test]
    fn test_merge_with_cli() {
        let mut settings = Settings::default();
        let overrides = CliOverrides {
            width: Some(20),
            survive: Some("234".to_string()),
            max_generations: Some(10),
            ..Default::default()
        };
        settings.merge_with_cli(&overrides);

        assert_eq!(settings.grid.width, 20);
        assert_eq!(settings.grid.height, 50);
        assert_eq!(settings.rules.survive, "234");
        assert_eq!(settings.simulation.max_generations, Some(10));
        assert_eq!(settings.simulation.tick_interval_ms, 30);
    }
}
