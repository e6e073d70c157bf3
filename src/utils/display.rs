//! Display and output formatting utilities

use crate::config::DisplayConfig;
use crate::engine::{EngineObserver, SimulationEngine};
use crate::game_of_life::Grid;
use crate::preset::Preset;

/// Renders grids and engine state as text
pub struct GridFormatter {
    living: char,
    dead: char,
    show_coordinates: bool,
}

impl Default for GridFormatter {
    fn default() -> Self {
        Self {
            living: '█',
            dead: '·',
            show_coordinates: false,
        }
    }
}

impl GridFormatter {
    pub fn from_config(config: &DisplayConfig) -> Self {
        Self {
            living: config.living_char,
            dead: config.dead_char,
            show_coordinates: config.show_coordinates,
        }
    }

    /// Format a grid using the configured layout
    pub fn format_grid(&self, grid: &Grid) -> String {
        if self.show_coordinates {
            self.format_grid_with_coords(grid)
        } else {
            self.format_grid_compact(grid)
        }
    }

    /// One character per cell
    pub fn format_grid_compact(&self, grid: &Grid) -> String {
        let mut output = String::with_capacity(grid.height() * (grid.width() + 1));
        for cell in grid.cells() {
            output.push(if cell.living { self.living } else { self.dead });
            if cell.x() + 1 == grid.width() {
                output.push('\n');
            }
        }
        output
    }

    /// Two characters per cell with row and column numbers
    pub fn format_grid_with_coords(&self, grid: &Grid) -> String {
        let mut output = String::new();

        output.push_str("   ");
        for x in 0..grid.width() {
            output.push_str(&format!("{:2}", x % 10));
        }
        output.push('\n');

        for y in 0..grid.height() {
            output.push_str(&format!("{:2} ", y));
            for x in 0..grid.width() {
                let c = if grid.is_living(x, y) { self.living } else { self.dead };
                output.push(c);
                output.push(c);
            }
            output.push('\n');
        }

        output
    }

    /// Status line shown under each frame
    pub fn format_status(engine: &SimulationEngine) -> String {
        format!(
            "Generation: {} | Population: {} | Rules: {} | Interval: {}ms{}",
            engine.generation(),
            engine.population(),
            engine.rules(),
            engine.tick_interval_ms(),
            if engine.is_running() { "" } else { " | paused" }
        )
    }

    /// Menu of presets with their canonical pattern text
    pub fn format_preset_list(presets: &[Preset]) -> String {
        let mut output = String::new();
        output.push_str("#  | Name                   | Cells | Pattern\n");
        output.push_str("---|------------------------|-------|---------\n");

        for (i, preset) in presets.iter().enumerate() {
            let pattern = preset
                .encode()
                .unwrap_or_else(|err| format!("<{}>", err));
            output.push_str(&format!(
                "{:2} | {:22} | {:5} | {}\n",
                i,
                preset.name(),
                preset.len(),
                pattern
            ));
        }

        output
    }
}

/// Prints run-state changes as they happen
#[derive(Debug, Default)]
pub struct StatusReporter {
    last_generation: u64,
}

impl EngineObserver for StatusReporter {
    fn on_generation_advanced(&mut self, generation: u64) {
        self.last_generation = generation;
    }

    fn on_run_state_changed(&mut self, running: bool) {
        if running {
            println!("{}", ColorOutput::info("▶ Simulation started"));
        } else {
            println!(
                "{}",
                ColorOutput::warning(&format!(
                    "⏸ Simulation stopped after generation {}",
                    self.last_generation
                ))
            );
        }
    }

    fn on_cleared(&mut self) {
        self.last_generation = 0;
    }
}

/// Color output utilities
pub struct ColorOutput;

impl ColorOutput {
    /// Format text with color (if terminal supports it)
    pub fn colored(text: &str, color: Color) -> String {
        if Self::supports_color() {
            format!("\x1b[{}m{}\x1b[0m", color.code(), text)
        } else {
            text.to_string()
        }
    }

    /// Check if terminal supports color
    fn supports_color() -> bool {
        std::env::var("NO_COLOR").is_err()
            && (std::env::var("TERM").unwrap_or_default() != "dumb")
    }

    pub fn success(text: &str) -> String {
        Self::colored(text, Color::Green)
    }

    pub fn error(text: &str) -> String {
        Self::colored(text, Color::Red)
    }

    pub fn warning(text: &str) -> String {
        Self::colored(text, Color::Yellow)
    }

    pub fn info(text: &str) -> String {
        Self::colored(text, Color::Blue)
    }
}

#[derive(Debug, Clone, Copy)]
pub enum Color {
    Red,
    Green,
    Yellow,
    Blue,
}

impl Color {
    fn code(self) -> u8 {
        match self {
            Color::Red => 31,
            Color::Green => 32,
            Color::Yellow => 33,
            Color::Blue => 34,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_of_life::RuleSet;
    use crate::preset::standard_presets;

    fn sample_grid() -> Grid {
        let mut grid = Grid::new(3, 2);
        grid.set_living(0, 0, true).unwrap();
        grid.set_living(2, 1, true).unwrap();
        grid
    }

    #[test]
    fn test_grid_formatting() {
        let formatter = GridFormatter::default();
        assert_eq!(formatter.format_grid_compact(&sample_grid()), "█··\n··█\n");

        let with_coords = formatter.format_grid_with_coords(&sample_grid());
        assert!(with_coords.starts_with("    0 1 2\n"));
        assert!(with_coords.contains(" 1 ····██"));
    }

    #[test]
    fn test_formatter_uses_config() {
        let config = DisplayConfig {
            living_char: '#',
            dead_char: ' ',
            show_coordinates: false,
        };
        let formatter = GridFormatter::from_config(&config);
        assert_eq!(formatter.format_grid(&sample_grid()), "#  \n  #\n");
    }

    #[test]
    fn test_status_line() {
        let engine = SimulationEngine::new(4, 4, RuleSet::default());
        assert_eq!(
            GridFormatter::format_status(&engine),
            "Generation: 0 | Population: 0 | Rules: B3/S23 | Interval: 30ms | paused"
        );
    }

    #[test]
    fn test_preset_list() {
        let listing = GridFormatter::format_preset_list(&standard_presets());
        assert!(listing.contains("Glider"));
        assert!(listing.contains(".O|..O|OOO|"));
    }

    #[test]
    fn test_color_output() {
        let colored = ColorOutput::colored("test", Color::Red);
        assert!(colored.contains("test"));
        assert!(ColorOutput::success("OK").contains("OK"));
    }
}
