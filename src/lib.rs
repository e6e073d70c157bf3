//! Conway's Game of Life on a toroidal grid
//!
//! The library holds the simulation core: the grid model, configurable
//! birth/survival rules, the generation-advance engine with its observer
//! interface, and a library of preset patterns written in a small text grammar.
//! Rendering is left to whoever subscribes to the engine.

pub mod config;
pub mod engine;
pub mod error;
pub mod game_of_life;
pub mod preset;
pub mod utils;

pub use config::Settings;
pub use engine::{EngineObserver, Scheduler, SimulationEngine, StepOutcome};
pub use error::{LifeError, Result};
pub use game_of_life::{Grid, RuleSet};
pub use preset::{Preset, PresetSelector};

/// Build an engine from settings, place the starting pattern and run it until
/// it stops, returning the engine in its final state.
///
/// Oscillators never reach a fixed point, so the settings must carry a
/// `max_generations` limit.
pub fn simulate(settings: &Settings, preset: Option<PresetSelector>) -> anyhow::Result<SimulationEngine> {
    settings.validate()?;
    let Some(limit) = settings.simulation.max_generations else {
        anyhow::bail!("simulate needs simulation.max_generations to be set");
    };

    let mut engine = SimulationEngine::from_settings(settings);
    match preset {
        Some(selector) => engine.select_preset(selector)?,
        None => engine.randomize(settings.simulation.random_density),
    }

    engine.start();
    Scheduler::new()
        .with_max_generations(Some(limit))
        .run(&mut engine, |_, _| {});
    Ok(engine)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fast_settings() -> Settings {
        let mut settings = Settings::default();
        settings.grid.width = 12;
        settings.grid.height = 12;
        settings.simulation.tick_interval_ms = 0;
        settings.simulation.max_generations = Some(6);
        settings
    }

    #[test]
    fn test_simulate_rejects_invalid_settings() {
        let mut settings = fast_settings();
        settings.grid.width = 0;
        assert!(simulate(&settings, None).is_err());
    }

    #[test]
    fn test_simulate_requires_generation_limit() {
        let mut settings = fast_settings();
        settings.simulation.max_generations = None;
        let err = simulate(&settings, Some(PresetSelector::from("Blinker"))).unwrap_err();
        assert!(err.to_string().contains("max_generations"));
    }

    #[test]
    fn test_simulate_stops_at_limit() {
        let engine = simulate(&fast_settings(), Some(PresetSelector::from("Blinker"))).unwrap();
        assert_eq!(engine.generation(), 6);
        assert_eq!(engine.population(), 3);
        assert!(!engine.is_running());
    }

    #[test]
    fn test_simulate_unknown_preset() {
        let err = simulate(&fast_settings(), Some(PresetSelector::from("Unicorn"))).unwrap_err();
        assert!(err.to_string().contains("Unicorn"));
    }
}
