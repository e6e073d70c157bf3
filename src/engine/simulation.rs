//! The simulation engine: grid, rules, counters and run state

use super::observer::EngineObserver;
use crate::config::Settings;
use crate::error::Result;
use crate::game_of_life::{CellChange, Grid, RuleSet};
use crate::preset::{Preset, PresetSelector};
use rand::Rng;
use rayon::prelude::*;
use std::fmt;
use std::time::Duration;

/// Tick interval used when nothing else is configured
pub const DEFAULT_TICK_INTERVAL_MS: u64 = 30;
/// Amount `faster`/`slower` change the tick interval by
pub const DEFAULT_SPEED_STEP_MS: u64 = 20;

/// Result of a single step request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// The grid changed and the generation counter moved to `generation`
    Advanced {
        generation: u64,
        births: usize,
        deaths: usize,
    },
    /// Nothing was born or died; the engine stopped and the counter did not move
    FixedPoint,
    /// The request was dropped: a manual step while running, or a tick while stopped
    Ignored,
}

/// Owns one board and advances it generation by generation.
///
/// All mutation goes through the engine so the population counter and the
/// observers stay in step with the grid.
pub struct SimulationEngine {
    grid: Grid,
    rules: RuleSet,
    generation: u64,
    population: usize,
    running: bool,
    tick_interval_ms: u64,
    speed_step_ms: u64,
    presets: Vec<Preset>,
    observers: Vec<Box<dyn EngineObserver>>,
}

impl SimulationEngine {
    /// Create an engine with an empty `width` x `height` grid and no presets
    pub fn new(width: usize, height: usize, rules: RuleSet) -> Self {
        Self {
            grid: Grid::new(width, height),
            rules,
            generation: 0,
            population: 0,
            running: false,
            tick_interval_ms: DEFAULT_TICK_INTERVAL_MS,
            speed_step_ms: DEFAULT_SPEED_STEP_MS,
            presets: Vec::new(),
            observers: Vec::new(),
        }
    }

    /// Create an engine from configuration, loaded with the built-in presets
    pub fn from_settings(settings: &Settings) -> Self {
        let rules = RuleSet::from_digits(&settings.rules.born, &settings.rules.survive);
        let mut engine = Self::new(settings.grid.width, settings.grid.height, rules)
            .with_presets(crate::preset::standard_presets());
        engine.tick_interval_ms = settings.simulation.tick_interval_ms;
        engine.speed_step_ms = settings.simulation.speed_step_ms;
        engine
    }

    /// Install a preset menu, moving each preset's origin to the grid center
    pub fn with_presets(mut self, presets: Vec<Preset>) -> Self {
        let (width, height) = (self.grid.width(), self.grid.height());
        self.presets = presets
            .into_iter()
            .map(|preset| preset.centered(width, height))
            .collect();
        self
    }

    pub fn subscribe(&mut self, observer: Box<dyn EngineObserver>) {
        self.observers.push(observer);
    }

    fn notify<F: FnMut(&mut dyn EngineObserver)>(&mut self, mut f: F) {
        for observer in self.observers.iter_mut() {
            f(observer.as_mut());
        }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn population(&self) -> usize {
        self.population
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn presets(&self) -> &[Preset] {
        &self.presets
    }

    // Run state

    pub fn start(&mut self) {
        if !self.running {
            self.set_running(true);
        }
    }

    pub fn stop(&mut self) {
        if self.running {
            self.set_running(false);
        }
    }

    pub fn toggle_running(&mut self) {
        let running = !self.running;
        self.set_running(running);
    }

    fn set_running(&mut self, running: bool) {
        self.running = running;
        self.notify(|o| o.on_run_state_changed(running));
    }

    // Speed

    pub fn tick_interval_ms(&self) -> u64 {
        self.tick_interval_ms
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    /// Set the delay between ticks; the next scheduled tick uses it
    pub fn set_speed(&mut self, tick_interval_ms: u64) {
        self.tick_interval_ms = tick_interval_ms;
    }

    pub fn faster(&mut self) {
        self.tick_interval_ms = self.tick_interval_ms.saturating_sub(self.speed_step_ms);
    }

    pub fn slower(&mut self) {
        self.tick_interval_ms = self.tick_interval_ms.saturating_add(self.speed_step_ms);
    }

    pub fn is_fastest(&self) -> bool {
        self.tick_interval_ms == 0
    }

    // Rules

    /// Replace the birth counts from a digit string such as `"3"`
    pub fn set_born_rule(&mut self, digits: &str) {
        self.rules = self.rules.with_born(digits);
    }

    /// Replace the survival counts from a digit string such as `"23"`
    pub fn set_survive_rule(&mut self, digits: &str) {
        self.rules = self.rules.with_survive(digits);
    }

    pub fn set_rules(&mut self, rules: RuleSet) {
        self.rules = rules;
    }

    // Board edits

    /// Stop, kill every cell and reset both counters to zero
    pub fn clear(&mut self) {
        self.stop();

        let living = self.grid.living_cells();
        for (x, y) in living {
            self.grid.apply_change(&CellChange { x, y, living: false });
            self.notify(|o| o.on_cell_changed(x, y, false));
        }

        let had_population = self.population != 0;
        self.generation = 0;
        self.population = 0;
        if had_population {
            self.notify(|o| o.on_population_changed(0));
        }
        self.notify(|o| o.on_cleared());
    }

    /// Clear, then bring each cell to life with the given probability
    pub fn randomize_with<R: Rng>(&mut self, rng: &mut R, probability_living: f64) {
        let probability = if probability_living.is_nan() {
            0.0
        } else {
            probability_living.clamp(0.0, 1.0)
        };

        self.clear();

        let born: Vec<(usize, usize)> = self
            .grid
            .cells()
            .filter(|_| rng.gen_bool(probability))
            .map(|cell| cell.position())
            .collect();

        for (x, y) in born {
            self.grid.apply_change(&CellChange { x, y, living: true });
            self.notify(|o| o.on_cell_changed(x, y, true));
        }

        self.population = self.grid.living_count();
        if self.population != 0 {
            let population = self.population;
            self.notify(|o| o.on_population_changed(population));
        }
    }

    pub fn randomize(&mut self, probability_living: f64) {
        self.randomize_with(&mut rand::thread_rng(), probability_living);
    }

    /// Set a single cell regardless of run state, keeping population in step.
    ///
    /// Interactive edits go through [`toggle_cell`](Self::toggle_cell), which
    /// refuses them while running.
    pub(crate) fn set_cell(&mut self, x: usize, y: usize, alive: bool) -> Result<()> {
        if let Some(change) = self.grid.set_living(x, y, alive)? {
            if change.living {
                self.population += 1;
            } else {
                self.population -= 1;
            }
            let population = self.population;
            self.notify(|o| {
                o.on_cell_changed(change.x, change.y, change.living);
                o.on_population_changed(population);
            });
        }
        Ok(())
    }

    /// Flip a cell the way an interactive click does.
    ///
    /// Returns `Ok(false)` without touching the grid while the simulation runs.
    pub fn toggle_cell(&mut self, x: usize, y: usize) -> Result<bool> {
        let living = self.grid.cell_at(x, y)?.living;
        if self.running {
            return Ok(false);
        }
        self.set_cell(x, y, !living)?;
        Ok(true)
    }

    /// Clear the board and place the selected preset on it
    pub fn select_preset(&mut self, selector: impl Into<PresetSelector>) -> Result<()> {
        let preset = selector.into().find(&self.presets)?.clone();
        preset.place_on(self)
    }

    // Generations

    /// Advance once on explicit request. Ignored while the simulation runs.
    pub fn advance_one_generation(&mut self) -> StepOutcome {
        if self.running {
            return StepOutcome::Ignored;
        }
        self.advance()
    }

    /// Advance once on a scheduler tick. Rechecks the run state, so a tick
    /// that fires after `stop()` does nothing.
    pub fn tick(&mut self) -> StepOutcome {
        if !self.running {
            return StepOutcome::Ignored;
        }
        self.advance()
    }

    fn advance(&mut self) -> StepOutcome {
        let transitions = self.classify();
        let (births, deaths): (Vec<CellChange>, Vec<CellChange>) =
            transitions.into_iter().partition(|change| change.living);

        if births.is_empty() && deaths.is_empty() {
            self.stop();
            return StepOutcome::FixedPoint;
        }

        for change in deaths.iter().chain(births.iter()) {
            if self.grid.apply_change(change) {
                let (x, y, living) = (change.x, change.y, change.living);
                self.notify(|o| o.on_cell_changed(x, y, living));
            }
        }

        self.population = self.population + births.len() - deaths.len();
        let population = self.population;
        if births.len() != deaths.len() {
            self.notify(|o| o.on_population_changed(population));
        }

        self.generation += 1;
        let generation = self.generation;
        self.notify(|o| o.on_generation_advanced(generation));

        StepOutcome::Advanced {
            generation,
            births: births.len(),
            deaths: deaths.len(),
        }
    }

    /// Every cell whose state differs next generation, judged against the
    /// current grid only. Row-major order.
    fn classify(&self) -> Vec<CellChange> {
        let grid = &self.grid;
        let rules = &self.rules;

        (0..grid.height())
            .into_par_iter()
            .flat_map_iter(|y| {
                (0..grid.width()).filter_map(move |x| {
                    let living = grid.is_living(x, y);
                    let next = rules.next_state(living, grid.living_neighbor_count(x, y));
                    (next != living).then_some(CellChange { x, y, living: next })
                })
            })
            .collect()
    }
}

impl fmt::Debug for SimulationEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SimulationEngine")
            .field("width", &self.grid.width())
            .field("height", &self.grid.height())
            .field("rules", &self.rules.to_string())
            .field("generation", &self.generation)
            .field("population", &self.population)
            .field("running", &self.running)
            .field("tick_interval_ms", &self.tick_interval_ms)
            .field("presets", &self.presets.len())
            .field("observers", &self.observers.len())
            .finish()
    }
}
