//! Cooperative tick loop that drives a running engine

use super::simulation::{SimulationEngine, StepOutcome};
use std::time::Duration;

/// Waits between ticks
pub trait Sleeper {
    fn sleep(&mut self, duration: Duration);
}

/// Blocks the current thread
#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadSleeper;

impl Sleeper for ThreadSleeper {
    fn sleep(&mut self, duration: Duration) {
        if !duration.is_zero() {
            std::thread::sleep(duration);
        }
    }
}

/// Why [`Scheduler::run`] returned
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// Something called `stop()` (an observer, the frame hook, or the engine was never started)
    Stopped,
    /// An advance found no births or deaths
    FixedPoint,
    /// The configured generation limit was reached; the engine was stopped
    GenerationLimit,
}

/// Summary of one scheduler run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    pub generations_advanced: u64,
    pub reason: StopReason,
}

/// Runs one tick at a time while the engine is running.
///
/// The interval is read from the engine before every tick, so a speed change
/// made from the frame hook applies to the following tick.
#[derive(Debug, Default)]
pub struct Scheduler<S: Sleeper = ThreadSleeper> {
    sleeper: S,
    max_generations: Option<u64>,
}

impl Scheduler<ThreadSleeper> {
    pub fn new() -> Self {
        Self::with_sleeper(ThreadSleeper)
    }
}

impl<S: Sleeper> Scheduler<S> {
    pub fn with_sleeper(sleeper: S) -> Self {
        Self {
            sleeper,
            max_generations: None,
        }
    }

    /// Stop the engine after this many advances
    pub fn with_max_generations(mut self, limit: Option<u64>) -> Self {
        self.max_generations = limit;
        self
    }

    pub fn sleeper(&self) -> &S {
        &self.sleeper
    }

    /// Tick the engine until it stops, calling `on_frame` after every tick
    pub fn run<F>(&mut self, engine: &mut SimulationEngine, mut on_frame: F) -> RunSummary
    where
        F: FnMut(&mut SimulationEngine, StepOutcome),
    {
        let mut generations_advanced = 0;

        let reason = loop {
            if !engine.is_running() {
                break StopReason::Stopped;
            }
            if self.max_generations.is_some_and(|limit| generations_advanced >= limit) {
                engine.stop();
                break StopReason::GenerationLimit;
            }

            self.sleeper.sleep(engine.tick_interval());

            let outcome = engine.tick();
            if let StepOutcome::Advanced { .. } = outcome {
                generations_advanced += 1;
            }
            on_frame(engine, outcome);

            if outcome == StepOutcome::FixedPoint {
                break StopReason::FixedPoint;
            }
        };

        RunSummary {
            generations_advanced,
            reason,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_of_life::RuleSet;

    #[derive(Debug, Default)]
    struct RecordingSleeper {
        waits: Vec<Duration>,
    }

    impl Sleeper for RecordingSleeper {
        fn sleep(&mut self, duration: Duration) {
            self.waits.push(duration);
        }
    }

    fn blinker_engine() -> SimulationEngine {
        let mut engine = SimulationEngine::new(5, 5, RuleSet::default());
        for x in 1..=3 {
            engine.set_cell(x, 2, true).unwrap();
        }
        engine
    }

    #[test]
    fn test_stopped_engine_never_ticks() {
        let mut engine = blinker_engine();
        let mut scheduler = Scheduler::with_sleeper(RecordingSleeper::default());

        let summary = scheduler.run(&mut engine, |_, _| panic!("no frames expected"));
        assert_eq!(summary.reason, StopReason::Stopped);
        assert_eq!(summary.generations_advanced, 0);
        assert!(scheduler.sleeper().waits.is_empty());
    }

    #[test]
    fn test_generation_limit() {
        let mut engine = blinker_engine();
        engine.start();
        let mut scheduler =
            Scheduler::with_sleeper(RecordingSleeper::default()).with_max_generations(Some(4));

        let summary = scheduler.run(&mut engine, |_, _| {});
        assert_eq!(summary.reason, StopReason::GenerationLimit);
        assert_eq!(summary.generations_advanced, 4);
        assert_eq!(engine.generation(), 4);
        assert!(!engine.is_running());
    }

    #[test]
    fn test_fixed_point_ends_run() {
        let mut engine = SimulationEngine::new(6, 6, RuleSet::default());
        for (x, y) in [(2, 2), (3, 2), (2, 3), (3, 3)] {
            engine.set_cell(x, y, true).unwrap();
        }
        engine.start();

        let mut frames = Vec::new();
        let mut scheduler = Scheduler::with_sleeper(RecordingSleeper::default());
        let summary = scheduler.run(&mut engine, |_, outcome| frames.push(outcome));

        assert_eq!(summary.reason, StopReason::FixedPoint);
        assert_eq!(frames, vec![StepOutcome::FixedPoint]);
        assert_eq!(engine.generation(), 0);
    }

    #[test]
    fn test_stop_from_frame_prevents_next_advance() {
        let mut engine = blinker_engine();
        engine.start();

        let mut scheduler = Scheduler::with_sleeper(RecordingSleeper::default());
        let summary = scheduler.run(&mut engine, |engine, _| {
            if engine.generation() == 3 {
                engine.stop();
            }
        });

        assert_eq!(summary.reason, StopReason::Stopped);
        assert_eq!(engine.generation(), 3);
        // A stale tick after stop does nothing
        assert_eq!(engine.tick(), StepOutcome::Ignored);
        assert_eq!(engine.generation(), 3);
    }

    #[test]
    fn test_speed_change_applies_to_next_tick() {
        let mut engine = blinker_engine();
        engine.set_speed(50);
        engine.start();

        let mut scheduler =
            Scheduler::with_sleeper(RecordingSleeper::default()).with_max_generations(Some(3));
        scheduler.run(&mut engine, |engine, _| engine.faster());

        assert_eq!(
            scheduler.sleeper().waits,
            vec![
                Duration::from_millis(50),
                Duration::from_millis(30),
                Duration::from_millis(10),
            ]
        );
    }
}
