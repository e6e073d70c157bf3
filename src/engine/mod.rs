//! Simulation engine, its observer interface and the tick scheduler

pub mod observer;
pub mod scheduler;
pub mod simulation;

pub use observer::{EngineEvent, EngineObserver, EventLog};
pub use scheduler::{RunSummary, Scheduler, Sleeper, StopReason, ThreadSleeper};
pub use simulation::{SimulationEngine, StepOutcome, DEFAULT_SPEED_STEP_MS, DEFAULT_TICK_INTERVAL_MS};
