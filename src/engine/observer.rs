//! Notifications from the engine to whatever presents it

use std::cell::RefCell;
use std::rc::Rc;

/// Receives state changes from a [`SimulationEngine`](super::SimulationEngine).
///
/// Every method has an empty default so observers only implement what they
/// render. Notifications are delivered synchronously, in the order the changes
/// are applied.
pub trait EngineObserver {
    /// A cell actually changed state (same-state sets are never reported)
    fn on_cell_changed(&mut self, _x: usize, _y: usize, _living: bool) {}

    /// A generation advance completed without reaching a fixed point
    fn on_generation_advanced(&mut self, _generation: u64) {}

    /// The living-cell count changed
    fn on_population_changed(&mut self, _population: usize) {}

    /// The simulation started or stopped, including the automatic stop at a fixed point
    fn on_run_state_changed(&mut self, _running: bool) {}

    /// The board was cleared and the counters reset to zero
    fn on_cleared(&mut self) {}
}

/// One notification, as captured by [`EventLog`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    CellChanged { x: usize, y: usize, living: bool },
    GenerationAdvanced(u64),
    PopulationChanged(usize),
    RunStateChanged(bool),
    Cleared,
}

/// Observer that records every notification into a shared buffer.
///
/// Clone the log before subscribing it; the clone kept by the caller sees the
/// same events.
#[derive(Debug, Clone, Default)]
pub struct EventLog {
    events: Rc<RefCell<Vec<EngineEvent>>>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the events recorded so far
    pub fn events(&self) -> Vec<EngineEvent> {
        self.events.borrow().clone()
    }

    /// Remove and return the recorded events
    pub fn drain(&self) -> Vec<EngineEvent> {
        self.events.borrow_mut().drain(..).collect()
    }

    pub fn count<P: Fn(&EngineEvent) -> bool>(&self, predicate: P) -> usize {
        self.events.borrow().iter().filter(|event| predicate(event)).count()
    }

    fn push(&self, event: EngineEvent) {
        self.events.borrow_mut().push(event);
    }
}

impl EngineObserver for EventLog {
    fn on_cell_changed(&mut self, x: usize, y: usize, living: bool) {
        self.push(EngineEvent::CellChanged { x, y, living });
    }

    fn on_generation_advanced(&mut self, generation: u64) {
        self.push(EngineEvent::GenerationAdvanced(generation));
    }

    fn on_population_changed(&mut self, population: usize) {
        self.push(EngineEvent::PopulationChanged(population));
    }

    fn on_run_state_changed(&mut self, running: bool) {
        self.push(EngineEvent::RunStateChanged(running));
    }

    fn on_cleared(&mut self) {
        self.push(EngineEvent::Cleared);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_log_shares_buffer() {
        let log = EventLog::new();
        let mut observer: Box<dyn EngineObserver> = Box::new(log.clone());

        observer.on_cell_changed(1, 2, true);
        observer.on_population_changed(1);
        observer.on_run_state_changed(false);

        assert_eq!(
            log.events(),
            vec![
                EngineEvent::CellChanged { x: 1, y: 2, living: true },
                EngineEvent::PopulationChanged(1),
                EngineEvent::RunStateChanged(false),
            ]
        );
        assert_eq!(log.count(|e| matches!(e, EngineEvent::PopulationChanged(_))), 1);

        assert_eq!(log.drain().len(), 3);
        assert!(log.events().is_empty());
    }
}
