//! Named, relocatable cell patterns

use super::codec;
use crate::engine::SimulationEngine;
use crate::error::{LifeError, Result};
use serde::{Deserialize, Serialize};

/// A named template of living-cell offsets relative to its origin
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preset {
    name: String,
    coords: Vec<(i32, i32)>,
}

impl Preset {
    pub fn new(name: impl Into<String>, coords: Vec<(i32, i32)>) -> Self {
        Self {
            name: name.into(),
            coords,
        }
    }

    /// Build a preset from a pattern literal (see [`codec`])
    pub fn from_pattern(name: impl Into<String>, pattern: &str) -> Self {
        Self::new(name, codec::decode(pattern))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn coords(&self) -> &[(i32, i32)] {
        &self.coords
    }

    pub fn len(&self) -> usize {
        self.coords.len()
    }

    pub fn is_empty(&self) -> bool {
        self.coords.is_empty()
    }

    /// Width and height of the smallest box holding every offset, measured from the origin
    pub fn extent(&self) -> (i32, i32) {
        self.coords
            .iter()
            .fold((0, 0), |(w, h), &(x, y)| {
                (w.max(x.saturating_add(1)), h.max(y.saturating_add(1)))
            })
    }

    /// Shift every offset by `(dx, dy)` in place. Offsets saturate at the `i32` bounds.
    pub fn translate(&mut self, dx: i32, dy: i32) {
        for (x, y) in &mut self.coords {
            *x = x.saturating_add(dx);
            *y = y.saturating_add(dy);
        }
    }

    /// Move the pattern origin to the middle of a `width` x `height` grid
    pub fn center(&mut self, width: usize, height: usize) {
        let half = |size: usize| i32::try_from(size / 2).unwrap_or(i32::MAX);
        self.translate(half(width), half(height));
    }

    pub fn centered(mut self, width: usize, height: usize) -> Self {
        self.center(width, height);
        self
    }

    /// Canonical pattern text for the current offsets
    pub fn encode(&self) -> Result<String> {
        codec::encode(&self.coords)
    }

    /// Clear the engine and bring exactly this preset's cells to life.
    ///
    /// Every offset is checked against the grid first; if any falls outside it
    /// the engine is left untouched and `OutOfRange` is returned.
    pub fn place_on(&self, engine: &mut SimulationEngine) -> Result<()> {
        let grid = engine.grid();
        if let Some(&(x, y)) = self
            .coords
            .iter()
            .find(|&&(x, y)| !grid.contains(x as i64, y as i64))
        {
            return Err(LifeError::OutOfRange {
                x: x as i64,
                y: y as i64,
                width: grid.width(),
                height: grid.height(),
            });
        }

        engine.clear();
        for &(x, y) in &self.coords {
            engine.set_cell(x as usize, y as usize, true)?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_of_life::RuleSet;

    fn r_pentomino() -> Preset {
        Preset::from_pattern("R-pentomino", ".OO|OO.|.O.|")
    }

    #[test]
    fn test_translate() {
        let mut preset = r_pentomino();
        preset.translate(5, 5);
        assert_eq!(
            preset.coords(),
            &[(6, 5), (7, 5), (5, 6), (6, 6), (6, 7)]
        );

        preset.translate(-5, -5);
        assert_eq!(preset, r_pentomino());
    }

    #[test]
    fn test_translate_saturates() {
        let mut preset = Preset::new("edge", vec![(i32::MAX - 1, 0), (0, i32::MIN + 1)]);
        preset.translate(5, -5);
        assert_eq!(preset.coords(), &[(i32::MAX, -5), (5, i32::MIN)]);
        assert_eq!(preset.extent(), (i32::MAX, 0));
    }

    #[test]
    fn test_center_on_huge_grid_saturates() {
        let preset = Preset::new("dot", vec![(1, 1)]).centered(usize::MAX, 10);
        assert_eq!(preset.coords(), &[(i32::MAX, 6)]);
    }

    #[test]
    fn test_center_uses_floor() {
        let preset = Preset::new("dot", vec![(0, 0)]).centered(7, 5);
        assert_eq!(preset.coords(), &[(3, 2)]);
    }

    #[test]
    fn test_extent() {
        assert_eq!(r_pentomino().extent(), (3, 3));
        assert_eq!(Preset::new("empty", vec![]).extent(), (0, 0));
    }

    #[test]
    fn test_place_on_sets_exactly_the_preset_cells() {
        let mut engine = SimulationEngine::new(12, 12, RuleSet::default());
        engine.set_cell(0, 0, true).unwrap();
        engine.set_cell(11, 11, true).unwrap();

        let mut preset = r_pentomino();
        preset.translate(5, 5);
        preset.place_on(&mut engine).unwrap();

        assert_eq!(
            engine.grid().living_cells(),
            vec![(6, 5), (7, 5), (5, 6), (6, 6), (6, 7)]
        );
        assert_eq!(engine.population(), 5);
        assert_eq!(engine.generation(), 0);
        assert!(!engine.is_running());
    }

    #[test]
    fn test_place_out_of_range_leaves_engine_untouched() {
        let mut engine = SimulationEngine::new(4, 4, RuleSet::default());
        engine.set_cell(1, 1, true).unwrap();

        let mut preset = r_pentomino();
        preset.translate(2, 2);

        assert_eq!(
            preset.place_on(&mut engine),
            Err(LifeError::OutOfRange { x: 4, y: 2, width: 4, height: 4 })
        );
        assert_eq!(engine.grid().living_cells(), vec![(1, 1)]);
        assert_eq!(engine.population(), 1);
    }

    #[test]
    fn test_encode_round_trip() {
        let preset = r_pentomino();
        let reparsed = Preset::from_pattern("copy", &preset.encode().unwrap());
        assert_eq!(reparsed.coords(), preset.coords());
    }
}
