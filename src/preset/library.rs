//! Built-in preset patterns

use super::Preset;

const GLIDER: &str = "
.O.|
..O|
OOO|
";

const BLINKER: &str = "
OOO|
";

const TOAD: &str = "
.OOO|
OOO.|
";

const BEACON: &str = "
OO..|
OO..|
..OO|
..OO|
";

const R_PENTOMINO: &str = "
.OO|
OO.|
.O.|
";

const DIEHARD: &str = "
......O.|
OO......|
.O...OOO|
";

const ACORN: &str = "
.O.....|
...O...|
OO..OOO|
";

const LIGHTWEIGHT_SPACESHIP: &str = "
.O..O|
O....|
O...O|
OOOO.|
";

const PULSAR: &str = "
..OOO...OOO..|
.............|
O....O.O....O|
O....O.O....O|
O....O.O....O|
..OOO...OOO..|
.............|
..OOO...OOO..|
O....O.O....O|
O....O.O....O|
O....O.O....O|
.............|
..OOO...OOO..|
";

const GOSPER_GLIDER_GUN: &str = "
........................O...........|
......................O.O...........|
............OO......OO............OO|
...........O...O....OO............OO|
OO........O.....O...OO..............|
OO........O...O.OO....O.O...........|
..........O.....O.......O...........|
...........O...O....................|
............OO......................|
";

const STANDARD: &[(&str, &str)] = &[
    ("Glider", GLIDER),
    ("Blinker", BLINKER),
    ("Toad", TOAD),
    ("Beacon", BEACON),
    ("R-pentomino", R_PENTOMINO),
    ("Diehard", DIEHARD),
    ("Acorn", ACORN),
    ("Lightweight spaceship", LIGHTWEIGHT_SPACESHIP),
    ("Pulsar", PULSAR),
    ("Gosper glider gun", GOSPER_GLIDER_GUN),
];

/// The built-in presets, anchored at the origin, in menu order
pub fn standard_presets() -> Vec<Preset> {
    STANDARD
        .iter()
        .map(|(name, pattern)| Preset::from_pattern(*name, pattern))
        .collect()
}
