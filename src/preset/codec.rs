//! Text grammar for preset patterns.
//!
//! A pattern is read left to right with a cursor starting at `(0, 0)`:
//!
//! - `.` advances one column (dead cell)
//! - `O` marks a living cell at the cursor, then advances one column
//! - `|` ends the row: the column resets to 0 and the row advances by one
//!
//! Patterns are usually authored as multi-line literals that start and end
//! with a line break. Surrounding whitespace is stripped before decoding and
//! whitespace inside the body carries no meaning.

use crate::error::{LifeError, Result};
use std::collections::BTreeSet;
use std::convert::Infallible;

pub const DEAD: char = '.';
pub const LIVING: char = 'O';
pub const ROW_END: char = '|';

/// Decode a pattern into living-cell offsets, ignoring unknown characters
pub fn decode(pattern: &str) -> Vec<(i32, i32)> {
    match scan(pattern, |_, _| Ok::<(), Infallible>(())) {
        Ok(coords) => coords,
        Err(never) => match never {},
    }
}

/// Decode a pattern, rejecting any character outside the grammar.
///
/// Whitespace is still allowed so multi-line literals decode the same way.
pub fn decode_strict(pattern: &str) -> Result<Vec<(i32, i32)>> {
    scan(pattern, |offset, ch| Err(LifeError::InvalidPattern { ch, offset }))
}

fn scan<E, F>(pattern: &str, mut on_unknown: F) -> std::result::Result<Vec<(i32, i32)>, E>
where
    F: FnMut(usize, char) -> std::result::Result<(), E>,
{
    let mut coords = Vec::new();
    let leading = pattern.len() - pattern.trim_start().len();
    let body = pattern.trim();

    let (mut x, mut y) = (0i32, 0i32);
    for (offset, ch) in body.char_indices() {
        match ch {
            DEAD => x += 1,
            LIVING => {
                coords.push((x, y));
                x += 1;
            }
            ROW_END => {
                x = 0;
                y += 1;
            }
            c if c.is_whitespace() => {}
            c => on_unknown(leading + offset, c)?,
        }
    }

    Ok(coords)
}

/// Encode living-cell offsets in canonical row-major form.
///
/// Every row from 0 to the last occupied row is emitted and terminated by `|`;
/// a row stops after its last living cell. Duplicates collapse, and negative
/// offsets cannot be expressed.
pub fn encode(coords: &[(i32, i32)]) -> Result<String> {
    if let Some(&(x, y)) = coords.iter().find(|&&(x, y)| x < 0 || y < 0) {
        return Err(LifeError::UnencodableCoordinate { x, y });
    }

    // Ordered by (row, column)
    let cells: BTreeSet<(i32, i32)> = coords.iter().map(|&(x, y)| (y, x)).collect();
    let last_row = match cells.iter().next_back() {
        Some(&(y, _)) => y,
        None => return Ok(String::new()),
    };

    let mut out = String::new();
    for row in 0..=last_row {
        let mut column = 0;
        for &(_, x) in cells.range((row, 0)..(row + 1, 0)) {
            while column < x {
                out.push(DEAD);
                column += 1;
            }
            out.push(LIVING);
            column += 1;
        }
        out.push(ROW_END);
    }

    Ok(out)
}
