//! Player anti-candidate marks.

use gridtap_core::{CellIndex, Digit, DigitSet};

/// Per-cell anti-candidate sets: digits the player has ruled out for a cell.
///
/// Anti-candidates live outside the board engine and have an independent
/// lifecycle: they survive board snapshots only through the history store,
/// and the whole structure is rebuilt empty when a new puzzle loads.
///
/// Storage is deliberately dumb. The "never a candidate and an
/// anti-candidate at once" invariant is maintained by the cycling command,
/// and the "only on unfilled, non-given cells" convention by callers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Annotations {
    cells: [DigitSet; 81],
}

impl Default for Annotations {
    fn default() -> Self {
        Self::new()
    }
}

impl Annotations {
    /// Creates 81 empty anti-candidate sets.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            cells: [DigitSet::EMPTY; 81],
        }
    }

    /// Returns the anti-candidate set for a cell.
    #[must_use]
    pub const fn get(&self, cell: CellIndex) -> DigitSet {
        self.cells[cell.as_usize()]
    }

    /// Returns whether `digit` is marked impossible for `cell`.
    #[must_use]
    pub const fn contains(&self, cell: CellIndex, digit: Digit) -> bool {
        self.get(cell).contains(digit)
    }

    /// Flips an anti-candidate mark; returns `true` if it is now set.
    pub const fn toggle(&mut self, cell: CellIndex, digit: Digit) -> bool {
        self.cells[cell.as_usize()].toggle(digit)
    }

    /// Marks `digit` impossible for `cell`.
    pub const fn insert(&mut self, cell: CellIndex, digit: Digit) {
        self.cells[cell.as_usize()].insert(digit);
    }

    /// Removes an anti-candidate mark; returns `true` if it was present.
    pub const fn remove(&mut self, cell: CellIndex, digit: Digit) -> bool {
        self.cells[cell.as_usize()].remove(digit)
    }

    /// Empties a cell's anti-candidates, as happens on erase or fill.
    ///
    /// Returns `true` if the cell had any marks.
    pub const fn clear_cell(&mut self, cell: CellIndex) -> bool {
        let had = !self.cells[cell.as_usize()].is_empty();
        self.cells[cell.as_usize()] = DigitSet::EMPTY;
        had
    }

    /// Rebuilds all 81 sets empty, for a fresh puzzle.
    pub fn reset(&mut self) {
        *self = Self::new();
    }
}
