//! The 81-cell board snapshot.

use std::{
    fmt::{self, Display},
    ops::Index,
    str::FromStr,
};

use gridtap_core::{CellIndex, CellSet, Digit};

use crate::cell::Cell;

/// A full 9×9 board state: 81 [`Cell`]s in row-major order.
///
/// This is a value type. Engines hand out clones of their internal state, so
/// a `BoardCells` held by a caller never changes behind its back; history
/// snapshots are plain clones.
///
/// # Examples
///
/// ```
/// use gridtap_board::BoardCells;
/// use gridtap_core::{CellIndex, Digit};
///
/// let board: BoardCells = format!("53{}", ".".repeat(79)).parse().unwrap();
/// assert_eq!(board[CellIndex::new(0)].value, Some(Digit::D5));
/// assert!(board[CellIndex::new(0)].is_given);
/// assert!(board[CellIndex::new(2)].is_unfilled());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardCells {
    cells: [Cell; 81],
}

impl Default for BoardCells {
    fn default() -> Self {
        Self {
            cells: [Cell::EMPTY; 81],
        }
    }
}

impl BoardCells {
    /// Returns a mutable reference to a cell, bypassing the given-cell guard.
    ///
    /// Engine-internal: the public mutators below enforce the guard.
    pub(crate) const fn cell_mut(&mut self, cell: CellIndex) -> &mut Cell {
        &mut self.cells[cell.as_usize()]
    }

    /// Sets a final value on a non-given cell, clearing its candidates.
    ///
    /// Returns `false` without touching anything if the cell is a given.
    pub fn set_value(&mut self, cell: CellIndex, digit: Digit) -> bool {
        let slot = self.cell_mut(cell);
        if slot.is_given {
            return false;
        }
        *slot = Cell::filled(digit);
        true
    }

    /// Resets a non-given cell to empty, dropping value and candidates.
    ///
    /// Returns `true` if anything changed.
    pub fn clear_cell(&mut self, cell: CellIndex) -> bool {
        let slot = self.cell_mut(cell);
        if slot.is_given || *slot == Cell::EMPTY {
            return false;
        }
        *slot = Cell::EMPTY;
        true
    }

    /// Flips a scratch candidate on an unfilled, non-given cell.
    ///
    /// Returns `false` without touching anything on given or filled cells.
    pub fn toggle_candidate(&mut self, cell: CellIndex, digit: Digit) -> bool {
        let slot = self.cell_mut(cell);
        if slot.is_given || slot.value.is_some() {
            return false;
        }
        slot.candidates.toggle(digit);
        true
    }

    /// Returns whether all 81 cells hold a value.
    ///
    /// This tests *filled*, not *correct*: a board full of wrong digits is
    /// still finished by this predicate.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.cells.iter().all(|cell| cell.value.is_some())
    }

    /// Returns the number of cells currently holding `digit`, wrong
    /// placements included.
    #[must_use]
    pub fn digit_count(&self, digit: Digit) -> usize {
        self.cells
            .iter()
            .filter(|cell| cell.value == Some(digit))
            .count()
    }

    /// Returns the set of cells currently holding `digit`.
    #[must_use]
    pub fn digit_positions(&self, digit: Digit) -> CellSet {
        CellIndex::all()
            .filter(|&cell| self[cell].value == Some(digit))
            .collect()
    }

    /// Returns whether any cell in `cells` is unfilled.
    #[must_use]
    pub fn any_unfilled(&self, cells: impl IntoIterator<Item = CellIndex>) -> bool {
        cells.into_iter().any(|cell| self[cell].is_unfilled())
    }

    /// Returns an iterator over `(index, cell)` pairs in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (CellIndex, &Cell)> {
        CellIndex::all().map(|idx| (idx, &self[idx]))
    }

    /// Returns the board as an 81-character string, `.` for unfilled cells.
    ///
    /// The inverse of [`BoardCells::from_str`], except that given flags and
    /// candidates are not representable.
    #[must_use]
    pub fn value_string(&self) -> String {
        self.cells
            .iter()
            .map(|cell| cell.value.map_or('.', |digit| char::from(b'0' + digit.value())))
            .collect()
    }
}

impl Index<CellIndex> for BoardCells {
    type Output = Cell;

    fn index(&self, cell: CellIndex) -> &Cell {
        &self.cells[cell.as_usize()]
    }
}

/// Error parsing a board from its 81-character string form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum BoardParseError {
    /// The string did not contain exactly 81 cell characters.
    #[display("expected 81 cells, found {_0}")]
    WrongLength(#[error(not(source))] usize),
    /// A character other than `1`-`9`, `.`, or `0` was found.
    #[display("invalid cell character {_0:?}")]
    InvalidChar(#[error(not(source))] char),
}

impl FromStr for BoardCells {
    type Err = BoardParseError;

    /// Parses an 81-character grid; digits become *given* cells, `.` and `0`
    /// become empty cells. ASCII whitespace is ignored.
    fn from_str(s: &str) -> Result<Self, BoardParseError> {
        let chars: Vec<char> = s.chars().filter(|ch| !ch.is_ascii_whitespace()).collect();
        if chars.len() != 81 {
            return Err(BoardParseError::WrongLength(chars.len()));
        }
        let mut board = Self::default();
        for (index, &ch) in CellIndex::all().zip(&chars) {
            *board.cell_mut(index) = match ch {
                '.' | '0' => Cell::EMPTY,
                _ => Cell::given(Digit::from_char(ch).ok_or(BoardParseError::InvalidChar(ch))?),
            };
        }
        Ok(board)
    }
}

impl Display for BoardCells {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.value_string())
    }
}
