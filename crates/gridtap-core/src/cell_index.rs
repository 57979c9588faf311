//! Board positions as flat indices.

use std::fmt::{self, Display};

/// Error returned when constructing a [`CellIndex`] from an out-of-range value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("cell index out of range: {_0}")]
pub struct CellIndexOutOfRange(#[error(not(source))] pub usize);

/// A board position as a flat index in the range 0-80, row-major.
///
/// Row 0 is the top row, column 0 the leftmost column; `index = row * 9 + col`.
/// Boxes are numbered 0-8 left to right, top to bottom.
///
/// # Examples
///
/// ```
/// use gridtap_core::CellIndex;
///
/// let cell = CellIndex::from_row_col(4, 7);
/// assert_eq!(cell.as_usize(), 43);
/// assert_eq!(cell.row(), 4);
/// assert_eq!(cell.col(), 7);
/// assert_eq!(cell.box_index(), 5);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CellIndex(u8);

impl CellIndex {
    /// Number of cells on the board.
    pub const COUNT: usize = 81;

    /// Creates a cell index.
    ///
    /// # Panics
    ///
    /// Panics if `index` is not in the range 0-80.
    #[must_use]
    pub const fn new(index: u8) -> Self {
        assert!(index < 81, "cell index out of range");
        Self(index)
    }

    /// Fallible counterpart of [`CellIndex::new`] for untrusted values.
    ///
    /// # Errors
    ///
    /// Returns [`CellIndexOutOfRange`] if `index` is 81 or greater.
    #[expect(clippy::cast_possible_truncation)]
    pub const fn try_new(index: usize) -> Result<Self, CellIndexOutOfRange> {
        if index < 81 {
            Ok(Self(index as u8))
        } else {
            Err(CellIndexOutOfRange(index))
        }
    }

    /// Creates a cell index from row and column coordinates.
    ///
    /// # Panics
    ///
    /// Panics if either coordinate is 9 or greater.
    #[must_use]
    pub const fn from_row_col(row: u8, col: u8) -> Self {
        assert!(row < 9 && col < 9, "row/col out of range");
        Self(row * 9 + col)
    }

    /// Returns an iterator over all 81 cell indices in row-major order.
    pub fn all() -> impl DoubleEndedIterator<Item = Self> + ExactSizeIterator {
        (0u8..81).map(Self)
    }

    /// Returns the raw index in the range 0-80.
    #[must_use]
    pub const fn as_usize(self) -> usize {
        self.0 as usize
    }

    /// Returns the row in the range 0-8.
    #[must_use]
    pub const fn row(self) -> u8 {
        self.0 / 9
    }

    /// Returns the column in the range 0-8.
    #[must_use]
    pub const fn col(self) -> u8 {
        self.0 % 9
    }

    /// Returns the 3×3 box index in the range 0-8.
    #[must_use]
    pub const fn box_index(self) -> u8 {
        (self.row() / 3) * 3 + self.col() / 3
    }

    /// Returns whether `other` shares a row, column, or box with this cell.
    ///
    /// A cell is not a peer of itself.
    #[must_use]
    pub const fn is_peer_of(self, other: Self) -> bool {
        self.0 != other.0
            && (self.row() == other.row()
                || self.col() == other.col()
                || self.box_index() == other.box_index())
    }
}

impl Display for CellIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "r{}c{}", self.row() + 1, self.col() + 1)
    }
}
