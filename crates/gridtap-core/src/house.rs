//! Sudoku houses: rows, columns, and 3×3 boxes.

use crate::{CellIndex, CellSet};

/// A sudoku house (row, column, or 3×3 box).
///
/// Houses are the three unit types whose completion triggers the win
/// animations, and the grouping used by the full-board celebration waves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum House {
    /// A row identified by its index (0-8, top to bottom).
    Row(u8),
    /// A column identified by its index (0-8, left to right).
    Column(u8),
    /// A 3×3 box identified by its index (0-8, left to right, top to bottom).
    Box(u8),
}

impl House {
    /// All rows, top to bottom.
    pub const ROWS: [Self; 9] = Self::build(HouseKind::Row);

    /// All columns, left to right.
    pub const COLUMNS: [Self; 9] = Self::build(HouseKind::Column);

    /// All boxes, left to right, top to bottom.
    pub const BOXES: [Self; 9] = Self::build(HouseKind::Box);

    const fn build(kind: HouseKind) -> [Self; 9] {
        let mut houses = [Self::Row(0); 9];
        let mut i = 0u8;
        while i < 9 {
            houses[i as usize] = match kind {
                HouseKind::Row => Self::Row(i),
                HouseKind::Column => Self::Column(i),
                HouseKind::Box => Self::Box(i),
            };
            i += 1;
        }
        houses
    }

    /// Returns the three houses containing `cell`: its row, column, and box.
    #[must_use]
    pub const fn of(cell: CellIndex) -> [Self; 3] {
        [
            Self::Row(cell.row()),
            Self::Column(cell.col()),
            Self::Box(cell.box_index()),
        ]
    }

    /// Returns the cells of this house in reading order.
    #[must_use]
    pub fn cells(self) -> [CellIndex; 9] {
        let mut cells = [CellIndex::new(0); 9];
        for (i, slot) in cells.iter_mut().enumerate() {
            #[expect(clippy::cast_possible_truncation)]
            let i = i as u8;
            *slot = match self {
                Self::Row(y) => CellIndex::from_row_col(y, i),
                Self::Column(x) => CellIndex::from_row_col(i, x),
                Self::Box(b) => {
                    CellIndex::from_row_col((b / 3) * 3 + i / 3, (b % 3) * 3 + i % 3)
                }
            };
        }
        cells
    }

    /// Returns the cells of this house as a set.
    #[must_use]
    pub fn cell_set(self) -> CellSet {
        self.cells().into_iter().collect()
    }
}

#[derive(Debug, Clone, Copy)]
enum HouseKind {
    Row,
    Column,
    Box,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn each_house_has_nine_distinct_cells() {
        for house in House::ROWS.into_iter().chain(House::COLUMNS).chain(House::BOXES) {
            assert_eq!(house.cell_set().len(), 9);
        }
    }

    #[test]
    fn houses_of_cell_contain_it() {
        for cell in CellIndex::all() {
            for house in House::of(cell) {
                assert!(house.cell_set().contains(cell));
            }
        }
    }

    #[test]
    fn box_cells_match_geometry() {
        let cells = House::Box(4).cells();
        assert_eq!(cells[0], CellIndex::from_row_col(3, 3));
        assert_eq!(cells[8], CellIndex::from_row_col(5, 5));
    }

    #[test]
    fn rows_and_columns_cover_the_board() {
        let mut covered = CellSet::EMPTY;
        for row in House::ROWS {
            covered |= row.cell_set();
        }
        assert_eq!(covered, CellSet::FULL);

        let mut covered = CellSet::EMPTY;
        for column in House::COLUMNS {
            covered |= column.cell_set();
        }
        assert_eq!(covered, CellSet::FULL);
    }
}
