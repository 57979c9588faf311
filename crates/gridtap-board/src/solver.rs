//! Bounded backtracking over board snapshots.
//!
//! This is deliberately a plain solver: the session never looks inside it,
//! and generation only needs "does exactly one solution exist" plus "give me
//! the solved grid".

use gridtap_core::{CellIndex, Digit, DigitSet, House};

use crate::board::BoardCells;

/// Returns the digits still placeable at `cell` under the row/column/box
/// rules, given the values currently on the board.
#[must_use]
pub fn candidates_for(board: &BoardCells, cell: CellIndex) -> DigitSet {
    let mut digits = DigitSet::FULL;
    for other in CellIndex::all() {
        if cell.is_peer_of(other)
            && let Some(value) = board[other].value
        {
            digits.remove(value);
        }
    }
    digits
}

/// Solves the board, returning the completed grid if one exists.
///
/// Player-filled values are treated as constraints; a board made unsolvable
/// by wrong entries yields `None`.
#[must_use]
pub fn solve(board: &BoardCells) -> Option<BoardCells> {
    let mut work = board.clone();
    if has_contradiction(&work) {
        return None;
    }
    if fill_next(&mut work) { Some(work) } else { None }
}

/// Counts solutions up to `limit` (typically 2, to test uniqueness).
#[must_use]
pub fn count_solutions(board: &BoardCells, limit: usize) -> usize {
    let mut work = board.clone();
    if has_contradiction(&work) {
        return 0;
    }
    let mut found = 0;
    let _ = fill_all(&mut work, &mut found, limit);
    found
}

/// Finds the next forced placement: a naked single (only one candidate in a
/// cell) or a hidden single (only one home for a digit in a house).
#[must_use]
pub fn next_single(board: &BoardCells) -> Option<(CellIndex, Digit)> {
    for cell in CellIndex::all() {
        if board[cell].is_unfilled() {
            let candidates = candidates_for(board, cell);
            if candidates.len() == 1 {
                return Some((cell, candidates.first()?));
            }
        }
    }

    for house in House::ROWS
        .into_iter()
        .chain(House::COLUMNS)
        .chain(House::BOXES)
    {
        for digit in Digit::ALL {
            let mut home = None;
            let mut count = 0;
            for cell in house.cells() {
                if board[cell].value == Some(digit) {
                    count = 0;
                    break;
                }
                if board[cell].is_unfilled() && candidates_for(board, cell).contains(digit) {
                    home = Some(cell);
                    count += 1;
                }
            }
            if count == 1 {
                return home.map(|cell| (cell, digit));
            }
        }
    }

    None
}

fn has_contradiction(board: &BoardCells) -> bool {
    for cell in CellIndex::all() {
        if let Some(value) = board[cell].value {
            for other in CellIndex::all() {
                if cell.is_peer_of(other) && board[other].value == Some(value) {
                    return true;
                }
            }
        }
    }
    false
}

// Depth-first fill stopping at the first solution. Leaves the board solved
// on success, restored on failure.
fn fill_next(board: &mut BoardCells) -> bool {
    let Some(cell) = most_constrained_cell(board) else {
        return true;
    };
    for digit in candidates_for(board, cell) {
        board.set_value(cell, digit);
        if fill_next(board) {
            return true;
        }
        board.clear_cell(cell);
    }
    false
}

// Exhaustive fill counting solutions up to `limit`. The board is restored on
// return.
fn fill_all(board: &mut BoardCells, found: &mut usize, limit: usize) -> bool {
    let Some(cell) = most_constrained_cell(board) else {
        *found += 1;
        return *found >= limit;
    };
    for digit in candidates_for(board, cell) {
        board.set_value(cell, digit);
        let done = fill_all(board, found, limit);
        board.clear_cell(cell);
        if done {
            return true;
        }
    }
    false
}

fn most_constrained_cell(board: &BoardCells) -> Option<CellIndex> {
    let mut best: Option<(CellIndex, usize)> = None;
    for cell in CellIndex::all() {
        if board[cell].is_unfilled() {
            let count = candidates_for(board, cell).len();
            if count == 0 {
                // Dead end; force backtracking immediately.
                return Some(cell);
            }
            if best.is_none_or(|(_, n)| count < n) {
                best = Some((cell, count));
            }
        }
    }
    best.map(|(cell, _)| cell)
}
