//! The puzzle engine collaborator contract.

use gridtap_core::{CellIndex, Digit};

use crate::board::BoardCells;

/// Difficulty labels offered by the new-game flow.
///
/// The labels double as persistence keys for the solved-puzzle store, so
/// their string forms are stable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display, derive_more::IsVariant)]
pub enum Difficulty {
    /// Mostly singles.
    #[display("easy")]
    Easy,
    /// Requires simple eliminations.
    #[display("medium")]
    Medium,
    /// Requires deeper scanning.
    #[display("hard")]
    Hard,
    /// Sparse clue count.
    #[display("very hard")]
    VeryHard,
}

impl Difficulty {
    /// All difficulties, easiest first.
    pub const ALL: [Self; 4] = [Self::Easy, Self::Medium, Self::Hard, Self::VeryHard];

    /// Returns the stable label used for persistence and display.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Easy => "easy",
            Self::Medium => "medium",
            Self::Hard => "hard",
            Self::VeryHard => "very hard",
        }
    }

    /// Parses a stable label back into a difficulty.
    #[must_use]
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|d| d.label() == label)
    }
}

/// The external puzzle engine: board storage plus opaque generation and
/// solving.
///
/// All operations are synchronous from the caller's perspective except
/// [`generate_board`](BoardEngine::generate_board), which delivers its result
/// through a callback. Mutations of given cells are silent no-ops throughout;
/// callers that care must pre-check via the board snapshot.
pub trait BoardEngine {
    /// Returns a snapshot of the current board.
    ///
    /// The returned value is owned by the caller; mutating it does not affect
    /// the engine.
    fn board(&self) -> BoardCells;

    /// Replaces the entire board state.
    fn set_board(&mut self, cells: BoardCells);

    /// Sets a final value. No-op if the cell is a given.
    fn set_cell(&mut self, cell: CellIndex, digit: Digit);

    /// Resets a cell's value and candidates. No-op if the cell is a given.
    fn clear_cell(&mut self, cell: CellIndex);

    /// Flips a scratch candidate on an unfilled cell. No-op on given or
    /// filled cells.
    fn toggle_candidate(&mut self, cell: CellIndex, digit: Digit);

    /// Returns whether all 81 cells hold a value (filled, not necessarily
    /// correct).
    fn is_board_finished(&self) -> bool;

    /// Generates a fresh puzzle, installs it as the current board, and hands
    /// a snapshot of the problem to `on_ready`.
    fn generate_board<'a>(
        &'a mut self,
        difficulty: Difficulty,
        on_ready: Box<dyn FnOnce(&BoardCells) + 'a>,
    );

    /// Solves the current board in place, keeping compatible player entries.
    ///
    /// If the board admits no solution the state is left unchanged.
    fn solve_all(&mut self);

    /// Places a single solver-derived digit. Returns whether a placement was
    /// made.
    fn solve_step(&mut self) -> bool;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn difficulty_labels_roundtrip() {
        for difficulty in Difficulty::ALL {
            assert_eq!(Difficulty::from_label(difficulty.label()), Some(difficulty));
            assert_eq!(difficulty.to_string(), difficulty.label());
        }
        assert_eq!(Difficulty::from_label("impossible"), None);
    }
}
