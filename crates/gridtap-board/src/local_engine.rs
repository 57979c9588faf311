//! The bundled [`BoardEngine`] implementation.

use gridtap_core::{CellIndex, Digit};
use rand::SeedableRng;
use rand_pcg::Pcg64Mcg;

use crate::{
    board::BoardCells,
    engine::{BoardEngine, Difficulty},
    generator, solver,
};

/// A self-contained puzzle engine: board storage plus the backtracking
/// solver and dig-and-verify generator from this crate.
///
/// The session only ever talks to [`BoardEngine`]; this type exists so the
/// application runs without an external collaborator.
#[derive(Debug, Clone)]
pub struct LocalEngine {
    cells: BoardCells,
    rng: Pcg64Mcg,
}

impl LocalEngine {
    /// Creates an engine seeded from the thread-local entropy source.
    #[must_use]
    pub fn new() -> Self {
        Self::with_seed(rand::random())
    }

    /// Creates an engine with a fixed seed, for reproducible puzzles.
    #[must_use]
    pub fn with_seed(seed: u64) -> Self {
        Self {
            cells: BoardCells::default(),
            rng: Pcg64Mcg::seed_from_u64(seed),
        }
    }
}

impl Default for LocalEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl BoardEngine for LocalEngine {
    fn board(&self) -> BoardCells {
        self.cells.clone()
    }

    fn set_board(&mut self, cells: BoardCells) {
        self.cells = cells;
    }

    fn set_cell(&mut self, cell: CellIndex, digit: Digit) {
        self.cells.set_value(cell, digit);
    }

    fn clear_cell(&mut self, cell: CellIndex) {
        self.cells.clear_cell(cell);
    }

    fn toggle_candidate(&mut self, cell: CellIndex, digit: Digit) {
        self.cells.toggle_candidate(cell, digit);
    }

    fn is_board_finished(&self) -> bool {
        self.cells.is_finished()
    }

    fn generate_board<'a>(
        &'a mut self,
        difficulty: Difficulty,
        on_ready: Box<dyn FnOnce(&BoardCells) + 'a>,
    ) {
        let puzzle = generator::generate(&mut self.rng, difficulty);
        self.cells = puzzle.problem;
        on_ready(&self.cells);
    }

    fn solve_all(&mut self) {
        if let Some(solved) = solver::solve(&self.cells) {
            // Keep given flags: overwrite only unfilled cells.
            for cell in CellIndex::all() {
                if self.cells[cell].is_unfilled()
                    && let Some(digit) = solved[cell].value
                {
                    self.cells.set_value(cell, digit);
                }
            }
        }
    }

    fn solve_step(&mut self) -> bool {
        if let Some((cell, digit)) = solver::next_single(&self.cells) {
            return self.cells.set_value(cell, digit);
        }
        if let Some(solved) = solver::solve(&self.cells) {
            for cell in CellIndex::all() {
                if self.cells[cell].is_unfilled()
                    && let Some(digit) = solved[cell].value
                {
                    return self.cells.set_value(cell, digit);
                }
            }
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generate_installs_problem_and_reports_via_callback() {
        let mut engine = LocalEngine::with_seed(3);
        let mut reported = None;
        engine.generate_board(
            Difficulty::Easy,
            Box::new(|cells| reported = Some(cells.clone())),
        );
        let reported = reported.unwrap();
        assert_eq!(reported, engine.board());
        assert!(!reported.is_finished());
    }

    #[test]
    fn solve_all_completes_the_board() {
        let mut engine = LocalEngine::with_seed(5);
        engine.generate_board(Difficulty::Medium, Box::new(|_| {}));
        assert!(!engine.is_board_finished());
        engine.solve_all();
        assert!(engine.is_board_finished());
    }

    #[test]
    fn solve_all_leaves_unsolvable_board_unchanged() {
        let mut engine = LocalEngine::with_seed(5);
        let board: BoardCells = format!("55{}", ".".repeat(79)).parse().unwrap();
        engine.set_board(board.clone());
        engine.solve_all();
        assert_eq!(engine.board(), board);
    }

    #[test]
    fn solve_step_places_one_digit() {
        let mut engine = LocalEngine::with_seed(9);
        engine.generate_board(Difficulty::Easy, Box::new(|_| {}));
        let before: usize = Digit::ALL
            .into_iter()
            .map(|d| engine.board().digit_count(d))
            .sum();
        assert!(engine.solve_step());
        let after: usize = Digit::ALL
            .into_iter()
            .map(|d| engine.board().digit_count(d))
            .sum();
        assert_eq!(after, before + 1);
    }

    #[test]
    fn board_snapshot_is_detached() {
        let mut engine = LocalEngine::with_seed(1);
        let mut snapshot = engine.board();
        snapshot.set_value(CellIndex::new(0), Digit::D9);
        assert!(engine.board()[CellIndex::new(0)].is_unfilled());
    }
}
