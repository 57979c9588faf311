//! Puzzle generation: fill a full grid, then dig holes while the solution
//! stays unique.

use rand::{Rng, seq::SliceRandom};
use sha2::{Digest, Sha256};

use gridtap_core::{CellIndex, Digit};

use crate::{board::BoardCells, engine::Difficulty, solver};

/// A generated puzzle: the problem grid (givens only), its solution, and a
/// stable identifier derived from the problem.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedPuzzle {
    /// The problem grid; every filled cell is a given.
    pub problem: BoardCells,
    /// The unique solution of `problem`.
    pub solution: BoardCells,
    /// Hex digest of the problem grid, used as the solved-store key.
    pub id: String,
}

impl Difficulty {
    /// Number of givens the digger aims to leave on the board.
    ///
    /// The digger may stop early when removing any further clue would break
    /// uniqueness, so easier difficulties are a floor, not a guarantee.
    #[must_use]
    pub(crate) const fn target_givens(self) -> usize {
        match self {
            Self::Easy => 40,
            Self::Medium => 34,
            Self::Hard => 28,
            Self::VeryHard => 24,
        }
    }
}

/// Generates a puzzle of the requested difficulty.
#[must_use]
pub fn generate<R: Rng>(rng: &mut R, difficulty: Difficulty) -> GeneratedPuzzle {
    let solution = fill_full_grid(rng);
    let problem = dig_holes(rng, &solution, difficulty.target_givens());
    let id = puzzle_id(&problem);
    GeneratedPuzzle {
        problem,
        solution,
        id,
    }
}

/// Derives the stable puzzle identifier from a problem grid.
#[must_use]
pub fn puzzle_id(problem: &BoardCells) -> String {
    let digest = Sha256::digest(problem.value_string().as_bytes());
    digest
        .iter()
        .take(8)
        .map(|byte| format!("{byte:02x}"))
        .collect()
}

// Backtracking fill with per-cell shuffled digit order, so every run yields
// a different complete grid.
fn fill_full_grid<R: Rng>(rng: &mut R) -> BoardCells {
    let mut board = BoardCells::default();
    let filled = fill_from(rng, &mut board, 0);
    debug_assert!(filled, "an empty board is always completable");

    // Re-parse so the completed grid is all givens.
    board
        .value_string()
        .parse()
        .unwrap_or_else(|_| unreachable!("completed grid is 81 digits"))
}

fn fill_from<R: Rng>(rng: &mut R, board: &mut BoardCells, index: usize) -> bool {
    let Ok(cell) = CellIndex::try_new(index) else {
        return true;
    };
    let mut digits: Vec<Digit> = solver::candidates_for(board, cell).iter().collect();
    digits.shuffle(rng);
    for digit in digits {
        board.set_value(cell, digit);
        if fill_from(rng, board, index + 1) {
            return true;
        }
        board.clear_cell(cell);
    }
    false
}

// Removes clues in random order, restoring any removal that lets a second
// solution appear, until the target clue count is reached or no removable
// clue remains.
fn dig_holes<R: Rng>(rng: &mut R, solution: &BoardCells, target_givens: usize) -> BoardCells {
    let mut values: Vec<char> = solution.value_string().chars().collect();
    let mut order: Vec<usize> = (0..CellIndex::COUNT).collect();
    order.shuffle(rng);

    let mut givens = CellIndex::COUNT;
    for index in order {
        if givens <= target_givens {
            break;
        }
        let kept = values[index];
        values[index] = '.';
        let candidate: BoardCells = values
            .iter()
            .collect::<String>()
            .parse()
            .unwrap_or_else(|_| unreachable!("digging only replaces digits with dots"));
        if solver::count_solutions(&candidate, 2) == 1 {
            givens -= 1;
        } else {
            values[index] = kept;
        }
    }

    values
        .iter()
        .collect::<String>()
        .parse()
        .unwrap_or_else(|_| unreachable!("digging only replaces digits with dots"))
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand_pcg::Pcg64Mcg;

    use super::*;

    #[test]
    fn generated_puzzle_is_unique_and_consistent() {
        let mut rng = Pcg64Mcg::seed_from_u64(7);
        let puzzle = generate(&mut rng, Difficulty::Easy);

        assert!(puzzle.solution.is_finished());
        assert_eq!(solver::count_solutions(&puzzle.problem, 2), 1);
        assert_eq!(
            solver::solve(&puzzle.problem).unwrap().value_string(),
            puzzle.solution.value_string()
        );

        // Every problem clue is a given and matches the solution.
        for (cell, state) in puzzle.problem.iter() {
            if let Some(value) = state.value {
                assert!(state.is_given);
                assert_eq!(puzzle.solution[cell].value, Some(value));
            }
        }
    }

    #[test]
    fn id_is_stable_for_the_same_problem() {
        let mut rng = Pcg64Mcg::seed_from_u64(11);
        let puzzle = generate(&mut rng, Difficulty::Medium);
        assert_eq!(puzzle.id, puzzle_id(&puzzle.problem));
        assert_eq!(puzzle.id.len(), 16);
    }

    #[test]
    fn different_seeds_differ() {
        let a = generate(&mut Pcg64Mcg::seed_from_u64(1), Difficulty::Easy);
        let b = generate(&mut Pcg64Mcg::seed_from_u64(2), Difficulty::Easy);
        assert_ne!(a.problem, b.problem);
    }
}
