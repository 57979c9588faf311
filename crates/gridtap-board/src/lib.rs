//! Board state and the puzzle engine collaborator for Gridtap.
//!
//! The interaction session treats puzzle generation and solving as a black
//! box behind the [`BoardEngine`] trait; this crate provides both the trait
//! and [`LocalEngine`], a self-contained implementation backed by a bounded
//! backtracking solver and a dig-and-verify generator.
//!
//! The board itself is a plain snapshot type, [`BoardCells`]: 81 cells, each
//! carrying an optional final value, a given flag, and a scratch candidate
//! set. Mutations that would touch a given cell are silent no-ops — callers
//! are expected to pre-check, and stale UI events must never corrupt the
//! puzzle.
//!
//! # Examples
//!
//! ```
//! use gridtap_board::{BoardCells, BoardEngine, Difficulty, LocalEngine};
//!
//! let mut engine = LocalEngine::with_seed(42);
//! let mut problem = BoardCells::default();
//! engine.generate_board(Difficulty::Easy, Box::new(|cells| problem = cells.clone()));
//! assert!(!problem.is_finished());
//!
//! engine.solve_all();
//! assert!(engine.is_board_finished());
//! ```

pub mod board;
pub mod cell;
pub mod engine;
pub mod generator;
pub mod solver;

mod local_engine;

pub use self::{
    board::{BoardCells, BoardParseError},
    cell::Cell,
    engine::{BoardEngine, Difficulty},
    generator::GeneratedPuzzle,
    local_engine::LocalEngine,
};
