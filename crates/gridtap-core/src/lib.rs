//! Core data structures for the Gridtap sudoku application.
//!
//! This crate holds the fundamental, dependency-free building blocks shared
//! by the board engine, the interaction session, and the UI shell:
//!
//! - [`digit`]: type-safe sudoku digits 1-9
//! - [`cell_index`]: board positions as flat indices 0-80
//! - [`digit_set`]: a 9-bit set of digits
//! - [`cell_set`]: an 81-bit set of board positions
//! - [`house`]: rows, columns, and 3×3 boxes
//! - [`peers`]: the precomputed peer adjacency table
//!
//! Everything here is pure data: computed once, cheap to copy, and free of
//! interior mutability.
//!
//! # Examples
//!
//! ```
//! use gridtap_core::{CellIndex, Digit, PeerTable};
//!
//! let peers = PeerTable::new();
//! let cell = CellIndex::new(40); // centre of the board
//! assert_eq!(peers[cell].row.len(), 8);
//! assert!(peers[cell].all.contains(cell));
//! assert_eq!(Digit::D5.value(), 5);
//! ```

pub mod cell_index;
pub mod cell_set;
pub mod digit;
pub mod digit_set;
pub mod house;
pub mod peers;

pub use self::{
    cell_index::CellIndex,
    cell_set::CellSet,
    digit::Digit,
    digit_set::DigitSet,
    house::House,
    peers::{CellPeers, PeerTable},
};
