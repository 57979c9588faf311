//! A single board cell.

use gridtap_core::{Digit, DigitSet};

/// One cell of the 9×9 board.
///
/// A cell holds at most one of: a final value, or a set of scratch
/// candidates. Givens are puzzle clues and immutable for the game's
/// duration; every mutating operation on them is a no-op at this layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Cell {
    /// The final value, if any.
    pub value: Option<Digit>,
    /// Whether this cell is a puzzle-supplied clue.
    pub is_given: bool,
    /// Scratch candidate marks; meaningful only while `value` is `None`.
    pub candidates: DigitSet,
}

impl Cell {
    /// An empty, non-given cell with no candidates.
    pub const EMPTY: Self = Self {
        value: None,
        is_given: false,
        candidates: DigitSet::EMPTY,
    };

    /// Creates a given cell holding `digit`.
    #[must_use]
    pub const fn given(digit: Digit) -> Self {
        Self {
            value: Some(digit),
            is_given: true,
            candidates: DigitSet::EMPTY,
        }
    }

    /// Creates a player-filled cell holding `digit`.
    #[must_use]
    pub const fn filled(digit: Digit) -> Self {
        Self {
            value: Some(digit),
            is_given: false,
            candidates: DigitSet::EMPTY,
        }
    }

    /// Returns whether the cell has no final value.
    #[must_use]
    pub const fn is_unfilled(&self) -> bool {
        self.value.is_none()
    }

    /// Returns whether the cell holds player input that erasing would remove.
    #[must_use]
    pub const fn has_erasable_input(&self) -> bool {
        !self.is_given && (self.value.is_some() || !self.candidates.is_empty())
    }
}
