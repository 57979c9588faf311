//! The layered selection model and modal overlays.

use gridtap_core::{CellIndex, CellSet, Digit};

/// The selection layer: exactly one mode is active at a time.
///
/// The original design tracked these as three independent variables plus a
/// "selection was acted on" flag; modelling them as a tagged enum makes the
/// mutual exclusion structural. Activating any mode clears the others.
#[derive(Debug, Clone, PartialEq, Eq, Default, derive_more::IsVariant)]
pub enum SelectionState {
    /// Nothing selected or targeted.
    #[default]
    Idle,
    /// A set of empty cells picked by tap or long-press drag.
    Multi {
        /// The selected cells. May be empty after deselecting the last cell.
        cells: CellSet,
        /// Whether an action has consumed this selection since its last
        /// membership change. A consumed selection is replaced, not extended,
        /// by the next plain tap.
        actioned: bool,
    },
    /// The single last-tapped filled cell.
    Targeted {
        /// The tapped cell.
        cell: CellIndex,
    },
    /// Direct-entry mode on one cell.
    InputMode {
        /// The cell receiving direct digit entry.
        cell: CellIndex,
    },
}

impl SelectionState {
    /// Returns the multi-selected cells, or the empty set in other modes.
    #[must_use]
    pub fn multi_cells(&self) -> CellSet {
        match self {
            Self::Multi { cells, .. } => *cells,
            _ => CellSet::EMPTY,
        }
    }

    /// Returns the tapped target, if that mode is active.
    #[must_use]
    pub fn target(&self) -> Option<CellIndex> {
        match self {
            Self::Targeted { cell } => Some(*cell),
            _ => None,
        }
    }

    /// Returns the input-mode cell, if that mode is active.
    #[must_use]
    pub fn input_cell(&self) -> Option<CellIndex> {
        match self {
            Self::InputMode { cell } => Some(*cell),
            _ => None,
        }
    }

    /// Returns whether the current multi-selection has been consumed by an
    /// action.
    #[must_use]
    pub fn is_actioned(&self) -> bool {
        matches!(self, Self::Multi { actioned: true, .. })
    }

    /// Drops whatever is active.
    pub fn clear(&mut self) {
        *self = Self::Idle;
    }

    /// Marks the active multi-selection as consumed by an action.
    pub fn mark_actioned(&mut self) {
        if let Self::Multi { actioned, .. } = self {
            *actioned = true;
        }
    }

    /// Toggles a cell's multi-selection membership.
    ///
    /// Non-additive toggles replace the whole selection with this cell;
    /// additive toggles keep existing members (and always leave any tapped
    /// target or input-mode cell cleared, since multi-select is a mode).
    /// Either way the fresh selection is unactioned.
    pub fn toggle_cell(&mut self, cell: CellIndex, additive: bool) {
        let mut cells = if additive {
            self.multi_cells()
        } else {
            CellSet::EMPTY
        };
        if !cells.remove(cell) {
            cells.insert(cell);
        }
        *self = Self::Multi {
            cells,
            actioned: false,
        };
    }

    /// Applies one drag step to the multi-selection.
    ///
    /// Switches to multi-select mode if it was not active.
    pub fn drag_apply(&mut self, cell: CellIndex, mode: DragMode) {
        let mut cells = self.multi_cells();
        match mode {
            DragMode::Select => {
                cells.insert(cell);
            }
            DragMode::Deselect => {
                cells.remove(cell);
            }
        }
        *self = Self::Multi {
            cells,
            actioned: false,
        };
    }
}

/// Whether a long-press drag is adding to or removing from the selection.
///
/// Fixed when the long-press fires: pressing an unselected cell drags in
/// select mode, pressing a selected one drags in deselect mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragMode {
    /// Cells under the drag are added.
    Select,
    /// Cells under the drag are removed.
    Deselect,
}

/// A modal input overlay. While one is open, grid pointer input is
/// suspended.
#[derive(Debug, Clone, Copy, PartialEq, Default, derive_more::IsVariant)]
pub enum Overlay {
    /// No overlay; grid input flows normally.
    #[default]
    None,
    /// The radial digit menu, opened by double-tapping a non-given cell.
    Radial {
        /// The cell the menu edits.
        cell: CellIndex,
        /// Screen position of the opening tap, for menu placement.
        anchor: (f32, f32),
    },
    /// The candidate pill, opened by holding or swiping up on a picker
    /// digit.
    Pill {
        /// The digit the pill applies.
        digit: Digit,
        /// Screen position of the opening gesture.
        anchor: (f32, f32),
    },
}

/// The two applications the candidate pill offers for its digit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PillChoice {
    /// Toggle the digit as a true candidate on each selected cell.
    Candidate,
    /// Toggle the digit as an anti-candidate on each selected cell.
    Anti,
}
