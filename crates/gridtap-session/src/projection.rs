//! The pure state → view projection.
//!
//! [`build`] recomputes the complete visual markup from current board,
//! annotation, selection, and highlight state on every call. Nothing is
//! patched incrementally: the projection is idempotent and can be rebuilt
//! from scratch at any frame, which is what makes interleaving with
//! animation schedules and overlay chrome safe.

use bitflags::bitflags;
use gridtap_board::BoardCells;
use gridtap_core::{CellIndex, CellSet, Digit, DigitSet, PeerTable};

use crate::{
    annotations::Annotations, completion::AnimationPlan, selection::SelectionState,
    settings::Settings,
};

bitflags! {
    /// Visual markup for one cell, rebuilt from scratch on every projection.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct CellFlags: u16 {
        /// Member of the multi-selection.
        const SELECTED = 1 << 0;
        /// The single tapped target.
        const TAPPED_TARGET = 1 << 1;
        /// The direct-entry input-mode cell.
        const INPUT_MODE = 1 << 2;
        /// Holds a player value that contradicts the known solution.
        const WRONG_VALUE = 1 << 3;
        /// Holds the highlighted digit.
        const HIGHLIGHT_VALUE = 1 << 4;
        /// Peer of a cell holding the highlighted digit.
        const HIGHLIGHT_PEER = 1 << 5;
        /// Carries an anti-candidate mark for the highlighted digit.
        const HIGHLIGHT_ANTI = 1 << 6;
        /// Blacked out under blackout mode.
        const BLACKED_OUT = 1 << 7;
        /// Covered by an active animation span.
        const ANIMATING = 1 << 8;
    }
}

/// One projected cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellView {
    /// The final value shown, if any.
    pub value: Option<Digit>,
    /// Whether the value is a puzzle clue.
    pub is_given: bool,
    /// Visual markup flags.
    pub flags: CellFlags,
    /// True-candidate marks visible under the active filters.
    pub shown_candidates: DigitSet,
    /// Anti-candidate marks visible under the active filters.
    pub shown_anti: DigitSet,
}

impl Default for CellView {
    fn default() -> Self {
        Self {
            value: None,
            is_given: false,
            flags: CellFlags::empty(),
            shown_candidates: DigitSet::EMPTY,
            shown_anti: DigitSet::EMPTY,
        }
    }
}

/// The complete projected board plus chrome state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardView {
    cells: Box<[CellView; 81]>,
    /// The globally highlighted digit, if any.
    pub highlight: Option<Digit>,
    /// Digits whose picker buttons are disabled because nine instances are
    /// already on the board (raw occurrence count, wrong placements
    /// included).
    pub disabled_digits: DigitSet,
    /// Whether an undo step is available.
    pub can_undo: bool,
    /// Whether a redo step is available.
    pub can_redo: bool,
}

impl BoardView {
    /// Returns the projected cell at `cell`.
    #[must_use]
    pub fn cell(&self, cell: CellIndex) -> &CellView {
        &self.cells[cell.as_usize()]
    }

    /// Returns an iterator over `(index, view)` pairs in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (CellIndex, &CellView)> {
        CellIndex::all().map(|idx| (idx, self.cell(idx)))
    }
}

/// Everything the projection reads. All references, no ownership: the
/// projection never mutates session state.
#[derive(Debug, Clone, Copy)]
pub struct ProjectionContext<'a> {
    /// Current board snapshot.
    pub board: &'a BoardCells,
    /// Current anti-candidate marks.
    pub annotations: &'a Annotations,
    /// Active selection layer.
    pub selection: &'a SelectionState,
    /// Globally highlighted digit.
    pub highlight: Option<Digit>,
    /// Candidate isolation set, when that mode is active. Mutually
    /// exclusive with `highlight`.
    pub isolation: Option<DigitSet>,
    /// Presentation settings.
    pub settings: &'a Settings,
    /// The 81-character solution string, when known and well-formed.
    pub solution: Option<&'a str>,
    /// Peer adjacency, for highlight spill.
    pub peers: &'a PeerTable,
    /// Animation schedules still in flight.
    pub animations: &'a [AnimationPlan],
    /// Whether undo is available.
    pub can_undo: bool,
    /// Whether redo is available.
    pub can_redo: bool,
    /// Host frame time, seconds.
    pub now: f64,
}

/// Rebuilds the full visual projection from current state.
#[must_use]
pub fn build(ctx: &ProjectionContext<'_>) -> BoardView {
    let mut cells = Box::new([CellView::default(); 81]);

    let solution = ctx.solution.filter(|s| s.len() == 81);
    let animating = active_animation_cells(ctx.animations, ctx.now);

    for (index, cell) in ctx.board.iter() {
        let view = &mut cells[index.as_usize()];
        view.value = cell.value;
        view.is_given = cell.is_given;

        if let (Some(value), Some(solution), false) = (cell.value, solution, cell.is_given)
            && solution.as_bytes()[index.as_usize()] != b'0' + value.value()
        {
            view.flags |= CellFlags::WRONG_VALUE;
        }
        if animating.contains(index) {
            view.flags |= CellFlags::ANIMATING;
        }
    }

    apply_selection(&mut cells, ctx.selection);

    if let Some(isolation) = ctx.isolation {
        apply_isolation(&mut cells, ctx, isolation);
    } else if let Some(digit) = ctx.highlight {
        apply_highlight(&mut cells, ctx, digit);
    } else if ctx.settings.show_candidates {
        for (index, cell) in ctx.board.iter() {
            if cell.is_unfilled() {
                let view = &mut cells[index.as_usize()];
                view.shown_candidates = cell.candidates;
                view.shown_anti = ctx.annotations.get(index);
            }
        }
    }

    BoardView {
        cells,
        highlight: ctx.highlight,
        disabled_digits: Digit::ALL
            .into_iter()
            .filter(|&digit| ctx.board.digit_count(digit) >= 9)
            .collect(),
        can_undo: ctx.can_undo,
        can_redo: ctx.can_redo,
    }
}

fn active_animation_cells(animations: &[AnimationPlan], now: f64) -> CellSet {
    let mut active = CellSet::EMPTY;
    for plan in animations {
        active |= plan.cells_active_at(now);
    }
    active
}

fn apply_selection(cells: &mut [CellView; 81], selection: &SelectionState) {
    match selection {
        SelectionState::Idle => {}
        SelectionState::Multi { cells: members, .. } => {
            for cell in *members {
                cells[cell.as_usize()].flags |= CellFlags::SELECTED;
            }
        }
        SelectionState::Targeted { cell } => {
            cells[cell.as_usize()].flags |= CellFlags::TAPPED_TARGET;
        }
        SelectionState::InputMode { cell } => {
            cells[cell.as_usize()].flags |= CellFlags::INPUT_MODE;
        }
    }
}

// Highlighting digit n: strong marks on cells valued n, light marks on their
// house peers and on anti-candidate cells of n; candidate grids narrow to n.
// Blackout mode instead blacks out every cell n cannot occupy.
fn apply_highlight(cells: &mut [CellView; 81], ctx: &ProjectionContext<'_>, digit: Digit) {
    let blackout = ctx.settings.blackout_mode;
    let value_cells = ctx.board.digit_positions(digit);

    let mut peer_cells = CellSet::EMPTY;
    for cell in value_cells {
        let peers = &ctx.peers[cell];
        peer_cells |= peers.row | peers.col | peers.boxp;
    }

    for (index, cell) in ctx.board.iter() {
        let view = &mut cells[index.as_usize()];
        let is_anti = cell.is_unfilled() && ctx.annotations.contains(index, digit);

        if blackout && (cell.value.is_some_and(|value| value != digit) || is_anti) {
            view.flags |= CellFlags::BLACKED_OUT;
            continue;
        }

        if cell.value == Some(digit) {
            view.flags |= CellFlags::HIGHLIGHT_VALUE;
        } else if peer_cells.contains(index) {
            view.flags |= CellFlags::HIGHLIGHT_PEER;
        }
        if !blackout && is_anti {
            view.flags |= CellFlags::HIGHLIGHT_ANTI;
        }

        if cell.is_unfilled() {
            if cell.candidates.contains(digit) {
                view.shown_candidates.insert(digit);
            }
            if !blackout && is_anti {
                view.shown_anti.insert(digit);
            }
        }
    }
}

// Isolation mode: only true candidates inside the isolation set remain
// visible; anti-candidates are hidden outright.
fn apply_isolation(cells: &mut [CellView; 81], ctx: &ProjectionContext<'_>, isolation: DigitSet) {
    for (index, cell) in ctx.board.iter() {
        if cell.is_unfilled() {
            let mut shown = cell.candidates & isolation;
            for digit in ctx.annotations.get(index) {
                shown.remove(digit);
            }
            cells[index.as_usize()].shown_candidates = shown;
        }
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::*;

    struct Fixture {
        board: BoardCells,
        annotations: Annotations,
        selection: SelectionState,
        settings: Settings,
        peers: PeerTable,
        solution: Option<String>,
        highlight: Option<Digit>,
        isolation: Option<DigitSet>,
    }

    impl Fixture {
        fn new() -> Self {
            Self {
                board: BoardCells::default(),
                annotations: Annotations::new(),
                selection: SelectionState::Idle,
                settings: Settings::default(),
                peers: PeerTable::new(),
                solution: None,
                highlight: None,
                isolation: None,
            }
        }

        fn build(&self) -> BoardView {
            build(&ProjectionContext {
                board: &self.board,
                annotations: &self.annotations,
                selection: &self.selection,
                highlight: self.highlight,
                isolation: self.isolation,
                settings: &self.settings,
                solution: self.solution.as_deref(),
                peers: &self.peers,
                animations: &[],
                can_undo: false,
                can_redo: false,
                now: 0.0,
            })
        }
    }

    #[test]
    fn projection_is_idempotent() {
        let mut fixture = Fixture::new();
        fixture.board.set_value(CellIndex::new(4), Digit::D4);
        fixture.highlight = Some(Digit::D4);
        assert_eq!(fixture.build(), fixture.build());
    }

    #[test]
    fn wrong_value_is_marked_against_the_solution() {
        let mut fixture = Fixture::new();
        let solution: String = std::iter::repeat_n('1', 81).collect();
        fixture.solution = Some(solution);

        fixture.board.set_value(CellIndex::new(0), Digit::D2); // wrong
        fixture.board.set_value(CellIndex::new(1), Digit::D1); // correct

        let view = fixture.build();
        assert!(view.cell(CellIndex::new(0)).flags.contains(CellFlags::WRONG_VALUE));
        assert!(!view.cell(CellIndex::new(1)).flags.contains(CellFlags::WRONG_VALUE));
    }

    #[test]
    fn givens_are_never_marked_wrong() {
        let mut fixture = Fixture::new();
        fixture.board = BoardCells::from_str(&format!("9{}", ".".repeat(80))).unwrap();
        fixture.solution = Some(std::iter::repeat_n('1', 81).collect());
        let view = fixture.build();
        assert!(!view.cell(CellIndex::new(0)).flags.contains(CellFlags::WRONG_VALUE));
    }

    #[test]
    fn malformed_solution_is_ignored() {
        let mut fixture = Fixture::new();
        fixture.solution = Some("123".to_owned());
        fixture.board.set_value(CellIndex::new(0), Digit::D9);
        let view = fixture.build();
        assert!(!view.cell(CellIndex::new(0)).flags.contains(CellFlags::WRONG_VALUE));
    }

    #[test]
    fn highlight_paints_values_peers_and_antis() {
        let mut fixture = Fixture::new();
        fixture.board.set_value(CellIndex::new(0), Digit::D7);
        fixture.annotations.insert(CellIndex::new(40), Digit::D7);
        fixture.highlight = Some(Digit::D7);

        let view = fixture.build();
        assert!(view.cell(CellIndex::new(0)).flags.contains(CellFlags::HIGHLIGHT_VALUE));
        // Row peer of the value cell.
        assert!(view.cell(CellIndex::new(8)).flags.contains(CellFlags::HIGHLIGHT_PEER));
        // Anti-candidate cell, outside the value cell's houses.
        let anti = view.cell(CellIndex::new(40));
        assert!(anti.flags.contains(CellFlags::HIGHLIGHT_ANTI));
        assert!(anti.shown_anti.contains(Digit::D7));
        // Unrelated cell gets nothing.
        assert_eq!(view.cell(CellIndex::new(70)).flags, CellFlags::empty());
    }

    #[test]
    fn highlight_narrows_candidates_to_the_digit() {
        let mut fixture = Fixture::new();
        let cell = CellIndex::new(50);
        fixture.board.toggle_candidate(cell, Digit::D3);
        fixture.board.toggle_candidate(cell, Digit::D8);
        fixture.highlight = Some(Digit::D3);

        let view = fixture.build();
        assert_eq!(view.cell(cell).shown_candidates.len(), 1);
        assert!(view.cell(cell).shown_candidates.contains(Digit::D3));
    }

    #[test]
    fn blackout_mode_blacks_out_other_values_and_antis() {
        let mut fixture = Fixture::new();
        fixture.board.set_value(CellIndex::new(0), Digit::D2);
        fixture.annotations.insert(CellIndex::new(40), Digit::D7);
        fixture.highlight = Some(Digit::D7);
        fixture.settings.blackout_mode = true;

        let view = fixture.build();
        assert!(view.cell(CellIndex::new(0)).flags.contains(CellFlags::BLACKED_OUT));
        let anti = view.cell(CellIndex::new(40));
        assert!(anti.flags.contains(CellFlags::BLACKED_OUT));
        assert!(anti.shown_anti.is_empty());
    }

    #[test]
    fn isolation_mode_hides_antis_and_filters_candidates() {
        let mut fixture = Fixture::new();
        let cell = CellIndex::new(20);
        fixture.board.toggle_candidate(cell, Digit::D1);
        fixture.board.toggle_candidate(cell, Digit::D2);
        fixture.board.toggle_candidate(cell, Digit::D3);
        fixture.annotations.insert(cell, Digit::D2);
        fixture.isolation =
            Some([Digit::D1, Digit::D2].into_iter().collect());

        let view = fixture.build();
        let shown = view.cell(cell).shown_candidates;
        assert!(shown.contains(Digit::D1));
        assert!(!shown.contains(Digit::D2)); // anti wins
        assert!(!shown.contains(Digit::D3)); // outside the set
        assert!(view.cell(cell).shown_anti.is_empty());
    }

    #[test]
    fn picker_disables_on_ninth_raw_occurrence() {
        let mut fixture = Fixture::new();
        // Nine 6s, conflicts and all.
        for index in 0..9u8 {
            fixture.board.set_value(CellIndex::new(index * 9), Digit::D6);
        }
        let view = fixture.build();
        assert!(view.disabled_digits.contains(Digit::D6));
        assert!(!view.disabled_digits.contains(Digit::D1));
    }

    #[test]
    fn selection_flags_follow_the_active_mode() {
        let mut fixture = Fixture::new();
        fixture.selection = SelectionState::Targeted {
            cell: CellIndex::new(33),
        };
        let view = fixture.build();
        assert!(view.cell(CellIndex::new(33)).flags.contains(CellFlags::TAPPED_TARGET));

        fixture.selection = SelectionState::InputMode {
            cell: CellIndex::new(33),
        };
        let view = fixture.build();
        assert!(view.cell(CellIndex::new(33)).flags.contains(CellFlags::INPUT_MODE));
    }
}
