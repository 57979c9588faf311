//! The interaction session: gesture interpretation, command handling, and
//! puzzle lifecycle.

use std::fmt;

use gridtap_board::{BoardCells, BoardEngine, Difficulty, generator};
use gridtap_core::{CellIndex, Digit, DigitSet, PeerTable};

use crate::{
    annotations::Annotations,
    completion::{self, AnimationPlan},
    history::History,
    input::{
        DOUBLE_TAP_SECS, GestureState, LONG_PRESS_SECS, PICKER_HOLD_SECS, PickerPress,
        PointerGesture, SWIPE_THRESHOLD, line,
    },
    projection::{self, BoardView, ProjectionContext},
    selection::{DragMode, Overlay, PillChoice, SelectionState},
    settings::Settings,
    solved_store::{SolvedStore, StorageBackend},
};

/// Modifier keys accompanying a grid tap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PointerModifiers {
    /// Shift held.
    pub shift: bool,
    /// Ctrl (or platform command key) held.
    pub ctrl: bool,
}

impl PointerModifiers {
    const fn additive(self) -> bool {
        self.shift || self.ctrl
    }
}

/// Identity of the loaded puzzle. All fields are replaced atomically by
/// [`Session::load_puzzle`].
#[derive(Debug, Clone)]
struct PuzzleIdentity {
    id: Option<String>,
    difficulty: Difficulty,
    initial_board: BoardCells,
    solution: Option<String>,
}

/// The interaction session.
///
/// Owns the board engine, the annotation and history layers, the selection
/// model, and the gesture state, and exposes the event-driven surface hosts
/// feed raw input into. All shared mutable state lives here and is touched
/// only through these single-threaded entry points; every committed edit is
/// followed by exactly one history save regardless of how many cells it
/// touched.
///
/// Hosts drive three things per frame: push input events, call
/// [`Session::poll`] with the frame time (fires due long-press/hold
/// deadlines and prunes finished animations), and pull [`Session::view`] to
/// paint.
pub struct Session {
    engine: Box<dyn BoardEngine>,
    storage: Box<dyn StorageBackend>,
    peers: PeerTable,
    annotations: Annotations,
    history: History,
    selection: SelectionState,
    overlay: Overlay,
    gesture: GestureState,
    highlight: Option<Digit>,
    isolation: Option<DigitSet>,
    settings: Settings,
    puzzle: PuzzleIdentity,
    solved: SolvedStore,
    animations: Vec<AnimationPlan>,
    modal_open: bool,
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("selection", &self.selection)
            .field("overlay", &self.overlay)
            .field("highlight", &self.highlight)
            .field("puzzle", &self.puzzle)
            .finish_non_exhaustive()
    }
}

impl Session {
    /// Creates a session over `engine`, loading the solved-puzzle store from
    /// `storage`.
    ///
    /// The engine's current board becomes the initial puzzle state with no
    /// identity attached; call [`Session::start_new_puzzle`] or
    /// [`Session::load_puzzle`] to begin a real game.
    #[must_use]
    pub fn new(engine: Box<dyn BoardEngine>, storage: Box<dyn StorageBackend>) -> Self {
        let solved = SolvedStore::load_from(&*storage);
        let initial_board = engine.board();
        let annotations = Annotations::new();
        let mut history = History::new();
        history.reset(&initial_board, &annotations);
        Self {
            engine,
            storage,
            peers: PeerTable::new(),
            annotations,
            history,
            selection: SelectionState::Idle,
            overlay: Overlay::None,
            gesture: GestureState::default(),
            highlight: None,
            isolation: None,
            settings: Settings::default(),
            puzzle: PuzzleIdentity {
                id: None,
                difficulty: Difficulty::Easy,
                initial_board,
                solution: None,
            },
            solved,
            animations: Vec::new(),
            modal_open: false,
        }
    }

    // --- Puzzle lifecycle -------------------------------------------------

    /// Generates and installs a fresh puzzle of the given difficulty.
    ///
    /// The solution string is derived by letting the engine solve its own
    /// problem, then restoring the problem grid; the puzzle id is a digest
    /// of the problem.
    pub fn start_new_puzzle(&mut self, difficulty: Difficulty) {
        let mut generated = None;
        self.engine
            .generate_board(difficulty, Box::new(|cells| generated = Some(cells.clone())));
        let Some(problem) = generated else {
            log::warn!("engine delivered no generated board; keeping current puzzle");
            return;
        };

        self.engine.solve_all();
        let solution = self.engine.board().value_string();
        self.engine.set_board(problem.clone());

        let id = generator::puzzle_id(&problem);
        self.install_puzzle(problem, Some(solution), Some(id), difficulty);
    }

    /// Installs an externally supplied puzzle.
    ///
    /// `solution` is the 81-character solved grid used for live wrongness
    /// detection; a malformed string is dropped with a warning rather than
    /// rejected. `id` keys the solved-puzzle store and may be absent.
    pub fn load_puzzle(
        &mut self,
        problem: &BoardCells,
        solution: Option<&str>,
        id: Option<String>,
        difficulty: Difficulty,
    ) {
        self.engine.set_board(problem.clone());
        self.install_puzzle(
            problem.clone(),
            solution.map(str::to_owned),
            id,
            difficulty,
        );
    }

    fn install_puzzle(
        &mut self,
        initial_board: BoardCells,
        mut solution: Option<String>,
        id: Option<String>,
        difficulty: Difficulty,
    ) {
        if let Some(s) = &solution
            && s.len() != 81
        {
            log::warn!("dropping malformed solution string ({} chars)", s.len());
            solution = None;
        }
        self.puzzle = PuzzleIdentity {
            id,
            difficulty,
            initial_board,
            solution,
        };
        self.annotations.reset();
        self.selection.clear();
        self.overlay = Overlay::None;
        self.gesture.cancel_all();
        self.highlight = None;
        self.isolation = None;
        self.animations.clear();
        self.history.reset(&self.engine.board(), &self.annotations);
    }

    /// Restores the puzzle's initial board, clearing all player input.
    ///
    /// The reset is committed as one history entry, so it is undoable.
    pub fn reset_to_initial(&mut self) {
        self.engine.set_board(self.puzzle.initial_board.clone());
        self.annotations.reset();
        self.selection.clear();
        self.commit();
    }

    // --- Frame polling ----------------------------------------------------

    /// Fires due gesture deadlines and prunes finished animations.
    ///
    /// Call once per frame with the host clock, before pulling the view.
    pub fn poll(&mut self, now: f64) {
        if let Some(cell) = self.gesture.timers.take_due_long_press(now) {
            self.fire_long_press(cell);
        }
        if let Some(digit) = self.gesture.timers.take_due_picker_hold(now)
            && let Some(press) = self.gesture.picker.take()
            && press.digit == digit
        {
            self.overlay = Overlay::Pill {
                digit,
                anchor: press.start,
            };
        }
        self.animations.retain(|plan| plan.end() > now);
    }

    // --- Grid pointer surface ---------------------------------------------

    /// Pointer-down on a grid cell.
    ///
    /// Detects double-taps (same cell within the double-tap window on a
    /// non-given cell → radial menu) and otherwise arms the long-press
    /// deadline. While an overlay is open, grid input only dismisses it.
    pub fn grid_pointer_down(&mut self, cell: CellIndex, pos: (f32, f32), now: f64) {
        if self.modal_open {
            return;
        }
        if !self.overlay.is_none() {
            self.overlay = Overlay::None;
            return;
        }

        let board = self.engine.board();
        if let Some((last_cell, last_time)) = self.gesture.last_tap
            && last_cell == cell
            && now - last_time < DOUBLE_TAP_SECS
            && !board[cell].is_given
        {
            self.gesture.timers.cancel_long_press();
            self.gesture.pointer = PointerGesture::Idle;
            self.gesture.last_tap = None;
            self.selection.clear();
            self.overlay = Overlay::Radial { cell, anchor: pos };
            return;
        }

        self.gesture.last_tap = Some((cell, now));
        self.gesture.pointer = PointerGesture::Pending {
            cell,
            pressed_at: now,
        };
        self.gesture.timers.arm_long_press(cell, now + LONG_PRESS_SECS);
    }

    /// Pointer movement over the grid.
    ///
    /// `hovered` is the cell under the pointer, re-resolved by the host on
    /// every move. Only meaningful while a drag is in flight: on reaching a
    /// new cell, every cell on the raster line from the previous sample is
    /// run through the drag mode, skipping filled and given cells and cells
    /// already in the target state.
    pub fn grid_pointer_move(&mut self, hovered: Option<CellIndex>) {
        let PointerGesture::Dragging { mode, last } = self.gesture.pointer else {
            return;
        };
        let Some(current) = hovered else {
            return;
        };
        if current == last {
            return;
        }

        let board = self.engine.board();
        for cell in line::raster_line(last, current) {
            let state = &board[cell];
            if state.is_given || state.value.is_some() {
                continue;
            }
            let selected = self.selection.multi_cells().contains(cell);
            match mode {
                DragMode::Select if !selected => self.selection.drag_apply(cell, mode),
                DragMode::Deselect if selected => self.selection.drag_apply(cell, mode),
                _ => {}
            }
        }
        self.gesture.pointer = PointerGesture::Dragging {
            mode,
            last: current,
        };
    }

    /// Pointer-up over the grid.
    ///
    /// Ends a drag with no tap semantics, or — if the press stayed under the
    /// long-press duration — interprets a tap at `hovered`.
    pub fn grid_pointer_up(
        &mut self,
        hovered: Option<CellIndex>,
        modifiers: PointerModifiers,
        now: f64,
    ) {
        self.gesture.timers.cancel_long_press();
        match std::mem::take(&mut self.gesture.pointer) {
            PointerGesture::Idle => {}
            PointerGesture::Dragging { .. } => {
                // The drag's edits are already live; reset the actioned flag
                // so the next plain tap starts a fresh selection.
                if let SelectionState::Multi { actioned, .. } = &mut self.selection {
                    *actioned = false;
                }
            }
            PointerGesture::Pending { pressed_at, .. } => {
                if now - pressed_at < LONG_PRESS_SECS
                    && let Some(cell) = hovered
                {
                    self.tap(cell, modifiers);
                }
            }
        }
    }

    /// Pointer-down anywhere outside the interactive chrome: clears
    /// selection, highlight, isolation mode, and overlays.
    pub fn pointer_down_outside(&mut self) {
        self.selection.clear();
        self.highlight = None;
        self.isolation = None;
        self.overlay = Overlay::None;
        self.gesture.cancel_all();
    }

    fn fire_long_press(&mut self, cell: CellIndex) {
        let PointerGesture::Pending { cell: pending, .. } = self.gesture.pointer else {
            return;
        };
        if pending != cell {
            return;
        }

        let board = self.engine.board();
        let state = &board[cell];
        if state.is_given || state.value.is_some() {
            // Not a drag anchor; the press also aged out of tap range, so it
            // ends up doing nothing.
            return;
        }

        let mode = if self.selection.multi_cells().contains(cell) {
            DragMode::Deselect
        } else {
            DragMode::Select
        };
        if mode == DragMode::Select && self.selection.is_actioned() {
            self.selection.clear();
        }
        self.selection.drag_apply(cell, mode);
        self.gesture.pointer = PointerGesture::Dragging { mode, last: cell };
    }

    fn tap(&mut self, cell: CellIndex, modifiers: PointerModifiers) {
        let board = self.engine.board();
        match board[cell].value {
            Some(value) => {
                // Tapping a filled cell (given or entered) makes it the
                // single target; re-tapping just drops any stale selection.
                self.selection = SelectionState::Targeted { cell };
                self.set_highlight(Some(value));
            }
            None => {
                let additive = (modifiers.additive()
                    || !self.selection.multi_cells().is_empty())
                    && !self.selection.is_actioned();
                self.selection.toggle_cell(cell, additive);
            }
        }
    }

    // --- Digit and erase commands -----------------------------------------

    /// A digit press from the keyboard or the number picker.
    ///
    /// Dispatch precedence: a non-empty multi-selection cycles candidates;
    /// else an active target takes the value; else the input-mode cell takes
    /// it; else the press only toggles the global digit highlight.
    pub fn press_digit(&mut self, digit: Digit, now: f64) {
        if self.modal_open {
            return;
        }
        if !self.selection.multi_cells().is_empty() {
            self.cycle_candidates(digit);
        } else if let Some(cell) = self.selection.target() {
            self.place_at_target(cell, digit, now);
        } else if let Some(cell) = self.selection.input_cell() {
            self.place_in_input_mode(cell, digit, now);
        } else {
            self.toggle_highlight(digit);
        }
    }

    /// An erase press (Backspace/Delete or the picker's erase key).
    ///
    /// An active target is erased and cleared first; only with no target
    /// does erase apply to the whole multi-selection. Touched cells commit
    /// as one history entry; erasing nothing saves nothing.
    pub fn press_erase(&mut self) {
        if self.modal_open {
            return;
        }
        if let Some(cell) = self.selection.target() {
            let changed = self.erase_cell(cell);
            self.selection.clear();
            if changed {
                self.commit();
            }
        } else {
            let mut changed = false;
            for cell in self.selection.multi_cells() {
                changed |= self.erase_cell(cell);
            }
            if changed {
                self.commit();
            }
        }
    }

    /// Puts a non-given cell into direct-entry input mode.
    pub fn enter_input_mode(&mut self, cell: CellIndex) {
        if self.engine.board()[cell].is_given {
            return;
        }
        self.selection = SelectionState::InputMode { cell };
    }

    fn place_at_target(&mut self, cell: CellIndex, digit: Digit, now: f64) {
        self.selection.clear();
        let board = self.engine.board();
        let state = &board[cell];
        if state.is_given {
            self.set_highlight(Some(digit));
            return;
        }
        if state.value == Some(digit) {
            // Re-entering the value is a no-op that only resets highlights.
            self.set_highlight(None);
            return;
        }
        self.place_value(cell, digit, now);
    }

    fn place_in_input_mode(&mut self, cell: CellIndex, digit: Digit, now: f64) {
        let board = self.engine.board();
        let state = &board[cell];
        if state.is_given || state.value == Some(digit) {
            return;
        }
        self.selection.clear();
        self.place_value(cell, digit, now);
    }

    // One committed placement: board write, annotation cleanup, a single
    // history save, highlight refresh, completion checks.
    fn place_value(&mut self, cell: CellIndex, digit: Digit, now: f64) {
        self.engine.set_cell(cell, digit);
        self.annotations.clear_cell(cell);
        self.commit();
        self.set_highlight(Some(digit));
        self.run_completion(cell, digit, now);
    }

    fn erase_cell(&mut self, cell: CellIndex) -> bool {
        let board = self.engine.board();
        let state = &board[cell];
        if state.is_given {
            return false;
        }
        if state.value.is_none()
            && state.candidates.is_empty()
            && self.annotations.get(cell).is_empty()
        {
            return false;
        }
        self.engine.clear_cell(cell);
        self.annotations.clear_cell(cell);
        true
    }

    // The three-state "pickup" cycle. Every eligible selected cell falls in
    // exactly one bucket; one action is chosen for the whole selection by
    // priority (plain → candidate, candidate → anti, anti → clear), letting
    // a mixed selection converge to a uniform state in three presses.
    fn cycle_candidates(&mut self, digit: Digit) {
        let board = self.engine.board();
        let mut plain = Vec::new();
        let mut candidate = Vec::new();
        let mut anti = Vec::new();
        for cell in self.selection.multi_cells() {
            let state = &board[cell];
            if state.is_given || state.value.is_some() {
                continue;
            }
            if state.candidates.contains(digit) {
                candidate.push(cell);
            } else if self.annotations.contains(cell, digit) {
                anti.push(cell);
            } else {
                plain.push(cell);
            }
        }

        if plain.is_empty() && candidate.is_empty() && anti.is_empty() {
            self.set_highlight(Some(digit));
            return;
        }

        if !plain.is_empty() {
            for &cell in &plain {
                self.engine.toggle_candidate(cell, digit);
            }
        } else if !candidate.is_empty() {
            for &cell in &candidate {
                self.engine.toggle_candidate(cell, digit);
                self.annotations.insert(cell, digit);
            }
        } else {
            for &cell in &anti {
                self.annotations.remove(cell, digit);
            }
        }

        self.commit();
        self.selection.mark_actioned();
        self.set_highlight(Some(digit));
    }

    fn toggle_highlight(&mut self, digit: Digit) {
        if self.highlight == Some(digit) {
            self.set_highlight(None);
        } else {
            self.set_highlight(Some(digit));
        }
    }

    fn set_highlight(&mut self, digit: Option<Digit>) {
        if digit.is_some() {
            self.isolation = None;
        }
        self.highlight = digit;
    }

    fn run_completion(&mut self, cell: CellIndex, digit: Digit, now: f64) {
        let board = self.engine.board();
        let outcome = completion::check_placement(&board, &self.peers, cell, digit, now);
        if outcome.board_filled {
            self.record_solve();
        }
        self.animations.extend(outcome.plans);
    }

    fn record_solve(&mut self) {
        let Some(id) = self.puzzle.id.clone() else {
            return;
        };
        if self.solved.mark_solved(self.puzzle.difficulty, &id) {
            self.solved.persist(&mut *self.storage);
        }
    }

    fn commit(&mut self) {
        self.history.save(&self.engine.board(), &self.annotations);
    }

    // --- Radial menu and candidate pill -----------------------------------

    /// A digit chosen from the open radial menu: sets the menu's cell to
    /// that value (replacing any previous entry) and closes the menu.
    pub fn radial_choose_digit(&mut self, digit: Digit, now: f64) {
        let Overlay::Radial { cell, .. } = self.overlay else {
            return;
        };
        self.overlay = Overlay::None;
        self.selection.clear();
        let board = self.engine.board();
        let state = &board[cell];
        if !state.is_given && state.value != Some(digit) {
            self.place_value(cell, digit, now);
        }
    }

    /// The erase item of the open radial menu.
    pub fn radial_choose_erase(&mut self) {
        let Overlay::Radial { cell, .. } = self.overlay else {
            return;
        };
        self.overlay = Overlay::None;
        if self.erase_cell(cell) {
            self.commit();
        }
        self.selection.clear();
    }

    /// A choice made in the open candidate pill: toggles the pill's digit as
    /// a candidate or anti-candidate on every eligible selected cell, as one
    /// committed action.
    pub fn pill_choose(&mut self, choice: PillChoice) {
        let Overlay::Pill { digit, .. } = self.overlay else {
            return;
        };
        self.overlay = Overlay::None;
        if self.selection.target().is_some() {
            self.selection.clear();
        }

        let board = self.engine.board();
        let mut changed = false;
        for cell in self.selection.multi_cells() {
            let state = &board[cell];
            if state.is_given || state.value.is_some() {
                continue;
            }
            match choice {
                PillChoice::Candidate => {
                    self.engine.toggle_candidate(cell, digit);
                }
                PillChoice::Anti => {
                    self.annotations.toggle(cell, digit);
                }
            }
            changed = true;
        }
        if changed {
            self.commit();
            self.selection.mark_actioned();
            self.set_highlight(Some(digit));
        }
    }

    /// Dismisses any open overlay.
    pub fn close_overlay(&mut self) {
        self.overlay = Overlay::None;
    }

    // --- Number picker surface --------------------------------------------

    /// Pointer-down on a picker digit button.
    ///
    /// In isolation mode the press toggles the digit's membership instead.
    /// Buttons disabled by the nine-instances rule ignore the press.
    pub fn picker_pointer_down(&mut self, digit: Digit, pos: (f32, f32), now: f64) {
        if self.modal_open {
            return;
        }
        if let Some(set) = &mut self.isolation {
            set.toggle(digit);
            return;
        }
        if self.engine.board().digit_count(digit) >= 9 {
            return;
        }
        self.gesture.picker = Some(PickerPress {
            digit,
            start: pos,
            pressed_at: now,
        });
        self.gesture
            .timers
            .arm_picker_hold(digit, now + PICKER_HOLD_SECS);
    }

    /// Pointer movement while a picker button is held. An upward swipe past
    /// the threshold opens the candidate pill immediately.
    pub fn picker_pointer_move(&mut self, pos: (f32, f32)) {
        let Some(press) = &mut self.gesture.picker else {
            return;
        };
        let delta_y = press.start.1 - pos.1;
        if delta_y.abs() > SWIPE_THRESHOLD {
            let digit = press.digit;
            self.gesture.timers.cancel_picker_hold();
            self.gesture.picker = None;
            if delta_y > SWIPE_THRESHOLD {
                self.overlay = Overlay::Pill { digit, anchor: pos };
            }
        }
    }

    /// Pointer-up on the picker: a short, unswiped press is a digit tap.
    pub fn picker_pointer_up(&mut self, now: f64) {
        self.gesture.timers.cancel_picker_hold();
        let Some(press) = self.gesture.picker.take() else {
            return;
        };
        if now - press.pressed_at < PICKER_HOLD_SECS {
            self.press_digit(press.digit, now);
        }
    }

    // --- History ----------------------------------------------------------

    /// Steps the history cursor back and restores that snapshot. Boundary
    /// no-op.
    pub fn undo(&mut self) -> bool {
        let Some(snapshot) = self.history.undo().cloned() else {
            return false;
        };
        self.engine.set_board(snapshot.board);
        self.annotations = snapshot.annotations;
        true
    }

    /// Steps the history cursor forward and restores that snapshot. Boundary
    /// no-op.
    pub fn redo(&mut self) -> bool {
        let Some(snapshot) = self.history.redo().cloned() else {
            return false;
        };
        self.engine.set_board(snapshot.board);
        self.annotations = snapshot.annotations;
        true
    }

    /// Jumps the history cursor to an absolute index. Out-of-range targets
    /// are no-ops.
    pub fn jump_history(&mut self, target: usize) -> bool {
        let Some(snapshot) = self.history.jump_to(target).cloned() else {
            return false;
        };
        self.engine.set_board(snapshot.board);
        self.annotations = snapshot.annotations;
        true
    }

    /// Returns whether an undo step is available.
    #[must_use]
    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    /// Returns whether a redo step is available.
    #[must_use]
    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    // --- Assistance -------------------------------------------------------

    /// Lets the engine solve the rest of the board in place.
    pub fn solve_all(&mut self) {
        self.engine.solve_all();
    }

    /// Lets the engine place one derived digit. Returns whether it did.
    pub fn solve_step(&mut self) -> bool {
        self.engine.solve_step()
    }

    // --- Modes and chrome state -------------------------------------------

    /// Enters or leaves candidate isolation mode. Entering clears the digit
    /// highlight; the isolation set starts empty.
    pub fn toggle_isolation_mode(&mut self) {
        if self.isolation.is_some() {
            self.isolation = None;
        } else {
            self.isolation = Some(DigitSet::EMPTY);
            self.highlight = None;
        }
    }

    /// Tells the session whether external modal chrome is covering the UI;
    /// while open, grid and keyboard input are suspended.
    pub fn set_modal_open(&mut self, open: bool) {
        self.modal_open = open;
    }

    // --- Queries ----------------------------------------------------------

    /// Rebuilds the full visual projection for the current frame.
    ///
    /// Idempotent: external chrome may mutate state through the session and
    /// simply call this again.
    #[must_use]
    pub fn view(&self, now: f64) -> BoardView {
        let board = self.engine.board();
        projection::build(&ProjectionContext {
            board: &board,
            annotations: &self.annotations,
            selection: &self.selection,
            highlight: self.highlight,
            isolation: self.isolation,
            settings: &self.settings,
            solution: self.puzzle.solution.as_deref(),
            peers: &self.peers,
            animations: &self.animations,
            can_undo: self.history.can_undo(),
            can_redo: self.history.can_redo(),
            now,
        })
    }

    /// Returns a snapshot of the current board.
    #[must_use]
    pub fn board(&self) -> BoardCells {
        self.engine.board()
    }

    /// Returns the active selection layer.
    #[must_use]
    pub fn selection(&self) -> &SelectionState {
        &self.selection
    }

    /// Returns the open overlay, if any.
    #[must_use]
    pub fn overlay(&self) -> Overlay {
        self.overlay
    }

    /// Returns the globally highlighted digit.
    #[must_use]
    pub fn highlight(&self) -> Option<Digit> {
        self.highlight
    }

    /// Returns whether candidate isolation mode is active.
    #[must_use]
    pub fn isolation_active(&self) -> bool {
        self.isolation.is_some()
    }

    /// Returns the presentation settings.
    #[must_use]
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Mutable access to the presentation settings.
    pub fn settings_mut(&mut self) -> &mut Settings {
        &mut self.settings
    }

    /// Returns the loaded puzzle's identifier, if one is attached.
    #[must_use]
    pub fn puzzle_id(&self) -> Option<&str> {
        self.puzzle.id.as_deref()
    }

    /// Returns the loaded puzzle's difficulty.
    #[must_use]
    pub fn difficulty(&self) -> Difficulty {
        self.puzzle.difficulty
    }

    /// Returns the solved-puzzle store.
    #[must_use]
    pub fn solved(&self) -> &SolvedStore {
        &self.solved
    }
}

#[cfg(test)]
mod tests {
    use gridtap_board::LocalEngine;

    use super::*;
    use crate::{
        projection::CellFlags,
        solved_store::MemoryStorage,
    };

    const SOLUTION: &str = "\
534678912672195348198342567859761423426853791713924856961537284287419635345286179";

    fn session_with(problem: &str) -> Session {
        let engine = LocalEngine::with_seed(1);
        let mut session = Session::new(Box::new(engine), Box::new(MemoryStorage::default()));
        let problem: BoardCells = problem.parse().unwrap();
        session.load_puzzle(
            &problem,
            Some(SOLUTION),
            Some("test-puzzle".to_owned()),
            Difficulty::Easy,
        );
        session
    }

    fn blank_session() -> Session {
        session_with(&".".repeat(81))
    }

    fn tap(session: &mut Session, cell: u8, now: f64) {
        let cell = CellIndex::new(cell);
        session.grid_pointer_down(cell, (0.0, 0.0), now);
        session.grid_pointer_up(Some(cell), PointerModifiers::default(), now + 0.05);
    }

    // Presses and holds until the long-press fires; returns a time safely
    // after the deadline.
    fn long_press(session: &mut Session, cell: u8, now: f64) -> f64 {
        session.grid_pointer_down(CellIndex::new(cell), (0.0, 0.0), now);
        let fired = now + LONG_PRESS_SECS + 0.01;
        session.poll(fired);
        fired
    }

    fn fill(session: &mut Session, cell: u8, digit: Digit, now: f64) {
        session.enter_input_mode(CellIndex::new(cell));
        session.press_digit(digit, now);
    }

    #[test]
    fn taps_on_empty_cells_accumulate_until_actioned() {
        let mut session = blank_session();
        tap(&mut session, 0, 0.0);
        tap(&mut session, 1, 1.0);
        assert_eq!(session.selection().multi_cells().len(), 2);

        // Consume the selection, then a plain tap starts fresh.
        session.press_digit(Digit::D4, 2.0);
        assert!(session.selection().is_actioned());
        tap(&mut session, 2, 3.0);
        assert_eq!(
            session.selection().multi_cells(),
            gridtap_core::CellSet::single(CellIndex::new(2))
        );
    }

    #[test]
    fn retapping_a_selected_cell_deselects_it() {
        let mut session = blank_session();
        tap(&mut session, 5, 0.0);
        tap(&mut session, 5, 1.0);
        assert!(session.selection().multi_cells().is_empty());
    }

    #[test]
    fn tapping_a_filled_cell_targets_and_highlights_it() {
        let mut session = blank_session();
        fill(&mut session, 40, Digit::D7, 0.0);

        tap(&mut session, 40, 1.0);
        assert_eq!(session.selection().target(), Some(CellIndex::new(40)));
        assert_eq!(session.highlight(), Some(Digit::D7));
    }

    #[test]
    fn double_tap_opens_the_radial_menu() {
        let mut session = blank_session();
        tap(&mut session, 7, 0.0);
        // Second press on the same cell 0.2s after the first: double-tap.
        session.grid_pointer_down(CellIndex::new(7), (33.0, 44.0), 0.2);

        assert_eq!(
            session.overlay(),
            Overlay::Radial {
                cell: CellIndex::new(7),
                anchor: (33.0, 44.0),
            }
        );
        assert!(session.selection().is_idle());
    }

    #[test]
    fn double_tap_on_a_given_cell_does_nothing_special() {
        let mut session = session_with(&format!("5{}", ".".repeat(80)));
        tap(&mut session, 0, 0.0);
        session.grid_pointer_down(CellIndex::new(0), (0.0, 0.0), 0.2);
        assert!(session.overlay().is_none());
    }

    #[test]
    fn slow_second_tap_is_not_a_double_tap() {
        let mut session = blank_session();
        tap(&mut session, 7, 0.0);
        tap(&mut session, 7, 0.8);
        assert!(session.overlay().is_none());
    }

    #[test]
    fn long_press_drag_selects_the_rasterized_line() {
        let mut session = blank_session();
        let now = long_press(&mut session, 0, 0.0);
        assert!(session.selection().multi_cells().contains(CellIndex::new(0)));

        // Jump straight to a non-adjacent cell; the intermediate diagonal
        // cell is filled in.
        session.grid_pointer_move(Some(CellIndex::new(20)));
        session.grid_pointer_up(None, PointerModifiers::default(), now + 1.0);

        let selected = session.selection().multi_cells();
        assert!(selected.contains(CellIndex::new(0)));
        assert!(selected.contains(CellIndex::new(10)));
        assert!(selected.contains(CellIndex::new(20)));
        assert_eq!(selected.len(), 3);
    }

    #[test]
    fn drag_skips_filled_and_given_cells() {
        // A given at r2c2 (cell 10), in the middle of the drag line.
        let mut problem: Vec<char> = ".".repeat(81).chars().collect();
        problem[10] = '9';
        let mut session = session_with(&problem.iter().collect::<String>());

        long_press(&mut session, 0, 0.0);
        session.grid_pointer_move(Some(CellIndex::new(20)));

        let selected = session.selection().multi_cells();
        assert!(selected.contains(CellIndex::new(0)));
        assert!(!selected.contains(CellIndex::new(10)));
        assert!(selected.contains(CellIndex::new(20)));
    }

    #[test]
    fn long_press_on_a_selected_cell_drags_in_deselect_mode() {
        let mut session = blank_session();
        tap(&mut session, 0, 0.0);
        tap(&mut session, 1, 1.0);

        let now = long_press(&mut session, 0, 2.0);
        assert!(!session.selection().multi_cells().contains(CellIndex::new(0)));
        session.grid_pointer_move(Some(CellIndex::new(1)));
        session.grid_pointer_up(None, PointerModifiers::default(), now + 0.2);
        assert!(session.selection().multi_cells().is_empty());
    }

    #[test]
    fn long_press_after_an_action_starts_a_fresh_selection() {
        let mut session = blank_session();
        tap(&mut session, 0, 0.0);
        session.press_digit(Digit::D3, 1.0);
        assert!(session.selection().is_actioned());

        long_press(&mut session, 5, 2.0);
        assert_eq!(
            session.selection().multi_cells(),
            gridtap_core::CellSet::single(CellIndex::new(5))
        );
    }

    #[test]
    fn long_press_on_a_filled_cell_never_fires_and_a_stale_tap_is_ignored() {
        let mut session = blank_session();
        fill(&mut session, 0, Digit::D1, 0.0);
        let before = session.selection().clone();

        session.grid_pointer_down(CellIndex::new(0), (0.0, 0.0), 1.0);
        session.poll(1.7);
        session.grid_pointer_up(
            Some(CellIndex::new(0)),
            PointerModifiers::default(),
            1.8,
        );

        // No drag started, and the press aged past the tap window.
        assert_eq!(session.selection(), &before);
    }

    #[test]
    fn candidate_cycling_rotates_through_three_states() {
        let mut session = blank_session();
        tap(&mut session, 0, 0.0);
        tap(&mut session, 1, 1.0);
        let cells = [CellIndex::new(0), CellIndex::new(1)];
        assert_eq!(session.history.len(), 1);

        // plain -> candidate
        session.press_digit(Digit::D4, 2.0);
        let board = session.board();
        for cell in cells {
            assert!(board[cell].candidates.contains(Digit::D4));
        }
        assert_eq!(session.history.len(), 2);

        // candidate -> anti-candidate
        session.press_digit(Digit::D4, 3.0);
        let board = session.board();
        for cell in cells {
            assert!(!board[cell].candidates.contains(Digit::D4));
            assert!(session.annotations.contains(cell, Digit::D4));
        }
        assert_eq!(session.history.len(), 3);

        // anti-candidate -> plain
        session.press_digit(Digit::D4, 4.0);
        let board = session.board();
        for cell in cells {
            assert!(!board[cell].candidates.contains(Digit::D4));
            assert!(!session.annotations.contains(cell, Digit::D4));
        }
        assert_eq!(session.history.len(), 4);
        assert_eq!(session.highlight(), Some(Digit::D4));
    }

    #[test]
    fn cycling_a_mixed_selection_promotes_plain_cells_first() {
        let mut session = blank_session();
        let plain = CellIndex::new(0);
        let marked = CellIndex::new(1);
        session.engine.toggle_candidate(marked, Digit::D6);
        session.selection = SelectionState::Multi {
            cells: [plain, marked].into_iter().collect(),
            actioned: false,
        };

        session.press_digit(Digit::D6, 0.0);
        let board = session.board();
        // The plain cell was promoted; the existing candidate is untouched.
        assert!(board[plain].candidates.contains(Digit::D6));
        assert!(board[marked].candidates.contains(Digit::D6));
        assert!(!session.annotations.contains(marked, Digit::D6));

        // Now uniform: the next press demotes both to anti-candidate.
        session.press_digit(Digit::D6, 1.0);
        let board = session.board();
        assert!(session.annotations.contains(plain, Digit::D6));
        assert!(session.annotations.contains(marked, Digit::D6));
        assert!(board[plain].candidates.is_empty());
    }

    #[test]
    fn digit_on_target_replaces_the_value() {
        let mut session = blank_session();
        fill(&mut session, 30, Digit::D2, 0.0);
        tap(&mut session, 30, 1.0);
        let saves = session.history.len();

        session.press_digit(Digit::D8, 2.0);
        assert_eq!(session.board()[CellIndex::new(30)].value, Some(Digit::D8));
        assert_eq!(session.history.len(), saves + 1);
        assert!(session.selection().is_idle());
        assert_eq!(session.highlight(), Some(Digit::D8));
    }

    #[test]
    fn same_digit_on_target_is_a_noop_that_clears_highlights() {
        let mut session = blank_session();
        fill(&mut session, 30, Digit::D2, 0.0);
        tap(&mut session, 30, 1.0);
        let saves = session.history.len();

        session.press_digit(Digit::D2, 2.0);
        assert_eq!(session.board()[CellIndex::new(30)].value, Some(Digit::D2));
        assert_eq!(session.history.len(), saves);
        assert_eq!(session.highlight(), None);
    }

    #[test]
    fn idle_digit_press_only_toggles_the_highlight() {
        let mut session = blank_session();
        let saves = session.history.len();

        session.press_digit(Digit::D9, 0.0);
        assert_eq!(session.highlight(), Some(Digit::D9));
        session.press_digit(Digit::D9, 1.0);
        assert_eq!(session.highlight(), None);

        assert_eq!(session.history.len(), saves);
        assert_eq!(session.board(), BoardCells::default());
    }

    #[test]
    fn wrong_placement_is_projected_as_wrong_value() {
        let mut session = blank_session();
        // Solution starts with 5; enter 2.
        fill(&mut session, 0, Digit::D2, 0.0);
        let view = session.view(1.0);
        assert!(view.cell(CellIndex::new(0)).flags.contains(CellFlags::WRONG_VALUE));

        // Correct it; the mark disappears.
        tap(&mut session, 0, 2.0);
        session.press_digit(Digit::D5, 3.0);
        let view = session.view(4.0);
        assert!(!view.cell(CellIndex::new(0)).flags.contains(CellFlags::WRONG_VALUE));
    }

    #[test]
    fn erase_prefers_the_target_over_the_selection() {
        let mut session = blank_session();
        fill(&mut session, 10, Digit::D3, 0.0);
        // Build a selection with candidates, then target the filled cell.
        tap(&mut session, 0, 1.0);
        session.press_digit(Digit::D5, 2.0);
        tap(&mut session, 10, 3.0);
        let saves = session.history.len();

        session.press_erase();
        let board = session.board();
        assert!(board[CellIndex::new(10)].is_unfilled());
        // The selection's candidate survives: only the target was erased.
        assert!(board[CellIndex::new(0)].candidates.contains(Digit::D5));
        assert_eq!(session.history.len(), saves + 1);
        assert!(session.selection().is_idle());
    }

    #[test]
    fn erase_over_a_selection_commits_once() {
        let mut session = blank_session();
        tap(&mut session, 0, 0.0);
        tap(&mut session, 1, 1.0);
        session.press_digit(Digit::D5, 2.0);
        // Selection survives the action; erase both cells in one gesture.
        let saves = session.history.len();

        session.press_erase();
        let board = session.board();
        assert!(board[CellIndex::new(0)].candidates.is_empty());
        assert!(board[CellIndex::new(1)].candidates.is_empty());
        assert_eq!(session.history.len(), saves + 1);
    }

    #[test]
    fn erase_on_a_given_cell_changes_nothing_and_saves_nothing() {
        let mut session = session_with(&format!("5{}", ".".repeat(80)));
        tap(&mut session, 0, 0.0); // targets the given
        let board_before = session.board();
        let saves = session.history.len();

        session.press_erase();
        assert_eq!(session.board(), board_before);
        assert_eq!(session.history.len(), saves);
    }

    #[test]
    fn radial_menu_sets_and_erases_values() {
        let mut session = blank_session();
        tap(&mut session, 7, 0.0);
        session.grid_pointer_down(CellIndex::new(7), (0.0, 0.0), 0.2);
        assert!(session.overlay().is_radial());

        session.radial_choose_digit(Digit::D6, 0.5);
        assert_eq!(session.board()[CellIndex::new(7)].value, Some(Digit::D6));
        assert!(session.overlay().is_none());

        // Double-tap the now-filled (non-given) cell: radial again, erase.
        tap(&mut session, 7, 2.0);
        session.grid_pointer_down(CellIndex::new(7), (0.0, 0.0), 2.2);
        assert!(session.overlay().is_radial());
        let saves = session.history.len();
        session.radial_choose_erase();
        assert!(session.board()[CellIndex::new(7)].is_unfilled());
        assert_eq!(session.history.len(), saves + 1);
    }

    #[test]
    fn picker_hold_opens_the_pill_and_applies_candidates() {
        let mut session = blank_session();
        tap(&mut session, 0, 0.0);
        tap(&mut session, 1, 1.0);

        session.picker_pointer_down(Digit::D5, (10.0, 100.0), 2.0);
        session.poll(2.0 + PICKER_HOLD_SECS + 0.01);
        assert_eq!(
            session.overlay(),
            Overlay::Pill {
                digit: Digit::D5,
                anchor: (10.0, 100.0),
            }
        );

        let saves = session.history.len();
        session.pill_choose(PillChoice::Candidate);
        let board = session.board();
        assert!(board[CellIndex::new(0)].candidates.contains(Digit::D5));
        assert!(board[CellIndex::new(1)].candidates.contains(Digit::D5));
        assert_eq!(session.history.len(), saves + 1);
        assert!(session.selection().is_actioned());
    }

    #[test]
    fn picker_swipe_up_opens_the_pill_for_anti_marks() {
        let mut session = blank_session();
        tap(&mut session, 0, 0.0);

        session.picker_pointer_down(Digit::D8, (10.0, 100.0), 1.0);
        session.picker_pointer_move((10.0, 70.0)); // 30px upward
        assert!(session.overlay().is_pill());
        // A later pointer-up no longer taps.
        session.picker_pointer_up(1.1);
        assert_eq!(session.highlight(), None);

        session.pill_choose(PillChoice::Anti);
        assert!(session.annotations.contains(CellIndex::new(0), Digit::D8));
    }

    #[test]
    fn picker_tap_funnels_into_the_digit_handler() {
        let mut session = blank_session();
        session.picker_pointer_down(Digit::D7, (0.0, 0.0), 0.0);
        session.picker_pointer_up(0.1);
        assert_eq!(session.highlight(), Some(Digit::D7));
    }

    #[test]
    fn picker_ignores_digits_with_nine_instances() {
        let mut session = blank_session();
        // Nine raw 2s, wrong placements and all.
        for index in 0..9u8 {
            session.engine.set_cell(CellIndex::new(index * 9), Digit::D2);
        }
        assert!(session.view(0.0).disabled_digits.contains(Digit::D2));

        session.picker_pointer_down(Digit::D2, (0.0, 0.0), 0.0);
        session.picker_pointer_up(0.1);
        assert_eq!(session.highlight(), None);
    }

    #[test]
    fn isolation_mode_captures_picker_digits() {
        let mut session = blank_session();
        session.toggle_isolation_mode();
        assert!(session.isolation_active());

        session.picker_pointer_down(Digit::D3, (0.0, 0.0), 0.0);
        session.picker_pointer_up(0.1);
        // The tap toggled isolation membership instead of highlighting.
        assert_eq!(session.highlight(), None);
        assert_eq!(session.isolation, Some([Digit::D3].into_iter().collect()));

        // Highlighting a digit leaves isolation mode.
        session.press_digit(Digit::D1, 1.0);
        assert!(!session.isolation_active());
        assert_eq!(session.highlight(), Some(Digit::D1));
    }

    #[test]
    fn filling_the_last_cell_records_the_solve_once() {
        // Problem: the solved grid with one hole at r1c1.
        let mut problem: Vec<char> = SOLUTION.chars().collect();
        problem[0] = '.';
        let mut session = session_with(&problem.iter().collect::<String>());

        fill(&mut session, 0, Digit::D5, 1.0);
        assert!(session.solved().is_solved(Difficulty::Easy, "test-puzzle"));
        assert_eq!(session.solved().solved_count(Difficulty::Easy), 1);

        // A stray re-check changes nothing.
        session.run_completion(CellIndex::new(0), Digit::D5, 2.0);
        assert_eq!(session.solved().solved_count(Difficulty::Easy), 1);

        // The celebration schedule is live right after the placement.
        let view = session.view(1.1);
        assert!(view.cell(CellIndex::new(0)).flags.contains(CellFlags::ANIMATING));
    }

    #[test]
    fn full_board_celebration_fires_even_when_wrong() {
        // All cells filled, many of them wrong: finished means filled.
        let mut problem: Vec<char> = SOLUTION.chars().collect();
        problem[0] = '.';
        let mut session = session_with(&problem.iter().collect::<String>());

        fill(&mut session, 0, Digit::D9, 1.0); // contradicts the solution
        assert!(session.solved().is_solved(Difficulty::Easy, "test-puzzle"));
        let view = session.view(1.1);
        assert!(view.cell(CellIndex::new(0)).flags.contains(CellFlags::WRONG_VALUE));
        assert!(view.cell(CellIndex::new(0)).flags.contains(CellFlags::ANIMATING));
    }

    #[test]
    fn undo_and_redo_move_through_snapshots() {
        let mut session = blank_session();
        fill(&mut session, 0, Digit::D1, 0.0);
        fill(&mut session, 1, Digit::D2, 1.0);

        assert!(session.undo());
        let board = session.board();
        assert_eq!(board[CellIndex::new(0)].value, Some(Digit::D1));
        assert!(board[CellIndex::new(1)].is_unfilled());

        assert!(session.redo());
        assert_eq!(session.board()[CellIndex::new(1)].value, Some(Digit::D2));
        assert!(!session.redo());
    }

    #[test]
    fn editing_after_undo_discards_the_redo_branch() {
        let mut session = blank_session();
        fill(&mut session, 0, Digit::D1, 0.0);
        fill(&mut session, 1, Digit::D2, 1.0);

        assert!(session.undo());
        assert!(session.can_redo());
        fill(&mut session, 2, Digit::D3, 2.0);
        assert!(!session.can_redo());
    }

    #[test]
    fn undo_restores_annotations_with_the_board() {
        let mut session = blank_session();
        tap(&mut session, 0, 0.0);
        session.press_digit(Digit::D4, 1.0); // candidate
        session.press_digit(Digit::D4, 2.0); // anti-candidate
        assert!(session.annotations.contains(CellIndex::new(0), Digit::D4));

        assert!(session.undo());
        assert!(!session.annotations.contains(CellIndex::new(0), Digit::D4));
        assert!(session.board()[CellIndex::new(0)].candidates.contains(Digit::D4));
    }

    #[test]
    fn reset_restores_the_initial_board_and_is_undoable() {
        let mut session = session_with(&format!("5{}", ".".repeat(80)));
        fill(&mut session, 1, Digit::D7, 0.0);

        session.reset_to_initial();
        let board = session.board();
        assert_eq!(board[CellIndex::new(0)].value, Some(Digit::D5));
        assert!(board[CellIndex::new(1)].is_unfilled());

        assert!(session.undo());
        assert_eq!(session.board()[CellIndex::new(1)].value, Some(Digit::D7));
    }

    #[test]
    fn new_puzzle_resets_identity_history_and_annotations() {
        let mut session = blank_session();
        tap(&mut session, 0, 0.0);
        session.press_digit(Digit::D4, 1.0);
        session.press_digit(Digit::D4, 2.0); // anti mark

        session.start_new_puzzle(Difficulty::Easy);
        assert!(session.puzzle_id().is_some());
        assert_ne!(session.puzzle_id(), Some("test-puzzle"));
        assert_eq!(session.history.len(), 1);
        assert!(session.selection().is_idle());
        for cell in CellIndex::all() {
            assert!(session.annotations.get(cell).is_empty());
        }
        // The derived solution string matches the problem's givens.
        let solution = session.puzzle.solution.clone().unwrap();
        assert_eq!(solution.len(), 81);
        for (cell, state) in session.board().iter() {
            if let Some(value) = state.value {
                assert_eq!(
                    solution.as_bytes()[cell.as_usize()],
                    b'0' + value.value()
                );
            }
        }
    }

    #[test]
    fn outside_pointer_down_clears_all_transient_state() {
        let mut session = blank_session();
        tap(&mut session, 0, 0.0);
        session.press_digit(Digit::D4, 1.0);

        session.pointer_down_outside();
        assert!(session.selection().is_idle());
        assert_eq!(session.highlight(), None);
        assert!(session.overlay().is_none());
    }

    #[test]
    fn modal_chrome_suspends_input() {
        let mut session = blank_session();
        session.set_modal_open(true);

        session.press_digit(Digit::D4, 0.0);
        assert_eq!(session.highlight(), None);
        tap(&mut session, 0, 1.0);
        assert!(session.selection().is_idle());

        session.set_modal_open(false);
        session.press_digit(Digit::D4, 2.0);
        assert_eq!(session.highlight(), Some(Digit::D4));
    }

    #[test]
    fn overlay_suspends_grid_input() {
        let mut session = blank_session();
        tap(&mut session, 7, 0.0);
        session.grid_pointer_down(CellIndex::new(7), (0.0, 0.0), 0.2);
        assert!(session.overlay().is_radial());

        // The next grid press only dismisses the overlay.
        session.grid_pointer_down(CellIndex::new(3), (0.0, 0.0), 1.0);
        session.grid_pointer_up(
            Some(CellIndex::new(3)),
            PointerModifiers::default(),
            1.1,
        );
        assert!(session.overlay().is_none());
        assert!(session.selection().multi_cells().is_empty());
    }

    #[test]
    fn solve_step_and_solve_all_pass_through() {
        let solved_minus_two: String = {
            let mut chars: Vec<char> = SOLUTION.chars().collect();
            chars[0] = '.';
            chars[1] = '.';
            chars.iter().collect()
        };
        let mut session = session_with(&solved_minus_two);
        assert!(session.solve_step());
        session.solve_all();
        assert!(session.board().is_finished());
    }
}
