//! Completion detection and celebration animation schedules.
//!
//! Animations are pure data: a plan is a list of per-cell time spans, and
//! the host simply asks which cells are animating at its current frame
//! time. Staggered house sweeps and the multi-wave full-board celebration
//! are all built by offsetting span start times, so concurrent plans
//! interleave safely and a re-render can never corrupt them.

use gridtap_board::BoardCells;
use gridtap_core::{CellIndex, CellSet, Digit, House, PeerTable};

/// Seconds one cell's sweep animation lasts.
pub const SWEEP_SECS: f64 = 0.5;

/// Seconds between successive cells of a completed-house sweep.
pub const HOUSE_STAGGER_SECS: f64 = 0.04;

/// Seconds between successive cells of a digit-completion sweep.
pub const NUMBER_STAGGER_SECS: f64 = 0.05;

/// Seconds between successive groups within a celebration wave.
pub const WAVE_GAP_SECS: f64 = 0.02;

/// Seconds between successive diagonals of the closing sweep.
pub const DIAGONAL_GAP_SECS: f64 = 0.025;

/// Extra settle time appended after each celebration wave.
const WAVE_TAIL_SECS: f64 = 0.55;

/// One cell's animation window.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Span {
    cell: CellIndex,
    start: f64,
    end: f64,
}

/// A schedule of cell highlight spans in absolute host time.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AnimationPlan {
    spans: Vec<Span>,
}

impl AnimationPlan {
    /// Builds a staggered sweep: the n-th cell starts `n * step` after
    /// `origin` and animates for [`SWEEP_SECS`].
    #[must_use]
    pub fn staggered(cells: impl IntoIterator<Item = CellIndex>, origin: f64, step: f64) -> Self {
        let spans = cells
            .into_iter()
            .enumerate()
            .map(|(i, cell)| {
                #[expect(clippy::cast_precision_loss)]
                let start = origin + step * i as f64;
                Span {
                    cell,
                    start,
                    end: start + SWEEP_SECS,
                }
            })
            .collect();
        Self { spans }
    }

    /// Appends another plan's spans; overlapping spans coexist, they are not
    /// deduplicated.
    pub fn merge(&mut self, other: Self) {
        self.spans.extend(other.spans);
    }

    /// Returns the number of individual cell spans.
    #[must_use]
    pub fn span_count(&self) -> usize {
        self.spans.len()
    }

    /// Returns whether the plan has no spans at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.spans.is_empty()
    }

    /// Returns the time the last span finishes, or `origin`-less zero for an
    /// empty plan.
    #[must_use]
    pub fn end(&self) -> f64 {
        self.spans.iter().map(|span| span.end).fold(0.0, f64::max)
    }

    /// Returns the cells whose spans cover `now`.
    #[must_use]
    pub fn cells_active_at(&self, now: f64) -> CellSet {
        self.spans
            .iter()
            .filter(|span| span.start <= now && now < span.end)
            .map(|span| span.cell)
            .collect()
    }

    /// Builds the full-board celebration: three strictly sequential waves
    /// (rows, columns, boxes), then an anti-diagonal sweep grouping cells by
    /// `row + col`.
    #[must_use]
    pub fn full_board_celebration(origin: f64) -> Self {
        let mut plan = Self::default();
        let mut wave_start = origin;

        for houses in [House::ROWS, House::COLUMNS, House::BOXES] {
            let groups = houses.into_iter().map(|house| house.cells().to_vec());
            plan.merge(Self::wave(groups.clone(), wave_start, WAVE_GAP_SECS));
            wave_start += wave_secs(groups.len(), WAVE_GAP_SECS);
        }

        let mut diagonals: Vec<Vec<CellIndex>> = vec![Vec::new(); 17];
        for cell in CellIndex::all() {
            diagonals[usize::from(cell.row() + cell.col())].push(cell);
        }
        plan.merge(Self::wave(diagonals, wave_start, DIAGONAL_GAP_SECS));
        plan
    }

    // One wave: group n starts n*gap after origin, all cells of a group
    // together.
    fn wave(groups: impl IntoIterator<Item = Vec<CellIndex>>, origin: f64, gap: f64) -> Self {
        let mut plan = Self::default();
        for (i, group) in groups.into_iter().enumerate() {
            #[expect(clippy::cast_precision_loss)]
            let start = origin + gap * i as f64;
            plan.merge(Self::staggered(group, start, 0.0));
        }
        plan
    }
}

/// Total duration of one celebration wave of `groups` groups.
fn wave_secs(groups: usize, gap: f64) -> f64 {
    #[expect(clippy::cast_precision_loss)]
    let groups = groups as f64;
    groups * gap + WAVE_TAIL_SECS
}

/// What a placement completed, and the animation schedules it triggered.
#[derive(Debug, Clone, Default)]
pub struct CompletionOutcome {
    /// One plan per triggered animation: digit sweeps and each completed
    /// house independently, or the single full-board celebration. Plans
    /// sharing the origin time run concurrently.
    pub plans: Vec<AnimationPlan>,
    /// Whether all 81 cells now hold a value (filled, not verified correct).
    pub board_filled: bool,
}

/// Runs the completion checks after placing `digit` at `placed`.
///
/// If the whole board is filled, the outcome is the full-board celebration
/// (the caller records the solve). Otherwise: a sweep over the digit's nine
/// cells when the placement brought it to nine occurrences, plus one
/// independent sweep per row/column/box of `placed` whose remaining cells
/// are all filled. A single placement can trigger several at once; they are
/// deliberately not merged or deduplicated.
#[must_use]
pub fn check_placement(
    board: &BoardCells,
    peers: &PeerTable,
    placed: CellIndex,
    digit: Digit,
    origin: f64,
) -> CompletionOutcome {
    if board.is_finished() {
        return CompletionOutcome {
            plans: vec![AnimationPlan::full_board_celebration(origin)],
            board_filled: true,
        };
    }

    let mut plans = Vec::new();

    if board.digit_count(digit) == 9 {
        plans.push(AnimationPlan::staggered(
            board.digit_positions(digit),
            origin,
            NUMBER_STAGGER_SECS,
        ));
    }

    let cell_peers = &peers[placed];
    for house in [cell_peers.row, cell_peers.col, cell_peers.boxp] {
        if !board.any_unfilled(house) {
            plans.push(AnimationPlan::staggered(house, origin, HOUSE_STAGGER_SECS));
        }
    }

    CompletionOutcome {
        plans,
        board_filled: false,
    }
}
