//! The Gridtap interaction session.
//!
//! This crate is the heart of the application: it interprets raw pointer and
//! keyboard events into selection, targeting, and edit commands, keeps the
//! layered selection model consistent with an undo/redo history, and derives
//! an idempotent visual projection from the resulting state.
//!
//! The pipeline, leaf to root:
//!
//! 1. [`Annotations`] — per-cell anti-candidate marks, layered on top of the
//!    board engine's own candidates.
//! 2. [`history`] — append-only undo/redo log of board + annotation
//!    snapshots with linear-undo truncation.
//! 3. [`SelectionState`] — the mutually exclusive multi-select / tapped
//!    target / input-mode layers, as a tagged enum.
//! 4. [`input`] — gesture interpretation: double-tap, long-press drag with
//!    raster path fill, swipe-to-pill, cancellable deadline timers.
//! 5. [`Session`] — command handlers (place, erase, candidate cycling),
//!    puzzle lifecycle, and the one-save-one-render-per-gesture rule.
//! 6. [`projection`] — the pure state → [`BoardView`] rebuild.
//! 7. [`completion`] — house/number/board completion detection and the
//!    staggered celebration schedules.
//!
//! Everything is single-threaded and event-driven: hosts feed events in,
//! call [`Session::poll`] once per frame, and pull [`Session::view`] to
//! paint. No event handler renders or saves more than once.

pub mod annotations;
pub mod completion;
pub mod history;
pub mod input;
pub mod projection;
pub mod selection;
pub mod session;
pub mod settings;
pub mod solved_store;

pub use self::{
    annotations::Annotations,
    completion::{AnimationPlan, CompletionOutcome},
    projection::{BoardView, CellFlags, CellView},
    selection::{DragMode, Overlay, PillChoice, SelectionState},
    session::{PointerModifiers, Session},
    settings::Settings,
    solved_store::{MemoryStorage, SolvedStore, StorageBackend},
};
