//! The undo/redo history of board + annotation snapshots.

use std::{collections::VecDeque, num::NonZero};

use gridtap_board::BoardCells;

use crate::annotations::Annotations;

/// One committed state: a deep copy of the board and the anti-candidate
/// marks taken after a user gesture.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    /// The full board at the time of the save.
    pub board: BoardCells,
    /// The anti-candidate marks at the time of the save.
    pub annotations: Annotations,
}

/// A bounded linear undo/redo log with a cursor.
///
/// `save` first discards every entry past the cursor (redo history is lost
/// when a new edit branches), then appends. Navigation moves the cursor
/// without mutating the log; out-of-range targets are boundary no-ops.
///
/// The cursor always satisfies `cursor < len` while the log is non-empty.
///
/// # Examples
///
/// ```
/// use gridtap_board::BoardCells;
/// use gridtap_session::{Annotations, history::History};
///
/// let mut history = History::new();
/// history.reset(&BoardCells::default(), &Annotations::new());
/// assert_eq!(history.len(), 1);
/// assert!(!history.can_undo());
/// ```
#[derive(Debug, Clone)]
pub struct History {
    entries: VecDeque<Snapshot>,
    capacity: NonZero<usize>,
    cursor: usize,
}

impl Default for History {
    fn default() -> Self {
        Self::new()
    }
}

impl History {
    /// Default number of retained snapshots.
    pub const DEFAULT_CAPACITY: NonZero<usize> = NonZero::new(1000).unwrap();

    /// Creates an empty history with the default capacity.
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(Self::DEFAULT_CAPACITY)
    }

    /// Creates an empty history retaining at most `capacity` snapshots.
    #[must_use]
    pub fn with_capacity(capacity: NonZero<usize>) -> Self {
        Self {
            entries: VecDeque::new(),
            capacity,
            cursor: 0,
        }
    }

    /// Returns the number of stored snapshots.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns whether the log is empty (only before the first puzzle loads).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the cursor position.
    #[must_use]
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Returns the snapshot under the cursor.
    #[must_use]
    pub fn current(&self) -> Option<&Snapshot> {
        self.entries.get(self.cursor)
    }

    /// Drops everything and stores a single snapshot of the freshly loaded
    /// state.
    pub fn reset(&mut self, board: &BoardCells, annotations: &Annotations) {
        self.entries.clear();
        self.cursor = 0;
        self.save(board, annotations);
    }

    /// Captures a snapshot, discarding any redo entries first.
    ///
    /// When the log is at capacity the oldest entry is evicted and the
    /// cursor shifts with it.
    pub fn save(&mut self, board: &BoardCells, annotations: &Annotations) {
        let snapshot = Snapshot {
            board: board.clone(),
            annotations: annotations.clone(),
        };

        if self.entries.is_empty() {
            self.entries.push_back(snapshot);
            self.cursor = 0;
            return;
        }

        self.entries.truncate(self.cursor + 1);
        if self.entries.len() == self.capacity.get() {
            self.entries.pop_front();
            self.cursor = self.cursor.saturating_sub(1);
        }
        self.entries.push_back(snapshot);
        self.cursor = self.entries.len() - 1;
    }

    /// Returns whether an undo step is available.
    #[must_use]
    pub fn can_undo(&self) -> bool {
        self.cursor > 0
    }

    /// Returns whether a redo step is available.
    #[must_use]
    pub fn can_redo(&self) -> bool {
        !self.entries.is_empty() && self.cursor + 1 < self.entries.len()
    }

    /// Moves the cursor one step back and returns the snapshot to restore.
    ///
    /// Boundary no-op: returns `None` at the first entry.
    pub fn undo(&mut self) -> Option<&Snapshot> {
        if self.can_undo() {
            self.jump_to(self.cursor - 1)
        } else {
            None
        }
    }

    /// Moves the cursor one step forward and returns the snapshot to restore.
    ///
    /// Boundary no-op: returns `None` at the last entry.
    pub fn redo(&mut self) -> Option<&Snapshot> {
        if self.can_redo() {
            self.jump_to(self.cursor + 1)
        } else {
            None
        }
    }

    /// Moves the cursor to `target` and returns the snapshot to restore.
    ///
    /// Out-of-range targets are no-ops that return `None`; the log is never
    /// mutated by navigation.
    pub fn jump_to(&mut self, target: usize) -> Option<&Snapshot> {
        if target < self.entries.len() {
            self.cursor = target;
            self.entries.get(target)
        } else {
            None
        }
    }
}
