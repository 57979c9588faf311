//! Persistence of solved puzzle identifiers.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use gridtap_board::Difficulty;
use serde::{Deserialize, Serialize};

/// The storage key under which the solved-puzzle blob lives.
pub const SOLVED_PUZZLES_KEY: &str = "solved_puzzles";

/// A key-value blob store provided by the host (browser local storage,
/// eframe storage, a file, or memory in tests).
pub trait StorageBackend {
    /// Reads the blob stored under `key`, if any.
    fn load(&self, key: &str) -> Option<String>;
    /// Writes `value` under `key`.
    fn store(&mut self, key: &str, value: &str);
}

/// An in-memory [`StorageBackend`], used in tests and as a fallback when the
/// host offers no persistence.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    entries: HashMap<String, String>,
}

impl StorageBackend for MemoryStorage {
    fn load(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn store(&mut self, key: &str, value: &str) {
        self.entries.insert(key.to_owned(), value.to_owned());
    }
}

/// The per-difficulty sets of solved puzzle ids.
///
/// Serialized as a JSON object mapping difficulty labels to id arrays.
/// Corrupt or missing data degrades to an empty mapping with a logged
/// warning; persistence failures are never fatal to the game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct SolvedStore {
    data: BTreeMap<String, BTreeSet<String>>,
}

impl SolvedStore {
    /// Creates an empty store with a key for every difficulty label.
    #[must_use]
    pub fn new() -> Self {
        let mut store = Self::default();
        store.ensure_difficulty_keys();
        store
    }

    /// Loads the store from `backend`, tolerating corrupt or missing data.
    #[must_use]
    pub fn load_from(backend: &dyn StorageBackend) -> Self {
        let mut store = match backend.load(SOLVED_PUZZLES_KEY) {
            Some(blob) => serde_json::from_str(&blob).unwrap_or_else(|err| {
                log::warn!("discarding corrupt solved-puzzle data: {err}");
                Self::default()
            }),
            None => Self::default(),
        };
        store.ensure_difficulty_keys();
        store
    }

    /// Writes the store through `backend`.
    pub fn persist(&self, backend: &mut dyn StorageBackend) {
        match serde_json::to_string(self) {
            Ok(blob) => backend.store(SOLVED_PUZZLES_KEY, &blob),
            Err(err) => log::warn!("failed to serialize solved-puzzle data: {err}"),
        }
    }

    /// Records a solve. Returns `true` if the id was newly inserted;
    /// re-inserting a known id is a no-op.
    pub fn mark_solved(&mut self, difficulty: Difficulty, id: &str) -> bool {
        self.data
            .entry(difficulty.label().to_owned())
            .or_default()
            .insert(id.to_owned())
    }

    /// Returns whether the puzzle id is recorded as solved.
    #[must_use]
    pub fn is_solved(&self, difficulty: Difficulty, id: &str) -> bool {
        self.data
            .get(difficulty.label())
            .is_some_and(|ids| ids.contains(id))
    }

    /// Returns how many puzzles are recorded solved at `difficulty`.
    #[must_use]
    pub fn solved_count(&self, difficulty: Difficulty) -> usize {
        self.data.get(difficulty.label()).map_or(0, BTreeSet::len)
    }

    fn ensure_difficulty_keys(&mut self) {
        for difficulty in Difficulty::ALL {
            self.data.entry(difficulty.label().to_owned()).or_default();
        }
    }
}
