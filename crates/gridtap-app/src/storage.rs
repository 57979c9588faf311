//! Bridges the session's key-value persistence onto eframe storage.

use std::{cell::RefCell, collections::HashMap, rc::Rc};

use gridtap_session::{Settings, StorageBackend, solved_store::SOLVED_PUZZLES_KEY};

const SETTINGS_KEY: &str = "gridtap_settings";

/// A clonable in-memory blob store shared between the session and the app.
///
/// eframe only lends its storage during `App::save`, so the session writes
/// into this shared map and the app flushes it out on the save callback.
#[derive(Debug, Clone, Default)]
pub struct SharedStorage {
    entries: Rc<RefCell<HashMap<String, String>>>,
}

impl SharedStorage {
    /// Seeds the shared map from eframe storage at startup.
    pub fn seeded_from(storage: Option<&dyn eframe::Storage>) -> Self {
        let shared = Self::default();
        if let Some(storage) = storage
            && let Some(blob) = storage.get_string(SOLVED_PUZZLES_KEY)
        {
            shared
                .entries
                .borrow_mut()
                .insert(SOLVED_PUZZLES_KEY.to_owned(), blob);
        }
        shared
    }

    /// Writes every entry through to eframe storage.
    pub fn flush_to(&self, storage: &mut dyn eframe::Storage) {
        for (key, value) in self.entries.borrow().iter() {
            storage.set_string(key, value.clone());
        }
    }
}

impl StorageBackend for SharedStorage {
    fn load(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }

    fn store(&mut self, key: &str, value: &str) {
        self.entries
            .borrow_mut()
            .insert(key.to_owned(), value.to_owned());
    }
}

/// Reads persisted presentation settings, tolerating corrupt data.
pub fn load_settings(storage: Option<&dyn eframe::Storage>) -> Settings {
    storage
        .and_then(|storage| storage.get_string(SETTINGS_KEY))
        .and_then(|blob| {
            serde_json::from_str(&blob)
                .map_err(|err| log::warn!("discarding corrupt settings: {err}"))
                .ok()
        })
        .unwrap_or_default()
}

/// Persists presentation settings.
pub fn save_settings(storage: &mut dyn eframe::Storage, settings: &Settings) {
    match serde_json::to_string(settings) {
        Ok(blob) => storage.set_string(SETTINGS_KEY, blob),
        Err(err) => log::warn!("failed to serialize settings: {err}"),
    }
}
