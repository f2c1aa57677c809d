//! High score persistence
//!
//! A single scalar that survives across runs. The browser build keeps it in
//! LocalStorage; native builds and tests use an in-memory store. Missing or
//! corrupt stored values read as zero.

use std::cell::Cell;
use std::rc::Rc;

/// Storage collaborator injected into the engine.
pub trait HighScoreStore {
    /// Load the stored high score, defaulting to 0.
    fn load(&self) -> u64;
    /// Persist a new high score.
    fn save(&self, score: u64);
}

impl<S: HighScoreStore + ?Sized> HighScoreStore for Rc<S> {
    fn load(&self) -> u64 {
        (**self).load()
    }

    fn save(&self, score: u64) {
        (**self).save(score)
    }
}

/// In-memory store for native builds and tests.
#[derive(Debug, Default)]
pub struct MemoryStore {
    value: Cell<u64>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl HighScoreStore for MemoryStore {
    fn load(&self) -> u64 {
        self.value.get()
    }

    fn save(&self, score: u64) {
        self.value.set(score);
    }
}

/// LocalStorage-backed store (WASM only).
#[cfg(target_arch = "wasm32")]
#[derive(Debug, Default)]
pub struct LocalStorageStore;

#[cfg(target_arch = "wasm32")]
impl LocalStorageStore {
    /// LocalStorage key
    const STORAGE_KEY: &'static str = "lane_dash_highscore";

    pub fn new() -> Self {
        Self
    }
}

#[cfg(target_arch = "wasm32")]
impl HighScoreStore for LocalStorageStore {
    fn load(&self) -> u64 {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(raw)) = storage.get_item(Self::STORAGE_KEY) {
                match raw.parse::<u64>() {
                    Ok(score) => {
                        log::info!("Loaded high score: {}", score);
                        return score;
                    }
                    Err(_) => {
                        log::warn!("Stored high score is corrupt, resetting to 0");
                    }
                }
            }
        }

        0
    }

    fn save(&self, score: u64) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            let _ = storage.set_item(Self::STORAGE_KEY, &score.to_string());
            log::info!("High score saved: {}", score);
        }
    }
}
