//! LocalStorage-backed best score (WASM only)

use super::{BEST_SCORE_KEY, ScoreStore, StorageError, parse_best_score};

/// Best score kept in the browser's LocalStorage
#[derive(Debug, Default)]
pub struct LocalStorageStore;

impl LocalStorageStore {
    pub fn new() -> Self {
        Self
    }

    fn storage() -> Option<web_sys::Storage> {
        web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten()
    }
}

impl ScoreStore for LocalStorageStore {
    fn best_score(&self) -> u64 {
        let raw = Self::storage().and_then(|s| s.get_item(BEST_SCORE_KEY).ok().flatten());
        let score = parse_best_score(raw.as_deref());
        log::info!("Loaded best score: {}", score);
        score
    }

    fn set_best_score(&mut self, score: u64) -> Result<(), StorageError> {
        let storage = Self::storage().ok_or(StorageError::Unavailable)?;
        storage
            .set_item(BEST_SCORE_KEY, &score.to_string())
            .map_err(|e| StorageError::Write(format!("{:?}", e)))?;
        log::info!("Best score saved ({})", score);
        Ok(())
    }
}
