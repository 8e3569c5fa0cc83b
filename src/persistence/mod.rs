//! Best-score persistence
//!
//! A single integer survives between runs. Stored as plain text; anything
//! that does not parse as a non-negative integer reads back as zero.

#[cfg(target_arch = "wasm32")]
mod local_storage;

#[cfg(target_arch = "wasm32")]
pub use local_storage::LocalStorageStore;

use thiserror::Error;

/// Storage key for the best score
pub const BEST_SCORE_KEY: &str = "mini_rush_best_score";

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage is not available")]
    Unavailable,
    #[error("storage write failed: {0}")]
    Write(String),
}

/// Key-value access to the persisted best score
pub trait ScoreStore {
    /// Stored best score, 0 when missing or unreadable
    fn best_score(&self) -> u64;

    fn set_best_score(&mut self, score: u64) -> Result<(), StorageError>;
}

/// Parse a stored value; missing or malformed values count as zero
pub fn parse_best_score(raw: Option<&str>) -> u64 {
    raw.and_then(|s| s.trim().parse::<u64>().ok()).unwrap_or(0)
}

/// In-memory store used natively and in tests
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    raw: Option<String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an already-stored raw value
    pub fn with_raw(raw: impl Into<String>) -> Self {
        Self {
            raw: Some(raw.into()),
        }
    }

    pub fn raw(&self) -> Option<&str> {
        self.raw.as_deref()
    }
}

impl ScoreStore for MemoryStore {
    fn best_score(&self) -> u64 {
        parse_best_score(self.raw.as_deref())
    }

    fn set_best_score(&mut self, score: u64) -> Result<(), StorageError> {
        self.raw = Some(score.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_best_score() {
        assert_eq!(parse_best_score(None), 0);
        assert_eq!(parse_best_score(Some("42")), 42);
        assert_eq!(parse_best_score(Some(" 17\n")), 17);
        assert_eq!(parse_best_score(Some("")), 0);
        assert_eq!(parse_best_score(Some("12abc")), 0);
        assert_eq!(parse_best_score(Some("-5")), 0);
        assert_eq!(parse_best_score(Some("{\"score\":3}")), 0);
    }

    #[test]
    fn test_memory_store_round_trip() {
        let mut store = MemoryStore::new();
        assert_eq!(store.best_score(), 0);
        store.set_best_score(120).unwrap();
        assert_eq!(store.best_score(), 120);
        assert_eq!(store.raw(), Some("120"));
    }

    #[test]
    fn test_malformed_raw_reads_zero() {
        let store = MemoryStore::with_raw("not a number");
        assert_eq!(store.best_score(), 0);
    }
}
