//! High score persistence
//!
//! A single integer under one LocalStorage key. The game logic talks to a
//! [`ScoreStore`]; [`LocalStorageStore`] backs it in the browser and
//! [`MemoryStore`] everywhere else.

/// Read/write-through store for the best score
pub trait ScoreStore {
    /// Stored high score, 0 if none
    fn load_high_score(&self) -> u64;
    /// Overwrite the stored high score
    fn save_high_score(&mut self, score: u64);
}

/// Parse a stored value; anything unreadable counts as no score
pub fn parse_high_score(raw: &str) -> u64 {
    match raw.trim().parse::<u64>() {
        Ok(score) => score,
        Err(_) => {
            log::warn!("Stored high score {:?} is not a number, using 0", raw);
            0
        }
    }
}

/// In-memory store (native runs, tests)
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    high_score: u64,
    /// Number of writes, for inspecting write-through behaviour
    pub writes: usize,
}

impl MemoryStore {
    pub fn with_high_score(high_score: u64) -> Self {
        Self {
            high_score,
            writes: 0,
        }
    }
}

impl ScoreStore for MemoryStore {
    fn load_high_score(&self) -> u64 {
        self.high_score
    }

    fn save_high_score(&mut self, score: u64) {
        self.high_score = score;
        self.writes += 1;
    }
}

/// Browser LocalStorage store
#[cfg(target_arch = "wasm32")]
#[derive(Debug, Clone)]
pub struct LocalStorageStore {
    key: String,
}

#[cfg(target_arch = "wasm32")]
impl Default for LocalStorageStore {
    fn default() -> Self {
        Self::new(crate::consts::HIGH_SCORE_KEY)
    }
}

#[cfg(target_arch = "wasm32")]
impl LocalStorageStore {
    pub fn new(key: &str) -> Self {
        Self {
            key: key.to_string(),
        }
    }

    fn storage() -> Option<web_sys::Storage> {
        web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten()
    }
}

#[cfg(target_arch = "wasm32")]
impl ScoreStore for LocalStorageStore {
    fn load_high_score(&self) -> u64 {
        let Some(storage) = Self::storage() else {
            log::warn!("LocalStorage unavailable, high score starts at 0");
            return 0;
        };
        match storage.get_item(&self.key) {
            Ok(Some(raw)) => parse_high_score(&raw),
            _ => 0,
        }
    }

    fn save_high_score(&mut self, score: u64) {
        let Some(storage) = Self::storage() else {
            return;
        };
        if storage.set_item(&self.key, &score.to_string()).is_err() {
            log::warn!("Failed to persist high score {}", score);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_high_score() {
        assert_eq!(parse_high_score("1200"), 1200);
        assert_eq!(parse_high_score(" 42\n"), 42);
        assert_eq!(parse_high_score(""), 0);
        assert_eq!(parse_high_score("abc"), 0);
        assert_eq!(parse_high_score("-5"), 0);
    }

    #[test]
    fn test_memory_store_roundtrip() {
        let mut store = MemoryStore::with_high_score(500);
        assert_eq!(store.load_high_score(), 500);
        store.save_high_score(800);
        assert_eq!(store.load_high_score(), 800);
        assert_eq!(store.writes, 1);
    }
}
