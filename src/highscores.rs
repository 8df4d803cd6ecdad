//! Personal best score
//!
//! One number per player, stored under `benji-highscore-{fid}` (or `-anon`).
//! Stored as a bare decimal string so the key stays readable in dev tools.

use crate::platform::{KeyValueStore, PlayerNamespace};

/// Storage key prefix
pub const STORAGE_PREFIX: &str = "benji-highscore-";

/// Best score for one player namespace
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HighScoreStore {
    namespace: PlayerNamespace,
    best: u64,
}

impl HighScoreStore {
    pub fn storage_key(namespace: PlayerNamespace) -> String {
        format!("{}{}", STORAGE_PREFIX, namespace.key_suffix())
    }

    /// Empty store (nothing recorded yet)
    pub fn new(namespace: PlayerNamespace) -> Self {
        Self { namespace, best: 0 }
    }

    /// Load the stored best; missing or unparseable values count as 0
    pub fn load(store: &impl KeyValueStore, namespace: PlayerNamespace) -> Self {
        let key = Self::storage_key(namespace);
        let best = match store.get(&key) {
            Some(raw) => raw.trim().parse::<u64>().unwrap_or_else(|_| {
                log::warn!("Ignoring bad high score under '{}': {:?}", key, raw);
                0
            }),
            None => 0,
        };
        log::info!("Best score for {:?}: {}", namespace, best);
        Self { namespace, best }
    }

    pub fn best(&self) -> u64 {
        self.best
    }

    pub fn namespace(&self) -> PlayerNamespace {
        self.namespace
    }

    /// Would this score be a new personal best?
    pub fn qualifies(&self, score: u64) -> bool {
        score > self.best
    }

    /// Store `score` if it strictly beats the current best. Returns true when stored.
    pub fn record(&mut self, store: &mut impl KeyValueStore, score: u64) -> bool {
        if !self.qualifies(score) {
            return false;
        }
        self.best = score;
        store.set(&Self::storage_key(self.namespace), &score.to_string());
        log::info!("New best score: {}", score);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::MemoryStore;

    #[test]
    fn test_storage_keys() {
        assert_eq!(
            HighScoreStore::storage_key(PlayerNamespace::Fid(42)),
            "benji-highscore-42"
        );
        assert_eq!(
            HighScoreStore::storage_key(PlayerNamespace::Anonymous),
            "benji-highscore-anon"
        );
    }

    #[test]
    fn test_record_only_when_strictly_higher() {
        let mut store = MemoryStore::new();
        let mut scores = HighScoreStore::load(&store, PlayerNamespace::Fid(42));
        assert_eq!(scores.best(), 0);

        assert!(scores.record(&mut store, 120));
        assert!(!scores.record(&mut store, 120));
        assert!(!scores.record(&mut store, 90));
        assert_eq!(store.get("benji-highscore-42").as_deref(), Some("120"));

        let reloaded = HighScoreStore::load(&store, PlayerNamespace::Fid(42));
        assert_eq!(reloaded.best(), 120);
    }

    #[test]
    fn test_namespaces_are_separate() {
        let mut store = MemoryStore::new();
        let mut anon = HighScoreStore::load(&store, PlayerNamespace::Anonymous);
        anon.record(&mut store, 500);

        let player = HighScoreStore::load(&store, PlayerNamespace::Fid(9));
        assert_eq!(player.best(), 0);
    }

    #[test]
    fn test_zero_never_qualifies() {
        let mut store = MemoryStore::new();
        let mut scores = HighScoreStore::new(PlayerNamespace::Anonymous);
        assert!(!scores.record(&mut store, 0));
        assert!(store.is_empty());
    }

    #[test]
    fn test_garbage_value_loads_as_zero() {
        let mut store = MemoryStore::new();
        store.set("benji-highscore-anon", "lots");
        assert_eq!(
            HighScoreStore::load(&store, PlayerNamespace::Anonymous).best(),
            0
        );
    }
}
