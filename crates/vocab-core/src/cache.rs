use std::collections::HashMap;
use std::num::NonZeroUsize;
use std::sync::{Mutex, MutexGuard, PoisonError};

use lru::LruCache;
use vocab_types::WordEntry;

enum Store {
    Unbounded(HashMap<String, WordEntry>),
    Bounded(LruCache<String, WordEntry>),
}

/// In-memory lookup cache keyed by the raw query word (case-sensitive).
///
/// Reads and writes never suspend. Concurrent inserts for the same word are
/// last-writer-wins.
pub struct WordCache {
    store: Mutex<Store>,
}

impl WordCache {
    pub fn unbounded() -> Self {
        Self {
            store: Mutex::new(Store::Unbounded(HashMap::new())),
        }
    }

    pub fn bounded(capacity: NonZeroUsize) -> Self {
        Self {
            store: Mutex::new(Store::Bounded(LruCache::new(capacity))),
        }
    }

    /// `None` or zero means unbounded
    pub fn with_capacity(capacity: Option<usize>) -> Self {
        match capacity.and_then(NonZeroUsize::new) {
            Some(capacity) => Self::bounded(capacity),
            None => Self::unbounded(),
        }
    }

    pub fn get(&self, word: &str) -> Option<WordEntry> {
        match &mut *self.lock() {
            Store::Unbounded(map) => map.get(word).cloned(),
            Store::Bounded(lru) => lru.get(word).cloned(),
        }
    }

    /// Store `entry` under `word`. Entries without definitions, or carrying an
    /// error, are refused.
    pub fn insert(&self, word: &str, entry: WordEntry) -> bool {
        if !entry.is_success() {
            return false;
        }

        match &mut *self.lock() {
            Store::Unbounded(map) => {
                map.insert(word.to_string(), entry);
            }
            Store::Bounded(lru) => {
                lru.put(word.to_string(), entry);
            }
        }
        true
    }

    pub fn contains(&self, word: &str) -> bool {
        match &*self.lock() {
            Store::Unbounded(map) => map.contains_key(word),
            Store::Bounded(lru) => lru.contains(word),
        }
    }

    pub fn len(&self) -> usize {
        match &*self.lock() {
            Store::Unbounded(map) => map.len(),
            Store::Bounded(lru) => lru.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        match &mut *self.lock() {
            Store::Unbounded(map) => map.clear(),
            Store::Bounded(lru) => lru.clear(),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Store> {
        self.store.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for WordCache {
    fn default() -> Self {
        Self::unbounded()
    }
}
