use std::sync::Arc;

use vocab_types::WordEntry;

use crate::cache::WordCache;

fn entry(word: &str) -> WordEntry {
    let mut entry = WordEntry::new(word);
    entry.definitions.push(format!("meaning of {word}"));
    entry
}

#[test]
fn refuses_unsuccessful_entries() {
    let cache = WordCache::unbounded();

    assert!(!cache.insert("zzz", WordEntry::not_found("zzz")));
    assert!(!cache.insert("empty", WordEntry::new("empty")));
    assert!(cache.is_empty());

    assert!(cache.insert("run", entry("run")));
    assert_eq!(cache.len(), 1);
}

#[test]
fn keys_are_case_sensitive() {
    let cache = WordCache::unbounded();
    cache.insert("Run", entry("Run"));

    assert!(cache.contains("Run"));
    assert!(!cache.contains("run"));
    assert_eq!(cache.get("Run").unwrap().word, "Run");
}

#[test]
fn bounded_cache_evicts_least_recent() {
    let cache = WordCache::with_capacity(Some(2));
    cache.insert("a", entry("a"));
    cache.insert("b", entry("b"));

    // touch "a" so "b" becomes the eviction candidate
    assert!(cache.get("a").is_some());
    cache.insert("c", entry("c"));

    assert_eq!(cache.len(), 2);
    assert!(cache.contains("a"));
    assert!(!cache.contains("b"));
    assert!(cache.contains("c"));
}

#[test]
fn zero_capacity_means_unbounded() {
    let cache = WordCache::with_capacity(Some(0));
    for i in 0..50 {
        cache.insert(&format!("w{i}"), entry(&format!("w{i}")));
    }
    assert_eq!(cache.len(), 50);

    cache.clear();
    assert!(cache.is_empty());
}

#[test]
fn concurrent_writers_do_not_clobber_each_other() {
    let cache = Arc::new(WordCache::unbounded());

    let handles: Vec<_> = (0..8)
        .map(|t| {
            let cache = Arc::clone(&cache);
            std::thread::spawn(move || {
                for i in 0..100 {
                    let word = format!("t{t}-{i}");
                    cache.insert(&word, entry(&word));
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }

    assert_eq!(cache.len(), 800);
}
