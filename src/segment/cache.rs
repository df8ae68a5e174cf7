use std::{
    num::NonZeroUsize,
    sync::{Arc, Mutex, MutexGuard, PoisonError},
};

use lru::LruCache;

use crate::error::{Result, SimilarityError};

/// Bounded LRU cache from text to its space-joined segmentation.
///
/// Thread safe: every access goes through one mutex. Segmentation is
/// deterministic, so a hit and a miss produce the same value.
pub struct SegmentCache {
    inner: Mutex<LruCache<String, Arc<str>>>,
}

impl SegmentCache {
    /// Create a cache holding at most `capacity` distinct texts.
    pub fn new(capacity: usize) -> Result<Self> {
        let capacity = NonZeroUsize::new(capacity)
            .ok_or_else(|| SimilarityError::Config("segment cache capacity must be non-zero".into()))?;
        Ok(Self {
            inner: Mutex::new(LruCache::new(capacity)),
        })
    }

    // ロック中にpanicしても中身は壊れない (put/get のみ)
    fn lock(&self) -> MutexGuard<'_, LruCache<String, Arc<str>>> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Look up `text`, marking it most recently used.
    pub fn get(&self, text: &str) -> Option<Arc<str>> {
        self.lock().get(text).cloned()
    }

    /// Store a segmentation, evicting the least recently used entry when full.
    pub fn insert(&self, text: &str, joined: Arc<str>) {
        self.lock().put(text.to_owned(), joined);
    }

    /// Presence check that does not touch recency.
    pub fn contains(&self, text: &str) -> bool {
        self.lock().contains(text)
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.lock().cap().get()
    }

    pub fn clear(&self) {
        self.lock().clear();
    }
}

impl std::fmt::Debug for SegmentCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let guard = self.lock();
        f.debug_struct("SegmentCache")
            .field("len", &guard.len())
            .field("capacity", &guard.cap())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::thread;

    use super::*;

    #[test]
    fn zero_capacity_is_rejected() {
        assert!(matches!(SegmentCache::new(0), Err(SimilarityError::Config(_))));
    }

    #[test]
    fn evicts_least_recently_used() {
        let cache = SegmentCache::new(2).unwrap();
        cache.insert("a", Arc::from("a"));
        cache.insert("b", Arc::from("b"));
        // touch "a" so "b" becomes the eviction candidate
        assert!(cache.get("a").is_some());
        cache.insert("c", Arc::from("c"));

        assert!(cache.contains("a"));
        assert!(!cache.contains("b"));
        assert!(cache.contains("c"));
        assert_eq!(cache.len(), 2);
        assert_eq!(cache.capacity(), 2);
    }

    #[test]
    fn overfilling_keeps_capacity_bound() {
        let cache = SegmentCache::new(1000).unwrap();
        for i in 0..1500 {
            let text = format!("文本{i}");
            cache.insert(&text, Arc::from(text.as_str()));
        }
        assert_eq!(cache.len(), 1000);
        assert!(!cache.contains("文本0"));
        assert!(cache.contains("文本1499"));
    }

    #[test]
    fn clear_empties() {
        let cache = SegmentCache::new(4).unwrap();
        cache.insert("x", Arc::from("x"));
        cache.clear();
        assert!(cache.is_empty());
    }

    #[test]
    fn concurrent_insert_and_get() {
        let cache = Arc::new(SegmentCache::new(64).unwrap());
        let handles: Vec<_> = (0..8)
            .map(|i| {
                let cache = Arc::clone(&cache);
                thread::spawn(move || {
                    let text = format!("text_{i}");
                    cache.insert(&text, Arc::from(text.as_str()));
                    assert_eq!(cache.get(&text).as_deref(), Some(text.as_str()));
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }
        assert_eq!(cache.len(), 8);
    }
}
