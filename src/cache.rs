//! LRU cache for raw drawing PDF bytes.
//!
//! The orchestrator owns one of these instead of relying on process-global
//! state: eviction is least-recently-used with a fixed entry capacity.

use indexmap::IndexMap;
use std::sync::Arc;
use uuid::Uuid;

/// Least-recently-used byte cache keyed by drawing id.
///
/// Backed by an insertion-ordered map: a hit re-inserts the entry at the
/// back, so the front is always the least recently used and is the entry
/// evicted when the cache is full.
#[derive(Debug)]
pub struct PdfByteCache {
    capacity: usize,
    entries: IndexMap<Uuid, Arc<Vec<u8>>>,
}

impl PdfByteCache {
    /// Create a cache holding at most `capacity` drawings.
    ///
    /// A zero capacity is bumped to one so the cache can always hold the
    /// drawing currently being processed.
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity: capacity.max(1),
            entries: IndexMap::new(),
        }
    }

    /// Number of cached drawings.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the cache is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Fetch a drawing's bytes, refreshing its recency.
    pub fn get(&mut self, drawing_id: &Uuid) -> Option<Arc<Vec<u8>>> {
        let bytes = self.entries.shift_remove(drawing_id)?;
        self.entries.insert(*drawing_id, bytes.clone());
        Some(bytes)
    }

    /// Insert a drawing's bytes, evicting the least-recently-used entry if
    /// the cache is full.
    pub fn insert(&mut self, drawing_id: Uuid, bytes: Arc<Vec<u8>>) {
        self.entries.shift_remove(&drawing_id);
        if self.entries.len() >= self.capacity {
            if let Some((evicted, _)) = self.entries.shift_remove_index(0) {
                log::debug!("evicting cached PDF bytes for drawing {}", evicted);
            }
        }
        self.entries.insert(drawing_id, bytes);
    }

    /// Fetch a drawing's bytes, inserting `bytes` on a miss.
    pub fn get_or_insert(&mut self, drawing_id: Uuid, bytes: &[u8]) -> Arc<Vec<u8>> {
        if let Some(cached) = self.get(&drawing_id) {
            return cached;
        }
        let arc = Arc::new(bytes.to_vec());
        self.insert(drawing_id, arc.clone());
        arc
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_and_get() {
        let mut cache = PdfByteCache::new(4);
        let id = Uuid::new_v4();
        cache.insert(id, Arc::new(vec![1, 2, 3]));
        assert_eq!(cache.get(&id).unwrap().as_slice(), &[1, 2, 3]);
        assert!(cache.get(&Uuid::new_v4()).is_none());
    }

    #[test]
    fn test_eviction_is_least_recently_used() {
        let mut cache = PdfByteCache::new(2);
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        let c = Uuid::new_v4();
        cache.insert(a, Arc::new(vec![b'a']));
        cache.insert(b, Arc::new(vec![b'b']));
        // Touch `a` so `b` becomes the LRU entry
        assert!(cache.get(&a).is_some());
        cache.insert(c, Arc::new(vec![b'c']));

        assert!(cache.get(&b).is_none());
        assert!(cache.get(&a).is_some());
        assert!(cache.get(&c).is_some());
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn test_get_or_insert_reuses_cached_bytes() {
        let mut cache = PdfByteCache::new(2);
        let id = Uuid::new_v4();
        let first = cache.get_or_insert(id, &[1, 2]);
        let second = cache.get_or_insert(id, &[9, 9]);
        // Second call hits the cache; the new bytes are ignored
        assert_eq!(second.as_slice(), &[1, 2]);
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn test_zero_capacity_still_holds_one() {
        let mut cache = PdfByteCache::new(0);
        let id = Uuid::new_v4();
        cache.insert(id, Arc::new(vec![1]));
        assert_eq!(cache.len(), 1);
        assert!(cache.get(&id).is_some());
    }
}
