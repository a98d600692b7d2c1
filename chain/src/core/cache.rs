// Memoization for the beacon helpers.
//
// Entries are keyed by epoch or slot only, not by state, so a cache must be
// cleared whenever it is reused against an unrelated state.

use std::{num::NonZeroUsize, sync::Arc};

use log::trace;
use lru::LruCache;
use parking_lot::Mutex;

pub const DEFAULT_CACHE_SIZE: usize = 64;

/// Macro to initialize an LRU cache with a given size
#[macro_export]
macro_rules! init_cache {
    ($cache_size: expr) => {{
        Mutex::new(LruCache::new(
            NonZeroUsize::new($cache_size).unwrap_or(NonZeroUsize::MIN),
        ))
    }};
}

/// Cache shared by the helpers of one transition context.
#[derive(Debug)]
pub struct HelperCache {
    /// Active validator indices: epoch -> indices
    pub active_indices_cache: Mutex<LruCache<u64, Arc<Vec<u64>>>>,
    /// Beacon proposer: slot -> validator index
    pub proposer_index_cache: Mutex<LruCache<u64, u64>>,
}

impl HelperCache {
    pub fn new(cache_size: usize) -> Self {
        Self {
            active_indices_cache: init_cache!(cache_size),
            proposer_index_cache: init_cache!(cache_size),
        }
    }

    pub fn active_indices(&self, epoch: u64) -> Option<Arc<Vec<u64>>> {
        self.active_indices_cache.lock().get(&epoch).cloned()
    }

    pub fn insert_active_indices(&self, epoch: u64, indices: Arc<Vec<u64>>) {
        self.active_indices_cache.lock().put(epoch, indices);
    }

    pub fn proposer_index(&self, slot: u64) -> Option<u64> {
        self.proposer_index_cache.lock().get(&slot).copied()
    }

    pub fn insert_proposer_index(&self, slot: u64, index: u64) {
        self.proposer_index_cache.lock().put(slot, index);
    }

    pub fn is_empty(&self) -> bool {
        self.active_indices_cache.lock().is_empty() && self.proposer_index_cache.lock().is_empty()
    }

    /// Clear all LRU caches
    pub fn clear_caches(&self) {
        trace!("clearing helper caches");
        self.active_indices_cache.lock().clear();
        self.proposer_index_cache.lock().clear();
    }
}

impl Default for HelperCache {
    fn default() -> Self {
        Self::new(DEFAULT_CACHE_SIZE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clear_caches() {
        let cache = HelperCache::default();
        cache.insert_proposer_index(8, 3);
        cache.insert_active_indices(1, Arc::new(vec![0, 1, 2]));
        assert_eq!(cache.proposer_index(8), Some(3));
        assert!(!cache.is_empty());

        cache.clear_caches();
        assert!(cache.is_empty());
        assert_eq!(cache.proposer_index(8), None);
        assert!(cache.active_indices(1).is_none());
    }

    #[test]
    fn test_lru_eviction() {
        let cache = HelperCache::new(2);
        cache.insert_proposer_index(1, 10);
        cache.insert_proposer_index(2, 20);
        cache.insert_proposer_index(3, 30);
        assert_eq!(cache.proposer_index(1), None);
        assert_eq!(cache.proposer_index(3), Some(30));
    }

    #[test]
    fn test_zero_size_falls_back_to_one() {
        let cache = HelperCache::new(0);
        cache.insert_proposer_index(1, 10);
        assert_eq!(cache.proposer_index(1), Some(10));
    }
}
