#![forbid(unsafe_code)]

//! Bounded width cache for repeated text measurement.
//!
//! Width calculation runs for every line a terminal pane lays out, and panes
//! redraw the same lines over and over. The cache memoizes the computed
//! width by exact string content, so entries never go stale.
//!
//! # Example
//! ```
//! use termdelta_text::WidthCache;
//!
//! let mut cache = WidthCache::new(2);
//! assert_eq!(cache.get_or_compute_with("漢字", |_| 4), 4);
//! assert_eq!(cache.get_or_compute_with("漢字", |_| unreachable!()), 4);
//!
//! let stats = cache.stats();
//! assert_eq!(stats.hits, 1);
//! assert_eq!(stats.misses, 1);
//! ```

use lru::LruCache;
use rustc_hash::FxBuildHasher;
use std::num::NonZeroUsize;

/// Statistics about cache performance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CacheStats {
    /// Number of cache hits.
    pub hits: u64,
    /// Number of cache misses.
    pub misses: u64,
    /// Number of entries dropped to make room.
    pub evictions: u64,
    /// Current number of entries.
    pub size: usize,
    /// Maximum capacity.
    pub capacity: usize,
}

impl CacheStats {
    /// Calculate hit rate (0.0 to 1.0).
    #[must_use]
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}

/// Bounded map from text to its display width.
///
/// Lookups do not refresh an entry's position, so when the cache is full the
/// oldest inserted entry is evicted first.
///
/// # Thread Safety
/// `WidthCache` is not thread-safe. [`TextMeasure`](crate::TextMeasure)
/// keeps it behind a mutex.
#[derive(Debug)]
pub struct WidthCache {
    cache: LruCache<String, usize, FxBuildHasher>,
    hits: u64,
    misses: u64,
    evictions: u64,
}

impl WidthCache {
    /// Create a new cache with the specified capacity.
    ///
    /// If capacity is zero, defaults to 1.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            cache: LruCache::with_hasher(non_zero(capacity), FxBuildHasher),
            hits: 0,
            misses: 0,
            evictions: 0,
        }
    }

    /// Get the cached width or compute it with `compute` and cache it.
    pub fn get_or_compute_with<F>(&mut self, text: &str, compute: F) -> usize
    where
        F: FnOnce(&str) -> usize,
    {
        if let Some(&width) = self.cache.peek(text) {
            self.hits += 1;
            return width;
        }

        self.misses += 1;
        let width = compute(text);
        if let Some((_evicted, _)) = self.cache.push(text.to_owned(), width) {
            self.evictions += 1;
            #[cfg(feature = "tracing")]
            tracing::trace!(evicted_len = _evicted.len(), "width cache eviction");
        }
        width
    }

    /// Check if a text string is in the cache.
    #[must_use]
    pub fn contains(&self, text: &str) -> bool {
        self.cache.contains(text)
    }

    /// Get the cached width without computing.
    #[must_use]
    pub fn get(&self, text: &str) -> Option<usize> {
        self.cache.peek(text).copied()
    }

    /// Clear the cache.
    pub fn clear(&mut self) {
        self.cache.clear();
    }

    /// Reset statistics.
    pub fn reset_stats(&mut self) {
        self.hits = 0;
        self.misses = 0;
        self.evictions = 0;
    }

    /// Get cache statistics.
    #[must_use]
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits,
            misses: self.misses,
            evictions: self.evictions,
            size: self.cache.len(),
            capacity: self.cache.cap().get(),
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cache.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }

    #[must_use]
    pub fn capacity(&self) -> usize {
        self.cache.cap().get()
    }

    /// Resize the cache capacity.
    ///
    /// If the new capacity is smaller than the current size, the oldest
    /// entries are evicted.
    pub fn resize(&mut self, new_capacity: usize) {
        self.cache.resize(non_zero(new_capacity));
    }
}

fn non_zero(capacity: usize) -> NonZeroUsize {
    NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN)
}
