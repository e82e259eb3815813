#![forbid(unsafe_code)]

//! Cached visible-width measurement.

use crate::config::MeasureConfig;
use crate::width::{self, is_printable_ascii};
use crate::width_cache::{CacheStats, WidthCache};
use std::sync::Mutex;

/// Measures terminal column widths with an owned, bounded cache.
///
/// Construct one per application (or per test) and share it by reference.
/// The cache sits behind a mutex, so `&TextMeasure` can be used from several
/// threads. A poisoned lock only disables caching; widths are still computed.
///
/// # Example
/// ```
/// use termdelta_text::TextMeasure;
///
/// let measure = TextMeasure::new();
/// assert_eq!(measure.visible_width(""), 0);
/// assert_eq!(measure.visible_width("abc"), 3);
/// assert_eq!(measure.visible_width("漢字"), 4);
/// assert_eq!(measure.visible_width("\x1b[31mred\x1b[0m"), 3);
/// ```
#[derive(Debug)]
pub struct TextMeasure {
    config: MeasureConfig,
    cache: Mutex<WidthCache>,
}

impl TextMeasure {
    /// Create a measure with the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(MeasureConfig::default())
    }

    /// Create a measure with an explicit configuration.
    #[must_use]
    pub fn with_config(config: MeasureConfig) -> Self {
        // The field is public, so re-apply the clamp.
        let config = config.tab_width(config.tab_width);
        Self {
            config,
            cache: Mutex::new(WidthCache::new(config.cache_capacity)),
        }
    }

    /// Create a measure configured from the environment.
    #[must_use]
    pub fn from_env() -> Self {
        Self::with_config(MeasureConfig::from_env())
    }

    #[must_use]
    pub fn config(&self) -> &MeasureConfig {
        &self.config
    }

    /// Number of terminal columns `text` occupies.
    ///
    /// Escape sequences count as zero columns, tabs as `tab_width` columns,
    /// wide CJK characters and emoji as two.
    #[must_use]
    pub fn visible_width(&self, text: &str) -> usize {
        if text.is_empty() {
            return 0;
        }
        if is_printable_ascii(text) {
            return text.len();
        }

        let tab_width = self.config.tab_width;
        let compute = |text: &str| {
            #[cfg(feature = "tracing")]
            let _span = tracing::trace_span!("visible_width", len = text.len()).entered();
            width::measure(text, tab_width)
        };

        match self.cache.lock() {
            Ok(mut cache) => cache.get_or_compute_with(text, compute),
            Err(_) => compute(text),
        }
    }

    /// Width of one grapheme cluster, without touching the cache.
    pub(crate) fn grapheme_columns(&self, grapheme: &str) -> usize {
        if grapheme == "\t" {
            self.config.tab_width
        } else {
            width::grapheme_width(grapheme)
        }
    }

    /// Snapshot of the cache statistics.
    #[must_use]
    pub fn cache_stats(&self) -> CacheStats {
        self.cache
            .lock()
            .map(|cache| cache.stats())
            .unwrap_or_default()
    }

    /// Drop every cached width.
    pub fn clear_cache(&self) {
        if let Ok(mut cache) = self.cache.lock() {
            cache.clear();
        }
    }
}

impl Default for TextMeasure {
    fn default() -> Self {
        Self::new()
    }
}

// Thread-local measure for callers that cannot pass one around.
#[cfg(feature = "thread_local_cache")]
thread_local! {
    static THREAD_MEASURE: TextMeasure = TextMeasure::new();
}

/// Visible width using a thread-local [`TextMeasure`].
#[cfg(feature = "thread_local_cache")]
pub fn cached_width(text: &str) -> usize {
    THREAD_MEASURE.with(|measure| measure.visible_width(text))
}

/// Clear the thread-local cache.
#[cfg(feature = "thread_local_cache")]
pub fn clear_thread_cache() {
    THREAD_MEASURE.with(TextMeasure::clear_cache);
}
