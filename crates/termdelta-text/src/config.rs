#![forbid(unsafe_code)]

//! Measurement configuration.
//!
//! Defaults match what terminal panes expect out of the box: a tab counts as
//! three columns and the width cache keeps the 512 most recently inserted
//! strings. Both can be overridden through the environment.

/// Default number of columns a tab expands to.
pub const DEFAULT_TAB_WIDTH: usize = 3;
/// Smallest accepted tab width.
pub const MIN_TAB_WIDTH: usize = 1;
/// Largest accepted tab width.
pub const MAX_TAB_WIDTH: usize = 16;
/// Default width cache capacity.
pub const DEFAULT_CACHE_CAPACITY: usize = 512;

/// Environment variable to override the tab width (`1..=16`).
const ENV_TAB_WIDTH: &str = "TERMDELTA_TAB_WIDTH";
/// Environment variable to override the width cache capacity.
const ENV_WIDTH_CACHE: &str = "TERMDELTA_WIDTH_CACHE";

/// Configuration for a [`TextMeasure`](crate::TextMeasure).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MeasureConfig {
    /// Columns a tab character expands to. Callers needing real tab stops
    /// must expand tabs themselves.
    pub tab_width: usize,
    /// Maximum number of cached width results. Zero is treated as one.
    pub cache_capacity: usize,
}

impl MeasureConfig {
    /// Create a configuration with default values.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            tab_width: DEFAULT_TAB_WIDTH,
            cache_capacity: DEFAULT_CACHE_CAPACITY,
        }
    }

    /// Set the tab width, clamped to `MIN_TAB_WIDTH..=MAX_TAB_WIDTH`.
    #[must_use]
    pub fn tab_width(mut self, tab_width: usize) -> Self {
        self.tab_width = clamp_tab_width(tab_width);
        self
    }

    /// Set the cache capacity.
    #[must_use]
    pub fn cache_capacity(mut self, capacity: usize) -> Self {
        self.cache_capacity = capacity;
        self
    }

    /// Read overrides from the process environment.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_env_with(|key| std::env::var(key).ok())
    }

    /// Read overrides using a custom environment lookup (for tests).
    ///
    /// Unparseable values are ignored and the default is kept.
    #[must_use]
    pub fn from_env_with<F>(get_env: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::new();
        if let Some(tab_width) = env_usize(&get_env, ENV_TAB_WIDTH) {
            config = config.tab_width(tab_width);
        }
        if let Some(capacity) = env_usize(&get_env, ENV_WIDTH_CACHE) {
            config = config.cache_capacity(capacity);
        }
        config
    }
}

impl Default for MeasureConfig {
    fn default() -> Self {
        Self::new()
    }
}

const fn clamp_tab_width(tab_width: usize) -> usize {
    if tab_width < MIN_TAB_WIDTH {
        MIN_TAB_WIDTH
    } else if tab_width > MAX_TAB_WIDTH {
        MAX_TAB_WIDTH
    } else {
        tab_width
    }
}

fn env_usize<F>(get_env: &F, key: &str) -> Option<usize>
where
    F: Fn(&str) -> Option<String>,
{
    get_env(key).and_then(|value| value.trim().parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults() {
        let config = MeasureConfig::default();
        assert_eq!(config.tab_width, 3);
        assert_eq!(config.cache_capacity, 512);
    }

    #[test]
    fn env_overrides_apply() {
        let config = MeasureConfig::from_env_with(lookup(&[
            ("TERMDELTA_TAB_WIDTH", "4"),
            ("TERMDELTA_WIDTH_CACHE", " 64 "),
        ]));
        assert_eq!(config.tab_width, 4);
        assert_eq!(config.cache_capacity, 64);
    }

    #[test]
    fn invalid_env_values_keep_defaults() {
        let config = MeasureConfig::from_env_with(lookup(&[
            ("TERMDELTA_TAB_WIDTH", "wide"),
            ("TERMDELTA_WIDTH_CACHE", "-1"),
        ]));
        assert_eq!(config, MeasureConfig::new());
    }

    #[test]
    fn tab_width_is_clamped() {
        assert_eq!(MeasureConfig::new().tab_width(0).tab_width, MIN_TAB_WIDTH);
        assert_eq!(MeasureConfig::new().tab_width(99).tab_width, MAX_TAB_WIDTH);
        assert_eq!(MeasureConfig::new().tab_width(8).tab_width, 8);
    }
}
