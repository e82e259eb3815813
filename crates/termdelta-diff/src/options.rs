#![forbid(unsafe_code)]

//! Diff configuration.

use crate::segmenter::WordSegmenter;
use std::sync::Arc;

/// Options shared by every diff entry point.
///
/// # Example
/// ```
/// use termdelta_diff::{DiffOptions, UnicodeWordSegmenter};
///
/// let options = DiffOptions::new()
///     .ignore_case(true)
///     .segmenter(UnicodeWordSegmenter::new());
/// assert!(options.ignore_case);
/// assert!(options.segmenter.is_some());
/// ```
#[derive(Debug, Clone, Default)]
pub struct DiffOptions {
    /// Compare tokens case-insensitively.
    pub ignore_case: bool,
    /// `Some(false)` makes [`diff_words`](crate::diff_words) treat
    /// whitespace as significant. `None` and `Some(true)` keep the
    /// word-aware behavior.
    pub ignore_whitespace: Option<bool>,
    /// Custom word segmentation for the word-aware tokenizer.
    pub segmenter: Option<Arc<dyn WordSegmenter>>,
    /// Emit one change per token and skip whitespace cleanup.
    pub one_change_per_token: bool,
}

impl DiffOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn ignore_case(mut self, ignore: bool) -> Self {
        self.ignore_case = ignore;
        self
    }

    #[must_use]
    pub fn ignore_whitespace(mut self, ignore: bool) -> Self {
        self.ignore_whitespace = Some(ignore);
        self
    }

    /// Use `segmenter` to split words.
    #[must_use]
    pub fn segmenter(mut self, segmenter: impl WordSegmenter + 'static) -> Self {
        self.segmenter = Some(Arc::new(segmenter));
        self
    }

    /// Share an existing segmenter.
    #[must_use]
    pub fn shared_segmenter(mut self, segmenter: Arc<dyn WordSegmenter>) -> Self {
        self.segmenter = Some(segmenter);
        self
    }

    #[must_use]
    pub fn one_change_per_token(mut self, enabled: bool) -> Self {
        self.one_change_per_token = enabled;
        self
    }
}
