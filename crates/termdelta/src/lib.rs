#![forbid(unsafe_code)]

//! termdelta public facade crate.
//!
//! Re-exports the word diff engine and the terminal text measurer, and
//! composes them: [`diff_for_terminal`] diffs two strings and lays the
//! colored result out in a fixed number of columns.
//!
//! # Example
//! ```
//! use termdelta::prelude::*;
//!
//! let measure = TextMeasure::new();
//! let lines = diff_for_terminal(
//!     "the quick fox",
//!     "the slow fox",
//!     &DiffOptions::default(),
//!     &measure,
//!     80,
//! )?;
//! assert_eq!(lines.len(), 1);
//! assert_eq!(measure.visible_width(&lines[0]), "the quickslow fox".len());
//! # Ok::<(), termdelta::Error>(())
//! ```

use std::fmt;

pub mod render;

// --- Diff re-exports -------------------------------------------------------

pub use termdelta_diff::{
    Change, ChangeKind, DiffEngine, DiffError, DiffOptions, Granularity, TokenizerKind,
    UnicodeWordSegmenter, WordSegmenter, diff_words, diff_words_with_space, new_text, old_text,
};

// --- Text re-exports -------------------------------------------------------

pub use termdelta_text::{
    AnsiCode, AnsiState, CacheStats, MeasureConfig, TextMeasure, extract_ansi_code, strip_ansi,
    visible_width_uncached,
};
#[cfg(feature = "thread_local_cache")]
pub use termdelta_text::{cached_width, clear_thread_cache};

pub use render::{DiffStyle, render_diff, styled_diff};

// --- Errors ---------------------------------------------------------------

/// Top-level error type for termdelta.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The diff options were rejected.
    Diff(DiffError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Diff(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Diff(err) => Some(err),
        }
    }
}

impl From<DiffError> for Error {
    fn from(err: DiffError) -> Self {
        Self::Diff(err)
    }
}

/// Standard result type for termdelta APIs.
pub type Result<T> = std::result::Result<T, Error>;

/// Diff `old` against `new` word by word and wrap the colored result to
/// `width` columns.
///
/// # Errors
/// [`Error::Diff`] if `options` carries a segmenter that does not split on
/// words.
pub fn diff_for_terminal(
    old: &str,
    new: &str,
    options: &DiffOptions,
    measure: &TextMeasure,
    width: usize,
) -> Result<Vec<String>> {
    let changes = diff_words(old, new, options)?;
    Ok(render_diff(&changes, measure, width, DiffStyle::default()))
}

// --- Prelude --------------------------------------------------------------

pub mod prelude {
    pub use crate::{
        AnsiState, Change, ChangeKind, DiffOptions, DiffStyle, Error, Result, TextMeasure,
        TokenizerKind, diff_for_terminal, diff_words, diff_words_with_space, render_diff,
    };

    pub use crate::{diff, text};
}

pub use termdelta_diff as diff;
pub use termdelta_text as text;
