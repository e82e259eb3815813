#![forbid(unsafe_code)]

//! Word-level diffing for termdelta.
//!
//! Two modes share one diff core:
//! - [`diff_words`] treats whitespace as a separator. Changes in spacing
//!   alone are not reported, and whitespace around an edit is kept with the
//!   unchanged text where both sides agree.
//! - [`diff_words_with_space`] makes whitespace runs and line breaks tokens
//!   of their own, so spacing edits show up.
//!
//! Concatenating the Keep and Insert values of a result always gives back the
//! new text. For [`diff_words_with_space`] the Keep and Delete values also
//! give back the old text exactly; for [`diff_words`] they match it up to
//! whitespace.
//!
//! # Example
//! ```
//! use termdelta_diff::{ChangeKind, DiffOptions, diff_words, diff_words_with_space, new_text};
//!
//! let options = DiffOptions::default();
//! let changes = diff_words("the quick fox", "the slow fox", &options).unwrap();
//! assert_eq!(new_text(&changes), "the slow fox");
//! assert!(changes.iter().any(|c| c.kind == ChangeKind::Delete && c.value == "quick"));
//!
//! // Spacing only matters when whitespace is significant.
//! assert_eq!(diff_words("foo  bar", "foo bar", &options).unwrap().len(), 1);
//! assert_eq!(diff_words_with_space("foo  bar", "foo bar", &options).len(), 4);
//! ```

pub mod change;
pub mod engine;
pub mod error;
pub mod options;
pub mod segmenter;
pub mod word_chars;

mod myers;
mod tokenize;
mod whitespace;

pub use change::{Change, ChangeKind, new_text, old_text};
pub use engine::{DiffEngine, TokenizerKind};
pub use error::DiffError;
pub use options::DiffOptions;
pub use segmenter::{Granularity, UnicodeWordSegmenter, WordSegmenter};
pub use word_chars::{WORD_CHAR_RANGES, is_space_char, is_word_char};

/// Diff two strings word by word, ignoring spacing differences.
///
/// With `ignore_whitespace` explicitly set to `false` this behaves like
/// [`diff_words_with_space`].
///
/// # Errors
/// [`DiffError::InvalidConfiguration`] if `options.segmenter` does not
/// split on words.
pub fn diff_words(
    old: &str,
    new: &str,
    options: &DiffOptions,
) -> Result<Vec<Change>, DiffError> {
    if options.ignore_whitespace == Some(false) {
        return Ok(diff_words_with_space(old, new, options));
    }
    DiffEngine::new(TokenizerKind::WordAware).diff(old, new, options)
}

/// Diff two strings word by word, treating whitespace and line breaks as
/// tokens. Any segmenter in `options` is ignored.
#[must_use]
pub fn diff_words_with_space(old: &str, new: &str, options: &DiffOptions) -> Vec<Change> {
    DiffEngine::new(TokenizerKind::WordAwareWithSpace).diff_validated(old, new, options)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_whitespace_sensitivity_routes_to_space_mode() {
        let options = DiffOptions::new().ignore_whitespace(false);
        assert_eq!(
            diff_words("foo  bar", "foo bar", &options).unwrap(),
            diff_words_with_space("foo  bar", "foo bar", &options)
        );

        let options = DiffOptions::new().ignore_whitespace(true);
        assert_eq!(diff_words("foo  bar", "foo bar", &options).unwrap().len(), 1);
    }

    #[test]
    fn space_mode_ignores_segmenter_granularity() {
        let graphemes = UnicodeWordSegmenter::with_granularity(Granularity::Grapheme);
        let options = DiffOptions::new().segmenter(graphemes);
        assert!(diff_words("a", "b", &options).is_err());

        let options = options.ignore_whitespace(false);
        assert!(diff_words("a", "b", &options).is_ok());
    }
}
