#![forbid(unsafe_code)]

//! Pluggable text segmentation for the word-aware tokenizer.

use std::fmt;
use unicode_segmentation::UnicodeSegmentation;

/// Unit a segmenter splits text into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Granularity {
    Grapheme,
    Word,
    Sentence,
}

impl Granularity {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Grapheme => "grapheme",
            Self::Word => "word",
            Self::Sentence => "sentence",
        }
    }
}

impl fmt::Display for Granularity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Splits text into segments for tokenization.
///
/// Segments must be consecutive slices of `text` that together cover all of
/// it. Output that does not tile the input is ignored and the built-in word
/// splitter is used instead.
///
/// Only segmenters reporting [`Granularity::Word`] are accepted by the diff
/// entry points.
pub trait WordSegmenter: Send + Sync + fmt::Debug {
    /// The unit this segmenter produces.
    fn granularity(&self) -> Granularity;

    /// Split `text` into consecutive segments.
    fn segment<'a>(&self, text: &'a str) -> Vec<&'a str>;
}

/// Segmenter following the Unicode text segmentation rules (UAX #29).
///
/// # Example
/// ```
/// use termdelta_diff::{Granularity, UnicodeWordSegmenter, WordSegmenter};
///
/// let segmenter = UnicodeWordSegmenter::new();
/// assert_eq!(segmenter.granularity(), Granularity::Word);
/// assert_eq!(segmenter.segment("can't stop"), vec!["can't", " ", "stop"]);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnicodeWordSegmenter {
    granularity: Granularity,
}

impl UnicodeWordSegmenter {
    /// A segmenter splitting on word boundaries.
    #[must_use]
    pub const fn new() -> Self {
        Self::with_granularity(Granularity::Word)
    }

    #[must_use]
    pub const fn with_granularity(granularity: Granularity) -> Self {
        Self { granularity }
    }
}

impl Default for UnicodeWordSegmenter {
    fn default() -> Self {
        Self::new()
    }
}

impl WordSegmenter for UnicodeWordSegmenter {
    fn granularity(&self) -> Granularity {
        self.granularity
    }

    fn segment<'a>(&self, text: &'a str) -> Vec<&'a str> {
        match self.granularity {
            Granularity::Grapheme => text.graphemes(true).collect(),
            Granularity::Word => text.split_word_bounds().collect(),
            Granularity::Sentence => text.split_sentence_bounds().collect(),
        }
    }
}
