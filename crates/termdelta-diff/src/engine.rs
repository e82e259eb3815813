#![forbid(unsafe_code)]

//! The diff driver: tokenize, align, coalesce, clean up.

use crate::change::{Change, ChangeKind};
use crate::error::DiffError;
use crate::myers;
use crate::options::DiffOptions;
use crate::segmenter::Granularity;
use crate::tokenize::{join_words, tokenize_with_space, tokenize_words};
use crate::whitespace::dedupe_changes;
use crate::word_chars::is_space_char;

/// How text is split into tokens and how tokens are compared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TokenizerKind {
    /// Words and punctuation; whitespace only separates them.
    #[default]
    WordAware,
    /// Words, punctuation, whitespace runs and line breaks are all tokens.
    WordAwareWithSpace,
}

impl TokenizerKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::WordAware => "word",
            Self::WordAwareWithSpace => "word_with_space",
        }
    }

    /// Check that `options` can be used with this tokenizer.
    ///
    /// # Errors
    ///
    /// Returns [`DiffError::InvalidConfiguration`] if this is
    /// [`TokenizerKind::WordAware`] and `options.segmenter` does not split
    /// on words.
    pub fn validate(self, options: &DiffOptions) -> Result<(), DiffError> {
        if self != Self::WordAware {
            return Ok(());
        }
        match &options.segmenter {
            Some(segmenter) if segmenter.granularity() != Granularity::Word => {
                Err(DiffError::InvalidConfiguration {
                    granularity: segmenter.granularity(),
                })
            }
            _ => Ok(()),
        }
    }

    /// Split `text` into tokens.
    ///
    /// # Errors
    ///
    /// Returns [`DiffError::InvalidConfiguration`] if this is
    /// [`TokenizerKind::WordAware`] and `options.segmenter` does not split
    /// on words.
    pub fn tokenize<'a>(
        self,
        text: &'a str,
        options: &DiffOptions,
    ) -> Result<Vec<&'a str>, DiffError> {
        self.validate(options)?;
        Ok(self.split(text, options))
    }

    fn split<'a>(self, text: &'a str, options: &DiffOptions) -> Vec<&'a str> {
        match self {
            Self::WordAware => tokenize_words(text, options.segmenter.as_deref()),
            Self::WordAwareWithSpace => tokenize_with_space(text),
        }
    }

    /// Whether two tokens count as the same.
    #[must_use]
    pub fn equals(self, left: &str, right: &str, options: &DiffOptions) -> bool {
        match self {
            Self::WordAware => eq_case(
                left.trim_matches(is_space_char),
                right.trim_matches(is_space_char),
                options.ignore_case,
            ),
            Self::WordAwareWithSpace => {
                left == right || (options.ignore_case && eq_case(left, right, true))
            }
        }
    }

    /// Rebuild text from consecutive tokens.
    #[must_use]
    pub fn join<S: AsRef<str>>(self, tokens: &[S]) -> String {
        match self {
            Self::WordAware => join_words(tokens),
            Self::WordAwareWithSpace => tokens.iter().map(AsRef::as_ref).collect(),
        }
    }
}

fn eq_case(left: &str, right: &str, ignore_case: bool) -> bool {
    if ignore_case {
        left.chars()
            .flat_map(char::to_lowercase)
            .eq(right.chars().flat_map(char::to_lowercase))
    } else {
        left == right
    }
}

/// Computes word diffs with a fixed tokenizer.
///
/// # Example
/// ```
/// use termdelta_diff::{ChangeKind, DiffEngine, DiffOptions, TokenizerKind};
///
/// let engine = DiffEngine::new(TokenizerKind::WordAware);
/// let changes = engine.diff("foo bar", "foo baz", &DiffOptions::default()).unwrap();
/// let kinds: Vec<_> = changes.iter().map(|c| c.kind).collect();
/// assert_eq!(kinds, [ChangeKind::Keep, ChangeKind::Delete, ChangeKind::Insert]);
/// assert_eq!(changes[1].value, "bar");
/// assert_eq!(changes[2].value, "baz");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DiffEngine {
    kind: TokenizerKind,
}

impl DiffEngine {
    #[must_use]
    pub const fn new(kind: TokenizerKind) -> Self {
        Self { kind }
    }

    #[must_use]
    pub const fn kind(&self) -> TokenizerKind {
        self.kind
    }

    /// Split `text` into tokens with this engine's tokenizer.
    ///
    /// # Errors
    ///
    /// See [`TokenizerKind::tokenize`].
    pub fn tokenize<'a>(
        &self,
        text: &'a str,
        options: &DiffOptions,
    ) -> Result<Vec<&'a str>, DiffError> {
        self.kind.tokenize(text, options)
    }

    #[must_use]
    pub fn equals(&self, left: &str, right: &str, options: &DiffOptions) -> bool {
        self.kind.equals(left, right, options)
    }

    #[must_use]
    pub fn join<S: AsRef<str>>(&self, tokens: &[S]) -> String {
        self.kind.join(tokens)
    }

    /// Diff `old` against `new`.
    ///
    /// Fails only when the options carry a segmenter this tokenizer cannot
    /// use. Two empty inputs give a single empty Keep.
    ///
    /// # Errors
    ///
    /// Returns [`DiffError::InvalidConfiguration`] if the tokenizer is
    /// [`TokenizerKind::WordAware`] and `options.segmenter` does not split
    /// on words.
    pub fn diff(
        &self,
        old: &str,
        new: &str,
        options: &DiffOptions,
    ) -> Result<Vec<Change>, DiffError> {
        self.kind.validate(options)?;
        Ok(self.diff_validated(old, new, options))
    }

    pub(crate) fn diff_validated(&self, old: &str, new: &str, options: &DiffOptions) -> Vec<Change> {
        #[cfg(feature = "tracing")]
        let _span = tracing::debug_span!(
            "diff_words",
            old_len = old.len(),
            new_len = new.len(),
            tokenizer = self.kind.as_str()
        )
        .entered();

        if old.is_empty() && new.is_empty() {
            return vec![Change::new(ChangeKind::Keep, "", 0)];
        }

        let old_tokens = self.kind.split(old, options);
        let new_tokens = self.kind.split(new, options);
        let script = myers::align(&old_tokens, &new_tokens, |a, b| {
            self.kind.equals(a, b, options)
        });

        let mut changes = self.coalesce(&script, &old_tokens, &new_tokens, options);
        if self.kind == TokenizerKind::WordAware && !options.one_change_per_token {
            dedupe_changes(&mut changes);
        }
        changes
    }

    /// Turn a per-token script into changes, one per run of equal kinds.
    ///
    /// Keep and Insert text comes from the new tokens, Delete text from the
    /// old ones.
    fn coalesce(
        &self,
        script: &[ChangeKind],
        old: &[&str],
        new: &[&str],
        options: &DiffOptions,
    ) -> Vec<Change> {
        let mut changes = Vec::new();
        let (mut old_pos, mut new_pos) = (0, 0);
        let mut rest = script;

        while let Some(&kind) = rest.first() {
            let run = if options.one_change_per_token {
                1
            } else {
                rest.iter().take_while(|&&step| step == kind).count()
            };
            let value = match kind {
                ChangeKind::Keep => {
                    old_pos += run;
                    new_pos += run;
                    self.join(&new[new_pos - run..new_pos])
                }
                ChangeKind::Insert => {
                    new_pos += run;
                    self.join(&new[new_pos - run..new_pos])
                }
                ChangeKind::Delete => {
                    old_pos += run;
                    self.join(&old[old_pos - run..old_pos])
                }
            };
            changes.push(Change::new(kind, value, run));
            rest = &rest[run..];
        }
        changes
    }
}
