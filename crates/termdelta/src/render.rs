#![forbid(unsafe_code)]

//! Inline diff rendering for the terminal.
//!
//! Deletions and insertions are wrapped in SGR color codes and the result is
//! wrapped to a column width with [`TextMeasure::wrap_text_with_ansi`], so a
//! colored change that spans a line break keeps its color on the next line.

use termdelta_diff::{Change, ChangeKind};
use termdelta_text::TextMeasure;

const SGR_RESET: &str = "\x1b[0m";

/// SGR sequences used to mark changed text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DiffStyle {
    pub insert: &'static str,
    pub delete: &'static str,
}

impl DiffStyle {
    #[must_use]
    pub const fn new(insert: &'static str, delete: &'static str) -> Self {
        Self { insert, delete }
    }

    /// No styling: changed text is emitted bare.
    #[must_use]
    pub const fn plain() -> Self {
        Self::new("", "")
    }
}

impl Default for DiffStyle {
    /// Green insertions, red deletions.
    fn default() -> Self {
        Self::new("\x1b[32m", "\x1b[31m")
    }
}

/// Concatenate `changes` into one string, coloring each change per `style`.
///
/// Empty changes are skipped.
#[must_use]
pub fn styled_diff(changes: &[Change], style: DiffStyle) -> String {
    let mut out = String::new();
    for change in changes.iter().filter(|change| !change.value.is_empty()) {
        let open = match change.kind {
            ChangeKind::Keep => "",
            ChangeKind::Insert => style.insert,
            ChangeKind::Delete => style.delete,
        };
        if open.is_empty() {
            out.push_str(&change.value);
        } else {
            out.push_str(open);
            out.push_str(&change.value);
            out.push_str(SGR_RESET);
        }
    }
    out
}

/// [`styled_diff`] wrapped to `width` columns. A `width` of zero only splits
/// on line breaks.
#[must_use]
pub fn render_diff(
    changes: &[Change],
    measure: &TextMeasure,
    width: usize,
    style: DiffStyle,
) -> Vec<String> {
    measure.wrap_text_with_ansi(&styled_diff(changes, style), width)
}
