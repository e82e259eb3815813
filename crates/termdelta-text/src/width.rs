#![forbid(unsafe_code)]

//! Grapheme-based terminal column width.
//!
//! Width is computed per extended grapheme cluster:
//! - clusters made only of default-ignorable, control or mark code points
//!   occupy no columns
//! - clusters that form an emoji sequence occupy two columns
//! - everything else takes the East-Asian width of its base code point,
//!   plus the width of any halfwidth/fullwidth form later in the cluster
//!
//! This module is uncached. [`TextMeasure`](crate::TextMeasure) wraps it with
//! a bounded cache.

use crate::ansi::strip_ansi;
use crate::config::DEFAULT_TAB_WIDTH;
use regex::Regex;
use std::borrow::Cow;
use std::sync::LazyLock;
use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthChar;

static ZERO_WIDTH: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:\p{Default_Ignorable_Code_Point}|\p{Control}|\p{Mark})+$")
        .expect("ZERO_WIDTH is a valid static regex pattern")
});

static LEADING_NON_PRINTING: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[\p{Default_Ignorable_Code_Point}\p{Control}\p{Format}\p{Mark}]+")
        .expect("LEADING_NON_PRINTING is a valid static regex pattern")
});

// One emoji element: a modifier sequence, a presentation-default emoji with
// optional VS16, or a text-default emoji forced to emoji presentation.
const EMOJI_ELEMENT: &str = r"(?:\p{Emoji_Modifier_Base}\p{Emoji_Modifier}|[\p{Emoji_Presentation}--\p{Regional_Indicator}]\x{FE0F}?|[\p{Emoji}--\p{ASCII}]\x{FE0F})";

static EMOJI_SEQUENCE: LazyLock<Regex> = LazyLock::new(|| {
    let pattern = format!(
        r"^(?:\p{{Regional_Indicator}}{{2}}|[0-9#*]\x{{FE0F}}\x{{20E3}}|\x{{1F3F4}}[\x{{E0061}}-\x{{E007A}}]+\x{{E007F}}|{EMOJI_ELEMENT}(?:\x{{200D}}{EMOJI_ELEMENT})*)$"
    );
    Regex::new(&pattern).expect("EMOJI_SEQUENCE is a valid static regex pattern")
});

/// Whether every byte is printable ASCII (`0x20..=0x7E`).
///
/// For such strings the visible width equals the byte length.
#[inline]
#[must_use]
pub fn is_printable_ascii(text: &str) -> bool {
    text.bytes().all(|b| (0x20..=0x7e).contains(&b))
}

/// Cheap pre-filter before the emoji sequence match.
fn could_be_emoji(grapheme: &str) -> bool {
    let Some(first) = grapheme.chars().next() else {
        return false;
    };
    matches!(
        u32::from(first),
        0x1F000..=0x1FBFF | 0x2300..=0x23FF | 0x2600..=0x27BF | 0x2B50..=0x2B55
    ) || grapheme.contains('\u{FE0F}')
        || utf16_len(grapheme) > 2
}

fn utf16_len(text: &str) -> usize {
    text.chars().map(char::len_utf16).sum()
}

/// East-Asian width: 2 for Wide and Fullwidth code points, 1 otherwise.
#[inline]
#[must_use]
pub fn east_asian_width(c: char) -> usize {
    if c.width() == Some(2) { 2 } else { 1 }
}

/// Whether a grapheme is rendered as a two-column emoji.
#[must_use]
pub fn is_emoji_grapheme(grapheme: &str) -> bool {
    could_be_emoji(grapheme) && EMOJI_SEQUENCE.is_match(grapheme)
}

/// Column width of a single grapheme cluster.
#[must_use]
pub fn grapheme_width(grapheme: &str) -> usize {
    if grapheme.is_empty() || ZERO_WIDTH.is_match(grapheme) {
        return 0;
    }
    if is_emoji_grapheme(grapheme) {
        return 2;
    }

    let base = match LEADING_NON_PRINTING.find(grapheme) {
        Some(prefix) => &grapheme[prefix.end()..],
        None => grapheme,
    };
    let Some(base_char) = base.chars().next() else {
        return 0;
    };

    let mut width = east_asian_width(base_char);
    for c in grapheme.chars().skip(1) {
        if ('\u{FF00}'..='\u{FFEF}').contains(&c) {
            width += east_asian_width(c);
        }
    }
    width
}

/// Expand tabs and strip escape sequences, leaving only visible text.
pub(crate) fn normalize(text: &str, tab_width: usize) -> Cow<'_, str> {
    let expanded = if text.contains('\t') {
        Cow::Owned(text.replace('\t', &" ".repeat(tab_width)))
    } else {
        Cow::Borrowed(text)
    };
    match expanded {
        Cow::Borrowed(text) => strip_ansi(text),
        Cow::Owned(text) => Cow::Owned(strip_ansi(&text).into_owned()),
    }
}

/// Measure without the ASCII fast path or any cache.
pub(crate) fn measure(text: &str, tab_width: usize) -> usize {
    normalize(text, tab_width)
        .graphemes(true)
        .map(grapheme_width)
        .sum()
}

/// Visible width using the default tab width, without caching.
///
/// # Example
/// ```
/// use termdelta_text::visible_width_uncached;
///
/// assert_eq!(visible_width_uncached("abc"), 3);
/// assert_eq!(visible_width_uncached("漢字"), 4);
/// assert_eq!(visible_width_uncached("\x1b[31mred\x1b[0m"), 3);
/// ```
#[must_use]
pub fn visible_width_uncached(text: &str) -> usize {
    if is_printable_ascii(text) {
        return text.len();
    }
    measure(text, DEFAULT_TAB_WIDTH)
}
