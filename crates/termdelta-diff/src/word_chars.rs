#![forbid(unsafe_code)]

//! Character classes used by the tokenizers.
//!
//! Word characters are ASCII alphanumerics and underscore plus the Latin-1
//! and Latin Extended letters, the spacing modifier letters that attach to
//! them, and the soft hyphen. Everything else (punctuation, symbols, CJK,
//! emoji) is tokenized one character at a time.
//!
//! Whitespace is the Unicode `White_Space` set with the byte order mark
//! (U+FEFF) added and NEL (U+0085) removed, the same set ECMAScript `\s`
//! matches.

use std::ops::RangeInclusive;

/// Inclusive code point ranges treated as word characters, sorted.
pub const WORD_CHAR_RANGES: &[RangeInclusive<char>] = &[
    '0'..='9',
    'A'..='Z',
    '_'..='_',
    'a'..='z',
    '\u{AD}'..='\u{AD}',
    '\u{C0}'..='\u{D6}',
    '\u{D8}'..='\u{F6}',
    '\u{F8}'..='\u{2C6}',
    '\u{2C8}'..='\u{2D7}',
    '\u{2DE}'..='\u{2FF}',
    '\u{1E00}'..='\u{1EFF}',
];

/// Whether `c` separates words.
#[inline]
#[must_use]
pub fn is_space_char(c: char) -> bool {
    match c {
        '\u{FEFF}' => true,
        '\u{85}' => false,
        _ => c.is_whitespace(),
    }
}

/// Whether `c` belongs to a word run.
#[inline]
#[must_use]
pub fn is_word_char(c: char) -> bool {
    if c.is_ascii() {
        return c.is_ascii_alphanumeric() || c == '_';
    }
    WORD_CHAR_RANGES
        .binary_search_by(|range| {
            if *range.end() < c {
                std::cmp::Ordering::Less
            } else if *range.start() > c {
                std::cmp::Ordering::Greater
            } else {
                std::cmp::Ordering::Equal
            }
        })
        .is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ranges_are_sorted_and_disjoint() {
        for pair in WORD_CHAR_RANGES.windows(2) {
            assert!(pair[0].end() < pair[1].start(), "{pair:?}");
        }
    }

    #[test]
    fn ascii_word_chars() {
        for c in ['a', 'z', 'A', 'Z', '0', '9', '_'] {
            assert!(is_word_char(c), "{c:?}");
        }
        for c in [' ', '-', '.', ',', '\'', '@', '\t', '\n'] {
            assert!(!is_word_char(c), "{c:?}");
        }
    }

    #[test]
    fn space_chars_follow_ecmascript() {
        for c in [' ', '\t', '\n', '\r', '\u{B}', '\u{C}', '\u{A0}', '\u{3000}', '\u{2028}'] {
            assert!(is_space_char(c), "{c:?}");
        }
        assert!(is_space_char('\u{FEFF}'));
        assert!(!is_space_char('\u{85}'));
        assert!(!is_space_char('\u{200B}'));
        assert!(!is_space_char('a'));
    }

    #[test]
    fn range_boundaries() {
        assert!(is_word_char('\u{AD}'));
        assert!(!is_word_char('\u{AC}'));
        assert!(!is_word_char('\u{AE}'));
        assert!(is_word_char('\u{C0}'));
        assert!(is_word_char('\u{D6}'));
        assert!(!is_word_char('\u{D7}'));
        assert!(is_word_char('\u{D8}'));
        assert!(is_word_char('\u{F6}'));
        assert!(!is_word_char('\u{F7}'));
        assert!(is_word_char('\u{F8}'));
        assert!(is_word_char('\u{2C6}'));
        assert!(!is_word_char('\u{2C7}'));
        assert!(is_word_char('\u{2C8}'));
        assert!(is_word_char('\u{2D7}'));
        assert!(!is_word_char('\u{2D8}'));
        assert!(!is_word_char('\u{2DD}'));
        assert!(is_word_char('\u{2DE}'));
        assert!(is_word_char('\u{2FF}'));
        assert!(!is_word_char('\u{300}'));
        assert!(!is_word_char('\u{1DFF}'));
        assert!(is_word_char('\u{1E00}'));
        assert!(is_word_char('\u{1EFF}'));
        assert!(!is_word_char('\u{1F00}'));
    }

    #[test]
    fn non_latin_letters_are_not_word_chars() {
        for c in ['漢', 'я', 'α', '\u{1F600}', '\u{A0}'] {
            assert!(!is_word_char(c), "{c:?}");
        }
    }

    #[test]
    fn latin_letters_are_word_chars() {
        for c in ['é', 'ß', 'ø', 'Ł', 'ſ', 'ẞ', 'ỹ'] {
            assert!(is_word_char(c), "{c:?}");
        }
    }
}
