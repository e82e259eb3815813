#![forbid(unsafe_code)]

//! Tokenizers for the two diff modes.
//!
//! Tokens are slices of the input. In word-aware mode a whitespace run
//! between two words belongs to both neighbours (trailing on the first,
//! leading on the second), so tokens may overlap; [`join_words`] undoes the
//! duplication.

use crate::segmenter::WordSegmenter;
use crate::word_chars::{is_space_char, is_word_char};
use std::ops::Range;

/// Split `text` for word-aware diffing.
///
/// With a segmenter, its segments replace the built-in word splitting.
/// Segments that do not tile `text` fall back to the built-in splitter.
pub(crate) fn tokenize_words<'a>(
    text: &'a str,
    segmenter: Option<&dyn WordSegmenter>,
) -> Vec<&'a str> {
    let parts = match segmenter {
        Some(segmenter) => segment_parts(text, segmenter).unwrap_or_else(|| {
            #[cfg(feature = "tracing")]
            tracing::warn!(
                segmenter = ?segmenter,
                "segmenter output does not cover the input; using built-in word splitting"
            );
            word_parts(text)
        }),
        None => word_parts(text),
    };
    attach_whitespace(text, &parts)
        .into_iter()
        .map(|span| &text[span])
        .collect()
}

/// Split `text` for whitespace-significant diffing.
///
/// Tokens are line breaks (`\n` or `\r\n`), word runs, runs of other
/// whitespace, or single characters. Concatenating them gives back `text`.
pub(crate) fn tokenize_with_space(text: &str) -> Vec<&str> {
    let mut tokens = Vec::new();
    let mut rest = text;
    while let Some(c) = rest.chars().next() {
        let len = if rest.starts_with("\r\n") {
            2
        } else if c == '\n' {
            1
        } else if is_word_char(c) {
            run_len(rest, is_word_char)
        } else if is_space_char(c) && c != '\r' {
            run_len(rest, |c| is_space_char(c) && c != '\n' && c != '\r')
        } else {
            c.len_utf8()
        };
        let (token, tail) = rest.split_at(len);
        tokens.push(token);
        rest = tail;
    }
    tokens
}

/// Concatenate word-aware tokens, dropping the duplicated whitespace.
pub(crate) fn join_words<S: AsRef<str>>(tokens: &[S]) -> String {
    let mut out = String::new();
    for (index, token) in tokens.iter().enumerate() {
        let token = token.as_ref();
        if index == 0 {
            out.push_str(token);
        } else {
            out.push_str(token.trim_start_matches(is_space_char));
        }
    }
    out
}

/// Byte length of the leading run of characters matching `pred`.
fn run_len(text: &str, pred: impl Fn(char) -> bool) -> usize {
    text.find(|c: char| !pred(c)).unwrap_or(text.len())
}

fn has_whitespace(text: &str) -> bool {
    text.contains(is_space_char)
}

/// Word runs, whitespace runs, and single other characters.
fn word_parts(text: &str) -> Vec<Range<usize>> {
    let mut parts = Vec::new();
    let mut start = 0;
    while let Some(c) = text[start..].chars().next() {
        let rest = &text[start..];
        let len = if is_word_char(c) {
            run_len(rest, is_word_char)
        } else if is_space_char(c) {
            run_len(rest, is_space_char)
        } else {
            c.len_utf8()
        };
        parts.push(start..start + len);
        start += len;
    }
    parts
}

/// Segmenter output as spans, merging consecutive segments that contain
/// whitespace. `None` if the segments do not tile `text`.
fn segment_parts(text: &str, segmenter: &dyn WordSegmenter) -> Option<Vec<Range<usize>>> {
    let mut parts: Vec<Range<usize>> = Vec::new();
    let mut offset = 0;
    for segment in segmenter.segment(text) {
        if segment.is_empty() {
            continue;
        }
        if !text[offset..].starts_with(segment) {
            return None;
        }
        let span = offset..offset + segment.len();
        offset = span.end;

        match parts.last_mut() {
            Some(last) if has_whitespace(&text[last.clone()]) && has_whitespace(segment) => {
                last.end = span.end;
            }
            _ => parts.push(span),
        }
    }
    (offset == text.len()).then_some(parts)
}

/// Attach each whitespace part to the token before it and the token after it.
fn attach_whitespace(text: &str, parts: &[Range<usize>]) -> Vec<Range<usize>> {
    let mut tokens: Vec<Range<usize>> = Vec::new();
    let mut prev: Option<&Range<usize>> = None;

    for part in parts {
        if has_whitespace(&text[part.clone()]) {
            match tokens.last_mut() {
                Some(last) => last.end = part.end,
                None => tokens.push(part.clone()),
            }
        } else if let Some(ws) = prev.filter(|p| has_whitespace(&text[(*p).clone()])) {
            match tokens.last_mut() {
                // Leading whitespace emitted on its own: fold it into this token.
                Some(last) if last == ws => last.end = part.end,
                _ => tokens.push(ws.start..part.end),
            }
        } else {
            tokens.push(part.clone());
        }
        prev = Some(part);
    }
    tokens
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::segmenter::{Granularity, UnicodeWordSegmenter};

    fn words(text: &str) -> Vec<&str> {
        tokenize_words(text, None)
    }

    #[test]
    fn empty_input_has_no_tokens() {
        assert!(words("").is_empty());
        assert!(tokenize_with_space("").is_empty());
    }

    #[test]
    fn whitespace_is_shared_between_neighbours() {
        assert_eq!(words("foo bar"), vec!["foo ", " bar"]);
        assert_eq!(words("foo  bar baz"), vec!["foo  ", "  bar ", " baz"]);
    }

    #[test]
    fn leading_and_trailing_whitespace() {
        assert_eq!(words("  foo"), vec!["  foo"]);
        assert_eq!(words("foo  "), vec!["foo  "]);
        assert_eq!(words(" a b "), vec![" a ", " b "]);
        assert_eq!(words("   "), vec!["   "]);
    }

    #[test]
    fn punctuation_is_split_per_character() {
        assert_eq!(words("a,b"), vec!["a", ",", "b"]);
        assert_eq!(words("hi!!"), vec!["hi", "!", "!"]);
        assert_eq!(words("x - y"), vec!["x ", " - ", " y"]);
    }

    #[test]
    fn extended_latin_stays_in_words() {
        assert_eq!(words("café naïve"), vec!["café ", " naïve"]);
        assert_eq!(words("漢字"), vec!["漢", "字"]);
    }

    #[test]
    fn newlines_are_whitespace_in_word_mode() {
        assert_eq!(words("a\nb"), vec!["a\n", "\nb"]);
        assert_eq!(words("a \t\n b"), vec!["a \t\n ", " \t\n b"]);
    }

    #[test]
    fn byte_order_mark_separates_but_nel_does_not() {
        assert_eq!(words("a\u{FEFF}b"), vec!["a\u{FEFF}", "\u{FEFF}b"]);
        assert_eq!(words("a\u{85}b"), vec!["a", "\u{85}", "b"]);
        assert_eq!(tokenize_with_space("a\u{FEFF}b"), vec!["a", "\u{FEFF}", "b"]);
    }

    #[test]
    fn join_removes_duplicated_whitespace() {
        for text in ["foo bar", " a b ", "a \n\tb  c", "x - y", "", "   "] {
            assert_eq!(join_words(&words(text)), text, "{text:?}");
        }
    }

    #[test]
    fn with_space_tokens() {
        assert_eq!(tokenize_with_space("foo  bar"), vec!["foo", "  ", "bar"]);
        assert_eq!(
            tokenize_with_space("a\r\nb\nc"),
            vec!["a", "\r\n", "b", "\n", "c"]
        );
        assert_eq!(tokenize_with_space("a \t\nb"), vec!["a", " \t", "\n", "b"]);
        assert_eq!(tokenize_with_space("a\rb"), vec!["a", "\r", "b"]);
        assert_eq!(tokenize_with_space("x,y"), vec!["x", ",", "y"]);
    }

    #[test]
    fn segmenter_parts_follow_word_bounds() {
        let segmenter = UnicodeWordSegmenter::new();
        assert_eq!(
            tokenize_words("can't stop", Some(&segmenter)),
            vec!["can't ", " stop"]
        );
        // The built-in splitter breaks at the apostrophe.
        assert_eq!(words("can't stop"), vec!["can", "'", "t ", " stop"]);
    }

    #[test]
    fn segmenter_whitespace_segments_merge() {
        let segmenter = UnicodeWordSegmenter::new();
        assert_eq!(
            tokenize_words("a \n b", Some(&segmenter)),
            vec!["a \n ", " \n b"]
        );
    }

    #[derive(Debug)]
    struct Scrambled;

    impl WordSegmenter for Scrambled {
        fn granularity(&self) -> Granularity {
            Granularity::Word
        }

        fn segment<'a>(&self, text: &'a str) -> Vec<&'a str> {
            text.rsplit(' ').collect()
        }
    }

    #[test]
    fn non_tiling_segmenter_falls_back() {
        assert_eq!(
            tokenize_words("one two", Some(&Scrambled)),
            words("one two")
        );
    }
}
