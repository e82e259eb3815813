#![forbid(unsafe_code)]

//! Whitespace cleanup for word-aware diffs.
//!
//! Word-aware tokens carry the whitespace around them on both sides, so the
//! raw edit script repeats every whitespace run that sits on a change
//! boundary. This pass moves each run to exactly one change, preferring to
//! leave whitespace shared by both sides in a Keep.

use crate::change::{Change, ChangeKind};
use crate::word_chars::is_space_char;

fn leading_ws(text: &str) -> &str {
    &text[..text.len() - text.trim_start_matches(is_space_char).len()]
}

fn trailing_ws(text: &str) -> &str {
    &text[text.trim_end_matches(is_space_char).len()..]
}

/// Longest common prefix, as a slice of `a`.
fn common_prefix<'a>(a: &'a str, b: &str) -> &'a str {
    let len = a
        .char_indices()
        .zip(b.chars())
        .find(|((_, ca), cb)| ca != cb)
        .map_or_else(|| a.len().min(b.len()), |((i, _), _)| i);
    &a[..len]
}

/// Longest common suffix, as a slice of `a`.
fn common_suffix<'a>(a: &'a str, b: &str) -> &'a str {
    let shared: usize = a
        .chars()
        .rev()
        .zip(b.chars().rev())
        .take_while(|(ca, cb)| ca == cb)
        .map(|(c, _)| c.len_utf8())
        .sum();
    &a[a.len() - shared..]
}

/// Longest suffix of `a` that is also a prefix of `b`.
fn maximum_overlap<'a>(a: &str, b: &'a str) -> &'a str {
    let longest = a.len().min(b.len());
    (1..=longest)
        .rev()
        .filter(|&len| b.is_char_boundary(len) && a.is_char_boundary(a.len() - len))
        .find(|&len| a[a.len() - len..] == b[..len])
        .map_or("", |len| &b[..len])
}

/// Swap prefix `old` of `text` for `new`. `text` is left alone if it does
/// not start with `old`.
fn replace_prefix(text: &mut String, old: &str, new: &str) {
    if let Some(rest) = text.strip_prefix(old) {
        *text = format!("{new}{rest}");
    }
}

/// Swap suffix `old` of `text` for `new`. An empty `old` appends `new`.
fn replace_suffix(text: &mut String, old: &str, new: &str) {
    if let Some(rest) = text.strip_suffix(old) {
        let kept = rest.len();
        text.truncate(kept);
        text.push_str(new);
    }
}

fn remove_prefix(text: &mut String, prefix: &str) {
    if text.starts_with(prefix) {
        text.drain(..prefix.len());
    }
}

fn remove_suffix(text: &mut String, suffix: &str) {
    if text.ends_with(suffix) {
        let kept = text.len() - suffix.len();
        text.truncate(kept);
    }
}

/// The changes around one edited region: the Keep before it, its Delete
/// and Insert, and the Keep after it.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub(crate) struct Boundary {
    pub start_keep: Option<String>,
    pub deletion: Option<String>,
    pub insertion: Option<String>,
    pub end_keep: Option<String>,
}

impl Boundary {
    /// Give each whitespace run on this boundary to exactly one change.
    pub(crate) fn dedupe(&mut self) {
        match (self.deletion.as_mut(), self.insertion.as_mut()) {
            (Some(deletion), Some(insertion)) => {
                Self::dedupe_replacement(
                    deletion,
                    insertion,
                    self.start_keep.as_mut(),
                    self.end_keep.as_mut(),
                );
            }
            (None, Some(insertion)) => {
                if self.start_keep.is_some() {
                    let ws_len = leading_ws(insertion).len();
                    insertion.drain(..ws_len);
                }
                if let Some(end_keep) = self.end_keep.as_mut() {
                    let ws_len = leading_ws(end_keep).len();
                    end_keep.drain(..ws_len);
                }
            }
            (Some(deletion), None) => {
                Self::dedupe_deletion(deletion, self.start_keep.as_mut(), self.end_keep.as_mut());
            }
            (None, None) => {}
        }
    }

    fn dedupe_replacement(
        deletion: &mut String,
        insertion: &mut String,
        start_keep: Option<&mut String>,
        end_keep: Option<&mut String>,
    ) {
        let old_ws_suffix = trailing_ws(deletion).to_owned();
        let new_ws_suffix = trailing_ws(insertion).to_owned();

        if let Some(start_keep) = start_keep {
            let old_ws_prefix = leading_ws(deletion);
            let new_ws_prefix = leading_ws(insertion);
            let common = common_prefix(old_ws_prefix, new_ws_prefix).to_owned();
            let new_ws_prefix = new_ws_prefix.to_owned();
            replace_suffix(start_keep, &new_ws_prefix, &common);
            remove_prefix(deletion, &common);
            remove_prefix(insertion, &common);
        }
        if let Some(end_keep) = end_keep {
            let common = common_suffix(&old_ws_suffix, &new_ws_suffix).to_owned();
            replace_prefix(end_keep, &new_ws_suffix, &common);
            remove_suffix(deletion, &common);
            remove_suffix(insertion, &common);
        }
    }

    fn dedupe_deletion(
        deletion: &mut String,
        start_keep: Option<&mut String>,
        end_keep: Option<&mut String>,
    ) {
        match (start_keep, end_keep) {
            (Some(start_keep), Some(end_keep)) => {
                // Whitespace between the keeps in the new text, split into
                // the part the deletion starts with and the part it ends with.
                let new_ws_full = leading_ws(end_keep).to_owned();
                let new_ws_start = common_prefix(&new_ws_full, leading_ws(deletion)).to_owned();
                remove_prefix(deletion, &new_ws_start);

                let remaining = &new_ws_full[new_ws_start.len()..];
                let new_ws_end = common_suffix(remaining, trailing_ws(deletion)).to_owned();
                remove_suffix(deletion, &new_ws_end);

                replace_prefix(end_keep, &new_ws_full, &new_ws_end);
                let start_ws = &new_ws_full[..new_ws_full.len() - new_ws_end.len()];
                replace_suffix(start_keep, &new_ws_full, start_ws);
            }
            (None, Some(end_keep)) => {
                let overlap = maximum_overlap(trailing_ws(deletion), leading_ws(end_keep)).len();
                let kept = deletion.len() - overlap;
                deletion.truncate(kept);
            }
            (Some(start_keep), None) => {
                let overlap = maximum_overlap(trailing_ws(start_keep), leading_ws(deletion)).len();
                deletion.drain(..overlap);
            }
            (None, None) => {}
        }
    }
}

/// Apply [`Boundary::dedupe`] at every edited region of a coalesced script.
pub(crate) fn dedupe_changes(changes: &mut [Change]) {
    let mut last_keep: Option<usize> = None;
    let mut deletion: Option<usize> = None;
    let mut insertion: Option<usize> = None;

    for index in 0..changes.len() {
        match changes[index].kind {
            ChangeKind::Insert => insertion = Some(index),
            ChangeKind::Delete => deletion = Some(index),
            ChangeKind::Keep => {
                if insertion.is_some() || deletion.is_some() {
                    dedupe_at(changes, last_keep, deletion, insertion, Some(index));
                }
                last_keep = Some(index);
                insertion = None;
                deletion = None;
            }
        }
    }
    if insertion.is_some() || deletion.is_some() {
        dedupe_at(changes, last_keep, deletion, insertion, None);
    }
}

fn dedupe_at(
    changes: &mut [Change],
    start_keep: Option<usize>,
    deletion: Option<usize>,
    insertion: Option<usize>,
    end_keep: Option<usize>,
) {
    let mut take = |index: Option<usize>| index.map(|i| std::mem::take(&mut changes[i].value));
    let mut boundary = Boundary {
        start_keep: take(start_keep),
        deletion: take(deletion),
        insertion: take(insertion),
        end_keep: take(end_keep),
    };
    boundary.dedupe();

    let slots = [
        (start_keep, boundary.start_keep),
        (deletion, boundary.deletion),
        (insertion, boundary.insertion),
        (end_keep, boundary.end_keep),
    ];
    for (index, value) in slots {
        if let (Some(i), Some(value)) = (index, value) {
            changes[i].value = value;
        }
    }
}
