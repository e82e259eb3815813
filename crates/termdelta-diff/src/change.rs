#![forbid(unsafe_code)]

//! Diff result types.

use std::fmt;

/// What a [`Change`] does to the text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChangeKind {
    /// Present in both inputs.
    Keep,
    /// Only in the new input.
    Insert,
    /// Only in the old input.
    Delete,
}

impl ChangeKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Keep => "keep",
            Self::Insert => "insert",
            Self::Delete => "delete",
        }
    }
}

/// One run of same-kind tokens in an edit script.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Change {
    /// Text covered by the run.
    pub value: String,
    pub kind: ChangeKind,
    /// Number of tokens in the run.
    pub count: usize,
}

impl Change {
    #[must_use]
    pub fn new(kind: ChangeKind, value: impl Into<String>, count: usize) -> Self {
        Self {
            value: value.into(),
            kind,
            count,
        }
    }

    #[must_use]
    pub fn is_keep(&self) -> bool {
        self.kind == ChangeKind::Keep
    }

    #[must_use]
    pub fn is_insert(&self) -> bool {
        self.kind == ChangeKind::Insert
    }

    #[must_use]
    pub fn is_delete(&self) -> bool {
        self.kind == ChangeKind::Delete
    }
}

impl fmt::Display for Change {
    /// Unified-diff style: `+` insert, `-` delete, space keep.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let marker = match self.kind {
            ChangeKind::Keep => ' ',
            ChangeKind::Insert => '+',
            ChangeKind::Delete => '-',
        };
        write!(f, "{marker}{:?}", self.value)
    }
}

/// Concatenation of the Keep and Delete values.
#[must_use]
pub fn old_text(changes: &[Change]) -> String {
    changes
        .iter()
        .filter(|change| !change.is_insert())
        .map(|change| change.value.as_str())
        .collect()
}

/// Concatenation of the Keep and Insert values.
#[must_use]
pub fn new_text(changes: &[Change]) -> String {
    changes
        .iter()
        .filter(|change| !change.is_delete())
        .map(|change| change.value.as_str())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vec<Change> {
        vec![
            Change::new(ChangeKind::Keep, "foo ", 1),
            Change::new(ChangeKind::Delete, "bar", 1),
            Change::new(ChangeKind::Insert, "baz", 1),
        ]
    }

    #[test]
    fn reconstructs_both_sides() {
        let changes = sample();
        assert_eq!(old_text(&changes), "foo bar");
        assert_eq!(new_text(&changes), "foo baz");
    }

    #[test]
    fn kind_predicates() {
        let changes = sample();
        assert!(changes[0].is_keep());
        assert!(changes[1].is_delete());
        assert!(changes[2].is_insert());
        assert_eq!(changes[2].kind.as_str(), "insert");
    }

    #[test]
    fn display_marks_kind() {
        let rendered: Vec<String> = sample().iter().map(ToString::to_string).collect();
        assert_eq!(rendered, vec![r#" "foo ""#, r#"-"bar""#, r#"+"baz""#]);
    }
}
