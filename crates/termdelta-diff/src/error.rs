#![forbid(unsafe_code)]

use crate::segmenter::Granularity;

/// Errors returned by the diff entry points.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiffError {
    /// The configured segmenter does not split on words.
    InvalidConfiguration { granularity: Granularity },
}

impl std::fmt::Display for DiffError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidConfiguration { granularity } => write!(
                f,
                "segmenter must have a granularity of \"word\", got \"{}\"",
                granularity
            ),
        }
    }
}

impl std::error::Error for DiffError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_names_granularity() {
        let err = DiffError::InvalidConfiguration {
            granularity: Granularity::Sentence,
        };
        assert_eq!(
            err.to_string(),
            "segmenter must have a granularity of \"word\", got \"sentence\""
        );
    }
}
