//! End-to-end tests: diff, color, measure and wrap.

use proptest::prelude::*;
use termdelta::prelude::*;
use termdelta::{DiffError, Granularity, UnicodeWordSegmenter, strip_ansi};

#[test]
fn spacing_change_depends_on_mode() {
    let options = DiffOptions::default();
    let words = diff_words("foo  bar", "foo bar", &options).unwrap();
    assert_eq!(words, vec![Change::new(ChangeKind::Keep, "foo bar", 2)]);

    let with_space = diff_words_with_space("foo  bar", "foo bar", &options);
    assert!(with_space.iter().any(|c| c.is_delete() && c.value == "  "));
    assert!(with_space.iter().any(|c| c.is_insert() && c.value == " "));
}

#[test]
fn unchanged_text_renders_verbatim() {
    let measure = TextMeasure::new();
    let lines =
        diff_for_terminal("foo  bar", "foo bar", &DiffOptions::default(), &measure, 80).unwrap();
    assert_eq!(lines, vec!["foo bar"]);
}

#[test]
fn multi_line_diff_keeps_lines() {
    let measure = TextMeasure::new();
    let lines = diff_for_terminal(
        "alpha beta\ngamma",
        "alpha delta\ngamma",
        &DiffOptions::default(),
        &measure,
        80,
    )
    .unwrap();
    assert_eq!(lines.len(), 2);
    assert_eq!(strip_ansi(&lines[0]), "alpha betadelta");
    assert_eq!(lines[1], "gamma");
}

#[test]
fn color_survives_a_wrap() {
    let measure = TextMeasure::new();
    let changes = diff_words("keep", "keep inserted words", &DiffOptions::default()).unwrap();
    let lines = render_diff(&changes, &measure, 10, DiffStyle::default());
    assert!(lines.len() > 1);
    for line in &lines[1..] {
        assert!(line.starts_with("\x1b[32m"), "{line:?}");
    }

    let mut state = AnsiState::new();
    state.process("\x1b[32m");
    assert_eq!(state.fg_color(), Some("32"));
}

#[test]
fn rejected_segmenter_surfaces_as_facade_error() {
    let measure = TextMeasure::new();
    let options =
        DiffOptions::new().segmenter(UnicodeWordSegmenter::with_granularity(Granularity::Grapheme));
    let err = diff_for_terminal("a", "b", &options, &measure, 80).unwrap_err();
    assert_eq!(
        err,
        Error::Diff(DiffError::InvalidConfiguration {
            granularity: Granularity::Grapheme
        })
    );
    assert_eq!(
        err.to_string(),
        "segmenter must have a granularity of \"word\", got \"grapheme\""
    );
    assert!(std::error::Error::source(&err).is_some());
}

proptest! {
    #[test]
    fn rendered_lines_fit(
        old in "[a-e ]{0,40}",
        new in "[a-e ]{0,40}",
        width in 4usize..24,
    ) {
        let measure = TextMeasure::new();
        let lines = diff_for_terminal(&old, &new, &DiffOptions::default(), &measure, width)
            .unwrap();
        for line in &lines {
            prop_assert!(measure.visible_width(line) <= width, "{:?}", line);
        }
    }
}
