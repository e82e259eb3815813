#![forbid(unsafe_code)]

//! ANSI-aware wrapping and truncation.
//!
//! Escape sequences are carried through untouched and count as zero
//! columns. When a line is broken, the SGR attributes active at the break
//! are re-issued at the start of the continuation line, and underline is
//! closed before the break so it does not run into padding.
//!
//! # Example
//! ```
//! use termdelta_text::TextMeasure;
//!
//! let measure = TextMeasure::new();
//! let lines = measure.wrap_text_with_ansi("\x1b[31mhello world\x1b[0m", 5);
//! assert_eq!(lines, vec!["\x1b[31mhello", "\x1b[31mworld\x1b[0m"]);
//!
//! assert_eq!(measure.truncate_to_width("hello world", 8, "…"), "hello w…");
//! ```

use crate::ansi::{AnsiPiece, AnsiState, ansi_pieces};
use crate::measure::TextMeasure;
use smallvec::{SmallVec, smallvec};
use unicode_segmentation::UnicodeSegmentation;

/// SGR reset emitted before an ellipsis when styled text was cut.
const SGR_RESET: &str = "\x1b[0m";

type Lines = SmallVec<[String; 4]>;

impl TextMeasure {
    /// Wrap `text` to `width` columns, keeping escape sequences intact.
    ///
    /// Input lines (split on `\n`) are wrapped independently, but SGR state
    /// flows from one input line to the next. A `width` of zero disables
    /// wrapping.
    #[must_use]
    pub fn wrap_text_with_ansi(&self, text: &str, width: usize) -> Vec<String> {
        if width == 0 {
            return text.split('\n').map(str::to_owned).collect();
        }

        let mut result = Vec::new();
        let mut state = AnsiState::new();
        for (index, line) in text.split('\n').enumerate() {
            let mut prefixed = String::with_capacity(line.len());
            if index > 0 {
                prefixed.push_str(&state.active_codes());
            }
            prefixed.push_str(line);

            result.extend(self.wrap_single_line(&prefixed, width));
            state.process_text(line);
        }
        result
    }

    /// Cut `text` so that it, plus `ellipsis`, fits in `max_width` columns.
    ///
    /// Text that already fits is returned unchanged. If any SGR sequence was
    /// kept, `ESC[0m` is inserted before the ellipsis.
    #[must_use]
    pub fn truncate_to_width(&self, text: &str, max_width: usize, ellipsis: &str) -> String {
        if self.visible_width(text) <= max_width {
            return text.to_owned();
        }

        let ellipsis_width = self.visible_width(ellipsis);
        let target = max_width.saturating_sub(ellipsis_width);
        if target == 0 {
            return self.take_columns(ellipsis, max_width);
        }

        let mut out = String::with_capacity(text.len().min(max_width * 4) + ellipsis.len());
        let mut width = 0;
        let mut saw_sgr = false;

        'pieces: for piece in ansi_pieces(text) {
            match piece {
                AnsiPiece::Code(code) => {
                    out.push_str(code.code);
                    saw_sgr |= code.is_sgr();
                }
                AnsiPiece::Text(run) => {
                    for grapheme in run.graphemes(true) {
                        let columns = self.grapheme_columns(grapheme);
                        if width + columns > target {
                            break 'pieces;
                        }
                        out.push_str(grapheme);
                        width += columns;
                    }
                }
            }
        }

        if saw_sgr {
            out.push_str(SGR_RESET);
        }
        out.push_str(ellipsis);
        out
    }

    /// Leading graphemes of plain `text` that fit in `max_width` columns.
    fn take_columns(&self, text: &str, max_width: usize) -> String {
        let mut out = String::new();
        let mut width = 0;
        for grapheme in text.graphemes(true) {
            let columns = self.grapheme_columns(grapheme);
            if width + columns > max_width {
                break;
            }
            out.push_str(grapheme);
            width += columns;
        }
        out
    }

    fn wrap_single_line(&self, line: &str, width: usize) -> Lines {
        if line.is_empty() {
            return smallvec![String::new()];
        }
        if self.visible_width(line) <= width {
            return smallvec![line.to_owned()];
        }

        let mut wrapped = Lines::new();
        let mut current_line = String::new();
        let mut current_width = 0;
        let mut state = AnsiState::new();

        for token in split_tokens_with_ansi(line) {
            let token_width = self.visible_width(&token);
            let is_whitespace = token_is_whitespace(&token);

            if token_width > width && !is_whitespace {
                // A line holding only escape codes has nothing to show; its
                // codes lead the first piece of the broken word instead.
                let prefix = if current_width > 0 {
                    current_line.push_str(state.line_end_reset());
                    wrapped.push(std::mem::take(&mut current_line));
                    state.active_codes()
                } else {
                    std::mem::take(&mut current_line)
                };
                let mut broken = self.break_long_word(&token, width, &mut state, prefix);
                if let Some(last) = broken.pop() {
                    wrapped.extend(broken);
                    current_width = self.visible_width(&last);
                    current_line = last;
                } else {
                    current_width = 0;
                }
                continue;
            }

            if current_width + token_width > width && current_width > 0 {
                let mut finished = std::mem::take(&mut current_line);
                trim_end_spaces(&mut finished);
                finished.push_str(state.line_end_reset());
                wrapped.push(finished);

                if is_whitespace {
                    state.process_text(&token);
                    current_line.push_str(&state.active_codes());
                    current_width = 0;
                    continue;
                }
                current_line.push_str(&state.active_codes());
                current_line.push_str(&token);
                current_width = token_width;
            } else {
                current_line.push_str(&token);
                current_width += token_width;
            }

            state.process_text(&token);
        }

        if !current_line.is_empty() {
            wrapped.push(current_line);
        }
        for line in &mut wrapped {
            trim_end_spaces(line);
        }
        if wrapped.is_empty() {
            wrapped.push(String::new());
        }
        wrapped
    }

    /// Break a word wider than `width` on grapheme boundaries.
    ///
    /// A single grapheme wider than `width` gets a line of its own. The
    /// first piece starts with `prefix`.
    fn break_long_word(
        &self,
        word: &str,
        width: usize,
        state: &mut AnsiState,
        prefix: String,
    ) -> Lines {
        let mut lines = Lines::new();
        let mut current_line = prefix;
        let mut current_width = 0;

        for piece in ansi_pieces(word) {
            match piece {
                AnsiPiece::Code(code) => {
                    current_line.push_str(code.code);
                    if code.is_sgr() {
                        state.process(code.code);
                    }
                }
                AnsiPiece::Text(run) => {
                    for grapheme in run.graphemes(true) {
                        let columns = self.grapheme_columns(grapheme);
                        if current_width + columns > width && current_width > 0 {
                            current_line.push_str(state.line_end_reset());
                            lines.push(std::mem::take(&mut current_line));
                            current_line.push_str(&state.active_codes());
                            current_width = 0;
                        }
                        current_line.push_str(grapheme);
                        current_width += columns;
                    }
                }
            }
        }

        if !current_line.is_empty() {
            lines.push(current_line);
        }
        lines
    }
}

/// Split a line into alternating word and space tokens.
///
/// Escape sequences attach to the text that follows them; trailing ones
/// attach to the last token.
fn split_tokens_with_ansi(line: &str) -> SmallVec<[String; 8]> {
    let mut tokens = SmallVec::new();
    let mut current = String::new();
    let mut pending = String::new();
    let mut in_whitespace = false;

    for piece in ansi_pieces(line) {
        match piece {
            AnsiPiece::Code(code) => pending.push_str(code.code),
            AnsiPiece::Text(run) => {
                for ch in run.chars() {
                    let is_space = ch == ' ';
                    if is_space != in_whitespace && !current.is_empty() {
                        tokens.push(std::mem::take(&mut current));
                    }
                    if !pending.is_empty() {
                        current.push_str(&pending);
                        pending.clear();
                    }
                    in_whitespace = is_space;
                    current.push(ch);
                }
            }
        }
    }

    current.push_str(&pending);
    if !current.is_empty() {
        tokens.push(current);
    }
    tokens
}

/// Whether every visible character of `token` is a space.
fn token_is_whitespace(token: &str) -> bool {
    ansi_pieces(token).all(|piece| match piece {
        AnsiPiece::Code(_) => true,
        AnsiPiece::Text(run) => run.bytes().all(|b| b == b' '),
    })
}

fn trim_end_spaces(line: &mut String) {
    let kept = line.trim_end_matches(' ').len();
    line.truncate(kept);
}
