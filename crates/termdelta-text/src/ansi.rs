#![forbid(unsafe_code)]

//! ANSI escape sequence parsing and SGR state tracking.
//!
//! Three sequence grammars are recognized after an `ESC` byte:
//! - `ESC [` (CSI), terminated by the first of `m`, `G`, `K`, `H`, `J`
//! - `ESC ]` (OSC, e.g. OSC 8 hyperlinks), terminated by BEL or `ESC \`
//! - `ESC _` (APC), terminated by BEL or `ESC \`
//!
//! [`AnsiState`] follows SGR (`ESC [ ... m`) codes so that styling can be
//! re-issued after a forced line wrap.
//!
//! # Example
//! ```
//! use termdelta_text::ansi::{AnsiState, extract_ansi_code};
//!
//! let text = "\x1b[1;31mwarning\x1b[0m";
//! let code = extract_ansi_code(text, 0).unwrap();
//! assert_eq!(code.code, "\x1b[1;31m");
//!
//! let mut state = AnsiState::new();
//! state.process(code.code);
//! assert!(state.bold());
//! assert_eq!(state.active_codes(), "\x1b[1;31m");
//! ```

use regex::Regex;
use smallvec::SmallVec;
use std::borrow::Cow;
use std::sync::LazyLock;

/// The escape byte.
pub const ESC: u8 = 0x1b;
const BEL: u8 = 0x07;

/// Underline-off sequence emitted at line ends.
const UNDERLINE_OFF: &str = "\x1b[24m";

static CSI_STRIP: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\x1b\[[0-9;]*[mGKHJ]").expect("CSI_STRIP is a valid static regex pattern")
});

static OSC8_STRIP: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\x1b\]8;;[^\x07]*\x07").expect("OSC8_STRIP is a valid static regex pattern")
});

static APC_STRIP: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\x1b_[^\x07\x1b]*(?:\x07|\x1b\\)")
        .expect("APC_STRIP is a valid static regex pattern")
});

static SGR_PARAMS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\x1b\[([0-9;]*)m").expect("SGR_PARAMS is a valid static regex pattern")
});

/// Which grammar an escape sequence was parsed with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnsiCodeKind {
    /// `ESC [` control sequence.
    Csi,
    /// `ESC ]` operating system command.
    Osc,
    /// `ESC _` application program command.
    Apc,
}

/// A complete escape sequence found in a string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnsiCode<'a> {
    /// The raw sequence text, including the leading `ESC`.
    pub code: &'a str,
    /// Length of `code` in bytes.
    pub length: usize,
    /// Grammar the sequence matched.
    pub kind: AnsiCodeKind,
}

impl AnsiCode<'_> {
    /// Whether this is an SGR (`ESC [ ... m`) sequence.
    #[must_use]
    pub fn is_sgr(&self) -> bool {
        self.kind == AnsiCodeKind::Csi && self.code.ends_with('m')
    }
}

/// Extract the escape sequence starting at byte offset `pos`.
///
/// Returns `None` when `text[pos]` is not `ESC`, when the introducer is not
/// one of `[`, `]`, `_`, or when the sequence is unterminated. Callers decide
/// whether an unterminated tail is literal text or needs more input.
#[must_use]
pub fn extract_ansi_code(text: &str, pos: usize) -> Option<AnsiCode<'_>> {
    let bytes = text.as_bytes();
    if bytes.get(pos) != Some(&ESC) {
        return None;
    }
    let kind = match *bytes.get(pos + 1)? {
        b'[' => AnsiCodeKind::Csi,
        b']' => AnsiCodeKind::Osc,
        b'_' => AnsiCodeKind::Apc,
        _ => return None,
    };
    let body = pos + 2;
    let end = match kind {
        AnsiCodeKind::Csi => {
            let offset = bytes[body..]
                .iter()
                .position(|&b| matches!(b, b'm' | b'G' | b'K' | b'H' | b'J'))?;
            body + offset + 1
        }
        AnsiCodeKind::Osc | AnsiCodeKind::Apc => find_string_terminator(bytes, body)?,
    };
    Some(AnsiCode {
        code: &text[pos..end],
        length: end - pos,
        kind,
    })
}

/// End offset (exclusive) of the first BEL or `ESC \` at or after `from`.
fn find_string_terminator(bytes: &[u8], from: usize) -> Option<usize> {
    let mut j = from;
    while j < bytes.len() {
        match bytes[j] {
            BEL => return Some(j + 1),
            ESC if bytes.get(j + 1) == Some(&b'\\') => return Some(j + 2),
            _ => {}
        }
        j += 1;
    }
    None
}

/// Remove the escape sequences that contribute no visible width.
///
/// Strips numeric CSI sequences ending in `mGKHJ`, OSC 8 hyperlinks ended by
/// BEL, and APC sequences. Anything else is left in place.
#[must_use]
pub fn strip_ansi(text: &str) -> Cow<'_, str> {
    if !text.as_bytes().contains(&ESC) {
        return Cow::Borrowed(text);
    }
    let stripped = CSI_STRIP.replace_all(text, "");
    let stripped = OSC8_STRIP.replace_all(&stripped, "").into_owned();
    let stripped = APC_STRIP.replace_all(&stripped, "").into_owned();
    Cow::Owned(stripped)
}

/// A piece of a string: either plain text or one escape sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnsiPiece<'a> {
    /// Text between escape sequences. May contain stray `ESC` bytes that do
    /// not start a recognized sequence.
    Text(&'a str),
    /// A recognized escape sequence.
    Code(AnsiCode<'a>),
}

/// Iterator splitting a string into [`AnsiPiece`]s.
#[derive(Debug, Clone)]
pub struct AnsiPieces<'a> {
    text: &'a str,
    pos: usize,
}

/// Split `text` into plain runs and escape sequences, in order.
#[must_use]
pub fn ansi_pieces(text: &str) -> AnsiPieces<'_> {
    AnsiPieces { text, pos: 0 }
}

impl<'a> Iterator for AnsiPieces<'a> {
    type Item = AnsiPiece<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.pos >= self.text.len() {
            return None;
        }
        if let Some(code) = extract_ansi_code(self.text, self.pos) {
            self.pos += code.length;
            return Some(AnsiPiece::Code(code));
        }

        let bytes = self.text.as_bytes();
        let start = self.pos;
        let mut scan = start + 1;
        self.pos = loop {
            match bytes[scan..].iter().position(|&b| b == ESC) {
                Some(offset) => {
                    let at = scan + offset;
                    if extract_ansi_code(self.text, at).is_some() {
                        break at;
                    }
                    scan = at + 1;
                }
                None => break self.text.len(),
            }
        };
        Some(AnsiPiece::Text(&self.text[start..self.pos]))
    }
}

/// Active SGR attributes for one rendering context.
///
/// Colors are kept as their raw parameter text (`"31"`, `"38;5;208"`,
/// `"48;2;10;20;30"`) so they can be re-emitted verbatim.
///
/// One instance per terminal pane or output stream; it is not meant to be
/// shared between concurrent renderers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnsiState {
    bold: bool,
    dim: bool,
    italic: bool,
    underline: bool,
    fg_color: Option<String>,
    bg_color: Option<String>,
}

impl AnsiState {
    /// Create a tracker with every attribute inactive.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one escape sequence.
    ///
    /// Anything that is not an SGR sequence is ignored, as are unknown or
    /// non-numeric parameters inside one.
    pub fn process(&mut self, code: &str) {
        if !code.ends_with('m') {
            return;
        }
        let Some(params) = SGR_PARAMS.captures(code).and_then(|caps| caps.get(1)) else {
            return;
        };
        let params = params.as_str();
        if params.is_empty() || params == "0" {
            self.reset();
            return;
        }

        let parts: SmallVec<[&str; 8]> = params.split(';').collect();
        let mut i = 0;
        while i < parts.len() {
            let code = parts[i].parse::<u32>().ok();

            if let Some(selector @ (38 | 48)) = code {
                if let Some(consumed) = extended_color_len(&parts[i..]) {
                    let color = parts[i..i + consumed].join(";");
                    if selector == 38 {
                        self.fg_color = Some(color);
                    } else {
                        self.bg_color = Some(color);
                    }
                    i += consumed;
                    continue;
                }
            }

            match code {
                Some(0) => self.reset(),
                Some(1) => self.bold = true,
                Some(2) => self.dim = true,
                Some(3) => self.italic = true,
                Some(4) => self.underline = true,
                Some(22) => {
                    self.bold = false;
                    self.dim = false;
                }
                Some(23) => self.italic = false,
                Some(24) => self.underline = false,
                Some(39) => self.fg_color = None,
                Some(49) => self.bg_color = None,
                Some(c @ (30..=37 | 90..=97)) => self.fg_color = Some(c.to_string()),
                Some(c @ (40..=47 | 100..=107)) => self.bg_color = Some(c.to_string()),
                _ => {}
            }
            i += 1;
        }
    }

    /// Feed every SGR sequence found in `text`, skipping everything else.
    pub fn process_text(&mut self, text: &str) {
        for piece in ansi_pieces(text) {
            if let AnsiPiece::Code(code) = piece {
                if code.is_sgr() {
                    self.process(code.code);
                }
            }
        }
    }

    /// Return every attribute to its default. Called when an SGR reset is
    /// processed.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Return every attribute to its default. Called when the rendering
    /// context is torn down.
    pub fn clear(&mut self) {
        self.reset();
    }

    /// A single SGR sequence re-establishing the active attributes, in the
    /// order bold, dim, italic, underline, foreground, background. Empty when
    /// nothing is active.
    #[must_use]
    pub fn active_codes(&self) -> String {
        let mut codes: SmallVec<[&str; 6]> = SmallVec::new();
        if self.bold {
            codes.push("1");
        }
        if self.dim {
            codes.push("2");
        }
        if self.italic {
            codes.push("3");
        }
        if self.underline {
            codes.push("4");
        }
        if let Some(fg) = &self.fg_color {
            codes.push(fg.as_str());
        }
        if let Some(bg) = &self.bg_color {
            codes.push(bg.as_str());
        }
        if codes.is_empty() {
            String::new()
        } else {
            format!("\x1b[{}m", codes.join(";"))
        }
    }

    /// Sequence to emit before trailing padding so underline does not bleed
    /// into it. Empty unless underline is active.
    #[must_use]
    pub fn line_end_reset(&self) -> &'static str {
        if self.underline { UNDERLINE_OFF } else { "" }
    }

    /// Whether no attribute is active.
    #[must_use]
    pub fn is_default(&self) -> bool {
        *self == Self::default()
    }

    #[must_use]
    pub fn bold(&self) -> bool {
        self.bold
    }

    #[must_use]
    pub fn dim(&self) -> bool {
        self.dim
    }

    #[must_use]
    pub fn italic(&self) -> bool {
        self.italic
    }

    #[must_use]
    pub fn underline(&self) -> bool {
        self.underline
    }

    /// Raw foreground parameters, e.g. `"31"` or `"38;2;255;0;0"`.
    #[must_use]
    pub fn fg_color(&self) -> Option<&str> {
        self.fg_color.as_deref()
    }

    /// Raw background parameters, e.g. `"44"` or `"48;5;17"`.
    #[must_use]
    pub fn bg_color(&self) -> Option<&str> {
        self.bg_color.as_deref()
    }
}

/// Number of parameters a `38`/`48` extended color occupies, if complete.
fn extended_color_len(parts: &[&str]) -> Option<usize> {
    match parts.get(1).copied() {
        Some("5") if parts.len() > 2 => Some(3),
        Some("2") if parts.len() > 4 => Some(5),
        _ => None,
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn sgr_param() -> impl Strategy<Value = String> {
        prop_oneof![
            (0u32..110).prop_map(|n| n.to_string()),
            (0u32..256).prop_map(|n| format!("38;5;{n}")),
            (0u32..256).prop_map(|n| format!("48;5;{n}")),
            (0u32..256, 0u32..256, 0u32..256).prop_map(|(r, g, b)| format!("38;2;{r};{g};{b}")),
        ]
    }

    proptest! {
        #[test]
        fn active_codes_round_trip(params in prop::collection::vec(sgr_param(), 1..6)) {
            let mut state = AnsiState::new();
            state.process(&format!("\x1b[{}m", params.join(";")));

            let mut replayed = AnsiState::new();
            replayed.process(&state.active_codes());
            prop_assert_eq!(replayed, state);
        }

        #[test]
        fn reset_always_restores_default(params in prop::collection::vec(sgr_param(), 0..6)) {
            let mut state = AnsiState::new();
            for param in &params {
                state.process(&format!("\x1b[{param}m"));
            }
            state.process("\x1b[0m");
            prop_assert!(state.is_default());
        }

        #[test]
        fn pieces_reassemble_input(s in "[a-z \\x1b\\[\\];0-9m_\\x07\\\\]{0,40}") {
            let rebuilt: String = ansi_pieces(&s)
                .map(|piece| match piece {
                    AnsiPiece::Text(text) => text,
                    AnsiPiece::Code(code) => code.code,
                })
                .collect();
            prop_assert_eq!(rebuilt, s);
        }
    }
}
