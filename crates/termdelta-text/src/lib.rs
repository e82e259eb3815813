#![forbid(unsafe_code)]

//! Terminal text measurement for termdelta.
//!
//! This crate answers "how many columns will this string take?" for text
//! that may carry ANSI escape sequences, wide characters, emoji and
//! combining marks:
//! - [`TextMeasure`] - visible width with an owned, bounded cache
//! - [`AnsiState`] - SGR attribute tracker for re-issuing styles after a wrap
//! - [`extract_ansi_code`] / [`ansi_pieces`] - escape sequence parsing
//! - [`WidthCache`] - the cache behind `TextMeasure`
//!
//! # Example
//! ```
//! use termdelta_text::{AnsiState, TextMeasure};
//!
//! let measure = TextMeasure::new();
//! assert_eq!(measure.visible_width("\x1b[1mbold\x1b[0m 漢字"), 9);
//!
//! let lines = measure.wrap_text_with_ansi("\x1b[32mgreen text\x1b[0m", 5);
//! assert_eq!(lines[1], "\x1b[32mtext\x1b[0m");
//!
//! let mut state = AnsiState::new();
//! state.process("\x1b[4;34m");
//! assert_eq!(state.active_codes(), "\x1b[4;34m");
//! assert_eq!(state.line_end_reset(), "\x1b[24m");
//! ```

pub mod ansi;
pub mod config;
pub mod measure;
pub mod width;
pub mod width_cache;
pub mod wrap;

pub use ansi::{
    AnsiCode, AnsiCodeKind, AnsiPiece, AnsiPieces, AnsiState, ansi_pieces, extract_ansi_code,
    strip_ansi,
};
pub use config::{DEFAULT_CACHE_CAPACITY, DEFAULT_TAB_WIDTH, MeasureConfig};
pub use measure::TextMeasure;
#[cfg(feature = "thread_local_cache")]
pub use measure::{cached_width, clear_thread_cache};
pub use width::{east_asian_width, grapheme_width, is_emoji_grapheme, visible_width_uncached};
pub use width_cache::{CacheStats, WidthCache};
