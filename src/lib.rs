//! Line-oriented command input.
//!
//! A [`Tokenizer`] pulls tokens (lines, by default) from any reader. Each
//! [`Token`] keeps the text it was scanned from and a body that prefix and
//! suffix checks strip down, plus typed accessors for the remainder:
//!
//! ```
//! use std::io::Cursor;
//! use cmdscan::Tokenizer;
//!
//! let mut tokenizer = Tokenizer::new(Cursor::new("Stop PID 1234\n"), true);
//! while tokenizer.advance() {
//!     let Some(token) = tokenizer.token_mut() else { break };
//!     if token.has_prefix(&["stop ", "kill "]) && token.has_prefix(&["pid "]) {
//!         assert_eq!(token.parse_int(0, 0), Ok(1234));
//!     }
//! }
//! assert!(tokenizer.last_error().is_none());
//! ```
//!
//! [`Usage`] collects command descriptions and lays them out as a help table.

mod config;
mod error;
mod input;
mod parse;
mod token;
mod usage;

pub use config::{Config, DEFAULT_MAX_TOKEN_SIZE};
pub use error::{ParseError, ParseErrorKind, Res, Saturated, StreamError};
pub use input::{
    Bytes, Editor, InputError, LineSource, Lines, Prompt, Runes, SplitRule, Step, Tokenizer, Words,
};
pub use token::Token;
pub use usage::{Usage, UsageEntry};
