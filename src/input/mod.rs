//! Pull-based tokenizing of a byte stream.
//!
//! A [`Tokenizer`] buffers its reader and hands the buffered bytes to a
//! [`SplitRule`], one token at a time. It stops for good at the end of the
//! input or at the first error; [`Tokenizer::last_error`] then tells the two
//! apart.

use std::{
    borrow::Cow,
    io::{ErrorKind, Read},
};

use tracing::{debug, warn};

use crate::{
    config::{Config, INITIAL_BUFFER_SIZE},
    error::StreamError,
    token::Token,
};

mod readline;
mod split;

pub use readline::{Editor, InputError, LineSource, Prompt};
pub use split::{Bytes, Lines, Runes, SplitRule, Step, Words};

/// Consecutive empty tokens a split rule may return without consuming input.
const MAX_EMPTY_TOKENS: usize = 100;

static NOT_INITIALIZED: StreamError = StreamError::NotInitialized;

struct Scanner<R> {
    reader: R,
    split: Box<dyn SplitRule>,
    buf: Vec<u8>,
    start: usize,
    end: usize,
    max_token_size: usize,
    eof: bool,
    done: bool,
    scanned: bool,
    empties: usize,
    err: Option<StreamError>,
}

impl<R: Read> Scanner<R> {
    fn new(reader: R, max_token_size: usize) -> Self {
        Self {
            reader,
            split: Box::new(Lines),
            buf: Vec::new(),
            start: 0,
            end: 0,
            max_token_size,
            eof: false,
            done: false,
            scanned: false,
            empties: 0,
            err: None,
        }
    }

    fn fail(&mut self, err: StreamError) -> Option<Vec<u8>> {
        warn!(error = %err, "Tokenizer stopped");
        self.err.get_or_insert(err);
        self.done = true;
        None
    }

    fn scan(&mut self) -> Option<Vec<u8>> {
        if self.done {
            return None;
        }
        self.scanned = true;

        loop {
            if self.end > self.start || self.eof {
                let available = self.end - self.start;
                let step = match self.split.split(&self.buf[self.start..self.end], self.eof) {
                    Ok(step) => step,
                    Err(e) => return self.fail(e),
                };
                if step.advance > available {
                    let advance = step.advance;
                    return self.fail(StreamError::AdvanceTooFar { advance, available });
                }

                let (advance, done) = (step.advance, step.done);
                let token = step.token.map(Cow::into_owned);
                self.start += advance;

                if let Some(token) = token {
                    if advance > 0 || done {
                        self.empties = 0;
                    } else {
                        self.empties += 1;
                        if self.empties > MAX_EMPTY_TOKENS {
                            return self.fail(StreamError::NoProgress);
                        }
                    }
                    self.done = done;
                    return Some(token);
                }
                if done {
                    self.done = true;
                    return None;
                }
                if advance > 0 {
                    continue;
                }
            }

            if self.eof {
                self.start = 0;
                self.end = 0;
                self.done = true;
                return None;
            }

            match self.fill() {
                Ok(()) => {}
                Err(StreamError::Io(e)) => {
                    // Flush what is already buffered, then stop.
                    warn!(error = %e, "Read failed");
                    self.err.get_or_insert(StreamError::Io(e));
                    self.eof = true;
                }
                Err(e) => return self.fail(e),
            }
        }
    }

    /// Reads more input, making room first. Sets `eof` when the reader is
    /// exhausted.
    fn fill(&mut self) -> Result<(), StreamError> {
        if self.start > 0 && (self.end == self.buf.len() || self.start > self.buf.len() / 2) {
            self.buf.copy_within(self.start..self.end, 0);
            self.end -= self.start;
            self.start = 0;
        }

        if self.end == self.buf.len() {
            if self.buf.len() >= self.max_token_size {
                return Err(StreamError::TokenTooLong {
                    limit: self.max_token_size,
                });
            }
            let size = if self.buf.is_empty() {
                INITIAL_BUFFER_SIZE
            } else {
                self.buf.len() * 2
            }
            .min(self.max_token_size);
            debug!(size, "Growing scan buffer");
            self.buf.resize(size, 0);
        }

        loop {
            match self.reader.read(&mut self.buf[self.end..]) {
                Ok(0) => {
                    self.eof = true;
                    return Ok(());
                }
                Ok(n) => {
                    self.end += n;
                    return Ok(());
                }
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            }
        }
    }
}

/// Reads tokens from `R`, one line each unless another [`SplitRule`] is set.
///
/// A tokenizer made with [`Default`] has no stream at all: it never
/// advances and reports [`StreamError::NotInitialized`].
pub struct Tokenizer<R> {
    scanner: Option<Scanner<R>>,
    token: Option<Token>,
    case_insensitive: bool,
}

impl<R> Default for Tokenizer<R> {
    fn default() -> Self {
        Self {
            scanner: None,
            token: None,
            case_insensitive: false,
        }
    }
}

impl<R: Read> Tokenizer<R> {
    pub fn new(reader: R, case_insensitive: bool) -> Self {
        Self::with_config(reader, Config::new().case_insensitive(case_insensitive))
    }

    pub fn with_config(reader: R, config: Config) -> Self {
        Self {
            scanner: Some(Scanner::new(reader, config.max_token_size)),
            token: None,
            case_insensitive: config.case_insensitive,
        }
    }

    /// Replaces the split rule. Only takes effect before the first call to
    /// [`Tokenizer::advance`]; later calls, or calls on a tokenizer without a
    /// stream, are ignored.
    pub fn set_split<S: SplitRule + 'static>(&mut self, rule: S) {
        match self.scanner.as_mut() {
            Some(scanner) if !scanner.scanned => scanner.split = Box::new(rule),
            Some(_) => warn!("Split rule set after scanning started; ignored"),
            None => {}
        }
    }

    /// Moves to the next token. False once the input is exhausted or an
    /// error occurred, and false from then on.
    pub fn advance(&mut self) -> bool {
        let Some(scanner) = self.scanner.as_mut() else {
            return false;
        };

        match scanner.scan() {
            Some(bytes) => {
                let token = Token::new(String::from_utf8_lossy(&bytes), self.case_insensitive);
                debug!(len = bytes.len(), blank = token.is_blank(), "Scanned token");
                self.token = Some(token);
                true
            }
            None => false,
        }
    }
}

impl<R> Tokenizer<R> {
    /// The first error that stopped the tokenizer. `None` while it is still
    /// running or when it simply reached the end of its input.
    pub fn last_error(&self) -> Option<&StreamError> {
        match &self.scanner {
            Some(scanner) => scanner.err.as_ref(),
            None => Some(&NOT_INITIALIZED),
        }
    }

    /// The most recent token; `None` before the first successful advance.
    pub fn token(&self) -> Option<&Token> {
        self.token.as_ref()
    }

    pub fn token_mut(&mut self) -> Option<&mut Token> {
        self.token.as_mut()
    }

    pub fn is_case_insensitive(&self) -> bool {
        self.case_insensitive
    }
}

impl<R: Read> Iterator for Tokenizer<R> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        if self.advance() {
            self.token.clone()
        } else {
            None
        }
    }
}
