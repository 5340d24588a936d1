//! Split rules decide where one token ends and the next begins.
//!
//! A rule sees the unconsumed part of the tokenizer's buffer and whether the
//! stream has ended, and answers with a [`Step`]. Returning [`Step::more`]
//! asks for more bytes; the rule is called again once they arrive.

use std::borrow::Cow;

use crate::error::StreamError;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Step<'a> {
    /// Bytes of input consumed.
    pub advance: usize,
    /// Token produced, if any. An empty token is still a token.
    pub token: Option<Cow<'a, [u8]>>,
    /// Stop after delivering `token`.
    pub done: bool,
}

impl<'a> Step<'a> {
    pub fn more() -> Self {
        Self {
            advance: 0,
            token: None,
            done: false,
        }
    }

    pub fn skip(advance: usize) -> Self {
        Self {
            advance,
            token: None,
            done: false,
        }
    }

    pub fn token(advance: usize, token: &'a [u8]) -> Self {
        Self {
            advance,
            token: Some(Cow::Borrowed(token)),
            done: false,
        }
    }

    /// Deliver `token` and end the scan without an error.
    pub fn last(advance: usize, token: &'a [u8]) -> Self {
        Self {
            done: true,
            ..Self::token(advance, token)
        }
    }
}

pub trait SplitRule {
    fn split<'a>(&mut self, data: &'a [u8], at_eof: bool) -> Result<Step<'a>, StreamError>;
}

impl<F> SplitRule for F
where
    F: for<'a> FnMut(&'a [u8], bool) -> Result<Step<'a>, StreamError>,
{
    fn split<'a>(&mut self, data: &'a [u8], at_eof: bool) -> Result<Step<'a>, StreamError> {
        self(data, at_eof)
    }
}

/// One line per token, terminator stripped. Accepts `\n` and `\r\n`; a final
/// unterminated line is still returned.
#[derive(Clone, Copy, Debug, Default)]
pub struct Lines;

fn drop_cr(line: &[u8]) -> &[u8] {
    line.strip_suffix(b"\r").unwrap_or(line)
}

impl SplitRule for Lines {
    fn split<'a>(&mut self, data: &'a [u8], at_eof: bool) -> Result<Step<'a>, StreamError> {
        if at_eof && data.is_empty() {
            return Ok(Step::more());
        }
        if let Some(i) = data.iter().position(|&b| b == b'\n') {
            return Ok(Step::token(i + 1, drop_cr(&data[..i])));
        }
        if at_eof {
            return Ok(Step::token(data.len(), drop_cr(data)));
        }
        Ok(Step::more())
    }
}

/// Decodes one character from the front of `data`. `None` means the bytes so
/// far are a valid but incomplete encoding; invalid bytes decode as U+FFFD
/// with a width of one.
fn decode(data: &[u8], at_eof: bool) -> Option<(char, usize)> {
    let width = match *data.first()? {
        0x00..=0x7f => 1,
        0xc2..=0xdf => 2,
        0xe0..=0xef => 3,
        0xf0..=0xf4 => 4,
        _ => return Some((char::REPLACEMENT_CHARACTER, 1)),
    };

    let end = width.min(data.len());
    match std::str::from_utf8(&data[..end]) {
        Ok(s) => s.chars().next().map(|c| (c, width)),
        // error_len() of None: the sequence is cut short, not invalid.
        Err(e) if e.error_len().is_none() && !at_eof => None,
        Err(_) => Some((char::REPLACEMENT_CHARACTER, 1)),
    }
}

/// Whitespace-separated words. Leading whitespace is skipped and never
/// produces an empty token.
#[derive(Clone, Copy, Debug, Default)]
pub struct Words;

impl SplitRule for Words {
    fn split<'a>(&mut self, data: &'a [u8], at_eof: bool) -> Result<Step<'a>, StreamError> {
        let mut start = 0;
        while start < data.len() {
            match decode(&data[start..], at_eof) {
                Some((c, width)) if c.is_whitespace() => start += width,
                Some(_) => break,
                None => return Ok(Step::skip(start)),
            }
        }

        let mut i = start;
        while i < data.len() {
            match decode(&data[i..], at_eof) {
                Some((c, width)) if c.is_whitespace() => {
                    return Ok(Step::token(i + width, &data[start..i]))
                }
                Some((_, width)) => i += width,
                None => break,
            }
        }

        if at_eof && data.len() > start {
            Ok(Step::token(data.len(), &data[start..]))
        } else {
            Ok(Step::skip(start))
        }
    }
}

/// One UTF-8 character per token. Invalid bytes come back as the encoding
/// of U+FFFD, one byte at a time.
#[derive(Clone, Copy, Debug, Default)]
pub struct Runes;

impl SplitRule for Runes {
    fn split<'a>(&mut self, data: &'a [u8], at_eof: bool) -> Result<Step<'a>, StreamError> {
        if data.is_empty() {
            return Ok(Step::more());
        }
        match decode(data, at_eof) {
            Some((char::REPLACEMENT_CHARACTER, 1)) => {
                let mut buf = [0; 4];
                let encoded = char::REPLACEMENT_CHARACTER.encode_utf8(&mut buf);
                Ok(Step {
                    advance: 1,
                    token: Some(Cow::Owned(encoded.as_bytes().to_vec())),
                    done: false,
                })
            }
            Some((_, width)) => Ok(Step::token(width, &data[..width])),
            None => Ok(Step::more()),
        }
    }
}

/// One byte per token.
#[derive(Clone, Copy, Debug, Default)]
pub struct Bytes;

impl SplitRule for Bytes {
    fn split<'a>(&mut self, data: &'a [u8], _at_eof: bool) -> Result<Step<'a>, StreamError> {
        if data.is_empty() {
            Ok(Step::more())
        } else {
            Ok(Step::token(1, &data[..1]))
        }
    }
}
