use std::io::{self, Read};

use rustyline::error::ReadlineError;
use thiserror::Error;

use crate::error::StreamError;

#[derive(Debug, Error)]
pub enum InputError {
    #[error("keyboard interrupt")]
    Interrupt,
    #[error(transparent)]
    Editor(#[from] ReadlineError),
}

impl InputError {
    /// True if `err` is a Ctrl-C that stopped a tokenizer reading a [`Prompt`].
    pub fn is_interrupt(err: &StreamError) -> bool {
        match err {
            StreamError::Io(e) => matches!(
                e.get_ref().and_then(|e| e.downcast_ref::<InputError>()),
                Some(InputError::Interrupt)
            ),
            _ => false,
        }
    }
}

impl From<InputError> for io::Error {
    fn from(err: InputError) -> Self {
        match err {
            InputError::Editor(ReadlineError::Io(e)) => e,
            err => io::Error::new(io::ErrorKind::Other, err),
        }
    }
}

/// Something that hands out whole lines; `None` is the end of input.
pub trait LineSource {
    fn next_line(&mut self) -> Result<Option<String>, InputError>;
}

/// Interactive line editing on the terminal, with history.
pub struct Editor {
    editor: rustyline::DefaultEditor,
    prompt: String,
}

impl Editor {
    const PROMPT: &'static str = "> ";

    pub fn new() -> Result<Self, InputError> {
        Self::with_prompt(Self::PROMPT)
    }

    pub fn with_prompt<S: ToString>(prompt: S) -> Result<Self, InputError> {
        Ok(Self {
            editor: rustyline::DefaultEditor::new()?,
            prompt: prompt.to_string(),
        })
    }
}

impl LineSource for Editor {
    fn next_line(&mut self) -> Result<Option<String>, InputError> {
        loop {
            match self.editor.readline(&self.prompt) {
                Ok(line) => {
                    if !line.trim().is_empty() {
                        self.editor.add_history_entry(line.as_str())?;
                    }
                    return Ok(Some(line));
                }
                Err(ReadlineError::WindowResized) => continue,
                Err(ReadlineError::Eof) => return Ok(None),
                Err(ReadlineError::Interrupted) => return Err(InputError::Interrupt),
                Err(err) => return Err(err.into()),
            }
        }
    }
}

/// Adapts a [`LineSource`] into a byte stream with one `\n` terminated line
/// per prompt, so it can feed a [`Tokenizer`](crate::Tokenizer).
pub struct Prompt<S = Editor> {
    source: S,
    pending: Vec<u8>,
    pos: usize,
}

impl Prompt<Editor> {
    pub fn new() -> Result<Self, InputError> {
        Editor::new().map(Self::from_source)
    }
}

impl<S: LineSource> Prompt<S> {
    pub fn from_source(source: S) -> Self {
        Self {
            source,
            pending: Vec::new(),
            pos: 0,
        }
    }
}

impl<S: LineSource> Read for Prompt<S> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if self.pos == self.pending.len() {
            match self.source.next_line()? {
                Some(line) => {
                    self.pending = line.into_bytes();
                    self.pending.push(b'\n');
                    self.pos = 0;
                }
                None => return Ok(0),
            }
        }

        let n = buf.len().min(self.pending.len() - self.pos);
        buf[..n].copy_from_slice(&self.pending[self.pos..self.pos + n]);
        self.pos += n;
        Ok(n)
    }
}
