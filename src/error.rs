use std::fmt::Display;

use thiserror::Error;

/// End of input is not an error; an exhausted tokenizer with no error simply
/// ran out of bytes.
#[derive(Debug, Error)]
pub enum StreamError {
    #[error("tokenizer not initialised")]
    NotInitialized,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("token too long: exceeds {limit} bytes")]
    TokenTooLong { limit: usize },

    #[error("split error: {0}")]
    Split(String),

    /// A split rule kept producing empty tokens without consuming input.
    #[error("split rule made no progress")]
    NoProgress,

    /// A split rule asked to advance past the end of the buffered input.
    #[error("split rule advanced {advance} bytes, only {available} buffered")]
    AdvanceTooFar { advance: usize, available: usize },
}

impl StreamError {
    pub fn split<S: ToString>(msg: S) -> Self {
        Self::Split(msg.to_string())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ParseErrorKind {
    /// The text is not a literal of the requested type.
    Syntax,
    /// The literal is well formed but does not fit the requested size.
    Range,
    InvalidBase(u32),
    InvalidBitSize(u32),
}

impl Display for ParseErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParseErrorKind::Syntax => write!(f, "invalid syntax"),
            ParseErrorKind::Range => write!(f, "value out of range"),
            ParseErrorKind::InvalidBase(base) => write!(f, "invalid base {base}"),
            ParseErrorKind::InvalidBitSize(bits) => write!(f, "invalid bit size {bits}"),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Saturated {
    Int(i64),
    Uint(u64),
    Float(f64),
}

#[derive(Clone, Debug, PartialEq, Error)]
#[error("parsing {text:?} as {target}: {kind}")]
pub struct ParseError {
    pub kind: ParseErrorKind,
    pub text: String,
    /// Name of the requested type, e.g. `"int"` or `"float"`.
    pub target: &'static str,
    /// Clamped result, present only for [`ParseErrorKind::Range`].
    pub saturated: Option<Saturated>,
}

impl ParseError {
    pub(crate) fn new(kind: ParseErrorKind, text: &str, target: &'static str) -> Self {
        Self {
            kind,
            text: text.to_string(),
            target,
            saturated: None,
        }
    }

    pub(crate) fn syntax(text: &str, target: &'static str) -> Self {
        Self::new(ParseErrorKind::Syntax, text, target)
    }

    pub(crate) fn range(text: &str, target: &'static str, saturated: Saturated) -> Self {
        Self {
            saturated: Some(saturated),
            ..Self::new(ParseErrorKind::Range, text, target)
        }
    }

    pub fn is_syntax(&self) -> bool {
        self.kind == ParseErrorKind::Syntax
    }

    pub fn is_range(&self) -> bool {
        self.kind == ParseErrorKind::Range
    }
}

pub type Res<T> = Result<T, ParseError>;
