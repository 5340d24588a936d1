use std::{borrow::Cow, fmt::Display};

use crate::{error::Res, parse};

/// Lower-cases one character at a time, so a piece folds the same way on
/// its own as it does inside a longer text.
fn lowercase(text: &str) -> String {
    text.chars().flat_map(char::to_lowercase).collect()
}

/// One scanned unit of input.
///
/// The full text never changes after scanning. The body starts out equal to
/// it and shrinks as [`Token::has_prefix`] and [`Token::has_suffix`] strip
/// matched pieces off, so a command can be picked apart word by word:
///
/// ```
/// # use cmdscan::Token;
/// let mut token = Token::new("stop pid 1234", false);
/// assert!(token.has_prefix(&["stop ", "kill "]));
/// assert!(token.has_prefix(&["pid "]));
/// assert_eq!(token.parse_int(0, 0), Ok(1234));
/// assert_eq!(token.full(), "stop pid 1234");
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Token {
    full: String,
    original: String,
    working: String,
    case_insensitive: bool,
}

impl Token {
    /// In case-insensitive mode the text is lower-cased here, once, and the
    /// folded form is what [`Token::full`] returns from then on.
    pub fn new<S: ToString>(text: S, case_insensitive: bool) -> Self {
        let original = text.to_string();
        let full = if case_insensitive {
            lowercase(&original)
        } else {
            original.clone()
        };
        Self {
            working: full.clone(),
            full,
            original,
            case_insensitive,
        }
    }

    /// True when the scanned text was empty, e.g. a blank line.
    pub fn is_blank(&self) -> bool {
        self.full.is_empty()
    }

    /// The text left after any prefix and suffix stripping.
    pub fn body(&self) -> &str {
        &self.working
    }

    pub fn full(&self) -> &str {
        &self.full
    }

    /// The scanned text before case folding.
    pub fn original(&self) -> &str {
        &self.original
    }

    pub fn raw_bytes(&self) -> &[u8] {
        self.full.as_bytes()
    }

    pub fn is_case_insensitive(&self) -> bool {
        self.case_insensitive
    }

    fn fold<'a>(&self, candidate: &'a str) -> Cow<'a, str> {
        if self.case_insensitive {
            Cow::Owned(lowercase(candidate))
        } else {
            Cow::Borrowed(candidate)
        }
    }

    /// True if the body equals any of `candidates`.
    pub fn equals(&self, candidates: &[&str]) -> bool {
        candidates.iter().any(|c| self.fold(c) == self.working)
    }

    /// First candidate the body starts with, without consuming it.
    fn matching_prefix<'a>(&self, candidates: &[&'a str]) -> Option<Cow<'a, str>> {
        candidates
            .iter()
            .copied()
            .map(|c| self.fold(c))
            .find(|c| self.working.starts_with(&**c))
    }

    fn matching_suffix<'a>(&self, candidates: &[&'a str]) -> Option<Cow<'a, str>> {
        candidates
            .iter()
            .copied()
            .map(|c| self.fold(c))
            .find(|c| self.working.ends_with(&**c))
    }

    /// True if the body starts with any of `candidates`. The body is left
    /// untouched; see [`Token::has_prefix`] to consume the match.
    pub fn starts_with(&self, candidates: &[&str]) -> bool {
        self.matching_prefix(candidates).is_some()
    }

    pub fn ends_with(&self, candidates: &[&str]) -> bool {
        self.matching_suffix(candidates).is_some()
    }

    /// Strips the first candidate, in argument order, that the body starts
    /// with. Later candidates are not tried once one matches, even if they
    /// are longer. Returns false and leaves the body as it was if none match.
    pub fn has_prefix(&mut self, candidates: &[&str]) -> bool {
        match self.matching_prefix(candidates) {
            Some(prefix) => {
                self.working.replace_range(..prefix.len(), "");
                true
            }
            None => false,
        }
    }

    /// Suffix counterpart of [`Token::has_prefix`].
    pub fn has_suffix(&mut self, candidates: &[&str]) -> bool {
        match self.matching_suffix(candidates) {
            Some(suffix) => {
                let len = self.working.len() - suffix.len();
                self.working.truncate(len);
                true
            }
            None => false,
        }
    }

    /// Accepts `1 t T TRUE true True` and `0 f F FALSE false False`.
    pub fn parse_bool(&self) -> Res<bool> {
        parse::parse_bool(&self.working)
    }

    /// Parses the body at 32 or 64 bit precision. Out of range literals fail
    /// with a range error whose saturated value is an infinity.
    pub fn parse_float(&self, bits: u32) -> Res<f64> {
        parse::parse_float(&self.working, bits)
    }

    /// Parses the body as a signed integer in `base` (2 to 36, or 0 to infer
    /// from a `0x` or `0` prefix) that must fit in `bits` bits (0 for the
    /// platform word).
    pub fn parse_int(&self, base: u32, bits: u32) -> Res<i64> {
        parse::parse_int(&self.working, base, bits)
    }

    pub fn parse_uint(&self, base: u32, bits: u32) -> Res<u64> {
        parse::parse_uint(&self.working, base, bits)
    }
}

impl AsRef<str> for Token {
    fn as_ref(&self) -> &str {
        &self.full
    }
}

impl Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.full)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::error::ParseErrorKind;

    #[test]
    fn test_full_round_trip() {
        for text in ["", "Stop PID 12", "  spaced  ", "ünïcödé"] {
            let token = Token::new(text, false);
            assert_eq!(token.full(), text);
            assert_eq!(token.body(), text);
            assert_eq!(token.raw_bytes(), text.as_bytes());
        }
    }

    #[test]
    fn test_case_fold_is_lossy() {
        let token = Token::new("Stop PID", true);
        assert_eq!(token.full(), "stop pid");
        assert_eq!(token.body(), "stop pid");
        assert_eq!(token.original(), "Stop PID");
        assert_eq!(token.to_string(), "stop pid");
    }

    #[test]
    fn test_case_fold_per_character() {
        let mut token = Token::new("ΟΔΟΣ", true);
        assert_eq!(token.full(), "οδοσ");
        assert!(token.ends_with(&["Σ"]));
        assert!(token.equals(&["οδοΣ"]));
        assert!(token.has_suffix(&["Σ"]));
        assert_eq!(token.body(), "οδο");
    }

    #[test]
    fn test_blank() {
        assert!(Token::new("", false).is_blank());
        assert!(!Token::new(" ", false).is_blank());

        let mut token = Token::new("go", false);
        assert!(token.has_prefix(&["go"]));
        assert_eq!(token.body(), "");
        assert!(!token.is_blank());
    }

    #[test]
    fn test_equals() {
        let token = Token::new("list", false);
        assert!(token.equals(&["list"]));
        assert!(token.equals(&["ls", "list"]));
        assert!(!token.equals(&["LIST"]));
        assert!(!token.equals(&[]));

        let token = Token::new("LiSt", true);
        assert!(token.equals(&["LIST"]));
        assert_eq!(token.body(), "list");
    }

    #[test]
    fn test_has_prefix_first_match_wins() {
        let mut token = Token::new("abc", false);
        assert!(token.has_prefix(&["a", "ab"]));
        assert_eq!(token.body(), "bc");

        let mut token = Token::new("abc", false);
        assert!(token.has_prefix(&["a", "b"]));
        assert_eq!(token.body(), "bc");
        assert_eq!(token.full(), "abc");
    }

    #[test]
    fn test_has_prefix_no_match() {
        let mut token = Token::new("abc", false);
        assert!(!token.has_prefix(&["b", "c"]));
        assert_eq!(token.body(), "abc");
    }

    #[test]
    fn test_has_prefix_progressive() {
        let mut token = Token::new("stop pid 1234", false);
        assert!(token.has_prefix(&["stop ", "kill "]));
        assert!(!token.has_prefix(&["stop "]));
        assert!(token.has_prefix(&["pid "]));
        assert_eq!(token.body(), "1234");
        assert_eq!(token.parse_int(0, 0), Ok(1234));
    }

    #[test]
    fn test_has_prefix_case_insensitive() {
        let mut token = Token::new("KILL 9", true);
        assert!(token.has_prefix(&["Kill "]));
        assert_eq!(token.body(), "9");
    }

    #[test]
    fn test_has_suffix() {
        let mut token = Token::new("abc", false);
        assert!(token.has_suffix(&["c", "bc"]));
        assert_eq!(token.body(), "ab");
        assert!(!token.has_suffix(&["x"]));
        assert_eq!(token.body(), "ab");

        let mut token = Token::new("report.TXT", true);
        assert!(token.has_suffix(&[".Txt"]));
        assert_eq!(token.body(), "report");
    }

    #[test]
    fn test_peek_does_not_consume() {
        let token = Token::new("abc", false);
        assert!(token.starts_with(&["x", "ab"]));
        assert!(token.ends_with(&["bc"]));
        assert!(!token.ends_with(&["ab"]));
        assert_eq!(token.body(), "abc");
    }

    #[test]
    fn test_multibyte_strip() {
        let mut token = Token::new("ééx", false);
        assert!(token.has_prefix(&["é"]));
        assert_eq!(token.body(), "éx");
        assert!(token.has_suffix(&["x"]));
        assert_eq!(token.body(), "é");
    }

    #[test]
    fn test_typed_accessors() {
        let mut token = Token::new("flag=True", false);
        assert!(token.has_prefix(&["flag="]));
        assert_eq!(token.parse_bool(), Ok(true));

        let token = Token::new("yes", false);
        assert_eq!(token.parse_bool().unwrap_err().kind, ParseErrorKind::Syntax);

        let mut token = Token::new("300ms", false);
        assert!(token.has_suffix(&["ms"]));
        assert_eq!(token.parse_int(10, 8).unwrap_err().kind, ParseErrorKind::Range);
        assert_eq!(token.parse_uint(10, 16), Ok(300));
        assert_eq!(token.parse_float(64), Ok(300.0));
    }
}
