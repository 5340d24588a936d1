use tracing::warn;

use crate::parse;

pub const DEFAULT_MAX_TOKEN_SIZE: usize = 64 * 1024;

/// Size of the first buffer allocation; the buffer doubles from here.
pub const INITIAL_BUFFER_SIZE: usize = 4096;

/// `CMDSCAN_CASE_INSENSITIVE` and `CMDSCAN_MAX_TOKEN_SIZE` override the
/// defaults when read with [`Config::from_env`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    pub case_insensitive: bool,
    /// Tokens longer than this stop the tokenizer with an error.
    pub max_token_size: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            case_insensitive: false,
            max_token_size: DEFAULT_MAX_TOKEN_SIZE,
        }
    }
}

impl Config {
    const CASE_INSENSITIVE_VAR: &'static str = "CMDSCAN_CASE_INSENSITIVE";
    const MAX_TOKEN_SIZE_VAR: &'static str = "CMDSCAN_MAX_TOKEN_SIZE";

    pub fn new() -> Self {
        Self::default()
    }

    pub fn case_insensitive(mut self, case_insensitive: bool) -> Self {
        self.case_insensitive = case_insensitive;
        self
    }

    /// Limit is raised to at least one byte.
    pub fn max_token_size(mut self, max_token_size: usize) -> Self {
        self.max_token_size = max_token_size.max(1);
        self
    }

    /// Defaults, overridden by any valid values found in the environment.
    pub fn from_env() -> Self {
        Self::default().with_overrides(|var| std::env::var(var).ok())
    }

    fn with_overrides<F: Fn(&str) -> Option<String>>(mut self, lookup: F) -> Self {
        if let Some(val) = lookup(Self::CASE_INSENSITIVE_VAR) {
            match parse::parse_bool(val.trim()) {
                Ok(flag) => self.case_insensitive = flag,
                Err(e) => warn!("Ignoring {}: {e}", Self::CASE_INSENSITIVE_VAR),
            }
        }

        if let Some(val) = lookup(Self::MAX_TOKEN_SIZE_VAR) {
            match parse::parse_uint(val.trim(), 10, 0) {
                Ok(0) => warn!("Ignoring {}: limit must be positive", Self::MAX_TOKEN_SIZE_VAR),
                Ok(size) => self.max_token_size = size as usize,
                Err(e) => warn!("Ignoring {}: {e}", Self::MAX_TOKEN_SIZE_VAR),
            }
        }

        self
    }
}
