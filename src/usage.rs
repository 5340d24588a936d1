use std::fmt::Display;

use tracing::trace;
use unicode_width::UnicodeWidthStr;

const INDENT: &str = "\t";
const GUTTER: &str = "  ";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UsageEntry {
    pub name: String,
    pub options: String,
    pub description: String,
}

/// Registered commands, in the order they were described.
///
/// ```
/// # use cmdscan::Usage;
/// let mut usage = Usage::new();
/// usage.describe("stop", "[pid]", "Stop a process");
/// usage.describe("list", "", "List processes");
/// assert_eq!(
///     usage.render(),
///     "\tstop  [pid]  Stop a process\n\tlist         List processes\n"
/// );
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Usage {
    entries: Vec<UsageEntry>,
}

fn pad(f: &mut std::fmt::Formatter<'_>, text: &str, width: usize) -> std::fmt::Result {
    write!(f, "{text}{}", " ".repeat(width.saturating_sub(text.width())))
}

impl Usage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a command. Names are not checked for duplicates.
    pub fn describe<N: ToString, O: ToString, D: ToString>(
        &mut self,
        name: N,
        options: O,
        description: D,
    ) {
        let entry = UsageEntry {
            name: name.to_string(),
            options: options.to_string(),
            description: description.to_string(),
        };
        trace!(name = %entry.name, "Described command");
        self.entries.push(entry);
    }

    pub fn describe_plain<N: ToString, D: ToString>(&mut self, name: N, description: D) {
        self.describe(name, "", description);
    }

    pub fn entries(&self) -> &[UsageEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn column_widths(&self) -> (usize, usize) {
        self.entries.iter().fold((0, 0), |(name, options), e| {
            (name.max(e.name.width()), options.max(e.options.width()))
        })
    }

    /// One tab-indented line per command. Names and options are padded to
    /// the widest of each; the options column is left out entirely when no
    /// command has options.
    pub fn render(&self) -> String {
        self.to_string()
    }
}

impl Display for Usage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let (name_width, options_width) = self.column_widths();
        for entry in &self.entries {
            f.write_str(INDENT)?;
            pad(f, &entry.name, name_width)?;
            f.write_str(GUTTER)?;
            if options_width > 0 {
                pad(f, &entry.options, options_width)?;
                f.write_str(GUTTER)?;
            }
            writeln!(f, "{}", entry.description)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_render_with_options() {
        let mut usage = Usage::new();
        usage.describe("stop", "[pid]", "Stop a process");
        usage.describe("list", "", "List processes");
        assert_eq!(
            usage.render(),
            "\tstop  [pid]  Stop a process\n\tlist         List processes\n"
        );
    }

    #[test]
    fn test_render_plain() {
        let mut usage = Usage::new();
        usage.describe_plain("quit", "Leave");
        usage.describe_plain("h", "Show help");
        assert_eq!(usage.render(), "\tquit  Leave\n\th     Show help\n");
    }

    #[test]
    fn test_registration_order_and_duplicates() {
        let mut usage = Usage::new();
        usage.describe_plain("b", "second");
        usage.describe_plain("a", "first");
        usage.describe_plain("b", "again");
        let names: Vec<_> = usage.entries().iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["b", "a", "b"]);
        assert_eq!(usage.len(), 3);
    }

    #[test]
    fn test_render_empty() {
        let usage = Usage::new();
        assert!(usage.is_empty());
        assert_eq!(usage.render(), "");
    }

    #[test]
    fn test_display_width() {
        let mut usage = Usage::new();
        usage.describe_plain("日本", "wide");
        usage.describe_plain("abcd", "narrow");
        assert_eq!(usage.render(), "\t日本  wide\n\tabcd  narrow\n");
    }

    #[test]
    fn test_independent_registries() {
        let mut one = Usage::new();
        let two = Usage::new();
        one.describe_plain("x", "y");
        assert_eq!(one.len(), 1);
        assert!(two.is_empty());
    }
}
