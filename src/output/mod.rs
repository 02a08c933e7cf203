//! Output formatting for diagnostics
//!
//! Text is the default human-readable format; JSON is meant for editors and CI.

use crate::bridge::Diagnostic;
use std::io::{self, Write};
use std::str::FromStr;

pub mod formatters;

pub use formatters::*;

/// Trait for output formatters
pub trait OutputFormatter {
    /// Format the diagnostics of one file
    fn format_diagnostics(&self, diagnostics: &[Diagnostic], file_path: &str) -> String;

    /// Whether this formatter should use colors
    fn use_colors(&self) -> bool {
        false
    }
}

/// Available output formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// `file:line:col: [RuboCop:Cop] message`
    Text,
    /// A single JSON array covering every file
    Json,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" | "full" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            _ => Err(format!("Unknown output format: {s}")),
        }
    }
}

impl OutputFormat {
    /// Create a formatter instance for this format
    pub fn create_formatter(&self, use_colors: bool) -> Box<dyn OutputFormatter> {
        match self {
            OutputFormat::Text if use_colors => Box::new(TextFormatter::new()),
            OutputFormat::Text => Box::new(TextFormatter::without_colors()),
            OutputFormat::Json => Box::new(JsonFormatter::new()),
        }
    }
}

/// Output writer that handles quiet mode
pub struct OutputWriter {
    quiet: bool,
}

impl OutputWriter {
    pub fn new(quiet: bool) -> Self {
        Self { quiet }
    }

    /// Write a line to stdout
    pub fn writeln(&self, content: &str) -> io::Result<()> {
        if self.quiet || content.is_empty() {
            return Ok(());
        }
        let mut stdout = io::stdout().lock();
        writeln!(stdout, "{content}")?;
        stdout.flush()
    }

    /// Write error output to stderr. Errors are shown even in quiet mode.
    pub fn write_error(&self, content: &str) -> io::Result<()> {
        let mut stderr = io::stderr().lock();
        writeln!(stderr, "{content}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_format_from_str() {
        assert_eq!("text".parse::<OutputFormat>(), Ok(OutputFormat::Text));
        assert_eq!("JSON".parse::<OutputFormat>(), Ok(OutputFormat::Json));
        assert!("sarif".parse::<OutputFormat>().is_err());
    }

    #[test]
    fn test_create_formatter_colors() {
        assert!(OutputFormat::Text.create_formatter(true).use_colors());
        assert!(!OutputFormat::Text.create_formatter(false).use_colors());
        assert!(!OutputFormat::Json.create_formatter(true).use_colors());
    }
}
