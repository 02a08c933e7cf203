//! Offenses as RuboCop reports them, in fragment coordinates.

use serde::{Deserialize, Serialize};

/// RuboCop's severity scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnalyzerSeverity {
    Info,
    Refactor,
    #[default]
    Convention,
    Warning,
    Error,
    Fatal,
}

/// One finding from the analyzer, positioned in the fragment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawDiagnostic {
    /// Cop name, e.g. `Style/StringLiterals`.
    pub rule: String,
    pub message: String,
    pub severity: AnalyzerSeverity,
    /// Start fragment line (1-indexed).
    pub line: usize,
    pub column: usize,
    /// End fragment line (1-indexed).
    pub last_line: usize,
    pub last_column: usize,
    /// Column length of the offending range.
    pub length: usize,
}

/// Top level of `rubocop --format json` output.
#[derive(Debug, Deserialize)]
pub(crate) struct JsonReport {
    #[serde(default)]
    pub files: Vec<JsonFile>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct JsonFile {
    #[serde(default)]
    pub offenses: Vec<JsonOffense>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct JsonOffense {
    #[serde(default)]
    severity: AnalyzerSeverity,
    message: String,
    cop_name: String,
    location: JsonLocation,
}

#[derive(Debug, Deserialize)]
struct JsonLocation {
    start_line: usize,
    start_column: usize,
    #[serde(default)]
    last_line: Option<usize>,
    #[serde(default)]
    last_column: Option<usize>,
    #[serde(default)]
    length: Option<usize>,
}

impl From<JsonOffense> for RawDiagnostic {
    fn from(offense: JsonOffense) -> Self {
        let loc = offense.location;
        let last_line = loc.last_line.unwrap_or(loc.start_line);
        let last_column = loc.last_column.unwrap_or(loc.start_column);
        // Older RuboCop releases omit `length`; derive it for single-line ranges.
        let length = loc.length.unwrap_or_else(|| {
            if last_line == loc.start_line {
                last_column.saturating_sub(loc.start_column) + 1
            } else {
                0
            }
        });

        Self {
            rule: offense.cop_name,
            message: offense.message,
            severity: offense.severity,
            line: loc.start_line,
            column: loc.start_column,
            last_line,
            last_column,
            length,
        }
    }
}

impl JsonReport {
    pub(crate) fn parse(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    pub(crate) fn into_offenses(self) -> impl Iterator<Item = RawDiagnostic> {
        self.files
            .into_iter()
            .flat_map(|file| file.offenses)
            .map(RawDiagnostic::from)
    }
}
