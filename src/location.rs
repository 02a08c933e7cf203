//! Positions in the original template.
//!
//! Lines are 1-indexed. Columns are whatever the analyzer reports shifted by the
//! anchor's offset; a column of 0 means "position unknown on this line" and is
//! only produced by the unmapped-line fallback.

use serde::Serialize;
use std::fmt;

/// A location in the original template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TemplateLocation {
    /// Start line (1-indexed).
    pub line: usize,
    /// Start column.
    pub column: usize,
    /// End line, when the extent is known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_line: Option<usize>,
    /// End column, when the extent is known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_column: Option<usize>,
    /// Length in characters as reported by the analyzer.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub length: Option<usize>,
}

impl TemplateLocation {
    /// A location with only a start point.
    pub fn point(line: usize, column: usize) -> Self {
        Self {
            line,
            column,
            end_line: None,
            end_column: None,
            length: None,
        }
    }

    /// Merge a start anchor and an end anchor into one spanning location.
    ///
    /// The start of `self` and the start of `end` become the two endpoints. An
    /// end that sorts before the start collapses onto the start so the result
    /// never runs backwards.
    pub fn merge(self, end: TemplateLocation) -> Self {
        let (end_line, end_column) = if (end.line, end.column) < (self.line, self.column) {
            (self.line, self.column)
        } else {
            (end.line, end.column)
        };

        Self {
            line: self.line,
            column: self.column,
            end_line: Some(end_line),
            end_column: Some(end_column),
            length: self.length,
        }
    }

    /// Stamp a length onto the location.
    pub fn with_length(mut self, length: usize) -> Self {
        self.length = Some(length);
        self
    }
}

impl fmt::Display for TemplateLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_merge_spans_both_points() {
        let merged = TemplateLocation::point(5, 2).merge(TemplateLocation::point(7, 4));
        assert_eq!(merged.line, 5);
        assert_eq!(merged.column, 2);
        assert_eq!(merged.end_line, Some(7));
        assert_eq!(merged.end_column, Some(4));
        assert_eq!(merged.length, None);
    }

    #[test]
    fn test_merge_never_runs_backwards() {
        let merged = TemplateLocation::point(7, 3).merge(TemplateLocation::point(5, 9));
        assert_eq!(merged.end_line, Some(7));
        assert_eq!(merged.end_column, Some(3));
    }

    #[test]
    fn test_merge_keeps_start_length() {
        let merged = TemplateLocation::point(1, 1)
            .with_length(3)
            .merge(TemplateLocation::point(1, 4));
        assert_eq!(merged.length, Some(3));
    }

    #[test]
    fn test_display() {
        assert_eq!(TemplateLocation::point(12, 0).to_string(), "12:0");
    }
}
