//! Extraction of embedded Ruby from templates.
//!
//! The bridge only depends on the [`Extractor`] trait. [`ErbExtractor`] is the
//! built-in implementation for ERB-style tags and is what the CLI uses.

use crate::source_map::{Anchor, SourceMap};
use thiserror::Error;

/// Error raised when a template cannot be turned into a fragment.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ExtractError {
    #[error("unterminated tag at {line}:{column}")]
    UnterminatedTag { line: usize, column: usize },
}

/// Output of an extractor: the script fragment plus its line mapping.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Extraction {
    /// Script text, one fragment line per `\n`. May be empty.
    pub source: String,
    /// Fragment line to template anchor. May have gaps.
    pub source_map: SourceMap,
}

impl Extraction {
    /// True when there is nothing worth handing to the analyzer.
    pub fn is_blank(&self) -> bool {
        self.source.trim().is_empty()
    }
}

/// Turns a template into a script fragment.
pub trait Extractor: Send + Sync {
    fn extract(&self, template: &str) -> Result<Extraction, ExtractError>;
}

/// Extracts the code of `<% %>` and `<%= %>` tags.
///
/// `<%# %>` comments and `<%%` literals are dropped. Trim markers (`<%-`, `-%>`)
/// are stripped. Every non-blank line of tag code becomes one fragment line.
#[derive(Debug, Clone, Copy, Default)]
pub struct ErbExtractor;

impl ErbExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl Extractor for ErbExtractor {
    fn extract(&self, template: &str) -> Result<Extraction, ExtractError> {
        let line_starts = line_starts(template);
        let mut extraction = Extraction::default();
        let mut fragment_line = 0;
        let mut cursor = 0;

        while let Some(found) = template[cursor..].find("<%") {
            let open = cursor + found;
            let rest = &template[open + 2..];

            if rest.starts_with('%') {
                cursor = open + 3;
                continue;
            }

            let (marker_len, is_comment) = match rest.chars().next() {
                Some('#') => (1, true),
                Some('=') | Some('-') => (1, false),
                _ => (0, false),
            };
            let code_start = open + 2 + marker_len;

            let Some(close_rel) = template[code_start..].find("%>") else {
                let (line, column) = position(template, &line_starts, open);
                return Err(ExtractError::UnterminatedTag {
                    line,
                    column: column + 1,
                });
            };
            let close = code_start + close_rel;
            cursor = close + 2;

            if is_comment {
                continue;
            }

            let code = &template[code_start..close];
            let code = code.strip_suffix('-').unwrap_or(code);

            let mut segment_start = code_start;
            for segment in code.split('\n') {
                if !segment.trim().is_empty() {
                    fragment_line += 1;
                    let (line, column) = position(template, &line_starts, segment_start);
                    extraction.source.push_str(segment.trim_end());
                    extraction.source.push('\n');
                    extraction.source_map.insert(fragment_line, Anchor::new(line, column));
                }
                segment_start += segment.len() + 1;
            }
        }

        Ok(extraction)
    }
}

/// Byte offsets at which each line begins.
fn line_starts(text: &str) -> Vec<usize> {
    std::iter::once(0)
        .chain(text.match_indices('\n').map(|(i, _)| i + 1))
        .collect()
}

/// 1-indexed line and 0-indexed character column for a byte offset.
fn position(text: &str, line_starts: &[usize], offset: usize) -> (usize, usize) {
    let line_idx = line_starts.partition_point(|&start| start <= offset) - 1;
    let column = text[line_starts[line_idx]..offset].chars().count();
    (line_idx + 1, column)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn extract(template: &str) -> Extraction {
        ErbExtractor::new().extract(template).expect("extraction should succeed")
    }

    #[test]
    fn test_plain_markup_is_blank() {
        let extraction = extract("<div>\n  <p>hello</p>\n</div>\n");
        assert!(extraction.is_blank());
        assert!(extraction.source_map.is_empty());
    }

    #[test]
    fn test_single_line_tags() {
        let extraction = extract("<h1>\n  <%= title %>\n</h1>\n<% if admin? %>x<% end %>\n");
        assert_eq!(extraction.source, " title\n if admin?\n end\n");
        assert_eq!(extraction.source_map.get(1), Some(&Anchor::new(2, 5)));
        assert_eq!(extraction.source_map.get(2), Some(&Anchor::new(4, 2)));
        assert_eq!(extraction.source_map.get(3), Some(&Anchor::new(4, 18)));
    }

    #[test]
    fn test_multi_line_tag() {
        let extraction = extract("<%\n  a = 1\n\n  b = 2\n%>\n");
        assert_eq!(extraction.source, "  a = 1\n  b = 2\n");
        assert_eq!(extraction.source_map.get(1), Some(&Anchor::new(2, 0)));
        assert_eq!(extraction.source_map.get(2), Some(&Anchor::new(4, 0)));
        assert_eq!(extraction.source_map.len(), 2);
    }

    #[test]
    fn test_comments_and_literals_are_skipped() {
        let extraction = extract("<%# note %>\n<%% not code %>\n<%- x -%>\n");
        assert_eq!(extraction.source, " x\n");
        assert_eq!(extraction.source_map.get(1), Some(&Anchor::new(3, 3)));
    }

    #[test]
    fn test_columns_count_characters() {
        let extraction = extract("é <%= y %>");
        assert_eq!(extraction.source_map.get(1), Some(&Anchor::new(1, 5)));
    }

    #[test]
    fn test_unterminated_tag() {
        let err = ErbExtractor::new().extract("ok\n  <% foo\n").unwrap_err();
        assert_eq!(err, ExtractError::UnterminatedTag { line: 2, column: 3 });
    }
}
