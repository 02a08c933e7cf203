//! Fragment space to template space.

use crate::analyzer::RawDiagnostic;
use crate::location::TemplateLocation;
use crate::source_map::SourceMap;

/// An analyzer offense paired with its template location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslatedOffense {
    pub offense: RawDiagnostic,
    pub location: TemplateLocation,
}

/// Places analyzer offenses in the template they were extracted from.
#[derive(Debug, Clone, Copy)]
pub struct LocationTranslator<'a> {
    source_map: &'a SourceMap,
    last_line: usize,
}

impl<'a> LocationTranslator<'a> {
    /// `last_line` is the last line of the template, used for offenses on
    /// fragment lines the map does not cover.
    pub fn new(source_map: &'a SourceMap, last_line: usize) -> Self {
        Self { source_map, last_line }
    }

    /// Build a translator for `template`.
    pub fn for_template(source_map: &'a SourceMap, template: &str) -> Self {
        Self::new(source_map, template.lines().count().max(1))
    }

    pub fn translate(&self, offense: &RawDiagnostic) -> TemplateLocation {
        let Some(start_anchor) = self.source_map.get(offense.line) else {
            // Synthetic fragment lines have no template position; this loses
            // precision for templates with several code regions.
            log::debug!(
                "{} reported on unmapped fragment line {}, reporting at line {}",
                offense.rule,
                offense.line,
                self.last_line
            );
            return TemplateLocation::point(self.last_line, 0);
        };

        let start = start_anchor.adjust(offense.column).with_length(offense.length);
        let end = self
            .source_map
            .get(offense.last_line)
            .map(|anchor| anchor.adjust(offense.last_column))
            .unwrap_or(start);

        start.merge(end)
    }

    pub fn translate_all(&self, offenses: Vec<RawDiagnostic>) -> Vec<TranslatedOffense> {
        offenses
            .into_iter()
            .map(|offense| TranslatedOffense {
                location: self.translate(&offense),
                offense,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::AnalyzerSeverity;
    use crate::source_map::Anchor;
    use pretty_assertions::assert_eq;

    fn map() -> SourceMap {
        [(1, Anchor::new(5, 0)), (3, Anchor::new(7, 0)), (4, Anchor::new(8, 6))]
            .into_iter()
            .collect()
    }

    fn offense(line: usize, column: usize, last_line: usize, last_column: usize, length: usize) -> RawDiagnostic {
        RawDiagnostic {
            rule: "Style/Foo".to_string(),
            message: "Bad at 1, 2".to_string(),
            severity: AnalyzerSeverity::Convention,
            line,
            column,
            last_line,
            last_column,
            length,
        }
    }

    #[test]
    fn test_mapped_single_line() {
        let map = map();
        let translator = LocationTranslator::new(&map, 20);
        let location = translator.translate(&offense(1, 2, 1, 5, 3));
        assert_eq!(
            location,
            TemplateLocation {
                line: 5,
                column: 2,
                end_line: Some(5),
                end_column: Some(5),
                length: Some(3),
            }
        );
    }

    #[test]
    fn test_mapped_multi_line_translates_each_end() {
        let map = map();
        let translator = LocationTranslator::new(&map, 20);
        let location = translator.translate(&offense(3, 4, 4, 2, 0));
        assert_eq!(location.line, 7);
        assert_eq!(location.column, 4);
        assert_eq!(location.end_line, Some(8));
        assert_eq!(location.end_column, Some(8));
    }

    #[test]
    fn test_unmapped_start_falls_back_to_last_line() {
        let map = map();
        let translator = LocationTranslator::new(&map, 20);
        assert_eq!(translator.translate(&offense(2, 9, 2, 12, 4)), TemplateLocation::point(20, 0));
    }

    #[test]
    fn test_unmapped_end_collapses_onto_start() {
        let map = map();
        let translator = LocationTranslator::new(&map, 20);
        let location = translator.translate(&offense(1, 3, 2, 1, 0));
        assert_eq!(location.end_line, Some(5));
        assert_eq!(location.end_column, Some(3));
    }

    #[test]
    fn test_for_template_counts_lines() {
        let map = SourceMap::new();
        let translator = LocationTranslator::for_template(&map, "a\nb\nc\n");
        assert_eq!(translator.translate(&offense(1, 1, 1, 1, 1)), TemplateLocation::point(3, 0));
    }
}
