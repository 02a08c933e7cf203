//! Mapping from extracted fragment lines back to template positions.
//!
//! A [`SourceMap`] is produced once by an extractor, read by the bridge for one
//! lint pass, and dropped. Gaps are legal: fragment lines the extractor
//! synthesized (wrappers, padding) have no template counterpart.

use crate::location::TemplateLocation;
use std::collections::BTreeMap;

/// Template position of the first character of one fragment line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Anchor {
    /// Template line (1-indexed).
    pub line: usize,
    /// Offset in the template line where the fragment line begins.
    pub column: usize,
}

impl Anchor {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }

    /// Shift the anchor by a column inside the fragment line.
    pub fn adjust(&self, column: usize) -> TemplateLocation {
        TemplateLocation::point(self.line, self.column + column)
    }
}

/// Fragment line number (1-indexed) to [`Anchor`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SourceMap {
    anchors: BTreeMap<usize, Anchor>,
}

impl SourceMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the anchor for `fragment_line`, replacing any previous one.
    pub fn insert(&mut self, fragment_line: usize, anchor: Anchor) {
        self.anchors.insert(fragment_line, anchor);
    }

    pub fn get(&self, fragment_line: usize) -> Option<&Anchor> {
        self.anchors.get(&fragment_line)
    }

    pub fn len(&self) -> usize {
        self.anchors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.anchors.is_empty()
    }
}

impl FromIterator<(usize, Anchor)> for SourceMap {
    fn from_iter<I: IntoIterator<Item = (usize, Anchor)>>(iter: I) -> Self {
        Self {
            anchors: iter.into_iter().collect(),
        }
    }
}
