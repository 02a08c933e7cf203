//! Dropping offenses from ignored cops.

use crate::translate::TranslatedOffense;
use std::collections::HashSet;

/// Cop names whose offenses are discarded. Matching is exact.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SuppressionSet {
    cops: HashSet<String>,
}

impl SuppressionSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, cop: &str) -> bool {
        self.cops.contains(cop)
    }

    pub fn len(&self) -> usize {
        self.cops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cops.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for SuppressionSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            cops: iter.into_iter().map(Into::into).collect(),
        }
    }
}

/// Remove offenses whose cop is suppressed, keeping the order of the rest.
pub fn filter_suppressed(mut offenses: Vec<TranslatedOffense>, suppressed: &SuppressionSet) -> Vec<TranslatedOffense> {
    if !suppressed.is_empty() {
        offenses.retain(|translated| !suppressed.contains(&translated.offense.rule));
    }
    offenses
}
