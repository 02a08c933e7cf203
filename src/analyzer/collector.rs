//! Result sink for a single analyzer run.

use super::AnalyzerError;
use super::offense::{JsonReport, RawDiagnostic};

/// Accumulates the offenses of one invocation.
///
/// Each lint pass owns its own collector and hands it to
/// [`Analyzer::analyze`](super::Analyzer::analyze), so there is no shared
/// buffer between documents.
#[derive(Debug, Default)]
pub struct OffenseCollector {
    offenses: Vec<RawDiagnostic>,
}

impl OffenseCollector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Called when an invocation starts. Drops anything from a previous run.
    pub fn started(&mut self) {
        self.offenses.clear();
    }

    /// Called once scanning has finished with everything reported for the run.
    pub fn file_finished<I>(&mut self, offenses: I)
    where
        I: IntoIterator<Item = RawDiagnostic>,
    {
        self.offenses.extend(offenses);
    }

    /// Decode a `--format json` report and record its offenses.
    pub fn receive_json(&mut self, report: &str) -> Result<(), AnalyzerError> {
        let report = JsonReport::parse(report)?;
        self.file_finished(report.into_offenses());
        Ok(())
    }

    pub fn offenses(&self) -> &[RawDiagnostic] {
        &self.offenses
    }

    pub fn into_offenses(self) -> Vec<RawDiagnostic> {
        self.offenses
    }
}
