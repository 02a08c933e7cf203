//! The RuboCop lint pass for one template.
//!
//! A pass moves through extraction, analysis, translation, filtering and
//! emission in that order. An empty fragment ends the pass right after
//! extraction without starting the analyzer. Extraction and analyzer failures
//! abort the pass; everything after analysis is infallible.

use crate::analyzer::{Analyzer, AnalyzerError, AnalyzerSeverity, OffenseCollector, RubocopInvoker, stdin_filename};
use crate::config::RubocopConfig;
use crate::extractor::{ErbExtractor, ExtractError, Extractor};
use crate::filter::{SuppressionSet, filter_suppressed};
use crate::location::TemplateLocation;
use crate::translate::{LocationTranslator, TranslatedOffense};
use regex::Regex;
use serde::Serialize;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;
use thiserror::Error;

/// Name under which every diagnostic of this bridge is reported.
pub const LINTER_NAME: &str = "RuboCop";

/// Fragment coordinates RuboCop embeds in some messages (e.g. alignment cops).
static FRAGMENT_POSITION_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r" at [0-9]+, [0-9]+").expect("valid fragment position regex"));

#[derive(Debug, Error)]
pub enum BridgeError {
    #[error("failed to extract Ruby")]
    Extract(#[from] ExtractError),
    #[error(transparent)]
    Analyzer(#[from] AnalyzerError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Warning,
    Error,
}

impl From<AnalyzerSeverity> for Severity {
    fn from(severity: AnalyzerSeverity) -> Self {
        match severity {
            AnalyzerSeverity::Info => Severity::Info,
            AnalyzerSeverity::Refactor | AnalyzerSeverity::Convention | AnalyzerSeverity::Warning => {
                Severity::Warning
            }
            AnalyzerSeverity::Error | AnalyzerSeverity::Fatal => Severity::Error,
        }
    }
}

/// A template to lint.
#[derive(Debug, Clone, Copy)]
pub struct Document<'a> {
    /// Where the template came from, if it has a file.
    pub path: Option<&'a Path>,
    pub content: &'a str,
}

impl<'a> Document<'a> {
    pub fn new(path: Option<&'a Path>, content: &'a str) -> Self {
        Self { path, content }
    }

    /// Identity used in reports.
    pub fn display_name(&self) -> String {
        match self.path {
            Some(path) => path.display().to_string(),
            None => "<stdin>".to_string(),
        }
    }
}

/// A RuboCop offense placed in the template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    /// Always [`LINTER_NAME`].
    pub linter: &'static str,
    /// The cop that produced the offense.
    pub cop: String,
    /// The template the offense belongs to.
    pub document: Option<PathBuf>,
    pub location: TemplateLocation,
    pub message: String,
    pub severity: Severity,
}

impl Diagnostic {
    /// `RuboCop:Style/StringLiterals`
    pub fn rule_name(&self) -> String {
        format!("{}:{}", self.linter, self.cop)
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{}] {}", self.location, self.rule_name(), self.message)
    }
}

/// Strip every ` at <line>, <column>` RuboCop wrote in fragment coordinates.
pub fn normalize_message(message: &str) -> String {
    FRAGMENT_POSITION_REGEX.replace_all(message, "").into_owned()
}

/// Runs RuboCop over the Ruby embedded in templates.
pub struct LintBridge {
    extractor: Box<dyn Extractor>,
    analyzer: Box<dyn Analyzer>,
    suppressed: SuppressionSet,
}

impl LintBridge {
    pub fn new(extractor: Box<dyn Extractor>, analyzer: Box<dyn Analyzer>, suppressed: SuppressionSet) -> Self {
        Self {
            extractor,
            analyzer,
            suppressed,
        }
    }

    /// ERB extraction and the RuboCop binary from `config`, honouring the
    /// config override environment variable.
    pub fn from_config(config: &RubocopConfig) -> Self {
        Self::new(
            Box::new(ErbExtractor::new()),
            Box::new(RubocopInvoker::from_env(config.command.clone())),
            config.suppression_set(),
        )
    }

    /// Lint one template.
    pub fn lint(&self, document: &Document<'_>) -> Result<Vec<Diagnostic>, BridgeError> {
        let extraction = self.extractor.extract(document.content)?;
        if extraction.is_blank() {
            log::debug!("No Ruby in {}, skipping RuboCop", document.display_name());
            return Ok(Vec::new());
        }

        let mut collector = OffenseCollector::new();
        self.analyzer
            .analyze(&extraction.source, &stdin_filename(document.path), &mut collector)?;
        let offenses = collector.into_offenses();
        log::debug!("RuboCop reported {} offense(s) for {}", offenses.len(), document.display_name());

        let translator = LocationTranslator::for_template(&extraction.source_map, document.content);
        let translated = translator.translate_all(offenses);
        let kept = filter_suppressed(translated, &self.suppressed);

        Ok(kept.into_iter().map(|t| self.emit(document, t)).collect())
    }

    fn emit(&self, document: &Document<'_>, translated: TranslatedOffense) -> Diagnostic {
        let TranslatedOffense { offense, location } = translated;
        Diagnostic {
            linter: LINTER_NAME,
            cop: offense.rule,
            document: document.path.map(Path::to_path_buf),
            location,
            message: normalize_message(&offense.message),
            severity: offense.severity.into(),
        }
    }
}
