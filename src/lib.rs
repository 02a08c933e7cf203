//! Lint the Ruby embedded in ERB templates with RuboCop.
//!
//! The template is reduced to a Ruby fragment plus a [`SourceMap`], the fragment
//! is piped through RuboCop, and every offense is moved back to the template
//! line and column it came from.

pub mod analyzer;
pub mod bridge;
pub mod config;
pub mod exit_codes;
pub mod extractor;
pub mod filter;
pub mod location;
pub mod output;
pub mod source_map;
pub mod translate;

pub use analyzer::{Analyzer, AnalyzerError, OffenseCollector, RawDiagnostic, RubocopInvoker};
pub use bridge::{BridgeError, Diagnostic, Document, LINTER_NAME, LintBridge, Severity, normalize_message};
pub use config::{Config, ConfigError};
pub use extractor::{ErbExtractor, ExtractError, Extraction, Extractor};
pub use filter::SuppressionSet;
pub use location::TemplateLocation;
pub use source_map::{Anchor, SourceMap};
pub use translate::LocationTranslator;

/// Lint one template with the RuboCop settings from `config`.
///
/// Returns no diagnostics when the RuboCop linter is disabled.
pub fn lint_document(document: &Document<'_>, config: &Config) -> Result<Vec<Diagnostic>, BridgeError> {
    if !config.linters.rubocop.enabled {
        return Ok(Vec::new());
    }
    LintBridge::from_config(&config.linters.rubocop).lint(document)
}
