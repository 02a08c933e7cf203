//! Running RuboCop over an extracted fragment.
//!
//! The [`Analyzer`] trait is the seam between the bridge and whatever actually
//! executes RuboCop. [`RubocopInvoker`] runs the real binary as a subprocess,
//! feeding the fragment through its stdin. Results always flow into an
//! [`OffenseCollector`] owned by the caller, so concurrent invocations never
//! share state.

pub mod collector;
pub mod invoker;
pub mod offense;

pub use collector::OffenseCollector;
pub use invoker::{CONFIG_ENV_VAR, PLACEHOLDER_SCRIPT_NAME, RubocopInvoker, stdin_filename};
pub use offense::{AnalyzerSeverity, RawDiagnostic};

use thiserror::Error;

/// Failure to obtain results from the analyzer.
///
/// These are environment problems, not lint findings, and are never masked.
#[derive(Debug, Error)]
pub enum AnalyzerError {
    #[error("analyzer '{tool}' not found in PATH")]
    NotFound { tool: String },
    #[error("failed to spawn '{tool}': {source}")]
    Spawn {
        tool: String,
        #[source]
        source: std::io::Error,
    },
    #[error("I/O error talking to analyzer: {message}")]
    Io { message: String },
    #[error("analyzer '{tool}' failed with exit code {exit_code}: {stderr}")]
    Failed { tool: String, exit_code: i32, stderr: String },
    #[error("analyzer produced a malformed report: {source}")]
    MalformedReport {
        #[from]
        source: serde_json::Error,
    },
    #[error("no analyzer command configured")]
    EmptyCommand,
}

/// Something that can analyze a Ruby buffer.
pub trait Analyzer: Send + Sync {
    /// Analyze `source` as if it were the file `filename`, reporting into `sink`.
    ///
    /// `filename` only selects per-file configuration; nothing is read from disk.
    fn analyze(&self, source: &str, filename: &str, sink: &mut OffenseCollector) -> Result<(), AnalyzerError>;
}
