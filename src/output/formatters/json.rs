//! JSON output formatter

use crate::bridge::Diagnostic;
use crate::output::OutputFormatter;
use serde_json::{Value, json};

/// JSON formatter for machine-readable output
#[derive(Default)]
pub struct JsonFormatter;

impl JsonFormatter {
    pub fn new() -> Self {
        Self
    }
}

fn diagnostic_to_json(diagnostic: &Diagnostic, file_path: &str) -> Value {
    json!({
        "file": file_path,
        "line": diagnostic.location.line,
        "column": diagnostic.location.column,
        "end_line": diagnostic.location.end_line,
        "end_column": diagnostic.location.end_column,
        "length": diagnostic.location.length,
        "linter": diagnostic.linter,
        "cop": diagnostic.cop,
        "message": diagnostic.message,
        "severity": diagnostic.severity,
    })
}

impl OutputFormatter for JsonFormatter {
    fn format_diagnostics(&self, diagnostics: &[Diagnostic], file_path: &str) -> String {
        let values: Vec<Value> = diagnostics.iter().map(|d| diagnostic_to_json(d, file_path)).collect();
        serde_json::to_string_pretty(&values).unwrap_or_default()
    }
}

/// Format the diagnostics of several files as one JSON array
pub fn format_all_diagnostics_as_json(all: &[(String, Vec<Diagnostic>)]) -> String {
    let values: Vec<Value> = all
        .iter()
        .flat_map(|(file_path, diagnostics)| diagnostics.iter().map(move |d| diagnostic_to_json(d, file_path)))
        .collect();
    serde_json::to_string_pretty(&values).unwrap_or_default()
}
