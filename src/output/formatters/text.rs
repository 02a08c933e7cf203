//! Default text output formatter with colors

use crate::bridge::{Diagnostic, Severity};
use crate::output::OutputFormatter;
use colored::*;

/// Default human-readable formatter with colors
pub struct TextFormatter {
    use_colors: bool,
}

impl Default for TextFormatter {
    fn default() -> Self {
        Self { use_colors: true }
    }
}

impl TextFormatter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn without_colors() -> Self {
        Self { use_colors: false }
    }
}

impl OutputFormatter for TextFormatter {
    fn format_diagnostics(&self, diagnostics: &[Diagnostic], file_path: &str) -> String {
        let lines: Vec<String> = diagnostics
            .iter()
            .map(|diagnostic| {
                let rule = format!("[{}]", diagnostic.rule_name());
                let line = diagnostic.location.line.to_string();
                let column = diagnostic.location.column.to_string();

                if !self.use_colors {
                    return format!("{file_path}:{line}:{column}: {rule} {}", diagnostic.message);
                }

                let rule = match diagnostic.severity {
                    Severity::Error => rule.red().to_string(),
                    Severity::Warning => rule.yellow().to_string(),
                    Severity::Info => rule.dimmed().to_string(),
                };
                format!(
                    "{}:{}:{}: {} {}",
                    file_path.blue().underline(),
                    line.cyan(),
                    column.cyan(),
                    rule,
                    diagnostic.message
                )
            })
            .collect();

        lines.join("\n")
    }

    fn use_colors(&self) -> bool {
        self.use_colors
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bridge::LINTER_NAME;
    use crate::location::TemplateLocation;

    fn diagnostic(line: usize, column: usize, cop: &str, message: &str) -> Diagnostic {
        Diagnostic {
            linter: LINTER_NAME,
            cop: cop.to_string(),
            document: None,
            location: TemplateLocation::point(line, column),
            message: message.to_string(),
            severity: Severity::Warning,
        }
    }

    #[test]
    fn test_format_empty() {
        let formatter = TextFormatter::without_colors();
        assert_eq!(formatter.format_diagnostics(&[], "show.html.erb"), "");
    }

    #[test]
    fn test_format_without_colors() {
        let formatter = TextFormatter::without_colors();
        let output = formatter.format_diagnostics(
            &[
                diagnostic(5, 2, "Style/StringLiterals", "Prefer single-quoted strings."),
                diagnostic(9, 0, "Lint/Syntax", "unexpected token"),
            ],
            "show.html.erb",
        );
        assert_eq!(
            output,
            "show.html.erb:5:2: [RuboCop:Style/StringLiterals] Prefer single-quoted strings.\n\
             show.html.erb:9:0: [RuboCop:Lint/Syntax] unexpected token"
        );
    }
}
