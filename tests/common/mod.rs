//! Shared helpers for integration tests.
#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

/// A stand-in for the `rubocop` executable.
///
/// It records its arguments and stdin next to itself, prints a canned report
/// and exits with a chosen code. It is run through `sh` so the script never
/// needs to be executable.
pub struct FakeRubocop {
    pub dir: PathBuf,
    pub script: PathBuf,
}

impl FakeRubocop {
    pub fn new(dir: &Path, report: &str, exit_code: i32) -> Self {
        fs::write(dir.join("report.json"), report).unwrap();
        let script = dir.join("fake-rubocop.sh");
        fs::write(
            &script,
            format!(
                "#!/bin/sh\n\
                 here=$(dirname \"$0\")\n\
                 cat > \"$here/stdin.txt\"\n\
                 printf '%s\\n' \"$@\" > \"$here/args.txt\"\n\
                 cat \"$here/report.json\"\n\
                 echo 'fake rubocop stderr' >&2\n\
                 exit {exit_code}\n"
            ),
        )
        .unwrap();
        Self {
            dir: dir.to_path_buf(),
            script,
        }
    }

    /// A RuboCop that dies on startup, the way a broken `--config` makes it,
    /// without reading any of its stdin.
    pub fn failing_early(dir: &Path, message: &str, exit_code: i32) -> Self {
        let script = dir.join("fake-rubocop.sh");
        fs::write(&script, format!("#!/bin/sh\necho '{message}' >&2\nexit {exit_code}\n")).unwrap();
        Self {
            dir: dir.to_path_buf(),
            script,
        }
    }

    /// Command vector for `RubocopInvoker` / the `command` config key.
    pub fn command(&self) -> Vec<String> {
        vec!["sh".to_string(), self.script.display().to_string()]
    }

    pub fn was_invoked(&self) -> bool {
        self.dir.join("args.txt").exists()
    }

    pub fn args(&self) -> Vec<String> {
        fs::read_to_string(self.dir.join("args.txt"))
            .unwrap()
            .lines()
            .map(String::from)
            .collect()
    }

    pub fn stdin(&self) -> String {
        fs::read_to_string(self.dir.join("stdin.txt")).unwrap()
    }
}

/// A RuboCop JSON report with one offense per `(cop, line, column, last_column, message)`.
pub fn report(offenses: &[(&str, usize, usize, usize, &str)]) -> String {
    let offenses: Vec<serde_json::Value> = offenses
        .iter()
        .map(|(cop, line, column, last_column, message)| {
            serde_json::json!({
                "severity": "convention",
                "message": message,
                "cop_name": cop,
                "corrected": false,
                "correctable": false,
                "location": {
                    "start_line": line,
                    "start_column": column,
                    "last_line": line,
                    "last_column": last_column,
                    "length": last_column - column + 1,
                    "line": line,
                    "column": column
                }
            })
        })
        .collect();
    serde_json::json!({
        "metadata": {"rubocop_version": "1.60.0"},
        "files": [{"path": "fragment.rb", "offenses": offenses}],
        "summary": {"offense_count": offenses.len()}
    })
    .to_string()
}
