//! RuboCop subprocess execution.
//!
//! The fragment is piped to `rubocop --stdin <name>`, so nothing is written to
//! disk and the process-wide stdin of this program is never touched. Each call
//! owns its child process and pipes.

use super::collector::OffenseCollector;
use super::{Analyzer, AnalyzerError};
use std::io::{ErrorKind, Read, Write};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::thread;

/// Environment variable naming a RuboCop config file to force with `--config`.
pub const CONFIG_ENV_VAR: &str = "ERBCOP_RUBOCOP_CONFIG";

/// Script name used when the template has no file name.
pub const PLACEHOLDER_SCRIPT_NAME: &str = "ruby_script.rb";

/// Synthetic file name RuboCop sees for a template's fragment.
///
/// `app/views/show.html.erb` becomes `app/views/show.html.erb.rb`, which keeps
/// path-based `Include`/`Exclude` rules working while selecting Ruby cops.
pub fn stdin_filename(document: Option<&Path>) -> String {
    match document {
        Some(path) => format!("{}.rb", path.display()),
        None => PLACEHOLDER_SCRIPT_NAME.to_string(),
    }
}

/// Runs the RuboCop executable.
#[derive(Debug, Clone)]
pub struct RubocopInvoker {
    /// Program and leading arguments, e.g. `["bundle", "exec", "rubocop"]`.
    command: Vec<String>,
    /// Forced `--config` file.
    config_override: Option<PathBuf>,
}

impl RubocopInvoker {
    pub fn new(command: Vec<String>) -> Self {
        Self {
            command,
            config_override: None,
        }
    }

    /// Create an invoker that honours [`CONFIG_ENV_VAR`].
    pub fn from_env(command: Vec<String>) -> Self {
        let config_override = std::env::var_os(CONFIG_ENV_VAR)
            .filter(|value| !value.is_empty())
            .map(PathBuf::from);
        Self {
            command,
            config_override,
        }
    }

    pub fn with_config_override(mut self, path: Option<PathBuf>) -> Self {
        self.config_override = path;
        self
    }

    pub fn config_override(&self) -> Option<&Path> {
        self.config_override.as_deref()
    }

    /// Arguments passed after the program name.
    pub fn args(&self, filename: &str) -> Vec<String> {
        let mut args: Vec<String> = self.command.iter().skip(1).cloned().collect();
        args.extend(["--format", "json", "--no-display-cop-names"].map(String::from));
        if let Some(config) = &self.config_override {
            args.push("--config".to_string());
            args.push(config.display().to_string());
        }
        args.push("--stdin".to_string());
        args.push(filename.to_string());
        args
    }

    fn run(&self, source: &str, filename: &str) -> Result<String, AnalyzerError> {
        let Some(tool) = self.command.first() else {
            return Err(AnalyzerError::EmptyCommand);
        };
        let args = self.args(filename);
        log::debug!("Running {tool} {}", args.join(" "));

        let mut child = Command::new(tool)
            .args(&args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| match e.kind() {
                ErrorKind::NotFound => AnalyzerError::NotFound { tool: tool.clone() },
                _ => AnalyzerError::Spawn {
                    tool: tool.clone(),
                    source: e,
                },
            })?;

        // Drain both pipes concurrently so a chatty analyzer cannot block on a full pipe
        let stdout_handle = child
            .stdout
            .take()
            .map(|stdout| thread::spawn(move || read_pipe_to_string(stdout)));
        let stderr_handle = child
            .stderr
            .take()
            .map(|stderr| thread::spawn(move || read_pipe_to_string(stderr)));

        if let Some(mut stdin) = child.stdin.take() {
            let written = stdin.write_all(source.as_bytes());
            // Closing stdin signals end of input
            drop(stdin);
            match written {
                Ok(()) => {}
                // The analyzer quit without reading everything; its exit status says why
                Err(e) if e.kind() == ErrorKind::BrokenPipe => {
                    log::debug!("'{tool}' closed stdin before reading the whole fragment");
                }
                Err(e) => {
                    let _ = child.kill();
                    let _ = child.wait();
                    let _ = join_reader(stdout_handle);
                    let _ = join_reader(stderr_handle);
                    return Err(AnalyzerError::Io {
                        message: format!("Failed to write to stdin of '{tool}': {e}"),
                    });
                }
            }
        }

        let status = child.wait().map_err(|e| AnalyzerError::Io {
            message: format!("Failed to wait for '{tool}': {e}"),
        })?;
        let stdout = join_reader(stdout_handle).map_err(|message| AnalyzerError::Io { message })?;
        let stderr = join_reader(stderr_handle).map_err(|message| AnalyzerError::Io { message })?;

        // RuboCop exits 0 when clean and 1 when offenses were found; anything else is a crash
        match status.code() {
            Some(0) | Some(1) => Ok(stdout),
            code => Err(AnalyzerError::Failed {
                tool: tool.clone(),
                exit_code: code.unwrap_or(-1),
                stderr: stderr.trim().to_string(),
            }),
        }
    }
}

impl Default for RubocopInvoker {
    fn default() -> Self {
        Self::new(vec!["rubocop".to_string()])
    }
}

impl Analyzer for RubocopInvoker {
    fn analyze(&self, source: &str, filename: &str, sink: &mut OffenseCollector) -> Result<(), AnalyzerError> {
        sink.started();
        let report = self.run(source, filename)?;
        sink.receive_json(&report)
    }
}

fn read_pipe_to_string<R: Read>(mut pipe: R) -> std::io::Result<String> {
    let mut buf = Vec::new();
    pipe.read_to_end(&mut buf)?;
    Ok(String::from_utf8_lossy(&buf).to_string())
}

fn join_reader(handle: Option<thread::JoinHandle<std::io::Result<String>>>) -> Result<String, String> {
    match handle {
        Some(handle) => match handle.join() {
            Ok(res) => res.map_err(|e| format!("Failed to read output: {e}")),
            Err(_) => Err("Output reader thread panicked".to_string()),
        },
        None => Ok(String::new()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_stdin_filename() {
        assert_eq!(
            stdin_filename(Some(Path::new("app/views/show.html.erb"))),
            "app/views/show.html.erb.rb"
        );
        assert_eq!(stdin_filename(None), "ruby_script.rb");
    }

    #[test]
    fn test_args_without_override() {
        let invoker = RubocopInvoker::default();
        assert_eq!(
            invoker.args("a.erb.rb"),
            vec!["--format", "json", "--no-display-cop-names", "--stdin", "a.erb.rb"]
        );
    }

    #[test]
    fn test_args_with_override_and_wrapper() {
        let invoker = RubocopInvoker::new(vec!["bundle".into(), "exec".into(), "rubocop".into()])
            .with_config_override(Some(PathBuf::from("/etc/rubocop.yml")));
        assert_eq!(
            invoker.args("x.rb"),
            vec![
                "exec",
                "rubocop",
                "--format",
                "json",
                "--no-display-cop-names",
                "--config",
                "/etc/rubocop.yml",
                "--stdin",
                "x.rb"
            ]
        );
    }

    #[test]
    fn test_empty_command() {
        let invoker = RubocopInvoker::new(vec![]);
        let mut sink = OffenseCollector::new();
        let err = invoker.analyze("x = 1\n", "x.rb", &mut sink).unwrap_err();
        assert!(matches!(err, AnalyzerError::EmptyCommand));
    }

    #[test]
    fn test_tool_not_found() {
        let invoker = RubocopInvoker::new(vec!["nonexistent-rubocop-xyz123".to_string()]);
        let mut sink = OffenseCollector::new();
        let err = invoker.analyze("x = 1\n", "x.rb", &mut sink).unwrap_err();
        assert!(matches!(err, AnalyzerError::NotFound { .. }));
    }
}
