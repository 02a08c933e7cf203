use anyhow::{Context, Result};
use clap::Parser;
use colored::*;
use erbcop_lib::config::Config;
use erbcop_lib::exit_codes;
use erbcop_lib::output::{OutputFormat, OutputWriter, format_all_diagnostics_as_json};
use erbcop_lib::{Diagnostic, Document, LintBridge};
use ignore::WalkBuilder;
use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// File extension of templates picked up when walking directories.
const TEMPLATE_EXTENSION: &str = "erb";

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Templates or directories to lint. Use `-` to read one template from stdin.
    #[arg(required = true)]
    paths: Vec<String>,

    /// Configuration file path (default: .erbcop.toml in the current directory)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Output format: text or json
    #[arg(long, default_value = "text")]
    output_format: String,

    /// File name to report for the template read from stdin
    #[arg(long)]
    stdin_filename: Option<PathBuf>,

    /// Disable colored output
    #[arg(long)]
    no_color: bool,

    /// Show debug logging
    #[arg(short, long)]
    verbose: bool,

    /// Only print errors
    #[arg(short, long)]
    quiet: bool,
}

/// Where a template comes from.
enum Source {
    Stdin,
    File(PathBuf),
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format_timestamp(None)
        .init();
}

/// Expand the command line into individual templates.
fn collect_sources(paths: &[String]) -> Vec<Source> {
    let mut sources = Vec::new();

    for raw in paths {
        if raw == "-" {
            sources.push(Source::Stdin);
            continue;
        }

        let path = Path::new(raw);
        if !path.is_dir() {
            // Explicit files are linted whatever their extension
            sources.push(Source::File(path.to_path_buf()));
            continue;
        }

        for entry in WalkBuilder::new(path).build() {
            match entry {
                Ok(entry) => {
                    let entry_path = entry.path();
                    if entry.file_type().is_some_and(|ft| ft.is_file())
                        && entry_path.extension().is_some_and(|ext| ext == TEMPLATE_EXTENSION)
                    {
                        sources.push(Source::File(entry_path.to_path_buf()));
                    }
                }
                Err(e) => log::warn!("Skipping unreadable entry under {raw}: {e}"),
            }
        }
    }

    sources
}

fn lint_source(bridge: &LintBridge, source: &Source, stdin_filename: Option<&Path>) -> (String, Result<Vec<Diagnostic>>) {
    match source {
        Source::Stdin => {
            let name = stdin_filename.map_or_else(|| "<stdin>".to_string(), |p| p.display().to_string());
            let mut content = String::new();
            let result = io::stdin()
                .read_to_string(&mut content)
                .context("failed to read template from stdin")
                .and_then(|_| {
                    bridge
                        .lint(&Document::new(stdin_filename, &content))
                        .with_context(|| format!("failed to lint {name}"))
                });
            (name, result)
        }
        Source::File(path) => {
            let name = path.display().to_string();
            let result = fs::read_to_string(path)
                .with_context(|| format!("failed to read {name}"))
                .and_then(|content| {
                    bridge
                        .lint(&Document::new(Some(path.as_path()), &content))
                        .with_context(|| format!("failed to lint {name}"))
                });
            (name, result)
        }
    }
}

fn run(cli: &Cli) -> Result<i32> {
    let output_format: OutputFormat = cli.output_format.parse().map_err(anyhow::Error::msg)?;
    let cwd = std::env::current_dir().context("failed to determine current directory")?;
    let config = Config::load(cli.config.as_deref(), &cwd)?;
    let writer = OutputWriter::new(cli.quiet);

    if !config.linters.rubocop.enabled {
        log::info!("RuboCop linter disabled in configuration");
        return Ok(exit_codes::SUCCESS);
    }

    let bridge = LintBridge::from_config(&config.linters.rubocop);
    let sources = collect_sources(&cli.paths);
    let stdin_filename = cli.stdin_filename.as_deref();

    #[cfg(feature = "parallel")]
    let results: Vec<(String, Result<Vec<Diagnostic>>)> = sources
        .par_iter()
        .map(|source| lint_source(&bridge, source, stdin_filename))
        .collect();
    #[cfg(not(feature = "parallel"))]
    let results: Vec<(String, Result<Vec<Diagnostic>>)> = sources
        .iter()
        .map(|source| lint_source(&bridge, source, stdin_filename))
        .collect();

    let mut linted = Vec::with_capacity(results.len());
    let mut tool_error = false;
    for (name, result) in results {
        match result {
            Ok(diagnostics) => linted.push((name, diagnostics)),
            Err(e) => {
                tool_error = true;
                writer.write_error(&format!("{}: {e:#}", "Error".red().bold()))?;
            }
        }
    }

    let offenses_found = linted.iter().any(|(_, diagnostics)| !diagnostics.is_empty());
    match output_format {
        OutputFormat::Json => writer.writeln(&format_all_diagnostics_as_json(&linted))?,
        OutputFormat::Text => {
            let formatter = output_format.create_formatter(!cli.no_color);
            for (name, diagnostics) in &linted {
                writer.writeln(&formatter.format_diagnostics(diagnostics, name))?;
            }
        }
    }

    Ok(exit_codes::for_run(offenses_found, tool_error))
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    if cli.no_color {
        colored::control::set_override(false);
    }

    let code = match run(&cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{}: {e:#}", "Error".red().bold());
            exit_codes::TOOL_ERROR
        }
    };
    std::process::exit(code);
}
