//! as3ts: parse ActionScript files into syntax trees.
//!
//! Usage:
//!   as3ts [options] [file...]
//!
//! Each file is parsed on its own arena, in parallel. Trees are printed, or
//! written to `--out-dir` for the code generator.

mod project;
mod report;

use std::fs;
use std::path::{Path, PathBuf};
use std::process;
use std::time::Instant;

use as3ts_core::arena::CompilerArena;
use as3ts_core::text::LineMap;
use as3ts_diagnostics::{messages, Diagnostic};
use clap::Parser as ClapParser;
use rayon::prelude::*;
use tracing::{debug, info};

use crate::project::{OutputFormat, Overrides, Settings};

#[derive(ClapParser, Debug)]
#[command(name = "as3ts", version, about = "Parse ActionScript 3 sources into syntax trees")]
struct Cli {
    /// ActionScript files to parse.
    #[arg(value_name = "FILE")]
    files: Vec<String>,

    /// Path to an as3ts.json project file.
    #[arg(short = 'p', long = "project")]
    project: Option<String>,

    /// Output format for parsed trees.
    #[arg(long, value_enum)]
    format: Option<OutputFormat>,

    /// Write one output file per input into this directory.
    #[arg(long = "out-dir")]
    out_dir: Option<String>,

    /// Log parser progress at debug level.
    #[arg(short = 'v', long)]
    verbose: bool,
}

/// What happened to one input file. Collected from the worker threads and
/// printed in input order.
struct FileOutcome {
    /// Scanner warnings, already formatted.
    warnings: Vec<String>,
    /// The tree, when it goes to stdout.
    output: Option<String>,
    /// A formatted error, when the file failed.
    error: Option<String>,
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let overrides = Overrides {
        files: cli.files,
        project: cli.project,
        out_dir: cli.out_dir,
        format: cli.format,
    };
    let settings = match Settings::resolve(overrides) {
        Ok(settings) => settings,
        Err(err) => {
            report::print_error(&err.to_string());
            process::exit(1);
        }
    };

    process::exit(run(&settings));
}

fn init_tracing(verbose: bool) {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if verbose {
        EnvFilter::new("debug")
    } else {
        return;
    };
    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true).with_level(true).with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn run(settings: &Settings) -> i32 {
    let start = Instant::now();
    let color = report::use_color();

    if let Some(dir) = &settings.out_dir {
        if let Err(err) = fs::create_dir_all(dir) {
            report::print_error(&format!("cannot create '{}': {}", dir.display(), err));
            return 1;
        }
    }

    let outcomes: Vec<FileOutcome> = settings
        .files
        .par_iter()
        .map(|path| process_file(path, settings, color))
        .collect();

    let mut failed = 0;
    for outcome in &outcomes {
        for warning in &outcome.warnings {
            eprintln!("{warning}");
        }
        if let Some(output) = &outcome.output {
            println!("{output}");
        }
        if let Some(error) = &outcome.error {
            eprint!("{error}");
            failed += 1;
        }
    }

    info!(
        files = settings.files.len(),
        failed,
        elapsed_ms = start.elapsed().as_millis() as u64,
        "done"
    );

    if failed > 0 {
        eprintln!("{}", report::summary(failed, color));
        2
    } else {
        0
    }
}

fn process_file(path: &Path, settings: &Settings, color: bool) -> FileOutcome {
    let file_name = path.display().to_string();
    let mut outcome = FileOutcome { warnings: Vec::new(), output: None, error: None };

    let source = match fs::read_to_string(path) {
        Ok(source) => source,
        Err(err) => {
            let diagnostic = Diagnostic::new(
                &messages::CANNOT_READ_FILE_0_COLON_1,
                &[&file_name, &err.to_string()],
            );
            outcome.error = Some(format!("{}\n", report::format_diagnostic(&diagnostic, None, color)));
            return outcome;
        }
    };

    let start = Instant::now();
    let arena = CompilerArena::for_source(source.len());
    let parsed = as3ts_parser::parse_file(arena.bump(), &file_name, &source);
    let elapsed_ms = start.elapsed().as_millis().to_string();
    debug!(
        "{}",
        Diagnostic::new(&messages::PARSED_0_IN_1_MS, &[&file_name, &elapsed_ms]).message_text
    );

    if !parsed.diagnostics.is_empty() {
        let line_map = LineMap::new(&source);
        outcome.warnings = parsed
            .diagnostics
            .diagnostics()
            .iter()
            .map(|diagnostic| report::format_diagnostic(diagnostic, Some(&line_map), color))
            .collect();
    }

    let unit = match parsed.unit {
        Ok(unit) => unit,
        Err(err) => {
            outcome.error = Some(report::render_syntax_error(&file_name, &source, &err, color));
            return outcome;
        }
    };

    let rendered = match settings.format {
        OutputFormat::Tree => Ok(unit.to_string()),
        OutputFormat::Json => serde_json::to_string_pretty(unit),
    };
    let rendered = match rendered {
        Ok(rendered) => rendered,
        Err(err) => {
            outcome.error = Some(format!("{file_name}: cannot serialize tree: {err}\n"));
            return outcome;
        }
    };

    match &settings.out_dir {
        Some(dir) => {
            let target = output_path(dir, path, settings.format);
            debug!(path = %target.display(), "writing tree");
            if let Err(err) = fs::write(&target, rendered) {
                outcome.error =
                    Some(format!("{file_name}: cannot write '{}': {err}\n", target.display()));
            }
        }
        None => outcome.output = Some(rendered),
    }
    outcome
}

/// `<out_dir>/<stem>.<format extension>`.
fn output_path(out_dir: &Path, input: &Path, format: OutputFormat) -> PathBuf {
    let stem = input.file_stem().map(|stem| stem.to_string_lossy()).unwrap_or_default();
    out_dir.join(format!("{stem}.{}", format.extension()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_path_uses_stem_and_format() {
        let path = output_path(Path::new("out"), Path::new("src/game/Player.as"), OutputFormat::Json);
        assert_eq!(path, PathBuf::from("out/Player.json"));
        let path = output_path(Path::new("out"), Path::new("Main.as"), OutputFormat::Tree);
        assert_eq!(path, PathBuf::from("out/Main.tree"));
    }

    #[test]
    fn test_cli_parses_flags() {
        let cli = Cli::parse_from([
            "as3ts", "--format", "json", "--out-dir", "out", "-v", "A.as", "B.as",
        ]);
        assert_eq!(cli.files, vec!["A.as", "B.as"]);
        assert_eq!(cli.format, Some(OutputFormat::Json));
        assert_eq!(cli.out_dir.as_deref(), Some("out"));
        assert!(cli.verbose);
        assert!(cli.project.is_none());
    }

    #[test]
    fn test_process_missing_file_fails() {
        let settings = Settings {
            files: vec![PathBuf::from("does/not/exist.as")],
            out_dir: None,
            format: OutputFormat::Tree,
        };
        let outcome = process_file(&settings.files[0], &settings, false);
        assert!(outcome.output.is_none());
        let error = outcome.error.unwrap();
        assert!(error.contains("AS6050"));
        assert!(error.contains("does/not/exist.as"));
    }
}
