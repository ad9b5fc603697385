//! optdeck: keyword-deck configuration front end.
//!
//! Consumes a deck-event JSON stream (the grammar engine's reduced form of
//! an input deck), runs the build-default-validate pipeline, and reports
//! the verdict. Any fatal error or a nonzero recoverable count exits
//! nonzero with every accumulated message on stderr.

use std::fs;
use std::path::{Path, PathBuf};
use std::process;

use clap::{Parser, Subcommand, ValueEnum};
use optdeck_core::{process_events, Config, DeckEvent, Severity};

/// Output format for CLI responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

/// Optdeck configuration front end.
#[derive(Parser)]
#[command(name = "optdeck", version, about = "Optdeck keyword-deck configuration front end")]
struct Cli {
    /// Output format (text or json)
    #[arg(long, global = true, default_value = "text", value_enum)]
    output: OutputFormat,

    /// Suppress non-essential output
    #[arg(long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a deck-event stream and report the verdict
    Check {
        /// Path to the deck-event JSON file
        events: PathBuf,
    },

    /// Validate a deck-event stream and print the finalized configuration
    Dump {
        /// Path to the deck-event JSON file
        events: PathBuf,
    },
}

fn main() {
    let cli = Cli::parse();
    match cli.command {
        Commands::Check { events } => cmd_check(&events, cli.output, cli.quiet),
        Commands::Dump { events } => cmd_dump(&events),
    }
}

fn load_events(path: &Path) -> Vec<DeckEvent> {
    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) => {
            eprintln!("error: cannot read {}: {}", path.display(), e);
            process::exit(1);
        }
    };
    match serde_json::from_str(&text) {
        Ok(events) => events,
        Err(e) => {
            eprintln!(
                "error: {} is not a deck-event stream: {}",
                path.display(),
                e
            );
            process::exit(1);
        }
    }
}

fn run_pipeline(path: &Path) -> Config {
    let events = load_events(path);
    match process_events(&events) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("fatal: {}", e);
            process::exit(1);
        }
    }
}

fn print_diagnostics(config: &Config) {
    for d in config.diagnostics() {
        let tag = match d.severity {
            Severity::Recoverable => "error",
            Severity::Advisory => "warning",
        };
        eprintln!("{}: {}", tag, d.message);
    }
}

fn cmd_check(path: &Path, output: OutputFormat, quiet: bool) {
    let config = run_pipeline(path);
    print_diagnostics(&config);

    let errors = config
        .diagnostics()
        .iter()
        .filter(|d| d.severity == Severity::Recoverable)
        .count();
    let warnings = config.diagnostics().len() - errors;

    match output {
        OutputFormat::Json => {
            let summary = serde_json::json!({
                "format": optdeck_core::EVENT_FORMAT_VERSION,
                "verdict": config.verdict(),
                "records": config.store().records().len(),
                "errors": errors,
                "warnings": warnings,
            });
            println!("{}", summary);
        }
        OutputFormat::Text => {
            if config.is_accepted() {
                if !quiet {
                    println!(
                        "accepted: {} records, {} warnings",
                        config.store().records().len(),
                        warnings
                    );
                }
            } else {
                println!("rejected: {} errors", errors);
            }
        }
    }
    if !config.is_accepted() {
        process::exit(1);
    }
}

fn cmd_dump(path: &Path) {
    let config = run_pipeline(path);
    print_diagnostics(&config);
    if !config.is_accepted() {
        eprintln!("error: configuration rejected; nothing to dump");
        process::exit(1);
    }
    let json = serde_json::to_string_pretty(&config).expect("configuration serializes");
    println!("{}", json);
}
