//! keyed-diff: key-based diff of two record snapshots
//!
//! Compares two JSON arrays of objects by a key field and reports added,
//! modified and deleted records.

#![allow(clippy::needless_pass_by_value)]

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};
use keyed_diff::{
    cli,
    config::{
        generate_example_config, generate_json_schema, load_config_file, BehaviorConfig,
        DiffConfig, DiffPaths, OptionsFile, OutputConfig,
    },
    pipeline::exit_codes,
    reports::ReportFormat,
};
use std::io;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "keyed-diff")]
#[command(version)]
#[command(about = "Key-based diff of two JSON record snapshots", long_about = None)]
#[command(after_help = "EXIT CODES:
    0  No changes detected (or no --fail-on-change)
    1  Changes detected with --fail-on-change
    3  Error occurred

EXAMPLES:
    # Diff two snapshots keyed on \"id\"
    keyed-diff diff new.json old.json

    # Key on \"sku\", unified output with all counts
    keyed-diff diff new.json old.json --key sku --unified --fields addedCount,modifiedCount,deletedCount

    # Detect reordering only
    keyed-diff diff new.json old.json --sort --detector never -o summary

    # CI check reading the new snapshot from stdin
    export-records | keyed-diff diff - baseline.json --fail-on-change")]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Disable colored output (also respects `NO_COLOR` env)
    #[arg(long, global = true)]
    no_color: bool,

    /// Path to an options file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Arguments for the `diff` subcommand
#[derive(Parser)]
struct DiffArgs {
    /// Path to the new snapshot (`-` for stdin)
    new: PathBuf,

    /// Path to the old snapshot (`-` for stdin)
    old: PathBuf,

    /// Field used to match records across snapshots [default: id]
    #[arg(short, long)]
    key: Option<String>,

    /// Change-detector: fieldwise, whole-record or never [default: fieldwise]
    #[arg(short, long)]
    detector: Option<String>,

    /// Counts to include (addedCount, modifiedCount, deletedCount)
    #[arg(long, value_delimiter = ',')]
    fields: Option<Vec<String>>,

    /// Emit one `lines` sequence tagged with `rowState` instead of split lists
    #[arg(long)]
    unified: bool,

    /// Keep unchanged keys and report whether record order changed
    #[arg(long)]
    sort: bool,

    /// Report every old record as deleted when the new snapshot is empty
    #[arg(long)]
    report_deletions: bool,

    /// Output format
    #[arg(short, long, default_value = "json")]
    output: ReportFormat,

    /// Output file path (stdout if not specified)
    #[arg(short = 'O', long)]
    output_file: Option<PathBuf>,

    /// Emit single-line JSON
    #[arg(long)]
    compact: bool,

    /// Exit with code 1 if any changes are detected
    #[arg(long)]
    fail_on_change: bool,
}

impl DiffArgs {
    /// Option overrides given on the command line.
    fn option_overrides(&self) -> OptionsFile {
        OptionsFile {
            key: self.key.clone(),
            detector: self.detector.clone(),
            fields: self.fields.clone(),
            is_split: self.unified.then_some(false),
            sort: self.sort,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Compare two record snapshots by key
    Diff(DiffArgs),

    /// Generate JSON Schema for the options file format
    ConfigSchema {
        /// Write schema to file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Print an example options file
    ConfigExample,

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

fn main() {
    let cli = Cli::parse();

    // Initialize logging; stdout is reserved for reports
    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| log_level.to_string()),
        ))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(io::stderr),
        )
        .init();

    match run(cli) {
        Ok(exit_code) => {
            if exit_code != exit_codes::SUCCESS {
                std::process::exit(exit_code);
            }
        }
        Err(e) => {
            eprintln!("Error: {e:#}");
            std::process::exit(exit_codes::ERROR);
        }
    }
}

fn run(cli: Cli) -> Result<i32> {
    match cli.command {
        Commands::Diff(args) => {
            let overrides = args.option_overrides();
            let options = match &cli.config {
                Some(path) => {
                    let mut options = load_config_file(path).with_context(|| {
                        format!("Failed to load options from {}", path.display())
                    })?;
                    options.merge(&overrides);
                    options
                }
                None => {
                    let (options, loaded_from) =
                        OptionsFile::from_file_with_overrides(None, &overrides);
                    if let Some(path) = loaded_from {
                        if !cli.quiet {
                            tracing::info!("Using options from {}", path.display());
                        }
                    }
                    options
                }
            };

            let config = DiffConfig {
                paths: DiffPaths {
                    new: args.new,
                    old: args.old,
                },
                options,
                output: OutputConfig {
                    format: args.output,
                    file: args.output_file,
                    compact: args.compact,
                    no_color: cli.no_color,
                },
                behavior: BehaviorConfig {
                    fail_on_change: args.fail_on_change,
                    quiet: cli.quiet,
                    report_deletions: args.report_deletions,
                },
            };

            cli::run_diff(config)
        }

        Commands::ConfigSchema { output } => {
            let schema = generate_json_schema();
            match output {
                Some(path) => {
                    std::fs::write(&path, &schema)
                        .with_context(|| format!("failed to write {}", path.display()))?;
                    eprintln!("Schema written to {}", path.display());
                }
                None => {
                    println!("{schema}");
                }
            }
            Ok(exit_codes::SUCCESS)
        }

        Commands::ConfigExample => {
            print!("{}", generate_example_config());
            Ok(exit_codes::SUCCESS)
        }

        Commands::Completions { shell } => {
            generate(shell, &mut Cli::command(), "keyed-diff", &mut io::stdout());
            Ok(exit_codes::SUCCESS)
        }
    }
}
