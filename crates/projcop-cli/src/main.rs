//! projcop CLI tool.
//!
//! Usage:
//! ```bash
//! projcop check [OPTIONS] [PATH]
//! projcop list-rules
//! projcop init [--force] [--update]
//! ```

use anyhow::Result;
use clap::{Parser, Subcommand};
use miette::GraphicalReportHandler;
use projcop_core::XmlError;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

mod commands;
mod config_resolver;
mod discovery;

/// Checks MSBuild project files against configurable rules
#[derive(Parser)]
#[command(name = "projcop")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to configuration file
    #[arg(short, long, global = true, env = "PROJCOP_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check projects against the configured rules
    Check {
        /// Solution file, project file or directory (default: current directory)
        #[arg(default_value = ".")]
        path: PathBuf,

        /// Output format
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,

        /// Only run specific rules (comma-separated ids)
        #[arg(long)]
        rules: Option<String>,

        /// Exclude patterns (can be specified multiple times)
        #[arg(short, long)]
        exclude: Vec<String>,
    },

    /// List available rules
    ListRules,

    /// Initialize configuration file
    Init {
        /// Overwrite existing config
        #[arg(long)]
        force: bool,

        /// Add sections for rules missing from an existing config
        #[arg(long, conflicts_with = "force")]
        update: bool,
    },
}

/// Output format for lint results.
#[derive(Clone, Copy, Debug, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text output.
    #[default]
    Text,
    /// JSON output.
    Json,
    /// One line per finding.
    Compact,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(if cli.verbose { "debug" } else { "info" })
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match run(cli) {
        Ok(true) => ExitCode::FAILURE,
        Ok(false) => ExitCode::SUCCESS,
        Err(err) => {
            report(&err);
            ExitCode::from(2)
        }
    }
}

/// Runs the selected command. Returns `true` if findings were reported.
fn run(cli: Cli) -> Result<bool> {
    match cli.command {
        Commands::Check {
            path,
            format,
            rules,
            exclude,
        } => {
            let source = config_resolver::resolve(config_dir(&path), cli.config.as_deref());
            commands::check::run(&path, format, rules.as_deref(), &exclude, &source)
        }
        Commands::ListRules => {
            commands::list_rules::run();
            Ok(false)
        }
        Commands::Init { force, update } => {
            let target = cli
                .config
                .unwrap_or_else(|| PathBuf::from(commands::init::DEFAULT_CONFIG_FILE));
            commands::init::run(&target, force, update)?;
            Ok(false)
        }
    }
}

/// Directory searched for a project-level config: the target itself, or
/// the directory containing a solution or project file.
fn config_dir(target: &Path) -> &Path {
    if target.is_dir() {
        return target;
    }
    target.parent().unwrap_or_else(|| Path::new("."))
}

/// Prints a fatal error, rendering malformed XML with its source line.
fn report(err: &anyhow::Error) {
    if let Some(xml) = err.chain().find_map(|cause| cause.downcast_ref::<XmlError>()) {
        let mut rendered = String::new();
        if GraphicalReportHandler::new()
            .render_report(&mut rendered, xml)
            .is_ok()
        {
            eprint!("{rendered}");
            return;
        }
    }
    eprintln!("Error: {err:?}");
}
