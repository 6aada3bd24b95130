mod commands;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use commands::{check, fmt, new, templates, CheckArgs, FmtArgs, NewArgs};
use folio_editor::EditorConfig;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Folio CLI - tooling for persisted rich-text documents
#[derive(Parser, Debug)]
#[command(name = "folio")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Editor config file (defaults to folio.config.json in the current directory)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Validate persisted documents
    Check(CheckArgs),

    /// Re-serialize a document in canonical form
    Fmt(FmtArgs),

    /// List built-in templates
    Templates,

    /// Create a document from a template
    New(NewArgs),
}

fn load_config(path: Option<&PathBuf>) -> Result<EditorConfig> {
    let config = match path {
        Some(path) => EditorConfig::from_file(path)
            .with_context(|| format!("Cannot read config {}", path.display()))?,
        None => {
            let cwd = std::env::current_dir().context("Cannot get current directory")?;
            EditorConfig::load(&cwd)?
        }
    };
    Ok(config)
}

fn run(cli: Cli) -> Result<()> {
    let config = load_config(cli.config.as_ref())?;
    tracing::debug!(?config, "Loaded editor config");

    match cli.command {
        Command::Check(args) => check(args, &config),
        Command::Fmt(args) => fmt(args, &config),
        Command::Templates => templates(),
        Command::New(args) => new(args),
    }
}

fn main() {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Err(err) = run(cli) {
        eprintln!();
        eprintln!("{} {:#}", "Error:".red().bold(), err);
        eprintln!();
        std::process::exit(1);
    }
}
