//! calcbook CLI - session-scoped formula calculator

mod report;

use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Duration;

use anyhow::{Context, Result};
use calcbook::prelude::*;
use calcbook::{LineTerminator, DEFAULT_SESSIONS_DIR};
use clap::{Parser, Subcommand};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use crate::report::{render_text, SessionReport};

#[derive(Parser)]
#[command(name = "calcbook")]
#[command(
    author,
    version,
    about = "Evaluate formulas and keep a per-session history of results"
)]
struct Cli {
    /// Directory holding one .xlsx file per session
    #[arg(long, global = true, env = "CALCBOOK_SESSIONS_DIR", default_value = DEFAULT_SESSIONS_DIR)]
    sessions_dir: PathBuf,

    /// Age in seconds after which a leftover lock file is taken over
    #[arg(long, global = true, default_value = "30")]
    lock_stale_secs: u64,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List known sessions
    #[command(alias = "ls")]
    List,

    /// Create an empty session
    Create {
        /// Session name
        name: String,
    },

    /// Rename a session
    Rename {
        /// Current name
        old: String,

        /// New name
        new: String,
    },

    /// Show a session's history, most recent first
    Show {
        /// Session name
        name: String,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Evaluate a formula in a session and record the result
    Calc {
        /// Session name
        name: String,

        /// Formula such as "speed = distance / time"
        formula: String,

        /// Input values such as '{"distance": 10, "time": 2}'
        #[arg(default_value = "")]
        inputs: String,
    },

    /// Export a session's history to CSV
    Export {
        /// Session name
        name: String,

        /// Output CSV file
        #[arg(short, long)]
        output: PathBuf,

        /// Field delimiter (default: comma)
        #[arg(short, long, default_value = ",")]
        delimiter: char,

        /// Use CRLF line endings
        #[arg(long)]
        crlf: bool,
    },
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::new(
        std::env::var("RUST_LOG").unwrap_or_else(|_| "calcbook=info".into()),
    );

    // stdout carries command output
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    init_tracing();

    let options = StoreOptions::default()
        .with_sessions_dir(&cli.sessions_dir)
        .with_lock_stale_after(Duration::from_secs(cli.lock_stale_secs));
    let store = SessionStore::new(options);
    tracing::debug!(dir = %cli.sessions_dir.display(), "using sessions directory");

    match cli.command {
        Commands::List => list(&store)?,
        Commands::Create { name } => {
            store
                .create(&name)
                .with_context(|| format!("Failed to create session '{}'", name))?;
            println!("Session '{}' created successfully!", name);
        }
        Commands::Rename { old, new } => {
            store
                .rename(&old, &new)
                .with_context(|| format!("Failed to rename session '{}'", old))?;
            println!("Session renamed to '{}' successfully!", new);
        }
        Commands::Show { name, json } => show(&store, &name, json)?,
        Commands::Calc {
            name,
            formula,
            inputs,
        } => return Ok(calc(&store, &name, &formula, &inputs)),
        Commands::Export {
            name,
            output,
            delimiter,
            crlf,
        } => export(&store, &name, &output, delimiter, crlf)?,
    }

    Ok(ExitCode::SUCCESS)
}

fn list(store: &SessionStore) -> Result<()> {
    let names = store.list_sessions().with_context(|| {
        format!(
            "Failed to read sessions directory '{}'",
            store.options().sessions_dir.display()
        )
    })?;
    for name in names {
        println!("{}", name);
    }
    Ok(())
}

fn show(store: &SessionStore, name: &str, json: bool) -> Result<()> {
    if !store.exists(name) {
        anyhow::bail!("Session '{}' does not exist", name);
    }
    let session = store
        .try_load(name)
        .with_context(|| format!("Failed to load session '{}'", name))?;

    if json {
        let text = serde_json::to_string_pretty(&SessionReport::new(&session))
            .context("Failed to serialize session")?;
        println!("{}", text);
    } else {
        print!("{}", render_text(&session));
    }
    Ok(())
}

/// Failures are reported as a message and a non-zero exit, not an error chain
fn calc(store: &SessionStore, name: &str, formula: &str, inputs: &str) -> ExitCode {
    let outcome = store.submit(name, formula, inputs);
    if !outcome.success {
        eprintln!("{}", outcome.message);
        return ExitCode::FAILURE;
    }

    println!("{}", outcome.message);
    let session = Session::new(name).with_table(outcome.table.unwrap_or_default());
    print!("{}", render_text(&session));
    ExitCode::SUCCESS
}

fn export(
    store: &SessionStore,
    name: &str,
    output: &Path,
    delimiter: char,
    crlf: bool,
) -> Result<()> {
    let delimiter = u8::try_from(delimiter)
        .ok()
        .filter(u8::is_ascii)
        .with_context(|| format!("Delimiter '{}' is not a single ASCII character", delimiter))?;
    let options = CsvWriteOptions {
        delimiter,
        line_terminator: if crlf {
            LineTerminator::CRLF
        } else {
            LineTerminator::LF
        },
        ..Default::default()
    };

    let table = store
        .export_csv(name, output, &options)
        .with_context(|| format!("Failed to export session '{}'", name))?;
    eprintln!("Wrote {} rows to '{}'", table.len(), output.display());
    Ok(())
}
