use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use mnemo::commands::{self, Commands};
use mnemo::output::{print_json, ErrorResponse};
use mnemo::{Config, Error, MemoryBackend};

/// mnemo - a semantic key-value memory store for AI agents
#[derive(Parser)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Collection (namespace) to operate on
    #[arg(short, long)]
    collection: Option<String>,

    /// Path to the SQLite database
    #[arg(long)]
    db: Option<PathBuf>,

    /// Emit machine-readable JSON
    #[arg(long)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(&cli) {
        Ok(code) => code,
        Err(e) => {
            if cli.json {
                print_json(&ErrorResponse {
                    error: e.to_string(),
                });
            } else {
                eprintln!("Error: {e}");
            }
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<ExitCode, Error> {
    let mut config = Config::load()?;
    if let Some(collection) = &cli.collection {
        config.collection = collection.clone();
    }
    if let Some(db) = &cli.db {
        config.database_path = Some(db.clone());
    }

    config.ensure_directories()?;
    let mut backend = MemoryBackend::open(&config)?;

    commands::execute(&cli.command, &mut backend, cli.json)
}
