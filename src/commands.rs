//! Command handlers for the mnemo CLI.

use std::process::ExitCode;

use serde_json::{Map, Value};

use crate::errors::Error;
use crate::memory::{MemoryBackend, DEFAULT_TOP_K};
use crate::output::*;

/// Commands supported by the mnemo CLI.
#[derive(clap::Subcommand)]
pub enum Commands {
    /// Store a (key, value) pair; the key is indexed for similarity
    Store {
        /// Key text (the similarity target)
        key: String,

        /// Value payload returned on recall
        value: String,

        /// Optional JSON object with extra metadata
        #[arg(short = 'm', long)]
        metadata: Option<String>,
    },
    /// Recall the nearest memories to a query key
    Recall {
        /// Query key text
        key: String,

        /// Number of nearest memories to return (default: 3)
        #[arg(short = 'k', long, default_value_t = DEFAULT_TOP_K)]
        top_k: usize,
    },
    /// Forget (delete) the nearest memories to a query key
    Forget {
        /// Query key text
        key: String,

        /// Number of nearest memories to delete (default: 3)
        #[arg(short = 'k', long, default_value_t = DEFAULT_TOP_K)]
        top_k: usize,
    },
    /// List stored memories, newest first
    List {
        /// Maximum number of results (default: 10)
        #[arg(short = 'l', long, default_value = "10")]
        limit: usize,
    },
    Version,
}

/// Execute a CLI command.
///
/// # Errors
///
/// Returns the backend error unchanged; the caller renders it.
pub fn execute(
    command: &Commands,
    backend: &mut MemoryBackend,
    json: bool,
) -> Result<ExitCode, Error> {
    match command {
        Commands::Store {
            key,
            value,
            metadata,
        } => handle_store(backend, key, value, metadata.as_deref(), json),
        Commands::Recall { key, top_k } => handle_recall(backend, key, *top_k, json),
        Commands::Forget { key, top_k } => handle_forget(backend, key, *top_k, json),
        Commands::List { limit } => handle_list(backend, *limit, json),
        Commands::Version => handle_version(json),
    }
}

/// Parse the `-m` argument into a metadata object.
fn parse_metadata(raw: Option<&str>) -> Result<Option<Map<String, Value>>, Error> {
    match raw {
        None => Ok(None),
        Some(s) => {
            let value: Value = serde_json::from_str(s)
                .map_err(|e| Error::InvalidArgument(format!("metadata is not valid JSON: {e}")))?;
            match value {
                Value::Object(map) => Ok(Some(map)),
                _ => Err(Error::InvalidArgument(
                    "metadata must be a JSON object".to_string(),
                )),
            }
        }
    }
}

fn handle_store(
    backend: &mut MemoryBackend,
    key: &str,
    value: &str,
    metadata: Option<&str>,
    json: bool,
) -> Result<ExitCode, Error> {
    let metadata = parse_metadata(metadata)?;
    let id = backend.store(key, value, metadata)?;

    if json {
        print_json(&StoreResponse { id });
    } else {
        println!("Stored memory: {}", id);
    }
    Ok(ExitCode::SUCCESS)
}

fn handle_recall(
    backend: &mut MemoryBackend,
    key: &str,
    top_k: usize,
    json: bool,
) -> Result<ExitCode, Error> {
    let results = backend.recall(key, top_k)?;

    if json {
        print_json(&RecallResponse { results });
    } else if results.is_empty() {
        println!("No memories found");
    } else {
        for hit in results {
            let distance = hit.distance.unwrap_or(1.0);
            println!(
                "{} [distance: {:.4}]\n  {} => {}\n",
                hit.id, distance, hit.key, hit.value
            );
        }
    }
    Ok(ExitCode::SUCCESS)
}

fn handle_forget(
    backend: &mut MemoryBackend,
    key: &str,
    top_k: usize,
    json: bool,
) -> Result<ExitCode, Error> {
    let deleted_ids = backend.forget(key, top_k)?;

    if json {
        print_json(&ForgetResponse { deleted_ids });
    } else if deleted_ids.is_empty() {
        println!("Nothing to forget");
    } else {
        println!("Forgot {} memory/memories:", deleted_ids.len());
        for id in deleted_ids {
            println!("  {}", id);
        }
    }
    Ok(ExitCode::SUCCESS)
}

fn handle_list(backend: &mut MemoryBackend, limit: usize, json: bool) -> Result<ExitCode, Error> {
    let memories = backend.list(limit)?;

    if json {
        print_json(&ListResponse { memories });
    } else {
        for memory in memories {
            println!("{}: {} => {}", memory.id, memory.key, memory.value);
        }
    }
    Ok(ExitCode::SUCCESS)
}

fn handle_version(json: bool) -> Result<ExitCode, Error> {
    if json {
        print_json(&serde_json::json!({
            "version": env!("CARGO_PKG_VERSION"),
            "name": env!("CARGO_PKG_NAME")
        }));
    } else {
        println!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
    }
    Ok(ExitCode::SUCCESS)
}
