//! CLI smoke and inspection entry point.
//!
//! # Responsibility
//! - Verify `scholia_core` linkage with deterministic output.
//! - Inspect the catalogue stored at `SCHOLIA_DB_PATH`.
//!
//! Usage: `scholia_cli [list | related <name> | graph]`

use scholia_core::{build_graph, resolve_db_path, RecordStore, SqliteStore, StoreConfig};
use std::process::ExitCode;

fn main() -> ExitCode {
    println!("scholia_core ping={}", scholia_core::ping());
    println!("scholia_core version={}", scholia_core::core_version());

    let args: Vec<String> = std::env::args().skip(1).collect();
    let Some(command) = args.first() else {
        return ExitCode::SUCCESS;
    };

    let path = resolve_db_path();
    let backend = match SqliteStore::open(&path) {
        Ok(backend) => backend,
        Err(err) => {
            eprintln!("failed to open {}: {err}", path.display());
            return ExitCode::FAILURE;
        }
    };
    let store = RecordStore::open(backend, StoreConfig::from_env());

    match command.as_str() {
        "list" => {
            for record in store.get_all_academics() {
                let marker = if store.is_favorite(&record.name) { "*" } else { " " };
                println!(
                    "{marker} {} papers={} connections={}",
                    record.name,
                    record.papers.len(),
                    record.connections.len()
                );
            }
        }
        "related" => {
            let name = args[1..].join(" ");
            let Some(record) = store.get_academic(&name) else {
                eprintln!("academic not found: {name}");
                return ExitCode::FAILURE;
            };
            for related in store.related_academics_scored(record, None) {
                println!("{:>3} {}", related.score, related.record.name);
            }
        }
        "graph" => {
            let graph = build_graph(&store);
            println!("nodes={} links={}", graph.nodes.len(), graph.links.len());
        }
        other => {
            eprintln!("unknown command `{other}`; expected list|related|graph");
            return ExitCode::FAILURE;
        }
    }
    ExitCode::SUCCESS
}
