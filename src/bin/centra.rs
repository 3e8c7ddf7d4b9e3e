//! Centra CLI — centrality analysis over a SQLite edge relation.
//!
//! Usage:
//!   centra analyze --db graph.db --table ROADS --orientation undirected
//!   centra analyze --db graph.db --table ROADS \
//!       --orientation "directed - edge_orientation" --weight WEIGHT

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use centra::storage::{EDGE_CENT_SUFFIX, NODE_CENT_SUFFIX};
use centra::{AnalysisConfig, SqliteStore};

#[derive(Parser)]
#[command(
    name = "centra",
    version,
    about = "Closeness and betweenness centrality over relational edge tables"
)]
struct Cli {
    /// Enable debug-level progress output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze an edge table and materialize the result tables
    Analyze {
        /// Path to the SQLite database file
        #[arg(long)]
        db: PathBuf,
        /// Name of the edge table ({EDGE_ID, START_NODE, END_NODE, ...})
        #[arg(long)]
        table: String,
        /// Orientation literal: "directed - <column>", "reversed - <column>",
        /// or "undirected"
        #[arg(long)]
        orientation: String,
        /// Weight column name; hop-count distances when omitted
        #[arg(long)]
        weight: Option<String>,
        /// Declared-node table (a NODE_ID column); implied from edge
        /// endpoints when omitted
        #[arg(long)]
        nodes_table: Option<String>,
        /// Worker threads for the per-source traversals
        #[arg(long, default_value_t = 1)]
        threads: usize,
    },
}

fn cmd_analyze(
    db: &PathBuf,
    table: &str,
    orientation: &str,
    weight: Option<&str>,
    nodes_table: Option<&str>,
    threads: usize,
) -> i32 {
    let mut store = match SqliteStore::open(db) {
        Ok(store) => store,
        Err(e) => {
            eprintln!("Error: failed to open database {}: {}", db.display(), e);
            return 1;
        }
    };

    let config = AnalysisConfig {
        threads,
        ..AnalysisConfig::default()
    };
    match store.graph_analysis_with_config(table, nodes_table, orientation, weight, config) {
        Ok(_) => {
            for suffix in [NODE_CENT_SUFFIX, EDGE_CENT_SUFFIX] {
                let name = format!("{table}{suffix}");
                let rows: i64 = store
                    .connection()
                    .query_row(&format!("SELECT COUNT(*) FROM \"{name}\""), [], |row| {
                        row.get(0)
                    })
                    .unwrap_or(0);
                println!("Created {name} ({rows} rows)");
            }
            0
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            1
        }
    }
}

fn main() {
    let cli = Cli::parse();
    if cli.verbose {
        tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_writer(std::io::stderr)
            .init();
    }
    match cli.command {
        Commands::Analyze {
            db,
            table,
            orientation,
            weight,
            nodes_table,
            threads,
        } => {
            let code = cmd_analyze(
                &db,
                &table,
                &orientation,
                weight.as_deref(),
                nodes_table.as_deref(),
                threads,
            );
            std::process::exit(code);
        }
    }
}
