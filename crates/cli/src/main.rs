use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand, ValueEnum};
use digraph_core::VertexId;

mod commands;
mod input;

/// digraph - Query a directed graph loaded from an edge list
#[derive(Parser)]
#[command(name = "digraph")]
#[command(version)] // Auto-pull version from Cargo.toml
#[command(about = "Build a directed graph from an edge list and query it", long_about = None)]
struct Cli {
    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text, global = true)]
    format: OutputFormat,

    /// Enable debug logging (RUST_LOG still takes precedence)
    #[arg(long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Show vertex and edge counts
    Stats {
        /// Edge list file, or `-` for stdin
        file: PathBuf,
    },
    /// List vertices in insertion order
    Vertices {
        /// Edge list file, or `-` for stdin
        file: PathBuf,
    },
    /// List edges ordered by source, then target
    Edges {
        /// Edge list file, or `-` for stdin
        file: PathBuf,
    },
    /// List the out-neighbours of a vertex
    Adjacent {
        /// Edge list file, or `-` for stdin
        file: PathBuf,
        /// Vertex descriptor
        vertex: VertexId,
    },
    /// Check whether an edge exists
    Edge {
        /// Edge list file, or `-` for stdin
        file: PathBuf,
        /// Source vertex descriptor
        source: VertexId,
        /// Target vertex descriptor
        target: VertexId,
    },
    /// Check the graph against the petgraph-backed reference
    Compare {
        /// Edge list file, or `-` for stdin
        file: PathBuf,
    },
}

fn main() {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    if let Err(err) = run(cli) {
        eprintln!("Error: {:#}", err);
        process::exit(1);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let json = cli.format == OutputFormat::Json;
    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    match cli.command {
        Commands::Stats { file } => {
            let entries = input::read_edge_list(&file)?;
            commands::cmd_stats(&mut out, &entries, json)
        }
        Commands::Vertices { file } => {
            let entries = input::read_edge_list(&file)?;
            commands::cmd_vertices(&mut out, &entries, json)
        }
        Commands::Edges { file } => {
            let entries = input::read_edge_list(&file)?;
            commands::cmd_edges(&mut out, &entries, json)
        }
        Commands::Adjacent { file, vertex } => {
            let entries = input::read_edge_list(&file)?;
            commands::cmd_adjacent(&mut out, &entries, vertex, json)
        }
        Commands::Edge {
            file,
            source,
            target,
        } => {
            let entries = input::read_edge_list(&file)?;
            commands::cmd_edge(&mut out, &entries, source, target, json)
        }
        Commands::Compare { file } => {
            let entries = input::read_edge_list(&file)?;
            log::info!("comparing against petgraph reference backend");
            commands::cmd_compare(&mut out, &entries, json)
        }
    }
}
