//! Graphstep CLI - watch classic graph algorithms run step by step.
//!
//! A thin caller of the engine: it builds a grid or network from flags,
//! pulls snapshots at the requested pace, and prints the result.

mod commands;
mod output;

use clap::{Args, Parser, Subcommand, ValueEnum};

use commands::network::{AssignSpec, EdgeSpec};
use graphstep::Coord;

/// Step-by-step graph algorithm runner.
///
/// Builds a puzzle, runs one algorithm on it through the step engine, and
/// reports the outcome.
#[derive(Parser)]
#[command(name = "graphstep")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, global = true, default_value = "table")]
    format: OutputFormat,

    /// Suppress progress and info messages
    #[arg(long, short, global = true)]
    quiet: bool,

    /// Enable verbose debug logging
    #[arg(long, short, global = true)]
    verbose: bool,

    /// Print every intermediate snapshot
    #[arg(long, global = true)]
    steps: bool,

    /// Pause between steps, in milliseconds
    #[arg(long, global = true, default_value_t = 0)]
    delay_ms: u64,

    /// Abort runs after this many steps
    #[arg(long, global = true)]
    step_limit: Option<usize>,
}

/// Output format options.
#[derive(Clone, Copy, ValueEnum, Default)]
enum OutputFormat {
    /// Human-readable table format
    #[default]
    Table,
    /// Machine-readable JSON format
    Json,
}

/// Grid search algorithms.
#[derive(Clone, Copy, ValueEnum, Default)]
enum GridAlgorithm {
    /// Breadth-first search
    #[default]
    Bfs,
    /// Depth-first search
    Dfs,
    /// Dijkstra's shortest path
    Dijkstra,
}

/// Available commands.
#[derive(Subcommand)]
enum Commands {
    /// Search an open grid
    Grid {
        /// Number of rows
        #[arg(long, default_value_t = 5)]
        rows: usize,

        /// Number of columns
        #[arg(long, default_value_t = 5)]
        cols: usize,

        #[command(flatten)]
        search: GridArgs,
    },

    /// Search a generated maze
    Maze {
        /// Number of rows (at least 5)
        #[arg(long, default_value_t = 11)]
        rows: usize,

        /// Number of columns (at least 5)
        #[arg(long, default_value_t = 11)]
        cols: usize,

        /// Generator seed
        #[arg(long, default_value_t = 1)]
        seed: u64,

        #[command(flatten)]
        search: GridArgs,
    },

    /// Color a network, automatically or by checking manual assignments
    Color {
        #[command(flatten)]
        network: NetworkArgs,

        /// Palette size (4 colors by default)
        #[arg(long)]
        palette: Option<usize>,

        /// Manual assignment as LABEL=COLOR; skips auto-solve
        #[arg(long = "assign", value_parser = commands::network::parse_assign)]
        assignments: Vec<AssignSpec>,
    },

    /// Build a minimum spanning tree, or grade a manual selection
    Mst {
        #[command(flatten)]
        network: NetworkArgs,

        /// Manually selected edge as A-B; skips Kruskal
        #[arg(long = "select", value_parser = commands::network::parse_edge)]
        selection: Vec<EdgeSpec>,
    },

    /// Detect the first cycle in a network
    Cycle {
        #[command(flatten)]
        network: NetworkArgs,

        /// Read edges as directed
        #[arg(long)]
        directed: bool,
    },
}

/// Shared options for grid searches.
#[derive(Args)]
struct GridArgs {
    /// Algorithm to run
    #[arg(long, short, default_value = "bfs")]
    algorithm: GridAlgorithm,

    /// Toggle a wall at ROW,COL
    #[arg(long = "wall", value_parser = commands::grid::parse_coord)]
    walls: Vec<Coord>,

    /// Start cell as ROW,COL
    #[arg(long, value_parser = commands::grid::parse_coord)]
    start: Option<Coord>,

    /// End cell as ROW,COL
    #[arg(long, value_parser = commands::grid::parse_coord)]
    end: Option<Coord>,

    /// Draw random cell weights in 1..=MAX
    #[arg(long)]
    random_weights: Option<u32>,

    /// Seed for random weights
    #[arg(long, default_value_t = 7)]
    weight_seed: u64,
}

/// Shared options for network games.
#[derive(Args)]
struct NetworkArgs {
    /// Explicit edge as A-B or A-B:WEIGHT; replaces the generated network
    #[arg(long = "edge", value_parser = commands::network::parse_edge)]
    edges: Vec<EdgeSpec>,

    /// Node count of the generated network
    #[arg(long, default_value_t = 6)]
    nodes: usize,

    /// Edges added beyond a spanning tree
    #[arg(long, default_value_t = 4)]
    extra_edges: usize,

    /// Largest generated edge weight
    #[arg(long, default_value_t = 9)]
    max_weight: u32,

    /// Generator seed
    #[arg(long, default_value_t = 1)]
    seed: u64,
}

/// Log level for the flags given; `None` disables logging.
fn log_level(cli: &Cli) -> Option<tracing::Level> {
    if cli.verbose {
        // Per-step events are emitted at TRACE.
        Some(if cli.steps {
            tracing::Level::TRACE
        } else {
            tracing::Level::DEBUG
        })
    } else if cli.quiet {
        None
    } else {
        Some(tracing::Level::INFO)
    }
}

fn main() {
    let cli = Cli::parse();

    // Set up logging based on verbosity
    if let Some(level) = log_level(&cli) {
        tracing_subscriber::fmt()
            .with_max_level(level)
            .with_writer(std::io::stderr)
            .init();
    }

    let pacing = commands::Pacing {
        format: cli.format.into(),
        quiet: cli.quiet,
        steps: cli.steps,
        delay: std::time::Duration::from_millis(cli.delay_ms),
        step_limit: cli.step_limit,
    };

    let result = match cli.command {
        Commands::Grid { rows, cols, search } => {
            commands::grid::run_open(rows, cols, &search, &pacing)
        }
        Commands::Maze {
            rows,
            cols,
            seed,
            search,
        } => commands::grid::run_maze(rows, cols, seed, &search, &pacing),
        Commands::Color {
            network,
            palette,
            assignments,
        } => commands::network::color(&network, palette, &assignments, &pacing),
        Commands::Mst { network, selection } => {
            commands::network::mst(&network, &selection, &pacing)
        }
        Commands::Cycle { network, directed } => {
            commands::network::cycle(&network, directed, &pacing)
        }
    };

    if let Err(e) = result {
        output::error(&format!("{e:#}"));
        std::process::exit(1);
    }
}
