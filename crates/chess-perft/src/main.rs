//! chess-perft - move generator validation from the command line.
//!
//! Counts leaf nodes of the legal move tree for a single position, splits the
//! count by root move, or checks a whole TOML suite of reference positions.

mod suite;

use anyhow::{bail, Context};
use chess_core::FenParser;
use chess_rules::{perft, perft_divide, Game};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::time::Instant;
use suite::Suite;
use tracing_subscriber::EnvFilter;

/// Perft runner for the chess rules engine.
#[derive(Parser)]
#[command(name = "chess-perft")]
#[command(about = "Counts legal move tree nodes to validate move generation")]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Count leaf nodes at a depth
    Perft {
        /// Position to search from
        #[arg(long, default_value = FenParser::STARTPOS)]
        fen: String,

        /// Depth in plies
        depth: u32,
    },
    /// Count leaf nodes per root move
    Divide {
        /// Position to search from
        #[arg(long, default_value = FenParser::STARTPOS)]
        fen: String,

        /// Depth in plies
        depth: u32,
    },
    /// Check every case of a suite file
    Suite {
        /// Path to the suite file
        #[arg(default_value = "perft-suite.toml")]
        path: PathBuf,

        /// Skip cases deeper than this
        #[arg(long)]
        max_depth: Option<u32>,
    },
}

fn load(fen: &str) -> anyhow::Result<Game> {
    Game::from_fen(fen).with_context(|| format!("invalid FEN: {}", fen))
}

fn run_perft(fen: &str, depth: u32) -> anyhow::Result<()> {
    let mut game = load(fen)?;
    let start = Instant::now();
    let nodes = perft(&mut game, depth);
    let elapsed = start.elapsed();
    tracing::info!("depth {} in {:.3}s", depth, elapsed.as_secs_f64());
    println!("{}", nodes);
    Ok(())
}

fn run_divide(fen: &str, depth: u32) -> anyhow::Result<()> {
    let mut game = load(fen)?;
    let start = Instant::now();
    let divide = perft_divide(&mut game, depth);
    let elapsed = start.elapsed();

    let mut total = 0;
    for (algebra, nodes) in &divide {
        println!("{}: {}", algebra, nodes);
        total += nodes;
    }
    println!();
    println!("Moves: {}", divide.len());
    println!("Nodes: {}", total);
    tracing::info!("divide depth {} in {:.3}s", depth, elapsed.as_secs_f64());
    Ok(())
}

fn run_suite(path: &Path, max_depth: Option<u32>) -> anyhow::Result<()> {
    let suite = Suite::load(path).with_context(|| format!("loading {:?}", path))?;
    tracing::info!("Suite: {:?} ({} cases)", path, suite.cases.len());

    let mut failures = Vec::new();
    let mut checked = 0;
    for case in suite.cases_within(max_depth) {
        let mut game = load(&case.fen)?;
        let start = Instant::now();
        let nodes = perft(&mut game, case.depth);
        let elapsed = start.elapsed();
        checked += 1;

        if nodes == case.nodes {
            tracing::info!(
                "{}: depth {} ok, {} nodes in {:.3}s",
                case.name,
                case.depth,
                nodes,
                elapsed.as_secs_f64()
            );
        } else {
            tracing::error!(
                "{}: depth {} expected {} nodes, got {}",
                case.name,
                case.depth,
                case.nodes,
                nodes
            );
            failures.push(case.name.as_str());
        }
    }

    if !failures.is_empty() {
        bail!(
            "{} of {} cases failed: {}",
            failures.len(),
            checked,
            failures.join(", ")
        );
    }
    println!("{} cases passed", checked);
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
    let args = Args::parse();

    match args.command {
        Command::Perft { fen, depth } => run_perft(&fen, depth),
        Command::Divide { fen, depth } => run_divide(&fen, depth),
        Command::Suite { path, max_depth } => run_suite(&path, max_depth),
    }
}
