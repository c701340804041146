//! Hex Placement Engine
//!
//! Reads a puzzle definition, plays one game per seed and prints the
//! solutions as a JSON array on stdout. Diagnostics go to stderr.

mod visualization;

use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use hexfall::{persistence, SolveOptions, DEFAULT_PHRASE, DEFAULT_TAG};

/// Plays hexagonal falling-piece puzzles and prints command solutions.
#[derive(Parser)]
#[command(name = "hexfall")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Puzzle definition (JSON).
    #[arg(short = 'f', long = "file")]
    file: PathBuf,

    /// Time limit in seconds.
    #[arg(short = 't', long = "time-limit")]
    time_limit: Option<u64>,

    /// Memory limit in megabytes.
    #[arg(short = 'm', long = "memory-limit")]
    memory_limit: Option<u64>,

    /// Number of cores available.
    #[arg(short = 'c', long = "cores")]
    cores: Option<usize>,

    /// Phrase of power; may be repeated, the first one is spelled into solutions.
    #[arg(short = 'p', long = "phrase", default_value = DEFAULT_PHRASE)]
    phrases: Vec<String>,

    /// Tag attached to every solution record.
    #[arg(long, default_value = DEFAULT_TAG)]
    tag: String,

    /// Trace every placement on stderr.
    #[arg(long)]
    debug: bool,

    /// Print only the starting and final board of each game on stderr.
    #[arg(long)]
    board_only: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let default_level = if cli.debug { "info" } else { "warn" };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .init();

    let program = persistence::load_program(&cli.file)?;
    tracing::info!(
        id = program.id,
        width = program.width,
        height = program.height,
        units = program.units.len(),
        seeds = program.source_seeds.len(),
        time_limit = ?cli.time_limit,
        memory_limit = ?cli.memory_limit,
        cores = ?cli.cores,
        "loaded program"
    );

    let options = SolveOptions {
        phrase: cli.phrases.first().cloned(),
        tag: cli.tag.clone(),
    };

    let records = if cli.debug || cli.board_only {
        let mut trace = visualization::TextTrace::new(cli.debug);
        hexfall::solve_program_with(&program, &options, &mut trace)
    } else {
        hexfall::solve_program(&program, &options)
    };

    persistence::write_records(std::io::stdout().lock(), &records)?;
    Ok(())
}
