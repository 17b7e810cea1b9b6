//! Command-line entry point. Reads a line-delimited word list, generates a filled grid,
//! and prints the grid plus its numbered across/down entries. A convenience wrapper around
//! [`gridfill_core::generate_filled_grid`] for local experimentation — the word-list file
//! format here is not a specified interface (spec.md's "word-list ingestion" is explicitly a
//! collaborator concern).

use std::fs;
use std::process::ExitCode;

use clap::Parser;
use log::{error, info};

use gridfill_core::search::CandidateOrdering;
use gridfill_core::types::Cell;
use gridfill_core::word_list::WordList;
use gridfill_core::{generate_filled_grid, GenerationConfig};

#[derive(Parser, Debug)]
#[command(name = "gridfill_cli", about = "Fill a crossword grid from a word list")]
struct Args {
    /// Path to a word list file, one word per line.
    #[arg(long)]
    words: String,

    /// Grid size (3..=7).
    #[arg(long, default_value_t = 5)]
    size: usize,

    /// RNG seed, for reproducible layouts and fills.
    #[arg(long, default_value_t = 1)]
    seed: u64,

    /// Backtrack budget per attempt.
    #[arg(long, default_value_t = 10_000)]
    max_backtracks: usize,

    /// Number of independent attempts before giving up.
    #[arg(long, default_value_t = 3)]
    max_restarts: usize,

    /// Max candidates considered per slot before truncation.
    #[arg(long, default_value_t = 150)]
    candidate_cap: usize,

    /// Use random candidate ordering instead of the letter-frequency heuristic.
    #[arg(long, default_value_t = false)]
    random_ordering: bool,
}

fn main() -> ExitCode {
    env_logger::init();
    let args = Args::parse();

    let contents = match fs::read_to_string(&args.words) {
        Ok(contents) => contents,
        Err(err) => {
            error!("failed to read word list {:?}: {err}", args.words);
            return ExitCode::FAILURE;
        }
    };
    let dictionary = WordList::build(contents.lines());
    info!("loaded dictionary from {:?}", args.words);

    let mut config = GenerationConfig::new(args.size, &dictionary, args.seed);
    config.max_backtracks = args.max_backtracks;
    config.max_restarts = args.max_restarts;
    config.candidate_cap = args.candidate_cap;
    config.ordering = if args.random_ordering {
        CandidateOrdering::Random
    } else {
        CandidateOrdering::Heuristic
    };

    match generate_filled_grid(config) {
        Ok(puzzle) => {
            info!(
                "solved in {} states ({} backtracks, {} restarts)",
                puzzle.statistics.states, puzzle.statistics.backtracks, puzzle.statistics.restarts
            );
            print_grid(&puzzle.grid);
            println!();
            println!("Across:");
            for entry in &puzzle.entries.across {
                println!("  {:>3}. {}", entry.number, entry.word);
            }
            println!("Down:");
            for entry in &puzzle.entries.down {
                println!("  {:>3}. {}", entry.number, entry.word);
            }
            ExitCode::SUCCESS
        }
        Err(err) => {
            error!("generation failed: {err}");
            ExitCode::FAILURE
        }
    }
}

fn print_grid(grid: &[Vec<Cell>]) {
    for row in grid {
        let line: String = row.iter().map(|cell| cell.to_string()).collect();
        println!("{line}");
    }
}
