#![warn(clippy::pedantic)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::comparison_chain)]
#![allow(clippy::implicit_hasher)]
#![allow(clippy::match_on_vec_items)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::module_name_repetitions)]

//! A constraint-satisfaction engine that fills an N×N crossword grid from a dictionary:
//! every maximal horizontal/vertical run of length ≥ 3 ("slot") must spell an admissible
//! word, no word may repeat, and crossing letters must agree.
//!
//! The single entry point is [`generate_filled_grid`]; everything else (the dictionary
//! trie, the grid model, the block layout generator, the feasibility checker, and the
//! backtracking search) is assembled from the modules below. Clue generation, puzzle
//! persistence, and any HTTP/UI surface are deliberately out of scope — collaborators
//! consume [`FilledPuzzle`] and take it from there.

pub mod block_layout;
pub mod dupe_index;
pub mod feasibility;
pub mod grid;
pub mod numbering;
pub mod search;
pub mod types;
pub mod util;
pub mod word_list;

use std::collections::HashMap;

use rand::rngs::SmallRng;
use rand::SeedableRng;

use block_layout::BlockSet;
use grid::Grid;
use numbering::{number_grid, Entries};
use search::{CandidateOrdering, SearchConfig, SeedWord, Statistics};
use types::{Cell, Direction, SlotId};
use word_list::WordList;

/// The expected maximum length for a single slot.
pub const MAX_SLOT_LENGTH: usize = 21;

/// Heuristic floor on admissible words of a given length, below which the search is
/// refused outright rather than burning its backtrack budget on a hopeless dictionary
/// (spec.md §4.5, §8: "at least max(2·N, 10) admissible words of each required length").
#[must_use]
pub fn minimum_words_required(n: usize) -> usize {
    (2 * n).max(10)
}

/// Errors the core can produce. The core never logs, retries silently, or swallows a
/// failure (spec.md §7) — every one of these is returned directly from
/// [`generate_filled_grid`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerationError {
    /// A dictionary candidate failed the alphabetic/length invariant (strict build mode
    /// only).
    MalformedWord(String),
    /// Fewer than the required number of admissible words of `length` were available.
    InsufficientDictionary { length: usize, required: usize, available: usize },
    /// The block layout generator couldn't produce a layout with every slot length ≥ 3.
    LayoutUnreachable,
    /// The search exhausted every restart without finding a solution. Covers both true
    /// infeasibility and budget exhaustion; the core does not distinguish the two.
    Unsolvable,
    /// An internal precondition was violated — a bug, not a user error.
    Invariant { row: usize, col: usize, message: String },
}

impl std::fmt::Display for GenerationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GenerationError::MalformedWord(word) => write!(f, "malformed dictionary word: {word:?}"),
            GenerationError::InsufficientDictionary { length, required, available } => write!(
                f,
                "dictionary has only {available} words of length {length}, need at least {required}"
            ),
            GenerationError::LayoutUnreachable => {
                write!(f, "could not generate a block layout with every slot length >= 3")
            }
            GenerationError::Unsolvable => write!(f, "no solution found within the search budget"),
            GenerationError::Invariant { row, col, message } => {
                write!(f, "internal invariant violated at ({row}, {col}): {message}")
            }
        }
    }
}

impl std::error::Error for GenerationError {}

impl From<word_list::MalformedWordError> for GenerationError {
    fn from(err: word_list::MalformedWordError) -> GenerationError {
        GenerationError::MalformedWord(err.0)
    }
}

/// A word pre-placed into a named slot before the first recursion (spec.md §4.5,
/// "Seeding"), identified by its direction and starting coordinate rather than an
/// internal slot id, since the caller builds this before `slots()` has been computed.
#[derive(Debug, Clone)]
pub struct SeedSpec {
    pub direction: Direction,
    pub start_row: usize,
    pub start_col: usize,
    pub word: String,
}

/// Configuration for one call to [`generate_filled_grid`] (spec.md §6).
pub struct GenerationConfig<'a> {
    pub size: usize,
    pub dictionary: &'a WordList,
    pub seed: u64,
    pub max_backtracks: usize,
    pub max_restarts: usize,
    pub candidate_cap: usize,
    pub ordering: CandidateOrdering,
    pub block_layout: Option<BlockSet>,
    pub seed_word: Option<SeedSpec>,
}

impl<'a> GenerationConfig<'a> {
    #[must_use]
    pub fn new(size: usize, dictionary: &'a WordList, seed: u64) -> GenerationConfig<'a> {
        GenerationConfig {
            size,
            dictionary,
            seed,
            max_backtracks: 10_000,
            max_restarts: 3,
            candidate_cap: 150,
            ordering: CandidateOrdering::Heuristic,
            block_layout: None,
            seed_word: None,
        }
    }
}

/// The result of a successful [`generate_filled_grid`] call.
#[derive(Debug, Clone)]
pub struct FilledPuzzle {
    pub grid: Vec<Vec<Cell>>,
    pub slots: Vec<grid::Slot>,
    pub entries: Entries,
    pub numbering: Vec<Vec<Option<u16>>>,
    pub statistics: Statistics,
}

/// Generate a completed crossword grid per `config`. The single public entry point
/// described in spec.md §6.
pub fn generate_filled_grid(config: GenerationConfig) -> Result<FilledPuzzle, GenerationError> {
    assert!((3..=7).contains(&config.size), "size must be in 3..=7");

    let blocks = match config.block_layout {
        Some(blocks) => blocks,
        None => {
            let mut rng = SmallRng::seed_from_u64(config.seed);
            block_layout::generate(config.size, &mut rng)?
        }
    };
    let grid = Grid::with_blocks(config.size, &blocks);

    check_dictionary_sufficiency(config.dictionary, &grid)?;

    let search_config = SearchConfig {
        max_backtracks: config.max_backtracks,
        max_restarts: config.max_restarts,
        candidate_cap: config.candidate_cap,
        ordering: config.ordering,
    };

    let seed_word = config
        .seed_word
        .map(|spec| resolve_seed_word(&grid, spec))
        .transpose()?;

    let (solved, statistics) = search::solve(
        &grid,
        config.dictionary,
        config.seed,
        &search_config,
        seed_word.as_ref(),
    )?;

    let (entries, numbering) = number_grid(&solved);
    let rendered: Vec<Vec<Cell>> = (0..config.size)
        .map(|r| (0..config.size).map(|c| solved.cell(r, c)).collect())
        .collect();

    Ok(FilledPuzzle {
        grid: rendered,
        slots: solved.slots().to_vec(),
        entries,
        numbering,
        statistics,
    })
}

fn resolve_seed_word(grid: &Grid, spec: SeedSpec) -> Result<SeedWord, GenerationError> {
    let slot_id: SlotId = grid
        .slots()
        .iter()
        .find(|s| {
            s.direction == spec.direction && s.start_row == spec.start_row && s.start_col == spec.start_col
        })
        .map(|s| s.id)
        .ok_or_else(|| GenerationError::Invariant {
            row: spec.start_row,
            col: spec.start_col,
            message: "seed word does not correspond to any slot".into(),
        })?;
    Ok(SeedWord { slot_id, word: spec.word })
}

/// Refuse to search at all if the dictionary doesn't have enough words of any length the
/// grid's slots require (spec.md §4.5 `InsufficientDictionary`).
fn check_dictionary_sufficiency(dictionary: &WordList, grid: &Grid) -> Result<(), GenerationError> {
    let n = grid.width();
    let required = minimum_words_required(n);

    let mut lengths_seen: HashMap<usize, ()> = HashMap::new();
    for slot in grid.slots() {
        lengths_seen.entry(slot.length).or_insert(());
    }

    for &length in lengths_seen.keys() {
        let available = dictionary.count_of_length(length);
        if available < required {
            return Err(GenerationError::InsufficientDictionary { length, required, available });
        }
    }
    Ok(())
}
