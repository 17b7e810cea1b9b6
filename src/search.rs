//! The search engine (spec component C5): MRV-style backtracking that fills the grid one
//! slot at a time, checking feasibility before committing and backtracking exactly on
//! failure. Mirrors the teacher's `find_fill_for_seed` loop in shape (choose a slot, try
//! candidates in order, recurse, undo on failure) but the state machine here is an
//! explicit recursive function over an owned `SearchState`, per spec.md §9's direction to
//! replace "ad-hoc recursion with mutable closures over outer state."

use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use crate::dupe_index::UsedWords;
use crate::feasibility::is_feasible;
use crate::grid::{Grid, Slot};
use crate::types::{Glyph, PatternAtom, SlotId};
use crate::word_list::WordList;
use crate::GenerationError;

/// Candidate ordering policy for a chosen slot (spec.md §4.5 / §6).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CandidateOrdering {
    /// Order by descending letter-frequency score (the default).
    Heuristic,
    /// Shuffle using the search's seeded rng.
    Random,
}

/// Per-attempt and per-call budget/behavior knobs (the parts of [`crate::GenerationConfig`]
/// the search engine itself consumes).
#[derive(Debug, Clone)]
pub struct SearchConfig {
    pub max_backtracks: usize,
    pub max_restarts: usize,
    pub candidate_cap: usize,
    pub ordering: CandidateOrdering,
}

impl Default for SearchConfig {
    fn default() -> SearchConfig {
        SearchConfig {
            max_backtracks: 10_000,
            max_restarts: 3,
            candidate_cap: 150,
            ordering: CandidateOrdering::Heuristic,
        }
    }
}

/// A word pre-placed into a named slot before the first recursion (spec.md §4.5,
/// "Seeding"). The engine treats that slot as already assigned.
#[derive(Debug, Clone)]
pub struct SeedWord {
    pub slot_id: SlotId,
    pub word: String,
}

/// Diagnostic counters surfaced alongside a solved (or exhausted) attempt. Not part of the
/// spec's solution-validity contract; purely observational, mirroring the teacher's
/// `backtracking_search::Statistics`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Statistics {
    pub states: usize,
    pub backtracks: usize,
    pub restarts: usize,
}

/// Outcome of one recursive call: either every slot got assigned, or this branch (and
/// everything below it) has nothing left to try.
enum FillOutcome {
    Solved,
    Exhausted,
}

struct SearchState<'a> {
    grid: Grid,
    slots: Vec<Slot>,
    dictionary: &'a WordList,
    used_words: UsedWords,
    assignment: Vec<Option<String>>,
    rng: SmallRng,
    config: &'a SearchConfig,
    stats: Statistics,
}

/// Run one fill attempt against `grid` (which may already carry blocks, and may already
/// have a slot pre-filled via `seed_word`). Returns the filled grid plus diagnostics, or
/// [`GenerationError::Unsolvable`] if every attempt exhausted its backtrack budget or ran
/// out of candidates outright.
pub fn solve(
    grid: &Grid,
    dictionary: &WordList,
    seed: u64,
    config: &SearchConfig,
    seed_word: Option<&SeedWord>,
) -> Result<(Grid, Statistics), GenerationError> {
    let mut total_stats = Statistics::default();

    for attempt in 0..config.max_restarts.max(1) {
        let attempt_seed = seed.wrapping_add(attempt as u64);
        let mut state = SearchState {
            grid: grid.clone(),
            slots: grid.slots().to_vec(),
            dictionary,
            used_words: UsedWords::default(),
            assignment: vec![None; grid.slots().len()],
            rng: SmallRng::seed_from_u64(attempt_seed),
            config,
            stats: Statistics::default(),
        };

        if let Some(seed_word) = seed_word {
            apply_seed_word(&mut state, seed_word)?;
        }

        match try_fill(&mut state) {
            FillOutcome::Solved => {
                total_stats.states += state.stats.states;
                total_stats.backtracks += state.stats.backtracks;
                total_stats.restarts = attempt;
                return Ok((state.grid, total_stats));
            }
            FillOutcome::Exhausted => {
                total_stats.states += state.stats.states;
                total_stats.backtracks += state.stats.backtracks;
            }
        }
    }

    Err(GenerationError::Unsolvable)
}

fn apply_seed_word(state: &mut SearchState, seed_word: &SeedWord) -> Result<(), GenerationError> {
    let slot = state.slots[seed_word.slot_id].clone();
    let glyphs: Vec<Glyph> = seed_word
        .word
        .chars()
        .map(crate::types::glyph_of)
        .collect();
    state.grid.place(&slot, &glyphs)?;
    state.used_words.insert(&seed_word.word);
    state.assignment[seed_word.slot_id] = Some(seed_word.word.clone());
    Ok(())
}

fn try_fill(state: &mut SearchState) -> FillOutcome {
    state.stats.states += 1;

    let Some(slot_id) = select_next_slot(state) else {
        return FillOutcome::Solved;
    };

    let slot = state.slots[slot_id].clone();
    let pattern = state.grid.pattern_of(&slot);
    let candidates = order_candidates(state, &slot, &pattern);

    for (glyphs, text) in candidates {
        if !is_feasible(
            &state.grid,
            &state.slots,
            state.dictionary,
            &state.used_words,
            &slot,
            &glyphs,
            &text,
        ) {
            continue;
        }

        let before = state.grid.snapshot(&slot);
        if state.grid.place(&slot, &glyphs).is_err() {
            // The feasibility checker should have ruled this out already; treat it as a
            // rejected candidate rather than propagating, since backtracking past it is
            // always safe.
            continue;
        }
        state.used_words.insert(&text);
        state.assignment[slot_id] = Some(text.clone());

        match try_fill(state) {
            FillOutcome::Solved => return FillOutcome::Solved,
            FillOutcome::Exhausted => {
                state.grid.unplace(&slot, &before);
                state.used_words.remove(&text);
                state.assignment[slot_id] = None;
                state.stats.backtracks += 1;
                if state.stats.backtracks > state.config.max_backtracks {
                    return FillOutcome::Exhausted;
                }
            }
        }
    }

    FillOutcome::Exhausted
}

/// Most-constrained-variable slot selection (spec.md §4.5): fewest wildcards first, ties
/// broken by fewest dictionary candidates, further ties by slot id.
fn select_next_slot(state: &SearchState) -> Option<SlotId> {
    state
        .slots
        .iter()
        .filter(|slot| state.assignment[slot.id].is_none())
        .map(|slot| {
            let pattern = state.grid.pattern_of(slot);
            let wildcards = pattern
                .iter()
                .filter(|atom| matches!(atom, PatternAtom::Wildcard))
                .count();
            let candidate_count = state.dictionary.count_matching(slot.length, &pattern);
            (slot.id, wildcards, candidate_count)
        })
        .min_by_key(|&(id, wildcards, candidate_count)| (wildcards, candidate_count, id))
        .map(|(id, _, _)| id)
}

/// Candidate words for `slot`, deduplicated against the used-word set, ordered per
/// [`CandidateOrdering`], and truncated to `candidate_cap`.
fn order_candidates(
    state: &mut SearchState,
    slot: &Slot,
    pattern: &crate::types::Pattern,
) -> Vec<(Vec<Glyph>, String)> {
    let mut candidates: Vec<(Vec<Glyph>, String, f32)> = state
        .dictionary
        .matching(slot.length, pattern)
        .into_iter()
        .filter(|(_, text)| !state.used_words.contains(text))
        .map(|(word_id, text)| {
            let glyphs = state.dictionary.glyphs_of(slot.length, word_id).to_vec();
            let score = crate::util::letter_frequency_score(&glyphs, pattern);
            (glyphs, text.to_string(), score)
        })
        .collect();

    match state.config.ordering {
        CandidateOrdering::Heuristic => {
            candidates.sort_by(|a, b| {
                b.2.partial_cmp(&a.2)
                    .unwrap_or(std::cmp::Ordering::Equal)
                    .then_with(|| a.1.cmp(&b.1))
            });
        }
        CandidateOrdering::Random => {
            candidates.shuffle(&mut state.rng);
        }
    }

    candidates.truncate(state.config.candidate_cap);
    candidates
        .into_iter()
        .map(|(glyphs, text, _)| (glyphs, text))
        .collect()
}
