//! The block layout generator (spec component C3): for N ≥ 5, lays out a 180°-rotationally
//! symmetric set of block cells such that every resulting slot has length ≥ 3. For N ≤ 4
//! the all-open layout (no blocks) is used directly.

use std::collections::HashSet;

use rand::Rng;

use crate::GenerationError;

/// The set of `(row, col)` cells marked as blocks. Passed to [`crate::grid::Grid::with_blocks`].
pub type BlockSet = HashSet<(usize, usize)>;

/// Attempt limit for placing a single pair of symmetric blocks before giving up on the
/// current pair-count target.
const PLACEMENT_ATTEMPT_LIMIT: usize = 200;

/// How many times we're willing to raise the pair-count target before surfacing
/// [`GenerationError::LayoutUnreachable`].
const PAIR_COUNT_RETRY_CAP: usize = 6;

/// Generate a symmetric block layout for an `n x n` grid. Returns the empty layout
/// directly for `n <= 4` (spec.md §4.3: "N = 3 or 4: produce an all-open N×N").
pub fn generate(n: usize, rng: &mut impl Rng) -> Result<BlockSet, GenerationError> {
    if n <= 4 {
        return Ok(BlockSet::new());
    }

    let mut target_pairs = n / 2;
    for _ in 0..=PAIR_COUNT_RETRY_CAP {
        if let Some(blocks) = try_build(n, target_pairs, rng) {
            return Ok(blocks);
        }
        target_pairs += 1;
    }

    Err(GenerationError::LayoutUnreachable)
}

/// Try to build a layout with exactly `target_pairs` symmetric block pairs.
///
/// spec.md §4.3 describes confining blocks to interior cells as a "default heuristic," not
/// a hard rule ("not required; the engine tolerates any symmetric layout"). Confining
/// candidates to `1..n-1` in both dimensions turns out to be unsatisfiable for N = 5 and
/// N = 6: any single block placed that far from the border leaves some row or column with
/// a run of length 1 or 2 at the edge, which [`all_runs_admissible`] always rejects — the
/// retry loop would exhaust every pair-count escalation and report `LayoutUnreachable` on
/// every call. Candidates are drawn from the full grid instead; admissibility and symmetry
/// remain the only hard constraints, and a block landing in row/col 0 or n-1 is fine as
/// long as the run split it produces still has length 0 or ≥ 3.
fn try_build(n: usize, target_pairs: usize, rng: &mut impl Rng) -> Option<BlockSet> {
    let mut blocks = BlockSet::new();
    let mut placed = 0;
    let mut attempts = 0;

    while placed < target_pairs && attempts < PLACEMENT_ATTEMPT_LIMIT {
        attempts += 1;
        let r = rng.gen_range(0..n);
        let c = rng.gen_range(0..n);
        if blocks.contains(&(r, c)) {
            continue;
        }

        let (mirror_r, mirror_c) = (n - 1 - r, n - 1 - c);
        blocks.insert((r, c));
        blocks.insert((mirror_r, mirror_c));
        placed += 1;
    }

    if placed < target_pairs {
        return None;
    }

    if all_runs_admissible(n, &blocks) {
        Some(blocks)
    } else {
        None
    }
}

/// Every maximal non-block run, in every row and column, must have length 0 (all blocks)
/// or length ≥ 3. A run of length 1 or 2 is a dead cell that belongs to no slot.
fn all_runs_admissible(n: usize, blocks: &BlockSet) -> bool {
    let is_block = |r: usize, c: usize| blocks.contains(&(r, c));

    for r in 0..n {
        let mut run = 0;
        for c in 0..=n {
            if c < n && !is_block(r, c) {
                run += 1;
            } else {
                if run == 1 || run == 2 {
                    return false;
                }
                run = 0;
            }
        }
    }

    for c in 0..n {
        let mut run = 0;
        for r in 0..=n {
            if r < n && !is_block(r, c) {
                run += 1;
            } else {
                if run == 1 || run == 2 {
                    return false;
                }
                run = 0;
            }
        }
    }

    true
}
