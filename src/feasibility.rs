//! The feasibility checker (spec component C4): the one-step look-ahead the search engine
//! runs before committing to a candidate word, verifying every crossing slot is still
//! satisfiable afterwards. Deeper look-ahead is deliberately not performed here — spec.md
//! §4.4 calls this "the minimum look-ahead that catches all immediate contradictions" and
//! leaves deeper conflicts to backtracking.

use crate::dupe_index::UsedWords;
use crate::grid::{Grid, Slot};
use crate::types::{char_of, Glyph, PatternAtom};
use crate::word_list::WordList;

/// Would placing `candidate` (as glyphs) into `slot` keep every crossing slot satisfiable?
///
/// Does *not* mutate `grid`; it derives each crossing's post-placement pattern directly
/// from the grid's current state plus the single hypothetical override, rather than
/// writing and unwriting a scratch copy.
#[must_use]
pub fn is_feasible(
    grid: &Grid,
    slots: &[Slot],
    dictionary: &WordList,
    used_words: &UsedWords,
    slot: &Slot,
    candidate_glyphs: &[Glyph],
    candidate_text: &str,
) -> bool {
    if used_words.contains(candidate_text) {
        return false;
    }

    for (i, &glyph) in candidate_glyphs.iter().enumerate() {
        let Some(crossing) = slot.crossings[i] else {
            continue;
        };
        let other = &slots[crossing.other_slot_id];

        let mut pattern = grid.pattern_of(other);
        pattern[crossing.other_index] = PatternAtom::Fixed(glyph);

        if let Some(word) = fully_fixed_word(&pattern) {
            if word == candidate_text || used_words.contains(&word) || !dictionary.contains(&word)
            {
                return false;
            }
        } else if dictionary.count_matching(other.length, &pattern) == 0 {
            return false;
        }
    }

    true
}

/// If every position of `pattern` is `Fixed`, assemble the word it spells; otherwise `None`.
fn fully_fixed_word(pattern: &crate::types::Pattern) -> Option<String> {
    pattern
        .iter()
        .map(|atom| match atom {
            PatternAtom::Fixed(g) => Some(char_of(*g)),
            PatternAtom::Wildcard => None,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::Grid;
    use crate::types::glyph_of;

    fn glyphs(word: &str) -> Vec<Glyph> {
        word.chars().map(glyph_of).collect()
    }

    #[test]
    fn rejects_duplicate_word() {
        let dictionary = WordList::build(["cat", "car", "arc"]);
        let grid = Grid::empty(3);
        let mut used = UsedWords::default();
        used.insert("cat");

        let slot = grid.slots()[0].clone();
        assert!(!is_feasible(
            &grid,
            grid.slots(),
            &dictionary,
            &used,
            &slot,
            &glyphs("cat"),
            "cat"
        ));
    }

    #[test]
    fn rejects_candidate_that_completes_crossing_to_non_word() {
        // "cat", "bar", "far" are all admissible, but placing "cat" on row 0 would force
        // column 1's down slot (already "?aa" from rows 1 and 2) to complete to "aaa",
        // which isn't in the dictionary.
        let dictionary = WordList::build(["cat", "bar", "far"]);
        let mut grid = Grid::empty(3);
        let used = UsedWords::default();

        let row1 = grid.slots()[1].clone();
        let row2 = grid.slots()[2].clone();
        grid.place(&row1, &glyphs("bar")).unwrap();
        grid.place(&row2, &glyphs("far")).unwrap();

        let row0 = grid.slots()[0].clone();
        assert!(!is_feasible(
            &grid,
            grid.slots(),
            &dictionary,
            &used,
            &row0,
            &glyphs("cat"),
            "cat"
        ));
    }

    #[test]
    fn rejects_when_no_crossing_completion_exists() {
        let dictionary = WordList::build(["cat"]);
        let grid = Grid::empty(3);
        let used = UsedWords::default();
        let slot = grid.slots()[0].clone();

        // With only "cat" in the dictionary, any crossing slot needs its pattern to be
        // compatible with "cat"; "dog" can't possibly complete any crossing.
        assert!(!is_feasible(
            &grid,
            grid.slots(),
            &dictionary,
            &used,
            &slot,
            &glyphs("dog"),
            "dog"
        ));
    }
}
