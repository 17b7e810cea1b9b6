//! Tracks which dictionary words are currently placed in the grid, so the search engine
//! and feasibility checker can reject duplicates (spec.md §3, "Used-word set").
//!
//! The teacher's `dupe_index` additionally tracks partial substring collisions between
//! words of different lengths (a common crossword-editorial rule beyond plain exact
//! duplication); spec.md only requires exact no-repeat, so this is the smaller, spec-scoped
//! analog of that idea rather than a port of it.

use std::collections::HashSet;

/// The set of dictionary words currently placed somewhere in the grid.
#[derive(Debug, Default, Clone)]
pub struct UsedWords {
    words: HashSet<String>,
}

impl UsedWords {
    #[must_use]
    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(word)
    }

    /// Record `word` as placed. Returns `false` if it was already present (a caller bug:
    /// the feasibility checker should have refused the candidate before this point).
    pub fn insert(&mut self, word: &str) -> bool {
        self.words.insert(word.to_string())
    }

    /// Remove `word`, pairing with an earlier [`UsedWords::insert`] during backtracking.
    pub fn remove(&mut self, word: &str) {
        self.words.remove(word);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.words.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_remove_round_trip() {
        let mut used = UsedWords::default();
        assert!(!used.contains("cat"));
        used.insert("cat");
        assert!(used.contains("cat"));
        used.remove("cat");
        assert!(!used.contains("cat"));
    }

    #[test]
    fn insert_reports_existing() {
        let mut used = UsedWords::default();
        assert!(used.insert("cat"));
        assert!(!used.insert("cat"));
    }
}
