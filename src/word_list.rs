//! The dictionary index (spec component C1): a length-bucketed trie supporting exact
//! membership and pattern-match queries. Built once per process and shared read-only by
//! every [`crate::search`] invocation.

use std::collections::{HashMap, HashSet};

use crate::types::{char_of, glyph_of, Glyph, Pattern, PatternAtom, WordId};

/// A single dictionary entry: its glyphs (for fast pattern comparison) and the owned
/// string (returned to callers, since [`WordId`] is only meaningful within one bucket).
#[derive(Debug, Clone)]
struct WordEntry {
    glyphs: Vec<Glyph>,
    text: String,
}

/// One node of a length bucket's trie. Matches the teacher's `words[length][word_id]`
/// indexing scheme: leaves carry a `WordId` rather than owning the word themselves.
#[derive(Debug, Default)]
struct TrieNode {
    children: [Option<Box<TrieNode>>; 26],
    word_id: Option<WordId>,
}

impl TrieNode {
    fn child_mut(&mut self, glyph: Glyph) -> &mut TrieNode {
        self.children[glyph as usize].get_or_insert_with(|| Box::new(TrieNode::default()))
    }

    fn child(&self, glyph: Glyph) -> Option<&TrieNode> {
        self.children[glyph as usize].as_deref()
    }
}

/// A single length bucket: the trie used for pattern queries plus the word entries it
/// indexes into.
#[derive(Debug, Default)]
struct Bucket {
    root: TrieNode,
    entries: Vec<WordEntry>,
}

/// Whether [`WordList::build`] should reject malformed candidates or silently skip them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildMode {
    /// Skip words containing non-alphabetic characters (the default).
    Lenient,
    /// Fail the whole build with [`BuildError::MalformedWord`] on the first offender.
    Strict,
}

/// Error produced by [`WordList::build`] in [`BuildMode::Strict`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MalformedWordError(pub String);

impl std::fmt::Display for MalformedWordError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "malformed dictionary candidate: {:?}", self.0)
    }
}

impl std::error::Error for MalformedWordError {}

/// Normalize a candidate dictionary string: trim, lowercase, and check it's non-empty and
/// entirely alphabetic. Returns `None` for anything that doesn't qualify.
#[must_use]
pub fn normalize_word(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    let lower = trimmed.to_lowercase();
    if lower.chars().all(|c| c.is_ascii_alphabetic()) {
        Some(lower)
    } else {
        None
    }
}

/// The immutable, shared dictionary index described in spec.md §4.1 (C1). Built once from
/// an external word source and thereafter only read.
#[derive(Debug, Default)]
pub struct WordList {
    buckets: HashMap<usize, Bucket>,
    all_words: HashSet<String>,
}

impl WordList {
    /// Build an index from an unordered iterable of candidate strings. Normalizes
    /// (trim/lowercase), deduplicates, and partitions by length. In [`BuildMode::Lenient`]
    /// (the default via [`WordList::build`]) malformed candidates are silently dropped; in
    /// [`BuildMode::Strict`] the first one aborts the build.
    pub fn build_with_mode<I, S>(words: I, mode: BuildMode) -> Result<WordList, MalformedWordError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut list = WordList::default();
        for raw in words {
            let raw = raw.as_ref();
            match normalize_word(raw) {
                Some(word) => {
                    list.insert(word);
                }
                None if mode == BuildMode::Strict => {
                    return Err(MalformedWordError(raw.to_string()));
                }
                None => {}
            }
        }
        Ok(list)
    }

    /// Build an index in the default (lenient) mode; malformed candidates are skipped.
    #[must_use]
    pub fn build<I, S>(words: I) -> WordList
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        WordList::build_with_mode(words, BuildMode::Lenient)
            .expect("lenient build never produces an Err")
    }

    fn insert(&mut self, word: String) {
        if !self.all_words.insert(word.clone()) {
            return; // already present
        }

        let glyphs: Vec<Glyph> = word.chars().map(glyph_of).collect();
        let bucket = self.buckets.entry(glyphs.len()).or_default();
        let word_id = bucket.entries.len();
        bucket.entries.push(WordEntry {
            glyphs: glyphs.clone(),
            text: word,
        });

        let mut node = &mut bucket.root;
        for &glyph in &glyphs {
            node = node.child_mut(glyph);
        }
        node.word_id = Some(word_id);
    }

    /// Number of distinct words of the given length.
    #[must_use]
    pub fn count_of_length(&self, length: usize) -> usize {
        self.buckets.get(&length).map_or(0, |b| b.entries.len())
    }

    /// Exact-match membership, case-insensitive. O(|word|).
    #[must_use]
    pub fn contains(&self, word: &str) -> bool {
        match normalize_word(word) {
            Some(normalized) => self.all_words.contains(&normalized),
            None => false,
        }
    }

    /// Look up the text of a word by its bucket length and id.
    #[must_use]
    pub fn text_of(&self, length: usize, word_id: WordId) -> &str {
        &self.buckets[&length].entries[word_id].text
    }

    /// Look up the glyphs of a word by its bucket length and id.
    #[must_use]
    pub fn glyphs_of(&self, length: usize, word_id: WordId) -> &[Glyph] {
        &self.buckets[&length].entries[word_id].glyphs
    }

    /// Enumerate every dictionary word of exactly `length` matching `pattern`, in
    /// lexicographic order. Panics if `pattern.len() != length`, per spec.md §4.1 ("pattern
    /// length mismatch... is rejected as a programming error").
    #[must_use]
    pub fn matching(&self, length: usize, pattern: &Pattern) -> Vec<(WordId, &str)> {
        assert_eq!(
            pattern.len(),
            length,
            "pattern length must match requested length"
        );

        let mut out = Vec::new();
        if length == 0 {
            return out;
        }
        let Some(bucket) = self.buckets.get(&length) else {
            return out;
        };

        let mut prefix = Vec::with_capacity(length);
        Self::walk_matching(&bucket.root, pattern, 0, &mut prefix, &mut |word_id| {
            out.push((word_id, bucket.entries[word_id].text.as_str()));
        });
        // Trie descent order follows glyph order (a..z) at every position, which is
        // already lexicographic, but an explicit sort keeps the guarantee documentation-
        // visible regardless of traversal order changes.
        out.sort_by_key(|(_, text)| *text);
        out
    }

    /// As [`WordList::matching`], but returns only the count, never materializing the
    /// matching strings. Still O(size of the pruned search): an empty result is detected
    /// as soon as the trie has no viable child at some position, without ever reaching a
    /// leaf.
    #[must_use]
    pub fn count_matching(&self, length: usize, pattern: &Pattern) -> usize {
        assert_eq!(
            pattern.len(),
            length,
            "pattern length must match requested length"
        );

        if length == 0 {
            return 0;
        }
        let Some(bucket) = self.buckets.get(&length) else {
            return 0;
        };

        Self::count_walk(&bucket.root, pattern, 0)
    }

    fn walk_matching(
        node: &TrieNode,
        pattern: &Pattern,
        depth: usize,
        _prefix: &mut Vec<Glyph>,
        emit: &mut impl FnMut(WordId),
    ) {
        if depth == pattern.len() {
            if let Some(word_id) = node.word_id {
                emit(word_id);
            }
            return;
        }

        match pattern[depth] {
            PatternAtom::Fixed(glyph) => {
                if let Some(child) = node.child(glyph) {
                    Self::walk_matching(child, pattern, depth + 1, _prefix, emit);
                }
            }
            PatternAtom::Wildcard => {
                for glyph in 0..26u8 {
                    if let Some(child) = node.child(glyph) {
                        Self::walk_matching(child, pattern, depth + 1, _prefix, emit);
                    }
                }
            }
        }
    }

    fn count_walk(node: &TrieNode, pattern: &Pattern, depth: usize) -> usize {
        if depth == pattern.len() {
            return usize::from(node.word_id.is_some());
        }

        match pattern[depth] {
            PatternAtom::Fixed(glyph) => node
                .child(glyph)
                .map_or(0, |child| Self::count_walk(child, pattern, depth + 1)),
            PatternAtom::Wildcard => (0..26u8)
                .filter_map(|glyph| node.child(glyph))
                .map(|child| Self::count_walk(child, pattern, depth + 1))
                .sum(),
        }
    }
}

/// Build a [`Pattern`] from a string where `'?'` denotes a wildcard position and any other
/// character is a fixed letter. Convenience for tests and the CLI's seed-word handling.
#[must_use]
pub fn pattern_from_str(s: &str) -> Pattern {
    s.chars()
        .map(|c| {
            if c == '?' {
                PatternAtom::Wildcard
            } else {
                PatternAtom::Fixed(glyph_of(c.to_ascii_lowercase()))
            }
        })
        .collect()
}
