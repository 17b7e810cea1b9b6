//! Small shared types used across the crate: glyph/word ids, cell contents, and the
//! per-slot pattern representation used for dictionary queries.

use smallvec::SmallVec;
use std::fmt;

use crate::MAX_SLOT_LENGTH;

/// A single letter, stored as `0..=25` (`a..=z`) rather than as a `char` so it can index
/// directly into fixed-size arrays (glyph counts, trie children, frequency tables).
pub type Glyph = u8;

/// Convert an ASCII-lowercase letter to its `Glyph` value. Panics if `c` isn't `a..=z`;
/// callers are expected to have validated input via [`crate::word_list::normalize_word`]
/// before this is reached.
#[must_use]
pub fn glyph_of(c: char) -> Glyph {
    debug_assert!(c.is_ascii_lowercase(), "glyph_of called on non-lowercase char {c:?}");
    c as Glyph - b'a'
}

/// Convert a `Glyph` back to its `char` representation.
#[must_use]
pub fn char_of(g: Glyph) -> char {
    (g + b'a') as char
}

/// Identifies a word within a single length bucket of a [`crate::word_list::WordList`].
/// Two words of different lengths may share the same `WordId`; the bucket's length is
/// always known from context (the slot being filled).
pub type WordId = usize;

/// Identifies a [`crate::grid::Slot`] by its position in `Grid::slots()`.
pub type SlotId = usize;

/// The direction a slot runs in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde_derive::Serialize, serde_derive::Deserialize))]
pub enum Direction {
    Across,
    Down,
}

/// The contents of a single grid cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde_derive::Serialize, serde_derive::Deserialize))]
pub enum Cell {
    Empty,
    Block,
    Letter(Glyph),
}

impl Cell {
    #[must_use]
    pub fn glyph(self) -> Option<Glyph> {
        match self {
            Cell::Letter(g) => Some(g),
            _ => None,
        }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Empty => write!(f, "."),
            Cell::Block => write!(f, "#"),
            Cell::Letter(g) => write!(f, "{}", char_of(*g)),
        }
    }
}

/// One position of a [`Pattern`]: either any letter is acceptable, or exactly one is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatternAtom {
    Wildcard,
    Fixed(Glyph),
}

/// The letter constraints for a slot, read position-by-position off the grid (or
/// constructed directly, e.g. to query the dictionary for a hypothetical fill).
///
/// Stack-allocated for the common case (`MAX_SLOT_LENGTH` is 21) to avoid heap churn
/// during search, the way the rest of the crate prefers `SmallVec` over `Vec` for
/// per-slot data.
pub type Pattern = SmallVec<[PatternAtom; MAX_SLOT_LENGTH]>;

/// Render a pattern as a string (`Wildcard` as `?`), primarily for error messages/logs.
#[must_use]
pub fn pattern_to_string(pattern: &Pattern) -> String {
    pattern
        .iter()
        .map(|atom| match atom {
            PatternAtom::Wildcard => '?',
            PatternAtom::Fixed(g) => char_of(*g),
        })
        .collect()
}
