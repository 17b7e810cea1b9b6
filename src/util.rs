//! Small shared helpers: the English letter-frequency table used for candidate ordering
//! (spec.md §4.5) and the scoring function built on top of it.

use lazy_static::lazy_static;

use crate::types::{Glyph, Pattern, PatternAtom};

lazy_static! {
    /// Relative frequency of each letter `a..=z` in English text, used to weight
    /// wildcard-filling letters when ordering candidates: words that fill crossing cells
    /// with common letters are tried first, since they're more likely to leave compatible
    /// completions for the slots they cross.
    pub static ref LETTER_FREQUENCY: [f32; 26] = [
        8.17, 1.49, 2.78, 4.25, 12.70, 2.23, 2.02, 6.09, 7.00, 0.15, 0.77, 4.03, 2.41, 6.75,
        7.51, 1.93, 0.10, 5.99, 6.33, 9.06, 2.76, 0.98, 2.36, 0.15, 1.97, 0.07,
    ];
}

/// Sum of letter-frequency weights over the positions of `glyphs` that were `Wildcard` in
/// `pattern` before this candidate was considered. Higher is tried first under
/// [`crate::search::CandidateOrdering::Heuristic`].
#[must_use]
pub fn letter_frequency_score(glyphs: &[Glyph], pattern: &Pattern) -> f32 {
    glyphs
        .iter()
        .zip(pattern.iter())
        .filter(|(_, atom)| matches!(atom, PatternAtom::Wildcard))
        .map(|(&g, _)| LETTER_FREQUENCY[g as usize])
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::glyph_of;

    #[test]
    fn score_only_counts_wildcard_positions() {
        let glyphs: Vec<Glyph> = "cat".chars().map(glyph_of).collect();
        let pattern: Pattern = vec![
            PatternAtom::Fixed(glyph_of('c')),
            PatternAtom::Wildcard,
            PatternAtom::Wildcard,
        ]
        .into_iter()
        .collect();

        let expected = LETTER_FREQUENCY[glyph_of('a') as usize] + LETTER_FREQUENCY[glyph_of('t') as usize];
        assert!((letter_frequency_score(&glyphs, &pattern) - expected).abs() < f32::EPSILON);
    }
}
