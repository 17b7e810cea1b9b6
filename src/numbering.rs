//! Clue numbering and word extraction (spec component C6): a pure function of the solved
//! grid, run once after the search engine reports success.

use std::collections::HashMap;

use crate::grid::Grid;
use crate::types::{char_of, Direction, SlotId};

/// One across/down entry in the final puzzle.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde_derive::Serialize, serde_derive::Deserialize))]
pub struct Entry {
    pub number: u16,
    pub length: usize,
    pub start: (usize, usize),
    pub word: String,
}

/// The across and down entries of a solved puzzle, each sorted by number.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde_derive::Serialize, serde_derive::Deserialize))]
pub struct Entries {
    pub across: Vec<Entry>,
    pub down: Vec<Entry>,
}

/// Number a solved grid and extract its across/down entries. `grid` must have every slot
/// fully filled (panics otherwise; the search engine never calls this on a partial grid).
#[must_use]
pub fn number_grid(grid: &Grid) -> (Entries, Vec<Vec<Option<u16>>>) {
    let n = grid.width();

    let mut across_starts: HashMap<(usize, usize), SlotId> = HashMap::new();
    let mut down_starts: HashMap<(usize, usize), SlotId> = HashMap::new();
    for slot in grid.slots() {
        let start = (slot.start_row, slot.start_col);
        match slot.direction {
            Direction::Across => {
                across_starts.insert(start, slot.id);
            }
            Direction::Down => {
                down_starts.insert(start, slot.id);
            }
        }
    }

    let mut numbering = vec![vec![None; n]; n];
    let mut slot_numbers: HashMap<SlotId, u16> = HashMap::new();
    let mut next_number: u16 = 1;

    for r in 0..n {
        for c in 0..n {
            let across_id = across_starts.get(&(r, c));
            let down_id = down_starts.get(&(r, c));
            if across_id.is_none() && down_id.is_none() {
                continue;
            }

            numbering[r][c] = Some(next_number);
            if let Some(&id) = across_id {
                slot_numbers.insert(id, next_number);
            }
            if let Some(&id) = down_id {
                slot_numbers.insert(id, next_number);
            }
            next_number += 1;
        }
    }

    let mut across = Vec::new();
    let mut down = Vec::new();
    for slot in grid.slots() {
        let number = slot_numbers[&slot.id];
        let glyphs = grid
            .glyphs_of(slot)
            .expect("number_grid requires every slot to be fully filled");
        let word: String = glyphs.iter().map(|&g| char_of(g)).collect();
        let entry = Entry {
            number,
            length: slot.length,
            start: (slot.start_row, slot.start_col),
            word,
        };
        match slot.direction {
            Direction::Across => across.push(entry),
            Direction::Down => down.push(entry),
        }
    }
    across.sort_by_key(|e| e.number);
    down.sort_by_key(|e| e.number);

    (Entries { across, down }, numbering)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::glyph_of;

    #[test]
    fn numbers_are_strictly_increasing_over_starting_cells() {
        let mut grid = Grid::empty(3);
        let words = ["cat", "art", "tar"];
        let across_slots = grid.slots()[0..3].to_vec();
        for (slot, word) in across_slots.iter().zip(words) {
            let glyphs: Vec<_> = word.chars().map(glyph_of).collect();
            grid.place(slot, &glyphs).unwrap();
        }
        // Fill the down slots too so `glyphs_of` never sees an empty cell.
        for col in 0..3 {
            let down = grid
                .slots()
                .iter()
                .find(|s| s.direction == Direction::Down && s.start_col == col)
                .unwrap()
                .clone();
            if grid.glyphs_of(&down).is_none() {
                // Rows already fully determine every down slot in this all-open 3x3 grid.
                panic!("down slot {col} unexpectedly incomplete");
            }
        }

        let (entries, numbering) = number_grid(&grid);

        let mut seen_numbers = Vec::new();
        for r in 0..3 {
            for c in 0..3 {
                if let Some(num) = numbering[r][c] {
                    seen_numbers.push(num);
                }
            }
        }
        for pair in seen_numbers.windows(2) {
            assert!(pair[0] < pair[1]);
        }
        assert_eq!(seen_numbers.first().copied(), Some(1));

        assert_eq!(entries.across.len() + entries.down.len(), 6);
        assert!(entries.across.windows(2).all(|p| p[0].number < p[1].number));
        assert!(entries.down.windows(2).all(|p| p[0].number < p[1].number));
    }

    #[test]
    fn numbering_is_none_off_of_slot_starts() {
        let mut grid = Grid::empty(3);
        for (slot, word) in grid.slots()[0..3].to_vec().iter().zip(["cat", "art", "tar"]) {
            let glyphs: Vec<_> = word.chars().map(glyph_of).collect();
            grid.place(slot, &glyphs).unwrap();
        }
        let (_, numbering) = number_grid(&grid);
        // (2, 2) only continues row 2's across slot and column 2's down slot; it starts
        // neither, so it gets no number.
        assert!(numbering[2][2].is_none());
    }
}
