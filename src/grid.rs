//! The grid model (spec component C2): an N×N board of cells, the slots it admits, and
//! the operations the search engine uses to read and mutate it.

use std::collections::{HashMap, HashSet};

use crate::types::{Cell, Direction, Glyph, Pattern, PatternAtom, SlotId};
use crate::GenerationError;

/// A perpendicular intersection: from the owning slot's perspective, cell `cell_index`
/// also belongs to `other_slot_id` at that slot's position `other_index`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Crossing {
    pub other_slot_id: SlotId,
    pub other_index: usize,
}

/// A maximal run of non-`Block` cells of length ≥ 3 (spec.md §3, "Slot").
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Slot {
    pub id: SlotId,
    pub direction: Direction,
    pub start_row: usize,
    pub start_col: usize,
    pub length: usize,
    /// Indexed by position within the slot; `None` if that cell has no perpendicular slot.
    pub crossings: Vec<Option<Crossing>>,
}

impl Slot {
    /// The `(row, col)` of the cell at `index` within this slot.
    #[must_use]
    pub fn cell_at(&self, index: usize) -> (usize, usize) {
        match self.direction {
            Direction::Across => (self.start_row, self.start_col + index),
            Direction::Down => (self.start_row + index, self.start_col),
        }
    }
}

/// An N×N board of cells plus the (immutable, content-independent) slots it admits.
#[derive(Debug, Clone)]
pub struct Grid {
    width: usize,
    cells: Vec<Cell>,
    slots: Vec<Slot>,
}

impl Grid {
    /// An N×N grid with no blocks (used for N ≤ 4, per spec.md §4.3).
    #[must_use]
    pub fn empty(n: usize) -> Grid {
        Grid::with_blocks(n, &HashSet::new())
    }

    /// An N×N grid with the given cells marked `Block`.
    #[must_use]
    pub fn with_blocks(n: usize, blocks: &HashSet<(usize, usize)>) -> Grid {
        let mut cells = vec![Cell::Empty; n * n];
        for &(r, c) in blocks {
            cells[r * n + c] = Cell::Block;
        }
        let slots = compute_slots(n, &cells);
        Grid {
            width: n,
            cells,
            slots,
        }
    }

    #[must_use]
    pub fn width(&self) -> usize {
        self.width
    }

    #[must_use]
    pub fn cell(&self, row: usize, col: usize) -> Cell {
        self.cells[row * self.width + col]
    }

    /// Deterministic list of slots, derived from the block layout alone.
    #[must_use]
    pub fn slots(&self) -> &[Slot] {
        &self.slots
    }

    /// The pattern a slot currently presents, reading off live cell contents.
    #[must_use]
    pub fn pattern_of(&self, slot: &Slot) -> Pattern {
        (0..slot.length)
            .map(|i| {
                let (r, c) = slot.cell_at(i);
                match self.cell(r, c) {
                    Cell::Letter(g) => PatternAtom::Fixed(g),
                    Cell::Empty => PatternAtom::Wildcard,
                    Cell::Block => unreachable!("slot cell can't be a block"),
                }
            })
            .collect()
    }

    /// Read a slot's cells back out as glyphs, e.g. once it's known to be fully filled.
    #[must_use]
    pub fn glyphs_of(&self, slot: &Slot) -> Option<Vec<Glyph>> {
        (0..slot.length)
            .map(|i| {
                let (r, c) = slot.cell_at(i);
                self.cell(r, c).glyph()
            })
            .collect()
    }

    /// Snapshot a slot's cells, for later restoration via [`Grid::unplace`].
    #[must_use]
    pub fn snapshot(&self, slot: &Slot) -> Vec<Cell> {
        (0..slot.length)
            .map(|i| {
                let (r, c) = slot.cell_at(i);
                self.cell(r, c)
            })
            .collect()
    }

    /// Write `word`'s letters into `slot`'s cells. Every affected cell must currently be
    /// `Empty` or already hold the letter being written; violating this is a caller bug
    /// (the feasibility checker is responsible for only proposing compatible candidates)
    /// and is reported as [`GenerationError::Invariant`].
    pub fn place(&mut self, slot: &Slot, word: &[Glyph]) -> Result<(), GenerationError> {
        assert_eq!(word.len(), slot.length, "word length must match slot length");

        for (i, &glyph) in word.iter().enumerate() {
            let (r, c) = slot.cell_at(i);
            match self.cell(r, c) {
                Cell::Empty => {}
                Cell::Letter(existing) if existing == glyph => {}
                Cell::Letter(_) => {
                    return Err(GenerationError::Invariant {
                        row: r,
                        col: c,
                        message: "place() precondition violated: conflicting letter".into(),
                    })
                }
                Cell::Block => {
                    return Err(GenerationError::Invariant {
                        row: r,
                        col: c,
                        message: "place() precondition violated: cell is a block".into(),
                    })
                }
            }
        }

        for (i, &glyph) in word.iter().enumerate() {
            let (r, c) = slot.cell_at(i);
            let idx = r * self.width + c;
            self.cells[idx] = Cell::Letter(glyph);
        }
        Ok(())
    }

    /// Restore `slot`'s cells to the state captured by an earlier [`Grid::snapshot`] call.
    /// Must undo a matching [`Grid::place`] exactly.
    pub fn unplace(&mut self, slot: &Slot, before: &[Cell]) {
        assert_eq!(before.len(), slot.length, "snapshot length must match slot length");
        for (i, &cell) in before.iter().enumerate() {
            let (r, c) = slot.cell_at(i);
            let idx = r * self.width + c;
            self.cells[idx] = cell;
        }
    }
}

/// Compute the deterministic slot list (and their crossings) for a grid whose only
/// letter-vs-block distinction is given by `cells`. Across slots come first, ordered by
/// `(start_row, start_col)`; Down slots follow, ordered by `(start_col, start_row)`, per
/// spec.md §3.
fn compute_slots(n: usize, cells: &[Cell]) -> Vec<Slot> {
    let is_block = |r: usize, c: usize| cells[r * n + c] == Cell::Block;

    let mut across_runs = Vec::new();
    for r in 0..n {
        let mut c = 0;
        while c < n {
            if is_block(r, c) {
                c += 1;
                continue;
            }
            let start = c;
            while c < n && !is_block(r, c) {
                c += 1;
            }
            let length = c - start;
            if length >= 3 {
                across_runs.push((r, start, length));
            }
        }
    }

    let mut down_runs = Vec::new();
    for c in 0..n {
        let mut r = 0;
        while r < n {
            if is_block(r, c) {
                r += 1;
                continue;
            }
            let start = r;
            while r < n && !is_block(r, c) {
                r += 1;
            }
            let length = r - start;
            if length >= 3 {
                down_runs.push((c, start, length));
            }
        }
    }

    let mut slots = Vec::with_capacity(across_runs.len() + down_runs.len());
    // Map from (row, col) to (slot_id, index_within_slot), built incrementally so the
    // second pass (crossings) can look up the perpendicular slot in O(1).
    let mut across_by_cell: HashMap<(usize, usize), (SlotId, usize)> = HashMap::new();
    let mut down_by_cell: HashMap<(usize, usize), (SlotId, usize)> = HashMap::new();

    for (row, start_col, length) in across_runs {
        let id = slots.len();
        for i in 0..length {
            across_by_cell.insert((row, start_col + i), (id, i));
        }
        slots.push(Slot {
            id,
            direction: Direction::Across,
            start_row: row,
            start_col,
            length,
            crossings: Vec::new(), // filled in below
        });
    }

    for (col, start_row, length) in down_runs {
        let id = slots.len();
        for i in 0..length {
            down_by_cell.insert((start_row + i, col), (id, i));
        }
        slots.push(Slot {
            id,
            direction: Direction::Down,
            start_row,
            start_col: col,
            length,
            crossings: Vec::new(),
        });
    }

    for slot in &mut slots {
        let mut crossings = Vec::with_capacity(slot.length);
        for i in 0..slot.length {
            let (r, c) = slot.cell_at(i);
            let perpendicular = match slot.direction {
                Direction::Across => down_by_cell.get(&(r, c)),
                Direction::Down => across_by_cell.get(&(r, c)),
            };
            crossings.push(perpendicular.map(|&(other_slot_id, other_index)| Crossing {
                other_slot_id,
                other_index,
            }));
        }
        slot.crossings = crossings;
    }

    slots
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::glyph_of;

    #[test]
    fn all_open_3x3_has_six_slots() {
        let grid = Grid::empty(3);
        assert_eq!(grid.slots().len(), 6);
        assert!(grid.slots().iter().all(|s| s.length == 3));
    }

    #[test]
    fn across_slots_precede_down_and_are_ordered() {
        let grid = Grid::empty(4);
        let across: Vec<_> = grid
            .slots()
            .iter()
            .filter(|s| s.direction == Direction::Across)
            .collect();
        for pair in across.windows(2) {
            assert!(
                (pair[0].start_row, pair[0].start_col) <= (pair[1].start_row, pair[1].start_col)
            );
        }
    }

    #[test]
    fn blocks_split_rows_and_runs_under_three_are_excluded() {
        let mut blocks = HashSet::new();
        blocks.insert((2, 2)); // center of a 5x5, symmetric partner is itself
        let grid = Grid::with_blocks(5, &blocks);
        for slot in grid.slots() {
            assert!(slot.length >= 3);
            for i in 0..slot.length {
                let (r, c) = slot.cell_at(i);
                assert_ne!((r, c), (2, 2));
            }
        }
    }

    #[test]
    fn place_and_unplace_round_trip() {
        let mut grid = Grid::empty(3);
        let slot = grid.slots()[0].clone();
        let before = grid.snapshot(&slot);
        let word: Vec<_> = "cat".chars().map(glyph_of).collect();
        grid.place(&slot, &word).unwrap();
        assert_eq!(grid.cell(slot.start_row, slot.start_col), Cell::Letter(glyph_of('c')));
        grid.unplace(&slot, &before);
        assert_eq!(grid.cell(slot.start_row, slot.start_col), Cell::Empty);
    }

    #[test]
    fn place_rejects_conflicting_letter() {
        let mut grid = Grid::empty(3);
        let slot = grid.slots()[0].clone();
        let word: Vec<_> = "cat".chars().map(glyph_of).collect();
        grid.place(&slot, &word).unwrap();

        let conflicting: Vec<_> = "dog".chars().map(glyph_of).collect();
        assert!(grid.place(&slot, &conflicting).is_err());
    }

    #[test]
    fn crossings_are_mutually_consistent() {
        let grid = Grid::empty(3);
        for slot in grid.slots() {
            for (i, crossing) in slot.crossings.iter().enumerate() {
                if let Some(crossing) = crossing {
                    let other = &grid.slots()[crossing.other_slot_id];
                    let back = other.crossings[crossing.other_index].unwrap();
                    assert_eq!(back.other_slot_id, slot.id);
                    assert_eq!(back.other_index, i);
                    assert_eq!(slot.cell_at(i), other.cell_at(crossing.other_index));
                }
            }
        }
    }
}
