//! Next-generation computation over a sparse board
//!
//! Only cells that can change are visited: every live cell and its 8
//! neighbours. Each live cell adds one to the count of each neighbour, so the
//! work is `8 × live cells` no matter how far apart the cells are.

use super::{LiveSet, Rule};
use crate::geometry::Coordinate;
use rustc_hash::FxHashMap;

/// Advance one generation under Conway's rule (B3/S23)
pub fn step(live: &LiveSet) -> LiveSet {
    step_with(live, &Rule::CONWAY)
}

/// Advance one generation under an arbitrary Life-like rule
pub fn step_with(live: &LiveSet, rule: &Rule) -> LiveSet {
    let mut counts: FxHashMap<Coordinate, u8> =
        FxHashMap::with_capacity_and_hasher(live.len() * 8, Default::default());

    for cell in live.iter() {
        for neighbor in cell.neighbors() {
            *counts.entry(neighbor).or_insert(0) += 1;
        }
    }

    let mut next = LiveSet::with_capacity(live.len());

    // Cells with no live neighbours never appear in `counts`; they can only
    // survive under a rule with S0
    if rule.survives_on(0) {
        next.extend(live.iter().filter(|cell| !counts.contains_key(cell)));
    }

    for (cell, count) in counts {
        let alive = if live.contains(cell) {
            rule.survives_on(count)
        } else {
            rule.births_on(count)
        };
        if alive {
            next.insert(cell);
        }
    }

    next
}

#[cfg(test)]
mod tests {
    use super::*;

    fn live(cells: &[(i32, i32)]) -> LiveSet {
        cells.iter().map(|&c| Coordinate::from(c)).collect()
    }

    #[test]
    fn test_empty_stays_empty() {
        assert!(step(&LiveSet::new()).is_empty());
    }

    #[test]
    fn test_lonely_cell_dies() {
        assert!(step(&live(&[(0, 0)])).is_empty());
    }

    #[test]
    fn test_block_is_stable() {
        let block = live(&[(0, 0), (0, 1), (1, 0), (1, 1)]);
        assert_eq!(step(&block), block);
    }

    #[test]
    fn test_blinker_oscillates() {
        let horizontal = live(&[(0, 0), (0, 1), (0, 2)]);
        let vertical = live(&[(-1, 1), (0, 1), (1, 1)]);
        assert_eq!(step(&horizontal), vertical);
        assert_eq!(step(&vertical), horizontal);
    }

    #[test]
    fn test_distant_cells_are_independent() {
        // Two blocks a long way apart step exactly like each block alone
        let far = 1_000_000_000;
        let board = live(&[
            (0, 0),
            (0, 1),
            (1, 0),
            (1, 1),
            (far, far),
            (far, far + 1),
            (far + 1, far),
            (far + 1, far + 1),
        ]);
        assert_eq!(step(&board), board);
    }

    #[test]
    fn test_glider_translates() {
        let glider = live(&[(0, 1), (1, 2), (2, 0), (2, 1), (2, 2)]);
        let mut board = glider.clone();
        for _ in 0..4 {
            board = step(&board);
        }
        let moved: LiveSet = glider
            .iter()
            .map(|c| Coordinate::new(c.row + 1, c.col + 1))
            .collect();
        assert_eq!(board, moved);
    }

    #[test]
    fn test_other_rule() {
        // Under B2/S (Seeds) a domino makes two new cells on each long side
        let seeds = Rule::parse("B2/S").unwrap();
        let next = step_with(&live(&[(0, 0), (0, 1)]), &seeds);
        assert_eq!(next, live(&[(-1, 0), (-1, 1), (1, 0), (1, 1)]));
    }

    #[test]
    fn test_survive_on_zero() {
        let rule = Rule::parse("B3/S0").unwrap();
        let lonely = live(&[(0, 0)]);
        assert_eq!(step_with(&lonely, &rule), lonely);
    }
}
