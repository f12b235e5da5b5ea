//! Property tests over randomly generated grids.

use crate::cascade::simulate;
use crate::engine::{Color, Grid};
use crate::matching::{directional_run, match_set, Axis};
use crate::solver::{candidate_moves, evaluate_all};
use proptest::prelude::*;

/// Strategy: a `rows x cols` grid over a small palette with some empty cells, so that
/// runs and cascades are common.
fn arb_grid(max_rows: usize, max_cols: usize) -> impl Strategy<Value = Grid> {
    (1..=max_rows, 1..=max_cols).prop_flat_map(|(rows, cols)| {
        proptest::collection::vec(
            prop_oneof![
                1 => Just(None),
                3 => Just(Some(Color::Red)),
                3 => Just(Some(Color::Blue)),
                3 => Just(Some(Color::Yellow)),
            ],
            rows * cols,
        )
        .prop_map(move |cells| {
            let mut grid = Grid::new_empty(rows, cols);
            for (i, cell) in cells.into_iter().enumerate() {
                if let Some(color) = cell {
                    grid.place(i / cols, i % cols, color).unwrap();
                }
            }
            grid
        })
    })
}

proptest! {
    #[test]
    fn prop_is_valid_matches_bounds(rows in 0usize..10, cols in 0usize..10, r in -3isize..13, c in -3isize..13) {
        let grid = Grid::new_empty(rows, cols);
        let expected = r >= 0 && c >= 0 && (r as usize) < rows && (c as usize) < cols;
        prop_assert_eq!(grid.is_valid(r, c), expected);
    }

    #[test]
    fn prop_run_is_same_from_any_member(grid in arb_grid(6, 6)) {
        for tile in grid.tiles() {
            for axis in [Axis::Horizontal, Axis::Vertical] {
                let mut run = directional_run(&grid, &tile, axis);
                prop_assert_eq!(run.iter().filter(|t| **t == tile).count(), 1);
                run.sort_unstable_by_key(|t| t.position);
                for member in &run {
                    let mut other = directional_run(&grid, member, axis);
                    other.sort_unstable_by_key(|t| t.position);
                    prop_assert_eq!(&other, &run);
                }
            }
        }
    }

    #[test]
    fn prop_match_set_has_no_duplicates(grid in arb_grid(6, 6)) {
        for tile in grid.tiles() {
            let matched = match_set(&grid, &tile);
            let mut positions: Vec<_> = matched.iter().map(|t| t.position).collect();
            positions.dedup();
            prop_assert_eq!(positions.len(), matched.len());
            prop_assert!(matched.is_empty() || matched.len() >= 3);
        }
    }

    #[test]
    fn prop_cascade_conserves_tiles(grid in arb_grid(6, 6)) {
        let before = grid.tile_count();
        for swap in candidate_moves(&grid) {
            let outcome = simulate(&grid, swap).unwrap();
            prop_assert_eq!(outcome.grid.tile_count() + outcome.total_cleared(), before);
            for tile in outcome.grid.tiles() {
                prop_assert_eq!(outcome.grid.get(tile.position.0, tile.position.1), Ok(Some(tile)));
            }
        }
        prop_assert_eq!(grid.tile_count(), before);
    }

    #[test]
    fn prop_evaluate_all_is_deterministic(grid in arb_grid(6, 6)) {
        let first = evaluate_all(&grid);
        let second = evaluate_all(&grid);
        prop_assert_eq!(first.len(), candidate_moves(&grid).len());
        prop_assert_eq!(first, second);
    }
}
