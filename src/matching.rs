//! Run detection: straight lines of three or more same-colored tiles.
//!
//! Only runs through a given pivot are examined by `match_set`. `all_matches` applies
//! it to every occupied cell, which is what the cascade uses once tiles have fallen.
use crate::engine::{Grid, Tile};

/// Minimum number of tiles in a clearable run.
pub const MIN_RUN: usize = 3;

/// The two axes a run can lie along.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Axis {
    Horizontal,
    Vertical,
}

impl Axis {
    /// Unit step `(d_row, d_col)` along the axis.
    fn delta(self) -> (isize, isize) {
        match self {
            Axis::Horizontal => (0, 1),
            Axis::Vertical => (1, 0),
        }
    }
}

/// Finds the maximal contiguous run of `tile`'s color through `tile` along `axis`.
///
/// Walks outward in both directions while the next cell is in bounds, occupied and of
/// the same color. The result always contains the pivot exactly once, first, followed
/// by the tiles found in the positive direction and then the negative one. A run of
/// length 1 means the pivot has no same-colored neighbour along the axis.
pub fn directional_run(grid: &Grid, tile: &Tile, axis: Axis) -> Vec<Tile> {
    let (dr, dc) = axis.delta();
    let mut run = vec![*tile];

    for step in [1isize, -1] {
        let mut row = tile.position.0 as isize;
        let mut col = tile.position.1 as isize;
        loop {
            row += dr * step;
            col += dc * step;
            if !grid.is_valid(row, col) {
                break;
            }
            match grid.get(row as usize, col as usize) {
                Ok(Some(next)) if next.color == tile.color => run.push(next),
                _ => break,
            }
        }
    }
    run
}

/// Returns the tiles cleared by a match through `tile`, or an empty vector.
///
/// | horizontal | vertical | result                      |
/// |------------|----------|-----------------------------|
/// | >= 3       | >= 3     | union of both (cross shape) |
/// | >= 3       | < 3      | horizontal run              |
/// | < 3        | >= 3     | vertical run                |
/// | < 3        | < 3      | empty                       |
///
/// The pivot of a cross appears once. The result is sorted row-major by position.
pub fn match_set(grid: &Grid, tile: &Tile) -> Vec<Tile> {
    let horizontal = directional_run(grid, tile, Axis::Horizontal);
    let vertical = directional_run(grid, tile, Axis::Vertical);

    let mut matched = match (horizontal.len() >= MIN_RUN, vertical.len() >= MIN_RUN) {
        (true, true) => {
            let mut union = horizontal;
            union.extend(vertical.into_iter().skip(1)); // pivot already present
            union
        }
        (true, false) => horizontal,
        (false, true) => vertical,
        (false, false) => Vec::new(),
    };
    matched.sort_unstable_by_key(|t| t.position);
    matched
}

/// Every tile on the grid that belongs to some match, each listed once, in row-major order.
pub fn all_matches(grid: &Grid) -> Vec<Tile> {
    let mut in_match = vec![false; grid.cell_count()];
    let cols = grid.cols();

    for tile in grid.tiles() {
        for matched in match_set(grid, &tile) {
            let (mr, mc) = matched.position;
            in_match[mr * cols + mc] = true;
        }
    }

    grid.tiles()
        .filter(|tile| in_match[tile.position.0 * cols + tile.position.1])
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::Color;
    use crate::utils::grid_from_str_array;

    fn tile_at(grid: &Grid, r: usize, c: usize) -> Tile {
        grid.get(r, c).unwrap().unwrap()
    }

    fn positions(tiles: &[Tile]) -> Vec<(usize, usize)> {
        tiles.iter().map(|t| t.position).collect()
    }

    #[test]
    fn test_directional_run_includes_pivot_once() {
        let grid = grid_from_str_array(&["brrrb"]).unwrap();
        let run = directional_run(&grid, &tile_at(&grid, 0, 2), Axis::Horizontal);
        assert_eq!(run.len(), 3);
        assert_eq!(run[0].position, (0, 2));
        let mut sorted = positions(&run);
        sorted.sort_unstable();
        assert_eq!(sorted, vec![(0, 1), (0, 2), (0, 3)]);
    }

    #[test]
    fn test_directional_run_stops_at_empty_and_edge() {
        let grid = grid_from_str_array(&["r", "r", ".", "r"]).unwrap();
        let run = directional_run(&grid, &tile_at(&grid, 0, 0), Axis::Vertical);
        assert_eq!(positions(&run), vec![(0, 0), (1, 0)]);
    }

    #[test]
    fn test_special_variant_does_not_extend_base_run() {
        let grid = grid_from_str_array(&["rrR"]).unwrap();
        let run = directional_run(&grid, &tile_at(&grid, 0, 0), Axis::Horizontal);
        assert_eq!(run.len(), 2);
        assert!(match_set(&grid, &tile_at(&grid, 0, 0)).is_empty());
    }

    #[test]
    fn test_match_set_horizontal_only() {
        let grid = grid_from_str_array(&["yyyb", "bbry"]).unwrap();
        let matched = match_set(&grid, &tile_at(&grid, 0, 1));
        assert_eq!(positions(&matched), vec![(0, 0), (0, 1), (0, 2)]);
    }

    #[test]
    fn test_match_set_vertical_only() {
        let grid = grid_from_str_array(&["tb", "tb", "tr", "bt"]).unwrap();
        let matched = match_set(&grid, &tile_at(&grid, 2, 0));
        assert_eq!(positions(&matched), vec![(0, 0), (1, 0), (2, 0)]);
    }

    #[test]
    fn test_match_set_cross_counts_pivot_once() {
        let grid = grid_from_str_array(&[".p.", "ppp", ".p."]).unwrap();
        let matched = match_set(&grid, &tile_at(&grid, 1, 1));
        assert_eq!(matched.len(), 5);
        assert_eq!(
            positions(&matched),
            vec![(0, 1), (1, 0), (1, 1), (1, 2), (2, 1)]
        );
        assert!(matched.iter().all(|t| t.color == Color::Pink));
    }

    #[test]
    fn test_match_set_no_match() {
        let grid = grid_from_str_array(&["rrb", "bry"]).unwrap();
        assert!(match_set(&grid, &tile_at(&grid, 0, 0)).is_empty());
    }

    #[test]
    fn test_all_matches_deduplicates_across_pivots() {
        let grid = grid_from_str_array(&["rrrb", "bydy", "bddd", "btyp"]).unwrap();
        let matched = all_matches(&grid);
        assert_eq!(
            positions(&matched),
            vec![
                (0, 0),
                (0, 1),
                (0, 2),
                (1, 0),
                (2, 0),
                (2, 1),
                (2, 2),
                (2, 3),
                (3, 0)
            ]
        );
    }

    #[test]
    fn test_all_matches_on_empty_grid() {
        assert!(all_matches(&Grid::new_empty(4, 4)).is_empty());
    }
}
