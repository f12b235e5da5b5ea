//! Cascade simulation for a single swap.
//!
//! A simulation runs on a private clone of the caller's grid and walks through
//! `swapped -> matched -> cleared -> settled`, repeating `matched -> cleared -> settled`
//! until a pass finds nothing to clear:
//! 1. The two tiles of the swap are exchanged.
//! 2. The first pass only looks for matches through the two swapped cells; every later
//!    pass scans the whole grid with `all_matches`, since falling tiles can line up anywhere.
//! 3. Matched tiles are counted per color and removed.
//! 4. Gravity compacts every column downward. Vacated top cells stay empty unless a
//!    `TileGenerator` refills them.
use crate::engine::{Color, Grid, Position, Tile};
use crate::error::{EngineError, InvalidSwapReason};
use crate::matching::{all_matches, match_set};
use log::debug;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use std::collections::BTreeMap;
use std::fmt;

/// Default pass cap is `rows * cols * CASCADE_PASS_FACTOR`.
pub const CASCADE_PASS_FACTOR: usize = 4;

/// Per-color count of cleared tiles.
pub type ScoreByColor = BTreeMap<Color, usize>;

/// An unordered pair of orthogonally adjacent grid coordinates.
///
/// The pair is stored in row-major order, so `Swap::new(a, b) == Swap::new(b, a)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Swap {
    first: Position,
    second: Position,
}

impl Swap {
    /// Creates a swap between two orthogonally adjacent coordinates.
    ///
    /// # Errors
    /// `EngineError::InvalidSwap` with `NotAdjacent` if the coordinates are equal,
    /// diagonal, or further apart.
    ///
    /// # Examples
    /// ```
    /// use match3_solver::cascade::Swap;
    /// let swap = Swap::new((1, 2), (0, 2)).unwrap();
    /// assert_eq!(swap.first(), (0, 2));
    /// assert_eq!(swap, Swap::new((0, 2), (1, 2)).unwrap());
    /// assert!(Swap::new((0, 0), (1, 1)).is_err());
    /// ```
    pub fn new(a: Position, b: Position) -> Result<Self, EngineError> {
        if a.0.abs_diff(b.0) + a.1.abs_diff(b.1) != 1 {
            return Err(EngineError::InvalidSwap {
                first: a,
                second: b,
                reason: InvalidSwapReason::NotAdjacent,
            });
        }
        let (first, second) = if a < b { (a, b) } else { (b, a) };
        Ok(Swap { first, second })
    }

    pub fn first(&self) -> Position {
        self.first
    }

    pub fn second(&self) -> Position {
        self.second
    }

    pub fn positions(&self) -> [Position; 2] {
        [self.first, self.second]
    }

    fn invalid(&self, reason: InvalidSwapReason) -> EngineError {
        EngineError::InvalidSwap {
            first: self.first,
            second: self.second,
            reason,
        }
    }
}

impl fmt::Display for Swap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({}, {}) <-> ({}, {})",
            self.first.0, self.first.1, self.second.0, self.second.1
        )
    }
}

/// Supplies colors for cells left empty after gravity.
pub trait TileGenerator {
    /// Color for the new tile at `position`, or `None` to leave the cell empty.
    fn next_color(&mut self, position: Position) -> Option<Color>;
}

/// Never refills; vacated cells stay empty for the rest of the cascade.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoRefill;

impl TileGenerator for NoRefill {
    fn next_color(&mut self, _position: Position) -> Option<Color> {
        None
    }
}

/// Refills with random base colors from a seeded `SmallRng`.
#[derive(Clone, Debug)]
pub struct RandomRefill {
    rng: SmallRng,
}

impl RandomRefill {
    pub fn new(seed: u64) -> Self {
        RandomRefill {
            rng: SmallRng::seed_from_u64(seed),
        }
    }
}

impl TileGenerator for RandomRefill {
    fn next_color(&mut self, _position: Position) -> Option<Color> {
        let palette = Color::base_colors();
        Some(palette[self.rng.gen_range(0..palette.len())])
    }
}

/// Result of simulating one swap to completion.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CascadeOutcome {
    /// Cleared tiles per color, summed over every pass.
    pub score_by_color: ScoreByColor,
    /// Number of passes that cleared at least one tile.
    pub passes: usize,
    /// Number of tiles created by the refill generator.
    pub refilled: usize,
    /// The grid after the final pass.
    pub grid: Grid,
}

impl CascadeOutcome {
    pub fn total_cleared(&self) -> usize {
        self.score_by_color.values().sum()
    }
}

/// Runs swaps to completion on private copies of a grid.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CascadeSimulator {
    max_passes: Option<usize>,
}

impl CascadeSimulator {
    /// A simulator using the default pass cap for each grid it is given.
    pub fn new() -> Self {
        CascadeSimulator { max_passes: None }
    }

    /// A simulator that fails once more than `max_passes` clearing passes are needed.
    pub fn with_max_passes(max_passes: usize) -> Self {
        CascadeSimulator {
            max_passes: Some(max_passes),
        }
    }

    /// The pass cap applied to `grid`.
    pub fn pass_cap(&self, grid: &Grid) -> usize {
        self.max_passes
            .unwrap_or_else(|| (grid.cell_count() * CASCADE_PASS_FACTOR).max(1))
    }

    /// Simulates `swap` on a copy of `grid` without refill. `grid` is never modified.
    pub fn simulate(&self, grid: &Grid, swap: Swap) -> Result<CascadeOutcome, EngineError> {
        self.simulate_with_refill(grid, swap, &mut NoRefill)
    }

    /// Simulates `swap` on a copy of `grid`, refilling empty cells after every
    /// gravity step from `refill`.
    ///
    /// # Errors
    /// * `EngineError::InvalidSwap` if either cell is off the grid or empty. Nothing is
    ///   simulated in that case.
    /// * `EngineError::CascadeDidNotTerminate` if the pass cap is exceeded.
    pub fn simulate_with_refill(
        &self,
        grid: &Grid,
        swap: Swap,
        refill: &mut dyn TileGenerator,
    ) -> Result<CascadeOutcome, EngineError> {
        for (r, c) in swap.positions() {
            match grid.get(r, c) {
                Err(_) => return Err(swap.invalid(InvalidSwapReason::OutOfBounds)),
                Ok(None) => return Err(swap.invalid(InvalidSwapReason::EmptyCell)),
                Ok(Some(_)) => {}
            }
        }

        let mut work = grid.clone();
        work.swap_cells(swap.first(), swap.second())?;

        let cap = self.pass_cap(grid);
        let mut score_by_color = ScoreByColor::new();
        let mut passes = 0;
        let mut refilled = 0;
        let mut cleared = swapped_matches(&work, swap)?;

        while !cleared.is_empty() {
            if passes >= cap {
                return Err(EngineError::CascadeDidNotTerminate { passes });
            }
            passes += 1;

            for tile in &cleared {
                *score_by_color.entry(tile.color).or_insert(0) += 1;
                work.take(tile.position.0, tile.position.1)?;
            }
            let moved = work.apply_gravity();
            let added = refill_empty_cells(&mut work, refill)?;
            refilled += added;
            debug!(
                "swap {}: pass {} cleared {} tiles, {} fell, {} refilled",
                swap,
                passes,
                cleared.len(),
                moved,
                added
            );

            cleared = all_matches(&work);
        }

        Ok(CascadeOutcome {
            score_by_color,
            passes,
            refilled,
            grid: work,
        })
    }
}

/// Simulates `swap` on a copy of `grid` with the default simulator.
pub fn simulate(grid: &Grid, swap: Swap) -> Result<CascadeOutcome, EngineError> {
    CascadeSimulator::new().simulate(grid, swap)
}

/// Matches through the two swapped cells only, merged and deduplicated.
fn swapped_matches(grid: &Grid, swap: Swap) -> Result<Vec<Tile>, EngineError> {
    let mut matched = Vec::new();
    for (r, c) in swap.positions() {
        if let Some(tile) = grid.get(r, c)? {
            matched.extend(match_set(grid, &tile));
        }
    }
    matched.sort_unstable_by_key(|t| t.position);
    matched.dedup_by_key(|t| t.position);
    Ok(matched)
}

fn refill_empty_cells(grid: &mut Grid, refill: &mut dyn TileGenerator) -> Result<usize, EngineError> {
    let mut added = 0;
    for (r, c) in grid.empty_positions() {
        if let Some(color) = refill.next_color((r, c)) {
            grid.place(r, c, color)?;
            added += 1;
        }
    }
    Ok(added)
}
