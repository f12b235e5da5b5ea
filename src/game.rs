//! Interactive play session.
//!
//! `Game` owns the live grid and applies swaps to it for real: each accepted swap runs
//! the full cascade with random refill, so the board stays full the way it does in a
//! real match-3 game.
use crate::cascade::{CascadeOutcome, CascadeSimulator, RandomRefill, ScoreByColor, Swap};
use crate::engine::{Grid, Position, DEFAULT_SEED};
use crate::error::EngineError;
use crate::solver::evaluate_all;
use log::debug;

/// Manages the state and progression of a play session.
///
/// # Examples
/// ```
/// use match3_solver::game::Game;
/// use match3_solver::utils::grid_from_str_array;
///
/// let grid = grid_from_str_array(&["ypb", "rrb", "ybr"]).unwrap();
/// let mut game = Game::new_with_grid(grid, 1);
/// let outcome = game.process_swap((1, 2), (2, 2)).unwrap();
/// assert!(outcome.total_cleared() >= 3);
/// assert_eq!(game.steps(), 1);
/// assert!(game.undo_last_move());
/// assert_eq!(game.steps(), 0);
/// ```
#[derive(Clone, Debug)]
pub struct Game {
    grid: Grid,
    score_by_color: ScoreByColor,
    steps: u32,
    refill: RandomRefill,
    simulator: CascadeSimulator,
    history: Vec<(Grid, ScoreByColor, u32)>,
}

impl Game {
    /// Creates a new game on `Grid::new_random`, refilled from `DEFAULT_SEED`.
    pub fn new(rows: usize, cols: usize) -> Self {
        Self::new_with_grid(Grid::new_random(rows, cols), DEFAULT_SEED)
    }

    /// Creates a new game on `grid`, refilling vacated cells from `refill_seed`.
    pub fn new_with_grid(grid: Grid, refill_seed: u64) -> Self {
        Game {
            grid: grid.clone(),
            score_by_color: ScoreByColor::new(),
            steps: 0,
            refill: RandomRefill::new(refill_seed),
            simulator: CascadeSimulator::new(),
            history: vec![(grid, ScoreByColor::new(), 0)],
        }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Tiles cleared so far, per color.
    pub fn score_by_color(&self) -> &ScoreByColor {
        &self.score_by_color
    }

    pub fn total_cleared(&self) -> usize {
        self.score_by_color.values().sum()
    }

    pub fn steps(&self) -> u32 {
        self.steps
    }

    /// Swaps the tiles at `a` and `b` and runs the resulting cascade on the live grid.
    ///
    /// A swap that clears nothing is rejected: it returns an outcome with no cleared
    /// tiles and leaves the grid, score and step count untouched.
    ///
    /// # Errors
    /// `EngineError::InvalidSwap` for non-adjacent, off-grid or empty cells, and
    /// `EngineError::CascadeDidNotTerminate` if the pass cap is hit. The game state is
    /// unchanged on error.
    pub fn process_swap(&mut self, a: Position, b: Position) -> Result<CascadeOutcome, EngineError> {
        let swap = Swap::new(a, b)?;
        // Refill draws from the session RNG only when the swap is kept.
        let mut refill = self.refill.clone();
        let outcome = self
            .simulator
            .simulate_with_refill(&self.grid, swap, &mut refill)?;
        if outcome.passes == 0 {
            return Ok(outcome);
        }

        self.refill = refill;
        self.grid = outcome.grid.clone();
        for (color, count) in &outcome.score_by_color {
            *self.score_by_color.entry(*color).or_insert(0) += count;
        }
        self.steps += 1;
        self.history
            .push((self.grid.clone(), self.score_by_color.clone(), self.steps));
        debug!(
            "step {}: {} cleared {} tiles in {} passes",
            self.steps,
            swap,
            outcome.total_cleared(),
            outcome.passes
        );
        Ok(outcome)
    }

    /// Undoes the last accepted swap.
    ///
    /// # Returns
    /// `false` if no swap has been made yet.
    pub fn undo_last_move(&mut self) -> bool {
        if self.history.len() <= 1 {
            return false;
        }
        self.history.pop();
        match self.history.last() {
            Some((grid, score, steps)) => {
                self.grid = grid.clone();
                self.score_by_color = score.clone();
                self.steps = *steps;
                true
            }
            None => false,
        }
    }

    /// The game is over when no swap on the current grid clears anything.
    pub fn is_game_over(&self) -> bool {
        evaluate_all(&self.grid)
            .iter()
            .all(|mv| mv.total_cleared() == 0)
    }
}
