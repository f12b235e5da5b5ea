//! Move generation and evaluation.
//!
//! Every candidate swap is simulated on its own grid clone, so the evaluations are
//! independent; with the `parallel` feature they run on the rayon thread pool. The
//! output order is always the generation order of `candidate_moves`.
use crate::cascade::{CascadeSimulator, ScoreByColor, Swap};
use crate::engine::{Color, Grid};
use crate::error::EngineError;
use log::{debug, warn};
#[cfg(feature = "parallel")]
use rayon::prelude::*;
use std::fmt;

/// A candidate swap together with what it would clear.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Move {
    swap: Swap,
    score_by_color: ScoreByColor,
}

impl Move {
    pub fn new(swap: Swap, score_by_color: ScoreByColor) -> Self {
        Move {
            swap,
            score_by_color,
        }
    }

    pub fn swap(&self) -> Swap {
        self.swap
    }

    /// Cleared tiles per color over the whole cascade. Colors that were not cleared are absent.
    pub fn score_by_color(&self) -> &ScoreByColor {
        &self.score_by_color
    }

    /// Sum of all cleared tiles.
    pub fn total_cleared(&self) -> usize {
        self.score_by_color.values().sum()
    }

    /// Largest per-color count, or 0 if nothing is cleared.
    pub fn longest_run(&self) -> usize {
        self.score_by_color.values().copied().max().unwrap_or(0)
    }

    /// Number of `color` tiles this move clears.
    pub fn cleared(&self, color: Color) -> usize {
        self.score_by_color.get(&color).copied().unwrap_or(0)
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Move({}", self.swap)?;
        for (color, count) in &self.score_by_color {
            write!(f, ", {}: {}", color, count)?;
        }
        write!(f, ")")
    }
}

/// Outcome of evaluating every candidate on a grid.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EvaluationReport {
    /// Successfully evaluated moves, in generation order.
    pub moves: Vec<Move>,
    /// Candidates whose simulation failed, in generation order.
    pub failures: Vec<(Swap, EngineError)>,
}

/// Enumerates every swap between two orthogonally adjacent occupied cells.
///
/// Cells are visited row-major and each one's neighbours in `Grid::neighbors` order.
/// A pair is emitted once, from its row-major smaller cell. Empty cells generate no
/// swaps in either direction.
pub fn candidate_moves(grid: &Grid) -> Vec<Swap> {
    let mut swaps = Vec::new();
    for tile in grid.tiles() {
        let (r, c) = tile.position;
        for neighbor in grid.neighbors(r, c) {
            if neighbor <= (r, c) {
                continue; // emitted from the other side
            }
            if !matches!(grid.get(neighbor.0, neighbor.1), Ok(Some(_))) {
                continue;
            }
            if let Ok(swap) = Swap::new((r, c), neighbor) {
                swaps.push(swap);
            }
        }
    }
    swaps
}

/// Simulates `swap` with the default simulator and wraps the result into a `Move`.
pub fn evaluate(grid: &Grid, swap: Swap) -> Result<Move, EngineError> {
    evaluate_with(&CascadeSimulator::new(), grid, swap)
}

/// Simulates `swap` with `simulator` and wraps the result into a `Move`.
pub fn evaluate_with(
    simulator: &CascadeSimulator,
    grid: &Grid,
    swap: Swap,
) -> Result<Move, EngineError> {
    let outcome = simulator.simulate(grid, swap)?;
    debug!(
        "evaluated {}: {} cleared over {} passes",
        swap,
        outcome.total_cleared(),
        outcome.passes
    );
    Ok(Move::new(swap, outcome.score_by_color))
}

/// Evaluates every candidate move on `grid` with the default simulator.
///
/// Candidates that fail are logged and skipped. An empty grid, or one without two
/// adjacent tiles, yields an empty vector.
pub fn evaluate_all(grid: &Grid) -> Vec<Move> {
    evaluate_report(&CascadeSimulator::new(), grid).moves
}

/// Evaluates every candidate move on `grid`, keeping failures alongside the moves.
pub fn evaluate_report(simulator: &CascadeSimulator, grid: &Grid) -> EvaluationReport {
    let candidates = candidate_moves(grid);

    #[cfg(feature = "parallel")]
    let results: Vec<(Swap, Result<Move, EngineError>)> = candidates
        .par_iter()
        .map(|&swap| (swap, evaluate_with(simulator, grid, swap)))
        .collect();

    #[cfg(not(feature = "parallel"))]
    let results: Vec<(Swap, Result<Move, EngineError>)> = candidates
        .iter()
        .map(|&swap| (swap, evaluate_with(simulator, grid, swap)))
        .collect();

    let mut report = EvaluationReport::default();
    for (swap, result) in results {
        match result {
            Ok(mv) => report.moves.push(mv),
            Err(err) => {
                warn!("skipping candidate {}: {}", swap, err);
                report.failures.push((swap, err));
            }
        }
    }
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::grid_from_str_array;

    fn swap(a: (usize, usize), b: (usize, usize)) -> Swap {
        Swap::new(a, b).unwrap()
    }

    #[test]
    fn test_candidate_moves_order_and_uniqueness() {
        let grid = grid_from_str_array(&["rb", "yp"]).unwrap();
        assert_eq!(
            candidate_moves(&grid),
            vec![
                swap((0, 0), (1, 0)),
                swap((0, 0), (0, 1)),
                swap((0, 1), (1, 1)),
                swap((1, 0), (1, 1)),
            ]
        );
    }

    #[test]
    fn test_candidate_moves_skip_empty_cells() {
        let grid = grid_from_str_array(&["r.b", "..y"]).unwrap();
        assert_eq!(candidate_moves(&grid), vec![swap((0, 2), (1, 2))]);

        assert!(candidate_moves(&Grid::new_empty(5, 5)).is_empty());
        assert!(candidate_moves(&grid_from_str_array(&["r.b"]).unwrap()).is_empty());
    }

    #[test]
    fn test_scenario_swap_without_match_scores_zero() {
        // Row 0 = [Red, Red, Blue], column 2 = [Blue, Turquoise, Red].
        let grid = grid_from_str_array(&["rrb", "ypt", "pyr"]).unwrap();
        let mv = evaluate(&grid, swap((0, 2), (1, 2))).unwrap();
        assert_eq!(mv.total_cleared(), 0);
        assert_eq!(mv.longest_run(), 0);
        assert!(mv.score_by_color().is_empty());
    }

    #[test]
    fn test_scenario_single_row_horizontal_swap() {
        // Swapping the blue with a red neighbour along the row leaves a run of three.
        let grid = grid_from_str_array(&["rrbrr"]).unwrap();
        let mv = evaluate(&grid, swap((0, 1), (0, 2))).unwrap();
        assert_eq!(mv.total_cleared(), 3);
        assert_eq!(mv.longest_run(), 3);
    }

    #[test]
    fn test_scenario_run_of_five() {
        // A red dropped into the gap of "rr.rr" from below joins all five.
        let grid = grid_from_str_array(&["rrbrr", "yprty"]).unwrap();
        let mv = evaluate(&grid, swap((0, 2), (1, 2))).unwrap();
        assert_eq!(mv.longest_run(), 5);
        assert_eq!(mv.total_cleared(), 5);

        let outcome = CascadeSimulator::new()
            .simulate(&grid, swap((0, 2), (1, 2)))
            .unwrap();
        assert_eq!(outcome.passes, 1);
    }

    #[test]
    fn test_evaluate_does_not_mutate_input() {
        let grid = grid_from_str_array(&["ypb", "rrb", "ybr"]).unwrap();
        let snapshot = grid.clone();
        let moves = evaluate_all(&grid);
        assert_eq!(moves.len(), candidate_moves(&grid).len());
        assert_eq!(grid, snapshot);
    }

    #[test]
    fn test_evaluate_all_is_deterministic() {
        let grid = Grid::new_random_with_seed(8, 8, 42);
        let first = evaluate_all(&grid);
        let second = evaluate_all(&grid.clone());
        assert_eq!(first, second);
        let swaps: Vec<Swap> = first.iter().map(|mv| mv.swap()).collect();
        assert_eq!(swaps, candidate_moves(&grid));
    }

    #[test]
    fn test_evaluate_all_on_empty_grid() {
        assert!(evaluate_all(&Grid::new_empty(8, 8)).is_empty());
        assert!(evaluate_all(&grid_from_str_array(&["r"]).unwrap()).is_empty());
    }

    #[test]
    fn test_failing_candidates_are_recorded_not_fatal() {
        // A cap of zero passes makes every clearing candidate fail, while the
        // non-clearing ones still evaluate.
        let grid = grid_from_str_array(&["ypb", "rrb", "ybr"]).unwrap();
        let report = evaluate_report(&CascadeSimulator::with_max_passes(0), &grid);
        assert_eq!(
            report.moves.len() + report.failures.len(),
            candidate_moves(&grid).len()
        );
        assert!(report
            .failures
            .iter()
            .any(|(s, _)| *s == swap((1, 2), (2, 2))));
        assert!(report
            .failures
            .iter()
            .all(|(_, err)| matches!(err, EngineError::CascadeDidNotTerminate { passes: 0 })));
        assert!(report.moves.iter().all(|mv| mv.total_cleared() == 0));
    }

    #[test]
    fn test_move_display() {
        let mut scores = ScoreByColor::new();
        scores.insert(Color::Red, 3);
        let mv = Move::new(swap((0, 0), (0, 1)), scores);
        assert_eq!(mv.to_string(), "Move((0, 0) <-> (0, 1), red: 3)");
        assert_eq!(mv.cleared(Color::Red), 3);
        assert_eq!(mv.cleared(Color::Blue), 0);
        assert_eq!(mv.swap(), swap((0, 1), (0, 0)));
        assert_eq!(mv.score_by_color().get(&Color::Red), Some(&3));
    }
}
