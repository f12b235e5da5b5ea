//! Contracts with the collaborators around the engine.
//!
//! A `BoardSource` produces grid snapshots (e.g. from screen captures, with
//! unclassifiable cells left empty) and a `MoveActuator` carries out the chosen swap
//! (e.g. as a pointer drag). `play_cycle` runs one poll -> evaluate -> select -> act
//! step; scheduling repeated cycles is up to the caller.
use crate::config::EngineConfig;
use crate::engine::Grid;
use crate::heuristics::SelectionPolicy;
use crate::solver::{evaluate_report, Move};
use log::{debug, info, warn};

/// Produces the current board.
pub trait BoardSource {
    /// The latest snapshot, or `None` if no board is available this cycle.
    fn next_grid(&mut self) -> Option<Grid>;
}

/// Performs a chosen move on the real board.
pub trait MoveActuator {
    fn perform(&mut self, mv: &Move);
}

/// What a single cycle did.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CycleOutcome {
    /// The source had no board to offer.
    NoBoard,
    /// A board was read but no move worth making was found.
    NoMove,
    /// The move was handed to the actuator.
    Performed(Move),
}

/// Runs one poll -> evaluate -> select -> act step.
///
/// A selected move that clears nothing is not performed. Boards whose size differs
/// from the configuration are still evaluated, with a warning.
pub fn play_cycle(
    source: &mut dyn BoardSource,
    actuator: &mut dyn MoveActuator,
    config: &EngineConfig,
) -> CycleOutcome {
    let Some(grid) = source.next_grid() else {
        debug!("board source returned no grid");
        return CycleOutcome::NoBoard;
    };
    if !config.fits(&grid) {
        warn!(
            "board is {}x{}, configured for {}x{}",
            grid.rows(),
            grid.cols(),
            config.rows,
            config.cols
        );
    }

    let report = evaluate_report(&config.simulator(), &grid);
    let policy: SelectionPolicy = config.selection_policy();
    match policy.select(&report.moves) {
        Some(mv) if mv.total_cleared() > 0 => {
            info!("{} selected {}", policy, mv);
            actuator.perform(mv);
            CycleOutcome::Performed(mv.clone())
        }
        _ => {
            debug!(
                "{} found no clearing move among {} candidates",
                policy,
                report.moves.len()
            );
            CycleOutcome::NoMove
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cascade::Swap;
    use crate::config::PolicyKind;
    use crate::engine::Color;
    use crate::utils::grid_from_str_array;

    struct FixedSource(Option<Grid>);

    impl BoardSource for FixedSource {
        fn next_grid(&mut self) -> Option<Grid> {
            self.0.take()
        }
    }

    #[derive(Default)]
    struct RecordingActuator(Vec<Move>);

    impl MoveActuator for RecordingActuator {
        fn perform(&mut self, mv: &Move) {
            self.0.push(mv.clone());
        }
    }

    fn small_config() -> EngineConfig {
        EngineConfig {
            rows: 3,
            cols: 3,
            ..EngineConfig::default()
        }
    }

    #[test]
    fn test_cycle_performs_best_move() {
        let grid = grid_from_str_array(&["ypb", "rrb", "ybr"]).unwrap();
        let mut source = FixedSource(Some(grid));
        let mut actuator = RecordingActuator::default();

        let outcome = play_cycle(&mut source, &mut actuator, &small_config());
        let expected = Swap::new((1, 2), (2, 2)).unwrap();
        match outcome {
            CycleOutcome::Performed(mv) => {
                assert_eq!(mv.swap(), expected);
                assert_eq!(mv.cleared(Color::Red), 3);
            }
            other => panic!("expected a performed move, got {:?}", other),
        }
        assert_eq!(actuator.0.len(), 1);
    }

    #[test]
    fn test_cycle_without_board_or_move() {
        let mut actuator = RecordingActuator::default();
        assert_eq!(
            play_cycle(&mut FixedSource(None), &mut actuator, &small_config()),
            CycleOutcome::NoBoard
        );

        let stuck = grid_from_str_array(&["rb", "by"]).unwrap();
        assert_eq!(
            play_cycle(&mut FixedSource(Some(stuck)), &mut actuator, &small_config()),
            CycleOutcome::NoMove
        );
        assert!(actuator.0.is_empty());
    }

    #[test]
    fn test_cycle_respects_color_priority() {
        let grid = grid_from_str_array(&["ypb", "rrb", "ybr"]).unwrap();
        let config = EngineConfig {
            policy: PolicyKind::ColorPriority,
            color_priority: vec![Color::Pink],
            ..small_config()
        };
        let mut actuator = RecordingActuator::default();
        assert_eq!(
            play_cycle(&mut FixedSource(Some(grid.clone())), &mut actuator, &config),
            CycleOutcome::NoMove
        );

        // Blue first: the blue column at (0..3, 2) beats the earlier red row.
        let config = EngineConfig {
            color_priority: vec![Color::Blue, Color::Red],
            ..config
        };
        let outcome = play_cycle(&mut FixedSource(Some(grid)), &mut actuator, &config);
        let expected = Swap::new((2, 1), (2, 2)).unwrap();
        assert!(matches!(outcome, CycleOutcome::Performed(mv) if mv.swap() == expected));
    }
}
