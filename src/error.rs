//! Error types for the match-3 engine.
//!
//! Every error here is local to a single operation. The evaluator in
//! `solver` catches `EngineError`s per candidate so that one bad swap never
//! aborts the evaluation of the rest of the board.

use crate::engine::Position;
use std::path::PathBuf;
use thiserror::Error;

/// Why a swap was rejected before any simulation took place.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InvalidSwapReason {
    /// The two coordinates are not orthogonal neighbours.
    NotAdjacent,
    /// At least one coordinate lies outside the grid.
    OutOfBounds,
    /// At least one of the two cells holds no tile.
    EmptyCell,
}

impl std::fmt::Display for InvalidSwapReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let text = match self {
            InvalidSwapReason::NotAdjacent => "cells are not orthogonally adjacent",
            InvalidSwapReason::OutOfBounds => "a cell is outside the grid",
            InvalidSwapReason::EmptyCell => "a cell is empty",
        };
        f.write_str(text)
    }
}

/// Errors raised by the grid model, the cascade simulator and the evaluator.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum EngineError {
    #[error("position ({row}, {col}) is outside the {rows}x{cols} grid")]
    OutOfBounds {
        row: usize,
        col: usize,
        rows: usize,
        cols: usize,
    },

    #[error("invalid swap {first:?} <-> {second:?}: {reason}")]
    InvalidSwap {
        first: Position,
        second: Position,
        reason: InvalidSwapReason,
    },

    #[error("cascade did not settle after {passes} passes")]
    CascadeDidNotTerminate { passes: usize },
}

/// Errors raised while parsing a text board.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("Invalid number of rows. Expected at most {expected}, found {found}")]
    TooManyRows { expected: usize, found: usize },

    #[error("Row {row} is too long. Expected at most {expected} characters, found {found}")]
    RowTooLong {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("Unrecognized character '{ch}' in row {row} col {col}")]
    UnrecognizedCharacter { ch: char, row: usize, col: usize },

    #[error("Board has no rows or no columns")]
    EmptyBoard,

    #[error("Unknown color name '{name}'")]
    UnknownColor { name: String },

    #[error(transparent)]
    Engine(#[from] EngineError),
}

/// Errors raised while loading or validating an `EngineConfig`.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed config: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}
