//! # Match-3 Solver Library
//!
//! This library provides a simulation and search engine for "connect 3 or more
//! same-colored tiles" swap games. Given a grid of colored tiles it enumerates every
//! legal swap, simulates each one including the chain reactions caused by falling
//! tiles, and selects the best move under a configurable policy.
//!
//! It is used by three binaries:
//! - `best_move`: Loads a board file and prints the ranked moves and the selected one.
//! - `human_player`: Interactive play in the terminal, with undo and random refill.
//! - `policy_evaluator`: Compares the selection policies over seeded random boards.
//!
//! ## Modules
//! - `engine`: The grid model (`Grid`, `Cell`, `Tile`, `Color`) and gravity.
//! - `matching`: Run detection through a pivot tile and over the whole grid.
//! - `cascade`: Simulation of a swap and its cascades (`CascadeSimulator`, `Swap`).
//! - `solver`: Move generation and evaluation (`candidate_moves`, `evaluate_all`).
//! - `heuristics`: Selection policies for choosing one move.
//! - `game`: A live play session with score, undo and refill.
//! - `boundary`: Contracts with the board source and move actuator.
//! - `config`: Engine configuration loaded from JSON.
//! - `error`: Error types.
//! - `utils`: Parsing boards from text.

pub mod boundary;
pub mod cascade;
pub mod config;
pub mod engine;
pub mod error;
pub mod game;
pub mod heuristics;
pub mod matching;
pub mod solver;
pub mod utils;

#[cfg(test)]
mod proptests;
