//! **wayviz-paths** — the search collaborator for the wayviz board.
//!
//! Implements the [`wayviz_core::Search`] contract with a tracing A*:
//! besides the shortest path it records one exploration frame per expanded
//! cell, which the visualizer's trace phase replays. The visualizer treats
//! this crate as a black box; nothing here touches board annotations.

mod astar;
mod heuristic;

pub use astar::AstarSearch;
pub use heuristic::{SQRT_2, manhattan, octile};
