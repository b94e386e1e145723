//! The search-collaborator contract.
//!
//! The visualizer treats shortest-path search as a black box behind the
//! [`Search`] trait: synchronous, pure, always returning a well-formed
//! result. Everything in the result is keyed by coordinate ([`Point`]),
//! never by reference into the board, so implementations are free to work
//! on copies.

use crate::geom::Point;
use crate::graph::Graph;

/// Options forwarded to the collaborator.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct SearchOptions {
    /// When the target is unreachable, return the path to the closest
    /// reachable cell instead of an empty path.
    pub closest: bool,
}

/// A neighbour considered during one expansion, with its costs at
/// relaxation time.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ScoredNeighbor {
    pub pos: Point,
    pub f: f64,
    pub g: f64,
    pub h: f64,
}

/// One exploration step: the expanded cell and the neighbours it examined.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TraceFrame {
    pub current: Point,
    pub neighbors: Vec<ScoredNeighbor>,
}

/// The collaborator's answer.
///
/// `path` runs from start to end inclusive and is empty when the target is
/// unreachable (unless [`SearchOptions::closest`] was set, in which case it
/// ends at the closest reachable cell). `trace` holds one frame per
/// expanded non-goal cell, in expansion order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SearchResult {
    pub path: Vec<Point>,
    pub trace: Vec<TraceFrame>,
}

impl SearchResult {
    /// No route was found.
    pub fn is_unreachable(&self) -> bool {
        self.path.is_empty()
    }
}

/// The external search collaborator.
pub trait Search {
    fn search(
        &self,
        graph: &Graph,
        start: Point,
        end: Point,
        options: SearchOptions,
    ) -> SearchResult;
}
