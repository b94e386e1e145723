//! A* over the visualizer board, with exploration tracing.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use wayviz_core::{Graph, Point, ScoredNeighbor, Search, SearchOptions, SearchResult, TraceFrame};

use crate::heuristic::{SQRT_2, manhattan, octile};

const NO_PARENT: usize = usize::MAX;

/// Per-cell search bookkeeping, indexed by flattened board coordinate.
#[derive(Clone, Copy)]
struct Node {
    g: f64,
    h: f64,
    f: f64,
    parent: usize,
    open: bool,
    closed: bool,
    seen: bool,
}

impl Default for Node {
    fn default() -> Self {
        Self {
            g: f64::INFINITY,
            h: 0.0,
            f: f64::INFINITY,
            parent: NO_PARENT,
            open: false,
            closed: false,
            seen: false,
        }
    }
}

/// Heap entry; the node table holds the authoritative scores, so stale
/// entries are skipped on pop.
struct OpenRef {
    idx: usize,
    f: f64,
}

impl PartialEq for OpenRef {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for OpenRef {}

impl PartialOrd for OpenRef {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for OpenRef {
    // Reversed: BinaryHeap is a max-heap, we want the smallest f first.
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .f
            .total_cmp(&self.f)
            .then_with(|| other.idx.cmp(&self.idx))
    }
}

/// The shipped [`Search`] implementation.
///
/// Cardinal steps cost 1, diagonal steps √2; the heuristic is Manhattan on
/// 4-way boards and octile on 8-way boards. One [`TraceFrame`] is recorded
/// per expanded non-goal cell. With [`SearchOptions::closest`] set and the
/// target unreachable, the path leads to the expanded cell closest to the
/// target (smallest `h`, ties broken by smaller `g`); without it, an
/// unreachable target yields an empty path.
#[derive(Clone, Copy, Debug, Default)]
pub struct AstarSearch;

impl Search for AstarSearch {
    fn search(
        &self,
        graph: &Graph,
        start: Point,
        end: Point,
        options: SearchOptions,
    ) -> SearchResult {
        let size = graph.size();
        if size <= 0 || !graph.contains(start) || !graph.contains(end) {
            return SearchResult::default();
        }
        if start == end {
            return SearchResult {
                path: vec![start],
                trace: Vec::new(),
            };
        }

        let estimate = |a: Point, b: Point| {
            if graph.diagonal() {
                octile(a, b)
            } else {
                manhattan(a, b)
            }
        };
        let idx = |p: Point| (p.y * size + p.x) as usize;
        let point = |i: usize| Point::new(i as i32 % size, i as i32 / size);

        let mut nodes: Vec<Node> = vec![Node::default(); (size * size) as usize];
        let mut open = BinaryHeap::new();
        let mut trace = Vec::new();
        let mut nbuf: Vec<Point> = Vec::with_capacity(8);

        let si = idx(start);
        let ei = idx(end);
        let h0 = estimate(start, end);
        nodes[si] = Node {
            g: 0.0,
            h: h0,
            f: h0,
            parent: NO_PARENT,
            open: true,
            closed: false,
            seen: true,
        };
        open.push(OpenRef { idx: si, f: h0 });

        // Closest-so-far fallback.
        let mut best = si;
        let mut found = false;

        while let Some(current) = open.pop() {
            let ci = current.idx;
            if !nodes[ci].open {
                continue;
            }
            if ci == ei {
                found = true;
                break;
            }
            nodes[ci].open = false;
            nodes[ci].closed = true;

            let cp = point(ci);
            let cg = nodes[ci].g;
            nbuf.clear();
            graph.neighbors(cp, &mut nbuf);

            let mut frame = TraceFrame {
                current: cp,
                neighbors: Vec::with_capacity(nbuf.len()),
            };
            for &np in &nbuf {
                let ni = idx(np);
                if nodes[ni].closed {
                    continue;
                }
                let step = if np.x != cp.x && np.y != cp.y {
                    SQRT_2
                } else {
                    1.0
                };
                let tentative = cg + step;
                if !nodes[ni].seen || tentative < nodes[ni].g {
                    let h = if nodes[ni].seen {
                        nodes[ni].h
                    } else {
                        estimate(np, end)
                    };
                    nodes[ni] = Node {
                        g: tentative,
                        h,
                        f: tentative + h,
                        parent: ci,
                        open: true,
                        closed: false,
                        seen: true,
                    };
                    open.push(OpenRef {
                        idx: ni,
                        f: nodes[ni].f,
                    });
                    if options.closest
                        && (h < nodes[best].h || (h == nodes[best].h && tentative < nodes[best].g))
                    {
                        best = ni;
                    }
                }
                frame.neighbors.push(ScoredNeighbor {
                    pos: np,
                    f: nodes[ni].f,
                    g: nodes[ni].g,
                    h: nodes[ni].h,
                });
            }
            trace.push(frame);
        }

        let path = if found {
            reconstruct(&nodes, ei, point)
        } else if options.closest && best != si {
            reconstruct(&nodes, best, point)
        } else {
            Vec::new()
        };
        SearchResult { path, trace }
    }
}

/// Walk parents back from `target`; the returned path runs start → target
/// inclusive.
fn reconstruct(nodes: &[Node], target: usize, point: impl Fn(usize) -> Point) -> Vec<Point> {
    let mut path = Vec::new();
    let mut i = target;
    while i != NO_PARENT {
        path.push(point(i));
        i = nodes[i].parent;
    }
    path.reverse();
    path
}
