//! Discrete-time replay of a search result.
//!
//! A search result replays in two dependent phases: the exploration trace
//! first, then the final path, one annotation diff per tick. The sequencer
//! itself owns no timer: the host loop calls [`AnimationSequencer::tick`]
//! once per elapsed interval and schedules the next call, so steps can
//! never interleave and the phase hand-off is an ordinary state change.
//!
//! A single animation may be in flight at a time. The `walking` flag lives
//! in an [`AnimationSession`] and is claimed with compare-and-set, so a
//! second start request while one is walking is dropped rather than queued.
//! There is deliberately no cancel operation: a sequence always runs to its
//! natural end.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::cell::Scores;
use crate::geom::Point;
use crate::graph::Graph;
use crate::search::{SearchResult, TraceFrame};

// ---------------------------------------------------------------------------
// AnimationSession
// ---------------------------------------------------------------------------

/// The single-flight `walking` flag.
///
/// Cloning shares the flag. The single-threaded host never races on it, but
/// the compare-and-set claim keeps the guard sound if a multi-threaded host
/// ever drives the sequencer.
#[derive(Clone, Debug, Default)]
pub struct AnimationSession {
    walking: Arc<AtomicBool>,
}

impl AnimationSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether an animation is currently advancing.
    #[inline]
    pub fn is_walking(&self) -> bool {
        self.walking.load(Ordering::Acquire)
    }

    /// Claim the session. Returns `false` if it was already claimed.
    pub fn try_begin(&self) -> bool {
        self.walking
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
    }

    /// Release the session.
    pub fn end(&self) {
        self.walking.store(false, Ordering::Release);
    }
}

// ---------------------------------------------------------------------------
// Sequencer
// ---------------------------------------------------------------------------

/// Playback cursor. `Trace(i)` / `Path(i)` name the next step to apply.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Phase {
    Trace(usize),
    Path(usize),
}

#[derive(Debug)]
struct Playback {
    result: SearchResult,
    start: Point,
    phase: Phase,
    /// Index of the most recently applied trace frame.
    last_frame: Option<usize>,
}

/// What one tick did.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Tick {
    /// A step was applied; schedule another tick.
    Advanced,
    /// The trace ran out and there is no path. The sequence is over.
    Unreachable,
    /// The last path step was applied earlier; the sequence is over.
    Finished,
    /// No playback in flight.
    Idle,
}

/// Replays one [`SearchResult`] at a time onto the board.
#[derive(Debug, Default)]
pub struct AnimationSequencer {
    session: AnimationSession,
    playback: Option<Playback>,
}

impl AnimationSequencer {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn is_walking(&self) -> bool {
        self.session.is_walking()
    }

    /// Begin replaying `result`. Returns `false`, doing nothing, if an
    /// animation is already walking.
    ///
    /// With `show_trace` unset the trace phase is skipped entirely and the
    /// path replays at the board-derived interval.
    pub fn try_start(&mut self, start: Point, result: SearchResult, show_trace: bool) -> bool {
        if !self.session.try_begin() {
            return false;
        }
        let phase = if show_trace {
            Phase::Trace(0)
        } else {
            Phase::Path(0)
        };
        self.playback = Some(Playback {
            result,
            start,
            phase,
            last_frame: None,
        });
        true
    }

    /// Apply the next step to `graph`.
    ///
    /// Trace steps mark the frame's expanded cell (`visited`, and
    /// `current_active` unless it is the start cell) and each considered
    /// neighbour (`current_neighbor` plus its scores). When the trace runs
    /// out, an empty path ends the sequence as [`Tick::Unreachable`];
    /// otherwise the same step applies the first path mark, so exactly
    /// `trace.len()` trace ticks precede exactly `path.len()` path ticks.
    pub fn tick(&mut self, graph: &mut Graph) -> Tick {
        let Some(playback) = &mut self.playback else {
            return Tick::Idle;
        };
        match playback.phase {
            Phase::Trace(idx) => {
                if let Some(frame) = playback.result.trace.get(idx) {
                    apply_trace_frame(graph, frame, playback.start);
                    playback.last_frame = Some(idx);
                    playback.phase = Phase::Trace(idx + 1);
                    return Tick::Advanced;
                }
                // Trace exhausted: hand off to the path phase, or stop.
                if playback.result.path.is_empty() {
                    self.finish();
                    return Tick::Unreachable;
                }
                playback.phase = Phase::Path(0);
                self.step_path(graph)
            }
            Phase::Path(_) => self.step_path(graph),
        }
    }

    /// The most recently applied trace frame, while playback lasts.
    pub fn last_frame(&self) -> Option<&TraceFrame> {
        let playback = self.playback.as_ref()?;
        playback.result.trace.get(playback.last_frame?)
    }

    /// Drop any playback state and release the session. Used when the board
    /// it was annotating is regenerated.
    pub fn reset(&mut self) {
        self.playback = None;
        self.session.end();
    }

    fn step_path(&mut self, graph: &mut Graph) -> Tick {
        let Some(playback) = &mut self.playback else {
            return Tick::Idle;
        };
        let Phase::Path(idx) = playback.phase else {
            return Tick::Idle;
        };
        match playback.result.path.get(idx) {
            Some(&p) => {
                if let Some(cell) = graph.at_mut(p) {
                    cell.path_active = true;
                }
                playback.phase = Phase::Path(idx + 1);
                Tick::Advanced
            }
            None => {
                self.finish();
                Tick::Finished
            }
        }
    }

    fn finish(&mut self) {
        self.playback = None;
        self.session.end();
    }
}

fn apply_trace_frame(graph: &mut Graph, frame: &TraceFrame, start: Point) {
    if let Some(cell) = graph.at_mut(frame.current) {
        cell.visited = true;
        if frame.current != start {
            cell.current_active = true;
        }
    }
    for n in &frame.neighbors {
        if let Some(cell) = graph.at_mut(n.pos) {
            cell.current_neighbor = true;
            cell.scores = Some(Scores {
                f: n.f,
                g: n.g,
                h: n.h,
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::ScoredNeighbor;

    fn frame(current: Point, neighbors: &[Point]) -> TraceFrame {
        TraceFrame {
            current,
            neighbors: neighbors
                .iter()
                .map(|&pos| ScoredNeighbor {
                    pos,
                    f: 2.0,
                    g: 1.0,
                    h: 1.0,
                })
                .collect(),
        }
    }

    fn two_frame_result(path: Vec<Point>) -> SearchResult {
        SearchResult {
            path,
            trace: vec![
                frame(Point::new(0, 0), &[Point::new(1, 0), Point::new(0, 1)]),
                frame(Point::new(1, 0), &[Point::new(2, 0)]),
            ],
        }
    }

    #[test]
    fn session_is_single_flight() {
        let session = AnimationSession::new();
        assert!(session.try_begin());
        assert!(!session.try_begin());
        session.end();
        assert!(session.try_begin());
    }

    #[test]
    fn second_start_is_dropped() {
        let mut seq = AnimationSequencer::new();
        assert!(seq.try_start(Point::ZERO, two_frame_result(vec![Point::ZERO]), true));
        assert!(!seq.try_start(Point::ZERO, two_frame_result(vec![Point::ZERO]), true));
    }

    #[test]
    fn trace_ticks_precede_path_ticks() {
        let mut graph = Graph::new(4, false);
        let path = vec![Point::new(0, 0), Point::new(1, 0), Point::new(2, 0)];
        let mut seq = AnimationSequencer::new();
        assert!(seq.try_start(Point::new(0, 0), two_frame_result(path.clone()), true));

        // Two trace ticks: no path mark yet.
        assert_eq!(seq.tick(&mut graph), Tick::Advanced);
        assert_eq!(seq.tick(&mut graph), Tick::Advanced);
        assert!(graph.iter().all(|(_, c)| !c.path_active));
        assert!(graph.at(Point::new(1, 0)).unwrap().current_active);
        assert!(graph.at(Point::new(2, 0)).unwrap().current_neighbor);

        // Three path ticks, then completion.
        for (i, &p) in path.iter().enumerate() {
            assert_eq!(seq.tick(&mut graph), Tick::Advanced, "path tick {i}");
            assert!(graph.at(p).unwrap().path_active);
        }
        assert_eq!(seq.tick(&mut graph), Tick::Finished);
        assert!(!seq.is_walking());
        assert_eq!(seq.tick(&mut graph), Tick::Idle);
    }

    #[test]
    fn start_cell_is_not_marked_current() {
        let mut graph = Graph::new(4, false);
        let mut seq = AnimationSequencer::new();
        seq.try_start(Point::new(0, 0), two_frame_result(vec![]), true);
        seq.tick(&mut graph);
        let start = graph.at(Point::new(0, 0)).unwrap();
        assert!(start.visited);
        assert!(!start.current_active);
    }

    #[test]
    fn empty_path_ends_unreachable_after_full_trace() {
        let mut graph = Graph::new(4, false);
        let mut seq = AnimationSequencer::new();
        seq.try_start(Point::new(0, 0), two_frame_result(vec![]), true);
        assert_eq!(seq.tick(&mut graph), Tick::Advanced);
        assert_eq!(seq.tick(&mut graph), Tick::Advanced);
        assert_eq!(seq.tick(&mut graph), Tick::Unreachable);
        assert!(!seq.is_walking());
        assert!(graph.iter().all(|(_, c)| !c.path_active));
    }

    #[test]
    fn without_trace_only_path_plays() {
        let mut graph = Graph::new(4, false);
        let path = vec![Point::new(0, 0), Point::new(0, 1)];
        let mut seq = AnimationSequencer::new();
        seq.try_start(Point::new(0, 0), two_frame_result(path), false);
        assert_eq!(seq.tick(&mut graph), Tick::Advanced);
        assert_eq!(seq.tick(&mut graph), Tick::Advanced);
        assert_eq!(seq.tick(&mut graph), Tick::Finished);
        assert!(graph.iter().all(|(_, c)| !c.current_active && !c.current_neighbor));
    }

    #[test]
    fn neighbor_scores_land_on_cells() {
        let mut graph = Graph::new(4, false);
        let mut seq = AnimationSequencer::new();
        seq.try_start(Point::new(0, 0), two_frame_result(vec![]), true);
        seq.tick(&mut graph);
        let scores = graph.at(Point::new(1, 0)).unwrap().scores.unwrap();
        assert_eq!(scores.f, 2.0);
        assert_eq!(scores.g, 1.0);
        assert_eq!(scores.h, 1.0);
    }

    #[test]
    fn last_frame_follows_playback() {
        let mut graph = Graph::new(4, false);
        let mut seq = AnimationSequencer::new();
        seq.try_start(Point::new(0, 0), two_frame_result(vec![]), true);
        assert!(seq.last_frame().is_none());
        seq.tick(&mut graph);
        assert_eq!(seq.last_frame().unwrap().current, Point::new(0, 0));
        seq.tick(&mut graph);
        assert_eq!(seq.last_frame().unwrap().current, Point::new(1, 0));
    }

    #[test]
    fn reset_releases_the_session() {
        let mut seq = AnimationSequencer::new();
        seq.try_start(Point::ZERO, two_frame_result(vec![]), true);
        assert!(seq.is_walking());
        seq.reset();
        assert!(!seq.is_walking());
        assert!(seq.try_start(Point::ZERO, two_frame_result(vec![]), true));
    }
}
