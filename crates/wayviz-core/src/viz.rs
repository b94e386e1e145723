//! The visualizer itself: board, selection protocol, search hand-off, and
//! animation relay, behind a small surface the rendering layer projects.

use std::time::Duration;

use log::debug;
use rand::Rng;

use crate::animate::{AnimationSequencer, Tick};
use crate::config::Config;
use crate::generate::GridGenerator;
use crate::geom::Point;
use crate::graph::Graph;
use crate::notice::Notice;
use crate::search::{Search, SearchOptions, TraceFrame};
use crate::selection::Selection;

/// Interactive pathfinding visualizer state.
///
/// Owns the board and everything that mutates it. Clicks and ticks come in
/// through [`handle_click`](Visualizer::handle_click) and
/// [`tick`](Visualizer::tick); both return the delay until the next
/// animation step when one is due, and the host loop owns the actual
/// timing. All work here is synchronous; the host must serialize calls
/// (one thread, or one exclusive owner).
pub struct Visualizer {
    config: Config,
    graph: Graph,
    selection: Selection,
    notice: Option<Notice>,
    sequencer: AnimationSequencer,
    searcher: Box<dyn Search>,
}

impl Visualizer {
    /// Wrap an existing board. Useful when the caller controls generation.
    pub fn new(config: Config, graph: Graph, searcher: Box<dyn Search>) -> Self {
        Self {
            config,
            graph,
            selection: Selection::default(),
            notice: None,
            sequencer: AnimationSequencer::new(),
            searcher,
        }
    }

    /// Generate a board from `config` and wrap it.
    pub fn generate<R: Rng>(config: Config, searcher: Box<dyn Search>, rng: &mut R) -> Self {
        let graph = GridGenerator::from_config(&config).generate(rng);
        Self::new(config, graph, searcher)
    }

    // -- view surface -------------------------------------------------------

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    pub fn selection(&self) -> Selection {
        self.selection
    }

    pub fn notice(&self) -> Option<Notice> {
        self.notice
    }

    pub fn is_walking(&self) -> bool {
        self.sequencer.is_walking()
    }

    /// The trace frame most recently applied to the board, while the trace
    /// phase lasts. Lets the view surface the frame's neighbour costs.
    pub fn current_frame(&self) -> Option<&TraceFrame> {
        self.sequencer.last_frame()
    }

    /// Adjust the animation rate (1..=[`MAX_RATE`](crate::config::MAX_RATE)).
    /// Takes effect from the next scheduled tick, mid-animation included.
    pub fn set_rate(&mut self, rate: u32) {
        self.config.rate = rate.clamp(1, crate::config::MAX_RATE);
    }

    // -- operations ---------------------------------------------------------

    /// Process a click on board coordinate `p`.
    ///
    /// Implements the two-click protocol: first road click picks the start,
    /// a second (different) road click picks the end and launches the
    /// search, and any road click after a completed cycle clears the marks
    /// and begins a new cycle. Wall clicks and re-clicks on the start are
    /// no-ops; any click while an animation walks only raises the busy
    /// notice.
    ///
    /// Returns the delay until the first animation tick when a search
    /// launched an animation.
    pub fn handle_click(&mut self, p: Point) -> Option<Duration> {
        if self.sequencer.is_walking() {
            self.show(Notice::Busy);
            return None;
        }
        let Some(cell) = self.graph.at(p) else {
            return None;
        };
        if cell.is_wall() {
            return None;
        }
        match (self.selection.start(), self.selection.end()) {
            (None, _) => {
                self.selection.set_start(p);
                None
            }
            (Some(start), None) => {
                if p == start {
                    return None;
                }
                self.selection.set_end(p);
                self.start_search(start, p)
            }
            (Some(_), Some(_)) => {
                self.graph.clear_marks();
                self.selection.restart(p);
                None
            }
        }
    }

    /// Apply a new configuration: regenerate the board and drop the
    /// selection and any notice. Rejected with the busy notice while an
    /// animation walks, exactly like a click.
    pub fn submit<R: Rng>(&mut self, config: Config, rng: &mut R) -> bool {
        if self.sequencer.is_walking() {
            self.show(Notice::Busy);
            return false;
        }
        self.config = config;
        self.graph = GridGenerator::from_config(&self.config).generate(rng);
        self.selection.clear();
        self.sequencer.reset();
        self.notice = None;
        true
    }

    /// Advance the animation by one step. Returns the delay until the next
    /// step while the sequence lasts.
    pub fn tick(&mut self) -> Option<Duration> {
        match self.sequencer.tick(&mut self.graph) {
            Tick::Advanced => Some(self.config.interval()),
            Tick::Unreachable => {
                self.show(Notice::Unreachable);
                None
            }
            Tick::Finished | Tick::Idle => None,
        }
    }

    // -- internals ----------------------------------------------------------

    fn start_search(&mut self, start: Point, end: Point) -> Option<Duration> {
        let options = SearchOptions {
            closest: self.config.closest,
        };
        let result = self.searcher.search(&self.graph, start, end, options);
        debug!(
            "search {start} -> {end}: {} path cells, {} trace frames",
            result.path.len(),
            result.trace.len()
        );
        if self.config.show_trace && result.trace.len() == 1 {
            self.show(Notice::TooClose);
            return None;
        }
        if !self.config.show_trace && result.is_unreachable() {
            self.show(Notice::Unreachable);
            return None;
        }
        if !self
            .sequencer
            .try_start(start, result, self.config.show_trace)
        {
            self.show(Notice::Busy);
            return None;
        }
        Some(self.config.interval())
    }

    fn show(&mut self, notice: Notice) {
        // Displaces whatever notice was showing.
        self.notice = Some(notice);
    }
}
