//! The application model: maps terminal input onto the visualizer and
//! carries the pending (not yet submitted) configuration edits.

use std::time::Duration;

use crossterm::event::KeyCode;
use log::warn;
use rand::SeedableRng;
use rand::rngs::StdRng;

use wayviz_core::{Config, ConfigStore, Point, Visualizer};
use wayviz_paths::AstarSearch;

// Option ranges: board edges 4-32 in steps of four, wall density 10-40%
// in steps of ten.
pub const MIN_GRID_SIZE: i32 = 4;
pub const MAX_GRID_SIZE: i32 = 32;
pub const GRID_SIZE_STEP: i32 = 4;
pub const MIN_WALL_FREQUENCY: f64 = 0.1;
pub const MAX_WALL_FREQUENCY: f64 = 0.4;

/// An input message.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Msg {
    Key(KeyCode),
    /// Left click resolved to a board coordinate.
    Click(Point),
    /// A scheduled animation step is due.
    Tick,
}

/// A side-effect for the host loop.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Effect {
    /// Deliver [`Msg::Tick`] after the delay.
    Tick(Duration),
    /// Quit.
    End,
}

pub struct VizModel {
    viz: Visualizer,
    /// Config edits staged by the option keys; applied on submit.
    pending: Config,
    store: ConfigStore,
    rng: StdRng,
}

impl VizModel {
    /// Load persisted options, generate the first board, and wire up the
    /// search collaborator.
    pub fn new(store: ConfigStore) -> Self {
        let config = store.load();
        let mut rng = StdRng::from_os_rng();
        let viz = Visualizer::generate(config.clone(), Box::new(AstarSearch), &mut rng);
        Self {
            viz,
            pending: config,
            store,
            rng,
        }
    }

    pub fn viz(&self) -> &Visualizer {
        &self.viz
    }

    pub fn pending(&self) -> &Config {
        &self.pending
    }

    pub fn update(&mut self, msg: Msg) -> Option<Effect> {
        match msg {
            Msg::Tick => self.viz.tick().map(Effect::Tick),
            Msg::Click(p) => self.viz.handle_click(p).map(Effect::Tick),
            Msg::Key(code) => self.handle_key(code),
        }
    }

    fn handle_key(&mut self, code: KeyCode) -> Option<Effect> {
        match code {
            KeyCode::Char('q') | KeyCode::Esc => return Some(Effect::End),
            KeyCode::Char('g') => self.submit(),
            KeyCode::Char('d') => self.pending.diagonal = !self.pending.diagonal,
            KeyCode::Char('c') => self.pending.closest = !self.pending.closest,
            KeyCode::Char('i') => self.pending.show_search_info = !self.pending.show_search_info,
            KeyCode::Char('t') => self.pending.show_trace = !self.pending.show_trace,
            KeyCode::Char('+') | KeyCode::Char('=') => {
                self.pending.grid_size =
                    (self.pending.grid_size + GRID_SIZE_STEP).min(MAX_GRID_SIZE);
            }
            KeyCode::Char('-') => {
                self.pending.grid_size =
                    (self.pending.grid_size - GRID_SIZE_STEP).max(MIN_GRID_SIZE);
            }
            KeyCode::Char(']') => self.pending.wall_frequency = step_frequency(self.pending.wall_frequency, 1),
            KeyCode::Char('[') => self.pending.wall_frequency = step_frequency(self.pending.wall_frequency, -1),
            KeyCode::Char(c @ '1'..='5') => {
                // Takes effect immediately, even mid-animation.
                let rate = c.to_digit(10).unwrap_or(1);
                self.pending.rate = rate;
                self.viz.set_rate(rate);
            }
            _ => {}
        }
        None
    }

    /// Apply and persist the pending configuration. Rejected by the core
    /// with the busy notice while an animation walks; nothing is persisted
    /// in that case.
    fn submit(&mut self) {
        if self.viz.submit(self.pending.clone(), &mut self.rng) {
            if let Err(err) = self.store.save(&self.pending) {
                warn!("could not persist options: {err}");
            }
        }
    }
}

/// Step the wall density by tenths, staying on exact tenths.
fn step_frequency(freq: f64, direction: i32) -> f64 {
    let tenths = (freq * 10.0).round() as i32 + direction;
    let lo = (MIN_WALL_FREQUENCY * 10.0).round() as i32;
    let hi = (MAX_WALL_FREQUENCY * 10.0).round() as i32;
    f64::from(tenths.clamp(lo, hi)) / 10.0
}
