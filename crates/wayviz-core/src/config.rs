//! Runtime configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Fastest supported animation rate.
pub const MAX_RATE: u32 = 5;

/// Visualizer configuration.
///
/// The first five fields persist across sessions (see
/// [`ConfigStore`](crate::store::ConfigStore)); `rate` and `show_trace` are
/// session-only. Absent fields fall back to [`Config::default`] when an old
/// or partial options blob is loaded.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Config {
    /// Probability in (0, 1] that a generated cell is a wall.
    pub wall_frequency: f64,
    /// Board edge length; the board is always square.
    pub grid_size: i32,
    /// 8-way connectivity instead of 4-way.
    pub diagonal: bool,
    /// When the target is unreachable, walk to the closest reachable cell
    /// instead of reporting no route.
    pub closest: bool,
    /// Show the collaborator's f/g/h costs while the trace replays.
    pub show_search_info: bool,
    /// Animation rate, 1..=[`MAX_RATE`]; tick delay is `1000 / rate` ms.
    #[serde(skip_serializing)]
    pub rate: u32,
    /// Replay the exploration trace before the path phase.
    #[serde(skip_serializing)]
    pub show_trace: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            wall_frequency: 0.1,
            grid_size: 10,
            diagonal: false,
            closest: false,
            show_search_info: false,
            rate: 1,
            show_trace: true,
        }
    }
}

impl Config {
    /// The delay between animation ticks.
    ///
    /// With the trace phase enabled the user rate drives it; without, the
    /// delay shrinks with the board so large boards still finish briskly.
    pub fn interval(&self) -> Duration {
        let ms = if self.show_trace {
            1000 / u64::from(self.rate.clamp(1, MAX_RATE))
        } else {
            1000 / self.grid_size.max(1) as u64
        };
        Duration::from_millis(ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn documented_defaults() {
        let c = Config::default();
        assert_eq!(c.wall_frequency, 0.1);
        assert_eq!(c.grid_size, 10);
        assert!(!c.diagonal);
        assert!(!c.closest);
        assert!(!c.show_search_info);
        assert_eq!(c.rate, 1);
        assert!(c.show_trace);
    }

    #[test]
    fn interval_follows_rate() {
        let mut c = Config::default();
        assert_eq!(c.interval(), Duration::from_millis(1000));
        c.rate = 5;
        assert_eq!(c.interval(), Duration::from_millis(200));
    }

    #[test]
    fn interval_without_trace_follows_board_size() {
        let c = Config {
            show_trace: false,
            grid_size: 20,
            ..Config::default()
        };
        assert_eq!(c.interval(), Duration::from_millis(50));
    }

    #[test]
    fn session_fields_not_serialized() {
        let c = Config {
            rate: 4,
            show_trace: false,
            ..Config::default()
        };
        let json = serde_json::to_string(&c).unwrap();
        assert!(!json.contains("rate"));
        assert!(!json.contains("showTrace"));
    }
}
