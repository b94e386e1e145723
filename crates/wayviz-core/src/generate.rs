//! Random board generation.

use rand::Rng;

use crate::config::Config;
use crate::geom::Point;
use crate::graph::Graph;

/// Builds a fresh [`Graph`] from size, obstacle density, and connectivity.
///
/// Each cell is sampled independently: wall with probability
/// `wall_frequency`, road otherwise. This is deliberately uncorrelated
/// noise: nothing guarantees a route between any two cells, and no repair
/// or retry pass runs afterwards. An unreachable target is a legitimate
/// outcome surfaced later by the "no route" notice.
#[derive(Clone, Debug)]
pub struct GridGenerator {
    pub size: i32,
    pub wall_frequency: f64,
    pub diagonal: bool,
}

impl GridGenerator {
    pub fn from_config(config: &Config) -> Self {
        Self {
            size: config.grid_size,
            wall_frequency: config.wall_frequency,
            diagonal: config.diagonal,
        }
    }

    /// Draw one sample per cell and build the board.
    pub fn generate<R: Rng>(&self, rng: &mut R) -> Graph {
        let mut walls = Vec::new();
        for y in 0..self.size {
            for x in 0..self.size {
                if rng.random::<f64>() < self.wall_frequency {
                    walls.push(Point::new(x, y));
                }
            }
        }
        Graph::with_walls(self.size, self.diagonal, &walls)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn wall_fraction_tracks_frequency() {
        let mut rng = StdRng::seed_from_u64(7);
        let g = GridGenerator {
            size: 64,
            wall_frequency: 0.3,
            diagonal: false,
        }
        .generate(&mut rng);
        let walls = g.iter().filter(|(_, c)| c.is_wall()).count() as f64;
        let fraction = walls / (64.0 * 64.0);
        assert!((fraction - 0.3).abs() < 0.05, "fraction = {fraction}");
    }

    #[test]
    fn frequency_one_walls_everything() {
        let mut rng = StdRng::seed_from_u64(1);
        let g = GridGenerator {
            size: 8,
            wall_frequency: 1.0,
            diagonal: false,
        }
        .generate(&mut rng);
        assert!(g.iter().all(|(_, c)| c.is_wall()));
    }

    #[test]
    fn generated_board_keeps_requested_shape() {
        let mut rng = StdRng::seed_from_u64(2);
        let g = GridGenerator {
            size: 12,
            wall_frequency: 0.2,
            diagonal: true,
        }
        .generate(&mut rng);
        assert_eq!(g.size(), 12);
        assert!(g.diagonal());
        assert_eq!(g.iter().count(), 144);
    }
}
