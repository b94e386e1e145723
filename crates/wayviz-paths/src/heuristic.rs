//! Distance estimates for the two board connectivity modes.

use wayviz_core::Point;

/// Cost of one diagonal step.
pub const SQRT_2: f64 = std::f64::consts::SQRT_2;

/// Manhattan (L1) distance, admissible for 4-way movement.
#[inline]
pub fn manhattan(a: Point, b: Point) -> f64 {
    f64::from((a.x - b.x).abs() + (a.y - b.y).abs())
}

/// Octile distance, admissible for 8-way movement with √2 diagonals.
#[inline]
pub fn octile(a: Point, b: Point) -> f64 {
    let dx = f64::from((a.x - b.x).abs());
    let dy = f64::from((a.y - b.y).abs());
    (dx + dy) + (SQRT_2 - 2.0) * dx.min(dy)
}
