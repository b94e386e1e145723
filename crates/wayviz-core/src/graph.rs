//! The [`Graph`]: a square board of cells with a fixed connectivity mode.

use crate::cell::{Cell, Weight};
use crate::geom::Point;

/// A `size × size` board of [`Cell`]s.
///
/// The dimensions and the `diagonal` connectivity flag are fixed at
/// construction; only the per-cell annotations mutate afterwards.
#[derive(Clone, Debug)]
pub struct Graph {
    size: i32,
    diagonal: bool,
    cells: Vec<Cell>,
}

impl Graph {
    /// An all-road board.
    pub fn new(size: i32, diagonal: bool) -> Self {
        Self::with_walls(size, diagonal, &[])
    }

    /// A board with walls at the given coordinates; out-of-board wall
    /// coordinates are ignored.
    pub fn with_walls(size: i32, diagonal: bool, walls: &[Point]) -> Self {
        let size = size.max(0);
        let mut cells = vec![Cell::new(Weight::Road); (size * size) as usize];
        for &p in walls {
            if p.x >= 0 && p.y >= 0 && p.x < size && p.y < size {
                cells[(p.y * size + p.x) as usize] = Cell::new(Weight::Wall);
            }
        }
        Self {
            size,
            diagonal,
            cells,
        }
    }

    #[inline]
    pub fn size(&self) -> i32 {
        self.size
    }

    /// Whether movement may use the diagonal neighbours.
    #[inline]
    pub fn diagonal(&self) -> bool {
        self.diagonal
    }

    #[inline]
    pub fn contains(&self, p: Point) -> bool {
        p.x >= 0 && p.y >= 0 && p.x < self.size && p.y < self.size
    }

    #[inline]
    fn index(&self, p: Point) -> usize {
        (p.y * self.size + p.x) as usize
    }

    /// The cell at `p`, or `None` outside the board.
    pub fn at(&self, p: Point) -> Option<&Cell> {
        if !self.contains(p) {
            return None;
        }
        Some(&self.cells[self.index(p)])
    }

    /// Mutable access to the cell at `p`.
    pub fn at_mut(&mut self, p: Point) -> Option<&mut Cell> {
        if !self.contains(p) {
            return None;
        }
        let idx = self.index(p);
        Some(&mut self.cells[idx])
    }

    /// Whether `p` is on the board and passable.
    #[inline]
    pub fn is_road(&self, p: Point) -> bool {
        self.at(p).is_some_and(|c| !c.is_wall())
    }

    /// Append the passable neighbours of `p` to `buf`, honouring the
    /// board's connectivity mode. The caller clears `buf`.
    pub fn neighbors(&self, p: Point, buf: &mut Vec<Point>) {
        if self.diagonal {
            buf.extend(p.neighbors_8().into_iter().filter(|&n| self.is_road(n)));
        } else {
            buf.extend(p.neighbors_4().into_iter().filter(|&n| self.is_road(n)));
        }
    }

    /// Reset every cell's annotations, keeping all weights.
    pub fn clear_marks(&mut self) {
        for cell in &mut self.cells {
            cell.clear_marks();
        }
    }

    /// Row-major iterator over `(Point, &Cell)`.
    pub fn iter(&self) -> impl Iterator<Item = (Point, &Cell)> {
        let size = self.size;
        self.cells.iter().enumerate().map(move |(i, cell)| {
            let i = i as i32;
            (Point::new(i % size, i / size), cell)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn with_walls_places_walls() {
        let g = Graph::with_walls(4, false, &[Point::new(1, 2), Point::new(9, 9)]);
        assert!(g.at(Point::new(1, 2)).unwrap().is_wall());
        assert!(g.is_road(Point::new(0, 0)));
        assert_eq!(g.iter().filter(|(_, c)| c.is_wall()).count(), 1);
    }

    #[test]
    fn neighbors_respect_connectivity() {
        let g4 = Graph::new(3, false);
        let g8 = Graph::new(3, true);
        let mut buf = Vec::new();
        g4.neighbors(Point::new(1, 1), &mut buf);
        assert_eq!(buf.len(), 4);
        buf.clear();
        g8.neighbors(Point::new(1, 1), &mut buf);
        assert_eq!(buf.len(), 8);
    }

    #[test]
    fn neighbors_skip_walls_and_edges() {
        let g = Graph::with_walls(3, false, &[Point::new(1, 0)]);
        let mut buf = Vec::new();
        g.neighbors(Point::new(0, 0), &mut buf);
        assert_eq!(buf, vec![Point::new(0, 1)]);
    }

    #[test]
    fn clear_marks_is_board_wide() {
        let mut g = Graph::new(3, false);
        g.at_mut(Point::new(2, 2)).unwrap().path_active = true;
        g.at_mut(Point::new(0, 1)).unwrap().visited = true;
        g.clear_marks();
        assert!(g.iter().all(|(_, c)| !c.path_active && !c.visited));
    }

    #[test]
    fn out_of_board_access_is_none() {
        let mut g = Graph::new(2, false);
        assert!(g.at(Point::new(2, 0)).is_none());
        assert!(g.at(Point::new(0, -1)).is_none());
        assert!(g.at_mut(Point::new(-1, 0)).is_none());
    }
}
