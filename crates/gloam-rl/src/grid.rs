//! A typed, fully-initialized 2D grid for map layers.
//!
//! [`Grid<T>`] stores one `T` per cell in row-major order, indexed by
//! `x + y * width`. Every cell always holds a value: grids are allocated
//! filled and never partially sized.

use gloam_core::{Point, Range};

/// A width × height grid of `T` values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid<T> {
    cells: Vec<T>,
    width: i32,
    height: i32,
}

impl<T: Clone> Grid<T> {
    /// Create a new grid with every cell set to `fill`.
    ///
    /// Negative dimensions are treated as zero.
    pub fn new(width: i32, height: i32, fill: T) -> Self {
        let width = width.max(0);
        let height = height.max(0);
        Self {
            cells: vec![fill; (width * height) as usize],
            width,
            height,
        }
    }

    /// Fill the entire grid with the given value.
    pub fn fill(&mut self, value: T) {
        for c in &mut self.cells {
            *c = value.clone();
        }
    }
}

impl<T> Grid<T> {
    /// Bounding range `[0, width) × [0, height)`.
    pub fn bounds(&self) -> Range {
        Range::new(0, 0, self.width, self.height)
    }

    /// Size as a Point (x = width, y = height).
    pub fn size(&self) -> Point {
        Point::new(self.width, self.height)
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    /// Number of cells.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Whether the grid contains the given point.
    pub fn contains(&self, p: Point) -> bool {
        p.x >= 0 && p.y >= 0 && p.x < self.width && p.y < self.height
    }

    /// Row-major index of `p`, or `None` if out of bounds.
    pub fn index(&self, p: Point) -> Option<usize> {
        self.contains(p).then(|| (p.x + p.y * self.width) as usize)
    }

    /// Reference to the value at `p`, or `None` if out of bounds.
    pub fn get(&self, p: Point) -> Option<&T> {
        self.index(p).map(|i| &self.cells[i])
    }

    /// Mutable reference to the value at `p`, or `None` if out of bounds.
    pub fn get_mut(&mut self, p: Point) -> Option<&mut T> {
        self.index(p).map(|i| &mut self.cells[i])
    }

    /// Set the value at `p`. Does nothing if out of bounds.
    pub fn set(&mut self, p: Point, value: T) {
        if let Some(i) = self.index(p) {
            self.cells[i] = value;
        }
    }

    /// Iterate over `(Point, &T)` pairs in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (Point, &T)> + '_ {
        self.bounds().iter().zip(self.cells.iter())
    }
}

impl<T: Copy> Grid<T> {
    /// Copy of the value at `p`, or `None` if out of bounds.
    pub fn at(&self, p: Point) -> Option<T> {
        self.get(p).copied()
    }
}

impl<T: Copy + PartialEq> Grid<T> {
    /// Count how many cells equal `value`.
    pub fn count(&self, value: T) -> usize {
        self.cells.iter().filter(|&&c| c == value).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_and_size() {
        let g = Grid::new(10, 5, 0u8);
        assert_eq!(g.size(), Point::new(10, 5));
        assert_eq!(g.len(), 50);
        assert_eq!(g.bounds(), Range::new(0, 0, 10, 5));
    }

    #[test]
    fn test_set_and_at() {
        let mut g = Grid::new(4, 4, 0);
        let p = Point::new(2, 3);
        g.set(p, 42);
        assert_eq!(g.at(p), Some(42));
        assert_eq!(g.at(Point::new(0, 0)), Some(0));
        assert_eq!(g.at(Point::new(4, 0)), None);
        assert_eq!(g.at(Point::new(-1, 2)), None);
        g.set(Point::new(10, 10), 7);
        assert_eq!(g.count(7), 0);
    }

    #[test]
    fn test_index_is_row_major() {
        let g = Grid::new(3, 2, ());
        assert_eq!(g.index(Point::new(2, 1)), Some(5));
        assert_eq!(g.index(Point::new(3, 0)), None);
    }

    #[test]
    fn test_fill_and_count() {
        let mut g = Grid::new(5, 5, 'a');
        g.fill('b');
        assert_eq!(g.count('b'), 25);
        g.set(Point::new(0, 0), 'c');
        assert_eq!(g.count('b'), 24);
        assert_eq!(g.count('c'), 1);
    }

    #[test]
    fn test_iter() {
        let mut g = Grid::new(3, 2, 0);
        g.set(Point::new(1, 0), 5);
        let items: Vec<_> = g.iter().map(|(p, &v)| (p, v)).collect();
        assert_eq!(items.len(), 6);
        assert_eq!(items[1], (Point::new(1, 0), 5));
        assert_eq!(items[3].0, Point::new(0, 1));
    }

    #[test]
    fn test_non_copy_values() {
        let mut g: Grid<Option<String>> = Grid::new(2, 2, None);
        *g.get_mut(Point::new(1, 1)).unwrap() = Some("x".to_string());
        assert_eq!(g.get(Point::new(1, 1)).unwrap().as_deref(), Some("x"));
        assert_eq!(g.get(Point::new(0, 0)), Some(&None));
    }
}
