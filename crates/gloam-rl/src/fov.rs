//! Field of vision by symmetric shadow casting.
//!
//! Implements Albert Ford's iterative symmetric shadow casting: the area
//! around the source is split into four quadrants, each scanned row by row
//! with rational start/end slopes. Opaque cells are revealed (you see the
//! wall) and cast shadows on the rows behind them; floor cells are revealed
//! only when they lie symmetrically inside the lit sector, so that "A sees B"
//! iff "B sees A" on open floor.

use gloam_core::{Point, Range};

/// The shape of the FOV boundary.
///
/// A square boundary uses Chebyshev distance (every cell within `radius`
/// king moves). `Circle` clips the result to a Euclidean disc.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FovShape {
    #[default]
    Square,
    Circle,
}

/// Reusable FOV buffers over a fixed rectangular range.
#[derive(Debug, Clone)]
pub struct Fov {
    range: Range,
    /// Visibility bitmap for `range`, row-major.
    lit: Vec<bool>,
    /// Visible points from the last computation, in discovery order.
    visibles: Vec<Point>,
    tiles_buf: Vec<Point>,
}

impl Fov {
    /// Create FOV buffers covering `range`.
    pub fn new(range: Range) -> Self {
        Self {
            range,
            lit: vec![false; range.len()],
            visibles: Vec::new(),
            tiles_buf: Vec::new(),
        }
    }

    /// Change the covered range, clearing any previous result.
    pub fn set_range(&mut self, range: Range) {
        self.range = range;
        self.lit.clear();
        self.lit.resize(range.len(), false);
        self.visibles.clear();
    }

    /// The covered range.
    pub fn range(&self) -> Range {
        self.range
    }

    fn idx(&self, p: Point) -> usize {
        let q = p - self.range.min;
        (q.y * self.range.width() + q.x) as usize
    }

    /// Compute the cells visible from `src` up to `radius`.
    ///
    /// `opaque` reports whether a cell blocks sight; it is only called for
    /// points inside the covered range. Returns the visible points, the
    /// source included. A source outside the range sees nothing.
    pub fn compute(
        &mut self,
        src: Point,
        radius: i32,
        shape: FovShape,
        opaque: impl Fn(Point) -> bool,
    ) -> &[Point] {
        for v in &mut self.lit {
            *v = false;
        }
        self.visibles.clear();
        if !src.in_range(&self.range) || radius < 0 {
            return &self.visibles;
        }
        let idx = self.idx(src);
        self.lit[idx] = true;
        self.visibles.push(src);
        for dir in [QuadDir::North, QuadDir::East, QuadDir::South, QuadDir::West] {
            self.scan_quadrant(Quadrant { dir, src }, radius, &opaque);
        }
        if shape == FovShape::Circle {
            self.retain_circular(src, radius);
        }
        &self.visibles
    }

    /// Clip the current result to a Euclidean disc around `center`.
    fn retain_circular(&mut self, center: Point, radius: i32) {
        let r_sq = (radius as i64) * (radius as i64);
        let range = self.range;
        let width = range.width();
        let lit = &mut self.lit;
        self.visibles.retain(|&p| {
            let keep = p.dist_sq(center) <= r_sq;
            if !keep {
                let q = p - range.min;
                lit[(q.y * width + q.x) as usize] = false;
            }
            keep
        });
    }

    fn reveal(&mut self, qt: Quadrant, tile: Point) {
        let p = qt.transform(tile);
        let idx = self.idx(p);
        if !self.lit[idx] {
            self.lit[idx] = true;
            self.visibles.push(p);
        }
    }

    fn scan_quadrant(&mut self, qt: Quadrant, radius: i32, opaque: &impl Fn(Point) -> bool) {
        let (colmin, colmax) = qt.max_cols(self.range);
        let dmax = qt.max_depth(self.range).min(radius);
        if dmax <= 0 {
            return;
        }

        let mut rows = vec![Row {
            depth: 1,
            slope_start: Point::new(-1, 1),
            slope_end: Point::new(1, 1),
        }];

        while let Some(mut r) = rows.pop() {
            let mut prev: Option<(Point, bool)> = None;
            self.tiles_buf.clear();
            r.tiles(&mut self.tiles_buf, colmin, colmax);
            for ti in 0..self.tiles_buf.len() {
                let tile = self.tiles_buf[ti];
                let wall = opaque(qt.transform(tile));
                if wall || r.is_symmetric(tile) {
                    self.reveal(qt, tile);
                }
                if let Some((_, pwall)) = prev {
                    if pwall && !wall {
                        r.slope_start = slope(tile);
                    }
                    if !pwall && wall {
                        let mut next = r.next();
                        next.slope_end = slope(tile);
                        if next.depth <= dmax {
                            rows.push(next);
                        }
                    }
                }
                prev = Some((tile, wall));
            }
            if let Some((_, false)) = prev {
                if r.depth < dmax {
                    rows.push(r.next());
                }
            }
        }
    }

    /// Whether `p` was visible in the last computation.
    pub fn visible(&self, p: Point) -> bool {
        p.in_range(&self.range) && self.lit[self.idx(p)]
    }

    /// Visible points from the last computation.
    pub fn visibles(&self) -> &[Point] {
        &self.visibles
    }
}

// ── helper types ──────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum QuadDir {
    North,
    East,
    South,
    West,
}

/// A quadrant around the source. Quadrant-local tiles are
/// `Point { x: depth, y: column }`.
#[derive(Debug, Clone, Copy)]
struct Quadrant {
    dir: QuadDir,
    src: Point,
}

impl Quadrant {
    fn transform(&self, tile: Point) -> Point {
        let (depth, col) = (tile.x, tile.y);
        match self.dir {
            QuadDir::North => Point::new(self.src.x + col, self.src.y - depth),
            QuadDir::East => Point::new(self.src.x + depth, self.src.y + col),
            QuadDir::South => Point::new(self.src.x + col, self.src.y + depth),
            QuadDir::West => Point::new(self.src.x - depth, self.src.y + col),
        }
    }

    /// Column bounds that keep transformed tiles inside `rg`.
    fn max_cols(&self, rg: Range) -> (i32, i32) {
        match self.dir {
            QuadDir::North | QuadDir::South => {
                (rg.min.x - self.src.x, rg.max.x - self.src.x - 1)
            }
            QuadDir::East | QuadDir::West => {
                (rg.min.y - self.src.y, rg.max.y - self.src.y - 1)
            }
        }
    }

    /// Depth bound that keeps transformed tiles inside `rg`.
    fn max_depth(&self, rg: Range) -> i32 {
        match self.dir {
            QuadDir::North => self.src.y - rg.min.y,
            QuadDir::East => rg.max.x - self.src.x - 1,
            QuadDir::South => rg.max.y - self.src.y - 1,
            QuadDir::West => self.src.x - rg.min.x,
        }
    }
}

/// A row of a quadrant scan. Slopes are fractions `num / den` stored as
/// `Point { x: num, y: den }` with a positive denominator.
#[derive(Debug, Clone, Copy)]
struct Row {
    depth: i32,
    slope_start: Point,
    slope_end: Point,
}

impl Row {
    fn tiles(&self, ts: &mut Vec<Point>, colmin: i32, colmax: i32) {
        let min = round_ties_up(self.depth * self.slope_start.x, self.slope_start.y).max(colmin);
        let max = round_ties_down(self.depth * self.slope_end.x, self.slope_end.y).min(colmax);
        for col in min..=max {
            ts.push(Point::new(self.depth, col));
        }
    }

    fn next(self) -> Row {
        Row {
            depth: self.depth + 1,
            ..self
        }
    }

    fn is_symmetric(&self, tile: Point) -> bool {
        let col = tile.y;
        col * self.slope_start.y >= self.depth * self.slope_start.x
            && col * self.slope_end.y <= self.depth * self.slope_end.x
    }
}

/// Slope through the left edge of a tile: `(2 * col - 1) / (2 * depth)`.
fn slope(tile: Point) -> Point {
    Point::new(2 * tile.y - 1, 2 * tile.x)
}

/// `n / d` rounded to nearest, halves rounded up (`d > 0`).
fn round_ties_up(n: i32, d: i32) -> i32 {
    (2 * n + d).div_euclid(2 * d)
}

/// `n / d` rounded to nearest, halves rounded down (`d > 0`).
fn round_ties_down(n: i32, d: i32) -> i32 {
    -round_ties_up(-n, d)
}
