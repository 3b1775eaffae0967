//! Room-and-corridor dungeon excavation.
//!
//! [`Digger`] places non-overlapping rectangular rooms on a solid map until a
//! target fraction of the map is dug out, then links every room to its
//! nearest earlier neighbour with an L-shaped corridor. Cells are reported
//! through callbacks so the caller decides how to represent terrain:
//!
//! - [`Digger::dig`] reports every room cell: [`DigCell::Wall`] for the
//!   one-cell ring around a room, [`DigCell::Floor`] for its interior.
//! - [`Digger::carve_corridors`] reports every corridor cell, always as
//!   [`DigCell::Floor`]. Corridors run centre to centre and punch through
//!   the walls they cross.

use gloam_core::{Point, Range};
use rand::{Rng, RngExt};

/// What the digger wants at a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DigCell {
    Wall,
    Floor,
}

/// An excavated room. Coordinates describe the inclusive interior; the
/// walls sit one cell outside it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Room {
    pub x1: i32,
    pub y1: i32,
    pub x2: i32,
    pub y2: i32,
}

impl Room {
    /// Interior cells (the room's bounding box for spawning).
    pub fn interior(&self) -> Range {
        Range::inclusive(Point::new(self.x1, self.y1), Point::new(self.x2, self.y2))
    }

    /// Interior plus the surrounding wall ring.
    pub fn bounds(&self) -> Range {
        self.interior().grow(1)
    }

    /// Geometric centre of the interior.
    pub fn center(&self) -> Point {
        self.interior().center()
    }

    /// Whether `p` lies on the wall ring.
    pub fn is_wall(&self, p: Point) -> bool {
        self.bounds().contains(p) && !self.interior().contains(p)
    }
}

/// An L-shaped corridor between two points.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Corridor {
    pub start: Point,
    pub end: Point,
    /// Walk along x first, then y.
    pub horizontal_first: bool,
}

impl Corridor {
    /// Every cell of the corridor, from `start` to `end`, 4-connected.
    pub fn points(&self) -> Vec<Point> {
        let corner = if self.horizontal_first {
            Point::new(self.end.x, self.start.y)
        } else {
            Point::new(self.start.x, self.end.y)
        };
        let mut pts = Vec::new();
        walk(self.start, corner, &mut pts);
        walk(corner, self.end, &mut pts);
        pts.push(self.end);
        pts
    }
}

/// Push the straight segment `[from, to)` onto `pts`.
fn walk(from: Point, to: Point, pts: &mut Vec<Point>) {
    let step = Point::new((to.x - from.x).signum(), (to.y - from.y).signum());
    let mut p = from;
    while p != to {
        pts.push(p);
        p = p + step;
    }
}

/// Tuning knobs for [`Digger`].
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct DiggerConfig {
    /// Inclusive interior width range.
    pub room_width: (i32, i32),
    /// Inclusive interior height range.
    pub room_height: (i32, i32),
    /// Stop once this fraction of the inner map is room floor.
    pub dug_percentage: f64,
    /// Placement attempts before giving up on the target.
    pub max_attempts: usize,
}

impl Default for DiggerConfig {
    fn default() -> Self {
        Self {
            room_width: (3, 9),
            room_height: (3, 5),
            dug_percentage: 0.2,
            max_attempts: 1000,
        }
    }
}

/// Room-and-corridor digger over a `width` × `height` map.
#[derive(Debug, Clone)]
pub struct Digger {
    width: i32,
    height: i32,
    config: DiggerConfig,
    rooms: Vec<Room>,
    corridors: Vec<Corridor>,
}

impl Digger {
    pub fn new(width: i32, height: i32, config: DiggerConfig) -> Self {
        Self {
            width,
            height,
            config,
            rooms: Vec::new(),
            corridors: Vec::new(),
        }
    }

    /// Smallest map that fits one minimal room and its walls.
    pub fn min_size(config: &DiggerConfig) -> Point {
        Point::new(config.room_width.0 + 2, config.room_height.0 + 2)
    }

    /// Place rooms and plan corridors, reporting room cells to `cell`.
    ///
    /// Returns the number of rooms. Any previous result is discarded.
    pub fn dig<R: Rng + ?Sized>(&mut self, rng: &mut R, mut cell: impl FnMut(Point, DigCell)) -> usize {
        self.rooms.clear();
        self.corridors.clear();

        let cfg = &self.config;
        let max_w = cfg.room_width.1.min(self.width - 2);
        let max_h = cfg.room_height.1.min(self.height - 2);
        if max_w < cfg.room_width.0 || max_h < cfg.room_height.0 || cfg.room_width.0 < 1 || cfg.room_height.0 < 1 {
            log::debug!("digger: {}x{} map too small for any room", self.width, self.height);
            return 0;
        }

        let inner = ((self.width - 2).max(1) * (self.height - 2).max(1)) as f64;
        let target = (inner * cfg.dug_percentage).ceil() as i32;
        let mut dug = 0;
        let mut attempts = 0;
        while attempts < cfg.max_attempts && (dug < target || self.rooms.is_empty()) {
            attempts += 1;
            let w = rng.random_range(cfg.room_width.0..=max_w);
            let h = rng.random_range(cfg.room_height.0..=max_h);
            let x1 = rng.random_range(1..=self.width - 1 - w);
            let y1 = rng.random_range(1..=self.height - 1 - h);
            let room = Room {
                x1,
                y1,
                x2: x1 + w - 1,
                y2: y1 + h - 1,
            };
            // Walls may not touch another room's walls.
            let margin = room.bounds().grow(1);
            if self.rooms.iter().any(|r| r.bounds().overlaps(margin)) {
                continue;
            }
            dug += w * h;
            self.rooms.push(room);
        }

        for room in &self.rooms {
            for p in room.bounds() {
                let kind = if room.is_wall(p) {
                    DigCell::Wall
                } else {
                    DigCell::Floor
                };
                cell(p, kind);
            }
        }

        for i in 1..self.rooms.len() {
            let j = nearest_earlier(&self.rooms, i);
            self.corridors.push(Corridor {
                start: self.rooms[i].center(),
                end: self.rooms[j].center(),
                horizontal_first: rng.random_bool(0.5),
            });
        }

        log::debug!(
            "digger: {} rooms, {} corridors, {dug}/{target} cells dug in {attempts} attempts",
            self.rooms.len(),
            self.corridors.len()
        );
        self.rooms.len()
    }

    /// Report every planned corridor cell as floor.
    pub fn carve_corridors(&self, mut cell: impl FnMut(Point, DigCell)) {
        for c in &self.corridors {
            for p in c.points() {
                cell(p, DigCell::Floor);
            }
        }
    }

    /// Rooms from the last [`dig`](Self::dig), in placement order.
    pub fn rooms(&self) -> &[Room] {
        &self.rooms
    }

    /// Corridors planned by the last [`dig`](Self::dig).
    pub fn corridors(&self) -> &[Corridor] {
        &self.corridors
    }
}

fn nearest_earlier(rooms: &[Room], i: usize) -> usize {
    let c = rooms[i].center();
    (0..i)
        .min_by_key(|&j| {
            let d = rooms[j].center() - c;
            d.x.abs() + d.y.abs()
        })
        .unwrap_or(0)
}
