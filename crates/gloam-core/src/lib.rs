//! **gloam-core**: geometry primitives shared by the gloam crates.
//!
//! Map coordinates are plain integer [`Point`]s; rectangular regions
//! (map bounds, rooms, FOV windows) are half-open [`Range`]s.

pub mod geom;

pub use geom::{Point, Range, RangeIter};
