//! Roguelike utilities for gloam: dice rolls, typed grids, FOV,
//! room-and-corridor digging, and a FIFO command queue.

pub mod digger;
pub mod events;
pub mod fov;
pub mod grid;
pub mod roll;

pub use digger::{DigCell, Digger, DiggerConfig, Room};
pub use events::EventQueue;
pub use fov::{Fov, FovShape};
pub use grid::Grid;
pub use roll::{Roll, RollError};
