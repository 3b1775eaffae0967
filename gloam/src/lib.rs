//! Gloam: a single-floor, turn-based dungeon crawl core.
//!
//! A [`GameState`] owns one generated floor, the player, and a queue of
//! [`Command`]s. Each [`GameState::advance_tick`] drains the queue against
//! the player's energy, forwarding messages to a [`MessageSink`] and
//! notifying a [`StateObserver`] so a renderer can redraw. Rendering and
//! input wiring live outside this crate.

pub mod command;
pub mod config;
pub mod entity;
pub mod error;
pub mod game;
pub mod gamemap;
pub mod message;
pub mod terrain;
pub mod visibility;
pub mod world;

#[cfg(test)]
mod test_support;

pub use command::{Command, Direction};
pub use config::{GameConfig, MapConfig};
pub use entity::{ARCHETYPES, Archetype, Monster, MonsterKind, Player};
pub use error::{GenError, UnknownCommand};
pub use game::{GameState, SchedulerState, StateObserver};
pub use gamemap::{Map, Remembered};
pub use message::{Channel, GameLog, Message, MessageSink, format_template};
pub use terrain::TileKind;
pub use world::{CellView, query_cell};
