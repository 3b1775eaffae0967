//! Player commands and their handlers.
//!
//! Each handler applies one command to the game state, charges the
//! player's energy itself, and returns the messages it produced in order.
//! Handlers that change nothing charge nothing.

use std::fmt;
use std::str::FromStr;

use gloam_core::Point;

use crate::entity::MonsterKind;
use crate::error::UnknownCommand;
use crate::game::GameState;
use crate::message::{Channel, Message};

/// Energy charged by a move or a wait.
pub const ACTION_COST: f64 = 1.0;

/// A compass direction, or the player's own cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Direction {
    North,
    NorthEast,
    East,
    SouthEast,
    South,
    SouthWest,
    West,
    NorthWest,
    Here,
}

impl Direction {
    /// The eight compass directions, clockwise from north.
    pub const COMPASS: [Direction; 8] = [
        Direction::North,
        Direction::NorthEast,
        Direction::East,
        Direction::SouthEast,
        Direction::South,
        Direction::SouthWest,
        Direction::West,
        Direction::NorthWest,
    ];

    /// Offset of one step; y grows southwards.
    pub const fn delta(self) -> Point {
        match self {
            Direction::North => Point::new(0, -1),
            Direction::NorthEast => Point::new(1, -1),
            Direction::East => Point::new(1, 0),
            Direction::SouthEast => Point::new(1, 1),
            Direction::South => Point::new(0, 1),
            Direction::SouthWest => Point::new(-1, 1),
            Direction::West => Point::new(-1, 0),
            Direction::NorthWest => Point::new(-1, -1),
            Direction::Here => Point::ZERO,
        }
    }

    pub const fn id(self) -> &'static str {
        match self {
            Direction::North => "n",
            Direction::NorthEast => "ne",
            Direction::East => "e",
            Direction::SouthEast => "se",
            Direction::South => "s",
            Direction::SouthWest => "sw",
            Direction::West => "w",
            Direction::NorthWest => "nw",
            Direction::Here => "here",
        }
    }

    pub fn from_id(id: &str) -> Option<Direction> {
        if id == "here" {
            return Some(Direction::Here);
        }
        Direction::COMPASS.into_iter().find(|d| d.id() == id)
    }
}

/// Something the player asked to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Command {
    /// Step one cell; `Here` is never a valid move.
    Move(Direction),
    /// Feed on a weakened monster in the given cell.
    Drain(Direction),
    /// Pass the turn.
    Wait,
}

impl Command {
    /// Parse an input identifier such as `move_ne`, `drain_here` or `wait`.
    pub fn from_id(id: &str) -> Option<Command> {
        if id == "wait" {
            return Some(Command::Wait);
        }
        if let Some(dir) = id.strip_prefix("move_") {
            return Direction::from_id(dir)
                .filter(|&d| d != Direction::Here)
                .map(Command::Move);
        }
        id.strip_prefix("drain_")
            .and_then(Direction::from_id)
            .map(Command::Drain)
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Command::Move(d) => write!(f, "move_{}", d.id()),
            Command::Drain(d) => write!(f, "drain_{}", d.id()),
            Command::Wait => f.write_str("wait"),
        }
    }
}

impl FromStr for Command {
    type Err = UnknownCommand;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Command::from_id(s).ok_or_else(|| UnknownCommand(s.to_string()))
    }
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// Apply `cmd` to `state` and return what happened.
pub(crate) fn execute(state: &mut GameState, cmd: Command) -> Vec<Message> {
    match cmd {
        Command::Move(dir) => handle_move(state, dir),
        Command::Drain(dir) => handle_drain(state, dir),
        Command::Wait => {
            state.player.energy -= ACTION_COST;
            Vec::new()
        }
    }
}

fn handle_move(state: &mut GameState, dir: Direction) -> Vec<Message> {
    let target = state.player.pos + dir.delta();
    let view = state.query_cell(target);
    if view.blocked {
        let msg = match view.blocking_monster() {
            Some(m) => Message::format("The %s is in your way.", m.archetype().description, Channel::Normal),
            None => Message::new("You cannot go that way.", Channel::Normal),
        };
        return vec![msg];
    }

    state.player.pos = target;
    state.player.energy -= ACTION_COST;
    state.update_visibility();

    let in_view: Vec<MonsterKind> = state
        .visible()
        .iter()
        .filter_map(|&p| state.map.monster(p).map(|m| m.kind))
        .collect();
    let mut messages = Vec::new();
    for kind in in_view {
        if state.player.learn(kind) {
            log::debug!("first sighting of {}", kind.archetype().name);
            let a = kind.archetype();
            messages.push(Message::format(a.flavor, a.description, Channel::Thought));
        }
    }
    messages
}

fn handle_drain(state: &mut GameState, dir: Direction) -> Vec<Message> {
    let target = state.player.pos + dir.delta();
    let Some(monster) = state.map.monster(target).copied() else {
        return vec![Message::new("There is nothing there to drain.", Channel::Normal)];
    };
    let a = monster.archetype();
    if !monster.is_weakened() {
        return vec![Message::format("The %s resists your hunger!", a.description, Channel::Angry)];
    }

    state.map.remove_monster(target);
    state.player.essence += a.danger;
    state.player.energy -= state.config().drain_cost;
    log::debug!(
        "drained {} at {target} for {} essence (total {})",
        a.name,
        a.danger,
        state.player.essence
    );
    vec![Message::format("You drain the %s dry.", a.description, Channel::Normal)]
}
