//! Errors raised while generating a map or parsing commands.

use std::fmt;

/// Why a map could not be generated. The previous map, if any, stays
/// active when one of these is returned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenError {
    /// No monster archetype has `danger <= ` the requested level.
    NoEligibleArchetype { danger: i32 },
    /// The map cannot hold a single room and its walls.
    MapTooSmall {
        width: i32,
        height: i32,
        min_width: i32,
        min_height: i32,
    },
    /// The digger placed no rooms.
    NoRooms,
}

impl fmt::Display for GenError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoEligibleArchetype { danger } => {
                write!(f, "no monster archetype is eligible at danger level {danger}")
            }
            Self::MapTooSmall {
                width,
                height,
                min_width,
                min_height,
            } => write!(
                f,
                "map {width}x{height} is smaller than the minimum {min_width}x{min_height}"
            ),
            Self::NoRooms => f.write_str("digger produced no rooms"),
        }
    }
}

impl std::error::Error for GenError {}

/// An input identifier that names no command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownCommand(pub String);

impl fmt::Display for UnknownCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown command id \u{201c}{}\u{201d}", self.0)
    }
}

impl std::error::Error for UnknownCommand {}
