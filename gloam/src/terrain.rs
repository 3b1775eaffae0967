//! Terrain kinds and their static attributes.

use std::fmt;

/// The closed set of terrain kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum TileKind {
    /// Undug solid stone; the baseline of every fresh map.
    #[default]
    Rock,
    Wall,
    Floor,
}

impl TileKind {
    pub const ALL: [TileKind; 3] = [TileKind::Rock, TileKind::Wall, TileKind::Floor];

    /// Whether the tile obstructs movement and sight.
    pub const fn blocks(self) -> bool {
        match self {
            TileKind::Rock | TileKind::Wall => true,
            TileKind::Floor => false,
        }
    }

    /// Display glyph.
    pub const fn glyph(self) -> char {
        match self {
            TileKind::Rock => ' ',
            TileKind::Wall => '#',
            TileKind::Floor => '.',
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            TileKind::Rock => "rock",
            TileKind::Wall => "wall",
            TileKind::Floor => "floor",
        }
    }
}

impl fmt::Display for TileKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
