//! Cell queries over the current map and player.

use gloam_core::Point;

use crate::entity::{Monster, Player};
use crate::gamemap::{Map, Remembered};
use crate::terrain::TileKind;

/// Everything known about one cell right now.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellView {
    /// `None` outside the map.
    pub tile: Option<TileKind>,
    pub monster: Option<Monster>,
    pub is_player: bool,
    /// Whether the player could step here.
    pub blocked: bool,
    /// What the player remembers of this cell.
    pub memory: Remembered,
}

impl CellView {
    /// View of a point outside the map. It is blocked so nothing ever
    /// walks off the grid.
    pub const OUT_OF_BOUNDS: CellView = CellView {
        tile: None,
        monster: None,
        is_player: false,
        blocked: true,
        memory: Remembered {
            tile: None,
            monster: None,
        },
    };

    /// The snapshot memory would store if this cell were seen now. Not
    /// affected by `blocked`.
    pub fn snapshot(&self) -> Remembered {
        Remembered {
            tile: self.tile,
            monster: self.monster.map(|m| m.kind),
        }
    }

    /// The monster standing here, if it is still strong enough to block.
    pub fn blocking_monster(&self) -> Option<&Monster> {
        self.monster.as_ref().filter(|m| !m.is_weakened())
    }
}

/// Describe the cell at `p`.
///
/// A cell is blocked when the player stands on it, its tile blocks, or it
/// holds a monster that is not weakened.
pub fn query_cell(map: &Map, player: &Player, p: Point) -> CellView {
    let Some(tile) = map.tile(p) else {
        return CellView::OUT_OF_BOUNDS;
    };
    let monster = map.monster(p).copied();
    let is_player = player.pos == p;
    let blocked = is_player || tile.blocks() || monster.is_some_and(|m| !m.is_weakened());
    CellView {
        tile: Some(tile),
        monster,
        is_player,
        blocked,
        memory: map.remembered(p),
    }
}
