//! Field of view and the player's map memory.
//!
//! Sight is computed with symmetric shadow casting over the tile layer:
//! blocking tiles stop sight, monsters never do. Every visible cell has its
//! memory overwritten with what is there now; nothing else ever writes
//! memory, so cells out of view keep whatever was last seen there.

use gloam_core::Point;
use gloam_rl::{Fov, FovShape};

use crate::entity::Player;
use crate::gamemap::Map;
use crate::world::{CellView, query_cell};

/// Whether `p` stops sight. Points off the map are opaque.
pub fn is_opaque(map: &Map, p: Point) -> bool {
    map.tile(p).is_none_or(|t| t.blocks())
}

/// Sweep from `origin` out to `radius`, refreshing memory and calling
/// `on_visible` for every cell in view.
///
/// Returns the visible points. The callback sees each cell as it was
/// before its memory was refreshed.
pub fn compute_visible(
    fov: &mut Fov,
    map: &mut Map,
    player: &Player,
    origin: Point,
    radius: i32,
    shape: FovShape,
    mut on_visible: impl FnMut(Point, &CellView),
) -> Vec<Point> {
    let visible = fov.compute(origin, radius, shape, |p| is_opaque(map, p)).to_vec();
    for &p in &visible {
        let view = query_cell(map, player, p);
        on_visible(p, &view);
        map.remember(p, view.snapshot());
    }
    log::trace!("fov from {origin} radius {radius}: {} cells", visible.len());
    visible
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::{Monster, MonsterKind};
    use crate::gamemap::Remembered;
    use crate::terrain::TileKind;

    /// A 9x5 room with a wall ring and a pillar wall at x=5.
    fn room() -> (Map, Player, Fov) {
        let mut map = Map::new(9, 5, 3);
        for p in map.bounds() {
            let t = if map.bounds().grow(-1).contains(p) {
                TileKind::Floor
            } else {
                TileKind::Wall
            };
            map.set_tile(p, t);
        }
        for y in 1..4 {
            map.set_tile(Point::new(5, y), TileKind::Wall);
        }
        let fov = Fov::new(map.bounds());
        (map, Player::new(Point::new(2, 2)), fov)
    }

    #[test]
    fn test_memory_written_for_visible_cells_only() {
        let (mut map, player, mut fov) = room();
        let vis = compute_visible(&mut fov, &mut map, &player, player.pos, 8, FovShape::Square, |_, _| {});
        assert!(vis.contains(&Point::new(1, 1)));
        assert!(vis.contains(&Point::new(5, 2)));
        assert!(!vis.contains(&Point::new(7, 2)));
        assert_eq!(map.remembered(Point::new(1, 1)).tile, Some(TileKind::Floor));
        assert_eq!(map.remembered(Point::new(5, 2)).tile, Some(TileKind::Wall));
        assert_eq!(map.remembered(Point::new(7, 2)), Remembered::default());
    }

    #[test]
    fn test_monsters_do_not_block_sight() {
        let (mut map, player, mut fov) = room();
        map.place_monster(Point::new(3, 2), Monster { kind: MonsterKind::Ogre, hp: 20 });
        let vis = compute_visible(&mut fov, &mut map, &player, player.pos, 8, FovShape::Square, |_, _| {});
        assert!(vis.contains(&Point::new(4, 2)));
        assert_eq!(map.remembered(Point::new(3, 2)).monster, Some(MonsterKind::Ogre));
    }

    #[test]
    fn test_callback_sees_every_visible_cell() {
        let (mut map, player, mut fov) = room();
        map.place_monster(Point::new(4, 3), Monster { kind: MonsterKind::Rat, hp: 1 });
        let mut seen = Vec::new();
        let vis = compute_visible(&mut fov, &mut map, &player, player.pos, 8, FovShape::Square, |p, v| {
            seen.push(p);
            if p == Point::new(4, 3) {
                assert_eq!(v.monster.map(|m| m.kind), Some(MonsterKind::Rat));
            }
        });
        assert_eq!(seen, vis);
    }

    #[test]
    fn test_stale_memory_survives() {
        let (mut map, player, mut fov) = room();
        let p = Point::new(4, 1);
        map.place_monster(p, Monster { kind: MonsterKind::Bat, hp: 1 });
        compute_visible(&mut fov, &mut map, &player, player.pos, 8, FovShape::Square, |_, _| {});
        map.remove_monster(p);
        // Looking from behind the pillar: the bat's cell is out of view.
        let behind = Player::new(Point::new(7, 2));
        compute_visible(&mut fov, &mut map, &behind, behind.pos, 8, FovShape::Square, |_, _| {});
        assert_eq!(map.remembered(p).monster, Some(MonsterKind::Bat));
    }

    #[test]
    fn test_radius_limits_memory() {
        let (mut map, player, mut fov) = room();
        compute_visible(&mut fov, &mut map, &player, player.pos, 1, FovShape::Square, |_, _| {});
        assert_eq!(map.remembered(Point::new(3, 3)).tile, Some(TileKind::Floor));
        assert_eq!(map.remembered(Point::new(4, 2)), Remembered::default());
    }

    #[test]
    fn test_off_map_is_opaque() {
        let (map, _, _) = room();
        assert!(is_opaque(&map, Point::new(-1, 0)));
        assert!(is_opaque(&map, Point::new(0, 0)));
        assert!(!is_opaque(&map, Point::new(1, 1)));
    }
}
