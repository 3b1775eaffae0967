//! Helpers for building game states from ASCII layouts in tests.

use gloam_core::Point;

use crate::config::{GameConfig, MapConfig};
use crate::entity::{Monster, MonsterKind, Player};
use crate::game::GameState;
use crate::gamemap::Map;
use crate::terrain::TileKind;

/// Build a state from rows of `#` wall, `.` floor, ` ` rock, `@` the
/// player and monster glyphs. Player and monsters stand on floor; monsters
/// get their archetype's minimum hit points.
pub fn state_from_ascii(layout: &str) -> GameState {
    let rows: Vec<&str> = layout.lines().collect();
    let height = rows.len() as i32;
    let width = rows.iter().map(|r| r.chars().count()).max().unwrap_or(0) as i32;
    let mut map = Map::new(width, height, 5);
    let mut player = None;
    for (y, row) in rows.iter().enumerate() {
        for (x, ch) in row.chars().enumerate() {
            let p = Point::new(x as i32, y as i32);
            let tile = match ch {
                '#' => TileKind::Wall,
                ' ' => TileKind::Rock,
                _ => TileKind::Floor,
            };
            map.set_tile(p, tile);
            if ch == '@' {
                player = Some(Player::new(p));
            } else if let Some(kind) = MonsterKind::ALL.into_iter().find(|k| k.archetype().glyph == ch) {
                map.place_monster(
                    p,
                    Monster {
                        kind,
                        hp: kind.archetype().hp.min(),
                    },
                );
            }
        }
    }
    let player = player.expect("layout has no @");
    let config = GameConfig {
        map: MapConfig {
            width,
            height,
            danger: 5,
            ..MapConfig::default()
        },
        seed: Some(0),
        ..GameConfig::default()
    };
    GameState::with_map(config, map, player)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_round_trips_through_render() {
        let layout = "\
#####
#@.g#
# ..#
#####";
        let state = state_from_ascii(layout);
        assert_eq!(state.player.pos, Point::new(1, 1));
        assert_eq!(state.map.monster(Point::new(3, 1)).map(|m| m.hp), Some(2));
        assert_eq!(state.render_ascii(), format!("{layout}\n"));
    }
}
