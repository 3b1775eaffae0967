//! Map state and generation.

use gloam_core::{Point, Range};
use gloam_rl::{DigCell, Digger, Grid, Room};
use rand::seq::{IndexedRandom, SliceRandom};
use rand::{Rng, RngExt};

use crate::config::MapConfig;
use crate::entity::{Monster, MonsterKind, Player, eligible_kinds};
use crate::error::GenError;
use crate::terrain::TileKind;

/// Last-seen snapshot of a cell: what tile and which monster kind were
/// there when it was last visible.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Remembered {
    pub tile: Option<TileKind>,
    pub monster: Option<MonsterKind>,
}

/// The single dungeon floor: terrain, occupants and the player's memory,
/// all `width * height` cells.
#[derive(Debug, Clone)]
pub struct Map {
    pub tiles: Grid<TileKind>,
    pub monsters: Grid<Option<Monster>>,
    pub memory: Grid<Remembered>,
    /// Spawn threshold this map was generated with.
    pub danger: i32,
    /// Rooms in shuffled order; the first is the starting room.
    pub rooms: Vec<Room>,
}

impl Map {
    /// A solid-rock map with no occupants and nothing remembered.
    pub fn new(width: i32, height: i32, danger: i32) -> Self {
        Self {
            tiles: Grid::new(width, height, TileKind::Rock),
            monsters: Grid::new(width, height, None),
            memory: Grid::new(width, height, Remembered::default()),
            danger,
            rooms: Vec::new(),
        }
    }

    pub fn width(&self) -> i32 {
        self.tiles.width()
    }

    pub fn height(&self) -> i32 {
        self.tiles.height()
    }

    pub fn bounds(&self) -> Range {
        self.tiles.bounds()
    }

    pub fn contains(&self, p: Point) -> bool {
        self.tiles.contains(p)
    }

    pub fn tile(&self, p: Point) -> Option<TileKind> {
        self.tiles.at(p)
    }

    pub fn set_tile(&mut self, p: Point, t: TileKind) {
        self.tiles.set(p, t);
    }

    pub fn monster(&self, p: Point) -> Option<&Monster> {
        self.monsters.get(p).and_then(Option::as_ref)
    }

    pub fn monster_mut(&mut self, p: Point) -> Option<&mut Monster> {
        self.monsters.get_mut(p).and_then(Option::as_mut)
    }

    /// Put `m` on `p`, replacing any previous occupant.
    pub fn place_monster(&mut self, p: Point, m: Monster) {
        self.monsters.set(p, Some(m));
    }

    /// Empty the cell, returning its previous occupant.
    pub fn remove_monster(&mut self, p: Point) -> Option<Monster> {
        self.monsters.get_mut(p).and_then(Option::take)
    }

    /// Every monster with its position, row-major.
    pub fn iter_monsters(&self) -> impl Iterator<Item = (Point, &Monster)> + '_ {
        self.monsters
            .iter()
            .filter_map(|(p, m)| m.as_ref().map(|m| (p, m)))
    }

    pub fn remembered(&self, p: Point) -> Remembered {
        self.memory.at(p).unwrap_or_default()
    }

    pub fn remember(&mut self, p: Point, snapshot: Remembered) {
        self.memory.set(p, snapshot);
    }

    /// One text line per row: `@` for the player, monster glyphs, then
    /// tile glyphs.
    pub fn render_ascii(&self, player: Point) -> String {
        let mut s = String::with_capacity(((self.width() + 1) * self.height()) as usize);
        for y in 0..self.height() {
            for x in 0..self.width() {
                let p = Point::new(x, y);
                let ch = if p == player {
                    '@'
                } else if let Some(m) = self.monster(p) {
                    m.archetype().glyph
                } else {
                    self.tile(p).unwrap_or_default().glyph()
                };
                s.push(ch);
            }
            s.push('\n');
        }
        s
    }
}

// ---------------------------------------------------------------------------
// Generation
// ---------------------------------------------------------------------------

/// Generate a fresh floor and the player standing on it.
///
/// Configuration is validated before anything is dug; on error nothing is
/// returned, so the caller's current map stays untouched.
pub fn generate<R: Rng + ?Sized>(rng: &mut R, config: &MapConfig) -> Result<(Map, Player), GenError> {
    let eligible = eligible_kinds(config.danger);
    if eligible.is_empty() {
        return Err(GenError::NoEligibleArchetype {
            danger: config.danger,
        });
    }
    let min = Digger::min_size(&config.digger);
    if config.width < min.x || config.height < min.y {
        return Err(GenError::MapTooSmall {
            width: config.width,
            height: config.height,
            min_width: min.x,
            min_height: min.y,
        });
    }

    // 1. Solid rock baseline.
    let mut map = Map::new(config.width, config.height, config.danger);

    // 2. Rooms: wall rings around floor interiors.
    let mut digger = Digger::new(config.width, config.height, config.digger.clone());
    digger.dig(rng, |p, cell| {
        let t = match cell {
            DigCell::Wall => TileKind::Wall,
            DigCell::Floor => TileKind::Floor,
        };
        map.set_tile(p, t);
    });
    let mut rooms = digger.rooms().to_vec();
    if rooms.is_empty() {
        return Err(GenError::NoRooms);
    }

    // 3. Starting room.
    rooms.shuffle(rng);
    let player = Player::new(rooms[0].center());

    // 4. One group per remaining room.
    let mut spawned = 0;
    for room in &rooms[1..] {
        let kind = *eligible.choose(rng).ok_or(GenError::NoEligibleArchetype {
            danger: config.danger,
        })?;
        let count = kind.archetype().appearing.roll(rng);
        for _ in 0..count {
            let p = Point::new(
                rng.random_range(room.x1..=room.x2),
                rng.random_range(room.y1..=room.y2),
            );
            // A miss costs the attempt; rooms may end up under-populated.
            if occupied(&map, &player, p) {
                continue;
            }
            map.place_monster(p, Monster::spawn(kind, rng));
            spawned += 1;
        }
    }

    // 5. Corridors, always floor.
    digger.carve_corridors(|p, _| map.set_tile(p, TileKind::Floor));

    map.rooms = rooms;
    log::debug!(
        "generated {}x{} map at danger {}: {} rooms, {} monsters, player at {}",
        config.width,
        config.height,
        config.danger,
        map.rooms.len(),
        spawned,
        player.pos
    );
    Ok((map, player))
}

/// Whether a spawn at `p` is impossible: blocking tile, an existing
/// monster, or the player.
fn occupied(map: &Map, player: &Player, p: Point) -> bool {
    p == player.pos || map.tile(p).is_none_or(TileKind::blocks) || map.monster(p).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn gen_seeded(seed: u64, config: &MapConfig) -> Result<(Map, Player), GenError> {
        generate(&mut StdRng::seed_from_u64(seed), config)
    }

    #[test]
    fn test_grids_fully_sized() {
        let config = MapConfig::default();
        let (map, _) = gen_seeded(1, &config).unwrap();
        let n = (config.width * config.height) as usize;
        assert_eq!(map.tiles.len(), n);
        assert_eq!(map.monsters.len(), n);
        assert_eq!(map.memory.len(), n);
    }

    #[test]
    fn test_player_starts_on_open_floor() {
        for seed in 0..20 {
            let (map, player) = gen_seeded(seed, &MapConfig::default()).unwrap();
            assert_eq!(map.tile(player.pos), Some(TileKind::Floor), "seed {seed}");
            assert!(map.monster(player.pos).is_none(), "seed {seed}");
            assert_eq!(map.rooms[0].center(), player.pos);
        }
    }

    #[test]
    fn test_monsters_never_on_blocking_tiles() {
        for seed in 0..20 {
            let config = MapConfig {
                danger: 5,
                ..MapConfig::default()
            };
            let (map, player) = gen_seeded(seed, &config).unwrap();
            for (p, m) in map.iter_monsters() {
                assert_eq!(map.tile(p), Some(TileKind::Floor), "seed {seed}: {m:?} at {p}");
                assert_ne!(p, player.pos);
                assert!(m.archetype().danger <= config.danger);
                assert!(m.hp >= m.archetype().hp.min());
                assert!(m.hp <= m.archetype().hp.max());
            }
        }
    }

    #[test]
    fn test_starting_room_is_empty() {
        for seed in 0..10 {
            let (map, _) = gen_seeded(seed, &MapConfig::default()).unwrap();
            let start = map.rooms[0].interior();
            assert!(map.iter_monsters().all(|(p, _)| !start.contains(p)), "seed {seed}");
        }
    }

    #[test]
    fn test_monsters_only_in_rooms() {
        let (map, _) = gen_seeded(4, &MapConfig::default()).unwrap();
        assert!(map.iter_monsters().count() > 0);
        for (p, _) in map.iter_monsters() {
            assert!(map.rooms.iter().any(|r| r.interior().contains(p)));
        }
    }

    #[test]
    fn test_danger_one_spawns_only_vermin() {
        let config = MapConfig {
            danger: 1,
            ..MapConfig::default()
        };
        let (map, _) = gen_seeded(8, &config).unwrap();
        for (_, m) in map.iter_monsters() {
            assert!(m.archetype().is_vermin());
            assert_eq!(m.hp, 1);
        }
    }

    #[test]
    fn test_no_eligible_archetype_fails_fast() {
        let config = MapConfig {
            width: 7,
            height: 7,
            danger: 0,
            ..MapConfig::default()
        };
        assert_eq!(
            gen_seeded(1, &config).unwrap_err(),
            GenError::NoEligibleArchetype { danger: 0 }
        );
    }

    #[test]
    fn test_too_small_map_rejected() {
        let config = MapConfig {
            width: 4,
            height: 30,
            ..MapConfig::default()
        };
        assert!(matches!(
            gen_seeded(1, &config),
            Err(GenError::MapTooSmall { width: 4, .. })
        ));
    }

    #[test]
    fn test_single_room_map() {
        let config = MapConfig {
            width: 7,
            height: 7,
            danger: 1,
            ..MapConfig::default()
        };
        let (map, player) = gen_seeded(2, &config).unwrap();
        assert_eq!(map.rooms.len(), 1);
        assert_eq!(map.iter_monsters().count(), 0);
        assert_eq!(map.tile(player.pos), Some(TileKind::Floor));
    }

    #[test]
    fn test_memory_starts_blank() {
        let (map, _) = gen_seeded(3, &MapConfig::default()).unwrap();
        assert!(map.memory.iter().all(|(_, r)| *r == Remembered::default()));
    }

    #[test]
    fn test_render_ascii() {
        let mut map = Map::new(3, 2, 1);
        map.set_tile(Point::new(1, 0), TileKind::Floor);
        map.set_tile(Point::new(2, 0), TileKind::Wall);
        map.place_monster(Point::new(1, 1), Monster { kind: MonsterKind::Rat, hp: 1 });
        assert_eq!(map.render_ascii(Point::new(0, 0)), "@.#\n r \n");
    }

    #[test]
    fn test_remove_monster() {
        let mut map = Map::new(3, 3, 1);
        let p = Point::new(1, 1);
        map.place_monster(p, Monster { kind: MonsterKind::Bat, hp: 1 });
        assert_eq!(map.remove_monster(p).map(|m| m.kind), Some(MonsterKind::Bat));
        assert!(map.monster(p).is_none());
        assert_eq!(map.remove_monster(Point::new(9, 9)), None);
    }
}
