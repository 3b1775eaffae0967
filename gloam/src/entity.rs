//! Monster archetypes, monster instances, and the player.

use std::collections::HashSet;

use gloam_core::Point;
use gloam_rl::Roll;
use rand::Rng;

/// Monster kinds. The discriminant indexes [`ARCHETYPES`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum MonsterKind {
    Rat,
    Beetle,
    Bat,
    Goblin,
    Skeleton,
    Ogre,
    Wraith,
}

impl MonsterKind {
    pub const ALL: [MonsterKind; 7] = [
        MonsterKind::Rat,
        MonsterKind::Beetle,
        MonsterKind::Bat,
        MonsterKind::Goblin,
        MonsterKind::Skeleton,
        MonsterKind::Ogre,
        MonsterKind::Wraith,
    ];

    /// Static catalog entry for this kind.
    pub fn archetype(self) -> &'static Archetype {
        &ARCHETYPES[self as usize]
    }
}

/// Immutable monster template.
#[derive(Debug)]
pub struct Archetype {
    pub kind: MonsterKind,
    pub name: &'static str,
    /// Name used in messages, substituted for `%s`.
    pub description: &'static str,
    /// Spawn tier; eligible when `danger <= map danger`.
    pub danger: i32,
    pub glyph: char,
    /// Group size when spawned.
    pub appearing: Roll,
    /// Starting hit points.
    pub hp: Roll,
    /// First-encounter thought, with a `%s` for the description.
    pub flavor: &'static str,
}

impl Archetype {
    /// Vermin always spawn with exactly 1 HP.
    pub fn is_vermin(&self) -> bool {
        self.hp == Roll::FIXED_ONE
    }
}

/// Static table of monster archetypes, in [`MonsterKind`] order.
pub static ARCHETYPES: [Archetype; 7] = [
    Archetype {
        kind: MonsterKind::Rat,
        name: "rat",
        description: "mangy rat",
        danger: 1,
        glyph: 'r',
        appearing: Roll::new(2, 2, 0),
        hp: Roll::FIXED_ONE,
        flavor: "A %s. Barely a mouthful, but hunger is hunger.",
    },
    Archetype {
        kind: MonsterKind::Beetle,
        name: "beetle",
        description: "cave beetle",
        danger: 1,
        glyph: 'b',
        appearing: Roll::new(1, 3, 0),
        hp: Roll::FIXED_ONE,
        flavor: "The clicking of a %s. Its spark is faint.",
    },
    Archetype {
        kind: MonsterKind::Bat,
        name: "bat",
        description: "restless bat",
        danger: 2,
        glyph: 'v',
        appearing: Roll::new(1, 4, 1),
        hp: Roll::FIXED_ONE,
        flavor: "A %s flutters overhead. Quick, warm, fragile.",
    },
    Archetype {
        kind: MonsterKind::Goblin,
        name: "goblin",
        description: "scrawny goblin",
        danger: 2,
        glyph: 'g',
        appearing: Roll::new(1, 2, 0),
        hp: Roll::new(1, 4, 1),
        flavor: "A %s. Too much fight left in it to drain.",
    },
    Archetype {
        kind: MonsterKind::Skeleton,
        name: "skeleton",
        description: "rattling skeleton",
        danger: 3,
        glyph: 's',
        appearing: Roll::new(1, 2, 0),
        hp: Roll::new(2, 4, 0),
        flavor: "A %s. Whatever essence it had is long stale.",
    },
    Archetype {
        kind: MonsterKind::Ogre,
        name: "ogre",
        description: "hulking ogre",
        danger: 4,
        glyph: 'O',
        appearing: Roll::FIXED_ONE,
        hp: Roll::new(3, 6, 2),
        flavor: "A %s. So much life in one body.",
    },
    Archetype {
        kind: MonsterKind::Wraith,
        name: "wraith",
        description: "hungering wraith",
        danger: 5,
        glyph: 'W',
        appearing: Roll::FIXED_ONE,
        hp: Roll::new(4, 6, 0),
        flavor: "A %s. It hungers, as you do.",
    },
];

/// Kinds allowed to spawn at the given danger level.
pub fn eligible_kinds(danger: i32) -> Vec<MonsterKind> {
    MonsterKind::ALL
        .into_iter()
        .filter(|k| k.archetype().danger <= danger)
        .collect()
}

/// A monster standing on a map cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Monster {
    pub kind: MonsterKind,
    pub hp: i32,
}

impl Monster {
    /// A fresh monster with rolled hit points.
    pub fn spawn<R: Rng + ?Sized>(kind: MonsterKind, rng: &mut R) -> Self {
        Self {
            kind,
            hp: kind.archetype().hp.roll(rng),
        }
    }

    pub fn archetype(&self) -> &'static Archetype {
        self.kind.archetype()
    }

    /// Weakened monsters (hp ≤ 1) block neither movement nor drains.
    pub fn is_weakened(&self) -> bool {
        self.hp <= 1
    }
}

/// The player character.
#[derive(Debug, Clone, PartialEq)]
pub struct Player {
    pub pos: Point,
    /// Score gained by draining monsters.
    pub essence: i32,
    /// Action budget; one command costs 1.0.
    pub energy: f64,
    /// Monster kinds met at least once.
    pub known_monsters: HashSet<MonsterKind>,
}

impl Player {
    pub fn new(pos: Point) -> Self {
        Self {
            pos,
            essence: 0,
            energy: 1.0,
            known_monsters: HashSet::new(),
        }
    }

    pub fn knows(&self, kind: MonsterKind) -> bool {
        self.known_monsters.contains(&kind)
    }

    /// Record an encounter. Returns true if the kind was new.
    pub fn learn(&mut self, kind: MonsterKind) -> bool {
        self.known_monsters.insert(kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_table_order_matches_kinds() {
        for (i, kind) in MonsterKind::ALL.into_iter().enumerate() {
            assert_eq!(ARCHETYPES[i].kind, kind);
            assert_eq!(kind.archetype().kind, kind);
        }
    }

    #[test]
    fn test_archetype_invariants() {
        for a in &ARCHETYPES {
            assert!(a.danger >= 1, "{} has danger {}", a.name, a.danger);
            assert!(a.appearing.min() >= 1, "{} may appear zero times", a.name);
            assert!(a.hp.min() >= 1, "{} may spawn dead", a.name);
            assert!(a.flavor.contains("%s"), "{} flavor lacks placeholder", a.name);
        }
    }

    #[test]
    fn test_vermin_have_fixed_hp() {
        let mut rng = StdRng::seed_from_u64(11);
        let vermin: Vec<_> = ARCHETYPES.iter().filter(|a| a.is_vermin()).collect();
        assert!(!vermin.is_empty());
        for a in vermin {
            for _ in 0..10 {
                assert_eq!(Monster::spawn(a.kind, &mut rng).hp, 1);
            }
        }
        assert!(!MonsterKind::Goblin.archetype().is_vermin());
    }

    #[test]
    fn test_eligible_kinds() {
        assert!(eligible_kinds(0).is_empty());
        assert_eq!(eligible_kinds(1), vec![MonsterKind::Rat, MonsterKind::Beetle]);
        assert_eq!(eligible_kinds(99).len(), MonsterKind::ALL.len());
        // The lowest tier must always hold something to spawn.
        let min_danger = ARCHETYPES.iter().map(|a| a.danger).min();
        assert_eq!(min_danger, Some(1));
    }

    #[test]
    fn test_player_learns_once() {
        let mut p = Player::new(Point::new(1, 1));
        assert_eq!(p.energy, 1.0);
        assert!(!p.knows(MonsterKind::Rat));
        assert!(p.learn(MonsterKind::Rat));
        assert!(!p.learn(MonsterKind::Rat));
        assert!(p.knows(MonsterKind::Rat));
    }
}
