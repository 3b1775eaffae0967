//! Game and map-generation settings.
//!
//! All fields have defaults; with the `serde` feature a partial config
//! (for instance `{"danger": 2}`) fills the rest from [`Default`].

use gloam_rl::{DiggerConfig, FovShape};

pub const DEFAULT_MAP_WIDTH: i32 = 80;
pub const DEFAULT_MAP_HEIGHT: i32 = 25;
pub const DEFAULT_DANGER: i32 = 3;
pub const DEFAULT_FOV_RADIUS: i32 = 8;

/// Parameters for one map generation.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct MapConfig {
    pub width: i32,
    pub height: i32,
    /// Archetypes with `danger <= this` may spawn.
    pub danger: i32,
    pub digger: DiggerConfig,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_MAP_WIDTH,
            height: DEFAULT_MAP_HEIGHT,
            danger: DEFAULT_DANGER,
            digger: DiggerConfig::default(),
        }
    }
}

/// Whole-game settings.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GameConfig {
    pub map: MapConfig,
    pub fov_radius: i32,
    pub fov_shape: FovShape,
    /// Energy charged by a drain that kills; misses and resists are free.
    pub drain_cost: f64,
    /// RNG seed; `None` seeds from the thread RNG.
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            map: MapConfig::default(),
            fov_radius: DEFAULT_FOV_RADIUS,
            fov_shape: FovShape::Circle,
            drain_cost: 0.0,
            seed: None,
        }
    }
}
