//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must stay deterministic:
//! - Seeded RNG only (owned by the `Spawner`)
//! - Stable iteration order (list order, obstacle kinds in unlock order)
//! - No rendering or platform dependencies

pub mod spawner;
pub mod sprite;
pub mod sprite_list;
pub mod state;
pub mod tick;

pub use spawner::{SpawnContext, Spawner};
pub use sprite::{Color, Pivot, Sprite, SpriteDraw, TextureRegion};
pub use sprite_list::{GROWTH_STEP, SpriteList};
pub use state::{GamePhase, GameState, Lanes, ObstacleKind, Side};
pub use tick::{PlayerMove, click, move_player, spawn_item, spawn_obstacle, tick};
