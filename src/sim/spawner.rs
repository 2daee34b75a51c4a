//! Obstacle and item generation
//!
//! The spawner owns the only RNG in the simulation. Same seed, same calls,
//! same sprites.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::state::{Lanes, ObstacleKind};
use super::sprite::{Color, Pivot, Sprite};
use crate::assets::GameTextures;
use crate::consts::*;
use crate::textures::Texture;

/// What a spawn rule needs to know about the session
#[derive(Debug, Clone, Copy)]
pub struct SpawnContext<'a> {
    pub textures: &'a GameTextures,
    pub lanes: &'a Lanes,
    pub obstacle_speed: f32,
}

impl SpawnContext<'_> {
    fn lava_top(&self) -> i32 {
        (SCREEN_HEIGHT - self.textures.lava_height()) as i32
    }
}

/// Seeded generator for obstacles and items
#[derive(Debug, Clone)]
pub struct Spawner {
    seed: u64,
    rng: Pcg32,
}

impl Spawner {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Spawn one obstacle of `kind`
    pub fn obstacle(&mut self, kind: ObstacleKind, ctx: &SpawnContext) -> Sprite {
        let sprite = match kind {
            ObstacleKind::Rock => self.rock(ctx),
            ObstacleKind::Fire => self.fire(ctx),
            ObstacleKind::Dart => self.dart(ctx),
            ObstacleKind::Snake => self.snake(ctx),
        };
        log::debug!(
            "Spawned {} at ({:.0}, {:.0}) speed {}",
            kind.singular(),
            sprite.position().x,
            sprite.position().y,
            sprite.speed
        );
        sprite
    }

    /// Falls from the top of a random vine
    pub fn rock(&mut self, ctx: &SpawnContext) -> Sprite {
        let start = Vec2::new(self.lane_x(ctx.lanes), 0.0);
        let mut sprite = plain(ctx.textures.rock, start);
        sprite.set_pivot(Pivot::Center);
        sprite.set_path(start, Vec2::new(start.x, SCREEN_HEIGHT));
        sprite.speed = self.random_speed(ctx.obstacle_speed);
        sprite
    }

    /// Rises from the bottom of a random vine, always one faster than the top speed
    pub fn fire(&mut self, ctx: &SpawnContext) -> Sprite {
        let start = Vec2::new(self.lane_x(ctx.lanes), SCREEN_HEIGHT);
        let mut sprite = plain(ctx.textures.fire, start);
        sprite.set_pivot(Pivot::Center);
        sprite.set_path(start, Vec2::new(start.x, 0.0));
        sprite.speed = ctx.obstacle_speed + 1.0;
        sprite
    }

    /// Flies across the screen from a random side at a random height
    pub fn dart(&mut self, ctx: &SpawnContext) -> Sprite {
        let from_left = self.rng.random_bool(0.5);
        let x = if from_left { 0.0 } else { SCREEN_WIDTH };
        let y = self.random_height(DART_MARGIN, ctx.lava_top()) as f32;
        let start = Vec2::new(x, y);

        let mut sprite = plain(ctx.textures.dart, start);
        if from_left {
            // Artwork faces left; flip it and hold it by the tail
            sprite.set_rotation(180.0);
            sprite.set_pivot(Pivot::CenterRight);
            sprite.set_path(start, Vec2::new(DART_END_RIGHT, y));
        } else {
            sprite.set_pivot(Pivot::Center);
            sprite.set_path(start, Vec2::new(DART_END_LEFT, y));
        }
        sprite.speed = ctx.obstacle_speed + 1.0;
        sprite
    }

    /// Slithers down from the top, or up out of the lava as a smaller red snake
    pub fn snake(&mut self, ctx: &SpawnContext) -> Sprite {
        let from_top = self.rng.random_bool(0.5);
        let x = self.lane_x(ctx.lanes);

        let (start, color) = if from_top {
            (Vec2::new(x, 0.0), Color::WHITE)
        } else {
            (Vec2::new(x, SCREEN_HEIGHT), Color::ORANGE_RED)
        };

        let mut sprite = Sprite::new(ctx.textures.snake, start, 0.0, 1.0, color, 0.0);
        sprite.set_pivot(Pivot::Center);
        if from_top {
            let end_y = ctx.lava_top() as f32 - SNAKE_LAVA_CLEARANCE;
            sprite.set_path(start, Vec2::new(x, end_y));
        } else {
            sprite.set_rotation(180.0);
            sprite.set_scale(LAVA_SNAKE_SCALE);
            sprite.set_path(start, Vec2::new(x, 0.0));
        }
        sprite.speed = self.random_speed(ctx.obstacle_speed);
        sprite
    }

    /// Item for `item_level` on a random vine other than the player's
    pub fn item(&mut self, ctx: &SpawnContext, item_level: u32, player_x: f32) -> Sprite {
        let pos = self.item_position(ctx, player_x);
        let mut sprite = plain(ctx.textures.item(item_level), pos);
        sprite.set_pivot(Pivot::Center);
        log::debug!(
            "Spawned item {} at ({:.0}, {:.0})",
            item_level,
            pos.x,
            pos.y
        );
        sprite
    }

    /// Random spot on a vine whose x differs from `player_x`
    pub fn item_position(&mut self, ctx: &SpawnContext, player_x: f32) -> Vec2 {
        loop {
            let x = self.lane_x(ctx.lanes);
            let y = self.random_height(ITEM_MARGIN, ctx.lava_top()) as f32;
            if x != player_x {
                return Vec2::new(x, y);
            }
        }
    }

    /// Pick a kind from the first `obstacle_level` slots.
    ///
    /// Past the last kind the roll lands on an empty slot and nothing spawns.
    pub fn pick_obstacle(&mut self, obstacle_level: u32) -> Option<ObstacleKind> {
        let slot = self.rng.random_range(0..obstacle_level.max(1)) as usize;
        ObstacleKind::from_index(slot)
    }

    /// Seconds until the next spawn: a whole number below the limit, plus half a second
    pub fn next_obstacle_delay(&mut self, time_to_next_obstacle: u32) -> f32 {
        self.rng.random_range(0..time_to_next_obstacle.max(1)) as f32 + 0.5
    }

    fn lane_x(&mut self, lanes: &Lanes) -> f32 {
        let index = self.rng.random_range(0..LANE_COUNT);
        lanes.x(index).unwrap_or(LANE_X[START_LANE])
    }

    /// Whole-number speed in `1..=top_speed`
    fn random_speed(&mut self, top_speed: f32) -> f32 {
        let top = (top_speed as i32).max(1);
        self.rng.random_range(1..=top) as f32
    }

    /// Whole-number y in `margin..limit`
    fn random_height(&mut self, margin: i32, limit: i32) -> i32 {
        self.rng.random_range(margin..limit.max(margin + 1))
    }
}

fn plain(texture: Texture, position: Vec2) -> Sprite {
    Sprite::new(texture, position, 0.0, 1.0, Color::WHITE, 0.0)
}
