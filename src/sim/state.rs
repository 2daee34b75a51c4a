//! Game session state
//!
//! Everything a session mutates lives in `GameState`: the phase, the
//! scoring and difficulty counters, the player sprite and one sprite list
//! per obstacle kind plus one for items.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::spawner::Spawner;
use super::sprite::{Color, Pivot, Sprite};
use super::sprite_list::SpriteList;
use crate::assets::GameTextures;
use crate::consts::*;

/// Current phase of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Title screen, waiting for a click
    Start,
    /// Active gameplay
    Playing,
    /// Lives ran out
    Over,
}

/// Obstacle kinds, in the order higher levels unlock them
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ObstacleKind {
    Rock,
    Fire,
    Dart,
    Snake,
}

impl ObstacleKind {
    pub const COUNT: usize = 4;
    pub const ALL: [ObstacleKind; Self::COUNT] = [
        ObstacleKind::Rock,
        ObstacleKind::Fire,
        ObstacleKind::Dart,
        ObstacleKind::Snake,
    ];

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    pub fn index(self) -> usize {
        self as usize
    }

    /// Vertical knock-back applied to the player when this kind hits
    pub fn hit_nudge(self) -> f32 {
        match self {
            ObstacleKind::Fire => -HIT_NUDGE,
            _ => HIT_NUDGE,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            ObstacleKind::Rock => "Rocks",
            ObstacleKind::Fire => "FireBalls",
            ObstacleKind::Dart => "PoisonDarts",
            ObstacleKind::Snake => "Snakes",
        }
    }

    pub fn singular(self) -> &'static str {
        match self {
            ObstacleKind::Rock => "Rock",
            ObstacleKind::Fire => "FireBall",
            ObstacleKind::Dart => "PoisonDart",
            ObstacleKind::Snake => "Snake",
        }
    }
}

/// Which way a lane hop goes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Left,
    Right,
}

/// The fixed vine x-coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Lanes {
    xs: [f32; LANE_COUNT],
}

impl Default for Lanes {
    fn default() -> Self {
        Self { xs: LANE_X }
    }
}

impl Lanes {
    pub fn x(&self, index: usize) -> Option<f32> {
        self.xs.get(index).copied()
    }

    /// Index of the lane next to `index`, if there is one
    pub fn neighbor(&self, index: usize, side: Side) -> Option<usize> {
        let next = match side {
            Side::Left => index.checked_sub(1)?,
            Side::Right => index + 1,
        };
        (next < LANE_COUNT).then_some(next)
    }
}

/// Complete session state
#[derive(Debug, Clone)]
pub struct GameState {
    pub phase: GamePhase,

    pub score: u64,
    /// Goes to -1 on the final hit
    pub lives: i32,
    /// Seconds spent playing
    pub elapsed_time: f32,
    /// Invulnerability left after a hit (seconds)
    pub grace_period: f32,
    /// Seconds before a click may leave the game-over screen
    pub game_over_time: f32,
    pub score_for_extra_life: u64,

    /// Score for the next item pickup; doubles per pickup
    pub item_combo: u64,
    /// Which item spawns next (1..=8)
    pub item_level: u32,
    /// Seconds until the current item disappears
    pub item_despawn: f32,

    /// Unlocks obstacle kinds; caps at `MAX_OBSTACLE_LEVEL`
    pub obstacle_level: u32,
    /// Countdown to the next obstacle spawn (seconds)
    pub obstacle_time: f32,
    pub time_to_next_obstacle: u32,
    /// Top speed for obstacles (pixels per frame)
    pub obstacle_speed: f32,
    /// Elapsed time of the next difficulty step (seconds)
    pub time_to_next_change: u32,

    pub lanes: Lanes,
    pub current_lane: usize,

    pub player: Sprite,
    pub obstacles: [SpriteList; ObstacleKind::COUNT],
    pub items: SpriteList,

    pub textures: GameTextures,
    pub spawner: Spawner,
}

impl GameState {
    /// Fresh session on the title screen
    pub fn new(textures: GameTextures, seed: u64) -> Self {
        let lanes = Lanes::default();
        let mut state = Self {
            phase: GamePhase::Start,
            score: 0,
            lives: STARTING_LIVES,
            elapsed_time: 0.0,
            grace_period: 0.0,
            game_over_time: GAME_OVER_DELAY,
            score_for_extra_life: EXTRA_LIFE_START,
            item_combo: ITEM_COMBO_START,
            item_level: 1,
            item_despawn: ITEM_DESPAWN_TIME,
            obstacle_level: 1,
            obstacle_time: OBSTACLE_TIME_START,
            time_to_next_obstacle: TIME_TO_NEXT_OBSTACLE,
            obstacle_speed: OBSTACLE_SPEED_START,
            time_to_next_change: LEVEL_INTERVAL,
            lanes,
            current_lane: START_LANE,
            player: Sprite::default(),
            obstacles: Default::default(),
            items: SpriteList::new(),
            textures,
            spawner: Spawner::new(seed),
        };
        state.init_player();
        state
    }

    /// Return every counter to its starting value and empty all lists.
    ///
    /// The spawner keeps its RNG stream.
    pub fn reset(&mut self) {
        self.phase = GamePhase::Start;
        self.score = 0;
        self.lives = STARTING_LIVES;
        self.elapsed_time = 0.0;
        self.grace_period = 0.0;
        self.game_over_time = GAME_OVER_DELAY;
        self.score_for_extra_life = EXTRA_LIFE_START;
        self.item_combo = ITEM_COMBO_START;
        self.item_level = 1;
        self.item_despawn = ITEM_DESPAWN_TIME;
        self.obstacle_level = 1;
        self.obstacle_time = OBSTACLE_TIME_START;
        self.time_to_next_obstacle = TIME_TO_NEXT_OBSTACLE;
        self.obstacle_speed = OBSTACLE_SPEED_START;
        self.time_to_next_change = LEVEL_INTERVAL;
        self.current_lane = START_LANE;

        for list in &mut self.obstacles {
            list.clear();
        }
        self.items.clear();

        self.init_player();
        log::info!("Session reset");
    }

    /// Place the koala on its starting vine, halfway down the screen
    fn init_player(&mut self) {
        let x = self.lanes.x(self.current_lane).unwrap_or(LANE_X[START_LANE]);
        self.player = Sprite::new(
            self.textures.player,
            Vec2::new(x, SCREEN_HEIGHT / 2.0),
            0.0,
            1.0,
            Color::WHITE,
            0.0,
        );
        self.player.set_pivot(Pivot::CenterLeft);
    }

    pub fn obstacles(&self, kind: ObstacleKind) -> &SpriteList {
        &self.obstacles[kind.index()]
    }

    pub fn obstacles_mut(&mut self, kind: ObstacleKind) -> &mut SpriteList {
        &mut self.obstacles[kind.index()]
    }

    /// Y coordinate of the top of the lava strip
    pub fn lava_top(&self) -> f32 {
        SCREEN_HEIGHT - self.textures.lava_height()
    }

    /// Total live obstacles across every kind
    pub fn obstacle_count(&self) -> usize {
        self.obstacles.iter().map(SpriteList::count).sum()
    }

    pub fn is_playing(&self) -> bool {
        self.phase == GamePhase::Playing
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::test_textures;

    #[test]
    fn test_new_state() {
        let state = GameState::new(test_textures(), 1);
        assert_eq!(state.phase, GamePhase::Start);
        assert_eq!(state.lives, 2);
        assert_eq!(state.current_lane, 2);
        assert_eq!(state.player.position(), Vec2::new(435.0, 384.0));
        assert_eq!(state.player.pivot(), Pivot::CenterLeft);
        assert_eq!(state.obstacle_count(), 0);
        assert!(state.items.is_empty());
    }

    #[test]
    fn test_lane_neighbors_are_bounds_checked() {
        let lanes = Lanes::default();
        assert_eq!(lanes.neighbor(0, Side::Left), None);
        assert_eq!(lanes.neighbor(0, Side::Right), Some(1));
        assert_eq!(lanes.neighbor(5, Side::Right), None);
        assert_eq!(lanes.neighbor(5, Side::Left), Some(4));
        assert_eq!(lanes.x(6), None);
    }

    #[test]
    fn test_obstacle_kind_index_roundtrip() {
        for kind in ObstacleKind::ALL {
            assert_eq!(ObstacleKind::from_index(kind.index()), Some(kind));
        }
        assert_eq!(ObstacleKind::from_index(4), None);
        assert_eq!(ObstacleKind::Fire.hit_nudge(), -20.0);
        assert_eq!(ObstacleKind::Snake.hit_nudge(), 20.0);
    }
}
