//! Koala Jones - a lane-hopping arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (sprites, spawning, collisions, session state)
//! - `renderer`: Drawing seam (batched sprites, full-screen textures, text)
//! - `platform`: Framework loop and window events
//! - `textures`: Texture registry handing out stable handles
//! - `assets`: The named texture set the game draws with
//! - `game`: The game client plugged into the framework

pub mod assets;
pub mod game;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod textures;

pub use game::KoalaJones;
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Screen dimensions (pixels)
    pub const SCREEN_WIDTH: f32 = 1024.0;
    pub const SCREEN_HEIGHT: f32 = 768.0;

    /// Number of vines the koala can climb
    pub const LANE_COUNT: usize = 6;
    /// X coordinate of each vine, left to right
    pub const LANE_X: [f32; LANE_COUNT] = [131.0, 283.0, 435.0, 588.0, 740.0, 893.0];
    /// Player starts on the third vine
    pub const START_LANE: usize = 2;
    /// Horizontal tolerance for clicks that target a vine
    pub const LANE_CLICK_TOLERANCE: f32 = 20.0;
    /// Vertical distance covered by one climb step
    pub const CLIMB_STEP: f32 = 50.0;
    /// Clicks this close above the lava never move the koala down
    pub const PLAYER_LAVA_CLEARANCE: f32 = 20.0;
    /// Score awarded for hopping to a neighbouring vine
    pub const LANE_HOP_SCORE: u64 = 20;

    /// Player defaults
    pub const STARTING_LIVES: i32 = 2;
    /// Invulnerability after a hit (seconds)
    pub const GRACE_PERIOD: f32 = 1.0;
    /// Vertical knock-back on a hit (pixels)
    pub const HIT_NUDGE: f32 = 20.0;
    /// Minimum time the game-over screen stays up (seconds)
    pub const GAME_OVER_DELAY: f32 = 1.0;

    /// Extra lives
    pub const EXTRA_LIFE_START: u64 = 10_000;
    pub const EXTRA_LIFE_FACTOR: f64 = 2.5;

    /// Items
    pub const ITEM_COMBO_START: u64 = 100;
    pub const ITEM_LEVEL_COUNT: u32 = 8;
    /// Seconds an item stays on screen
    pub const ITEM_DESPAWN_TIME: f32 = 5.0;
    /// Vertical margin for item placement
    pub const ITEM_MARGIN: i32 = 30;

    /// Difficulty
    pub const LEVEL_INTERVAL: u32 = 15;
    pub const MAX_OBSTACLE_LEVEL: u32 = 5;
    pub const OBSTACLE_SPEED_START: f32 = 1.0;
    pub const OBSTACLE_SPEED_STEP: f32 = 0.5;
    /// Upper bound (exclusive, whole seconds) for the spawn delay roll
    pub const TIME_TO_NEXT_OBSTACLE: u32 = 3;
    pub const OBSTACLE_TIME_START: f32 = 3.0;

    /// Darts spawn inside this vertical margin
    pub const DART_MARGIN: i32 = 50;
    /// Darts fly past the screen edge to these x coordinates
    pub const DART_END_RIGHT: f32 = 1100.0;
    pub const DART_END_LEFT: f32 = -100.0;
    /// Snakes from the top stop this far above the lava
    pub const SNAKE_LAVA_CLEARANCE: f32 = 20.0;
    /// Snakes turn around within this distance of their end point
    pub const SNAKE_TURN_DISTANCE: f32 = 5.0;
    pub const LAVA_SNAKE_SCALE: f32 = 0.8;

    /// Off-screen limits used for pruning
    pub const PRUNE_TOP: f32 = -100.0;
    pub const PRUNE_BOTTOM: f32 = SCREEN_HEIGHT;
    pub const PRUNE_LEFT: f32 = -100.0;
    pub const PRUNE_RIGHT: f32 = SCREEN_WIDTH + 100.0;
}

/// Convert degrees to radians
#[inline]
pub fn degrees_to_radians(degrees: f32) -> f32 {
    std::f32::consts::PI * degrees / 180.0
}

/// Convert radians to degrees
#[inline]
pub fn radians_to_degrees(radians: f32) -> f32 {
    radians * 180.0 / std::f32::consts::PI
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_angle_conversions() {
        use std::f32::consts::{FRAC_PI_2, PI};

        assert!((degrees_to_radians(180.0) - PI).abs() < 1e-6);
        assert!((radians_to_degrees(FRAC_PI_2) - 90.0).abs() < 1e-4);
        let round_trip = radians_to_degrees(degrees_to_radians(37.5));
        assert!((round_trip - 37.5).abs() < 1e-4);
    }
}
