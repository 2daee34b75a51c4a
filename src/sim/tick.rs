//! Per-frame simulation update and click handling
//!
//! Obstacles move a fixed amount per frame (speed is pixels per frame);
//! timers count down in seconds using the frame's `dt`.

use glam::Vec2;

use super::spawner::SpawnContext;
use super::sprite::{Color, Sprite};
use super::state::{GamePhase, GameState, ObstacleKind, Side};
use crate::consts::*;

/// How a click moved the player
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerMove {
    Up,
    Down,
    Hop(Side),
}

/// Advance the session by one frame
pub fn tick(state: &mut GameState, dt: f32) {
    match state.phase {
        GamePhase::Playing => {
            check_collisions(state);

            state.elapsed_time += dt;
            award_extra_life(state);
            update_grace_period(state, dt);
            update_level(state, dt);

            move_obstacles(state);
            spawn_obstacles(state, dt);
            prune_obstacles(state);
        }
        GamePhase::Over => {
            state.game_over_time -= dt;
        }
        GamePhase::Start => {}
    }
}

/// Handle a left click at `point` (screen coordinates)
pub fn click(state: &mut GameState, point: Vec2) {
    match state.phase {
        GamePhase::Start => {
            state.phase = GamePhase::Playing;
            log::info!("Game started");
        }
        GamePhase::Playing => {
            if let Some(step) = move_player(state, point) {
                log::debug!("Player moved {:?} to lane {}", step, state.current_lane);
            }
        }
        GamePhase::Over => {
            if state.game_over_time <= 0.0 {
                state.reset();
            }
        }
    }
}

/// Move the koala toward a click.
///
/// Checked in order: a climb up or down along the current vine, then a hop
/// to the vine on the right, then to the vine on the left. Clicks that match
/// none of these, including hops past the outer vines, do nothing.
pub fn move_player(state: &mut GameState, point: Vec2) -> Option<PlayerMove> {
    let pos = state.player.position();
    let on_vine =
        point.x >= pos.x - LANE_CLICK_TOLERANCE && point.x <= pos.x + LANE_CLICK_TOLERANCE;

    if on_vine && point.y <= pos.y - CLIMB_STEP {
        state.player.set_position(pos - Vec2::new(0.0, CLIMB_STEP));
        return Some(PlayerMove::Up);
    }

    let floor = state.lava_top() - PLAYER_LAVA_CLEARANCE;
    if on_vine && point.y >= pos.y + CLIMB_STEP && point.y < floor {
        state.player.set_position(pos + Vec2::new(0.0, CLIMB_STEP));
        return Some(PlayerMove::Down);
    }

    for side in [Side::Right, Side::Left] {
        let Some(lane) = state.lanes.neighbor(state.current_lane, side) else {
            continue;
        };
        let Some(lane_x) = state.lanes.x(lane) else {
            continue;
        };
        if point.x >= lane_x - LANE_CLICK_TOLERANCE && point.x <= lane_x + LANE_CLICK_TOLERANCE {
            state.player.set_position(Vec2::new(lane_x, pos.y));
            state.current_lane = lane;
            state.score += LANE_HOP_SCORE;
            return Some(PlayerMove::Hop(side));
        }
    }

    None
}

/// Spawn one obstacle of `kind`; ignored unless the session is playing
pub fn spawn_obstacle(state: &mut GameState, kind: ObstacleKind) {
    if !state.is_playing() {
        return;
    }
    let ctx = SpawnContext {
        textures: &state.textures,
        lanes: &state.lanes,
        obstacle_speed: state.obstacle_speed,
    };
    let sprite = state.spawner.obstacle(kind, &ctx);
    state.obstacles[kind.index()].add(sprite);
}

/// Spawn the item for the current item level; ignored unless playing
pub fn spawn_item(state: &mut GameState) {
    if !state.is_playing() {
        return;
    }
    let ctx = SpawnContext {
        textures: &state.textures,
        lanes: &state.lanes,
        obstacle_speed: state.obstacle_speed,
    };
    let player_x = state.player.position().x;
    let sprite = state.spawner.item(&ctx, state.item_level, player_x);
    state.items.add(sprite);
}

/// Obstacle hits cost a life; item pickups score the combo
fn check_collisions(state: &mut GameState) {
    for kind in ObstacleKind::ALL {
        let mut i = 0;
        while i < state.obstacles[kind.index()].count() {
            let hit = state.grace_period <= 0.0
                && state.obstacles[kind.index()]
                    .get(i)
                    .collides_with(&state.player);
            if hit {
                state.obstacles[kind.index()].remove_at(i);
                take_hit(state, kind);
            } else {
                i += 1;
            }
        }
    }

    let mut i = 0;
    while i < state.items.count() {
        if state.items.get(i).collides_with(&state.player) {
            state.items.remove_at(i);
            state.score += state.item_combo;
            log::debug!("Item collected for {}", state.item_combo);
            state.item_combo = state.item_combo.saturating_mul(2);
        } else {
            i += 1;
        }
    }
}

fn take_hit(state: &mut GameState, kind: ObstacleKind) {
    state.lives -= 1;
    state.grace_period = GRACE_PERIOD;
    state.player.set_color(Color::RED);
    let pos = state.player.position();
    state
        .player
        .set_position(pos + Vec2::new(0.0, kind.hit_nudge()));
    log::debug!("Hit by {}, {} lives left", kind.singular(), state.lives);

    if state.lives < 0 {
        state.phase = GamePhase::Over;
        log::info!(
            "Game over: score {} after {:.1}s",
            state.score,
            state.elapsed_time
        );
    }
}

fn award_extra_life(state: &mut GameState) {
    if state.score >= state.score_for_extra_life {
        state.lives += 1;
        state.score_for_extra_life = (state.score_for_extra_life as f64 * EXTRA_LIFE_FACTOR) as u64;
        log::info!(
            "Extra life! {} lives, next at {}",
            state.lives,
            state.score_for_extra_life
        );
    }
}

fn update_grace_period(state: &mut GameState, dt: f32) {
    if state.grace_period > 0.0 {
        state.grace_period -= dt;
        if state.grace_period <= 0.0 {
            state.player.set_color(Color::WHITE);
        }
    }
}

/// Difficulty steps and item lifetime
fn update_level(state: &mut GameState, dt: f32) {
    let next_change = state.time_to_next_change as f32;
    let window = next_change..next_change + LEVEL_INTERVAL as f32;
    if window.contains(&state.elapsed_time) {
        if state.item_level > ITEM_LEVEL_COUNT {
            state.item_level = 1;
            state.item_combo = ITEM_COMBO_START;
        }

        spawn_item(state);
        state.item_level += 1;
        state.item_despawn = ITEM_DESPAWN_TIME;
        state.time_to_next_change += LEVEL_INTERVAL;

        if state.obstacle_level < MAX_OBSTACLE_LEVEL {
            state.obstacle_level += 1;
        } else {
            state.obstacle_speed += OBSTACLE_SPEED_STEP;
        }
        log::info!(
            "Level up: obstacle level {}, speed {}, item level {}",
            state.obstacle_level,
            state.obstacle_speed,
            state.item_level
        );
    }

    if !state.items.is_empty() {
        state.item_despawn -= dt;
        if state.item_despawn <= 0.0 {
            // Only one item is ever on screen, so the oldest is the active one
            state.items.remove_at(0);
            state.item_combo = ITEM_COMBO_START;
            state.item_level = 1;
            log::debug!("Item despawned, combo reset");
        }
    }
}

fn move_obstacles(state: &mut GameState) {
    for kind in ObstacleKind::ALL {
        for sprite in state.obstacles[kind.index()].iter_mut() {
            sprite.step();
            match kind {
                ObstacleKind::Rock => sprite.set_rotation(sprite.rotation() + sprite.speed),
                ObstacleKind::Snake => turn_snake(sprite),
                ObstacleKind::Fire | ObstacleKind::Dart => {}
            }
        }
    }
}

/// A snake that reaches its end point heads back the way it came, once
pub fn turn_snake(sprite: &mut Sprite) {
    let gap = (sprite.end_point - sprite.position()).abs();
    if gap.x < SNAKE_TURN_DISTANCE && gap.y < SNAKE_TURN_DISTANCE && !sprite.has_reversed {
        sprite.reverse_path();
        sprite.has_reversed = true;
    }
}

fn spawn_obstacles(state: &mut GameState, dt: f32) {
    state.obstacle_time -= dt;
    if state.obstacle_time <= 0.0 {
        state.obstacle_time = state
            .spawner
            .next_obstacle_delay(state.time_to_next_obstacle);
        if let Some(kind) = state.spawner.pick_obstacle(state.obstacle_level) {
            spawn_obstacle(state, kind);
        }
    }
}

/// Has an obstacle of `kind` left the play area?
pub fn is_off_screen(kind: ObstacleKind, pos: Vec2) -> bool {
    match kind {
        ObstacleKind::Rock => pos.y > PRUNE_BOTTOM,
        ObstacleKind::Fire => pos.y < PRUNE_TOP,
        ObstacleKind::Dart => pos.x > PRUNE_RIGHT || pos.x < PRUNE_LEFT,
        ObstacleKind::Snake => pos.y < PRUNE_TOP || pos.y > PRUNE_BOTTOM,
    }
}

fn prune_obstacles(state: &mut GameState) {
    for kind in ObstacleKind::ALL {
        let list = &mut state.obstacles[kind.index()];
        for i in (0..list.count()).rev() {
            if is_off_screen(kind, list.get(i).position()) {
                list.remove_at(i);
            }
        }
    }
}
