//! The game client
//!
//! `KoalaJones` plugs the simulation into the framework: window messages
//! become clicks, updates become ticks, and each phase draws its own screen.

use glam::Vec2;
use serde::Serialize;

use crate::platform::{GameClient, WindowEvent};
use crate::renderer::{Renderer, with_batch};
use crate::sim::{self, Color, GamePhase, GameState, ObstacleKind, SpriteList};

/// Back-to-front draw order of the obstacle lists
const OBSTACLE_DRAW_ORDER: [ObstacleKind; ObstacleKind::COUNT] = [
    ObstacleKind::Snake,
    ObstacleKind::Dart,
    ObstacleKind::Fire,
    ObstacleKind::Rock,
];

/// End-of-run snapshot for logging
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionSummary {
    pub seed: u64,
    pub phase: GamePhase,
    pub elapsed_time: f32,
    pub score: u64,
    pub lives: i32,
    pub obstacle_level: u32,
    pub obstacle_speed: f32,
    pub obstacles: usize,
    pub items: usize,
}

pub struct KoalaJones {
    state: GameState,
    mouse_pos: Vec2,
    button_down_left: bool,
    show_list_stats: bool,
}

impl KoalaJones {
    pub fn new(state: GameState, show_list_stats: bool) -> Self {
        Self {
            state,
            mouse_pos: Vec2::ZERO,
            button_down_left: false,
            show_list_stats,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    /// Last position the left button went down at
    pub fn mouse_pos(&self) -> Vec2 {
        self.mouse_pos
    }

    pub fn is_button_down(&self) -> bool {
        self.button_down_left
    }

    pub fn summary(&self) -> SessionSummary {
        let state = &self.state;
        SessionSummary {
            seed: state.spawner.seed(),
            phase: state.phase,
            elapsed_time: state.elapsed_time,
            score: state.score,
            lives: state.lives,
            obstacle_level: state.obstacle_level,
            obstacle_speed: state.obstacle_speed,
            obstacles: state.obstacle_count(),
            items: state.items.count(),
        }
    }

    fn render_playing(&self, renderer: &mut dyn Renderer) {
        let state = &self.state;
        renderer.draw_texture(state.textures.background.id, 0, 0);

        with_batch(renderer, |r| {
            if let Some(draw) = state.player.draw() {
                r.draw_sprite(&draw);
            }
            draw_list(r, &state.items);
            for kind in OBSTACLE_DRAW_ORDER {
                draw_list(r, state.obstacles(kind));
            }
        });

        renderer.draw_texture(state.textures.lava.id, 0, state.lava_top() as i32);
        self.render_hud(renderer);
    }

    fn render_hud(&self, renderer: &mut dyn Renderer) {
        let state = &self.state;
        renderer.print(
            0.0,
            700.0,
            &format!("Time: {:.2}", state.elapsed_time),
            Color::BLACK,
        );
        renderer.print(0.0, 720.0, &format!("Score: {}", state.score), Color::BLACK);
        renderer.print(0.0, 740.0, &format!("Lives: {}", state.lives), Color::BLACK);

        if !self.show_list_stats {
            return;
        }
        // Stats for the kind most recently unlocked
        let Some(kind) = (state.obstacle_level as usize)
            .checked_sub(1)
            .and_then(ObstacleKind::from_index)
        else {
            return;
        };
        let list = state.obstacles(kind);
        renderer.print(
            200.0,
            700.0,
            &format!("{}: {}", kind.name(), list.count()),
            Color::BLACK,
        );
        renderer.print(
            200.0,
            720.0,
            &format!("{} Capacity: {}", kind.singular(), list.capacity()),
            Color::BLACK,
        );
    }

    fn render_game_over(&self, renderer: &mut dyn Renderer) {
        let state = &self.state;
        renderer.draw_texture(state.textures.game_over.id, 0, 0);
        renderer.print(
            400.0,
            384.0,
            &format!("Time Survived: {:.2}", state.elapsed_time),
            Color::WHITE,
        );
        renderer.print(
            400.0,
            404.0,
            &format!("Final Score: {}", state.score),
            Color::WHITE,
        );
    }
}

fn draw_list(renderer: &mut dyn Renderer, list: &SpriteList) {
    for draw in list.iter().filter_map(|s| s.draw()) {
        renderer.draw_sprite(&draw);
    }
}

impl GameClient for KoalaJones {
    fn on_update(&mut self, dt: f32) {
        sim::tick(&mut self.state, dt);
    }

    fn on_render(&mut self, renderer: &mut dyn Renderer) {
        match self.state.phase {
            GamePhase::Start => renderer.draw_texture(self.state.textures.title.id, 0, 0),
            GamePhase::Playing => self.render_playing(renderer),
            GamePhase::Over => self.render_game_over(renderer),
        }
    }

    fn on_message(&mut self, event: &WindowEvent) {
        match *event {
            WindowEvent::LeftButtonDown(point) => {
                self.mouse_pos = point;
                self.button_down_left = true;
            }
            WindowEvent::LeftButtonUp(point) => {
                self.button_down_left = false;
                sim::click(&mut self.state, point);
            }
            _ => {}
        }
    }
}
