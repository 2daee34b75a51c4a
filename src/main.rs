//! Koala Jones entry point
//!
//! Runs a headless session: loads settings and textures, then drives the
//! game through the framework loop with a scripted player and a recording
//! renderer.
//!
//! Usage: `koala-jones [settings.json]`

use std::time::{SystemTime, UNIX_EPOCH};

use glam::Vec2;

use koala_jones::assets::GameTextures;
use koala_jones::consts::*;
use koala_jones::platform::{Framework, ScriptedEvents};
use koala_jones::renderer::CommandRecorder;
use koala_jones::sim::GameState;
use koala_jones::textures::{ManifestLoader, TextureRegistry};
use koala_jones::{KoalaJones, Settings};

/// Frames between scripted clicks
const CLICK_EVERY: u32 = 40;

fn main() {
    env_logger::init();
    log::info!("Koala Jones (headless) starting...");

    let settings = match std::env::args().nth(1) {
        Some(path) => Settings::load_or_default(path),
        None => Settings::default(),
    };

    let seed = settings.seed.unwrap_or_else(clock_seed);
    log::info!("Game initialized with seed: {}", seed);

    let mut registry = TextureRegistry::new();
    let mut loader = ManifestLoader::new(settings.textures.clone());
    let textures = match GameTextures::load(&mut registry, &mut loader) {
        Ok(textures) => textures,
        Err(e) => {
            log::error!("Failed to load textures: {}", e);
            std::process::exit(1);
        }
    };
    log::info!("Loaded {} textures", registry.len());

    let game = KoalaJones::new(GameState::new(textures, seed), settings.show_list_stats);
    let mut framework = Framework::new(game, CommandRecorder::new(), settings.present_interval);

    let mut script = scripted_session(settings.frames);
    framework.run(&mut script, settings.frame_dt);

    let (game, recorder) = framework.into_parts();
    log::info!("Last frame: {:?}", recorder.stats());
    match serde_json::to_string_pretty(&game.summary()) {
        Ok(json) => log::info!("Session summary:\n{}", json),
        Err(e) => log::warn!("Failed to serialize session summary: {}", e),
    }
}

fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

/// Start click, then a click every `CLICK_EVERY` frames that walks the
/// koala back and forth across the vines
fn scripted_session(frames: u32) -> ScriptedEvents {
    let mut script = ScriptedEvents::new();
    script.click(Vec2::new(SCREEN_WIDTH / 2.0, SCREEN_HEIGHT / 2.0));

    // Lane indices bouncing between the outer vines: 3, 4, 5, 4, 3, 2, 1, 0, 1, ...
    let bounce = (START_LANE + 1..LANE_COUNT)
        .chain((0..LANE_COUNT - 1).rev())
        .chain(1..=START_LANE)
        .cycle();

    let mut remaining = frames;
    for lane in bounce {
        let batch = remaining.min(CLICK_EVERY);
        script.frames(batch as usize);
        remaining -= batch;
        if remaining == 0 {
            break;
        }
        script.click(Vec2::new(LANE_X[lane], SCREEN_HEIGHT / 2.0));
    }
    script
}
