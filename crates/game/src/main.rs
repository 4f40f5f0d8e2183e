//! Headless driver for the Target Range core.
//!
//! Runs one scripted round at a simulated 60 Hz: the bot tracks the nearest
//! target, strafes, and squeezes the trigger twice a second. Useful for
//! checking tuning changes in `config.ron` without a renderer.

use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use engine_core::{Interval, Time, Vec3};
use game::{FrameView, GameConfig, GameEvent, GamePhase, GameState, HudSurface, RenderSurface};
use input::{ElementState, InputState, KeyCode, MouseButton};

/// Host that logs HUD updates and counts rendered frames.
#[derive(Default)]
struct LogHost {
    frames: u64,
    last_time: Option<u32>,
}

impl RenderSurface for LogHost {
    fn render(&mut self, _frame: &FrameView<'_>) {
        self.frames += 1;
    }
}

impl HudSurface for LogHost {
    fn show_score(&mut self, score: u32) {
        log::info!("Score: {}", score);
    }

    fn show_time(&mut self, remaining: u32) {
        if remaining % 10 == 0 && self.last_time != Some(remaining) {
            log::info!("Time left: {}s", remaining);
        }
        self.last_time = Some(remaining);
    }

    fn game_over(&mut self, final_score: u32) {
        log::info!("GAME OVER! Score: {}", final_score);
    }
}

fn nearest(from: Vec3, points: &[Vec3]) -> Option<Vec3> {
    points
        .iter()
        .copied()
        .min_by(|a, b| a.distance_squared(from).total_cmp(&b.distance_squared(from)))
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = match std::env::args().nth(1) {
        Some(path) => GameConfig::load_from(Path::new(&path))
            .with_context(|| format!("loading config from {}", path))?,
        None => GameConfig::load(),
    };
    log::debug!("Effective config:\n{}", config.to_ron()?);

    log::info!("Starting Target Range (headless)");
    let mut game = GameState::new(config);
    let mut host = LogHost::default();
    let mut input = InputState::new();
    let mut time = Time::new();
    let mut seconds = Interval::every_second();

    input.set_cursor_locked(true);

    // Uneven frame pacing; the fixed step and the one-second clock both absorb it.
    let frame_lengths = [Duration::from_millis(14), Duration::from_millis(19)];
    let limit = match game.config.round_seconds {
        0 => 60.0,
        seconds => seconds as f32 + 1.0,
    };
    let mut shots = 0u32;
    let mut tick = 0u64;
    while game.phase == GamePhase::Playing && time.elapsed_seconds() < limit {
        let frame = frame_lengths[(time.frame_count() % 2) as usize];
        time.advance(frame);

        while time.should_fixed_update() {
            let step = time.fixed_timestep_seconds();
            tick += 1;

            if let Some(target) = nearest(game.player.position(), &game.enemy_positions()) {
                game.player.rig.look_at(target);
            }
            let strafe = if (tick / 90) % 2 == 0 { KeyCode::KeyA } else { KeyCode::KeyD };
            let other = if strafe == KeyCode::KeyA { KeyCode::KeyD } else { KeyCode::KeyA };
            input.process_keyboard(other, ElementState::Released);
            input.process_keyboard(strafe, ElementState::Pressed);
            if tick % 30 == 0 {
                input.process_mouse_button(MouseButton::Left, ElementState::Pressed);
                input.process_mouse_button(MouseButton::Left, ElementState::Released);
            }

            let snapshot = input.begin_frame();
            for event in game.tick(&snapshot, input.is_cursor_locked(), step, &mut host) {
                if let GameEvent::Fired { .. } = event {
                    shots += 1;
                }
            }
        }

        for _ in 0..seconds.tick(frame) {
            game.on_timer_second(input.is_cursor_locked(), &mut host);
        }
    }

    let accuracy = if shots > 0 {
        100.0 * game.score() as f32 / shots as f32
    } else {
        0.0
    };
    log::info!(
        "Round finished after {:.1}s and {} frames: {} hits from {} shots ({:.0}%)",
        time.elapsed_seconds(),
        host.frames,
        game.score(),
        shots,
        accuracy
    );
    Ok(())
}
