//! Seams to the host platform: rendering and the score/timer display.
//!
//! The core never configures scenes, lights or cameras; it hands the host a
//! read-only view of the frame and two integers for the HUD.

use engine_core::{Transform, Vec3};

/// Everything a renderer needs to draw one frame.
#[derive(Debug)]
pub struct FrameView<'a> {
    /// Eye position and look rotation.
    pub eye: &'a Transform,
    pub enemies: &'a [Vec3],
    pub projectiles: &'a [Vec3],
}

/// Draws a frame. Called once per tick, whether or not the simulation advanced.
pub trait RenderSurface {
    fn render(&mut self, frame: &FrameView<'_>);
}

/// Score and timer display plus the end-of-round notice.
pub trait HudSurface {
    fn show_score(&mut self, score: u32);
    fn show_time(&mut self, remaining: u32);
    /// The round is over. The host decides whether to reset.
    fn game_over(&mut self, final_score: u32);
}

/// Host that draws and displays nothing.
#[derive(Debug, Default)]
pub struct Headless;

impl RenderSurface for Headless {
    fn render(&mut self, _frame: &FrameView<'_>) {}
}

impl HudSurface for Headless {
    fn show_score(&mut self, _score: u32) {}
    fn show_time(&mut self, _remaining: u32) {}
    fn game_over(&mut self, _final_score: u32) {}
}
