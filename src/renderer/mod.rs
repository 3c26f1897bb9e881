//! Drawing the current frame
//!
//! Renderers read a borrowed [`Frame`] after each tick. Nothing they do feeds
//! back into the simulation.

#[cfg(target_arch = "wasm32")]
pub mod canvas;

#[cfg(target_arch = "wasm32")]
pub use canvas::Canvas2dRenderer;

use glam::Vec2;
use thiserror::Error;

use crate::sim::{Entity, GamePhase, GameState, Particle};

/// Colors (0xRRGGBB)
pub mod palette {
    pub const BACKGROUND_TOP: u32 = 0x0f0f23;
    pub const BACKGROUND_BOTTOM: u32 = 0x1a1a3a;
    pub const STAR: u32 = 0xffffff;
    pub const PLAYER: u32 = 0x4ecdc4;
    pub const BULLET: u32 = 0xffe66d;
    pub const ENEMY: u32 = 0xff6b6b;
}

/// Number of background stars
pub const STAR_COUNT: usize = 100;

/// Side length of a drawn particle
pub const PARTICLE_SIZE: f32 = 3.0;

/// Errors from a render backend
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("render surface unavailable")]
    SurfaceUnavailable,
    #[error("render backend error: {0}")]
    Backend(String),
}

/// Read-only view of everything a renderer draws
#[derive(Debug, Clone, Copy)]
pub struct Frame<'a> {
    pub width: f32,
    pub height: f32,
    pub phase: GamePhase,
    pub score: u64,
    pub high_score: u64,
    pub new_high_score: bool,
    pub player: &'a Entity,
    pub bullets: &'a [Entity],
    pub enemies: &'a [Entity],
    pub particles: &'a [Particle],
}

impl<'a> Frame<'a> {
    pub fn from_state(state: &'a GameState) -> Self {
        Self {
            width: state.tuning.canvas_width,
            height: state.tuning.canvas_height,
            phase: state.phase,
            score: state.score,
            high_score: state.high_score,
            new_high_score: state.is_new_high_score(),
            player: &state.player,
            bullets: &state.bullets,
            enemies: &state.enemies,
            particles: &state.particles,
        }
    }
}

/// What the page around the canvas shows: counters, overlays and banners
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hud {
    pub score: u64,
    pub high_score: u64,
    pub muted: bool,
    pub show_menu: bool,
    pub show_game_over: bool,
    pub show_new_high_score: bool,
}

impl Hud {
    pub fn new(state: &GameState, muted: bool) -> Self {
        let game_over = state.phase == GamePhase::GameOver;
        Self {
            score: state.score,
            high_score: state.high_score,
            muted,
            show_menu: state.phase == GamePhase::Menu,
            show_game_over: game_over,
            show_new_high_score: game_over && state.is_new_high_score(),
        }
    }

    /// Label for the mute button
    pub fn mute_label(&self) -> &'static str {
        if self.muted { "Unmute" } else { "Mute" }
    }
}

/// Render collaborator
pub trait Renderer {
    fn draw(&mut self, frame: &Frame<'_>) -> Result<(), RenderError>;
}

/// CSS hex color, `#rrggbb`
pub fn css_color(rgb: u32) -> String {
    format!("#{:06x}", rgb & 0xff_ffff)
}

/// CSS hex color with alpha, `#rrggbbaa`
pub fn css_color_alpha(rgb: u32, alpha: f32) -> String {
    let a = (alpha.clamp(0.0, 1.0) * 255.0).floor() as u32;
    format!("#{:06x}{:02x}", rgb & 0xff_ffff, a)
}

/// Fixed star positions scattered over the canvas
pub fn star_field(width: f32, height: f32) -> impl Iterator<Item = Vec2> {
    (0..STAR_COUNT).map(move |i| {
        let i = i as f32;
        Vec2::new((i * 67.0) % width, (i * 31.0) % height)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tuning::Tuning;

    #[test]
    fn test_css_colors() {
        assert_eq!(css_color(palette::PLAYER), "#4ecdc4");
        assert_eq!(css_color(0x00000f), "#00000f");
        assert_eq!(css_color_alpha(palette::ENEMY, 1.0), "#ff6b6bff");
        assert_eq!(css_color_alpha(palette::ENEMY, 0.5), "#ff6b6b7f");
        assert_eq!(css_color_alpha(palette::ENEMY, 0.0), "#ff6b6b00");
        assert_eq!(css_color_alpha(palette::ENEMY, 2.0), "#ff6b6bff");
    }

    #[test]
    fn test_star_field_inside_canvas() {
        let stars: Vec<Vec2> = star_field(800.0, 600.0).collect();
        assert_eq!(stars.len(), STAR_COUNT);
        assert!(stars
            .iter()
            .all(|s| s.x >= 0.0 && s.x < 800.0 && s.y >= 0.0 && s.y < 600.0));
        assert_eq!(stars[1], Vec2::new(67.0, 31.0));
    }

    #[test]
    fn test_hud_follows_phase() {
        let mut state = GameState::new(Tuning::default(), 1);
        let hud = Hud::new(&state, false);
        assert!(hud.show_menu && !hud.show_game_over && !hud.show_new_high_score);
        assert_eq!(hud.mute_label(), "Mute");

        state.start();
        let hud = Hud::new(&state, true);
        assert!(!hud.show_menu && !hud.show_game_over);
        assert_eq!(hud.mute_label(), "Unmute");

        state.score = 50;
        state.end_run();
        let hud = Hud::new(&state, false);
        assert!(hud.show_game_over && hud.show_new_high_score);
        assert_eq!((hud.score, hud.high_score), (50, 50));

        // Banner stays hidden when the record was not beaten
        state.start();
        state.score = 20;
        state.end_run();
        let hud = Hud::new(&state, false);
        assert!(hud.show_game_over && !hud.show_new_high_score);
        assert_eq!(hud.high_score, 50);

        state.return_to_menu();
        assert!(Hud::new(&state, false).show_menu);
    }

    #[test]
    fn test_frame_borrows_state() {
        let mut state = GameState::new(Tuning::default(), 1);
        state.start();
        state.score = 30;
        let frame = Frame::from_state(&state);
        assert_eq!(frame.phase, GamePhase::Playing);
        assert_eq!(frame.score, 30);
        assert_eq!(frame.width, 800.0);
        assert_eq!(frame.player.pos, Vec2::new(400.0, 500.0));
        assert!(frame.enemies.is_empty());
    }
}
