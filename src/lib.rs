//! Space Shooter - A 2D canvas arcade shooter
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entities, spawning, collisions, session phases)
//! - `game`: Frame driver tying the simulation to its collaborators
//! - `audio`: Sound cues and background music
//! - `renderer`: Drawing the current frame
//! - `persistence`: Key-value storage backends
//! - `tuning`: Data-driven game balance

pub mod audio;
pub mod game;
pub mod highscores;
pub mod persistence;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use game::Game;
pub use highscores::HighScore;
pub use settings::Settings;
pub use tuning::Tuning;

/// Game configuration constants (defaults for [`Tuning`])
pub mod consts {
    /// Logical canvas size
    pub const CANVAS_WIDTH: f32 = 800.0;
    pub const CANVAS_HEIGHT: f32 = 600.0;

    /// Player ship
    pub const PLAYER_WIDTH: f32 = 40.0;
    pub const PLAYER_HEIGHT: f32 = 40.0;
    pub const PLAYER_START_X: f32 = 400.0;
    pub const PLAYER_START_Y: f32 = 500.0;
    /// Movement per tick for each held direction
    pub const PLAYER_STEP: f32 = 8.0;

    /// Bullets
    pub const BULLET_WIDTH: f32 = 4.0;
    pub const BULLET_HEIGHT: f32 = 10.0;
    pub const BULLET_SPEED: f32 = 12.0;
    /// Distance the last bullet must clear above the player before the next one
    pub const BULLET_SPACING: f32 = 50.0;

    /// Enemies
    pub const ENEMY_WIDTH: f32 = 30.0;
    pub const ENEMY_HEIGHT: f32 = 30.0;
    pub const ENEMY_MIN_SPEED: f32 = 2.0;
    pub const ENEMY_MAX_SPEED: f32 = 5.0;

    /// Spawn timing (milliseconds)
    pub const SPAWN_INTERVAL_START_MS: f64 = 1000.0;
    pub const SPAWN_INTERVAL_STEP_MS: f64 = 5.0;
    pub const SPAWN_INTERVAL_FLOOR_MS: f64 = 300.0;

    /// Explosion particles
    pub const EXPLOSION_PARTICLES: usize = 12;
    pub const PARTICLE_SPREAD: f32 = 8.0;
    pub const PARTICLE_LIFE: u32 = 30;
    pub const PARTICLE_DRAG: f32 = 0.98;
    pub const EXPLOSION_COLOR: u32 = 0xff6b6b;

    /// Points per destroyed enemy
    pub const SCORE_PER_KILL: u64 = 10;

    /// Nominal frame length for drivers that simulate their own clock (60 Hz)
    pub const FRAME_MS: f64 = 1000.0 / 60.0;
}
