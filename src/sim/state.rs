//! Game state and core simulation types
//!
//! Everything a session mutates lives in [`GameState`], which the frame driver
//! owns and lends to the tick by `&mut`.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::Aabb;
use super::spawner::Spawner;
use crate::tuning::Tuning;

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GamePhase {
    /// Title screen, nothing simulated
    #[default]
    Menu,
    /// Active gameplay
    Playing,
    /// Run ended by a player-enemy collision
    GameOver,
}

/// Notifications produced by a tick or a phase change.
///
/// The driver drains these after the tick and forwards them to audio and
/// persistence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// A bullet was fired
    Shoot,
    /// A bullet destroyed an enemy
    Explosion,
    /// The player was hit
    GameOver,
    /// A new session started
    GameStart,
    /// Background music should begin
    MusicStart,
    /// Background music should stop
    MusicStop,
    /// The high score was beaten and must be persisted
    NewHighScore(u64),
}

/// A moving rectangle: the player, a bullet or an enemy
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    /// Top-left corner
    pub pos: Vec2,
    pub size: Vec2,
    /// Units per tick
    pub vel: Vec2,
}

impl Entity {
    pub fn new(pos: Vec2, size: Vec2, vel: Vec2) -> Self {
        Self { pos, size, vel }
    }

    #[inline]
    pub fn aabb(&self) -> Aabb {
        Aabb::new(self.pos, self.size)
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.pos + self.size * 0.5
    }

    /// Integrate one tick of straight-line motion
    #[inline]
    pub fn advance(&mut self) {
        self.pos += self.vel;
    }
}

/// A particle for visual effects
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Ticks remaining
    pub life: u32,
    /// Life at creation, only used for the fade ratio
    pub max_life: u32,
    /// 0xRRGGBB, opaque to the simulation
    pub color: u32,
}

impl Particle {
    /// Opacity in [0, 1]
    pub fn alpha(&self) -> f32 {
        if self.max_life == 0 {
            0.0
        } else {
            self.life as f32 / self.max_life as f32
        }
    }
}

/// Complete session state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Balance parameters for this state
    pub tuning: Tuning,
    /// Seed the RNG was created from
    pub seed: u64,
    /// Current phase
    pub phase: GamePhase,
    /// Score of the current (or last) run
    pub score: u64,
    /// Best score seen, loaded from storage by the driver
    pub high_score: u64,
    /// Set when the last run ended above the previous high score
    pub new_high_score: bool,
    /// Ticks simulated in the current run
    pub time_ticks: u64,
    /// Player ship
    pub player: Entity,
    /// Bullets in fire order (last = most recent)
    pub bullets: Vec<Entity>,
    /// Enemies in spawn order
    pub enemies: Vec<Entity>,
    /// Visual particles (not gameplay-affecting)
    pub particles: Vec<Particle>,
    /// Enemy spawn timing
    pub spawner: Spawner,
    /// Notifications waiting to be drained
    pub events: Vec<GameEvent>,
    /// Seeded RNG for spawn positions and particle spread
    pub(crate) rng: Pcg32,
}

impl GameState {
    /// Create a state in the menu phase with the given seed
    pub fn new(tuning: Tuning, seed: u64) -> Self {
        let player = Self::starting_player(&tuning);
        let spawner = Spawner::new(&tuning);
        Self {
            tuning,
            seed,
            phase: GamePhase::Menu,
            score: 0,
            high_score: 0,
            new_high_score: false,
            time_ticks: 0,
            player,
            bullets: Vec::new(),
            enemies: Vec::new(),
            particles: Vec::new(),
            spawner,
            events: Vec::new(),
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// Player ship at its starting position
    pub fn starting_player(tuning: &Tuning) -> Entity {
        Entity::new(tuning.player_start, tuning.player_size, Vec2::ZERO)
    }

    /// Clear all entity stores and the score for a fresh run
    pub fn reset_run(&mut self) {
        self.player = Self::starting_player(&self.tuning);
        self.bullets.clear();
        self.enemies.clear();
        self.particles.clear();
        self.spawner = Spawner::new(&self.tuning);
        self.score = 0;
        self.new_high_score = false;
        self.time_ticks = 0;
    }

    /// Queue a notification
    #[inline]
    pub fn emit(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Take all queued notifications
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Whether the game-over screen should announce a new record
    pub fn is_new_high_score(&self) -> bool {
        self.phase == GamePhase::GameOver && self.new_high_score
    }
}
