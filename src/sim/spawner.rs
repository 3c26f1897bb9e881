//! Enemy spawning and the bullet fire gate
//!
//! Enemies arrive on a timer that shortens after every spawn, which is the
//! whole difficulty curve. Bullets are gated by spacing rather than time.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::state::Entity;
use crate::tuning::Tuning;

/// Time-gated enemy spawner with an accelerating rate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Spawner {
    /// Clock reading (ms) of the last spawn
    pub last_spawn_ms: f64,
    /// Minimum time between spawns (ms)
    pub interval_ms: f64,
}

impl Spawner {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            last_spawn_ms: 0.0,
            interval_ms: tuning.spawn_interval_start_ms,
        }
    }

    /// Spawn one enemy if the interval has elapsed since the last spawn.
    ///
    /// Each spawn shortens the interval by a fixed step, never below the floor.
    pub fn try_spawn<R: Rng + ?Sized>(
        &mut self,
        now_ms: f64,
        tuning: &Tuning,
        rng: &mut R,
    ) -> Option<Entity> {
        if now_ms - self.last_spawn_ms <= self.interval_ms {
            return None;
        }

        let max_x = (tuning.canvas_width - tuning.enemy_size.x).max(0.0);
        let x = rng.random::<f32>() * max_x;
        let vy = sample_half_open(rng, tuning.enemy_min_speed, tuning.enemy_max_speed);

        self.last_spawn_ms = now_ms;
        self.interval_ms = (self.interval_ms - tuning.spawn_interval_step_ms)
            .max(tuning.spawn_interval_floor_ms);

        Some(Entity::new(
            Vec2::new(x, -tuning.enemy_size.y),
            tuning.enemy_size,
            Vec2::new(0.0, vy),
        ))
    }
}

/// Uniform sample in `[lo, hi)`, guarding against rounding up to `hi`
fn sample_half_open<R: Rng + ?Sized>(rng: &mut R, lo: f32, hi: f32) -> f32 {
    let v = lo + rng.random::<f32>() * (hi - lo);
    if v < hi { v } else { lo }
}

/// Fire a bullet from the player if spacing allows.
///
/// A new bullet is allowed when none are in flight, or when the most recent
/// one has climbed more than `bullet_spacing` above the player. This relies
/// on every bullet moving at the same speed, so the last one is the lowest.
pub fn try_fire(player: &Entity, bullets: &[Entity], tuning: &Tuning) -> Option<Entity> {
    let clear = match bullets.last() {
        None => true,
        Some(last) => last.pos.y < player.pos.y - tuning.bullet_spacing,
    };
    if !clear {
        return None;
    }

    let x = player.pos.x + player.size.x / 2.0 - tuning.bullet_size.x / 2.0;
    Some(Entity::new(
        Vec2::new(x, player.pos.y),
        tuning.bullet_size,
        Vec2::new(0.0, -tuning.bullet_speed),
    ))
}
