//! Data-driven game balance
//!
//! Every number the simulation uses lives here so the game can be reused at
//! other resolutions or rebalanced from a JSON document.

use glam::Vec2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

/// Errors produced while loading a tuning document
#[derive(Debug, Error)]
pub enum TuningError {
    #[error("invalid tuning JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("{field} must be positive (got {value})")]
    NonPositive { field: &'static str, value: f64 },
    #[error("{field} must not be negative (got {value})")]
    Negative { field: &'static str, value: f64 },
    #[error("enemy speed range is empty ({min}..{max})")]
    EmptySpeedRange { min: f32, max: f32 },
    #[error("spawn interval starts below its floor ({start} < {floor})")]
    IntervalBelowFloor { start: f64, floor: f64 },
}

/// Game balance parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub canvas_width: f32,
    pub canvas_height: f32,

    pub player_size: Vec2,
    pub player_start: Vec2,
    pub player_step: f32,

    pub bullet_size: Vec2,
    pub bullet_speed: f32,
    pub bullet_spacing: f32,

    pub enemy_size: Vec2,
    pub enemy_min_speed: f32,
    pub enemy_max_speed: f32,

    pub spawn_interval_start_ms: f64,
    pub spawn_interval_step_ms: f64,
    pub spawn_interval_floor_ms: f64,

    pub explosion_particles: usize,
    pub particle_spread: f32,
    pub particle_life: u32,
    pub particle_drag: f32,

    pub score_per_kill: u64,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            canvas_width: CANVAS_WIDTH,
            canvas_height: CANVAS_HEIGHT,

            player_size: Vec2::new(PLAYER_WIDTH, PLAYER_HEIGHT),
            player_start: Vec2::new(PLAYER_START_X, PLAYER_START_Y),
            player_step: PLAYER_STEP,

            bullet_size: Vec2::new(BULLET_WIDTH, BULLET_HEIGHT),
            bullet_speed: BULLET_SPEED,
            bullet_spacing: BULLET_SPACING,

            enemy_size: Vec2::new(ENEMY_WIDTH, ENEMY_HEIGHT),
            enemy_min_speed: ENEMY_MIN_SPEED,
            enemy_max_speed: ENEMY_MAX_SPEED,

            spawn_interval_start_ms: SPAWN_INTERVAL_START_MS,
            spawn_interval_step_ms: SPAWN_INTERVAL_STEP_MS,
            spawn_interval_floor_ms: SPAWN_INTERVAL_FLOOR_MS,

            explosion_particles: EXPLOSION_PARTICLES,
            particle_spread: PARTICLE_SPREAD,
            particle_life: PARTICLE_LIFE,
            particle_drag: PARTICLE_DRAG,

            score_per_kill: SCORE_PER_KILL,
        }
    }
}

impl Tuning {
    /// Parse a (possibly partial) JSON document; missing fields keep their defaults
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Reject values the simulation cannot work with
    pub fn validate(&self) -> Result<(), TuningError> {
        let sizes = [
            ("canvas_width", self.canvas_width),
            ("canvas_height", self.canvas_height),
            ("player_size.x", self.player_size.x),
            ("player_size.y", self.player_size.y),
            ("bullet_size.x", self.bullet_size.x),
            ("bullet_size.y", self.bullet_size.y),
            ("enemy_size.x", self.enemy_size.x),
            ("enemy_size.y", self.enemy_size.y),
            ("player_step", self.player_step),
            ("bullet_speed", self.bullet_speed),
            ("enemy_min_speed", self.enemy_min_speed),
        ];
        for (field, value) in sizes {
            if !(value > 0.0) {
                return Err(TuningError::NonPositive {
                    field,
                    value: value as f64,
                });
            }
        }
        if !(self.spawn_interval_floor_ms > 0.0) {
            return Err(TuningError::NonPositive {
                field: "spawn_interval_floor_ms",
                value: self.spawn_interval_floor_ms,
            });
        }
        // The interval only ever shrinks, and the fire gate needs a gap
        let gaps = [
            ("bullet_spacing", self.bullet_spacing as f64),
            ("spawn_interval_step_ms", self.spawn_interval_step_ms),
        ];
        for (field, value) in gaps {
            if !(value >= 0.0) {
                return Err(TuningError::Negative { field, value });
            }
        }
        if self.spawn_interval_start_ms < self.spawn_interval_floor_ms {
            return Err(TuningError::IntervalBelowFloor {
                start: self.spawn_interval_start_ms,
                floor: self.spawn_interval_floor_ms,
            });
        }
        if self.enemy_max_speed <= self.enemy_min_speed {
            return Err(TuningError::EmptySpeedRange {
                min: self.enemy_min_speed,
                max: self.enemy_max_speed,
            });
        }
        Ok(())
    }

    /// Largest x the player may occupy
    #[inline]
    pub fn player_max_x(&self) -> f32 {
        (self.canvas_width - self.player_size.x).max(0.0)
    }

    /// Largest y the player may occupy
    #[inline]
    pub fn player_max_y(&self) -> f32 {
        (self.canvas_height - self.player_size.y).max(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert!(Tuning::default().validate().is_ok());
        assert_eq!(Tuning::default().player_max_x(), 760.0);
        assert_eq!(Tuning::default().player_max_y(), 560.0);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let tuning = Tuning::from_json(r#"{ "canvas_width": 1024.0, "canvas_height": 768.0 }"#)
            .unwrap();
        assert_eq!(tuning.canvas_width, 1024.0);
        assert_eq!(tuning.canvas_height, 768.0);
        assert_eq!(tuning.player_step, PLAYER_STEP);
        assert_eq!(tuning.score_per_kill, SCORE_PER_KILL);
    }

    #[test]
    fn test_rejects_bad_values() {
        assert!(matches!(
            Tuning::from_json(r#"{ "canvas_width": 0.0 }"#),
            Err(TuningError::NonPositive { field: "canvas_width", .. })
        ));
        assert!(matches!(
            Tuning::from_json(r#"{ "enemy_min_speed": 5.0, "enemy_max_speed": 5.0 }"#),
            Err(TuningError::EmptySpeedRange { .. })
        ));
        assert!(matches!(
            Tuning::from_json(r#"{ "player_step": 0.0 }"#),
            Err(TuningError::NonPositive { field: "player_step", .. })
        ));
        assert!(matches!(
            Tuning::from_json(r#"{ "player_step": -8.0 }"#),
            Err(TuningError::NonPositive { field: "player_step", .. })
        ));
        assert!(matches!(
            Tuning::from_json(r#"{ "bullet_spacing": -100.0 }"#),
            Err(TuningError::Negative { field: "bullet_spacing", .. })
        ));
        assert!(matches!(
            Tuning::from_json(r#"{ "spawn_interval_step_ms": -50.0 }"#),
            Err(TuningError::Negative { field: "spawn_interval_step_ms", .. })
        ));
        assert!(matches!(
            Tuning::from_json(r#"{ "spawn_interval_start_ms": 200.0 }"#),
            Err(TuningError::IntervalBelowFloor { .. })
        ));
        assert!(matches!(
            Tuning::from_json("not json"),
            Err(TuningError::Parse(_))
        ));
    }

    #[test]
    fn test_zero_gaps_are_allowed() {
        let tuning = Tuning::from_json(
            r#"{ "bullet_spacing": 0.0, "spawn_interval_step_ms": 0.0, "spawn_interval_start_ms": 300.0 }"#,
        )
        .unwrap();
        assert_eq!(tuning.spawn_interval_start_ms, tuning.spawn_interval_floor_ms);
    }
}
