//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One fixed step per tick, clock only used for spawn timing
//! - Seeded RNG only
//! - Side effects reported as [`GameEvent`]s, never performed
//! - No rendering or platform dependencies

pub mod autopilot;
pub mod collision;
pub mod input;
pub mod session;
pub mod spawner;
pub mod state;
pub mod tick;

pub use autopilot::autopilot;
pub use collision::{Aabb, intersects};
pub use input::{Action, InputSnapshot, KeyBindings, TickInput};
pub use spawner::{Spawner, try_fire};
pub use state::{Entity, GameEvent, GamePhase, GameState, Particle};
pub use tick::tick;
