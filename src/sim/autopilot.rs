//! Idle/demo mode - a simple AI that plays the game
//!
//! Produces the same [`TickInput`] a keyboard would, so demo runs go through
//! the normal tick.

use super::input::TickInput;
use super::state::{Entity, GameState};

/// How far above the ship an enemy counts as an incoming threat
const THREAT_RANGE: f32 = 160.0;
/// Extra horizontal clearance kept around the ship when dodging
const DODGE_MARGIN: f32 = 12.0;

/// Choose input for the next tick: hold fire, dodge anything about to land on
/// the ship, otherwise line up under the lowest enemy.
pub fn autopilot(state: &GameState) -> TickInput {
    let player = &state.player;
    let mut input = TickInput {
        fire: true,
        ..Default::default()
    };

    // Drift back to the starting row if the ship has wandered
    let home_y = state.tuning.player_start.y.min(state.tuning.player_max_y());
    if player.pos.y < home_y {
        input.down = true;
    }

    let center_x = player.center().x;

    if let Some(threat) = state
        .enemies
        .iter()
        .filter(|e| is_threat(player, e))
        .max_by(|a, b| a.pos.y.total_cmp(&b.pos.y))
    {
        let room_left = threat.pos.x;
        let room_right = state.tuning.canvas_width - (threat.pos.x + threat.size.x);
        if room_left > room_right {
            input.left = true;
        } else {
            input.right = true;
        }
        return input;
    }

    // Target the lowest enemy still above the ship
    if let Some(target) = state
        .enemies
        .iter()
        .filter(|e| e.pos.y + e.size.y < player.pos.y)
        .max_by(|a, b| a.pos.y.total_cmp(&b.pos.y))
    {
        let dx = target.center().x - center_x;
        let step = state.tuning.player_step;
        if dx > step / 2.0 {
            input.right = true;
        } else if dx < -step / 2.0 {
            input.left = true;
        }
    }

    input
}

/// An enemy in the ship's column, close enough that it may land on it
fn is_threat(player: &Entity, enemy: &Entity) -> bool {
    let overlaps_column = enemy.pos.x < player.pos.x + player.size.x + DODGE_MARGIN
        && enemy.pos.x + enemy.size.x > player.pos.x - DODGE_MARGIN;
    let gap = player.pos.y - (enemy.pos.y + enemy.size.y);
    overlaps_column && gap < THREAT_RANGE && enemy.pos.y < player.pos.y + player.size.y
}
