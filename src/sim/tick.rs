//! Per-frame simulation tick
//!
//! Advances the game state one step. The order of the stages is fixed so
//! that runs are reproducible from the same seed, clock and inputs.

use glam::Vec2;
use rand::Rng;

use super::collision::intersects;
use super::input::TickInput;
use super::spawner::try_fire;
use super::state::{GameEvent, GamePhase, GameState, Particle};
use crate::consts::EXPLOSION_COLOR;

/// Advance the game state by one tick.
///
/// `now_ms` is the frame driver's clock and only gates enemy spawning.
/// Does nothing outside the playing phase.
pub fn tick(state: &mut GameState, input: &TickInput, now_ms: f64) {
    if state.phase != GamePhase::Playing {
        return;
    }

    state.time_ticks += 1;

    move_player(state, input);

    if input.fire {
        if let Some(bullet) = try_fire(&state.player, &state.bullets, &state.tuning) {
            state.bullets.push(bullet);
            state.emit(GameEvent::Shoot);
        }
    }

    for bullet in &mut state.bullets {
        bullet.advance();
    }
    state.bullets.retain(|b| b.pos.y > -b.size.y);

    if let Some(enemy) = state
        .spawner
        .try_spawn(now_ms, &state.tuning, &mut state.rng)
    {
        state.enemies.push(enemy);
    }

    let floor = state.tuning.canvas_height;
    for enemy in &mut state.enemies {
        enemy.advance();
    }
    state.enemies.retain(|e| e.pos.y < floor + e.size.y);

    resolve_bullet_hits(state);

    let player = state.player.aabb();
    if state.enemies.iter().any(|e| intersects(&player, &e.aabb())) {
        state.end_run();
        return;
    }

    update_particles(state);
}

/// Apply held movement keys, keeping the ship on the canvas
fn move_player(state: &mut GameState, input: &TickInput) {
    let step = state.tuning.player_step;
    let mut delta = Vec2::ZERO;
    if input.left {
        delta.x -= step;
    }
    if input.right {
        delta.x += step;
    }
    if input.up {
        delta.y -= step;
    }
    if input.down {
        delta.y += step;
    }

    let max = Vec2::new(state.tuning.player_max_x(), state.tuning.player_max_y());
    state.player.pos = (state.player.pos + delta).clamp(Vec2::ZERO, max);
}

/// Destroy enemies struck by bullets.
///
/// Both lists are walked from the back so removals never shift an entity that
/// is still to be visited. A bullet destroys at most one enemy.
fn resolve_bullet_hits(state: &mut GameState) {
    let mut i = state.bullets.len();
    while i > 0 {
        i -= 1;
        let bullet = state.bullets[i].aabb();
        let hit = (0..state.enemies.len())
            .rev()
            .find(|&j| intersects(&bullet, &state.enemies[j].aabb()));

        if let Some(j) = hit {
            let enemy = state.enemies.remove(j);
            state.bullets.remove(i);
            spawn_explosion(state, enemy.center());
            state.emit(GameEvent::Explosion);
            state.score += state.tuning.score_per_kill;
        }
    }
}

/// Burst of particles flying out from `center`
fn spawn_explosion(state: &mut GameState, center: Vec2) {
    let spread = state.tuning.particle_spread;
    let life = state.tuning.particle_life;
    for _ in 0..state.tuning.explosion_particles {
        let vel = Vec2::new(
            (state.rng.random::<f32>() - 0.5) * spread,
            (state.rng.random::<f32>() - 0.5) * spread,
        );
        state.particles.push(Particle {
            pos: center,
            vel,
            life,
            max_life: life,
            color: EXPLOSION_COLOR,
        });
    }
}

/// Drift, drag and fade
fn update_particles(state: &mut GameState) {
    let drag = state.tuning.particle_drag;
    for particle in &mut state.particles {
        particle.pos += particle.vel;
        particle.vel *= drag;
        particle.life = particle.life.saturating_sub(1);
    }
    state.particles.retain(|p| p.life > 0);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::Entity;
    use crate::tuning::Tuning;
    use proptest::prelude::*;

    /// A playing state whose spawner will not fire before `now_ms = 1000`
    fn playing_state() -> GameState {
        let mut state = GameState::new(Tuning::default(), 12345);
        state.start();
        state.drain_events();
        state
    }

    fn enemy_at(x: f32, y: f32, vy: f32) -> Entity {
        Entity::new(Vec2::new(x, y), Vec2::new(30.0, 30.0), Vec2::new(0.0, vy))
    }

    fn bullet_at(x: f32, y: f32) -> Entity {
        Entity::new(Vec2::new(x, y), Vec2::new(4.0, 10.0), Vec2::new(0.0, -12.0))
    }

    #[test]
    fn test_tick_ignored_outside_playing() {
        let mut state = GameState::new(Tuning::default(), 1);
        let input = TickInput {
            fire: true,
            left: true,
            ..Default::default()
        };
        tick(&mut state, &input, 5000.0);
        assert_eq!(state.time_ticks, 0);
        assert!(state.bullets.is_empty());
        assert!(state.enemies.is_empty());
        assert_eq!(state.player.pos, Vec2::new(400.0, 500.0));
    }

    #[test]
    fn test_idle_tick_leaves_player_in_place() {
        let mut state = playing_state();
        let before = state.player.pos;
        tick(&mut state, &TickInput::default(), 10.0);
        assert_eq!(state.player.pos, before);
        assert!(state.events.is_empty());
    }

    #[test]
    fn test_movement_steps_and_clamps() {
        let mut state = playing_state();
        let right = TickInput {
            right: true,
            ..Default::default()
        };
        tick(&mut state, &right, 10.0);
        assert_eq!(state.player.pos.x, 408.0);

        for _ in 0..100 {
            tick(&mut state, &right, 10.0);
        }
        assert_eq!(state.player.pos.x, 760.0);

        let down = TickInput {
            down: true,
            ..Default::default()
        };
        for _ in 0..20 {
            tick(&mut state, &down, 10.0);
        }
        assert_eq!(state.player.pos.y, 560.0);

        // Opposite keys cancel out
        let both = TickInput {
            left: true,
            right: true,
            ..Default::default()
        };
        tick(&mut state, &both, 10.0);
        assert_eq!(state.player.pos.x, 760.0);
    }

    #[test]
    fn test_fire_creates_one_bullet() {
        let mut state = playing_state();
        let fire = TickInput {
            fire: true,
            ..Default::default()
        };
        tick(&mut state, &fire, 10.0);

        assert_eq!(state.bullets.len(), 1);
        let bullet = &state.bullets[0];
        // Spawned at (player.x + 20 - 2, player.y), then moved one tick
        assert_eq!(bullet.pos, Vec2::new(418.0, 500.0 - 12.0));
        assert_eq!(bullet.vel.y, -12.0);
        assert_eq!(state.drain_events(), vec![GameEvent::Shoot]);
    }

    #[test]
    fn test_held_fire_respects_spacing() {
        let mut state = playing_state();
        let fire = TickInput {
            fire: true,
            ..Default::default()
        };
        // Bullets climb 12 per tick; the last must be more than 50 above the
        // player before the next one, so a new bullet every 5 ticks.
        for _ in 0..10 {
            tick(&mut state, &fire, 10.0);
        }
        assert_eq!(state.bullets.len(), 2);
        let shots = state
            .drain_events()
            .into_iter()
            .filter(|e| *e == GameEvent::Shoot)
            .count();
        assert_eq!(shots, 2);
    }

    #[test]
    fn test_bullets_compacted_off_top() {
        let mut state = playing_state();
        state.bullets.push(bullet_at(100.0, 1.0));
        state.bullets.push(bullet_at(200.0, 300.0));
        tick(&mut state, &TickInput::default(), 10.0);
        // y = -11 is fully above the canvas
        assert_eq!(state.bullets.len(), 1);
        assert_eq!(state.bullets[0].pos, Vec2::new(200.0, 288.0));
    }

    #[test]
    fn test_enemies_compacted_off_bottom() {
        let mut state = playing_state();
        state.enemies.push(enemy_at(0.0, 627.0, 4.0));
        state.enemies.push(enemy_at(0.0, 620.0, 4.0));
        tick(&mut state, &TickInput::default(), 10.0);
        assert_eq!(state.enemies.len(), 1);
        assert_eq!(state.enemies[0].pos.y, 624.0);
    }

    #[test]
    fn test_spawn_during_tick() {
        let mut state = playing_state();
        tick(&mut state, &TickInput::default(), 1500.0);
        assert_eq!(state.enemies.len(), 1);
        let enemy = &state.enemies[0];
        // Spawned at y = -30, then advanced once
        assert!(enemy.pos.y >= -28.0 && enemy.pos.y < -25.0);
        assert_eq!(state.spawner.interval_ms, 995.0);
        assert_eq!(state.spawner.last_spawn_ms, 1500.0);
    }

    #[test]
    fn test_bullet_destroys_enemy() {
        let mut state = playing_state();
        // Stationary enemy with a bullet inside it after both move
        state.enemies.push(enemy_at(100.0, 100.0, 0.0));
        state.bullets.push(bullet_at(110.0, 122.0));

        tick(&mut state, &TickInput::default(), 10.0);

        assert!(state.bullets.is_empty());
        assert!(state.enemies.is_empty());
        assert_eq!(state.score, 10);
        assert_eq!(state.drain_events(), vec![GameEvent::Explosion]);
        // 12 created, all still alive after one integration step
        assert_eq!(state.particles.len(), 12);
        for p in &state.particles {
            assert_eq!(p.life, 29);
            assert_eq!(p.max_life, 30);
            assert_eq!(p.color, EXPLOSION_COLOR);
            // Started at the enemy center with speed at most 4 per axis
            assert!((p.pos.x - 115.0).abs() <= 4.0);
            assert!((p.pos.y - 115.0).abs() <= 4.0);
        }
    }

    #[test]
    fn test_bullet_destroys_at_most_one_enemy() {
        let mut state = playing_state();
        // Two overlapping enemies, one bullet through both
        state.enemies.push(enemy_at(100.0, 100.0, 0.0));
        state.enemies.push(enemy_at(105.0, 100.0, 0.0));
        state.bullets.push(bullet_at(110.0, 122.0));

        tick(&mut state, &TickInput::default(), 10.0);

        assert!(state.bullets.is_empty());
        assert_eq!(state.enemies.len(), 1);
        // Reverse iteration takes the most recent enemy first
        assert_eq!(state.enemies[0].pos.x, 100.0);
        assert_eq!(state.score, 10);
    }

    #[test]
    fn test_two_bullets_two_enemies() {
        let mut state = playing_state();
        state.enemies.push(enemy_at(100.0, 100.0, 0.0));
        state.enemies.push(enemy_at(300.0, 100.0, 0.0));
        state.bullets.push(bullet_at(310.0, 122.0));
        state.bullets.push(bullet_at(110.0, 122.0));

        tick(&mut state, &TickInput::default(), 10.0);

        assert!(state.bullets.is_empty());
        assert!(state.enemies.is_empty());
        assert_eq!(state.score, 20);
        assert_eq!(state.particles.len(), 24);
        let explosions = state
            .drain_events()
            .into_iter()
            .filter(|e| *e == GameEvent::Explosion)
            .count();
        assert_eq!(explosions, 2);
    }

    #[test]
    fn test_enemy_hits_player() {
        let mut state = playing_state();
        state.score = 40;
        state.particles.push(Particle {
            pos: Vec2::ZERO,
            vel: Vec2::new(1.0, 1.0),
            life: 5,
            max_life: 30,
            color: EXPLOSION_COLOR,
        });
        state.enemies.push(enemy_at(400.0, 490.0, 0.0));

        tick(&mut state, &TickInput::default(), 10.0);

        assert_eq!(state.phase, GamePhase::GameOver);
        assert_eq!(state.score, 40);
        let events = state.drain_events();
        assert!(events.contains(&GameEvent::GameOver));
        assert!(events.contains(&GameEvent::MusicStop));
        // Tick ended before particle integration
        assert_eq!(state.particles[0].life, 5);
        assert_eq!(state.particles[0].pos, Vec2::ZERO);

        // Further ticks do nothing
        let ticks = state.time_ticks;
        tick(&mut state, &TickInput::default(), 5000.0);
        assert_eq!(state.time_ticks, ticks);
    }

    #[test]
    fn test_bullet_kill_before_player_collision() {
        let mut state = playing_state();
        // Enemy overlapping the player is shot in the same tick
        state.enemies.push(enemy_at(400.0, 490.0, 0.0));
        state.bullets.push(bullet_at(410.0, 512.0));

        tick(&mut state, &TickInput::default(), 10.0);

        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.score, 10);
    }

    #[test]
    fn test_particles_decay_and_expire() {
        let mut state = playing_state();
        state.particles.push(Particle {
            pos: Vec2::ZERO,
            vel: Vec2::new(1.0, -2.0),
            life: 2,
            max_life: 30,
            color: EXPLOSION_COLOR,
        });

        tick(&mut state, &TickInput::default(), 10.0);
        let p = &state.particles[0];
        assert_eq!(p.pos, Vec2::new(1.0, -2.0));
        assert!((p.vel.x - 0.98).abs() < 1e-6);
        assert!((p.vel.y + 1.96).abs() < 1e-6);
        assert_eq!(p.life, 1);

        tick(&mut state, &TickInput::default(), 10.0);
        assert!(state.particles.is_empty());
    }

    #[test]
    fn test_determinism() {
        let mut state1 = playing_state();
        let mut state2 = playing_state();
        let input = TickInput {
            fire: true,
            ..Default::default()
        };

        let mut now = 0.0;
        for _ in 0..600 {
            now += crate::consts::FRAME_MS;
            tick(&mut state1, &input, now);
            tick(&mut state2, &input, now);
        }

        assert_eq!(state1.score, state2.score);
        assert_eq!(state1.phase, state2.phase);
        assert_eq!(state1.enemies, state2.enemies);
        assert_eq!(state1.bullets, state2.bullets);
        assert_eq!(state1.particles.len(), state2.particles.len());
    }

    fn any_input() -> impl Strategy<Value = TickInput> {
        (any::<bool>(), any::<bool>(), any::<bool>(), any::<bool>(), any::<bool>()).prop_map(
            |(left, right, up, down, fire)| TickInput {
                left,
                right,
                up,
                down,
                fire,
            },
        )
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        #[test]
        fn tick_invariants_hold(
            seed in any::<u64>(),
            inputs in prop::collection::vec(any_input(), 1..400),
        ) {
            let mut state = GameState::new(Tuning::default(), seed);
            state.start();

            let mut now = 0.0;
            let mut last_score = 0;
            for input in &inputs {
                now += crate::consts::FRAME_MS;
                let enemies_before = state.enemies.len();
                tick(&mut state, input, now);

                prop_assert!(state.player.pos.x >= 0.0 && state.player.pos.x <= 760.0);
                prop_assert!(state.player.pos.y >= 0.0 && state.player.pos.y <= 560.0);
                for b in &state.bullets {
                    prop_assert_eq!(b.vel.y, -12.0);
                }
                for e in &state.enemies {
                    prop_assert!(e.vel.y >= 2.0 && e.vel.y < 5.0);
                }

                let gained = state.score - last_score;
                prop_assert_eq!(gained % 10, 0);
                let kills = state
                    .events
                    .iter()
                    .filter(|e| **e == GameEvent::Explosion)
                    .count() as u64;
                prop_assert_eq!(gained, kills * 10);
                if kills > 0 {
                    // At most one spawn per tick, so a kill shows as a net loss
                    prop_assert!(state.enemies.len() < enemies_before + 1);
                }
                last_score = state.score;
                state.events.clear();

                if state.phase == GamePhase::GameOver {
                    break;
                }
            }
        }
    }
}
