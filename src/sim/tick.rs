//! Per-frame simulation step
//!
//! Core game loop that advances the simulation one frame. Ordering matters
//! and is fixed: input, bullets, spawner, orcas, guts, then collisions.

use glam::Vec2;

use super::collision::{bullet_hits_orca, player_hits_orca};
use super::guts::{GutsCluster, update_guts};
use super::input::{HeldKeys, TickInput};
use super::orca::{try_spawn, update_orcas};
use super::state::{Bullet, GameEvent, GamePhase, GameState};
use crate::tuning::AimMode;
use crate::{clamp_to_field, within_field};

/// What the host needs after each tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickOutcome {
    pub score: u64,
    pub game_over: bool,
}

/// Advance the game state by one frame at wall-clock time `now_ms`
pub fn tick(state: &mut GameState, input: &TickInput, now_ms: f64) -> TickOutcome {
    state.events.clear();

    if state.phase == GamePhase::GameOver {
        // Frozen until restart; orcas and guts stay where they died
        if input.restart {
            state.restart();
        }
        return outcome(state);
    }

    let elapsed = state.last_tick_ms.map(|last| now_ms - last);
    let scale = state.tuning.time_scaling.frame_scale(elapsed);
    state.last_tick_ms = Some(now_ms);

    apply_input_scaled(state, input, now_ms, scale);
    update_bullets(state, scale);
    try_spawn(state, now_ms);
    update_orcas(state, now_ms, scale);
    update_guts(&mut state.guts, now_ms, scale, &state.tuning, &mut state.rng);
    resolve_bullet_hits(state, now_ms);
    resolve_player_hits(state);

    outcome(state)
}

fn outcome(state: &GameState) -> TickOutcome {
    TickOutcome {
        score: state.score,
        game_over: state.is_game_over(),
    }
}

/// Move the player, keep it on the field and handle the fire key.
/// Returns true if a bullet was fired.
pub fn apply_input(state: &mut GameState, input: &TickInput, now_ms: f64) -> bool {
    apply_input_scaled(state, input, now_ms, 1.0)
}

fn apply_input_scaled(
    state: &mut GameState,
    input: &TickInput,
    now_ms: f64,
    scale: f32,
) -> bool {
    let tuning = &state.tuning;
    let player = &mut state.player;

    player.pos += input.held.axis() * player.speed * scale;
    player.pos = clamp_to_field(player.pos, player.size, tuning.field_width, tuning.field_height);

    if !input.fire || !player.can_shoot(now_ms) {
        return false;
    }

    let dir = aim_direction(tuning.aim, &input.held);
    state
        .bullets
        .push(Bullet::new(player.pos, dir, tuning.bullet_speed, tuning.bullet_size));
    player.last_shot_ms = Some(now_ms);
    state.events.push(GameEvent::Shot {
        pos: player.pos,
        dir,
    });
    true
}

/// Unit firing direction for the current aim rule
pub fn aim_direction(aim: AimMode, held: &HeldKeys) -> Vec2 {
    match aim {
        AimMode::Fixed => Vec2::X,
        AimMode::Movement => {
            let axis = held.axis();
            if axis == Vec2::ZERO {
                // Nothing held (or keys cancel): straight up
                Vec2::NEG_Y
            } else {
                axis.normalize()
            }
        }
    }
}

/// Fly bullets and drop the ones past the field edge
fn update_bullets(state: &mut GameState, scale: f32) {
    let (width, height) = (state.tuning.field_width, state.tuning.field_height);
    state.bullets.retain_mut(|bullet| {
        bullet.pos += bullet.dir * bullet.speed * scale;
        bullet.active && within_field(bullet.pos, bullet.size, width, height)
    });
}

/// Bullet vs orca. Newest bullets first; each bullet kills at most one orca.
fn resolve_bullet_hits(state: &mut GameState, now_ms: f64) {
    for i in (0..state.bullets.len()).rev() {
        let bullet = &state.bullets[i];
        let Some(j) = (0..state.orcas.len())
            .rev()
            .find(|&j| bullet_hits_orca(bullet, &state.orcas[j]))
        else {
            continue;
        };

        let orca = state.orcas.remove(j);
        state.bullets.remove(i);
        state.guts.push(GutsCluster::burst(
            orca.pos,
            orca.size,
            now_ms,
            &state.tuning,
            &mut state.rng,
        ));
        state.score += state.tuning.kill_score;
        state.events.push(GameEvent::OrcaKilled { pos: orca.pos });
        log::debug!("Orca harpooned at {:?}, score {}", orca.pos, state.score);
    }
}

/// Player vs orca. The first touch ends the game.
fn resolve_player_hits(state: &mut GameState) {
    if let Some(orca) = state
        .orcas
        .iter()
        .find(|orca| player_hits_orca(&state.player, orca))
    {
        state.phase = GamePhase::GameOver;
        state.events.push(GameEvent::PlayerStruck { pos: orca.pos });
        log::info!("Player struck by an orca; final score {}", state.score);
    }
}
