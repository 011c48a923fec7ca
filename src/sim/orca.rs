//! Orca spawner and lifecycle
//!
//! Orcas surface just outside a field edge, swim in a random direction for
//! a while, then head for the nearest corner and dive. Phases advance on
//! time since spawn and never go backwards:
//!
//! `Emerging -> Swimming -> Submerging -> (culled off-field)`

use glam::Vec2;
use rand::Rng;
use serde::Serialize;
use std::f32::consts::TAU;

use super::state::{GameEvent, GameState};
use crate::direction_from_angle;
use crate::tuning::Tuning;
use crate::within_field;

/// Lifecycle phase of an orca
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub enum OrcaPhase {
    /// Surfacing, heading straight in from its spawn edge
    Emerging,
    /// Roaming in a random direction
    Swimming,
    /// Heading out toward the nearest corner
    Submerging,
}

/// Field edge an orca entered from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SpawnEdge {
    Top,
    Right,
    Bottom,
    Left,
}

impl SpawnEdge {
    pub const ALL: [SpawnEdge; 4] = [
        SpawnEdge::Top,
        SpawnEdge::Right,
        SpawnEdge::Bottom,
        SpawnEdge::Left,
    ];

    /// Unit vector pointing into the field from this edge
    pub fn inward(&self) -> Vec2 {
        match self {
            SpawnEdge::Top => Vec2::Y,
            SpawnEdge::Right => Vec2::NEG_X,
            SpawnEdge::Bottom => Vec2::NEG_Y,
            SpawnEdge::Left => Vec2::X,
        }
    }
}

/// An orca enemy
#[derive(Debug, Clone, Serialize)]
pub struct Orca {
    pub pos: Vec2,
    pub size: f32,
    pub speed: f32,
    pub dir: Vec2,
    pub active: bool,
    pub spawn_ms: f64,
    pub phase: OrcaPhase,
    pub edge: SpawnEdge,
}

impl Orca {
    /// New orca on `edge`, `along` units from the edge's origin corner
    pub fn emerge(edge: SpawnEdge, along: f32, tuning: &Tuning, now_ms: f64) -> Self {
        let offset = tuning.orca_spawn_offset;
        let pos = match edge {
            SpawnEdge::Top => Vec2::new(along, -offset),
            SpawnEdge::Right => Vec2::new(tuning.field_width + offset, along),
            SpawnEdge::Bottom => Vec2::new(along, tuning.field_height + offset),
            SpawnEdge::Left => Vec2::new(-offset, along),
        };
        Self {
            pos,
            size: tuning.orca_size,
            speed: tuning.orca_speed,
            dir: edge.inward(),
            active: true,
            spawn_ms: now_ms,
            phase: OrcaPhase::Emerging,
            edge,
        }
    }

    /// Advance the phase machine (at most one transition per call).
    /// Returns the new phase if it changed.
    pub fn update_phase(
        &mut self,
        now_ms: f64,
        tuning: &Tuning,
        rng: &mut impl Rng,
    ) -> Option<OrcaPhase> {
        let age = now_ms - self.spawn_ms;
        match self.phase {
            OrcaPhase::Emerging if age > tuning.orca_emerge_ms => {
                self.phase = OrcaPhase::Swimming;
                self.dir = direction_from_angle(rng.random_range(0.0..TAU));
                Some(self.phase)
            }
            OrcaPhase::Swimming if age > tuning.orca_submerge_after_ms => {
                self.phase = OrcaPhase::Submerging;
                // Per-axis sign toward the nearer edge; diagonal, not unit length
                let sx = if self.pos.x < tuning.field_width / 2.0 { -1.0 } else { 1.0 };
                let sy = if self.pos.y < tuning.field_height / 2.0 { -1.0 } else { 1.0 };
                self.dir = Vec2::new(sx, sy);
                Some(self.phase)
            }
            _ => None,
        }
    }
}

/// Spawn one orca if the interval has elapsed and the pod isn't full
pub fn try_spawn(state: &mut GameState, now_ms: f64) -> bool {
    let tuning = &state.tuning;
    let interval_ok = state
        .last_spawn_ms
        .is_none_or(|last| now_ms - last >= tuning.orca_spawn_interval_ms);
    if !interval_ok || state.orcas.len() >= tuning.max_orcas {
        return false;
    }

    let edge = SpawnEdge::ALL[state.rng.random_range(0..SpawnEdge::ALL.len())];
    let span = match edge {
        SpawnEdge::Top | SpawnEdge::Bottom => tuning.field_width,
        SpawnEdge::Left | SpawnEdge::Right => tuning.field_height,
    };
    let along = state.rng.random::<f32>() * span;
    let orca = Orca::emerge(edge, along, tuning, now_ms);
    log::debug!("Orca surfacing from {:?} at {:?}", edge, orca.pos);

    state.orcas.push(orca);
    state.last_spawn_ms = Some(now_ms);
    state.events.push(GameEvent::OrcaSpawned { edge });
    true
}

/// Phase transitions, movement and off-field culling for every orca
pub fn update_orcas(state: &mut GameState, now_ms: f64, scale: f32) {
    let tuning = &state.tuning;
    let rng = &mut state.rng;
    let events = &mut state.events;

    state.orcas.retain_mut(|orca| {
        if !orca.active {
            return false;
        }
        if let Some(phase) = orca.update_phase(now_ms, tuning, rng) {
            log::debug!("Orca at {:?} now {:?}", orca.pos, phase);
            events.push(GameEvent::OrcaPhaseChanged { phase });
        }
        orca.pos += orca.dir * orca.speed * scale;
        within_field(
            orca.pos,
            tuning.orca_cull_margin,
            tuning.field_width,
            tuning.field_height,
        )
    });
}
