//! Kill burst particles
//!
//! Purely cosmetic. A cluster is stamped out when an orca dies, its pieces
//! fly apart under gravity and drag, and the whole cluster is dropped after
//! a fixed lifetime. Pieces never collide with anything.

use glam::Vec2;
use rand::Rng;
use serde::Serialize;
use std::f32::consts::TAU;

use crate::direction_from_angle;
use crate::tuning::Tuning;

/// Blood palette
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum GutsColor {
    Blood,
    Clot,
}

impl GutsColor {
    pub fn hex(&self) -> &'static str {
        match self {
            GutsColor::Blood => "#8B0000",
            GutsColor::Clot => "#4B0000",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum GutsShape {
    Circle,
    Splat,
}

/// One flying chunk, positioned relative to its cluster
#[derive(Debug, Clone, Serialize)]
pub struct GutsPiece {
    pub offset: Vec2,
    pub size: f32,
    pub rotation: f32,
    /// Launch speed
    pub speed: f32,
    /// Velocity (pixels per frame)
    pub dir: Vec2,
    pub color: GutsColor,
    pub shape: GutsShape,
}

#[derive(Debug, Clone, Serialize)]
pub struct GutsCluster {
    pub pos: Vec2,
    pub size: f32,
    pub rotation: f32,
    pub created_ms: f64,
    pub pieces: Vec<GutsPiece>,
}

impl GutsCluster {
    /// Burst for an orca of `size` dying at `pos`
    pub fn burst(
        pos: Vec2,
        size: f32,
        now_ms: f64,
        tuning: &Tuning,
        rng: &mut impl Rng,
    ) -> Self {
        let count = tuning.guts_pieces;
        let pieces = (0..count)
            .map(|i| {
                let angle = TAU * i as f32 / count as f32;
                let speed = rng.random_range(2.0f32..6.0);
                let piece_size = rng.random_range(0.5f32..1.0) * (size / 3.0);
                let rotation = rng.random_range(0.0..TAU);
                // ±25% jitter on each axis
                let jitter = Vec2::new(
                    rng.random_range(0.75f32..1.25),
                    rng.random_range(0.75f32..1.25),
                );
                let dir = direction_from_angle(angle) * speed * jitter;
                let color = if rng.random_bool(0.5) {
                    GutsColor::Blood
                } else {
                    GutsColor::Clot
                };
                let shape = if rng.random_bool(0.5) {
                    GutsShape::Circle
                } else {
                    GutsShape::Splat
                };
                GutsPiece {
                    offset: Vec2::ZERO,
                    size: piece_size,
                    rotation,
                    speed,
                    dir,
                    color,
                    shape,
                }
            })
            .collect();

        Self {
            pos,
            size,
            rotation: rng.random_range(0.0..TAU),
            created_ms: now_ms,
            pieces,
        }
    }

    /// Whether the cluster has outlived `lifetime_ms` (strictly)
    pub fn expired(&self, now_ms: f64, lifetime_ms: f64) -> bool {
        now_ms - self.created_ms > lifetime_ms
    }

    /// One physics step for every piece: gravity, spin jitter, move, drag
    pub fn step(&mut self, tuning: &Tuning, scale: f32, rng: &mut impl Rng) {
        let drag = tuning.guts_drag.powf(scale);
        for piece in &mut self.pieces {
            piece.dir.y += tuning.guts_gravity * scale;
            piece.rotation += tuning.guts_spin * rng.random_range(-0.5f32..0.5) * scale;
            piece.offset += piece.dir * scale;
            piece.dir *= drag;
        }
    }
}

/// Advance every cluster, then drop the expired ones
pub fn update_guts(
    guts: &mut Vec<GutsCluster>,
    now_ms: f64,
    scale: f32,
    tuning: &Tuning,
    rng: &mut impl Rng,
) {
    for cluster in guts.iter_mut() {
        cluster.step(tuning, scale, rng);
    }
    guts.retain(|cluster| !cluster.expired(now_ms, tuning.guts_lifetime_ms));
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn burst(seed: u64) -> GutsCluster {
        let mut rng = Pcg32::seed_from_u64(seed);
        GutsCluster::burst(
            Vec2::new(200.0, 300.0),
            40.0,
            1000.0,
            &Tuning::default(),
            &mut rng,
        )
    }

    #[test]
    fn test_burst_piece_ranges() {
        let cluster = burst(42);
        assert_eq!(cluster.pieces.len(), 15);
        assert_eq!(cluster.pos, Vec2::new(200.0, 300.0));
        for (i, piece) in cluster.pieces.iter().enumerate() {
            assert_eq!(piece.offset, Vec2::ZERO);
            assert!(piece.speed >= 2.0 && piece.speed < 6.0);
            // size/3 = 13.33
            assert!(piece.size >= 0.5 * 40.0 / 3.0 && piece.size < 40.0 / 3.0);
            assert!(piece.rotation >= 0.0 && piece.rotation < TAU);

            // Velocity stays within the jittered envelope of its spoke
            let angle = TAU * i as f32 / 15.0;
            let nominal = direction_from_angle(angle) * piece.speed;
            assert!(piece.dir.x.abs() <= nominal.x.abs() * 1.25 + 1e-4);
            assert!(piece.dir.y.abs() <= nominal.y.abs() * 1.25 + 1e-4);
        }
    }

    #[test]
    fn test_step_applies_gravity_then_moves_then_drags() {
        let mut cluster = burst(1);
        cluster.pieces.truncate(1);
        cluster.pieces[0].dir = Vec2::new(2.0, 0.0);
        let mut rng = Pcg32::seed_from_u64(9);

        cluster.step(&Tuning::default(), 1.0, &mut rng);

        let piece = &cluster.pieces[0];
        assert!((piece.offset.x - 2.0).abs() < 1e-6);
        assert!((piece.offset.y - 0.1).abs() < 1e-6);
        assert!((piece.dir.x - 1.96).abs() < 1e-6);
        assert!((piece.dir.y - 0.098).abs() < 1e-6);
    }

    #[test]
    fn test_spin_jitter_is_small() {
        let mut cluster = burst(2);
        let before: Vec<f32> = cluster.pieces.iter().map(|p| p.rotation).collect();
        let mut rng = Pcg32::seed_from_u64(4);
        cluster.step(&Tuning::default(), 1.0, &mut rng);
        for (piece, old) in cluster.pieces.iter().zip(before) {
            assert!((piece.rotation - old).abs() <= 0.025 + 1e-6);
        }
    }

    #[test]
    fn test_lifetime_boundary() {
        let tuning = Tuning::default();
        let mut rng = Pcg32::seed_from_u64(5);
        let mut guts = vec![burst(3)];

        update_guts(&mut guts, 1000.0 + 2999.0, 1.0, &tuning, &mut rng);
        assert_eq!(guts.len(), 1);
        update_guts(&mut guts, 1000.0 + 3000.0, 1.0, &tuning, &mut rng);
        assert_eq!(guts.len(), 1);
        update_guts(&mut guts, 1000.0 + 3001.0, 1.0, &tuning, &mut rng);
        assert!(guts.is_empty());
    }

    #[test]
    fn test_palette() {
        assert_eq!(GutsColor::Blood.hex(), "#8B0000");
        assert_eq!(GutsColor::Clot.hex(), "#4B0000");
    }
}
