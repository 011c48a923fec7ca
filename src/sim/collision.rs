//! Circle-distance collision checks
//!
//! Everything in the game collides as a circle around its centre. Bullets
//! only test against the orca's own radius; the player uses the sum of
//! both radii.

use glam::Vec2;

use super::orca::Orca;
use super::state::{Bullet, Player};

/// True when two centres are closer than `threshold` (strict)
#[inline]
pub fn within(a: Vec2, b: Vec2, threshold: f32) -> bool {
    a.distance(b) < threshold
}

/// Bullet strikes an orca when it gets inside the orca's radius
#[inline]
pub fn bullet_hits_orca(bullet: &Bullet, orca: &Orca) -> bool {
    within(bullet.pos, orca.pos, orca.size)
}

/// Orca touches the player when the two circles overlap
#[inline]
pub fn player_hits_orca(player: &Player, orca: &Orca) -> bool {
    within(player.pos, orca.pos, player.size + orca.size)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::orca::{OrcaPhase, SpawnEdge};
    use crate::tuning::Tuning;

    fn orca_at(x: f32, y: f32) -> Orca {
        Orca {
            pos: Vec2::new(x, y),
            size: 40.0,
            speed: 2.0,
            dir: Vec2::X,
            active: true,
            spawn_ms: 0.0,
            phase: OrcaPhase::Swimming,
            edge: SpawnEdge::Left,
        }
    }

    #[test]
    fn test_bullet_uses_orca_radius_only() {
        let orca = orca_at(100.0, 100.0);
        let inside = Bullet::new(Vec2::new(139.0, 100.0), Vec2::X, 10.0, 5.0);
        assert!(bullet_hits_orca(&inside, &orca));

        // Would overlap with radius sum 45, but the bullet's size doesn't count
        let grazing = Bullet::new(Vec2::new(142.0, 100.0), Vec2::X, 10.0, 5.0);
        assert!(!bullet_hits_orca(&grazing, &orca));

        let on_edge = Bullet::new(Vec2::new(140.0, 100.0), Vec2::X, 10.0, 5.0);
        assert!(!bullet_hits_orca(&on_edge, &orca));
    }

    #[test]
    fn test_player_uses_radius_sum() {
        let mut player = Player::new(&Tuning::default());
        player.pos = Vec2::new(0.0, 0.0);
        assert!(player_hits_orca(&player, &orca_at(0.0, 59.0)));
        assert!(!player_hits_orca(&player, &orca_at(0.0, 60.0)));
        // Diagonal: 3-4-5 triangle scaled to distance 50
        assert!(player_hits_orca(&player, &orca_at(30.0, 40.0)));
    }
}
