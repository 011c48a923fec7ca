//! Game state and core simulation types
//!
//! Everything the frame step reads or writes lives in [`GameState`]; the
//! presentation layer only ever reads it.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::Serialize;

use super::guts::GutsCluster;
use super::orca::{Orca, OrcaPhase, SpawnEdge};
use super::scenery::Scenery;
use crate::tuning::Tuning;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum GamePhase {
    /// Active gameplay
    Playing,
    /// Player was struck; waiting for a restart
    GameOver,
}

/// Things that happened during a single tick, for sounds and HUD effects
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum GameEvent {
    Shot { pos: Vec2, dir: Vec2 },
    OrcaSpawned { edge: SpawnEdge },
    OrcaPhaseChanged { phase: OrcaPhase },
    OrcaKilled { pos: Vec2 },
    PlayerStruck { pos: Vec2 },
    Restarted,
}

/// The player's sprite
#[derive(Debug, Clone, Serialize)]
pub struct Player {
    pub pos: Vec2,
    /// Collision radius (also the clamp half-extent)
    pub size: f32,
    /// Pixels per frame along each held axis
    pub speed: f32,
    /// When the last bullet left the barrel (None = never)
    pub last_shot_ms: Option<f64>,
    pub shoot_cooldown_ms: f64,
}

impl Player {
    /// Fresh player at the centre of the field
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            pos: Vec2::new(tuning.field_width / 2.0, tuning.field_height / 2.0),
            size: tuning.player_size,
            speed: tuning.player_speed,
            last_shot_ms: None,
            shoot_cooldown_ms: tuning.shoot_cooldown_ms,
        }
    }

    /// Whether the cooldown allows a shot at `now_ms`
    pub fn can_shoot(&self, now_ms: f64) -> bool {
        self.last_shot_ms
            .is_none_or(|last| now_ms - last >= self.shoot_cooldown_ms)
    }
}

/// A player projectile
#[derive(Debug, Clone, Serialize)]
pub struct Bullet {
    pub pos: Vec2,
    /// Unit-length at creation, never renormalized
    pub dir: Vec2,
    pub speed: f32,
    pub size: f32,
    pub active: bool,
}

impl Bullet {
    pub fn new(pos: Vec2, dir: Vec2, speed: f32, size: f32) -> Self {
        Self {
            pos,
            dir,
            speed,
            size,
            active: true,
        }
    }
}

/// Complete game state (deterministic for a given seed and input stream)
#[derive(Debug, Clone, Serialize)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub score: u64,
    pub phase: GamePhase,
    pub player: Player,
    pub bullets: Vec<Bullet>,
    pub orcas: Vec<Orca>,
    /// Cosmetic kill bursts (never collide)
    pub guts: Vec<GutsCluster>,
    pub scenery: Scenery,
    /// Last orca spawn (None = spawn allowed immediately)
    pub last_spawn_ms: Option<f64>,
    /// Timestamp of the previous tick, for elapsed-time scaling
    pub last_tick_ms: Option<f64>,
    /// Events raised by the most recent tick
    pub events: Vec<GameEvent>,
    #[serde(skip)]
    pub tuning: Tuning,
    #[serde(skip)]
    pub(crate) rng: Pcg32,
}

impl GameState {
    /// Create a new game with default tuning
    pub fn new(seed: u64) -> Self {
        Self::with_tuning(seed, Tuning::default())
    }

    /// Create a new game with the given balance settings.
    /// Tuning that fails validation is replaced by the defaults.
    pub fn with_tuning(seed: u64, tuning: Tuning) -> Self {
        let tuning = match tuning.validate() {
            Ok(()) => tuning,
            Err(e) => {
                log::warn!("Ignoring tuning: {}", e);
                Tuning::default()
            }
        };
        let mut rng = Pcg32::seed_from_u64(seed);
        let scenery = Scenery::generate(&tuning, &mut rng);

        Self {
            seed,
            score: 0,
            phase: GamePhase::Playing,
            player: Player::new(&tuning),
            bullets: Vec::new(),
            orcas: Vec::new(),
            guts: Vec::new(),
            scenery,
            last_spawn_ms: None,
            last_tick_ms: None,
            events: Vec::new(),
            tuning,
            rng,
        }
    }

    /// Full reset after a game over. Scenery and the RNG stream carry over.
    pub fn restart(&mut self) {
        self.score = 0;
        self.phase = GamePhase::Playing;
        self.player = Player::new(&self.tuning);
        self.bullets.clear();
        self.orcas.clear();
        self.guts.clear();
        self.last_spawn_ms = None;
        self.last_tick_ms = None;
        self.events.push(GameEvent::Restarted);
        log::info!("Game restarted (seed {})", self.seed);
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    /// Kill counter shown next to the score
    pub fn orcas_destroyed(&self) -> u64 {
        if self.tuning.kill_score == 0 {
            0
        } else {
            self.score / self.tuning.kill_score
        }
    }

    /// Centre of the play field
    pub fn field_center(&self) -> Vec2 {
        Vec2::new(self.tuning.field_width / 2.0, self.tuning.field_height / 2.0)
    }
}
