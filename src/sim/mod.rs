//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Caller-supplied timestamps only
//! - Seeded RNG only
//! - Stable iteration order (collection order)
//! - No rendering or platform dependencies

pub mod collision;
pub mod guts;
pub mod input;
pub mod orca;
pub mod scenery;
pub mod state;
pub mod tick;

pub use collision::{bullet_hits_orca, player_hits_orca};
pub use guts::{GutsCluster, GutsColor, GutsPiece, GutsShape};
pub use input::{HeldKeys, InputTracker, Key, TickInput};
pub use orca::{Orca, OrcaPhase, SpawnEdge};
pub use scenery::{Scenery, Tent, Tree};
pub use state::{Bullet, GameEvent, GamePhase, GameState, Player};
pub use tick::{TickOutcome, aim_direction, apply_input, tick};
