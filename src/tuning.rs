//! Data-driven game balance
//!
//! Every knob the simulation reads lives here. Defaults reproduce the
//! canonical game; a JSON file can override any subset of fields.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// How a fired bullet picks its direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum AimMode {
    /// Aim along the held movement keys; straight up when none are held
    #[default]
    Movement,
    /// Always fire along +x
    Fixed,
}

impl AimMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            AimMode::Movement => "Movement",
            AimMode::Fixed => "Fixed",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "movement" | "move" => Some(AimMode::Movement),
            "fixed" => Some(AimMode::Fixed),
            _ => None,
        }
    }
}

/// How per-frame increments relate to wall-clock time
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub enum TimeScaling {
    /// Every step applies one fixed increment (speed follows the refresh rate)
    #[default]
    PerFrame,
    /// Increments are scaled by `elapsed / reference_frame_ms`
    Elapsed {
        reference_frame_ms: f64,
        max_frame_ms: f64,
    },
}

impl TimeScaling {
    /// Elapsed-time scaling at the default 60 Hz reference
    pub fn elapsed() -> Self {
        TimeScaling::Elapsed {
            reference_frame_ms: REFERENCE_FRAME_MS,
            max_frame_ms: MAX_FRAME_MS,
        }
    }

    /// Step multiplier for a frame that lasted `elapsed_ms` (None on the first frame).
    /// Degenerate frame lengths fall back to 1.0 rather than panicking.
    pub fn frame_scale(&self, elapsed_ms: Option<f64>) -> f32 {
        match (*self, elapsed_ms) {
            (TimeScaling::PerFrame, _) | (_, None) => 1.0,
            (
                TimeScaling::Elapsed {
                    reference_frame_ms,
                    max_frame_ms,
                },
                Some(elapsed),
            ) => {
                if !(reference_frame_ms.is_finite() && reference_frame_ms > 0.0) {
                    return 1.0;
                }
                let capped = elapsed.max(0.0).min(max_frame_ms.max(0.0));
                (capped / reference_frame_ms) as f32
            }
        }
    }
}

/// Static decoration layout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum SceneryLayout {
    /// Three hand-placed trees and the tent
    #[default]
    Fixed,
    /// `trees` randomly placed trees and the tent
    Scattered { trees: usize },
}

/// Game balance knobs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Field ===
    pub field_width: f32,
    pub field_height: f32,

    // === Player ===
    pub player_size: f32,
    pub player_speed: f32,
    pub shoot_cooldown_ms: f64,
    pub aim: AimMode,

    // === Bullets ===
    pub bullet_speed: f32,
    pub bullet_size: f32,

    // === Orcas ===
    pub max_orcas: usize,
    pub orca_spawn_interval_ms: f64,
    pub orca_size: f32,
    pub orca_speed: f32,
    pub orca_spawn_offset: f32,
    pub orca_cull_margin: f32,
    pub orca_emerge_ms: f64,
    pub orca_submerge_after_ms: f64,

    // === Guts ===
    pub guts_pieces: usize,
    pub guts_lifetime_ms: f64,
    pub guts_gravity: f32,
    pub guts_drag: f32,
    pub guts_spin: f32,

    // === Scoring / pacing ===
    pub kill_score: u64,
    pub time_scaling: TimeScaling,
    pub scenery: SceneryLayout,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            field_width: FIELD_WIDTH,
            field_height: FIELD_HEIGHT,

            player_size: PLAYER_SIZE,
            player_speed: PLAYER_SPEED,
            shoot_cooldown_ms: SHOOT_COOLDOWN_MS,
            aim: AimMode::Movement,

            bullet_speed: BULLET_SPEED,
            bullet_size: BULLET_SIZE,

            max_orcas: MAX_ORCAS,
            orca_spawn_interval_ms: ORCA_SPAWN_INTERVAL_MS,
            orca_size: ORCA_SIZE,
            orca_speed: ORCA_SPEED,
            orca_spawn_offset: ORCA_SPAWN_OFFSET,
            orca_cull_margin: ORCA_CULL_MARGIN,
            orca_emerge_ms: ORCA_EMERGE_MS,
            orca_submerge_after_ms: ORCA_SUBMERGE_AFTER_MS,

            guts_pieces: GUTS_PIECES,
            guts_lifetime_ms: GUTS_LIFETIME_MS,
            guts_gravity: GUTS_GRAVITY,
            guts_drag: GUTS_DRAG,
            guts_spin: GUTS_SPIN,

            kill_score: KILL_SCORE,
            time_scaling: TimeScaling::PerFrame,
            scenery: SceneryLayout::Fixed,
        }
    }
}

/// Errors from loading or validating a tuning file
#[derive(Debug)]
pub enum TuningError {
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    Parse(serde_json::Error),
    Invalid {
        field: &'static str,
        reason: &'static str,
    },
}

impl fmt::Display for TuningError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "cannot read tuning file {}: {source}", path.display())
            }
            Self::Parse(e) => write!(f, "malformed tuning JSON: {e}"),
            Self::Invalid { field, reason } => write!(f, "invalid tuning `{field}`: {reason}"),
        }
    }
}

impl std::error::Error for TuningError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Parse(e) => Some(e),
            Self::Invalid { .. } => None,
        }
    }
}

impl From<serde_json::Error> for TuningError {
    fn from(e: serde_json::Error) -> Self {
        Self::Parse(e)
    }
}

impl Tuning {
    /// Parse and validate a JSON tuning document (missing fields take defaults)
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Load and validate a tuning file from disk
    pub fn load(path: impl AsRef<Path>) -> Result<Self, TuningError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| TuningError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let tuning = Self::from_json(&json)?;
        log::info!("Loaded tuning from {}", path.display());
        Ok(tuning)
    }

    pub fn to_json(&self) -> Result<String, TuningError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Reject values that would break simulation invariants
    pub fn validate(&self) -> Result<(), TuningError> {
        fn non_negative(field: &'static str, v: f64) -> Result<(), TuningError> {
            if v.is_finite() && v >= 0.0 {
                Ok(())
            } else {
                Err(TuningError::Invalid {
                    field,
                    reason: "must be a finite, non-negative number",
                })
            }
        }

        non_negative("player_size", self.player_size as f64)?;
        non_negative("player_speed", self.player_speed as f64)?;
        non_negative("shoot_cooldown_ms", self.shoot_cooldown_ms)?;
        non_negative("bullet_speed", self.bullet_speed as f64)?;
        non_negative("bullet_size", self.bullet_size as f64)?;
        non_negative("orca_spawn_interval_ms", self.orca_spawn_interval_ms)?;
        non_negative("orca_size", self.orca_size as f64)?;
        non_negative("orca_speed", self.orca_speed as f64)?;
        non_negative("orca_spawn_offset", self.orca_spawn_offset as f64)?;
        non_negative("orca_cull_margin", self.orca_cull_margin as f64)?;
        non_negative("orca_emerge_ms", self.orca_emerge_ms)?;
        non_negative("guts_lifetime_ms", self.guts_lifetime_ms)?;
        non_negative("guts_gravity", self.guts_gravity as f64)?;
        non_negative("guts_spin", self.guts_spin as f64)?;

        let diameter = 2.0 * self.player_size;
        if !self.field_width.is_finite() || self.field_width <= diameter {
            return Err(TuningError::Invalid {
                field: "field_width",
                reason: "must exceed the player's diameter",
            });
        }
        if !self.field_height.is_finite() || self.field_height <= diameter {
            return Err(TuningError::Invalid {
                field: "field_height",
                reason: "must exceed the player's diameter",
            });
        }
        if !self.orca_submerge_after_ms.is_finite()
            || self.orca_submerge_after_ms < self.orca_emerge_ms
        {
            return Err(TuningError::Invalid {
                field: "orca_submerge_after_ms",
                reason: "must not precede orca_emerge_ms",
            });
        }
        if !(0.0..=1.0).contains(&self.guts_drag) {
            return Err(TuningError::Invalid {
                field: "guts_drag",
                reason: "must be within [0, 1]",
            });
        }
        if let TimeScaling::Elapsed {
            reference_frame_ms,
            max_frame_ms,
        } = self.time_scaling
        {
            let positive = |v: f64| v.is_finite() && v > 0.0;
            if !positive(reference_frame_ms) || !positive(max_frame_ms) {
                return Err(TuningError::Invalid {
                    field: "time_scaling",
                    reason: "frame lengths must be positive",
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let tuning = Tuning::default();
        assert!(tuning.validate().is_ok());
        assert_eq!(tuning.field_width, 1200.0);
        assert_eq!(tuning.max_orcas, 3);
        assert_eq!(tuning.aim, AimMode::Movement);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let tuning = Tuning::from_json(r#"{ "max_orcas": 5, "aim": "Fixed" }"#).unwrap();
        assert_eq!(tuning.max_orcas, 5);
        assert_eq!(tuning.aim, AimMode::Fixed);
        assert_eq!(tuning.orca_size, ORCA_SIZE);
    }

    #[test]
    fn test_json_roundtrip_preserves_time_scaling() {
        let mut tuning = Tuning::default();
        tuning.time_scaling = TimeScaling::elapsed();
        tuning.scenery = SceneryLayout::Scattered { trees: 5 };
        let parsed = Tuning::from_json(&tuning.to_json().unwrap()).unwrap();
        assert_eq!(parsed, tuning);
    }

    #[test]
    fn test_rejects_negative_speed() {
        let err = Tuning::from_json(r#"{ "orca_speed": -2.0 }"#).unwrap_err();
        assert!(matches!(
            err,
            TuningError::Invalid {
                field: "orca_speed",
                ..
            }
        ));
        assert!(err.to_string().contains("orca_speed"));
    }

    #[test]
    fn test_rejects_field_smaller_than_player() {
        let err = Tuning::from_json(r#"{ "field_width": 30.0 }"#).unwrap_err();
        assert!(matches!(
            err,
            TuningError::Invalid {
                field: "field_width",
                ..
            }
        ));
    }

    #[test]
    fn test_malformed_json_is_parse_error() {
        let err = Tuning::from_json("{ not json").unwrap_err();
        assert!(matches!(err, TuningError::Parse(_)));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = Tuning::load("/definitely/not/here/tuning.json").unwrap_err();
        assert!(matches!(err, TuningError::Io { .. }));
    }

    #[test]
    fn test_frame_scale() {
        assert_eq!(TimeScaling::PerFrame.frame_scale(Some(33.0)), 1.0);
        let elapsed = TimeScaling::Elapsed {
            reference_frame_ms: 10.0,
            max_frame_ms: 50.0,
        };
        assert_eq!(elapsed.frame_scale(None), 1.0);
        assert!((elapsed.frame_scale(Some(20.0)) - 2.0).abs() < 1e-6);
        // Long stalls are capped
        assert!((elapsed.frame_scale(Some(500.0)) - 5.0).abs() < 1e-6);
        // Clock going backwards never moves things in reverse
        assert_eq!(elapsed.frame_scale(Some(-30.0)), 0.0);
    }

    #[test]
    fn test_frame_scale_survives_degenerate_lengths() {
        let negative_cap = TimeScaling::Elapsed {
            reference_frame_ms: 16.0,
            max_frame_ms: -1.0,
        };
        assert_eq!(negative_cap.frame_scale(Some(16.0)), 0.0);

        let nan_cap = TimeScaling::Elapsed {
            reference_frame_ms: 16.0,
            max_frame_ms: f64::NAN,
        };
        assert!(nan_cap.frame_scale(Some(16.0)).is_finite());

        for reference_frame_ms in [0.0, -5.0, f64::NAN] {
            let scaling = TimeScaling::Elapsed {
                reference_frame_ms,
                max_frame_ms: 100.0,
            };
            assert_eq!(scaling.frame_scale(Some(16.0)), 1.0);
        }
    }

    #[test]
    fn test_rejects_infinite_field() {
        let tuning = Tuning {
            field_height: f32::INFINITY,
            ..Default::default()
        };
        assert!(matches!(
            tuning.validate(),
            Err(TuningError::Invalid {
                field: "field_height",
                ..
            })
        ));
    }

    #[test]
    fn test_rejects_nan_submerge_time() {
        let tuning = Tuning {
            orca_submerge_after_ms: f64::NAN,
            ..Default::default()
        };
        assert!(matches!(
            tuning.validate(),
            Err(TuningError::Invalid {
                field: "orca_submerge_after_ms",
                ..
            })
        ));
    }

    #[test]
    fn test_aim_mode_from_str() {
        assert_eq!(AimMode::from_str("FIXED"), Some(AimMode::Fixed));
        assert_eq!(AimMode::from_str("move"), Some(AimMode::Movement));
        assert_eq!(AimMode::from_str("sideways"), None);
        assert_eq!(AimMode::Fixed.as_str(), "Fixed");
    }
}
