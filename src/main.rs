//! Orca Hunt entry point
//!
//! On the web the page drives `orca_hunt::web::WebGame`; natively this runs a
//! headless autopilot session, handy for smoke-testing tuning files.

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use std::path::PathBuf;

    use clap::Parser;
    use glam::Vec2;

    use orca_hunt::{AimMode, Tuning};
    use orca_hunt::sim::{GameEvent, GameState, HeldKeys, TickInput, tick};

    #[derive(Parser)]
    #[command(name = "orca-hunt")]
    #[command(about = "Run a headless Orca Hunt session with a simple autopilot")]
    struct Args {
        /// RNG seed for the run
        #[arg(long, default_value_t = 12345)]
        seed: u64,
        /// Number of frames to simulate
        #[arg(long, default_value_t = 60 * 60)]
        frames: u32,
        /// Wall-clock length of one frame in milliseconds
        #[arg(long, default_value_t = 1000.0 / 60.0)]
        frame_ms: f64,
        /// JSON tuning file (missing fields take defaults)
        #[arg(long)]
        tuning: Option<PathBuf>,
        /// Override the aim rule: `movement` or `fixed`
        #[arg(long, value_parser = parse_aim)]
        aim: Option<AimMode>,
    }

    fn parse_aim(s: &str) -> Result<AimMode, String> {
        AimMode::from_str(s).ok_or_else(|| format!("unknown aim mode `{s}` (movement, fixed)"))
    }

    /// Keep away from close orcas, otherwise close in and shoot
    const FLEE_DISTANCE: f32 = 180.0;
    /// Ignore axis offsets smaller than this when steering
    const DEADZONE: f32 = 8.0;

    fn autopilot(state: &GameState) -> TickInput {
        let player = state.player.pos;
        let Some(target) = state
            .orcas
            .iter()
            .map(|o| o.pos)
            .min_by(|a, b| a.distance(player).total_cmp(&b.distance(player)))
        else {
            return TickInput::default();
        };

        let mut to_target = target - player;
        let fleeing = to_target.length() < FLEE_DISTANCE;
        if fleeing {
            to_target = -to_target;
        }
        let held = steer(to_target);
        TickInput {
            held,
            fire: !fleeing && held.any(),
            restart: false,
        }
    }

    fn steer(toward: Vec2) -> HeldKeys {
        HeldKeys {
            up: toward.y < -DEADZONE,
            down: toward.y > DEADZONE,
            left: toward.x < -DEADZONE,
            right: toward.x > DEADZONE,
        }
    }

    pub fn run() -> anyhow::Result<()> {
        env_logger::init();
        let args = Args::parse();

        let mut tuning = match &args.tuning {
            Some(path) => Tuning::load(path)?,
            None => Tuning::default(),
        };
        if let Some(aim) = args.aim {
            tuning.aim = aim;
        }
        log::info!(
            "Orca Hunt (headless) seed {} for {} frames, aim {}",
            args.seed,
            args.frames,
            tuning.aim.as_str()
        );

        let mut state = GameState::with_tuning(args.seed, tuning);
        let mut kills = 0u32;
        let mut shots = 0u32;
        let mut ended_at = None;

        for frame in 0..args.frames {
            let now = frame as f64 * args.frame_ms;
            let input = autopilot(&state);
            let outcome = tick(&mut state, &input, now);

            for event in &state.events {
                match event {
                    GameEvent::Shot { .. } => shots += 1,
                    GameEvent::OrcaKilled { pos } => {
                        kills += 1;
                        log::info!("Frame {}: orca down at ({:.0}, {:.0})", frame, pos.x, pos.y);
                    }
                    other => log::debug!("Frame {}: {:?}", frame, other),
                }
            }

            if outcome.game_over {
                ended_at = Some(frame);
                break;
            }
        }

        println!();
        println!("=== RUN SUMMARY ===");
        println!("  Seed:       {}", args.seed);
        println!("  Score:      {}", state.score);
        println!("  Orcas:      {} ({} kills seen)", state.orcas_destroyed(), kills);
        println!("  Shots:      {}", shots);
        match ended_at {
            Some(frame) => println!("  Result:     struck on frame {}", frame),
            None => println!("  Result:     survived {} frames", args.frames),
        }
        Ok(())
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn test_aim_flag() {
            let args = Args::try_parse_from(["orca-hunt", "--aim", "Fixed"]).unwrap();
            assert_eq!(args.aim, Some(AimMode::Fixed));

            let args = Args::try_parse_from(["orca-hunt"]).unwrap();
            assert_eq!(args.aim, None);

            assert!(Args::try_parse_from(["orca-hunt", "--aim", "sideways"]).is_err());
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> anyhow::Result<()> {
    headless::run()
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is orca_hunt::web::wasm_start, this is just to satisfy the compiler
}
