//! Browser bindings
//!
//! The page owns the canvas, the key listeners and the animation-frame
//! loop. It forwards `KeyboardEvent.key` strings here, calls `frame` once
//! per animation frame and draws from `snapshot_json`.

use wasm_bindgen::prelude::*;

use crate::sim::{GameState, InputTracker, tick};
use crate::tuning::Tuning;

/// One running game, owned by the page
#[wasm_bindgen]
pub struct WebGame {
    state: GameState,
    input: InputTracker,
}

#[wasm_bindgen]
impl WebGame {
    /// Start a game. `seed` of 0 picks one from `Math.random`.
    #[wasm_bindgen(constructor)]
    pub fn new(seed: u64) -> WebGame {
        let seed = if seed == 0 {
            (js_sys::Math::random() * u32::MAX as f64) as u64
        } else {
            seed
        };
        log::info!("Game initialized with seed: {}", seed);
        WebGame {
            state: GameState::new(seed),
            input: InputTracker::new(),
        }
    }

    /// Start a game with a JSON tuning document; falls back to defaults on error
    pub fn with_tuning(seed: u64, tuning_json: &str) -> WebGame {
        let mut game = WebGame::new(seed);
        match Tuning::from_json(tuning_json) {
            Ok(tuning) => game.state = GameState::with_tuning(game.state.seed, tuning),
            Err(e) => log::warn!("Ignoring tuning: {}", e),
        }
        game
    }

    pub fn key_down(&mut self, key: &str) -> bool {
        self.input.key_down(key)
    }

    pub fn key_up(&mut self, key: &str) -> bool {
        self.input.key_up(key)
    }

    /// Window lost focus: forget held keys
    pub fn blur(&mut self) {
        self.input.release_all();
    }

    /// Advance one frame. `now_ms` of 0 or less uses `Date.now()`.
    /// Returns true once the game is over.
    pub fn frame(&mut self, now_ms: f64) -> bool {
        let now_ms = if now_ms > 0.0 { now_ms } else { js_sys::Date::now() };
        let input = self.input.take_input();
        tick(&mut self.state, &input, now_ms).game_over
    }

    pub fn score(&self) -> u64 {
        self.state.score
    }

    pub fn orcas_destroyed(&self) -> u64 {
        self.state.orcas_destroyed()
    }

    pub fn is_game_over(&self) -> bool {
        self.state.is_game_over()
    }

    pub fn field_width(&self) -> f32 {
        self.state.tuning.field_width
    }

    pub fn field_height(&self) -> f32 {
        self.state.tuning.field_height
    }

    /// Full state for the renderer (entities, scenery, score, events)
    pub fn snapshot_json(&self) -> String {
        match serde_json::to_string(&self.state) {
            Ok(json) => json,
            Err(e) => {
                log::error!("Snapshot failed: {}", e);
                String::from("{}")
            }
        }
    }
}

#[wasm_bindgen(start)]
pub fn wasm_start() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Info).is_err() {
        // Logger already installed (module re-instantiated)
        return;
    }
    log::info!("Orca Hunt starting...");
}
