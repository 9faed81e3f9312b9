//! wasm-bindgen facade for the page script
//!
//! The script measures the calendar, builds the layout JSON, and then calls
//! `frame` from `requestAnimationFrame`. Drawing stays on the JS side: it
//! reads positions back after each frame and drains events for the HUD and
//! for fading out destroyed chips.

use wasm_bindgen::prelude::*;

use crate::config::GameConfig;
use crate::consts::SIM_DT;
use crate::sim::{Game, StageLayout};

#[wasm_bindgen(start)]
pub fn wasm_start() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Info).is_err() {
        // Logger already installed by an earlier module instance
        return;
    }
    log::info!("Calendar Breakout loaded");
}

#[wasm_bindgen]
pub struct WebGame {
    game: Game,
    last_time: f64,
}

#[wasm_bindgen]
impl WebGame {
    /// Build a session from config and layout JSON; an empty config string
    /// uses the defaults
    #[wasm_bindgen(constructor)]
    pub fn new(config_json: &str, layout_json: &str) -> Result<WebGame, JsError> {
        let config = if config_json.trim().is_empty() {
            GameConfig::default()
        } else {
            GameConfig::from_json(config_json)?
        };
        let layout = StageLayout::from_json(layout_json)?;

        let mut game = Game::new(config, layout);
        game.start();
        Ok(WebGame {
            game,
            last_time: 0.0,
        })
    }

    /// Advance to the `requestAnimationFrame` timestamp (milliseconds)
    ///
    /// Returns false once the session has stopped.
    pub fn frame(&mut self, timestamp_ms: f64) -> bool {
        let dt = if self.last_time > 0.0 {
            ((timestamp_ms - self.last_time) / 1000.0) as f32
        } else {
            SIM_DT
        };
        self.last_time = timestamp_ms;

        self.game.frame(dt);
        self.game.is_running()
    }

    pub fn pointer_move(&mut self, y: f32) {
        self.game.pointer_moved(y);
    }

    pub fn click(&mut self) {
        self.game.click();
    }

    pub fn set_autopilot(&mut self, enabled: bool) {
        self.game.set_autopilot(enabled);
    }

    pub fn stop(&mut self) {
        self.game.stop();
    }

    pub fn ball_x(&self) -> f32 {
        self.game.state().ball.center.x
    }

    pub fn ball_y(&self) -> f32 {
        self.game.state().ball.center.y
    }

    pub fn ball_radius(&self) -> f32 {
        self.game.state().ball.radius
    }

    /// Top of the paddle in page coordinates
    pub fn paddle_top(&self) -> f32 {
        self.game.state().paddle.rect().top
    }

    pub fn score(&self) -> f64 {
        self.game.state().score as f64
    }

    pub fn lives(&self) -> u8 {
        self.game.state().lives
    }

    pub fn stage(&self) -> u32 {
        self.game.state().stage
    }

    /// Current phase as JSON (`"Serve"`, `{"BallLost":{"ticks_left":12}}`, ...)
    pub fn phase(&self) -> Result<String, JsError> {
        Ok(serde_json::to_string(&self.game.state().phase)?)
    }

    /// Events since the last call, as a JSON array
    pub fn take_events_json(&mut self) -> Result<String, JsError> {
        let events = self.game.drain_events();
        Ok(serde_json::to_string(&events)?)
    }
}
