//! Calendar Breakout - knock the events off a calendar page
//!
//! The page script measures every event chip and hands the rectangles over;
//! the chips become bricks, the viewport becomes the arena, and a paddle
//! guards the left edge.
//!
//! Core modules:
//! - `sim`: Deterministic simulation (continuous collision, game state)
//! - `config`: Data-driven game tuning
//! - `web`: wasm-bindgen facade for the page script (wasm32 only)

pub mod config;
pub mod sim;
#[cfg(target_arch = "wasm32")]
pub mod web;

pub use config::{ConfigError, GameConfig};

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (120 Hz for smooth physics)
    pub const SIM_DT: f32 = 1.0 / 120.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Bounces resolved per tick before the rest of the motion is dropped
    pub const MAX_COLLISION_ITERATIONS: u32 = 10;
}
