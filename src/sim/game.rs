//! Play session controller
//!
//! [`Game`] owns the state of one session plus the pending input, and runs
//! it through a [`FixedStepScheduler`]. The wasm binding and the native demo
//! both drive a `Game`; neither touches the tick or the state directly.

use super::error::PhysicsError;
use super::scheduler::FixedStepScheduler;
use super::stage::StageLayout;
use super::state::{GameEvent, GamePhase, GameState};
use super::tick::{TickInput, tick};
use crate::config::GameConfig;

pub struct Game {
    state: GameState,
    input: TickInput,
    scheduler: FixedStepScheduler,
}

impl Game {
    pub fn new(config: GameConfig, layout: StageLayout) -> Self {
        Self {
            state: GameState::new(config, layout),
            input: TickInput::default(),
            scheduler: FixedStepScheduler::default(),
        }
    }

    /// Begin (or resume) scheduling ticks
    ///
    /// A halted or finished session does not restart.
    pub fn start(&mut self) {
        if matches!(self.state.phase, GamePhase::Halted | GamePhase::GameOver) {
            log::warn!("Not starting a session in phase {:?}", self.state.phase);
            return;
        }
        self.scheduler.start();
    }

    /// Cancel all further ticks
    pub fn stop(&mut self) {
        self.scheduler.stop();
    }

    pub fn is_running(&self) -> bool {
        self.scheduler.is_running()
    }

    /// Advance by one display frame of `frame_dt` seconds
    ///
    /// Returns the number of fixed ticks run.
    pub fn frame(&mut self, frame_dt: f32) -> u32 {
        let Self {
            state,
            input,
            scheduler,
        } = self;

        let steps = scheduler.frame(frame_dt, |dt| {
            let result = tick(state, input, dt);
            // One-shot inputs
            input.launch = false;
            result
        });

        if state.phase == GamePhase::GameOver && scheduler.is_running() {
            scheduler.stop();
        }
        steps
    }

    /// Run exactly one fixed tick, bypassing the scheduler
    pub fn tick(&mut self, dt: f32) -> Result<(), PhysicsError> {
        let result = tick(&mut self.state, &self.input, dt);
        self.input.launch = false;
        result
    }

    /// Pointer moved to page y
    pub fn pointer_moved(&mut self, y: f32) {
        self.input.pointer_y = Some(y);
    }

    /// Click: serve the ball on the next tick
    pub fn click(&mut self) {
        self.input.launch = true;
    }

    pub fn set_autopilot(&mut self, enabled: bool) {
        if self.input.autopilot != enabled {
            log::info!("Autopilot {}", if enabled { "on" } else { "off" });
        }
        self.input.autopilot = enabled;
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        self.state.drain_events()
    }
}
