//! Fixed timestep scheduler
//!
//! Turns variable frame times into a whole number of simulation steps.
//! Leftover time carries over to the next frame; a slow frame runs at most
//! `max_substeps` steps and drops the rest instead of spiralling.

use super::error::PhysicsError;
use crate::consts::{MAX_SUBSTEPS, SIM_DT};

/// Longest frame we try to catch up on, in seconds
const MAX_FRAME_DT: f32 = 0.1;

#[derive(Debug, Clone)]
pub struct FixedStepScheduler {
    accumulator: f32,
    running: bool,
    step: f32,
    max_substeps: u32,
}

impl Default for FixedStepScheduler {
    fn default() -> Self {
        Self::new(SIM_DT, MAX_SUBSTEPS)
    }
}

impl FixedStepScheduler {
    pub fn new(step: f32, max_substeps: u32) -> Self {
        Self {
            accumulator: 0.0,
            running: false,
            step,
            max_substeps,
        }
    }

    pub fn step(&self) -> f32 {
        self.step
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn start(&mut self) {
        if !self.running {
            log::debug!("Scheduler started");
        }
        self.running = true;
        self.accumulator = 0.0;
    }

    pub fn stop(&mut self) {
        if self.running {
            log::debug!("Scheduler stopped");
        }
        self.running = false;
        self.accumulator = 0.0;
    }

    /// Feed one frame's elapsed time and run the steps it pays for
    ///
    /// Returns the number of steps run. A failing step stops the scheduler;
    /// no further steps run until [`start`](Self::start) is called again.
    pub fn frame(
        &mut self,
        frame_dt: f32,
        mut step: impl FnMut(f32) -> Result<(), PhysicsError>,
    ) -> u32 {
        if !self.running {
            return 0;
        }
        if !frame_dt.is_finite() || frame_dt <= 0.0 {
            return 0;
        }

        self.accumulator += frame_dt.min(MAX_FRAME_DT);

        let mut substeps = 0;
        while self.accumulator >= self.step && substeps < self.max_substeps {
            if let Err(err) = step(self.step) {
                log::error!("Simulation halted: {err}");
                self.stop();
                return substeps;
            }
            self.accumulator -= self.step;
            substeps += 1;
        }

        // Still behind after the cap: forget it
        if self.accumulator >= self.step {
            log::trace!("Dropping {:.4}s of simulation time", self.accumulator);
            self.accumulator %= self.step;
        }

        substeps
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_idle_until_started() {
        let mut scheduler = FixedStepScheduler::default();
        let mut calls = 0;
        let steps = scheduler.frame(0.05, |_| {
            calls += 1;
            Ok(())
        });
        assert_eq!(steps, 0);
        assert_eq!(calls, 0);
    }

    #[test]
    fn test_accumulates_partial_frames() {
        let mut scheduler = FixedStepScheduler::new(0.25, 8);
        scheduler.start();

        assert_eq!(scheduler.frame(0.125, |_| Ok(())), 0);
        assert_eq!(scheduler.frame(0.125, |_| Ok(())), 1);
        assert_eq!(scheduler.frame(0.0625, |_| Ok(())), 0);
    }

    #[test]
    fn test_passes_fixed_step() {
        let mut scheduler = FixedStepScheduler::new(0.015625, 8);
        scheduler.start();
        let mut seen = Vec::new();
        let steps = scheduler.frame(0.046875, |dt| {
            seen.push(dt);
            Ok(())
        });
        assert_eq!(steps, 3);
        assert_eq!(seen, vec![0.015625; 3]);
    }

    #[test]
    fn test_substep_cap() {
        let mut scheduler = FixedStepScheduler::new(0.0078125, 4);
        scheduler.start();
        // Long frame: clamped, capped, and the backlog dropped
        assert_eq!(scheduler.frame(5.0, |_| Ok(())), 4);
        assert_eq!(scheduler.frame(0.0078125, |_| Ok(())), 1);
    }

    #[test]
    fn test_error_stops_scheduler() {
        let mut scheduler = FixedStepScheduler::new(0.0625, 8);
        scheduler.start();
        let mut calls = 0;
        let steps = scheduler.frame(1.0, |_| {
            calls += 1;
            if calls == 1 {
                Err(PhysicsError::NonFinite { context: "test" })
            } else {
                Ok(())
            }
        });
        assert_eq!(steps, 0);
        assert_eq!(calls, 1);
        assert!(!scheduler.is_running());
        assert_eq!(scheduler.frame(1.0, |_| Ok(())), 0);
    }

    #[test]
    fn test_rejects_bad_frame_times() {
        let mut scheduler = FixedStepScheduler::default();
        scheduler.start();
        assert_eq!(scheduler.frame(f32::NAN, |_| Ok(())), 0);
        assert_eq!(scheduler.frame(-1.0, |_| Ok(())), 0);
        assert!(scheduler.is_running());
    }
}
