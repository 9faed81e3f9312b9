//! Fixed timestep simulation tick
//!
//! Advances one session by one step: paddle input, the serve/launch
//! handshake, ball physics, scoring, lost balls and stage transitions.

use glam::Vec2;

use super::collider::Collider;
use super::error::PhysicsError;
use super::state::{GameEvent, GamePhase, GameState};

/// Input commands for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Pointer y in page coordinates (paddle target)
    pub pointer_y: Option<f32>,
    /// Click: launch the ball while serving
    pub launch: bool,
    /// Demo mode - the paddle tracks the ball and serves on its own
    pub autopilot: bool,
}

/// Advance the game state by one fixed timestep
///
/// A physics fault halts the session and is returned to the caller; the
/// ball keeps its last good position.
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) -> Result<(), PhysicsError> {
    if matches!(state.phase, GamePhase::GameOver | GamePhase::Halted) {
        return Ok(());
    }

    let mut input = input.clone();
    if input.autopilot {
        input.pointer_y = Some(state.ball.center.y);
        input.launch = true;
    }

    state.time_ticks += 1;

    if let Some(y) = input.pointer_y {
        state.paddle.move_to(y);
        if state.phase == GamePhase::Playing {
            if let Some(center) = state.paddle.eject(state.ball.center) {
                log::debug!("Paddle moved onto the ball, pushed out to x={:.1}", center.x);
                state.ball.center = center;
            }
        }
    }

    match state.phase {
        GamePhase::Serve => {
            state.reset_ball();
            if input.launch {
                launch(state);
            }
        }

        GamePhase::Playing => {
            if let Err(err) = step_ball(state, dt) {
                state.phase = GamePhase::Halted;
                return Err(err);
            }
            check_ball_lost(state);
            if state.phase == GamePhase::Playing && state.is_stage_clear() {
                log::info!("Stage {} cleared, score {}", state.stage, state.score);
                state.events.push(GameEvent::StageCleared { stage: state.stage });
                state.phase = GamePhase::StageCleared {
                    ticks_left: state.config.stage_clear_delay_ticks,
                };
            }
        }

        GamePhase::BallLost { ticks_left } => {
            if ticks_left > 0 {
                state.phase = GamePhase::BallLost {
                    ticks_left: ticks_left - 1,
                };
            } else if state.lives == 0 {
                log::info!("Game over on stage {} with score {}", state.stage, state.score);
                state.events.push(GameEvent::GameOver { score: state.score });
                state.phase = GamePhase::GameOver;
            } else {
                state.reset_ball();
                state.phase = GamePhase::Serve;
            }
        }

        GamePhase::StageCleared { ticks_left } => {
            if ticks_left > 0 {
                state.phase = GamePhase::StageCleared {
                    ticks_left: ticks_left - 1,
                };
            } else {
                state.advance_stage();
            }
        }

        GamePhase::GameOver | GamePhase::Halted => {}
    }

    Ok(())
}

/// Fire the served ball into the viewport at the stage's speed
fn launch(state: &mut GameState) {
    let angle = state.config.launch_angle_deg.to_radians();
    let speed = state.config.stage_speed(state.stage);
    // Up and to the right (page y grows downward)
    state.ball.velocity = Vec2::new(angle.cos(), -angle.sin()) * speed;
    state.phase = GamePhase::Playing;
    state.events.push(GameEvent::BallLaunched);
}

/// Move the ball through paddle, walls and live bricks, then bank points
fn step_ball(state: &mut GameState, dt: f32) -> Result<(), PhysicsError> {
    let first_new_event = state.events.len();

    {
        let GameState {
            ball,
            paddle,
            walls,
            bricks,
            events,
            ..
        } = state;

        let mut colliders: Vec<&mut dyn Collider> = Vec::with_capacity(bricks.len() + 2);
        colliders.push(paddle);
        colliders.push(walls);
        colliders.extend(
            bricks
                .iter_mut()
                .filter(|b| !b.is_destroyed())
                .map(|b| b as &mut dyn Collider),
        );

        ball.update(&mut colliders, dt, events)?;
    }

    let earned: u64 = state.events[first_new_event..]
        .iter()
        .map(|event| match event {
            GameEvent::BrickDestroyed { value, .. } => u64::from(*value),
            _ => 0,
        })
        .sum();
    state.score += earned;

    Ok(())
}

/// The ball got past the paddle and out the open left side
fn check_ball_lost(state: &mut GameState) {
    let viewport = state.viewport();
    if state.ball.center.x >= viewport.left - state.ball.radius {
        return;
    }
    state.lives = state.lives.saturating_sub(1);
    log::info!("Ball lost, {} lives left", state.lives);
    state.events.push(GameEvent::BallLost {
        lives_left: state.lives,
    });
    state.ball.velocity = Vec2::ZERO;
    state.phase = GamePhase::BallLost {
        ticks_left: state.config.respawn_delay_ticks,
    };
}
