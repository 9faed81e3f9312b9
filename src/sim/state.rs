//! Game state and core simulation types
//!
//! Everything one play session owns: ball, paddle, walls, bricks, and the
//! score/lives/stage bookkeeping driven by `tick`.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::ball::Ball;
use super::collider::{Collider, Collision, CollisionResponse};
use super::error::PhysicsError;
use super::geometry::{CornerRadii, Rect, RoundedRect, Walls};
use super::stage::{StageLayout, build_bricks};
use crate::config::GameConfig;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Ball resting on the paddle, waiting for a click
    Serve,
    /// Ball in flight
    Playing,
    /// Ball missed the paddle; counting down to the next serve
    BallLost { ticks_left: u32 },
    /// All bricks gone; counting down to the next stage
    StageCleared { ticks_left: u32 },
    /// No lives left
    GameOver,
    /// A physics fault stopped the session
    Halted,
}

/// Things that happened during a tick, drained by the page script
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum GameEvent {
    BallLaunched,
    BrickHit { id: u32, hp_left: u8 },
    BrickDestroyed { id: u32, value: u32 },
    BallLost { lives_left: u8 },
    StageCleared { stage: u32 },
    GameOver { score: u64 },
    /// The per-tick bounce limit cut a tick short
    IterationLimit { bounces: u32 },
}

/// A calendar event turned into a destructible rounded rectangle
#[derive(Debug, Clone, PartialEq)]
pub struct Brick {
    id: u32,
    shape: RoundedRect,
    hp: u8,
    max_hp: u8,
    value: u32,
    destroyed: bool,
}

impl Brick {
    pub fn new(
        id: u32,
        rect: Rect,
        radii: CornerRadii,
        hp: u8,
        value: u32,
        ball_radius: f32,
    ) -> Self {
        Self {
            id,
            shape: RoundedRect::new(rect, radii, ball_radius),
            hp,
            max_hp: hp,
            value,
            destroyed: hp == 0,
        }
    }

    pub fn id(&self) -> u32 {
        self.id
    }

    pub fn rect(&self) -> Rect {
        self.shape.rect()
    }

    pub fn shape(&self) -> &RoundedRect {
        &self.shape
    }

    pub fn hp(&self) -> u8 {
        self.hp
    }

    pub fn max_hp(&self) -> u8 {
        self.max_hp
    }

    /// Points awarded when destroyed
    pub fn value(&self) -> u32 {
        self.value
    }

    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    /// Take one point of damage, reporting the hit (and destruction)
    pub fn take_hit(&mut self, events: &mut Vec<GameEvent>) {
        if self.destroyed {
            return;
        }
        self.hp = self.hp.saturating_sub(1);
        events.push(GameEvent::BrickHit {
            id: self.id,
            hp_left: self.hp,
        });
        if self.hp == 0 {
            self.destroyed = true;
            log::debug!("Brick {} destroyed (+{})", self.id, self.value);
            events.push(GameEvent::BrickDestroyed {
                id: self.id,
                value: self.value,
            });
        }
    }
}

impl Collider for Brick {
    fn detect_collision(
        &self,
        position: Vec2,
        displacement: Vec2,
    ) -> Result<Option<Collision>, PhysicsError> {
        if self.destroyed {
            return Ok(None);
        }
        self.shape.detect_collision(position, displacement)
    }

    fn collide(
        &mut self,
        collision: &Collision,
        velocity: Vec2,
        events: &mut Vec<GameEvent>,
    ) -> Result<CollisionResponse, PhysicsError> {
        self.take_hit(events);
        collision.collide(velocity)
    }
}

/// The player's paddle: slides vertically on a fixed line near the left edge
#[derive(Debug, Clone, PartialEq)]
pub struct Paddle {
    center: Vec2,
    size: Vec2,
    corner_radius: f32,
    margin: f32,
    /// Allowed range for the center's y
    min_y: f32,
    max_y: f32,
    shape: RoundedRect,
}

impl Paddle {
    /// Paddle centered vertically in `viewport`, sitting `config.paddle_margin`
    /// from its left border
    pub fn new(viewport: Rect, config: &GameConfig) -> Self {
        let size = Vec2::new(config.paddle_width, config.paddle_height);
        let x = viewport.left + config.paddle_margin + size.x / 2.0;
        let half_height = size.y / 2.0;
        let (min_y, max_y) = if viewport.height() > size.y {
            (viewport.top + half_height, viewport.bottom - half_height)
        } else {
            let mid = viewport.center().y;
            (mid, mid)
        };
        let center = Vec2::new(x, viewport.center().y);
        let shape =
            Self::build_shape(center, size, config.paddle_corner_radius, config.ball_radius);

        Self {
            center,
            size,
            corner_radius: config.paddle_corner_radius,
            margin: config.ball_radius,
            min_y,
            max_y,
            shape,
        }
    }

    fn build_shape(center: Vec2, size: Vec2, corner_radius: f32, margin: f32) -> RoundedRect {
        RoundedRect::new(
            Rect::from_center(center, size),
            CornerRadii::uniform(corner_radius),
            margin,
        )
    }

    pub fn center(&self) -> Vec2 {
        self.center
    }

    pub fn rect(&self) -> Rect {
        self.shape.rect()
    }

    /// Follow the pointer, clamped so the paddle stays inside the viewport
    pub fn move_to(&mut self, y: f32) {
        if !y.is_finite() {
            return;
        }
        let y = y.clamp(self.min_y, self.max_y);
        if y == self.center.y {
            return;
        }
        self.center.y = y;
        self.shape = Self::build_shape(self.center, self.size, self.corner_radius, self.margin);
    }

    /// Push a point that ended up inside the grown paddle (the paddle jumped
    /// onto the ball) out to the right face
    pub fn eject(&self, point: Vec2) -> Option<Vec2> {
        let bounds = self.shape.bounds();
        if !bounds.contains(point) {
            return None;
        }
        Some(Vec2::new(bounds.right, point.y))
    }

    /// Where a served ball rests: just off the paddle's right face
    pub fn serve_position(&self, ball_radius: f32) -> Vec2 {
        Vec2::new(self.rect().right + ball_radius + 1.0, self.center.y)
    }
}

impl Collider for Paddle {
    fn detect_collision(
        &self,
        position: Vec2,
        displacement: Vec2,
    ) -> Result<Option<Collision>, PhysicsError> {
        self.shape.detect_collision(position, displacement)
    }
}

/// Complete state of one play session
#[derive(Debug, Clone)]
pub struct GameState {
    pub config: GameConfig,
    /// Page geometry the bricks are rebuilt from on every stage
    pub layout: StageLayout,
    /// Current stage (1-based)
    pub stage: u32,
    pub lives: u8,
    pub score: u64,
    /// Simulation tick counter
    pub time_ticks: u64,
    pub phase: GamePhase,
    pub ball: Ball,
    pub paddle: Paddle,
    pub walls: Walls,
    pub bricks: Vec<Brick>,
    /// Events not yet drained by the caller
    pub events: Vec<GameEvent>,
}

impl GameState {
    /// Start a session on the first stage with the ball ready to serve
    pub fn new(config: GameConfig, layout: StageLayout) -> Self {
        let viewport = layout.viewport;
        let paddle = Paddle::new(viewport, &config);
        let walls = Walls::new(viewport, config.ball_radius);
        let bricks = build_bricks(&layout, &config);
        let ball = Ball::new(paddle.serve_position(config.ball_radius), config.ball_radius)
            .with_max_iterations(config.max_collision_iterations);

        log::info!(
            "Stage 1: {} bricks in {}x{} viewport",
            bricks.len(),
            viewport.width(),
            viewport.height()
        );

        Self {
            lives: config.lives,
            config,
            layout,
            stage: 1,
            score: 0,
            time_ticks: 0,
            phase: GamePhase::Serve,
            ball,
            paddle,
            walls,
            bricks,
            events: Vec::new(),
        }
    }

    pub fn viewport(&self) -> Rect {
        self.layout.viewport
    }

    /// Bricks still standing
    pub fn remaining_bricks(&self) -> usize {
        self.bricks.iter().filter(|b| !b.is_destroyed()).count()
    }

    pub fn is_stage_clear(&self) -> bool {
        self.remaining_bricks() == 0
    }

    /// Put the ball back on the paddle, at rest
    pub fn reset_ball(&mut self) {
        self.ball.center = self.paddle.serve_position(self.ball.radius);
        self.ball.velocity = Vec2::ZERO;
    }

    /// Rebuild every brick from the layout for the next stage
    pub fn advance_stage(&mut self) {
        self.stage += 1;
        self.bricks = build_bricks(&self.layout, &self.config);
        self.reset_ball();
        self.phase = GamePhase::Serve;
        log::info!("Stage {}: {} bricks", self.stage, self.bricks.len());
    }

    /// Take the pending events
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}
