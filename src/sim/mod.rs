//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only (layout generation)
//! - Stable collider order: paddle, walls, then bricks in layout order
//! - No rendering or platform dependencies

pub mod ball;
pub mod collider;
pub mod error;
pub mod game;
pub mod geometry;
pub mod intersect;
pub mod scheduler;
pub mod stage;
pub mod state;
pub mod tick;
pub mod vector;

pub use ball::{Ball, StepReport};
pub use collider::{
    Boundary, ClosestHit, Collider, Collision, CollisionResponse, Corner, Edge,
    detect_closest_collision,
};
pub use error::PhysicsError;
pub use game::Game;
pub use geometry::{CornerRadii, Rect, RoundedRect, Walls};
pub use intersect::{circle_intersection, segment_intersection};
pub use scheduler::FixedStepScheduler;
pub use stage::{BrickSpec, StageLayout, build_bricks, generate_calendar_layout};
pub use state::{Brick, GameEvent, GamePhase, GameState, Paddle};
pub use tick::{TickInput, tick};
pub use vector::reflect;
