//! The ball and its per-tick motion
//!
//! One tick moves the ball by `velocity * dt`, bouncing as many times as
//! that displacement requires. Each bounce stops the ball at the contact
//! point, reflects what is left of the displacement, and queries the same
//! colliders again from there.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collider::{ClosestHit, Collider, detect_closest_collision};
use super::error::PhysicsError;
use super::state::GameEvent;
use super::vector::ensure_finite;
use crate::consts::MAX_COLLISION_ITERATIONS;

/// The ball (a point after Minkowski expansion of every obstacle)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ball {
    pub center: Vec2,
    /// Pixels per second
    pub velocity: Vec2,
    pub radius: f32,
    /// Bounces resolved within one tick before giving up on the rest
    pub max_iterations: u32,
}

/// What happened during one [`Ball::update`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StepReport {
    pub bounces: u32,
    /// The iteration bound was hit and the remaining displacement dropped
    pub truncated: bool,
}

impl Ball {
    pub fn new(center: Vec2, radius: f32) -> Self {
        Self {
            center,
            velocity: Vec2::ZERO,
            radius,
            max_iterations: MAX_COLLISION_ITERATIONS,
        }
    }

    pub fn with_velocity(mut self, velocity: Vec2) -> Self {
        self.velocity = velocity;
        self
    }

    pub fn with_max_iterations(mut self, max_iterations: u32) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// Advance the ball by one tick against `colliders`
    ///
    /// The struck collider's `collide` runs once per contact, so brick
    /// damage is applied exactly once per bounce. On a physics fault the
    /// ball is left untouched.
    pub fn update(
        &mut self,
        colliders: &mut [&mut dyn Collider],
        dt: f32,
        events: &mut Vec<GameEvent>,
    ) -> Result<StepReport, PhysicsError> {
        let mut center = self.center;
        let mut velocity = self.velocity;
        let mut displacement = ensure_finite(velocity * dt, "ball displacement")?;
        let mut report = StepReport::default();

        loop {
            let hit =
                detect_closest_collision(colliders.iter().map(|c| &**c), center, displacement)?;
            let Some(ClosestHit { index, collision }) = hit else {
                center += displacement;
                break;
            };

            if report.bounces >= self.max_iterations {
                // Wedged somewhere: stay at the last contact
                log::warn!(
                    "Ball stuck after {} bounces at ({:.2}, {:.2}), dropping rest of tick",
                    report.bounces,
                    center.x,
                    center.y
                );
                events.push(GameEvent::IterationLimit {
                    bounces: report.bounces,
                });
                report.truncated = true;
                break;
            }

            let response = colliders[index].collide(&collision, velocity, events)?;
            center = collision.intersection_point;
            displacement = response.displacement;
            velocity = response.velocity;
            report.bounces += 1;
        }

        self.center = ensure_finite(center, "ball center")?;
        self.velocity = ensure_finite(velocity, "ball velocity")?;
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::collider::{Collision, Edge};
    use crate::sim::geometry::{Rect, Walls};

    #[test]
    fn test_free_flight() {
        let mut ball = Ball::new(Vec2::new(10.0, 10.0), 5.0).with_velocity(Vec2::new(60.0, -30.0));
        let mut colliders: [&mut dyn Collider; 0] = [];
        let mut events = Vec::new();
        let report = ball.update(&mut colliders, 0.5, &mut events).unwrap();

        assert_eq!(report, StepReport::default());
        assert_eq!(ball.center, Vec2::new(40.0, -5.0));
        assert_eq!(ball.velocity, Vec2::new(60.0, -30.0));
        assert!(events.is_empty());
    }

    #[test]
    fn test_bounce_off_wall_within_tick() {
        let mut wall = Edge::new(
            Vec2::new(10.0, 0.0),
            Vec2::new(10.0, 100.0),
            Vec2::new(-1.0, 0.0),
        );
        let mut ball = Ball::new(Vec2::new(0.0, 50.0), 1.0).with_velocity(Vec2::new(14.0, 0.0));
        let mut colliders: [&mut dyn Collider; 1] = [&mut wall];
        let report = ball.update(&mut colliders, 1.0, &mut Vec::new()).unwrap();

        assert_eq!(report.bounces, 1);
        assert_eq!(ball.center, Vec2::new(6.0, 50.0));
        assert_eq!(ball.velocity, Vec2::new(-14.0, 0.0));
    }

    #[test]
    fn test_corner_of_box_bounces_twice() {
        // Straight into the top-right inner corner of the viewport
        let mut walls = Walls::new(Rect::new(0.0, 0.0, 100.0, 100.0), 0.0);
        let mut ball = Ball::new(Vec2::new(90.0, 10.0), 1.0).with_velocity(Vec2::new(20.0, -20.0));
        let mut colliders: [&mut dyn Collider; 1] = [&mut walls];
        let report = ball.update(&mut colliders, 1.0, &mut Vec::new()).unwrap();

        assert_eq!(report.bounces, 2);
        assert!(!report.truncated);
        assert!((ball.velocity - Vec2::new(-20.0, 20.0)).length() < 1e-4);
        assert!((ball.center - Vec2::new(90.0, 10.0)).length() < 1e-3);
    }

    /// Reports a head-on hit at the query position, forever
    struct Trap;

    impl Collider for Trap {
        fn detect_collision(
            &self,
            position: Vec2,
            displacement: Vec2,
        ) -> Result<Option<Collision>, PhysicsError> {
            if displacement == Vec2::ZERO {
                return Ok(None);
            }
            Ok(Some(Collision {
                position,
                displacement,
                intersection_point: position,
                normal: -displacement,
            }))
        }
    }

    #[test]
    fn test_iteration_bound() {
        let mut trap = Trap;
        let start = Vec2::new(5.0, 5.0);
        let mut ball = Ball::new(start, 1.0)
            .with_velocity(Vec2::new(3.0, 0.0))
            .with_max_iterations(4);
        let mut colliders: [&mut dyn Collider; 1] = [&mut trap];
        let mut events = Vec::new();
        let report = ball.update(&mut colliders, 1.0, &mut events).unwrap();

        assert!(report.truncated);
        assert_eq!(report.bounces, 4);
        assert_eq!(ball.center, start);
        assert_eq!(events, vec![GameEvent::IterationLimit { bounces: 4 }]);
    }

    #[test]
    fn test_nan_velocity_is_fatal() {
        let mut ball = Ball::new(Vec2::ZERO, 1.0).with_velocity(Vec2::new(f32::NAN, 0.0));
        let mut colliders: [&mut dyn Collider; 0] = [];
        let err = ball.update(&mut colliders, 1.0, &mut Vec::new()).unwrap_err();
        assert!(matches!(err, PhysicsError::NonFinite { .. }));
        assert_eq!(ball.center, Vec2::ZERO);
    }

    #[test]
    fn test_resting_ball_stays_put() {
        let mut wall = Edge::new(
            Vec2::new(10.0, 0.0),
            Vec2::new(10.0, 100.0),
            Vec2::new(-1.0, 0.0),
        );
        let mut ball = Ball::new(Vec2::new(10.0, 50.0), 1.0);
        let mut colliders: [&mut dyn Collider; 1] = [&mut wall];
        let report = ball.update(&mut colliders, 1.0, &mut Vec::new()).unwrap();
        assert_eq!(report.bounces, 0);
        assert_eq!(ball.center, Vec2::new(10.0, 50.0));
    }
}
