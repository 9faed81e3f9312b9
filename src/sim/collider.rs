//! Collision detection and response against swept points
//!
//! Every obstacle has already been grown by the ball radius, so the ball is
//! treated as a point travelling from `position` to
//! `position + displacement`. A collider reports the first point where that
//! travel segment enters its boundary, together with the surface normal.

use glam::Vec2;

use super::error::PhysicsError;
use super::intersect::{circle_intersection, segment_intersection};
use super::state::GameEvent;
use super::vector::{ensure_finite, reflect};

/// A confirmed contact along a travel segment
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Collision {
    /// Start of the query
    pub position: Vec2,
    /// Full displacement of the query (unclipped)
    pub displacement: Vec2,
    /// First point of contact
    pub intersection_point: Vec2,
    /// Outward surface normal at the contact (not necessarily unit length)
    pub normal: Vec2,
}

/// Reflected motion after a contact
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CollisionResponse {
    /// Travel still owed this tick, starting at the contact point
    pub displacement: Vec2,
    pub velocity: Vec2,
}

impl Collision {
    /// Where the query would have ended without the contact
    #[inline]
    pub fn destination(&self) -> Vec2 {
        self.position + self.displacement
    }

    /// Reflect the remaining travel and the velocity off the contact normal
    pub fn collide(&self, velocity: Vec2) -> Result<CollisionResponse, PhysicsError> {
        let remaining = self.destination() - self.intersection_point;
        Ok(CollisionResponse {
            displacement: reflect(remaining, self.normal)?,
            velocity: reflect(velocity, self.normal)?,
        })
    }
}

/// Anything the ball can bounce off
pub trait Collider {
    /// First contact of a point moving from `position` by `displacement`
    ///
    /// Only motion into the surface counts: a collider never reports a
    /// collision whose normal has a non-negative dot product with the
    /// displacement.
    fn detect_collision(
        &self,
        position: Vec2,
        displacement: Vec2,
    ) -> Result<Option<Collision>, PhysicsError>;

    /// Apply a contact previously reported by `detect_collision`
    ///
    /// Called exactly once per contact. Colliders with state (bricks) take
    /// their side effects here before the reflection is computed.
    fn collide(
        &mut self,
        collision: &Collision,
        velocity: Vec2,
        _events: &mut Vec<GameEvent>,
    ) -> Result<CollisionResponse, PhysicsError> {
        collision.collide(velocity)
    }
}

/// Straight boundary segment with a fixed outward normal
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Edge {
    pub start: Vec2,
    pub end: Vec2,
    pub normal: Vec2,
}

impl Edge {
    pub fn new(start: Vec2, end: Vec2, normal: Vec2) -> Self {
        Self { start, end, normal }
    }
}

impl Collider for Edge {
    fn detect_collision(
        &self,
        position: Vec2,
        displacement: Vec2,
    ) -> Result<Option<Collision>, PhysicsError> {
        if self.normal.dot(displacement) >= 0.0 {
            return Ok(None);
        }
        let hit = segment_intersection(self.start, self.end, position, position + displacement);
        Ok(hit.map(|intersection_point| Collision {
            position,
            displacement,
            intersection_point,
            normal: self.normal,
        }))
    }
}

/// Rounded corner: a circle already expanded by the ball radius
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Corner {
    pub center: Vec2,
    pub radius: f32,
}

impl Corner {
    pub fn new(center: Vec2, radius: f32) -> Self {
        Self { center, radius }
    }
}

impl Collider for Corner {
    fn detect_collision(
        &self,
        position: Vec2,
        displacement: Vec2,
    ) -> Result<Option<Collision>, PhysicsError> {
        let Some(intersection_point) =
            circle_intersection(self.center, self.radius, position, position + displacement)?
        else {
            return Ok(None);
        };

        let normal = ensure_finite(intersection_point - self.center, "corner normal")?;
        if normal == Vec2::ZERO {
            return Err(PhysicsError::DegenerateNormal { context: "corner" });
        }
        if normal.dot(displacement) >= 0.0 {
            return Ok(None);
        }

        Ok(Some(Collision {
            position,
            displacement,
            intersection_point,
            normal,
        }))
    }
}

/// One piece of a composite outline
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Boundary {
    Edge(Edge),
    Corner(Corner),
}

impl Collider for Boundary {
    fn detect_collision(
        &self,
        position: Vec2,
        displacement: Vec2,
    ) -> Result<Option<Collision>, PhysicsError> {
        match self {
            Boundary::Edge(edge) => edge.detect_collision(position, displacement),
            Boundary::Corner(corner) => corner.detect_collision(position, displacement),
        }
    }
}

/// Nearest collision found by [`detect_closest_collision`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClosestHit {
    /// Index of the struck collider in the queried sequence
    pub index: usize,
    pub collision: Collision,
}

/// Query every collider and keep the contact nearest to `position`
///
/// Ties keep the earlier collider.
pub fn detect_closest_collision<'a, C, I>(
    colliders: I,
    position: Vec2,
    displacement: Vec2,
) -> Result<Option<ClosestHit>, PhysicsError>
where
    C: Collider + ?Sized + 'a,
    I: IntoIterator<Item = &'a C>,
{
    let mut closest: Option<(f32, ClosestHit)> = None;

    for (index, collider) in colliders.into_iter().enumerate() {
        let Some(collision) = collider.detect_collision(position, displacement)? else {
            continue;
        };
        let distance = position.distance(collision.intersection_point);
        if closest.as_ref().is_none_or(|(best, _)| distance < *best) {
            closest = Some((distance, ClosestHit { index, collision }));
        }
    }

    Ok(closest.map(|(_, hit)| hit))
}
