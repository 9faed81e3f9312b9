//! 2-D vector helpers on top of `glam::Vec2`
//!
//! Addition, scaling, dot products and lengths come straight from glam.
//! What lives here is the checked arithmetic: reflection against a normal
//! that is not required to be unit length, and the explicit NaN guards.

use glam::Vec2;

use super::error::PhysicsError;

/// 2-D cross product (z component of the 3-D cross product)
#[inline]
pub fn cross(a: Vec2, b: Vec2) -> f32 {
    a.perp_dot(b)
}

/// Fail if either component of `v` is NaN or infinite
#[inline]
pub fn ensure_finite(v: Vec2, context: &'static str) -> Result<Vec2, PhysicsError> {
    if v.is_finite() {
        Ok(v)
    } else {
        Err(PhysicsError::NonFinite { context })
    }
}

/// Reflect `v` off a surface with the given normal
///
/// v' = v - 2(v·n)/(n·n) n
///
/// The normal does not have to be normalized, only non-zero.
pub fn reflect(v: Vec2, normal: Vec2) -> Result<Vec2, PhysicsError> {
    let nn = normal.dot(normal);
    if nn == 0.0 {
        return Err(PhysicsError::DegenerateNormal { context: "reflect" });
    }
    ensure_finite(v - normal * (2.0 * v.dot(normal) / nn), "reflect")
}
