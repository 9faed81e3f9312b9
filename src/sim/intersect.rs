//! Exact parametric intersection tests
//!
//! Both tests work on the ball's travel segment (position to
//! position + displacement) and return the first point of contact along it.
//! No epsilon is applied anywhere: comparisons against zero are exact.

use glam::Vec2;

use super::error::PhysicsError;
use super::vector::{cross, ensure_finite};

/// Intersection point of segments p→p2 and q→q2, if they cross
///
/// Uses the cross product formulation: p + t·r = q + u·s with both
/// parameters in [0, 1]. Collinear segments only count when they share an
/// endpoint exactly; overlapping collinear runs report no intersection.
pub fn segment_intersection(p: Vec2, p2: Vec2, q: Vec2, q2: Vec2) -> Option<Vec2> {
    let r = p2 - p;
    let s = q2 - q;
    let qp = q - p;

    let u_numerator = cross(qp, r);
    let denominator = cross(r, s);

    if u_numerator == 0.0 && denominator == 0.0 {
        // Collinear: only touching endpoints register
        if p == q || p == q2 {
            return Some(p);
        }
        if p2 == q || p2 == q2 {
            return Some(p2);
        }
        return None;
    }

    if denominator == 0.0 {
        // Parallel
        return None;
    }

    let u = u_numerator / denominator;
    let t = cross(qp, s) / denominator;

    if (0.0..=1.0).contains(&t) && (0.0..=1.0).contains(&u) {
        Some(p + r * t)
    } else {
        None
    }
}

/// First point where segment src→dest enters the circle (center, radius)
///
/// Solves |src + t·v - center|² = radius² for t and keeps the smallest
/// root in [0, 1]. A zero-length segment never intersects.
pub fn circle_intersection(
    center: Vec2,
    radius: f32,
    src: Vec2,
    dest: Vec2,
) -> Result<Option<Vec2>, PhysicsError> {
    let u = src - center;
    let v = dest - src;

    let a = v.dot(v);
    if a == 0.0 {
        return Ok(None);
    }
    let b = 2.0 * v.dot(u);
    let c = u.dot(u) - radius * radius;

    let delta = b * b - 4.0 * a * c;
    if delta < 0.0 {
        return Ok(None);
    }

    let sqrt_delta = delta.sqrt();
    let t = [(-b - sqrt_delta) / (2.0 * a), (-b + sqrt_delta) / (2.0 * a)]
        .into_iter()
        .filter(|t| (0.0..=1.0).contains(t))
        .reduce(f32::min);

    match t {
        Some(t) => ensure_finite(src + v * t, "circle intersection").map(Some),
        None => Ok(None),
    }
}
