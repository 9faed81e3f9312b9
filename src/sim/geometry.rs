//! Scene geometry: rectangles, rounded outlines and viewport walls
//!
//! Coordinates follow the page: x grows right, y grows down. Obstacles are
//! built already grown by the ball radius (Minkowski sum), so a rounded
//! rectangle with corner radius r becomes straight edges pushed out by the
//! margin joined by circles of radius r + margin.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collider::{Boundary, Collider, Collision, Corner, Edge, detect_closest_collision};
use super::error::PhysicsError;

/// Axis-aligned rectangle in page coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

impl Rect {
    pub fn new(left: f32, top: f32, right: f32, bottom: f32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// Rectangle of the given size centered on `center`
    pub fn from_center(center: Vec2, size: Vec2) -> Self {
        let half = size / 2.0;
        Self::new(
            center.x - half.x,
            center.y - half.y,
            center.x + half.x,
            center.y + half.y,
        )
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.right - self.left
    }

    #[inline]
    pub fn height(&self) -> f32 {
        self.bottom - self.top
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(
            (self.left + self.right) / 2.0,
            (self.top + self.bottom) / 2.0,
        )
    }

    /// Grow (or shrink, with a negative margin) on every side
    pub fn expanded(&self, margin: f32) -> Self {
        Self::new(
            self.left - margin,
            self.top - margin,
            self.right + margin,
            self.bottom + margin,
        )
    }

    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= self.left
            && point.x <= self.right
            && point.y >= self.top
            && point.y <= self.bottom
    }

    /// Positive width and height, all sides finite
    pub fn is_valid(&self) -> bool {
        [self.left, self.top, self.right, self.bottom]
            .iter()
            .all(|v| v.is_finite())
            && self.width() > 0.0
            && self.height() > 0.0
    }
}

/// Border radius of each corner
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct CornerRadii {
    pub top_left: f32,
    pub top_right: f32,
    pub bottom_right: f32,
    pub bottom_left: f32,
}

impl CornerRadii {
    pub fn uniform(radius: f32) -> Self {
        Self {
            top_left: radius,
            top_right: radius,
            bottom_right: radius,
            bottom_left: radius,
        }
    }

    /// Clamp every radius into [0, half the shorter side of `rect`]
    pub fn clamped_to(self, rect: &Rect) -> Self {
        let max = (rect.width().min(rect.height()) / 2.0).max(0.0);
        let clamp = |r: f32| if r.is_finite() { r.clamp(0.0, max) } else { 0.0 };
        Self {
            top_left: clamp(self.top_left),
            top_right: clamp(self.top_right),
            bottom_right: clamp(self.bottom_right),
            bottom_left: clamp(self.bottom_left),
        }
    }
}

/// Convex rounded rectangle grown outward by a margin
///
/// Made of up to four edges and up to four corner circles. Zero-length
/// edges and zero-radius corners are left out.
#[derive(Debug, Clone, PartialEq)]
pub struct RoundedRect {
    rect: Rect,
    radii: CornerRadii,
    margin: f32,
    parts: Vec<Boundary>,
}

impl RoundedRect {
    pub fn new(rect: Rect, radii: CornerRadii, margin: f32) -> Self {
        let radii = radii.clamped_to(&rect);
        let m = margin;

        let top_left = Vec2::new(rect.left + radii.top_left, rect.top + radii.top_left);
        let top_right = Vec2::new(rect.right - radii.top_right, rect.top + radii.top_right);
        let bottom_right = Vec2::new(
            rect.right - radii.bottom_right,
            rect.bottom - radii.bottom_right,
        );
        let bottom_left = Vec2::new(rect.left + radii.bottom_left, rect.bottom - radii.bottom_left);

        let edges = [
            Edge::new(
                Vec2::new(top_left.x, rect.top - m),
                Vec2::new(top_right.x, rect.top - m),
                Vec2::new(0.0, -1.0),
            ),
            Edge::new(
                Vec2::new(rect.right + m, top_right.y),
                Vec2::new(rect.right + m, bottom_right.y),
                Vec2::new(1.0, 0.0),
            ),
            Edge::new(
                Vec2::new(bottom_right.x, rect.bottom + m),
                Vec2::new(bottom_left.x, rect.bottom + m),
                Vec2::new(0.0, 1.0),
            ),
            Edge::new(
                Vec2::new(rect.left - m, bottom_left.y),
                Vec2::new(rect.left - m, top_left.y),
                Vec2::new(-1.0, 0.0),
            ),
        ];
        let corners = [
            Corner::new(top_left, radii.top_left + m),
            Corner::new(top_right, radii.top_right + m),
            Corner::new(bottom_right, radii.bottom_right + m),
            Corner::new(bottom_left, radii.bottom_left + m),
        ];

        // Edges first: where an edge meets its corner, the edge wins the tie
        let parts = edges
            .into_iter()
            .filter(|edge| edge.start != edge.end)
            .map(Boundary::Edge)
            .chain(
                corners
                    .into_iter()
                    .filter(|corner| corner.radius > 0.0)
                    .map(Boundary::Corner),
            )
            .collect();

        Self {
            rect,
            radii,
            margin,
            parts,
        }
    }

    /// The original (unexpanded) rectangle
    pub fn rect(&self) -> Rect {
        self.rect
    }

    pub fn radii(&self) -> CornerRadii {
        self.radii
    }

    pub fn margin(&self) -> f32 {
        self.margin
    }

    /// Bounding box of the expanded outline
    pub fn bounds(&self) -> Rect {
        self.rect.expanded(self.margin)
    }

    pub fn parts(&self) -> &[Boundary] {
        &self.parts
    }
}

impl Collider for RoundedRect {
    fn detect_collision(
        &self,
        position: Vec2,
        displacement: Vec2,
    ) -> Result<Option<Collision>, PhysicsError> {
        Ok(detect_closest_collision(&self.parts, position, displacement)?.map(|hit| hit.collision))
    }
}

/// Inside of the viewport, open on the left (paddle) side
///
/// Walls are inset by the margin so the ball's center stays one radius
/// away from the visible border. The top and bottom walls reach back past
/// the left border so a missed ball cannot slip out vertically before it
/// is declared lost.
#[derive(Debug, Clone, PartialEq)]
pub struct Walls {
    viewport: Rect,
    edges: [Edge; 3],
}

impl Walls {
    pub fn new(viewport: Rect, margin: f32) -> Self {
        let inner = viewport.expanded(-margin);
        let far_left = viewport.left - margin;
        let edges = [
            // Top, facing down into the viewport
            Edge::new(
                Vec2::new(far_left, inner.top),
                Vec2::new(viewport.right, inner.top),
                Vec2::new(0.0, 1.0),
            ),
            // Right, facing left
            Edge::new(
                Vec2::new(inner.right, viewport.top),
                Vec2::new(inner.right, viewport.bottom),
                Vec2::new(-1.0, 0.0),
            ),
            // Bottom, facing up
            Edge::new(
                Vec2::new(viewport.right, inner.bottom),
                Vec2::new(far_left, inner.bottom),
                Vec2::new(0.0, -1.0),
            ),
        ];
        Self { viewport, edges }
    }

    pub fn viewport(&self) -> Rect {
        self.viewport
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }
}

impl Collider for Walls {
    fn detect_collision(
        &self,
        position: Vec2,
        displacement: Vec2,
    ) -> Result<Option<Collision>, PhysicsError> {
        Ok(detect_closest_collision(&self.edges, position, displacement)?.map(|hit| hit.collision))
    }
}
