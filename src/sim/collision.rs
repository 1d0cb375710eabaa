//! Collision detection between falling entities and the paddle
//!
//! Everything is tested as a circle against the paddle's axis-aligned
//! rectangle. Hazards are rectangles on screen but collide as their bounding
//! circle (radius = larger half-extent), which gives them a slightly forgiving
//! feel near the corners.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub min: Vec2,
    pub max: Vec2,
}

impl Rect {
    pub fn new(min: Vec2, max: Vec2) -> Self {
        Self { min, max }
    }

    /// Rectangle of the given size centered on `center`
    pub fn from_center_size(center: Vec2, size: Vec2) -> Self {
        let half = size / 2.0;
        Self {
            min: center - half,
            max: center + half,
        }
    }

    /// Point inside (or on the edge of) the rectangle closest to `point`
    #[inline]
    pub fn closest_point(&self, point: Vec2) -> Vec2 {
        point.clamp(self.min, self.max)
    }
}

/// Circle vs axis-aligned rectangle overlap test
///
/// Clamps the circle center onto the rectangle and compares the squared
/// distance to the squared radius. Touching counts as a hit.
#[inline]
pub fn circle_rect_overlap(center: Vec2, radius: f32, rect: &Rect) -> bool {
    let nearest = rect.closest_point(center);
    center.distance_squared(nearest) <= radius * radius
}

/// Radius of the circle a hazard collides as
#[inline]
pub fn hazard_collision_radius(width: f32, height: f32) -> f32 {
    (width / 2.0).max(height / 2.0)
}
