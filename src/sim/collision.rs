//! Axis-aligned box collision between the actor and obstacles
//!
//! Touching edges do not count; the boxes must overlap by a positive amount
//! on both axes.

use glam::Vec2;

use super::state::{Actor, Obstacle};

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb {
    /// Box from its top-left corner and size
    pub fn from_pos_size(pos: Vec2, size: Vec2) -> Self {
        Self {
            min: pos,
            max: pos + size,
        }
    }

    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.min.x < other.max.x
            && self.max.x > other.min.x
            && self.min.y < other.max.y
            && self.max.y > other.min.y
    }

    /// Overlap extent on each axis, if the boxes overlap
    pub fn penetration(&self, other: &Aabb) -> Option<Vec2> {
        if !self.overlaps(other) {
            return None;
        }
        let lo = self.min.max(other.min);
        let hi = self.max.min(other.max);
        Some(hi - lo)
    }
}

/// Result of testing the actor against the obstacle queue
#[derive(Debug, Clone)]
pub struct CollisionResult {
    /// Whether any obstacle overlaps the actor
    pub hit: bool,
    /// First overlapping obstacle (queue order)
    pub obstacle_id: Option<u32>,
    /// Overlap extent with that obstacle
    pub penetration: Vec2,
}

impl CollisionResult {
    pub fn miss() -> Self {
        Self {
            hit: false,
            obstacle_id: None,
            penetration: Vec2::ZERO,
        }
    }
}

/// Test the actor against every obstacle
pub fn actor_obstacle_collision(actor: &Actor, obstacles: &[Obstacle]) -> CollisionResult {
    let actor_box = actor.bounds();
    obstacles
        .iter()
        .find_map(|o| {
            actor_box.penetration(&o.bounds()).map(|penetration| CollisionResult {
                hit: true,
                obstacle_id: Some(o.id),
                penetration,
            })
        })
        .unwrap_or_else(CollisionResult::miss)
}
