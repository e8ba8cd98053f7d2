//! Collision detection
//!
//! Snowflakes are points, the player is an axis-aligned box. Both bounds of
//! each axis are exclusive, so a snowflake exactly on an edge is a miss.

use glam::Vec2;

use super::particles::Particle;

/// Axis-aligned rectangle, `pos` is the top-left corner
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub pos: Vec2,
    pub size: Vec2,
}

impl Bounds {
    pub fn new(pos: Vec2, size: Vec2) -> Self {
        Self { pos, size }
    }

    /// Strictly inside on both axes
    pub fn contains(&self, point: Vec2) -> bool {
        point.x > self.pos.x
            && point.x < self.pos.x + self.size.x
            && point.y > self.pos.y
            && point.y < self.pos.y + self.size.y
    }
}

/// Does this snowflake hit the player?
pub fn check(player: &Bounds, particle: &Particle) -> bool {
    player.contains(particle.pos)
}
