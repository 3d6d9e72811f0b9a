//! Circle collision and screen-bounds tests

use glam::Vec2;

use super::entity::Body;
use crate::consts::COLLISION_EPSILON;

/// Check whether two circles touch or overlap
///
/// The gap between the circles (center distance minus both radii) must be
/// below [`COLLISION_EPSILON`], so circles count as colliding slightly before
/// they actually touch.
#[inline]
pub fn circles_collide(a_pos: Vec2, a_radius: f32, b_pos: Vec2, b_radius: f32) -> bool {
    a_pos.distance(b_pos) - (a_radius + b_radius) < COLLISION_EPSILON
}

/// Circle collision between two bodies
#[inline]
pub fn collides(a: &Body, b: &Body) -> bool {
    circles_collide(a.pos, a.radius, b.pos, b.radius)
}

/// True once the body's bounding box is entirely outside `[0, viewport]`
pub fn is_off_screen(body: &Body, viewport: Vec2) -> bool {
    body.pos.x + body.radius < 0.0
        || body.pos.x - body.radius > viewport.x
        || body.pos.y + body.radius < 0.0
        || body.pos.y - body.radius > viewport.y
}
