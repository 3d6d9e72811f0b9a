//! Game entities
//!
//! Every entity is a colored circle with a velocity. Entities never reference
//! each other; they only know how to move and draw themselves.

use glam::Vec2;

use super::tween::Tween;
use crate::renderer::{Color, Surface};

/// Shared circle body
#[derive(Debug, Clone, PartialEq)]
pub struct Body {
    pub pos: Vec2,
    /// Pixels per frame
    pub vel: Vec2,
    pub radius: f32,
    pub color: Color,
}

impl Body {
    pub fn new(pos: Vec2, radius: f32, color: Color, vel: Vec2) -> Self {
        Self {
            pos,
            vel,
            radius,
            color,
        }
    }

    /// Move by one frame of velocity
    #[inline]
    pub fn step(&mut self) {
        self.pos += self.vel;
    }

    pub fn draw(&self, surface: &mut dyn Surface) {
        surface.fill_circle(self.pos, self.radius, self.color, 1.0);
    }

    /// Step then draw
    pub fn update(&mut self, surface: &mut dyn Surface) {
        self.step();
        self.draw(surface);
    }
}

/// Player avatar, parked at the canvas center
pub type Player = Body;

/// A shot fired by the player
#[derive(Debug, Clone)]
pub struct Projectile {
    pub id: u32,
    pub body: Body,
    /// Cleared when the projectile is consumed or leaves the screen
    pub alive: bool,
}

impl Projectile {
    pub fn new(id: u32, body: Body) -> Self {
        Self {
            id,
            body,
            alive: true,
        }
    }
}

/// An enemy homing on the spawn-time canvas center
#[derive(Debug, Clone)]
pub struct Enemy {
    pub id: u32,
    pub body: Body,
    /// In-flight shrink animation
    pub shrink: Option<Tween>,
    pub alive: bool,
}

impl Enemy {
    pub fn new(id: u32, body: Body) -> Self {
        Self {
            id,
            body,
            shrink: None,
            alive: true,
        }
    }

    /// Radius the enemy is settling at (tween target while shrinking)
    pub fn target_radius(&self) -> f32 {
        self.shrink.as_ref().map_or(self.body.radius, |t| t.to)
    }

    /// Start animating the radius down to `radius` over `duration` seconds
    pub fn shrink_to(&mut self, radius: f32, duration: f32) {
        self.shrink = Some(Tween::new(self.body.radius, radius, duration));
    }

    /// Advance the shrink animation by `dt` seconds
    pub fn animate(&mut self, dt: f32) {
        if let Some(tween) = &mut self.shrink {
            self.body.radius = tween.advance(dt);
            if tween.is_finished() {
                self.shrink = None;
            }
        }
    }

    /// Animate, step and draw
    pub fn update(&mut self, surface: &mut dyn Surface, dt: f32) {
        self.animate(dt);
        self.body.update(surface);
    }
}

/// Explosion debris that slows down and fades out
#[derive(Debug, Clone)]
pub struct Particle {
    pub body: Body,
    /// Opacity, starts at 1 and drops every frame
    pub alpha: f32,
}

impl Particle {
    pub fn new(body: Body) -> Self {
        Self { body, alpha: 1.0 }
    }

    pub fn is_faded(&self) -> bool {
        self.alpha <= 0.0
    }

    /// Apply friction, move, fade
    pub fn step(&mut self, friction: f32, fade_speed: f32) {
        self.body.vel *= friction;
        self.body.step();
        self.alpha -= fade_speed;
    }

    pub fn draw(&self, surface: &mut dyn Surface) {
        let b = &self.body;
        surface.fill_circle(b.pos, b.radius, b.color, self.alpha.max(0.0));
    }

    pub fn update(&mut self, surface: &mut dyn Surface, friction: f32, fade_speed: f32) {
        self.step(friction, fade_speed);
        self.draw(surface);
    }
}
