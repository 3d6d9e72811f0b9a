//! Simulation module
//!
//! All gameplay logic lives here:
//! - Frame-stepped movement (velocities are pixels per frame)
//! - Seeded RNG only
//! - Drawing goes through the `Surface` port, never a concrete backend

pub mod collision;
pub mod entity;
pub mod spawn;
pub mod state;
pub mod tick;
pub mod tween;

pub use collision::{circles_collide, collides, is_off_screen};
pub use entity::{Body, Enemy, Particle, Player, Projectile};
pub use spawn::{Edge, explosion, random_enemy, random_spawn_point};
pub use state::GameState;
pub use tick::{TickOutcome, tick};
pub use tween::{Easing, Tween};
