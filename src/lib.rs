//! Swarm Shooter - hold the center against an endless swarm
//!
//! Core modules:
//! - `sim`: Simulation (entities, spawning, collisions, per-frame tick)
//! - `controller`: Session lifecycle and scheduling around the simulation
//! - `renderer`: Drawing surface abstraction (2D canvas, recording)
//! - `platform`: Frame/interval scheduling and HUD ports
//! - `highscores`: Key-value storage port and the persisted high score
//! - `settings`: Data-driven game tuning

pub mod controller;
pub mod highscores;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use controller::{GameController, GameEvent, SessionPhase};
pub use highscores::{HighScores, KeyValueStore, MemoryStore};
pub use settings::Settings;

/// Game configuration constants
///
/// Speeds are in pixels per frame, matching a 60 Hz display.
pub mod consts {
    /// Player avatar radius
    pub const PLAYER_RADIUS: f32 = 10.0;

    /// Projectile defaults
    pub const PROJECTILE_RADIUS: f32 = 5.0;
    pub const PROJECTILE_SPEED: f32 = 5.0;

    /// Enemy radius range, sampled as [min, max)
    pub const ENEMY_MIN_RADIUS: f32 = 10.0;
    pub const ENEMY_MAX_RADIUS: f32 = 30.0;
    pub const ENEMY_SPEED: f32 = 1.0;
    /// Milliseconds between automatic enemy spawns
    pub const ENEMY_SPAWN_INTERVAL_MS: u32 = 1000;
    /// Radius lost per projectile hit
    pub const ENEMY_HIT_SHRINK: f32 = 10.0;
    /// Seconds the shrink animation takes
    pub const ENEMY_SHRINK_DURATION: f32 = 0.5;
    /// Enemy color saturation/lightness (percent)
    pub const ENEMY_SATURATION: f32 = 50.0;
    pub const ENEMY_LIGHTNESS: f32 = 50.0;

    /// Explosion particles
    pub const PARTICLE_COUNT: u32 = 8;
    pub const PARTICLE_MAX_RADIUS: f32 = 2.0;
    /// Each velocity component is sampled from [-SPREAD, SPREAD)
    pub const PARTICLE_SPREAD: f32 = 2.0;
    pub const PARTICLE_FRICTION: f32 = 0.99;
    pub const PARTICLE_FADE_SPEED: f32 = 0.01;

    /// Score awarded for a hit that shrinks an enemy
    pub const SCORE_SHRINK: u64 = 10;
    /// Score awarded for a hit that destroys an enemy
    pub const SCORE_DESTROY: u64 = 20;

    /// Two circles collide once their gap drops below this
    pub const COLLISION_EPSILON: f32 = 1.0;

    /// Opacity of the black wash painted each frame (motion trails)
    pub const TRAIL_ALPHA: f32 = 0.1;

    /// Frame delta used before a previous timestamp exists (seconds)
    pub const DEFAULT_FRAME_DT: f32 = 1.0 / 60.0;
    /// Largest frame delta fed to animations (seconds)
    pub const MAX_FRAME_DT: f32 = 0.1;
}
