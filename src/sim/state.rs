//! Game state and core simulation types
//!
//! Owns the player and the three live collections. Membership in a collection
//! is the only lifecycle signal: an entity that is gone is destroyed.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::entity::{Body, Enemy, Particle, Player, Projectile};
use super::spawn;
use crate::renderer::Color;
use crate::settings::Settings;

/// Complete simulation state for one session
#[derive(Debug, Clone)]
pub struct GameState {
    /// Seed the RNG was created from
    pub seed: u64,
    /// All gameplay randomness comes from here
    pub rng: Pcg32,
    /// Canvas size in pixels
    pub viewport: Vec2,
    pub settings: Settings,
    pub player: Player,
    pub projectiles: Vec<Projectile>,
    pub enemies: Vec<Enemy>,
    pub particles: Vec<Particle>,
    pub score: u64,
    /// Next entity ID
    next_id: u32,
}

impl GameState {
    /// Create a fresh state for a canvas of size `viewport`
    pub fn new(seed: u64, viewport: Vec2, settings: Settings) -> Self {
        let settings = settings.sanitized();
        let player = Self::make_player(viewport, &settings);
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            viewport,
            settings,
            player,
            projectiles: Vec::new(),
            enemies: Vec::new(),
            particles: Vec::new(),
            score: 0,
            next_id: 1,
        }
    }

    fn make_player(viewport: Vec2, settings: &Settings) -> Player {
        Body::new(viewport / 2.0, settings.player_radius, Color::WHITE, Vec2::ZERO)
    }

    /// Reset for a new session: zero score, empty collections, centered player
    pub fn init(&mut self) {
        self.score = 0;
        self.projectiles.clear();
        self.enemies.clear();
        self.particles.clear();
        self.player = Self::make_player(self.viewport, &self.settings);
    }

    /// Canvas center
    pub fn center(&self) -> Vec2 {
        self.viewport / 2.0
    }

    /// Track a new canvas size; the player re-centers
    pub fn resize(&mut self, viewport: Vec2) {
        self.viewport = viewport;
        self.player.pos = self.center();
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id = self.next_id.wrapping_add(1);
        id
    }

    /// Fire a projectile from the center toward `target` (canvas coordinates)
    pub fn fire_projectile(&mut self, target: Vec2) -> u32 {
        let center = self.center();
        let delta = target - center;
        // Clicking dead center fires to the right, like atan2(0, 0)
        let angle = delta.y.atan2(delta.x);
        let vel = Vec2::from_angle(angle) * self.settings.projectile_speed;
        let id = self.next_entity_id();
        let body = Body::new(center, self.settings.projectile_radius, Color::WHITE, vel);
        self.projectiles.push(Projectile::new(id, body));
        log::trace!("projectile {} fired toward {:?}", id, target);
        id
    }

    /// Spawn one enemy from a random screen edge
    pub fn spawn_enemy(&mut self) -> u32 {
        let body = spawn::random_enemy(&mut self.rng, self.viewport, &self.settings);
        let id = self.next_entity_id();
        log::trace!("enemy {} spawned at {:?} (r={:.1})", id, body.pos, body.radius);
        self.enemies.push(Enemy::new(id, body));
        id
    }

    /// Add an enemy with a known body (scripted waves and tests)
    pub fn push_enemy(&mut self, body: Body) -> u32 {
        let id = self.next_entity_id();
        self.enemies.push(Enemy::new(id, body));
        id
    }

    /// Add a projectile with a known body
    pub fn push_projectile(&mut self, body: Body) -> u32 {
        let id = self.next_entity_id();
        self.projectiles.push(Projectile::new(id, body));
        id
    }
}
