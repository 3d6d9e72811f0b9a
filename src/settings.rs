//! Game tuning
//!
//! Persisted as JSON in LocalStorage next to the high score. Anything missing
//! or unreadable falls back to the defaults in [`crate::consts`].

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::highscores::KeyValueStore;

/// Tunable game parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Player / projectiles ===
    pub player_radius: f32,
    pub projectile_radius: f32,
    /// Pixels per frame
    pub projectile_speed: f32,

    // === Enemies ===
    pub enemy_min_radius: f32,
    /// Exclusive upper bound for spawned radii
    pub enemy_max_radius: f32,
    /// Pixels per frame
    pub enemy_speed: f32,
    pub spawn_interval_ms: u32,
    /// Seconds for the hit shrink animation
    pub shrink_duration: f32,

    // === Effects ===
    pub particle_count: u32,
    pub particle_friction: f32,
    pub particle_fade_speed: f32,
    /// Opacity of the per-frame black wash (lower = longer trails)
    pub trail_alpha: f32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            player_radius: PLAYER_RADIUS,
            projectile_radius: PROJECTILE_RADIUS,
            projectile_speed: PROJECTILE_SPEED,

            enemy_min_radius: ENEMY_MIN_RADIUS,
            enemy_max_radius: ENEMY_MAX_RADIUS,
            enemy_speed: ENEMY_SPEED,
            spawn_interval_ms: ENEMY_SPAWN_INTERVAL_MS,
            shrink_duration: ENEMY_SHRINK_DURATION,

            particle_count: PARTICLE_COUNT,
            particle_friction: PARTICLE_FRICTION,
            particle_fade_speed: PARTICLE_FADE_SPEED,
            trail_alpha: TRAIL_ALPHA,
        }
    }
}

impl Settings {
    /// Storage key
    pub const STORAGE_KEY: &'static str = "swarm_shooter_settings";

    /// Shortest spawn interval accepted (one 60 Hz frame)
    const MIN_SPAWN_INTERVAL_MS: u32 = 16;

    /// Clamp values into ranges the simulation can work with
    pub fn sanitized(mut self) -> Self {
        self.player_radius = self.player_radius.max(1.0);
        self.projectile_radius = self.projectile_radius.max(1.0);
        self.enemy_min_radius = self.enemy_min_radius.max(1.0);
        if !(self.enemy_max_radius > self.enemy_min_radius) {
            self.enemy_max_radius = self.enemy_min_radius + 1.0;
        }
        self.spawn_interval_ms = self.spawn_interval_ms.max(Self::MIN_SPAWN_INTERVAL_MS);
        self.shrink_duration = self.shrink_duration.max(0.0);
        // Friction must actually slow particles down
        if !(0.0..1.0).contains(&self.particle_friction) {
            self.particle_friction = PARTICLE_FRICTION;
        }
        if !(self.particle_fade_speed > 0.0) {
            self.particle_fade_speed = PARTICLE_FADE_SPEED;
        }
        self.trail_alpha = self.trail_alpha.clamp(0.0, 1.0);
        self
    }

    /// Load settings from `store`, falling back to defaults
    pub fn load(store: &impl KeyValueStore) -> Self {
        if let Some(json) = store.get(Self::STORAGE_KEY) {
            match serde_json::from_str::<Settings>(&json) {
                Ok(settings) => {
                    log::info!("Loaded settings from storage");
                    return settings.sanitized();
                }
                Err(e) => log::info!("Ignoring unreadable settings: {}", e),
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Save settings to `store`
    pub fn save(&self, store: &mut impl KeyValueStore) {
        match serde_json::to_string(self) {
            Ok(json) => {
                store.set(Self::STORAGE_KEY, &json);
                log::info!("Settings saved");
            }
            Err(e) => log::warn!("Could not serialize settings: {}", e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::highscores::MemoryStore;

    #[test]
    fn test_load_missing_uses_defaults() {
        let store = MemoryStore::new();
        assert_eq!(Settings::load(&store), Settings::default());
    }

    #[test]
    fn test_load_garbage_uses_defaults() {
        let mut store = MemoryStore::new();
        store.set(Settings::STORAGE_KEY, "{not json");
        assert_eq!(Settings::load(&store), Settings::default());
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let mut store = MemoryStore::new();
        store.set(Settings::STORAGE_KEY, r#"{"enemy_speed": 2.5}"#);
        let settings = Settings::load(&store);
        assert_eq!(settings.enemy_speed, 2.5);
        assert_eq!(settings.particle_count, PARTICLE_COUNT);
    }

    #[test]
    fn test_save_then_load() {
        let mut store = MemoryStore::new();
        let settings = Settings {
            spawn_interval_ms: 750,
            ..Default::default()
        };
        settings.save(&mut store);
        assert_eq!(Settings::load(&store), settings);
    }

    #[test]
    fn test_sanitized_repairs_bad_ranges() {
        let settings = Settings {
            enemy_min_radius: 20.0,
            enemy_max_radius: 5.0,
            spawn_interval_ms: 0,
            particle_friction: 1.5,
            ..Default::default()
        }
        .sanitized();
        assert!(settings.enemy_max_radius > settings.enemy_min_radius);
        assert_eq!(settings.spawn_interval_ms, 16);
        assert_eq!(settings.particle_friction, PARTICLE_FRICTION);
    }
}
