//! Per-frame simulation tick
//!
//! Core game loop body: move and draw everything, resolve collisions, award
//! score. Entities destroyed mid-pass are only flagged; the collections are
//! swept once the pass is over so no entity is skipped or visited twice.

use glam::Vec2;
use rand_pcg::Pcg32;

use super::collision::{collides, is_off_screen};
use super::entity::{Enemy, Particle, Projectile};
use super::spawn;
use super::state::GameState;
use crate::consts::*;
use crate::renderer::{Color, Surface};
use crate::settings::Settings;

/// What happened during a tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickOutcome {
    /// An enemy reached the player; the rest of the tick was skipped
    pub game_over: bool,
    /// Number of projectile-enemy hits
    pub hits: u32,
    /// Enemies destroyed outright
    pub kills: u32,
}

impl TickOutcome {
    pub fn score_changed(&self) -> bool {
        self.hits > 0
    }
}

/// Advance the game by one frame and draw it onto `surface`
///
/// `dt` is the wall-clock frame time in seconds; it only drives animations.
/// Movement is per frame.
pub fn tick(state: &mut GameState, surface: &mut dyn Surface, dt: f32) -> TickOutcome {
    let mut outcome = TickOutcome::default();

    // Translucent wash instead of a clear leaves motion trails
    surface.fill_rect(
        Vec2::ZERO,
        state.viewport,
        Color::BLACK,
        state.settings.trail_alpha,
    );
    state.player.draw(surface);

    update_projectiles(state, surface);

    if update_enemies(state, surface, dt, &mut outcome) {
        outcome.game_over = true;
        return outcome;
    }

    update_particles(state, surface);
    outcome
}

fn update_projectiles(state: &mut GameState, surface: &mut dyn Surface) {
    let viewport = state.viewport;
    for projectile in &mut state.projectiles {
        projectile.body.update(surface);
        if is_off_screen(&projectile.body, viewport) {
            projectile.alive = false;
        }
    }
    state.projectiles.retain(|p| p.alive);
}

/// Returns true if an enemy reached the player
fn update_enemies(
    state: &mut GameState,
    surface: &mut dyn Surface,
    dt: f32,
    outcome: &mut TickOutcome,
) -> bool {
    let GameState {
        rng,
        settings,
        player,
        projectiles,
        enemies,
        particles,
        score,
        ..
    } = state;

    let mut player_hit = false;
    for enemy in enemies.iter_mut() {
        enemy.update(surface, dt);

        if collides(&enemy.body, player) {
            log::debug!("enemy {} reached the player", enemy.id);
            player_hit = true;
            break;
        }

        for projectile in projectiles.iter_mut() {
            if !enemy.alive {
                break;
            }
            if !projectile.alive || !collides(&enemy.body, &projectile.body) {
                continue;
            }
            *score += resolve_hit(enemy, projectile, particles, rng, settings);
            outcome.hits += 1;
            if !enemy.alive {
                outcome.kills += 1;
            }
        }
    }

    enemies.retain(|e| e.alive);
    projectiles.retain(|p| p.alive);
    player_hit
}

/// Apply a projectile hit to an enemy and return the points earned
///
/// The shrink decision reads the radius the enemy is already settling at, so
/// hits landing during a shrink animation stack.
fn resolve_hit(
    enemy: &mut Enemy,
    projectile: &mut Projectile,
    particles: &mut Vec<Particle>,
    rng: &mut Pcg32,
    settings: &Settings,
) -> u64 {
    particles.extend(spawn::explosion(
        rng,
        projectile.body.pos,
        enemy.body.color,
        settings.particle_count,
    ));
    projectile.alive = false;

    let shrunk = enemy.target_radius() - ENEMY_HIT_SHRINK;
    if shrunk >= settings.enemy_min_radius {
        log::trace!("enemy {} shrinks to {:.1}", enemy.id, shrunk);
        enemy.shrink_to(shrunk, settings.shrink_duration);
        SCORE_SHRINK
    } else {
        log::trace!("enemy {} destroyed", enemy.id);
        enemy.alive = false;
        SCORE_DESTROY
    }
}

fn update_particles(state: &mut GameState, surface: &mut dyn Surface) {
    let friction = state.settings.particle_friction;
    let fade = state.settings.particle_fade_speed;
    for particle in &mut state.particles {
        particle.update(surface, friction, fade);
    }
    state.particles.retain(|p| !p.is_faded());
}
