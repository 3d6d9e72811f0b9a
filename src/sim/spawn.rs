//! Enemy and particle generation

use glam::Vec2;
use rand::Rng;

use super::entity::{Body, Particle};
use crate::consts::*;
use crate::renderer::Color;
use crate::settings::Settings;

/// Screen edge an enemy enters from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edge {
    Top,
    Right,
    Bottom,
    Left,
}

impl Edge {
    pub const ALL: [Edge; 4] = [Edge::Top, Edge::Right, Edge::Bottom, Edge::Left];
}

/// Pick a random edge and a point just beyond it
///
/// The point sits `radius` outside the canvas so a circle of that radius
/// starts fully off-screen.
pub fn random_spawn_point(rng: &mut impl Rng, viewport: Vec2, radius: f32) -> (Edge, Vec2) {
    let edge = Edge::ALL[rng.random_range(0..Edge::ALL.len())];
    let along_x = rng.random::<f32>() * viewport.x;
    let along_y = rng.random::<f32>() * viewport.y;
    let pos = match edge {
        Edge::Top => Vec2::new(along_x, -radius),
        Edge::Right => Vec2::new(viewport.x + radius, along_y),
        Edge::Bottom => Vec2::new(along_x, viewport.y + radius),
        Edge::Left => Vec2::new(-radius, along_y),
    };
    (edge, pos)
}

/// Build an enemy body entering from a random edge
///
/// It heads for the canvas center as of right now and never re-aims.
pub fn random_enemy(rng: &mut impl Rng, viewport: Vec2, settings: &Settings) -> Body {
    let radius = rng.random_range(settings.enemy_min_radius..settings.enemy_max_radius);
    let color = Color::hsl(
        rng.random_range(0.0..360.0),
        ENEMY_SATURATION,
        ENEMY_LIGHTNESS,
    );
    let (_, pos) = random_spawn_point(rng, viewport, radius);
    let center = viewport / 2.0;
    let vel = (center - pos).normalize_or_zero() * settings.enemy_speed;
    Body::new(pos, radius, color, vel)
}

/// Burst of `count` particles at `pos`
pub fn explosion(rng: &mut impl Rng, pos: Vec2, color: Color, count: u32) -> Vec<Particle> {
    (0..count)
        .map(|_| {
            let vel = Vec2::new(
                rng.random_range(-PARTICLE_SPREAD..PARTICLE_SPREAD),
                rng.random_range(-PARTICLE_SPREAD..PARTICLE_SPREAD),
            );
            let radius = rng.random::<f32>() * PARTICLE_MAX_RADIUS;
            Particle::new(Body::new(pos, radius, color, vel))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    const VIEWPORT: Vec2 = Vec2::new(800.0, 600.0);

    #[test]
    fn test_spawn_point_outside_by_radius() {
        let mut rng = Pcg32::seed_from_u64(7);
        for _ in 0..500 {
            let radius = rng.random_range(10.0..30.0);
            let (edge, pos) = random_spawn_point(&mut rng, VIEWPORT, radius);
            match edge {
                Edge::Top => {
                    assert_eq!(pos.y, -radius);
                    assert!((0.0..=VIEWPORT.x).contains(&pos.x));
                }
                Edge::Right => {
                    assert_eq!(pos.x, VIEWPORT.x + radius);
                    assert!((0.0..=VIEWPORT.y).contains(&pos.y));
                }
                Edge::Bottom => {
                    assert_eq!(pos.y, VIEWPORT.y + radius);
                    assert!((0.0..=VIEWPORT.x).contains(&pos.x));
                }
                Edge::Left => {
                    assert_eq!(pos.x, -radius);
                    assert!((0.0..=VIEWPORT.y).contains(&pos.y));
                }
            }
        }
    }

    #[test]
    fn test_all_edges_used() {
        let mut rng = Pcg32::seed_from_u64(99);
        let mut seen = [false; 4];
        for _ in 0..200 {
            let (edge, _) = random_spawn_point(&mut rng, VIEWPORT, 10.0);
            seen[Edge::ALL.iter().position(|e| *e == edge).unwrap()] = true;
        }
        assert!(seen.iter().all(|s| *s));
    }

    #[test]
    fn test_enemy_heads_for_center() {
        let mut rng = Pcg32::seed_from_u64(3);
        let settings = Settings::default();
        for _ in 0..100 {
            let body = random_enemy(&mut rng, VIEWPORT, &settings);
            assert!(body.radius >= settings.enemy_min_radius);
            assert!(body.radius < settings.enemy_max_radius);
            assert!((body.vel.length() - settings.enemy_speed).abs() < 1e-4);

            let to_center = (VIEWPORT / 2.0 - body.pos).normalize();
            assert!(body.vel.normalize().dot(to_center) > 0.9999);

            match body.color {
                Color::Hsl {
                    hue,
                    saturation,
                    lightness,
                } => {
                    assert!((0.0..360.0).contains(&hue));
                    assert_eq!(saturation, ENEMY_SATURATION);
                    assert_eq!(lightness, ENEMY_LIGHTNESS);
                }
                other => panic!("unexpected enemy color {:?}", other),
            }
        }
    }

    #[test]
    fn test_explosion_burst() {
        let mut rng = Pcg32::seed_from_u64(11);
        let color = Color::hsl(10.0, 50.0, 50.0);
        let pos = Vec2::new(42.0, 24.0);
        let particles = explosion(&mut rng, pos, color, 8);
        assert_eq!(particles.len(), 8);
        for p in &particles {
            assert_eq!(p.body.pos, pos);
            assert_eq!(p.body.color, color);
            assert_eq!(p.alpha, 1.0);
            assert!(p.body.radius < PARTICLE_MAX_RADIUS);
            assert!(p.body.vel.x.abs() <= PARTICLE_SPREAD);
            assert!(p.body.vel.y.abs() <= PARTICLE_SPREAD);
        }
    }
}
