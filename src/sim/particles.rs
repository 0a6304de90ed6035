//! Decorative particle bursts
//!
//! Particles never feed back into collisions or scoring.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::color::Color;
use crate::consts::*;

/// A particle for visual effects
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Particle {
    pub pos: Vec2,
    /// Per-tick velocity
    pub vel: Vec2,
    pub color: Color,
    pub size: f32,
    /// Ticks left to live
    pub life: f32,
}

impl Particle {
    /// Advance one tick. Returns false when expired.
    pub fn tick(&mut self) -> bool {
        self.pos += self.vel;
        self.life -= 1.0;
        self.life > 0.0
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParticleSystem {
    particles: Vec<Particle>,
    /// Particles per burst
    burst: usize,
    /// Live particle cap; the oldest are evicted first
    max: usize,
}

impl Default for ParticleSystem {
    fn default() -> Self {
        Self::new(PARTICLE_BURST, MAX_PARTICLES)
    }
}

impl ParticleSystem {
    pub fn new(burst: usize, max: usize) -> Self {
        Self {
            particles: Vec::with_capacity(max.min(MAX_PARTICLES)),
            burst,
            max,
        }
    }

    /// Spawn one burst at `at` with random sizes and velocities
    pub fn spawn_burst<R: Rng + ?Sized>(&mut self, at: Vec2, color: Color, rng: &mut R) {
        if self.max == 0 {
            return;
        }
        let burst = self.burst.min(self.max);
        let overflow = (self.particles.len() + burst).saturating_sub(self.max);
        self.particles.drain(..overflow);
        for _ in 0..burst {
            let vel = Vec2::new(
                rng.random_range(-PARTICLE_MAX_SPEED..=PARTICLE_MAX_SPEED),
                rng.random_range(-PARTICLE_MAX_SPEED..=PARTICLE_MAX_SPEED),
            );
            self.particles.push(Particle {
                pos: at,
                vel,
                color,
                size: rng.random_range(PARTICLE_MIN_SIZE..=PARTICLE_MAX_SIZE),
                life: PARTICLE_LIFE,
            });
        }
    }

    /// Move every particle and drop the dead ones
    pub fn update(&mut self) {
        self.particles.retain_mut(Particle::tick);
    }

    pub fn iter(&self) -> impl Iterator<Item = &Particle> {
        self.particles.iter()
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn clear(&mut self) {
        self.particles.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_burst_size_and_ranges() {
        let mut rng = Pcg32::seed_from_u64(1);
        let mut system = ParticleSystem::default();
        let origin = Vec2::new(100.0, 50.0);
        system.spawn_burst(origin, Color::rgb(255, 0, 0), &mut rng);

        assert_eq!(system.len(), PARTICLE_BURST);
        for p in system.iter() {
            assert_eq!(p.pos, origin);
            assert_eq!(p.life, PARTICLE_LIFE);
            assert!((PARTICLE_MIN_SIZE..=PARTICLE_MAX_SIZE).contains(&p.size));
            assert!(p.vel.x.abs() <= PARTICLE_MAX_SPEED);
            assert!(p.vel.y.abs() <= PARTICLE_MAX_SPEED);
        }
    }

    #[test]
    fn test_particles_age_out() {
        let mut rng = Pcg32::seed_from_u64(2);
        let mut system = ParticleSystem::default();
        system.spawn_burst(Vec2::ZERO, Color::default(), &mut rng);

        let first = system.iter().next().unwrap().clone();
        system.update();
        let moved = system.iter().next().unwrap();
        assert_eq!(moved.pos, first.pos + first.vel);
        assert_eq!(moved.life, PARTICLE_LIFE - 1.0);

        for _ in 1..PARTICLE_LIFE as usize {
            system.update();
        }
        assert!(system.is_empty());
    }

    #[test]
    fn test_cap_evicts_oldest() {
        let mut rng = Pcg32::seed_from_u64(3);
        let mut system = ParticleSystem::new(10, 15);
        system.spawn_burst(Vec2::ZERO, Color::rgb(1, 1, 1), &mut rng);
        system.spawn_burst(Vec2::ONE, Color::rgb(2, 2, 2), &mut rng);
        assert_eq!(system.len(), 15);
        assert_eq!(system.iter().filter(|p| p.color == Color::rgb(2, 2, 2)).count(), 10);
    }

    #[test]
    fn test_burst_larger_than_cap() {
        let mut rng = Pcg32::seed_from_u64(5);
        let mut system = ParticleSystem::new(10, 4);
        system.spawn_burst(Vec2::ZERO, Color::rgb(1, 1, 1), &mut rng);
        assert_eq!(system.len(), 4);
        system.spawn_burst(Vec2::ONE, Color::rgb(2, 2, 2), &mut rng);
        assert_eq!(system.len(), 4);
        assert!(system.iter().all(|p| p.color == Color::rgb(2, 2, 2)));
    }

    #[test]
    fn test_disabled_system_spawns_nothing() {
        let mut rng = Pcg32::seed_from_u64(4);
        let mut system = ParticleSystem::new(10, 0);
        system.spawn_burst(Vec2::ZERO, Color::default(), &mut rng);
        assert!(system.is_empty());
    }
}
