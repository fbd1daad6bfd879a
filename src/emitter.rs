//! Batch spawning of fire particles.
//!
//! The [`Emitter`] produces a whole batch at once: the initial spawn and every
//! restart replace the live set wholesale. Randomness comes from the caller's
//! [`Rng`], so tests can spawn deterministic batches from a seeded generator.
//!
//! # Example
//!
//! ```
//! use pyre::Emitter;
//! use rand::SeedableRng;
//!
//! let mut rng = rand::rngs::StdRng::seed_from_u64(7);
//! let batch = Emitter::default().spawn_batch(&mut rng, 20);
//! assert_eq!(batch.len(), 20);
//! assert!(batch.iter().all(|p| p.life == p.max_life && p.life > 0.0));
//! ```

use std::f32::consts::TAU;

use glam::Vec3;
use rand::Rng;

use crate::config::EmitterConfig;
use crate::particle::{Particle, ParticlePool};

/// Spawns batches of particles inside a cube around the origin.
#[derive(Debug, Clone, Default)]
pub struct Emitter {
    config: EmitterConfig,
}

impl Emitter {
    /// Create an emitter from its configuration.
    pub fn new(config: EmitterConfig) -> Self {
        Self { config }
    }

    /// The emitter configuration.
    pub fn config(&self) -> &EmitterConfig {
        &self.config
    }

    /// Configured batch size.
    pub fn batch_size(&self) -> usize {
        self.config.count
    }

    /// Spawn a single particle.
    pub fn spawn<R: Rng + ?Sized>(&self, rng: &mut R) -> Particle {
        let c = &self.config;
        let life =
            (rng.gen::<f32>() * (1.0 - c.min_life_fraction) + c.min_life_fraction) * c.life_scale;
        let position = Vec3::new(
            (rng.gen::<f32>() * 2.0 - 1.0) * c.half_extent,
            (rng.gen::<f32>() * 2.0 - 1.0) * c.half_extent,
            (rng.gen::<f32>() * 2.0 - 1.0) * c.half_extent,
        );
        let size =
            (rng.gen::<f32>() * (1.0 - c.min_size_fraction) + c.min_size_fraction) * c.size_scale;
        let color = Vec3::new(rng.gen(), rng.gen(), rng.gen());
        let rotation = rng.gen::<f32>() * TAU;

        Particle::new(position, c.velocity, size, color, rotation, life)
    }

    /// Spawn `count` particles.
    pub fn spawn_batch<R: Rng + ?Sized>(&self, rng: &mut R, count: usize) -> Vec<Particle> {
        (0..count).map(|_| self.spawn(rng)).collect()
    }

    /// Replace the contents of `pool` with a fresh batch filling its capacity.
    pub fn spawn_into<R: Rng + ?Sized>(&self, pool: &mut ParticlePool, rng: &mut R) {
        let count = pool.capacity();
        pool.replace((0..count).map(|_| self.spawn(rng)));
    }
}
