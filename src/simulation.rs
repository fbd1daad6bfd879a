//! The fire particle system and its per-frame entry point.
//!
//! [`FireSystem`] owns everything the effect needs between frames: the slot
//! pool, the lifecycle splines, the emitter and its random source, a queue of
//! pending [`FireEvent`]s, and the reusable [`RenderFeed`].
//!
//! The host calls [`FireSystem::on_frame`] exactly once per rendered frame.
//! Queued events are applied first, so a restart is never observed half-done:
//! the feed returned from a frame is built either entirely from the old batch
//! or entirely from the new one.
//!
//! # Example
//!
//! ```
//! use pyre::{FireConfig, FireEvent, FireSystem, Vec3};
//! use rand::SeedableRng;
//!
//! let rng = rand::rngs::StdRng::seed_from_u64(1);
//! let mut fire = FireSystem::new(&FireConfig::default(), rng);
//!
//! let feed = fire.on_frame(Vec3::new(0.0, 12.0, 6.0), 1.0 / 60.0);
//! assert_eq!(feed.len(), 20);
//!
//! fire.push_event(FireEvent::Restart);
//! fire.on_frame(Vec3::new(0.0, 12.0, 6.0), 1.0 / 60.0);
//! assert_eq!(fire.generation(), 1);
//! ```

use std::collections::VecDeque;

use glam::Vec3;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::config::FireConfig;
use crate::emitter::Emitter;
use crate::feed::RenderFeed;
use crate::lifecycle::{FireSplines, Simulator};
use crate::particle::ParticlePool;

/// Discrete input delivered from the host to the particle system.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FireEvent {
    /// Discard every particle and spawn a fresh batch.
    Restart,
}

/// Fire particle system state for one scene.
pub struct FireSystem<R: Rng = StdRng> {
    pool: ParticlePool,
    splines: FireSplines,
    emitter: Emitter,
    simulator: Simulator,
    rng: R,
    events: VecDeque<FireEvent>,
    feed: RenderFeed,
    generation: u64,
}

impl FireSystem<StdRng> {
    /// Create a system seeded from the operating system's entropy source.
    pub fn from_entropy(config: &FireConfig) -> Self {
        Self::new(config, StdRng::from_entropy())
    }
}

impl<R: Rng> FireSystem<R> {
    /// Create a system and spawn its first batch.
    pub fn new(config: &FireConfig, rng: R) -> Self {
        let count = config.emitter.count;
        let mut system = Self {
            pool: ParticlePool::with_capacity(count),
            splines: FireSplines::from_config(&config.splines),
            emitter: Emitter::new(config.emitter.clone()),
            simulator: Simulator::new(&config.lifecycle),
            rng,
            events: VecDeque::new(),
            feed: RenderFeed::with_capacity(count),
            generation: 0,
        };
        system.emitter.spawn_into(&mut system.pool, &mut system.rng);
        log::info!("spawned initial batch of {} particles", system.pool.len());
        system
    }

    /// Queue an event to be applied at the start of the next frame.
    pub fn push_event(&mut self, event: FireEvent) {
        self.events.push_back(event);
    }

    /// Replace the particle batch immediately.
    pub fn restart(&mut self) {
        self.emitter.spawn_into(&mut self.pool, &mut self.rng);
        self.generation += 1;
        log::info!(
            "restarted fire: generation {}, {} particles",
            self.generation,
            self.pool.len()
        );
    }

    /// Advance one frame and rebuild the render feed.
    ///
    /// Pending events are applied before the tick.
    pub fn on_frame(&mut self, camera_position: Vec3, dt: f32) -> &RenderFeed {
        while let Some(event) = self.events.pop_front() {
            match event {
                FireEvent::Restart => self.restart(),
            }
        }

        self.simulator
            .tick(self.pool.as_mut_slice(), dt, &self.splines);
        self.feed.rebuild(self.pool.as_slice(), camera_position);

        log::trace!("frame dt={:.4}s live={}", dt, self.feed.len());
        &self.feed
    }

    /// The most recently built render feed.
    pub fn feed(&self) -> &RenderFeed {
        &self.feed
    }

    /// The current particle batch.
    pub fn pool(&self) -> &ParticlePool {
        &self.pool
    }

    /// The lifecycle splines.
    pub fn splines(&self) -> &FireSplines {
        &self.splines
    }

    /// Number of restarts applied since creation.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Whether every particle in the current batch has died.
    pub fn is_exhausted(&self) -> bool {
        self.pool.live_count() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn system(count: usize) -> FireSystem {
        let config = FireConfig::new().with_batch_size(count);
        FireSystem::new(&config, StdRng::seed_from_u64(99))
    }

    #[test]
    fn test_initial_batch() {
        let fire = system(20);
        assert_eq!(fire.pool().len(), 20);
        assert_eq!(fire.generation(), 0);
        assert!(fire.feed().is_empty());
    }

    #[test]
    fn test_event_applied_on_next_frame() {
        let mut fire = system(5);
        fire.push_event(FireEvent::Restart);
        assert_eq!(fire.generation(), 0);

        fire.on_frame(Vec3::ZERO, 0.1);
        assert_eq!(fire.generation(), 1);
        assert_eq!(fire.feed().len(), 5);
    }

    #[test]
    fn test_batch_burns_out() {
        let mut fire = system(8);
        // Longest possible lifetime is 10s.
        for _ in 0..11 {
            fire.on_frame(Vec3::ZERO, 1.0);
        }
        assert!(fire.is_exhausted());
        assert!(fire.feed().is_empty());
        // Dead particles keep their slots.
        assert_eq!(fire.pool().len(), 8);
    }

    #[test]
    fn test_restart_revives_exhausted_system() {
        let mut fire = system(3);
        fire.on_frame(Vec3::ZERO, 11.0);
        assert!(fire.is_exhausted());

        fire.restart();
        let feed = fire.on_frame(Vec3::ZERO, 0.1);
        assert_eq!(feed.len(), 3);
    }
}
