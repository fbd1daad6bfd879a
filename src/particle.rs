//! Particle records and slot storage.
//!
//! Every fire fragment is a [`Particle`]. A batch of particles lives in a
//! [`ParticlePool`], a contiguous container whose capacity is fixed when the
//! pool is created. Dead particles keep their slot until the whole batch is
//! replaced; they are simply skipped by the simulator and the render feed.

use glam::Vec3;

/// One simulated fire fragment.
///
/// `size` and `color` are set at spawn and never change. The `current_*`
/// fields and `alpha` are recomputed from the lifecycle splines every tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    /// World-space position.
    pub position: Vec3,
    /// Velocity in units per second.
    pub velocity: Vec3,
    /// Base scale.
    pub size: f32,
    /// Display scale (`size * size_spline(age)`).
    pub current_size: f32,
    /// Base hue (RGB, 0.0-1.0).
    pub color: Vec3,
    /// Display color from the color spline.
    pub current_color: Vec3,
    /// Display opacity from the alpha spline.
    pub alpha: f32,
    /// Sprite rotation in radians.
    pub rotation: f32,
    /// Remaining lifetime in seconds.
    pub life: f32,
    /// Total lifetime in seconds.
    pub max_life: f32,
}

impl Particle {
    /// Create a freshly spawned particle with full life.
    pub fn new(
        position: Vec3,
        velocity: Vec3,
        size: f32,
        color: Vec3,
        rotation: f32,
        life: f32,
    ) -> Self {
        Self {
            position,
            velocity,
            size,
            current_size: 1.0,
            color,
            current_color: color,
            alpha: 1.0,
            rotation,
            life,
            max_life: life,
        }
    }

    /// A particle is live while it has remaining life.
    #[inline]
    pub fn is_alive(&self) -> bool {
        self.life > 0.0
    }

    /// Elapsed-life ratio, `0.0` at spawn and `1.0` at death.
    ///
    /// A particle with no lifetime is treated as fully aged.
    #[inline]
    pub fn age_fraction(&self) -> f32 {
        if self.max_life > 0.0 {
            1.0 - self.life / self.max_life
        } else {
            1.0
        }
    }
}

/// Fixed-capacity slot storage for one particle batch.
#[derive(Debug, Clone, Default)]
pub struct ParticlePool {
    slots: Vec<Particle>,
    capacity: usize,
}

impl ParticlePool {
    /// Create an empty pool with room for `capacity` particles.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            capacity,
        }
    }

    /// Replace every slot with the particles from `batch`.
    ///
    /// Slots beyond the pool capacity are dropped; the previous batch is
    /// discarded completely, live or not.
    pub fn replace<I>(&mut self, batch: I)
    where
        I: IntoIterator<Item = Particle>,
    {
        self.slots.clear();
        self.slots.extend(batch.into_iter().take(self.capacity));
    }

    /// Remove every particle.
    pub fn clear(&mut self) {
        self.slots.clear();
    }

    /// Maximum number of slots.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of occupied slots, live or dead.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Whether no slot is occupied.
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Number of live particles.
    pub fn live_count(&self) -> usize {
        self.slots.iter().filter(|p| p.is_alive()).count()
    }

    /// Particle in `slot`, if occupied.
    pub fn get(&self, slot: usize) -> Option<&Particle> {
        self.slots.get(slot)
    }

    /// All occupied slots in slot order.
    pub fn as_slice(&self) -> &[Particle] {
        &self.slots
    }

    /// Mutable access to all occupied slots.
    pub fn as_mut_slice(&mut self) -> &mut [Particle] {
        &mut self.slots
    }

    /// Live particles with their slot index.
    pub fn iter_live(&self) -> impl Iterator<Item = (usize, &Particle)> {
        self.slots.iter().enumerate().filter(|(_, p)| p.is_alive())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn particle(life: f32) -> Particle {
        Particle::new(Vec3::ZERO, Vec3::new(0.0, -15.0, 0.0), 4.0, Vec3::ONE, 0.0, life)
    }

    #[test]
    fn test_new_particle_has_full_life() {
        let p = particle(7.5);
        assert_eq!(p.life, p.max_life);
        assert!(p.is_alive());
        assert_eq!(p.age_fraction(), 0.0);
        assert_eq!(p.current_color, p.color);
    }

    #[test]
    fn test_age_fraction_zero_lifetime() {
        let p = particle(0.0);
        assert!(!p.is_alive());
        assert_eq!(p.age_fraction(), 1.0);
    }

    #[test]
    fn test_pool_replace_discards_previous_batch() {
        let mut pool = ParticlePool::with_capacity(4);
        pool.replace((0..4).map(|_| particle(5.0)));
        assert_eq!(pool.len(), 4);

        pool.replace((0..2).map(|_| particle(1.0)));
        assert_eq!(pool.len(), 2);
        assert!(pool.as_slice().iter().all(|p| p.max_life == 1.0));
    }

    #[test]
    fn test_pool_respects_capacity() {
        let mut pool = ParticlePool::with_capacity(3);
        pool.replace((0..10).map(|_| particle(1.0)));
        assert_eq!(pool.len(), 3);
        assert_eq!(pool.capacity(), 3);
    }

    #[test]
    fn test_iter_live_skips_dead_slots() {
        let mut pool = ParticlePool::with_capacity(3);
        pool.replace([particle(1.0), particle(0.0), particle(2.0)]);

        let slots: Vec<usize> = pool.iter_live().map(|(i, _)| i).collect();
        assert_eq!(slots, vec![0, 2]);
        assert_eq!(pool.live_count(), 2);
    }
}
