//! Render feed: sorted, flattened per-point attributes for upload.
//!
//! The feed holds four parallel arrays with one entry per live particle:
//!
//! | Array | Width | Contents |
//! |-------|-------|----------|
//! | `positions` | 3 | world position |
//! | `sizes` | 1 | `current_size` |
//! | `colors` | 4 | `current_color.rgb`, `alpha` |
//! | `angles` | 1 | `rotation` |
//!
//! Entries are ordered back-to-front from the camera so alpha blending
//! composites correctly. Particles at the same distance keep slot order.

use glam::Vec3;

use crate::particle::Particle;

/// Flattened attribute arrays for one frame.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RenderFeed {
    positions: Vec<f32>,
    sizes: Vec<f32>,
    colors: Vec<f32>,
    angles: Vec<f32>,
    // Scratch (slot, squared distance) pairs reused between frames.
    order: Vec<(usize, f32)>,
}

impl RenderFeed {
    /// Create an empty feed.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty feed with room for `capacity` points.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            positions: Vec::with_capacity(capacity * 3),
            sizes: Vec::with_capacity(capacity),
            colors: Vec::with_capacity(capacity * 4),
            angles: Vec::with_capacity(capacity),
            order: Vec::with_capacity(capacity),
        }
    }

    /// Rebuild the feed from `particles` as seen from `camera`.
    ///
    /// Dead particles are skipped. Nothing in `particles` is modified.
    pub fn rebuild(&mut self, particles: &[Particle], camera: Vec3) {
        self.order.clear();
        self.order.extend(
            particles
                .iter()
                .enumerate()
                .filter(|(_, p)| p.is_alive())
                .map(|(slot, p)| (slot, camera.distance_squared(p.position))),
        );
        // Farthest first; equal distances fall back to slot order.
        self.order
            .sort_unstable_by(|a, b| b.1.total_cmp(&a.1).then(a.0.cmp(&b.0)));

        self.positions.clear();
        self.sizes.clear();
        self.colors.clear();
        self.angles.clear();

        for &(slot, _) in &self.order {
            let p = &particles[slot];
            self.positions.extend_from_slice(&p.position.to_array());
            self.sizes.push(p.current_size);
            self.colors.extend_from_slice(&p.current_color.extend(p.alpha).to_array());
            self.angles.push(p.rotation);
        }
    }

    /// Number of points in the feed.
    pub fn len(&self) -> usize {
        self.sizes.len()
    }

    /// Whether the feed has no points.
    pub fn is_empty(&self) -> bool {
        self.sizes.is_empty()
    }

    /// Positions, 3 floats per point.
    pub fn positions(&self) -> &[f32] {
        &self.positions
    }

    /// Display sizes, 1 float per point.
    pub fn sizes(&self) -> &[f32] {
        &self.sizes
    }

    /// RGBA colors, 4 floats per point.
    pub fn colors(&self) -> &[f32] {
        &self.colors
    }

    /// Sprite rotations, 1 float per point.
    pub fn angles(&self) -> &[f32] {
        &self.angles
    }

    /// Slot indices in feed order.
    pub fn slots(&self) -> impl Iterator<Item = usize> + '_ {
        self.order.iter().map(|&(slot, _)| slot)
    }

    /// Position of point `i`.
    pub fn position(&self, i: usize) -> Option<Vec3> {
        self.positions
            .get(i * 3..i * 3 + 3)
            .map(Vec3::from_slice)
    }

    /// Byte views of the four arrays for GPU upload, in
    /// `[positions, sizes, colors, angles]` order.
    pub fn as_bytes(&self) -> [&[u8]; 4] {
        [
            bytemuck::cast_slice(&self.positions),
            bytemuck::cast_slice(&self.sizes),
            bytemuck::cast_slice(&self.colors),
            bytemuck::cast_slice(&self.angles),
        ]
    }
}

/// Build a fresh feed from `particles` as seen from `camera`.
pub fn build_feed(particles: &[Particle], camera: Vec3) -> RenderFeed {
    let mut feed = RenderFeed::with_capacity(particles.len());
    feed.rebuild(particles, camera);
    feed
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(position: Vec3, life: f32) -> Particle {
        let mut p = Particle::new(position, Vec3::ZERO, 1.0, Vec3::new(0.1, 0.2, 0.3), 0.7, life);
        p.alpha = 0.4;
        p.current_size = 2.5;
        p
    }

    #[test]
    fn test_sorted_back_to_front() {
        let particles = [
            at(Vec3::new(0.0, 0.0, 1.0), 1.0),
            at(Vec3::new(0.0, 0.0, 5.0), 1.0),
            at(Vec3::new(0.0, 0.0, 3.0), 1.0),
        ];
        let feed = build_feed(&particles, Vec3::new(0.0, 0.0, 10.0));

        assert_eq!(feed.slots().collect::<Vec<_>>(), vec![0, 2, 1]);
        assert_eq!(feed.position(0), Some(Vec3::new(0.0, 0.0, 1.0)));
        assert_eq!(feed.position(2), Some(Vec3::new(0.0, 0.0, 5.0)));
    }

    #[test]
    fn test_dead_particles_excluded() {
        let particles = [
            at(Vec3::X, 0.0),
            at(Vec3::Y, 1.0),
            at(Vec3::Z, -2.0),
        ];
        let feed = build_feed(&particles, Vec3::ZERO);
        assert_eq!(feed.len(), 1);
        assert_eq!(feed.position(0), Some(Vec3::Y));
    }

    #[test]
    fn test_parallel_array_widths() {
        let particles = [at(Vec3::new(1.0, 2.0, 3.0), 1.0), at(Vec3::ZERO, 1.0)];
        let feed = build_feed(&particles, Vec3::new(0.0, 0.0, -10.0));

        assert_eq!(feed.positions().len(), 6);
        assert_eq!(feed.sizes().len(), 2);
        assert_eq!(feed.colors().len(), 8);
        assert_eq!(feed.angles().len(), 2);

        assert_eq!(&feed.positions()[..3], &[1.0, 2.0, 3.0]);
        assert_eq!(feed.sizes()[0], 2.5);
        assert_eq!(&feed.colors()[..4], &[0.1, 0.2, 0.3, 0.4]);
        assert_eq!(feed.angles()[0], 0.7);
    }

    #[test]
    fn test_ties_keep_slot_order() {
        let particles = [
            at(Vec3::X, 1.0),
            at(Vec3::Y, 1.0),
            at(Vec3::NEG_X, 1.0),
            at(Vec3::NEG_Y, 1.0),
        ];
        let feed = build_feed(&particles, Vec3::ZERO);
        assert_eq!(feed.slots().collect::<Vec<_>>(), vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_rebuild_replaces_previous_contents() {
        let mut feed = RenderFeed::new();
        feed.rebuild(&[at(Vec3::X, 1.0), at(Vec3::Y, 1.0)], Vec3::ZERO);
        assert_eq!(feed.len(), 2);

        feed.rebuild(&[at(Vec3::Z, 1.0)], Vec3::ZERO);
        assert_eq!(feed.len(), 1);
        assert_eq!(feed.positions().len(), 3);
    }

    #[test]
    fn test_byte_views() {
        let feed = build_feed(&[at(Vec3::ONE, 1.0)], Vec3::ZERO);
        let [pos, size, color, angle] = feed.as_bytes();
        assert_eq!(pos.len(), 12);
        assert_eq!(size.len(), 4);
        assert_eq!(color.len(), 16);
        assert_eq!(angle.len(), 4);
    }
}
