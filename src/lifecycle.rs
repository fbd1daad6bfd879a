//! Per-frame particle lifecycle: aging, motion, drag and spline-driven visuals.
//!
//! Each call to [`Simulator::tick`] advances every live particle by the frame's
//! elapsed time:
//!
//! 1. `life` is reduced by `dt` and the age fraction recomputed.
//! 2. `position` is integrated from `velocity`.
//! 3. `rotation` advances at a constant angular rate.
//! 4. `alpha`, `current_size` and `current_color` are read from the
//!    [`FireSplines`] at the age fraction.
//! 5. Drag is removed from `velocity`, clamped per axis so it can slow a
//!    component down to zero but never flip its sign.
//!
//! Particles that run out of life stay in their slot and are skipped from then
//! on. Storage is only reset by a respawn.

use glam::Vec3;

use crate::config::{LifecycleConfig, SplineConfig};
use crate::particle::Particle;
use crate::spline::{Lerp, Spline};

/// Convert a `0xRRGGBB` color to RGB in `0.0..=1.0`.
pub fn rgb_hex(hex: u32) -> Vec3 {
    Vec3::new(
        ((hex >> 16) & 0xff) as f32 / 255.0,
        ((hex >> 8) & 0xff) as f32 / 255.0,
        (hex & 0xff) as f32 / 255.0,
    )
}

/// The three splines that drive a particle's look over its life.
#[derive(Debug, Clone)]
pub struct FireSplines {
    /// Opacity by age fraction.
    pub alpha: Spline<f32>,
    /// Size multiplier by age fraction.
    pub size: Spline<f32>,
    /// RGB color by age fraction.
    pub color: Spline<Vec3>,
}

impl FireSplines {
    /// Build the splines from configured control points.
    pub fn from_config(config: &SplineConfig) -> Self {
        Self {
            alpha: Spline::from_points(<f32 as Lerp>::lerp, config.alpha.iter().copied()),
            size: Spline::from_points(<f32 as Lerp>::lerp, config.size.iter().copied()),
            color: Spline::from_points(<Vec3 as Lerp>::lerp, config.color.iter().copied()),
        }
    }
}

impl Default for FireSplines {
    /// Fade in quickly, hold, fade out; swell to 5x at mid-life; shift from
    /// pale yellow to salmon.
    fn default() -> Self {
        Self::from_config(&SplineConfig::default())
    }
}

/// Advances particles by one frame.
#[derive(Debug, Clone)]
pub struct Simulator {
    angular_rate: f32,
    drag: f32,
}

impl Default for Simulator {
    fn default() -> Self {
        Self::new(&LifecycleConfig::default())
    }
}

impl Simulator {
    pub fn new(config: &LifecycleConfig) -> Self {
        Self {
            angular_rate: config.angular_rate,
            drag: config.drag,
        }
    }

    /// Advance every live particle by `dt` seconds.
    ///
    /// A non-positive or non-finite `dt` leaves all particles untouched.
    pub fn tick(&self, particles: &mut [Particle], dt: f32, splines: &FireSplines) {
        if !(dt > 0.0) || !dt.is_finite() {
            return;
        }

        for p in particles.iter_mut().filter(|p| p.is_alive()) {
            p.life -= dt;
            let t = p.age_fraction();

            p.position += p.velocity * dt;
            p.rotation += dt * self.angular_rate;

            if let Some(alpha) = splines.alpha.get(t) {
                p.alpha = alpha;
            }
            if let Some(scale) = splines.size.get(t) {
                p.current_size = p.size * scale;
            }
            if let Some(color) = splines.color.get(t) {
                p.current_color = color;
            }

            p.velocity -= clamped_drag(p.velocity, p.velocity * (dt * self.drag));
        }
    }
}

/// Clamp `drag` per axis to the sign of `velocity` and at most its magnitude.
fn clamped_drag(velocity: Vec3, drag: Vec3) -> Vec3 {
    let axis = |v: f32, d: f32| {
        if v == 0.0 {
            0.0
        } else {
            v.signum() * d.abs().min(v.abs())
        }
    };
    Vec3::new(
        axis(velocity.x, drag.x),
        axis(velocity.y, drag.y),
        axis(velocity.z, drag.z),
    )
}

/// Advance `particles` with the default rates.
pub fn tick(particles: &mut [Particle], dt: f32, splines: &FireSplines) {
    Simulator::default().tick(particles, dt, splines);
}
