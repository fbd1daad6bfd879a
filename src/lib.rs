//! # Pyre - Point Sprite Fire Effect
//!
//! A small batch of short-lived particles rendered as textured, additively
//! blended point sprites that read as a flickering flame.
//!
//! The crate is split into a pure simulation core and a windowed host:
//!
//! - [`Spline`] samples piecewise keyframe curves.
//! - [`Emitter`] spawns a randomised batch into a [`ParticlePool`].
//! - [`Simulator`] advances every particle by one frame delta and drives its
//!   alpha, size and colour from the [`FireSplines`].
//! - [`RenderFeed`] keeps the live particles, sorts them back to front and
//!   flattens them into the four arrays the shader consumes.
//! - [`FireSystem`] ties these together behind a single per-frame call and
//!   handles [`FireEvent::Restart`].
//! - [`run`] opens a window and drives all of it with wgpu.
//!
//! ## Quick Start
//!
//! ```
//! use pyre::prelude::*;
//! use rand::SeedableRng;
//!
//! let config = FireConfig::default();
//! let mut fire = FireSystem::new(&config, rand::rngs::StdRng::seed_from_u64(7));
//!
//! let camera = Vec3::new(0.0, 12.0, 6.0);
//! let feed = fire.on_frame(camera, 1.0 / 60.0);
//!
//! assert_eq!(feed.positions().len(), feed.len() * 3);
//! assert_eq!(feed.colors().len(), feed.len() * 4);
//! ```
//!
//! ## Lifecycle Curves
//!
//! Particle appearance is keyed on the age fraction
//! `1 - life / max_life`, which runs from 0 at spawn to 1 at death:
//!
//! | Curve | Keys |
//! |-------|------|
//! | alpha | 0 at 0, 1 at 0.1, 1 at 0.6, 0 at 1 |
//! | size  | 1 at 0, 5 at 0.5, 1 at 1 (multiplies spawn size) |
//! | colour | `#FFFF80` at 0, `#FF8080` at 1 |
//!
//! ## Running the Window
//!
//! ```no_run
//! fn main() -> Result<(), pyre::AppError> {
//!     pyre::run(pyre::FireConfig::default())
//! }
//! ```
//!
//! Hold the left mouse button to orbit, scroll to zoom, press the restart key
//! (Space by default) to respawn the batch and the pause key (P) to freeze time.

pub mod config;
pub mod emitter;
pub mod error;
pub mod feed;
mod gpu;
pub mod input;
pub mod lifecycle;
pub mod particle;
pub mod shading;
pub mod simulation;
pub mod spline;
pub mod textures;
pub mod time;
mod window;

pub use config::{EmitterConfig, FireConfig, HostConfig, LifecycleConfig, SplineConfig};
pub use emitter::Emitter;
pub use error::{AppError, ConfigError, GpuError, TextureError};
pub use feed::{build_feed, RenderFeed};
pub use glam::{Vec3, Vec4};
pub use lifecycle::{tick, FireSplines, Simulator};
pub use particle::{Particle, ParticlePool};
pub use simulation::{FireEvent, FireSystem};
pub use spline::{Lerp, Spline};
pub use textures::SpriteTexture;
pub use window::run;

/// Prelude module for convenient imports.
///
/// ```ignore
/// use pyre::prelude::*;
/// ```
pub mod prelude {
    pub use crate::config::FireConfig;
    pub use crate::emitter::Emitter;
    pub use crate::feed::RenderFeed;
    pub use crate::input::KeyCode;
    pub use crate::particle::Particle;
    pub use crate::simulation::{FireEvent, FireSystem};
    pub use crate::spline::Spline;
    pub use crate::{run, Vec3, Vec4};
}
