//! Scene configuration.
//!
//! [`FireConfig`] collects every tunable of the effect: the spawn batch,
//! lifecycle rates, spline control points, and the host window/camera. All
//! fields have defaults matching the stock fire effect, so a JSON file only
//! needs the values it changes:
//!
//! ```json
//! {
//!     "emitter": { "count": 200 },
//!     "host": { "fov_degrees": 45.0, "restart_key": "R" }
//! }
//! ```

use std::path::{Path, PathBuf};

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::input::KeyCode;
use crate::lifecycle::rgb_hex;

/// Spawn batch parameters.
///
/// Lifetime is `(U * (1 - min_life_fraction) + min_life_fraction) * life_scale`
/// and size is `(U * (1 - min_size_fraction) + min_size_fraction) * size_scale`
/// for a uniform `U` in `[0, 1)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EmitterConfig {
    /// Particles per batch.
    pub count: usize,
    /// Half-size of the spawn cube centred on the origin.
    pub half_extent: f32,
    /// Longest possible lifetime in seconds.
    pub life_scale: f32,
    /// Shortest lifetime as a fraction of `life_scale`.
    pub min_life_fraction: f32,
    /// Largest possible base size.
    pub size_scale: f32,
    /// Smallest size as a fraction of `size_scale`.
    pub min_size_fraction: f32,
    /// Initial velocity shared by every particle.
    pub velocity: Vec3,
}

impl Default for EmitterConfig {
    fn default() -> Self {
        Self {
            count: 20,
            half_extent: 1.0,
            life_scale: 10.0,
            min_life_fraction: 0.25,
            size_scale: 4.0,
            min_size_fraction: 0.5,
            velocity: Vec3::new(0.0, -15.0, 0.0),
        }
    }
}

/// Per-tick rates applied by the simulator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LifecycleConfig {
    /// Sprite rotation speed in radians per second.
    pub angular_rate: f32,
    /// Fraction of velocity removed per second.
    pub drag: f32,
}

impl Default for LifecycleConfig {
    fn default() -> Self {
        Self {
            angular_rate: 0.5,
            drag: 0.1,
        }
    }
}

/// Control points of the three lifecycle splines, keyed by age fraction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SplineConfig {
    pub alpha: Vec<(f32, f32)>,
    pub size: Vec<(f32, f32)>,
    pub color: Vec<(f32, Vec3)>,
}

impl Default for SplineConfig {
    fn default() -> Self {
        Self {
            alpha: vec![(0.0, 0.0), (0.1, 1.0), (0.6, 1.0), (1.0, 0.0)],
            size: vec![(0.0, 1.0), (0.5, 5.0), (1.0, 1.0)],
            color: vec![(0.0, rgb_hex(0xffff80)), (1.0, rgb_hex(0xff8080))],
        }
    }
}

/// Window, camera and asset settings for the host application.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HostConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
    /// Vertical field of view in degrees.
    pub fov_degrees: f32,
    /// Initial camera position; the camera looks at the origin.
    pub camera_position: Vec3,
    /// Key that respawns the particle batch on release.
    pub restart_key: KeyCode,
    /// Key that toggles the simulation clock.
    pub pause_key: KeyCode,
    /// Multiplier applied to the real frame delta.
    pub time_scale: f32,
    /// Fire sprite image.
    pub texture_path: PathBuf,
    /// Background color (RGB, 0.0-1.0).
    pub clear_color: Vec3,
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            title: "pyre".to_string(),
            width: 1280,
            height: 720,
            fov_degrees: 60.0,
            camera_position: Vec3::new(0.0, 12.0, 6.0),
            restart_key: KeyCode::Space,
            pause_key: KeyCode::P,
            time_scale: 1.0,
            texture_path: PathBuf::from("assets/images/fire.png"),
            clear_color: Vec3::new(0.02, 0.02, 0.05),
        }
    }
}

/// Complete configuration of the fire scene.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FireConfig {
    pub emitter: EmitterConfig,
    pub lifecycle: LifecycleConfig,
    pub splines: SplineConfig,
    pub host: HostConfig,
}

impl FireConfig {
    /// Create the stock fire configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Read and validate a JSON configuration file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path.as_ref())?;
        let config = Self::from_json_str(&text)?;
        log::info!("loaded config from {}", path.as_ref().display());
        Ok(config)
    }

    /// Parse and validate a JSON configuration.
    pub fn from_json_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize to pretty-printed JSON.
    pub fn to_json_string(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Set the number of particles per batch.
    pub fn with_batch_size(mut self, count: usize) -> Self {
        self.emitter.count = count;
        self
    }

    /// Set the vertical field of view in degrees.
    pub fn with_fov(mut self, degrees: f32) -> Self {
        self.host.fov_degrees = degrees;
        self
    }

    /// Set the key that restarts the effect.
    pub fn with_restart_key(mut self, key: KeyCode) -> Self {
        self.host.restart_key = key;
        self
    }

    /// Set the fire sprite path.
    pub fn with_texture_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.host.texture_path = path.into();
        self
    }

    /// Check value ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let e = &self.emitter;
        if e.count == 0 {
            return Err(invalid("emitter.count", "batch must hold at least one particle"));
        }
        if !(e.life_scale > 0.0) {
            return Err(invalid("emitter.life_scale", "must be positive"));
        }
        if !(e.min_life_fraction > 0.0 && e.min_life_fraction <= 1.0) {
            return Err(invalid("emitter.min_life_fraction", "must be in (0, 1]"));
        }
        if !(e.size_scale >= 0.0) {
            return Err(invalid("emitter.size_scale", "must not be negative"));
        }
        if !(0.0..=1.0).contains(&e.min_size_fraction) {
            return Err(invalid("emitter.min_size_fraction", "must be in [0, 1]"));
        }
        if !(e.half_extent >= 0.0) {
            return Err(invalid("emitter.half_extent", "must not be negative"));
        }
        if !(self.lifecycle.drag >= 0.0) {
            return Err(invalid("lifecycle.drag", "must not be negative"));
        }

        let h = &self.host;
        if h.width == 0 || h.height == 0 {
            return Err(invalid("host.width/height", "window must have a non-zero size"));
        }
        if !(h.fov_degrees > 0.0 && h.fov_degrees < 180.0) {
            return Err(invalid("host.fov_degrees", "must be in (0, 180)"));
        }
        if !(h.time_scale >= 0.0 && h.time_scale.is_finite()) {
            return Err(invalid("host.time_scale", "must be finite and not negative"));
        }
        Ok(())
    }
}

fn invalid(field: &'static str, reason: &str) -> ConfigError {
    ConfigError::Invalid {
        field,
        reason: reason.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = FireConfig::new();
        assert!(config.validate().is_ok());
        assert_eq!(config.emitter.count, 20);
        assert_eq!(config.emitter.velocity, Vec3::new(0.0, -15.0, 0.0));
        assert_eq!(config.host.fov_degrees, 60.0);
        assert_eq!(config.host.restart_key, KeyCode::Space);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = FireConfig::from_json_str(
            r#"{ "emitter": { "count": 64 }, "host": { "restart_key": "R" } }"#,
        )
        .unwrap();

        assert_eq!(config.emitter.count, 64);
        assert_eq!(config.emitter.life_scale, 10.0);
        assert_eq!(config.host.restart_key, KeyCode::R);
        assert_eq!(config.splines, SplineConfig::default());
    }

    #[test]
    fn test_json_round_trip() {
        let config = FireConfig::new().with_batch_size(5).with_fov(45.0);
        let text = config.to_json_string().unwrap();
        let parsed = FireConfig::from_json_str(&text).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_rejects_empty_batch() {
        let err = FireConfig::new().with_batch_size(0).validate().unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "emitter.count", .. }));
    }

    #[test]
    fn test_rejects_bad_fov() {
        assert!(FireConfig::new().with_fov(0.0).validate().is_err());
        assert!(FireConfig::new().with_fov(180.0).validate().is_err());
        assert!(FireConfig::new().with_fov(f32::NAN).validate().is_err());
    }

    #[test]
    fn test_time_scale_from_json() {
        let config = FireConfig::from_json_str(r#"{ "host": { "time_scale": 0.5 } }"#).unwrap();
        assert_eq!(config.host.time_scale, 0.5);
        assert_eq!(FireConfig::new().host.time_scale, 1.0);

        let err = FireConfig::from_json_str(r#"{ "host": { "time_scale": -2.0 } }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "host.time_scale", .. }));
    }

    #[test]
    fn test_rejects_malformed_json() {
        let err = FireConfig::from_json_str("{ not json").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }
}
