//! Fire sprite image loading.
//!
//! The sprite is an RGBA image sampled by the fragment stage. It is normally
//! loaded from disk; when the file is missing the host falls back to a
//! procedural soft radial glow so the effect still renders.
//!
//! # Supported Formats
//!
//! - PNG (recommended)
//! - JPEG

use std::path::Path;

use crate::error::TextureError;

/// Decoded RGBA sprite ready for upload.
#[derive(Debug, Clone, PartialEq)]
pub struct SpriteTexture {
    /// Raw RGBA pixel data (width * height * 4 bytes).
    pub data: Vec<u8>,
    /// Texture width in pixels.
    pub width: u32,
    /// Texture height in pixels.
    pub height: u32,
}

impl SpriteTexture {
    /// Wrap raw RGBA data.
    pub fn from_rgba(data: Vec<u8>, width: u32, height: u32) -> Result<Self, TextureError> {
        let expected = width as usize * height as usize * 4;
        if data.len() != expected {
            return Err(TextureError::SizeMismatch {
                width,
                height,
                expected,
                actual: data.len(),
            });
        }
        Ok(Self { data, width, height })
    }

    /// Load and decode an image file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, TextureError> {
        let bytes = std::fs::read(path.as_ref())?;
        let img = image::load_from_memory(&bytes)?.into_rgba8();
        let (width, height) = img.dimensions();
        Ok(Self {
            data: img.into_raw(),
            width,
            height,
        })
    }

    /// Load `path`, or fall back to [`SpriteTexture::radial_glow`] with a
    /// warning when it cannot be read.
    pub fn load_or_glow<P: AsRef<Path>>(path: P) -> Self {
        match Self::from_file(path.as_ref()) {
            Ok(texture) => {
                log::info!(
                    "loaded fire sprite {} ({}x{})",
                    path.as_ref().display(),
                    texture.width,
                    texture.height
                );
                texture
            }
            Err(e) => {
                log::warn!(
                    "could not load fire sprite {}: {}; using procedural glow",
                    path.as_ref().display(),
                    e
                );
                Self::radial_glow(64)
            }
        }
    }

    /// Soft white disc fading to transparent at the edge.
    pub fn radial_glow(size: u32) -> Self {
        let size = size.max(1);
        let mut data = Vec::with_capacity((size * size * 4) as usize);
        let half = size as f32 * 0.5;
        for y in 0..size {
            for x in 0..size {
                let dx = (x as f32 + 0.5 - half) / half;
                let dy = (y as f32 + 0.5 - half) / half;
                let falloff = (1.0 - (dx * dx + dy * dy).sqrt()).clamp(0.0, 1.0);
                let a = (falloff * falloff * 255.0).round() as u8;
                data.extend_from_slice(&[255, 255, 255, a]);
            }
        }
        Self {
            data,
            width: size,
            height: size,
        }
    }
}
