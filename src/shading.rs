//! Shading contract for the fire point sprites.
//!
//! Each live particle is drawn as a camera-facing sprite whose on-screen size
//! is `size * point_multiplier / w`, where `w` is the clip-space depth and
//! `point_multiplier` converts world size to pixels for the current viewport
//! and field of view. The fragment stage rotates the sprite's texture
//! coordinates around the sprite centre by the particle angle, samples the
//! fire texture, and tints the sample with the particle's RGBA.
//!
//! Sprites are blended additively, depth tested against the scene, and never
//! write depth.
//!
//! # Attribute Layout
//!
//! The renderer binds the four [`crate::RenderFeed`] arrays as separate
//! per-instance vertex buffers:
//!
//! | Location | Name | Format |
//! |----------|------|--------|
//! | 0 | `point_position` | `Float32x3` |
//! | 1 | `point_size` | `Float32` |
//! | 2 | `colour` | `Float32x4` |
//! | 3 | `angle` | `Float32` |

use bytemuck::{Pod, Zeroable};
use glam::Mat4;

/// WGSL source of the fire sprite pipeline (`vs_main` / `fs_main`).
pub const FIRE_SHADER: &str = include_str!("fire.wgsl");

/// Vertices per sprite quad.
pub const QUAD_VERTICES: u32 = 6;

/// Depth buffer format used by the fire pipeline.
pub const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;

const POSITION_ATTRIBUTES: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![0 => Float32x3];
const SIZE_ATTRIBUTES: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![1 => Float32];
const COLOUR_ATTRIBUTES: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![2 => Float32x4];
const ANGLE_ATTRIBUTES: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![3 => Float32];

/// Uniform block shared by both shader stages.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct ShaderUniforms {
    pub view_proj: [[f32; 4]; 4],
    pub viewport: [f32; 2],
    pub point_multiplier: f32,
    pub _padding: f32,
}

impl ShaderUniforms {
    pub fn new(view_proj: Mat4, width: u32, height: u32, fov_y_radians: f32) -> Self {
        Self {
            view_proj: view_proj.to_cols_array_2d(),
            viewport: [width as f32, height as f32],
            point_multiplier: point_multiplier(height as f32, fov_y_radians),
            _padding: 0.0,
        }
    }
}

/// Pixels per world unit at unit clip depth: `h / (2 * tan(fov / 2))`.
pub fn point_multiplier(viewport_height: f32, fov_y_radians: f32) -> f32 {
    viewport_height / (2.0 * (0.5 * fov_y_radians).tan())
}

/// Additive blending: `src * src_alpha + dst`.
pub fn additive_blend() -> wgpu::BlendState {
    let component = wgpu::BlendComponent {
        src_factor: wgpu::BlendFactor::SrcAlpha,
        dst_factor: wgpu::BlendFactor::One,
        operation: wgpu::BlendOperation::Add,
    };
    wgpu::BlendState {
        color: component,
        alpha: component,
    }
}

/// Depth tested, no depth writes.
pub fn depth_state() -> wgpu::DepthStencilState {
    wgpu::DepthStencilState {
        format: DEPTH_FORMAT,
        depth_write_enabled: false,
        depth_compare: wgpu::CompareFunction::Less,
        stencil: wgpu::StencilState::default(),
        bias: wgpu::DepthBiasState::default(),
    }
}

/// Per-instance vertex buffer layouts, in render feed order.
pub fn feed_buffer_layouts() -> [wgpu::VertexBufferLayout<'static>; 4] {
    [
        instance_layout(3, &POSITION_ATTRIBUTES),
        instance_layout(1, &SIZE_ATTRIBUTES),
        instance_layout(4, &COLOUR_ATTRIBUTES),
        instance_layout(1, &ANGLE_ATTRIBUTES),
    ]
}

fn instance_layout(
    floats: u64,
    attributes: &'static [wgpu::VertexAttribute],
) -> wgpu::VertexBufferLayout<'static> {
    wgpu::VertexBufferLayout {
        array_stride: floats * std::mem::size_of::<f32>() as wgpu::BufferAddress,
        step_mode: wgpu::VertexStepMode::Instance,
        attributes,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Validates WGSL code using naga.
    fn validate_wgsl(code: &str) -> Result<naga::Module, String> {
        let module = naga::front::wgsl::parse_str(code)
            .map_err(|e| format!("WGSL parse error: {:?}", e))?;

        let mut validator = naga::valid::Validator::new(
            naga::valid::ValidationFlags::all(),
            naga::valid::Capabilities::all(),
        );
        validator
            .validate(&module)
            .map_err(|e| format!("WGSL validation error: {:?}", e))?;

        Ok(module)
    }

    #[test]
    fn test_fire_shader_validates() {
        let module = validate_wgsl(FIRE_SHADER).unwrap();
        let entry_points: Vec<&str> = module.entry_points.iter().map(|e| e.name.as_str()).collect();
        assert!(entry_points.contains(&"vs_main"));
        assert!(entry_points.contains(&"fs_main"));
    }

    #[test]
    fn test_point_multiplier_sixty_degrees() {
        let m = point_multiplier(720.0, 60f32.to_radians());
        // 720 / (2 * tan(30deg))
        assert!((m - 623.538).abs() < 1e-2, "{}", m);
    }

    #[test]
    fn test_point_multiplier_follows_fov() {
        let narrow = point_multiplier(720.0, 30f32.to_radians());
        let wide = point_multiplier(720.0, 90f32.to_radians());
        assert!(narrow > wide);
        assert!((wide - 360.0).abs() < 1e-3);
    }

    #[test]
    fn test_uniform_layout() {
        // mat4 + vec2 + f32 + pad, 16-byte aligned
        assert_eq!(std::mem::size_of::<ShaderUniforms>(), 80);
        let u = ShaderUniforms::new(Mat4::IDENTITY, 1280, 720, 60f32.to_radians());
        assert_eq!(u.viewport, [1280.0, 720.0]);
    }

    #[test]
    fn test_buffer_layouts() {
        let layouts = feed_buffer_layouts();
        let strides: Vec<u64> = layouts.iter().map(|l| l.array_stride).collect();
        assert_eq!(strides, vec![12, 4, 16, 4]);
        for (location, layout) in layouts.iter().enumerate() {
            assert_eq!(layout.step_mode, wgpu::VertexStepMode::Instance);
            assert_eq!(layout.attributes[0].shader_location, location as u32);
        }
    }

    #[test]
    fn test_pipeline_state() {
        let blend = additive_blend();
        assert_eq!(blend.color.dst_factor, wgpu::BlendFactor::One);
        assert!(!depth_state().depth_write_enabled);
    }
}
