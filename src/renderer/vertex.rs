//! Vertex types for 2D rendering

use bytemuck::{Pod, Zeroable};

/// sRGB-encoded RGBA color, written unchanged to a non-sRGB surface
pub type Color = [f32; 4];

/// Simple 2D vertex with position and color
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 2],
    pub color: Color,
}

impl Vertex {
    pub const fn new(x: f32, y: f32, color: Color) -> Self {
        Self {
            position: [x, y],
            color,
        }
    }

    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 0,
                    format: wgpu::VertexFormat::Float32x2,
                },
                wgpu::VertexAttribute {
                    offset: std::mem::size_of::<[f32; 2]>() as wgpu::BufferAddress,
                    shader_location: 1,
                    format: wgpu::VertexFormat::Float32x4,
                },
            ],
        }
    }
}

/// Colors for game elements (CSS names from the page stylesheet)
pub mod colors {
    use super::Color;

    /// #0095DD - ball, paddle and HUD text
    pub const ACCENT: Color = [0.0, 0.584, 0.867, 1.0];
    pub const BRICK_DEFAULT: Color = [0.502, 0.0, 0.502, 1.0]; // purple
    pub const BRICK_YELLOW: Color = [1.0, 1.0, 0.0, 1.0];
    pub const BRICK_GREEN: Color = [0.0, 0.502, 0.0, 1.0];
    pub const BRICK_RED: Color = [1.0, 0.0, 0.0, 1.0];
    pub const BRICK_BLUE: Color = [0.0, 0.0, 1.0, 1.0];
    pub const BACKGROUND: Color = [0.933, 0.933, 0.933, 1.0];

    /// CSS `rgb()` string for DOM text overlays
    pub fn to_css(color: Color) -> String {
        format!(
            "rgb({}, {}, {})",
            (color[0] * 255.0).round() as u8,
            (color[1] * 255.0).round() as u8,
            (color[2] * 255.0).round() as u8
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vertex_layout_stride() {
        assert_eq!(std::mem::size_of::<Vertex>(), 24);
        assert_eq!(Vertex::desc().array_stride, 24);
    }

    #[test]
    fn test_to_css() {
        assert_eq!(colors::to_css(colors::ACCENT), "rgb(0, 149, 221)");
        assert_eq!(colors::to_css(colors::BRICK_RED), "rgb(255, 0, 0)");
    }
}
