//! Shape generation for 2D primitives

use glam::Vec2;
use std::f32::consts::TAU;

use super::vertex::{Color, Vertex};

/// Segments used for a circle of the given pixel radius
pub fn circle_segments(radius: f32) -> u32 {
    // Small balls look round with few segments; powered-up ones need more
    ((radius * 2.0).ceil() as u32).clamp(12, 48)
}

/// Generate vertices for a filled circle
pub fn circle(center: Vec2, radius: f32, color: Color, segments: u32) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity((segments * 3) as usize);

    for i in 0..segments {
        let theta1 = (i as f32 / segments as f32) * TAU;
        let theta2 = ((i + 1) as f32 / segments as f32) * TAU;

        // Triangle from center to edge
        vertices.push(Vertex::new(center.x, center.y, color));
        vertices.push(Vertex::new(
            center.x + radius * theta1.cos(),
            center.y + radius * theta1.sin(),
            color,
        ));
        vertices.push(Vertex::new(
            center.x + radius * theta2.cos(),
            center.y + radius * theta2.sin(),
            color,
        ));
    }

    vertices
}

/// Generate vertices for an axis-aligned filled rectangle
pub fn rect(origin: Vec2, size: Vec2, color: Color) -> [Vertex; 6] {
    let min = origin;
    let max = origin + size;
    [
        Vertex::new(min.x, min.y, color),
        Vertex::new(max.x, min.y, color),
        Vertex::new(min.x, max.y, color),
        Vertex::new(min.x, max.y, color),
        Vertex::new(max.x, min.y, color),
        Vertex::new(max.x, max.y, color),
    ]
}
