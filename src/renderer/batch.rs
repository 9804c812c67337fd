//! Frame batching for the GPU renderer

use glam::Vec2;

use super::Surface;
use super::shapes;
use super::vertex::{Color, Vertex};

/// A line of text the host page positions over the canvas
#[derive(Debug, Clone, PartialEq)]
pub struct TextLabel {
    pub text: String,
    pub x: f32,
    pub y: f32,
    pub color: Color,
}

/// Collects one frame of draw calls as triangles plus text labels
#[derive(Debug, Default)]
pub struct ShapeBatch {
    vertices: Vec<Vertex>,
    labels: Vec<TextLabel>,
}

impl ShapeBatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Triangle-list vertices in canvas pixel coordinates
    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    pub fn labels(&self) -> &[TextLabel] {
        &self.labels
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty() && self.labels.is_empty()
    }
}

impl Surface for ShapeBatch {
    fn clear(&mut self) {
        self.vertices.clear();
        self.labels.clear();
    }

    fn fill_rect(&mut self, x: f32, y: f32, width: f32, height: f32, color: Color) {
        self.vertices.extend_from_slice(&shapes::rect(
            Vec2::new(x, y),
            Vec2::new(width, height),
            color,
        ));
    }

    fn fill_circle(&mut self, cx: f32, cy: f32, radius: f32, color: Color) {
        let segments = shapes::circle_segments(radius);
        self.vertices
            .extend(shapes::circle(Vec2::new(cx, cy), radius, color, segments));
    }

    fn fill_text(&mut self, text: &str, x: f32, y: f32, color: Color) {
        self.labels.push(TextLabel {
            text: text.to_string(),
            x,
            y,
            color,
        });
    }
}
