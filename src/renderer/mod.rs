//! Rendering
//!
//! The simulation draws through the [`Surface`] trait in canvas pixel
//! coordinates (origin top-left, y down). [`ShapeBatch`] tessellates those
//! calls into vertices for the WebGPU [`RenderState`] and keeps text as labels
//! for the host page to place.

pub mod batch;
pub mod pipeline;
pub mod shapes;
pub mod vertex;

pub use batch::{ShapeBatch, TextLabel};
pub use pipeline::{RenderError, RenderState};
pub use vertex::{Color, Vertex, colors};

/// 2D drawing primitives over a canvas-sized coordinate space
pub trait Surface {
    /// Drop everything drawn so far this frame
    fn clear(&mut self);
    /// Axis-aligned filled rectangle with its top-left corner at (x, y)
    fn fill_rect(&mut self, x: f32, y: f32, width: f32, height: f32, color: Color);
    /// Filled circle centred on (cx, cy)
    fn fill_circle(&mut self, cx: f32, cy: f32, radius: f32, color: Color);
    /// Text with its baseline starting at (x, y)
    fn fill_text(&mut self, text: &str, x: f32, y: f32, color: Color);
}
