//! The player's paddle

use crate::renderer::{Surface, colors};

/// The player's paddle, anchored to the canvas bottom
#[derive(Debug, Clone, PartialEq)]
pub struct Paddle {
    /// Left edge (pixels)
    pub x: f32,
    pub width: f32,
    pub height: f32,
    /// Pixels moved per tick while a direction is held
    pub step: f32,
    pub left_pressed: bool,
    pub right_pressed: bool,
}

impl Paddle {
    pub fn new(x: f32, width: f32, height: f32, step: f32) -> Self {
        Self {
            x,
            width,
            height,
            step,
            left_pressed: false,
            right_pressed: false,
        }
    }

    /// Left edge that centres the paddle on a canvas
    pub fn centered_x(&self, canvas_width: f32) -> f32 {
        (canvas_width - self.width) / 2.0
    }

    pub fn draw(&self, surface: &mut impl Surface, canvas_height: f32) {
        surface.fill_rect(
            self.x,
            canvas_height - self.height,
            self.width,
            self.height,
            colors::ACCENT,
        );
    }

    /// Apply one tick of movement; right wins when both are held
    pub fn advance(&mut self, canvas_width: f32) {
        if self.right_pressed && self.x < canvas_width - self.width {
            self.x += self.step;
        } else if self.left_pressed && self.x > 0.0 {
            self.x -= self.step;
        }
        self.clamp_to(canvas_width);
    }

    /// Keep the paddle on the canvas
    pub fn clamp_to(&mut self, canvas_width: f32) {
        let max_x = (canvas_width - self.width).max(0.0);
        self.x = self.x.clamp(0.0, max_x);
    }

    pub fn reset(&mut self, x: f32) {
        self.x = x;
    }

    /// Whether `x` lies strictly inside the paddle's horizontal extent
    #[inline]
    pub fn overlaps_x(&self, x: f32) -> bool {
        x > self.x && x < self.x + self.width
    }

    /// Normalised hit position: -1 at the left edge, 0 centre, 1 right edge
    pub fn hit_offset(&self, x: f32) -> f32 {
        let half = self.width / 2.0;
        ((x - (self.x + half)) / half).clamp(-1.0, 1.0)
    }

    pub fn center_x(&self) -> f32 {
        self.x + self.width / 2.0
    }
}
