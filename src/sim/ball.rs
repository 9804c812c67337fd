//! The ball

use glam::Vec2;

use crate::renderer::{Surface, colors};

/// A ball entity; velocity is in pixels per tick
#[derive(Debug, Clone, PartialEq)]
pub struct Ball {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
}

impl Ball {
    pub fn new(pos: Vec2, vel: Vec2, radius: f32) -> Self {
        Self { pos, vel, radius }
    }

    pub fn draw(&self, surface: &mut impl Surface) {
        surface.fill_circle(self.pos.x, self.pos.y, self.radius, colors::ACCENT);
    }

    /// Move by one tick of velocity
    #[inline]
    pub fn advance(&mut self) {
        self.pos += self.vel;
    }

    /// Where the ball will be after the next advance
    #[inline]
    pub fn projected(&self) -> Vec2 {
        self.pos + self.vel
    }

    pub fn reset(&mut self, pos: Vec2, vel: Vec2) {
        self.pos = pos;
        self.vel = vel;
    }

    #[inline]
    pub fn speed(&self) -> f32 {
        self.vel.length()
    }

    /// Rescale velocity to `speed`, keeping the heading
    pub fn set_speed(&mut self, speed: f32) {
        let angle = self.vel.y.atan2(self.vel.x);
        self.vel = Vec2::new(speed * angle.cos(), speed * angle.sin());
    }

    /// Clamp speed to `max` without changing heading
    pub fn cap_speed(&mut self, max: f32) {
        if self.speed() > max {
            self.set_speed(max);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::ShapeBatch;

    #[test]
    fn test_advance_and_reset() {
        let mut ball = Ball::new(Vec2::new(300.0, 670.0), Vec2::new(2.0, -2.0), 5.0);
        ball.advance();
        assert_eq!(ball.pos, Vec2::new(302.0, 668.0));

        ball.reset(Vec2::new(1.0, 2.0), Vec2::new(3.0, 4.0));
        assert_eq!(ball.pos, Vec2::new(1.0, 2.0));
        assert_eq!(ball.vel, Vec2::new(3.0, 4.0));
        assert!((ball.speed() - 5.0).abs() < 1e-6);
    }

    #[test]
    fn test_set_speed_keeps_heading() {
        let mut ball = Ball::new(Vec2::ZERO, Vec2::new(3.0, -4.0), 5.0);
        ball.set_speed(10.0);
        assert!((ball.vel.x - 6.0).abs() < 1e-4);
        assert!((ball.vel.y + 8.0).abs() < 1e-4);
    }

    #[test]
    fn test_cap_speed() {
        let mut ball = Ball::new(Vec2::ZERO, Vec2::new(0.0, 12.0), 5.0);
        ball.cap_speed(10.0);
        assert!((ball.speed() - 10.0).abs() < 1e-4);
        assert!(ball.vel.y > 0.0);

        let mut slow = Ball::new(Vec2::ZERO, Vec2::new(1.0, 1.0), 5.0);
        slow.cap_speed(10.0);
        assert_eq!(slow.vel, Vec2::new(1.0, 1.0));
    }

    #[test]
    fn test_draw_circle() {
        let ball = Ball::new(Vec2::new(50.0, 50.0), Vec2::ZERO, 5.0);
        let mut batch = ShapeBatch::new();
        ball.draw(&mut batch);
        assert!(!batch.vertices().is_empty());
        assert_eq!(batch.vertices()[0].position, [50.0, 50.0]);
    }
}
