//! Collision detection for the ball against bricks, walls and paddle
//!
//! Bricks are tested by point containment of the ball centre. The swept test
//! walks the tick's displacement in roughly one-pixel sub-steps so a fast
//! ball cannot skip over a brick between frames.

use glam::Vec2;
use rand::Rng;

use super::brick::BrickField;
use super::grid::GridIndex;
use crate::consts::{NUDGE_AMOUNT, NUDGE_THRESHOLD};

/// A brick the ball is inside this tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BrickHit {
    /// Index into the brick field
    pub index: usize,
    /// Ball centre (or sub-step position) that landed inside the brick
    pub point: Vec2,
}

/// Test the ball centre against every active brick
pub fn naive_hit(pos: Vec2, field: &BrickField) -> Option<BrickHit> {
    field
        .bricks()
        .iter()
        .position(|b| b.is_active() && b.contains(pos))
        .map(|index| BrickHit { index, point: pos })
}

/// Number of sub-steps for a displacement (at least one)
#[inline]
pub fn sweep_steps(vel: Vec2) -> u32 {
    (vel.x.abs().max(vel.y.abs()).ceil() as u32).max(1)
}

/// Walk the tick's displacement and return the first brick entered
///
/// Sub-step positions run from the current centre (`i = 0`) to the projected
/// one (`i = steps`); each is tested only against bricks in the 3x3 grid
/// neighbourhood of its cell.
pub fn swept_hit(pos: Vec2, vel: Vec2, field: &BrickField, grid: &GridIndex) -> Option<BrickHit> {
    let steps = sweep_steps(vel);
    for i in 0..=steps {
        let point = pos + vel * (i as f32 / steps as f32);
        let bricks = field.bricks();
        let found = grid
            .neighbors(point)
            .find(|&idx| bricks[idx].is_active() && bricks[idx].contains(point));
        if let Some(index) = found {
            return Some(BrickHit { index, point });
        }
    }
    None
}

/// Velocity after a paddle hit
///
/// `hit_offset` in [-1, 1] maps linearly to an angle off vertical in
/// [-max_angle, max_angle]; speed is preserved and the ball always leaves
/// upward.
pub fn paddle_bounce(speed: f32, hit_offset: f32, max_angle: f32) -> Vec2 {
    let angle = hit_offset.clamp(-1.0, 1.0) * max_angle;
    Vec2::new(speed * angle.sin(), -speed * angle.cos())
}

/// Nudge velocity components that have collapsed toward zero
///
/// Keeps the ball from settling into a purely horizontal or vertical loop
/// after repeated wall bounces.
pub fn nudge_angle<R: Rng + ?Sized>(vel: Vec2, rng: &mut R) -> Vec2 {
    let mut vel = vel;
    if vel.y.abs() < NUDGE_THRESHOLD {
        vel.y += (rng.random::<f32>() - 0.5) * NUDGE_AMOUNT;
    }
    if vel.x.abs() < NUDGE_THRESHOLD {
        vel.x += (rng.random::<f32>() - 0.5) * NUDGE_AMOUNT;
    }
    vel
}

/// Which canvas edge the projected ball crosses, if any
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Wall {
    Left,
    Right,
    Top,
}

/// Side walls the ball is about to cross while moving toward them
pub fn side_wall(projected: Vec2, vel: Vec2, radius: f32, canvas_width: f32) -> Option<Wall> {
    if projected.x > canvas_width - radius && vel.x > 0.0 {
        Some(Wall::Right)
    } else if projected.x < radius && vel.x < 0.0 {
        Some(Wall::Left)
    } else {
        None
    }
}

/// Top wall the ball is about to cross while moving up
pub fn top_wall(projected: Vec2, vel: Vec2, radius: f32) -> Option<Wall> {
    (projected.y < radius && vel.y < 0.0).then_some(Wall::Top)
}
