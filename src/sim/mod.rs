//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only (velocities are pixels per tick)
//! - Seeded RNG only
//! - Stable iteration order (column-major brick indices)
//! - Rendering goes through the `Surface` trait, never a concrete backend

pub mod ball;
pub mod brick;
pub mod collision;
pub mod effects;
pub mod grid;
pub mod paddle;
pub mod state;
pub mod tick;

pub use ball::Ball;
pub use brick::{Brick, BrickField, BrickStatus, PowerUp};
pub use collision::{BrickHit, Wall, naive_hit, paddle_bounce, swept_hit};
pub use effects::{ActiveEffect, ActiveEffects};
pub use grid::GridIndex;
pub use paddle::Paddle;
pub use state::{GameEvent, GamePhase, GameState, random_launch};
pub use tick::{TickInput, tick};
