//! Fixed timestep simulation tick
//!
//! One call advances the session by one frame: intents, brick collisions,
//! movement, wall and paddle resolution, then timed effects.

use super::collision::{naive_hit, nudge_angle, paddle_bounce, side_wall, swept_hit, top_wall};
use super::state::{GamePhase, GameState};
use crate::config::CollisionMode;

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Move paddle left (held)
    pub left: bool,
    /// Move paddle right (held)
    pub right: bool,
    /// Pause toggle
    pub pause: bool,
    /// Launch from the Ready phase
    pub launch: bool,
    /// Demo mode - the paddle follows the ball on its own
    pub autopilot: bool,
}

impl TickInput {
    /// Intents that keep the paddle under the ball
    pub fn autopilot(state: &GameState) -> Self {
        let paddle = &state.paddle;
        // Offset the aim a little over time so rallies don't repeat forever
        let t = state.time_ticks as f32 * 0.01;
        let offset = (t.sin() * 0.3 + (t * 0.7).sin() * 0.15) * paddle.width;
        let target = state.ball.pos.x + offset.clamp(-paddle.width * 0.4, paddle.width * 0.4);

        let center = paddle.center_x();
        let dead_zone = paddle.step;
        Self {
            left: center > target + dead_zone,
            right: center < target - dead_zone,
            launch: state.phase == GamePhase::Ready,
            autopilot: true,
            ..Default::default()
        }
    }
}

/// Advance the game state by one fixed timestep
pub fn tick(state: &mut GameState, input: &TickInput) {
    if input.pause {
        state.toggle_pause();
    }

    let input = if input.autopilot {
        TickInput {
            pause: input.pause,
            ..TickInput::autopilot(state)
        }
    } else {
        input.clone()
    };

    if input.launch && state.phase == GamePhase::Ready {
        state.start();
    }

    if state.phase != GamePhase::Playing {
        return;
    }

    state.time_ticks += 1;
    state.paddle.left_pressed = input.left;
    state.paddle.right_pressed = input.right;

    // Bricks
    let hit = match state.config.collision {
        CollisionMode::Naive => naive_hit(state.ball.pos, &state.field),
        CollisionMode::Swept => {
            swept_hit(state.ball.pos, state.ball.vel, &state.field, &state.grid)
        }
    };
    if let Some(hit) = hit {
        log::debug!("Brick {} hit at {:?}", hit.index, hit.point);
        state.hit_brick(hit.index);
        if state.phase == GamePhase::Won {
            return;
        }
    }

    // Movement
    state.ball.advance();
    state.paddle.advance(state.canvas_width);

    // Walls, paddle, floor
    let width = state.canvas_width;
    let height = state.canvas_height;
    let radius = state.ball.radius;
    let projected = state.ball.projected();

    if side_wall(projected, state.ball.vel, radius, width).is_some() {
        state.ball.vel.x = -state.ball.vel.x;
        state.ball.vel = nudge_angle(state.ball.vel, &mut state.rng);
    }
    if top_wall(projected, state.ball.vel, radius).is_some() {
        state.ball.vel.y = -state.ball.vel.y;
        state.ball.vel = nudge_angle(state.ball.vel, &mut state.rng);
    } else if projected.y > height - state.paddle.height - radius
        && state.ball.vel.y > 0.0
        && state.paddle.overlaps_x(state.ball.pos.x)
    {
        let offset = state.paddle.hit_offset(state.ball.pos.x);
        let max_angle = state.config.max_bounce_angle_deg.to_radians();
        state.ball.vel = paddle_bounce(state.ball.speed(), offset, max_angle);
    } else if projected.y > height - radius {
        state.lose_life();
        if state.phase == GamePhase::GameOver {
            return;
        }
    }

    // Timed effects
    for kind in state.effects.tick() {
        state.expire_power_up(kind);
    }

    state.ball.cap_speed(state.config.ball_max_speed);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::sim::brick::{BrickStatus, PowerUp};
    use crate::sim::state::GameEvent;
    use glam::Vec2;

    fn playing(seed: u64) -> GameState {
        let mut state = GameState::with_seed(seed);
        state.start();
        state.drain_events();
        state
    }

    /// Index of an untagged brick, with the ball parked inside it
    fn ball_in_plain_brick(state: &mut GameState, vel: Vec2) -> usize {
        let idx = state
            .field
            .bricks()
            .iter()
            .position(|b| b.is_eligible())
            .unwrap();
        let b = &state.field.bricks()[idx];
        let center = Vec2::new(b.x + b.width / 2.0, b.y + b.height / 2.0);
        state.ball.pos = center;
        state.ball.vel = vel;
        idx
    }

    #[test]
    fn test_tick_ready_to_playing() {
        let mut state = GameState::with_seed(12345);
        let pos = state.ball.pos;

        tick(&mut state, &TickInput::default());
        assert_eq!(state.phase, GamePhase::Ready);
        assert_eq!(state.ball.pos, pos);
        assert_eq!(state.time_ticks, 0);

        let input = TickInput {
            launch: true,
            ..Default::default()
        };
        tick(&mut state, &input);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_ne!(state.ball.pos, pos);
    }

    #[test]
    fn test_tick_pause() {
        let mut state = playing(12345);
        let input = TickInput {
            pause: true,
            ..Default::default()
        };
        tick(&mut state, &input);
        assert_eq!(state.phase, GamePhase::Paused);

        let pos = state.ball.pos;
        tick(&mut state, &TickInput::default());
        assert_eq!(state.ball.pos, pos);

        tick(&mut state, &input);
        assert_eq!(state.phase, GamePhase::Playing);
    }

    #[test]
    fn test_brick_hit_scores_and_flips() {
        let mut state = playing(1);
        let idx = ball_in_plain_brick(&mut state, Vec2::new(0.0, -3.0));

        tick(&mut state, &TickInput::default());
        assert!(!state.field.bricks()[idx].is_active());
        assert_eq!(state.score, 1);
        assert!(state.ball.vel.y > 0.0);
        assert!((state.ball.speed() - 3.15).abs() < 1e-4);

        let events = state.drain_events();
        assert!(events.contains(&GameEvent::ScoreChanged(1)));
    }

    #[test]
    fn test_naive_collision_mode() {
        let config = Config {
            collision: CollisionMode::Naive,
            ..Default::default()
        };
        let mut state = GameState::new(config, 600.0, 700.0, 2);
        state.start();
        let idx = ball_in_plain_brick(&mut state, Vec2::new(1.0, -2.0));

        tick(&mut state, &TickInput::default());
        assert_eq!(state.field.bricks()[idx].status, BrickStatus::Destroyed);
        assert_eq!(state.score, 1);
        assert!(state.ball.vel.y > 0.0);
    }

    #[test]
    fn test_right_wall_bounce() {
        let mut state = playing(3);
        state.ball.pos = Vec2::new(594.0, 400.0);
        state.ball.vel = Vec2::new(3.0, -3.0);
        tick(&mut state, &TickInput::default());
        assert_eq!(state.ball.vel, Vec2::new(-3.0, -3.0));
    }

    #[test]
    fn test_top_wall_bounce() {
        let mut state = playing(3);
        state.ball.pos = Vec2::new(300.0, 8.0);
        state.ball.vel = Vec2::new(2.0, -3.0);
        // Clear the way through the field
        for b in state.field.bricks_mut() {
            b.status = BrickStatus::Destroyed;
            b.power_up = None;
        }
        state.field.bricks_mut()[0].status = BrickStatus::Active;
        tick(&mut state, &TickInput::default());
        assert_eq!(state.ball.vel, Vec2::new(2.0, 3.0));
    }

    #[test]
    fn test_centre_paddle_hit_goes_straight_up() {
        let mut state = playing(4);
        state.paddle.x = 250.0;
        state.ball.pos = Vec2::new(300.0, 680.0);
        state.ball.vel = Vec2::new(0.0, 4.0);

        tick(&mut state, &TickInput::default());
        assert!(state.ball.vel.x.abs() < 1e-4);
        assert!((state.ball.vel.y + 4.0).abs() < 1e-4);
        assert_eq!(state.lives, 3);
    }

    #[test]
    fn test_edge_paddle_hit_angles_out() {
        let mut state = playing(4);
        state.paddle.x = 250.0;
        state.ball.pos = Vec2::new(342.0, 680.0);
        state.ball.vel = Vec2::new(0.0, 4.0);

        tick(&mut state, &TickInput::default());
        assert!(state.ball.vel.x > 0.0);
        assert!(state.ball.vel.y < 0.0);
        assert!((state.ball.speed() - 4.0).abs() < 1e-4);
    }

    #[test]
    fn test_miss_loses_life() {
        let mut state = playing(5);
        state.score = 4;
        state.paddle.x = 400.0;
        state.ball.pos = Vec2::new(20.0, 690.0);
        state.ball.vel = Vec2::new(0.0, 3.0);

        tick(&mut state, &TickInput::default());
        assert_eq!(state.lives, 2);
        assert_eq!(state.score, 4);
        assert_eq!(state.ball.pos, state.start_position());
        assert_eq!(state.paddle.x, 250.0);
        assert!(
            state
                .drain_events()
                .contains(&GameEvent::LifeLost { lives_left: 2 })
        );
    }

    #[test]
    fn test_miss_on_last_life_is_game_over() {
        let mut state = playing(6);
        state.lives = 1;
        state.paddle.x = 400.0;
        state.ball.pos = Vec2::new(20.0, 694.0);
        state.ball.vel = Vec2::new(0.0, 3.0);

        tick(&mut state, &TickInput::default());
        assert_eq!(state.phase, GamePhase::GameOver);
        assert_eq!(state.lives, 0);
        assert!(
            state
                .drain_events()
                .contains(&GameEvent::GameOver { score: 0 })
        );

        let pos = state.ball.pos;
        let ticks = state.time_ticks;
        for _ in 0..10 {
            tick(&mut state, &TickInput::default());
        }
        assert_eq!(state.ball.pos, pos);
        assert_eq!(state.lives, 0);
        assert_eq!(state.time_ticks, ticks);
    }

    #[test]
    fn test_last_brick_wins() {
        let mut state = playing(7);
        let keep = ball_in_plain_brick(&mut state, Vec2::new(0.0, -3.0));
        for (i, b) in state.field.bricks_mut().iter_mut().enumerate() {
            if i != keep {
                b.status = BrickStatus::Destroyed;
                b.power_up = None;
            }
        }
        let total = state.field.len() as u32;
        state.score = total - 1;

        tick(&mut state, &TickInput::default());
        assert_eq!(state.phase, GamePhase::Won);
        assert_eq!(state.score, total);
        assert!(
            state
                .drain_events()
                .contains(&GameEvent::Won { score: total })
        );

        let pos = state.ball.pos;
        tick(&mut state, &TickInput::default());
        assert_eq!(state.ball.pos, pos);
    }

    #[test]
    fn test_yellow_pickup_reverts_width() {
        let mut state = playing(8);
        let idx = state
            .field
            .bricks()
            .iter()
            .position(|b| b.power_up == Some(PowerUp::Yellow))
            .unwrap();
        let b = &state.field.bricks()[idx];
        state.ball.pos = Vec2::new(b.x + b.width / 2.0, b.y + b.height / 2.0);
        state.ball.vel = Vec2::new(0.0, -3.0);

        tick(&mut state, &TickInput::default());
        assert_eq!(state.paddle.width, 150.0);
        assert_eq!(state.field.tagged_count(), 3);

        // Park the ball so nothing else happens while the timer runs
        state.ball.pos = Vec2::new(300.0, 450.0);
        state.ball.vel = Vec2::ZERO;
        let duration = state.config.power_up_duration_ticks();
        for _ in 0..duration - 2 {
            tick(&mut state, &TickInput::default());
        }
        assert_eq!(state.paddle.width, 150.0);

        tick(&mut state, &TickInput::default());
        assert_eq!(state.paddle.width, 100.0);
        assert_eq!(state.field.tagged_count(), 4);
        assert!(
            state
                .drain_events()
                .contains(&GameEvent::PowerUpExpired(PowerUp::Yellow))
        );
    }

    #[test]
    fn test_pause_suspends_effect_timers() {
        let mut state = playing(9);
        state.ball.pos = Vec2::new(300.0, 450.0);
        state.ball.vel = Vec2::ZERO;
        state.activate_power_up(PowerUp::Green);

        let pause = TickInput {
            pause: true,
            ..Default::default()
        };
        tick(&mut state, &pause);
        for _ in 0..2000 {
            tick(&mut state, &TickInput::default());
        }
        assert!(state.effects.is_active(PowerUp::Green));
        assert_eq!(state.ball.radius, 7.5);

        tick(&mut state, &pause);
        assert_eq!(state.phase, GamePhase::Playing);
        assert!(state.effects.is_active(PowerUp::Green));
    }

    #[test]
    fn test_paddle_follows_intents() {
        let mut state = playing(10);
        state.ball.pos = Vec2::new(300.0, 450.0);
        state.ball.vel = Vec2::ZERO;
        let right = TickInput {
            right: true,
            ..Default::default()
        };
        tick(&mut state, &right);
        tick(&mut state, &right);
        assert_eq!(state.paddle.x, 270.0);

        tick(&mut state, &TickInput::default());
        assert_eq!(state.paddle.x, 270.0);
    }

    #[test]
    fn test_autopilot_launches_from_ready() {
        let mut state = GameState::with_seed(11);
        let input = TickInput {
            autopilot: true,
            ..Default::default()
        };
        tick(&mut state, &input);
        assert_eq!(state.phase, GamePhase::Playing);
    }

    #[test]
    fn test_determinism() {
        let mut state1 = GameState::with_seed(99999);
        let mut state2 = GameState::with_seed(99999);
        let input = TickInput {
            autopilot: true,
            ..Default::default()
        };

        for _ in 0..3000 {
            tick(&mut state1, &input);
            tick(&mut state2, &input);
        }

        assert_eq!(state1.time_ticks, state2.time_ticks);
        assert_eq!(state1.score, state2.score);
        assert_eq!(state1.lives, state2.lives);
        assert_eq!(state1.ball.pos, state2.ball.pos);
        assert_eq!(state1.field, state2.field);
    }
}
