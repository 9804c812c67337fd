//! Game state and core simulation types
//!
//! A [`GameState`] is one play session: it owns the ball, paddle, brick field
//! and grid index, the score and lives, running power-up effects and the
//! seeded RNG. Everything is mutated through `tick` or the session operations
//! below, on a single thread.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::ball::Ball;
use super::brick::{BrickField, PowerUp};
use super::effects::ActiveEffects;
use super::grid::GridIndex;
use super::paddle::Paddle;
use crate::config::Config;
use crate::renderer::{Surface, colors};

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Laid out, waiting for `start`
    Ready,
    /// Active gameplay
    Playing,
    /// Simulation and effect timers suspended
    Paused,
    /// Every brick destroyed
    Won,
    /// Lives exhausted
    GameOver,
}

impl GamePhase {
    /// Won or GameOver: nothing advances until `reset`
    pub fn is_terminal(&self) -> bool {
        matches!(self, GamePhase::Won | GamePhase::GameOver)
    }
}

/// Things the UI shell reacts to, in the order they happened
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GameEvent {
    ScoreChanged(u32),
    LivesChanged(u32),
    BrickDestroyed {
        column: u32,
        row: u32,
        power_up: Option<PowerUp>,
    },
    PowerUpActivated(PowerUp),
    PowerUpExpired(PowerUp),
    /// Ball missed the paddle with lives to spare
    LifeLost { lives_left: u32 },
    Paused,
    Resumed,
    Won { score: u32 },
    GameOver { score: u32 },
}

/// Complete session state
#[derive(Debug, Clone)]
pub struct GameState {
    pub config: Config,
    pub canvas_width: f32,
    pub canvas_height: f32,
    /// Run seed for reproducibility
    pub seed: u64,
    pub phase: GamePhase,
    pub score: u32,
    pub lives: u32,
    /// Simulation tick counter
    pub time_ticks: u64,
    pub ball: Ball,
    pub paddle: Paddle,
    pub field: BrickField,
    pub grid: GridIndex,
    pub effects: ActiveEffects,
    pub(crate) rng: Pcg32,
    events: Vec<GameEvent>,
}

impl GameState {
    /// Create a session laid out for a canvas, in the Ready phase
    pub fn new(config: Config, canvas_width: f32, canvas_height: f32, seed: u64) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let mut field = BrickField::layout(&config, canvas_width, canvas_height);
        field.assign_power_ups(&mut rng, config.power_up_count);
        let grid = GridIndex::build(
            &field,
            config.grid_cell_size(),
            canvas_width,
            canvas_height,
        );

        let paddle_x = (canvas_width - config.paddle_width) / 2.0;
        let paddle = Paddle::new(
            paddle_x,
            config.paddle_width,
            config.paddle_height,
            config.paddle_step,
        );
        let start = Vec2::new(canvas_width / 2.0, canvas_height - config.ball_start_offset);
        let vel = random_launch(&mut rng, config.ball_launch_speed);
        let ball = Ball::new(start, vel, config.ball_radius);

        log::info!(
            "New session: canvas {}x{}, {} layout {}x{}, {} collision, seed {}",
            canvas_width,
            canvas_height,
            config.layout.as_str(),
            field.columns,
            field.rows,
            config.collision.as_str(),
            seed
        );

        Self {
            lives: config.starting_lives,
            config,
            canvas_width,
            canvas_height,
            seed,
            phase: GamePhase::Ready,
            score: 0,
            time_ticks: 0,
            ball,
            paddle,
            field,
            grid,
            effects: ActiveEffects::new(),
            rng,
            events: Vec::new(),
        }
    }

    /// Default tuning on the standard 600x700 canvas
    pub fn with_seed(seed: u64) -> Self {
        use crate::consts::{CANVAS_HEIGHT, CANVAS_WIDTH};
        Self::new(Config::default(), CANVAS_WIDTH, CANVAS_HEIGHT, seed)
    }

    /// Ball spawn point
    pub fn start_position(&self) -> Vec2 {
        Vec2::new(
            self.canvas_width / 2.0,
            self.canvas_height - self.config.ball_start_offset,
        )
    }

    /// Launch the ball from Ready
    pub fn start(&mut self) {
        if self.phase != GamePhase::Ready {
            log::debug!("start() ignored in {:?}", self.phase);
            return;
        }
        self.ball.vel = random_launch(&mut self.rng, self.config.ball_launch_speed);
        self.phase = GamePhase::Playing;
        log::info!("Game started");
    }

    /// Fresh game on the current canvas, launched immediately
    pub fn reset(&mut self) {
        self.score = 0;
        self.lives = self.config.starting_lives;
        self.time_ticks = 0;
        self.effects.clear();
        self.paddle.width = self.config.paddle_width;
        self.ball.radius = self.config.ball_radius;
        self.rebuild_field();
        self.respawn();
        self.phase = GamePhase::Playing;
        self.events.push(GameEvent::ScoreChanged(self.score));
        self.events.push(GameEvent::LivesChanged(self.lives));
        log::info!("Game reset");
    }

    /// Adopt a new canvas size and lay the field out again
    ///
    /// The score counts bricks of the current field, so it starts over; lives
    /// and running effects carry across.
    pub fn resize(&mut self, canvas_width: f32, canvas_height: f32) {
        self.canvas_width = canvas_width;
        self.canvas_height = canvas_height;
        self.rebuild_field();
        self.score = 0;
        self.events.push(GameEvent::ScoreChanged(self.score));

        let vel = self.ball.vel;
        self.ball.reset(self.start_position(), vel);
        let x = self.paddle.centered_x(canvas_width);
        self.paddle.reset(x);
        self.paddle.clamp_to(canvas_width);
        log::info!(
            "Resized to {}x{}: {}x{} bricks",
            canvas_width,
            canvas_height,
            self.field.columns,
            self.field.rows
        );
    }

    /// Playing <-> Paused; other phases are left alone
    pub fn toggle_pause(&mut self) {
        match self.phase {
            GamePhase::Playing => {
                self.phase = GamePhase::Paused;
                self.events.push(GameEvent::Paused);
            }
            GamePhase::Paused => {
                self.phase = GamePhase::Playing;
                self.events.push(GameEvent::Resumed);
            }
            _ => {}
        }
    }

    /// Events produced since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn pending_events(&self) -> &[GameEvent] {
        &self.events
    }

    /// Render the whole frame: bricks, ball, paddle, HUD
    pub fn draw(&self, surface: &mut impl Surface) {
        surface.clear();
        self.field.draw(surface);
        self.ball.draw(surface);
        self.paddle.draw(surface, self.canvas_height);
        self.draw_hud(surface);
    }

    fn draw_hud(&self, surface: &mut impl Surface) {
        surface.fill_text(&format!("Score: {}", self.score), 8.0, 20.0, colors::ACCENT);
        surface.fill_text(
            &format!("Lives: {}", self.lives),
            self.canvas_width - 65.0,
            20.0,
            colors::ACCENT,
        );
    }

    /// Resolve the ball entering brick `index`
    ///
    /// Already destroyed bricks are ignored, so a brick scores at most once.
    pub fn hit_brick(&mut self, index: usize) {
        let Some(brick) = self.field.bricks_mut().get_mut(index) else {
            return;
        };
        let Some(power_up) = brick.destroy() else {
            return;
        };

        self.ball.vel.y = -self.ball.vel.y;
        self.score += 1;
        let rows = self.field.rows.max(1);
        self.events.push(GameEvent::BrickDestroyed {
            column: index as u32 / rows,
            row: index as u32 % rows,
            power_up,
        });
        self.events.push(GameEvent::ScoreChanged(self.score));
        self.ramp_speed();

        if let Some(kind) = power_up {
            self.activate_power_up(kind);
        }

        if self.field.all_destroyed() {
            self.phase = GamePhase::Won;
            self.events.push(GameEvent::Won { score: self.score });
            log::info!("Field cleared with score {}", self.score);
        }
    }

    /// Multiply speed by the ramp factor, capped, keeping the heading
    pub fn ramp_speed(&mut self) {
        let speed = (self.ball.speed() * self.config.speed_ramp).min(self.config.ball_max_speed);
        self.ball.set_speed(speed);
    }

    pub fn activate_power_up(&mut self, kind: PowerUp) {
        let scale = self.config.power_up_scale;
        match kind {
            PowerUp::Yellow => {
                self.paddle.width *= scale;
                self.paddle.clamp_to(self.canvas_width);
            }
            PowerUp::Green => self.ball.radius *= scale,
            PowerUp::Red => self.ball.vel *= self.config.slow_factor,
            PowerUp::Blue => {
                self.lives += 1;
                self.events.push(GameEvent::LivesChanged(self.lives));
            }
        }
        if kind.is_timed() {
            self.effects.start(kind, self.config.power_up_duration_ticks());
        } else {
            self.reassign_power_up();
        }
        self.events.push(GameEvent::PowerUpActivated(kind));
        log::debug!("Power-up {} activated", kind.as_str());
    }

    /// Undo a timed effect and put a new power-up in play
    pub fn expire_power_up(&mut self, kind: PowerUp) {
        match kind {
            PowerUp::Yellow => {
                self.paddle.width /= self.config.power_up_scale;
                self.paddle.clamp_to(self.canvas_width);
            }
            PowerUp::Green => self.ball.radius = self.config.ball_radius,
            PowerUp::Red => {
                self.ball.vel /= self.config.slow_factor;
                self.ball.cap_speed(self.config.ball_max_speed);
            }
            PowerUp::Blue => {}
        }
        self.reassign_power_up();
        self.events.push(GameEvent::PowerUpExpired(kind));
        log::debug!("Power-up {} expired", kind.as_str());
    }

    fn reassign_power_up(&mut self) {
        if self.field.assign_random_power_up(&mut self.rng).is_none() {
            log::debug!("No eligible brick for a new power-up");
        }
    }

    /// Ball went past the paddle
    pub fn lose_life(&mut self) {
        self.lives = self.lives.saturating_sub(1);
        self.events.push(GameEvent::LivesChanged(self.lives));

        if self.lives == 0 {
            self.phase = GamePhase::GameOver;
            self.events.push(GameEvent::GameOver { score: self.score });
            log::info!("Game over with score {}", self.score);
            return;
        }

        self.respawn();
        self.events.push(GameEvent::LifeLost {
            lives_left: self.lives,
        });
        log::debug!("Life lost, {} left", self.lives);
    }

    /// Ball back to the spawn point with a new launch, paddle centred
    fn respawn(&mut self) {
        let vel = random_launch(&mut self.rng, self.config.ball_launch_speed);
        self.ball.reset(self.start_position(), vel);
        let x = self.paddle.centered_x(self.canvas_width);
        self.paddle.reset(x);
        self.paddle.clamp_to(self.canvas_width);
    }

    fn rebuild_field(&mut self) {
        self.field = BrickField::layout(&self.config, self.canvas_width, self.canvas_height);
        // Running effects still own the tags they consumed
        let count = self.config.power_up_count.saturating_sub(self.effects.len());
        self.field.assign_power_ups(&mut self.rng, count);
        self.grid = GridIndex::build(
            &self.field,
            self.config.grid_cell_size(),
            self.canvas_width,
            self.canvas_height,
        );
    }
}

/// Upward launch between 45 and 90 degrees, mirrored left half the time
pub fn random_launch<R: Rng + ?Sized>(rng: &mut R, speed: f32) -> Vec2 {
    use std::f32::consts::FRAC_PI_4;
    let angle = FRAC_PI_4 + rng.random::<f32>() * FRAC_PI_4;
    let dx = speed * angle.cos();
    let dy = -speed * angle.sin();
    if rng.random_bool(0.5) {
        Vec2::new(-dx, dy)
    } else {
        Vec2::new(dx, dy)
    }
}
