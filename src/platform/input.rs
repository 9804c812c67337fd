//! Keyboard and touch input folded into per-tick intents

use crate::consts::TOUCH_THRESHOLD;
use crate::sim::TickInput;

/// Keys the game responds to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Left,
    Right,
    /// Pause toggle
    Space,
    /// Demo mode toggle
    Autopilot,
}

impl Key {
    /// Map a DOM `KeyboardEvent.key` value, including legacy names
    pub fn from_dom(key: &str) -> Option<Self> {
        match key {
            "ArrowLeft" | "Left" => Some(Key::Left),
            "ArrowRight" | "Right" => Some(Key::Right),
            " " | "Space" | "Spacebar" => Some(Key::Space),
            "i" | "I" => Some(Key::Autopilot),
            _ => None,
        }
    }
}

/// Raw input from the host, in canvas pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    KeyDown(Key),
    KeyUp(Key),
    TouchStart { x: f32 },
    TouchMove { x: f32 },
    TouchEnd,
}

/// Held keys, touch drag and pending one-shot commands
#[derive(Debug, Clone)]
pub struct InputState {
    key_left: bool,
    key_right: bool,
    touch_origin: Option<f32>,
    touch_left: bool,
    touch_right: bool,
    pause: bool,
    autopilot: bool,
    touch_threshold: f32,
}

impl Default for InputState {
    fn default() -> Self {
        Self::new(TOUCH_THRESHOLD)
    }
}

impl InputState {
    pub fn new(touch_threshold: f32) -> Self {
        Self {
            key_left: false,
            key_right: false,
            touch_origin: None,
            touch_left: false,
            touch_right: false,
            pause: false,
            autopilot: false,
            touch_threshold,
        }
    }

    pub fn handle(&mut self, event: InputEvent) {
        match event {
            InputEvent::KeyDown(Key::Left) => self.key_left = true,
            InputEvent::KeyDown(Key::Right) => self.key_right = true,
            InputEvent::KeyDown(Key::Space) => self.pause = true,
            InputEvent::KeyDown(Key::Autopilot) => {
                self.autopilot = !self.autopilot;
                log::info!("Autopilot: {}", self.autopilot);
            }
            InputEvent::KeyUp(Key::Left) => self.key_left = false,
            InputEvent::KeyUp(Key::Right) => self.key_right = false,
            InputEvent::KeyUp(_) => {}
            InputEvent::TouchStart { x } => {
                self.touch_origin = Some(x);
                self.touch_left = false;
                self.touch_right = false;
            }
            InputEvent::TouchMove { x } => {
                let Some(origin) = self.touch_origin else {
                    return;
                };
                let drag = x - origin;
                self.touch_right = drag > self.touch_threshold;
                self.touch_left = drag < -self.touch_threshold;
            }
            InputEvent::TouchEnd => {
                self.touch_origin = None;
                self.touch_left = false;
                self.touch_right = false;
            }
        }
    }

    pub fn autopilot(&self) -> bool {
        self.autopilot
    }

    /// Intents for the next tick; one-shot commands are consumed
    pub fn take_tick_input(&mut self) -> TickInput {
        let input = self.peek_tick_input();
        self.pause = false;
        input
    }

    pub fn peek_tick_input(&self) -> TickInput {
        TickInput {
            left: self.key_left || self.touch_left,
            right: self.key_right || self.touch_right,
            pause: self.pause,
            launch: false,
            autopilot: self.autopilot,
        }
    }

    /// Drop held directions (focus loss, game restart)
    pub fn release_all(&mut self) {
        self.key_left = false;
        self.key_right = false;
        self.handle(InputEvent::TouchEnd);
        self.pause = false;
    }
}
