//! Platform abstraction layer
//!
//! Turns host input (DOM key and touch events in the browser) into the
//! deterministic `TickInput` the simulation consumes.

pub mod input;

pub use input::{InputEvent, InputState, Key};
