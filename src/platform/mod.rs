//! Platform layer
//!
//! Window, input and timing glue between winit and the game:
//! - `input`: Polled key and mouse state
//! - `clock`: Monotonic frame timing
//! - `window`: winit event loop owning the game

pub mod clock;
pub mod input;
pub mod window;

pub use clock::FrameClock;
pub use input::{InputState, Key};
pub use window::run;
