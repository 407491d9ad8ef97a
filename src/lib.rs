//! Paddleball - a ball-and-paddle arcade game
//!
//! Core modules:
//! - `sim`: Deterministic game rules (ball, pad, power-ups, game over)
//! - `transform` / `camera`: World, view and screen space conversions
//! - `renderer`: Render device seam and the wgpu implementation
//! - `components`: Drawable entities with an init/update/draw/dispose lifecycle
//! - `game`: Root orchestrator running the frame loop
//! - `platform`: Window, input and clock glue
//! - `settings`: Data-driven configuration and game balance

pub mod camera;
pub mod components;
pub mod error;
pub mod game;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod transform;

pub use error::{EngineError, RenderError};
pub use game::{FrameStatus, Game};
pub use settings::{Settings, Tuning};
pub use transform::{SizeProvider, Viewport};

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep
    pub const SIM_DT: f32 = 1.0 / 120.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Longest frame delta accepted from the clock (seconds)
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// Projection parameters
    pub const FIELD_OF_VIEW_DEGREES: f32 = 45.0;
    pub const NEAR_PLANE: f32 = 0.1;
    pub const FAR_PLANE: f32 = 10_000.0;
    /// Depth of the 2D gameplay layer under the orthographic projection
    pub const LAYER_DEPTH: f32 = 1.0;

    /// Triangles per disc (ball and power-up markers)
    pub const CIRCLE_SEGMENTS: usize = 24;

    /// Ball starts at this fraction of the field height
    pub const BALL_START_HEIGHT: f32 = 0.75;
    /// Initial horizontal direction is drawn from [-BALL_MAX_HORIZONTAL, BALL_MAX_HORIZONTAL]
    pub const BALL_MAX_HORIZONTAL: f32 = 2.5;

    /// Pad size relative to the field
    pub const PAD_WIDTH_RATIO: f32 = 0.125;
    pub const PAD_HEIGHT_RATIO: f32 = 0.05;
    /// Pad bottom edge sits at this fraction of its own height
    pub const PAD_LIFT_RATIO: f32 = 0.125;

    /// Multiplier applied by power-up effects
    pub const EFFECT_FACTOR: f32 = 1.25;
    /// Return-speed bonus bounds
    pub const MIN_ACCELERATION: f32 = 0.25;
    pub const MAX_ACCELERATION: f32 = 1.75;

    /// Power-ups spawn within this fraction of the field width, centered
    pub const POWER_UP_SPAWN_SPAN: f32 = 0.9;

    /// Camera look speed (radians per pixel of mouse travel)
    pub const MOUSE_RADIANS_PER_PIXEL: f32 = 0.003;
    /// Pitch stops just short of straight up/down
    pub const MAX_PITCH: f32 = std::f32::consts::FRAC_PI_2 - 0.01;

    /// Vectors shorter than this are not normalized
    pub const NORMALIZE_EPSILON: f32 = 1e-6;
}
