//! Deterministic simulation module
//!
//! All gameplay rules live here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (power-ups in `PowerUpKind::ALL` order)
//! - No rendering or platform dependencies

pub mod ball;
pub mod collision;
pub mod pad;
pub mod power_up;
pub mod state;
pub mod tick;

pub use ball::Ball;
pub use collision::{Wall, bounce_off_ceiling, bounce_off_sides};
pub use pad::{Pad, PadController};
pub use power_up::{PowerUp, PowerUpKind};
pub use state::{GameEvent, GamePhase, GameState};
pub use tick::{TickInput, tick};
