//! Game state and core simulation types

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::ball::Ball;
use super::collision::Wall;
use super::pad::{Pad, PadController};
use super::power_up::{PowerUp, PowerUpKind};
use crate::consts::*;
use crate::settings::Tuning;
use crate::transform::Viewport;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Ball in play
    Playing,
    /// Ball lost, waiting for a restart
    GameOver,
}

/// Notable things that happened during a tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GameEvent {
    /// Ball bounced off the pad with this return-speed multiplier
    PadHit { acceleration: f32 },
    WallBounce(Wall),
    GameOver,
    PowerUpSpawned(PowerUpKind),
    PowerUpCollected(PowerUpKind),
    PowerUpMissed(PowerUpKind),
}

/// Complete game state (deterministic for a given seed and input sequence)
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub rng: Pcg32,
    /// Playing field, pixel space
    pub field: Viewport,
    pub phase: GamePhase,
    pub ball: Ball,
    pub pad: PadController,
    /// One per [`PowerUpKind`], in `PowerUpKind::ALL` order
    pub power_ups: Vec<PowerUp>,
    /// Simulation tick counter
    pub time_ticks: u64,
    pub tuning: Tuning,
    /// Horizontal serve direction drawn at construction, reused on restart
    initial_horizontal: f32,
}

impl GameState {
    /// Create a new game state with the given seed
    pub fn new(seed: u64, field: Viewport, tuning: Tuning) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let initial_horizontal = rng.random_range(-BALL_MAX_HORIZONTAL..=BALL_MAX_HORIZONTAL);

        let power_ups = PowerUpKind::ALL
            .iter()
            .map(|&kind| PowerUp::new(kind, tuning.power_up_radius, tuning.power_up_fall_speed))
            .collect();

        Self {
            seed,
            rng,
            field,
            phase: GamePhase::Playing,
            ball: new_ball(field, &tuning, initial_horizontal),
            pad: new_pad(field, &tuning),
            power_ups,
            time_ticks: 0,
            tuning,
            initial_horizontal,
        }
    }

    pub fn initial_horizontal(&self) -> f32 {
        self.initial_horizontal
    }

    /// Back to Playing with a fresh ball and pad for the current field
    pub fn start_new_game(&mut self) {
        self.phase = GamePhase::Playing;
        self.ball = new_ball(self.field, &self.tuning, self.initial_horizontal);
        self.pad = new_pad(self.field, &self.tuning);
        for power_up in &mut self.power_ups {
            power_up.hide();
        }
    }

    /// Adopt a new field size; entities keep their state
    pub fn resize(&mut self, field: Viewport) {
        self.field = field;
        self.pad.clamp_to(field.width);
    }

    pub fn power_up(&self, kind: PowerUpKind) -> Option<&PowerUp> {
        self.power_ups.iter().find(|p| p.kind == kind)
    }

    pub fn power_up_mut(&mut self, kind: PowerUpKind) -> Option<&mut PowerUp> {
        self.power_ups.iter_mut().find(|p| p.kind == kind)
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }
}

fn new_ball(field: Viewport, tuning: &Tuning, horizontal: f32) -> Ball {
    Ball::new(field, tuning.ball_radius, tuning.ball_speed, horizontal)
}

fn new_pad(field: Viewport, tuning: &Tuning) -> PadController {
    PadController::new(
        Pad::new(field, tuning.pad_speed),
        tuning.streak_scale,
        tuning.contact_tolerance,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    const FIELD: Viewport = Viewport::new(800.0, 600.0);

    #[test]
    fn test_new_state() {
        let state = GameState::new(12345, FIELD, Tuning::default());
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.power_ups.len(), 3);
        assert!(state.power_ups.iter().all(|p| !p.appeared));
        assert!(state.initial_horizontal().abs() <= BALL_MAX_HORIZONTAL);
        assert_eq!(state.ball.direction.x, state.initial_horizontal());
        assert_eq!(state.ball.direction.y, -1.0);
    }

    #[test]
    fn test_same_seed_same_serve() {
        let a = GameState::new(99, FIELD, Tuning::default());
        let b = GameState::new(99, FIELD, Tuning::default());
        assert_eq!(a.initial_horizontal(), b.initial_horizontal());
    }

    #[test]
    fn test_power_up_lookup() {
        let mut state = GameState::new(1, FIELD, Tuning::default());
        for kind in PowerUpKind::ALL {
            assert_eq!(state.power_up(kind).map(|p| p.kind), Some(kind));
        }
        state.power_up_mut(PowerUpKind::SpeedUp).unwrap().appeared = true;
        assert!(state.power_up(PowerUpKind::SpeedUp).unwrap().appeared);
    }

    #[test]
    fn test_resize_keeps_entities_and_clamps_pad() {
        let mut state = GameState::new(1, FIELD, Tuning::default());
        state.pad.pad.position.x = 700.0;
        let ball = state.ball.clone();

        state.resize(Viewport::new(400.0, 300.0));
        assert_eq!(state.field, Viewport::new(400.0, 300.0));
        assert_eq!(state.ball, ball);
        assert_eq!(state.pad.pad.position.x, 300.0);
    }
}
