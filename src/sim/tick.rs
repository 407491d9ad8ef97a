//! Fixed timestep simulation tick
//!
//! Advances the rules deterministically: pad, ball, then power-ups.

use rand::Rng;

use super::collision::{bounce_off_ceiling, bounce_off_sides};
use super::power_up::PowerUpKind;
use super::state::{GameEvent, GamePhase, GameState};

/// Input commands for a single tick
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    /// Pad steering: -1 left, 0 hold, 1 right
    pub pad_direction: i8,
}

/// Advance the game state by one fixed timestep
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) -> Vec<GameEvent> {
    let mut events = Vec::new();

    // Nothing moves until the game is restarted
    if state.phase == GamePhase::GameOver {
        return events;
    }

    state.time_ticks += 1;
    let field = state.field;

    state.pad.update(input.pad_direction, dt, field.width);

    let ball = &mut state.ball;
    let next = ball.tentative_position(dt);
    let mut direction = ball.direction;

    let caught = ball.is_moving_down()
        && state
            .pad
            .is_crossing(next.x, ball.position.y - ball.radius, next.y - ball.radius);
    if caught {
        let acceleration = state.pad.acceleration();
        direction.y = acceleration;
        events.push(GameEvent::PadHit { acceleration });
    } else if next.y < state.pad.pad.stop_line() {
        state.phase = GamePhase::GameOver;
        events.push(GameEvent::GameOver);
        return events;
    } else if let Some(wall) = bounce_off_ceiling(next, ball.radius, &mut direction, field) {
        events.push(GameEvent::WallBounce(wall));
    }

    if let Some(wall) = bounce_off_sides(next, ball.radius, &mut direction, field) {
        events.push(GameEvent::WallBounce(wall));
    }

    ball.direction = direction;
    ball.position += direction * ball.velocity * dt;

    update_power_ups(state, dt, &mut events);

    events
}

/// Spawn, move and resolve every power-up
fn update_power_ups(state: &mut GameState, dt: f32, events: &mut Vec<GameEvent>) {
    let field = state.field;
    let spawn_chance = state.tuning.spawn_chance;
    let mut collected = Vec::new();

    for power_up in &mut state.power_ups {
        if !power_up.appeared {
            if state.rng.random::<f64>() < spawn_chance
                && power_up.drop_randomly(&mut state.rng, field)
            {
                events.push(GameEvent::PowerUpSpawned(power_up.kind));
            }
            continue;
        }

        power_up.fall(dt);

        if state.pad.is_touching(power_up.position.x, power_up.bottom()) {
            power_up.hide();
            collected.push(power_up.kind);
        } else if power_up.position.y + power_up.radius < 0.0 {
            power_up.hide();
            events.push(GameEvent::PowerUpMissed(power_up.kind));
        }
    }

    for kind in collected {
        apply_effect(state, kind);
        events.push(GameEvent::PowerUpCollected(kind));
    }
}

fn apply_effect(state: &mut GameState, kind: PowerUpKind) {
    match kind {
        PowerUpKind::LongPad => state.pad.increase_width(state.field.width),
        PowerUpKind::SpeedUp => state.ball.increase_speed(state.tuning.max_ball_speed),
        PowerUpKind::SpeedDown => state.ball.decrease_speed(),
    }
}
