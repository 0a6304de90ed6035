//! Per-tick state machine step
//!
//! Core game loop that advances the simulation by one synchronous pass.

use super::collision::{self, VerticalContact};
use super::levels::LevelError;
use super::state::{GameEvent, GamePhase, GameState};
use crate::consts::*;

/// Input for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    pub move_left: bool,
    pub move_right: bool,
    /// Pointer x in field coordinates; overrides the keys when present
    pub pointer_x: Option<f32>,
    /// paused -> running
    pub start: bool,
    /// running <-> paused
    pub toggle_pause: bool,
    /// Back to a fresh paused game
    pub reset: bool,
}

/// Advance the game by one tick.
///
/// `now` is the wall-clock time in seconds, used for effect expiry. Commands
/// are applied first; nothing else happens unless the game is running.
pub fn tick(state: &mut GameState, input: &TickInput, now: f64) -> Vec<GameEvent> {
    let mut events = Vec::new();

    if input.reset {
        state.reset();
        events.push(GameEvent::Reset);
        return events;
    }

    if input.start {
        if state.start() {
            events.push(GameEvent::Started);
        }
    } else if input.toggle_pause {
        events.push(match state.toggle_pause() {
            GamePhase::Paused => GameEvent::Paused,
            GamePhase::Running => GameEvent::Resumed,
        });
    }

    if state.phase != GamePhase::Running {
        return events;
    }

    state.time_ticks += 1;
    step_running(state, input, now, &mut events);
    events
}

fn step_running(state: &mut GameState, input: &TickInput, now: f64, events: &mut Vec<GameEvent>) {
    // Timed effects first, against this tick's clock
    for kind in state.powerups.expire(now, &mut state.ball, &mut state.paddle) {
        events.push(GameEvent::EffectExpired { kind });
    }

    state.particles.update();

    let paddle_rect = state.paddle.rect();
    for kind in state
        .powerups
        .update(&paddle_rect, FIELD_HEIGHT, POWERUP_FALL_SPEED)
    {
        state.powerups.activate(
            kind,
            now,
            &mut state.ball,
            &mut state.paddle,
            &mut state.score,
        );
        events.push(GameEvent::PowerupCollected { kind });
    }

    if let Some(brick) = collision::resolve_bricks(&mut state.ball, &mut state.bricks) {
        state.score.award(BRICK_POINTS);
        events.push(GameEvent::BrickDestroyed {
            row: brick.row,
            col: brick.col,
        });
        log::debug!(
            "Brick ({}, {}) destroyed, score {}",
            brick.row,
            brick.col,
            state.score.score
        );

        let center = brick.rect.center();
        state
            .particles
            .spawn_burst(center, brick.color, &mut state.rng);
        if let Some(kind) = state.powerups.maybe_spawn(
            center,
            state.settings.powerup_drop_chance,
            &mut state.rng,
        ) {
            events.push(GameEvent::PowerupSpawned { kind });
        }

        if state.bricks.is_cleared() {
            clear_level(state, events);
            return;
        }
    }

    collision::reflect_walls(&mut state.ball);
    let velocity_scale = state.slow_factor();
    let contact = collision::resolve_vertical(
        &mut state.ball,
        &state.paddle,
        state.settings.steering,
        velocity_scale,
    );
    if contact == VerticalContact::Missed {
        lose_life(state, events);
        return;
    }

    // Paddle input (pointer wins over keys, right key wins over left)
    if let Some(x) = input.pointer_x {
        state.paddle.follow_pointer(x);
    } else if input.move_right {
        state.paddle.move_by(state.settings.paddle_speed);
    } else if input.move_left {
        state.paddle.move_by(-state.settings.paddle_speed);
    }

    collision::integrate(&mut state.ball);
}

fn lose_life(state: &mut GameState, events: &mut Vec<GameEvent>) {
    let lives = state.score.lose_life();
    events.push(GameEvent::LifeLost { lives });

    if lives == 0 {
        let score = state.score.score;
        log::info!("Game over with score {score}");
        events.push(GameEvent::GameOver { score });
        state.reset();
    } else {
        log::info!("Life lost, {lives} remaining");
        state.recenter();
    }
}

fn clear_level(state: &mut GameState, events: &mut Vec<GameEvent>) {
    match state.advance_level() {
        Ok(level) => events.push(GameEvent::LevelCleared { level }),
        Err(LevelError::NoMoreLevels { .. }) => {
            let score = state.score.score;
            log::info!("Victory with score {score}");
            events.push(GameEvent::Victory { score });
            state.reset();
        }
        Err(err) => {
            log::warn!("Level transition failed: {err}");
            state.reset();
        }
    }
}
