//! Ball physics and collision resolution
//!
//! Checks run in a fixed order each tick: bricks (at the current position),
//! side walls, then ceiling/paddle band (on the projected position), then
//! integration. Every projection uses the scaled per-tick step.

use super::bricks::{Brick, BrickGrid};
use super::geometry::{Axis, clamp_circle, leaves_span, reflect_velocity};
use super::state::{Ball, Paddle};
use crate::consts::*;

/// Outcome of the vertical (ceiling / paddle band) check
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum VerticalContact {
    /// Nothing above or below
    Clear,
    Ceiling,
    /// Ball bounced off the paddle; `offset` is from the paddle center
    Paddle { offset: f32 },
    /// Ball entered the paddle band outside the paddle
    Missed,
}

/// Destroy the first live brick (row-major) containing the ball center and
/// bounce vertically. At most one brick per tick.
pub fn resolve_bricks(ball: &mut Ball, grid: &mut BrickGrid) -> Option<Brick> {
    let brick = grid.hit(ball.pos)?;
    ball.vel = reflect_velocity(ball.vel, Axis::Y);
    Some(brick)
}

/// Bounce off the side walls. Returns true on contact.
pub fn reflect_walls(ball: &mut Ball) -> bool {
    let next_x = ball.pos.x + ball.step().x;
    if leaves_span(next_x, ball.radius, FIELD_WIDTH) {
        ball.vel = reflect_velocity(ball.vel, Axis::X);
        true
    } else {
        false
    }
}

/// Ceiling bounce, or the paddle band at the bottom.
///
/// A paddle hit inverts `dy` and replaces `dx` with `offset * steering`,
/// discarding the incoming horizontal speed. `velocity_scale` keeps the new
/// `dx` consistent with an active slow effect.
pub fn resolve_vertical(
    ball: &mut Ball,
    paddle: &Paddle,
    steering: f32,
    velocity_scale: f32,
) -> VerticalContact {
    let step = ball.step();
    let next_y = ball.pos.y + step.y;

    if next_y < ball.radius {
        ball.vel = reflect_velocity(ball.vel, Axis::Y);
        return VerticalContact::Ceiling;
    }

    let entering_band = step.y > 0.0 && next_y + ball.radius > Paddle::Y;
    if !entering_band {
        return VerticalContact::Clear;
    }

    let rect = paddle.rect();
    if rect.spans_x(ball.pos.x) {
        let offset = ball.pos.x - paddle.center_x();
        ball.vel = reflect_velocity(ball.vel, Axis::Y);
        ball.vel.x = offset * steering * velocity_scale;
        VerticalContact::Paddle { offset }
    } else {
        VerticalContact::Missed
    }
}

/// Apply this tick's displacement and keep the ball inside the field
pub fn integrate(ball: &mut Ball) {
    let next = ball.pos + ball.step();
    ball.pos = clamp_circle(next, ball.radius, FIELD_WIDTH, FIELD_HEIGHT);
}
