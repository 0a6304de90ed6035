//! Read-only view of a tick for the display collaborator

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::color::Color;
use super::geometry::Rect;
use super::powerup::{EffectKind, PowerupKind};
use super::state::{GamePhase, GameState};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BallView {
    pub pos: Vec2,
    pub radius: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BrickView {
    pub rect: Rect,
    pub color: Color,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PowerupView {
    pub pos: Vec2,
    pub kind: PowerupKind,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParticleView {
    pub pos: Vec2,
    pub size: f32,
    pub color: Color,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EffectView {
    pub kind: EffectKind,
    /// Seconds until the effect wears off
    pub remaining: f64,
}

/// HUD values
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hud {
    pub score: u64,
    pub lives: u32,
    /// 1-based level number
    pub level: usize,
    pub effects: Vec<EffectView>,
}

/// Everything a display needs to draw one frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub phase: GamePhase,
    pub ball: BallView,
    pub paddle: Rect,
    pub bricks: Vec<BrickView>,
    pub powerups: Vec<PowerupView>,
    pub particles: Vec<ParticleView>,
    pub hud: Hud,
}

impl GameState {
    /// Capture the drawable state; `now` is used for effect countdowns
    pub fn snapshot(&self, now: f64) -> Snapshot {
        Snapshot {
            phase: self.phase,
            ball: BallView {
                pos: self.ball.pos,
                radius: self.ball.radius,
            },
            paddle: self.paddle.rect(),
            bricks: self
                .bricks
                .alive()
                .map(|b| BrickView {
                    rect: b.rect,
                    color: b.color,
                })
                .collect(),
            powerups: self
                .powerups
                .falling()
                .map(|p| PowerupView {
                    pos: p.pos,
                    kind: p.kind,
                })
                .collect(),
            particles: self
                .particles
                .iter()
                .map(|p| ParticleView {
                    pos: p.pos,
                    size: p.size,
                    color: p.color,
                })
                .collect(),
            hud: Hud {
                score: self.score.score,
                lives: self.score.lives,
                level: self.score.level + 1,
                effects: self
                    .powerups
                    .effects
                    .iter()
                    .map(|(kind, _)| EffectView {
                        kind,
                        remaining: self.powerups.effects.remaining(kind, now).unwrap_or(0.0),
                    })
                    .collect(),
            },
        }
    }
}
