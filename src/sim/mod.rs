//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One synchronous pass per tick, no internal timers
//! - Seeded RNG only
//! - Stable iteration order (row-major bricks, spawn-ordered entities)
//! - No rendering or platform dependencies

pub mod bricks;
pub mod collision;
pub mod color;
pub mod geometry;
pub mod levels;
pub mod particles;
pub mod powerup;
pub mod snapshot;
pub mod state;
pub mod tick;

pub use bricks::{Brick, BrickGrid, BrickStatus};
pub use collision::{VerticalContact, integrate, reflect_walls, resolve_bricks, resolve_vertical};
pub use color::Color;
pub use geometry::{Axis, Rect, reflect_velocity};
pub use levels::{LevelCatalog, LevelError, Layout};
pub use particles::{Particle, ParticleSystem};
pub use powerup::{ActiveEffects, EffectKind, Powerup, PowerupKind, PowerupManager, PowerupStatus};
pub use snapshot::{BallView, BrickView, EffectView, Hud, ParticleView, PowerupView, Snapshot};
pub use state::{Ball, GameEvent, GamePhase, GameState, Paddle, ScoreBoard};
pub use tick::{TickInput, tick};
