//! Brick Rush - a Breakout-style arcade simulation
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, collisions, power-ups, game state)
//! - `clock`: Fixed timestep driver and the `Display` collaborator seam
//! - `settings`: Data-driven game tuning
//!
//! Rendering and input capture live outside this crate. The core takes a
//! [`sim::TickInput`] each tick and hands back a [`sim::Snapshot`] to draw.

pub mod clock;
pub mod settings;
pub mod sim;

pub use clock::{Display, SimulationClock};
pub use settings::{Settings, SettingsError};

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (one animation frame at 60 Hz)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Play field dimensions
    pub const FIELD_WIDTH: f32 = 800.0;
    pub const FIELD_HEIGHT: f32 = 600.0;

    /// Paddle defaults
    pub const PADDLE_WIDTH: f32 = 75.0;
    pub const PADDLE_WIDTH_BOOSTED: f32 = 150.0;
    pub const PADDLE_HEIGHT: f32 = 10.0;
    /// Keyboard paddle speed (pixels per tick)
    pub const PADDLE_SPEED: f32 = 7.0;
    /// dx per pixel of impact offset from the paddle center
    pub const PADDLE_STEERING: f32 = 0.1;

    /// Ball defaults
    pub const BALL_RADIUS: f32 = 8.0;
    /// Horizontal launch speed (pixels per tick, sign is randomized)
    pub const BALL_START_DX: f32 = 3.0;
    pub const BALL_START_DY: f32 = -3.0;
    /// Launch height above the field bottom
    pub const BALL_START_LIFT: f32 = 30.0;
    /// Speed multiplier growth per cleared level
    pub const LEVEL_SPEED_SCALE: f32 = 1.2;

    /// Brick layout
    pub const BRICK_WIDTH: f32 = 75.0;
    pub const BRICK_HEIGHT: f32 = 20.0;
    pub const BRICK_PADDING: f32 = 10.0;
    pub const BRICK_OFFSET_TOP: f32 = 30.0;
    pub const BRICK_OFFSET_LEFT: f32 = 30.0;
    pub const BRICK_POINTS: u64 = 1;

    pub const START_LIVES: u32 = 3;

    /// Power-ups
    pub const POWERUP_DROP_CHANCE: f64 = 0.2;
    pub const POWERUP_FALL_SPEED: f32 = 2.0;
    pub const POWERUP_SIZE: f32 = 16.0;
    /// Duration added per pickup of a timed effect (seconds)
    pub const EFFECT_DURATION_SECS: f64 = 10.0;

    /// Particles
    pub const PARTICLE_BURST: usize = 10;
    pub const PARTICLE_LIFE: f32 = 30.0;
    pub const PARTICLE_MAX_SPEED: f32 = 2.0;
    pub const PARTICLE_MIN_SIZE: f32 = 2.0;
    pub const PARTICLE_MAX_SIZE: f32 = 5.0;
    pub const MAX_PARTICLES: usize = 256;
}
