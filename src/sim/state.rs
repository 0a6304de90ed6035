//! Game state and core simulation types
//!
//! Every entity is owned by [`GameState`], which is the single context value
//! threaded through each tick.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::bricks::BrickGrid;
use super::geometry::Rect;
use super::levels::{LevelCatalog, LevelError};
use super::particles::ParticleSystem;
use super::powerup::{EffectKind, PowerupKind, PowerupManager};
use crate::consts::*;
use crate::settings::Settings;

/// Persistent run state; terminal outcomes are events, not phases
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Waiting for `start` (initial state, and after every reset)
    Paused,
    /// Ticks are being simulated
    Running,
}

/// One-shot notifications produced by a tick
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    Started,
    Paused,
    Resumed,
    Reset,
    BrickDestroyed { row: usize, col: usize },
    PowerupSpawned { kind: PowerupKind },
    PowerupCollected { kind: PowerupKind },
    EffectExpired { kind: EffectKind },
    /// The ball missed the paddle; `lives` is what remains
    LifeLost { lives: u32 },
    GameOver { score: u64 },
    /// Last brick of a level destroyed; `level` is the new 0-based index
    LevelCleared { level: usize },
    Victory { score: u64 },
}

/// The ball
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ball {
    pub pos: Vec2,
    /// Per-tick velocity (dx, dy) before the speed multiplier
    pub vel: Vec2,
    pub radius: f32,
    /// Scales displacement without touching `vel`; grows per cleared level
    pub speed_multiplier: f32,
}

impl Default for Ball {
    fn default() -> Self {
        Self {
            pos: Self::launch_position(),
            vel: Vec2::new(BALL_START_DX, BALL_START_DY),
            radius: BALL_RADIUS,
            speed_multiplier: 1.0,
        }
    }
}

impl Ball {
    /// Where the ball is served from
    pub fn launch_position() -> Vec2 {
        Vec2::new(FIELD_WIDTH / 2.0, FIELD_HEIGHT - BALL_START_LIFT)
    }

    /// Displacement applied this tick
    #[inline]
    pub fn step(&self) -> Vec2 {
        self.vel * self.speed_multiplier
    }

    /// Put the ball back at the serve point heading up, with a random
    /// horizontal direction. `velocity_scale` carries any active slow effect.
    pub fn recenter<R: Rng + ?Sized>(&mut self, rng: &mut R, velocity_scale: f32) {
        let dx = if rng.random_bool(0.5) {
            BALL_START_DX
        } else {
            -BALL_START_DX
        };
        self.pos = Self::launch_position();
        self.vel = Vec2::new(dx, BALL_START_DY) * velocity_scale;
    }
}

/// The player's paddle; `y` is pinned to the field bottom
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Paddle {
    pub x: f32,
    pub width: f32,
}

impl Default for Paddle {
    fn default() -> Self {
        Self {
            x: (FIELD_WIDTH - PADDLE_WIDTH) / 2.0,
            width: PADDLE_WIDTH,
        }
    }
}

impl Paddle {
    /// Top edge of the paddle
    pub const Y: f32 = FIELD_HEIGHT - PADDLE_HEIGHT;

    pub fn rect(&self) -> Rect {
        Rect::new(self.x, Self::Y, self.width, PADDLE_HEIGHT)
    }

    pub fn center_x(&self) -> f32 {
        self.x + self.width / 2.0
    }

    /// Keep the paddle inside `[0, FIELD_WIDTH - width]`
    pub fn clamp(&mut self) {
        self.x = self.x.clamp(0.0, (FIELD_WIDTH - self.width).max(0.0));
    }

    pub fn move_by(&mut self, dx: f32) {
        self.x += dx;
        self.clamp();
    }

    /// Center the paddle on a pointer position (out-of-field pointers clamp,
    /// non-finite ones are ignored)
    pub fn follow_pointer(&mut self, pointer_x: f32) {
        if !pointer_x.is_finite() {
            return;
        }
        self.x = pointer_x - self.width / 2.0;
        self.clamp();
    }

    /// Change width around the current center
    pub fn set_width(&mut self, width: f32) {
        let center = self.center_x();
        self.width = width;
        self.x = center - width / 2.0;
        self.clamp();
    }

    pub fn recenter(&mut self) {
        self.x = (FIELD_WIDTH - self.width) / 2.0;
    }
}

/// Score, lives and level counters
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreBoard {
    pub score: u64,
    pub lives: u32,
    pub level: usize,
}

impl Default for ScoreBoard {
    fn default() -> Self {
        Self {
            score: 0,
            lives: START_LIVES,
            level: 0,
        }
    }
}

impl ScoreBoard {
    pub fn award(&mut self, points: u64) {
        self.score = self.score.saturating_add(points);
    }

    /// Take a life, returning how many remain
    pub fn lose_life(&mut self) -> u32 {
        self.lives = self.lives.saturating_sub(1);
        self.lives
    }

    pub fn gain_life(&mut self) {
        self.lives = self.lives.saturating_add(1);
    }
}

/// Complete game state (deterministic for a given seed and input stream)
#[derive(Debug, Clone)]
pub struct GameState {
    pub settings: Settings,
    pub rng: Pcg32,
    pub phase: GamePhase,
    pub ball: Ball,
    pub paddle: Paddle,
    pub bricks: BrickGrid,
    pub catalog: LevelCatalog,
    pub powerups: PowerupManager,
    pub particles: ParticleSystem,
    pub score: ScoreBoard,
    /// Simulated ticks since the last reset
    pub time_ticks: u64,
}

impl GameState {
    /// Create a new game with default settings
    pub fn new(seed: u64) -> Self {
        Self::with_settings(Settings::default(), seed)
    }

    pub fn with_settings(settings: Settings, seed: u64) -> Self {
        Self::with_catalog(settings, LevelCatalog::standard(), seed)
    }

    pub fn with_catalog(settings: Settings, catalog: LevelCatalog, seed: u64) -> Self {
        let settings = settings.validate();
        let mut state = Self {
            rng: Pcg32::seed_from_u64(seed),
            phase: GamePhase::Paused,
            ball: Ball::default(),
            paddle: Paddle::default(),
            bricks: BrickGrid::default(),
            catalog,
            powerups: PowerupManager::new(settings.effect_duration_secs),
            particles: ParticleSystem::new(settings.particle_burst, settings.max_particles()),
            score: ScoreBoard::default(),
            time_ticks: 0,
            settings,
        };
        state.reset();
        state
    }

    /// paused -> running; returns false (no-op) if already running
    pub fn start(&mut self) -> bool {
        if self.phase == GamePhase::Paused {
            self.phase = GamePhase::Running;
            log::info!("Game started (level {})", self.score.level + 1);
            true
        } else {
            false
        }
    }

    /// running <-> paused; returns the new phase
    pub fn toggle_pause(&mut self) -> GamePhase {
        self.phase = match self.phase {
            GamePhase::Running => GamePhase::Paused,
            GamePhase::Paused => GamePhase::Running,
        };
        log::info!("Phase toggled to {:?}", self.phase);
        self.phase
    }

    /// Full re-initialization; always lands in `Paused`
    pub fn reset(&mut self) {
        self.phase = GamePhase::Paused;
        self.score = ScoreBoard::default();
        self.ball = Ball::default();
        self.paddle = Paddle::default();
        self.powerups.clear();
        self.particles.clear();
        self.time_ticks = 0;
        self.recenter();
        if let Err(err) = self.load_level(0) {
            log::warn!("Reset with an empty level catalog: {err}");
            self.bricks = BrickGrid::default();
        }
        log::info!("Game reset");
    }

    /// Serve position for ball and paddle; score, level and effects stay
    pub fn recenter(&mut self) {
        let scale = self.slow_factor();
        self.ball.recenter(&mut self.rng, scale);
        self.paddle.recenter();
    }

    /// Replace the brick grid with the layout at `index`
    pub fn load_level(&mut self, index: usize) -> Result<(), LevelError> {
        let layout = self.catalog.layout(index)?;
        self.bricks = BrickGrid::from_layout(layout, &mut self.rng);
        self.score.level = index;
        log::debug!(
            "Loaded level {} ({} bricks)",
            index + 1,
            self.bricks.alive_count()
        );
        Ok(())
    }

    /// Move to the next level: lives back to full, ball faster, fresh grid.
    /// Active effects carry over.
    pub fn advance_level(&mut self) -> Result<usize, LevelError> {
        let next = self.catalog.next_index(self.score.level)?;
        self.load_level(next)?;
        self.score.lives = START_LIVES;
        self.ball.speed_multiplier *= self.settings.level_speed_scale;
        self.recenter();
        log::info!(
            "Advanced to level {} (speed x{:.2})",
            next + 1,
            self.ball.speed_multiplier
        );
        Ok(next)
    }

    /// 0.5 while the ball is slowed, else 1.0
    pub fn slow_factor(&self) -> f32 {
        if self.powerups.effects.is_active(EffectKind::SlowBall) {
            0.5
        } else {
            1.0
        }
    }
}
