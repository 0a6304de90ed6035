//! Game tuning
//!
//! Loaded from a JSON file on native builds; every field is optional and
//! falls back to the compiled-in defaults in [`crate::consts`].

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse settings: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Gameplay tuning knobs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Run seed; `None` lets the driver pick one
    pub seed: Option<u64>,

    // === Power-ups ===
    /// Chance a destroyed brick drops a pickup (0.0 - 1.0)
    pub powerup_drop_chance: f64,
    /// Seconds added per timed pickup
    pub effect_duration_secs: f64,

    // === Ball & paddle ===
    /// Speed multiplier growth per cleared level
    pub level_speed_scale: f32,
    /// Keyboard paddle speed (pixels per tick)
    pub paddle_speed: f32,
    /// dx per pixel of paddle impact offset
    pub steering: f32,

    // === Particles ===
    /// Particle effects on brick destruction
    pub particles: bool,
    /// Particles per burst
    pub particle_burst: usize,
    /// Live particle cap
    pub particle_cap: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            seed: None,

            powerup_drop_chance: POWERUP_DROP_CHANCE,
            effect_duration_secs: EFFECT_DURATION_SECS,

            level_speed_scale: LEVEL_SPEED_SCALE,
            paddle_speed: PADDLE_SPEED,
            steering: PADDLE_STEERING,

            particles: true,
            particle_burst: PARTICLE_BURST,
            particle_cap: MAX_PARTICLES,
        }
    }
}

impl Settings {
    /// Parse settings from a JSON string
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Self = serde_json::from_str(json)?;
        Ok(settings.validate())
    }

    /// Load settings from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    pub fn to_json(&self) -> Result<String, SettingsError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Clamp out-of-range values back into something playable
    pub fn validate(mut self) -> Self {
        if !(0.0..=1.0).contains(&self.powerup_drop_chance) {
            log::warn!(
                "powerup_drop_chance {} out of range, clamping",
                self.powerup_drop_chance
            );
            self.powerup_drop_chance = if self.powerup_drop_chance.is_nan() {
                POWERUP_DROP_CHANCE
            } else {
                self.powerup_drop_chance.clamp(0.0, 1.0)
            };
        }
        if !(self.effect_duration_secs > 0.0) {
            log::warn!(
                "effect_duration_secs {} must be positive, using default",
                self.effect_duration_secs
            );
            self.effect_duration_secs = EFFECT_DURATION_SECS;
        }
        if !(self.level_speed_scale >= 1.0) {
            log::warn!(
                "level_speed_scale {} below 1.0, using default",
                self.level_speed_scale
            );
            self.level_speed_scale = LEVEL_SPEED_SCALE;
        }
        if !(self.paddle_speed >= 0.0) {
            log::warn!("paddle_speed {} negative, using default", self.paddle_speed);
            self.paddle_speed = PADDLE_SPEED;
        }
        if !self.steering.is_finite() {
            log::warn!("steering {} not finite, using default", self.steering);
            self.steering = PADDLE_STEERING;
        }
        self
    }

    /// Effective particle cap
    pub fn max_particles(&self) -> usize {
        if !self.particles {
            0
        } else {
            self.particle_cap
        }
    }
}
