//! Power-up lifecycle: drop, fall, pickup, timed effects
//!
//! Timed effects stack by duration only. Picking up an effect that is already
//! running pushes its expiry out; the magnitude change is never applied twice.

use std::collections::BTreeMap;

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::geometry::Rect;
use super::state::{Ball, Paddle, ScoreBoard};
use crate::consts::*;

/// Pickup types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PowerupKind {
    ExtendPaddle,
    SlowBall,
    ExtraLife,
}

impl PowerupKind {
    pub const ALL: [PowerupKind; 3] = [
        PowerupKind::ExtendPaddle,
        PowerupKind::SlowBall,
        PowerupKind::ExtraLife,
    ];

    /// Uniform pick over all kinds
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self::ALL[rng.random_range(0..Self::ALL.len())]
    }

    /// The timed effect this pickup drives, if any
    pub fn effect(self) -> Option<EffectKind> {
        match self {
            PowerupKind::ExtendPaddle => Some(EffectKind::ExtendPaddle),
            PowerupKind::SlowBall => Some(EffectKind::SlowBall),
            PowerupKind::ExtraLife => None,
        }
    }
}

/// Timed, stackable effects
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum EffectKind {
    ExtendPaddle,
    SlowBall,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PowerupStatus {
    Falling,
    Collected,
    ExpiredOffscreen,
}

/// A falling pickup
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Powerup {
    /// Center of the pickup
    pub pos: Vec2,
    pub kind: PowerupKind,
    pub status: PowerupStatus,
}

impl Powerup {
    pub fn rect(&self) -> Rect {
        Rect::centered(self.pos, POWERUP_SIZE, POWERUP_SIZE)
    }

    pub fn is_falling(&self) -> bool {
        self.status == PowerupStatus::Falling
    }
}

/// Effect kind -> absolute expiry time (seconds)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ActiveEffects {
    expiries: BTreeMap<EffectKind, f64>,
}

impl ActiveEffects {
    pub fn is_active(&self, kind: EffectKind) -> bool {
        self.expiries.contains_key(&kind)
    }

    pub fn expiry(&self, kind: EffectKind) -> Option<f64> {
        self.expiries.get(&kind).copied()
    }

    /// Seconds left on `kind` at `now` (zero once due)
    pub fn remaining(&self, kind: EffectKind, now: f64) -> Option<f64> {
        self.expiry(kind).map(|at| (at - now).max(0.0))
    }

    /// Active effects in a stable order
    pub fn iter(&self) -> impl Iterator<Item = (EffectKind, f64)> + '_ {
        self.expiries.iter().map(|(&kind, &at)| (kind, at))
    }

    pub fn len(&self) -> usize {
        self.expiries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.expiries.is_empty()
    }

    /// Start or extend `kind`: the new expiry is `max(now, current) + duration`.
    /// Returns true if the effect was already running.
    pub fn extend(&mut self, kind: EffectKind, now: f64, duration: f64) -> bool {
        match self.expiries.get_mut(&kind) {
            Some(at) => {
                *at = at.max(now) + duration;
                true
            }
            None => {
                self.expiries.insert(kind, now + duration);
                false
            }
        }
    }

    /// Remove and return every effect due at `now`
    pub fn take_expired(&mut self, now: f64) -> Vec<EffectKind> {
        let due: Vec<EffectKind> = self
            .expiries
            .iter()
            .filter(|&(_, &at)| now >= at)
            .map(|(&kind, _)| kind)
            .collect();
        for kind in &due {
            self.expiries.remove(kind);
        }
        due
    }

    pub fn clear(&mut self) {
        self.expiries.clear();
    }
}

/// Owns falling pickups and the active-effect table
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PowerupManager {
    pub pickups: Vec<Powerup>,
    pub effects: ActiveEffects,
    /// Seconds added per timed pickup
    pub duration: f64,
}

impl Default for PowerupManager {
    fn default() -> Self {
        Self::new(EFFECT_DURATION_SECS)
    }
}

impl PowerupManager {
    pub fn new(duration: f64) -> Self {
        Self {
            pickups: Vec::new(),
            effects: ActiveEffects::default(),
            duration,
        }
    }

    /// Roll for a drop at a destroyed brick's center
    pub fn maybe_spawn<R: Rng + ?Sized>(
        &mut self,
        at: Vec2,
        chance: f64,
        rng: &mut R,
    ) -> Option<PowerupKind> {
        if !rng.random_bool(chance.clamp(0.0, 1.0)) {
            return None;
        }
        let kind = PowerupKind::random(rng);
        self.pickups.push(Powerup {
            pos: at,
            kind,
            status: PowerupStatus::Falling,
        });
        log::debug!("Power-up {kind:?} dropped at ({:.0}, {:.0})", at.x, at.y);
        Some(kind)
    }

    /// Fall one step and test against the paddle.
    ///
    /// Pickups that were collected or left the field on an earlier tick are
    /// dropped first. Returns the kinds collected this tick, in spawn order.
    pub fn update(&mut self, paddle: &Rect, field_height: f32, fall: f32) -> Vec<PowerupKind> {
        self.pickups.retain(Powerup::is_falling);

        let mut collected = Vec::new();
        for pickup in &mut self.pickups {
            pickup.pos.y += fall;
            if pickup.rect().intersects(paddle) {
                pickup.status = PowerupStatus::Collected;
                collected.push(pickup.kind);
            } else if pickup.rect().y > field_height {
                pickup.status = PowerupStatus::ExpiredOffscreen;
            }
        }
        collected
    }

    /// Apply a collected pickup
    pub fn activate(
        &mut self,
        kind: PowerupKind,
        now: f64,
        ball: &mut Ball,
        paddle: &mut Paddle,
        score: &mut ScoreBoard,
    ) {
        let Some(effect) = kind.effect() else {
            score.gain_life();
            log::debug!("Extra life ({} lives)", score.lives);
            return;
        };

        let stacked = self.effects.extend(effect, now, self.duration);
        if !stacked {
            match effect {
                EffectKind::ExtendPaddle => paddle.set_width(PADDLE_WIDTH_BOOSTED),
                EffectKind::SlowBall => ball.vel *= 0.5,
            }
        }
        log::debug!(
            "{effect:?} {} until t={:.2}",
            if stacked { "extended" } else { "active" },
            self.effects.expiry(effect).unwrap_or(now)
        );
    }

    /// Undo every effect that is due at `now`, returning what expired
    pub fn expire(&mut self, now: f64, ball: &mut Ball, paddle: &mut Paddle) -> Vec<EffectKind> {
        let expired = self.effects.take_expired(now);
        for &effect in &expired {
            match effect {
                EffectKind::ExtendPaddle => paddle.set_width(PADDLE_WIDTH),
                EffectKind::SlowBall => ball.vel *= 2.0,
            }
            log::debug!("{effect:?} expired at t={now:.2}");
        }
        expired
    }

    /// Falling pickups only (what a display should draw)
    pub fn falling(&self) -> impl Iterator<Item = &Powerup> {
        self.pickups.iter().filter(|p| p.is_falling())
    }

    pub fn clear(&mut self) {
        self.pickups.clear();
        self.effects.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn parts() -> (PowerupManager, Ball, Paddle, ScoreBoard) {
        (
            PowerupManager::new(10.0),
            Ball::default(),
            Paddle::default(),
            ScoreBoard::default(),
        )
    }

    #[test]
    fn test_extend_paddle_until_expiry() {
        let (mut mgr, mut ball, mut paddle, mut score) = parts();
        mgr.activate(PowerupKind::ExtendPaddle, 5.0, &mut ball, &mut paddle, &mut score);
        assert_eq!(paddle.width, PADDLE_WIDTH_BOOSTED);
        assert_eq!(mgr.effects.expiry(EffectKind::ExtendPaddle), Some(15.0));

        assert!(mgr.expire(14.999, &mut ball, &mut paddle).is_empty());
        assert_eq!(paddle.width, PADDLE_WIDTH_BOOSTED);

        let expired = mgr.expire(15.0, &mut ball, &mut paddle);
        assert_eq!(expired, vec![EffectKind::ExtendPaddle]);
        assert_eq!(paddle.width, PADDLE_WIDTH);
        assert!(mgr.effects.is_empty());
    }

    #[test]
    fn test_slow_ball_halves_once() {
        let (mut mgr, mut ball, mut paddle, mut score) = parts();
        ball.vel = Vec2::new(3.0, -3.0);
        mgr.activate(PowerupKind::SlowBall, 0.0, &mut ball, &mut paddle, &mut score);
        assert_eq!(ball.vel, Vec2::new(1.5, -1.5));

        mgr.activate(PowerupKind::SlowBall, 4.0, &mut ball, &mut paddle, &mut score);
        assert_eq!(ball.vel, Vec2::new(1.5, -1.5));
        assert_eq!(mgr.effects.expiry(EffectKind::SlowBall), Some(20.0));

        mgr.expire(20.0, &mut ball, &mut paddle);
        assert_eq!(ball.vel, Vec2::new(3.0, -3.0));
    }

    #[test]
    fn test_extra_life_has_no_timer() {
        let (mut mgr, mut ball, mut paddle, mut score) = parts();
        mgr.activate(PowerupKind::ExtraLife, 0.0, &mut ball, &mut paddle, &mut score);
        assert_eq!(score.lives, START_LIVES + 1);
        assert!(mgr.effects.is_empty());
    }

    #[test]
    fn test_stack_after_lapse_counts_from_now() {
        let mut effects = ActiveEffects::default();
        assert!(!effects.extend(EffectKind::SlowBall, 0.0, 10.0));
        // Expiry already behind `now` but not yet swept
        assert!(effects.extend(EffectKind::SlowBall, 12.0, 10.0));
        assert_eq!(effects.expiry(EffectKind::SlowBall), Some(22.0));
        assert_eq!(effects.remaining(EffectKind::SlowBall, 20.0), Some(2.0));
        assert_eq!(effects.remaining(EffectKind::SlowBall, 30.0), Some(0.0));
    }

    #[test]
    fn test_pickup_falls_and_is_collected() {
        let mut mgr = PowerupManager::default();
        let paddle = Paddle::default().rect();
        mgr.pickups.push(Powerup {
            pos: Vec2::new(paddle.center().x, paddle.y - POWERUP_SIZE / 2.0 - 3.0),
            kind: PowerupKind::ExtraLife,
            status: PowerupStatus::Falling,
        });

        assert!(mgr.update(&paddle, FIELD_HEIGHT, 2.0).is_empty());
        let collected = mgr.update(&paddle, FIELD_HEIGHT, 2.0);
        assert_eq!(collected, vec![PowerupKind::ExtraLife]);
        assert_eq!(mgr.pickups[0].status, PowerupStatus::Collected);
        assert_eq!(mgr.falling().count(), 0);

        // Removed on the following tick
        assert!(mgr.update(&paddle, FIELD_HEIGHT, 2.0).is_empty());
        assert!(mgr.pickups.is_empty());
    }

    #[test]
    fn test_missed_pickup_leaves_field() {
        let mut mgr = PowerupManager::default();
        let paddle = Rect::new(0.0, Paddle::Y, PADDLE_WIDTH, PADDLE_HEIGHT);
        mgr.pickups.push(Powerup {
            pos: Vec2::new(600.0, FIELD_HEIGHT + POWERUP_SIZE / 2.0 - 2.0),
            kind: PowerupKind::SlowBall,
            status: PowerupStatus::Falling,
        });
        // Top edge exactly on the field bottom: still in play
        assert!(mgr.update(&paddle, FIELD_HEIGHT, 2.0).is_empty());
        assert_eq!(mgr.pickups[0].status, PowerupStatus::Falling);
        assert!(mgr.update(&paddle, FIELD_HEIGHT, 2.0).is_empty());
        assert_eq!(mgr.pickups[0].status, PowerupStatus::ExpiredOffscreen);
        mgr.update(&paddle, FIELD_HEIGHT, 2.0);
        assert!(mgr.pickups.is_empty());
    }

    #[test]
    fn test_spawn_chance_bounds() {
        let mut rng = Pcg32::seed_from_u64(5);
        let mut mgr = PowerupManager::default();
        for _ in 0..50 {
            assert!(mgr.maybe_spawn(Vec2::ZERO, 0.0, &mut rng).is_none());
        }
        for _ in 0..50 {
            assert!(mgr.maybe_spawn(Vec2::ZERO, 1.0, &mut rng).is_some());
        }
        assert_eq!(mgr.pickups.len(), 50);
        for kind in PowerupKind::ALL {
            assert!(mgr.pickups.iter().any(|p| p.kind == kind), "{kind:?} never drawn");
        }
    }

    proptest! {
        #[test]
        fn slow_then_expire_is_identity(dx in -20.0f32..20.0, dy in -20.0f32..20.0) {
            let (mut mgr, mut ball, mut paddle, mut score) = parts();
            ball.vel = Vec2::new(dx, dy);
            mgr.activate(PowerupKind::SlowBall, 0.0, &mut ball, &mut paddle, &mut score);
            mgr.expire(mgr.duration, &mut ball, &mut paddle);
            prop_assert_eq!(ball.vel, Vec2::new(dx, dy));
        }

        #[test]
        fn stacking_adds_one_duration(first in 0.0f64..100.0, gap in 0.0f64..30.0) {
            let mut effects = ActiveEffects::default();
            effects.extend(EffectKind::ExtendPaddle, first, 10.0);
            let existing = effects.expiry(EffectKind::ExtendPaddle).unwrap();
            let now = first + gap;
            prop_assert!(effects.extend(EffectKind::ExtendPaddle, now, 10.0));
            prop_assert_eq!(
                effects.expiry(EffectKind::ExtendPaddle),
                Some(existing.max(now) + 10.0)
            );
        }
    }
}
