//! Brick Rush headless runner
//!
//! Plays the game with a simple autopilot and logs announcements. Useful for
//! soak-testing tuning files:
//!
//! ```text
//! RUST_LOG=info brick-rush [settings.json] [max_frames]
//! ```

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use std::time::{SystemTime, UNIX_EPOCH};

    use brick_rush::consts::*;
    use brick_rush::sim::{GameEvent, GameState, Snapshot, TickInput};
    use brick_rush::{Display, Settings, SimulationClock};

    const DEFAULT_MAX_FRAMES: u64 = 60 * 60 * 10;

    /// Logs announcements and tracks the latest frame
    #[derive(Default)]
    struct LogDisplay {
        frames: u64,
        last: Option<Snapshot>,
    }

    impl Display for LogDisplay {
        fn render(&mut self, snapshot: &Snapshot) {
            self.frames += 1;
            if self.frames % 600 == 0 {
                log::debug!(
                    "frame {}: score {} lives {} bricks {} particles {}",
                    self.frames,
                    snapshot.hud.score,
                    snapshot.hud.lives,
                    snapshot.bricks.len(),
                    snapshot.particles.len()
                );
            }
            self.last = Some(snapshot.clone());
        }

        fn announce(&mut self, event: &GameEvent) {
            match event {
                GameEvent::LifeLost { lives } => log::info!("Life lost, {} left", lives),
                GameEvent::GameOver { score } => log::info!("GAME OVER (score {})", score),
                GameEvent::LevelCleared { level } => {
                    log::info!("Level cleared, entering level {}", level + 1)
                }
                GameEvent::Victory { score } => {
                    log::info!("YOU WIN, CONGRATULATIONS! (score {})", score)
                }
                GameEvent::PowerupCollected { kind } => log::info!("Collected {:?}", kind),
                GameEvent::EffectExpired { kind } => log::info!("{:?} wore off", kind),
                other => log::trace!("{:?}", other),
            }
        }
    }

    /// Steer the paddle under the ball, swaying so the impact offset varies
    fn autopilot(state: &GameState, elapsed: f64) -> Option<f32> {
        let sway = (elapsed * 1.7).sin() as f32 * state.paddle.width * 0.4;
        Some((state.ball.pos.x + sway).clamp(0.0, FIELD_WIDTH))
    }

    pub fn run() {
        env_logger::init();
        log::info!("Brick Rush (headless) starting...");

        let mut args = std::env::args().skip(1);
        let settings = match args.next() {
            Some(path) => Settings::load(&path).unwrap_or_else(|e| {
                log::warn!("{}; using default settings", e);
                Settings::default()
            }),
            None => Settings::default(),
        };
        let max_frames = args
            .next()
            .and_then(|s| s.parse().ok())
            .unwrap_or(DEFAULT_MAX_FRAMES);

        let seed = settings.seed.unwrap_or_else(|| {
            SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_millis() as u64)
                .unwrap_or(0)
        });
        log::info!("Game initialized with seed: {}", seed);

        let mut state = GameState::with_settings(settings, seed);
        let mut clock = SimulationClock::default();
        let mut display = LogDisplay::default();
        let mut input = TickInput {
            start: true,
            ..Default::default()
        };

        for _ in 0..max_frames {
            input.pointer_x = autopilot(&state, clock.elapsed());
            let events = clock.advance(&mut state, &mut input, SIM_DT, &mut display);
            if events
                .iter()
                .any(|e| matches!(e, GameEvent::GameOver { .. } | GameEvent::Victory { .. }))
            {
                break;
            }
        }

        if let Some(last) = &display.last {
            log::info!(
                "Finished after {} frames: score {}, level {}, lives {}",
                display.frames,
                last.hud.score,
                last.hud.level,
                last.hud.lives
            );
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    headless::run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // Browser hosts drive the library directly through SimulationClock
}
