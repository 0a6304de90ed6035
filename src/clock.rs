//! Fixed timestep driver
//!
//! The core has no timer of its own. A host feeds frame deltas into
//! [`SimulationClock::advance`], which runs whole simulation steps and then
//! hands one snapshot to the [`Display`].

use crate::consts::{MAX_SUBSTEPS, SIM_DT};
use crate::sim::{GameEvent, GameState, Snapshot, TickInput, tick};

/// Rendering collaborator
pub trait Display {
    /// Draw the current frame
    fn render(&mut self, snapshot: &Snapshot);

    /// One-shot announcements (game over, victory, level cleared, ...)
    fn announce(&mut self, _event: &GameEvent) {}
}

#[derive(Debug, Clone)]
pub struct SimulationClock {
    dt: f32,
    max_substeps: u32,
    accumulator: f32,
    /// Seconds of simulated time, passed to each tick as `now`
    elapsed: f64,
}

impl Default for SimulationClock {
    fn default() -> Self {
        Self::new(SIM_DT)
    }
}

impl SimulationClock {
    pub fn new(dt: f32) -> Self {
        Self {
            dt,
            max_substeps: MAX_SUBSTEPS,
            accumulator: 0.0,
            elapsed: 0.0,
        }
    }

    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    /// Run as many fixed steps as `frame_dt` covers, then render once.
    ///
    /// One-shot commands in `input` are cleared after the first step that
    /// sees them. Returns every event produced this frame.
    pub fn advance<D: Display + ?Sized>(
        &mut self,
        state: &mut GameState,
        input: &mut TickInput,
        frame_dt: f32,
        display: &mut D,
    ) -> Vec<GameEvent> {
        // Long stalls (tab switch, debugger) are not replayed
        let frame_dt = if frame_dt.is_finite() { frame_dt } else { 0.0 };
        self.accumulator += frame_dt.clamp(0.0, 0.1);

        let mut events = Vec::new();
        let mut substeps = 0;
        while self.accumulator >= self.dt && substeps < self.max_substeps {
            self.elapsed += f64::from(self.dt);
            events.extend(tick(state, input, self.elapsed));
            self.accumulator -= self.dt;
            substeps += 1;

            input.start = false;
            input.toggle_pause = false;
            input.reset = false;
        }
        if substeps == self.max_substeps {
            self.accumulator = self.accumulator.min(self.dt);
        }

        for event in &events {
            display.announce(event);
        }
        display.render(&state.snapshot(self.elapsed));
        events
    }
}
