//! Fixed-timestep accumulator
//!
//! Forces, springs and damping are tuned per tick at a 60 Hz reference rate.
//! The accumulator converts wall-clock time into a whole number of reference
//! ticks so the field behaves the same on a 144 Hz display as on a 30 Hz one.

use std::time::Duration;

use particle_physics::REFERENCE_TICK;

/// Ticks allowed per `advance` before the backlog is dropped
pub const MAX_CATCH_UP_TICKS: u32 = 5;

#[derive(Debug, Clone)]
pub struct FixedTimestep {
    step: Duration,
    max_catch_up: u32,
    accumulated: Duration,
    last_elapsed: Duration,
    simulated: Duration,
}

impl Default for FixedTimestep {
    fn default() -> Self {
        Self::new(REFERENCE_TICK)
    }
}

impl FixedTimestep {
    pub fn new(step: Duration) -> Self {
        Self {
            step,
            max_catch_up: MAX_CATCH_UP_TICKS,
            accumulated: Duration::ZERO,
            last_elapsed: Duration::ZERO,
            simulated: Duration::ZERO,
        }
    }

    pub fn with_max_catch_up(mut self, ticks: u32) -> Self {
        self.max_catch_up = ticks.max(1);
        self
    }

    pub fn step(&self) -> Duration {
        self.step
    }

    /// Feed the total wall-clock time since start; returns how many ticks are due
    pub fn advance(&mut self, elapsed: Duration) -> u32 {
        self.accumulated += elapsed.saturating_sub(self.last_elapsed);
        self.last_elapsed = self.last_elapsed.max(elapsed);

        let mut due = 0;
        while self.accumulated >= self.step && due < self.max_catch_up {
            self.accumulated -= self.step;
            due += 1;
        }

        if self.accumulated >= self.step {
            log::debug!(
                "Dropping {:?} of simulation backlog after {} catch-up ticks",
                self.accumulated,
                due
            );
            self.accumulated = Duration::ZERO;
        }

        due
    }

    /// Consume one tick; returns the simulated timestamp for it
    pub fn tick(&mut self) -> Duration {
        self.simulated += self.step;
        self.simulated
    }

    /// Simulated time of the last consumed tick
    pub fn simulated(&self) -> Duration {
        self.simulated
    }

    /// Wall-clock time left until the next tick is due
    pub fn until_next(&self) -> Duration {
        self.step.saturating_sub(self.accumulated)
    }
}
