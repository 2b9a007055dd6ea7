//! Edge-triggered gesture state
//!
//! The tracker only reports "open" or "closed". The simulation needs more than
//! that: a closed fist latches a gather, and the *moment* a fist opens starts a
//! timed explosion. `GestureState::advance` is the single transition function
//! that turns the latest frame into that derived state, once per tick.
//!
//! Timestamps are `Duration`s on the simulation clock (time since start).

use std::time::Duration;

use glam::Vec3;

use crate::frame::GestureFrame;

/// Length of the explosion window started by a fist→open transition
pub const EXPLOSION_WINDOW: Duration = Duration::from_millis(2000);

/// Fraction of the window during which the burst force is applied
pub const BURST_FRACTION: f32 = 0.1;

/// Derived gesture state consumed by the integrator
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct GestureState {
    pub hand_detected: bool,
    pub hand_position: Vec3,
    pub is_open: bool,
    pub was_open_prev_tick: bool,
    /// Set by a closed hand, cleared by the next open edge
    pub is_gathering: bool,
    /// When the last fist→open edge happened
    pub explosion_start: Option<Duration>,
}

/// What the field is doing right now, in force-selection priority order
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GesturePhase {
    /// No hand and no explosion in progress
    Idle,
    /// Closed hand pulling everything to the centre
    Gathering,
    /// Inside the explosion window; `progress` is elapsed / window in [0, 1)
    Exploding { progress: f32 },
    /// Hand visible, springs pulling particles back to their targets
    Reforming,
}

impl GesturePhase {
    pub fn is_exploding(&self) -> bool {
        matches!(self, GesturePhase::Exploding { .. })
    }

    /// Explosion force is only applied at the start of the window
    pub fn is_bursting(&self) -> bool {
        matches!(self, GesturePhase::Exploding { progress } if *progress < BURST_FRACTION)
    }

    pub fn name(&self) -> &'static str {
        match self {
            GesturePhase::Idle => "idle",
            GesturePhase::Gathering => "gathering",
            GesturePhase::Exploding { .. } => "exploding",
            GesturePhase::Reforming => "reforming",
        }
    }
}

impl GestureState {
    /// Fold the latest frame into the state at time `now`
    pub fn advance(&self, frame: &GestureFrame, now: Duration) -> GestureState {
        let mut next = *self;
        next.hand_detected = frame.detected;
        next.hand_position = frame.position;
        next.is_open = frame.is_open;

        if frame.detected && frame.is_open && !self.was_open_prev_tick {
            log::debug!("Hand opened at {:?}: explosion", now);
            next.explosion_start = Some(now);
            next.is_gathering = false;
        }

        if frame.detected && !frame.is_open {
            if !self.is_gathering {
                log::debug!("Hand closed at {:?}: gathering", now);
            }
            next.is_gathering = true;
        }

        next.was_open_prev_tick = frame.is_open;
        next
    }

    /// Time since the last open edge, if it is still inside the window
    pub fn explosion_elapsed(&self, now: Duration) -> Option<Duration> {
        let elapsed = now.saturating_sub(self.explosion_start?);
        (elapsed < EXPLOSION_WINDOW).then_some(elapsed)
    }

    pub fn phase(&self, now: Duration) -> GesturePhase {
        if self.hand_detected && !self.is_open && self.is_gathering {
            GesturePhase::Gathering
        } else if let Some(elapsed) = self.explosion_elapsed(now) {
            GesturePhase::Exploding {
                progress: elapsed.as_secs_f32() / EXPLOSION_WINDOW.as_secs_f32(),
            }
        } else if !self.hand_detected {
            GesturePhase::Idle
        } else {
            GesturePhase::Reforming
        }
    }
}
