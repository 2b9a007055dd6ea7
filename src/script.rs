//! Scripted hand for driving the field without a tracker

use std::time::Duration;

use glam::Vec3;
use particle_gesture::GestureFrame;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScriptedHand {
    Absent,
    Closed,
    Open,
}

/// A looping timeline of hand poses
#[derive(Debug, Clone)]
pub struct GestureScript {
    segments: Vec<(Duration, ScriptedHand)>,
    cycle: Duration,
    /// Radius of the circle the hand moves on
    orbit_radius: f32,
    /// Seconds per orbit
    orbit_period: f32,
}

impl Default for GestureScript {
    fn default() -> Self {
        Self::new(vec![
            (Duration::from_millis(1000), ScriptedHand::Absent),
            (Duration::from_millis(1500), ScriptedHand::Closed),
            (Duration::from_millis(2500), ScriptedHand::Open),
            (Duration::from_millis(1000), ScriptedHand::Absent),
        ])
    }
}

impl GestureScript {
    pub fn new(segments: Vec<(Duration, ScriptedHand)>) -> Self {
        let cycle = segments.iter().map(|(length, _)| *length).sum();
        Self {
            segments,
            cycle,
            orbit_radius: 2.0,
            orbit_period: 4.0,
        }
    }

    pub fn cycle(&self) -> Duration {
        self.cycle
    }

    /// How many full cycles have completed at `t`
    pub fn cycle_index(&self, t: Duration) -> u64 {
        if self.cycle.is_zero() {
            return 0;
        }
        (t.as_nanos() / self.cycle.as_nanos()) as u64
    }

    pub fn hand_at(&self, t: Duration) -> ScriptedHand {
        if self.cycle.is_zero() {
            return ScriptedHand::Absent;
        }

        let mut offset = Duration::from_nanos((t.as_nanos() % self.cycle.as_nanos()) as u64);
        for &(length, hand) in &self.segments {
            if offset < length {
                return hand;
            }
            offset -= length;
        }
        ScriptedHand::Absent
    }

    pub fn frame_at(&self, t: Duration) -> GestureFrame {
        let angle = t.as_secs_f32() / self.orbit_period * std::f32::consts::TAU;
        let position = Vec3::new(angle.cos(), angle.sin() * 0.6, 0.0) * self.orbit_radius;

        match self.hand_at(t) {
            ScriptedHand::Absent => GestureFrame::ABSENT,
            ScriptedHand::Closed => GestureFrame::new(position, false),
            ScriptedHand::Open => GestureFrame::new(position, true),
        }
    }
}
