//! Latest-value handoff between the tracker and the simulation
//!
//! The tracker publishes at its own (lower) rate, the simulation reads once per
//! tick. Only the newest frame matters: publishing overwrites, nothing queues,
//! and a read never waits for a fresh frame.

use std::sync::{Arc, Mutex, MutexGuard};

use crate::frame::GestureFrame;

#[derive(Debug, Clone, Default)]
pub struct FrameMailbox {
    slot: Arc<Mutex<Slot>>,
}

#[derive(Debug, Default)]
struct Slot {
    frame: GestureFrame,
    sequence: u64,
}

impl FrameMailbox {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Slot> {
        // A frame is plain data, so a writer that panicked cannot leave it torn
        self.slot.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Overwrite the latest frame
    pub fn publish(&self, frame: GestureFrame) {
        let mut slot = self.lock();
        slot.frame = frame;
        slot.sequence += 1;
    }

    /// Snapshot of the newest frame ([`GestureFrame::ABSENT`] before the first publish)
    pub fn latest(&self) -> GestureFrame {
        self.lock().frame
    }

    /// Number of frames published so far
    pub fn sequence(&self) -> u64 {
        self.lock().sequence
    }
}
