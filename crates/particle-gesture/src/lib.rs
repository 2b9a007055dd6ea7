//! # Particle Gesture
//!
//! Turns raw hand-tracking output into the control signal the particle field
//! reacts to: open/closed classification of a landmark skeleton, detection
//! frames, the edge-triggered gather/explode state machine and the
//! latest-value mailbox the tracker publishes into.

pub mod classifier;
pub mod error;
pub mod frame;
pub mod mailbox;
pub mod state;

pub use classifier::*;
pub use error::*;
pub use frame::*;
pub use mailbox::*;
pub use state::*;
