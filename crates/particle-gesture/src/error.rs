//! Error types for gesture input

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GestureError {
    /// Classification needs a full hand skeleton
    #[error("expected {need} hand landmarks, got {got}")]
    LandmarkCount {
        /// Number of landmarks supplied
        got: usize,
        /// Number of landmarks required
        need: usize,
    },
}
