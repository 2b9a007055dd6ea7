//! Detection frames delivered by the hand tracker

use glam::Vec3;

use crate::classifier::{classify_hand, PALM_CENTER};
use crate::error::GestureError;

/// One tracker sample: is a hand visible, where is it, is it open
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GestureFrame {
    pub detected: bool,
    /// Pointer position in world space
    pub position: Vec3,
    pub is_open: bool,
}

impl Default for GestureFrame {
    fn default() -> Self {
        Self::ABSENT
    }
}

impl GestureFrame {
    /// No hand in view
    pub const ABSENT: GestureFrame = GestureFrame {
        detected: false,
        position: Vec3::ZERO,
        is_open: false,
    };

    /// A detected hand
    pub fn new(position: Vec3, is_open: bool) -> Self {
        Self {
            detected: true,
            position,
            is_open,
        }
    }

    /// Classify a landmark skeleton and place its palm centre in world space
    pub fn from_landmarks(
        landmarks: &[Vec3],
        projection: &TrackingProjection,
    ) -> Result<Self, GestureError> {
        let is_open = classify_hand(landmarks)?;
        Ok(Self::new(projection.to_world(landmarks[PALM_CENTER]), is_open))
    }
}

/// Maps normalized image coordinates (`[0, 1]²`, y pointing down) to the
/// world-space plane the particle field lives in
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrackingProjection {
    /// World width covered by the camera image
    pub width: f32,
    /// World height covered by the camera image
    pub height: f32,
    /// Flip horizontally so the field follows the hand like a mirror
    pub mirror: bool,
}

impl Default for TrackingProjection {
    fn default() -> Self {
        Self {
            width: 10.0,
            height: 7.5,
            mirror: true,
        }
    }
}

impl TrackingProjection {
    pub fn to_world(&self, landmark: Vec3) -> Vec3 {
        let x = if self.mirror {
            0.5 - landmark.x
        } else {
            landmark.x - 0.5
        };
        Vec3::new(x * self.width, (0.5 - landmark.y) * self.height, 0.0)
    }
}
