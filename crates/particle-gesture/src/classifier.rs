//! Open/closed hand classification from tracked landmarks
//!
//! Uses the 21-point hand skeleton layout (wrist = 0, four landmarks per
//! finger from thumb to pinky). Only the x/y projection is considered.

use glam::{Vec2, Vec3};

use crate::error::GestureError;

/// Landmarks per tracked hand
pub const LANDMARK_COUNT: usize = 21;

/// Palm base (wrist)
pub const PALM_BASE: usize = 0;

/// Middle finger knuckle, used as the palm centre
pub const PALM_CENTER: usize = 9;

/// Tips of index, middle, ring and pinky
pub const FINGER_TIPS: [usize; 4] = [8, 12, 16, 20];

/// Base knuckles matching `FINGER_TIPS`
pub const FINGER_KNUCKLES: [usize; 4] = [5, 9, 13, 17];

/// A finger is extended when tip-to-knuckle exceeds this fraction of knuckle-to-palm
pub const EXTENSION_RATIO: f32 = 0.5;

/// Extended fingers needed for an open hand
pub const OPEN_FINGER_THRESHOLD: usize = 3;

/// Number of extended fingers (thumb excluded)
pub fn extended_fingers(landmarks: &[Vec3]) -> Result<usize, GestureError> {
    if landmarks.len() != LANDMARK_COUNT {
        return Err(GestureError::LandmarkCount {
            got: landmarks.len(),
            need: LANDMARK_COUNT,
        });
    }

    let flat = |i: usize| Vec2::new(landmarks[i].x, landmarks[i].y);
    let palm = flat(PALM_BASE);

    let count = FINGER_TIPS
        .iter()
        .zip(FINGER_KNUCKLES.iter())
        .filter(|&(&tip, &knuckle)| {
            let tip_to_knuckle = flat(tip).distance(flat(knuckle));
            let knuckle_to_palm = flat(knuckle).distance(palm);
            tip_to_knuckle > knuckle_to_palm * EXTENSION_RATIO
        })
        .count();

    Ok(count)
}

/// Classify a hand as open (`true`) or closed.
///
/// Rejects anything other than exactly 21 landmarks.
pub fn classify_hand(landmarks: &[Vec3]) -> Result<bool, GestureError> {
    Ok(extended_fingers(landmarks)? >= OPEN_FINGER_THRESHOLD)
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// Upright hand in image space (y down): wrist at the bottom, knuckles
    /// 0.3 above it. `extended[i]` lifts finger i's tip another 0.3.
    pub(crate) fn hand(extended: [bool; 4]) -> Vec<Vec3> {
        let mut landmarks = vec![Vec3::ZERO; LANDMARK_COUNT];
        landmarks[PALM_BASE] = Vec3::new(0.5, 0.9, 0.0);

        for (finger, (&tip, &knuckle)) in FINGER_TIPS.iter().zip(FINGER_KNUCKLES.iter()).enumerate() {
            let knuckle_pos = Vec3::new(0.35 + 0.1 * finger as f32, 0.6, 0.0);
            landmarks[knuckle] = knuckle_pos;
            landmarks[knuckle + 1] = knuckle_pos;
            landmarks[knuckle + 2] = knuckle_pos;
            landmarks[tip] = if extended[finger] {
                knuckle_pos - Vec3::new(0.0, 0.3, 0.0)
            } else {
                knuckle_pos
            };
        }
        landmarks
    }

    #[test]
    fn test_open_hand() {
        assert_eq!(classify_hand(&hand([true; 4])), Ok(true));
        assert_eq!(extended_fingers(&hand([true; 4])), Ok(4));
    }

    #[test]
    fn test_fist() {
        assert_eq!(classify_hand(&hand([false; 4])), Ok(false));
        assert_eq!(extended_fingers(&hand([false; 4])), Ok(0));
    }

    #[test]
    fn test_three_fingers_is_open() {
        assert_eq!(classify_hand(&hand([true, true, true, false])), Ok(true));
        assert_eq!(classify_hand(&hand([true, false, true, false])), Ok(false));
    }

    #[test]
    fn test_depth_is_ignored() {
        let mut landmarks = hand([false; 4]);
        for &tip in &FINGER_TIPS {
            landmarks[tip].z = 5.0;
        }
        assert_eq!(classify_hand(&landmarks), Ok(false));
    }

    #[test]
    fn test_rejects_partial_skeleton() {
        let landmarks = vec![Vec3::ZERO; 20];
        assert_eq!(
            classify_hand(&landmarks),
            Err(GestureError::LandmarkCount { got: 20, need: 21 })
        );
        assert!(classify_hand(&[]).is_err());
        assert!(classify_hand(&vec![Vec3::ZERO; 22]).is_err());
    }
}
