//! Hand landmarks and per-frame detections
//!
//! Decodes the MediaPipe Hands results object into a batch of
//! [`Detection`]s. A batch only lives for one results callback.

use serde::{Deserialize, Serialize};

use super::hand::Hand;

// ============================================================================
// HAND LANDMARK INDICES (MediaPipe Hands - 21 total)
// ============================================================================

pub const HAND_LANDMARK_COUNT: usize = 21;

pub const WRIST: usize = 0;
pub const THUMB_CMC: usize = 1;
pub const THUMB_MCP: usize = 2;
pub const THUMB_IP: usize = 3;
pub const THUMB_TIP: usize = 4;
pub const INDEX_FINGER_MCP: usize = 5;
pub const INDEX_FINGER_PIP: usize = 6;
pub const INDEX_FINGER_DIP: usize = 7;
pub const INDEX_FINGER_TIP: usize = 8;
pub const MIDDLE_FINGER_MCP: usize = 9;
pub const MIDDLE_FINGER_PIP: usize = 10;
pub const MIDDLE_FINGER_DIP: usize = 11;
pub const MIDDLE_FINGER_TIP: usize = 12;
pub const RING_FINGER_MCP: usize = 13;
pub const RING_FINGER_PIP: usize = 14;
pub const RING_FINGER_DIP: usize = 15;
pub const RING_FINGER_TIP: usize = 16;
pub const PINKY_MCP: usize = 17;
pub const PINKY_PIP: usize = 18;
pub const PINKY_DIP: usize = 19;
pub const PINKY_TIP: usize = 20;

// ============================================================================
// DATA STRUCTURES
// ============================================================================

/// A single landmark point (normalized image coordinates)
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Landmark {
    pub x: f32, // 0-1 normalized
    pub y: f32, // 0-1 normalized
    #[serde(default)]
    pub z: f32, // Relative depth, absent for 2D models
}

impl Landmark {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y, z: 0.0 }
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// One detected hand in one frame
#[derive(Clone, Debug, PartialEq)]
pub struct Detection {
    pub hand: Hand,
    pub landmarks: Vec<Landmark>,
}

impl Detection {
    pub fn new(hand: Hand, landmarks: Vec<Landmark>) -> Self {
        Self { hand, landmarks }
    }

    /// Landmark at `index`, if the model reported that many points
    pub fn landmark(&self, index: usize) -> Option<Landmark> {
        self.landmarks.get(index).copied()
    }
}

// ============================================================================
// MEDIAPIPE RESULTS
// ============================================================================

/// Handedness classification for one landmark set
///
/// Only the label is read; MediaPipe's `score` and `index` are ignored.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct Handedness {
    #[serde(default)]
    pub label: String,
}

/// The subset of a MediaPipe Hands results object this crate reads
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HandResults {
    #[serde(default)]
    pub multi_hand_landmarks: Option<Vec<Vec<Landmark>>>,
    #[serde(default)]
    pub multi_handedness: Option<Vec<Handedness>>,
}

impl HandResults {
    /// Pair landmark sets with handedness entries by position
    ///
    /// Returns an empty batch when either array is missing. Entries whose
    /// label is not a known hand are dropped.
    pub fn into_detections(self) -> Vec<Detection> {
        let (Some(landmark_sets), Some(handedness)) =
            (self.multi_hand_landmarks, self.multi_handedness)
        else {
            return Vec::new();
        };

        landmark_sets
            .into_iter()
            .zip(handedness)
            .filter_map(|(landmarks, handedness)| match Hand::from_label(&handedness.label) {
                Some(hand) => Some(Detection::new(hand, landmarks)),
                None => {
                    log::warn!("Dropping hand with unknown handedness label {:?}", handedness.label);
                    None
                }
            })
            .collect()
    }
}
