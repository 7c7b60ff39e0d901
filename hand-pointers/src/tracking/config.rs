//! Tracking configuration
//!
//! All structs deserialize from partial camelCase objects; missing fields
//! take their defaults.

use serde::{Deserialize, Serialize};

use super::landmarks::{HAND_LANDMARK_COUNT, INDEX_FINGER_TIP};
use crate::error::ConfigError;
use crate::physics::MOVEMENT_THRESHOLD;

/// Smoothing and movement settings for the tracker
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TrackerConfig {
    /// EMA weight of the newest sample (0-1], higher = more responsive
    pub smoothing_alpha: f32,
    /// Minimum per-axis delta that counts as movement (normalized units)
    pub movement_threshold: f32,
    /// Landmark used as the pointer position
    pub anchor_landmark: usize,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            smoothing_alpha: 0.4,
            movement_threshold: MOVEMENT_THRESHOLD,
            anchor_landmark: INDEX_FINGER_TIP,
        }
    }
}

impl TrackerConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.smoothing_alpha > 0.0 && self.smoothing_alpha <= 1.0) {
            return Err(ConfigError::SmoothingAlpha(self.smoothing_alpha));
        }
        if !(self.movement_threshold.is_finite() && self.movement_threshold >= 0.0) {
            return Err(ConfigError::MovementThreshold(self.movement_threshold));
        }
        if self.anchor_landmark >= HAND_LANDMARK_COUNT {
            return Err(ConfigError::AnchorLandmark(self.anchor_landmark));
        }
        Ok(())
    }
}

/// Options forwarded to the MediaPipe Hands `setOptions` call
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PerceptionOptions {
    pub max_num_hands: u32,
    /// 0 = lite (faster), 1 = full (more accurate)
    pub model_complexity: u32,
    pub min_detection_confidence: f32,
    pub min_tracking_confidence: f32,
}

impl Default for PerceptionOptions {
    fn default() -> Self {
        Self {
            max_num_hands: 2,
            model_complexity: 0,
            min_detection_confidence: 0.5,
            min_tracking_confidence: 0.5,
        }
    }
}

impl PerceptionOptions {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_num_hands == 0 {
            return Err(ConfigError::MaxHands);
        }
        for value in [self.min_detection_confidence, self.min_tracking_confidence] {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::Confidence(value));
            }
        }
        Ok(())
    }
}

/// Camera resolution requested from the capture helper
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CaptureOptions {
    pub width: u32,
    pub height: u32,
}

impl Default for CaptureOptions {
    fn default() -> Self {
        Self {
            width: 640,
            height: 480,
        }
    }
}

/// Complete configuration for a tracking session
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackingConfig {
    pub tracker: TrackerConfig,
    pub perception: PerceptionOptions,
    pub capture: CaptureOptions,
}

impl TrackingConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.tracker.validate()?;
        self.perception.validate()?;
        if self.capture.width == 0 || self.capture.height == 0 {
            return Err(ConfigError::Resolution {
                width: self.capture.width,
                height: self.capture.height,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = TrackingConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.tracker.smoothing_alpha, 0.4);
        assert_eq!(config.tracker.anchor_landmark, INDEX_FINGER_TIP);
        assert_eq!(config.capture, CaptureOptions { width: 640, height: 480 });
    }

    #[test]
    fn test_partial_json() {
        let config: TrackingConfig =
            serde_json::from_str(r#"{"tracker": {"smoothingAlpha": 0.7}}"#).unwrap();
        assert_eq!(config.tracker.smoothing_alpha, 0.7);
        assert_eq!(config.tracker.movement_threshold, MOVEMENT_THRESHOLD);
        assert_eq!(config.perception, PerceptionOptions::default());
    }

    #[test]
    fn test_perception_options_use_mediapipe_names() {
        let value = serde_json::to_value(PerceptionOptions::default()).unwrap();
        assert_eq!(value["maxNumHands"], 2);
        assert_eq!(value["modelComplexity"], 0);
        assert_eq!(value["minDetectionConfidence"], 0.5);
        assert_eq!(value["minTrackingConfidence"], 0.5);
    }

    #[test]
    fn test_rejects_bad_alpha() {
        for alpha in [0.0, -0.1, 1.5, f32::NAN] {
            let config = TrackerConfig {
                smoothing_alpha: alpha,
                ..TrackerConfig::default()
            };
            assert!(matches!(config.validate(), Err(ConfigError::SmoothingAlpha(_))));
        }
    }

    #[test]
    fn test_rejects_out_of_range_anchor() {
        let config = TrackerConfig {
            anchor_landmark: HAND_LANDMARK_COUNT,
            ..TrackerConfig::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::AnchorLandmark(_))));
    }

    #[test]
    fn test_rejects_zero_resolution() {
        let config = TrackingConfig {
            capture: CaptureOptions { width: 0, height: 480 },
            ..TrackingConfig::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::Resolution { .. })));
    }
}
