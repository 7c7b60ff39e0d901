//! Error types
//!
//! Only setup can fail. Per-frame problems are absorbed by the tracker.

use thiserror::Error;
use wasm_bindgen::JsValue;

/// Failure reported by the camera helper on start/stop
#[derive(Debug, Clone, PartialEq, Error)]
#[error("capture failed: {0}")]
pub struct CaptureError(pub String);

/// Errors that can occur while bringing up hand tracking
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InitializationError {
    #[error("Video element not found")]
    MissingVideoElement,
    #[error("{0} library not loaded")]
    LibraryUnavailable(String),
    #[error("camera did not start: {0}")]
    CaptureStart(#[from] CaptureError),
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),
}

/// Invalid configuration values
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("smoothing alpha must be in (0, 1], got {0}")]
    SmoothingAlpha(f32),
    #[error("movement threshold must be finite and non-negative, got {0}")]
    MovementThreshold(f32),
    #[error("anchor landmark index {0} is out of range")]
    AnchorLandmark(usize),
    #[error("maxNumHands must be at least 1")]
    MaxHands,
    #[error("confidence threshold must be in [0, 1], got {0}")]
    Confidence(f32),
    #[error("capture resolution {width}x{height} is empty")]
    Resolution { width: u32, height: u32 },
}

impl From<InitializationError> for JsValue {
    fn from(err: InitializationError) -> Self {
        JsValue::from_str(&err.to_string())
    }
}

impl From<CaptureError> for JsValue {
    fn from(err: CaptureError) -> Self {
        JsValue::from_str(&err.to_string())
    }
}
