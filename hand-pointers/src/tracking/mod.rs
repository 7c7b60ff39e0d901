//! Tracking module - hand detections to fluid pointers
//!
//! Re-exports only. All logic in submodules.

mod config;
mod hand;
pub mod landmarks;
mod lifecycle;
mod pointer;
mod tracker;

pub use config::{CaptureOptions, PerceptionOptions, TrackerConfig, TrackingConfig};
pub use hand::Hand;
pub use landmarks::{
    Detection, HandResults, Handedness, Landmark,
    // Constants
    HAND_LANDMARK_COUNT, INDEX_FINGER_TIP, WRIST,
};
pub use lifecycle::{
    Capture, HostEnvironment, LifecycleState, Perception, ResultsHandler, TrackingSession,
};
pub use pointer::{Pointer, PointerColor, PointerFactory, PointerSet, SharedPointers};
pub use tracker::HandTracker;
