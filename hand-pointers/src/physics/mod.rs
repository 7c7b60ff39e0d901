//! Physics module - smoothing, frame deltas and delta correction
//!
//! Re-exports only. All logic in submodules.

mod correction;
mod ema;
mod velocity;

pub use correction::{AspectCorrection, CanvasAspect, NoCorrection};
pub use ema::{ExponentialSmoother, ExponentialSmoother2D};
pub use velocity::{is_significant, DeltaTracker, MOVEMENT_THRESHOLD};
