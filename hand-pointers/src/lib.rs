//! Hand Pointers - MediaPipe hand tracking for the WebGL fluid simulation
//!
//! Entry point for WASM module. Only contains:
//! - Module declarations
//! - wasm_bindgen entry points that delegate to submodules

pub mod bridge;
pub mod error;
pub mod physics;
pub mod tracking;

use wasm_bindgen::prelude::*;

pub use bridge::HandTrackingManager;
pub use error::{CaptureError, ConfigError, InitializationError};
pub use tracking::{
    Detection, Hand, HandTracker, Landmark, Pointer, PointerSet, TrackingConfig, TrackingSession,
};

// ============================================================================
// WASM ENTRY POINTS
// ============================================================================

/// Called automatically when WASM module loads
#[wasm_bindgen(start)]
pub fn init_panic_hook() {
    console_error_panic_hook::set_once();
}

/// Route `log` output to the browser console
///
/// Levels: "trace", "debug", "info", "warn", "error" (default "info").
#[wasm_bindgen(js_name = initLogging)]
pub fn init_logging(level: &str) {
    let log_level = match level.to_lowercase().as_str() {
        "trace" => log::Level::Trace,
        "debug" => log::Level::Debug,
        "warn" => log::Level::Warn,
        "error" => log::Level::Error,
        _ => log::Level::Info,
    };

    wasm_logger::init(wasm_logger::Config::new(log_level));
    log::info!("Hand tracking logging enabled at {}", log_level);
}

#[wasm_bindgen(js_name = getVersion)]
pub fn get_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
