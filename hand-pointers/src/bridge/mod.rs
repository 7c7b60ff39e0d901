//! Bridge module - JS ↔ Rust communication
//!
//! All #[wasm_bindgen] entry points live here.
//! Re-exports only in mod.rs, logic in submodules.

mod manager;
mod mediapipe;

pub use manager::HandTrackingManager;

pub use mediapipe::{
    BrowserEnvironment, JsCamera, JsHands,
    // Constants
    DEFAULT_MODEL_BASE_URL, DEFAULT_VIDEO_SELECTOR,
};
