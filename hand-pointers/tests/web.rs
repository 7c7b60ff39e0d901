//! Browser tests for the JS bridge
//! Run with: wasm-pack test --headless --firefox

#![cfg(target_arch = "wasm32")]

use hand_pointers::tracking::{Hand, HandResults};
use hand_pointers::*;
use wasm_bindgen::JsValue;
use wasm_bindgen_futures::JsFuture;
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

#[wasm_bindgen_test]
fn test_version() {
    assert_eq!(get_version(), env!("CARGO_PKG_VERSION"));
}

#[wasm_bindgen_test]
fn test_manager_defaults() {
    let manager = HandTrackingManager::new(JsValue::UNDEFINED).unwrap();
    assert!(!manager.is_initialized());
    assert_eq!(manager.state(), "Uninitialized");
    assert!(manager.pointer(0).is_undefined());
    assert!(manager.pointer(7).is_undefined());
}

#[wasm_bindgen_test]
fn test_manager_rejects_bad_config() {
    let config = js_sys::JSON::parse(r#"{"tracker": {"smoothingAlpha": 2.0}}"#).unwrap();
    assert!(HandTrackingManager::new(config).is_err());
}

#[wasm_bindgen_test]
fn test_results_decode_from_js_object() {
    let results = js_sys::JSON::parse(
        r#"{"multiHandLandmarks": [[{"x": 0.1, "y": 0.2, "z": 0.0}]],
            "multiHandedness": [{"index": 0, "score": 0.9, "label": "Right"}]}"#,
    )
    .unwrap();
    let decoded: HandResults = serde_wasm_bindgen::from_value(results).unwrap();
    let detections = decoded.into_detections();
    assert_eq!(detections.len(), 1);
    assert_eq!(detections[0].hand, Hand::Right);
}

#[wasm_bindgen_test]
async fn test_initialize_without_video_element_rejects() {
    let mut manager = HandTrackingManager::new(JsValue::UNDEFINED).unwrap();
    manager.set_video_selector("#no-such-video".into());
    let err = JsFuture::from(manager.initialize()).await.unwrap_err();
    assert_eq!(err.as_string().as_deref(), Some("Video element not found"));
    assert!(!manager.is_initialized());
}

fn number_at(value: &JsValue, path: &[&str]) -> Option<f64> {
    let mut current = value.clone();
    for key in path {
        current = js_sys::Reflect::get(&current, &JsValue::from_str(key)).ok()?;
    }
    current.as_f64()
}

#[wasm_bindgen_test]
fn test_pointer_template_seeds_new_pointers() {
    let manager = HandTrackingManager::new(JsValue::UNDEFINED).unwrap();
    let template = js_sys::JSON::parse(
        r#"{"texcoordX": 0.5, "texcoordY": 0.5, "color": {"r": 0.3, "g": 0.3, "b": 0.3}}"#,
    )
    .unwrap();
    manager.set_pointer_template(template).unwrap();

    manager.pointers().borrow_mut().get_or_create(Hand::Right);
    let pointer = manager.pointer(1);
    assert_eq!(number_at(&pointer, &["texcoordX"]), Some(0.5));
    assert!((number_at(&pointer, &["color", "r"]).unwrap() - 0.3).abs() < 1e-6);
    assert!(manager.pointer(0).is_undefined());
}

#[wasm_bindgen_test]
fn test_pointer_template_rejects_wrong_types() {
    let manager = HandTrackingManager::new(JsValue::UNDEFINED).unwrap();
    let template = js_sys::JSON::parse(r#"{"down": "yes"}"#).unwrap();
    assert!(manager.set_pointer_template(template).is_err());
}

#[wasm_bindgen_test]
fn test_set_pointer_color() {
    let manager = HandTrackingManager::new(JsValue::UNDEFINED).unwrap();
    assert!(!manager.set_pointer_color(0, 1.0, 1.0, 1.0));

    manager.pointers().borrow_mut().get_or_create(Hand::Left).down = true;
    assert!(manager.set_pointer_color(0, 0.25, 0.5, 0.75));
    let pointer = manager.pointer(0);
    assert_eq!(number_at(&pointer, &["color", "g"]), Some(0.5));
    assert_eq!(number_at(&pointer, &["color", "b"]), Some(0.75));
    assert!(!manager.set_pointer_color(5, 0.0, 0.0, 0.0));
}

#[wasm_bindgen_test]
async fn test_shutdown_before_initialize_resolves() {
    let mut manager = HandTrackingManager::new(JsValue::UNDEFINED).unwrap();
    manager.set_video_selector("#no-such-video".into());
    let init = manager.initialize();
    JsFuture::from(manager.shutdown()).await.unwrap();
    assert!(JsFuture::from(init).await.is_err());
    assert_eq!(manager.state(), "Uninitialized");
}
