//! MediaPipe Hands / Camera bindings
//!
//! Looks up the MediaPipe globals loaded by the page's script tags and adapts
//! them to the [`Perception`] and [`Capture`] traits.

use std::cell::RefCell;

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;

use crate::error::{CaptureError, InitializationError};
use crate::tracking::{
    Capture, CaptureOptions, HandResults, HostEnvironment, Perception, PerceptionOptions,
    ResultsHandler, TrackingConfig,
};

/// CDN the Hands model files are fetched from
pub const DEFAULT_MODEL_BASE_URL: &str = "https://cdn.jsdelivr.net/npm/@mediapipe/hands@0.4/";

/// Selector of the `<video>` element the camera renders into
pub const DEFAULT_VIDEO_SELECTOR: &str = ".input_video";

// ============================================================================
// JS IMPORTS
// ============================================================================

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_name = Hands)]
    #[derive(Clone, Debug)]
    pub type MpHands;

    #[wasm_bindgen(method, js_name = setOptions)]
    fn set_options(this: &MpHands, options: &JsValue);

    #[wasm_bindgen(method, js_name = onResults)]
    fn on_results(this: &MpHands, callback: &js_sys::Function);

    #[wasm_bindgen(method)]
    fn send(this: &MpHands, inputs: &JsValue) -> js_sys::Promise;

    #[wasm_bindgen(method)]
    fn close(this: &MpHands) -> js_sys::Promise;

    #[wasm_bindgen(js_name = Camera)]
    #[derive(Clone, Debug)]
    pub type MpCamera;

    #[wasm_bindgen(method)]
    fn start(this: &MpCamera) -> js_sys::Promise;

    #[wasm_bindgen(method)]
    fn stop(this: &MpCamera) -> js_sys::Promise;
}

// ============================================================================
// HELPERS
// ============================================================================

/// Constructor registered on the global object under `name`
fn global_constructor(name: &str) -> Option<js_sys::Function> {
    js_sys::Reflect::get(&js_sys::global(), &JsValue::from_str(name))
        .ok()
        .and_then(|value| value.dyn_into::<js_sys::Function>().ok())
}

fn set_property(target: &js_sys::Object, key: &str, value: &JsValue) -> Result<(), JsValue> {
    js_sys::Reflect::set(target, &JsValue::from_str(key), value).map(|_| ())
}

/// Best-effort message from a thrown JS value
pub(crate) fn js_error_message(value: &JsValue) -> String {
    if let Some(message) = value.as_string() {
        return message;
    }
    if let Some(error) = value.dyn_ref::<js_sys::Error>() {
        return String::from(error.message());
    }
    format!("{:?}", value)
}

// ============================================================================
// PERCEPTION
// ============================================================================

/// MediaPipe Hands instance plus the closures it calls back into
pub struct JsHands {
    hands: MpHands,
    _locate_file: Closure<dyn Fn(String) -> String>,
    results_callback: RefCell<Option<Closure<dyn FnMut(JsValue)>>>,
}

impl JsHands {
    fn new(constructor: &js_sys::Function, model_base_url: &str) -> Result<Self, JsValue> {
        let base = model_base_url.to_owned();
        let locate_file =
            Closure::<dyn Fn(String) -> String>::new(move |file: String| format!("{}{}", base, file));

        let options = js_sys::Object::new();
        set_property(&options, "locateFile", locate_file.as_ref())?;

        let hands = js_sys::Reflect::construct(constructor, &js_sys::Array::of1(&options))?
            .unchecked_into::<MpHands>();

        Ok(Self {
            hands,
            _locate_file: locate_file,
            results_callback: RefCell::new(None),
        })
    }
}

impl Perception for JsHands {
    fn configure(&self, options: &PerceptionOptions) {
        match serde_wasm_bindgen::to_value(options) {
            Ok(value) => self.hands.set_options(&value),
            Err(err) => log::warn!("Could not encode hand tracking options: {}", err),
        }
    }

    fn on_results(&self, mut handler: ResultsHandler) {
        let callback = Closure::<dyn FnMut(JsValue)>::new(move |results: JsValue| {
            match serde_wasm_bindgen::from_value::<HandResults>(results) {
                Ok(results) => handler(results.into_detections()),
                Err(err) => log::warn!("Skipping malformed hand tracking results: {}", err),
            }
        });
        self.hands.on_results(callback.as_ref().unchecked_ref());
        *self.results_callback.borrow_mut() = Some(callback);
    }

    fn close(&self) {
        // Promise resolves once the WASM graph is torn down; nothing to wait for
        let _ = self.hands.close();
    }
}

// ============================================================================
// CAPTURE
// ============================================================================

/// MediaPipe camera helper pumping video frames into Hands
pub struct JsCamera {
    camera: MpCamera,
    _on_frame: Closure<dyn FnMut() -> js_sys::Promise>,
}

impl JsCamera {
    fn new(
        constructor: &js_sys::Function,
        video: &web_sys::HtmlVideoElement,
        hands: &MpHands,
        options: &CaptureOptions,
    ) -> Result<Self, JsValue> {
        let frame_hands = hands.clone();
        let frame_video = video.clone();
        let on_frame = Closure::<dyn FnMut() -> js_sys::Promise>::new(move || {
            let inputs = js_sys::Object::new();
            if let Err(err) = set_property(&inputs, "image", &frame_video) {
                return js_sys::Promise::reject(&err);
            }
            frame_hands.send(&inputs)
        });

        let camera_options = js_sys::Object::new();
        set_property(&camera_options, "onFrame", on_frame.as_ref())?;
        set_property(&camera_options, "width", &JsValue::from(options.width))?;
        set_property(&camera_options, "height", &JsValue::from(options.height))?;

        let camera = js_sys::Reflect::construct(
            constructor,
            &js_sys::Array::of2(video, &camera_options),
        )?
        .unchecked_into::<MpCamera>();

        Ok(Self {
            camera,
            _on_frame: on_frame,
        })
    }
}

impl Capture for JsCamera {
    async fn start(&self) -> Result<(), CaptureError> {
        JsFuture::from(self.camera.start())
            .await
            .map(|_| ())
            .map_err(|err| CaptureError(js_error_message(&err)))
    }

    async fn stop(&self) -> Result<(), CaptureError> {
        JsFuture::from(self.camera.stop())
            .await
            .map(|_| ())
            .map_err(|err| CaptureError(js_error_message(&err)))
    }
}

// ============================================================================
// HOST ENVIRONMENT
// ============================================================================

/// The browser page: DOM video element plus MediaPipe globals
#[derive(Clone, Debug)]
pub struct BrowserEnvironment {
    pub video_selector: String,
    pub model_base_url: String,
}

impl Default for BrowserEnvironment {
    fn default() -> Self {
        Self {
            video_selector: DEFAULT_VIDEO_SELECTOR.to_owned(),
            model_base_url: DEFAULT_MODEL_BASE_URL.to_owned(),
        }
    }
}

impl BrowserEnvironment {
    fn video_element(&self) -> Option<web_sys::HtmlVideoElement> {
        web_sys::window()?
            .document()?
            .query_selector(&self.video_selector)
            .ok()
            .flatten()?
            .dyn_into::<web_sys::HtmlVideoElement>()
            .ok()
    }
}

impl HostEnvironment for BrowserEnvironment {
    type Perception = JsHands;
    type Capture = JsCamera;

    fn connect(&self, config: &TrackingConfig) -> Result<(JsHands, JsCamera), InitializationError> {
        let video = self
            .video_element()
            .ok_or(InitializationError::MissingVideoElement)?;

        let hands_constructor = global_constructor("Hands")
            .ok_or_else(|| InitializationError::LibraryUnavailable("MediaPipe Hands".into()))?;
        let hands = JsHands::new(&hands_constructor, &self.model_base_url).map_err(|err| {
            InitializationError::LibraryUnavailable(format!(
                "MediaPipe Hands ({})",
                js_error_message(&err)
            ))
        })?;

        let camera_constructor = global_constructor("Camera")
            .ok_or_else(|| InitializationError::LibraryUnavailable("MediaPipe Camera".into()))?;
        let camera = JsCamera::new(&camera_constructor, &video, &hands.hands, &config.capture)
            .map_err(|err| {
                InitializationError::LibraryUnavailable(format!(
                    "MediaPipe Camera ({})",
                    js_error_message(&err)
                ))
            })?;

        Ok((hands, camera))
    }
}
