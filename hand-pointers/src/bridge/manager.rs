//! `HandTrackingManager` - the JS-facing handle for hand tracking
//!
//! Owns the pointer set shared with the fluid renderer and the current
//! tracking session. Async operations return promises; each one clones the
//! session handle up front so no borrow is held across an await.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::{future_to_promise, spawn_local};

use super::mediapipe::{BrowserEnvironment, JsCamera, JsHands};
use crate::physics::CanvasAspect;
use crate::tracking::{
    Hand, LifecycleState, Pointer, PointerColor, PointerSet, SharedPointers, TrackingConfig,
    TrackingSession,
};

type BrowserSession = TrackingSession<JsHands, JsCamera>;
type SharedSlot = Rc<RefCell<SessionSlot<BrowserSession>>>;

/// What the manager currently holds
///
/// `Initializing` is claimed before the first await of `initialize` so a
/// second call made while the camera is starting sees it.
enum SessionSlot<S> {
    Empty,
    Initializing,
    Active(Rc<S>),
}

enum Claim<S> {
    /// Another initialize is pending or the session is still running
    Busy,
    /// Slot is now `Initializing`; carries the finished session it replaced
    Claimed(Option<Rc<S>>),
}

impl<S> SessionSlot<S> {
    fn active(&self) -> Option<Rc<S>> {
        match self {
            Self::Active(session) => Some(Rc::clone(session)),
            _ => None,
        }
    }

    fn claim(&mut self, is_running: impl Fn(&S) -> bool) -> Claim<S> {
        let busy = match self {
            Self::Empty => false,
            Self::Initializing => true,
            Self::Active(session) => is_running(session),
        };
        if busy {
            return Claim::Busy;
        }
        match std::mem::replace(self, Self::Initializing) {
            Self::Active(previous) => Claim::Claimed(Some(previous)),
            _ => Claim::Claimed(None),
        }
    }

    /// Store a freshly initialized session
    ///
    /// Hands the session back if the claim was cancelled in the meantime.
    fn finish(&mut self, session: S) -> Result<Rc<S>, S> {
        if !matches!(self, Self::Initializing) {
            return Err(session);
        }
        let session = Rc::new(session);
        *self = Self::Active(Rc::clone(&session));
        Ok(session)
    }

    /// Initialize failed; a failed attempt leaves the manager uninitialized
    fn abandon(&mut self) {
        if matches!(self, Self::Initializing) {
            *self = Self::Empty;
        }
    }

    /// Shutdown requested: drops a pending claim, returns the active session
    fn cancel(&mut self) -> Option<Rc<S>> {
        if matches!(self, Self::Initializing) {
            *self = Self::Empty;
        }
        self.active()
    }
}

#[wasm_bindgen]
pub struct HandTrackingManager {
    pointers: SharedPointers,
    config: TrackingConfig,
    environment: BrowserEnvironment,
    session: SharedSlot,
    aspect: Rc<Cell<Option<CanvasAspect>>>,
    visibility_listener: Option<Closure<dyn FnMut(web_sys::Event)>>,
}

#[wasm_bindgen]
impl HandTrackingManager {
    /// Create a manager; `config` may be omitted or partial
    #[wasm_bindgen(constructor)]
    pub fn new(config: JsValue) -> Result<HandTrackingManager, JsValue> {
        let config: TrackingConfig = if config.is_undefined() || config.is_null() {
            TrackingConfig::default()
        } else {
            serde_wasm_bindgen::from_value(config)?
        };
        config
            .validate()
            .map_err(|err| JsValue::from_str(&err.to_string()))?;

        Ok(Self {
            pointers: PointerSet::new().shared(),
            config,
            environment: BrowserEnvironment::default(),
            session: Rc::new(RefCell::new(SessionSlot::Empty)),
            aspect: Rc::new(Cell::new(None)),
            visibility_listener: None,
        })
    }

    /// CSS selector of the `<video>` element (default `.input_video`)
    #[wasm_bindgen(js_name = setVideoSelector)]
    pub fn set_video_selector(&mut self, selector: String) {
        self.environment.video_selector = selector;
    }

    /// Base URL the Hands model files are loaded from
    #[wasm_bindgen(js_name = setModelBaseUrl)]
    pub fn set_model_base_url(&mut self, url: String) {
        self.environment.model_base_url = url;
    }

    /// Start hand tracking. Rejects with the initialization error message.
    pub fn initialize(&self) -> js_sys::Promise {
        let env = self.environment.clone();
        let config = self.config.clone();
        let pointers = Rc::clone(&self.pointers);
        let slot = Rc::clone(&self.session);
        let aspect = Rc::clone(&self.aspect);

        future_to_promise(async move {
            let claim = slot.borrow_mut().claim(|session: &BrowserSession| {
                matches!(session.state(), LifecycleState::Ready | LifecycleState::Paused)
            });
            let previous = match claim {
                Claim::Busy => {
                    log::debug!("initialize ignored, hand tracking already running");
                    return Ok(JsValue::UNDEFINED);
                }
                Claim::Claimed(previous) => previous,
            };
            if let Some(previous) = previous {
                previous.shutdown().await;
            }

            let session = match BrowserSession::initialize(&env, config, pointers).await {
                Ok(session) => session,
                Err(err) => {
                    slot.borrow_mut().abandon();
                    return Err(err.into());
                }
            };
            if let Some(aspect) = aspect.get() {
                session.tracker().borrow_mut().set_correction(aspect);
            }

            let stored = slot.borrow_mut().finish(session);
            if let Err(session) = stored {
                log::info!("Shutdown requested while initializing, stopping new session");
                session.shutdown().await;
            }
            Ok(JsValue::UNDEFINED)
        })
    }

    /// Rejects if the camera refused to stop; tracking stays active then
    pub fn pause(&self) -> js_sys::Promise {
        let session = self.current_session();
        future_to_promise(async move {
            if let Some(session) = session {
                session.pause().await?;
            }
            Ok(JsValue::UNDEFINED)
        })
    }

    pub fn resume(&self) -> js_sys::Promise {
        let session = self.current_session();
        future_to_promise(async move {
            if let Some(session) = session {
                session.resume().await?;
            }
            Ok(JsValue::UNDEFINED)
        })
    }

    /// Also cancels an `initialize` that has not resolved yet
    pub fn shutdown(&self) -> js_sys::Promise {
        let session = self.session.borrow_mut().cancel();
        future_to_promise(async move {
            if let Some(session) = session {
                session.shutdown().await;
            }
            Ok(JsValue::UNDEFINED)
        })
    }

    /// Pause when the page is hidden, resume when it is shown again
    #[wasm_bindgen(js_name = onVisibilityChange)]
    pub fn on_visibility_change(&self, hidden: bool) -> js_sys::Promise {
        let session = self.current_session();
        future_to_promise(async move {
            if let Some(session) = session {
                session.on_visibility_change(hidden).await?;
            }
            Ok(JsValue::UNDEFINED)
        })
    }

    /// Subscribe to the document's `visibilitychange` event
    #[wasm_bindgen(js_name = watchVisibility)]
    pub fn watch_visibility(&mut self) -> Result<(), JsValue> {
        if self.visibility_listener.is_some() {
            return Ok(());
        }
        let document = web_sys::window()
            .and_then(|w| w.document())
            .ok_or_else(|| JsValue::from_str("No document found"))?;

        let slot = Rc::clone(&self.session);
        let listener_document = document.clone();
        let listener = Closure::<dyn FnMut(web_sys::Event)>::new(move |_event: web_sys::Event| {
            let Some(session) = slot.borrow().active() else {
                return;
            };
            let hidden = listener_document.hidden();
            spawn_local(async move {
                if let Err(err) = session.on_visibility_change(hidden).await {
                    log::warn!("Hand tracking visibility change failed: {}", err);
                }
            });
        });

        document.add_event_listener_with_callback("visibilitychange", listener.as_ref().unchecked_ref())?;
        self.visibility_listener = Some(listener);
        Ok(())
    }

    /// Canvas size used for delta aspect correction
    #[wasm_bindgen(js_name = setCanvasSize)]
    pub fn set_canvas_size(&self, width: f32, height: f32) {
        let Some(aspect) = CanvasAspect::new(width, height) else {
            log::warn!("Ignoring degenerate canvas size {}x{}", width, height);
            return;
        };
        self.aspect.set(Some(aspect));
        if let Some(session) = self.current_session() {
            session.tracker().borrow_mut().set_correction(aspect);
        }
    }

    #[wasm_bindgen(getter, js_name = isInitialized)]
    pub fn is_initialized(&self) -> bool {
        matches!(self.state_value(), LifecycleState::Ready | LifecycleState::Paused)
    }

    #[wasm_bindgen(getter)]
    pub fn state(&self) -> String {
        format!("{:?}", self.state_value())
    }

    /// Pointer for hand `index` (0 = left, 1 = right) as a plain object
    pub fn pointer(&self, index: usize) -> JsValue {
        let pointers = self.pointers.borrow();
        Hand::from_index(index)
            .and_then(|hand| pointers.get(hand))
            .and_then(|pointer| serde_wasm_bindgen::to_value(pointer).ok())
            .unwrap_or(JsValue::UNDEFINED)
    }

    /// Defaults for pointers created from now on, as a partial pointer object
    ///
    /// e.g. `{ texcoordX: 0.5, texcoordY: 0.5, color: { r: 0, g: 0, b: 0 } }`.
    #[wasm_bindgen(js_name = setPointerTemplate)]
    pub fn set_pointer_template(&self, template: JsValue) -> Result<(), JsValue> {
        let template: Pointer = serde_wasm_bindgen::from_value(template)?;
        self.pointers.borrow_mut().set_template(template);
        Ok(())
    }

    /// Override a live pointer's colour; the next press resets it to the
    /// hand colour. Returns false if the pointer does not exist yet.
    #[wasm_bindgen(js_name = setPointerColor)]
    pub fn set_pointer_color(&self, index: usize, r: f32, g: f32, b: f32) -> bool {
        let mut pointers = self.pointers.borrow_mut();
        match Hand::from_index(index).and_then(|hand| pointers.get_mut(hand)) {
            Some(pointer) => {
                pointer.color = PointerColor::new(r, g, b);
                true
            }
            None => false,
        }
    }

    /// Acknowledge a pointer's movement after the renderer consumed it
    #[wasm_bindgen(js_name = clearMoved)]
    pub fn clear_moved(&self, index: usize) {
        if let Some(hand) = Hand::from_index(index) {
            self.pointers.borrow_mut().clear_moved(hand);
        }
    }
}

impl HandTrackingManager {
    /// Pointer set for Rust-side renderers
    pub fn pointers(&self) -> SharedPointers {
        Rc::clone(&self.pointers)
    }

    fn current_session(&self) -> Option<Rc<BrowserSession>> {
        self.session.borrow().active()
    }

    fn state_value(&self) -> LifecycleState {
        self.current_session()
            .map(|s| s.state())
            .unwrap_or(LifecycleState::Uninitialized)
    }
}

impl Drop for HandTrackingManager {
    fn drop(&mut self) {
        if let Some(listener) = self.visibility_listener.take() {
            if let Some(document) = web_sys::window().and_then(|w| w.document()) {
                let _ = document.remove_event_listener_with_callback(
                    "visibilitychange",
                    listener.as_ref().unchecked_ref(),
                );
            }
        }
    }
}
