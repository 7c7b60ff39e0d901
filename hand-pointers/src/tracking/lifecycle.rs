//! Tracking session lifecycle
//!
//! Wires a perception engine and a camera helper to a [`HandTracker`] and
//! drives them through `Uninitialized -> Ready <-> Paused -> ShutDown`.
//! Pausing stops the camera but keeps all smoothing memory and pointer
//! state, so tracking picks up where it left off.

use std::cell::{Cell, RefCell};
use std::future::Future;
use std::rc::Rc;

use super::config::{PerceptionOptions, TrackingConfig};
use super::landmarks::Detection;
use super::pointer::SharedPointers;
use super::tracker::HandTracker;
use crate::error::{CaptureError, InitializationError};

/// Per-frame results callback registered with the perception engine
pub type ResultsHandler = Box<dyn FnMut(Vec<Detection>)>;

/// Hand landmark detector (MediaPipe Hands in the browser)
pub trait Perception {
    fn configure(&self, options: &PerceptionOptions);
    fn on_results(&self, handler: ResultsHandler);
    /// Release the engine; no results are delivered afterwards
    fn close(&self);
}

/// Camera helper feeding frames to the perception engine
///
/// Both futures resolve once the camera has acknowledged the change.
pub trait Capture {
    fn start(&self) -> impl Future<Output = Result<(), CaptureError>>;
    fn stop(&self) -> impl Future<Output = Result<(), CaptureError>>;
}

/// Source of the collaborators a session needs
pub trait HostEnvironment {
    type Perception: Perception;
    type Capture: Capture;

    /// Locate the video source and create the perception engine and camera
    fn connect(
        &self,
        config: &TrackingConfig,
    ) -> Result<(Self::Perception, Self::Capture), InitializationError>;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LifecycleState {
    Uninitialized,
    Ready,
    Paused,
    ShutDown,
}

pub struct TrackingSession<P, C> {
    perception: P,
    capture: C,
    tracker: Rc<RefCell<HandTracker>>,
    state: Rc<Cell<LifecycleState>>,
    /// A `resume` is waiting on the camera; cleared by `pause` to cancel it
    start_pending: Cell<bool>,
}

impl<P: Perception, C: Capture> TrackingSession<P, C> {
    /// Connect to the host, register the results callback and start the camera
    ///
    /// Failures are returned as-is and never retried.
    pub async fn initialize<E>(
        env: &E,
        config: TrackingConfig,
        pointers: SharedPointers,
    ) -> Result<Self, InitializationError>
    where
        E: HostEnvironment<Perception = P, Capture = C>,
    {
        match Self::start_session(env, config, pointers).await {
            Ok(session) => {
                log::info!("Hand tracking initialized successfully");
                Ok(session)
            }
            Err(err) => {
                log::error!("Hand tracking initialization failed: {}", err);
                Err(err)
            }
        }
    }

    async fn start_session<E>(
        env: &E,
        config: TrackingConfig,
        pointers: SharedPointers,
    ) -> Result<Self, InitializationError>
    where
        E: HostEnvironment<Perception = P, Capture = C>,
    {
        config.validate()?;
        let (perception, capture) = env.connect(&config)?;

        perception.configure(&config.perception);

        let tracker = Rc::new(RefCell::new(HandTracker::new(config.tracker, pointers)));
        let state = Rc::new(Cell::new(LifecycleState::Uninitialized));

        let frame_tracker = Rc::clone(&tracker);
        let frame_state = Rc::clone(&state);
        perception.on_results(Box::new(move |detections| {
            if frame_state.get() != LifecycleState::Ready {
                return;
            }
            match frame_tracker.try_borrow_mut() {
                Ok(mut tracker) => tracker.process(&detections),
                Err(_) => log::warn!("Dropping re-entrant hand tracking frame"),
            }
        }));

        if let Err(err) = capture.start().await {
            perception.close();
            return Err(err.into());
        }

        state.set(LifecycleState::Ready);

        Ok(Self {
            perception,
            capture,
            tracker,
            state,
            start_pending: Cell::new(false),
        })
    }

    pub fn state(&self) -> LifecycleState {
        self.state.get()
    }

    pub fn is_ready(&self) -> bool {
        self.state.get() == LifecycleState::Ready
    }

    pub fn tracker(&self) -> &Rc<RefCell<HandTracker>> {
        &self.tracker
    }

    /// Stop frame delivery, keeping filters and pointers
    ///
    /// Frames are gated off before the camera acknowledges the stop. If the
    /// camera refuses to stop the session returns to `Ready` and the error is
    /// returned. Pausing while a `resume` is still starting the camera cancels
    /// that resume.
    pub async fn pause(&self) -> Result<(), CaptureError> {
        match self.state.get() {
            LifecycleState::Ready => {}
            LifecycleState::Paused if self.start_pending.get() => {
                self.start_pending.set(false);
                log::debug!("pause cancels pending resume");
                return Ok(());
            }
            state => {
                log::debug!("pause ignored in state {:?}", state);
                return Ok(());
            }
        }
        self.state.set(LifecycleState::Paused);
        if let Err(err) = self.capture.stop().await {
            log::warn!("Failed to stop camera on pause: {}", err);
            if self.state.get() == LifecycleState::Paused {
                self.state.set(LifecycleState::Ready);
            }
            return Err(err);
        }
        log::info!("Hand tracking paused");
        Ok(())
    }

    /// Restart frame delivery
    ///
    /// Frames are accepted again only after the camera acknowledges the
    /// start. On failure the session stays paused. If the session was paused
    /// again or shut down while the camera was starting, the camera is
    /// stopped once the start completes.
    pub async fn resume(&self) -> Result<(), CaptureError> {
        if self.state.get() != LifecycleState::Paused || self.start_pending.get() {
            log::debug!("resume ignored in state {:?}", self.state.get());
            return Ok(());
        }
        self.start_pending.set(true);
        let started = self.capture.start().await;
        let still_wanted = self.start_pending.replace(false);
        started?;

        if still_wanted && self.state.get() == LifecycleState::Paused {
            self.state.set(LifecycleState::Ready);
            log::info!("Hand tracking resumed");
            return Ok(());
        }

        if let Err(err) = self.capture.stop().await {
            log::warn!("Failed to stop camera after cancelled resume: {}", err);
        }
        Ok(())
    }

    /// Stop the camera and release the perception engine
    ///
    /// The session cannot be restarted; initialize a new one instead. A
    /// camera start still in flight is stopped by the pending `resume`.
    pub async fn shutdown(&self) {
        let previous = self.state.replace(LifecycleState::ShutDown);
        if previous == LifecycleState::ShutDown {
            return;
        }
        if previous == LifecycleState::Ready {
            if let Err(err) = self.capture.stop().await {
                log::warn!("Failed to stop camera on shutdown: {}", err);
            }
        }
        self.perception.close();
        log::info!("Hand tracking shut down");
    }

    /// Host visibility changed (page hidden / shown)
    pub async fn on_visibility_change(&self, hidden: bool) -> Result<(), CaptureError> {
        if hidden {
            self.pause().await
        } else {
            self.resume().await
        }
    }
}
