//! Common test helpers for tracker and session integration tests

#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::future::poll_fn;
use std::rc::Rc;
use std::task::Poll;

use hand_pointers::error::{CaptureError, InitializationError};
use hand_pointers::tracking::landmarks::{HAND_LANDMARK_COUNT, INDEX_FINGER_TIP};
use hand_pointers::tracking::{
    Capture, Detection, Hand, HostEnvironment, Landmark, Perception, PerceptionOptions, Pointer,
    ResultsHandler, SharedPointers, TrackingConfig,
};

pub const EPS: f32 = 1e-5;

/// Full 21-point hand with the index fingertip at (x, y) in camera space
pub fn hand_at(hand: Hand, x: f32, y: f32) -> Detection {
    let mut landmarks = vec![Landmark::new(0.5, 0.5); HAND_LANDMARK_COUNT];
    landmarks[INDEX_FINGER_TIP] = Landmark::new(x, y);
    Detection::new(hand, landmarks)
}

pub fn pointer(pointers: &SharedPointers, hand: Hand) -> Pointer {
    pointers
        .borrow()
        .get(hand)
        .cloned()
        .expect("pointer should exist")
}

/// Deterministic pseudo-random sequence in [0, 1)
pub fn unit_sequence(seed: u32, len: usize) -> Vec<f32> {
    let mut state = seed.max(1);
    (0..len)
        .map(|_| {
            state ^= state << 13;
            state ^= state >> 17;
            state ^= state << 5;
            (state % 10_000) as f32 / 10_000.0
        })
        .collect()
}

// ============================================================================
// FAKE COLLABORATORS
// ============================================================================

#[derive(Default)]
pub struct PerceptionRecord {
    pub handler: RefCell<Option<ResultsHandler>>,
    pub options: RefCell<Option<PerceptionOptions>>,
    pub closed: Cell<bool>,
}

impl PerceptionRecord {
    /// Deliver one frame the way the engine would
    pub fn emit(&self, detections: Vec<Detection>) {
        if self.closed.get() {
            return;
        }
        if let Some(handler) = self.handler.borrow_mut().as_mut() {
            handler(detections);
        }
    }
}

pub struct FakePerception(pub Rc<PerceptionRecord>);

impl Perception for FakePerception {
    fn configure(&self, options: &PerceptionOptions) {
        *self.0.options.borrow_mut() = Some(options.clone());
    }

    fn on_results(&self, handler: ResultsHandler) {
        *self.0.handler.borrow_mut() = Some(handler);
    }

    fn close(&self) {
        self.0.closed.set(true);
    }
}

#[derive(Default)]
pub struct CaptureRecord {
    pub running: Cell<bool>,
    pub starts: Cell<u32>,
    pub stops: Cell<u32>,
    pub fail_start: Cell<bool>,
    pub fail_stop: Cell<bool>,
    /// While set, `start` stays pending; poll the caller again after clearing
    pub hold_start: Cell<bool>,
}

pub struct FakeCapture(pub Rc<CaptureRecord>);

impl Capture for FakeCapture {
    async fn start(&self) -> Result<(), CaptureError> {
        poll_fn(|_| {
            if self.0.hold_start.get() {
                Poll::Pending
            } else {
                Poll::Ready(())
            }
        })
        .await;
        if self.0.fail_start.get() {
            return Err(CaptureError("NotAllowedError: Permission denied".into()));
        }
        self.0.starts.set(self.0.starts.get() + 1);
        self.0.running.set(true);
        Ok(())
    }

    async fn stop(&self) -> Result<(), CaptureError> {
        if self.0.fail_stop.get() {
            return Err(CaptureError("camera busy".into()));
        }
        self.0.stops.set(self.0.stops.get() + 1);
        self.0.running.set(false);
        Ok(())
    }
}

/// Host with configurable missing pieces
#[derive(Default)]
pub struct FakeHost {
    pub perception: Rc<PerceptionRecord>,
    pub capture: Rc<CaptureRecord>,
    pub missing_video: bool,
    pub missing_library: Option<&'static str>,
}

impl HostEnvironment for FakeHost {
    type Perception = FakePerception;
    type Capture = FakeCapture;

    fn connect(
        &self,
        _config: &TrackingConfig,
    ) -> Result<(FakePerception, FakeCapture), InitializationError> {
        if self.missing_video {
            return Err(InitializationError::MissingVideoElement);
        }
        if let Some(library) = self.missing_library {
            return Err(InitializationError::LibraryUnavailable(library.into()));
        }
        Ok((
            FakePerception(Rc::clone(&self.perception)),
            FakeCapture(Rc::clone(&self.capture)),
        ))
    }
}
