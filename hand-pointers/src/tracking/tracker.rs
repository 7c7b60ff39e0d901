//! Hand tracker - turns per-frame detections into pointer motion
//!
//! Per hand:
//! - Mirror x so moving the hand right moves the pointer right
//! - EMA smoothing of the anchor landmark
//! - Frame delta against the previous smoothed position
//! - Down/up hysteresis driven by presence in each batch

use super::config::TrackerConfig;
use super::hand::Hand;
use super::landmarks::{Detection, Landmark};
use super::pointer::{Pointer, PointerColor, SharedPointers};
use crate::physics::{
    is_significant, AspectCorrection, DeltaTracker, ExponentialSmoother2D, NoCorrection,
};

/// Filter and previous-position memory for one hand
///
/// Survives frames without a detection and pause/resume; only
/// [`HandTracker::reset`] clears it.
struct HandSlot {
    filter: ExponentialSmoother2D,
    prev: DeltaTracker,
}

impl HandSlot {
    fn new(alpha: f32) -> Self {
        Self {
            filter: ExponentialSmoother2D::new(alpha),
            prev: DeltaTracker::new(),
        }
    }
}

pub struct HandTracker {
    config: TrackerConfig,
    pointers: SharedPointers,
    slots: [HandSlot; Hand::COUNT],
    correction: Box<dyn AspectCorrection>,
}

impl HandTracker {
    pub fn new(config: TrackerConfig, pointers: SharedPointers) -> Self {
        let alpha = config.smoothing_alpha;
        Self {
            config,
            pointers,
            slots: std::array::from_fn(|_| HandSlot::new(alpha)),
            correction: Box::new(NoCorrection),
        }
    }

    pub fn with_correction(mut self, correction: impl AspectCorrection + 'static) -> Self {
        self.set_correction(correction);
        self
    }

    /// Replace the delta correction (e.g. after the canvas is resized)
    pub fn set_correction(&mut self, correction: impl AspectCorrection + 'static) {
        self.correction = Box::new(correction);
    }

    pub fn pointers(&self) -> &SharedPointers {
        &self.pointers
    }

    /// Last smoothed position of `hand`
    pub fn smoothed_position(&self, hand: Hand) -> Option<(f32, f32)> {
        self.slots[hand.index()].filter.position()
    }

    /// Position the next frame's delta will be measured from
    pub fn previous_position(&self, hand: Hand) -> Option<(f32, f32)> {
        self.slots[hand.index()].prev.previous()
    }

    /// Process one frame's batch of detections
    ///
    /// Hands missing from the batch go up; their smoothing memory is kept so
    /// a brief dropout does not restart the filter.
    pub fn process(&mut self, detections: &[Detection]) {
        let mut pointers = self.pointers.borrow_mut();

        if detections.is_empty() {
            pointers.release_all();
            return;
        }

        let mut present = [false; Hand::COUNT];

        for detection in detections {
            let hand = detection.hand;
            present[hand.index()] = true;

            let pointer = pointers.get_or_create(hand);
            update_hand(
                &self.config,
                self.correction.as_ref(),
                &mut self.slots[hand.index()],
                pointer,
                hand,
                detection,
            );
        }

        for hand in Hand::ALL {
            if !present[hand.index()] {
                pointers.release(hand);
            }
        }
    }

    /// Forget all smoothing and previous-position memory
    pub fn reset(&mut self) {
        for slot in &mut self.slots {
            slot.filter.reset();
            slot.prev.clear();
        }
    }
}

/// Update one hand's pointer from its landmarks
///
/// A detection without a usable anchor landmark leaves everything untouched,
/// including `down`.
fn update_hand(
    config: &TrackerConfig,
    correction: &dyn AspectCorrection,
    slot: &mut HandSlot,
    pointer: &mut Pointer,
    hand: Hand,
    detection: &Detection,
) {
    let Some(anchor) = detection
        .landmark(config.anchor_landmark)
        .filter(Landmark::is_finite)
    else {
        log::debug!("{} hand detected without anchor landmark {}", hand, config.anchor_landmark);
        return;
    };

    // Camera image is mirrored relative to the user
    let raw = (1.0 - anchor.x, anchor.y);
    let smoothed = slot.filter.filter(raw);

    // No delta on the frame a hand goes down: the stored position may be
    // from an earlier press.
    let delta = match slot.prev.delta_to(smoothed) {
        Some(delta) if pointer.down => correction.correct(delta),
        _ => (0.0, 0.0),
    };

    if is_significant(delta, config.movement_threshold) {
        pointer.moved = true;
    }

    pointer.move_to(smoothed, delta);

    if !pointer.down {
        pointer.down = true;
        pointer.color = PointerColor::for_hand(hand);
        log::debug!("{} hand down at ({:.3}, {:.3})", hand, smoothed.0, smoothed.1);
    }

    slot.prev.store(smoothed);
}
