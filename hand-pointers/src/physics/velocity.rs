//! Frame-to-frame delta tracking with a movement threshold
//!
//! Remembers the last smoothed position of a hand and turns the next one into
//! a per-frame delta. Deltas whose components all stay inside the dead zone
//! do not count as movement.

/// Default movement threshold in normalized units
pub const MOVEMENT_THRESHOLD: f32 = 0.001;

/// Previous-position memory for one hand
#[derive(Clone, Debug, Default)]
pub struct DeltaTracker {
    /// Last smoothed position, stored at the end of each update
    prev: Option<(f32, f32)>,
}

impl DeltaTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Delta from the stored position to `pos`
    ///
    /// Returns `None` when no previous position is stored yet.
    pub fn delta_to(&self, pos: (f32, f32)) -> Option<(f32, f32)> {
        self.prev.map(|prev| (pos.0 - prev.0, pos.1 - prev.1))
    }

    /// Store `pos` for the next frame's delta
    pub fn store(&mut self, pos: (f32, f32)) {
        self.prev = Some(pos);
    }

    pub fn previous(&self) -> Option<(f32, f32)> {
        self.prev
    }

    pub fn clear(&mut self) {
        self.prev = None;
    }
}

/// True when either component of `delta` exceeds `threshold`
pub fn is_significant(delta: (f32, f32), threshold: f32) -> bool {
    delta.0.abs() > threshold || delta.1.abs() > threshold
}
