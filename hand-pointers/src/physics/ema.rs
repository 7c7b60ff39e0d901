//! Exponential moving average - fixed-weight low-pass filter for jitter reduction
//!
//! `alpha` is applied per call, not per unit of time, so the effective
//! smoothing depends on the frame rate the camera actually delivers. A slow
//! camera lags less per second than a fast one. This is a known limitation.

/// Single-axis EMA filter
#[derive(Clone, Debug)]
pub struct ExponentialSmoother {
    /// Weight of the newest sample (0-1] - higher = more responsive
    alpha: f32,
    /// Last smoothed value, `None` until the first sample arrives
    value: Option<f32>,
}

impl ExponentialSmoother {
    pub fn new(alpha: f32) -> Self {
        Self { alpha, value: None }
    }

    /// Filter a single value
    ///
    /// The first sample initializes the filter and is returned unchanged.
    pub fn filter(&mut self, x: f32) -> f32 {
        let next = match self.value {
            None => x,
            Some(prev) => self.alpha * x + (1.0 - self.alpha) * prev,
        };
        self.value = Some(next);
        next
    }

    /// Last smoothed value
    pub fn value(&self) -> Option<f32> {
        self.value
    }

    /// Forget the last value; the next sample re-initializes the filter
    pub fn reset(&mut self) {
        self.value = None;
    }
}

/// Pair of EMA filters for a 2D position (the per-hand filter state)
#[derive(Clone, Debug)]
pub struct ExponentialSmoother2D {
    pub x: ExponentialSmoother,
    pub y: ExponentialSmoother,
}

impl ExponentialSmoother2D {
    pub fn new(alpha: f32) -> Self {
        Self {
            x: ExponentialSmoother::new(alpha),
            y: ExponentialSmoother::new(alpha),
        }
    }

    pub fn filter(&mut self, pos: (f32, f32)) -> (f32, f32) {
        (self.x.filter(pos.0), self.y.filter(pos.1))
    }

    /// Last smoothed position, `None` until both axes have been initialized
    pub fn position(&self) -> Option<(f32, f32)> {
        Some((self.x.value()?, self.y.value()?))
    }

    pub fn reset(&mut self) {
        self.x.reset();
        self.y.reset();
    }
}
