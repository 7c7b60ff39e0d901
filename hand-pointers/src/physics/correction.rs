//! Aspect-ratio correction for pointer deltas
//!
//! Normalized texture coordinates stretch with the canvas, so the renderer
//! scales deltas on the longer axis down to keep splats round.

/// Per-axis delta correction supplied by the renderer
pub trait AspectCorrection {
    fn correct_x(&self, delta: f32) -> f32;
    fn correct_y(&self, delta: f32) -> f32;

    fn correct(&self, delta: (f32, f32)) -> (f32, f32) {
        (self.correct_x(delta.0), self.correct_y(delta.1))
    }
}

/// Identity correction, used when the renderer provides none
#[derive(Clone, Copy, Debug, Default)]
pub struct NoCorrection;

impl AspectCorrection for NoCorrection {
    fn correct_x(&self, delta: f32) -> f32 {
        delta
    }

    fn correct_y(&self, delta: f32) -> f32 {
        delta
    }
}

/// Correction derived from the canvas aspect ratio (width / height)
#[derive(Clone, Copy, Debug)]
pub struct CanvasAspect {
    aspect: f32,
}

impl CanvasAspect {
    /// Returns `None` for a degenerate canvas
    pub fn new(width: f32, height: f32) -> Option<Self> {
        if width > 0.0 && height > 0.0 && width.is_finite() && height.is_finite() {
            Some(Self { aspect: width / height })
        } else {
            None
        }
    }
}

impl AspectCorrection for CanvasAspect {
    fn correct_x(&self, delta: f32) -> f32 {
        if self.aspect < 1.0 {
            delta * self.aspect
        } else {
            delta
        }
    }

    fn correct_y(&self, delta: f32) -> f32 {
        if self.aspect > 1.0 {
            delta / self.aspect
        } else {
            delta
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity() {
        assert_eq!(NoCorrection.correct((0.25, -0.5)), (0.25, -0.5));
    }

    #[test]
    fn test_landscape_scales_y() {
        let c = CanvasAspect::new(800.0, 400.0).unwrap();
        let (dx, dy) = c.correct((0.1, 0.1));
        assert!((dx - 0.1).abs() < 1e-6);
        assert!((dy - 0.05).abs() < 1e-6);
    }

    #[test]
    fn test_portrait_scales_x() {
        let c = CanvasAspect::new(400.0, 800.0).unwrap();
        let (dx, dy) = c.correct((0.1, 0.1));
        assert!((dx - 0.05).abs() < 1e-6);
        assert!((dy - 0.1).abs() < 1e-6);
    }

    #[test]
    fn test_degenerate_canvas() {
        assert!(CanvasAspect::new(0.0, 480.0).is_none());
        assert!(CanvasAspect::new(640.0, f32::NAN).is_none());
    }
}
