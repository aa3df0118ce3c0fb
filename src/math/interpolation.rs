//! Time interpolation curves for preview animations
//!
//! An interpolator maps the elapsed fraction of an animation in `[0, 1]` to the
//! progress value handed to the animated property. All curves pin `0 -> 0` and
//! `1 -> 1`.

use std::f32::consts::PI;

/// Shape of an animation's progress over time
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Interpolator {
    /// Progress equals elapsed fraction
    Linear,
    /// Slow start and end, fastest in the middle
    #[default]
    AccelerateDecelerate,
    /// Fast start easing into the end; `factor` controls how sharply
    Decelerate {
        /// Curve exponent half; `1.0` gives a quadratic ease-out
        factor: f32,
    },
}

impl Interpolator {
    /// Map an elapsed fraction to animation progress
    ///
    /// Input outside `[0, 1]` is clamped.
    pub fn interpolate(self, fraction: f32) -> f32 {
        let t = fraction.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::AccelerateDecelerate => ((t + 1.0) * PI).cos() / 2.0 + 0.5,
            Self::Decelerate { factor } => {
                if (factor - 1.0).abs() < f32::EPSILON {
                    1.0 - (1.0 - t).powi(2)
                } else {
                    1.0 - (1.0 - t).powf(2.0 * factor)
                }
            }
        }
    }
}

/// Linear blend `progress * to + (1 - progress) * from`
///
/// `progress` is not clamped so callers can extrapolate.
pub fn lerp(from: f32, to: f32, progress: f32) -> f32 {
    progress.mul_add(to, (1.0 - progress) * from)
}
