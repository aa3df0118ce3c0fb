//! Tests for timing curves and linear blending

#[cfg(test)]
mod tests {
    use gridreorder::math::interpolation::{Interpolator, lerp};
    use proptest::prelude::*;

    const EPSILON: f32 = 1e-5;

    const CURVES: [Interpolator; 4] = [
        Interpolator::Linear,
        Interpolator::AccelerateDecelerate,
        Interpolator::Decelerate { factor: 1.0 },
        Interpolator::Decelerate { factor: 1.5 },
    ];

    // Tests every curve pins both ends
    // Verified by offsetting the accelerate-decelerate curve
    #[test]
    fn test_curves_pin_endpoints() {
        for curve in CURVES {
            assert!(curve.interpolate(0.0).abs() < EPSILON, "{curve:?} at 0");
            assert!((curve.interpolate(1.0) - 1.0).abs() < EPSILON, "{curve:?} at 1");
        }
    }

    // Tests curve values at the midpoint
    // Verified by using a cubic ease-out for factor 1
    #[test]
    fn test_midpoint_values() {
        assert!((Interpolator::Linear.interpolate(0.5) - 0.5).abs() < EPSILON);
        assert!((Interpolator::AccelerateDecelerate.interpolate(0.5) - 0.5).abs() < EPSILON);
        assert!((Interpolator::Decelerate { factor: 1.0 }.interpolate(0.5) - 0.75).abs() < EPSILON);
        assert!(
            (Interpolator::Decelerate { factor: 1.5 }.interpolate(0.5) - 0.875).abs() < EPSILON
        );
    }

    // Tests that input outside the unit range is clamped
    // Verified by removing the clamp
    #[test]
    fn test_input_is_clamped() {
        for curve in CURVES {
            assert!(curve.interpolate(-2.0).abs() < EPSILON);
            assert!((curve.interpolate(3.0) - 1.0).abs() < EPSILON);
        }
    }

    // Tests the default curve
    // Verified by changing the default variant
    #[test]
    fn test_default_is_accelerate_decelerate() {
        assert_eq!(Interpolator::default(), Interpolator::AccelerateDecelerate);
    }

    // Tests that lerp blends and extrapolates
    // Verified by clamping progress in lerp
    #[test]
    fn test_lerp() {
        assert!((lerp(0.0, 10.0, 0.25) - 2.5).abs() < EPSILON);
        assert!((lerp(2.0, 4.0, 0.0) - 2.0).abs() < EPSILON);
        assert!((lerp(0.0, 10.0, 1.5) - 15.0).abs() < EPSILON);
        assert!(lerp(1.0, 0.0, 1.0).abs() < EPSILON);
    }

    proptest! {
        // Tests every curve is monotone non-decreasing
        // Verified by flipping the sign of the cosine term
        #[test]
        fn test_curves_monotone(a in 0.0f32..=1.0, b in 0.0f32..=1.0) {
            let (low, high) = if a <= b { (a, b) } else { (b, a) };
            for curve in CURVES {
                prop_assert!(curve.interpolate(low) <= curve.interpolate(high) + EPSILON);
            }
        }
    }
}
