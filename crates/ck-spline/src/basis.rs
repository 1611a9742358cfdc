//! Cardinal (Catmull-Rom) cubic basis for a single segment.
//!
//! A segment is defined by four points `[p0, p1, p2, p3]` and runs from `p1`
//! at `t = 0` to `p2` at `t = 1`. The tension `s` (the spline's curvature)
//! scales the tangents `s * (p2 - p0)` and `s * (p3 - p1)` at the two ends.
//! The weights depend only on `t` and `s`, so every axis is blended with the
//! same four coefficients.

use ck_core::Tolerance;
use ck_math::SplinePoint;

/// Position weights.
pub fn weights(t: f64, s: f64) -> [f64; 4] {
    let t2 = t * t;
    let t3 = t2 * t;
    [
        -s * t + 2.0 * s * t2 - s * t3,
        1.0 + (s - 3.0) * t2 + (2.0 - s) * t3,
        s * t + (3.0 - 2.0 * s) * t2 + (s - 2.0) * t3,
        -s * t2 + s * t3,
    ]
}

/// First derivative of [`weights`] with respect to `t`.
pub fn derivative_weights(t: f64, s: f64) -> [f64; 4] {
    let t2 = t * t;
    [
        -s + 4.0 * s * t - 3.0 * s * t2,
        2.0 * (s - 3.0) * t + 3.0 * (2.0 - s) * t2,
        s + 2.0 * (3.0 - 2.0 * s) * t + 3.0 * (s - 2.0) * t2,
        -2.0 * s * t + 3.0 * s * t2,
    ]
}

/// Second derivative of [`weights`] with respect to `t`.
pub fn second_derivative_weights(t: f64, s: f64) -> [f64; 4] {
    [
        4.0 * s - 6.0 * s * t,
        2.0 * (s - 3.0) + 6.0 * (2.0 - s) * t,
        2.0 * (3.0 - 2.0 * s) + 6.0 * (s - 2.0) * t,
        -2.0 * s + 6.0 * s * t,
    ]
}

fn blend<P: SplinePoint>(quad: &[P; 4], w: [f64; 4]) -> P {
    quad[0] * w[0] + quad[1] * w[1] + quad[2] * w[2] + quad[3] * w[3]
}

/// Point on the segment at local parameter `t`.
pub fn point<P: SplinePoint>(quad: &[P; 4], curvature: f64, t: f64) -> P {
    blend(quad, weights(t, curvature))
}

/// Unnormalized first derivative at `t`.
pub fn derivative<P: SplinePoint>(quad: &[P; 4], curvature: f64, t: f64) -> P {
    blend(quad, derivative_weights(t, curvature))
}

/// Unnormalized second derivative at `t`.
pub fn second_derivative<P: SplinePoint>(quad: &[P; 4], curvature: f64, t: f64) -> P {
    blend(quad, second_derivative_weights(t, curvature))
}

/// Unit vector along `v`, or zero when `v` is shorter than the linear
/// tolerance.
pub fn direction<P: SplinePoint>(v: P) -> P {
    if Tolerance::default().is_zero(v.length()) {
        P::ZERO
    } else {
        v.normalize_or_zero()
    }
}

/// Unit tangent at `t`; zero where the segment is stationary.
pub fn tangent<P: SplinePoint>(quad: &[P; 4], curvature: f64, t: f64) -> P {
    direction(derivative(quad, curvature, t))
}

/// Unit curvature direction at `t`: the second derivative with its component
/// along the tangent removed. Zero on straight stretches.
pub fn normal<P: SplinePoint>(quad: &[P; 4], curvature: f64, t: f64) -> P {
    let tangent = tangent(quad, curvature, t);
    let accel = second_derivative(quad, curvature, t);
    direction(accel - tangent * accel.dot(tangent))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use ck_math::{DVec2, DVec3};
    use glam::{dvec2, dvec3};

    fn quad() -> [DVec2; 4] {
        [dvec2(0.0, 0.0), dvec2(1.0, 2.0), dvec2(3.0, 2.0), dvec2(4.0, 0.0)]
    }

    #[test]
    fn test_weights_partition_of_unity() {
        for &s in &[0.0, 0.25, 0.5, 1.0] {
            for i in 0..=10 {
                let t = i as f64 / 10.0;
                let sum: f64 = weights(t, s).iter().sum();
                assert_relative_eq!(sum, 1.0, epsilon = 1e-12);
                let dsum: f64 = derivative_weights(t, s).iter().sum();
                assert_relative_eq!(dsum, 0.0, epsilon = 1e-12);
            }
        }
    }

    #[test]
    fn test_interpolates_inner_points() {
        let q = quad();
        assert_eq!(point(&q, 0.5, 0.0), q[1]);
        assert_eq!(point(&q, 0.5, 1.0), q[2]);
    }

    #[test]
    fn test_matches_catmull_rom_at_half_tension() {
        let q = quad();
        let t: f64 = 0.3;
        let (t2, t3) = (t * t, t * t * t);
        let expected = 0.5
            * ((2.0 * q[1])
                + (-q[0] + q[2]) * t
                + (2.0 * q[0] - 5.0 * q[1] + 4.0 * q[2] - q[3]) * t2
                + (-q[0] + 3.0 * q[1] - 3.0 * q[2] + q[3]) * t3);
        assert!((point(&q, 0.5, t) - expected).length() < 1e-12);
    }

    #[test]
    fn test_end_derivatives_follow_tension() {
        let q = quad();
        let s = 0.5;
        assert!((derivative(&q, s, 0.0) - (q[2] - q[0]) * s).length() < 1e-12);
        assert!((derivative(&q, s, 1.0) - (q[3] - q[1]) * s).length() < 1e-12);
    }

    #[test]
    fn test_derivative_matches_finite_difference() {
        let q = quad();
        let h = 1e-6;
        for &t in &[0.1, 0.5, 0.9] {
            let fd = (point(&q, 0.7, t + h) - point(&q, 0.7, t - h)) / (2.0 * h);
            assert!((derivative(&q, 0.7, t) - fd).length() < 1e-6);
            let fd2 = (derivative(&q, 0.7, t + h) - derivative(&q, 0.7, t - h)) / (2.0 * h);
            assert!((second_derivative(&q, 0.7, t) - fd2).length() < 1e-5);
        }
    }

    #[test]
    fn test_normal_is_orthogonal_to_tangent() {
        let q = [
            dvec3(0.0, 0.0, 0.0),
            dvec3(1.0, 1.0, 0.5),
            dvec3(2.0, 0.0, 1.0),
            dvec3(3.0, 1.0, 0.0),
        ];
        let t = 0.4;
        let tan = tangent(&q, 0.5, t);
        let n = normal(&q, 0.5, t);
        assert_relative_eq!(tan.length(), 1.0, epsilon = 1e-12);
        assert_relative_eq!(n.length(), 1.0, epsilon = 1e-12);
        assert!(tan.dot(n).abs() < 1e-10);
    }

    #[test]
    fn test_direction_of_tiny_vector_is_zero() {
        assert_eq!(direction(dvec2(1e-12, -1e-12)), DVec2::ZERO);
        assert_eq!(direction(dvec2(0.0, 3.0)), dvec2(0.0, 1.0));
    }

    #[test]
    fn test_straight_segment_has_zero_normal() {
        let q = [DVec3::ZERO, DVec3::X, DVec3::X * 2.0, DVec3::X * 3.0];
        assert_eq!(normal(&q, 0.5, 0.5), DVec3::ZERO);
    }
}
