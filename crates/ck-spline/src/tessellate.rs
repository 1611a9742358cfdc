//! Conversion of curves to polylines.

use ck_math::SplinePoint;

use crate::curve::Curve;

/// Convert a curve to a polyline using adaptive subdivision.
///
/// The algorithm recursively subdivides spans where the midpoint deviation
/// from the chord exceeds the given `tolerance`.
///
/// # Arguments
/// * `curve` - The curve to tessellate
/// * `tolerance` - Maximum allowed deviation from the true curve
///
/// # Returns
/// A vector of points approximating the curve, starting at the domain start.
pub fn curve_to_polyline<P: SplinePoint>(curve: &dyn Curve<P>, tolerance: f64) -> Vec<P> {
    let (t_min, t_max) = curve.domain();
    let mut points = vec![curve.point_at(t_min)];
    subdivide_curve(curve, t_min, t_max, tolerance, &mut points, 0);
    points
}

/// Maximum recursion depth for adaptive subdivision.
const MAX_DEPTH: u32 = 12;

/// Spans are always split this many times, so a closed curve or a symmetric
/// S-bend whose midpoint sits on the chord is still refined.
const MIN_DEPTH: u32 = 2;

fn subdivide_curve<P: SplinePoint>(
    curve: &dyn Curve<P>,
    t0: f64,
    t1: f64,
    tolerance: f64,
    points: &mut Vec<P>,
    depth: u32,
) {
    let p1 = curve.point_at(t1);
    if depth >= MAX_DEPTH {
        points.push(p1);
        return;
    }

    let t_mid = (t0 + t1) * 0.5;
    let p0 = curve.point_at(t0);
    let p_mid = curve.point_at(t_mid);

    let chord_mid = (p0 + p1) * 0.5;
    let deviation = (p_mid - chord_mid).length();

    if depth < MIN_DEPTH || deviation > tolerance {
        subdivide_curve(curve, t0, t_mid, tolerance, points, depth + 1);
        subdivide_curve(curve, t_mid, t1, tolerance, points, depth + 1);
    } else {
        points.push(p1);
    }
}

/// Total length of a polyline.
pub fn polyline_length<P: SplinePoint>(points: &[P]) -> f64 {
    points.windows(2).map(|w| w[0].distance(w[1])).sum()
}
