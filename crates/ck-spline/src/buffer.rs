//! Control points extended with synthesized boundary points.

use ck_math::SplinePoint;

use crate::config::SplineConfig;

/// The extended control polygon a spline interpolates.
///
/// Holds the user points plus one leading boundary point and one or two
/// trailing ones, so every segment has four defining points. Segment `i`
/// (zero-based) starts at buffer index `i + 1`.
#[derive(Debug, Clone, PartialEq)]
pub struct PointBuffer<P> {
    points: Vec<P>,
}

impl<P: SplinePoint> PointBuffer<P> {
    /// Extend `user` with boundary points according to `config`.
    ///
    /// Expects at least `config.min_points()` points.
    pub fn build(user: &[P], config: &SplineConfig<P>) -> Self {
        let (Some(&first), Some(&last)) = (user.first(), user.last()) else {
            return Self::raw(Vec::new());
        };
        let mut points = Vec::with_capacity(user.len() + 3);

        if config.closed {
            points.push(last);
            points.extend_from_slice(user);
            points.extend(user.iter().take(2).copied());
        } else {
            let start = config.start_tangent.filter(|t| *t != P::ZERO);
            let end = config.end_tangent.filter(|t| *t != P::ZERO);
            points.push(start.map_or(first, |t| first - t * 2.0));
            points.extend_from_slice(user);
            points.push(end.map_or(last, |t| last + t * 2.0));
        }

        Self { points }
    }

    /// Wrap points without adding boundary points.
    pub fn raw(points: Vec<P>) -> Self {
        Self { points }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn as_slice(&self) -> &[P] {
        &self.points
    }

    /// Number of interpolated segments.
    pub fn segment_count(&self) -> usize {
        self.points.len().saturating_sub(3)
    }

    /// Point at `index`, clamped into the buffer. Zero for an empty buffer.
    pub fn get(&self, index: isize) -> P {
        let Some(last) = self.points.len().checked_sub(1) else {
            return P::ZERO;
        };
        self.points[index.clamp(0, last as isize) as usize]
    }

    /// The four points defining the segment that starts at buffer index `start`.
    pub fn quad(&self, start: usize) -> [P; 4] {
        let i = start as isize;
        [self.get(i - 1), self.get(i), self.get(i + 1), self.get(i + 2)]
    }
}

impl<P> Default for PointBuffer<P> {
    fn default() -> Self {
        Self { points: Vec::new() }
    }
}
