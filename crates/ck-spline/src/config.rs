//! Construction parameters for a spline.

use ck_core::{CurveError, Result};
use ck_math::SplinePoint;
use serde::{Deserialize, Serialize};

/// How a [`Spline`](crate::Spline) is built from its control points.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SplineConfig<P> {
    /// Wrap the last control point back to the first.
    pub closed: bool,
    /// Tension of the cardinal basis. `0.5` gives the classic Catmull-Rom curve.
    pub curvature: f64,
    /// Chords per segment used to estimate segment length.
    pub sample_count: usize,
    /// Custom tangent at the first point (open curves only).
    pub start_tangent: Option<P>,
    /// Custom tangent at the last point (open curves only).
    pub end_tangent: Option<P>,
}

impl<P> SplineConfig<P> {
    pub const DEFAULT_CURVATURE: f64 = 0.5;
    pub const DEFAULT_SAMPLE_COUNT: usize = 16;

    /// Open curve with default curvature and sampling.
    pub fn new() -> Self {
        Self {
            closed: false,
            curvature: Self::DEFAULT_CURVATURE,
            sample_count: Self::DEFAULT_SAMPLE_COUNT,
            start_tangent: None,
            end_tangent: None,
        }
    }

    pub fn closed(mut self) -> Self {
        self.closed = true;
        self
    }

    pub fn with_curvature(mut self, curvature: f64) -> Self {
        self.curvature = curvature;
        self
    }

    pub fn with_sample_count(mut self, sample_count: usize) -> Self {
        self.sample_count = sample_count;
        self
    }

    pub fn with_tangents(mut self, start: Option<P>, end: Option<P>) -> Self {
        self.start_tangent = start;
        self.end_tangent = end;
        self
    }

    /// Fewest user points a curve in this mode can be built from.
    pub fn min_points(&self) -> usize {
        if self.closed {
            3
        } else {
            2
        }
    }
}

impl<P: SplinePoint> SplineConfig<P> {
    /// Check the parameters against a control point count.
    pub fn validate(&self, point_count: usize) -> Result<()> {
        if point_count < self.min_points() {
            return Err(CurveError::InsufficientPoints {
                required: self.min_points(),
                given: point_count,
            });
        }
        if self.sample_count == 0 {
            return Err(CurveError::InvalidConfig(
                "sample_count must be at least 1".into(),
            ));
        }
        if !self.curvature.is_finite() {
            return Err(CurveError::InvalidConfig(format!(
                "curvature must be finite, got {}",
                self.curvature
            )));
        }
        let tangents = [self.start_tangent, self.end_tangent];
        if tangents.iter().flatten().any(|t| !t.is_finite()) {
            return Err(CurveError::InvalidConfig(
                "custom tangents must be finite".into(),
            ));
        }
        Ok(())
    }
}

impl<P> Default for SplineConfig<P> {
    fn default() -> Self {
        Self::new()
    }
}
