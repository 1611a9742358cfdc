//! Arc-length parametrized Catmull-Rom spline.

use ck_core::traits::{BoundingBox, Validate};
use ck_core::{CurveError, Result, Tolerance};
use ck_math::{Aabb3, DVec2, DVec3, Rect, SplinePoint, Transform};
use log::{debug, trace, warn};
use serde::{Deserialize, Serialize};

use crate::arc_length::ArcLengthMap;
use crate::basis;
use crate::buffer::PointBuffer;
use crate::config::SplineConfig;
use crate::curve::Curve;
use crate::length::LengthTable;

/// Parameter step used for finite-difference tangents.
pub const TANGENT_STEP: f64 = 0.01;

/// Beyond this parameter an open curve has no room for a forward difference.
pub const TANGENT_END_GUARD: f64 = 0.989;

/// A Catmull-Rom spline through a sequence of control points, evaluated by
/// arc length: `t` in `[0, 1]` moves along the curve at constant speed.
///
/// The curve shape is fixed after construction; [`Spline::set`] replaces it
/// wholesale. All queries take `&self`. Orientation tracking across queries
/// lives in a separate [`FrameCursor`](crate::FrameCursor).
///
/// Serialized as its control points and configuration only; the tables are
/// rebuilt on load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(
    into = "SplineData<P>",
    try_from = "SplineData<P>",
    bound(
        serialize = "P: SplinePoint + Serialize",
        deserialize = "P: SplinePoint + Deserialize<'de>"
    )
)]
pub struct Spline<P> {
    config: SplineConfig<P>,
    buffer: PointBuffer<P>,
    lengths: LengthTable,
    arc_map: ArcLengthMap,
    initial_tangent: P,
}

pub type Spline2 = Spline<DVec2>;
pub type Spline3 = Spline<DVec3>;

/// Serialized form of a [`Spline`].
#[derive(Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct SplineData<P> {
    points: Vec<P>,
    config: SplineConfig<P>,
}

impl<P: SplinePoint> From<Spline<P>> for SplineData<P> {
    fn from(spline: Spline<P>) -> Self {
        Self {
            points: spline.user_points().to_vec(),
            config: spline.config,
        }
    }
}

impl<P: SplinePoint> TryFrom<SplineData<P>> for Spline<P> {
    type Error = CurveError;

    /// Too few points load as a degenerate curve, as after a failed `set`.
    fn try_from(data: SplineData<P>) -> Result<Self> {
        data.config.validate(data.config.min_points())?;
        let mut spline = Self::default();
        match spline.set(&data.points, data.config) {
            Ok(()) | Err(CurveError::InsufficientPoints { .. }) => Ok(spline),
            Err(err) => Err(err),
        }
    }
}

impl<P: SplinePoint> Spline<P> {
    pub fn new(points: &[P], config: SplineConfig<P>) -> Result<Self> {
        let mut spline = Self::default();
        spline.set(points, config)?;
        Ok(spline)
    }

    /// Rebuild the curve from `points`.
    ///
    /// On error the spline holds `points` as a degenerate curve: zero length,
    /// every position at the first point.
    pub fn set(&mut self, points: &[P], config: SplineConfig<P>) -> Result<()> {
        if let Err(err) = config.validate(points.len()) {
            warn!("Rejecting spline with {} points: {}", points.len(), err);
            *self = Self::degenerate(points, config);
            return Err(err);
        }

        let buffer = PointBuffer::build(points, &config);
        let lengths = LengthTable::build(&buffer, config.curvature, config.sample_count);
        let tol = Tolerance::default();
        if lengths.segment_lengths().iter().any(|&l| tol.is_zero(l)) {
            warn!("Spline has zero-length segments (coincident control points)");
        }
        let arc_map = ArcLengthMap::build(lengths.segment_lengths(), lengths.total_length());

        *self = Self {
            config,
            buffer,
            lengths,
            arc_map,
            initial_tangent: P::ZERO,
        };
        self.initial_tangent = basis::direction(self.position(TANGENT_STEP) - self.position(0.0));

        debug!(
            "Built {} spline: {} points, {} segments, length {:.6}",
            if self.config.closed { "closed" } else { "open" },
            points.len(),
            self.segment_count(),
            self.length()
        );
        Ok(())
    }

    fn degenerate(points: &[P], config: SplineConfig<P>) -> Self {
        Self {
            config,
            buffer: PointBuffer::raw(points.to_vec()),
            lengths: LengthTable::default(),
            arc_map: ArcLengthMap::default(),
            initial_tangent: P::ZERO,
        }
    }

    pub fn config(&self) -> &SplineConfig<P> {
        &self.config
    }

    pub fn is_closed(&self) -> bool {
        self.config.closed
    }

    /// True when the curve has no segments to evaluate.
    pub fn is_degenerate(&self) -> bool {
        self.arc_map.is_empty()
    }

    /// Total arc length; zero for a degenerate curve.
    pub fn length(&self) -> f64 {
        self.lengths.total_length()
    }

    /// The extended control polygon, boundary points included.
    pub fn points(&self) -> &[P] {
        self.buffer.as_slice()
    }

    /// The control points the curve was built from.
    pub fn user_points(&self) -> &[P] {
        let all = self.buffer.as_slice();
        if self.is_degenerate() {
            return all;
        }
        let trailing = if self.config.closed { 2 } else { 1 };
        all.get(1..all.len().saturating_sub(trailing)).unwrap_or(all)
    }

    pub fn segment_count(&self) -> usize {
        self.lengths.len()
    }

    pub fn segment_lengths(&self) -> &[f64] {
        self.lengths.segment_lengths()
    }

    pub fn arc_length_map(&self) -> &ArcLengthMap {
        &self.arc_map
    }

    /// Forward-difference tangent at `t = 0`, taken at construction.
    pub fn initial_tangent(&self) -> P {
        self.initial_tangent
    }

    /// Segment index and local cubic parameter for the global parameter `t`.
    ///
    /// The local value is the length fraction inside the segment mapped
    /// through the segment's sampled length profile, so it is the cubic
    /// parameter to evaluate at, not the raw fraction.
    pub fn locate(&self, t: f64) -> Option<(usize, f64)> {
        let t = wrap_parameter(t);
        let (segment, fraction) = self.arc_map.locate(t)?;
        Some((segment, self.lengths.local_parameter(segment, fraction)))
    }

    fn quad(&self, segment: usize) -> [P; 4] {
        self.buffer.quad(segment + 1)
    }

    fn fallback_point(&self) -> P {
        self.buffer.as_slice().first().copied().unwrap_or(P::ZERO)
    }

    pub fn position(&self, t: f64) -> P {
        match self.locate(t) {
            Some((segment, local)) => basis::point(&self.quad(segment), self.config.curvature, local),
            None => self.fallback_point(),
        }
    }

    /// Unit tangent by finite difference over the whole curve.
    ///
    /// Near the end of an open curve the difference is taken backward.
    pub fn tangent(&self, t: f64) -> P {
        if self.is_degenerate() {
            return P::ZERO;
        }
        let t = wrap_parameter(t);
        if self.config.closed || t <= TANGENT_END_GUARD {
            self.forward_tangent(t)
        } else {
            basis::direction(self.position(t) - self.position(t - TANGENT_STEP))
        }
    }

    pub(crate) fn forward_tangent(&self, t: f64) -> P {
        basis::direction(self.position(t + TANGENT_STEP) - self.position(t))
    }

    /// Direction of the control polygon edge spanned by the segment at `t`.
    pub fn static_tangent(&self, t: f64) -> P {
        match self.locate(t) {
            Some((segment, _)) => {
                let quad = self.quad(segment);
                basis::direction(quad[2] - quad[1])
            }
            None => P::ZERO,
        }
    }

    /// Analytic unit tangent of the segment at `t`.
    pub fn segment_tangent(&self, t: f64) -> P {
        match self.locate(t) {
            Some((segment, local)) => basis::tangent(&self.quad(segment), self.config.curvature, local),
            None => P::ZERO,
        }
    }

    /// Unit curvature direction at `t` without orientation tracking.
    ///
    /// Zero on straight stretches. The sign follows the local bend, so it
    /// flips at inflections.
    pub fn frenet_normal(&self, t: f64) -> P {
        match self.locate(t) {
            Some((segment, local)) => basis::normal(&self.quad(segment), self.config.curvature, local),
            None => P::ZERO,
        }
    }

    /// `count` points spaced at equal arc length, both ends included.
    pub fn sample_uniform(&self, count: usize) -> Vec<P> {
        match count {
            0 => Vec::new(),
            1 => vec![self.position(0.0)],
            _ => {
                let last = (count - 1) as f64;
                (0..count).map(|i| self.position(i as f64 / last)).collect()
            }
        }
    }
}

impl Spline<DVec2> {
    /// Tangent rotated a quarter turn clockwise: `(t.y, -t.x)`.
    pub fn normal(&self, t: f64) -> DVec2 {
        let tangent = self.tangent(t);
        DVec2::new(tangent.y, -tangent.x)
    }

    /// Rectangle around the extended control polygon. The curve can
    /// overshoot it slightly between control points. `None` when empty.
    pub fn bounds(&self) -> Option<Rect> {
        Rect::from_points(self.points())
    }
}

impl Spline<DVec3> {
    /// Rebuild the curve from its control points moved by `transform`.
    pub fn transformed(&self, transform: &Transform) -> Result<Self> {
        let points: Vec<DVec3> = self
            .user_points()
            .iter()
            .map(|&p| transform.transform_point(p))
            .collect();
        let mut config = self.config;
        config.start_tangent = config.start_tangent.map(|v| transform.transform_vector(v));
        config.end_tangent = config.end_tangent.map(|v| transform.transform_vector(v));
        Self::new(&points, config)
    }

    /// Box around the extended control polygon, with the same overshoot
    /// caveat as the 2D rectangle. `None` when empty.
    pub fn bounds(&self) -> Option<Aabb3> {
        Aabb3::from_points(self.points())
    }
}

impl<P: SplinePoint> Default for Spline<P> {
    fn default() -> Self {
        Self::degenerate(&[], SplineConfig::default())
    }
}

impl<P: SplinePoint> Curve<P> for Spline<P> {
    fn point_at(&self, t: f64) -> P {
        self.position(t)
    }

    fn tangent_at(&self, t: f64) -> P {
        self.tangent(t)
    }

    fn domain(&self) -> (f64, f64) {
        (0.0, 1.0)
    }

    fn is_closed(&self) -> bool {
        self.config.closed
    }
}

impl<P: SplinePoint> BoundingBox for Spline<P> {
    type Point = P;

    /// Bounds of the extended control polygon.
    fn bounding_box(&self) -> (P, P) {
        let points = self.buffer.as_slice();
        let Some((&first, rest)) = points.split_first() else {
            return (P::ZERO, P::ZERO);
        };
        rest.iter().fold((first, first), |(min, max), &p| {
            (min.min_by_axis(p), max.max_by_axis(p))
        })
    }
}

impl<P: SplinePoint> Validate for Spline<P> {
    fn validate(&self) -> Result<()> {
        if self.is_degenerate() {
            if !self.lengths.is_empty() || self.length() != 0.0 {
                return Err(CurveError::Invariant(
                    "degenerate spline carries segment lengths".into(),
                ));
            }
            return Ok(());
        }

        let segments = self.buffer.segment_count();
        if self.lengths.len() != segments || self.arc_map.len() != segments {
            return Err(CurveError::Invariant(format!(
                "{} segments but {} lengths and {} map entries",
                segments,
                self.lengths.len(),
                self.arc_map.len()
            )));
        }

        let entries = self.arc_map.entries();
        if entries.windows(2).any(|w| w[1].fraction < w[0].fraction) {
            return Err(CurveError::Invariant(
                "arc-length fractions are not sorted".into(),
            ));
        }
        let tol = Tolerance::loose();
        let last = entries.last().map_or(0.0, |e| e.fraction);
        if !tol.parametric_eq(last, 1.0) {
            return Err(CurveError::Invariant(format!(
                "final arc-length fraction is {}, expected 1.0",
                last
            )));
        }

        let sum: f64 = self.lengths.segment_lengths().iter().sum();
        if !tol.linear_eq(sum, self.length()) {
            return Err(CurveError::Invariant(format!(
                "total length {} differs from segment sum {}",
                self.length(),
                sum
            )));
        }
        Ok(())
    }
}

/// Map `t` into `[0, 1]`. Values outside are wrapped modulo 1; `1.0` itself
/// is kept so an open curve can reach its last point.
pub fn wrap_parameter(t: f64) -> f64 {
    if !t.is_finite() {
        return 0.0;
    }
    if (0.0..=1.0).contains(&t) {
        return t;
    }
    let wrapped = t - t.floor();
    trace!("Wrapped curve parameter {} to {}", t, wrapped);
    wrapped
}
