//! Moving frames along a 3D spline.
//!
//! A curve's curvature direction flips sign at inflections. [`FrameCursor`]
//! follows one traversal in increasing `t` and negates the normal after each
//! such flip so consecutive frames stay continuous. Each traversal owns its
//! cursor; the spline itself is never mutated.

use ck_math::{DMat3, DVec3};
use serde::{Deserialize, Serialize};

use crate::basis::direction;
use crate::spline::{wrap_parameter, Spline3, TANGENT_END_GUARD};

/// Orthonormal tangent/normal/binormal frame at a point on a curve.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    pub tangent: DVec3,
    pub normal: DVec3,
    pub binormal: DVec3,
}

impl Frame {
    /// Rotation mapping local X to normal, Y to binormal and Z to tangent.
    pub fn to_mat3(&self) -> DMat3 {
        DMat3::from_cols(self.normal, self.binormal, self.tangent)
    }
}

/// Evaluation state for one sequential traversal of a [`Spline3`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameCursor {
    tangent: DVec3,
    normal: Option<DVec3>,
    raw_normal: Option<DVec3>,
    raw_binormal: Option<DVec3>,
    inflexed: bool,
    flip_dot: f64,
}

impl FrameCursor {
    /// Dot product between consecutive raw binormals at or below which the
    /// bend is taken to have changed side.
    pub const DEFAULT_FLIP_DOT: f64 = -0.9;

    pub fn new(spline: &Spline3) -> Self {
        Self {
            tangent: spline.initial_tangent(),
            normal: None,
            raw_normal: None,
            raw_binormal: None,
            inflexed: false,
            flip_dot: Self::DEFAULT_FLIP_DOT,
        }
    }

    pub fn with_flip_dot(mut self, flip_dot: f64) -> Self {
        self.flip_dot = flip_dot;
        self
    }

    /// Start a new traversal.
    pub fn reset(&mut self, spline: &Spline3) {
        *self = Self::new(spline).with_flip_dot(self.flip_dot);
    }

    pub fn is_inflexed(&self) -> bool {
        self.inflexed
    }

    pub fn last_tangent(&self) -> DVec3 {
        self.tangent
    }

    pub fn last_normal(&self) -> Option<DVec3> {
        self.normal
    }

    /// Forward-difference tangent at `t`.
    ///
    /// In the last stretch of an open curve the previous tangent is returned.
    pub fn tangent(&mut self, spline: &Spline3, t: f64) -> DVec3 {
        let t = wrap_parameter(t);
        if spline.is_closed() || t <= TANGENT_END_GUARD {
            self.tangent = spline.forward_tangent(t);
        }
        self.tangent
    }

    /// Unit normal at `t`, continuous with the previously returned one.
    pub fn normal(&mut self, spline: &Spline3, t: f64) -> DVec3 {
        let tangent = self.tangent(spline, t);
        let candidate = spline.frenet_normal(t);
        let candidate = direction(candidate - tangent * candidate.dot(tangent));

        // straight stretch: keep the previous direction
        let raw = if candidate == DVec3::ZERO {
            self.raw_normal
                .map(|prev| direction(prev - tangent * prev.dot(tangent)))
                .filter(|n| *n != DVec3::ZERO)
                .unwrap_or_else(|| perpendicular(tangent))
        } else {
            candidate
        };

        // The binormal keeps its side through a tight turn and reverses
        // only when the bend does.
        let binormal = direction(tangent.cross(raw));
        if binormal != DVec3::ZERO {
            if let Some(prev) = self.raw_binormal {
                if binormal.dot(prev) <= self.flip_dot {
                    self.inflexed = !self.inflexed;
                }
            }
            self.raw_binormal = Some(binormal);
        }
        self.raw_normal = Some(raw);

        let normal = if self.inflexed { -raw } else { raw };
        self.normal = Some(normal);
        normal
    }

    /// Tangent, tracked normal and their cross product at `t`.
    pub fn frame(&mut self, spline: &Spline3, t: f64) -> Frame {
        let normal = self.normal(spline, t);
        let tangent = self.tangent;
        Frame {
            tangent,
            normal,
            binormal: direction(tangent.cross(normal)),
        }
    }
}

/// Any unit vector perpendicular to `heading`.
fn perpendicular(heading: DVec3) -> DVec3 {
    let reference = if heading.x.abs() < 0.9 {
        DVec3::X
    } else {
        DVec3::Y
    };
    direction(heading.cross(reference))
}
