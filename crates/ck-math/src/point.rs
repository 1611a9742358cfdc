//! Vector abstraction shared by the 2D and 3D curve implementations.

use std::fmt::Debug;
use std::ops::{Add, AddAssign, Mul, Neg, Sub};

use crate::{DVec2, DVec3};

/// A point/vector value type a spline can interpolate.
///
/// Implemented for [`DVec2`] and [`DVec3`]. All operations are component-wise
/// over `f64` coordinates.
pub trait SplinePoint:
    Copy
    + Debug
    + PartialEq
    + Send
    + Sync
    + Add<Output = Self>
    + AddAssign
    + Sub<Output = Self>
    + Neg<Output = Self>
    + Mul<f64, Output = Self>
    + 'static
{
    const ZERO: Self;

    fn dot(self, other: Self) -> f64;

    /// Unit vector in the same direction, or zero for a zero-length input.
    fn normalize_or_zero(self) -> Self;

    fn is_finite(self) -> bool;

    /// Component-wise minimum.
    fn min_by_axis(self, other: Self) -> Self;

    /// Component-wise maximum.
    fn max_by_axis(self, other: Self) -> Self;

    fn length(self) -> f64 {
        self.dot(self).sqrt()
    }

    fn distance(self, other: Self) -> f64 {
        (other - self).length()
    }
}

impl SplinePoint for DVec2 {
    const ZERO: Self = DVec2::ZERO;

    fn dot(self, other: Self) -> f64 {
        DVec2::dot(self, other)
    }

    fn normalize_or_zero(self) -> Self {
        DVec2::normalize_or_zero(self)
    }

    fn is_finite(self) -> bool {
        DVec2::is_finite(self)
    }

    fn min_by_axis(self, other: Self) -> Self {
        self.min(other)
    }

    fn max_by_axis(self, other: Self) -> Self {
        self.max(other)
    }
}

impl SplinePoint for DVec3 {
    const ZERO: Self = DVec3::ZERO;

    fn dot(self, other: Self) -> f64 {
        DVec3::dot(self, other)
    }

    fn normalize_or_zero(self) -> Self {
        DVec3::normalize_or_zero(self)
    }

    fn is_finite(self) -> bool {
        DVec3::is_finite(self)
    }

    fn min_by_axis(self, other: Self) -> Self {
        self.min(other)
    }

    fn max_by_axis(self, other: Self) -> Self {
        self.max(other)
    }
}
