//! CurveKit splines: Catmull-Rom curves re-parametrized by arc length.
//!
//! A [`Spline`] is built once from control points and a [`SplineConfig`];
//! queries with `t` in `[0, 1]` then traverse it at constant speed. 3D
//! curves get orientation-stable frames through a [`FrameCursor`].

pub mod arc_length;
pub mod basis;
pub mod buffer;
pub mod config;
pub mod curve;
pub mod frame;
pub mod length;
pub mod spline;
pub mod tessellate;

pub use arc_length::{ArcLengthEntry, ArcLengthMap};
pub use buffer::PointBuffer;
pub use config::SplineConfig;
pub use curve::Curve;
pub use frame::{Frame, FrameCursor};
pub use length::LengthTable;
pub use spline::{Spline, Spline2, Spline3};
