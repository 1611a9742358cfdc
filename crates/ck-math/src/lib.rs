pub mod bounds;
pub mod point;
pub mod transform;

pub use glam::{DAffine3, DMat3, DMat4, DQuat, DVec2, DVec3, DVec4};
pub use bounds::{Aabb3, Rect};
pub use point::SplinePoint;
pub use transform::Transform;

pub type Point2 = DVec2;
pub type Point3 = DVec3;
pub type Vector2 = DVec2;
pub type Vector3 = DVec3;
