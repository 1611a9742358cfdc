//! Parametric curve trait.

/// A parametric curve over points of type `P`.
pub trait Curve<P>: Send + Sync {
    /// Evaluate the curve at parameter `t`.
    fn point_at(&self, t: f64) -> P;

    /// Evaluate the tangent direction at parameter `t`.
    fn tangent_at(&self, t: f64) -> P;

    /// Return the parameter domain `(t_min, t_max)`.
    fn domain(&self) -> (f64, f64);

    /// Whether the curve is closed (start == end).
    fn is_closed(&self) -> bool {
        false
    }
}
