//! # Geometry Kernel
//!
//! Pure, total functions over points. No error path: degenerate input
//! simply produces `0.0` (up to floating-point error). Deciding whether a
//! shape is valid is the caller's job.

use super::Point;

/// Euclidean distance between two points
pub fn distance(p1: &Point, p2: &Point) -> f64 {
    p2.sub(p1).magnitude()
}

/// Area of the triangle `abc`: `0.5 * |(b - a) x (c - a)|`
///
/// Collinear points give `0.0`.
pub fn triangle_area(a: &Point, b: &Point, c: &Point) -> f64 {
    let ab = b.sub(a);
    let ac = c.sub(a);
    0.5 * ab.cross(&ac).magnitude()
}

/// Volume of the tetrahedron `abcd` via the scalar triple product:
/// `|(b - a) . ((c - a) x (d - a))| / 6`
///
/// Coplanar points give `0.0`.
///
/// # Example
/// ```
/// use tetra_warehouse::core::geometry::tetrahedron_volume;
/// use tetra_warehouse::Point;
/// let v = tetrahedron_volume(
///     &Point::new(0.0, 0.0, 0.0),
///     &Point::new(1.0, 0.0, 0.0),
///     &Point::new(0.0, 1.0, 0.0),
///     &Point::new(0.0, 0.0, 1.0),
/// );
/// assert!((v - 1.0 / 6.0).abs() < 1e-12);
/// ```
pub fn tetrahedron_volume(a: &Point, b: &Point, c: &Point, d: &Point) -> f64 {
    let ab = b.sub(a);
    let ac = c.sub(a);
    let ad = d.sub(a);
    ab.dot(&ac.cross(&ad)).abs() / 6.0
}
