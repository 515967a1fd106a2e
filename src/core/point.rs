//! # Point
//!
//! A position in 3-D space. The fundamental primitive.
//!
//! Points are immutable values. Equality is exact: two points are equal only
//! when all three coordinates have identical bit patterns, so `0.0` and
//! `-0.0` differ and `NaN` equals itself. No epsilon is applied anywhere.

use std::hash::{Hash, Hasher};

use serde::Serialize;

/// A point in 3-D space
#[derive(Clone, Copy, Debug, Serialize)]
pub struct Point {
    x: f64,
    y: f64,
    z: f64,
}

impl Point {
    /// Create a new point from its coordinates
    ///
    /// # Example
    /// ```
    /// use tetra_warehouse::Point;
    /// let p = Point::new(1.0, 2.0, 3.0);
    /// assert_eq!(p.coords(), [1.0, 2.0, 3.0]);
    /// ```
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// The origin (0, 0, 0)
    pub fn origin() -> Self {
        Self::new(0.0, 0.0, 0.0)
    }

    pub fn x(&self) -> f64 {
        self.x
    }

    pub fn y(&self) -> f64 {
        self.y
    }

    pub fn z(&self) -> f64 {
        self.z
    }

    /// Coordinates as an array
    pub fn coords(&self) -> [f64; 3] {
        [self.x, self.y, self.z]
    }

    /// Component-wise difference `self - other`, i.e. the vector from `other` to `self`
    pub fn sub(&self, other: &Point) -> Self {
        Self::new(self.x - other.x, self.y - other.y, self.z - other.z)
    }

    /// Cross product, treating both points as vectors from the origin
    pub fn cross(&self, other: &Point) -> Self {
        Self::new(
            self.y * other.z - self.z * other.y,
            self.z * other.x - self.x * other.z,
            self.x * other.y - self.y * other.x,
        )
    }

    /// Dot product, treating both points as vectors from the origin
    pub fn dot(&self, other: &Point) -> f64 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    /// Calculate the magnitude (L2 norm) of this point as a vector
    ///
    /// # Example
    /// ```
    /// use tetra_warehouse::Point;
    /// let p = Point::new(3.0, 4.0, 0.0);
    /// assert!((p.magnitude() - 5.0).abs() < 1e-12);
    /// ```
    pub fn magnitude(&self) -> f64 {
        self.dot(self).sqrt()
    }

    /// True when every coordinate is finite
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }

    fn bits(&self) -> [u64; 3] {
        [self.x.to_bits(), self.y.to_bits(), self.z.to_bits()]
    }
}

impl PartialEq for Point {
    fn eq(&self, other: &Self) -> bool {
        self.bits() == other.bits()
    }
}

impl Eq for Point {}

impl Hash for Point {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.bits().hash(state);
    }
}

impl std::fmt::Display for Point {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Point{{x={}, y={}, z={}}}", self.x, self.y, self.z)
    }
}
