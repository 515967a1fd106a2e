//! # Tetrahedron Validator
//!
//! Degeneracy check:
//! 1. all four vertices pairwise distinct (exact comparison), then
//! 2. volume strictly above the configured tolerance (`0.0` by default,
//!    which means only an exactly-zero volume is rejected).
//!
//! With the default tolerance a volume of `1e-300` passes. Raise the
//! tolerance through `ShapesConfig` to reject near-flat shapes.

use tracing::debug;

use crate::core::geometry::tetrahedron_volume;
use crate::core::{Shape, ShapeKind, ShapesConfig, Tetrahedron};
use crate::ports::ShapeValidator;

/// Validator for tetrahedra
#[derive(Clone, Copy, Debug, Default)]
pub struct TetrahedronValidator {
    tolerance: f64,
}

impl TetrahedronValidator {
    /// Exact validator (zero tolerance)
    pub fn new() -> Self {
        Self { tolerance: 0.0 }
    }

    /// Validator using the configured tolerance
    pub fn from_config(config: &ShapesConfig) -> Self {
        Self {
            tolerance: config.degeneracy_tolerance.max(0.0),
        }
    }

    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }

    /// Check a concrete tetrahedron
    pub fn is_valid_tetrahedron(&self, tetrahedron: &Tetrahedron) -> bool {
        let [a, b, c, d] = *tetrahedron.points();

        if a == b || a == c || a == d || b == c || b == d || c == d {
            debug!(id = %tetrahedron.id(), "rejected: repeated vertex");
            return false;
        }

        let volume = tetrahedron_volume(&a, &b, &c, &d);
        if volume <= self.tolerance {
            debug!(id = %tetrahedron.id(), volume, "rejected: zero volume");
            return false;
        }

        true
    }
}

impl ShapeValidator for TetrahedronValidator {
    fn kind(&self) -> ShapeKind {
        ShapeKind::Tetrahedron
    }

    fn is_valid(&self, shape: &dyn Shape) -> bool {
        match shape.as_any().downcast_ref::<Tetrahedron>() {
            Some(tetrahedron) => self.is_valid_tetrahedron(tetrahedron),
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Point;

    fn tetra(points: [[f64; 3]; 4]) -> Tetrahedron {
        let [a, b, c, d] = points.map(|[x, y, z]| Point::new(x, y, z));
        Tetrahedron::new("t", a, b, c, d)
    }

    #[test]
    fn test_regular_corner_is_valid() {
        let t = tetra([[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]]);
        assert!(TetrahedronValidator::new().is_valid(&t));
    }

    #[test]
    fn test_collinear_is_invalid() {
        let t = tetra([[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [2.0, 0.0, 0.0], [0.0, 0.0, 1.0]]);
        assert!(!TetrahedronValidator::new().is_valid(&t));
    }

    #[test]
    fn test_coplanar_is_invalid() {
        let t = tetra([[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [1.0, 1.0, 0.0]]);
        assert!(!TetrahedronValidator::new().is_valid(&t));
    }

    #[test]
    fn test_repeated_vertex_is_invalid() {
        let t = tetra([[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 0.0, 1.0]]);
        assert!(!TetrahedronValidator::new().is_valid(&t));
    }

    #[test]
    fn test_tiny_volume_passes_exact_check() {
        let t = tetra([[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 6e-300]]);
        let volume = tetrahedron_volume(&t.a(), &t.b(), &t.c(), &t.d());
        assert!(volume > 0.0);
        assert!((volume - 1e-300).abs() < 1e-310);
        assert!(TetrahedronValidator::new().is_valid(&t));
    }

    #[test]
    fn test_tolerance_rejects_small_volume() {
        let t = tetra([[0.0, 0.0, 0.0], [1e-3, 0.0, 0.0], [0.0, 1e-3, 0.0], [0.0, 0.0, 1e-3]]);
        assert!(TetrahedronValidator::new().is_valid(&t));

        let config = ShapesConfig::new().with_degeneracy_tolerance(1e-6);
        assert!(!TetrahedronValidator::from_config(&config).is_valid(&t));
    }

    #[test]
    fn test_matches_volume_and_distinctness() {
        let cases = [
            [[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]],
            [[0.0, 0.0, 0.0], [0.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]],
            [[1.0, 2.0, 3.0], [2.0, 4.0, 6.0], [3.0, 6.0, 9.0], [0.0, 0.0, 1.0]],
            [[2.0, 1.0, 0.0], [5.0, 3.0, 1.0], [0.0, 4.0, 2.0], [3.0, 3.0, 7.0]],
        ];
        let validator = TetrahedronValidator::new();
        for points in cases {
            let t = tetra(points);
            let p = t.points();
            let distinct = (0..4).all(|i| (i + 1..4).all(|j| p[i] != p[j]));
            let volume = tetrahedron_volume(&p[0], &p[1], &p[2], &p[3]);
            assert_eq!(validator.is_valid(&t), distinct && volume != 0.0);
        }
    }
}
