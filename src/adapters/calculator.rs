//! # Tetrahedron Calculator
//!
//! Surface area (four faces), perimeter (six edges) and volume (scalar
//! triple product) of a tetrahedron, composed from the geometry kernel.
//!
//! Raw mode returns `NaN` for a shape that is not a tetrahedron. Queries and
//! sorts treat a non-finite value as "could not compute"; the warehouse
//! stores it as is.

use tracing::trace;

use crate::core::geometry::{distance, tetrahedron_volume, triangle_area};
use crate::core::{Shape, ShapeError, ShapeKind, ShapeResult, ShapesConfig, Tetrahedron};
use crate::ports::ShapeCalculator;

use super::validator::TetrahedronValidator;

/// Calculator for tetrahedra
#[derive(Clone, Copy, Debug, Default)]
pub struct TetrahedronCalculator {
    validator: TetrahedronValidator,
}

impl TetrahedronCalculator {
    /// Calculator whose checked mode uses the exact validator
    pub fn new() -> Self {
        Self {
            validator: TetrahedronValidator::new(),
        }
    }

    /// Calculator whose checked mode uses the configured tolerance
    pub fn from_config(config: &ShapesConfig) -> Self {
        Self {
            validator: TetrahedronValidator::from_config(config),
        }
    }

    pub fn validator(&self) -> &TetrahedronValidator {
        &self.validator
    }

    /// Sum of the four face areas: ABC, ABD, ACD, BCD
    pub fn tetrahedron_area(&self, t: &Tetrahedron) -> f64 {
        let [a, b, c, d] = t.points();
        let abc = triangle_area(a, b, c);
        let abd = triangle_area(a, b, d);
        let acd = triangle_area(a, c, d);
        let bcd = triangle_area(b, c, d);
        trace!(id = %t.id(), abc, abd, acd, bcd, "face areas");
        abc + abd + acd + bcd
    }

    /// Sum of the six edge lengths: AB, AC, AD, BC, BD, CD
    pub fn tetrahedron_perimeter(&self, t: &Tetrahedron) -> f64 {
        let [a, b, c, d] = t.points();
        distance(a, b) + distance(a, c) + distance(a, d) + distance(b, c) + distance(b, d) + distance(c, d)
    }

    pub fn tetrahedron_volume(&self, t: &Tetrahedron) -> f64 {
        let [a, b, c, d] = t.points();
        tetrahedron_volume(a, b, c, d)
    }

    fn downcast<'a>(&self, shape: &'a dyn Shape) -> Option<&'a Tetrahedron> {
        shape.as_any().downcast_ref::<Tetrahedron>()
    }
}

impl ShapeCalculator for TetrahedronCalculator {
    fn kind(&self) -> ShapeKind {
        ShapeKind::Tetrahedron
    }

    fn name(&self) -> &'static str {
        "tetrahedron"
    }

    fn area(&self, shape: &dyn Shape) -> f64 {
        self.downcast(shape)
            .map_or(f64::NAN, |t| self.tetrahedron_area(t))
    }

    fn perimeter(&self, shape: &dyn Shape) -> f64 {
        self.downcast(shape)
            .map_or(f64::NAN, |t| self.tetrahedron_perimeter(t))
    }

    fn volume(&self, shape: &dyn Shape) -> f64 {
        self.downcast(shape)
            .map_or(f64::NAN, |t| self.tetrahedron_volume(t))
    }

    fn validate(&self, shape: &dyn Shape) -> ShapeResult<()> {
        let tetrahedron = self.downcast(shape).ok_or(ShapeError::WrongKind {
            expected: ShapeKind::Tetrahedron,
            found: shape.kind(),
        })?;

        if self.validator.is_valid_tetrahedron(tetrahedron) {
            Ok(())
        } else {
            Err(ShapeError::Degenerate {
                id: tetrahedron.id().clone(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Metric, Point};
    use crate::ports::ShapeValidator;

    const EPS: f64 = 1e-4;

    fn corner() -> Tetrahedron {
        Tetrahedron::new(
            "corner",
            Point::new(0.0, 0.0, 0.0),
            Point::new(1.0, 0.0, 0.0),
            Point::new(0.0, 1.0, 0.0),
            Point::new(0.0, 0.0, 1.0),
        )
    }

    fn flat() -> Tetrahedron {
        Tetrahedron::new(
            "flat",
            Point::new(0.0, 0.0, 0.0),
            Point::new(1.0, 0.0, 0.0),
            Point::new(0.0, 1.0, 0.0),
            Point::new(1.0, 1.0, 0.0),
        )
    }

    #[test]
    fn test_corner_measures() {
        let calc = TetrahedronCalculator::new();
        let t = corner();
        assert!((calc.area(&t) - 2.3660254037844386).abs() < EPS);
        assert!((calc.perimeter(&t) - 7.242640687119285).abs() < EPS);
        assert!((calc.volume(&t) - 0.16666666667).abs() < EPS);
    }

    #[test]
    fn test_regular_tetrahedron() {
        // edge length 2*sqrt(2)
        let t = Tetrahedron::new(
            "regular",
            Point::new(1.0, 1.0, 1.0),
            Point::new(1.0, -1.0, -1.0),
            Point::new(-1.0, 1.0, -1.0),
            Point::new(-1.0, -1.0, 1.0),
        );
        let calc = TetrahedronCalculator::new();
        let edge = 8.0_f64.sqrt();
        assert!((calc.perimeter(&t) - 6.0 * edge).abs() < 1e-9);
        assert!((calc.area(&t) - 3.0_f64.sqrt() * edge * edge).abs() < 1e-9);
        assert!((calc.volume(&t) - edge.powi(3) / (6.0 * 2.0_f64.sqrt())).abs() < 1e-9);
    }

    #[test]
    fn test_raw_mode_degenerate_returns_numbers() {
        let calc = TetrahedronCalculator::new();
        let t = flat();
        assert_eq!(calc.volume(&t), 0.0);
        assert!(calc.area(&t) > 0.0);
        assert!(calc.compute_raw(&t, Metric::Perimeter) > 0.0);
    }

    #[test]
    fn test_checked_mode_rejects_degenerate() {
        let calc = TetrahedronCalculator::new();
        let err = calc.compute_checked(&flat(), Metric::Volume).unwrap_err();
        assert_eq!(
            err,
            ShapeError::Degenerate {
                id: "flat".into()
            }
        );
        assert!(calc.parameters_checked(&flat()).is_err());
    }

    #[test]
    fn test_checked_mode_matches_raw_when_valid() {
        let calc = TetrahedronCalculator::new();
        let t = corner();
        let checked = calc.parameters_checked(&t).unwrap();
        assert_eq!(checked, calc.parameters_raw(&t));
        for metric in Metric::ALL {
            assert_eq!(
                calc.compute_checked(&t, metric).unwrap(),
                calc.compute_raw(&t, metric)
            );
        }
    }

    #[test]
    fn test_non_degenerate_measures_positive() {
        let calc = TetrahedronCalculator::new();
        let t = Tetrahedron::new(
            "skew",
            Point::new(2.0, 1.0, 0.0),
            Point::new(5.0, 3.0, 1.0),
            Point::new(0.0, 4.0, 2.0),
            Point::new(3.0, 3.0, 7.0),
        );
        assert!(calc.validator().is_valid(&t));
        let params = calc.parameters_raw(&t);
        assert!(params.volume >= 0.0);
        assert!(params.area > 0.0);
        assert!(params.perimeter > 0.0);
    }
}
