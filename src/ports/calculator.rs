//! # Calculator Port
//!
//! Trait for computing a shape's derived measures.
//!
//! Every calculator exposes two modes:
//! - **raw**: compute on whatever points are present and always return a
//!   number. Degenerate geometry yields `0.0` or a meaningless value; a
//!   shape of the wrong kind yields `NaN`. Specifications, comparators and
//!   the warehouse use this mode.
//! - **checked**: validate the shape first and fail with a [`ShapeError`]
//!   when it is of the wrong kind or degenerate. The "compute and report"
//!   path uses this mode.

use crate::core::{Metric, Shape, ShapeKind, ShapeParameters, ShapeResult};

/// Trait for computing area, perimeter and volume
///
/// Implemented once per shape kind.
pub trait ShapeCalculator: Send + Sync {
    /// Shape kind this calculator understands
    fn kind(&self) -> ShapeKind;

    /// Name of this calculator (for logging)
    fn name(&self) -> &'static str;

    /// Raw surface area
    fn area(&self, shape: &dyn Shape) -> f64;

    /// Raw perimeter (sum of edge lengths)
    fn perimeter(&self, shape: &dyn Shape) -> f64;

    /// Raw volume
    fn volume(&self, shape: &dyn Shape) -> f64;

    /// Check that the shape is of the right kind and non-degenerate
    fn validate(&self, shape: &dyn Shape) -> ShapeResult<()>;

    /// Raw value of one metric
    fn compute_raw(&self, shape: &dyn Shape, metric: Metric) -> f64 {
        match metric {
            Metric::Area => self.area(shape),
            Metric::Perimeter => self.perimeter(shape),
            Metric::Volume => self.volume(shape),
        }
    }

    /// Validated value of one metric
    fn compute_checked(&self, shape: &dyn Shape, metric: Metric) -> ShapeResult<f64> {
        self.validate(shape)?;
        Ok(self.compute_raw(shape, metric))
    }

    /// All three raw measures at once
    fn parameters_raw(&self, shape: &dyn Shape) -> ShapeParameters {
        ShapeParameters::new(self.perimeter(shape), self.area(shape), self.volume(shape))
    }

    /// All three measures, validated once up front
    fn parameters_checked(&self, shape: &dyn Shape) -> ShapeResult<ShapeParameters> {
        self.validate(shape)?;
        Ok(self.parameters_raw(shape))
    }
}
