//! # Specifications
//!
//! Predicates used by `TetrahedronRepository::query`:
//! - `IdSpecification` - exact id match
//! - `AreaRangeSpecification`, `PerimeterRangeSpecification`,
//!   `VolumeRangeSpecification` - inclusive `[min, max]` on a raw-mode measure
//!
//! Range specifications always compute fresh through their calculator. They
//! never read the warehouse, so a query reflects current geometry even if a
//! cache entry were stale. A measure that cannot be computed (non-finite)
//! makes the shape not match.

use std::sync::Arc;

use crate::core::{Metric, ShapeId, Tetrahedron};
use crate::ports::{ShapeCalculator, Specification};

/// Matches the tetrahedron whose id equals the given string exactly
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdSpecification {
    id: ShapeId,
}

impl IdSpecification {
    pub fn new(id: impl Into<ShapeId>) -> Self {
        Self { id: id.into() }
    }
}

impl Specification for IdSpecification {
    fn is_satisfied_by(&self, tetrahedron: &Tetrahedron) -> bool {
        tetrahedron.id() == &self.id
    }
}

/// Inclusive range over one measure, shared by the three range specifications
#[derive(Clone)]
struct MetricRange {
    metric: Metric,
    calculator: Arc<dyn ShapeCalculator>,
    min: f64,
    max: f64,
}

impl MetricRange {
    fn contains(&self, tetrahedron: &Tetrahedron) -> bool {
        let value = self.calculator.compute_raw(tetrahedron, self.metric);
        // NaN fails both comparisons
        self.min <= value && value <= self.max
    }
}

impl std::fmt::Debug for MetricRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MetricRange")
            .field("metric", &self.metric)
            .field("calculator", &self.calculator.name())
            .field("min", &self.min)
            .field("max", &self.max)
            .finish()
    }
}

macro_rules! range_specification {
    ($(#[$doc:meta])* $name:ident, $metric:expr) => {
        $(#[$doc])*
        #[derive(Debug, Clone)]
        pub struct $name {
            range: MetricRange,
        }

        impl $name {
            /// Inclusive bounds `[min, max]`; `min > max` matches nothing
            pub fn new(calculator: Arc<dyn ShapeCalculator>, min: f64, max: f64) -> Self {
                Self {
                    range: MetricRange {
                        metric: $metric,
                        calculator,
                        min,
                        max,
                    },
                }
            }

            pub fn min(&self) -> f64 {
                self.range.min
            }

            pub fn max(&self) -> f64 {
                self.range.max
            }
        }

        impl Specification for $name {
            fn is_satisfied_by(&self, tetrahedron: &Tetrahedron) -> bool {
                self.range.contains(tetrahedron)
            }
        }
    };
}

range_specification!(
    /// Matches tetrahedra whose surface area lies in `[min, max]`
    AreaRangeSpecification,
    Metric::Area
);

range_specification!(
    /// Matches tetrahedra whose perimeter lies in `[min, max]`
    PerimeterRangeSpecification,
    Metric::Perimeter
);

range_specification!(
    /// Matches tetrahedra whose volume lies in `[min, max]`
    VolumeRangeSpecification,
    Metric::Volume
);

/// Build the range specification for a metric
pub fn range_for(
    metric: Metric,
    calculator: Arc<dyn ShapeCalculator>,
    min: f64,
    max: f64,
) -> Box<dyn Specification> {
    match metric {
        Metric::Area => Box::new(AreaRangeSpecification::new(calculator, min, max)),
        Metric::Perimeter => Box::new(PerimeterRangeSpecification::new(calculator, min, max)),
        Metric::Volume => Box::new(VolumeRangeSpecification::new(calculator, min, max)),
    }
}
