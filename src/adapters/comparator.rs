//! # Comparators
//!
//! Orderings for `TetrahedronRepository::sort_by`.
//!
//! Metric orderings compute in raw mode. A measure that cannot be computed
//! (non-finite) sorts after every finite one, so failures land at the end
//! deterministically. Equal keys keep their relative order because the
//! repository's sort is stable.

use std::cmp::Ordering;
use std::str::FromStr;
use std::sync::Arc;

use tracing::warn;

use crate::core::{Metric, Tetrahedron};
use crate::ports::ShapeCalculator;

/// Order by id, plain string order
pub fn by_id(a: &Tetrahedron, b: &Tetrahedron) -> Ordering {
    a.id().cmp(b.id())
}

/// Order by one raw-mode measure, failures last
#[derive(Clone)]
pub struct ByMetric {
    metric: Metric,
    calculator: Arc<dyn ShapeCalculator>,
}

impl ByMetric {
    pub fn new(metric: Metric, calculator: Arc<dyn ShapeCalculator>) -> Self {
        Self { metric, calculator }
    }

    pub fn metric(&self) -> Metric {
        self.metric
    }

    /// Sort key: `None` when the measure is not a finite number
    pub fn key(&self, tetrahedron: &Tetrahedron) -> Option<f64> {
        let value = self.calculator.compute_raw(tetrahedron, self.metric);
        if value.is_finite() {
            Some(value)
        } else {
            warn!(id = %tetrahedron.id(), metric = %self.metric, "cannot compute sort key");
            None
        }
    }

    pub fn compare(&self, a: &Tetrahedron, b: &Tetrahedron) -> Ordering {
        match (self.key(a), self.key(b)) {
            (Some(x), Some(y)) => x.total_cmp(&y),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        }
    }
}

impl std::fmt::Debug for ByMetric {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ByMetric")
            .field("metric", &self.metric)
            .field("calculator", &self.calculator.name())
            .finish()
    }
}

/// What to sort by
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    Id,
    Metric(Metric),
}

impl SortKey {
    /// Comparator for this key
    pub fn comparator(
        self,
        calculator: Arc<dyn ShapeCalculator>,
    ) -> Box<dyn Fn(&Tetrahedron, &Tetrahedron) -> Ordering> {
        match self {
            SortKey::Id => Box::new(by_id),
            SortKey::Metric(metric) => {
                let by_metric = ByMetric::new(metric, calculator);
                Box::new(move |a: &Tetrahedron, b: &Tetrahedron| by_metric.compare(a, b))
            }
        }
    }
}

impl FromStr for SortKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "id" => Ok(SortKey::Id),
            "area" => Ok(SortKey::Metric(Metric::Area)),
            "perimeter" => Ok(SortKey::Metric(Metric::Perimeter)),
            "volume" => Ok(SortKey::Metric(Metric::Volume)),
            other => Err(format!(
                "unknown sort key {:?}: use id, area, perimeter or volume",
                other
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::TetrahedronCalculator;
    use crate::core::Point;

    fn corner(id: &str, scale: f64) -> Tetrahedron {
        Tetrahedron::new(
            id,
            Point::new(0.0, 0.0, 0.0),
            Point::new(scale, 0.0, 0.0),
            Point::new(0.0, scale, 0.0),
            Point::new(0.0, 0.0, scale),
        )
    }

    fn broken(id: &str) -> Tetrahedron {
        Tetrahedron::new(
            id,
            Point::new(f64::NAN, 0.0, 0.0),
            Point::new(1.0, 0.0, 0.0),
            Point::new(0.0, 1.0, 0.0),
            Point::new(0.0, 0.0, 1.0),
        )
    }

    #[test]
    fn test_by_id() {
        assert_eq!(by_id(&corner("a", 1.0), &corner("b", 1.0)), Ordering::Less);
        assert_eq!(by_id(&corner("b", 1.0), &corner("b", 2.0)), Ordering::Equal);
    }

    #[test]
    fn test_by_metric_orders_values() {
        let cmp = ByMetric::new(Metric::Volume, Arc::new(TetrahedronCalculator::new()));
        assert_eq!(cmp.compare(&corner("s", 1.0), &corner("l", 2.0)), Ordering::Less);
        assert_eq!(cmp.compare(&corner("l", 2.0), &corner("s", 1.0)), Ordering::Greater);
    }

    #[test]
    fn test_failures_sort_last() {
        let cmp = ByMetric::new(Metric::Area, Arc::new(TetrahedronCalculator::new()));
        assert_eq!(cmp.key(&broken("x")), None);
        assert_eq!(cmp.compare(&broken("x"), &corner("a", 100.0)), Ordering::Greater);
        assert_eq!(cmp.compare(&corner("a", 100.0), &broken("x")), Ordering::Less);
        assert_eq!(cmp.compare(&broken("x"), &broken("y")), Ordering::Equal);
    }

    #[test]
    fn test_sort_key_parse() {
        assert_eq!("id".parse::<SortKey>().unwrap(), SortKey::Id);
        assert_eq!(
            " Volume ".parse::<SortKey>().unwrap(),
            SortKey::Metric(Metric::Volume)
        );
        assert!("colour".parse::<SortKey>().is_err());
    }

    #[test]
    fn test_sort_key_comparator() {
        let calc: Arc<dyn ShapeCalculator> = Arc::new(TetrahedronCalculator::new());
        let mut items = vec![corner("b", 3.0), corner("a", 1.0), broken("c"), corner("d", 2.0)];
        let cmp = SortKey::Metric(Metric::Perimeter).comparator(calc);
        items.sort_by(|x, y| cmp(x, y));
        let ids: Vec<&str> = items.iter().map(|t| t.id().as_str()).collect();
        assert_eq!(ids, vec!["a", "d", "b", "c"]);
    }
}
