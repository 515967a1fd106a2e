//! # Shape Parameters
//!
//! Immutable snapshot of a shape's derived measures, and the `Metric`
//! selector used by range specifications and comparators.

use serde::Serialize;

/// Perimeter, area and volume of a shape, always produced together
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ShapeParameters {
    pub perimeter: f64,
    pub area: f64,
    pub volume: f64,
}

impl ShapeParameters {
    pub fn new(perimeter: f64, area: f64, volume: f64) -> Self {
        Self {
            perimeter,
            area,
            volume,
        }
    }

    /// Read one measure
    pub fn get(&self, metric: Metric) -> f64 {
        match metric {
            Metric::Area => self.area,
            Metric::Perimeter => self.perimeter,
            Metric::Volume => self.volume,
        }
    }

    /// True when all three measures are finite numbers
    pub fn is_finite(&self) -> bool {
        self.perimeter.is_finite() && self.area.is_finite() && self.volume.is_finite()
    }
}

impl std::fmt::Display for ShapeParameters {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "ShapeParameters{{perimeter={}, area={}, volume={}}}",
            self.perimeter, self.area, self.volume
        )
    }
}

/// One of the three derived measures
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Metric {
    Area,
    Perimeter,
    Volume,
}

impl Metric {
    pub const ALL: [Metric; 3] = [Metric::Area, Metric::Perimeter, Metric::Volume];

    pub fn name(&self) -> &'static str {
        match self {
            Metric::Area => "area",
            Metric::Perimeter => "perimeter",
            Metric::Volume => "volume",
        }
    }
}

impl std::fmt::Display for Metric {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
