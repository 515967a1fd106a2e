//! Tetrahedron construction from flat coordinate lists.

use crate::core::{Point, ShapeError, ShapeId, ShapeResult, ShapesConfig, Tetrahedron};
use crate::core::{COORDINATES_PER_LINE, DEFAULT_ID_PREFIX};
use crate::ports::ShapeFactory;

/// Builds tetrahedra from `x y z` for A, B, C, D in that order
///
/// Every shape gets a freshly generated id. No geometric validation happens
/// here.
#[derive(Debug, Clone)]
pub struct TetrahedronFactory {
    id_prefix: String,
}

impl TetrahedronFactory {
    pub fn new() -> Self {
        Self {
            id_prefix: DEFAULT_ID_PREFIX.to_string(),
        }
    }

    pub fn from_config(config: &ShapesConfig) -> Self {
        Self {
            id_prefix: config.id_prefix.clone(),
        }
    }

    /// Build with a caller-supplied id instead of a generated one
    pub fn create_with_id(
        &self,
        id: impl Into<ShapeId>,
        parameters: &[f64],
    ) -> ShapeResult<Tetrahedron> {
        let [a, b, c, d] = points(parameters)?;
        Ok(Tetrahedron::new(id, a, b, c, d))
    }
}

impl Default for TetrahedronFactory {
    fn default() -> Self {
        Self::new()
    }
}

impl ShapeFactory for TetrahedronFactory {
    type Output = Tetrahedron;

    fn parameter_count(&self) -> usize {
        COORDINATES_PER_LINE
    }

    fn create(&self, parameters: &[f64]) -> ShapeResult<Tetrahedron> {
        self.create_with_id(ShapeId::generate_with(&self.id_prefix), parameters)
    }
}

fn points(parameters: &[f64]) -> ShapeResult<[Point; 4]> {
    if parameters.len() != COORDINATES_PER_LINE {
        return Err(ShapeError::ParameterCount {
            expected: COORDINATES_PER_LINE,
            found: parameters.len(),
        });
    }

    let p = |i: usize| Point::new(parameters[i], parameters[i + 1], parameters[i + 2]);
    Ok([p(0), p(3), p(6), p(9)])
}
