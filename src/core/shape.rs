//! # Shape
//!
//! The identity-and-kind surface every shape exposes to the rest of the
//! system. Calculators and the warehouse resolve behaviour by `ShapeKind`
//! tag rather than by runtime type inspection.

use std::any::Any;

use super::ShapeId;

/// Stable tag for a concrete shape type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShapeKind {
    Tetrahedron,
}

impl ShapeKind {
    pub fn name(&self) -> &'static str {
        match self {
            ShapeKind::Tetrahedron => "tetrahedron",
        }
    }
}

impl std::fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// A shape with an identity token and a kind tag
pub trait Shape: std::fmt::Debug + Send + Sync {
    /// Identity token used for lookup
    fn id(&self) -> &ShapeId;

    /// Concrete kind, used to pick a calculator
    fn kind(&self) -> ShapeKind;

    /// Access to the concrete type for calculators specialised on `kind()`
    fn as_any(&self) -> &dyn Any;
}
