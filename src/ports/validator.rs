//! # Validator Port
//!
//! Trait for deciding whether a shape is geometrically sound.

use crate::core::{Shape, ShapeKind};

/// Trait for degeneracy checks
pub trait ShapeValidator: Send + Sync {
    /// Shape kind this validator understands
    fn kind(&self) -> ShapeKind;

    /// True when the shape is of the right kind and non-degenerate
    fn is_valid(&self, shape: &dyn Shape) -> bool;
}
