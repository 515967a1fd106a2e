//! # Specification Port
//!
//! A named predicate over a tetrahedron, used to filter the repository.
//!
//! Implementations must never fail: a shape whose measure cannot be
//! computed simply does not match.

use crate::core::Tetrahedron;

/// Predicate over a tetrahedron
pub trait Specification: std::fmt::Debug + Send + Sync {
    /// True when the tetrahedron matches
    fn is_satisfied_by(&self, tetrahedron: &Tetrahedron) -> bool;
}

impl<S: Specification + ?Sized> Specification for &S {
    fn is_satisfied_by(&self, tetrahedron: &Tetrahedron) -> bool {
        (**self).is_satisfied_by(tetrahedron)
    }
}

impl<S: Specification + ?Sized> Specification for Box<S> {
    fn is_satisfied_by(&self, tetrahedron: &Tetrahedron) -> bool {
        (**self).is_satisfied_by(tetrahedron)
    }
}
