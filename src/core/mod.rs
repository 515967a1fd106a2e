//! # Core Domain
//!
//! Pure math, no I/O.
//!
//! This module contains the fundamental types and operations:
//! - `Point` - A position in 3-D space
//! - `ShapeId` - Identity token for a shape
//! - `geometry` - Distance, triangle area, tetrahedron volume
//! - `Tetrahedron` - Four mutable vertex slots plus an id
//! - `ShapeParameters` - Derived perimeter/area/volume snapshot
//!
//! ## Design Principles
//!
//! - Geometry functions are pure and total
//! - Entities emit change events, they never call out to observers
//! - Fully testable in isolation

mod point;
mod id;
mod shape;
mod tetrahedron;
mod parameters;
pub mod geometry;
pub mod config;
pub mod error;

// Re-exports
pub use point::Point;
pub use id::{ShapeId, DEFAULT_ID_PREFIX};
pub use shape::{Shape, ShapeKind};
pub use tetrahedron::{PointChange, PointLabel, Tetrahedron};
pub use parameters::{Metric, ShapeParameters};
pub use config::{ShapesConfig, COORDINATES_PER_LINE};
pub use error::{
    FileReadError, FileReadResult, LoadError, LoadResult, RepositoryError, RepositoryResult,
    ShapeError, ShapeResult, UpdateOutcome,
};
