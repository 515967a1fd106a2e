//! # Tetra Warehouse
//!
//! Tetrahedra in memory, their geometry, and a parameter cache that never
//! goes stale.
//!
//! ## Overview
//!
//! A repository holds an ordered collection of tetrahedra. Every mutation
//! is forwarded to observers; the `Warehouse` observer recomputes the shape's
//! perimeter, area and volume so lookups by id are always current.
//!
//! ## Key Features
//!
//! - **Two calculator modes**: raw (always a number) and checked (validates first)
//! - **Exact degeneracy check**: repeated vertices or zero volume, optional tolerance
//! - **Specification queries**: by id or by inclusive metric range
//! - **Transactional point edits**: validated on a scratch copy, committed only on success
//!
//! ## Usage
//!
//! ```rust
//! use std::sync::Arc;
//!
//! use tetra_warehouse::adapters::{TetrahedronCalculator, TetrahedronRepository, VolumeRangeSpecification, Warehouse};
//! use tetra_warehouse::core::{PointLabel, ShapesConfig, Tetrahedron, UpdateOutcome};
//! use tetra_warehouse::Point;
//!
//! let config = ShapesConfig::default();
//! let warehouse = Warehouse::with_default_calculators(&config).into_shared();
//! let mut repository = TetrahedronRepository::with_config(&config).observed_by(&warehouse);
//!
//! repository.add(Tetrahedron::new(
//!     "corner",
//!     Point::new(0.0, 0.0, 0.0),
//!     Point::new(1.0, 0.0, 0.0),
//!     Point::new(0.0, 1.0, 0.0),
//!     Point::new(0.0, 0.0, 1.0),
//! ))?;
//!
//! // Cache filled at insertion time
//! let volume = warehouse.read().get("corner").map(|p| p.volume);
//! assert!((volume.unwrap() - 1.0 / 6.0).abs() < 1e-12);
//!
//! // A coplanar edit is rejected and leaves the shape alone
//! let outcome = repository.update_point("corner", PointLabel::D, Point::new(1.0, 1.0, 0.0));
//! assert_eq!(outcome, UpdateOutcome::Rejected);
//!
//! let calculator = Arc::new(TetrahedronCalculator::new());
//! let small = VolumeRangeSpecification::new(calculator, 0.0, 1.0);
//! assert_eq!(repository.query(&small).len(), 1);
//! # Ok::<(), tetra_warehouse::core::RepositoryError>(())
//! ```

pub mod core;
pub mod ports;
pub mod adapters;

// Re-exports for convenience
pub use crate::core::{Point, ShapeId, ShapeParameters, ShapesConfig, Tetrahedron};
pub use crate::adapters::{TetrahedronCalculator, TetrahedronRepository, Warehouse};
pub use crate::ports::{ShapeCalculator, Specification};
