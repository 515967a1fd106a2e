//! # Ports
//!
//! Seams between the shape core and its adapters: calculating parameters,
//! validating geometry, selecting shapes, observing repository changes and
//! building shapes from numeric tokens.

mod calculator;
mod validator;
mod specification;
mod observer;
mod factory;

// Re-export traits
pub use calculator::ShapeCalculator;
pub use validator::ShapeValidator;
pub use specification::Specification;
pub use observer::{ObserverHandle, ShapeObserver};
pub use factory::{parse_numbers, ShapeFactory};
