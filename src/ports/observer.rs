//! # Observer Port
//!
//! Trait for components that keep derived state in step with shapes.
//!
//! The repository holds weak handles to its observers and calls them
//! synchronously, in registration order, before a mutating call returns.
//! Observers handle their own failures: a callback never aborts or rolls
//! back the mutation that triggered it.

use std::sync::Arc;

use parking_lot::RwLock;

use crate::core::{Shape, ShapeId};

/// Shared handle to an observer
pub type ObserverHandle = Arc<RwLock<dyn ShapeObserver>>;

/// Trait for shape-change observers
pub trait ShapeObserver: Send + Sync {
    /// A shape was added or one of its points changed
    fn on_shape_changed(&mut self, shape: &dyn Shape);

    /// A shape left the repository
    fn on_shape_removed(&mut self, id: &ShapeId);
}
