//! # Warehouse
//!
//! Derived index from shape id to its cached perimeter, area and volume.
//!
//! The warehouse is an observer: the repository tells it when a shape is
//! added, mutated or removed, and it recomputes through the calculator
//! registered for the shape's kind. It never owns or mutates a shape.
//!
//! Entry lifecycle: absent -> present on first notification, present ->
//! present on every later one, present -> absent on removal.
//!
//! One warehouse per process is the usual arrangement, but nothing here is
//! global: whoever composes the repository creates it and hands out
//! [`SharedWarehouse`] handles.

use std::borrow::Borrow;
use std::collections::HashMap;
use std::hash::Hash;
use std::sync::Arc;

use parking_lot::RwLock;
use tracing::{debug, warn};

use crate::core::{Shape, ShapeId, ShapeKind, ShapeParameters, ShapesConfig};
use crate::ports::{ShapeCalculator, ShapeObserver};

use super::calculator::TetrahedronCalculator;

/// Shared handle to a warehouse
pub type SharedWarehouse = Arc<RwLock<Warehouse>>;

/// Cache of shape parameters keyed by id
pub struct Warehouse {
    parameters: HashMap<ShapeId, ShapeParameters>,
    calculators: HashMap<ShapeKind, Arc<dyn ShapeCalculator>>,
}

impl Warehouse {
    /// Empty warehouse with no calculators registered
    pub fn new() -> Self {
        Self {
            parameters: HashMap::new(),
            calculators: HashMap::new(),
        }
    }

    /// Warehouse with the tetrahedron calculator registered
    pub fn with_default_calculators(config: &ShapesConfig) -> Self {
        let mut warehouse = Self::new();
        warehouse.register_calculator(Arc::new(TetrahedronCalculator::from_config(config)));
        warehouse
    }

    /// Wrap in a shared handle
    pub fn into_shared(self) -> SharedWarehouse {
        Arc::new(RwLock::new(self))
    }

    /// Register the calculator for its shape kind, replacing any previous one
    pub fn register_calculator(&mut self, calculator: Arc<dyn ShapeCalculator>) {
        debug!(kind = %calculator.kind(), calculator = calculator.name(), "calculator registered");
        self.calculators.insert(calculator.kind(), calculator);
    }

    /// Calculator registered for a shape kind
    pub fn calculator_for(&self, kind: ShapeKind) -> Option<&Arc<dyn ShapeCalculator>> {
        self.calculators.get(&kind)
    }

    /// Insert or overwrite an entry
    pub fn put(&mut self, id: ShapeId, perimeter: f64, area: f64, volume: f64) {
        let parameters = ShapeParameters::new(perimeter, area, volume);
        debug!(id = %id, %parameters, "parameters saved");
        self.parameters.insert(id, parameters);
    }

    /// Cached parameters, `None` if never computed or removed
    pub fn get<Q>(&self, id: &Q) -> Option<ShapeParameters>
    where
        ShapeId: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.parameters.get(id).copied()
    }

    pub fn contains<Q>(&self, id: &Q) -> bool
    where
        ShapeId: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.parameters.contains_key(id)
    }

    /// Evict an entry, returning what was cached
    pub fn remove<Q>(&mut self, id: &Q) -> Option<ShapeParameters>
    where
        ShapeId: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let removed = self.parameters.remove(id);
        if removed.is_some() {
            debug!("parameters removed");
        }
        removed
    }

    /// Number of cached entries
    pub fn len(&self) -> usize {
        self.parameters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parameters.is_empty()
    }

    /// Iterate over cached entries (unordered)
    pub fn iter(&self) -> impl Iterator<Item = (&ShapeId, &ShapeParameters)> {
        self.parameters.iter()
    }
}

impl Default for Warehouse {
    fn default() -> Self {
        Self::with_default_calculators(&ShapesConfig::default())
    }
}

impl std::fmt::Debug for Warehouse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Warehouse")
            .field("entries", &self.parameters.len())
            .field("calculators", &self.calculators.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl ShapeObserver for Warehouse {
    fn on_shape_changed(&mut self, shape: &dyn Shape) {
        let Some(calculator) = self.calculators.get(&shape.kind()).cloned() else {
            warn!(id = %shape.id(), kind = %shape.kind(), "no calculator registered, update skipped");
            return;
        };

        // Raw mode: an in-progress edit may pass through invalid geometry
        let parameters = calculator.parameters_raw(shape);
        if !parameters.is_finite() {
            warn!(id = %shape.id(), %parameters, "non-finite parameters cached");
        }

        self.put(
            shape.id().clone(),
            parameters.perimeter,
            parameters.area,
            parameters.volume,
        );
    }

    fn on_shape_removed(&mut self, id: &ShapeId) {
        self.remove(id);
    }
}
