//! # Tetrahedron Repository
//!
//! Ordered collection of tetrahedra with specification queries, in-place
//! sorting and observer fan-out.
//!
//! ## Observers
//!
//! Observers are held as weak handles. Every mutation (add, point change,
//! removal) is forwarded synchronously, in registration order, before the
//! mutating call returns. A handle whose observer has been dropped is pruned
//! on the next fan-out.
//!
//! Do not hold a lock on an observer while calling a mutating method: the
//! fan-out takes each observer's write lock.
//!
//! ## Usage
//!
//! ```rust
//! use tetra_warehouse::adapters::{IdSpecification, TetrahedronRepository, Warehouse};
//! use tetra_warehouse::core::{Point, ShapesConfig, Tetrahedron};
//!
//! let config = ShapesConfig::default();
//! let warehouse = Warehouse::with_default_calculators(&config).into_shared();
//! let mut repository = TetrahedronRepository::with_config(&config).observed_by(&warehouse);
//!
//! let t = Tetrahedron::new(
//!     "t1",
//!     Point::new(0.0, 0.0, 0.0),
//!     Point::new(1.0, 0.0, 0.0),
//!     Point::new(0.0, 1.0, 0.0),
//!     Point::new(0.0, 0.0, 1.0),
//! );
//! repository.add(t).unwrap();
//!
//! assert_eq!(repository.query(&IdSpecification::new("t1")).len(), 1);
//! assert!(warehouse.read().contains("t1"));
//! ```

use std::cmp::Ordering;
use std::sync::{Arc, Weak};

use parking_lot::RwLock;
use tracing::{debug, info, warn};

use crate::core::{
    Point, PointChange, PointLabel, RepositoryError, RepositoryResult, ShapesConfig, Tetrahedron,
    UpdateOutcome,
};
use crate::ports::{ObserverHandle, ShapeObserver, Specification};

use super::validator::TetrahedronValidator;

/// Repository of tetrahedra
pub struct TetrahedronRepository {
    shapes: Vec<Tetrahedron>,
    observers: Vec<Weak<RwLock<dyn ShapeObserver>>>,
    validator: TetrahedronValidator,
    max_shapes: Option<usize>,
}

impl TetrahedronRepository {
    /// Empty, unbounded repository with exact validation
    pub fn new() -> Self {
        Self::with_config(&ShapesConfig::default())
    }

    pub fn with_config(config: &ShapesConfig) -> Self {
        Self {
            shapes: Vec::new(),
            observers: Vec::new(),
            validator: TetrahedronValidator::from_config(config),
            max_shapes: config.max_shapes,
        }
    }

    /// Repository pre-filled with `shapes`
    ///
    /// The observer is registered first, so it sees every initial shape.
    pub fn from_shapes<O>(
        config: &ShapesConfig,
        observer: &Arc<RwLock<O>>,
        shapes: impl IntoIterator<Item = Tetrahedron>,
    ) -> RepositoryResult<Self>
    where
        O: ShapeObserver + 'static,
    {
        let mut repository = Self::with_config(config).observed_by(observer);
        for shape in shapes {
            repository.add(shape)?;
        }
        Ok(repository)
    }

    /// Builder form of [`subscribe`](Self::subscribe)
    pub fn observed_by<O>(mut self, observer: &Arc<RwLock<O>>) -> Self
    where
        O: ShapeObserver + 'static,
    {
        self.subscribe(observer);
        self
    }

    /// Register an observer; the repository keeps only a weak handle
    pub fn subscribe<O>(&mut self, observer: &Arc<RwLock<O>>)
    where
        O: ShapeObserver + 'static,
    {
        let handle: ObserverHandle = observer.clone();
        self.subscribe_handle(&handle);
    }

    /// Register an already type-erased observer handle
    pub fn subscribe_handle(&mut self, handle: &ObserverHandle) {
        self.observers.push(Arc::downgrade(handle));
        debug!(observers = self.observers.len(), "observer subscribed");
    }

    /// Number of registered observers still alive
    pub fn observer_count(&self) -> usize {
        self.observers.iter().filter(|w| w.strong_count() > 0).count()
    }

    pub fn validator(&self) -> &TetrahedronValidator {
        &self.validator
    }

    /// Append a tetrahedron and notify observers
    ///
    /// Fails only when the configured capacity is reached; geometry is
    /// never checked here.
    pub fn add(&mut self, tetrahedron: Tetrahedron) -> RepositoryResult<()> {
        if let Some(capacity) = self.max_shapes {
            if self.shapes.len() >= capacity {
                warn!(id = %tetrahedron.id(), capacity, "repository full, add refused");
                return Err(RepositoryError::CapacityExceeded { capacity });
            }
        }

        debug!(id = %tetrahedron.id(), "tetrahedron added");
        self.shapes.push(tetrahedron);
        let added = &self.shapes[self.shapes.len() - 1];
        fan_out(&mut self.observers, |observer| {
            observer.write().on_shape_changed(added)
        });
        Ok(())
    }

    /// Remove the first tetrahedron structurally equal to `tetrahedron`
    ///
    /// The match is by points, not id, so the removed shape may be a
    /// different instance with the same vertices. Observers evict the id
    /// of the shape actually removed.
    pub fn remove(&mut self, tetrahedron: &Tetrahedron) -> Option<Tetrahedron> {
        let index = self.shapes.iter().position(|t| t == tetrahedron)?;
        let removed = self.shapes.remove(index);
        debug!(id = %removed.id(), "tetrahedron removed");
        let id = removed.id();
        fan_out(&mut self.observers, |observer| {
            observer.write().on_shape_removed(id)
        });
        Some(removed)
    }

    /// Every tetrahedron satisfying `spec`, in repository order
    pub fn query<S>(&self, spec: &S) -> Vec<&Tetrahedron>
    where
        S: Specification + ?Sized,
    {
        let found: Vec<&Tetrahedron> = self
            .shapes
            .iter()
            .filter(|t| spec.is_satisfied_by(t))
            .collect();
        debug!(?spec, found = found.len(), "query");
        found
    }

    /// Stable in-place sort
    pub fn sort_by<F>(&mut self, compare: F)
    where
        F: FnMut(&Tetrahedron, &Tetrahedron) -> Ordering,
    {
        self.shapes.sort_by(compare);
    }

    /// First tetrahedron with the given id
    pub fn get(&self, id: &str) -> Option<&Tetrahedron> {
        self.shapes.iter().find(|t| t.id().as_str() == id)
    }

    /// Replace one vertex unconditionally and notify observers
    ///
    /// The shape may become degenerate. Returns `None` for an unknown id.
    pub fn set_point(&mut self, id: &str, label: PointLabel, point: Point) -> Option<PointChange> {
        let index = self.position(id)?;
        let change = self.shapes[index].set_point(label, point);
        debug!(id, %label, previous = %change.previous, current = %change.current, "point set");

        let changed = &self.shapes[index];
        fan_out(&mut self.observers, |observer| {
            observer.write().on_shape_changed(changed)
        });
        Some(change)
    }

    /// Replace one vertex only if the result stays valid
    ///
    /// The candidate is validated on a scratch copy. On rejection the
    /// stored shape is untouched and no observer is called.
    pub fn update_point(&mut self, id: &str, label: PointLabel, point: Point) -> UpdateOutcome {
        let Some(index) = self.position(id) else {
            warn!(id, "update failed: no such tetrahedron");
            return UpdateOutcome::NotFound;
        };

        let candidate = self.shapes[index].with_point(label, point);
        if !self.validator.is_valid_tetrahedron(&candidate) {
            warn!(id, %label, %point, "update failed: tetrahedron would become invalid");
            return UpdateOutcome::Rejected;
        }

        let change = self.shapes[index].set_point(label, point);
        info!(id, %label, previous = %change.previous, current = %change.current, "point updated");

        let changed = &self.shapes[index];
        fan_out(&mut self.observers, |observer| {
            observer.write().on_shape_changed(changed)
        });
        UpdateOutcome::Updated
    }

    /// Snapshot copy of the collection
    pub fn all(&self) -> Vec<Tetrahedron> {
        self.shapes.clone()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Tetrahedron> {
        self.shapes.iter()
    }

    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    fn position(&self, id: &str) -> Option<usize> {
        self.shapes.iter().position(|t| t.id().as_str() == id)
    }
}

impl Default for TetrahedronRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for TetrahedronRepository {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TetrahedronRepository")
            .field("shapes", &self.shapes.len())
            .field("observers", &self.observers.len())
            .field("validator", &self.validator)
            .field("max_shapes", &self.max_shapes)
            .finish()
    }
}

impl<'a> IntoIterator for &'a TetrahedronRepository {
    type Item = &'a Tetrahedron;
    type IntoIter = std::slice::Iter<'a, Tetrahedron>;

    fn into_iter(self) -> Self::IntoIter {
        self.shapes.iter()
    }
}

/// Call every live observer in registration order, pruning dead handles
fn fan_out<F>(observers: &mut Vec<Weak<RwLock<dyn ShapeObserver>>>, mut notify: F)
where
    F: FnMut(&ObserverHandle),
{
    observers.retain(|weak| match weak.upgrade() {
        Some(observer) => {
            notify(&observer);
            true
        }
        None => {
            debug!("observer dropped, handle pruned");
            false
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::{
        IdSpecification, SortKey, SharedWarehouse, TetrahedronCalculator, VolumeRangeSpecification,
        Warehouse,
    };
    use crate::core::{Metric, ShapeId};
    use crate::ports::{ShapeCalculator, ShapeValidator};

    fn corner(id: &str, scale: f64) -> Tetrahedron {
        Tetrahedron::new(
            id,
            Point::new(0.0, 0.0, 0.0),
            Point::new(scale, 0.0, 0.0),
            Point::new(0.0, scale, 0.0),
            Point::new(0.0, 0.0, scale),
        )
    }

    fn setup() -> (TetrahedronRepository, SharedWarehouse) {
        let config = ShapesConfig::default();
        let warehouse = Warehouse::with_default_calculators(&config).into_shared();
        let repository = TetrahedronRepository::with_config(&config).observed_by(&warehouse);
        (repository, warehouse)
    }

    /// Records every callback, in order
    #[derive(Default)]
    struct Recorder {
        events: Vec<String>,
    }

    impl ShapeObserver for Recorder {
        fn on_shape_changed(&mut self, shape: &dyn crate::core::Shape) {
            self.events.push(format!("changed {}", shape.id()));
        }

        fn on_shape_removed(&mut self, id: &ShapeId) {
            self.events.push(format!("removed {}", id));
        }
    }

    #[test]
    fn test_add_query_remove() {
        let (mut repo, _warehouse) = setup();
        let t = corner("t", 1.0);
        repo.add(t.clone()).unwrap();

        let found = repo.query(&IdSpecification::new("t"));
        assert_eq!(found, vec![&t]);

        assert!(repo.remove(&t).is_some());
        assert!(repo.query(&IdSpecification::new("t")).is_empty());
        assert!(repo.remove(&t).is_none());
    }

    #[test]
    fn test_cache_populated_on_add() {
        let (mut repo, warehouse) = setup();
        let t = corner("t", 1.0);
        repo.add(t.clone()).unwrap();

        let calc = TetrahedronCalculator::new();
        let cached = warehouse.read().get("t").unwrap();
        assert_eq!(cached.area, calc.area(&t));
        assert_eq!(cached.perimeter, calc.perimeter(&t));
        assert_eq!(cached.volume, calc.volume(&t));
    }

    #[test]
    fn test_cache_follows_mutation() {
        let (mut repo, warehouse) = setup();
        repo.add(corner("t", 1.0)).unwrap();
        let before = warehouse.read().get("t").unwrap();

        let change = repo.set_point("t", PointLabel::B, Point::new(3.0, 0.0, 0.0));
        assert!(change.is_some());

        let after = warehouse.read().get("t").unwrap();
        let calc = TetrahedronCalculator::new();
        let current = repo.get("t").unwrap();
        assert_eq!(after, calc.parameters_raw(current));
        assert!(after.volume > before.volume);
    }

    #[test]
    fn test_set_point_allows_degenerate_and_notifies() {
        let (mut repo, warehouse) = setup();
        repo.add(corner("t", 1.0)).unwrap();

        // D into the z = 0 plane
        let change = repo
            .set_point("t", PointLabel::D, Point::new(1.0, 1.0, 0.0))
            .unwrap();
        assert_eq!(change.previous, Point::new(0.0, 0.0, 1.0));
        assert_eq!(warehouse.read().get("t").map(|p| p.volume), Some(0.0));
        assert!(repo.set_point("missing", PointLabel::A, Point::origin()).is_none());
    }

    #[test]
    fn test_remove_evicts_cache() {
        let (mut repo, warehouse) = setup();
        let t = corner("t", 1.0);
        repo.add(t.clone()).unwrap();
        repo.remove(&t);
        assert!(warehouse.read().get("t").is_none());
    }

    #[test]
    fn test_remove_is_structural() {
        let (mut repo, warehouse) = setup();
        repo.add(corner("first", 1.0)).unwrap();
        repo.add(corner("second", 1.0)).unwrap();

        // Different id, same points: removes the first structural match
        let removed = repo.remove(&corner("other", 1.0)).unwrap();
        assert_eq!(removed.id().as_str(), "first");
        assert_eq!(repo.len(), 1);
        assert!(!warehouse.read().contains("first"));
        assert!(warehouse.read().contains("second"));
    }

    #[test]
    fn test_update_point_rolls_back_on_coplanar() {
        let (mut repo, warehouse) = setup();
        let t = corner("t", 1.0);
        repo.add(t.clone()).unwrap();
        let cached = warehouse.read().get("t");

        let outcome = repo.update_point("t", PointLabel::D, Point::new(2.0, 2.0, 0.0));
        assert_eq!(outcome, UpdateOutcome::Rejected);
        assert!(!outcome.is_success());
        assert_eq!(repo.get("t").unwrap().points(), t.points());
        assert_eq!(warehouse.read().get("t"), cached);
    }

    #[test]
    fn test_update_point_rejects_duplicate_vertex() {
        let (mut repo, _warehouse) = setup();
        repo.add(corner("t", 1.0)).unwrap();
        let outcome = repo.update_point("t", PointLabel::A, Point::new(1.0, 0.0, 0.0));
        assert_eq!(outcome, UpdateOutcome::Rejected);
    }

    #[test]
    fn test_update_point_accepts_valid() {
        let (mut repo, warehouse) = setup();
        repo.add(corner("t", 1.0)).unwrap();

        let outcome = repo.update_point("t", PointLabel::D, Point::new(0.0, 0.0, 6.0));
        assert_eq!(outcome, UpdateOutcome::Updated);

        let stored = repo.get("t").unwrap();
        assert_eq!(stored.d(), Point::new(0.0, 0.0, 6.0));
        assert!(repo.validator().is_valid(stored));
        let volume = warehouse.read().get("t").unwrap().volume;
        assert!((volume - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_update_point_overflow_refreshes_cache() {
        let (mut repo, warehouse) = setup();
        repo.add(corner("t", 1.0)).unwrap();

        let outcome = repo.update_point("t", PointLabel::D, Point::new(0.0, 0.0, 1e308));
        assert_eq!(outcome, UpdateOutcome::Updated);

        let fresh = TetrahedronCalculator::new().parameters_raw(repo.get("t").unwrap());
        assert!(fresh.perimeter.is_infinite());
        assert_eq!(warehouse.read().get("t"), Some(fresh));
    }

    #[test]
    fn test_update_point_unknown_id() {
        let (mut repo, _warehouse) = setup();
        assert_eq!(
            repo.update_point("nope", PointLabel::A, Point::origin()),
            UpdateOutcome::NotFound
        );
    }

    #[test]
    fn test_sort_by_metric_non_decreasing() {
        let (mut repo, _warehouse) = setup();
        for (id, scale) in [("c", 3.0), ("a", 1.0), ("d", 4.0), ("b", 2.0)] {
            repo.add(corner(id, scale)).unwrap();
        }

        let calc: Arc<dyn ShapeCalculator> = Arc::new(TetrahedronCalculator::new());
        for metric in Metric::ALL {
            let cmp = SortKey::Metric(metric).comparator(calc.clone());
            repo.sort_by(|x, y| cmp(x, y));
            let values: Vec<f64> = repo.iter().map(|t| calc.compute_raw(t, metric)).collect();
            assert!(values.windows(2).all(|w| w[0] <= w[1]), "{:?}", metric);
        }
    }

    #[test]
    fn test_sort_is_stable_and_failures_last() {
        let (mut repo, _warehouse) = setup();
        let broken = Tetrahedron::new(
            "broken",
            Point::new(f64::NAN, 0.0, 0.0),
            Point::new(1.0, 0.0, 0.0),
            Point::new(0.0, 1.0, 0.0),
            Point::new(0.0, 0.0, 1.0),
        );
        repo.add(broken).unwrap();
        repo.add(corner("tie-1", 1.0)).unwrap();
        repo.add(corner("big", 5.0)).unwrap();
        repo.add(corner("tie-2", 1.0)).unwrap();

        let calc: Arc<dyn ShapeCalculator> = Arc::new(TetrahedronCalculator::new());
        let cmp = SortKey::Metric(Metric::Volume).comparator(calc);
        repo.sort_by(|x, y| cmp(x, y));

        let ids: Vec<&str> = repo.iter().map(|t| t.id().as_str()).collect();
        assert_eq!(ids, vec!["tie-1", "tie-2", "big", "broken"]);
    }

    #[test]
    fn test_sort_by_id() {
        let (mut repo, _warehouse) = setup();
        for id in ["b", "c", "a"] {
            repo.add(corner(id, 1.0)).unwrap();
        }
        repo.sort_by(crate::adapters::by_id);
        let ids: Vec<&str> = repo.iter().map(|t| t.id().as_str()).collect();
        assert_eq!(ids, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_query_preserves_order() {
        let (mut repo, _warehouse) = setup();
        repo.add(corner("big", 2.0)).unwrap();
        repo.add(corner("small", 1.0)).unwrap();
        repo.add(corner("huge", 10.0)).unwrap();

        let calc: Arc<dyn ShapeCalculator> = Arc::new(TetrahedronCalculator::new());
        let spec = VolumeRangeSpecification::new(calc, 0.0, 2.0);
        let ids: Vec<&str> = repo.query(&spec).iter().map(|t| t.id().as_str()).collect();
        assert_eq!(ids, vec!["big", "small"]);
    }

    #[test]
    fn test_capacity() {
        let config = ShapesConfig::tiny();
        let mut repo = TetrahedronRepository::with_config(&config);
        for i in 0..4 {
            repo.add(corner(&format!("t{}", i), 1.0)).unwrap();
        }
        assert_eq!(
            repo.add(corner("t4", 1.0)),
            Err(RepositoryError::CapacityExceeded { capacity: 4 })
        );
        assert_eq!(repo.len(), 4);
    }

    #[test]
    fn test_from_shapes_notifies_each() {
        let recorder = Arc::new(RwLock::new(Recorder::default()));
        let repo = TetrahedronRepository::from_shapes(
            &ShapesConfig::default(),
            &recorder,
            vec![corner("a", 1.0), corner("b", 2.0)],
        )
        .unwrap();

        assert_eq!(repo.len(), 2);
        assert_eq!(recorder.read().events, vec!["changed a", "changed b"]);
    }

    #[test]
    fn test_observers_in_registration_order() {
        let first = Arc::new(RwLock::new(Recorder::default()));
        let second = Arc::new(RwLock::new(Recorder::default()));
        let mut repo = TetrahedronRepository::new()
            .observed_by(&first)
            .observed_by(&second);

        let t = corner("t", 1.0);
        repo.add(t.clone()).unwrap();
        repo.remove(&t);

        assert_eq!(first.read().events, vec!["changed t", "removed t"]);
        assert_eq!(second.read().events, first.read().events);
    }

    #[test]
    fn test_dropped_observer_pruned() {
        let mut repo = TetrahedronRepository::new();
        {
            let warehouse = Warehouse::default().into_shared();
            repo.subscribe(&warehouse);
            assert_eq!(repo.observer_count(), 1);
        }
        assert_eq!(repo.observer_count(), 0);

        repo.add(corner("t", 1.0)).unwrap();
        assert_eq!(repo.observers.len(), 0);
    }

    #[test]
    fn test_all_is_snapshot() {
        let (mut repo, _warehouse) = setup();
        repo.add(corner("t", 1.0)).unwrap();
        let snapshot = repo.all();
        let change = repo.set_point("t", PointLabel::A, Point::new(-1.0, 0.0, 0.0));
        assert!(change.is_some());
        assert_eq!(snapshot[0].a(), Point::new(0.0, 0.0, 0.0));
        assert_eq!(repo.get("t").unwrap().a(), Point::new(-1.0, 0.0, 0.0));
    }
}
