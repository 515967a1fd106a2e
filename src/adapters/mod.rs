//! Adapters - Concrete implementations of port interfaces

mod validator;
mod calculator;
mod specification;
mod comparator;
mod warehouse;
mod repository;
pub mod reader;

pub use validator::TetrahedronValidator;
pub use calculator::TetrahedronCalculator;
pub use specification::{
    range_for, AreaRangeSpecification, IdSpecification, PerimeterRangeSpecification,
    VolumeRangeSpecification,
};
pub use comparator::{by_id, ByMetric, SortKey};
pub use warehouse::{SharedWarehouse, Warehouse};
pub use repository::TetrahedronRepository;
pub use reader::{LoadReport, TetrahedronLoader};
