//! # Reader
//!
//! Input boundary: coordinate text in, tetrahedra out.
//!
//! Each non-blank line holds 12 whitespace-separated numbers, the `x y z`
//! of vertices A, B, C and D:
//!
//! ```text
//! 0 0 0  1 0 0  0 1 0  0 0 1
//! ```
//!
//! Malformed and degenerate lines are logged and skipped. Only I/O failure
//! is fatal to a load.

mod parser;
mod factory;
mod file;
mod loader;

pub use parser::CoordinateParser;
pub use factory::TetrahedronFactory;
pub use file::{non_blank_lines, CoordinateReader};
pub use loader::{LoadReport, TetrahedronLoader};
