//! # Configuration
//!
//! Tunables for validation, id generation and repository capacity.
//!
//! The defaults reproduce the strict behaviour: a tetrahedron is degenerate
//! only when its volume is exactly `0.0`, ids are `tetrahedron_<uuid>`, and
//! the repository grows without bound.

use super::id::DEFAULT_ID_PREFIX;

/// Number of coordinate tokens that describe one tetrahedron
pub const COORDINATES_PER_LINE: usize = 12;

/// Main configuration
#[derive(Clone, Debug, PartialEq)]
pub struct ShapesConfig {
    /// Volumes at or below this value count as degenerate
    ///
    /// `0.0` means exact comparison: only a volume of exactly zero is
    /// rejected, and `1e-300` passes.
    pub degeneracy_tolerance: f64,

    /// Prefix for generated shape ids
    pub id_prefix: String,

    /// Upper bound on repository size, `None` for unbounded
    pub max_shapes: Option<usize>,
}

impl ShapesConfig {
    pub fn new() -> Self {
        Self {
            degeneracy_tolerance: 0.0,
            id_prefix: DEFAULT_ID_PREFIX.to_string(),
            max_shapes: None,
        }
    }

    /// Set the degeneracy tolerance (negative values are clamped to `0.0`)
    pub fn with_degeneracy_tolerance(mut self, tolerance: f64) -> Self {
        self.degeneracy_tolerance = tolerance.max(0.0);
        self
    }

    /// Set the prefix for generated ids
    pub fn with_id_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.id_prefix = prefix.into();
        self
    }

    /// Bound the repository size
    pub fn with_max_shapes(mut self, max: usize) -> Self {
        self.max_shapes = Some(max);
        self
    }

    /// Tiny config for testing
    pub fn tiny() -> Self {
        Self::new().with_max_shapes(4)
    }

    /// True when validation compares volume against exactly zero
    pub fn is_exact(&self) -> bool {
        self.degeneracy_tolerance == 0.0
    }
}

impl Default for ShapesConfig {
    fn default() -> Self {
        Self::new()
    }
}
