//! # Factory Port
//!
//! Trait for building shapes from flat coordinate lists.

use crate::core::{Shape, ShapeError, ShapeResult};

/// Trait for shape construction
pub trait ShapeFactory: Send + Sync {
    /// Shape produced by this factory
    type Output: Shape;

    /// Number of numeric parameters one shape needs
    fn parameter_count(&self) -> usize;

    /// Build a shape from numeric parameters
    ///
    /// Fails with `ParameterCount` when the slice has the wrong length.
    fn create(&self, parameters: &[f64]) -> ShapeResult<Self::Output>;

    /// Build a shape from textual tokens
    ///
    /// The count is checked before any token is parsed.
    fn create_from_tokens(&self, tokens: &[&str]) -> ShapeResult<Self::Output> {
        let parameters = parse_numbers(tokens, self.parameter_count())?;
        self.create(&parameters)
    }
}

/// Parse exactly `expected` numeric tokens
///
/// The count is checked before any token is parsed, so a short line reports
/// `ParameterCount` even if it also holds garbage.
pub fn parse_numbers(tokens: &[&str], expected: usize) -> ShapeResult<Vec<f64>> {
    if tokens.len() != expected {
        return Err(ShapeError::ParameterCount {
            expected,
            found: tokens.len(),
        });
    }

    tokens
        .iter()
        .map(|token| {
            token.parse::<f64>().map_err(|_| ShapeError::InvalidNumber {
                token: (*token).to_string(),
            })
        })
        .collect()
}
