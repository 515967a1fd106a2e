//! Coordinate line parsing.

use tracing::debug;

use crate::core::{ShapeResult, COORDINATES_PER_LINE};
use crate::ports::parse_numbers;

/// Splits a line on whitespace and parses a fixed number of coordinates
#[derive(Debug, Clone, Copy)]
pub struct CoordinateParser {
    expected: usize,
}

impl CoordinateParser {
    /// Parser for tetrahedron lines (12 coordinates)
    pub fn new() -> Self {
        Self::with_count(COORDINATES_PER_LINE)
    }

    pub fn with_count(expected: usize) -> Self {
        Self { expected }
    }

    pub fn expected(&self) -> usize {
        self.expected
    }

    /// Whitespace-separated tokens, surrounding whitespace ignored
    pub fn tokens<'a>(&self, line: &'a str) -> Vec<&'a str> {
        line.split_whitespace().collect()
    }

    /// Parse one line into exactly `expected` numbers
    pub fn parse_coordinates(&self, line: &str) -> ShapeResult<Vec<f64>> {
        let coordinates = parse_numbers(&self.tokens(line), self.expected)?;
        debug!(count = coordinates.len(), line, "parsed coordinates");
        Ok(coordinates)
    }
}

impl Default for CoordinateParser {
    fn default() -> Self {
        Self::new()
    }
}
