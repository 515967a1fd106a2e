//! # Errors
//!
//! Error kinds shared across the crate. Geometry errors only surface from
//! the validating calculator mode and from the input boundary (parsing a
//! coordinate line). Raw-mode paths never produce them.

use std::path::PathBuf;

use super::{ShapeId, ShapeKind};

/// Result type for shape validation and construction
pub type ShapeResult<T> = Result<T, ShapeError>;

/// Result type for reading coordinate sources
pub type FileReadResult<T> = Result<T, FileReadError>;

/// Result type for repository writes
pub type RepositoryResult<T> = Result<T, RepositoryError>;

/// Result type for loading a coordinate file into a repository
pub type LoadResult<T> = Result<T, LoadError>;

/// A shape, or the input describing one, is not acceptable
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ShapeError {
    #[error("Calculator for {expected} cannot handle a {found}")]
    WrongKind { expected: ShapeKind, found: ShapeKind },

    #[error("Shape {id} is degenerate: points repeat or lie in one plane")]
    Degenerate { id: ShapeId },

    #[error("Invalid number of parameters for tetrahedron: expected {expected}, got {found}")]
    ParameterCount { expected: usize, found: usize },

    #[error("Invalid parameter format for tetrahedron: {token:?} is not a number")]
    InvalidNumber { token: String },

    #[error("Invalid point label {0:?}: use A, B, C or D")]
    InvalidLabel(String),
}

/// A coordinate source could not be read
#[derive(Debug, thiserror::Error)]
pub enum FileReadError {
    #[error("Error reading shapes from file {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// The repository refused a write
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RepositoryError {
    #[error("Repository capacity exceeded ({capacity} shapes)")]
    CapacityExceeded { capacity: usize },
}

/// Loading a coordinate file stopped early
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error(transparent)]
    Read(#[from] FileReadError),

    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

/// Result of a transactional point update
///
/// Not an error: a rejected update leaves the shape exactly as it was.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use]
pub enum UpdateOutcome {
    /// The new point was accepted and observers were notified
    Updated,
    /// No shape has the given id
    NotFound,
    /// The new point would make the shape invalid; nothing changed
    Rejected,
}

impl UpdateOutcome {
    pub fn is_success(self) -> bool {
        matches!(self, UpdateOutcome::Updated)
    }
}
