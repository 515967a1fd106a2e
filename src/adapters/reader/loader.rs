//! Loading coordinate files into a repository.

use std::path::Path;

use serde::Serialize;
use tracing::{info, warn};

use crate::core::{LoadResult, RepositoryResult, ShapeId, ShapesConfig};
use crate::adapters::{TetrahedronRepository, TetrahedronValidator};
use crate::ports::ShapeFactory;

use super::factory::TetrahedronFactory;
use super::file::{non_blank_lines, CoordinateReader};
use super::parser::CoordinateParser;

/// What a load did
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct LoadReport {
    /// Ids of the shapes added, in file order
    pub loaded: Vec<ShapeId>,
    /// Lines that were malformed or described a degenerate tetrahedron
    pub skipped: usize,
}

impl LoadReport {
    pub fn loaded_count(&self) -> usize {
        self.loaded.len()
    }
}

/// Parses, builds, validates and adds tetrahedra line by line
#[derive(Debug, Clone)]
pub struct TetrahedronLoader {
    reader: CoordinateReader,
    parser: CoordinateParser,
    factory: TetrahedronFactory,
    validator: TetrahedronValidator,
}

impl TetrahedronLoader {
    pub fn new() -> Self {
        Self::from_config(&ShapesConfig::default())
    }

    pub fn from_config(config: &ShapesConfig) -> Self {
        Self {
            reader: CoordinateReader::new(),
            parser: CoordinateParser::new(),
            factory: TetrahedronFactory::from_config(config),
            validator: TetrahedronValidator::from_config(config),
        }
    }

    /// Load every valid line of `path` into `repository`
    ///
    /// Only an unreadable file or a full repository stops the load.
    pub fn load_file(
        &self,
        path: &Path,
        repository: &mut TetrahedronRepository,
    ) -> LoadResult<LoadReport> {
        let lines = self.reader.read_lines(path)?;
        if lines.is_empty() {
            warn!(path = %path.display(), "no coordinate lines found");
        }

        let report = self.load_lines(lines.iter().map(String::as_str), repository)?;
        info!(
            path = %path.display(),
            loaded = report.loaded_count(),
            skipped = report.skipped,
            "load finished"
        );
        Ok(report)
    }

    /// Load from in-memory text, blank lines ignored
    pub fn load_str(
        &self,
        text: &str,
        repository: &mut TetrahedronRepository,
    ) -> RepositoryResult<LoadReport> {
        self.load_lines(non_blank_lines(text), repository)
    }

    fn load_lines<'a>(
        &self,
        lines: impl Iterator<Item = &'a str>,
        repository: &mut TetrahedronRepository,
    ) -> RepositoryResult<LoadReport> {
        let mut report = LoadReport::default();

        for line in lines {
            let tetrahedron = match self
                .parser
                .parse_coordinates(line)
                .and_then(|coordinates| self.factory.create(&coordinates))
            {
                Ok(tetrahedron) => tetrahedron,
                Err(e) => {
                    warn!(line, error = %e, "skipping invalid line");
                    report.skipped += 1;
                    continue;
                }
            };

            if !self.validator.is_valid_tetrahedron(&tetrahedron) {
                warn!(line, %tetrahedron, "skipping degenerate tetrahedron");
                report.skipped += 1;
                continue;
            }

            let id = tetrahedron.id().clone();
            repository.add(tetrahedron)?;
            info!(id = %id, "tetrahedron loaded");
            report.loaded.push(id);
        }

        Ok(report)
    }
}

impl Default for TetrahedronLoader {
    fn default() -> Self {
        Self::new()
    }
}
