//! # Tetrahedron
//!
//! Four point slots plus an identity token.
//!
//! Equality and hashing are structural over the four points only: two
//! tetrahedra with different ids but identical vertices compare equal. The
//! id is for lookup, the points are the geometry.
//!
//! Point slots are mutated one at a time through [`Tetrahedron::set_point`],
//! which hands back a [`PointChange`] event. The entity knows nothing about
//! who cares about that event; the owner (the repository) forwards it to
//! its observers.

use std::hash::{Hash, Hasher};
use std::str::FromStr;

use super::error::ShapeError;
use super::shape::{Shape, ShapeKind};
use super::{Point, ShapeId};

/// Names one of the four vertex slots
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PointLabel {
    A,
    B,
    C,
    D,
}

impl PointLabel {
    pub const ALL: [PointLabel; 4] = [PointLabel::A, PointLabel::B, PointLabel::C, PointLabel::D];

    fn index(self) -> usize {
        match self {
            PointLabel::A => 0,
            PointLabel::B => 1,
            PointLabel::C => 2,
            PointLabel::D => 3,
        }
    }

    pub fn as_char(self) -> char {
        match self {
            PointLabel::A => 'A',
            PointLabel::B => 'B',
            PointLabel::C => 'C',
            PointLabel::D => 'D',
        }
    }
}

impl TryFrom<char> for PointLabel {
    type Error = ShapeError;

    /// Case-insensitive
    fn try_from(c: char) -> Result<Self, Self::Error> {
        match c.to_ascii_uppercase() {
            'A' => Ok(PointLabel::A),
            'B' => Ok(PointLabel::B),
            'C' => Ok(PointLabel::C),
            'D' => Ok(PointLabel::D),
            _ => Err(ShapeError::InvalidLabel(c.to_string())),
        }
    }
}

impl FromStr for PointLabel {
    type Err = ShapeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let mut chars = trimmed.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => PointLabel::try_from(c),
            _ => Err(ShapeError::InvalidLabel(trimmed.to_string())),
        }
    }
}

impl std::fmt::Display for PointLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// Record of a single point-slot mutation
#[derive(Debug, Clone, PartialEq)]
#[must_use = "a point change must be forwarded to observers"]
pub struct PointChange {
    pub id: ShapeId,
    pub label: PointLabel,
    pub previous: Point,
    pub current: Point,
}

/// A tetrahedron: four vertices and an identity token
#[derive(Debug, Clone)]
pub struct Tetrahedron {
    id: ShapeId,
    points: [Point; 4],
}

impl Tetrahedron {
    /// Create a tetrahedron with a caller-supplied id
    ///
    /// No validation happens here; see `TetrahedronValidator`.
    pub fn new(id: impl Into<ShapeId>, a: Point, b: Point, c: Point, d: Point) -> Self {
        Self {
            id: id.into(),
            points: [a, b, c, d],
        }
    }

    /// Create a tetrahedron with a generated `tetrahedron_<uuid>` id
    pub fn with_generated_id(a: Point, b: Point, c: Point, d: Point) -> Self {
        Self::new(ShapeId::generate(), a, b, c, d)
    }

    pub fn id(&self) -> &ShapeId {
        &self.id
    }

    pub fn point(&self, label: PointLabel) -> Point {
        self.points[label.index()]
    }

    pub fn a(&self) -> Point {
        self.points[0]
    }

    pub fn b(&self) -> Point {
        self.points[1]
    }

    pub fn c(&self) -> Point {
        self.points[2]
    }

    pub fn d(&self) -> Point {
        self.points[3]
    }

    /// All four vertices in A, B, C, D order
    pub fn points(&self) -> &[Point; 4] {
        &self.points
    }

    /// Replace one vertex, returning the change event
    ///
    /// Only the named slot is touched.
    pub fn set_point(&mut self, label: PointLabel, point: Point) -> PointChange {
        let previous = std::mem::replace(&mut self.points[label.index()], point);
        PointChange {
            id: self.id.clone(),
            label,
            previous,
            current: point,
        }
    }

    /// Scratch copy with one vertex replaced; `self` is untouched
    pub fn with_point(&self, label: PointLabel, point: Point) -> Self {
        let mut copy = self.clone();
        copy.points[label.index()] = point;
        copy
    }
}

impl PartialEq for Tetrahedron {
    fn eq(&self, other: &Self) -> bool {
        self.points == other.points
    }
}

impl Eq for Tetrahedron {}

impl Hash for Tetrahedron {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.points.hash(state);
    }
}

impl Shape for Tetrahedron {
    fn id(&self) -> &ShapeId {
        &self.id
    }

    fn kind(&self) -> ShapeKind {
        ShapeKind::Tetrahedron
    }

    fn as_any(&self) -> &dyn std::any::Any {
        self
    }
}

impl std::fmt::Display for Tetrahedron {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Tetrahedron{{pointA={}, pointB={}, pointC={}, pointD={}, id={}}}",
            self.points[0], self.points[1], self.points[2], self.points[3], self.id
        )
    }
}
