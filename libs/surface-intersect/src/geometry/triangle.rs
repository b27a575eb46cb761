//! # Triangles
//!
//! Immutable triangles with their supporting plane and bounding box cached at
//! construction.

use glam::DVec3;
use serde::{Deserialize, Serialize};

use super::bounds::Bounds;
use super::plane::Plane;

/// Grid cell and half of the plate a sampled triangle came from.
///
/// Provenance only; it never affects geometry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlateIndex {
    /// Plate column along the `u` direction.
    pub u: u32,
    /// Plate row along the `v` direction.
    pub v: u32,
    /// 0 for the `[c0, c1, c2]` half, 1 for the `[c0, c2, c3]` half.
    pub half: u8,
}

/// A triangle with cached plane and bounds.
///
/// # Example
///
/// ```rust
/// use surface_intersect::geometry::Triangle;
/// use glam::DVec3;
///
/// let tri = Triangle::new(DVec3::ZERO, DVec3::X, DVec3::Y);
/// assert!((tri.area() - 0.5).abs() < 1e-12);
/// assert_eq!(tri.plane().map(|p| p.normal()), Some(DVec3::Z));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Triangle {
    vertices: [DVec3; 3],
    plane: Option<Plane>,
    bounds: Bounds,
    source: Option<PlateIndex>,
}

impl Triangle {
    /// Creates a triangle from three vertices.
    pub fn new(a: DVec3, b: DVec3, c: DVec3) -> Self {
        Self {
            vertices: [a, b, c],
            plane: Plane::from_points(a, b, c),
            bounds: Bounds::from_points(&[a, b, c]),
            source: None,
        }
    }

    /// Returns the triangle tagged with the plate it was sampled from.
    pub fn with_source(mut self, source: PlateIndex) -> Self {
        self.source = Some(source);
        self
    }

    /// Returns the three vertices.
    #[inline]
    pub fn vertices(&self) -> &[DVec3; 3] {
        &self.vertices
    }

    /// Returns the supporting plane, or `None` for degenerate triangles.
    #[inline]
    pub fn plane(&self) -> Option<&Plane> {
        self.plane.as_ref()
    }

    /// Returns the tight bounding box.
    #[inline]
    pub fn bounds(&self) -> &Bounds {
        &self.bounds
    }

    /// Returns the plate this triangle was sampled from, if any.
    #[inline]
    pub fn source(&self) -> Option<PlateIndex> {
        self.source
    }

    /// Returns true if the triangle has no well-defined plane.
    #[inline]
    pub fn is_degenerate(&self) -> bool {
        self.plane.is_none()
    }

    /// Returns the triangle's area.
    pub fn area(&self) -> f64 {
        let [a, b, c] = self.vertices;
        0.5 * (b - a).cross(c - a).length()
    }

    /// Returns the centroid.
    pub fn centroid(&self) -> DVec3 {
        let [a, b, c] = self.vertices;
        (a + b + c) / 3.0
    }
}
