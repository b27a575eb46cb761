//! # Axis-Aligned Bounds
//!
//! Bounding boxes used for cheap rejection in the spatial filter and the
//! triangle intersector.

use glam::DVec3;
use serde::{Deserialize, Serialize};

/// Axis-aligned bounding box.
///
/// An empty box has `min > max` on every axis and overlaps nothing.
///
/// # Example
///
/// ```rust
/// use surface_intersect::geometry::Bounds;
/// use glam::DVec3;
///
/// let a = Bounds::from_points(&[DVec3::ZERO, DVec3::ONE]);
/// let b = Bounds::from_points(&[DVec3::splat(1.5), DVec3::splat(2.0)]);
/// assert!(!a.overlaps(&b));
/// assert!(a.expanded(0.25).overlaps(&b.expanded(0.25)));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    /// Minimum corner.
    pub min: DVec3,
    /// Maximum corner.
    pub max: DVec3,
}

impl Bounds {
    /// A box containing nothing.
    pub const EMPTY: Bounds = Bounds {
        min: DVec3::splat(f64::INFINITY),
        max: DVec3::splat(f64::NEG_INFINITY),
    };

    /// Creates the tightest box around the given points.
    pub fn from_points(points: &[DVec3]) -> Self {
        points
            .iter()
            .fold(Self::EMPTY, |bounds, &p| bounds.including(p))
    }

    /// Returns true if the box contains no point.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.min.x > self.max.x || self.min.y > self.max.y || self.min.z > self.max.z
    }

    /// Returns the box grown to contain `point`.
    #[inline]
    pub fn including(&self, point: DVec3) -> Self {
        Self {
            min: self.min.min(point),
            max: self.max.max(point),
        }
    }

    /// Returns the smallest box containing both boxes.
    pub fn union(&self, other: &Bounds) -> Self {
        Self {
            min: self.min.min(other.min),
            max: self.max.max(other.max),
        }
    }

    /// Returns the box grown by `margin` on every side.
    #[inline]
    pub fn expanded(&self, margin: f64) -> Self {
        if self.is_empty() {
            return *self;
        }
        Self {
            min: self.min - DVec3::splat(margin),
            max: self.max + DVec3::splat(margin),
        }
    }

    /// Returns true if the two boxes share at least one point.
    ///
    /// Touching boxes overlap.
    #[inline]
    pub fn overlaps(&self, other: &Bounds) -> bool {
        self.min.x <= other.max.x
            && other.min.x <= self.max.x
            && self.min.y <= other.max.y
            && other.min.y <= self.max.y
            && self.min.z <= other.max.z
            && other.min.z <= self.max.z
    }

    /// Size of the box along each axis (zero for empty boxes).
    pub fn extent(&self) -> DVec3 {
        if self.is_empty() {
            DVec3::ZERO
        } else {
            self.max - self.min
        }
    }

    /// Length of the box diagonal, the natural scene scale for tolerances.
    pub fn diagonal(&self) -> f64 {
        self.extent().length()
    }
}

impl Default for Bounds {
    fn default() -> Self {
        Self::EMPTY
    }
}
