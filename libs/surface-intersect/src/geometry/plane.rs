//! # Supporting Planes
//!
//! Plane representation with tolerance-based point classification.

use ::config::constants::DEGENERATE_AREA_EPSILON;
use glam::DVec3;

// =============================================================================
// CLASSIFICATION
// =============================================================================

/// Classification of a point relative to a plane.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    /// Point is in front of the plane (positive side), beyond tolerance.
    Front,
    /// Point is behind the plane (negative side), beyond tolerance.
    Back,
    /// Point is within tolerance of the plane.
    On,
}

impl Side {
    /// Classifies a signed distance.
    #[inline]
    pub fn of_distance(distance: f64, tolerance: f64) -> Self {
        if distance > tolerance {
            Side::Front
        } else if distance < -tolerance {
            Side::Back
        } else {
            Side::On
        }
    }
}

// =============================================================================
// PLANE
// =============================================================================

/// A plane in 3D space: `normal · x = offset` with a unit normal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Plane {
    normal: DVec3,
    offset: f64,
}

impl Plane {
    /// Create plane from a unit normal and its distance from the origin.
    pub fn new(normal: DVec3, offset: f64) -> Self {
        Self { normal, offset }
    }

    /// Create plane from three points.
    ///
    /// Points in counter-clockwise order (viewed from the front) give a normal
    /// pointing to the viewer. Returns `None` for degenerate (collinear or
    /// coincident) points.
    pub fn from_points(a: DVec3, b: DVec3, c: DVec3) -> Option<Self> {
        let cross = (b - a).cross(c - a);
        let length = cross.length();
        if !(length > DEGENERATE_AREA_EPSILON) {
            return None;
        }
        let normal = cross / length;
        Some(Self {
            normal,
            offset: normal.dot(a),
        })
    }

    /// Get the unit normal.
    #[inline]
    pub fn normal(&self) -> DVec3 {
        self.normal
    }

    /// Get the distance from the origin along the normal.
    #[inline]
    pub fn offset(&self) -> f64 {
        self.offset
    }

    /// Signed distance from point to plane.
    ///
    /// Positive = front, negative = back, zero = on plane.
    #[inline]
    pub fn signed_distance(&self, point: DVec3) -> f64 {
        self.normal.dot(point) - self.offset
    }

    /// Classify a point relative to this plane.
    pub fn classify_point(&self, point: DVec3, tolerance: f64) -> Side {
        Side::of_distance(self.signed_distance(point), tolerance)
    }
}

// =============================================================================
// TESTS
// =============================================================================
