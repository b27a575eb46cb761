//! # Triangle-Triangle Intersection
//!
//! Computes the segment along which two triangles cross, with a distance
//! tolerance for near-touching and near-coplanar configurations.
//!
//! ## Algorithm
//!
//! 1. Classify each triangle's vertices against the other's plane
//!    (front / back / on, with `tolerance` as the "on" band)
//! 2. Reject when either triangle lies strictly on one side
//! 3. Intersect the two planes into a line with a canonical direction
//! 4. Clip the line against each triangle into a parameter interval
//! 5. Overlap the two intervals
//!
//! ## Outcomes
//!
//! | Configuration | Outcome |
//! |---------------|---------|
//! | Zero-area triangle | `Skipped(Degenerate)` |
//! | All vertices of one triangle on the other's plane | `Skipped(Coplanar)` |
//! | One triangle strictly on one side, or boxes apart | `Disjoint` |
//! | Planes within `PARALLEL_EPSILON` of parallel | `Skipped(Parallel)` |
//! | Intervals meet in a single point | `Skipped(PointContact)` |
//! | Intervals overlap by more than `tolerance` | `Segment` |

use ::config::constants::PARALLEL_EPSILON;
use glam::DVec3;
use serde::{Deserialize, Serialize};

use crate::filter::boxes_may_touch;
use crate::geometry::{Plane, Side, Triangle};

/// Why a triangle pair produced no usable segment despite not being
/// separated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SkipReason {
    /// One of the triangles has no area.
    Degenerate,
    /// One triangle lies in the other's plane.
    Coplanar,
    /// The planes are too close to parallel for a stable line.
    Parallel,
    /// The triangles touch in a single point (zero-length segment).
    PointContact,
}

/// Result of intersecting two triangles.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TriTriOutcome {
    /// The triangles cross along this segment.
    Segment {
        /// Endpoint with the smaller line parameter.
        start: DVec3,
        /// Endpoint with the larger line parameter.
        end: DVec3,
    },
    /// The triangles do not intersect.
    Disjoint,
    /// The pair is degenerate and yields no usable segment.
    Skipped(SkipReason),
}

impl TriTriOutcome {
    /// Returns the segment endpoints, if any.
    pub fn segment(&self) -> Option<(DVec3, DVec3)> {
        match *self {
            TriTriOutcome::Segment { start, end } => Some((start, end)),
            _ => None,
        }
    }
}

/// An intersection segment and the triangles it came from.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IntersectionSegment {
    /// First endpoint.
    pub start: DVec3,
    /// Second endpoint.
    pub end: DVec3,
    /// Index of the source triangle in the first set.
    pub triangle_a: usize,
    /// Index of the source triangle in the second set.
    pub triangle_b: usize,
}

impl IntersectionSegment {
    /// Length of the segment.
    pub fn length(&self) -> f64 {
        self.start.distance(self.end)
    }
}

/// Signed distances and sides of a triangle's vertices against a plane.
struct Classified {
    distances: [f64; 3],
    sides: [Side; 3],
}

impl Classified {
    fn new(triangle: &Triangle, plane: &Plane, tolerance: f64) -> Self {
        let distances = triangle.vertices().map(|v| plane.signed_distance(v));
        let sides = distances.map(|d| Side::of_distance(d, tolerance));
        Self { distances, sides }
    }

    fn all_on(&self) -> bool {
        self.sides.iter().all(|s| *s == Side::On)
    }

    fn strictly_one_side(&self) -> bool {
        self.sides.iter().all(|s| *s == Side::Front) || self.sides.iter().all(|s| *s == Side::Back)
    }
}

/// The intersection line of two planes.
struct Line {
    origin: DVec3,
    direction: DVec3,
}

impl Line {
    /// Builds the line with a direction whose largest component is positive,
    /// so both argument orders give the same line.
    fn between(a: &Plane, b: &Plane) -> Option<Self> {
        let cross = a.normal().cross(b.normal());
        let length_sq = cross.length_squared();
        if length_sq.sqrt() < PARALLEL_EPSILON {
            return None;
        }

        // h_a (n_b × d) + h_b (d × n_a), over |d|²; unchanged when a and b swap
        let origin = (b.normal().cross(cross) * a.offset() + cross.cross(a.normal()) * b.offset())
            / length_sq;

        let abs = cross.abs();
        let dominant = if abs.x >= abs.y && abs.x >= abs.z {
            cross.x
        } else if abs.y >= abs.z {
            cross.y
        } else {
            cross.z
        };
        let oriented = if dominant < 0.0 { -cross } else { cross };
        let direction = oriented / length_sq.sqrt();

        Some(Self { origin, direction })
    }

    #[inline]
    fn parameter(&self, point: DVec3) -> f64 {
        self.direction.dot(point - self.origin)
    }

    #[inline]
    fn point(&self, t: f64) -> DVec3 {
        self.origin + self.direction * t
    }
}

/// Parameter interval where `triangle` meets the other plane along `line`.
fn clip_interval(triangle: &Triangle, classified: &Classified, line: &Line) -> (f64, f64) {
    let vertices = triangle.vertices();
    let mut lo = f64::INFINITY;
    let mut hi = f64::NEG_INFINITY;
    let mut include = |point: DVec3| {
        let t = line.parameter(point);
        lo = lo.min(t);
        hi = hi.max(t);
    };

    for i in 0..3 {
        let j = (i + 1) % 3;
        let (si, sj) = (classified.sides[i], classified.sides[j]);
        if si == Side::On {
            include(vertices[i]);
        }
        let crosses = matches!(
            (si, sj),
            (Side::Front, Side::Back) | (Side::Back, Side::Front)
        );
        if crosses {
            let (di, dj) = (classified.distances[i], classified.distances[j]);
            let s = di / (di - dj);
            include(vertices[i] + (vertices[j] - vertices[i]) * s);
        }
    }
    (lo, hi)
}

/// Intersects two triangles under a distance tolerance.
///
/// Symmetric: swapping the arguments yields the same outcome with the same
/// endpoints.
///
/// # Example
///
/// ```rust
/// use surface_intersect::intersect::{intersect_triangles, TriTriOutcome};
/// use surface_intersect::geometry::Triangle;
/// use glam::DVec3;
///
/// let floor = Triangle::new(
///     DVec3::new(-1.0, -1.0, 0.0),
///     DVec3::new(3.0, -1.0, 0.0),
///     DVec3::new(-1.0, 3.0, 0.0),
/// );
/// let wall = Triangle::new(
///     DVec3::new(0.0, 0.0, -1.0),
///     DVec3::new(0.0, 0.0, 1.0),
///     DVec3::new(0.0, 1.0, 0.0),
/// );
/// let (start, end) = intersect_triangles(&floor, &wall, 1e-9).segment().unwrap();
/// assert!(start.abs_diff_eq(DVec3::ZERO, 1e-12));
/// assert!(end.abs_diff_eq(DVec3::new(0.0, 1.0, 0.0), 1e-12));
/// ```
pub fn intersect_triangles(a: &Triangle, b: &Triangle, tolerance: f64) -> TriTriOutcome {
    let (Some(plane_a), Some(plane_b)) = (a.plane(), b.plane()) else {
        return TriTriOutcome::Skipped(SkipReason::Degenerate);
    };

    let a_vs_b = Classified::new(a, plane_b, tolerance);
    let b_vs_a = Classified::new(b, plane_a, tolerance);

    if a_vs_b.all_on() || b_vs_a.all_on() {
        return TriTriOutcome::Skipped(SkipReason::Coplanar);
    }
    if a_vs_b.strictly_one_side() || b_vs_a.strictly_one_side() {
        return TriTriOutcome::Disjoint;
    }
    // Same test the spatial filter applies, so filtering never changes results
    if !boxes_may_touch(a, b, tolerance) {
        return TriTriOutcome::Disjoint;
    }

    let Some(line) = Line::between(plane_a, plane_b) else {
        return TriTriOutcome::Skipped(SkipReason::Parallel);
    };

    let (lo_a, hi_a) = clip_interval(a, &a_vs_b, &line);
    let (lo_b, hi_b) = clip_interval(b, &b_vs_a, &line);
    let lo = lo_a.max(lo_b);
    let hi = hi_a.min(hi_b);

    if lo - hi > tolerance {
        return TriTriOutcome::Disjoint;
    }
    if hi - lo <= tolerance {
        return TriTriOutcome::Skipped(SkipReason::PointContact);
    }

    TriTriOutcome::Segment {
        start: line.point(lo),
        end: line.point(hi),
    }
}
