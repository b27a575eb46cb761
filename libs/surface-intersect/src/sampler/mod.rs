//! # Surface Sampler
//!
//! Discretizes a parametric surface into a uniform grid of plates and splits
//! each plate into two triangles.
//!
//! ## Layout
//!
//! ```text
//! (u1,v2) c3 ─────── c2 (u2,v2)
//!          │      ╱  │
//!          │   ╱     │      half 0: [c0, c1, c2]
//!          │╱        │      half 1: [c0, c2, c3]
//! (u1,v1) c0 ─────── c1 (u2,v1)
//! ```
//!
//! Plates are emitted row-major with `u` as the outer index, so plate
//! `(i, j)` owns triangles `2 * (i * N + j)` and `2 * (i * N + j) + 1`.

use ::config::constants::{ConfigError, MAX_DIVISIONS};
use glam::DVec3;

use crate::error::{IntersectError, IntersectResult};
use crate::geometry::{Bounds, PlateIndex, Triangle};
use crate::surface::Surface;

/// A sampled quadrilateral patch: corners at `(u1,v1)`, `(u2,v1)`, `(u2,v2)`,
/// `(u1,v2)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Plate {
    /// Corner points in counter-clockwise parameter order.
    pub corners: [DVec3; 4],
    /// Grid cell of the plate.
    pub index: (u32, u32),
}

impl Plate {
    /// Splits the plate along its `c0`–`c2` diagonal.
    pub fn into_triangles(self) -> [Triangle; 2] {
        let [c0, c1, c2, c3] = self.corners;
        let (u, v) = self.index;
        [
            Triangle::new(c0, c1, c2).with_source(PlateIndex { u, v, half: 0 }),
            Triangle::new(c0, c2, c3).with_source(PlateIndex { u, v, half: 1 }),
        ]
    }
}

/// Triangles sampled from one surface.
#[derive(Debug, Clone, Default)]
pub struct TriangleMesh {
    triangles: Vec<Triangle>,
    bounds: Bounds,
    divisions: u32,
}

impl TriangleMesh {
    /// Wraps an arbitrary triangle list.
    pub fn from_triangles(triangles: Vec<Triangle>) -> Self {
        let bounds = triangles
            .iter()
            .fold(Bounds::EMPTY, |acc, t| acc.union(t.bounds()));
        Self {
            triangles,
            bounds,
            divisions: 0,
        }
    }

    /// Returns the triangles.
    #[inline]
    pub fn triangles(&self) -> &[Triangle] {
        &self.triangles
    }

    /// Returns the number of triangles.
    #[inline]
    pub fn len(&self) -> usize {
        self.triangles.len()
    }

    /// Returns true if the mesh has no triangles.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }

    /// Bounds of all triangles.
    pub fn bounds(&self) -> &Bounds {
        &self.bounds
    }

    /// Plate divisions per direction used to sample this mesh (0 when built
    /// from a plain triangle list).
    pub fn divisions(&self) -> u32 {
        self.divisions
    }

    /// Sum of triangle areas.
    pub fn area(&self) -> f64 {
        self.triangles.iter().map(Triangle::area).sum()
    }

    /// Consumes the mesh, returning its triangles.
    pub fn into_triangles(self) -> Vec<Triangle> {
        self.triangles
    }
}

/// Grid parameter of line `index` out of `divisions`.
///
/// The last line is exactly 1.0 and no value leaves `[0, 1]`.
#[inline]
fn grid_parameter(index: u32, divisions: u32) -> f64 {
    if index >= divisions {
        1.0
    } else {
        (f64::from(index) / f64::from(divisions)).clamp(0.0, 1.0)
    }
}

/// Samples `surface` on an `N×N` plate grid over `[0,1]×[0,1]`.
///
/// Produces exactly `2·N²` triangles. Grid points are evaluated once and
/// shared between neighboring plates, so adjacent triangles meet exactly.
///
/// # Errors
///
/// Returns [`IntersectError::InvalidDivisions`] when `divisions` is zero and
/// [`IntersectError::Config`] when it exceeds [`MAX_DIVISIONS`].
///
/// # Example
///
/// ```rust
/// use surface_intersect::{sample_surface, PlaneSurface};
/// use glam::DVec3;
///
/// let plane = PlaneSurface::new(DVec3::ZERO, DVec3::X, DVec3::Y);
/// let mesh = sample_surface(&plane, 4).unwrap();
/// assert_eq!(mesh.len(), 32);
/// assert!((mesh.area() - 1.0).abs() < 1e-12);
/// ```
pub fn sample_surface<S: Surface + ?Sized>(
    surface: &S,
    divisions: u32,
) -> IntersectResult<TriangleMesh> {
    if divisions == 0 {
        return Err(IntersectError::InvalidDivisions(divisions));
    }
    if divisions > MAX_DIVISIONS {
        return Err(ConfigError::TooManyDivisions {
            count: divisions,
            max: MAX_DIVISIONS,
        }
        .into());
    }

    let n = divisions as usize;
    let params: Vec<f64> = (0..=divisions)
        .map(|i| grid_parameter(i, divisions))
        .collect();

    // Grid nodes, u-major: node (i, j) at i * (n + 1) + j
    let mut nodes = Vec::with_capacity((n + 1) * (n + 1));
    for &u in &params {
        for &v in &params {
            nodes.push(surface.point_at(u, v));
        }
    }
    let node = |i: usize, j: usize| nodes[i * (n + 1) + j];

    let mut triangles = Vec::with_capacity(2 * n * n);
    let mut bounds = Bounds::EMPTY;
    for i in 0..n {
        for j in 0..n {
            let plate = Plate {
                corners: [node(i, j), node(i + 1, j), node(i + 1, j + 1), node(i, j + 1)],
                index: (i as u32, j as u32),
            };
            for tri in plate.into_triangles() {
                bounds = bounds.union(tri.bounds());
                triangles.push(tri);
            }
        }
    }

    log::debug!(
        "sampled {} plates into {} triangles",
        n * n,
        triangles.len()
    );

    Ok(TriangleMesh {
        triangles,
        bounds,
        divisions,
    })
}

#[cfg(test)]
mod tests;
