//! # Spatial Filter
//!
//! Narrows the M×K triangle-pair cross product down to the pairs that can
//! plausibly intersect.
//!
//! ## Guarantee
//!
//! Every mode is a pure filter with no false negatives: a pair is dropped
//! only when the tolerance-expanded boxes of its triangles are disjoint, and
//! [`intersect_triangles`](crate::intersect::intersect_triangles) reports
//! exactly such pairs as disjoint. Pipelines run with different modes
//! therefore produce identical segments.

mod spatial_index;

pub use spatial_index::SpatialIndex;

use serde::{Deserialize, Serialize};

use crate::geometry::{Bounds, Triangle};

/// Candidate pair selection strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum FilterMode {
    /// Full cross product; the reference for correctness checks.
    BruteForce,
    /// Pairwise expanded bounding-box test over the cross product.
    BoundingBox,
    /// Hash grid over the second set, queried with each triangle of the
    /// first, confirmed with the bounding-box test.
    #[default]
    SpatialHash,
}

/// Indices of one triangle from each set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CandidatePair {
    /// Index into the first triangle set.
    pub a: usize,
    /// Index into the second triangle set.
    pub b: usize,
}

/// Expanded boxes of two triangles overlap.
///
/// Each box grows by `tolerance`, so triangles up to twice the tolerance
/// apart still pass.
#[inline]
pub fn boxes_may_touch(a: &Triangle, b: &Triangle, tolerance: f64) -> bool {
    a.bounds()
        .expanded(tolerance)
        .overlaps(&b.bounds().expanded(tolerance))
}

fn set_bounds(triangles: &[Triangle]) -> Bounds {
    triangles
        .iter()
        .fold(Bounds::EMPTY, |acc, t| acc.union(t.bounds()))
}

/// Returns the candidate pairs of `a × b` worth an exact intersection test.
///
/// The result is sorted by `(a, b)` and contains no duplicates.
///
/// # Example
///
/// ```rust
/// use surface_intersect::filter::{candidate_pairs, FilterMode};
/// use surface_intersect::geometry::Triangle;
/// use glam::DVec3;
///
/// let a = vec![Triangle::new(DVec3::ZERO, DVec3::X, DVec3::Y)];
/// let far = DVec3::splat(10.0);
/// let b = vec![Triangle::new(far, far + DVec3::X, far + DVec3::Y)];
///
/// assert_eq!(candidate_pairs(&a, &b, 1e-6, FilterMode::BruteForce).len(), 1);
/// assert!(candidate_pairs(&a, &b, 1e-6, FilterMode::SpatialHash).is_empty());
/// ```
pub fn candidate_pairs(
    a: &[Triangle],
    b: &[Triangle],
    tolerance: f64,
    mode: FilterMode,
) -> Vec<CandidatePair> {
    if a.is_empty() || b.is_empty() {
        return Vec::new();
    }

    if mode == FilterMode::BruteForce {
        return (0..a.len())
            .flat_map(|ia| (0..b.len()).map(move |ib| CandidatePair { a: ia, b: ib }))
            .collect();
    }

    // Whole-set rejection before any per-triangle work
    let bounds_a = set_bounds(a).expanded(tolerance);
    let bounds_b = set_bounds(b).expanded(tolerance);
    if !bounds_a.overlaps(&bounds_b) {
        log::debug!("triangle sets are disjoint, no candidate pairs");
        return Vec::new();
    }

    let pairs: Vec<CandidatePair> = match mode {
        FilterMode::BoundingBox => a
            .iter()
            .enumerate()
            .flat_map(|(ia, ta)| {
                b.iter()
                    .enumerate()
                    .filter(move |(_, tb)| boxes_may_touch(ta, tb, tolerance))
                    .map(move |(ib, _)| CandidatePair { a: ia, b: ib })
            })
            .collect(),
        _ => {
            let index = SpatialIndex::new(b, tolerance);
            log::trace!(
                "spatial index: {} cells of size {:.3e}, {:.1} triangles per cell",
                index.cell_count(),
                index.cell_size(),
                index.avg_triangles_per_cell()
            );
            a.iter()
                .enumerate()
                .flat_map(|(ia, ta)| {
                    index
                        .query_box(&ta.bounds().expanded(tolerance))
                        .into_iter()
                        .map(move |ib| CandidatePair { a: ia, b: ib })
                })
                .collect()
        }
    };

    log::debug!(
        "{:?} filter kept {} of {} pairs",
        mode,
        pairs.len(),
        a.len() * b.len()
    );
    pairs
}

#[cfg(test)]
mod tests;
