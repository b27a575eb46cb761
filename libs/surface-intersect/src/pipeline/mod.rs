//! # Intersection Pipeline
//!
//! Composes the stages into one call:
//!
//! ```text
//! sample A, sample B → candidate pairs → tri-tri tests → stitch
//! ```
//!
//! Every stage is pure over immutable input. With
//! [`PipelineConfig::parallel`] set, candidate pairs are tested on the rayon
//! pool and collected back in candidate order, so serial and parallel runs
//! produce identical results.

use std::time::{Duration, Instant};

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::config::PipelineConfig;
use crate::error::{IntersectError, IntersectResult};
use crate::filter::{candidate_pairs, CandidatePair};
use crate::geometry::Triangle;
use crate::intersect::{intersect_triangles, IntersectionSegment, SkipReason, TriTriOutcome};
use crate::sampler::sample_surface;
use crate::stitch::{stitch_segments, Polyline};
use crate::surface::Surface;

// =============================================================================
// RESULT TYPES
// =============================================================================

/// Counters collected during one pipeline run.
///
/// Observational only; nothing in the pipeline branches on them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Diagnostics {
    /// Triangles sampled from (or given for) the first surface.
    pub triangles_a: usize,
    /// Triangles sampled from (or given for) the second surface.
    pub triangles_b: usize,
    /// Pairs kept by the spatial filter.
    pub candidate_pairs: usize,
    /// Pairs run through the triangle-triangle test.
    pub pairs_tested: usize,
    /// Segments produced.
    pub segment_count: usize,
    /// Tested pairs found not to intersect.
    pub disjoint_pairs: usize,
    /// Pairs skipped because a triangle had no area.
    pub skipped_degenerate: usize,
    /// Pairs skipped as coplanar.
    pub skipped_coplanar: usize,
    /// Pairs skipped as near-parallel.
    pub skipped_parallel: usize,
    /// Pairs skipped for touching in a single point.
    pub skipped_point_contact: usize,
    /// Connected groups that produced polylines.
    pub group_count: usize,
    /// Groups discarded for having fewer than two edges.
    pub discarded_groups: usize,
    /// Wall time of the run.
    pub elapsed: Duration,
}

impl Diagnostics {
    /// Total skipped pairs over all reasons.
    pub fn skipped(&self) -> usize {
        self.skipped_degenerate
            + self.skipped_coplanar
            + self.skipped_parallel
            + self.skipped_point_contact
    }

    /// Skip count for one reason.
    pub fn skipped_for(&self, reason: SkipReason) -> usize {
        match reason {
            SkipReason::Degenerate => self.skipped_degenerate,
            SkipReason::Coplanar => self.skipped_coplanar,
            SkipReason::Parallel => self.skipped_parallel,
            SkipReason::PointContact => self.skipped_point_contact,
        }
    }

    fn record(&mut self, outcome: &TriTriOutcome) {
        self.pairs_tested += 1;
        match outcome {
            TriTriOutcome::Segment { .. } => self.segment_count += 1,
            TriTriOutcome::Disjoint => self.disjoint_pairs += 1,
            TriTriOutcome::Skipped(SkipReason::Degenerate) => self.skipped_degenerate += 1,
            TriTriOutcome::Skipped(SkipReason::Coplanar) => self.skipped_coplanar += 1,
            TriTriOutcome::Skipped(SkipReason::Parallel) => self.skipped_parallel += 1,
            TriTriOutcome::Skipped(SkipReason::PointContact) => self.skipped_point_contact += 1,
        }
    }
}

/// Intersection curves between two surfaces.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SurfaceIntersection {
    /// Stitched polylines, one or more per connected curve.
    pub polylines: Vec<Polyline>,
    /// Raw segments in candidate-pair order.
    pub segments: Vec<IntersectionSegment>,
    /// Run counters.
    pub diagnostics: Diagnostics,
}

impl SurfaceIntersection {
    /// True when the surfaces produced no curves.
    pub fn is_empty(&self) -> bool {
        self.polylines.is_empty()
    }

    /// Number of connected curves.
    pub fn curve_count(&self) -> usize {
        self.diagnostics.group_count
    }
}

// =============================================================================
// PIPELINE
// =============================================================================

/// Computes the intersection curves of two parametric surfaces.
///
/// Both surfaces are sampled with `config.divisions`. Finding no
/// intersection is not an error and yields an empty result.
///
/// # Errors
///
/// Returns an error when `config` holds an invalid tolerance or division
/// count.
///
/// # Example
///
/// ```rust
/// use surface_intersect::{intersect_surfaces, PipelineConfig, PlaneSurface};
/// use glam::DVec3;
///
/// let floor = PlaneSurface::new(DVec3::ZERO, DVec3::X, DVec3::Y);
/// let wall = PlaneSurface::new(DVec3::new(0.3, -0.5, -0.5), DVec3::Y * 2.0, DVec3::Z);
///
/// let config = PipelineConfig::new(1e-6, 4).unwrap();
/// let result = intersect_surfaces(&floor, &wall, &config).unwrap();
/// assert_eq!(result.curve_count(), 1);
/// ```
pub fn intersect_surfaces<A, B>(
    a: &A,
    b: &B,
    config: &PipelineConfig,
) -> IntersectResult<SurfaceIntersection>
where
    A: Surface + ?Sized,
    B: Surface + ?Sized,
{
    let start = Instant::now();
    config.validate()?;

    let mesh_a = sample_surface(a, config.divisions)?;
    let mesh_b = sample_surface(b, config.divisions)?;

    let mut result = intersect_triangle_sets(mesh_a.triangles(), mesh_b.triangles(), config)?;
    result.diagnostics.elapsed = start.elapsed();
    Ok(result)
}

/// Intersects two triangle sets and stitches the segments.
///
/// `config.divisions` is ignored; the sets are used as given.
///
/// # Errors
///
/// Returns [`IntersectError::InvalidTolerance`] when `config.tolerance` is
/// not a positive finite number.
pub fn intersect_triangle_sets(
    a: &[Triangle],
    b: &[Triangle],
    config: &PipelineConfig,
) -> IntersectResult<SurfaceIntersection> {
    let start = Instant::now();
    let tolerance = config.tolerance;
    if !tolerance.is_finite() || tolerance <= 0.0 {
        return Err(IntersectError::InvalidTolerance(tolerance));
    }

    let mut diagnostics = Diagnostics {
        triangles_a: a.len(),
        triangles_b: b.len(),
        ..Default::default()
    };

    let pairs = candidate_pairs(a, b, tolerance, config.filter);
    diagnostics.candidate_pairs = pairs.len();

    let test = |pair: &CandidatePair| intersect_triangles(&a[pair.a], &b[pair.b], tolerance);
    let outcomes: Vec<TriTriOutcome> = if config.parallel {
        pairs.par_iter().map(test).collect()
    } else {
        pairs.iter().map(test).collect()
    };

    let mut segments = Vec::new();
    for (pair, outcome) in pairs.iter().zip(&outcomes) {
        diagnostics.record(outcome);
        if let Some((start, end)) = outcome.segment() {
            segments.push(IntersectionSegment {
                start,
                end,
                triangle_a: pair.a,
                triangle_b: pair.b,
            });
        }
    }
    log::debug!(
        "tested {} pairs: {} segments, {} disjoint, {} skipped",
        diagnostics.pairs_tested,
        diagnostics.segment_count,
        diagnostics.disjoint_pairs,
        diagnostics.skipped()
    );

    let stitched = stitch_segments(&segments, tolerance);
    diagnostics.group_count = stitched.group_count;
    diagnostics.discarded_groups = stitched.discarded_groups;
    diagnostics.elapsed = start.elapsed();

    log::debug!(
        "intersection finished: {} polylines in {:?}",
        stitched.polylines.len(),
        diagnostics.elapsed
    );

    Ok(SurfaceIntersection {
        polylines: stitched.polylines,
        segments,
        diagnostics,
    })
}
