//! Tests for candidate pair filtering.

use super::*;
use crate::sampler::sample_surface;
use crate::surface::{ParametricFn, PlaneSurface};
use glam::DVec3;

const TOLERANCE: f64 = 1e-6;

fn horizontal(divisions: u32) -> Vec<Triangle> {
    let plane = PlaneSurface::new(DVec3::ZERO, DVec3::X, DVec3::Y);
    sample_surface(&plane, divisions).unwrap().into_triangles()
}

fn wavy(divisions: u32) -> Vec<Triangle> {
    let surface = ParametricFn::new(|u, v| {
        DVec3::new(u, v, 0.2 * (u * 6.0).sin() * (v * 5.0).cos())
    });
    sample_surface(&surface, divisions).unwrap().into_triangles()
}

#[test]
fn brute_force_returns_full_cross_product() {
    let a = horizontal(2);
    let b = horizontal(3);
    let pairs = candidate_pairs(&a, &b, TOLERANCE, FilterMode::BruteForce);
    assert_eq!(pairs.len(), a.len() * b.len());
    assert!(pairs.windows(2).all(|w| w[0] < w[1]));
}

#[test]
fn empty_sets_have_no_pairs() {
    let a = horizontal(2);
    for mode in [FilterMode::BruteForce, FilterMode::BoundingBox, FilterMode::SpatialHash] {
        assert!(candidate_pairs(&a, &[], TOLERANCE, mode).is_empty());
        assert!(candidate_pairs(&[], &a, TOLERANCE, mode).is_empty());
    }
}

#[test]
fn disjoint_surfaces_yield_no_candidates() {
    let a = horizontal(4);
    let lifted = PlaneSurface::new(DVec3::new(5.0, 5.0, 5.0), DVec3::X, DVec3::Z);
    let b = sample_surface(&lifted, 4).unwrap().into_triangles();
    assert!(candidate_pairs(&a, &b, TOLERANCE, FilterMode::BoundingBox).is_empty());
    assert!(candidate_pairs(&a, &b, TOLERANCE, FilterMode::SpatialHash).is_empty());
}

#[test]
fn spatial_hash_matches_bounding_box_filter() {
    let a = wavy(12);
    let vertical = PlaneSurface::new(
        DVec3::new(0.37, -0.2, -0.5),
        DVec3::new(0.1, 1.4, 0.0),
        DVec3::Z,
    );
    let b = sample_surface(&vertical, 9).unwrap().into_triangles();

    let boxed = candidate_pairs(&a, &b, TOLERANCE, FilterMode::BoundingBox);
    let hashed = candidate_pairs(&a, &b, TOLERANCE, FilterMode::SpatialHash);
    assert!(!boxed.is_empty());
    assert_eq!(boxed, hashed);
    assert!(boxed.len() < a.len() * b.len());
}

#[test]
fn filtered_pairs_are_a_subset_of_brute_force() {
    let a = wavy(6);
    let b = horizontal(5);
    let all = candidate_pairs(&a, &b, TOLERANCE, FilterMode::BruteForce);
    let kept = candidate_pairs(&a, &b, TOLERANCE, FilterMode::SpatialHash);
    assert!(kept.iter().all(|p| all.binary_search(p).is_ok()));
}

#[test]
fn rejected_pairs_have_disjoint_expanded_boxes() {
    let a = wavy(6);
    let b = horizontal(5);
    let kept = candidate_pairs(&a, &b, TOLERANCE, FilterMode::SpatialHash);
    for ia in 0..a.len() {
        for ib in 0..b.len() {
            let pair = CandidatePair { a: ia, b: ib };
            let touching = boxes_may_touch(&a[ia], &b[ib], TOLERANCE);
            assert_eq!(kept.binary_search(&pair).is_ok(), touching);
        }
    }
}

#[test]
fn tolerance_slack_keeps_near_misses() {
    let a = vec![Triangle::new(DVec3::ZERO, DVec3::X, DVec3::Y)];
    let gap = DVec3::new(0.0, 0.0, 1.5e-6);
    let b = vec![Triangle::new(gap, gap + DVec3::X, gap + DVec3::Y + DVec3::Z)];
    assert_eq!(candidate_pairs(&a, &b, TOLERANCE, FilterMode::SpatialHash).len(), 1);
    assert!(candidate_pairs(&a, &b, 1e-7, FilterMode::SpatialHash).is_empty());
}

#[test]
fn huge_triangles_keep_their_candidates() {
    // Spans far beyond the hash grid's cell range around a tiny triangle
    let huge = vec![Triangle::new(
        DVec3::new(-1e16, -1e16, 0.0),
        DVec3::new(1e16, -1e16, 0.0),
        DVec3::new(0.0, 1e16, 0.0),
    )];
    let tiny = vec![Triangle::new(
        DVec3::new(0.0, 0.0, -1e-4),
        DVec3::new(1e-4, 0.0, 1e-4),
        DVec3::new(0.0, 1e-4, 1e-4),
    )];

    for (a, b) in [(&huge, &tiny), (&tiny, &huge)] {
        let brute = candidate_pairs(a, b, TOLERANCE, FilterMode::BruteForce);
        assert_eq!(brute.len(), 1);
        for mode in [FilterMode::BoundingBox, FilterMode::SpatialHash] {
            assert_eq!(candidate_pairs(a, b, TOLERANCE, mode), brute, "{mode:?}");
        }
    }
}
