//! # Tests for Config Constants
//!
//! Unit tests verifying the relationships between the tolerance and sampling
//! constants.

use crate::constants::*;

// =============================================================================
// PRECISION TESTS
// =============================================================================

#[test]
fn test_default_tolerance_is_positive() {
    assert!(DEFAULT_TOLERANCE > 0.0, "DEFAULT_TOLERANCE must be positive");
}

#[test]
fn test_parallel_epsilon_is_stricter_than_tolerance() {
    // Parallel detection works on unit normals, not distances
    assert!(PARALLEL_EPSILON < DEFAULT_TOLERANCE);
}

#[test]
fn test_degenerate_epsilon_is_tiny() {
    assert!(DEGENERATE_AREA_EPSILON < PARALLEL_EPSILON);
}

#[test]
fn test_tolerance_for_extent_scales_linearly() {
    let small = tolerance_for_extent(10.0);
    let large = tolerance_for_extent(100.0);
    assert!((large / small - 10.0).abs() < 1e-9);
}

#[test]
fn test_tolerance_for_extent_rejects_invalid_extent() {
    assert_eq!(tolerance_for_extent(-5.0), DEFAULT_TOLERANCE);
    assert_eq!(tolerance_for_extent(f64::INFINITY), DEFAULT_TOLERANCE);
}

// =============================================================================
// SAMPLING TESTS
// =============================================================================

#[test]
fn test_default_divisions_within_limits() {
    assert!(DEFAULT_DIVISIONS >= 1);
    assert!(DEFAULT_DIVISIONS <= MAX_DIVISIONS);
}

#[test]
fn test_max_divisions_triangle_count_fits_usize() {
    let max = MAX_DIVISIONS as usize;
    assert!(2 * max * max < usize::MAX / 2);
}

#[test]
fn test_closest_parameter_search_is_bounded() {
    assert!(CLOSEST_PARAMETER_GRID >= 2);
    assert!(CLOSEST_PARAMETER_ITERATIONS >= 1);
    assert!(FINITE_DIFFERENCE_STEP < 1e-3);
}
