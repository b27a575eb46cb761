use approx::assert_relative_eq;
use glam::DVec3;
use surface_intersect::export::{flatten_polylines, polylines_to_json};
use surface_intersect::{
    intersect_surfaces, sample_surface, IntersectError, NurbsSurface, ParametricFn,
    PipelineConfig, PlaneSurface, SkipReason,
};

fn floor() -> PlaneSurface {
    PlaneSurface::new(DVec3::ZERO, DVec3::X, DVec3::Y)
}

/// Vertical plane x = 0.5 spanning y in [-0.5, 1.5] and z in [-0.5, 0.5].
fn center_wall() -> PlaneSurface {
    PlaneSurface::new(DVec3::new(0.5, -0.5, -0.5), DVec3::Y * 2.0, DVec3::Z)
}

#[test]
fn crossing_planes_give_one_straight_chain() {
    let config = PipelineConfig::new(1e-6, 4).unwrap();
    let result = intersect_surfaces(&floor(), &center_wall(), &config).unwrap();

    assert_eq!(result.curve_count(), 1);
    assert_eq!(result.polylines.len(), 1);
    let chain = &result.polylines[0];
    assert!(!chain.closed);
    assert_eq!(chain.len(), 5);

    for (i, point) in chain.points.iter().enumerate() {
        assert_relative_eq!(point.x, 0.5, epsilon = 1e-9);
        assert_relative_eq!(point.y, i as f64 * 0.25, epsilon = 1e-9);
        assert_relative_eq!(point.z, 0.0, epsilon = 1e-9);
    }
    assert_relative_eq!(chain.length(), 1.0, epsilon = 1e-9);

    // Grid edges lie on both planes, so neighbors report the same segments
    assert!(result.segments.len() > chain.segment_count());
    assert!(result.diagnostics.skipped_for(SkipReason::PointContact) > 0);
}

#[test]
fn disjoint_surfaces_give_no_curves() {
    let far = PlaneSurface::new(DVec3::new(10.0, 10.0, 10.0), DVec3::X, DVec3::Z);
    let result = intersect_surfaces(&floor(), &far, &PipelineConfig::default()).unwrap();

    assert!(result.is_empty());
    assert!(result.segments.is_empty());
    assert_eq!(result.diagnostics.candidate_pairs, 0);
    assert_eq!(result.diagnostics.pairs_tested, 0);
}

#[test]
fn identical_planes_are_all_skips() {
    let config = PipelineConfig::new(1e-6, 3).unwrap();
    let result = intersect_surfaces(&floor(), &floor(), &config).unwrap();

    assert!(result.is_empty());
    assert!(result.segments.is_empty());
    assert_eq!(
        result.diagnostics.skipped_coplanar,
        result.diagnostics.pairs_tested
    );
}

#[test]
fn invalid_divisions_are_rejected() {
    assert!(matches!(
        PipelineConfig::new(1e-6, 0),
        Err(IntersectError::Config(_))
    ));
    assert!(matches!(
        sample_surface(&floor(), 0),
        Err(IntersectError::InvalidDivisions(0))
    ));

    let mut config = PipelineConfig::default();
    config.divisions = 0;
    let err = intersect_surfaces(&floor(), &center_wall(), &config).unwrap_err();
    assert!(matches!(err, IntersectError::Config(_)));
}

#[test]
fn bilinear_nurbs_matches_its_plane() {
    let patch = NurbsSurface::bilinear(
        DVec3::ZERO,
        DVec3::X,
        DVec3::Y,
        DVec3::new(1.0, 1.0, 0.0),
    );
    let config = PipelineConfig::new(1e-6, 4).unwrap();
    let from_plane = intersect_surfaces(&floor(), &center_wall(), &config).unwrap();
    let from_nurbs = intersect_surfaces(&patch, &center_wall(), &config).unwrap();

    assert_eq!(from_plane.polylines.len(), from_nurbs.polylines.len());
    for (a, b) in from_plane.polylines.iter().zip(&from_nurbs.polylines) {
        assert_eq!(a.len(), b.len());
        for (p, q) in a.points.iter().zip(&b.points) {
            assert!(p.abs_diff_eq(*q, 1e-9), "{p} vs {q}");
        }
    }
}

#[test]
fn cylinder_cut_by_a_slanted_plane_is_a_closed_loop() {
    // Full unit cylinder around z, cut by z = 0.47 + 0.2 x
    let cylinder = ParametricFn::new(|u, v| {
        let angle = u * std::f64::consts::TAU;
        DVec3::new(angle.cos(), angle.sin(), v)
    });
    let slant = PlaneSurface::new(
        DVec3::new(-2.1, -2.1, 0.05),
        DVec3::new(4.2, 0.0, 0.84),
        DVec3::new(0.0, 4.2, 0.0),
    );
    let config = PipelineConfig::new(1e-6, 24).unwrap();
    let result = intersect_surfaces(&cylinder, &slant, &config).unwrap();

    assert_eq!(result.curve_count(), 1);
    let ellipse = &result.polylines[0];
    assert!(ellipse.closed);
    for p in &ellipse.points {
        assert_relative_eq!(p.z, 0.47 + 0.2 * p.x, epsilon = 1e-9);
        // Chords of a 24-gon sit slightly inside the circle
        let r = p.truncate().length();
        assert!(r <= 1.0 + 1e-9 && r > 0.99, "radius {r}");
    }
}

#[test]
fn results_hand_off_to_curve_fitting() {
    let config = PipelineConfig::new(1e-6, 4).unwrap();
    let result = intersect_surfaces(&floor(), &center_wall(), &config).unwrap();

    let json = polylines_to_json(&result.polylines).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed.as_array().map(Vec::len), Some(1));

    let buffers = flatten_polylines(&result.polylines);
    assert_eq!(buffers.polyline_count(), 1);
    assert_eq!(buffers.point_count(), 5);
    assert_eq!(buffers.offsets, vec![0, 5]);
}
