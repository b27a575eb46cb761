use glam::DVec3;
use surface_intersect::{
    intersect_surfaces, intersect_triangle_sets, sample_surface, FilterMode, ParametricFn,
    PipelineConfig, PlaneSurface, Surface,
};

fn saddle() -> impl Surface {
    ParametricFn::new(|u, v| DVec3::new(u, v, 0.4 * (u - 0.5) * (v - 0.5)))
}

fn ripple() -> impl Surface {
    ParametricFn::new(|u, v| {
        DVec3::new(
            u * 1.2 - 0.1,
            v * 1.2 - 0.1,
            0.05 * (u * 9.0).sin() + 0.03 * (v * 7.0).cos(),
        )
    })
}

fn slanted_wall() -> PlaneSurface {
    PlaneSurface::new(
        DVec3::new(0.13, -0.2, -0.4),
        DVec3::new(0.7, 1.4, 0.0),
        DVec3::new(0.0, 0.0, 0.8),
    )
}

#[test]
fn repeated_runs_are_identical() {
    let config = PipelineConfig::new(1e-6, 12).unwrap();
    let first = intersect_surfaces(&saddle(), &ripple(), &config).unwrap();
    let second = intersect_surfaces(&saddle(), &ripple(), &config).unwrap();

    assert!(!first.is_empty());
    assert_eq!(first.segments, second.segments);
    assert_eq!(first.polylines, second.polylines);
}

#[test]
fn every_filter_mode_finds_the_same_segments() {
    let base = PipelineConfig::new(1e-6, 9).unwrap();
    for (a, b) in [
        (&saddle() as &dyn Surface, &ripple() as &dyn Surface),
        (&saddle() as &dyn Surface, &slanted_wall() as &dyn Surface),
    ] {
        let brute = intersect_surfaces(a, b, &base.with_filter(FilterMode::BruteForce)).unwrap();
        for mode in [FilterMode::BoundingBox, FilterMode::SpatialHash] {
            let filtered = intersect_surfaces(a, b, &base.with_filter(mode)).unwrap();
            assert_eq!(brute.segments, filtered.segments, "{mode:?}");
            assert_eq!(brute.polylines, filtered.polylines, "{mode:?}");
        }
    }
}

#[test]
fn swapping_surfaces_gives_the_same_curves() {
    let config = PipelineConfig::new(1e-6, 10).unwrap();
    let ab = intersect_surfaces(&saddle(), &slanted_wall(), &config).unwrap();
    let ba = intersect_surfaces(&slanted_wall(), &saddle(), &config).unwrap();

    assert!(!ab.is_empty());
    assert_eq!(ab.polylines, ba.polylines);
}

#[test]
fn triangle_order_does_not_matter() {
    let config = PipelineConfig::new(1e-6, 8).unwrap();
    let a = sample_surface(&ripple(), 8).unwrap().into_triangles();
    let b = sample_surface(&saddle(), 8).unwrap().into_triangles();

    let forward = intersect_triangle_sets(&a, &b, &config).unwrap();

    let mut a_rev = a.clone();
    a_rev.reverse();
    let mut b_rot = b.clone();
    b_rot.rotate_left(37);
    let shuffled = intersect_triangle_sets(&a_rev, &b_rot, &config).unwrap();

    assert!(!forward.is_empty());
    assert_eq!(forward.polylines, shuffled.polylines);
    assert_eq!(forward.segments.len(), shuffled.segments.len());
}

#[test]
fn serial_and_parallel_agree() {
    let base = PipelineConfig::new(1e-6, 14).unwrap();
    let serial = intersect_surfaces(&ripple(), &slanted_wall(), &base.with_parallel(false)).unwrap();
    let parallel = intersect_surfaces(&ripple(), &slanted_wall(), &base.with_parallel(true)).unwrap();

    assert_eq!(serial.segments, parallel.segments);
    assert_eq!(serial.polylines, parallel.polylines);
    assert_eq!(
        serial.diagnostics.candidate_pairs,
        parallel.diagnostics.candidate_pairs
    );
}
