//! Tests for the surface sampler.

use super::*;
use crate::surface::{NurbsSurface, ParametricFn, PlaneSurface};
use approx::assert_relative_eq;

#[test]
fn zero_divisions_are_rejected() {
    let plane = PlaneSurface::new(DVec3::ZERO, DVec3::X, DVec3::Y);
    let err = sample_surface(&plane, 0).unwrap_err();
    assert!(matches!(err, IntersectError::InvalidDivisions(0)));
}

#[test]
fn divisions_above_the_limit_are_rejected() {
    let plane = PlaneSurface::new(DVec3::ZERO, DVec3::X, DVec3::Y);
    for divisions in [MAX_DIVISIONS + 1, u32::MAX] {
        let err = sample_surface(&plane, divisions).unwrap_err();
        assert!(matches!(
            err,
            IntersectError::Config(ConfigError::TooManyDivisions { count, max })
                if count == divisions && max == MAX_DIVISIONS
        ));
    }
}

#[test]
fn triangle_count_is_two_n_squared() {
    let plane = PlaneSurface::new(DVec3::ZERO, DVec3::X, DVec3::Y);
    for n in [1u32, 2, 3, 7, 16] {
        let mesh = sample_surface(&plane, n).unwrap();
        assert_eq!(mesh.len(), (2 * n * n) as usize);
        assert_eq!(mesh.divisions(), n);
    }
}

#[test]
fn planar_area_is_preserved() {
    let plane = PlaneSurface::new(
        DVec3::new(1.0, -2.0, 0.5),
        DVec3::new(3.0, 0.0, 1.0),
        DVec3::new(0.0, 2.0, 0.0),
    );
    for n in [1u32, 4, 9] {
        let mesh = sample_surface(&plane, n).unwrap();
        assert_relative_eq!(mesh.area(), plane.area(), max_relative = 1e-12);
    }
}

#[test]
fn grid_parameters_stay_in_domain() {
    for n in [1u32, 3, 7, 10, 49] {
        for i in 0..=n {
            let t = grid_parameter(i, n);
            assert!((0.0..=1.0).contains(&t));
        }
        assert_eq!(grid_parameter(n, n), 1.0);
        assert_eq!(grid_parameter(0, n), 0.0);
    }
}

#[test]
fn boundary_is_evaluated_exactly_at_one() {
    // Evaluator that would leave the patch if called past 1.0
    let strict = ParametricFn::new(|u, v| {
        assert!(u <= 1.0 && v <= 1.0);
        DVec3::new(u, v, 0.0)
    });
    let mesh = sample_surface(&strict, 7).unwrap();
    assert_eq!(mesh.bounds().max, DVec3::new(1.0, 1.0, 0.0));
}

#[test]
fn plates_split_with_consistent_winding() {
    let plane = PlaneSurface::new(DVec3::ZERO, DVec3::X, DVec3::Y);
    let mesh = sample_surface(&plane, 3).unwrap();
    for tri in mesh.triangles() {
        assert_eq!(tri.plane().unwrap().normal(), DVec3::Z);
    }
}

#[test]
fn triangles_follow_plate_order() {
    let plane = PlaneSurface::new(DVec3::ZERO, DVec3::X, DVec3::Y);
    let n = 4u32;
    let mesh = sample_surface(&plane, n).unwrap();
    for (k, tri) in mesh.triangles().iter().enumerate() {
        let source = tri.source().unwrap();
        let plate = (source.u * n + source.v) as usize;
        assert_eq!(k, 2 * plate + source.half as usize);
    }
}

#[test]
fn neighboring_plates_share_vertices() {
    let plane = PlaneSurface::new(DVec3::ZERO, DVec3::X, DVec3::Y);
    let mesh = sample_surface(&plane, 2).unwrap();
    // Plate (0,0) half 0 ends at c2 = node(1,1); plate (1,1) half 0 starts there
    let first = mesh.triangles()[0].vertices()[2];
    let last_plate = &mesh.triangles()[6];
    assert_eq!(first, last_plate.vertices()[0]);
}

#[test]
fn curved_surface_area_converges() {
    // Quarter cylinder of radius 1 and height 1: area = pi / 2
    let cylinder = ParametricFn::new(|u, v| {
        let angle = u * std::f64::consts::FRAC_PI_2;
        DVec3::new(angle.cos(), angle.sin(), v)
    });
    let coarse = sample_surface(&cylinder, 4).unwrap().area();
    let fine = sample_surface(&cylinder, 64).unwrap().area();
    let exact = std::f64::consts::FRAC_PI_2;
    assert!((fine - exact).abs() < (coarse - exact).abs());
    assert_relative_eq!(fine, exact, max_relative = 1e-3);
}

#[test]
fn nurbs_surfaces_sample_like_any_surface() {
    let patch = NurbsSurface::bilinear(
        DVec3::ZERO,
        DVec3::X,
        DVec3::Y,
        DVec3::new(1.0, 1.0, 0.0),
    );
    let mesh = sample_surface(&patch, 5).unwrap();
    assert_eq!(mesh.len(), 50);
    assert_relative_eq!(mesh.area(), 1.0, max_relative = 1e-12);
}

#[test]
fn mesh_from_triangles_tracks_bounds() {
    let mesh = TriangleMesh::from_triangles(vec![
        Triangle::new(DVec3::ZERO, DVec3::X, DVec3::Y),
        Triangle::new(DVec3::Z, DVec3::new(2.0, 0.0, 1.0), DVec3::new(0.0, 2.0, 1.0)),
    ]);
    assert_eq!(mesh.bounds().max, DVec3::new(2.0, 2.0, 1.0));
    assert_eq!(mesh.divisions(), 0);
    assert!(!mesh.is_empty());
}
