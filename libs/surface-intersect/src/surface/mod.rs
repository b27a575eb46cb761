//! # Parametric Surfaces
//!
//! The evaluator interface the sampler consumes, plus the surfaces the
//! pipeline ships with.
//!
//! All surfaces are parameterized over the normalized domain `[0,1]×[0,1]`.
//! Parameters outside the domain are clamped.
//!
//! ## Example
//!
//! ```rust
//! use surface_intersect::surface::{ParametricFn, PlaneSurface, Surface};
//! use glam::DVec3;
//!
//! let plane = PlaneSurface::new(DVec3::ZERO, DVec3::X * 2.0, DVec3::Y);
//! assert_eq!(plane.point_at(0.5, 0.5), DVec3::new(1.0, 0.5, 0.0));
//!
//! let saddle = ParametricFn::new(|u, v| DVec3::new(u, v, u * v));
//! assert_eq!(saddle.point_at(1.0, 1.0), DVec3::ONE);
//! ```

mod nurbs;
mod plane;

pub use nurbs::NurbsSurface;
pub use plane::PlaneSurface;

use ::config::constants::{
    CLOSEST_PARAMETER_GRID, CLOSEST_PARAMETER_ITERATIONS, FINITE_DIFFERENCE_STEP,
};
use glam::DVec3;

/// Convergence threshold for closest-parameter refinement steps.
const PARAMETER_STEP_EPSILON: f64 = 1e-12;

/// A parametric surface evaluator over `[0,1]×[0,1]`.
///
/// Only [`Surface::point_at`] is required; normals and closest-parameter
/// queries have numeric default implementations. They are used by
/// surrounding visualization, never by the intersection math.
pub trait Surface: Send + Sync {
    /// Evaluates the surface point at normalized parameters `(u, v)`.
    fn point_at(&self, u: f64, v: f64) -> DVec3;

    /// First partial derivatives `(∂S/∂u, ∂S/∂v)` at `(u, v)`.
    ///
    /// Central finite differences, one-sided at the domain border.
    fn partial_derivatives_at(&self, u: f64, v: f64) -> (DVec3, DVec3) {
        let u = u.clamp(0.0, 1.0);
        let v = v.clamp(0.0, 1.0);
        let h = FINITE_DIFFERENCE_STEP;

        let ua = (u - h).max(0.0);
        let ub = (u + h).min(1.0);
        let va = (v - h).max(0.0);
        let vb = (v + h).min(1.0);

        let du = (self.point_at(ub, v) - self.point_at(ua, v)) / (ub - ua);
        let dv = (self.point_at(u, vb) - self.point_at(u, va)) / (vb - va);
        (du, dv)
    }

    /// Unit surface normal at `(u, v)`, or `None` where the partials are
    /// parallel (poles, collapsed edges).
    fn normal_at(&self, u: f64, v: f64) -> Option<DVec3> {
        let (du, dv) = self.partial_derivatives_at(u, v);
        du.cross(dv).try_normalize()
    }

    /// Parameters of the surface point closest to `point`.
    ///
    /// Coarse grid search followed by clamped Gauss-Newton refinement. Finds
    /// the global minimum for surfaces whose closest point is resolved by the
    /// search grid.
    fn closest_parameter(&self, point: DVec3) -> (f64, f64) {
        let grid = CLOSEST_PARAMETER_GRID;
        let mut best = (0.0, 0.0);
        let mut best_distance = f64::INFINITY;
        for i in 0..=grid {
            for j in 0..=grid {
                let u = f64::from(i) / f64::from(grid);
                let v = f64::from(j) / f64::from(grid);
                let distance = self.point_at(u, v).distance_squared(point);
                if distance < best_distance {
                    best_distance = distance;
                    best = (u, v);
                }
            }
        }

        let (mut u, mut v) = best;
        for _ in 0..CLOSEST_PARAMETER_ITERATIONS {
            let residual = self.point_at(u, v) - point;
            let (su, sv) = self.partial_derivatives_at(u, v);

            // Normal equations of the 2x2 least-squares step
            let a = su.dot(su);
            let b = su.dot(sv);
            let c = sv.dot(sv);
            let det = a * c - b * b;
            if det.abs() <= f64::EPSILON * a.max(c).max(1.0) {
                break;
            }
            let ru = -su.dot(residual);
            let rv = -sv.dot(residual);
            let du = (c * ru - b * rv) / det;
            let dv = (a * rv - b * ru) / det;

            let next_u = (u + du).clamp(0.0, 1.0);
            let next_v = (v + dv).clamp(0.0, 1.0);
            let next_distance = self.point_at(next_u, next_v).distance_squared(point);
            if next_distance > best_distance {
                break;
            }
            let step = (next_u - u).abs() + (next_v - v).abs();
            u = next_u;
            v = next_v;
            best_distance = next_distance;
            if step < PARAMETER_STEP_EPSILON {
                break;
            }
        }
        (u, v)
    }
}

impl<S: Surface + ?Sized> Surface for &S {
    fn point_at(&self, u: f64, v: f64) -> DVec3 {
        (**self).point_at(u, v)
    }

    fn partial_derivatives_at(&self, u: f64, v: f64) -> (DVec3, DVec3) {
        (**self).partial_derivatives_at(u, v)
    }

    fn normal_at(&self, u: f64, v: f64) -> Option<DVec3> {
        (**self).normal_at(u, v)
    }

    fn closest_parameter(&self, point: DVec3) -> (f64, f64) {
        (**self).closest_parameter(point)
    }
}

/// Adapts a closure `(u, v) -> point` into a [`Surface`].
///
/// The closure receives parameters already clamped to `[0,1]`.
#[derive(Clone)]
pub struct ParametricFn<F> {
    evaluate: F,
}

impl<F> ParametricFn<F>
where
    F: Fn(f64, f64) -> DVec3 + Send + Sync,
{
    /// Wraps an evaluator closure.
    pub fn new(evaluate: F) -> Self {
        Self { evaluate }
    }
}

impl<F> Surface for ParametricFn<F>
where
    F: Fn(f64, f64) -> DVec3 + Send + Sync,
{
    fn point_at(&self, u: f64, v: f64) -> DVec3 {
        (self.evaluate)(u.clamp(0.0, 1.0), v.clamp(0.0, 1.0))
    }
}

impl<F> std::fmt::Debug for ParametricFn<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ParametricFn").finish_non_exhaustive()
    }
}
