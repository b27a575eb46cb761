//! Flat parallelogram patches.

use glam::DVec3;
use serde::{Deserialize, Serialize};

use super::Surface;

/// A parallelogram patch `origin + u·u_axis + v·v_axis`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlaneSurface {
    /// Point at `(0, 0)`.
    pub origin: DVec3,
    /// Edge vector spanned by `u`.
    pub u_axis: DVec3,
    /// Edge vector spanned by `v`.
    pub v_axis: DVec3,
}

impl PlaneSurface {
    /// Creates a patch from its origin corner and two edge vectors.
    pub const fn new(origin: DVec3, u_axis: DVec3, v_axis: DVec3) -> Self {
        Self {
            origin,
            u_axis,
            v_axis,
        }
    }

    /// Area of the full patch.
    pub fn area(&self) -> f64 {
        self.u_axis.cross(self.v_axis).length()
    }
}

impl Surface for PlaneSurface {
    fn point_at(&self, u: f64, v: f64) -> DVec3 {
        let u = u.clamp(0.0, 1.0);
        let v = v.clamp(0.0, 1.0);
        self.origin + self.u_axis * u + self.v_axis * v
    }

    fn partial_derivatives_at(&self, _u: f64, _v: f64) -> (DVec3, DVec3) {
        (self.u_axis, self.v_axis)
    }

    fn normal_at(&self, _u: f64, _v: f64) -> Option<DVec3> {
        self.u_axis.cross(self.v_axis).try_normalize()
    }

    // Exact inside the patch; outside, each parameter is clamped separately,
    // which is exact for rectangular patches only.
    fn closest_parameter(&self, point: DVec3) -> (f64, f64) {
        let offset = point - self.origin;
        let a = self.u_axis.dot(self.u_axis);
        let b = self.u_axis.dot(self.v_axis);
        let c = self.v_axis.dot(self.v_axis);
        let det = a * c - b * b;
        if det.abs() <= f64::EPSILON {
            return (0.0, 0.0);
        }
        let pu = self.u_axis.dot(offset);
        let pv = self.v_axis.dot(offset);
        let u = (c * pu - b * pv) / det;
        let v = (a * pv - b * pu) / det;
        (u.clamp(0.0, 1.0), v.clamp(0.0, 1.0))
    }
}
