//! # NURBS Surfaces
//!
//! Rational tensor-product B-spline surfaces evaluated with de Boor's
//! algorithm in homogeneous coordinates.
//!
//! Control points are stored `u`-major: the point in column `i` (along `u`)
//! and row `j` (along `v`) lives at `i * v_count + j`.

use glam::{DVec3, DVec4};

use super::Surface;
use crate::error::{IntersectError, IntersectResult};

const KIND: &str = "nurbs";

/// A non-uniform rational B-spline surface.
///
/// # Example
///
/// ```rust
/// use surface_intersect::surface::{NurbsSurface, Surface};
/// use glam::DVec3;
///
/// let patch = NurbsSurface::bilinear(
///     DVec3::ZERO,
///     DVec3::X,
///     DVec3::Y,
///     DVec3::new(1.0, 1.0, 0.0),
/// );
/// let mid = patch.point_at(0.5, 0.5);
/// assert!(mid.abs_diff_eq(DVec3::new(0.5, 0.5, 0.0), 1e-12));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct NurbsSurface {
    degree_u: usize,
    degree_v: usize,
    u_count: usize,
    v_count: usize,
    control_points: Vec<DVec3>,
    knots_u: Vec<f64>,
    knots_v: Vec<f64>,
    weights: Vec<f64>,
}

impl NurbsSurface {
    /// Creates a validated NURBS surface.
    ///
    /// `weights` defaults to all ones (a non-rational B-spline surface).
    ///
    /// # Errors
    ///
    /// Returns [`IntersectError::InvalidSurface`] when the control net is
    /// smaller than 2×2, a degree is zero or not below its control count,
    /// the control point or weight count does not match `u_count * v_count`,
    /// a knot vector has the wrong length, decreases, or spans an empty
    /// domain, or a weight is not positive and finite.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        degree_u: usize,
        degree_v: usize,
        u_count: usize,
        v_count: usize,
        control_points: Vec<DVec3>,
        knots_u: Vec<f64>,
        knots_v: Vec<f64>,
        weights: Option<Vec<f64>>,
    ) -> IntersectResult<Self> {
        if u_count < 2 || v_count < 2 {
            return Err(IntersectError::invalid_surface(
                KIND,
                "requires at least a 2x2 control net",
            ));
        }
        if degree_u == 0 || degree_v == 0 {
            return Err(IntersectError::invalid_surface(KIND, "degrees must be >= 1"));
        }
        if degree_u >= u_count || degree_v >= v_count {
            return Err(IntersectError::invalid_surface(
                KIND,
                "degrees must be < control point counts",
            ));
        }
        if control_points.len() != u_count * v_count {
            return Err(IntersectError::invalid_surface(
                KIND,
                format!(
                    "control point count must be {}, got {}",
                    u_count * v_count,
                    control_points.len()
                ),
            ));
        }
        if control_points.iter().any(|p| !p.is_finite()) {
            return Err(IntersectError::invalid_surface(
                KIND,
                "control points must be finite",
            ));
        }

        validate_knots("u", &knots_u, u_count, degree_u)?;
        validate_knots("v", &knots_v, v_count, degree_v)?;

        let weights = weights.unwrap_or_else(|| vec![1.0; control_points.len()]);
        if weights.len() != control_points.len() {
            return Err(IntersectError::invalid_surface(
                KIND,
                format!(
                    "weight count must be {}, got {}",
                    control_points.len(),
                    weights.len()
                ),
            ));
        }
        if weights.iter().any(|w| !w.is_finite() || *w <= 0.0) {
            return Err(IntersectError::invalid_surface(
                KIND,
                "weights must be positive and finite",
            ));
        }

        Ok(Self {
            degree_u,
            degree_v,
            u_count,
            v_count,
            control_points,
            knots_u,
            knots_v,
            weights,
        })
    }

    /// Creates a degree-1 patch through four corners.
    ///
    /// `p00` is at `(0,0)`, `p10` at `(1,0)`, `p01` at `(0,1)` and `p11` at
    /// `(1,1)`.
    pub fn bilinear(p00: DVec3, p10: DVec3, p01: DVec3, p11: DVec3) -> Self {
        Self {
            degree_u: 1,
            degree_v: 1,
            u_count: 2,
            v_count: 2,
            control_points: vec![p00, p01, p10, p11],
            knots_u: vec![0.0, 0.0, 1.0, 1.0],
            knots_v: vec![0.0, 0.0, 1.0, 1.0],
            weights: vec![1.0; 4],
        }
    }

    /// Builds a clamped uniform knot vector for `count` control points of
    /// the given degree, spanning `[0, 1]`.
    ///
    /// # Example
    ///
    /// ```rust
    /// use surface_intersect::surface::NurbsSurface;
    /// let knots = NurbsSurface::clamped_uniform_knots(4, 2);
    /// assert_eq!(knots, vec![0.0, 0.0, 0.0, 0.5, 1.0, 1.0, 1.0]);
    /// ```
    pub fn clamped_uniform_knots(count: usize, degree: usize) -> Vec<f64> {
        let interior = count.saturating_sub(degree + 1);
        let mut knots = vec![0.0; degree + 1];
        let spans = (interior + 1) as f64;
        knots.extend((1..=interior).map(|k| k as f64 / spans));
        knots.extend(std::iter::repeat(1.0).take(degree + 1));
        knots
    }

    /// Degree along `u`.
    pub fn degree_u(&self) -> usize {
        self.degree_u
    }

    /// Degree along `v`.
    pub fn degree_v(&self) -> usize {
        self.degree_v
    }

    /// Control points in `u`-major order.
    pub fn control_points(&self) -> &[DVec3] {
        &self.control_points
    }

    /// Knot domain along `u`.
    pub fn domain_u(&self) -> (f64, f64) {
        (self.knots_u[self.degree_u], self.knots_u[self.u_count])
    }

    /// Knot domain along `v`.
    pub fn domain_v(&self) -> (f64, f64) {
        (self.knots_v[self.degree_v], self.knots_v[self.v_count])
    }

    fn homogeneous(&self, i: usize, j: usize) -> DVec4 {
        let index = i * self.v_count + j;
        let w = self.weights[index];
        (self.control_points[index] * w).extend(w)
    }

    /// Evaluates at parameters already mapped onto the knot domain.
    fn point_at_knot(&self, s: f64, t: f64) -> DVec3 {
        let p = self.degree_u;
        let q = self.degree_v;
        let span_u = find_span(self.u_count - 1, p, s, &self.knots_u);
        let span_v = find_span(self.v_count - 1, q, t, &self.knots_v);

        // Collapse each affected column along v, then the columns along u
        let mut column = vec![DVec4::ZERO; q + 1];
        let mut row = Vec::with_capacity(p + 1);
        for a in 0..=p {
            let i = span_u - p + a;
            for (b, slot) in column.iter_mut().enumerate() {
                *slot = self.homogeneous(i, span_v - q + b);
            }
            de_boor(&mut column, span_v, q, t, &self.knots_v);
            row.push(column[q]);
        }
        de_boor(&mut row, span_u, p, s, &self.knots_u);

        let h = row[p];
        h.truncate() / h.w
    }
}

impl Surface for NurbsSurface {
    fn point_at(&self, u: f64, v: f64) -> DVec3 {
        let (u0, u1) = self.domain_u();
        let (v0, v1) = self.domain_v();
        let s = u0 + (u1 - u0) * u.clamp(0.0, 1.0);
        let t = v0 + (v1 - v0) * v.clamp(0.0, 1.0);
        self.point_at_knot(s, t)
    }
}

fn validate_knots(
    direction: &str,
    knots: &[f64],
    count: usize,
    degree: usize,
) -> IntersectResult<()> {
    let expected = count + degree + 1;
    if knots.len() != expected {
        return Err(IntersectError::invalid_surface(
            KIND,
            format!(
                "{direction} knot length must be {expected}, got {}",
                knots.len()
            ),
        ));
    }
    if knots.iter().any(|k| !k.is_finite()) || knots.windows(2).any(|w| w[1] < w[0]) {
        return Err(IntersectError::invalid_surface(
            KIND,
            format!("{direction} knots must be finite and non-decreasing"),
        ));
    }
    if knots[count] <= knots[degree] {
        return Err(IntersectError::invalid_surface(
            KIND,
            format!("{direction} knot domain is empty"),
        ));
    }
    Ok(())
}

/// Index of the knot span containing `t`, for `n + 1` control points.
fn find_span(n: usize, p: usize, t: f64, knots: &[f64]) -> usize {
    if t >= knots[n + 1] {
        // Last non-empty span, so the domain end evaluates inside it
        let mut span = n;
        while span > p && knots[span] >= knots[n + 1] {
            span -= 1;
        }
        return span;
    }
    if t <= knots[p] {
        return p;
    }

    let mut low = p;
    let mut high = n + 1;
    let mut mid = (low + high) / 2;
    while t < knots[mid] || t >= knots[mid + 1] {
        if t < knots[mid] {
            high = mid;
        } else {
            low = mid;
        }
        mid = (low + high) / 2;
    }
    mid
}

/// In-place de Boor recursion; the result ends up in `d[p]`.
fn de_boor(d: &mut [DVec4], span: usize, p: usize, t: f64, knots: &[f64]) {
    for r in 1..=p {
        for j in (r..=p).rev() {
            let i = span - p + j;
            let denom = knots[i + p + 1 - r] - knots[i];
            let alpha = if denom == 0.0 { 0.0 } else { (t - knots[i]) / denom };
            d[j] = d[j - 1].lerp(d[j], alpha);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_span_interior_and_ends() {
        let knots = [0.0, 0.0, 0.0, 0.5, 1.0, 1.0, 1.0];
        assert_eq!(find_span(3, 2, 0.0, &knots), 2);
        assert_eq!(find_span(3, 2, 0.25, &knots), 2);
        assert_eq!(find_span(3, 2, 0.5, &knots), 3);
        assert_eq!(find_span(3, 2, 1.0, &knots), 3);
    }

    #[test]
    fn test_clamped_uniform_knots_lengths() {
        for (count, degree) in [(2, 1), (4, 3), (7, 2)] {
            let knots = NurbsSurface::clamped_uniform_knots(count, degree);
            assert_eq!(knots.len(), count + degree + 1);
        }
    }
}
