//! Polyline export for downstream curve fitting.
//!
//! Two hand-off formats: serde JSON of the [`Polyline`] list, and flat `f64`
//! buffers with per-polyline offsets for consumers that want plain arrays.

use crate::error::IntersectResult;
use crate::stitch::Polyline;

/// Flat polyline buffers.
///
/// Polyline `i` owns points `offsets[i]..offsets[i + 1]`, i.e. coordinates
/// `points[3 * offsets[i]..3 * offsets[i + 1]]`.
///
/// # Examples
/// ```
/// use surface_intersect::export::flatten_polylines;
/// use surface_intersect::stitch::Polyline;
/// use glam::DVec3;
///
/// let line = Polyline { group: 0, points: vec![DVec3::ZERO, DVec3::X], closed: false };
/// let buffers = flatten_polylines(&[line]);
///
/// assert_eq!(buffers.points.len(), 2 * 3); // 2 points * 3 components
/// assert_eq!(buffers.offsets, vec![0, 2]);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct PolylineBuffers {
    /// Point coordinates as flat array [x, y, z, x, y, z, ...].
    pub points: Vec<f64>,

    /// Start point index of every polyline, plus a final end index.
    pub offsets: Vec<u32>,

    /// Closure flag of every polyline.
    pub closed: Vec<bool>,
}

impl PolylineBuffers {
    /// Creates empty buffers.
    pub fn new() -> Self {
        Self {
            points: Vec::new(),
            offsets: vec![0],
            closed: Vec::new(),
        }
    }

    /// Returns the number of points.
    pub fn point_count(&self) -> usize {
        self.points.len() / 3
    }

    /// Returns the number of polylines.
    pub fn polyline_count(&self) -> usize {
        self.closed.len()
    }

    /// Returns the coordinates of polyline `index`.
    pub fn polyline(&self, index: usize) -> Option<&[f64]> {
        let start = *self.offsets.get(index)? as usize;
        let end = *self.offsets.get(index + 1)? as usize;
        self.points.get(3 * start..3 * end)
    }
}

impl Default for PolylineBuffers {
    fn default() -> Self {
        Self::new()
    }
}

/// Flattens polylines into [`PolylineBuffers`].
pub fn flatten_polylines(polylines: &[Polyline]) -> PolylineBuffers {
    let mut buffers = PolylineBuffers::new();
    for polyline in polylines {
        for p in &polyline.points {
            buffers.points.extend_from_slice(&[p.x, p.y, p.z]);
        }
        buffers.offsets.push(buffers.point_count() as u32);
        buffers.closed.push(polyline.closed);
    }
    buffers
}

/// Serializes polylines to JSON.
///
/// # Errors
///
/// Returns [`IntersectError::Export`](crate::error::IntersectError::Export)
/// when serialization fails.
pub fn polylines_to_json(polylines: &[Polyline]) -> IntersectResult<String> {
    Ok(serde_json::to_string(polylines)?)
}

/// Reads polylines written by [`polylines_to_json`].
///
/// # Errors
///
/// Returns [`IntersectError::Export`](crate::error::IntersectError::Export)
/// for malformed input.
pub fn polylines_from_json(json: &str) -> IntersectResult<Vec<Polyline>> {
    Ok(serde_json::from_str(json)?)
}
