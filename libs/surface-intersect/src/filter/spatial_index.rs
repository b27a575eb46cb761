//! # Spatial Index for Fast Triangle Queries
//!
//! Uses spatial hashing for O(1) average-case triangle lookups.
//! Essential for filtering the triangle-pair cross product of two large
//! sampled surfaces.
//!
//! ## Example
//!
//! ```rust,ignore
//! let index = SpatialIndex::new(&triangles, tolerance);
//! let candidates = index.query_box(&query_bounds);
//! ```

use std::collections::HashMap;

use glam::DVec3;

use crate::geometry::{Bounds, Triangle};

/// Cell size multiplier for spatial hashing.
/// Larger values = fewer cells but more triangles per cell.
const CELL_SIZE_FACTOR: f64 = 2.0;

/// Cap on cells spanned per axis by a single box, so one huge triangle
/// cannot flood the grid.
const MAX_CELLS_PER_AXIS: i64 = 64;

/// 3D cell coordinate for spatial hashing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct CellCoord {
    x: i64,
    y: i64,
    z: i64,
}

impl CellCoord {
    /// Creates a cell coordinate from 3D position.
    ///
    /// Coordinates beyond the `i64` range saturate at its ends.
    fn from_position(pos: DVec3, cell_size: f64) -> Self {
        Self {
            x: (pos.x / cell_size).floor() as i64,
            y: (pos.y / cell_size).floor() as i64,
            z: (pos.z / cell_size).floor() as i64,
        }
    }

    /// Returns true if the box between `self` and `max` spans more than
    /// [`MAX_CELLS_PER_AXIS`] cells on any axis.
    fn spans_too_many(&self, max: &CellCoord) -> bool {
        max.x.saturating_sub(self.x) > MAX_CELLS_PER_AXIS
            || max.y.saturating_sub(self.y) > MAX_CELLS_PER_AXIS
            || max.z.saturating_sub(self.z) > MAX_CELLS_PER_AXIS
    }
}

/// Spatial index over the tolerance-expanded boxes of a triangle set.
///
/// Uses a hash grid to map 3D space to triangle lists. Boxes spanning more
/// than [`MAX_CELLS_PER_AXIS`] cells on any axis go to an overflow list that
/// every query returns.
#[derive(Debug)]
pub struct SpatialIndex {
    /// Hash grid: cell -> triangle indices
    grid: HashMap<CellCoord, Vec<usize>>,
    /// Triangles too large for the grid
    oversized: Vec<usize>,
    /// Expanded triangle boxes, by triangle index
    boxes: Vec<Bounds>,
    /// Cell size for hashing
    cell_size: f64,
}

impl SpatialIndex {
    /// Creates a spatial index over `triangles`, expanding every box by
    /// `margin`.
    ///
    /// Cell size is derived from the mean triangle box extent.
    pub fn new(triangles: &[Triangle], margin: f64) -> Self {
        let boxes: Vec<Bounds> = triangles
            .iter()
            .map(|t| t.bounds().expanded(margin))
            .collect();

        let mean_extent = if boxes.is_empty() {
            0.0
        } else {
            boxes
                .iter()
                .map(|b| {
                    let e = b.extent();
                    e.x.max(e.y).max(e.z)
                })
                .sum::<f64>()
                / boxes.len() as f64
        };
        let cell_size = if mean_extent.is_finite() && mean_extent > 0.0 {
            mean_extent * CELL_SIZE_FACTOR
        } else {
            1.0
        };

        let mut grid: HashMap<CellCoord, Vec<usize>> = HashMap::new();
        let mut oversized = Vec::new();

        // Index each triangle box
        for (i, bounds) in boxes.iter().enumerate() {
            if bounds.is_empty() {
                continue;
            }
            let cell_min = CellCoord::from_position(bounds.min, cell_size);
            let cell_max = CellCoord::from_position(bounds.max, cell_size);
            if cell_min.spans_too_many(&cell_max) {
                oversized.push(i);
                continue;
            }

            for cx in cell_min.x..=cell_max.x {
                for cy in cell_min.y..=cell_max.y {
                    for cz in cell_min.z..=cell_max.z {
                        let cell = CellCoord { x: cx, y: cy, z: cz };
                        grid.entry(cell).or_default().push(i);
                    }
                }
            }
        }

        Self {
            grid,
            oversized,
            boxes,
            cell_size,
        }
    }

    /// Queries triangles whose expanded box overlaps `query`.
    ///
    /// Returns sorted, deduplicated triangle indices. The result is exact
    /// with respect to box overlap: grid hits are confirmed against the
    /// stored boxes.
    pub fn query_box(&self, query: &Bounds) -> Vec<usize> {
        if query.is_empty() {
            return Vec::new();
        }
        let mut result: Vec<usize> = self
            .oversized
            .iter()
            .copied()
            .filter(|&i| self.boxes[i].overlaps(query))
            .collect();

        let cell_min = CellCoord::from_position(query.min, self.cell_size);
        let cell_max = CellCoord::from_position(query.max, self.cell_size);
        if cell_min.spans_too_many(&cell_max) {
            // Huge query: a linear scan is cheaper than walking the cells
            result.extend((0..self.boxes.len()).filter(|&i| self.boxes[i].overlaps(query)));
        } else {
            for cx in cell_min.x..=cell_max.x {
                for cy in cell_min.y..=cell_max.y {
                    for cz in cell_min.z..=cell_max.z {
                        let cell = CellCoord { x: cx, y: cy, z: cz };
                        if let Some(tris) = self.grid.get(&cell) {
                            result.extend(
                                tris.iter().copied().filter(|&i| self.boxes[i].overlaps(query)),
                            );
                        }
                    }
                }
            }
        }

        result.sort_unstable();
        result.dedup();
        result
    }

    /// Returns the number of cells in the index.
    pub fn cell_count(&self) -> usize {
        self.grid.len()
    }

    /// Returns the cell size used for hashing.
    pub fn cell_size(&self) -> f64 {
        self.cell_size
    }

    /// Returns the average triangles per cell.
    pub fn avg_triangles_per_cell(&self) -> f64 {
        if self.grid.is_empty() {
            return 0.0;
        }
        let total: usize = self.grid.values().map(|v| v.len()).sum();
        total as f64 / self.grid.len() as f64
    }
}
