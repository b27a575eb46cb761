//! Intersection curves between parametric surfaces.
//!
//! Both surfaces are tessellated into triangle grids; candidate triangle
//! pairs are filtered spatially, intersected pairwise under a distance
//! tolerance, and the resulting segments are stitched into polylines ready
//! for curve fitting.
//!
//! ```rust
//! use surface_intersect::{intersect_surfaces, PipelineConfig, PlaneSurface};
//! use glam::DVec3;
//!
//! let floor = PlaneSurface::new(DVec3::ZERO, DVec3::X, DVec3::Y);
//! let wall = PlaneSurface::new(DVec3::new(0.5, -0.5, -0.5), DVec3::Y * 2.0, DVec3::Z);
//!
//! let result = intersect_surfaces(&floor, &wall, &PipelineConfig::new(1e-6, 4).unwrap()).unwrap();
//! assert_eq!(result.polylines.len(), 1);
//! assert_eq!(result.polylines[0].points.len(), 5);
//! ```

pub mod config;
pub mod error;
pub mod export;
pub mod filter;
pub mod geometry;
pub mod intersect;
pub mod pipeline;
pub mod sampler;
pub mod stitch;
pub mod surface;

pub use config::PipelineConfig;
pub use error::{IntersectError, IntersectResult};
pub use filter::FilterMode;
pub use intersect::{intersect_triangles, IntersectionSegment, SkipReason, TriTriOutcome};
pub use pipeline::{intersect_surfaces, intersect_triangle_sets, Diagnostics, SurfaceIntersection};
pub use sampler::{sample_surface, TriangleMesh};
pub use stitch::{stitch_segments, Polyline, StitchResult};
pub use surface::{NurbsSurface, ParametricFn, PlaneSurface, Surface};
