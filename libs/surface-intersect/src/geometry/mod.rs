//! # Geometry Primitives
//!
//! Low-level types shared by every pipeline stage.
//!
//! ## Contents
//!
//! - **Bounds**: axis-aligned boxes for cheap rejection
//! - **Plane**: unit-normal planes with tolerance classification
//! - **Triangle**: immutable triangles with cached plane and bounds

mod bounds;
mod plane;
mod triangle;

pub use bounds::Bounds;
pub use plane::{Plane, Side};
pub use triangle::{PlateIndex, Triangle};
