//! # Config Crate
//!
//! Centralized configuration constants for the surface intersection kernel.
//! All tolerances and sampling parameters are defined here so that the
//! sampler, the triangle intersector and the segment stitcher agree on the
//! same numbers.
//!
//! ## Usage
//!
//! ```rust
//! use config::constants::{DEFAULT_DIVISIONS, DEFAULT_TOLERANCE, GlobalConfig};
//!
//! // A caller-supplied tolerance must be positive and finite
//! let cfg = GlobalConfig::new(DEFAULT_TOLERANCE, DEFAULT_DIVISIONS).unwrap();
//! assert_eq!(cfg.tolerance, DEFAULT_TOLERANCE);
//!
//! // Zero divisions cannot cover the parameter domain
//! assert!(GlobalConfig::new(DEFAULT_TOLERANCE, 0).is_err());
//! ```
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: All constants defined once, used everywhere
//! - **One Tolerance**: Classification, overlap and stitching share a value
//! - **No Dependencies**: Plain constants and validation only

pub mod constants;

#[cfg(test)]
mod tests;
