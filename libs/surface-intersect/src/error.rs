//! # Error Types
//!
//! Error types for the intersection pipeline. All errors are explicit and
//! provide clear debugging information.
//!
//! ## Error Policy
//!
//! - Degenerate or coplanar triangle pairs are outcomes, never errors
//! - Finding no intersection returns an empty result, never an error
//! - Invalid configuration and malformed surfaces fail the call that used them

use ::config::constants::ConfigError;
use thiserror::Error;

// =============================================================================
// ERROR TYPES
// =============================================================================

/// Errors that can occur while sampling surfaces or running the pipeline.
///
/// ## Example
///
/// ```rust
/// use surface_intersect::{sample_surface, IntersectError, PlaneSurface};
/// use glam::DVec3;
///
/// let plane = PlaneSurface::new(DVec3::ZERO, DVec3::X, DVec3::Y);
/// match sample_surface(&plane, 0) {
///     Err(IntersectError::InvalidDivisions(n)) => assert_eq!(n, 0),
///     other => panic!("unexpected: {other:?}"),
/// }
/// ```
#[derive(Error, Debug)]
pub enum IntersectError {
    /// The division count cannot cover the parameter domain.
    #[error("Invalid division count: {0} (must be >= 1)")]
    InvalidDivisions(u32),

    /// The distance tolerance is not a positive finite number.
    #[error("Invalid tolerance: {0}")]
    InvalidTolerance(f64),

    /// A surface definition is malformed.
    ///
    /// Contains the surface kind and what is wrong with it.
    #[error("Invalid {kind} surface: {message}")]
    InvalidSurface {
        /// Kind of surface being constructed (e.g. "nurbs")
        kind: &'static str,
        /// Error message
        message: String,
    },

    /// Configuration rejected by the shared `config` crate.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Serializing polylines for hand-off failed.
    #[error("Export failed: {0}")]
    Export(#[from] serde_json::Error),
}

impl IntersectError {
    /// Creates an invalid surface error.
    pub fn invalid_surface(kind: &'static str, message: impl Into<String>) -> Self {
        Self::InvalidSurface {
            kind,
            message: message.into(),
        }
    }
}

// =============================================================================
// RESULT TYPE ALIAS
// =============================================================================

/// Result type alias for pipeline operations.
pub type IntersectResult<T> = Result<T, IntersectError>;

// =============================================================================
// TESTS
// =============================================================================
