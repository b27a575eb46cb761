//! Centralized configuration values shared across the surface intersection
//! kernel.
//!
//! Each public item in this module documents its purpose and provides a minimal
//! usage example so that downstream crates can remain declarative and avoid
//! scattering literals.

use std::fmt;

// =============================================================================
// PRECISION CONSTANTS
// =============================================================================

/// Default distance tolerance used when the caller does not derive one from
/// the scene scale.
///
/// The same value drives plane classification, interval overlap, bounding
/// box slack, point deduplication and adjacency grouping.
///
/// # Examples
/// ```
/// use config::constants::DEFAULT_TOLERANCE;
/// assert!(DEFAULT_TOLERANCE > 0.0 && DEFAULT_TOLERANCE < 1.0e-3);
/// ```
pub const DEFAULT_TOLERANCE: f64 = 1.0e-6;

/// Scene-relative tolerance factor.
///
/// Multiplied with the diagonal of the scene bounding box by
/// [`tolerance_for_extent`].
///
/// # Examples
/// ```
/// use config::constants::RELATIVE_SCENE_TOLERANCE;
/// let tolerance = 250.0 * RELATIVE_SCENE_TOLERANCE;
/// assert!(tolerance < 1.0e-3);
/// ```
pub const RELATIVE_SCENE_TOLERANCE: f64 = 1.0e-6;

/// Minimum length of the cross product of two unit plane normals for the
/// planes to be treated as intersecting in a unique line.
///
/// Below this value the planes are considered parallel.
///
/// # Examples
/// ```
/// use config::constants::PARALLEL_EPSILON;
/// assert!(PARALLEL_EPSILON < 1.0e-6);
/// ```
pub const PARALLEL_EPSILON: f64 = 1.0e-9;

/// Minimum length of a triangle's edge cross product (twice its area).
///
/// Triangles below this are degenerate and never produce segments.
///
/// # Examples
/// ```
/// use config::constants::DEGENERATE_AREA_EPSILON;
/// assert!(DEGENERATE_AREA_EPSILON > 0.0);
/// ```
pub const DEGENERATE_AREA_EPSILON: f64 = 1.0e-14;

// =============================================================================
// SAMPLING CONSTANTS
// =============================================================================

/// Default number of plate divisions along each parameter direction.
///
/// A surface sampled with `N` divisions yields `2 * N * N` triangles.
///
/// # Examples
/// ```
/// use config::constants::DEFAULT_DIVISIONS;
/// let triangles = 2 * DEFAULT_DIVISIONS * DEFAULT_DIVISIONS;
/// assert_eq!(triangles, 800);
/// ```
pub const DEFAULT_DIVISIONS: u32 = 20;

/// Upper bound on plate divisions per direction.
///
/// Safety limit to prevent memory exhaustion: 2048 divisions already yield
/// more than eight million triangles per surface.
pub const MAX_DIVISIONS: u32 = 2048;

/// Relative step used for finite-difference surface derivatives.
pub const FINITE_DIFFERENCE_STEP: f64 = 1.0e-6;

/// Grid resolution of the coarse search in closest-parameter queries.
pub const CLOSEST_PARAMETER_GRID: u32 = 16;

/// Maximum Gauss-Newton refinement steps in closest-parameter queries.
pub const CLOSEST_PARAMETER_ITERATIONS: u32 = 32;

// =============================================================================
// HELPER FUNCTIONS
// =============================================================================

/// Derives a distance tolerance from the diagonal length of the scene's
/// bounding box.
///
/// Non-finite or non-positive extents fall back to [`DEFAULT_TOLERANCE`].
///
/// # Examples
/// ```
/// use config::constants::{tolerance_for_extent, DEFAULT_TOLERANCE};
///
/// assert_eq!(tolerance_for_extent(1000.0), 1.0e-3);
/// assert_eq!(tolerance_for_extent(0.0), DEFAULT_TOLERANCE);
/// assert_eq!(tolerance_for_extent(f64::NAN), DEFAULT_TOLERANCE);
/// ```
pub fn tolerance_for_extent(extent: f64) -> f64 {
    if extent.is_finite() && extent > 0.0 {
        extent * RELATIVE_SCENE_TOLERANCE
    } else {
        DEFAULT_TOLERANCE
    }
}

// =============================================================================
// GLOBAL CONFIG
// =============================================================================

/// Immutable snapshot of global configuration settings that can be shared
/// between crates.
///
/// # Examples
/// ```
/// use config::constants::GlobalConfig;
/// let config = GlobalConfig::default();
/// assert!(config.tolerance > 0.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GlobalConfig {
    /// Distance tolerance propagated into every pipeline stage.
    pub tolerance: f64,
    /// Plate divisions per parameter direction.
    pub divisions: u32,
}

impl GlobalConfig {
    /// Builds a configuration enforcing strict validation of the supplied
    /// tolerance and division count.
    ///
    /// # Examples
    /// ```
    /// use config::constants::GlobalConfig;
    /// let cfg = GlobalConfig::new(1.0e-6, 24).expect("valid config");
    /// assert_eq!(cfg.divisions, 24);
    /// ```
    pub fn new(tolerance: f64, divisions: u32) -> Result<Self, ConfigError> {
        if !tolerance.is_finite() || tolerance <= 0.0 {
            return Err(ConfigError::InvalidTolerance(tolerance));
        }
        if divisions == 0 {
            return Err(ConfigError::InvalidDivisions(divisions));
        }
        if divisions > MAX_DIVISIONS {
            return Err(ConfigError::TooManyDivisions {
                count: divisions,
                max: MAX_DIVISIONS,
            });
        }
        Ok(Self {
            tolerance,
            divisions,
        })
    }
}

impl Default for GlobalConfig {
    fn default() -> Self {
        Self {
            tolerance: DEFAULT_TOLERANCE,
            divisions: DEFAULT_DIVISIONS,
        }
    }
}

/// Error returned when invalid configuration values are provided.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ConfigError {
    /// Raised when tolerance is zero, negative or not finite.
    InvalidTolerance(f64),
    /// Raised when the division count cannot cover the parameter domain.
    InvalidDivisions(u32),
    /// Raised when the division count exceeds [`MAX_DIVISIONS`].
    TooManyDivisions { count: u32, max: u32 },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidTolerance(value) => {
                write!(f, "tolerance must be positive and finite: {value}")
            }
            ConfigError::InvalidDivisions(value) => {
                write!(f, "divisions must be >= 1: {value}")
            }
            ConfigError::TooManyDivisions { count, max } => {
                write!(f, "divisions {count} exceed the maximum of {max}")
            }
        }
    }
}

impl std::error::Error for ConfigError {}
