//! Pipeline configuration building on the shared `config` crate.
//!
//! The module wraps the workspace configuration so pipeline stages can stay
//! decoupled from literal constants.

use ::config::constants::{tolerance_for_extent, GlobalConfig, DEFAULT_DIVISIONS, DEFAULT_TOLERANCE};

use crate::error::IntersectResult;
use crate::filter::FilterMode;

/// Configuration for one run of the intersection pipeline.
///
/// # Examples
/// ```
/// use surface_intersect::config::PipelineConfig;
/// let cfg = PipelineConfig::default();
/// assert!(cfg.tolerance > 0.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PipelineConfig {
    /// Distance tolerance shared by every stage.
    pub tolerance: f64,
    /// Plate divisions per parameter direction for both surfaces.
    pub divisions: u32,
    /// Candidate pair selection strategy.
    pub filter: FilterMode,
    /// Test candidate pairs on the rayon thread pool.
    pub parallel: bool,
}

impl PipelineConfig {
    /// Creates a new configuration from explicit values.
    ///
    /// # Examples
    /// ```
    /// use surface_intersect::config::PipelineConfig;
    /// let cfg = PipelineConfig::new(1.0e-6, 8).unwrap();
    /// assert_eq!(cfg.divisions, 8);
    /// assert!(PipelineConfig::new(1.0e-6, 0).is_err());
    /// ```
    pub fn new(tolerance: f64, divisions: u32) -> IntersectResult<Self> {
        let global = GlobalConfig::new(tolerance, divisions)?;
        Ok(Self {
            tolerance: global.tolerance,
            divisions: global.divisions,
            ..Self::default()
        })
    }

    /// Creates a configuration whose tolerance is derived from the diagonal of
    /// the scene's bounding box.
    ///
    /// # Examples
    /// ```
    /// use surface_intersect::config::PipelineConfig;
    /// let cfg = PipelineConfig::for_scene(100.0, 16).unwrap();
    /// assert!((cfg.tolerance - 1.0e-4).abs() < 1e-12);
    /// ```
    pub fn for_scene(extent: f64, divisions: u32) -> IntersectResult<Self> {
        Self::new(tolerance_for_extent(extent), divisions)
    }

    /// Returns a copy using the given filter mode.
    pub fn with_filter(mut self, filter: FilterMode) -> Self {
        self.filter = filter;
        self
    }

    /// Returns a copy with parallel pair testing switched on or off.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Re-validates the values, which may have been edited through the public
    /// fields.
    pub fn validate(&self) -> IntersectResult<()> {
        GlobalConfig::new(self.tolerance, self.divisions)?;
        Ok(())
    }
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            tolerance: DEFAULT_TOLERANCE,
            divisions: DEFAULT_DIVISIONS,
            filter: FilterMode::default(),
            parallel: true,
        }
    }
}
