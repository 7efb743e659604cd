//! Configuration loading for seema-view.

use crate::error::Result;
use seema_geo::corners::CornerConfig;
use serde::Deserialize;
use std::path::Path;

/// Main configuration structure
#[derive(Clone, Debug, Deserialize)]
pub struct SeemaConfig {
    #[serde(default)]
    pub query: QueryConfig,
    #[serde(default)]
    pub corners: CornerTuning,
    #[serde(default)]
    pub output: OutputConfig,
}

/// Query point and search radius
#[derive(Clone, Debug, Deserialize)]
pub struct QueryConfig {
    /// Query latitude in degrees (default: Wellington CBD)
    #[serde(default = "default_latitude")]
    pub latitude_deg: f64,

    /// Query longitude in degrees (default: Wellington CBD)
    #[serde(default = "default_longitude")]
    pub longitude_deg: f64,

    /// Search radius in meters (default: 300)
    #[serde(default = "default_radius")]
    pub radius_m: f64,
}

/// Corner reduction tuning, mapped onto [`CornerConfig`]
#[derive(Clone, Debug, Deserialize)]
pub struct CornerTuning {
    /// Duplicate-vertex separation in meters (default: 0.01)
    #[serde(default = "default_dedup_separation")]
    pub dedup_min_separation_m: f64,

    /// Turn-angle significance floor in degrees (default: 5.0)
    #[serde(default = "default_significance")]
    pub significance_min_deg: f64,

    /// Adaptive threshold floor in degrees (default: 10.0)
    #[serde(default = "default_threshold_floor")]
    pub threshold_floor_deg: f64,
}

/// Output configuration
#[derive(Clone, Debug, Deserialize)]
pub struct OutputConfig {
    /// Path to save the SVG audit rendering
    #[serde(default = "default_svg_path")]
    pub svg_path: String,

    /// SVG pixels per meter (default: 4.0)
    #[serde(default = "default_svg_scale")]
    pub svg_scale: f64,
}

// Default value functions
fn default_latitude() -> f64 {
    -41.2889
}
fn default_longitude() -> f64 {
    174.7772
}
fn default_radius() -> f64 {
    300.0
}
fn default_dedup_separation() -> f64 {
    0.01
}
fn default_significance() -> f64 {
    5.0
}
fn default_threshold_floor() -> f64 {
    10.0
}
fn default_svg_path() -> String {
    "output/overlay.svg".to_string()
}
fn default_svg_scale() -> f64 {
    4.0
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self {
            latitude_deg: default_latitude(),
            longitude_deg: default_longitude(),
            radius_m: default_radius(),
        }
    }
}

impl Default for CornerTuning {
    fn default() -> Self {
        Self {
            dedup_min_separation_m: default_dedup_separation(),
            significance_min_deg: default_significance(),
            threshold_floor_deg: default_threshold_floor(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            svg_path: default_svg_path(),
            svg_scale: default_svg_scale(),
        }
    }
}

impl Default for SeemaConfig {
    fn default() -> Self {
        Self {
            query: QueryConfig::default(),
            corners: CornerTuning::default(),
            output: OutputConfig::default(),
        }
    }
}

impl SeemaConfig {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: SeemaConfig = toml::from_str(&content)?;
        Ok(config)
    }
}

impl CornerTuning {
    /// Build the pipeline-facing corner configuration
    pub fn to_corner_config(&self) -> CornerConfig {
        CornerConfig::new()
            .with_dedup_min_separation(self.dedup_min_separation_m)
            .with_significance_min_deg(self.significance_min_deg)
            .with_threshold_floor_deg(self.threshold_floor_deg)
    }
}
