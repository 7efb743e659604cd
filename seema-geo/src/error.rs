//! Error types for the boundary pipeline.
//!
//! Every error here is deterministic: the pipeline performs no I/O, so
//! identical inputs always produce identical outcomes. Numeric edge cases
//! (horizontal ray-cast edges, near-zero denominators) are absorbed locally
//! with epsilon substitution and never surface as errors.

use std::fmt;

use thiserror::Error;

/// Which frame a degenerate alignment correspondence was detected in.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CorrespondenceFrame {
    /// The device/session local frame.
    Local,
    /// The geodetic-derived east-north frame.
    Enu,
}

impl fmt::Display for CorrespondenceFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CorrespondenceFrame::Local => write!(f, "local"),
            CorrespondenceFrame::Enu => write!(f, "ENU"),
        }
    }
}

/// Seema pipeline error type.
#[derive(Error, Debug)]
pub enum SeemaError {
    /// Subject selection received an empty candidate list.
    #[error("no candidate parcels to select from")]
    NoCandidates,

    /// Corner reduction needs at least 3 distinct boundary vertices.
    #[error("boundary ring has {found} distinct points after deduplication, need at least 3")]
    InsufficientPoints {
        /// Distinct vertices remaining after deduplication.
        found: usize,
    },

    /// The two alignment points are too close to fix orientation and scale.
    #[error("alignment points are {separation:.4} apart in the {frame} frame, need at least 0.01")]
    DegenerateCorrespondence {
        /// Frame in which the pair collapsed.
        frame: CorrespondenceFrame,
        /// Measured pair separation (meters or local units).
        separation: f64,
    },

    /// The boundary document is not parseable JSON.
    #[error("boundary document is not valid GeoJSON: {0}")]
    Json(#[from] serde_json::Error),

    /// The boundary document carries a geometry the pipeline cannot use.
    #[error("unsupported geometry type \"{0}\", expected Polygon or MultiPolygon")]
    UnsupportedGeometry(String),

    /// A ring in the boundary document has fewer than 3 positions.
    #[error("ring has only {0} positions, need at least 3")]
    DegenerateRing(usize),

    /// A position array in the boundary document is too short.
    #[error("position has {0} coordinates, need at least [longitude, latitude]")]
    MalformedPosition(usize),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, SeemaError>;
