//! # Seema-Geo: Cadastral Boundary-to-Scene Pipeline
//!
//! Converts legal parcel boundaries fetched from a cadastral service into
//! the point lists and transforms an AR rendering layer needs to draw them
//! at true-to-life scale and position.
//!
//! ## Pipeline
//!
//! ```text
//! ┌──────────────┐   ┌───────────┐   ┌─────────┐   ┌────────────┐
//! │ GeoJSON feed │──▶│ selection │──▶│ corners │──▶│ projection │──▶ scene sink
//! └──────────────┘   └───────────┘   └─────────┘   └────────────┘
//!      ingest          subject        2-4 key        geodetic →
//!                      parcel         corners        East-North-Up
//!
//!                    ┌───────────┐
//!  manual tier only: │ alignment │──▶ similarity transform ──▶ scene sink
//!                    └───────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```rust
//! use seema_geo::core::{GeoPoint, Parcel, Polygon, Ring};
//! use seema_geo::corners::CornerConfig;
//! use seema_geo::pipeline::build_overlay;
//!
//! let boundary = Ring::new(vec![
//!     GeoPoint::new(-41.2905, 174.7795),
//!     GeoPoint::new(-41.2905, 174.7805),
//!     GeoPoint::new(-41.2895, 174.7805),
//!     GeoPoint::new(-41.2895, 174.7795),
//! ]);
//! let parcels = vec![Parcel::new(Some("Lot 1 DP 100".into()), Polygon::new(boundary))];
//! let query = GeoPoint::new(-41.2900, 174.7800);
//!
//! let overlay = build_overlay(&parcels, &query, &CornerConfig::default(), 0).unwrap();
//! assert_eq!(overlay.corners.len(), 4);
//! ```
//!
//! ## Coordinate Frames
//!
//! - **Geodetic**: latitude/longitude degrees, altitude meters. The fetch
//!   layer's frame; GeoJSON arrives in (longitude, latitude) order and is
//!   swapped at ingestion.
//! - **ENU**: east/north/up meters about a geodetic origin, via a
//!   flat-Earth tangent approximation valid within a few hundred meters.
//! - **Local**: the AR session's device frame; only manual alignment
//!   touches it.
//!
//! ## Design
//!
//! Every stage is a pure, synchronous, stateless function: no I/O, no
//! shared state, no locks. Identical inputs give identical outputs, so
//! stages may be re-invoked or run concurrently over independent parcels
//! without coordination. Errors are a closed, deterministic taxonomy in
//! [`error::SeemaError`].

#![warn(missing_docs)]

pub mod alignment;
pub mod core;
pub mod corners;
pub mod error;
pub mod ingest;
pub mod pipeline;
pub mod projection;
pub mod selection;

// Re-export main types at crate root
pub use alignment::{compute_alignment, AlignmentCorrespondence, SimilarityTransform};
pub use crate::core::{CornerPick, CornerSet, EnuPoint, GeoPoint, LocalPoint, Parcel, Polygon, Ring};
pub use corners::{reduce_to_corners, CornerConfig};
pub use error::{Result, SeemaError};
pub use ingest::{parse_feature_collection, search_bbox, BoundingBox};
pub use pipeline::{
    build_manual_overlay, build_overlay, decide_method, AccuracyTier, BoundaryOverlay,
    ManualOverlay, OverlayMetadata, PlacementMethod, SessionCapabilities,
};
pub use projection::{from_enu, polygon_area_m2, ring_centroid, to_enu};
pub use selection::{ring_contains, select_subject};
