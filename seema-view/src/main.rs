//! Seema-View - Parcel boundary overlay tool
//!
//! Runs the seema-geo pipeline over a saved cadastral GeoJSON response:
//! picks the subject parcel under the query point, reduces its boundary to
//! key corners, and writes an SVG audit rendering of what the AR sink
//! would draw. The WFS fetch itself is out of scope; save the service
//! response to a file and point this tool at it.

mod config;
mod error;
mod svg;

use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

use clap::Parser;
use log::{debug, info};

use config::SeemaConfig;
use error::Result;
use seema_geo::core::GeoPoint;
use seema_geo::ingest::{parse_feature_collection, search_bbox};
use seema_geo::pipeline::{build_overlay, decide_method, SessionCapabilities};
use svg::{render_overlay, SvgConfig};

#[derive(Parser, Debug)]
#[command(name = "seema-view")]
#[command(about = "Render a parcel boundary overlay from a cadastral GeoJSON response")]
struct Args {
    /// Path to the GeoJSON FeatureCollection file
    #[arg(short, long)]
    geojson: String,

    /// Path to a TOML config file (default: seema.toml when present)
    #[arg(short, long)]
    config: Option<String>,

    /// Query latitude override (degrees)
    #[arg(long)]
    lat: Option<f64>,

    /// Query longitude override (degrees)
    #[arg(long)]
    lon: Option<f64>,

    /// SVG output path override
    #[arg(short, long)]
    output: Option<String>,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => {
            info!("Loading configuration from {}", path);
            SeemaConfig::load(Path::new(path))?
        }
        None if Path::new("seema.toml").exists() => {
            info!("Loading configuration from seema.toml");
            SeemaConfig::load(Path::new("seema.toml"))?
        }
        None => {
            info!("Using default configuration");
            SeemaConfig::default()
        }
    };
    if let Some(lat) = args.lat {
        config.query.latitude_deg = lat;
    }
    if let Some(lon) = args.lon {
        config.query.longitude_deg = lon;
    }
    if let Some(output) = args.output {
        config.output.svg_path = output;
    }

    let query = GeoPoint::new(config.query.latitude_deg, config.query.longitude_deg);
    info!(
        "Query point ({:.5}, {:.5}), radius {:.0} m",
        query.latitude_deg, query.longitude_deg, config.query.radius_m
    );
    let bbox = search_bbox(&query, config.query.radius_m);
    debug!(
        "WFS bbox: lat [{:.5}, {:.5}], lon [{:.5}, {:.5}]",
        bbox.min_latitude_deg, bbox.max_latitude_deg, bbox.min_longitude_deg, bbox.max_longitude_deg
    );

    let geojson = std::fs::read_to_string(&args.geojson)?;
    let parcels = parse_feature_collection(&geojson)?;
    info!("Parsed {} candidate parcels from {}", parcels.len(), args.geojson);

    // Offline tool: no live AR session, so the capability signal is a
    // fixed "geo-tracking available" and the audited overlay is the
    // top-tier one.
    let capabilities = SessionCapabilities {
        geo_tracking: true,
        world_tracking: true,
    };
    let method = decide_method(&capabilities);
    debug!("Placement method: {}", method.name());

    let timestamp_ms = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0);

    let corner_config = config.corners.to_corner_config();
    let overlay = build_overlay(&parcels, &query, &corner_config, timestamp_ms)?;

    info!(
        "Subject: {}, {:.0} m², {} corners ({:?}), {} neighbors",
        overlay.metadata.label.as_deref().unwrap_or("unlabelled"),
        overlay.metadata.area_m2,
        overlay.metadata.corner_count,
        overlay.corners.pick,
        overlay.metadata.neighbor_count
    );

    let svg_config = SvgConfig {
        scale: config.output.svg_scale,
        ..SvgConfig::default()
    };
    let document = render_overlay(&overlay, &query, &svg_config);

    let svg_path = Path::new(&config.output.svg_path);
    if let Some(parent) = svg_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    std::fs::write(svg_path, document)?;
    info!("Wrote {}", config.output.svg_path);

    Ok(())
}
