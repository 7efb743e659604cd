//! SVG audit rendering of a boundary overlay.
//!
//! Renders the subject parcel's rings in the ENU frame, with the key
//! corners, the ENU origin and the query point marked. The SVG serves as
//! an audit file: what the AR sink would draw, flattened to the horizontal
//! plane.

use std::fmt::Write;

use seema_geo::core::{EnuPoint, GeoPoint};
use seema_geo::pipeline::{ring_to_enu, BoundaryOverlay};
use seema_geo::projection::to_enu;

/// SVG color scheme for visualization
#[derive(Clone, Debug)]
pub struct SvgColorScheme {
    /// Boundary line color
    pub boundary: &'static str,
    /// Hole ring line color
    pub hole: &'static str,
    /// Key corner marker color
    pub corner: &'static str,
    /// Query point marker color
    pub query: &'static str,
    /// Origin cross color
    pub origin: &'static str,
}

impl Default for SvgColorScheme {
    fn default() -> Self {
        Self {
            boundary: "#2222AA",
            hole: "#8888CC",
            corner: "#AA2222",
            query: "#22AA22",
            origin: "#333333",
        }
    }
}

/// Configuration for SVG rendering
#[derive(Clone, Debug)]
pub struct SvgConfig {
    /// Pixels per meter
    pub scale: f64,
    /// Boundary line width
    pub line_width: f64,
    /// Corner marker radius
    pub marker_radius: f64,
    /// Color scheme
    pub colors: SvgColorScheme,
    /// Padding around the drawing in pixels
    pub padding: f64,
}

impl Default for SvgConfig {
    fn default() -> Self {
        Self {
            scale: 4.0,
            line_width: 2.0,
            marker_radius: 4.0,
            colors: SvgColorScheme::default(),
            padding: 20.0,
        }
    }
}

/// Render a boundary overlay to an SVG document string.
pub fn render_overlay(overlay: &BoundaryOverlay, query_point: &GeoPoint, config: &SvgConfig) -> String {
    let rings_enu: Vec<Vec<EnuPoint>> = overlay
        .rings
        .iter()
        .map(|ring| ring_to_enu(ring, &overlay.origin))
        .collect();
    let corners_enu: Vec<EnuPoint> = overlay
        .corners
        .points()
        .iter()
        .map(|p| to_enu(p, &overlay.origin))
        .collect();
    let query_enu = to_enu(query_point, &overlay.origin);

    // Drawing bounds over everything rendered.
    let mut min_e = query_enu.east_m;
    let mut max_e = query_enu.east_m;
    let mut min_n = query_enu.north_m;
    let mut max_n = query_enu.north_m;
    for p in rings_enu.iter().flatten() {
        min_e = min_e.min(p.east_m);
        max_e = max_e.max(p.east_m);
        min_n = min_n.min(p.north_m);
        max_n = max_n.max(p.north_m);
    }

    let width = (max_e - min_e) * config.scale + 2.0 * config.padding;
    let height = (max_n - min_n) * config.scale + 2.0 * config.padding;

    // East maps to +x; north maps up, so the y axis flips.
    let px = |p: &EnuPoint| (p.east_m - min_e) * config.scale + config.padding;
    let py = |p: &EnuPoint| height - ((p.north_m - min_n) * config.scale + config.padding);

    let mut svg = String::new();
    writeln!(&mut svg, r#"<?xml version="1.0" encoding="UTF-8"?>"#).unwrap();
    writeln!(
        &mut svg,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{:.0}" height="{:.0}" viewBox="0 0 {:.0} {:.0}">"#,
        width, height, width, height
    )
    .unwrap();
    writeln!(
        &mut svg,
        r##"  <rect width="100%" height="100%" fill="#FFFFFF"/>"##
    )
    .unwrap();

    if let Some(label) = &overlay.metadata.label {
        writeln!(
            &mut svg,
            r#"  <title>{}: {:.0} m², {}</title>"#,
            label,
            overlay.metadata.area_m2,
            overlay.metadata.method.name()
        )
        .unwrap();
    }

    // Boundary rings: outer first, holes after.
    for (i, ring) in rings_enu.iter().enumerate() {
        let color = if i == 0 {
            config.colors.boundary
        } else {
            config.colors.hole
        };
        let mut points_attr = String::new();
        for p in ring {
            write!(&mut points_attr, "{:.1},{:.1} ", px(p), py(p)).unwrap();
        }
        // Close the implicit ring explicitly.
        if let Some(first) = ring.first() {
            write!(&mut points_attr, "{:.1},{:.1}", px(first), py(first)).unwrap();
        }
        writeln!(
            &mut svg,
            r#"  <polyline points="{}" fill="none" stroke="{}" stroke-width="{:.1}"/>"#,
            points_attr.trim_end(),
            color,
            config.line_width
        )
        .unwrap();
    }

    // Key corner markers.
    for p in &corners_enu {
        writeln!(
            &mut svg,
            r#"  <circle cx="{:.1}" cy="{:.1}" r="{:.1}" fill="{}"/>"#,
            px(p),
            py(p),
            config.marker_radius,
            config.colors.corner
        )
        .unwrap();
    }

    // Query point marker.
    writeln!(
        &mut svg,
        r#"  <circle cx="{:.1}" cy="{:.1}" r="{:.1}" fill="none" stroke="{}" stroke-width="{:.1}"/>"#,
        px(&query_enu),
        py(&query_enu),
        config.marker_radius + 2.0,
        config.colors.query,
        config.line_width
    )
    .unwrap();

    // Origin cross at the ENU zero point.
    let zero = EnuPoint::new(0.0, 0.0, 0.0);
    let (ox, oy) = (px(&zero), py(&zero));
    let arm = config.marker_radius + 2.0;
    writeln!(
        &mut svg,
        r#"  <path d="M {:.1} {:.1} L {:.1} {:.1} M {:.1} {:.1} L {:.1} {:.1}" stroke="{}" stroke-width="1.0"/>"#,
        ox - arm,
        oy,
        ox + arm,
        oy,
        ox,
        oy - arm,
        ox,
        oy + arm,
        config.colors.origin
    )
    .unwrap();

    writeln!(&mut svg, "</svg>").unwrap();
    svg
}
