//! Per-feature visual styling.
//!
//! Pure composition of the magnitude classifier and the radius function
//! into a resolved style descriptor. No I/O here; descriptors are computed
//! fresh for each feature at render time and never mutated.

use serde::Serialize;

use crate::classify::ClassificationScheme;

/// Stroke color for earthquake markers.
const MARKER_STROKE: &str = "#000000";

/// Stroke color for plate boundary lines.
const BOUNDARY_STROKE: &str = "#751082";

/// Resolved visual attributes for one rendered feature.
///
/// Field names follow the Leaflet path options the map page feeds them to.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StyleDescriptor {
    /// Fill color (markers only)
    #[serde(rename = "fillColor", skip_serializing_if = "Option::is_none")]
    pub fill_color: Option<&'static str>,

    /// Stroke color
    pub color: &'static str,

    /// Stroke opacity
    pub opacity: f64,

    /// Fill opacity (markers only)
    #[serde(rename = "fillOpacity", skip_serializing_if = "Option::is_none")]
    pub fill_opacity: Option<f64>,

    /// Stroke width in pixels
    pub weight: f64,

    /// Marker radius in pixels (markers only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub radius: Option<f64>,
}

/// Display radius for a magnitude.
///
/// A magnitude of exactly zero (the stand-in for absent values) gets a
/// fixed floor of 1 so degenerate points stay visible. Negative magnitudes
/// are passed through unclamped and produce negative radii; rare in feed
/// data but possible, and reproduced rather than corrected here.
#[must_use]
pub fn marker_radius(magnitude: f64) -> f64 {
    if magnitude == 0.0 {
        return 1.0;
    }
    magnitude * 4.0
}

/// Style for one earthquake marker under the given scheme.
#[must_use]
pub fn point_style(scheme: &ClassificationScheme, magnitude: f64) -> StyleDescriptor {
    StyleDescriptor {
        fill_color: Some(scheme.classify(magnitude)),
        color: MARKER_STROKE,
        opacity: 1.0,
        fill_opacity: Some(1.0),
        weight: 0.5,
        radius: Some(marker_radius(magnitude)),
    }
}

/// Style for plate boundary lines. Same descriptor for every segment.
#[must_use]
pub fn boundary_style() -> StyleDescriptor {
    StyleDescriptor {
        fill_color: None,
        color: BOUNDARY_STROKE,
        opacity: 1.0,
        fill_opacity: None,
        weight: 2.5,
        radius: None,
    }
}
