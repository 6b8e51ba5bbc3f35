//! Data models for the GeoJSON feeds this tool consumes.
//!
//! One `Feature` type covers both feed shapes: USGS earthquake summary
//! feeds (Point geometry, magnitude/place properties, feed metadata) and
//! the tectonic plate boundary file (line geometries, no magnitude, no
//! metadata). Everything not guaranteed by both is optional.

use chrono::{DateTime, TimeZone, Utc};
use serde::Deserialize;

use crate::errors::QuakemapError;

/// Top-level GeoJSON response from a feed.
#[derive(Debug, Clone, Deserialize)]
pub struct FeatureCollection {
    /// Always "FeatureCollection"
    #[serde(rename = "type")]
    pub type_: String,

    /// Feed metadata (USGS feeds only; absent from the plate boundary file)
    #[serde(default)]
    pub metadata: Option<Metadata>,

    /// Geospatial records
    pub features: Vec<Feature>,
}

impl FeatureCollection {
    /// Validate the response structure.
    ///
    /// # Errors
    ///
    /// Returns an error if the collection is not a GeoJSON FeatureCollection.
    pub fn validate(&self) -> Result<(), QuakemapError> {
        if self.type_ != "FeatureCollection" {
            return Err(QuakemapError::InvalidResponse(format!(
                "expected type 'FeatureCollection', got '{}'",
                self.type_
            )));
        }
        Ok(())
    }
}

/// Metadata block on USGS summary feeds.
#[derive(Debug, Clone, Deserialize)]
pub struct Metadata {
    /// When this feed was generated (ms since epoch)
    pub generated: i64,

    /// Human-readable title
    pub title: String,

    /// Number of events in response
    pub count: usize,
}

impl Metadata {
    /// Feed generation time as a `DateTime<Utc>`.
    #[must_use]
    pub fn generated_time(&self) -> Option<DateTime<Utc>> {
        Utc.timestamp_millis_opt(self.generated).single()
    }
}

/// A single geospatial record: one earthquake or one boundary segment.
#[derive(Debug, Clone, Deserialize)]
pub struct Feature {
    /// Always "Feature"
    #[serde(rename = "type")]
    pub type_: String,

    /// Stable event ID (USGS feeds; boundary segments have none)
    #[serde(default)]
    pub id: Option<String>,

    /// Geographic location
    pub geometry: Geometry,

    /// Record properties
    #[serde(default)]
    pub properties: Properties,
}

impl Feature {
    /// Magnitude with the missing-value policy applied: absent reads as zero.
    #[must_use]
    pub fn magnitude_or_zero(&self) -> f64 {
        self.properties.mag.unwrap_or(0.0)
    }
}

/// Geometry of a record. Earthquake feeds use `Point`; the plate boundary
/// file uses `LineString`/`MultiLineString` (and `Polygon` for plates).
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", content = "coordinates")]
pub enum Geometry {
    /// `[longitude, latitude, depth_km]`
    Point(Vec<f64>),
    LineString(Vec<Vec<f64>>),
    MultiLineString(Vec<Vec<Vec<f64>>>),
    Polygon(Vec<Vec<Vec<f64>>>),
}

impl Geometry {
    /// For point geometry, the position as `[lat, lon]` (display order).
    #[must_use]
    pub fn point_latlng(&self) -> Option<[f64; 2]> {
        match self {
            Self::Point(coords) => {
                let lon = coords.first().copied()?;
                let lat = coords.get(1).copied()?;
                Some([lat, lon])
            }
            _ => None,
        }
    }

    /// For line/polygon geometry, every ring or segment as `[lat, lon]`
    /// position lists. Empty for points.
    #[must_use]
    pub fn paths_latlng(&self) -> Vec<Vec<[f64; 2]>> {
        fn swap(line: &[Vec<f64>]) -> Vec<[f64; 2]> {
            line.iter()
                .filter_map(|pos| {
                    let lon = pos.first().copied()?;
                    let lat = pos.get(1).copied()?;
                    Some([lat, lon])
                })
                .collect()
        }

        match self {
            Self::Point(_) => Vec::new(),
            Self::LineString(line) => vec![swap(line)],
            Self::MultiLineString(lines) | Self::Polygon(lines) => {
                lines.iter().map(|l| swap(l)).collect()
            }
        }
    }
}

/// Record properties. All optional: tectonic boundary segments carry none
/// of the earthquake fields.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Properties {
    /// Magnitude value
    #[serde(default)]
    pub mag: Option<f64>,

    /// Magnitude type (mb, Ml, Mw, etc.)
    #[serde(default, rename = "magType")]
    pub mag_type: Option<String>,

    /// Human-readable place description
    #[serde(default)]
    pub place: Option<String>,

    /// Event time (ms since epoch)
    #[serde(default)]
    pub time: Option<i64>,

    /// Last update time (ms since epoch)
    #[serde(default)]
    pub updated: Option<i64>,

    /// Event page URL
    #[serde(default)]
    pub url: Option<String>,

    /// Human-readable title
    #[serde(default)]
    pub title: Option<String>,
}
