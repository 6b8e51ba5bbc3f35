//! Map assembly.
//!
//! Builds the complete map document: three concurrently-run feed
//! pipelines, the basemap set, the layer control, and the legend. The
//! document is self-describing; consumers (the JSON writer, the web page)
//! apply it without re-deriving any styling.

use serde::Serialize;

use crate::classify::ClassificationScheme;
use crate::client::{FeedClient, FeedKind, Window};
use crate::layers::{Basemap, LayerControl, LayerGroup};
use crate::legend::Legend;
use crate::pipeline::{self, FeatureStyling};

/// Initial view center, `[lat, lon]`.
const DEFAULT_CENTER: [f64; 2] = [40.7, -94.5];

/// Initial zoom level.
const DEFAULT_ZOOM: u8 = 3;

/// Everything needed to build one map.
#[derive(Debug, Clone)]
pub struct MapOptions {
    /// Rolling window for the earthquake feeds
    pub window: Window,
    /// Mapbox access token substituted into tile URLs
    pub access_token: String,
}

/// The fully composed map: view, layer registry, legend.
#[derive(Debug, Clone, Serialize)]
pub struct MapDocument {
    pub center: [f64; 2],
    pub zoom: u8,
    pub control: LayerControl,
    pub legend: Legend,
}

impl MapDocument {
    /// Assemble a document from populated layer groups. Overlay order and
    /// the legend's scheme match the primary earthquake layer.
    #[must_use]
    pub fn compose(
        basemaps: Vec<Basemap>,
        earthquakes: LayerGroup,
        tectonic: LayerGroup,
        major: LayerGroup,
    ) -> Self {
        let mut control = LayerControl::new(basemaps);
        control.add_overlay(earthquakes);
        control.add_overlay(tectonic);
        control.add_overlay(major);

        Self {
            center: DEFAULT_CENTER,
            zoom: DEFAULT_ZOOM,
            control,
            legend: Legend::from_scheme(&ClassificationScheme::six_bucket()),
        }
    }
}

/// Fetch all three feeds concurrently and compose the map.
///
/// The pipelines are independent: completion order is immaterial and a
/// failed feed only leaves its own layer empty.
pub async fn build_map(client: &FeedClient, options: &MapOptions) -> MapDocument {
    let earthquake_styling = FeatureStyling::Markers(ClassificationScheme::six_bucket());
    let major_styling = FeatureStyling::Markers(ClassificationScheme::three_bucket());

    let all_url = FeedKind::All(options.window).url();
    let tectonic_url = FeedKind::Tectonic.url();
    let major_url = FeedKind::Major(options.window).url();

    let (earthquakes, tectonic, major) = tokio::join!(
        pipeline::run(
            client,
            &all_url,
            &earthquake_styling,
            LayerGroup::new("Earthquakes"),
        ),
        pipeline::run(
            client,
            &tectonic_url,
            &FeatureStyling::Boundaries,
            LayerGroup::new("Tectonic Plates"),
        ),
        pipeline::run(
            client,
            &major_url,
            &major_styling,
            LayerGroup::new("Major Earthquakes"),
        ),
    );

    MapDocument::compose(
        Basemap::standard_set(&options.access_token),
        earthquakes,
        tectonic,
        major,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn composed() -> MapDocument {
        MapDocument::compose(
            Basemap::standard_set("tok"),
            LayerGroup::new("Earthquakes"),
            LayerGroup::new("Tectonic Plates"),
            LayerGroup::new("Major Earthquakes"),
        )
    }

    #[test]
    fn test_compose_registers_all_layers() {
        let doc = composed();

        let names: Vec<&str> = doc.control.overlays().iter().map(|g| g.name.as_str()).collect();
        assert_eq!(names, vec!["Earthquakes", "Tectonic Plates", "Major Earthquakes"]);

        let basemaps: Vec<&str> = doc.control.basemaps().iter().map(|b| b.name.as_str()).collect();
        assert_eq!(basemaps, vec!["Streets", "Satellite", "Night Mode"]);
        assert_eq!(doc.control.active_basemap().name, "Streets");
    }

    #[test]
    fn test_default_view() {
        let doc = composed();
        assert!((doc.center[0] - 40.7).abs() < f64::EPSILON);
        assert!((doc.center[1] - (-94.5)).abs() < f64::EPSILON);
        assert_eq!(doc.zoom, 3);
    }

    #[test]
    fn test_legend_comes_from_primary_scheme() {
        let doc = composed();
        assert_eq!(doc.legend.entries.len(), 6);
        assert_eq!(doc.legend.entries[5].color, "#ea2c2c");
    }

    #[test]
    fn test_document_serializes() {
        let json = serde_json::to_value(composed()).expect("serialize");
        assert_eq!(json["zoom"], 3);
        assert_eq!(json["control"]["overlays"].as_array().map(Vec::len), Some(3));
        assert_eq!(json["legend"]["entries"][0]["color"], "#98ee00");
    }
}
