//! Feed pipeline: fetch, style, deposit.
//!
//! One pipeline run owns one layer group. It fetches a single GeoJSON
//! collection, renders every feature with the configured styling, and
//! marks the group visible when population completes. Failures are
//! contained here: a failed fetch logs a warning and hands the group back
//! empty and hidden, leaving the other pipelines and the basemap alone.

use tracing::{info, warn};

use crate::classify::ClassificationScheme;
use crate::client::FeedClient;
use crate::layers::{LayerGroup, RenderedFeature, Shape};
use crate::models::{Feature, FeatureCollection, Metadata};
use crate::style::{boundary_style, point_style};

/// How a pipeline styles the features it renders.
#[derive(Debug, Clone)]
pub enum FeatureStyling {
    /// Circle markers colored by magnitude, with magnitude/place popups.
    Markers(ClassificationScheme),
    /// Fixed-style boundary lines, no popups.
    Boundaries,
}

/// Run one pipeline to completion: fetch `url`, populate `group`, flip it
/// visible. Best-effort and fire-and-forget: every failure mode ends with
/// a warning and an empty, hidden group. No retry.
pub async fn run(
    client: &FeedClient,
    url: &str,
    styling: &FeatureStyling,
    mut group: LayerGroup,
) -> LayerGroup {
    match client.fetch_collection(url).await {
        Ok(collection) => {
            populate(&mut group, &collection, styling);
            group.mark_visible();
            info!("layer '{}' populated with {} features", group.name, group.len());
        }
        Err(e) => {
            warn!("fetch failed, layer '{}' left empty: {e}", group.name);
        }
    }
    group
}

/// Render every feature of a collection into the group. One rendered
/// object per feature, each with a freshly computed style descriptor.
pub fn populate(group: &mut LayerGroup, collection: &FeatureCollection, styling: &FeatureStyling) {
    group.source = collection.metadata.as_ref().map(describe_feed);
    for feature in &collection.features {
        group.push(render_feature(feature, styling));
    }
}

/// Provenance line for a layer, from the feed metadata.
fn describe_feed(meta: &Metadata) -> String {
    match meta.generated_time() {
        Some(t) => format!("{} (generated {} UTC)", meta.title, t.format("%Y-%m-%d %H:%M:%S")),
        None => meta.title.clone(),
    }
}

fn render_feature(feature: &Feature, styling: &FeatureStyling) -> RenderedFeature {
    let shape = match feature.geometry.point_latlng() {
        Some(center) => Shape::Circle { center },
        None => Shape::Path {
            lines: feature.geometry.paths_latlng(),
        },
    };

    match styling {
        FeatureStyling::Markers(scheme) => RenderedFeature {
            shape,
            style: point_style(scheme, feature.magnitude_or_zero()),
            popup: Some(popup_html(feature)),
        },
        FeatureStyling::Boundaries => RenderedFeature {
            shape,
            style: boundary_style(),
            popup: None,
        },
    }
}

/// Popup body for an earthquake marker.
fn popup_html(feature: &Feature) -> String {
    let mag = feature
        .properties
        .mag
        .map_or_else(|| "?".into(), |m| format!("{m:.1}"));
    let place = feature
        .properties
        .place
        .as_deref()
        .unwrap_or("Unknown location");

    format!("Magnitude: {mag}<br>Location: {place}")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_collection() -> FeatureCollection {
        let json = r#"{
            "type": "FeatureCollection",
            "metadata": {"generated": 1722000000000, "title": "test", "count": 3},
            "features": [
                {"type": "Feature", "id": "a", "properties": {"mag": 5.4, "place": "off the coast"}, "geometry": {"type": "Point", "coordinates": [10.0, 20.0, 5.0]}},
                {"type": "Feature", "id": "b", "properties": {"mag": 0.0, "place": "somewhere quiet"}, "geometry": {"type": "Point", "coordinates": [11.0, 21.0, 5.0]}},
                {"type": "Feature", "id": "c", "properties": {"mag": null, "place": null}, "geometry": {"type": "Point", "coordinates": [12.0, 22.0, 5.0]}}
            ]
        }"#;
        serde_json::from_str(json).expect("parse")
    }

    #[test]
    fn test_populate_renders_every_feature() {
        let mut group = LayerGroup::new("Earthquakes");
        let styling = FeatureStyling::Markers(ClassificationScheme::six_bucket());

        populate(&mut group, &sample_collection(), &styling);

        assert_eq!(group.len(), 3);
        assert!(group.source.as_deref().is_some_and(|s| s.starts_with("test")));
        for rendered in &group.features {
            assert!(matches!(rendered.shape, Shape::Circle { .. }));
            assert!(rendered.style.radius.is_some());
            assert!(rendered.style.fill_color.is_some());
        }
    }

    #[test]
    fn test_marker_popup_formats_magnitude_and_place() {
        let mut group = LayerGroup::new("Earthquakes");
        let styling = FeatureStyling::Markers(ClassificationScheme::six_bucket());
        populate(&mut group, &sample_collection(), &styling);

        assert_eq!(
            group.features[0].popup.as_deref(),
            Some("Magnitude: 5.4<br>Location: off the coast")
        );
        // Missing values degrade rather than fail.
        assert_eq!(
            group.features[2].popup.as_deref(),
            Some("Magnitude: ?<br>Location: Unknown location")
        );
    }

    #[test]
    fn test_zero_magnitude_marker_keeps_floor_radius() {
        let mut group = LayerGroup::new("Earthquakes");
        let styling = FeatureStyling::Markers(ClassificationScheme::six_bucket());
        populate(&mut group, &sample_collection(), &styling);

        assert_eq!(group.features[1].style.radius, Some(1.0));
        assert_eq!(group.features[2].style.radius, Some(1.0));
    }

    #[test]
    fn test_boundary_styling_has_no_popup() {
        let json = r#"{
            "type": "FeatureCollection",
            "features": [
                {"type": "Feature", "properties": {}, "geometry": {"type": "LineString", "coordinates": [[0.0, 0.0], [1.0, 1.0]]}}
            ]
        }"#;
        let collection: FeatureCollection = serde_json::from_str(json).expect("parse");

        let mut group = LayerGroup::new("Tectonic Plates");
        populate(&mut group, &collection, &FeatureStyling::Boundaries);

        assert_eq!(group.len(), 1);
        let rendered = &group.features[0];
        assert!(matches!(rendered.shape, Shape::Path { .. }));
        assert!(rendered.popup.is_none());
        assert_eq!(rendered.style.color, "#751082");
    }

    #[tokio::test]
    async fn test_failed_fetch_leaves_group_empty_and_hidden() {
        let client = FeedClient::new().expect("client");
        let styling = FeatureStyling::Markers(ClassificationScheme::six_bucket());
        let group = LayerGroup::new("Earthquakes");

        // Nothing listens here; the pipeline must swallow the failure.
        let group = run(&client, "http://127.0.0.1:1/all_week.geojson", &styling, group).await;

        assert!(group.is_empty());
        assert!(!group.visible);
    }
}
