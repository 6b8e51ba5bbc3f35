//! Layer groups, basemaps, and the layer control.
//!
//! A `LayerGroup` is a named collection of rendered features, populated by
//! exactly one pipeline and toggled as a unit. Basemaps are the mutually
//! exclusive tile backgrounds; the `LayerControl` owns both sets and
//! enforces the selection rules.

use serde::Serialize;

use crate::style::StyleDescriptor;

/// Shared attribution for all Mapbox basemap styles.
const MAPBOX_ATTRIBUTION: &str = "Map data © <a href=\"https://www.openstreetmap.org/\">OpenStreetMap</a> contributors, <a href=\"https://creativecommons.org/licenses/by-sa/2.0/\">CC-BY-SA</a>, Imagery (c) <a href=\"https://www.mapbox.com/\">Mapbox</a>";

/// Maximum zoom level for every basemap variant.
const MAX_ZOOM: u8 = 18;

/// Positioned geometry of one rendered feature, in `[lat, lon]` display
/// order.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Shape {
    /// Circle marker at one position; radius comes from the style.
    Circle { center: [f64; 2] },
    /// One or more polylines (plate boundary segments).
    Path { lines: Vec<Vec<[f64; 2]>> },
}

/// One graphical object: geometry, resolved style, optional popup text.
#[derive(Debug, Clone, Serialize)]
pub struct RenderedFeature {
    pub shape: Shape,
    pub style: StyleDescriptor,
    /// Popup HTML shown on click, when the feature has one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub popup: Option<String>,
}

/// A named, independently toggleable collection of rendered features.
#[derive(Debug, Clone, Serialize)]
pub struct LayerGroup {
    pub name: String,
    /// Whether the layer is drawn on the map. Starts hidden; the owning
    /// pipeline flips it on once population completes.
    pub visible: bool,
    /// Provenance line from the feed metadata, when the feed carries one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    pub features: Vec<RenderedFeature>,
}

impl LayerGroup {
    /// Create an empty, hidden group.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            visible: false,
            source: None,
            features: Vec::new(),
        }
    }

    pub fn push(&mut self, feature: RenderedFeature) {
        self.features.push(feature);
    }

    pub fn mark_visible(&mut self) {
        self.visible = true;
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.features.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }
}

/// One basemap tile source with its credential already substituted.
#[derive(Debug, Clone, Serialize)]
pub struct Basemap {
    pub name: String,
    pub url: String,
    pub attribution: &'static str,
    #[serde(rename = "maxZoom")]
    pub max_zoom: u8,
}

impl Basemap {
    /// Build a basemap for one Mapbox style id, substituting the access
    /// token into the tile URL template.
    #[must_use]
    pub fn mapbox(name: impl Into<String>, style_id: &str, access_token: &str) -> Self {
        let url = format!(
            "https://api.mapbox.com/styles/v1/mapbox/{style_id}/tiles/{{z}}/{{x}}/{{y}}?access_token={access_token}"
        );
        Self {
            name: name.into(),
            url,
            attribution: MAPBOX_ATTRIBUTION,
            max_zoom: MAX_ZOOM,
        }
    }

    /// The three stock basemaps: street, satellite-hybrid, night navigation.
    #[must_use]
    pub fn standard_set(access_token: &str) -> Vec<Self> {
        vec![
            Self::mapbox("Streets", "streets-v11", access_token),
            Self::mapbox("Satellite", "satellite-streets-v11", access_token),
            Self::mapbox("Night Mode", "navigation-night-v1", access_token),
        ]
    }
}

/// The user-toggleable layer registry: exclusive basemap choice plus
/// independent overlay toggles.
#[derive(Debug, Clone, Serialize)]
pub struct LayerControl {
    basemaps: Vec<Basemap>,
    /// Index of the active basemap
    active_basemap: usize,
    overlays: Vec<LayerGroup>,
}

impl LayerControl {
    /// Create a control with the given basemaps; the first is active.
    ///
    /// # Panics
    ///
    /// Panics if `basemaps` is empty.
    #[must_use]
    pub fn new(basemaps: Vec<Basemap>) -> Self {
        assert!(!basemaps.is_empty(), "at least one basemap is required");
        Self {
            basemaps,
            active_basemap: 0,
            overlays: Vec::new(),
        }
    }

    /// Register an overlay group. Groups keep their own visibility.
    pub fn add_overlay(&mut self, group: LayerGroup) {
        self.overlays.push(group);
    }

    /// Select a basemap by name. Exactly one basemap is active at a time;
    /// overlays are untouched. Returns false if the name is unknown.
    pub fn select_basemap(&mut self, name: &str) -> bool {
        match self.basemaps.iter().position(|b| b.name == name) {
            Some(i) => {
                self.active_basemap = i;
                true
            }
            None => false,
        }
    }

    /// Flip one overlay's visibility. Other overlays and the basemap
    /// selection are untouched. Returns false if the name is unknown.
    pub fn toggle_overlay(&mut self, name: &str) -> bool {
        match self.overlays.iter_mut().find(|g| g.name == name) {
            Some(group) => {
                group.visible = !group.visible;
                true
            }
            None => false,
        }
    }

    #[must_use]
    pub fn active_basemap(&self) -> &Basemap {
        &self.basemaps[self.active_basemap]
    }

    #[must_use]
    pub fn basemaps(&self) -> &[Basemap] {
        &self.basemaps
    }

    #[must_use]
    pub fn overlays(&self) -> &[LayerGroup] {
        &self.overlays
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn control_with_overlays() -> LayerControl {
        let mut control = LayerControl::new(Basemap::standard_set("tok"));
        for name in ["Earthquakes", "Tectonic Plates", "Major Earthquakes"] {
            let mut group = LayerGroup::new(name);
            group.mark_visible();
            control.add_overlay(group);
        }
        control
    }

    #[test]
    fn test_token_substitution() {
        let basemap = Basemap::mapbox("Streets", "streets-v11", "pk.test123");
        assert!(basemap.url.contains("streets-v11"));
        assert!(basemap.url.ends_with("access_token=pk.test123"));
        assert_eq!(basemap.max_zoom, 18);
    }

    #[test]
    fn test_basemap_selection_is_exclusive() {
        let mut control = control_with_overlays();
        assert_eq!(control.active_basemap().name, "Streets");

        assert!(control.select_basemap("Night Mode"));
        assert_eq!(control.active_basemap().name, "Night Mode");

        // Unknown names leave the selection alone.
        assert!(!control.select_basemap("Topographic"));
        assert_eq!(control.active_basemap().name, "Night Mode");
    }

    #[test]
    fn test_overlay_toggle_is_independent() {
        let mut control = control_with_overlays();
        let basemap_before = control.active_basemap().name.clone();

        assert!(control.toggle_overlay("Tectonic Plates"));

        let visible: Vec<bool> = control.overlays().iter().map(|g| g.visible).collect();
        assert_eq!(visible, vec![true, false, true]);
        assert_eq!(control.active_basemap().name, basemap_before);

        // Toggling back restores the original state.
        assert!(control.toggle_overlay("Tectonic Plates"));
        assert!(control.overlays().iter().all(|g| g.visible));
    }

    #[test]
    fn test_unknown_overlay_toggle_is_a_noop() {
        let mut control = control_with_overlays();
        assert!(!control.toggle_overlay("Volcanoes"));
        assert!(control.overlays().iter().all(|g| g.visible));
    }
}
