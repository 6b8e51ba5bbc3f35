//! Web server for the map view.
//!
//! Serves the composed map document and a single full-page Leaflet view
//! that applies it verbatim. All styling decisions are made on the Rust
//! side before the page ever loads; the page only instantiates tile
//! layers, markers, and paths from the precomputed document.

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::State,
    response::{Html, IntoResponse},
    routing::get,
};

use crate::client::FeedClient;
use crate::map::{self, MapDocument, MapOptions};

/// Server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub port: u16,
    pub host: String,
    pub options: MapOptions,
}

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// The document is composed once at startup; every page load sees the
    /// same snapshot.
    document: Arc<MapDocument>,
}

/// Create the Axum router with all routes.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index_handler))
        .route("/api/map", get(map_handler))
        .route("/health", get(health_handler))
        .with_state(state)
}

/// Start the web server: fetch the feeds once, then serve the snapshot.
///
/// # Errors
///
/// Returns an error if the HTTP client cannot be built or the listener
/// fails to bind. Feed failures do not abort startup; they surface as
/// empty layers in the served document.
pub async fn run_server(config: ServerConfig) -> anyhow::Result<()> {
    let client = FeedClient::new()?;

    tracing::info!("fetching feeds ({} window)", config.options.window.as_str());
    let document = map::build_map(&client, &config.options).await;

    let state = AppState {
        document: Arc::new(document),
    };
    let app = create_router(state);

    let addr = format!("{}:{}", config.host, config.port);
    tracing::info!("quakemap serving at http://{}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Serve the map page.
async fn index_handler() -> impl IntoResponse {
    Html(INDEX_HTML)
}

/// Serve the composed map document.
async fn map_handler(State(state): State<AppState>) -> impl IntoResponse {
    Json(state.document.as_ref().clone())
}

/// Health check endpoint.
async fn health_handler() -> impl IntoResponse {
    "ok"
}

/// The full-page map view. Data-driven: everything it draws comes from
/// `/api/map`.
const INDEX_HTML: &str = r##"<!DOCTYPE html>
<html>
<head>
  <meta charset="utf-8">
  <title>quakemap</title>
  <meta name="viewport" content="width=device-width, initial-scale=1.0">
  <link rel="stylesheet" href="https://unpkg.com/leaflet@1.9.4/dist/leaflet.css">
  <script src="https://unpkg.com/leaflet@1.9.4/dist/leaflet.js"></script>
  <style>
    html, body, #map { height: 100%; margin: 0; }
    .legend {
      background: #fff;
      padding: 8px 10px;
      line-height: 18px;
      border-radius: 4px;
      box-shadow: 0 1px 4px rgba(0,0,0,0.3);
      font: 12px/18px sans-serif;
    }
    .legend i {
      width: 14px;
      height: 14px;
      float: left;
      margin-right: 6px;
      opacity: 0.9;
    }
  </style>
</head>
<body>
  <div id="map"></div>
  <script>
    fetch('/api/map')
      .then(function (r) { return r.json(); })
      .then(function (doc) {
        var basemaps = {};
        var activeLayer = null;
        doc.control.basemaps.forEach(function (b, i) {
          var layer = L.tileLayer(b.url, { attribution: b.attribution, maxZoom: b.maxZoom });
          basemaps[b.name] = layer;
          if (i === doc.control.active_basemap) { activeLayer = layer; }
        });

        var map = L.map('map', { center: doc.center, zoom: doc.zoom, layers: [activeLayer] });

        var overlays = {};
        doc.control.overlays.forEach(function (group) {
          var layer = L.layerGroup();
          group.features.forEach(function (f) {
            var obj = f.shape.kind === 'circle'
              ? L.circleMarker(f.shape.center, f.style)
              : L.polyline(f.shape.lines, f.style);
            if (f.popup) { obj.bindPopup(f.popup); }
            obj.addTo(layer);
          });
          overlays[group.name] = layer;
          if (group.visible) { layer.addTo(map); }
        });

        L.control.layers(basemaps, overlays).addTo(map);

        var legend = L.control({ position: 'bottomright' });
        legend.onAdd = function () {
          var div = L.DomUtil.create('div', 'legend');
          doc.legend.entries.forEach(function (e) {
            var label = e.upper === undefined ? e.lower + '+' : e.lower + '&ndash;' + e.upper;
            div.innerHTML += "<i style='background:" + e.color + "'></i> " + label + '<br>';
          });
          return div;
        };
        legend.addTo(map);
      });
  </script>
</body>
</html>
"##;
