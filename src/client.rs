//! Feed client.
//!
//! Async HTTP access to the USGS summary feeds and the tectonic plate
//! boundary file. Uses reqwest with rustls for TLS.

use std::time::Duration;

use reqwest::Client;
use tracing::{debug, instrument};

use crate::errors::QuakemapError;
use crate::models::FeatureCollection;

/// Default request timeout in seconds.
const REQUEST_TIMEOUT_SECS: u64 = 10;

/// User agent string for feed requests.
const USER_AGENT: &str = concat!("quakemap/", env!("CARGO_PKG_VERSION"));

/// USGS base URL for earthquake summary feeds.
const USGS_BASE_URL: &str = "https://earthquake.usgs.gov/earthquakes/feed/v1.0/summary";

/// Tectonic plate boundaries (PB2002), served as static GeoJSON.
const TECTONIC_URL: &str =
    "https://raw.githubusercontent.com/fraxen/tectonicplates/master/GeoJSON/PB2002_boundaries.json";

/// Rolling time window for the USGS summary feeds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Window {
    Hour,
    Day,
    #[default]
    Week,
    Month,
}

impl Window {
    /// URL segment for this window.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Hour => "hour",
            Self::Day => "day",
            Self::Week => "week",
            Self::Month => "month",
        }
    }
}

impl std::str::FromStr for Window {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "hour" => Ok(Self::Hour),
            "day" => Ok(Self::Day),
            "week" => Ok(Self::Week),
            "month" => Ok(Self::Month),
            _ => Err(format!(
                "unknown window: {s} (expected: hour, day, week, month)"
            )),
        }
    }
}

/// The three feeds that make up one map.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedKind {
    /// All earthquakes in the window, any magnitude
    All(Window),
    /// Earthquakes at or above magnitude 4.5 in the window
    Major(Window),
    /// Static plate boundary geometry
    Tectonic,
}

impl FeedKind {
    /// Full URL for this feed.
    #[must_use]
    pub fn url(self) -> String {
        match self {
            Self::All(window) => format!("{USGS_BASE_URL}/all_{}.geojson", window.as_str()),
            Self::Major(window) => format!("{USGS_BASE_URL}/4.5_{}.geojson", window.as_str()),
            Self::Tectonic => TECTONIC_URL.to_string(),
        }
    }

}

/// HTTP client for GeoJSON feeds.
pub struct FeedClient {
    client: Client,
}

impl FeedClient {
    /// Create a new feed client.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be initialized.
    pub fn new() -> Result<Self, QuakemapError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .user_agent(USER_AGENT)
            .build()?;

        Ok(Self { client })
    }

    /// Fetch and parse one GeoJSON FeatureCollection.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails, the server responds with a
    /// non-success status, or the body is not a valid FeatureCollection.
    #[instrument(skip(self))]
    pub async fn fetch_collection(&self, url: &str) -> Result<FeatureCollection, QuakemapError> {
        debug!("fetching feed from {}", url);

        let response = self.client.get(url).send().await?;

        // Check status before parsing
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(QuakemapError::Feed {
                status: status.as_u16(),
                message: body,
            });
        }

        let feed: FeatureCollection = response.json().await?;

        // Validate response structure
        feed.validate()?;

        debug!("fetched {} features", feed.features.len());
        Ok(feed)
    }
}
