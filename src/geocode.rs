//! Nominatim HTTP adapter for address geocoding.

use serde::Deserialize;
use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::geo::GeoPoint;
use crate::traits::Geocoder;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct NominatimConfig {
    pub base_url: String,
    /// Nominatim's usage policy requires an identifying user agent.
    pub user_agent: String,
    pub timeout_secs: u64,
}

impl Default for NominatimConfig {
    fn default() -> Self {
        Self {
            base_url: "https://nominatim.openstreetmap.org".to_string(),
            user_agent: concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")).to_string(),
            timeout_secs: 10,
        }
    }
}

#[derive(Debug, Clone)]
pub struct NominatimClient {
    config: NominatimConfig,
    client: reqwest::blocking::Client,
}

impl NominatimClient {
    pub fn new(config: NominatimConfig) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .user_agent(config.user_agent.clone())
            .build()?;

        Ok(Self { config, client })
    }

    pub fn search_url(&self) -> String {
        format!("{}/search", self.config.base_url.trim_end_matches('/'))
    }
}

impl Geocoder for NominatimClient {
    fn geocode(&self, address: &str) -> Result<Option<GeoPoint>> {
        let response = self
            .client
            .get(self.search_url())
            .query(&[("q", address), ("format", "json"), ("limit", "1")])
            .send()
            .and_then(|resp| resp.error_for_status())
            .and_then(|resp| resp.json::<Vec<NominatimPlace>>());

        let places = match response {
            Ok(places) => places,
            Err(err) => {
                warn!(address, error = %err, "geocoding request failed");
                return Err(err.into());
            }
        };

        let location = first_location(&places)?;
        debug!(address, found = location.is_some(), "geocoded address");
        Ok(location)
    }
}

/// One entry of a Nominatim `search` response. Coordinates arrive as strings.
#[derive(Debug, Deserialize)]
pub(crate) struct NominatimPlace {
    lat: String,
    lon: String,
}

pub(crate) fn first_location(places: &[NominatimPlace]) -> Result<Option<GeoPoint>> {
    let Some(place) = places.first() else {
        return Ok(None);
    };

    let latitude = parse_coordinate(&place.lat, "lat")?;
    let longitude = parse_coordinate(&place.lon, "lon")?;
    Ok(Some(GeoPoint::new(latitude, longitude)))
}

fn parse_coordinate(value: &str, field: &str) -> Result<f64> {
    value
        .trim()
        .parse::<f64>()
        .map_err(|err| Error::invalid_response(format!("{field} {value:?}: {err}")))
}
