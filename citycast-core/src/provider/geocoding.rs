use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use crate::{
    error::{Error, Result},
    model::Coordinates,
};

use super::{GeocodeResolver, get_json};

pub const DEFAULT_GEOCODING_URL: &str = "https://geocoding-api.open-meteo.com/v1/search";

const ENDPOINT: &str = "geocoding";

/// Open-Meteo geocoding search, asking for a single best match.
#[derive(Debug, Clone)]
pub struct OpenMeteoGeocoder {
    http: Client,
    url: String,
}

impl OpenMeteoGeocoder {
    pub fn new(http: Client, url: impl Into<String>) -> Self {
        Self { http, url: url.into() }
    }
}

impl Default for OpenMeteoGeocoder {
    fn default() -> Self {
        Self::new(Client::new(), DEFAULT_GEOCODING_URL)
    }
}

#[derive(Debug, Deserialize)]
struct GeoSearchResponse {
    // Omitted entirely by the API when nothing matches.
    #[serde(default)]
    results: Vec<GeoResult>,
}

#[derive(Debug, Deserialize)]
struct GeoResult {
    latitude: f64,
    longitude: f64,
}

#[async_trait]
impl GeocodeResolver for OpenMeteoGeocoder {
    async fn resolve(&self, city: &str) -> Result<Coordinates> {
        let parsed: GeoSearchResponse =
            get_json(&self.http, ENDPOINT, &self.url, &[("name", city), ("count", "1")]).await?;

        let first = parsed
            .results
            .into_iter()
            .next()
            .ok_or_else(|| Error::NotFound { city: city.to_string() })?;

        tracing::debug!(
            city,
            latitude = first.latitude,
            longitude = first.longitude,
            "resolved city"
        );

        Ok(Coordinates { latitude: first.latitude, longitude: first.longitude })
    }
}
