use crate::{
    error::{Error, Result},
    model::{Coordinates, CurrentConditions},
};
use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::fmt::Debug;

pub mod forecast;
pub mod geocoding;

pub use forecast::OpenMeteoForecast;
pub use geocoding::OpenMeteoGeocoder;

/// Resolves a city name to the coordinates of its best match.
#[async_trait]
pub trait GeocodeResolver: Send + Sync + Debug {
    async fn resolve(&self, city: &str) -> Result<Coordinates>;
}

/// Fetches current conditions for a point.
#[async_trait]
pub trait WeatherFetcher: Send + Sync + Debug {
    async fn fetch(&self, latitude: f64, longitude: f64) -> Result<CurrentConditions>;
}

/// Issue one GET and decode a JSON body. No retry: the first failure is
/// returned to the caller.
pub(crate) async fn get_json<T: DeserializeOwned>(
    http: &Client,
    endpoint: &'static str,
    url: &str,
    query: &[(&str, &str)],
) -> Result<T> {
    tracing::debug!(endpoint, url, ?query, "sending request");

    let res = http
        .get(url)
        .query(query)
        .send()
        .await
        .map_err(|source| Error::Transport { endpoint, source })?;

    let status = res.status();
    let body = res.text().await.map_err(|source| Error::Transport { endpoint, source })?;

    if !status.is_success() {
        return Err(Error::Status { endpoint, status, body: truncate_body(&body) });
    }

    serde_json::from_str(&body).map_err(|source| Error::Decode { endpoint, source })
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.len() > MAX {
        let mut end = MAX;
        while !body.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}...", &body[..end])
    } else {
        body.to_string()
    }
}
