use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use crate::{
    error::Result,
    model::{CurrentConditions, Description},
};

use super::{WeatherFetcher, get_json};

pub const DEFAULT_FORECAST_URL: &str = "https://api.open-meteo.com/v1/forecast";

const ENDPOINT: &str = "forecast";

/// Open-Meteo forecast endpoint, queried for current conditions only.
#[derive(Debug, Clone)]
pub struct OpenMeteoForecast {
    http: Client,
    url: String,
}

impl OpenMeteoForecast {
    pub fn new(http: Client, url: impl Into<String>) -> Self {
        Self { http, url: url.into() }
    }
}

impl Default for OpenMeteoForecast {
    fn default() -> Self {
        Self::new(Client::new(), DEFAULT_FORECAST_URL)
    }
}

#[derive(Debug, Deserialize)]
struct ForecastResponse {
    current_weather: OmCurrentWeather,
}

#[derive(Debug, Deserialize)]
struct OmCurrentWeather {
    temperature: f64,
    weathercode: i64,
    windspeed: f64,
}

impl From<OmCurrentWeather> for CurrentConditions {
    fn from(cw: OmCurrentWeather) -> Self {
        CurrentConditions {
            temp: cw.temperature,
            description: Description::from_weather_code(cw.weathercode),
            wind: cw.windspeed,
        }
    }
}

#[async_trait]
impl WeatherFetcher for OpenMeteoForecast {
    async fn fetch(&self, latitude: f64, longitude: f64) -> Result<CurrentConditions> {
        let lat = latitude.to_string();
        let lon = longitude.to_string();

        let parsed: ForecastResponse = get_json(
            &self.http,
            ENDPOINT,
            &self.url,
            &[
                ("latitude", lat.as_str()),
                ("longitude", lon.as_str()),
                ("current_weather", "true"),
            ],
        )
        .await?;

        Ok(parsed.current_weather.into())
    }
}
