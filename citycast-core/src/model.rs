use serde::{Deserialize, Serialize};
use std::fmt;

/// A resolved point on the map. Only lives between the two lookups.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

/// Coarse sky description derived from the WMO weather code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Description {
    Clear,
    Cloudy,
}

impl Description {
    /// Code 0 is a clear sky; everything else is reported as cloudy.
    pub fn from_weather_code(code: i64) -> Self {
        if code == 0 { Self::Clear } else { Self::Cloudy }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Description::Clear => "Clear",
            Description::Cloudy => "Cloudy",
        }
    }
}

impl fmt::Display for Description {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Normalized output of a current-conditions lookup.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CurrentConditions {
    /// Degrees Celsius.
    pub temp: f64,
    pub description: Description,
    /// km/h.
    pub wind: f64,
}

/// The result of one successful search, as displayed and persisted.
///
/// The serialized shape (`city`, `temperature`, `description`, `windSpeed`)
/// is the on-disk format of the recent-search slot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherRecord {
    pub city: String,
    pub temperature: f64,
    pub description: Description,
    #[serde(rename = "windSpeed")]
    pub wind_speed: f64,
}

impl WeatherRecord {
    pub fn new(city: impl Into<String>, conditions: CurrentConditions) -> Self {
        Self {
            city: city.into(),
            temperature: conditions.temp,
            description: conditions.description,
            wind_speed: conditions.wind,
        }
    }

    /// One-line summary, e.g. `Paris: 18°C, Clear, Wind: 10 km/h`.
    pub fn summary(&self) -> String {
        // Adding 0.0 turns -0.0 into 0.0 so it prints as `0`.
        format!(
            "{}: {}°C, {}, Wind: {} km/h",
            self.city,
            self.temperature + 0.0,
            self.description,
            self.wind_speed + 0.0
        )
    }
}
