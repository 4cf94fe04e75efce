use std::path::PathBuf;

/// Message shown for an empty city input.
pub const VALIDATION_MESSAGE: &str = "Please enter a city name.";

/// Message shown for every failed lookup, whatever the underlying cause.
pub const GENERIC_FAILURE_MESSAGE: &str = "Could not fetch weather. Try another city.";

/// Everything that can go wrong between the input box and the recent list.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("city name is empty")]
    Validation,

    #[error("no geocoding match for '{city}'")]
    NotFound { city: String },

    #[error("{endpoint} request failed with status {status}: {body}")]
    Status {
        endpoint: &'static str,
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("failed to reach {endpoint}")]
    Transport {
        endpoint: &'static str,
        #[source]
        source: reqwest::Error,
    },

    #[error("unexpected {endpoint} response body")]
    Decode {
        endpoint: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("stored '{key}' payload is not a list of weather records")]
    Deserialization {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to serialize recent searches")]
    Serialization(#[source] serde_json::Error),

    #[error("storage I/O failed at {}", path.display())]
    Storage {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

impl Error {
    /// True for both non-2xx statuses and transport failures.
    pub fn is_network(&self) -> bool {
        matches!(self, Error::Status { .. } | Error::Transport { .. })
    }

    /// The text the presentation layer shows for this error. The taxonomy
    /// collapses to a single generic message except for empty input.
    pub fn user_message(&self) -> &'static str {
        match self {
            Error::Validation => VALIDATION_MESSAGE,
            _ => GENERIC_FAILURE_MESSAGE,
        }
    }
}
