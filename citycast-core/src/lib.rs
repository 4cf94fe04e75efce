//! Core library for the `citycast` weather lookup.
//!
//! This crate defines:
//! - Geocoding and current-conditions lookups against Open-Meteo
//! - The recent-search list and its durable slot
//! - The search flow that ties them to a view
//! - Configuration handling
//!
//! It is used by `citycast-cli`, but any front end implementing
//! [`WeatherView`] can drive it.

pub mod config;
pub mod error;
pub mod model;
pub mod provider;
pub mod search;
pub mod store;

pub use config::Config;
pub use error::{Error, Result};
pub use model::{Coordinates, CurrentConditions, Description, WeatherRecord};
pub use provider::{GeocodeResolver, OpenMeteoForecast, OpenMeteoGeocoder, WeatherFetcher};
pub use search::{SearchOutcome, WeatherApp, WeatherView};
pub use store::{FileSlotStorage, MemorySlotStorage, RecentSearches, SlotStorage};
