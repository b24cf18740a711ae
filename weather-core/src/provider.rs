use crate::model::{CurrentConditions, GeocodeResult};
use async_trait::async_trait;
use std::fmt::Debug;

pub mod open_meteo;

pub use open_meteo::OpenMeteoClient;

/// Resolves a free-text place name to coordinates.
#[async_trait]
pub trait Geocoder: Send + Sync + Debug {
    /// `Ok(None)` means the service answered but found no match.
    async fn geocode(&self, city: &str) -> anyhow::Result<Option<GeocodeResult>>;
}

/// Fetches current conditions for a coordinate pair.
#[async_trait]
pub trait WeatherSource: Send + Sync + Debug {
    async fn current_weather(&self, latitude: f64, longitude: f64)
    -> anyhow::Result<CurrentConditions>;
}
