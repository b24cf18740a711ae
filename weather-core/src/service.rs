use std::sync::Arc;

use tracing::{info, instrument, warn};

use crate::{
    codes::{describe_weather, weather_icon},
    config::UpstreamConfig,
    error::LookupError,
    model::{NOT_AVAILABLE, WeatherResult},
    provider::{Geocoder, OpenMeteoClient, WeatherSource},
};

/// Turns a city name into a [`WeatherResult`]: geocode, then fetch current
/// weather for the first match.
///
/// Holds no per-request state, so one instance can serve concurrent requests.
#[derive(Debug, Clone)]
pub struct WeatherLookupService {
    geocoder: Arc<dyn Geocoder>,
    weather: Arc<dyn WeatherSource>,
}

impl WeatherLookupService {
    pub fn new(geocoder: Arc<dyn Geocoder>, weather: Arc<dyn WeatherSource>) -> Self {
        Self { geocoder, weather }
    }

    /// Service backed by Open-Meteo for both calls.
    pub fn from_config(config: &UpstreamConfig) -> anyhow::Result<Self> {
        let client = Arc::new(OpenMeteoClient::new(config)?);
        Ok(Self::new(client.clone(), client))
    }

    /// Look up current weather for `city`.
    ///
    /// Missing or empty input fails before any network call. Upstream problems
    /// of any kind are logged and reported as [`LookupError::UpstreamFailure`].
    #[instrument(skip(self))]
    pub async fn lookup(&self, city: Option<&str>) -> Result<WeatherResult, LookupError> {
        let city = match city {
            Some(c) if !c.is_empty() => c,
            _ => return Err(LookupError::MissingCity),
        };

        let place = self
            .geocoder
            .geocode(city)
            .await
            .map_err(|e| upstream_failure("geocoding", &e))?
            .ok_or_else(|| LookupError::CityNotFound(city.to_string()))?;

        let current = self
            .weather
            .current_weather(place.latitude, place.longitude)
            .await
            .map_err(|e| upstream_failure("forecast", &e))?;

        info!(
            latitude = place.latitude,
            longitude = place.longitude,
            weather_code = current.weather_code,
            "lookup succeeded"
        );

        Ok(WeatherResult {
            city: city.to_string(),
            country: place.country,
            temperature: current.temperature,
            description: describe_weather(current.weather_code).to_string(),
            humidity: NOT_AVAILABLE.to_string(),
            pressure: NOT_AVAILABLE.to_string(),
            wind_speed: current.wind_speed,
            icon: weather_icon(current.weather_code).to_string(),
        })
    }
}

fn upstream_failure(stage: &str, err: &anyhow::Error) -> LookupError {
    warn!(stage, error = ?err, "upstream call failed");
    LookupError::UpstreamFailure
}
