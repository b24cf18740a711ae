use anyhow::{Context, Result, anyhow};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use crate::{
    config::UpstreamConfig,
    model::{CurrentConditions, GeocodeResult},
};

use super::{Geocoder, WeatherSource};

/// Client for the Open-Meteo geocoding and forecast APIs (no API key needed).
#[derive(Debug, Clone)]
pub struct OpenMeteoClient {
    geocoding_url: String,
    forecast_url: String,
    http: Client,
}

impl OpenMeteoClient {
    pub fn new(config: &UpstreamConfig) -> Result<Self> {
        let http = Client::builder()
            .timeout(config.timeout())
            .user_agent(concat!("weather-core/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to build HTTP client for Open-Meteo")?;

        Ok(Self {
            geocoding_url: config.geocoding_url.clone(),
            forecast_url: config.forecast_url.clone(),
            http,
        })
    }

    async fn get_text(&self, url: &str, query: &[(&str, String)], what: &str) -> Result<String> {
        let res = self
            .http
            .get(url)
            .query(query)
            .send()
            .await
            .with_context(|| format!("Failed to send request to Open-Meteo ({what})"))?;

        let status = res.status();
        let body = res
            .text()
            .await
            .with_context(|| format!("Failed to read Open-Meteo {what} response body"))?;

        if !status.is_success() {
            return Err(anyhow!(
                "Open-Meteo {} request failed with status {}: {}",
                what,
                status,
                truncate_body(&body),
            ));
        }

        Ok(body)
    }
}

#[derive(Debug, Deserialize)]
struct OmGeocodeResponse {
    #[serde(default)]
    results: Option<Vec<OmPlace>>,
}

#[derive(Debug, Deserialize)]
struct OmPlace {
    latitude: f64,
    longitude: f64,
    #[serde(default)]
    country: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OmForecastResponse {
    current_weather: Option<OmCurrentWeather>,
}

#[derive(Debug, Deserialize)]
struct OmCurrentWeather {
    temperature: f64,
    windspeed: f64,
    weathercode: i32,
}

#[async_trait]
impl Geocoder for OpenMeteoClient {
    async fn geocode(&self, city: &str) -> Result<Option<GeocodeResult>> {
        let query = [("name", city.to_string()), ("count", "1".to_string())];
        let body = self.get_text(&self.geocoding_url, &query, "geocoding").await?;

        let parsed: OmGeocodeResponse =
            serde_json::from_str(&body).context("Failed to parse Open-Meteo geocoding JSON")?;

        let Some(place) = parsed.results.and_then(|r| r.into_iter().next()) else {
            debug!(city, "geocoding returned no results");
            return Ok(None);
        };

        Ok(Some(GeocodeResult {
            latitude: place.latitude,
            longitude: place.longitude,
            country: place.country.unwrap_or_default(),
        }))
    }
}

#[async_trait]
impl WeatherSource for OpenMeteoClient {
    async fn current_weather(&self, latitude: f64, longitude: f64) -> Result<CurrentConditions> {
        let query = [
            ("latitude", latitude.to_string()),
            ("longitude", longitude.to_string()),
            ("current_weather", "true".to_string()),
            ("temperature_unit", "celsius".to_string()),
        ];
        let body = self.get_text(&self.forecast_url, &query, "forecast").await?;

        let parsed: OmForecastResponse =
            serde_json::from_str(&body).context("Failed to parse Open-Meteo forecast JSON")?;

        let current = parsed
            .current_weather
            .ok_or_else(|| anyhow!("Open-Meteo forecast response contained no current_weather"))?;

        Ok(CurrentConditions {
            temperature: current.temperature,
            wind_speed: current.windspeed,
            weather_code: current.weathercode,
        })
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::time::Duration;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer) -> OpenMeteoClient {
        let config = UpstreamConfig {
            geocoding_url: format!("{}/v1/search", server.uri()),
            forecast_url: format!("{}/v1/forecast", server.uri()),
            timeout_secs: 1,
        };
        OpenMeteoClient::new(&config).expect("client builds")
    }

    #[tokio::test]
    async fn geocode_sends_name_and_count_and_takes_first_result() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/search"))
            .and(query_param("name", "Springfield"))
            .and(query_param("count", "1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "results": [
                    {"latitude": 39.8, "longitude": -89.64, "country": "United States"},
                    {"latitude": 42.1, "longitude": -72.59, "country": "Elsewhere"}
                ]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let place = client_for(&server)
            .geocode("Springfield")
            .await
            .expect("request ok")
            .expect("has a match");

        assert_eq!(
            place,
            GeocodeResult {
                latitude: 39.8,
                longitude: -89.64,
                country: "United States".to_string(),
            }
        );
    }

    #[tokio::test]
    async fn geocode_missing_country_defaults_to_empty() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/search"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "results": [{"latitude": 0.0, "longitude": 0.0}]
            })))
            .mount(&server)
            .await;

        let place = client_for(&server).geocode("Null Island").await.unwrap().unwrap();
        assert_eq!(place.country, "");
    }

    #[tokio::test]
    async fn geocode_absent_or_empty_results_is_no_match() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(query_param("name", "Absent"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({"generationtime_ms": 0.4})),
            )
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(query_param("name", "Empty"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"results": []})))
            .mount(&server)
            .await;

        let client = client_for(&server);
        assert_eq!(client.geocode("Absent").await.unwrap(), None);
        assert_eq!(client.geocode("Empty").await.unwrap(), None);
    }

    #[tokio::test]
    async fn geocode_server_error_is_an_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
            .mount(&server)
            .await;

        let err = client_for(&server).geocode("Paris").await.unwrap_err();
        assert!(err.to_string().contains("status 500"));
    }

    #[tokio::test]
    async fn forecast_sends_coordinates_and_fixed_flags() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/forecast"))
            .and(query_param("latitude", "48.85"))
            .and(query_param("longitude", "2.35"))
            .and(query_param("current_weather", "true"))
            .and(query_param("temperature_unit", "celsius"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "current_weather": {"temperature": 15.2, "windspeed": 10.0, "weathercode": 3}
            })))
            .expect(1)
            .mount(&server)
            .await;

        let current = client_for(&server).current_weather(48.85, 2.35).await.unwrap();
        assert_eq!(
            current,
            CurrentConditions { temperature: 15.2, wind_speed: 10.0, weather_code: 3 }
        );
    }

    #[tokio::test]
    async fn forecast_without_current_weather_is_an_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"latitude": 1.0})))
            .mount(&server)
            .await;

        let err = client_for(&server).current_weather(1.0, 1.0).await.unwrap_err();
        assert!(err.to_string().contains("no current_weather"));
    }

    #[tokio::test]
    async fn forecast_missing_subfield_is_an_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "current_weather": {"temperature": 3.0, "weathercode": 1}
            })))
            .mount(&server)
            .await;

        let err = client_for(&server).current_weather(1.0, 1.0).await.unwrap_err();
        assert!(err.to_string().contains("Failed to parse Open-Meteo forecast JSON"));
    }

    #[tokio::test]
    async fn slow_upstream_hits_timeout() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"results": []}))
                    .set_delay(Duration::from_secs(3)),
            )
            .mount(&server)
            .await;

        let err = client_for(&server).geocode("Slow").await.unwrap_err();
        assert!(err.to_string().contains("Failed to send request"));
    }

    #[test]
    fn truncate_body_respects_char_boundaries() {
        let long = "é".repeat(300);
        let out = truncate_body(&long);
        assert!(out.ends_with("..."));
        assert_eq!(out.chars().count(), 203);
        assert_eq!(truncate_body("short"), "short");
    }
}
