//! Core library for the weather web app.
//!
//! This crate defines:
//! - The city → coordinates → current weather lookup and its error taxonomy
//! - The Open-Meteo provider behind small `Geocoder` / `WeatherSource` traits
//! - The weather-code description and icon tables
//! - Configuration loading
//!
//! It is used by `weather-web`, but can also be reused by other binaries or services.

pub mod codes;
pub mod config;
pub mod error;
pub mod model;
pub mod provider;
pub mod service;

pub use config::{Config, ServerConfig, UpstreamConfig};
pub use error::LookupError;
pub use model::{CurrentConditions, GeocodeResult, LookupRequest, WeatherResult};
pub use provider::{Geocoder, OpenMeteoClient, WeatherSource};
pub use service::WeatherLookupService;
