use serde::{Deserialize, Serialize};

/// Placeholder for fields the free Open-Meteo tier does not report.
pub const NOT_AVAILABLE: &str = "N/A";

/// A single form submission. `city` is only checked for presence.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LookupRequest {
    #[serde(default)]
    pub city: Option<String>,
}

impl LookupRequest {
    pub fn new(city: impl Into<String>) -> Self {
        Self { city: Some(city.into()) }
    }

    /// Build from decoded form fields. A repeated `city` keeps the first value.
    pub fn from_fields<I>(fields: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let city = fields
            .into_iter()
            .find(|(name, _)| name == "city")
            .map(|(_, value)| value);
        Self { city }
    }

    pub fn city(&self) -> Option<&str> {
        self.city.as_deref()
    }
}

/// Coordinates of the first geocoding match.
#[derive(Debug, Clone, PartialEq)]
pub struct GeocodeResult {
    pub latitude: f64,
    pub longitude: f64,
    /// Empty when the geocoder did not report a country.
    pub country: String,
}

/// The `current_weather` block of a forecast response.
#[derive(Debug, Clone, PartialEq)]
pub struct CurrentConditions {
    pub temperature: f64,
    pub wind_speed: f64,
    pub weather_code: i32,
}

/// Weather summary shown to the user after a successful lookup.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeatherResult {
    /// The city exactly as the user typed it.
    pub city: String,
    pub country: String,
    /// Degrees Celsius.
    pub temperature: f64,
    pub description: String,
    pub humidity: String,
    pub pressure: String,
    pub wind_speed: f64,
    pub icon: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_request_city_is_optional() {
        let absent: LookupRequest = serde_json::from_str("{}").expect("valid json");
        assert_eq!(absent.city(), None);

        let given: LookupRequest = serde_json::from_str(r#"{"city": " Paris "}"#).unwrap();
        assert_eq!(given.city(), LookupRequest::new(" Paris ").city());
    }

    #[test]
    fn from_fields_keeps_first_city_and_ignores_other_fields() {
        let fields = vec![
            ("units".to_string(), "metric".to_string()),
            ("city".to_string(), "Lyon".to_string()),
            ("city".to_string(), "Nice".to_string()),
        ];
        assert_eq!(LookupRequest::from_fields(fields).city(), Some("Lyon"));

        let no_city = vec![("units".to_string(), "metric".to_string())];
        assert_eq!(LookupRequest::from_fields(no_city).city(), None);
    }

    #[test]
    fn weather_result_serializes_snake_case_fields() {
        let result = WeatherResult {
            city: "Paris".to_string(),
            country: "France".to_string(),
            temperature: 15.2,
            description: "Overcast".to_string(),
            humidity: NOT_AVAILABLE.to_string(),
            pressure: NOT_AVAILABLE.to_string(),
            wind_speed: 10.0,
            icon: "03d".to_string(),
        };
        let value = serde_json::to_value(&result).expect("serialize");
        assert_eq!(value["wind_speed"], 10.0);
        assert_eq!(value["humidity"], "N/A");
    }
}
