//! Open-Meteo (WMO) weather codes mapped to a description and an icon code.
//!
//! The two mappings are independent: codes 1 and 2 share an icon but not a
//! description.

pub const UNKNOWN_DESCRIPTION: &str = "Unknown";

/// Icon used for overcast/fog and for any code without a mapping.
pub const DEFAULT_ICON: &str = "03d";

const DESCRIPTIONS: &[(i32, &str)] = &[
    (0, "Clear sky"),
    (1, "Mainly clear"),
    (2, "Partly cloudy"),
    (3, "Overcast"),
    (45, "Fog"),
    (48, "Depositing rime fog"),
    (51, "Light drizzle"),
    (53, "Moderate drizzle"),
    (55, "Dense drizzle"),
    (61, "Slight rain"),
    (63, "Moderate rain"),
    (65, "Heavy rain"),
    (71, "Slight snow fall"),
    (73, "Moderate snow fall"),
    (75, "Heavy snow fall"),
    (95, "Thunderstorm"),
    (96, "Thunderstorm with slight hail"),
    (99, "Thunderstorm with heavy hail"),
];

pub fn describe_weather(code: i32) -> &'static str {
    DESCRIPTIONS
        .iter()
        .find(|(c, _)| *c == code)
        .map(|(_, desc)| *desc)
        .unwrap_or(UNKNOWN_DESCRIPTION)
}

pub fn weather_icon(code: i32) -> &'static str {
    match code {
        0 => "01d",
        1 | 2 => "02d",
        3 | 45 | 48 => "03d",
        51 | 53 | 55 | 61 | 63 | 65 => "09d",
        71 | 73 | 75 => "13d",
        95 | 96 | 99 => "11d",
        _ => DEFAULT_ICON,
    }
}
