use axum::response::{Html, IntoResponse, Response};
use weather_core::{LookupError, WeatherResult};

const ICON_BASE_URL: &str = "https://openweathermap.org/img/wn";

/// What the single page shows below the form.
#[derive(Debug, Clone, PartialEq)]
pub enum Page {
    Blank,
    Weather(WeatherResult),
    Error(String),
}

impl From<Result<WeatherResult, LookupError>> for Page {
    fn from(outcome: Result<WeatherResult, LookupError>) -> Self {
        match outcome {
            Ok(weather) => Page::Weather(weather),
            Err(e) => Page::Error(e.to_string()),
        }
    }
}

impl IntoResponse for Page {
    fn into_response(self) -> Response {
        Html(render_page(&self)).into_response()
    }
}

pub fn render_page(page: &Page) -> String {
    let section = match page {
        Page::Blank => String::new(),
        Page::Error(message) => {
            format!(r#"<p class="error">{}</p>"#, escape_html(message))
        }
        Page::Weather(w) => weather_card(w),
    };

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>Weather</title>
<style>
body {{ font-family: sans-serif; max-width: 32rem; margin: 2rem auto; padding: 0 1rem; }}
form {{ display: flex; gap: 0.5rem; }}
input[name=city] {{ flex: 1; padding: 0.4rem; }}
.error {{ color: #b00020; }}
.card {{ border: 1px solid #ddd; border-radius: 8px; padding: 1rem; margin-top: 1rem; }}
.card img {{ float: right; }}
</style>
</head>
<body>
<h1>Weather</h1>
<form method="post" action="/weather">
<input type="text" name="city" placeholder="Enter a city" autofocus>
<button type="submit">Get weather</button>
</form>
{section}
</body>
</html>
"#
    )
}

fn weather_card(w: &WeatherResult) -> String {
    format!(
        r#"<div class="card">
<img src="{icon_base}/{icon}@2x.png" alt="{description}">
<h2>{location}</h2>
<p>{description}</p>
<ul>
<li>Temperature: {temperature} &deg;C</li>
<li>Wind speed: {wind} km/h</li>
<li>Humidity: {humidity}</li>
<li>Pressure: {pressure}</li>
</ul>
</div>"#,
        icon_base = ICON_BASE_URL,
        icon = escape_html(&w.icon),
        description = escape_html(&w.description),
        location = escape_html(&location_label(w)),
        temperature = format_reading(w.temperature),
        wind = format_reading(w.wind_speed),
        humidity = escape_html(&w.humidity),
        pressure = escape_html(&w.pressure),
    )
}

/// "City, Country", or just the city when the country is unknown.
pub fn location_label(w: &WeatherResult) -> String {
    if w.country.is_empty() {
        w.city.clone()
    } else {
        format!("{}, {}", w.city, w.country)
    }
}

/// Plain-text summary for the terminal.
pub fn format_summary(w: &WeatherResult) -> String {
    format!(
        "{}\n  {} (icon {})\n  Temperature: {} °C\n  Wind speed:  {} km/h\n  Humidity:    {}\n  Pressure:    {}",
        location_label(w),
        w.description,
        w.icon,
        format_reading(w.temperature),
        format_reading(w.wind_speed),
        w.humidity,
        w.pressure,
    )
}

/// Upstream value as reported, unrounded. Whole numbers keep one decimal
/// (`10.0`, not `10`).
fn format_reading(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 {
        format!("{value:.1}")
    } else {
        value.to_string()
    }
}

fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
