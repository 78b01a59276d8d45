use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::advice::Advice;
use crate::error::LookupError;
use crate::locale::Locale;

// ============================================================================
// Open-Meteo Geocoding API Models
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct GeocodingResponse {
    /// Omitted, or sent as `null`, when nothing matches
    #[serde(default)]
    pub results: Option<Vec<GeocodingResult>>,
}

#[derive(Debug, Deserialize)]
pub struct GeocodingResult {
    pub latitude: f64,
    pub longitude: f64,
    pub name: String,
    pub country: Option<String>,
}

// ============================================================================
// Open-Meteo Forecast API Models
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct ForecastResponse {
    pub current: Option<CurrentData>,
    pub daily: Option<DailyData>,
}

#[derive(Debug, Deserialize)]
pub struct CurrentData {
    #[serde(rename = "temperature_2m")]
    pub temperature: Option<f64>,
    #[serde(rename = "relative_humidity_2m")]
    pub humidity: Option<f64>,
    pub precipitation: Option<f64>,
    pub precipitation_probability: Option<f64>,
}

#[derive(Debug, Deserialize)]
pub struct DailyData {
    #[serde(default)]
    pub precipitation_probability_max: Option<Vec<Option<f64>>>,
}

// ============================================================================
// Domain Models
// ============================================================================

/// A trimmed, non-blank city name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CityQuery(String);

impl CityQuery {
    pub fn parse(input: &str) -> Result<Self, LookupError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(LookupError::Validation);
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// A resolved place
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
    pub name: String,
    pub country: Option<String>,
}

impl Coordinates {
    /// "Name, Country" when the country is known, otherwise just "Name"
    pub fn display_name(&self) -> String {
        match self.country.as_deref() {
            Some(country) if !country.is_empty() => format!("{}, {}", self.name, country),
            _ => self.name.clone(),
        }
    }
}

impl From<GeocodingResult> for Coordinates {
    fn from(result: GeocodingResult) -> Self {
        Self {
            latitude: result.latitude,
            longitude: result.longitude,
            name: result.name,
            country: result.country,
        }
    }
}

/// Current conditions plus the merged rain chance.
///
/// Absent readings stay `None`; a missing humidity is not a 0% humidity.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeatherSnapshot {
    pub temperature_c: Option<f64>,
    pub humidity_pct: Option<f64>,
    pub precipitation_mm: Option<f64>,
    pub rain_chance_pct: f64,
}

impl WeatherSnapshot {
    /// Rain chance priority: first day's daily max, then the current
    /// probability field, then 0. A `null` daily entry counts as absent.
    pub fn from_forecast(forecast: ForecastResponse) -> Self {
        let daily_max = forecast
            .daily
            .as_ref()
            .and_then(|d| d.precipitation_probability_max.as_deref())
            .and_then(|max| max.first().copied().flatten());

        match forecast.current {
            Some(current) => Self {
                temperature_c: current.temperature,
                humidity_pct: current.humidity,
                precipitation_mm: current.precipitation,
                rain_chance_pct: daily_max
                    .or(current.precipitation_probability)
                    .unwrap_or(0.0),
            },
            None => Self {
                temperature_c: None,
                humidity_pct: None,
                precipitation_mm: None,
                rain_chance_pct: daily_max.unwrap_or(0.0),
            },
        }
    }
}

/// Successful lookup payload handed to the presentation layer
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LookupReport {
    pub display_name: String,
    pub name: String,
    pub country: Option<String>,
    pub latitude: f64,
    pub longitude: f64,
    pub weather: WeatherSnapshot,
    /// `None` when the provider had no temperature reading
    pub advice: Option<Advice>,
}

impl LookupReport {
    pub fn new(location: Coordinates, weather: WeatherSnapshot, advice: Option<Advice>) -> Self {
        Self {
            display_name: location.display_name(),
            name: location.name,
            country: location.country,
            latitude: location.latitude,
            longitude: location.longitude,
            weather,
            advice,
        }
    }
}

// ============================================================================
// MCP Tool Request Models
// ============================================================================

#[derive(Debug, Deserialize, Serialize, JsonSchema)]
pub struct LookupWeatherRequest {
    /// City name, e.g. "Varanasi" or "New York"
    pub city: String,
    /// Display language: "hi" (default) or "en"
    pub locale: Option<Locale>,
}

#[derive(Debug, Deserialize, Serialize, JsonSchema)]
pub struct SearchCitiesRequest {
    pub city: String,
    /// Maximum number of candidates (1-10, default 5)
    pub limit: Option<usize>,
}

#[derive(Debug, Deserialize, Serialize, JsonSchema)]
pub struct CurrentWeatherRequest {
    pub locale: Option<Locale>,
}
