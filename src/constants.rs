/// User agent string for HTTP requests
pub const USER_AGENT: &str = "city-weather-advisor/0.1.0";

/// Open-Meteo geocoding API base URL
pub const GEOCODING_API_BASE: &str = "https://geocoding-api.open-meteo.com/v1";

/// Open-Meteo forecast API base URL
pub const OPEN_METEO_API_BASE: &str = "https://api.open-meteo.com/v1";

/// Default per-request timeout
pub const REQUEST_TIMEOUT_SECS: u64 = 10;

/// Current-conditions fields requested from the forecast endpoint
pub const CURRENT_FIELDS: &str = "temperature_2m,relative_humidity_2m,precipitation";

/// Daily fields requested from the forecast endpoint
pub const DAILY_FIELDS: &str = "precipitation_probability_max";

/// City shown before the user has asked for one
pub const DEFAULT_CITY: &str = "Varanasi";

/// Upper bound for candidate lists returned by `search_cities`
pub const MAX_CANDIDATES: usize = 10;

// Advice thresholds, inclusive at the lower bound.
pub const UMBRELLA_RAIN_PCT: f64 = 70.0;
pub const SEVERE_HEAT_C: f64 = 34.0;
pub const PLEASANT_C: f64 = 24.0;
pub const MILD_COLD_C: f64 = 16.0;
