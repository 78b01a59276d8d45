//! City weather lookup with a short localized advisory.
//!
//! A city name is geocoded, its current conditions and rain chance are
//! fetched from Open-Meteo, and one of five fixed advisories is chosen.
//! [`WeatherLookup`] is the stateless core; [`WeatherAdvisor`] serves it as
//! MCP tools over stdio.

pub mod advice;
pub mod config;
pub mod constants;
pub mod error;
pub mod forecast;
pub mod formatters;
pub mod geocode;
pub mod http;
pub mod locale;
pub mod lookup;
pub mod models;
pub mod service;
pub mod session;

pub use advice::{advise, Advice};
pub use crate::config::AdvisorConfig;
pub use error::{LookupError, LookupStage};
pub use forecast::{OpenMeteoForecaster, WeatherFetcher};
pub use geocode::{CoordinateResolver, MatchStrategy, OpenMeteoGeocoder};
pub use locale::Locale;
pub use lookup::WeatherLookup;
pub use models::{CityQuery, Coordinates, LookupReport, WeatherSnapshot};
pub use service::WeatherAdvisor;
pub use session::{PendingLookup, Ticket, WeatherPanel};
