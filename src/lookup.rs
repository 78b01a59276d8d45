//! The geocode -> forecast -> advice pipeline.

use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{info, info_span, warn, Instrument};

use crate::advice::advise;
use crate::config::AdvisorConfig;
use crate::error::LookupError;
use crate::forecast::{OpenMeteoForecaster, WeatherFetcher};
use crate::geocode::{CoordinateResolver, MatchStrategy, OpenMeteoGeocoder};
use crate::http::build_client;
use crate::models::{CityQuery, Coordinates, LookupReport};

/// Stateless orchestrator over a resolver and a fetcher.
///
/// Cloning is cheap and clones share nothing mutable, so concurrent lookups
/// are independent.
#[derive(Clone)]
pub struct WeatherLookup {
    resolver: Arc<dyn CoordinateResolver>,
    fetcher: Arc<dyn WeatherFetcher>,
}

impl WeatherLookup {
    pub fn new(resolver: Arc<dyn CoordinateResolver>, fetcher: Arc<dyn WeatherFetcher>) -> Self {
        Self { resolver, fetcher }
    }

    /// Open-Meteo geocoder and forecaster sharing one HTTP client
    pub fn open_meteo(config: &AdvisorConfig) -> reqwest::Result<Self> {
        let client = build_client(config)?;
        Ok(Self::new(
            Arc::new(OpenMeteoGeocoder::new(
                Arc::clone(&client),
                config.geocoding_base_url.clone(),
            )),
            Arc::new(OpenMeteoForecaster::new(
                client,
                config.forecast_base_url.clone(),
            )),
        ))
    }

    /// Validate, resolve, fetch, then derive advice.
    ///
    /// Blank input fails before any network call. Fetch only starts once
    /// resolve has produced coordinates.
    pub async fn lookup(&self, city_text: &str) -> Result<LookupReport, LookupError> {
        let city = CityQuery::parse(city_text)?;
        self.run(&city).await
    }

    async fn run(&self, city: &CityQuery) -> Result<LookupReport, LookupError> {
        let span = info_span!("lookup", city = city.as_str());

        async move {
            let location = self.resolver.resolve(city).await?;
            let weather = self.fetcher.fetch(&location).await?;

            let advice = weather
                .temperature_c
                .map(|temp| advise(temp, weather.rain_chance_pct));

            info!(
                place = %location.display_name(),
                temperature = ?weather.temperature_c,
                rain_chance = weather.rain_chance_pct,
                ?advice,
                "Lookup complete"
            );

            Ok(LookupReport::new(location, weather, advice))
        }
        .instrument(span)
        .await
    }

    /// Same as [`lookup`](Self::lookup), abandoned as soon as `cancel` fires.
    ///
    /// Blank input is still a validation failure, even with `cancel` fired.
    pub async fn lookup_with_cancel(
        &self,
        city_text: &str,
        cancel: &CancellationToken,
    ) -> Result<LookupReport, LookupError> {
        let city = CityQuery::parse(city_text)?;
        tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                warn!(city = city.as_str(), "Lookup cancelled");
                Err(LookupError::Cancelled)
            }
            result = self.run(&city) => result,
        }
    }

    /// Candidate places for `city_text`, for callers that let the user pick.
    pub async fn candidates(
        &self,
        city_text: &str,
        limit: usize,
    ) -> Result<Vec<Coordinates>, LookupError> {
        let city = CityQuery::parse(city_text)?;
        self.resolver
            .search(&city, MatchStrategy::Candidates(limit))
            .await
    }
}
