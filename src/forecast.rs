//! Current conditions and rain chance via the Open-Meteo forecast API.

use async_trait::async_trait;
use reqwest::Client;
use std::sync::Arc;
use tracing::{debug, instrument};

use crate::constants::{CURRENT_FIELDS, DAILY_FIELDS};
use crate::error::{LookupError, LookupStage};
use crate::http::get_json;
use crate::models::{Coordinates, ForecastResponse, WeatherSnapshot};

#[async_trait]
pub trait WeatherFetcher: Send + Sync {
    async fn fetch(&self, coords: &Coordinates) -> Result<WeatherSnapshot, LookupError>;
}

pub struct OpenMeteoForecaster {
    client: Arc<Client>,
    base_url: String,
}

impl OpenMeteoForecaster {
    pub fn new(client: Arc<Client>, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    fn forecast_url(&self, coords: &Coordinates) -> String {
        format!(
            "{}/forecast?latitude={}&longitude={}&current={}&daily={}&timezone=auto",
            self.base_url, coords.latitude, coords.longitude, CURRENT_FIELDS, DAILY_FIELDS
        )
    }
}

#[async_trait]
impl WeatherFetcher for OpenMeteoForecaster {
    #[instrument(skip(self, coords), fields(lat = coords.latitude, lon = coords.longitude))]
    async fn fetch(&self, coords: &Coordinates) -> Result<WeatherSnapshot, LookupError> {
        let url = self.forecast_url(coords);
        debug!("Forecast request URL: {}", url);

        let forecast: ForecastResponse = get_json(&self.client, &url, LookupStage::Forecast).await?;
        let snapshot = WeatherSnapshot::from_forecast(forecast);

        debug!(
            temperature = ?snapshot.temperature_c,
            rain_chance = snapshot.rain_chance_pct,
            "Forecast parsed"
        );
        Ok(snapshot)
    }
}
