use parking_lot::Mutex;
use rmcp::{
    handler::server::{tool::ToolRouter, wrapper::Parameters, ServerHandler},
    model::{CallToolResult, Content, Implementation, ProtocolVersion, ServerCapabilities, ServerInfo},
    tool, tool_handler, tool_router,
    ErrorData as McpError,
};
use std::sync::Arc;

use crate::config::AdvisorConfig;
use crate::error::LookupError;
use crate::formatters::{format_candidates, format_report};
use crate::locale::Locale;
use crate::lookup::WeatherLookup;
use crate::models::{CurrentWeatherRequest, LookupReport, LookupWeatherRequest, SearchCitiesRequest};
use crate::session::WeatherPanel;

const DEFAULT_CANDIDATES: usize = 5;

/// MCP front end: owns the display state, delegates lookups to the core
#[derive(Clone)]
pub struct WeatherAdvisor {
    lookup: WeatherLookup,
    panel: Arc<Mutex<WeatherPanel>>,
    default_locale: Locale,
    tool_router: ToolRouter<Self>,
}

impl WeatherAdvisor {
    /// Creates an advisor backed by the Open-Meteo providers in `config`
    pub fn new(config: &AdvisorConfig) -> anyhow::Result<Self> {
        Ok(Self::with_lookup(
            WeatherLookup::open_meteo(config)?,
            config.locale,
            &config.default_city,
        ))
    }

    /// `default_city` is looked up the first time the panel is shown
    pub fn with_lookup(lookup: WeatherLookup, default_locale: Locale, default_city: &str) -> Self {
        Self {
            lookup,
            panel: Arc::new(Mutex::new(WeatherPanel::with_query(default_city))),
            default_locale,
            tool_router: Self::tool_router(),
        }
    }

    /// Runs a lookup and records it on the panel, even if this future is dropped.
    async fn refresh(&self, city: &str) -> Result<LookupReport, LookupError> {
        let pending = WeatherPanel::start(&self.panel, city);
        let outcome = self.lookup.lookup(city).await;
        pending.finish(&outcome);
        outcome
    }

    fn to_mcp_error(err: &LookupError, locale: Locale) -> McpError {
        let message = err.user_message(locale);
        match err {
            LookupError::Validation | LookupError::NotFound(_) => {
                McpError::invalid_params(message, None)
            }
            LookupError::Transport { .. } | LookupError::Cancelled => {
                McpError::internal_error(message, None)
            }
        }
    }
}

#[tool_handler]
impl ServerHandler for WeatherAdvisor {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "city-weather-advisor".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                icons: None,
                title: None,
                website_url: None,
            },
            instructions: Some(
                "Current weather and a short clothing advisory for any city, powered by \
                Open-Meteo. Replies are in Hindi unless locale 'en' is requested."
                    .to_string(),
            ),
        }
    }
}

#[tool_router]
impl WeatherAdvisor {
    /// Looks up current weather and advice for a city
    #[tool(description = "Get current temperature, humidity, precipitation, chance of rain and a short advisory for a city (e.g., 'Varanasi', 'New York'). Optional locale: 'hi' (default) or 'en'.")]
    async fn lookup_weather(
        &self,
        Parameters(request): Parameters<LookupWeatherRequest>,
    ) -> Result<CallToolResult, McpError> {
        tracing::info!("Looking up weather for city: {}", request.city);
        let locale = request.locale.unwrap_or(self.default_locale);

        match self.refresh(&request.city).await {
            Ok(report) => Ok(CallToolResult::success(vec![Content::text(format_report(
                &report, locale,
            ))])),
            Err(err) => {
                tracing::warn!(code = err.code(), "Lookup failed: {}", err);
                Err(Self::to_mcp_error(&err, locale))
            }
        }
    }

    /// Lists candidate places for an ambiguous city name
    #[tool(description = "List up to 10 places matching a city name, best match first, so the user can pick one.")]
    async fn search_cities(
        &self,
        Parameters(request): Parameters<SearchCitiesRequest>,
    ) -> Result<CallToolResult, McpError> {
        tracing::info!("Searching candidates for city: {}", request.city);

        let candidates = self
            .lookup
            .candidates(&request.city, request.limit.unwrap_or(DEFAULT_CANDIDATES))
            .await
            .map_err(|e| Self::to_mcp_error(&e, self.default_locale))?;

        Ok(CallToolResult::success(vec![Content::text(format_candidates(
            &candidates,
        ))]))
    }

    /// Shows whatever the last lookup left on the panel
    #[tool(description = "Show the most recent weather lookup result, or its error. Before any lookup, shows the default city.")]
    async fn current_weather(
        &self,
        Parameters(request): Parameters<CurrentWeatherRequest>,
    ) -> Result<CallToolResult, McpError> {
        let locale = request.locale.unwrap_or(self.default_locale);

        let initial = {
            let panel = self.panel.lock();
            (panel.is_idle() && !panel.query().is_empty()).then(|| panel.query().to_string())
        };
        if let Some(city) = initial {
            tracing::info!("Loading default city: {}", city);
            if let Err(err) = self.refresh(&city).await {
                tracing::warn!(code = err.code(), "Default city lookup failed: {}", err);
            }
        }

        let panel = self.panel.lock();

        let text = if panel.is_loading() {
            locale.labels().loading.to_string()
        } else if let Some(err) = panel.error() {
            err.user_message(locale).to_string()
        } else if let Some(report) = panel.report() {
            format_report(report, locale)
        } else {
            locale.labels().idle.to_string()
        };

        Ok(CallToolResult::success(vec![Content::text(text)]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn advisor_against(server: &MockServer, default_city: &str) -> WeatherAdvisor {
        let config = AdvisorConfig {
            geocoding_base_url: server.uri(),
            forecast_base_url: server.uri(),
            default_city: default_city.to_string(),
            ..AdvisorConfig::default()
        };
        WeatherAdvisor::new(&config).unwrap()
    }

    async fn mount_forecast(server: &MockServer) {
        Mock::given(method("GET"))
            .and(path("/forecast"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "current": {"temperature_2m": 29.0, "relative_humidity_2m": 80, "precipitation": 1.2},
                "daily": {"precipitation_probability_max": [85]}
            })))
            .mount(server)
            .await;
    }

    fn en() -> Parameters<CurrentWeatherRequest> {
        Parameters(CurrentWeatherRequest {
            locale: Some(Locale::En),
        })
    }

    fn text_of(result: &CallToolResult) -> String {
        result
            .content
            .iter()
            .filter_map(|c| c.as_text().map(|t| t.text.clone()))
            .collect()
    }

    #[tokio::test]
    async fn test_idle_panel_without_default_city_prompts() {
        let server = MockServer::start().await;
        let advisor = advisor_against(&server, "");

        let result = advisor.current_weather(en()).await.unwrap();

        assert_eq!(text_of(&result), Locale::En.labels().idle);
        assert!(server.received_requests().await.unwrap_or_default().is_empty());
    }

    #[tokio::test]
    async fn test_first_view_shows_default_city() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/search"))
            .and(query_param("name", "Varanasi"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "results": [{"latitude": 25.32, "longitude": 83.01, "name": "Varanasi", "country": "India"}]
            })))
            .expect(1)
            .mount(&server)
            .await;
        mount_forecast(&server).await;
        let advisor = advisor_against(&server, "Varanasi");

        let first = advisor.current_weather(en()).await.unwrap();
        let again = advisor.current_weather(en()).await.unwrap();

        assert!(text_of(&first).contains("Varanasi, India"));
        assert_eq!(text_of(&first), text_of(&again));
    }

    #[tokio::test]
    async fn test_abandoned_lookup_does_not_stay_loading() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/search"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({"results": []}))
                    .set_delay(Duration::from_secs(5)),
            )
            .mount(&server)
            .await;
        let advisor = advisor_against(&server, "");

        let abandoned = tokio::time::timeout(
            Duration::from_millis(100),
            advisor.lookup_weather(Parameters(LookupWeatherRequest {
                city: "Pune".into(),
                locale: Some(Locale::En),
            })),
        )
        .await;
        assert!(abandoned.is_err());

        let shown = advisor.current_weather(en()).await.unwrap();
        assert_ne!(text_of(&shown), Locale::En.labels().loading);
        assert_eq!(
            text_of(&shown),
            LookupError::Cancelled.user_message(Locale::En)
        );
    }

    #[tokio::test]
    async fn test_lookup_updates_panel() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/search"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "results": [{"latitude": 19.07, "longitude": 72.88, "name": "Mumbai", "country": "India"}]
            })))
            .mount(&server)
            .await;
        mount_forecast(&server).await;
        let advisor = advisor_against(&server, "Varanasi");

        let result = advisor
            .lookup_weather(Parameters(LookupWeatherRequest {
                city: "Mumbai".into(),
                locale: Some(Locale::En),
            }))
            .await
            .unwrap();
        let text = text_of(&result);
        assert!(text.contains("Mumbai, India"));
        assert!(text.contains("umbrella"));

        let shown = advisor.current_weather(en()).await.unwrap();
        assert_eq!(text_of(&shown), text);
    }

    #[tokio::test]
    async fn test_blank_city_is_invalid_params() {
        let server = MockServer::start().await;
        let advisor = advisor_against(&server, "");

        let err = advisor
            .lookup_weather(Parameters(LookupWeatherRequest {
                city: "   ".into(),
                locale: None,
            }))
            .await
            .unwrap_err();

        assert_eq!(err.message, LookupError::Validation.user_message(Locale::Hi));
        assert!(server.received_requests().await.unwrap_or_default().is_empty());
    }
}
