//! City name to coordinates via the Open-Meteo geocoding API.

use async_trait::async_trait;
use reqwest::Client;
use std::sync::Arc;
use tracing::{debug, instrument};

use crate::constants::MAX_CANDIDATES;
use crate::error::{LookupError, LookupStage};
use crate::http::get_json;
use crate::models::{CityQuery, Coordinates, GeocodingResponse};

/// How many geocoding matches a caller wants back
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MatchStrategy {
    /// Trust the provider's top-ranked candidate
    #[default]
    FirstMatch,
    /// Return up to `n` candidates for the user to choose from
    Candidates(usize),
}

impl MatchStrategy {
    fn count(self) -> usize {
        match self {
            Self::FirstMatch => 1,
            Self::Candidates(n) => n.clamp(1, MAX_CANDIDATES),
        }
    }
}

#[async_trait]
pub trait CoordinateResolver: Send + Sync {
    /// Candidates in provider ranking order; never empty on success.
    async fn search(
        &self,
        city: &CityQuery,
        strategy: MatchStrategy,
    ) -> Result<Vec<Coordinates>, LookupError>;

    /// The single best match for `city`.
    async fn resolve(&self, city: &CityQuery) -> Result<Coordinates, LookupError> {
        self.search(city, MatchStrategy::FirstMatch)
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| LookupError::NotFound(city.as_str().to_string()))
    }
}

pub struct OpenMeteoGeocoder {
    client: Arc<Client>,
    base_url: String,
}

impl OpenMeteoGeocoder {
    pub fn new(client: Arc<Client>, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    fn search_url(&self, city: &CityQuery, count: usize) -> String {
        format!(
            "{}/search?count={}&language=en&name={}",
            self.base_url,
            count,
            urlencoding::encode(city.as_str())
        )
    }
}

#[async_trait]
impl CoordinateResolver for OpenMeteoGeocoder {
    #[instrument(skip(self, city), fields(city = city.as_str()))]
    async fn search(
        &self,
        city: &CityQuery,
        strategy: MatchStrategy,
    ) -> Result<Vec<Coordinates>, LookupError> {
        let url = self.search_url(city, strategy.count());
        debug!("Geocoding request URL: {}", url);

        let response: GeocodingResponse = get_json(&self.client, &url, LookupStage::Geocode).await?;
        let results = match response.results {
            Some(results) if !results.is_empty() => results,
            _ => return Err(LookupError::NotFound(city.as_str().to_string())),
        };

        let matches: Vec<Coordinates> = results
            .into_iter()
            .take(strategy.count())
            .map(Coordinates::from)
            .collect();

        debug!(
            "Found {} match(es), best: {} ({:.4}, {:.4})",
            matches.len(),
            matches[0].name,
            matches[0].latitude,
            matches[0].longitude
        );
        Ok(matches)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn geocoder(server: &MockServer) -> OpenMeteoGeocoder {
        OpenMeteoGeocoder::new(Arc::new(Client::new()), server.uri())
    }

    #[test]
    fn test_search_url_encodes_name() {
        let geo = OpenMeteoGeocoder::new(Arc::new(Client::new()), "https://geo.test/v1");
        let city = CityQuery::parse(" São Paulo ").unwrap();
        assert_eq!(
            geo.search_url(&city, 1),
            "https://geo.test/v1/search?count=1&language=en&name=S%C3%A3o%20Paulo"
        );
    }

    #[test]
    fn test_candidate_count_is_clamped() {
        assert_eq!(MatchStrategy::FirstMatch.count(), 1);
        assert_eq!(MatchStrategy::Candidates(0).count(), 1);
        assert_eq!(MatchStrategy::Candidates(4).count(), 4);
        assert_eq!(MatchStrategy::Candidates(50).count(), MAX_CANDIDATES);
    }

    #[tokio::test]
    async fn test_resolve_first_match() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/search"))
            .and(query_param("name", "Varanasi"))
            .and(query_param("count", "1"))
            .and(query_param("language", "en"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "results": [
                    {"latitude": 25.31668, "longitude": 83.01041, "name": "Varanasi", "country": "India"}
                ]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let coords = geocoder(&server)
            .resolve(&CityQuery::parse("Varanasi").unwrap())
            .await
            .unwrap();

        assert_eq!(coords.name, "Varanasi");
        assert_eq!(coords.country.as_deref(), Some("India"));
        assert_eq!(coords.display_name(), "Varanasi, India");
    }

    #[tokio::test]
    async fn test_resolve_not_found() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/search"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "generationtime_ms": 0.5
            })))
            .mount(&server)
            .await;

        let err = geocoder(&server)
            .resolve(&CityQuery::parse("Qwertyuiop").unwrap())
            .await
            .unwrap_err();

        assert!(matches!(err, LookupError::NotFound(ref city) if city == "Qwertyuiop"));
    }

    #[tokio::test]
    async fn test_resolve_null_results_is_not_found() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/search"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "results": null
            })))
            .mount(&server)
            .await;

        let err = geocoder(&server)
            .resolve(&CityQuery::parse("Qwertyuiop").unwrap())
            .await
            .unwrap_err();

        assert_eq!(err.code(), "not_found");
    }

    #[tokio::test]
    async fn test_resolve_server_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/search"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let err = geocoder(&server)
            .resolve(&CityQuery::parse("Paris").unwrap())
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            LookupError::Transport {
                stage: LookupStage::Geocode,
                ..
            }
        ));
    }

    #[tokio::test]
    async fn test_search_candidates() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/search"))
            .and(query_param("count", "3"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "results": [
                    {"latitude": 48.85, "longitude": 2.35, "name": "Paris", "country": "France"},
                    {"latitude": 33.66, "longitude": -95.55, "name": "Paris", "country": "United States"},
                    {"latitude": 36.30, "longitude": -88.33, "name": "Paris"}
                ]
            })))
            .mount(&server)
            .await;

        let matches = geocoder(&server)
            .search(&CityQuery::parse("Paris").unwrap(), MatchStrategy::Candidates(3))
            .await
            .unwrap();

        assert_eq!(matches.len(), 3);
        assert_eq!(matches[1].display_name(), "Paris, United States");
        assert_eq!(matches[2].display_name(), "Paris");
    }
}
