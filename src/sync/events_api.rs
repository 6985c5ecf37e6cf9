use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;

use crate::calendar::CivicEvent;
use crate::storage::config::ApiConfig;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),
    #[error("Request error: {0}")]
    RequestError(String),
    #[error("Parse error: {0}")]
    ParseError(String),
    #[error("Network access disabled (offline mode)")]
    Offline,
}

/// Network boundary for the authoritative event list of a municipality.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EventSource: Send + Sync {
    async fn fetch_events(&self, municipality: Option<String>) -> Result<Vec<CivicEvent>, ApiError>;
}

pub struct HttpEventSource {
    base_url: String,
    client: reqwest::Client,
}

impl HttpEventSource {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, ApiError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client,
        })
    }

    pub fn from_config(config: &ApiConfig) -> Result<Self, ApiError> {
        Self::new(config.base_url.clone(), Duration::from_secs(config.timeout_seconds))
    }
}

#[async_trait]
impl EventSource for HttpEventSource {
    async fn fetch_events(&self, municipality: Option<String>) -> Result<Vec<CivicEvent>, ApiError> {
        let url = format!("{}/map/events", self.base_url);

        tracing::info!("Fetching events for {:?}", municipality);

        let mut request = self.client.get(&url);
        if let Some(municipality) = &municipality {
            request = request.query(&[("municipality", municipality.as_str())]);
        }

        let response = request.send().await?;
        let status = response.status();
        tracing::info!("Fetch events response status: {}", status);

        if !status.is_success() {
            let body = response.text().await?;
            tracing::error!("Failed to fetch events. Status: {}, Body: {}", status, body);
            return Err(ApiError::RequestError(format!("Status {}: {}", status, body)));
        }

        let body = response.text().await?;
        let events: Vec<CivicEvent> = serde_json::from_str(&body)
            .map_err(|e| ApiError::ParseError(format!("Invalid events payload: {}", e)))?;

        tracing::info!("Fetched {} events successfully", events.len());
        Ok(events)
    }
}

/// Source used when the config disables network access.
pub struct OfflineSource;

#[async_trait]
impl EventSource for OfflineSource {
    async fn fetch_events(&self, _municipality: Option<String>) -> Result<Vec<CivicEvent>, ApiError> {
        Err(ApiError::Offline)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn source_for(server: &MockServer) -> HttpEventSource {
        HttpEventSource::new(format!("{}/api/", server.uri()), Duration::from_secs(2)).unwrap()
    }

    #[test]
    fn base_url_loses_trailing_slash() {
        let source = HttpEventSource::new("http://localhost:8000/api/", Duration::from_secs(1)).unwrap();

        assert_eq!(source.base_url, "http://localhost:8000/api");
    }

    #[test]
    fn from_config_uses_configured_base_url() {
        let source = HttpEventSource::from_config(&ApiConfig::default()).unwrap();

        assert_eq!(source.base_url, "http://localhost:8000/api");
    }

    #[tokio::test]
    async fn fetches_events_for_municipality() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/map/events"))
            .and(query_param("municipality", "Puebla"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
                {"id": "p-1", "name": "Jornada", "category": "seguridad",
                 "latitude": 19.04, "longitude": -98.2, "municipality": "Puebla"}
            ])))
            .expect(1)
            .mount(&server)
            .await;

        let events = source_for(&server)
            .fetch_events(Some("Puebla".to_string()))
            .await
            .unwrap();

        assert_eq!(events.len(), 1);
        assert_eq!(events[0].id, "p-1");
    }

    #[tokio::test]
    async fn non_success_status_is_request_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/map/events"))
            .respond_with(ResponseTemplate::new(503).set_body_string("down"))
            .mount(&server)
            .await;

        let result = source_for(&server).fetch_events(None).await;

        assert!(matches!(result, Err(ApiError::RequestError(_))));
    }

    #[tokio::test]
    async fn malformed_payload_is_parse_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/map/events"))
            .respond_with(ResponseTemplate::new(200).set_body_string("{\"events\": \"nope\"}"))
            .mount(&server)
            .await;

        let result = source_for(&server).fetch_events(None).await;

        assert!(matches!(result, Err(ApiError::ParseError(_))));
    }

    #[tokio::test]
    async fn offline_source_always_fails() {
        let result = OfflineSource.fetch_events(Some("CDMX".to_string())).await;

        assert!(matches!(result, Err(ApiError::Offline)));
    }
}
