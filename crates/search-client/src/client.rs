//! Search engine client.
//!
//! Runs the query pipeline (parse, compile, build), sends the request
//! through a [`SearchTransport`] and projects the response. Each call is
//! independent; the client holds only read-only settings.

use std::sync::Arc;
use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};
use serde_json::Value;
use tracing::{debug, info, warn};

use search_query::{prepare, project_response, QueryPlan, SearchResult};
use search_types::{ContentTypeConfig, SearchOptions, Settings};

use crate::error::ClientError;
use crate::transport::{HttpTransport, SearchTransport, TransportRequest, TransportResponse};

/// Fallback message when a failed search carries no engine message.
pub const SEARCH_FAILED_MESSAGE: &str = "Search request failed";

/// Message for a failed health check.
pub const HEALTH_FAILED_MESSAGE: &str = "Could not connect to search server";

/// Message when the API URL or key is missing.
pub const NOT_CONFIGURED_MESSAGE: &str =
    "Parish Search is not configured. Please set the API URL and key in Settings.";

/// Connection details captured from [`Settings`].
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Engine base URL without trailing slash
    pub base_url: String,
    pub api_key: SecretString,
    pub index_name: String,
    pub content_types: ContentTypeConfig,
    pub results_per_page: u32,
    pub search_timeout: Duration,
    pub health_timeout: Duration,
}

impl ClientConfig {
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            base_url: settings.base_url().to_string(),
            api_key: SecretString::from(settings.api_key.trim().to_string()),
            index_name: settings.index_name.clone(),
            content_types: settings.content_types(),
            results_per_page: settings.results_per_page,
            search_timeout: settings.search_timeout(),
            health_timeout: settings.health_timeout(),
        }
    }

    pub fn is_configured(&self) -> bool {
        !self.base_url.is_empty() && !self.api_key.expose_secret().is_empty()
    }

    pub fn search_url(&self) -> String {
        format!("{}/indexes/{}/search", self.base_url, self.index_name)
    }

    pub fn health_url(&self) -> String {
        format!("{}/health", self.base_url)
    }

    fn bearer(&self) -> String {
        format!("Bearer {}", self.api_key.expose_secret())
    }
}

/// Client for the document search engine.
#[derive(Clone)]
pub struct SearchClient {
    config: ClientConfig,
    transport: Arc<dyn SearchTransport>,
}

impl SearchClient {
    /// Create a client over any transport.
    pub fn new(settings: &Settings, transport: Arc<dyn SearchTransport>) -> Self {
        Self {
            config: ClientConfig::from_settings(settings),
            transport,
        }
    }

    /// Create a client over HTTP.
    pub fn http(settings: &Settings) -> Result<Self, ClientError> {
        let transport = HttpTransport::new()?;
        Ok(Self::new(settings, Arc::new(transport)))
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Compile the engine request for a query without sending it.
    pub fn plan(&self, raw_query: &str, options: &SearchOptions) -> QueryPlan {
        prepare(raw_query, options, &self.config.content_types)
    }

    /// Run a search.
    ///
    /// Fails fast with `NotConfigured` before any network call when the
    /// URL or key is missing. Zero hits is a successful, empty result.
    pub async fn search(
        &self,
        raw_query: &str,
        options: &SearchOptions,
    ) -> Result<SearchResult, ClientError> {
        if !self.config.is_configured() {
            return Err(ClientError::NotConfigured(NOT_CONFIGURED_MESSAGE.to_string()));
        }

        let plan = self.plan(raw_query, options);
        debug!(
            q = plan.request.q.as_str(),
            filter = ?plan.request.filter,
            limit = plan.request.limit,
            hybrid = plan.request.is_hybrid(),
            exact = plan.request.is_exact(),
            "Sending search request"
        );

        let body = serde_json::to_value(&plan.request)?;
        let request =
            TransportRequest::post(self.config.search_url(), body, self.config.search_timeout)
                .with_header("Authorization", self.config.bearer());

        let response = self.transport.send(request).await?;
        let response = check_status(response, SEARCH_FAILED_MESSAGE, true)?;

        let result = project_response(raw_query, &response.body);
        info!(
            query = raw_query,
            hits = result.hits.len(),
            total = result.total,
            processing_time_ms = result.processing_time_ms,
            "Search complete"
        );

        Ok(result)
    }

    /// Check that the engine is reachable and healthy.
    pub async fn health(&self) -> Result<(), ClientError> {
        if !self.config.is_configured() {
            return Err(ClientError::NotConfigured(
                "API URL and key are required".to_string(),
            ));
        }

        let request = TransportRequest::get(self.config.health_url(), self.config.health_timeout)
            .with_header("Authorization", self.config.bearer());

        let response = self.transport.send(request).await?;
        check_status(response, HEALTH_FAILED_MESSAGE, false)?;

        info!(url = %self.config.health_url(), "Search server healthy");
        Ok(())
    }
}

/// Turn a non-200 response into `ClientError::Engine`.
///
/// With `use_engine_message`, the engine's `message` field is passed
/// through when present.
fn check_status(
    response: TransportResponse,
    fallback: &str,
    use_engine_message: bool,
) -> Result<TransportResponse, ClientError> {
    if response.is_ok() {
        return Ok(response);
    }

    let message = use_engine_message
        .then(|| response.body.get("message").and_then(Value::as_str))
        .flatten()
        .unwrap_or(fallback)
        .to_string();

    warn!(status = response.status, message = message.as_str(), "Engine returned an error");

    Err(ClientError::Engine {
        status: response.status,
        message,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TransportError;
    use crate::mock::MockTransport;
    use search_types::SortOrder;
    use serde_json::json;

    fn settings() -> Settings {
        Settings {
            api_url: "https://search.example.com/".to_string(),
            api_key: "search-key".to_string(),
            ..Default::default()
        }
    }

    fn client_with(transport: &Arc<MockTransport>) -> SearchClient {
        SearchClient::new(&settings(), transport.clone())
    }

    #[tokio::test]
    async fn test_not_configured_makes_no_call() {
        let transport = Arc::new(MockTransport::new());
        let client = SearchClient::new(&Settings::default(), transport.clone());

        let err = client.search("hall", &SearchOptions::new()).await.unwrap_err();
        assert!(matches!(err, ClientError::NotConfigured(_)));
        assert_eq!(
            err.to_string(),
            "Parish Search is not configured. Please set the API URL and key in Settings."
        );

        let err = client.health().await.unwrap_err();
        assert!(matches!(err, ClientError::NotConfigured(_)));

        assert_eq!(transport.request_count(), 0);
    }

    #[tokio::test]
    async fn test_search_sends_compiled_request() {
        let transport = Arc::new(MockTransport::new().respond(
            200,
            json!({
                "hits": [{"id": "1", "type": "file", "path": "a.pdf"}],
                "estimatedTotalHits": 1,
                "processingTimeMs": 4
            }),
        ));
        let client = client_with(&transport);

        let options = SearchOptions::new().with_sort(SortOrder::Relevance);
        let result = client
            .search("type:file year:2024 roof repair", &options)
            .await
            .unwrap();

        assert_eq!(result.query, "type:file year:2024 roof repair");
        assert_eq!(result.total, 1);
        assert_eq!(result.processing_time_ms, 4);
        assert_eq!(result.hits[0].id(), "1");

        let requests = transport.requests();
        assert_eq!(requests.len(), 1);
        let request = &requests[0];
        assert_eq!(
            request.url,
            "https://search.example.com/indexes/parish_search/search"
        );
        assert_eq!(request.header("Authorization"), Some("Bearer search-key"));
        assert_eq!(request.timeout, Duration::from_secs(10));

        let body = request.body.as_ref().unwrap();
        assert_eq!(body["q"], "roof repair");
        assert_eq!(body["filter"], r#"type = "file" AND year = 2024"#);
        assert!(body.get("hybrid").is_some());
    }

    #[tokio::test]
    async fn test_engine_error_message_passed_through() {
        let transport = Arc::new(
            MockTransport::new().respond(400, json!({"message": "Attribute `year` is not filterable"})),
        );
        let client = client_with(&transport);

        let err = client.search("hall", &SearchOptions::new()).await.unwrap_err();
        assert_eq!(err.to_string(), "Attribute `year` is not filterable");
        assert!(matches!(err, ClientError::Engine { status: 400, .. }));
    }

    #[tokio::test]
    async fn test_engine_error_fallback_message() {
        let transport = Arc::new(MockTransport::new().respond(502, Value::Null));
        let client = client_with(&transport);

        let err = client.search("hall", &SearchOptions::new()).await.unwrap_err();
        assert_eq!(err.to_string(), SEARCH_FAILED_MESSAGE);
    }

    #[tokio::test]
    async fn test_transport_error_not_retried() {
        let transport = Arc::new(
            MockTransport::new().fail(TransportError::Connection("connection reset".to_string())),
        );
        let client = client_with(&transport);

        let err = client.search("hall", &SearchOptions::new()).await.unwrap_err();
        assert!(matches!(err, ClientError::Transport(_)));
        assert_eq!(err.to_string(), "Connection failed: connection reset");
        assert_eq!(transport.request_count(), 1);
    }

    #[tokio::test]
    async fn test_zero_hits_is_success() {
        let transport = Arc::new(MockTransport::new());
        let client = client_with(&transport);

        let result = client.search("nothing", &SearchOptions::new()).await.unwrap();
        assert!(result.hits.is_empty());
        assert_eq!(result.total, 0);
    }

    #[tokio::test]
    async fn test_health() {
        let transport = Arc::new(
            MockTransport::new()
                .respond(200, json!({"status": "available"}))
                .respond(503, json!({"message": "down"})),
        );
        let client = client_with(&transport);

        client.health().await.unwrap();

        let err = client.health().await.unwrap_err();
        assert_eq!(err.to_string(), HEALTH_FAILED_MESSAGE);

        let requests = transport.requests();
        assert_eq!(requests[0].url, "https://search.example.com/health");
        assert_eq!(requests[0].timeout, Duration::from_secs(5));
        assert!(requests[0].body.is_none());
    }

    #[test]
    fn test_config_hides_key() {
        let config = ClientConfig::from_settings(&settings());
        let printed = format!("{:?}", config);
        assert!(!printed.contains("search-key"));
        assert!(config.is_configured());
    }
}
