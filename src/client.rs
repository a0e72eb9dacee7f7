//! HTTP client for the proxy management API
//!
//! Typed remote accessor for the backend that owns proxies and routes.
//! Every operation is a single attempt: no retry, no backoff, and only
//! the client-wide timeout from configuration.

use reqwest::{Client, RequestBuilder, Response};
use serde::{de::DeserializeOwned, Serialize};
use std::time::Duration;
use tracing::{debug, trace};

use crate::domain::{
    PageableResponse, Proxy, ProxyForm, Route, RouteListResponse, RouteRequest, StatusRequest,
};
use crate::errors::{Entity, Error, Operation, Result};

/// HTTP client configuration
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL for the proxy management API (e.g., "http://localhost:8080")
    pub base_url: String,

    /// Request timeout in seconds
    pub timeout: u64,

    /// Enable verbose request/response logging
    pub verbose: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: crate::config::DEFAULT_BASE_URL.to_string(),
            timeout: crate::config::DEFAULT_TIMEOUT_SECS,
            verbose: false,
        }
    }
}

/// HTTP client for the proxy management API
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    config: ClientConfig,
}

impl ApiClient {
    /// Create a new client with the given configuration
    pub fn new(config: ClientConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout))
            .build()
            .map_err(|e| Error::config(format!("failed to build HTTP client: {e}")))?;

        Ok(Self { client, config })
    }

    /// Get the base URL
    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    /// Build a GET request
    pub fn get(&self, path: &str) -> RequestBuilder {
        let url = format!("{}{}", self.config.base_url, path);
        debug!("GET {}", url);
        self.client.get(&url)
    }

    /// Build a POST request
    pub fn post(&self, path: &str) -> RequestBuilder {
        let url = format!("{}{}", self.config.base_url, path);
        debug!("POST {}", url);
        self.client.post(&url)
    }

    /// Build a PUT request
    pub fn put(&self, path: &str) -> RequestBuilder {
        let url = format!("{}{}", self.config.base_url, path);
        debug!("PUT {}", url);
        self.client.put(&url)
    }

    /// Build a DELETE request
    pub fn delete(&self, path: &str) -> RequestBuilder {
        let url = format!("{}{}", self.config.base_url, path);
        debug!("DELETE {}", url);
        self.client.delete(&url)
    }

    fn log_body<T: Serialize>(&self, body: &T) {
        if self.config.verbose {
            let body_json = serde_json::to_string_pretty(body)
                .unwrap_or_else(|_| "<unable to serialize>".to_string());
            trace!("Request body:\n{}", body_json);
        }
    }

    /// Send a request and deserialize the JSON response, attributing any
    /// failure to the given operation and entity.
    async fn send_json<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        operation: Operation,
        entity: Entity,
    ) -> Result<T> {
        let response = self.send_checked(request, operation, entity).await?;

        let body = response
            .text()
            .await
            .map_err(|_| Error::api(operation, entity, None))?;

        if self.config.verbose {
            trace!("Response body:\n{}", body);
        }

        serde_json::from_str(&body).map_err(|e| {
            debug!("Failed to decode response body: {}", e);
            Error::api(operation, entity, None)
        })
    }

    /// Send a request, checking only for a success status
    async fn send_checked(
        &self,
        request: RequestBuilder,
        operation: Operation,
        entity: Entity,
    ) -> Result<Response> {
        let response = request.send().await.map_err(|e| {
            debug!("Request failed to send: {}", e);
            Error::api(operation, entity, None)
        })?;

        let status = response.status();
        debug!("Response status: {}", status);

        if !status.is_success() {
            let error_text =
                response.text().await.unwrap_or_else(|_| "<unable to read error>".to_string());

            if self.config.verbose {
                trace!("Error response:\n{}", error_text);
            }

            return Err(Error::api(operation, entity, Some(status.as_u16())));
        }

        Ok(response)
    }

    // === Proxy operations ===

    /// Fetch one page of proxies, sorted by creation time descending
    pub async fn list_proxies(&self, page: u32, size: u32) -> Result<PageableResponse<Proxy>> {
        let path = format!(
            "/api/v1/proxies?page={}&size={}&sortBy=createdAt&direction=desc",
            page, size
        );
        self.send_json(self.get(&path), Operation::Fetch, Entity::ProxyList).await
    }

    /// Create a proxy
    pub async fn create_proxy(&self, form: &ProxyForm) -> Result<Proxy> {
        self.log_body(form);
        self.send_json(self.post("/api/v1/proxies").json(form), Operation::Add, Entity::Proxy)
            .await
    }

    /// Update an existing proxy by its server-assigned id
    pub async fn update_proxy(&self, id: i64, form: &ProxyForm) -> Result<Proxy> {
        self.log_body(form);
        let path = format!("/api/v1/proxies/{}", id);
        self.send_json(self.put(&path).json(form), Operation::Update, Entity::Proxy).await
    }

    /// Delete a proxy by id
    pub async fn delete_proxy(&self, id: i64) -> Result<()> {
        let path = format!("/api/v1/proxies/{}", id);
        self.send_checked(self.delete(&path), Operation::Delete, Entity::Proxy).await?;
        Ok(())
    }

    // === Route operations ===

    /// Fetch all routes for a proxy (no pagination on this endpoint)
    pub async fn list_routes(&self, proxy: &str) -> Result<RouteListResponse> {
        let path = format!("/api/v1/routes/{}", proxy);
        self.send_json(self.get(&path), Operation::Fetch, Entity::RouteList).await
    }

    /// Create a route under a proxy
    pub async fn create_route(&self, proxy: &str, request: &RouteRequest) -> Result<Route> {
        self.log_body(request);
        let path = format!("/api/v1/routes/{}", proxy);
        self.send_json(self.post(&path).json(request), Operation::Add, Entity::Route).await
    }

    /// Update an existing route under a proxy
    pub async fn update_route(&self, proxy: &str, request: &RouteRequest) -> Result<Route> {
        self.log_body(request);
        let path = format!("/api/v1/routes/{}", proxy);
        self.send_json(self.put(&path).json(request), Operation::Update, Entity::Route).await
    }

    /// Toggle a route's enablement. The proxy-scoped status endpoint is
    /// the authoritative form of this call.
    pub async fn set_route_status(&self, proxy: &str, route_id: &str, enabled: bool) -> Result<()> {
        let path = format!("/api/v1/routes/{}/{}/status", proxy, route_id);
        let body = StatusRequest { enabled };
        self.log_body(&body);
        self.send_checked(self.post(&path).json(&body), Operation::Toggle, Entity::RouteStatus)
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_config_default() {
        let config = ClientConfig::default();
        assert_eq!(config.base_url, "http://localhost:8080");
        assert_eq!(config.timeout, 30);
        assert!(!config.verbose);
    }

    #[test]
    fn test_client_creation() {
        let config = ClientConfig {
            base_url: "http://example.com".to_string(),
            timeout: 60,
            verbose: true,
        };

        let client = ApiClient::new(config).unwrap();
        assert_eq!(client.base_url(), "http://example.com");
    }

    #[test]
    fn test_request_builder_methods() {
        let client = ApiClient::new(ClientConfig::default()).unwrap();

        let _: RequestBuilder = client.get("/api/v1/proxies");
        let _: RequestBuilder = client.post("/api/v1/proxies");
        let _: RequestBuilder = client.put("/api/v1/proxies/1");
        let _: RequestBuilder = client.delete("/api/v1/proxies/1");
    }

    #[test]
    fn test_status_request_serialization() {
        let json = serde_json::to_string(&StatusRequest { enabled: false }).unwrap();
        assert_eq!(json, r#"{"enabled":false}"#);
    }
}
