//! HTTP client for the catalog's product details endpoint.

use crate::catalog::credentials::CredentialSource;
use crate::catalog::error::FetchError;
use crate::catalog::models::{ProductId, ProductPage};
use crate::config::Config;
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};
use wreq::Client;

/// Trait for fetching product details - enables mocking for tests.
#[async_trait]
pub trait CatalogApi: Send + Sync {
    /// Fetches one product with its similar products.
    ///
    /// Issues exactly one request per call. Every failure is returned as a
    /// value; nothing is retried or cached.
    async fn product_details(&self, id: &ProductId) -> Result<ProductPage, FetchError>;
}

/// Catalog HTTP client with bearer authentication.
pub struct CatalogClient {
    client: Client,
    base_url: String,
    credentials: Arc<dyn CredentialSource>,
}

impl CatalogClient {
    /// Creates a client against the configured catalog.
    pub fn new(config: &Config, credentials: Arc<dyn CredentialSource>) -> Result<Self, FetchError> {
        Self::with_base_url(config, config.base_url.clone(), credentials)
    }

    /// Creates a client against an explicit base URL (for testing).
    pub fn with_base_url(
        config: &Config,
        base_url: impl Into<String>,
        credentials: Arc<dyn CredentialSource>,
    ) -> Result<Self, FetchError> {
        let client = Client::builder()
            .gzip(true)
            .brotli(true)
            .timeout(Duration::from_secs(config.timeout_secs))
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .build()
            .map_err(|e| FetchError::Client(e.to_string()))?;

        let base_url = base_url.into().trim_end_matches('/').to_string();

        Ok(Self { client, base_url, credentials })
    }

    /// Returns the base URL requests are sent to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `<base>/products/<id>` with the id encoded as one path segment.
    fn product_url(&self, id: &ProductId) -> String {
        format!("{}/products/{}", self.base_url, urlencoding::encode(id.as_str()))
    }

    /// Performs the GET and returns the body of a 2xx response.
    async fn get(&self, url: &str) -> Result<String, FetchError> {
        debug!("GET {}", url);

        let mut request = self.client.get(url).header("Accept", "application/json");

        match self.credentials.token() {
            Some(token) => {
                request = request.header("Authorization", format!("Bearer {}", token));
            }
            None => debug!("No bearer token available, sending request without one"),
        }

        let response = request.send().await.map_err(|e| FetchError::Network(e.to_string()))?;

        let status = response.status();
        debug!("Response status: {}", status);

        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }

        response.text().await.map_err(|e| FetchError::Network(e.to_string()))
    }
}

#[async_trait]
impl CatalogApi for CatalogClient {
    async fn product_details(&self, id: &ProductId) -> Result<ProductPage, FetchError> {
        let url = self.product_url(id);

        info!("Fetching product details: {}", id);
        let body = self.get(&url).await?;
        Ok(ProductPage::from_json(&body)?)
    }
}
