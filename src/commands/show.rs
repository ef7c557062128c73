//! One-shot product details command.

use crate::catalog::{CatalogApi, CatalogClient, ProductId};
use crate::config::Config;
use crate::format::Formatter;
use crate::view::{ProductDetailsPage, View};
use anyhow::{Context, Result};
use std::sync::Arc;
use tracing::info;

/// Quantity clicks to replay before rendering.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct QuantityClicks {
    pub increase: u32,
    pub decrease: u32,
}

/// Fetches one product and renders its details view.
pub struct ShowCommand {
    config: Config,
}

impl ShowCommand {
    /// Creates a new show command.
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// What to display while the fetch is in flight.
    pub fn loading_view(&self) -> String {
        Formatter::new(self.config.format).format_view(&View::Loading)
    }

    /// Fetches `id` and returns the rendered view.
    pub async fn execute(&self, id: ProductId, clicks: QuantityClicks) -> Result<String> {
        let client = CatalogClient::new(&self.config, Arc::new(self.config.credentials()))
            .context("Failed to create HTTP client")?;

        self.execute_with_client(&client, id, clicks).await
    }

    /// Fetches with a provided client (for testing).
    ///
    /// A failed fetch is not an error here: it renders the not-found view.
    pub async fn execute_with_client(
        &self,
        client: &impl CatalogApi,
        id: ProductId,
        clicks: QuantityClicks,
    ) -> Result<String> {
        info!("Showing product: {}", id);

        let mut page = ProductDetailsPage::new(self.config.listing_route.clone());
        page.load(client, id).await;

        for _ in 0..clicks.increase {
            page.increase_quantity();
        }
        for _ in 0..clicks.decrease {
            page.decrease_quantity();
        }

        let formatter = Formatter::new(self.config.format);
        Ok(formatter.format_view(&page.view()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::FetchError;
    use crate::config::OutputFormat;
    use crate::testing::{page_with_similar, sample_page, MockCatalog};

    fn make_test_config() -> Config {
        Config { base_url: "http://localhost".to_string(), ..Config::default() }
    }

    #[tokio::test]
    async fn test_show_success_scenario() {
        let client = MockCatalog::new().with_page("1", sample_page());
        let cmd = ShowCommand::new(make_test_config());

        let output = cmd
            .execute_with_client(&client, ProductId::from("1"), QuantityClicks::default())
            .await
            .unwrap();

        assert!(output.contains("Sample"));
        assert!(output.contains("Rs 1000/-"));
        assert!(output.contains("10 Reviews"));
        assert!(output.contains("Available: in stock"));
        assert!(output.contains("No similar products."));
        assert_eq!(client.calls(), 1);
    }

    #[tokio::test]
    async fn test_show_not_found() {
        let client = MockCatalog::new();
        let cmd = ShowCommand::new(make_test_config());

        let output = cmd
            .execute_with_client(&client, ProductId::from("404"), QuantityClicks::default())
            .await
            .unwrap();

        assert!(output.contains("Product Not Found"));
        assert!(output.contains("/products"));
        assert!(!output.contains("Rs "));
    }

    #[tokio::test]
    async fn test_show_network_error_renders_not_found() {
        let client =
            MockCatalog::new().with_error("1", FetchError::Network("connection reset".into()));
        let cmd = ShowCommand::new(make_test_config());

        let output = cmd
            .execute_with_client(&client, ProductId::from("1"), QuantityClicks::default())
            .await
            .unwrap();

        assert!(output.contains("Product Not Found"));
        assert!(!output.contains("connection reset"));
    }

    #[tokio::test]
    async fn test_show_replays_clicks() {
        let client = MockCatalog::new().with_page("1", sample_page());
        let cmd = ShowCommand::new(make_test_config());

        let clicks = QuantityClicks { increase: 3, decrease: 1 };
        let output = cmd.execute_with_client(&client, ProductId::from("1"), clicks).await.unwrap();
        assert!(output.contains("[ - ]  3  [ + ]"));

        let clicks = QuantityClicks { increase: 0, decrease: 5 };
        let output = cmd.execute_with_client(&client, ProductId::from("1"), clicks).await.unwrap();
        assert!(output.contains("[ - ]  1  [ + ]"));
    }

    #[tokio::test]
    async fn test_show_json_format() {
        let client = MockCatalog::new().with_page("16", page_with_similar());
        let mut config = make_test_config();
        config.format = OutputFormat::Json;
        let cmd = ShowCommand::new(config);

        let output = cmd
            .execute_with_client(&client, ProductId::from("16"), QuantityClicks::default())
            .await
            .unwrap();

        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["status"], "success");
        assert_eq!(value["similar_products"][1]["title"], "Wool Beanie");
    }

    #[test]
    fn test_loading_view() {
        let cmd = ShowCommand::new(make_test_config());
        assert_eq!(cmd.loading_view(), "Loading...");
    }

    #[tokio::test]
    async fn test_custom_listing_route() {
        let client = MockCatalog::new();
        let mut config = make_test_config();
        config.listing_route = "/shop/all".to_string();
        let cmd = ShowCommand::new(config);

        let output = cmd
            .execute_with_client(&client, ProductId::from("9"), QuantityClicks::default())
            .await
            .unwrap();
        assert!(output.contains("Continue Shopping -> /shop/all"));
    }
}
