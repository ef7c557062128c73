//! Shared test doubles for the catalog.

use crate::catalog::client::CatalogApi;
use crate::catalog::error::FetchError;
use crate::catalog::models::{ProductId, ProductPage};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::Notify;

pub(crate) const SAMPLE_BODY: &str = r#"{
    "id": "1",
    "title": "Sample",
    "price": 1000,
    "rating": 4,
    "total_reviews": 10,
    "description": "d",
    "availability": "in stock",
    "brand": "b",
    "image_url": "http://x/img.png",
    "similar_products": []
}"#;

pub(crate) const BODY_WITH_SIMILAR: &str = r#"{
    "id": 16,
    "title": "Wide Bowknot Hat",
    "price": 288,
    "rating": 3.6,
    "total_reviews": 1030,
    "description": "A fashionable hat.",
    "availability": "In Stock",
    "brand": "Mast & Harbour",
    "image_url": "https://assets.example/hat.png",
    "similar_products": [
        {"id": 17, "title": "Straw Hat", "price": 199, "rating": 4.2, "total_reviews": 12,
         "description": "Summer hat.", "availability": "In Stock", "brand": "Roadster",
         "image_url": "https://assets.example/straw.png"},
        {"id": 21, "title": "Wool Beanie", "price": 349, "rating": 3.9, "total_reviews": 88,
         "description": "Winter hat.", "availability": "Out of Stock", "brand": "HRX",
         "image_url": "https://assets.example/beanie.png"}
    ]
}"#;

pub(crate) fn sample_page() -> ProductPage {
    ProductPage::from_json(SAMPLE_BODY).unwrap()
}

pub(crate) fn page_with_similar() -> ProductPage {
    ProductPage::from_json(BODY_WITH_SIMILAR).unwrap()
}

/// In-memory catalog. Unknown ids answer 404; gated ids wait for a notify.
#[derive(Default)]
pub(crate) struct MockCatalog {
    pages: HashMap<String, Result<ProductPage, FetchError>>,
    gates: HashMap<String, Arc<Notify>>,
    calls: AtomicUsize,
}

impl MockCatalog {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn with_page(mut self, id: &str, page: ProductPage) -> Self {
        self.pages.insert(id.to_string(), Ok(page));
        self
    }

    pub(crate) fn with_error(mut self, id: &str, err: FetchError) -> Self {
        self.pages.insert(id.to_string(), Err(err));
        self
    }

    /// Holds responses for `id` until the returned handle is notified.
    pub(crate) fn gate(&mut self, id: &str) -> Arc<Notify> {
        let notify = Arc::new(Notify::new());
        self.gates.insert(id.to_string(), Arc::clone(&notify));
        notify
    }

    pub(crate) fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CatalogApi for MockCatalog {
    async fn product_details(&self, id: &ProductId) -> Result<ProductPage, FetchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        if let Some(gate) = self.gates.get(id.as_str()) {
            gate.notified().await;
        }

        self.pages.get(id.as_str()).cloned().unwrap_or(Err(FetchError::Status(404)))
    }
}
