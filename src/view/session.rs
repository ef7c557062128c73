//! Runs one fetch task per mount and feeds results back into the page.

use crate::catalog::client::CatalogApi;
use crate::catalog::error::FetchError;
use crate::catalog::models::{ProductId, ProductPage};
use crate::view::page::{FetchTicket, ProductDetailsPage};
use crate::view::state::ViewStatus;
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::debug;

type Completion = (FetchTicket, Result<ProductPage, FetchError>);

/// An interactive details view bound to the current product id.
///
/// Navigating never cancels earlier requests. Their results still arrive
/// and are dropped by the page's ticket check.
pub struct Session {
    api: Arc<dyn CatalogApi>,
    page: ProductDetailsPage,
    tx: mpsc::UnboundedSender<Completion>,
    rx: mpsc::UnboundedReceiver<Completion>,
    in_flight: usize,
}

impl Session {
    pub fn new(api: Arc<dyn CatalogApi>, listing_route: impl Into<String>) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self { api, page: ProductDetailsPage::new(listing_route), tx, rx, in_flight: 0 }
    }

    pub fn page(&self) -> &ProductDetailsPage {
        &self.page
    }

    pub fn page_mut(&mut self) -> &mut ProductDetailsPage {
        &mut self.page
    }

    /// True while any spawned fetch, current or stale, has not reported back.
    pub fn has_pending(&self) -> bool {
        self.in_flight > 0
    }

    /// Mounts `id` and spawns its fetch.
    pub fn navigate(&mut self, id: ProductId) -> FetchTicket {
        let ticket = self.page.mount(id);

        let api = Arc::clone(&self.api);
        let tx = self.tx.clone();
        let task_ticket = ticket.clone();
        tokio::spawn(async move {
            let outcome = api.product_details(task_ticket.product_id()).await;
            if tx.send((task_ticket, outcome)).is_err() {
                debug!("Session closed before fetch completed");
            }
        });

        self.in_flight += 1;
        ticket
    }

    /// Waits for the next fetch that actually changes the page.
    ///
    /// Stale completions are absorbed. Returns `None` once nothing is in flight.
    pub async fn next_update(&mut self) -> Option<ViewStatus> {
        while self.in_flight > 0 {
            let (ticket, outcome) = self.rx.recv().await?;
            self.in_flight -= 1;

            if self.page.complete(ticket, outcome) {
                return Some(self.page.status());
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{page_with_similar, sample_page, MockCatalog};
    use crate::view::page::View;

    #[tokio::test]
    async fn test_navigate_and_settle() {
        let catalog = Arc::new(MockCatalog::new().with_page("1", sample_page()));
        let mut session = Session::new(catalog.clone(), "/products");

        session.navigate(ProductId::from("1"));
        assert_eq!(session.page().view(), View::Loading);
        assert!(session.has_pending());

        assert_eq!(session.next_update().await, Some(ViewStatus::Success));
        assert!(!session.has_pending());
        assert_eq!(catalog.calls(), 1);
    }

    #[tokio::test]
    async fn test_failure_settles_to_error() {
        let catalog = Arc::new(MockCatalog::new());
        let mut session = Session::new(catalog, "/products");

        session.navigate(ProductId::from("404"));
        assert_eq!(session.next_update().await, Some(ViewStatus::Error));
        assert_eq!(session.page().view(), View::NotFound { listing_route: "/products" });
    }

    #[tokio::test]
    async fn test_next_update_without_fetch() {
        let catalog = Arc::new(MockCatalog::new());
        let mut session = Session::new(catalog, "/products");
        assert_eq!(session.next_update().await, None);
    }

    #[tokio::test]
    async fn test_late_stale_response_is_dropped() {
        let mut catalog =
            MockCatalog::new().with_page("1", sample_page()).with_page("16", page_with_similar());
        let slow = catalog.gate("1");
        let fast = catalog.gate("16");
        let mut session = Session::new(Arc::new(catalog), "/products");

        session.navigate(ProductId::from("1"));
        session.navigate(ProductId::from("16"));

        // Newer request finishes first, then the older one arrives late.
        fast.notify_one();
        assert_eq!(session.next_update().await, Some(ViewStatus::Success));
        slow.notify_one();
        assert_eq!(session.next_update().await, None);

        let title = session.page().state().page().map(|p| p.product.title.clone());
        assert_eq!(title.as_deref(), Some("Wide Bowknot Hat"));
    }

    #[tokio::test]
    async fn test_early_stale_response_is_dropped() {
        let mut catalog =
            MockCatalog::new().with_page("1", sample_page()).with_page("16", page_with_similar());
        let first = catalog.gate("1");
        let second = catalog.gate("16");
        let mut session = Session::new(Arc::new(catalog), "/products");

        session.navigate(ProductId::from("1"));
        session.navigate(ProductId::from("16"));

        first.notify_one();
        second.notify_one();
        assert_eq!(session.next_update().await, Some(ViewStatus::Success));
        assert_eq!(session.next_update().await, None);
        assert_eq!(session.page().state().page().unwrap().product.id.as_str(), "16");
    }

    #[tokio::test]
    async fn test_quantity_through_session() {
        let catalog = Arc::new(MockCatalog::new().with_page("1", sample_page()));
        let mut session = Session::new(catalog, "/products");

        session.navigate(ProductId::from("1"));
        session.next_update().await;

        session.page_mut().increase_quantity();
        session.page_mut().increase_quantity();
        assert!(session.page_mut().decrease_quantity());
        assert_eq!(session.page().quantity().get(), 2);
        assert_eq!(session.page().status(), ViewStatus::Success);
        assert!(!session.has_pending());
    }
}
