//! The product details page: view state, quantity, and fetch bookkeeping.

use crate::catalog::client::CatalogApi;
use crate::catalog::error::FetchError;
use crate::catalog::models::{ProductId, ProductPage};
use crate::view::quantity::Quantity;
use crate::view::state::{ViewEvent, ViewState, ViewStatus};
use tracing::{debug, warn};

/// Identifies one fetch cycle. Only the ticket from the latest mount may
/// complete the page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchTicket {
    generation: u64,
    product_id: ProductId,
}

impl FetchTicket {
    pub fn product_id(&self) -> &ProductId {
        &self.product_id
    }
}

/// What to render for the current state.
#[derive(Debug, Clone, PartialEq)]
pub enum View<'a> {
    /// Nothing mounted yet.
    Blank,
    Loading,
    /// Any failed fetch, with the route to send the user back to.
    NotFound { listing_route: &'a str },
    Details { page: &'a ProductPage, quantity: Quantity },
}

/// State holder for one product details view.
#[derive(Debug)]
pub struct ProductDetailsPage {
    state: ViewState,
    quantity: Quantity,
    generation: u64,
    listing_route: String,
}

impl ProductDetailsPage {
    /// Creates an unmounted page.
    pub fn new(listing_route: impl Into<String>) -> Self {
        Self {
            state: ViewState::Idle,
            quantity: Quantity::new(),
            generation: 0,
            listing_route: listing_route.into(),
        }
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn status(&self) -> ViewStatus {
        self.state.status()
    }

    pub fn quantity(&self) -> Quantity {
        self.quantity
    }

    pub fn listing_route(&self) -> &str {
        &self.listing_route
    }

    /// Starts a fresh fetch cycle for `id`.
    ///
    /// Any earlier cycle is abandoned: its ticket goes stale and the quantity
    /// goes back to 1.
    pub fn mount(&mut self, id: ProductId) -> FetchTicket {
        self.generation = self.generation.wrapping_add(1);
        self.state = ViewState::Idle;
        self.quantity = Quantity::new();
        self.state.on(ViewEvent::Mount(id.clone()));

        debug!("Mounted product {} (generation {})", id, self.generation);
        FetchTicket { generation: self.generation, product_id: id }
    }

    /// Applies a fetch outcome. Returns false when the ticket is stale.
    pub fn complete(
        &mut self,
        ticket: FetchTicket,
        outcome: Result<ProductPage, FetchError>,
    ) -> bool {
        if ticket.generation != self.generation {
            debug!(
                "Discarding stale result for product {} (generation {}, current {})",
                ticket.product_id, ticket.generation, self.generation
            );
            return false;
        }

        let event = match outcome {
            Ok(page) => ViewEvent::FetchSucceeded(page),
            Err(e) => {
                warn!(
                    product_id = %ticket.product_id,
                    kind = e.kind(),
                    "Product fetch failed: {}",
                    e
                );
                ViewEvent::FetchFailed
            }
        };

        self.state.on(event)
    }

    /// Mounts `id`, fetches it, and applies the result.
    pub async fn load(&mut self, api: &(impl CatalogApi + ?Sized), id: ProductId) -> ViewStatus {
        let ticket = self.mount(id);
        let outcome = api.product_details(ticket.product_id()).await;
        self.complete(ticket, outcome);
        self.status()
    }

    pub fn increase_quantity(&mut self) {
        self.quantity.increase();
    }

    pub fn decrease_quantity(&mut self) -> bool {
        self.quantity.decrease()
    }

    /// Maps the current state to a renderable view.
    pub fn view(&self) -> View<'_> {
        match &self.state {
            ViewState::Idle => View::Blank,
            ViewState::Loading { .. } => View::Loading,
            ViewState::Error => View::NotFound { listing_route: &self.listing_route },
            ViewState::Success(page) => View::Details { page, quantity: self.quantity },
        }
    }
}
