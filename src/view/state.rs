//! View state machine: Idle -> Loading -> Success | Error.

use crate::catalog::models::{ProductId, ProductPage};
use serde::Serialize;
use tracing::debug;

/// Status tag without payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewStatus {
    Idle,
    Loading,
    Success,
    Error,
}

/// Current state of the details view. The fetched page only exists in `Success`.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum ViewState {
    #[default]
    Idle,
    Loading {
        product_id: ProductId,
    },
    Success(ProductPage),
    Error,
}

/// Inputs that drive the state machine.
#[derive(Debug, Clone)]
pub enum ViewEvent {
    Mount(ProductId),
    FetchSucceeded(ProductPage),
    FetchFailed,
}

impl ViewEvent {
    fn name(&self) -> &'static str {
        match self {
            ViewEvent::Mount(_) => "mount",
            ViewEvent::FetchSucceeded(_) => "fetch_succeeded",
            ViewEvent::FetchFailed => "fetch_failed",
        }
    }
}

impl ViewState {
    pub fn status(&self) -> ViewStatus {
        match self {
            ViewState::Idle => ViewStatus::Idle,
            ViewState::Loading { .. } => ViewStatus::Loading,
            ViewState::Success(_) => ViewStatus::Success,
            ViewState::Error => ViewStatus::Error,
        }
    }

    /// The fetched page, if the fetch succeeded.
    pub fn page(&self) -> Option<&ProductPage> {
        match self {
            ViewState::Success(page) => Some(page),
            _ => None,
        }
    }

    /// Id being fetched, while loading.
    pub fn loading_id(&self) -> Option<&ProductId> {
        match self {
            ViewState::Loading { product_id } => Some(product_id),
            _ => None,
        }
    }

    /// Applies an event. Returns false (and leaves the state alone) when the
    /// event is not valid in the current state.
    pub fn on(&mut self, event: ViewEvent) -> bool {
        let from = self.status();
        let name = event.name();

        let next = match (&*self, event) {
            (ViewState::Idle, ViewEvent::Mount(product_id)) => ViewState::Loading { product_id },
            (ViewState::Loading { .. }, ViewEvent::FetchSucceeded(page)) => ViewState::Success(page),
            (ViewState::Loading { .. }, ViewEvent::FetchFailed) => ViewState::Error,
            _ => {
                debug!("Ignoring {} in state {:?}", name, from);
                return false;
            }
        };

        debug!("View {:?} -> {:?} on {}", from, next.status(), name);
        *self = next;
        true
    }
}
