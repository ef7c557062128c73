//! The product details view: state machine, quantity control, and fetch binding.

pub mod page;
pub mod quantity;
pub mod session;
pub mod state;

pub use page::{FetchTicket, ProductDetailsPage, View};
pub use quantity::Quantity;
pub use session::Session;
pub use state::{ViewEvent, ViewState, ViewStatus};
