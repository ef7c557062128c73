//! product-details - Product detail viewer for a storefront catalog API
//!
//! Fetches one product with its similar products, tracks the
//! loading/success/error view state, and renders it with quantity controls.

pub mod catalog;
pub mod commands;
pub mod config;
pub mod format;
pub mod view;

#[cfg(test)]
pub(crate) mod testing;

pub use catalog::models::{ProductDetail, ProductId, ProductPage, SimilarProduct};
pub use config::Config;
pub use view::{ProductDetailsPage, Quantity, View, ViewState, ViewStatus};
