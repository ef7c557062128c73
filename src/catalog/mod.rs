//! Catalog API modules for the HTTP client, credentials, and data models.

pub mod client;
pub mod credentials;
pub mod error;
pub mod models;

pub use client::{CatalogApi, CatalogClient};
pub use credentials::{CredentialChain, CredentialSource, EnvToken, StaticToken, TokenFile};
pub use error::FetchError;
pub use models::{ProductDetail, ProductId, ProductPage, SimilarProduct};
