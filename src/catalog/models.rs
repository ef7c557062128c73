//! Data models for catalog products: the wire records and their normalized shape.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Opaque key addressing one product in the catalog.
///
/// The remote API emits numeric ids while route parameters are strings, so
/// both JSON forms are accepted.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct ProductId(String);

impl ProductId {
    /// Creates an id from any string-like value.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the raw id.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl<'de> Deserialize<'de> for ProductId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawId {
            Text(String),
            Number(serde_json::Number),
        }

        Ok(match RawId::deserialize(deserializer)? {
            RawId::Text(s) => ProductId(s),
            RawId::Number(n) => ProductId(n.to_string()),
        })
    }
}

impl std::str::FromStr for ProductId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err("Product id must not be empty".to_string());
        }
        Ok(ProductId(trimmed.to_string()))
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.0)
    }
}

impl From<&str> for ProductId {
    fn from(s: &str) -> Self {
        ProductId(s.to_string())
    }
}

/// Product record as the catalog API sends it.
#[derive(Debug, Clone, Deserialize)]
pub struct RawProduct {
    pub id: ProductId,
    pub title: String,
    pub price: f64,
    pub rating: f64,
    pub total_reviews: u64,
    pub description: String,
    pub availability: String,
    pub brand: String,
    pub image_url: String,
}

/// Body of `GET /products/{id}`: the product itself plus its cross-sells.
#[derive(Debug, Clone, Deserialize)]
pub struct RawProductDetails {
    #[serde(flatten)]
    pub product: RawProduct,
    pub similar_products: Vec<RawProduct>,
}

/// A fully fetched product, as displayed on the details page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductDetail {
    pub id: ProductId,
    pub title: String,
    pub price: f64,
    pub rating: f64,
    pub total_reviews: u64,
    pub description: String,
    pub availability: String,
    pub brand: String,
    pub image_url: String,
}

impl ProductDetail {
    /// Price label, e.g. `Rs 1000/-`.
    pub fn display_price(&self) -> String {
        format!("Rs {}/-", self.price)
    }

    /// Review count label, e.g. `10 Reviews`.
    pub fn reviews_label(&self) -> String {
        format!("{} Reviews", self.total_reviews)
    }
}

impl From<RawProduct> for ProductDetail {
    fn from(raw: RawProduct) -> Self {
        Self {
            id: raw.id,
            title: raw.title,
            price: raw.price,
            rating: raw.rating,
            total_reviews: raw.total_reviews,
            description: raw.description,
            availability: raw.availability,
            brand: raw.brand,
            image_url: raw.image_url,
        }
    }
}

/// A cross-sell entry shown under the main product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimilarProduct {
    pub id: ProductId,
    pub title: String,
    pub price: f64,
    pub rating: f64,
    pub total_reviews: u64,
    pub description: String,
    pub availability: String,
    pub brand: String,
    pub image_url: String,
}

impl SimilarProduct {
    /// Price label, e.g. `Rs 1000/-`.
    pub fn display_price(&self) -> String {
        format!("Rs {}/-", self.price)
    }
}

impl From<RawProduct> for SimilarProduct {
    fn from(raw: RawProduct) -> Self {
        Self {
            id: raw.id,
            title: raw.title,
            price: raw.price,
            rating: raw.rating,
            total_reviews: raw.total_reviews,
            description: raw.description,
            availability: raw.availability,
            brand: raw.brand,
            image_url: raw.image_url,
        }
    }
}

/// Everything one successful fetch yields. Both parts are built together.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductPage {
    pub product: ProductDetail,
    pub similar_products: Vec<SimilarProduct>,
}

impl ProductPage {
    /// Normalizes a wire body. Similar products keep the order the API returned.
    pub fn from_raw(raw: RawProductDetails) -> Self {
        Self {
            product: raw.product.into(),
            similar_products: raw.similar_products.into_iter().map(Into::into).collect(),
        }
    }

    /// Parses and normalizes a JSON body in one step.
    pub fn from_json(body: &str) -> Result<Self, serde_json::Error> {
        let raw: RawProductDetails = serde_json::from_str(body)?;
        Ok(Self::from_raw(raw))
    }
}
