//! Output rendering for the details view (table, JSON, markdown).

use crate::catalog::models::{ProductDetail, ProductPage, SimilarProduct};
use crate::config::OutputFormat;
use crate::view::{Quantity, View};
use serde::Serialize;

const TITLE_WIDTH: usize = 40;

/// Renders views for output.
pub struct Formatter {
    format: OutputFormat,
}

/// JSON shape of a view, tagged by status.
#[derive(Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
enum ViewOutput<'a> {
    Idle,
    Loading,
    NotFound {
        listing_route: &'a str,
    },
    Success {
        product: &'a ProductDetail,
        similar_products: &'a [SimilarProduct],
        quantity: Quantity,
    },
}

impl Formatter {
    /// Creates a new formatter.
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// Renders whichever view the page is in.
    pub fn format_view(&self, view: &View<'_>) -> String {
        match self.format {
            OutputFormat::Json => self.json_view(view),
            OutputFormat::Table => self.table_view(view),
            OutputFormat::Markdown => self.markdown_view(view),
        }
    }

    /// Renders one similar product line, keyed by its id.
    pub fn format_similar_product(&self, product: &SimilarProduct) -> String {
        match self.format {
            OutputFormat::Json => {
                serde_json::to_string(product).unwrap_or_else(|_| "{}".to_string())
            }
            OutputFormat::Table => format!(
                "{:<6}  {:<title_w$}  {:<16}  {:>12}  {:>6}",
                product.id,
                truncate(&product.title, TITLE_WIDTH),
                truncate(&product.brand, 16),
                product.display_price(),
                product.rating,
                title_w = TITLE_WIDTH
            ),
            OutputFormat::Markdown => format!(
                "| {} | {} | {} | {} | {} |",
                product.id,
                truncate(&product.title, TITLE_WIDTH),
                product.brand,
                product.display_price(),
                product.rating
            ),
        }
    }

    // JSON formatting

    fn json_view(&self, view: &View<'_>) -> String {
        let output = match view {
            View::Blank => ViewOutput::Idle,
            View::Loading => ViewOutput::Loading,
            View::NotFound { listing_route } => {
                ViewOutput::NotFound { listing_route: *listing_route }
            }
            View::Details { page, quantity } => ViewOutput::Success {
                product: &page.product,
                similar_products: &page.similar_products,
                quantity: *quantity,
            },
        };
        serde_json::to_string_pretty(&output).unwrap_or_else(|_| "{}".to_string())
    }

    // Table formatting

    fn table_view(&self, view: &View<'_>) -> String {
        match view {
            View::Blank => String::new(),
            View::Loading => "Loading...".to_string(),
            View::NotFound { listing_route } => {
                format!("Product Not Found\n\nContinue Shopping -> {}", listing_route)
            }
            View::Details { page, quantity } => self.table_details(page, *quantity),
        }
    }

    fn table_details(&self, page: &ProductPage, quantity: Quantity) -> String {
        let product = &page.product;
        let mut lines = Vec::new();

        lines.push(product.title.clone());
        lines.push(product.display_price());
        lines.push(format!("Rating:    {} *  {}", product.rating, product.reviews_label()));
        lines.push(format!("Image:     {}", product.image_url));
        lines.push(String::new());
        lines.push(product.description.clone());
        lines.push(String::new());
        lines.push(format!("Available: {}", product.availability));
        lines.push(format!("Brand:     {}", product.brand));
        lines.push("-".repeat(40));
        lines.push(format!("Quantity:  [ - ]  {}  [ + ]", quantity));
        lines.push("[ Add To Cart ]".to_string());
        lines.push(String::new());
        lines.push("Similar Products".to_string());

        if page.similar_products.is_empty() {
            lines.push("No similar products.".to_string());
        } else {
            lines.push(format!(
                "{:<6}  {:<title_w$}  {:<16}  {:>12}  {:>6}",
                "ID",
                "Title",
                "Brand",
                "Price",
                "Rating",
                title_w = TITLE_WIDTH
            ));
            lines.push(format!(
                "{:-<6}  {:-<title_w$}  {:-<16}  {:->12}  {:->6}",
                "",
                "",
                "",
                "",
                "",
                title_w = TITLE_WIDTH
            ));
            for similar in &page.similar_products {
                lines.push(self.format_similar_product(similar));
            }
        }

        lines.join("\n")
    }

    // Markdown formatting

    fn markdown_view(&self, view: &View<'_>) -> String {
        match view {
            View::Blank => String::new(),
            View::Loading => "*Loading...*".to_string(),
            View::NotFound { listing_route } => {
                format!("## Product Not Found\n\n[Continue Shopping]({})", listing_route)
            }
            View::Details { page, quantity } => self.markdown_details(page, *quantity),
        }
    }

    fn markdown_details(&self, page: &ProductPage, quantity: Quantity) -> String {
        let product = &page.product;
        let mut lines = Vec::new();

        lines.push(format!("## {}", product.title));
        lines.push(String::new());
        lines.push(format!("![product]({})", product.image_url));
        lines.push(String::new());
        lines.push(format!("- **Price:** {}", product.display_price()));
        lines.push(format!("- **Rating:** {} ({})", product.rating, product.reviews_label()));
        lines.push(format!("- **Available:** {}", product.availability));
        lines.push(format!("- **Brand:** {}", product.brand));
        lines.push(format!("- **Quantity:** {}", quantity));
        lines.push(String::new());
        lines.push(product.description.clone());
        lines.push(String::new());
        lines.push("### Similar Products".to_string());
        lines.push(String::new());

        if page.similar_products.is_empty() {
            lines.push("*No similar products.*".to_string());
        } else {
            lines.push("| ID | Title | Brand | Price | Rating |".to_string());
            lines.push("|----|-------|-------|-------|--------|".to_string());
            for similar in &page.similar_products {
                lines.push(self.format_similar_product(similar));
            }
        }

        lines.join("\n")
    }
}

fn truncate(s: &str, width: usize) -> String {
    if s.chars().count() > width {
        let head: String = s.chars().take(width.saturating_sub(3)).collect();
        format!("{}...", head)
    } else {
        s.to_string()
    }
}
