//! CLI command implementations.

pub mod browse;
pub mod show;

pub use browse::{BrowseCommand, BrowseExit};
pub use show::{QuantityClicks, ShowCommand};
