//! Configuration management with TOML, environment variables, and CLI overrides.

use crate::catalog::credentials::{CredentialChain, EnvToken, StaticToken, TokenFile};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Application configuration with layered loading.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Catalog API base URL
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Bearer token given directly (takes precedence over other sources)
    #[serde(default)]
    pub token: Option<String>,

    /// Environment variable holding the bearer token
    #[serde(default = "default_token_env")]
    pub token_env: String,

    /// File holding the bearer token
    #[serde(default)]
    pub token_file: Option<PathBuf>,

    /// Route of the product listing, offered when a product cannot be shown
    #[serde(default = "default_listing_route")]
    pub listing_route: String,

    /// Output format
    #[serde(default)]
    pub format: OutputFormat,

    /// Whole-request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Connect timeout in seconds
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,
}

fn default_base_url() -> String {
    "https://apis.ccbp.in".to_string()
}

fn default_token_env() -> String {
    "PDP_JWT_TOKEN".to_string()
}

fn default_listing_route() -> String {
    "/products".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_connect_timeout_secs() -> u64 {
    10
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            token: None,
            token_env: default_token_env(),
            token_file: None,
            listing_route: default_listing_route(),
            format: OutputFormat::Table,
            timeout_secs: default_timeout_secs(),
            connect_timeout_secs: default_connect_timeout_secs(),
        }
    }
}

impl Config {
    /// Creates a new default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        debug!("Loading config from: {}", path.display());

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Loads configuration with fallback to default locations.
    pub fn load(explicit_path: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit_path {
            return Self::from_file(path);
        }

        let local_config = Path::new("product-details.toml");
        if local_config.exists() {
            debug!("Found product-details.toml in current directory");
            return Self::from_file(local_config);
        }

        if let Some(config_dir) = dirs::config_dir() {
            let xdg_config = config_dir.join("product-details").join("config.toml");
            if xdg_config.exists() {
                debug!("Found config in XDG config directory");
                return Self::from_file(xdg_config);
            }
        }

        debug!("No config file found, using defaults");
        Ok(Self::default())
    }

    /// Applies environment variable overrides.
    pub fn with_env(mut self) -> Self {
        if let Ok(base_url) = std::env::var("PDP_BASE_URL") {
            self.base_url = base_url;
        }

        if let Ok(token) = std::env::var("PDP_TOKEN") {
            self.token = Some(token);
        }

        if let Ok(format) = std::env::var("PDP_FORMAT") {
            if let Ok(f) = format.parse() {
                self.format = f;
            }
        }

        if let Ok(route) = std::env::var("PDP_LISTING_ROUTE") {
            self.listing_route = route;
        }

        self
    }

    /// Builds the token lookup: explicit token, then env var, then token file.
    pub fn credentials(&self) -> CredentialChain {
        let mut chain = CredentialChain::new()
            .with(StaticToken(self.token.clone()))
            .with(EnvToken::new(self.token_env.clone()));

        let token_file = self.token_file.clone().or_else(TokenFile::default_path);
        if let Some(path) = token_file {
            chain = chain.with(TokenFile::new(path));
        }

        chain
    }
}

/// Output format for rendered views.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
    Markdown,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "table" => Ok(OutputFormat::Table),
            "json" => Ok(OutputFormat::Json),
            "markdown" | "md" => Ok(OutputFormat::Markdown),
            _ => Err(format!("Unknown format: {}. Use: table, json, markdown", s)),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Table => write!(f, "table"),
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Markdown => write!(f, "markdown"),
        }
    }
}
