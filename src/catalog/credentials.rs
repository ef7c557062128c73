//! Bearer token sources for catalog requests.

use std::path::PathBuf;
use tracing::debug;

/// Name of the token the storefront login stores.
pub const TOKEN_NAME: &str = "jwt_token";

/// Supplies the bearer token sent with each catalog request.
///
/// Read-only: sources never refresh or validate the token, the catalog
/// server is the one that rejects missing or expired credentials.
pub trait CredentialSource: Send + Sync {
    /// Returns the current token, if any.
    fn token(&self) -> Option<String>;
}

/// A fixed token (or none).
#[derive(Debug, Clone, Default)]
pub struct StaticToken(pub Option<String>);

impl StaticToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(Some(token.into()))
    }

    pub fn none() -> Self {
        Self(None)
    }
}

impl CredentialSource for StaticToken {
    fn token(&self) -> Option<String> {
        self.0.clone()
    }
}

/// Reads the token from an environment variable on every request.
#[derive(Debug, Clone)]
pub struct EnvToken {
    var: String,
}

impl EnvToken {
    pub fn new(var: impl Into<String>) -> Self {
        Self { var: var.into() }
    }
}

impl CredentialSource for EnvToken {
    fn token(&self) -> Option<String> {
        std::env::var(&self.var).ok()
    }
}

/// Reads the token from a file on every request, trimming whitespace.
#[derive(Debug, Clone)]
pub struct TokenFile {
    path: PathBuf,
}

impl TokenFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `<config_dir>/product-details/jwt_token`
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("product-details").join(TOKEN_NAME))
    }
}

impl CredentialSource for TokenFile {
    fn token(&self) -> Option<String> {
        match std::fs::read_to_string(&self.path) {
            Ok(content) => Some(content.trim().to_string()),
            Err(e) => {
                debug!("No token file at {}: {}", self.path.display(), e);
                None
            }
        }
    }
}

/// Tries each source in order; the first non-empty token wins.
#[derive(Default)]
pub struct CredentialChain {
    sources: Vec<Box<dyn CredentialSource>>,
}

impl CredentialChain {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a source to the chain.
    pub fn with(mut self, source: impl CredentialSource + 'static) -> Self {
        self.sources.push(Box::new(source));
        self
    }

    pub fn len(&self) -> usize {
        self.sources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }
}

impl CredentialSource for CredentialChain {
    fn token(&self) -> Option<String> {
        self.sources.iter().filter_map(|s| s.token()).find(|t| !t.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_static_token() {
        assert_eq!(StaticToken::new("abc").token(), Some("abc".to_string()));
        assert_eq!(StaticToken::none().token(), None);
    }

    #[test]
    fn test_env_token() {
        let var = "PDP_TEST_TOKEN_ENV_SOURCE";
        std::env::remove_var(var);
        let source = EnvToken::new(var);
        assert_eq!(source.token(), None);

        std::env::set_var(var, "from-env");
        assert_eq!(source.token(), Some("from-env".to_string()));
        std::env::remove_var(var);
    }

    #[test]
    fn test_token_file_trimmed() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "  file-token  ").unwrap();

        let source = TokenFile::new(file.path());
        assert_eq!(source.token(), Some("file-token".to_string()));
    }

    #[test]
    fn test_token_file_missing() {
        let source = TokenFile::new("/nonexistent/path/jwt_token");
        assert_eq!(source.token(), None);
    }

    #[test]
    fn test_token_file_default_path_name() {
        if let Some(path) = TokenFile::default_path() {
            assert!(path.ends_with("product-details/jwt_token"));
        }
    }

    #[test]
    fn test_chain_first_non_empty_wins() {
        let chain = CredentialChain::new()
            .with(StaticToken::none())
            .with(StaticToken::new(""))
            .with(StaticToken::new("second"))
            .with(StaticToken::new("third"));

        assert_eq!(chain.len(), 4);
        assert_eq!(chain.token(), Some("second".to_string()));
    }

    #[test]
    fn test_empty_chain() {
        let chain = CredentialChain::new();
        assert!(chain.is_empty());
        assert_eq!(chain.token(), None);
    }
}
