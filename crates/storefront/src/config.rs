//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `STOREFRONT_HOST` - Bind address (default: 127.0.0.1)
//! - `STOREFRONT_PORT` - Listen port (default: 3000)
//! - `STOREFRONT_CART_PATH` - Cart persistence file (default: foodie_cart.json)
//! - `SANITY_PROJECT_ID` - Sanity content project (default: 1c72zgt0)
//! - `SANITY_DATASET` - Sanity dataset (default: production)
//! - `SANITY_API_VERSION` - Sanity API version (default: v2021-10-21)
//! - `SENTRY_DSN` - Sentry error tracking DSN

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

use thiserror::Error;

/// GROQ query projecting the menu item fields the storefront needs.
const MENU_QUERY: &str =
    r#"*[_type == "menuItem"]{name, desc, price, "id": _id, "img": img.asset->url}"#;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront application configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Path of the cart persistence file
    pub cart_path: PathBuf,
    /// Remote menu source configuration
    pub sanity: SanityConfig,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
}

/// Sanity content query configuration for the remote menu source.
#[derive(Debug, Clone)]
pub struct SanityConfig {
    /// Sanity project id
    pub project_id: String,
    /// Dataset name
    pub dataset: String,
    /// API version path segment
    pub api_version: String,
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is present but unparseable.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let host = get_env_or_default("STOREFRONT_HOST", "127.0.0.1")
            .parse::<IpAddr>()
            .map_err(|e| {
                ConfigError::InvalidEnvVar("STOREFRONT_HOST".to_string(), e.to_string())
            })?;
        let port = get_env_or_default("STOREFRONT_PORT", "3000")
            .parse::<u16>()
            .map_err(|e| {
                ConfigError::InvalidEnvVar("STOREFRONT_PORT".to_string(), e.to_string())
            })?;
        let cart_path = PathBuf::from(get_env_or_default("STOREFRONT_CART_PATH", "foodie_cart.json"));
        let sanity = SanityConfig::from_env();
        let sentry_dsn = get_optional_env("SENTRY_DSN");

        Ok(Self {
            host,
            port,
            cart_path,
            sanity,
            sentry_dsn,
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

impl SanityConfig {
    fn from_env() -> Self {
        Self {
            project_id: get_env_or_default("SANITY_PROJECT_ID", "1c72zgt0"),
            dataset: get_env_or_default("SANITY_DATASET", "production"),
            api_version: get_env_or_default("SANITY_API_VERSION", "v2021-10-21"),
        }
    }

    /// The content query endpoint carrying the percent-encoded menu query.
    #[must_use]
    pub fn query_url(&self) -> String {
        format!(
            "https://{}.api.sanity.io/{}/data/query/{}?query={}",
            self.project_id,
            self.api_version,
            self.dataset,
            urlencoding::encode(MENU_QUERY)
        )
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get an optional environment variable.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_query_url_embeds_encoded_query() {
        let sanity = SanityConfig {
            project_id: "1c72zgt0".to_string(),
            dataset: "production".to_string(),
            api_version: "v2021-10-21".to_string(),
        };

        let url = sanity.query_url();
        assert!(url.starts_with(
            "https://1c72zgt0.api.sanity.io/v2021-10-21/data/query/production?query="
        ));
        // GROQ query must be percent-encoded
        assert!(!url.contains("*["));
        assert!(url.contains("menuItem"));

        // And it must still be a valid URL
        url::Url::parse(&url).unwrap();
    }

    #[test]
    fn test_socket_addr() {
        let config = StorefrontConfig {
            host: "127.0.0.1".parse().unwrap(),
            port: 3000,
            cart_path: PathBuf::from("foodie_cart.json"),
            sanity: SanityConfig {
                project_id: "1c72zgt0".to_string(),
                dataset: "production".to_string(),
                api_version: "v2021-10-21".to_string(),
            },
            sentry_dsn: None,
        };

        let addr = config.socket_addr();
        assert_eq!(addr.ip().to_string(), "127.0.0.1");
        assert_eq!(addr.port(), 3000);
    }
}
