//! Menu source adapter.
//!
//! Fetches the sellable catalog from the Sanity content query endpoint and
//! substitutes a fixed built-in catalog on any failure, so the menu the
//! customer sees is never empty. Successful reads are cached via `moka`
//! (5-minute TTL); there is no retry loop, a single attempt falls back
//! immediately.

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache;
use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::{debug, instrument, warn};

use bhojan_core::MenuItem;

use crate::config::SanityConfig;

const CACHE_KEY: &str = "menu";
const CACHE_TTL: Duration = Duration::from_secs(300);

/// Errors that can occur on the remote menu read.
///
/// These never escape [`MenuClient::load_menu`]; they are logged and the
/// fallback catalog is substituted.
#[derive(Debug, thiserror::Error)]
pub enum MenuError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The endpoint answered with a non-success status.
    #[error("menu query returned HTTP {0}")]
    Status(reqwest::StatusCode),

    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// The result array was empty.
    #[error("menu query returned no items")]
    EmptyResult,
}

/// Envelope of the content query response.
#[derive(Debug, Deserialize)]
struct QueryResponse {
    #[serde(default)]
    result: Vec<MenuItem>,
}

/// Client for the remote menu source.
///
/// Cheaply cloneable via `Arc`. The loaded catalog is cached for
/// 5 minutes.
#[derive(Clone)]
pub struct MenuClient {
    inner: Arc<MenuClientInner>,
}

struct MenuClientInner {
    client: reqwest::Client,
    endpoint: String,
    cache: Cache<&'static str, Vec<MenuItem>>,
}

impl MenuClient {
    /// Create a new menu client.
    #[must_use]
    pub fn new(config: &SanityConfig) -> Self {
        let cache = Cache::builder()
            .max_capacity(1)
            .time_to_live(CACHE_TTL)
            .build();

        Self {
            inner: Arc::new(MenuClientInner {
                client: reqwest::Client::new(),
                endpoint: config.query_url(),
                cache,
            }),
        }
    }

    /// Load the catalog.
    ///
    /// Never fails: on a cache miss a single remote read is attempted, and
    /// any failure (network, non-success status, malformed payload, empty
    /// result) is absorbed here with a warning, substituting the fallback
    /// catalog. The fallback is not cached so a recovered endpoint is
    /// picked up on the next call.
    #[instrument(skip(self))]
    pub async fn load_menu(&self) -> Vec<MenuItem> {
        if let Some(menu) = self.inner.cache.get(CACHE_KEY).await {
            debug!("Cache hit for menu");
            return menu;
        }

        match self.fetch_remote().await {
            Ok(menu) => {
                self.inner.cache.insert(CACHE_KEY, menu.clone()).await;
                menu
            }
            Err(e) => {
                warn!("Could not fetch menu from Sanity, using fallback: {e}");
                fallback_menu()
            }
        }
    }

    /// One attempt against the content query endpoint.
    async fn fetch_remote(&self) -> Result<Vec<MenuItem>, MenuError> {
        let response = self.inner.client.get(&self.inner.endpoint).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(MenuError::Status(status));
        }

        let body = response.text().await?;
        let parsed: QueryResponse = serde_json::from_str(&body)?;

        let items = sanitize(parsed.result);
        if items.is_empty() {
            return Err(MenuError::EmptyResult);
        }

        Ok(items)
    }

    #[cfg(test)]
    fn with_endpoint(endpoint: String) -> Self {
        let cache = Cache::builder()
            .max_capacity(1)
            .time_to_live(CACHE_TTL)
            .build();

        Self {
            inner: Arc::new(MenuClientInner {
                client: reqwest::Client::new(),
                endpoint,
                cache,
            }),
        }
    }
}

/// Drop items that violate the catalog contract (negative price).
fn sanitize(items: Vec<MenuItem>) -> Vec<MenuItem> {
    items
        .into_iter()
        .filter(|item| {
            if item.price.is_sign_negative() {
                warn!(id = %item.id, "dropping menu item with negative price");
                return false;
            }
            true
        })
        .collect()
}

/// Placeholder image URL, seeded so each dish gets a stable picture.
fn placeholder_image(seed: &str) -> String {
    let seed = if seed.is_empty() { "food" } else { seed };
    format!("https://picsum.photos/seed/{}/600/400", urlencoding::encode(seed))
}

/// The fixed built-in catalog used when the remote source is unavailable
/// or empty.
#[must_use]
pub fn fallback_menu() -> Vec<MenuItem> {
    [
        ("m1", "Paneer Butter Masala", "Creamy paneer with rich tomato gravy", 180),
        ("m2", "Veg Biryani", "Fragrant basmati rice with veggies and spices", 150),
        ("m3", "Chicken Curry", "Traditional spicy chicken curry", 220),
        ("m4", "Masala Dosa", "Crispy dosa with lightly spiced potato filling", 90),
        ("m5", "Schezwan Noodles", "Spicy Indo-Chinese stir fry noodles", 140),
    ]
    .into_iter()
    .map(|(id, name, desc, price)| {
        MenuItem::new(id, name, desc, Decimal::from(price), placeholder_image(name))
    })
    .collect()
}
