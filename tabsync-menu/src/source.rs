//! Where menu data comes from.

use crate::error::{MenuError, MenuResult};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

/// Supplier of the raw menu and category payloads.
///
/// Implementations return the response body as untrusted JSON; validation
/// happens in [`crate::normalize`].
#[async_trait]
pub trait MenuSource: Send + Sync {
    /// The mobile menu config, usually wrapped as `{ "mobileMenu": ... }`.
    async fn fetch_mobile_menu(&self) -> MenuResult<Value>;

    /// The category forest.
    async fn fetch_category_tree(&self) -> MenuResult<Value>;
}

/// Endpoint configuration for [`HttpMenuSource`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MenuSourceConfig {
    /// Storefront origin, e.g. `https://shop.example.com`.
    pub base_url: String,
    pub menu_path: String,
    pub categories_path: String,
    /// Per-request timeout in milliseconds.
    pub timeout_ms: u64,
}

impl Default for MenuSourceConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:3000".to_string(),
            menu_path: "/api/menu-items".to_string(),
            categories_path: "/api/categories/tree".to_string(),
            timeout_ms: 10_000,
        }
    }
}

impl MenuSourceConfig {
    pub fn menu_url(&self) -> String {
        join(&self.base_url, &self.menu_path)
    }

    pub fn categories_url(&self) -> String {
        join(&self.base_url, &self.categories_path)
    }
}

fn join(base: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

/// Fetches menu data over HTTP.
pub struct HttpMenuSource {
    config: MenuSourceConfig,
    client: Client,
}

impl HttpMenuSource {
    pub fn new(config: MenuSourceConfig) -> MenuResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()?;
        Ok(Self { config, client })
    }

    pub fn config(&self) -> &MenuSourceConfig {
        &self.config
    }

    async fn get_json(&self, url: String) -> MenuResult<Value> {
        debug!(%url, "fetching menu data");
        let response = self.client.get(&url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(MenuError::Status(status.as_u16()));
        }
        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }
}

#[async_trait]
impl MenuSource for HttpMenuSource {
    async fn fetch_mobile_menu(&self) -> MenuResult<Value> {
        self.get_json(self.config.menu_url()).await
    }

    async fn fetch_category_tree(&self) -> MenuResult<Value> {
        self.get_json(self.config.categories_url()).await
    }
}
