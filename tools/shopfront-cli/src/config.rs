//! CLI configuration.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use shopfront_commerce::cart::{ShippingPolicy, DEFAULT_CART_KEY};
use shopfront_lookup::VIACEP_BASE_URL;

/// Config file names searched for, in order.
pub const CONFIG_FILE_NAMES: [&str; 3] = ["shopfront.toml", ".shopfront.toml", "shopfront.json"];

/// CLI configuration file.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ShopConfig {
    /// Where the cart is persisted.
    #[serde(default)]
    pub store: StoreConfig,

    /// Shipping fee rule, amounts in centavos.
    #[serde(default)]
    pub shipping: ShippingPolicy,

    /// Postal-code lookup service.
    #[serde(default)]
    pub lookup: LookupConfig,

    /// Product catalog source.
    #[serde(default)]
    pub catalog: CatalogConfig,
}

impl ShopConfig {
    /// Load config from a file.
    pub fn load(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path))?;

        if path.ends_with(".json") {
            serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse JSON config: {}", path))
        } else {
            toml::from_str(&content)
                .with_context(|| format!("Failed to parse TOML config: {}", path))
        }
    }

    /// Save config to a file.
    pub fn save(&self, path: &str) -> Result<()> {
        let content = if path.ends_with(".json") {
            serde_json::to_string_pretty(self)?
        } else {
            toml::to_string_pretty(self)?
        };

        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path))
    }
}

/// Cart persistence settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StoreConfig {
    /// Directory holding the store files, relative to the working directory.
    #[serde(default = "default_store_dir")]
    pub dir: String,

    /// Key the cart is stored under.
    #[serde(default = "default_cart_key")]
    pub cart_key: String,
}

fn default_store_dir() -> String {
    ".shopfront".to_string()
}

fn default_cart_key() -> String {
    DEFAULT_CART_KEY.to_string()
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            dir: default_store_dir(),
            cart_key: default_cart_key(),
        }
    }
}

/// Postal-code lookup settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LookupConfig {
    /// Service base URL.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Per-attempt timeout in milliseconds.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    /// Retries after the first attempt.
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
}

fn default_base_url() -> String {
    VIACEP_BASE_URL.to_string()
}

fn default_timeout_ms() -> u64 {
    5000
}

fn default_max_retries() -> u32 {
    1
}

impl Default for LookupConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_ms: default_timeout_ms(),
            max_retries: default_max_retries(),
        }
    }
}

/// Catalog source. Without a path the built-in catalog is used.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct CatalogConfig {
    /// JSON file with an array of products.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

/// Generate a default shopfront.toml config file.
pub fn generate_default_config() -> String {
    format!(
        r#"# Shopfront configuration

[store]
dir = "{dir}"
cart_key = "{key}"

[shipping]
# Amounts in centavos
free_shipping_threshold = 50000
flat_fee = 2000

[lookup]
base_url = "{base_url}"
timeout_ms = {timeout_ms}
max_retries = {max_retries}

[catalog]
# path = "catalog.json"
"#,
        dir = default_store_dir(),
        key = DEFAULT_CART_KEY,
        base_url = VIACEP_BASE_URL,
        timeout_ms = default_timeout_ms(),
        max_retries = default_max_retries(),
    )
}
