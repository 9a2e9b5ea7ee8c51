//! CLI execution context.

use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};
use shopfront_cache::Cache;
use shopfront_commerce::cart::{CacheCartStorage, CartLedger};
use shopfront_commerce::catalog::Catalog;
use shopfront_lookup::{LookupPolicy, RetryPolicy, TimeoutConfig, ViaCepClient};

use crate::config::{ShopConfig, CONFIG_FILE_NAMES};
use crate::output::Output;

/// Execution context for CLI commands.
pub struct Context {
    /// CLI configuration.
    pub config: ShopConfig,
    /// File the configuration came from, if any.
    pub config_path: Option<PathBuf>,
    /// Output handler.
    pub output: Output,
    /// Working directory.
    pub cwd: PathBuf,
}

impl Context {
    /// Load context from config file.
    pub fn load(config_path: Option<&str>, output: Output) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current directory")?;

        let (config, config_path) = if let Some(path) = config_path {
            (ShopConfig::load(path)?, Some(PathBuf::from(path)))
        } else {
            // Try to find config in current directory or parent directories
            match find_config_file(&cwd) {
                Some(path) => {
                    let config = ShopConfig::load(&path.to_string_lossy())?;
                    (config, Some(path))
                }
                None => (ShopConfig::default(), None),
            }
        };

        if let Some(path) = &config_path {
            output.debug(&format!("Using config: {}", path.display()));
        }

        Ok(Self {
            config,
            config_path,
            output,
            cwd,
        })
    }

    /// Resolve a path relative to the working directory.
    pub fn resolve_path(&self, path: &str) -> PathBuf {
        if Path::new(path).is_absolute() {
            PathBuf::from(path)
        } else {
            self.cwd.join(path)
        }
    }

    /// The configured catalog, or the built-in one.
    pub fn catalog(&self) -> Result<Catalog> {
        match &self.config.catalog.path {
            Some(path) => {
                let path = self.resolve_path(path);
                let json = std::fs::read_to_string(&path)
                    .with_context(|| format!("Failed to read catalog: {}", path.display()))?;
                Catalog::from_json(&json)
                    .with_context(|| format!("Invalid catalog: {}", path.display()))
            }
            None => Ok(Catalog::sample()),
        }
    }

    /// Open the persisted cart.
    pub fn ledger(&self) -> Result<CartLedger<CacheCartStorage>> {
        let dir = self.resolve_path(&self.config.store.dir);
        let cache = Cache::open(&dir)
            .with_context(|| format!("Failed to open cart store: {}", dir.display()))?;
        let storage = CacheCartStorage::with_key(cache, &self.config.store.cart_key);
        Ok(CartLedger::load(storage, self.config.shipping))
    }

    /// Postal-code lookup client from the `[lookup]` section.
    pub fn lookup_client(&self) -> Result<ViaCepClient> {
        let lookup = &self.config.lookup;
        let policy = LookupPolicy::new(
            TimeoutConfig::from_millis(lookup.timeout_ms),
            RetryPolicy::new(lookup.max_retries),
        );
        ViaCepClient::with_base_url(&lookup.base_url, policy)
            .context("Failed to create postal code lookup client")
    }
}

/// Find a config file in the directory tree, starting at `start`.
pub fn find_config_file(start: &Path) -> Option<PathBuf> {
    let mut current = start.to_path_buf();
    loop {
        for name in &CONFIG_FILE_NAMES {
            let candidate = current.join(name);
            if candidate.exists() {
                return Some(candidate);
            }
        }

        if !current.pop() {
            return None;
        }
    }
}
