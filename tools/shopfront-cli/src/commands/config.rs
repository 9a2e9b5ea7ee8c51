//! Configuration management commands.

use std::fs;
use std::path::PathBuf;

use anyhow::{bail, Context as _, Result};
use shopfront_commerce::catalog::Catalog;
use shopfront_commerce::Money;

use super::{ConfigArgs, ConfigCommand};
use crate::config::{generate_default_config, ShopConfig, CONFIG_FILE_NAMES};
use crate::context::Context;

/// Run the config command.
pub async fn run(args: ConfigArgs, ctx: &Context) -> Result<()> {
    match args.command {
        ConfigCommand::Show => show_config(ctx).await,
        ConfigCommand::Get { key } => get_config(&key, ctx).await,
        ConfigCommand::Set { key, value } => set_config(&key, &value, ctx).await,
        ConfigCommand::Init { force } => init_config(force, ctx).await,
        ConfigCommand::Validate => validate_config(ctx).await,
    }
}

async fn show_config(ctx: &Context) -> Result<()> {
    if ctx.output.is_json() {
        ctx.output.json(&ctx.config);
        return Ok(());
    }

    ctx.output.header("Current Configuration");
    match &ctx.config_path {
        Some(path) => ctx.output.kv("file", &path.display().to_string()),
        None => ctx.output.kv("file", "(defaults)"),
    }

    ctx.output.info("");
    ctx.output.info("[store]");
    ctx.output.kv("dir", &ctx.config.store.dir);
    ctx.output.kv("cart_key", &ctx.config.store.cart_key);

    ctx.output.info("");
    ctx.output.info("[shipping]");
    let shipping = &ctx.config.shipping;
    ctx.output.kv(
        "free_shipping_threshold",
        &format!(
            "{} ({})",
            shipping.free_shipping_threshold.amount_cents,
            shipping.free_shipping_threshold.display()
        ),
    );
    ctx.output.kv(
        "flat_fee",
        &format!(
            "{} ({})",
            shipping.flat_fee.amount_cents,
            shipping.flat_fee.display()
        ),
    );

    ctx.output.info("");
    ctx.output.info("[lookup]");
    ctx.output.kv("base_url", &ctx.config.lookup.base_url);
    ctx.output.kv("timeout_ms", &ctx.config.lookup.timeout_ms.to_string());
    ctx.output.kv("max_retries", &ctx.config.lookup.max_retries.to_string());

    ctx.output.info("");
    ctx.output.info("[catalog]");
    ctx.output.kv(
        "path",
        ctx.config.catalog.path.as_deref().unwrap_or("(built-in)"),
    );

    Ok(())
}

async fn get_config(key: &str, ctx: &Context) -> Result<()> {
    let value = get_config_value(&ctx.config, key)?;

    if ctx.output.is_json() {
        ctx.output.json(&serde_json::json!({ "key": key, "value": value }));
    } else {
        match value {
            serde_json::Value::String(s) => println!("{}", s),
            other => println!("{}", other),
        }
    }

    Ok(())
}

async fn set_config(key: &str, value: &str, ctx: &Context) -> Result<()> {
    let config_path = match &ctx.config_path {
        Some(path) => path.clone(),
        None => bail!("No config file found. Run `shopfront config init` to create one."),
    };
    let config_path = config_path.to_string_lossy().to_string();

    let mut config = ShopConfig::load(&config_path)?;
    set_config_value(&mut config, key, value)?;
    config.save(&config_path)?;

    ctx.output.success(&format!("Set {} = {}", key, value));

    Ok(())
}

async fn init_config(force: bool, ctx: &Context) -> Result<()> {
    let config_path: PathBuf = ctx.cwd.join(CONFIG_FILE_NAMES[0]);

    if config_path.exists() && !force {
        bail!(
            "Config file already exists: {}. Use --force to overwrite.",
            config_path.display()
        );
    }

    fs::write(&config_path, generate_default_config())
        .with_context(|| format!("Failed to write {}", config_path.display()))?;

    ctx.output.success(&format!("Created: {}", config_path.display()));

    Ok(())
}

async fn validate_config(ctx: &Context) -> Result<()> {
    ctx.output.header("Validating configuration");

    let (errors, warnings) = check_config(&ctx.config, ctx);

    // Print results
    if errors.is_empty() && warnings.is_empty() {
        ctx.output.success("Configuration is valid");
        return Ok(());
    }

    for error in &errors {
        ctx.output.error(&format!("Error: {}", error));
    }

    for warning in &warnings {
        ctx.output.warn(&format!("Warning: {}", warning));
    }

    if !errors.is_empty() {
        bail!("Configuration has {} error(s)", errors.len());
    }

    ctx.output.success("Configuration is valid (with warnings)");

    Ok(())
}

/// Collect (errors, warnings) for a config.
fn check_config(config: &ShopConfig, ctx: &Context) -> (Vec<String>, Vec<String>) {
    let mut errors: Vec<String> = Vec::new();
    let mut warnings: Vec<String> = Vec::new();

    if config.store.dir.trim().is_empty() {
        errors.push("store.dir must not be empty".to_string());
    }
    if config.store.cart_key.trim().is_empty() {
        errors.push("store.cart_key must not be empty".to_string());
    }

    if config.shipping.flat_fee.is_negative() {
        errors.push("shipping.flat_fee must not be negative".to_string());
    }
    if config.shipping.free_shipping_threshold.is_negative() {
        errors.push("shipping.free_shipping_threshold must not be negative".to_string());
    }
    if config.shipping.free_shipping_threshold.is_zero() {
        warnings.push("shipping.free_shipping_threshold is 0, every order ships free".to_string());
    }

    let base_url = &config.lookup.base_url;
    if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
        errors.push(format!("lookup.base_url '{}' must be an http(s) URL", base_url));
    }
    if config.lookup.timeout_ms == 0 {
        errors.push("lookup.timeout_ms must be greater than 0".to_string());
    }
    if config.lookup.max_retries > 5 {
        warnings.push(format!(
            "lookup.max_retries = {} may make checkout slow when the service is down",
            config.lookup.max_retries
        ));
    }

    if let Some(path) = &config.catalog.path {
        let resolved = ctx.resolve_path(path);
        match fs::read_to_string(&resolved) {
            Ok(json) => {
                if let Err(e) = Catalog::from_json(&json) {
                    errors.push(format!("catalog.path '{}': {}", path, e));
                }
            }
            Err(e) => errors.push(format!("catalog.path '{}': {}", path, e)),
        }
    }

    (errors, warnings)
}

fn get_config_value(config: &ShopConfig, key: &str) -> Result<serde_json::Value> {
    let parts: Vec<&str> = key.split('.').collect();

    let value: serde_json::Value = match parts.as_slice() {
        ["store", "dir"] => config.store.dir.clone().into(),
        ["store", "cart_key"] => config.store.cart_key.clone().into(),
        ["shipping", "free_shipping_threshold"] => {
            config.shipping.free_shipping_threshold.amount_cents.into()
        }
        ["shipping", "flat_fee"] => config.shipping.flat_fee.amount_cents.into(),
        ["lookup", "base_url"] => config.lookup.base_url.clone().into(),
        ["lookup", "timeout_ms"] => config.lookup.timeout_ms.into(),
        ["lookup", "max_retries"] => config.lookup.max_retries.into(),
        ["catalog", "path"] => config
            .catalog
            .path
            .clone()
            .map_or(serde_json::Value::Null, Into::into),
        _ => bail!("Unknown config key: {}", key),
    };

    Ok(value)
}

fn set_config_value(config: &mut ShopConfig, key: &str, value: &str) -> Result<()> {
    let parts: Vec<&str> = key.split('.').collect();

    match parts.as_slice() {
        ["store", "dir"] => config.store.dir = value.to_string(),
        ["store", "cart_key"] => config.store.cart_key = value.to_string(),
        ["shipping", "free_shipping_threshold"] => {
            config.shipping.free_shipping_threshold = parse_cents(value)?
        }
        ["shipping", "flat_fee"] => config.shipping.flat_fee = parse_cents(value)?,
        ["lookup", "base_url"] => config.lookup.base_url = value.to_string(),
        ["lookup", "timeout_ms"] => config.lookup.timeout_ms = value.parse()?,
        ["lookup", "max_retries"] => config.lookup.max_retries = value.parse()?,
        ["catalog", "path"] => {
            config.catalog.path = (!value.is_empty()).then(|| value.to_string())
        }
        _ => bail!("Unknown or read-only config key: {}", key),
    }

    Ok(())
}

fn parse_cents(value: &str) -> Result<Money> {
    let cents: i64 = value
        .parse()
        .with_context(|| format!("Expected an amount in centavos, got '{}'", value))?;
    Ok(Money::new(cents))
}
