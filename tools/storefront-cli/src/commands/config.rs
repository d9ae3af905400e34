//! Configuration management commands.

use anyhow::{bail, Result};

use super::{ConfigArgs, ConfigCommand};
use crate::config::{generate_default_config, CONFIG_FILE_NAMES};
use crate::context::Context;

/// Run the config command.
pub fn run(args: ConfigArgs, ctx: &Context) -> Result<()> {
    match args.command {
        ConfigCommand::Show => show_config(ctx),
        ConfigCommand::Init { tenant, name, force } => init_config(&tenant, &name, force, ctx),
        ConfigCommand::Validate => validate_config(ctx),
    }
}

fn show_config(ctx: &Context) -> Result<()> {
    if ctx.output.is_json() {
        ctx.output.json(&ctx.config);
        return Ok(());
    }

    ctx.output.header("Current Configuration");
    match &ctx.config_path {
        Some(path) => ctx.output.kv("file", &path.display().to_string()),
        None => ctx.output.warn("No config file found, showing defaults"),
    }

    let config = &ctx.config;
    ctx.output.info("[storefront]");
    ctx.output.kv("tenant", &config.storefront.tenant);
    ctx.output.kv("name", &config.storefront.name);
    ctx.output.kv("slug", &config.storefront().slug);
    if !config.storefront.legacy_slugs.is_empty() {
        ctx.output.kv("legacy_slugs", &config.storefront.legacy_slugs.join(", "));
    }
    ctx.output.kv("currency", &config.storefront.currency);

    ctx.output.info("[cart]");
    ctx.output.kv("dir", &config.cart.dir.display().to_string());

    ctx.output.info("[booking]");
    ctx.output.kv("full_day", &config.booking.full_day.to_string());
    ctx.output.kv(
        "require_advance_payment",
        &config.booking.require_advance_payment.to_string(),
    );
    ctx.output.kv("advance_percent", &config.booking.advance_percent.to_string());

    Ok(())
}

fn init_config(tenant: &str, name: &str, force: bool, ctx: &Context) -> Result<()> {
    let config_path = ctx.cwd.join(CONFIG_FILE_NAMES[0]);

    if config_path.exists() && !force {
        bail!(
            "Config file already exists: {}. Use --force to overwrite.",
            config_path.display()
        );
    }

    let name = if name.trim().is_empty() {
        ctx.cwd
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("my-storefront")
            .to_string()
    } else {
        name.to_string()
    };

    std::fs::write(&config_path, generate_default_config(tenant, &name))?;
    ctx.output.success(&format!("Created: {}", config_path.display()));

    Ok(())
}

fn validate_config(ctx: &Context) -> Result<()> {
    ctx.output.header("Validating configuration");

    let (errors, warnings) = ctx.config.check();

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
