//! CLI configuration.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use storefront_commerce::booking::BookingSettings;
use storefront_commerce::showcase::Storefront;
use storefront_commerce::Currency;

/// File names searched for, in order, in each directory.
pub const CONFIG_FILE_NAMES: [&str; 3] = ["storefront.toml", ".storefront.toml", "storefront.json"];

/// CLI configuration file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CliConfig {
    #[serde(default)]
    pub storefront: StorefrontConfig,

    #[serde(default)]
    pub cart: CartConfig,

    #[serde(default)]
    pub booking: BookingSettings,
}

impl CliConfig {
    /// Load config from a file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        if is_json(path) {
            serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse JSON config: {}", path.display()))
        } else {
            toml::from_str(&content)
                .with_context(|| format!("Failed to parse TOML config: {}", path.display()))
        }
    }

    /// Save config to a file.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = if is_json(path) {
            serde_json::to_string_pretty(self)?
        } else {
            toml::to_string_pretty(self)?
        };

        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path.display()))
    }

    /// Currency configured for the storefront.
    pub fn currency(&self) -> Result<Currency> {
        match Currency::from_code(&self.storefront.currency) {
            Some(currency) => Ok(currency),
            None => bail!("Unsupported currency: {}", self.storefront.currency),
        }
    }

    /// The storefront's addressing record.
    pub fn storefront(&self) -> Storefront {
        let mut storefront = Storefront::new(self.storefront.tenant.as_str(), self.storefront.name.as_str());
        if let Some(slug) = &self.storefront.slug {
            storefront.slug = slug.clone();
        }
        storefront.legacy_slugs = self.storefront.legacy_slugs.clone();
        storefront
    }

    /// Problems that make the config unusable, and ones worth a warning.
    pub fn check(&self) -> (Vec<String>, Vec<String>) {
        let mut errors = Vec::new();
        let mut warnings = Vec::new();

        if self.storefront.tenant.trim().is_empty() {
            errors.push("storefront.tenant is required".to_string());
        }
        if Currency::from_code(&self.storefront.currency).is_none() {
            errors.push(format!("storefront.currency '{}' is not supported", self.storefront.currency));
        }
        if let Err(e) = self.booking.validate() {
            errors.push(format!("booking: {}", e));
        }

        if self.storefront.name.trim().is_empty() && self.storefront.slug.is_none() {
            warnings.push("storefront.name is empty, so no slug can be derived".to_string());
        }
        if let Some(slug) = &self.storefront.slug {
            let canonical = storefront_commerce::showcase::slugify(slug);
            if &canonical != slug {
                warnings.push(format!("storefront.slug '{}' is not canonical (expected '{}')", slug, canonical));
            }
        }
        if !self.booking.require_advance_payment && self.booking.advance_percent != 100 {
            warnings.push("booking.advance_percent is ignored without require_advance_payment".to_string());
        }

        (errors, warnings)
    }
}

fn is_json(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == "json")
}

/// Storefront identity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorefrontConfig {
    /// Tenant id the storefront belongs to.
    #[serde(default)]
    pub tenant: String,

    /// Display name.
    #[serde(default)]
    pub name: String,

    /// Canonical slug; derived from the name when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,

    /// Slugs that redirect to the canonical one.
    #[serde(default)]
    pub legacy_slugs: Vec<String>,

    /// ISO currency code of product prices.
    #[serde(default = "default_currency")]
    pub currency: String,
}

fn default_currency() -> String {
    Currency::default().code().to_string()
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        Self {
            tenant: String::new(),
            name: String::new(),
            slug: None,
            legacy_slugs: Vec::new(),
            currency: default_currency(),
        }
    }
}

/// Cart persistence.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartConfig {
    /// Directory carts are stored in, relative to the working directory.
    #[serde(default = "default_cart_dir")]
    pub dir: PathBuf,
}

fn default_cart_dir() -> PathBuf {
    PathBuf::from(".storefront").join("carts")
}

impl Default for CartConfig {
    fn default() -> Self {
        Self { dir: default_cart_dir() }
    }
}

/// Generate a default storefront.toml config file.
pub fn generate_default_config(tenant: &str, name: &str) -> String {
    format!(
        r#"# Storefront configuration

[storefront]
tenant = "{tenant}"
name = "{name}"
currency = "INR"
# slug = "{slug}"
# legacy_slugs = []

[cart]
dir = ".storefront/carts"

[booking]
full_day = false
require_advance_payment = false
advance_percent = 100
"#,
        tenant = tenant,
        name = name,
        slug = storefront_commerce::showcase::slugify(name),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_config_parses() {
        let config: CliConfig = toml::from_str(&generate_default_config("t_1", "Blue Door")).unwrap();
        assert_eq!(config.storefront.tenant, "t_1");
        assert_eq!(config.currency().unwrap(), Currency::INR);
        assert_eq!(config.storefront().slug, "blue-door");
        assert!(config.check().0.is_empty());
    }

    #[test]
    fn test_empty_config_defaults() {
        let config: CliConfig = toml::from_str("").unwrap();
        assert_eq!(config.storefront.currency, "INR");
        assert_eq!(config.cart.dir, PathBuf::from(".storefront/carts"));
        assert!(!config.booking.full_day);

        let (errors, _) = config.check();
        assert_eq!(errors, vec!["storefront.tenant is required"]);
    }

    #[test]
    fn test_check_reports_bad_values() {
        let config: CliConfig = toml::from_str(
            r#"
            [storefront]
            tenant = "t_1"
            currency = "XYZ"
            slug = "Blue Door"

            [booking]
            require_advance_payment = true
            advance_percent = 0
            "#,
        )
        .unwrap();

        let (errors, warnings) = config.check();
        assert_eq!(errors.len(), 2);
        assert_eq!(warnings.len(), 1);
        assert!(config.currency().is_err());
    }

    #[test]
    fn test_save_and_load_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("storefront.json");

        let mut config = CliConfig::default();
        config.storefront.tenant = "t_9".into();
        config.booking.full_day = true;
        config.save(&path).unwrap();

        let loaded = CliConfig::load(&path).unwrap();
        assert_eq!(loaded.storefront.tenant, "t_9");
        assert!(loaded.booking.full_day);
    }
}
