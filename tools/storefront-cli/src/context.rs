//! CLI execution context.

use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};
use storefront_cache::FileStore;
use storefront_commerce::cart::CartStore;
use storefront_commerce::TenantId;

use crate::config::{CliConfig, CONFIG_FILE_NAMES};
use crate::output::Output;

/// Execution context for CLI commands.
pub struct Context {
    /// CLI configuration.
    pub config: CliConfig,
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

        let (config, config_path) = match config_path {
            Some(path) => {
                let path = resolve(&cwd, path);
                (CliConfig::load(&path)?, Some(path))
            }
            None => match find_config(&cwd) {
                Some(path) => (CliConfig::load(&path)?, Some(path)),
                None => (CliConfig::default(), None),
            },
        };

        if let Some(path) = &config_path {
            tracing::debug!(path = %path.display(), "loaded config");
        }

        Ok(Self {
            config,
            config_path,
            output,
            cwd,
        })
    }

    /// Resolve a path relative to the working directory.
    pub fn resolve_path(&self, path: impl AsRef<Path>) -> PathBuf {
        resolve(&self.cwd, path)
    }

    /// Open the configured storefront's cart.
    pub fn cart_store(&self) -> Result<CartStore<FileStore>> {
        let tenant = self.tenant()?;
        let dir = self.resolve_path(&self.config.cart.dir);
        let store = FileStore::open(&dir)
            .with_context(|| format!("Failed to open cart store: {}", dir.display()))?;
        Ok(CartStore::for_storefront(store, tenant, self.config.currency()?)?)
    }

    fn tenant(&self) -> Result<TenantId> {
        let tenant = self.config.storefront.tenant.trim();
        if tenant.is_empty() {
            anyhow::bail!("storefront.tenant is not set. Run `storefront config init` first.");
        }
        Ok(TenantId::new(tenant))
    }
}

fn resolve(cwd: &Path, path: impl AsRef<Path>) -> PathBuf {
    let path = path.as_ref();
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        cwd.join(path)
    }
}

/// Find a config file in the directory tree, nearest first.
pub fn find_config(start: &Path) -> Option<PathBuf> {
    let mut current = start.to_path_buf();
    loop {
        for name in &CONFIG_FILE_NAMES {
            let config_path = current.join(name);
            if config_path.is_file() {
                return Some(config_path);
            }
        }

        if !current.pop() {
            return None;
        }
    }
}
