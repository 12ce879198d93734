//! CLI command handlers.

use std::path::PathBuf;

use anyhow::Result;
use chronicle_config::LoadedConfig;

pub mod config;
pub mod generate;

/// Shared context for all commands.
#[derive(Debug, Clone)]
pub struct Context {
    /// Verbose output enabled.
    pub verbose: bool,
    /// User config directory override.
    pub config_dir: Option<PathBuf>,
}

impl Context {
    /// Discover and merge config layers, logging any load warnings.
    pub fn load_config(&self) -> Result<LoadedConfig> {
        let loaded = chronicle_config::load_config(None, self.config_dir.as_deref())?;
        for warning in &loaded.warnings {
            tracing::warn!("{}", warning);
        }
        Ok(loaded)
    }
}
