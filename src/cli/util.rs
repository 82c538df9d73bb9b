//! CLI Common Utilities
//!
//! Shared configuration loading and client construction for command handlers.

use std::path::{Path, PathBuf};

use crate::cli::ui::Output;
use crate::config::{Config, ConfigLoader};
use crate::types::Result;
use crate::wiki::WikiClient;

/// Command execution context
///
/// Created once per invocation from the layered configuration.
pub struct CommandContext {
    /// Loaded and validated configuration
    pub config: Config,
    /// Explicit `--config` file, if any
    pub config_path: Option<PathBuf>,
    /// User-facing output
    pub output: Output,
}

impl CommandContext {
    pub fn load(config_path: Option<&Path>, quiet: bool) -> Result<Self> {
        let config = ConfigLoader::load(config_path)?;
        let output = if quiet { Output::quiet() } else { Output::new() };

        Ok(Self {
            config,
            config_path: config_path.map(Path::to_path_buf),
            output,
        })
    }

    /// HTTP client for the configured wiki
    pub fn wiki_client(&self) -> Result<WikiClient> {
        WikiClient::new(&self.config.wiki)
    }

    /// Text a driving-row link must contain: the configured filter, or the
    /// wiki host
    pub fn link_filter(&self) -> Option<String> {
        self.config
            .export
            .link_filter
            .clone()
            .or_else(|| self.config.wiki.host())
    }
}
