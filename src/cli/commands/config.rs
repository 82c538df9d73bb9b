//! Config Command
//!
//! Manage officeflow configuration.
//!
//! Usage:
//!   officeflow config show [-f json|toml]
//!   officeflow config path
//!   officeflow config init [-g] [--force]

use std::path::Path;

use crate::cli::Output;
use crate::config::ConfigLoader;
use crate::types::{FlowError, Result};

/// Show the merged effective configuration
pub fn show(explicit: Option<&Path>, format: &str) -> Result<()> {
    let as_json = match format {
        "json" => true,
        "toml" | "text" => false,
        other => {
            return Err(FlowError::Config(format!(
                "Unknown format '{}'. Valid values: json, toml",
                other
            )));
        }
    };
    ConfigLoader::show_config(explicit, as_json)
}

/// Show configuration paths
pub fn path() -> Result<()> {
    ConfigLoader::show_path();
    Ok(())
}

/// Initialize global or project configuration
pub fn init(global: bool, force: bool) -> Result<()> {
    let out = Output::new();

    if global {
        let dir = ConfigLoader::init_global(force)?;
        out.success("Initialized global configuration");
        out.field("Directory", dir.display());
        if let Some(config_path) = ConfigLoader::global_config_path() {
            out.field("Config", config_path.display());
        }
    } else {
        let root = std::env::current_dir()?;
        let dir = ConfigLoader::init_project_at(&root, force)?;
        out.success("Initialized project configuration");
        out.field("Directory", dir.display());
        out.field("Config", ConfigLoader::project_config_path().display());
    }
    Ok(())
}
