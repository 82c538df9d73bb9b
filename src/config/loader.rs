//! Configuration Loader (Figment-based)
//!
//! Loads and merges configuration from multiple sources using Figment:
//! 1. Built-in defaults (Serialized)
//! 2. Global config (~/.config/officeflow/config.toml)
//! 3. Project config (.officeflow/config.toml)
//! 4. Explicit file passed with `--config`
//! 5. Environment variables (OFFICEFLOW_* prefix)

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use super::types::Config;
use crate::types::{FlowError, Result};

/// Configuration loader
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration with full resolution chain using Figment:
    /// defaults → global → project → explicit file → env vars
    pub fn load(explicit: Option<&Path>) -> Result<Config> {
        let mut figment = Figment::new().merge(Serialized::defaults(Config::default()));

        // Merge global config
        if let Some(global_path) = Self::global_config_path()
            && global_path.exists()
        {
            debug!("Loading global config from: {}", global_path.display());
            figment = figment.merge(Toml::file(&global_path));
        }

        // Merge project config
        let project_path = Self::project_config_path();
        if project_path.exists() {
            debug!("Loading project config from: {}", project_path.display());
            figment = figment.merge(Toml::file(&project_path));
        }

        if let Some(path) = explicit {
            if !path.exists() {
                return Err(FlowError::Config(format!(
                    "Config file not found: {}",
                    path.display()
                )));
            }
            debug!("Loading config from: {}", path.display());
            figment = figment.merge(Toml::file(path));
        }

        // Merge environment variables (e.g., OFFICEFLOW_WIKI__TOKEN -> wiki.token)
        figment = figment.merge(Env::prefixed("OFFICEFLOW_").split("__").lowercase(true));

        let config: Config = figment
            .extract()
            .map_err(|e| FlowError::Config(format!("Configuration error: {}", e)))?;

        // Validate configuration after loading
        config.validate()?;

        Ok(config)
    }

    /// Load configuration from a specific file only
    pub fn load_from_file(path: &Path) -> Result<Config> {
        let config: Config = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Toml::file(path))
            .extract()
            .map_err(|e| FlowError::Config(format!("Configuration error: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    // =========================================================================
    // Path Management
    // =========================================================================

    /// Get path to global config directory (~/.config/officeflow/)
    pub fn global_dir() -> Option<PathBuf> {
        env::var("XDG_CONFIG_HOME")
            .ok()
            .map(PathBuf::from)
            .or_else(|| {
                env::var("HOME")
                    .ok()
                    .map(|home| PathBuf::from(home).join(".config"))
            })
            .map(|p| p.join("officeflow"))
    }

    /// Get path to global config file
    pub fn global_config_path() -> Option<PathBuf> {
        Self::global_dir().map(|dir| dir.join("config.toml"))
    }

    /// Get path to project config file
    pub fn project_config_path() -> PathBuf {
        Self::project_dir().join("config.toml")
    }

    /// Get project data directory
    pub fn project_dir() -> PathBuf {
        PathBuf::from(".officeflow")
    }

    // =========================================================================
    // Config Commands
    // =========================================================================

    /// Show config file paths
    pub fn show_path() {
        println!("Configuration paths:");
        println!();

        if let Some(global) = Self::global_config_path() {
            let exists = if global.exists() { "✓" } else { "✗" };
            println!("  Global:  {} {}", exists, global.display());
        } else {
            println!("  Global:  (not available)");
        }

        let project = Self::project_config_path();
        let exists = if project.exists() { "✓" } else { "✗" };
        println!("  Project: {} {}", exists, project.display());
    }

    /// Show current effective configuration with secrets redacted
    pub fn show_config(explicit: Option<&Path>, as_json: bool) -> Result<()> {
        let config = Self::load(explicit)?.redacted();

        if as_json {
            println!("{}", serde_json::to_string_pretty(&config)?);
        } else {
            println!(
                "{}",
                toml::to_string_pretty(&config).map_err(|e| FlowError::Config(e.to_string()))?
            );
        }

        Ok(())
    }

    // =========================================================================
    // Initialization
    // =========================================================================

    /// Initialize global configuration
    pub fn init_global(force: bool) -> Result<PathBuf> {
        let global_dir = Self::global_dir().ok_or_else(|| {
            FlowError::Config("Cannot determine global config directory".to_string())
        })?;
        Self::write_config(&global_dir, force)?;
        Ok(global_dir)
    }

    /// Initialize project configuration under `root`
    pub fn init_project_at(root: &Path, force: bool) -> Result<PathBuf> {
        let project_dir = root.join(Self::project_dir());
        Self::write_config(&project_dir, force)?;
        Ok(project_dir)
    }

    // =========================================================================
    // Internal
    // =========================================================================

    fn write_config(dir: &Path, force: bool) -> Result<()> {
        fs::create_dir_all(dir)?;

        let config_path = dir.join("config.toml");
        if !config_path.exists() || force {
            fs::write(&config_path, Self::default_config())?;
            info!("Created config: {}", config_path.display());
        } else {
            info!("Config exists: {}", config_path.display());
        }
        Ok(())
    }

    /// Generate default config content (TOML)
    fn default_config() -> String {
        r#"# officeflow configuration
# Project settings in .officeflow/config.toml override the global file.
# Environment variables override both, e.g. OFFICEFLOW_WIKI__TOKEN.

version = "1.0"

[wiki]
base_url = "https://space.confluence.com/"
# token = "personal-access-token"
accept_invalid_certs = true

[export]
input_dir = "."
input_pattern = "List_*.xlsx"
id_column = "ID"
link_column = "DocumentationLink"
output_dir = "."
concurrency = 8
# nested_marker = "Configuration"

[leave]
download_dir = "Files"
processed_dir = "Files/Processed"
file_prefix = "SG_LeaveRecordsReportSingle"
lead_days = 3
window_months = 1
download_timeout_secs = 8
table_name = "HolidayList"
deleted_columns = [
    { start = 1, count = 1 },
    { start = 4, count = 3 },
    { start = 11, count = 25 },
]
"#
        .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_load_default_config() {
        let config = ConfigLoader::load(None).unwrap();
        assert_eq!(config.version, "1.0");
    }

    #[test]
    fn test_init_project_writes_loadable_config() {
        let temp_dir = TempDir::new().unwrap();

        let dir = ConfigLoader::init_project_at(temp_dir.path(), false).unwrap();
        let config_path = dir.join("config.toml");
        assert!(config_path.exists());

        let config = ConfigLoader::load_from_file(&config_path).unwrap();
        assert_eq!(config.leave.table_name, "HolidayList");
        assert_eq!(config.export.link_column, "DocumentationLink");
    }

    #[test]
    fn test_init_project_keeps_existing_without_force() {
        let temp_dir = TempDir::new().unwrap();
        let dir = ConfigLoader::init_project_at(temp_dir.path(), false).unwrap();
        let config_path = dir.join("config.toml");
        fs::write(&config_path, "version = \"2.0\"\n").unwrap();

        ConfigLoader::init_project_at(temp_dir.path(), false).unwrap();
        assert_eq!(
            fs::read_to_string(&config_path).unwrap(),
            "version = \"2.0\"\n"
        );

        ConfigLoader::init_project_at(temp_dir.path(), true).unwrap();
        assert!(
            fs::read_to_string(&config_path)
                .unwrap()
                .contains("[leave]")
        );
    }

    #[test]
    fn test_explicit_file_overrides_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("custom.toml");
        fs::write(&path, "[export]\nconcurrency = 2\nnested_marker = \"Config\"\n").unwrap();

        let config = ConfigLoader::load(Some(&path)).unwrap();
        assert_eq!(config.export.concurrency, 2);
        assert_eq!(config.export.nested_marker.as_deref(), Some("Config"));
    }

    #[test]
    fn test_missing_explicit_file_is_error() {
        let err = ConfigLoader::load(Some(Path::new("/nonexistent/officeflow.toml")));
        assert!(err.is_err());
    }

    #[test]
    fn test_env_override() {
        // SAFETY: This test runs in isolation
        unsafe {
            std::env::set_var("OFFICEFLOW_LEAVE__FILE_PREFIX", "TestPrefix");
        }
        let config = ConfigLoader::load(None).unwrap();
        assert_eq!(config.leave.file_prefix, "TestPrefix");
        unsafe {
            std::env::remove_var("OFFICEFLOW_LEAVE__FILE_PREFIX");
        }
    }
}
