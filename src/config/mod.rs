//! Configuration Management
//!
//! Unified configuration system with hierarchical resolution:
//! 1. Built-in defaults
//! 2. Global config (~/.config/officeflow/config.toml)
//! 3. Project config (.officeflow/config.toml)
//! 4. Explicit `--config` file
//! 5. Environment variables (OFFICEFLOW_*, nested keys split on `__`)

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::*;
