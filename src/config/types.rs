//! Configuration Types
//!
//! All configuration structures with sensible defaults.
//! Supports global (~/.config/officeflow/) and project (.officeflow/) level configuration.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::types::{FlowError, Result};

/// Root configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Configuration version
    pub version: String,

    /// Wiki API settings
    pub wiki: WikiConfig,

    /// Wiki table export settings
    pub export: ExportConfig,

    /// Leave report settings
    pub leave: LeaveConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: "1.0".to_string(),
            wiki: WikiConfig::default(),
            export: ExportConfig::default(),
            leave: LeaveConfig::default(),
        }
    }
}

impl Config {
    /// Validate configuration values are within acceptable ranges.
    /// Returns `FlowError::Config` on validation failure.
    pub fn validate(&self) -> Result<()> {
        url::Url::parse(&self.wiki.base_url).map_err(|e| {
            FlowError::Config(format!(
                "wiki.base_url '{}' is not a valid URL: {}",
                self.wiki.base_url, e
            ))
        })?;

        if self.export.concurrency == 0 {
            return Err(FlowError::Config(
                "export.concurrency must be greater than 0".to_string(),
            ));
        }

        if self.wiki.timeout_secs == Some(0) {
            return Err(FlowError::Config(
                "wiki.timeout_secs must be greater than 0 when set".to_string(),
            ));
        }

        for range in &self.leave.deleted_columns {
            if range.start == 0 || range.count == 0 {
                return Err(FlowError::Config(format!(
                    "leave.deleted_columns entries are 1-based and non-empty, got start={} count={}",
                    range.start, range.count
                )));
            }
        }

        if self.leave.table_name.trim().is_empty() || self.leave.table_name.contains(' ') {
            return Err(FlowError::Config(format!(
                "leave.table_name must be a non-empty name without spaces, got '{}'",
                self.leave.table_name
            )));
        }

        if self.leave.window_months == 0 {
            return Err(FlowError::Config(
                "leave.window_months must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }

    /// Copy with secrets replaced, for display
    pub fn redacted(&self) -> Self {
        let mut copy = self.clone();
        if copy.wiki.token.is_some() {
            copy.wiki.token = Some("[REDACTED]".to_string());
        }
        copy
    }
}

// =============================================================================
// Wiki Configuration
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WikiConfig {
    /// Wiki base URL (REST paths are joined onto it)
    pub base_url: String,

    /// Personal access token sent as a bearer token
    pub token: Option<String>,

    /// Skip TLS certificate validation (the wiki uses an internal CA)
    pub accept_invalid_certs: bool,

    /// Optional per-request timeout in seconds (none by default)
    pub timeout_secs: Option<u64>,
}

impl Default for WikiConfig {
    fn default() -> Self {
        Self {
            base_url: "https://space.confluence.com/".to_string(),
            token: None,
            accept_invalid_certs: true,
            timeout_secs: None,
        }
    }
}

impl WikiConfig {
    /// Host of the base URL, used as the default driving-row filter
    pub fn host(&self) -> Option<String> {
        url::Url::parse(&self.base_url)
            .ok()
            .and_then(|u| u.host_str().map(str::to_string))
    }
}

// =============================================================================
// Export Configuration
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    /// Directory searched for the driving spreadsheet
    pub input_dir: PathBuf,

    /// Glob for the driving spreadsheet; the newest match wins
    pub input_pattern: String,

    /// Column holding the tracked item id
    pub id_column: String,

    /// Column holding the documentation link
    pub link_column: String,

    /// Rows whose link does not contain this text are skipped
    /// (defaults to the wiki host)
    pub link_filter: Option<String>,

    /// Directory receiving one workbook per page
    pub output_dir: PathBuf,

    /// Maximum pages fetched concurrently
    pub concurrency: usize,

    /// Sections whose title contains this text are split per nested section
    pub nested_marker: Option<String>,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            input_dir: PathBuf::from("."),
            input_pattern: "List_*.xlsx".to_string(),
            id_column: "ID".to_string(),
            link_column: "DocumentationLink".to_string(),
            link_filter: None,
            output_dir: PathBuf::from("."),
            concurrency: 8,
            nested_marker: None,
        }
    }
}

// =============================================================================
// Leave Report Configuration
// =============================================================================

/// A run of columns removed from the report (1-based start)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnRange {
    pub start: usize,
    pub count: usize,
}

impl ColumnRange {
    pub const fn new(start: usize, count: usize) -> Self {
        Self { start, count }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LeaveConfig {
    /// Browser download directory
    pub download_dir: PathBuf,

    /// Directory receiving scrubbed copies
    pub processed_dir: PathBuf,

    /// Renamed report prefix (`<prefix>_<YYYYMMDD>.xlsx`)
    pub file_prefix: String,

    /// Days between today and the report start date
    pub lead_days: i64,

    /// Report window length in calendar months
    pub window_months: u32,

    /// Seconds to wait for the download to finish
    pub download_timeout_secs: u64,

    /// Number of files the download directory should hold once done
    pub expected_files: Option<usize>,

    /// Name of the Excel table wrapping the scrubbed range
    pub table_name: String,

    /// Column runs deleted in order; later entries see already-shifted columns
    pub deleted_columns: Vec<ColumnRange>,
}

impl Default for LeaveConfig {
    fn default() -> Self {
        Self {
            download_dir: PathBuf::from("Files"),
            processed_dir: PathBuf::from("Files/Processed"),
            file_prefix: "SG_LeaveRecordsReportSingle".to_string(),
            lead_days: 3,
            window_months: 1,
            download_timeout_secs: 8,
            expected_files: None,
            table_name: "HolidayList".to_string(),
            deleted_columns: vec![
                ColumnRange::new(1, 1),
                ColumnRange::new(4, 3),
                ColumnRange::new(11, 25),
            ],
        }
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.version, "1.0");
        assert_eq!(config.export.concurrency, 8);
        assert_eq!(config.leave.deleted_columns.len(), 3);
        assert!(config.wiki.accept_invalid_certs);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_wiki_host() {
        let config = WikiConfig::default();
        assert_eq!(config.host().as_deref(), Some("space.confluence.com"));
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = Config::default();
        config.export.concurrency = 0;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.wiki.base_url = "not a url".to_string();
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.leave.deleted_columns = vec![ColumnRange::new(0, 2)];
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.leave.table_name = "Holiday List".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_redacted_hides_token() {
        let mut config = Config::default();
        config.wiki.token = Some("secret-token".to_string());
        let shown = config.redacted();
        assert_eq!(shown.wiki.token.as_deref(), Some("[REDACTED]"));
    }
}
