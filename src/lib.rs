//! officeflow - Office Batch Jobs
//!
//! Two periodic jobs in one binary:
//!
//! - **Wiki export**: reads a driving spreadsheet of documentation links,
//!   resolves each to a wiki page, fetches the pages concurrently, flattens
//!   their nested expandable sections and tables, and writes one workbook per
//!   page.
//! - **Leave report**: computes the report date window, waits for the
//!   browser download, renames it, and scrubs private columns into a
//!   processed copy.
//!
//! ## Modules
//!
//! - [`extract`]: HTML table flattening and sheet naming
//! - [`wiki`]: link resolution, REST client, bounded fetcher
//! - [`workbook`]: spreadsheet reading and writing
//! - [`export`]: the wiki export pipeline
//! - [`leave`]: leave report window, download pickup, scrub
//! - [`config`]: layered configuration

pub mod cli;
pub mod config;
pub mod constants;
pub mod export;
pub mod extract;
pub mod leave;
pub mod types;
pub mod wiki;
pub mod workbook;

// =============================================================================
// Core Re-exports
// =============================================================================

// Configuration
pub use config::{Config, ConfigLoader, ExportConfig, LeaveConfig, WikiConfig};

// Error Types
pub use types::error::{FlowError, Result, ResultExt};

// Domain Types
pub use types::{Cell, DrivingRow, PageId, Table};

// =============================================================================
// Pipeline Re-exports
// =============================================================================

pub use export::{ExportSummary, run_export};
pub use extract::{PageExtract, PageMeta, SectionTable};
pub use leave::{ReportWindow, ScrubOutcome};
pub use wiki::{WikiApi, WikiClient};
