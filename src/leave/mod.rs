//! Leave Report Post-Processing
//!
//! Picks up where the browser export leaves off:
//!
//! ```text
//! ReportWindow ──► wait_for_download ──► rename_latest_report ──► scrub_report
//!  (dates)          (.crdownload poll)    (<prefix>_<stamp>.xlsx)   (Processed/)
//! ```

pub mod download;
pub mod scrub;
pub mod window;

pub use download::{WaitOutcome, rename_latest_report, wait_for_download};
pub use scrub::{ScrubOutcome, delete_columns, scrub_report};
pub use window::ReportWindow;

use chrono::NaiveDate;
use std::path::PathBuf;
use tracing::info;

use crate::config::LeaveConfig;
use crate::types::{FlowError, Result};
use crate::workbook::latest_file;

/// Wait for the browser download and give it its timestamped name
pub async fn collect_report(config: &LeaveConfig, today: NaiveDate) -> Result<PathBuf> {
    let window = ReportWindow::from_today(today, config.lead_days, config.window_months)?;
    info!("Report window {}", window);

    let outcome = wait_for_download(
        &config.download_dir,
        config.download_timeout_secs,
        config.expected_files,
    )
    .await?;
    if !outcome.finished {
        return Err(FlowError::Timeout {
            operation: format!("download into {}", config.download_dir.display()),
            secs: outcome.elapsed_secs,
        });
    }
    info!("Download finished after {}s", outcome.elapsed_secs);

    rename_latest_report(&config.download_dir, &window.report_file_name(&config.file_prefix))
}

/// Newest renamed report in the download directory
pub fn latest_report(config: &LeaveConfig) -> Result<PathBuf> {
    latest_file(&config.download_dir, &format!("{}_*.xlsx", config.file_prefix))
}
