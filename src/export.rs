//! Wiki Table Export Pipeline
//!
//! ```text
//! driving sheet ──► resolve_row (per row) ──► fetch_pages (bounded) ──► write_page_workbook
//! ```
//!
//! Unresolved rows and failed pages are logged and counted; the batch keeps
//! going.

use futures::StreamExt;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::config::ExportConfig;
use crate::types::{PageId, Result};
use crate::wiki::{WikiApi, fetch_pages, resolve_row};
use crate::workbook::{DrivingColumns, read_driving_rows, write_page_workbook};

/// Counts reported at the end of an export
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExportSummary {
    /// Driving rows considered (after the link filter)
    pub rows: usize,
    /// Rows whose link did not resolve to a page
    pub unresolved: usize,
    /// Distinct pages fetched
    pub pages: usize,
    /// Workbooks written
    pub written: Vec<PathBuf>,
    /// Pages that failed to fetch, flatten or write
    pub failed: usize,
}

/// Run the full export for one driving spreadsheet
pub async fn run_export(
    api: &dyn WikiApi,
    input: &Path,
    config: &ExportConfig,
    link_filter: Option<&str>,
) -> Result<ExportSummary> {
    let columns = DrivingColumns {
        id: &config.id_column,
        link: &config.link_column,
    };
    let mut rows = read_driving_rows(input, columns, link_filter)?;

    let resolved: Vec<Option<PageId>> = futures::stream::iter(rows.iter())
        .map(|row| resolve_row(api, row))
        .buffered(config.concurrency.max(1))
        .collect()
        .await;
    for (row, page_id) in rows.iter_mut().zip(resolved) {
        row.page_id = page_id;
    }

    let mut summary = ExportSummary {
        rows: rows.len(),
        unresolved: rows.iter().filter(|r| r.page_id.is_none()).count(),
        ..ExportSummary::default()
    };

    let mut rows_by_page: BTreeMap<PageId, Vec<usize>> = BTreeMap::new();
    for row in &rows {
        if let Some(id) = &row.page_id {
            rows_by_page.entry(id.clone()).or_default().push(row.index);
        }
    }
    summary.pages = rows_by_page.len();

    let results = fetch_pages(
        api,
        rows_by_page.keys().cloned(),
        config.concurrency,
        config.nested_marker.as_deref(),
    )
    .await;

    for (id, result) in results {
        let written = result.and_then(|page| write_page_workbook(&config.output_dir, &page));
        match written {
            Ok(path) => {
                info!("Page {} -> {}", id, path.display());
                summary.written.push(path);
            }
            Err(e) => {
                let indices = rows_by_page.get(&id).cloned().unwrap_or_default();
                warn!("Page {} (rows {:?}) skipped: {}", id, indices, e);
                summary.failed += 1;
            }
        }
    }

    info!(
        "Export done: {} written, {} failed, {} unresolved of {} rows",
        summary.written.len(),
        summary.failed,
        summary.unresolved,
        summary.rows
    );
    Ok(summary)
}
