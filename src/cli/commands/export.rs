//! Export Command
//!
//! Usage:
//!   officeflow export [--input FILE] [--output DIR] [--concurrency N]

use std::path::PathBuf;

use crate::cli::CommandContext;
use crate::export::{ExportSummary, run_export};
use crate::types::Result;
use crate::workbook::latest_file;

/// Command-line overrides for the export settings
#[derive(Debug, Clone, Default)]
pub struct ExportOptions {
    pub input: Option<PathBuf>,
    pub output: Option<PathBuf>,
    pub concurrency: Option<usize>,
}

pub async fn run(ctx: &CommandContext, options: ExportOptions) -> Result<ExportSummary> {
    let mut export = ctx.config.export.clone();
    if let Some(output) = options.output {
        export.output_dir = output;
    }
    if let Some(n) = options.concurrency {
        export.concurrency = n.max(1);
    }

    let input = match options.input {
        Some(path) => path,
        None => latest_file(&export.input_dir, &export.input_pattern)?,
    };

    let out = &ctx.output;
    out.section("Wiki export");
    out.field("Input", input.display());
    out.field("Output", export.output_dir.display());

    let client = ctx.wiki_client()?;
    let filter = ctx.link_filter();
    let summary = run_export(&client, &input, &export, filter.as_deref()).await?;

    out.field("Rows", summary.rows);
    out.field("Pages", summary.pages);
    out.field("Unresolved", summary.unresolved);
    out.field("Failed", summary.failed);
    if summary.failed > 0 || summary.unresolved > 0 {
        out.warning(&format!(
            "{} rows unresolved, {} pages failed; see log for details",
            summary.unresolved, summary.failed
        ));
    }
    out.success(&format!("{} workbooks written", summary.written.len()));

    Ok(summary)
}
