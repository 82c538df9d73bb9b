//! Leave Command
//!
//! Usage:
//!   officeflow leave window [--date YYYY-MM-DD]
//!   officeflow leave collect
//!   officeflow leave scrub [FILE]
//!   officeflow leave run

use chrono::{Local, NaiveDate};
use std::path::PathBuf;

use crate::cli::CommandContext;
use crate::leave::{ReportWindow, ScrubOutcome, collect_report, latest_report, scrub_report};
use crate::types::Result;

/// Print the report window for `date` (default: today)
pub fn window(ctx: &CommandContext, date: Option<NaiveDate>) -> Result<ReportWindow> {
    let today = date.unwrap_or_else(|| Local::now().date_naive());
    let leave = &ctx.config.leave;
    let window = ReportWindow::from_today(today, leave.lead_days, leave.window_months)?;

    let out = &ctx.output;
    out.section("Leave report window");
    out.field("Start", window.form_start());
    out.field("End", window.form_end());
    out.field("File", window.report_file_name(&leave.file_prefix));
    if out.is_quiet() {
        out.value(&window);
    }
    Ok(window)
}

/// Wait for the download and rename it
pub async fn collect(ctx: &CommandContext) -> Result<PathBuf> {
    let today = Local::now().date_naive();
    let path = collect_report(&ctx.config.leave, today).await?;
    ctx.output
        .success(&format!("Report saved as {}", path.display()));
    Ok(path)
}

/// Scrub `file`, or the newest renamed report
pub fn scrub(ctx: &CommandContext, file: Option<PathBuf>) -> Result<ScrubOutcome> {
    let source = match file {
        Some(path) => path,
        None => latest_report(&ctx.config.leave)?,
    };

    let outcome = scrub_report(&source, &ctx.config.leave)?;
    match &outcome {
        ScrubOutcome::Written(path) => {
            ctx.output
                .success(&format!("Scrubbed copy written to {}", path.display()));
        }
        ScrubOutcome::AlreadyProcessed(path) => {
            ctx.output
                .info(&format!("{} already exists; nothing to do", path.display()));
        }
    }
    Ok(outcome)
}

/// Collect then scrub
pub async fn run(ctx: &CommandContext) -> Result<ScrubOutcome> {
    let report = collect(ctx).await?;
    scrub(ctx, Some(report))
}
