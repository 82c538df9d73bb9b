//! Browser download pickup: wait for completion, then rename.

use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info};

use crate::constants::leave::{PARTIAL_DOWNLOAD_SUFFIX, POLL_INTERVAL_SECS};
use crate::types::{Result, ResultExt};
use crate::workbook::latest_file;

/// Result of polling the download directory
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WaitOutcome {
    pub elapsed_secs: u64,
    /// False when the timeout elapsed with the download still pending
    pub finished: bool,
}

/// Poll `dir` once per interval until no partial downloads remain and, if
/// `expected_files` is set, the directory holds exactly that many entries.
pub async fn wait_for_download(
    dir: &Path,
    timeout_secs: u64,
    expected_files: Option<usize>,
) -> Result<WaitOutcome> {
    let mut elapsed_secs = 0;
    let mut pending = true;

    while pending && elapsed_secs < timeout_secs {
        tokio::time::sleep(Duration::from_secs(POLL_INTERVAL_SECS)).await;
        elapsed_secs += POLL_INTERVAL_SECS;

        let names = entry_names(dir).await?;
        let partial = names.iter().any(|n| n.ends_with(PARTIAL_DOWNLOAD_SUFFIX));
        let count_ok = expected_files.is_none_or(|n| names.len() == n);
        pending = partial || !count_ok;

        debug!(
            "Download poll {}s: {} entries, partial={}",
            elapsed_secs,
            names.len(),
            partial
        );
    }

    Ok(WaitOutcome {
        elapsed_secs,
        finished: !pending,
    })
}

async fn entry_names(dir: &Path) -> Result<Vec<String>> {
    let mut entries = tokio::fs::read_dir(dir)
        .await
        .with_context_fn(|| format!("Reading download directory {}", dir.display()))?;

    let mut names = Vec::new();
    while let Some(entry) = entries.next_entry().await? {
        names.push(entry.file_name().to_string_lossy().into_owned());
    }
    Ok(names)
}

/// Rename the newest `*.xlsx` in `dir` to `file_name`, replacing any file
/// already using that name
pub fn rename_latest_report(dir: &Path, file_name: &str) -> Result<PathBuf> {
    let source = latest_file(dir, "*.xlsx")?;
    let target = dir.join(file_name);

    if source == target {
        info!("{} already has its final name", target.display());
        return Ok(target);
    }

    if target.exists() {
        std::fs::remove_file(&target)
            .with_context_fn(|| format!("Removing previous {}", target.display()))?;
    }
    std::fs::rename(&source, &target)
        .with_context_fn(|| format!("Renaming {}", source.display()))?;

    info!("Renamed {} -> {}", source.display(), target.display());
    Ok(target)
}
