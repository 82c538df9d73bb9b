//! Bounded concurrent page fetching.

use futures::StreamExt;
use std::collections::{BTreeMap, BTreeSet};
use tracing::{debug, info, instrument};

use super::client::WikiApi;
use crate::extract::{PageExtract, PageMeta};
use crate::types::{PageId, Result};

/// One fetched and flattened page
#[derive(Debug, Clone)]
pub struct PageExport {
    pub id: PageId,
    pub meta: PageMeta,
    pub extract: PageExtract,
}

/// Fetch metadata then body for one page and flatten it
#[instrument(skip(api, nested_marker), fields(page = %id))]
pub async fn fetch_page(
    api: &dyn WikiApi,
    id: &PageId,
    nested_marker: Option<&str>,
) -> Result<PageExport> {
    let meta = api.page_meta(id).await?;
    let body = api.page_body(id).await?;

    let extract = PageExtract::from_html(&body, &meta, nested_marker);
    debug!("'{}': {} sections", meta.title, extract.sections.len());

    Ok(PageExport {
        id: id.clone(),
        meta,
        extract,
    })
}

/// Fetch each distinct page with at most `concurrency` in flight.
///
/// Results are keyed by page id so completion order does not matter.
pub async fn fetch_pages<I>(
    api: &dyn WikiApi,
    ids: I,
    concurrency: usize,
    nested_marker: Option<&str>,
) -> BTreeMap<PageId, Result<PageExport>>
where
    I: IntoIterator<Item = PageId>,
{
    let distinct: BTreeSet<PageId> = ids.into_iter().collect();
    info!(
        "Fetching {} pages ({} concurrent)",
        distinct.len(),
        concurrency
    );

    futures::stream::iter(distinct)
        .map(|id| async move {
            let result = fetch_page(api, &id, nested_marker).await;
            (id, result)
        })
        .buffer_unordered(concurrency.max(1))
        .collect()
        .await
}
