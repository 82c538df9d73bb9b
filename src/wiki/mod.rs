//! Wiki Access
//!
//! Link resolution and page retrieval against the wiki REST API.
//!
//! ```text
//! link ──► parse_link ──┬─ Direct(id)
//!                       ├─ Short(token) ──► decode_short_link
//!                       └─ Lookup ──► WikiApi::find_page_id
//!
//! page ids ──► fetch_pages (buffer_unordered) ──► page_meta + page_body ──► PageExtract
//! ```

pub mod client;
pub mod fetcher;
pub mod link;
pub mod short_link;

pub use client::{WikiApi, WikiClient};
pub use fetcher::{PageExport, fetch_page, fetch_pages};
pub use link::{ParsedLink, parse_link, resolve_link, resolve_row};
pub use short_link::decode_short_link;
