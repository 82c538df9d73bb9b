//! Documentation link resolution
//!
//! Links in the driving spreadsheet come in three shapes:
//!
//! | Shape                                   | Resolution                  |
//! |-----------------------------------------|-----------------------------|
//! | `...viewpage.action?pageId=123&...`     | digits after `pageId=`      |
//! | `...?spaceKey=SPACE&title=Page+Name`    | remote title lookup         |
//! | `.../display/SPACE/Page+Name#anchor`    | remote title lookup         |
//! | `.../x/AbCdEf`                          | short-link token decode     |

use tracing::{debug, warn};

use super::client::WikiApi;
use super::short_link::decode_short_link;
use crate::constants::wiki::{DISPLAY_SEGMENT, PAGE_ID_KEY, SHORT_LINK_SPACE, SPACE_KEY_KEY, TITLE_KEY};
use crate::types::{DrivingRow, FlowError, PageId, Result};

/// A link taken apart, before any remote call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParsedLink {
    /// Page id carried in the link itself
    Direct(PageId),
    /// Needs a title + space key lookup
    Lookup { space_key: String, title: String },
    /// Short-link token
    Short(String),
}

/// Classify a link without touching the network
pub fn parse_link(link: &str) -> Result<ParsedLink> {
    if link.contains(PAGE_ID_KEY) {
        let head = link.split('&').next().unwrap_or_default();
        let value = head.rsplit('=').next().unwrap_or_default();
        let digits: String = value.chars().filter(char::is_ascii_digit).collect();
        if digits.is_empty() {
            return Err(FlowError::link(link, "pageId has no digits"));
        }
        return Ok(ParsedLink::Direct(PageId::new(digits)));
    }

    let is_query = link.contains(TITLE_KEY) || link.contains(SPACE_KEY_KEY);
    if is_query && let Some((_, after_first)) = link.split_once('=') {
        let space_key = after_first.split('&').next().unwrap_or_default();
        let title = link.rsplit('=').next().unwrap_or_default();
        return Ok(ParsedLink::Lookup {
            space_key: space_key.to_string(),
            title: title.to_string(),
        });
    }

    parse_path_link(link)
}

fn parse_path_link(link: &str) -> Result<ParsedLink> {
    let path = link.split('?').next().unwrap_or_default();
    let segments: Vec<&str> = path.split('/').collect();
    if segments.len() < 2 {
        return Err(FlowError::link(link, "fewer than two path segments"));
    }

    let last = segments[segments.len() - 1];
    let space_key = segments[segments.len() - 2];
    let title = last.split('#').next().unwrap_or_default();
    if title.is_empty() {
        return Err(FlowError::link(link, "empty page title"));
    }

    if space_key == SHORT_LINK_SPACE {
        return Ok(ParsedLink::Short(title.to_string()));
    }

    let marker = segments.len().checked_sub(3).map(|i| segments[i]);
    if marker != Some(DISPLAY_SEGMENT) {
        warn!(
            "Link '{}' has no '/{}/' segment; treating '{}' as the space key",
            link, DISPLAY_SEGMENT, space_key
        );
    }

    Ok(ParsedLink::Lookup {
        space_key: space_key.to_string(),
        title: title.to_string(),
    })
}

/// Resolve a link to a page id. `Ok(None)` means the lookup found no page.
pub async fn resolve_link(api: &dyn WikiApi, link: &str) -> Result<Option<PageId>> {
    match parse_link(link)? {
        ParsedLink::Direct(id) => Ok(Some(id)),
        ParsedLink::Short(token) => decode_short_link(&token).map(|id| Some(PageId::from(id))),
        ParsedLink::Lookup { space_key, title } => api.find_page_id(&title, &space_key).await,
    }
}

/// Resolve a driving row's link, logging instead of failing
pub async fn resolve_row(api: &dyn WikiApi, row: &DrivingRow) -> Option<PageId> {
    let Some(link) = row.link.as_deref().map(str::trim).filter(|l| !l.is_empty()) else {
        warn!("Row {} ({}): no documentation link", row.index, row.id);
        return None;
    };

    match resolve_link(api, link).await {
        Ok(Some(id)) => {
            debug!("Row {} ({}): {} -> page {}", row.index, row.id, link, id);
            Some(id)
        }
        Ok(None) => {
            warn!("Row {} ({}): no page found for '{}'", row.index, row.id, link);
            None
        }
        Err(e) => {
            warn!("Row {} ({}): {}", row.index, row.id, e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::PageMeta;
    use async_trait::async_trait;
    use std::sync::Mutex;

    #[derive(Default)]
    struct LookupStub {
        calls: Mutex<Vec<(String, String)>>,
    }

    #[async_trait]
    impl WikiApi for LookupStub {
        async fn find_page_id(&self, title: &str, space_key: &str) -> Result<Option<PageId>> {
            self.calls
                .lock()
                .unwrap()
                .push((title.to_string(), space_key.to_string()));
            Ok((title == "Known+Page").then(|| PageId::from("777")))
        }

        async fn page_meta(&self, _id: &PageId) -> Result<PageMeta> {
            unreachable!("not used by link resolution")
        }

        async fn page_body(&self, _id: &PageId) -> Result<String> {
            unreachable!("not used by link resolution")
        }
    }

    #[test]
    fn test_page_id_link() {
        let parsed =
            parse_link("https://wiki/pages/viewpage.action?pageId=123456&foo=bar").unwrap();
        assert_eq!(parsed, ParsedLink::Direct(PageId::from("123456")));
    }

    #[test]
    fn test_page_id_without_digits() {
        assert!(parse_link("https://wiki/pages/viewpage.action?pageId=abc").is_err());
    }

    #[test]
    fn test_title_space_link() {
        let parsed =
            parse_link("https://wiki/pages/viewpage.action?spaceKey=HR&title=Leave+Policy")
                .unwrap();
        assert_eq!(
            parsed,
            ParsedLink::Lookup {
                space_key: "HR".to_string(),
                title: "Leave+Policy".to_string()
            }
        );
    }

    #[test]
    fn test_display_link() {
        let parsed = parse_link("https://wiki/display/HR/Leave+Policy#Entitlement").unwrap();
        assert_eq!(
            parsed,
            ParsedLink::Lookup {
                space_key: "HR".to_string(),
                title: "Leave+Policy".to_string()
            }
        );
    }

    #[test]
    fn test_short_link() {
        let parsed = parse_link("https://wiki/x/AbCdEfGhIjK").unwrap();
        assert_eq!(parsed, ParsedLink::Short("AbCdEfGhIjK".to_string()));
    }

    #[test]
    fn test_malformed_path_links() {
        assert!(parse_link("nolink").is_err());
        assert!(parse_link("https://wiki/display/HR/").is_err());
    }

    #[tokio::test]
    async fn test_resolve_direct_skips_remote() {
        let api = LookupStub::default();
        let id = resolve_link(&api, "https://wiki/viewpage.action?pageId=42").await.unwrap();
        assert_eq!(id, Some(PageId::from("42")));
        assert!(api.calls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_resolve_short_link_is_stable() {
        let api = LookupStub::default();
        let first = resolve_link(&api, "https://wiki/x/AbCdEfGhIjK").await.unwrap();
        let second = resolve_link(&api, "https://wiki/x/AbCdEfGhIjK").await.unwrap();
        assert!(first.is_some());
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_resolve_lookup_passes_title_verbatim() {
        let api = LookupStub::default();
        let id = resolve_link(&api, "https://wiki/display/HR/Known+Page").await.unwrap();
        assert_eq!(id, Some(PageId::from("777")));
        assert_eq!(
            api.calls.lock().unwrap()[0],
            ("Known+Page".to_string(), "HR".to_string())
        );
    }

    #[tokio::test]
    async fn test_resolve_row_contains_failures() {
        let api = LookupStub::default();

        let missing = DrivingRow::new(0, "ITEM-1", None);
        assert_eq!(resolve_row(&api, &missing).await, None);

        let blank = DrivingRow::new(1, "ITEM-2", Some("   ".to_string()));
        assert_eq!(resolve_row(&api, &blank).await, None);

        let unknown = DrivingRow::new(2, "ITEM-3", Some("https://wiki/display/HR/Other".into()));
        assert_eq!(resolve_row(&api, &unknown).await, None);

        let bad = DrivingRow::new(3, "ITEM-4", Some("https://wiki/x/!!!".to_string()));
        assert_eq!(resolve_row(&api, &bad).await, None);
    }
}
