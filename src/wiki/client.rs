//! Wiki REST API client
//!
//! Thin wrapper over the content endpoint. Requests are authenticated with a
//! bearer token; a non-2xx response is logged with its body and parsing is
//! still attempted, since the wiki sometimes returns usable JSON with an
//! error status.

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, warn};

use crate::config::WikiConfig;
use crate::constants::wiki::{CONTENT_PATH, EXPAND_BODY_STORAGE};
use crate::extract::PageMeta;
use crate::types::{FlowError, PageId, Result};

/// Remote operations the export pipeline needs
#[async_trait]
pub trait WikiApi: Send + Sync {
    /// Look a page up by title and space key; first match wins
    async fn find_page_id(&self, title: &str, space_key: &str) -> Result<Option<PageId>>;

    /// Page metadata (title, history, version)
    async fn page_meta(&self, id: &PageId) -> Result<PageMeta>;

    /// Storage-format HTML body
    async fn page_body(&self, id: &PageId) -> Result<String>;
}

/// HTTP implementation of [`WikiApi`]
pub struct WikiClient {
    /// Token stored securely - never exposed in logs or debug output
    token: Option<SecretString>,
    content_url: String,
    client: reqwest::Client,
}

impl std::fmt::Debug for WikiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WikiClient")
            .field("token", &self.token.as_ref().map(|_| "[REDACTED]"))
            .field("content_url", &self.content_url)
            .finish()
    }
}

impl WikiClient {
    pub fn new(config: &WikiConfig) -> Result<Self> {
        let mut builder =
            reqwest::Client::builder().danger_accept_invalid_certs(config.accept_invalid_certs);
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder
            .build()
            .map_err(|e| FlowError::Config(format!("Failed to create HTTP client: {}", e)))?;

        if config.token.is_none() {
            warn!("No wiki token configured; requests will be anonymous");
        }

        Ok(Self {
            token: config.token.clone().map(SecretString::from),
            content_url: format!("{}/{}", config.base_url.trim_end_matches('/'), CONTENT_PATH),
            client,
        })
    }

    /// GET a URL and decode its JSON body
    async fn get_json<T: DeserializeOwned>(&self, url: &str, resource: &str) -> Result<T> {
        debug!("GET {}", url);

        let mut request = self.client.get(url);
        if let Some(token) = &self.token {
            request = request.header(
                "Authorization",
                format!("Bearer {}", token.expose_secret()),
            );
        }

        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            warn!("{} returned {}: {}", resource, status, body);
        }

        serde_json::from_str(&body)
            .map_err(|e| FlowError::api(resource, format!("HTTP {}: {}", status, e)))
    }
}

#[async_trait]
impl WikiApi for WikiClient {
    async fn find_page_id(&self, title: &str, space_key: &str) -> Result<Option<PageId>> {
        // Values go in verbatim so an already-encoded `+` is not re-escaped
        let url = format!(
            "{}?title={}&spaceKey={}",
            self.content_url, title, space_key
        );
        let resource = format!("lookup {}/{}", space_key, title);
        let found: SearchResponse = self.get_json(&url, &resource).await?;
        Ok(found.results.into_iter().next().map(|r| PageId::from(r.id)))
    }

    async fn page_meta(&self, id: &PageId) -> Result<PageMeta> {
        let url = format!("{}/{}", self.content_url, id);
        let content: ContentResponse = self.get_json(&url, &format!("page {}", id)).await?;
        Ok(content.into_meta())
    }

    async fn page_body(&self, id: &PageId) -> Result<String> {
        let url = format!("{}/{}?{}", self.content_url, id, EXPAND_BODY_STORAGE);
        let resource = format!("page {} body", id);
        let content: ContentResponse = self.get_json(&url, &resource).await?;
        content
            .body
            .and_then(|b| b.storage)
            .map(|s| s.value)
            .ok_or_else(|| FlowError::api(resource, "response has no body.storage.value"))
    }
}

// =============================================================================
// Response Types
// =============================================================================

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    results: Vec<SearchResult>,
}

#[derive(Debug, Deserialize)]
struct SearchResult {
    id: String,
}

#[derive(Debug, Deserialize)]
struct ContentResponse {
    id: String,
    title: String,
    history: Option<History>,
    version: Option<Version>,
    body: Option<Body>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct History {
    created_by: Option<Person>,
    created_date: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Person {
    display_name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Version {
    number: Option<u64>,
    by: Option<Person>,
    when: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Body {
    storage: Option<Storage>,
}

#[derive(Debug, Deserialize)]
struct Storage {
    value: String,
}

impl ContentResponse {
    fn into_meta(self) -> PageMeta {
        let (created_by, created_date) = match self.history {
            Some(h) => (h.created_by.and_then(|p| p.display_name), h.created_date),
            None => (None, None),
        };
        let (version, last_modified_by, last_modified) = match self.version {
            Some(v) => (v.number, v.by.and_then(|p| p.display_name), v.when),
            None => (None, None, None),
        };

        PageMeta {
            title: self.title,
            id: self.id,
            created_by,
            created_date,
            version,
            last_modified_by,
            last_modified,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use tokio::task::JoinHandle;

    /// Serve one canned response on loopback; the handle yields the raw request
    async fn serve_once(
        status: &'static str,
        body: &'static str,
    ) -> (String, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut request = Vec::new();
            let mut buf = [0u8; 1024];
            while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                let n = socket.read(&mut buf).await.unwrap();
                if n == 0 {
                    break;
                }
                request.extend_from_slice(&buf[..n]);
            }

            let response = format!(
                "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status,
                body.len(),
                body
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            let _ = socket.shutdown().await;
            String::from_utf8_lossy(&request).into_owned()
        });

        (format!("http://{}", addr), handle)
    }

    fn loopback_client(base_url: &str, token: &str) -> WikiClient {
        WikiClient {
            token: Some(SecretString::from(token.to_string())),
            content_url: format!("{}/{}", base_url, CONTENT_PATH),
            client: reqwest::Client::builder().no_proxy().build().unwrap(),
        }
    }

    #[tokio::test]
    async fn test_error_status_body_is_still_parsed() {
        let (base, server) =
            serve_once("500 Internal Server Error", r#"{"id": "7", "title": "Known Page"}"#).await;
        let client = loopback_client(&base, "pat-123");

        let meta = client.page_meta(&PageId::from("7")).await.unwrap();
        assert_eq!(meta.title, "Known Page");
        assert_eq!(meta.id, "7");

        let request = server.await.unwrap();
        assert!(request.starts_with("GET /rest/api/content/7 "));
    }

    #[tokio::test]
    async fn test_lookup_sends_values_verbatim_with_bearer() {
        let (base, server) = serve_once("200 OK", r#"{"results": [{"id": "42"}], "size": 1}"#).await;
        let client = loopback_client(&base, "pat-123");

        let id = client.find_page_id("Known+Page", "HR").await.unwrap();
        assert_eq!(id, Some(PageId::from("42")));

        let request = server.await.unwrap();
        let request_line = request.lines().next().unwrap();
        assert!(request_line.contains("title=Known+Page&spaceKey=HR"));
        assert!(
            request
                .lines()
                .any(|l| l.eq_ignore_ascii_case("authorization: Bearer pat-123"))
        );
    }

    #[tokio::test]
    async fn test_unparseable_error_body_is_api_error() {
        let (base, server) = serve_once("404 Not Found", "not json").await;
        let client = loopback_client(&base, "pat-123");

        let err = client.page_meta(&PageId::from("9")).await.unwrap_err();
        assert!(matches!(err, FlowError::Api { .. }));
        assert!(err.to_string().contains("HTTP 404"));
        server.await.unwrap();
    }

    #[test]
    fn test_content_response_to_meta() {
        let json = r#"{
            "id": "123456",
            "type": "page",
            "title": "Leave Policy",
            "history": {
                "createdBy": {"displayName": "Ada Lovelace"},
                "createdDate": "2024-01-02T03:04:05.000Z"
            },
            "version": {
                "number": 12,
                "by": {"displayName": "Grace Hopper"},
                "when": "2024-05-06T07:08:09.000Z"
            }
        }"#;
        let content: ContentResponse = serde_json::from_str(json).unwrap();
        let meta = content.into_meta();

        assert_eq!(meta.title, "Leave Policy");
        assert_eq!(meta.id, "123456");
        assert_eq!(meta.created_by.as_deref(), Some("Ada Lovelace"));
        assert_eq!(meta.version, Some(12));
        assert_eq!(meta.last_modified_by.as_deref(), Some("Grace Hopper"));
    }

    #[test]
    fn test_content_response_with_body() {
        let json = r#"{
            "id": "1",
            "title": "T",
            "body": {"storage": {"value": "<p>hi</p>", "representation": "storage"}}
        }"#;
        let content: ContentResponse = serde_json::from_str(json).unwrap();
        assert_eq!(content.body.unwrap().storage.unwrap().value, "<p>hi</p>");
    }

    #[test]
    fn test_search_response() {
        let found: SearchResponse =
            serde_json::from_str(r#"{"results": [{"id": "55", "title": "x"}], "size": 1}"#)
                .unwrap();
        assert_eq!(found.results[0].id, "55");

        let empty: SearchResponse = serde_json::from_str(r#"{"size": 0}"#).unwrap();
        assert!(empty.results.is_empty());
    }

    #[test]
    fn test_client_urls_and_debug() {
        let config = WikiConfig {
            base_url: "https://wiki.example.com/".to_string(),
            token: Some("pat-123".to_string()),
            ..WikiConfig::default()
        };
        let client = WikiClient::new(&config).unwrap();
        assert_eq!(
            client.content_url,
            "https://wiki.example.com/rest/api/content"
        );
        let debug = format!("{:?}", client);
        assert!(!debug.contains("pat-123"));
        assert!(debug.contains("[REDACTED]"));
    }
}
