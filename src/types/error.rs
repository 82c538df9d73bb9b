//! Unified Error Type System
//!
//! Centralized error type for the whole application.
//!
//! ## Containment
//!
//! Batch jobs never abort on a single bad item. Per-row and per-page failures
//! are turned into a logged warning plus an absent value by the callers; only
//! configuration errors, an unreadable driving spreadsheet, or I/O failures on
//! the leave files end a command.

use thiserror::Error;

// =============================================================================
// Application Error
// =============================================================================

#[derive(Debug, Error)]
pub enum FlowError {
    // -------------------------------------------------------------------------
    // System Errors (auto From impl)
    // -------------------------------------------------------------------------
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Spreadsheet read error: {0}")]
    SpreadsheetRead(#[from] calamine::Error),

    #[error("Spreadsheet write error: {0}")]
    SpreadsheetWrite(#[from] rust_xlsxwriter::XlsxError),

    #[error("Glob pattern error: {0}")]
    Pattern(#[from] glob::PatternError),

    // -------------------------------------------------------------------------
    // Wiki Errors
    // -------------------------------------------------------------------------
    /// Link that none of the resolution heuristics understood
    #[error("Unrecognized link '{link}': {reason}")]
    Link { link: String, reason: String },

    /// Short-link token that does not decode to a page id
    #[error("Invalid short link token '{token}': {reason}")]
    ShortLink { token: String, reason: String },

    /// Wiki API returned a payload we cannot use
    #[error("Wiki API error for {resource}: {message}")]
    Api { resource: String, message: String },

    // -------------------------------------------------------------------------
    // Domain Errors
    // -------------------------------------------------------------------------
    #[error("Config error: {0}")]
    Config(String),

    #[error("Missing column '{column}' in {path}")]
    MissingColumn { column: String, path: String },

    #[error("No file matching '{0}'")]
    NoMatchingFile(String),

    #[error("Workbook has no worksheets: {0}")]
    EmptyWorkbook(String),

    #[error("Timeout after {secs}s: {operation}")]
    Timeout { operation: String, secs: u64 },

    #[error("{0}")]
    Context(String),
}

pub type Result<T> = std::result::Result<T, FlowError>;

// =============================================================================
// Helper Functions
// =============================================================================

impl FlowError {
    /// Create an API error for a resource
    pub fn api(resource: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Api {
            resource: resource.into(),
            message: message.into(),
        }
    }

    /// Create a link error
    pub fn link(link: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Link {
            link: link.into(),
            reason: reason.into(),
        }
    }

    /// Create a short-link error
    pub fn short_link(token: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::ShortLink {
            token: token.into(),
            reason: reason.into(),
        }
    }
}

/// Context extension trait for adding context to errors
pub trait ResultExt<T> {
    /// Add context to an error
    fn with_context<C: Into<String>>(self, context: C) -> Result<T>;

    /// Add context using a closure (lazy evaluation)
    fn with_context_fn<F, C>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: Into<String>;
}

impl<T, E: std::error::Error + Send + Sync + 'static> ResultExt<T> for std::result::Result<T, E> {
    fn with_context<C: Into<String>>(self, context: C) -> Result<T> {
        self.map_err(|e| FlowError::Context(format!("{}: {}", context.into(), e)))
    }

    fn with_context_fn<F, C>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: Into<String>,
    {
        self.map_err(|e| FlowError::Context(format!("{}: {}", f().into(), e)))
    }
}

// =============================================================================
// Tests
// =============================================================================
