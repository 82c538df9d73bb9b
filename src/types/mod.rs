pub mod cell;
pub mod error;

pub use cell::{Cell, Table};
pub use error::{FlowError, Result, ResultExt};

// =============================================================================
// Domain Newtypes
// =============================================================================

use std::fmt;

/// Type-safe wrapper for wiki page ids
///
/// Page ids arrive as digit strings from links, as JSON strings from the
/// title lookup, and as decoded integers from short links. They are kept as
/// strings because they are only ever interpolated into URLs and file names.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PageId(String);

impl PageId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for PageId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for PageId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<u64> for PageId {
    fn from(id: u64) -> Self {
        Self(id.to_string())
    }
}

impl AsRef<str> for PageId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// One row of the driving spreadsheet
#[derive(Debug, Clone, PartialEq)]
pub struct DrivingRow {
    /// Zero-based data row index (header excluded), used in diagnostics
    pub index: usize,
    /// Tracked item identifier
    pub id: String,
    /// Raw documentation link, if the cell held text
    pub link: Option<String>,
    /// Page id after resolution
    pub page_id: Option<PageId>,
}

impl DrivingRow {
    pub fn new(index: usize, id: impl Into<String>, link: Option<String>) -> Self {
        Self {
            index,
            id: id.into(),
            link,
            page_id: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_id_conversions() {
        assert_eq!(PageId::from(42u64).as_str(), "42");
        assert_eq!(PageId::from("123").to_string(), "123");
        assert!(PageId::from("100") < PageId::from("200"));
    }
}
