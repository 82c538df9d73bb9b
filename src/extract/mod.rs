//! Table Flattening Engine
//!
//! Converts one page's storage-format HTML into flat tables:
//!
//! ```text
//! HTML ──► sections (ui-expand walk) ──► flatten_table ──► CellNode dispatch
//!   │                                                        ├─ List    → "- item" lines
//!   │                                                        ├─ Table   → markdown table
//!   │                                                        ├─ Wrapper → one level deeper
//!   │                                                        └─ Text    → trimmed text
//!   └──► summary (first table + page metadata)
//! ```
//!
//! Sheet names for the resulting tables come from [`sheet_name`].

pub mod markdown;
pub mod node;
pub mod section;
pub mod sheet_name;
pub mod summary;
pub mod table;

pub use node::CellNode;
pub use section::{SectionTable, extract_sections};
pub use sheet_name::{SheetNamer, section_sheet_names, sheet_names};
pub use summary::{PageMeta, summary_table};
pub use table::flatten_table;

use scraper::Html;

use crate::types::Table;

/// Everything extracted from one page
#[derive(Debug, Clone)]
pub struct PageExtract {
    pub summary: Table,
    pub sections: Vec<SectionTable>,
}

impl PageExtract {
    /// Parse storage HTML and flatten it
    pub fn from_html(html: &str, meta: &PageMeta, nested_marker: Option<&str>) -> Self {
        let doc = Html::parse_document(html);
        Self {
            summary: summary_table(&doc, meta),
            sections: extract_sections(&doc, nested_marker),
        }
    }

    /// Sheet names for the sections, in order, avoiding the summary sheet
    pub fn sheet_names(&self) -> Vec<String> {
        let labels: Vec<&str> = self.sections.iter().map(|s| s.label.as_str()).collect();
        section_sheet_names(&labels)
    }
}
