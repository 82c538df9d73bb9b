//! Summary sheet: the page's leading header/description table followed by
//! page metadata from the API.

use scraper::{ElementRef, Html};

use super::node::{descendant_elements, find_descendant, text_of};
use crate::constants::extract::{SUMMARY_DESCRIPTION_COLUMN, SUMMARY_HEADER_COLUMN};
use crate::types::{Cell, Table};

/// Page metadata shown at the bottom of the summary sheet
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PageMeta {
    pub title: String,
    pub id: String,
    pub created_by: Option<String>,
    pub created_date: Option<String>,
    pub version: Option<u64>,
    pub last_modified_by: Option<String>,
    pub last_modified: Option<String>,
}

impl PageMeta {
    fn rows(&self) -> Vec<(&'static str, Cell)> {
        vec![
            ("Page Title", Cell::text(self.title.as_str())),
            ("Page ID", Cell::text(self.id.as_str())),
            ("Created By", Cell::opt_text(self.created_by.as_deref())),
            ("Created Date", Cell::opt_text(self.created_date.as_deref())),
            (
                "Current Version",
                self.version
                    .map(|v| Cell::Number(v as f64))
                    .unwrap_or(Cell::Empty),
            ),
            ("Last Modified By", Cell::opt_text(self.last_modified_by.as_deref())),
            ("Last Modified Date", Cell::opt_text(self.last_modified.as_deref())),
        ]
    }
}

/// Build the summary table for a page
pub fn summary_table(doc: &Html, meta: &PageMeta) -> Table {
    let mut table = Table::new(vec![
        SUMMARY_HEADER_COLUMN.to_string(),
        SUMMARY_DESCRIPTION_COLUMN.to_string(),
    ]);

    if let Some(first) = find_descendant(doc.root_element(), "table") {
        for tr in descendant_elements(first).filter(|el| el.value().name() == "tr") {
            table.push_row(vec![first_text(tr, "th"), first_text(tr, "td")]);
        }
    }

    for (header, value) in meta.rows() {
        table.push_row(vec![Cell::text(header), value]);
    }

    table
}

fn first_text(tr: ElementRef<'_>, name: &str) -> Cell {
    Cell::opt_text(find_descendant(tr, name).map(text_of))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn meta() -> PageMeta {
        PageMeta {
            title: "Payroll Rules".to_string(),
            id: "123456".to_string(),
            created_by: Some("Ada".to_string()),
            created_date: Some("2024-01-02T03:04:05.000Z".to_string()),
            version: Some(7),
            last_modified_by: Some("Grace".to_string()),
            last_modified: Some("2024-02-03T04:05:06.000Z".to_string()),
        }
    }

    #[test]
    fn test_summary_pairs_then_metadata() {
        let doc = Html::parse_document(
            "<table><tbody>\
             <tr><th>Owner</th><td>HR</td></tr>\
             <tr><th>Status</th><td>Live</td></tr>\
             </tbody></table>\
             <table><tbody><tr><th>Ignored</th><td>x</td></tr></tbody></table>",
        );
        let table = summary_table(&doc, &meta());

        assert_eq!(table.columns(), ["Header", "Description"]);
        assert_eq!(table.row_count(), 2 + 7);
        assert_eq!(table.rows()[0], vec![Cell::text("Owner"), Cell::text("HR")]);
        assert_eq!(table.rows()[2][0], Cell::text("Page Title"));
        assert_eq!(table.rows()[6], vec![Cell::text("Current Version"), Cell::Number(7.0)]);
    }

    #[test]
    fn test_missing_cells_are_empty() {
        let doc = Html::parse_document(
            "<table><tbody><tr><th>Only header</th></tr></tbody></table>",
        );
        let table = summary_table(&doc, &meta());
        assert_eq!(table.rows()[0], vec![Cell::text("Only header"), Cell::Empty]);
    }

    #[test]
    fn test_page_without_table_has_metadata_only() {
        let doc = Html::parse_document("<p>No tables</p>");
        let table = summary_table(&doc, &PageMeta::default());
        assert_eq!(table.row_count(), 7);
        assert_eq!(table.rows()[4][1], Cell::Empty);
    }
}
