//! Flattening of one table-bearing element into a `Table`.

use scraper::ElementRef;
use tracing::warn;

use super::node::{CellNode, child_elements, find_descendant, has_child_elements, text_of};
use crate::types::{Cell, Table};

/// Flatten the first `tbody` under `el`.
///
/// The first row supplies the column names. A table without body rows gets
/// one placeholder row of empty strings so every section yields a row.
/// Returns `None` when `el` holds no table body at all.
pub fn flatten_table(el: ElementRef<'_>) -> Option<Table> {
    let tbody = find_descendant(el, "tbody")?;

    let mut table: Option<Table> = None;
    for tr in child_elements(tbody).filter(|c| c.value().name() == "tr") {
        let parts = row_parts(tr);
        match table.as_mut() {
            None => table = Some(Table::new(parts)),
            Some(t) => {
                let dropped = t.push_row(parts.into_iter().map(Cell::Text).collect());
                if dropped > 0 {
                    warn!(
                        "Row {} has {} more cells than the header; extra cells dropped",
                        t.row_count(),
                        dropped
                    );
                }
            }
        }
    }

    let mut table = table.unwrap_or_default();
    if table.is_empty() {
        let placeholder = vec![Cell::text(""); table.columns().len()];
        table.push_row(placeholder);
    }
    Some(table)
}

fn row_parts(tr: ElementRef<'_>) -> Vec<String> {
    if !has_child_elements(tr) {
        return vec![text_of(tr)];
    }
    child_elements(tr).map(cell_text).collect()
}

/// Flatten one cell: plain text, or the newline-joined renderings of its
/// nested elements. A single rendering is used as-is.
pub fn cell_text(cell: ElementRef<'_>) -> String {
    if !has_child_elements(cell) {
        return text_of(cell);
    }

    let mut parts: Vec<String> = child_elements(cell)
        .flat_map(|child| CellNode::classify(child, 0).render(0))
        .collect();

    if parts.len() == 1 {
        parts.remove(0)
    } else {
        parts.join("\n")
    }
}
