//! Expandable-section walk
//!
//! Turns a page's storage-format HTML into one `SectionTable` per section.
//!
//! ## Rules
//!
//! - Top-level `ui-expand` macros are visited in document order; macros nested
//!   inside another expand are only emitted through their parent.
//! - A section whose title contains the nested marker and which holds nested
//!   expands yields one table per nested expand, labelled
//!   `<parent title> <child title>`.
//! - Any other section yields one table, or a single `Section` cell when it
//!   holds no table.

use scraper::{ElementRef, Html};
use tracing::{debug, warn};

use super::node::{descendant_elements, has_descendant, text_of};
use super::table::flatten_table;
use crate::constants::extract::{MAX_SECTION_DEPTH, SECTION_COLUMN};
use crate::constants::markup::{EXPAND_MACRO, MACRO_TAG, NAME_ATTR, PARAMETER_TAG, TITLE_PARAM};
use crate::types::Table;

/// One flattened section of a page
#[derive(Debug, Clone, PartialEq)]
pub struct SectionTable {
    /// Section label (also stored in the table's `Section` column)
    pub label: String,
    pub table: Table,
}

impl SectionTable {
    fn new(label: String, mut table: Table) -> Self {
        table.set_column(SECTION_COLUMN, &label);
        Self { label, table }
    }

    /// One-row, one-column table holding just the label
    fn title_only(label: String) -> Self {
        let mut table = Table::new(Vec::new());
        table.push_row(Vec::new());
        Self::new(label, table)
    }
}

/// Flatten every expandable section of a page
pub fn extract_sections(doc: &Html, nested_marker: Option<&str>) -> Vec<SectionTable> {
    let mut sections = Vec::new();

    for expand in descendant_elements(doc.root_element()).filter(|el| is_expand(*el)) {
        if expand_depth(expand, None) > 0 {
            continue;
        }

        let title = section_title(expand);
        debug!("Section: {}", title);

        let is_marked = nested_marker.is_some_and(|m| title.contains(m));
        if is_marked {
            let nested = nested_expands(expand);
            if !nested.is_empty() {
                for sub in nested {
                    let label = format!("{} {}", title, section_title(sub));
                    sections.push(section_from(sub, label));
                }
                continue;
            }
        }

        sections.push(section_from(expand, title));
    }

    sections
}

fn section_from(el: ElementRef<'_>, label: String) -> SectionTable {
    if !has_descendant(el, "table") {
        return SectionTable::title_only(label);
    }
    match flatten_table(el) {
        Some(table) => SectionTable::new(label, table),
        None => SectionTable::title_only(label),
    }
}

/// Nested expands of `parent`, rejecting any deeper than `MAX_SECTION_DEPTH`
fn nested_expands<'a>(parent: ElementRef<'a>) -> Vec<ElementRef<'a>> {
    descendant_elements(parent)
        .filter(|el| is_expand(*el))
        .filter(|el| {
            let depth = expand_depth(*el, Some(parent)) + 1;
            if depth > MAX_SECTION_DEPTH {
                warn!(
                    "Skipping section '{}' nested {} levels deep (max {})",
                    section_title(*el),
                    depth,
                    MAX_SECTION_DEPTH
                );
                false
            } else {
                true
            }
        })
        .collect()
}

/// Title parameter belonging to this macro (not to a nested one), or empty
fn section_title(expand: ElementRef<'_>) -> String {
    descendant_elements(expand)
        .filter(|el| el.value().name() == PARAMETER_TAG)
        .filter(|el| el.value().attr(NAME_ATTR) == Some(TITLE_PARAM))
        .find(|el| owning_macro(*el) == Some(expand))
        .map(text_of)
        .unwrap_or_default()
}

fn is_expand(el: ElementRef<'_>) -> bool {
    el.value().name() == MACRO_TAG && el.value().attr(NAME_ATTR) == Some(EXPAND_MACRO)
}

fn is_macro(el: ElementRef<'_>) -> bool {
    el.value().name() == MACRO_TAG
}

fn owning_macro<'a>(el: ElementRef<'a>) -> Option<ElementRef<'a>> {
    el.ancestors().filter_map(ElementRef::wrap).find(|a| is_macro(*a))
}

/// Number of expand ancestors of `el`, stopping at `stop` when given
fn expand_depth(el: ElementRef<'_>, stop: Option<ElementRef<'_>>) -> usize {
    el.ancestors()
        .filter_map(ElementRef::wrap)
        .take_while(|a| Some(*a) != stop)
        .filter(|a| is_expand(*a))
        .count()
}
