//! Cell content classification
//!
//! Every element found inside a table cell is one of four shapes, and each
//! shape has exactly one flattening rule. Dispatch is a small recursive
//! descent whose depth is checked against `MAX_CELL_DEPTH` instead of being
//! assumed by the call structure.

use scraper::ElementRef;

use super::markdown::{render_list, render_table};
use crate::constants::extract::MAX_CELL_DEPTH;
use crate::constants::markup::CONTENT_WRAPPER_CLASS;

/// Shape of an element nested in a table cell
#[derive(Debug, Clone, Copy)]
pub enum CellNode<'a> {
    /// Bulleted items, rendered as `- item` lines
    List(ElementRef<'a>),
    /// Nested table, rendered as a markdown table
    Table(ElementRef<'a>),
    /// Generic container whose children are dispatched one level deeper
    Wrapper(ElementRef<'a>),
    /// Anything else, rendered as trimmed text
    Text(ElementRef<'a>),
}

impl<'a> CellNode<'a> {
    /// Classify an element found at `depth` below the cell.
    ///
    /// Wrappers are only recognized above the depth limit; at the limit they
    /// fall through to the list/table/text rules.
    pub fn classify(el: ElementRef<'a>, depth: usize) -> Self {
        if depth < MAX_CELL_DEPTH && is_wrapper(el) {
            CellNode::Wrapper(el)
        } else if is_list(el) {
            CellNode::List(el)
        } else if is_table(el) {
            CellNode::Table(el)
        } else {
            CellNode::Text(el)
        }
    }

    /// Render this node into one string per produced part
    pub fn render(self, depth: usize) -> Vec<String> {
        match self {
            CellNode::List(el) => vec![render_list(el)],
            CellNode::Table(el) => vec![render_table(el)],
            CellNode::Text(el) => vec![text_of(el)],
            CellNode::Wrapper(el) => {
                let children: Vec<_> = child_elements(el).collect();
                if children.is_empty() {
                    return vec![text_of(el)];
                }
                children
                    .into_iter()
                    .flat_map(|child| CellNode::classify(child, depth + 1).render(depth + 1))
                    .collect()
            }
        }
    }
}

// =============================================================================
// Element helpers
// =============================================================================

/// Concatenated descendant text, trimmed
pub fn text_of(el: ElementRef<'_>) -> String {
    el.text().collect::<String>().trim().to_string()
}

/// Direct element children, skipping text and comment nodes
pub fn child_elements<'a>(el: ElementRef<'a>) -> impl Iterator<Item = ElementRef<'a>> {
    el.children().filter_map(ElementRef::wrap)
}

/// Element descendants in document order, excluding `el` itself
pub fn descendant_elements<'a>(el: ElementRef<'a>) -> impl Iterator<Item = ElementRef<'a>> {
    el.descendants().skip(1).filter_map(ElementRef::wrap)
}

/// First descendant with the given tag name
pub fn find_descendant<'a>(el: ElementRef<'a>, name: &str) -> Option<ElementRef<'a>> {
    descendant_elements(el).find(|d| d.value().name() == name)
}

pub fn has_descendant(el: ElementRef<'_>, name: &str) -> bool {
    find_descendant(el, name).is_some()
}

pub fn has_child_elements(el: ElementRef<'_>) -> bool {
    child_elements(el).next().is_some()
}

fn is_wrapper(el: ElementRef<'_>) -> bool {
    el.value().classes().any(|c| c == CONTENT_WRAPPER_CLASS)
}

fn is_list(el: ElementRef<'_>) -> bool {
    matches!(el.value().name(), "ul" | "ol" | "li") || has_descendant(el, "li")
}

fn is_table(el: ElementRef<'_>) -> bool {
    el.value().name() == "table" || has_descendant(el, "tbody")
}

#[cfg(test)]
mod tests {
    use super::*;
    use scraper::Html;

    fn first<'a>(doc: &'a Html, name: &str) -> ElementRef<'a> {
        find_descendant(doc.root_element(), name).unwrap()
    }

    #[test]
    fn test_classify_shapes() {
        let doc = Html::parse_document(
            "<div class=\"content-wrapper\"><p>x</p></div>\
             <ul><li>a</li></ul>\
             <table><tr><td>1</td></tr></table>\
             <span>plain</span>",
        );
        assert!(matches!(
            CellNode::classify(first(&doc, "div"), 0),
            CellNode::Wrapper(_)
        ));
        assert!(matches!(
            CellNode::classify(first(&doc, "ul"), 0),
            CellNode::List(_)
        ));
        assert!(matches!(
            CellNode::classify(first(&doc, "table"), 0),
            CellNode::Table(_)
        ));
        assert!(matches!(
            CellNode::classify(first(&doc, "span"), 0),
            CellNode::Text(_)
        ));
    }

    #[test]
    fn test_wrapper_not_recognized_at_depth_limit() {
        let doc = Html::parse_document("<div class=\"content-wrapper\"><p>x</p></div>");
        assert!(matches!(
            CellNode::classify(first(&doc, "div"), MAX_CELL_DEPTH),
            CellNode::Text(_)
        ));
    }

    #[test]
    fn test_wrapper_renders_each_child() {
        let doc = Html::parse_document(
            "<div class=\"content-wrapper\"><p>intro</p><ul><li>a</li><li>b</li></ul></div>",
        );
        let parts = CellNode::classify(first(&doc, "div"), 0).render(0);
        assert_eq!(parts, vec!["intro".to_string(), "- a\n- b".to_string()]);
    }

    #[test]
    fn test_text_of_trims() {
        let doc = Html::parse_document("<p>  spaced out \n</p>");
        assert_eq!(text_of(first(&doc, "p")), "spaced out");
    }
}
